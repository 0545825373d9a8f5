//! Context kinds, their labels, wire tags, and accepted file types.

use std::fmt;

use crate::error::WorkbenchError;

/// The context sources a user can choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextKind {
    /// No supplementary context.
    #[default]
    NoContext,
    /// A JSON document.
    Json,
    /// A YAML document.
    Yaml,
    /// A plain-text document.
    PlainText,
    /// A business requirements document (PDF, DOCX or image).
    Brd,
    /// A web page scraped by the backend.
    ScrapeUrl,
    /// Text typed by the user.
    ManualInput,
    /// A spreadsheet of existing test cases.
    ExistingTestCase,
}

impl ContextKind {
    /// Every kind, in menu order.
    pub const ALL: [Self; 8] = [
        Self::NoContext,
        Self::Json,
        Self::Yaml,
        Self::PlainText,
        Self::Brd,
        Self::ScrapeUrl,
        Self::ManualInput,
        Self::ExistingTestCase,
    ];

    /// Resolves a menu label; unknown labels resolve to `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// Menu label shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoContext => "No Context",
            Self::Json => "Upload JSON",
            Self::Yaml => "Upload YAML",
            Self::PlainText => "Upload Plain Text",
            Self::Brd => "Upload BRD",
            Self::ScrapeUrl => "Scrape URL",
            Self::ManualInput => "Manual Input",
            Self::ExistingTestCase => "Upload Existing Test Case",
        }
    }

    /// Type tag sent as `context_type` with uploads.
    #[must_use]
    pub const fn type_tag(self) -> &'static str {
        match self {
            Self::NoContext => "none",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::PlainText => "text",
            Self::Brd => "brd",
            Self::ScrapeUrl => "url",
            Self::ManualInput => "manual",
            Self::ExistingTestCase => "test_case",
        }
    }

    /// Returns true for kinds supplied by uploading a file.
    #[must_use]
    pub const fn is_file_upload(self) -> bool {
        !self.accepted_extensions().is_empty()
    }

    /// Lower-case file extensions (without the dot) this kind accepts.
    #[must_use]
    pub const fn accepted_extensions(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
            Self::PlainText => &["txt", "text"],
            Self::ExistingTestCase => &["csv", "xls", "xlsx"],
            Self::Brd => &[
                "pdf", "docx", "png", "jpg", "jpeg", "bmp", "tiff", "webp", "gif",
            ],
            Self::NoContext | Self::ScrapeUrl | Self::ManualInput => &[],
        }
    }

    /// Returns true when `filename` has one of the accepted extensions.
    #[must_use]
    pub fn accepts_file(self, filename: &str) -> bool {
        let lowered = filename.to_ascii_lowercase();
        lowered.rsplit_once('.').is_some_and(|(stem, extension)| {
            !stem.is_empty() && self.accepted_extensions().contains(&extension)
        })
    }

    /// Checks that `filename` may be uploaded as this kind.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::ContextNotUploadable`] for kinds without a
    /// file and [`WorkbenchError::UnsupportedFile`] for a mismatched
    /// extension.
    pub fn check_file(self, filename: &str) -> Result<(), WorkbenchError> {
        if !self.is_file_upload() {
            return Err(WorkbenchError::ContextNotUploadable {
                label: self.label().to_owned(),
            });
        }
        if self.accepts_file(filename) {
            Ok(())
        } else {
            Err(WorkbenchError::UnsupportedFile {
                message: self.rejection_message().to_owned(),
            })
        }
    }

    const fn rejection_message(self) -> &'static str {
        match self {
            Self::Json => {
                "Please upload a JSON file. Other file types are not supported for JSON context."
            }
            Self::Yaml => {
                "Please upload a YAML file. Other file types are not supported for YAML context."
            }
            Self::PlainText => {
                "Please upload a Text file. Other file types are not supported for document \
                 context."
            }
            Self::ExistingTestCase => {
                "Please upload a CSV, XLS, or XLSX file. Other file types are not supported for \
                 test case imports."
            }
            Self::Brd => {
                "Please upload a PDF, DOCX file or Image (PNG, JPG, JPEG, BMP, TIFF, WEBP, GIF) \
                 for BRD. Other file types are not supported for BRD."
            }
            Self::NoContext | Self::ScrapeUrl | Self::ManualInput => {
                "This context does not take a file."
            }
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Maps a context menu label to its wire type tag.
///
/// Total over all strings: unrecognised labels (including "No Context")
/// map to `"none"`.
#[must_use]
pub fn map_context_label(label: &str) -> &'static str {
    ContextKind::from_label(label).map_or("none", ContextKind::type_tag)
}
