//! Error types exposed by the workbench and its backend gateway.

use thiserror::Error;

/// Errors surfaced while validating input, orchestrating a flow, or talking
/// to the test generation backend.
///
/// None of these are fatal to a session: every failing operation leaves the
/// workbench interactive with its loading flags cleared.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkbenchError {
    /// Client-side validation rejected an input before any request was made.
    #[error("{field}: {message}")]
    Validation {
        /// Name of the rejected input field.
        field: String,
        /// User-facing explanation of the rule that failed.
        message: String,
    },

    /// The request never produced an HTTP response.
    #[error("network error talking to the backend: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {detail}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// `detail` or `message` extracted from the error body.
        detail: String,
    },

    /// The backend answered successfully but the body could not be decoded.
    #[error("unexpected backend response: {message}")]
    InvalidResponse {
        /// Decoding failure detail.
        message: String,
    },

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// A generation request is already in flight.
    #[error("test case generation is already in progress")]
    GenerationInProgress,

    /// Another request of the same kind is already in flight.
    #[error("{operation} is already in progress")]
    OperationInProgress {
        /// Human-readable operation name.
        operation: String,
    },

    /// An operation needed a selected user story and none was selected.
    #[error("no user story is selected")]
    NoStorySelected,

    /// The requested story key is not among the fetched stories.
    #[error("user story {key} was not found")]
    UnknownStory {
        /// Key that failed to match.
        key: String,
    },

    /// A file context is attached and must be removed first.
    #[error("a context file is already attached; remove it first")]
    ContextAlreadyAttached,

    /// The chosen file does not match the selected context kind.
    #[error("unsupported file: {message}")]
    UnsupportedFile {
        /// User-facing rejection message for the context kind.
        message: String,
    },

    /// The selected context kind does not take a file upload.
    #[error("context '{label}' does not accept a file upload")]
    ContextNotUploadable {
        /// Label of the selected context kind.
        label: String,
    },

    /// Export was requested with no generated test cases.
    #[error("there are no test cases to export")]
    NothingToExport,

    /// Upload was requested with no test cases available.
    #[error("please select at least one test case to upload")]
    NothingToUpload,
}

impl WorkbenchError {
    /// Builds a [`WorkbenchError::Validation`] for the given field.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for failures detected before any request was sent.
    #[must_use]
    pub const fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::GenerationInProgress
                | Self::OperationInProgress { .. }
                | Self::NoStorySelected
                | Self::UnknownStory { .. }
                | Self::ContextAlreadyAttached
                | Self::UnsupportedFile { .. }
                | Self::ContextNotUploadable { .. }
                | Self::NothingToExport
                | Self::NothingToUpload
        )
    }
}
