//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.casewright.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `CASEWRIGHT_*`, plus the legacy
//!    `JIRA_API_KEY`
//! 4. **Command-line arguments** – `--jql`, `--story`, `--requirement`, ...
//!
//! # Configuration File
//!
//! ```toml
//! backend_url = "http://127.0.0.1:8000"
//! jira_api_key = "atlassian-token"
//! jql = "project = BANK AND issuetype = Story"
//! story = "BANK-42"
//! context = "Upload YAML"
//! context_file = "smartbank.yaml"
//! output = "test_cases.xlsx"
//! ```

use std::env;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::backend::DEFAULT_BACKEND_URL;
use crate::context::ContextKind;
use crate::error::WorkbenchError;
use crate::files;
use crate::validation::{RequirementValidator, Vocabulary};

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Print the built-in context templates.
    ShowTemplates,
    /// Check a requirement locally without contacting the backend.
    ValidateRequirement,
    /// Fetch and list stories from the tracker.
    ListStories,
    /// Generate test cases for one fetched story.
    GenerateFromStory,
    /// Generate test cases from a typed requirement.
    GenerateFromRequirement,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `CASEWRIGHT_BACKEND_URL` or `--backend-url`: Generation backend address
/// - `CASEWRIGHT_JIRA_API_KEY`, `JIRA_API_KEY`, or `--jira-api-key`: Tracker
///   API key
/// - `CASEWRIGHT_JQL` or `--jql`: Query selecting stories
/// - `CASEWRIGHT_STORY` or `--story`: Story key to generate for
///
/// # Example
///
/// ```no_run
/// use casewright::CasewrightConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = CasewrightConfig::load().expect("failed to load configuration");
/// let jql = config.require_jql().expect("JQL required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "CASEWRIGHT",
    discovery(
        dotfile_name = ".casewright.toml",
        config_file_name = "casewright.toml",
        app_name = "casewright"
    )
)]
pub struct CasewrightConfig {
    /// Base URL of the generation backend.
    ///
    /// Defaults to `http://127.0.0.1:8000`.
    #[ortho_config(cli_short = 'b')]
    pub backend_url: String,

    /// API key forwarded to the tracker through the backend.
    ///
    /// Can be provided via:
    /// - CLI: `--jira-api-key <KEY>` or `-k <KEY>`
    /// - Environment: `CASEWRIGHT_JIRA_API_KEY` or `JIRA_API_KEY` (legacy)
    /// - Config file: `jira_api_key = "..."`
    #[ortho_config(cli_short = 'k')]
    pub jira_api_key: Option<String>,

    /// Tracker query selecting the stories to fetch.
    #[ortho_config(cli_short = 'q')]
    pub jql: Option<String>,

    /// Key of the story to generate test cases for.
    #[ortho_config(cli_short = 's')]
    pub story: Option<String>,

    /// Requirement text for manual generation or validation.
    ///
    /// Story generation forwards it as additional context.
    #[ortho_config(cli_short = 'r')]
    pub requirement: Option<String>,

    /// File holding the requirement text, read when `requirement` is unset.
    #[ortho_config()]
    pub requirement_file: Option<Utf8PathBuf>,

    /// Context menu label (e.g. `Upload YAML`) or type tag (e.g. `yaml`).
    #[ortho_config(cli_short = 'c')]
    pub context: Option<String>,

    /// File uploaded as context.
    #[ortho_config(cli_short = 'f')]
    pub context_file: Option<Utf8PathBuf>,

    /// Page scraped for additional story context.
    #[ortho_config()]
    pub scrape_url: Option<String>,

    /// Path the spreadsheet export is written to.
    #[ortho_config(cli_short = 'o')]
    pub output: Option<Utf8PathBuf>,

    /// Pushes the generated test cases to the tracker.
    #[ortho_config(cli_short = 'U')]
    pub upload: bool,

    /// Comma-separated 1-based rows to upload (all rows when unset).
    #[ortho_config()]
    pub select: Option<String>,

    /// 1-based review page to print.
    #[ortho_config(cli_short = 'p')]
    pub page: Option<usize>,

    /// Word list replacing the built-in requirement vocabulary.
    #[ortho_config()]
    pub vocabulary_file: Option<Utf8PathBuf>,

    /// Template used to print the review page.
    #[ortho_config()]
    pub review_template: Option<Utf8PathBuf>,

    /// Prints the built-in context templates and exits.
    #[ortho_config(cli_short = 'T')]
    pub templates: bool,

    /// Validates the requirement locally and exits.
    #[ortho_config()]
    pub validate_only: bool,

    /// Records telemetry events to stderr as JSON lines.
    #[ortho_config()]
    pub telemetry: bool,

    /// Log filter directive (e.g. `info`, `casewright=debug`).
    ///
    /// `RUST_LOG` takes precedence when set.
    #[ortho_config()]
    pub log_level: Option<String>,
}

impl Default for CasewrightConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
            jira_api_key: None,
            jql: None,
            story: None,
            requirement: None,
            requirement_file: None,
            context: None,
            context_file: None,
            scrape_url: None,
            output: None,
            upload: false,
            select: None,
            page: None,
            vocabulary_file: None,
            review_template: None,
            templates: false,
            validate_only: false,
            telemetry: false,
            log_level: None,
        }
    }
}

impl CasewrightConfig {
    /// Determines the operation mode based on provided configuration.
    ///
    /// Template listing wins over everything, then local validation, then
    /// story generation, then manual generation. With none of those
    /// requested the stories are listed.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.templates {
            OperationMode::ShowTemplates
        } else if self.validate_only {
            OperationMode::ValidateRequirement
        } else if self.story.is_some() {
            OperationMode::GenerateFromStory
        } else if self.requirement.is_some() || self.requirement_file.is_some() {
            OperationMode::GenerateFromRequirement
        } else {
            OperationMode::ListStories
        }
    }

    /// Resolves the tracker API key, falling back to the legacy
    /// `JIRA_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Configuration`] when no source provides a
    /// non-blank key.
    pub fn resolve_jira_api_key(&self) -> Result<String, WorkbenchError> {
        self.jira_api_key
            .clone()
            .or_else(|| env::var("JIRA_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| WorkbenchError::Configuration {
                message: concat!(
                    "Jira API key is required (use --jira-api-key, ",
                    "CASEWRIGHT_JIRA_API_KEY, or JIRA_API_KEY)"
                )
                .to_owned(),
            })
    }

    /// Returns the tracker query or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Configuration`] when no query is configured.
    pub fn require_jql(&self) -> Result<&str, WorkbenchError> {
        self.jql
            .as_deref()
            .ok_or_else(|| WorkbenchError::Configuration {
                message: "a JQL query is required (use --jql or -q)".to_owned(),
            })
    }

    /// Returns the story key or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Configuration`] when no story is configured.
    pub fn require_story(&self) -> Result<&str, WorkbenchError> {
        self.story
            .as_deref()
            .ok_or_else(|| WorkbenchError::Configuration {
                message: "a story key is required (use --story or -s)".to_owned(),
            })
    }

    /// Returns the requirement text, reading `requirement_file` when no
    /// inline requirement is given.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Configuration`] when neither source is set
    /// and [`WorkbenchError::Io`] when the file cannot be read.
    pub fn resolve_requirement(&self) -> Result<String, WorkbenchError> {
        match (&self.requirement, &self.requirement_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => files::read_text(path),
            (None, None) => Err(WorkbenchError::Configuration {
                message: "a requirement is required (use --requirement or --requirement-file)"
                    .to_owned(),
            }),
        }
    }

    /// Returns the requirement text when one is configured.
    ///
    /// Story generation sends it as extra context, so its absence is not an
    /// error here.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Io`] when `requirement_file` cannot be read.
    pub fn optional_requirement(&self) -> Result<Option<String>, WorkbenchError> {
        if self.requirement.is_none() && self.requirement_file.is_none() {
            return Ok(None);
        }
        self.resolve_requirement().map(Some)
    }

    /// Resolves the configured context kind.
    ///
    /// Accepts either a menu label or a type tag, case-insensitively. With
    /// no `context` set, a context file implies the kind matching its
    /// extension and a scrape URL implies scraping; otherwise no context is
    /// used.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Configuration`] for an unknown label or a
    /// context file whose kind cannot be inferred.
    pub fn context_kind(&self) -> Result<ContextKind, WorkbenchError> {
        if let Some(raw) = self.context.as_deref() {
            let wanted = raw.trim();
            return ContextKind::ALL
                .iter()
                .copied()
                .find(|kind| {
                    kind.label().eq_ignore_ascii_case(wanted)
                        || kind.type_tag().eq_ignore_ascii_case(wanted)
                })
                .ok_or_else(|| WorkbenchError::Configuration {
                    message: format!("unknown context '{raw}'"),
                });
        }

        let Some(path) = self.context_file.as_deref() else {
            return Ok(if self.scrape_url.is_some() {
                ContextKind::ScrapeUrl
            } else {
                ContextKind::NoContext
            });
        };
        ContextKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.is_file_upload() && kind.accepts_file(path.as_str()))
            .ok_or_else(|| WorkbenchError::Configuration {
                message: format!("cannot infer a context kind for '{path}' (use --context)"),
            })
    }

    /// Parses `select` into zero-based row indices.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Configuration`] when an entry is not a
    /// positive integer.
    pub fn selected_rows(&self) -> Result<Vec<usize>, WorkbenchError> {
        let Some(raw) = self.select.as_deref() else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry
                    .parse::<usize>()
                    .ok()
                    .and_then(|row| row.checked_sub(1))
                    .ok_or_else(|| WorkbenchError::Configuration {
                        message: format!("invalid row '{entry}' in --select"),
                    })
            })
            .collect()
    }

    /// Zero-based review page.
    #[must_use]
    pub fn page_index(&self) -> usize {
        self.page.map_or(0, |page| page.saturating_sub(1))
    }

    /// Builds the requirement validator, loading `vocabulary_file` when set.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Io`] or [`WorkbenchError::Configuration`]
    /// when the vocabulary file cannot be used.
    pub fn requirement_validator(&self) -> Result<RequirementValidator, WorkbenchError> {
        match self.vocabulary_file.as_deref() {
            Some(path) => Ok(RequirementValidator::new(Vocabulary::load(path)?)),
            None => Ok(RequirementValidator::default()),
        }
    }
}

#[cfg(test)]
mod tests;
