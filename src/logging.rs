//! Structured logging set-up for the command-line client.
//!
//! Log lines go to stderr so stdout stays reserved for command output. The
//! filter comes from `RUST_LOG` when set, then from the configured level,
//! and defaults to `warn`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::error::WorkbenchError;

/// Filter used when neither `RUST_LOG` nor a configured level is present.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Builds the log filter.
///
/// # Errors
///
/// Returns [`WorkbenchError::Configuration`] when the configured directive
/// does not parse.
pub fn build_filter(configured: Option<&str>) -> Result<EnvFilter, WorkbenchError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directive = configured
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_LOG_FILTER);
    EnvFilter::try_new(directive).map_err(|error| WorkbenchError::Configuration {
        message: format!("invalid log level '{directive}': {error}"),
    })
}

/// Installs the global subscriber.
///
/// A subscriber installed earlier (for example by a test harness) is kept.
///
/// # Errors
///
/// Returns [`WorkbenchError::Configuration`] when the filter is invalid.
pub fn init(configured: Option<&str>) -> Result<(), WorkbenchError> {
    let filter = build_filter(configured)?;
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
    Ok(())
}
