//! Workbench construction and context attachment shared by the modes.

use std::io::Write;
use std::sync::Arc;

use casewright::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use casewright::{
    CasewrightConfig, ContextKind, HttpBackendConfig, HttpBackendGateway, SessionStore,
    Workbench, WorkbenchError, files,
};

use super::output::write_notifications;

/// Builds a workbench talking to the configured backend.
///
/// # Errors
///
/// Returns [`WorkbenchError::Configuration`] for an invalid backend URL or
/// vocabulary file.
pub fn build(config: &CasewrightConfig) -> Result<Workbench, WorkbenchError> {
    let gateway = HttpBackendGateway::new(HttpBackendConfig::new(config.backend_url.as_str()))?;
    let telemetry: Arc<dyn TelemetrySink> = if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    };
    Ok(
        Workbench::new(SessionStore::shared(), gateway, config.requirement_validator()?)
            .with_telemetry(telemetry),
    )
}

/// Attaches the configured context: uploads a file or scrapes a page.
///
/// # Errors
///
/// Returns [`WorkbenchError::Configuration`] when the chosen context needs
/// a file or URL that is not configured, and any workbench error.
pub async fn attach_context(
    workbench: &Workbench,
    config: &CasewrightConfig,
) -> Result<(), WorkbenchError> {
    let kind = config.context_kind()?;
    workbench.choose_context(kind)?;

    if kind.is_file_upload() {
        let path = config
            .context_file
            .as_deref()
            .ok_or_else(|| WorkbenchError::Configuration {
                message: format!("context '{}' needs a file (use --context-file)", kind.label()),
            })?;
        let filename = path.file_name().unwrap_or(path.as_str());
        let contents = files::read_bytes(path)?;
        workbench.attach_file(filename, contents).await?;
    } else if kind == ContextKind::ScrapeUrl {
        let url = config
            .scrape_url
            .as_deref()
            .ok_or_else(|| WorkbenchError::Configuration {
                message: "scraping needs a page address (use --scrape-url)".to_owned(),
            })?;
        workbench.scrape(url).await?;
    }
    Ok(())
}

/// Writes and clears the workbench's pending notifications.
///
/// # Errors
///
/// Returns [`WorkbenchError::Io`] when the writer fails.
pub fn flush_notifications<W: Write>(
    workbench: &Workbench,
    writer: &mut W,
) -> Result<(), WorkbenchError> {
    write_notifications(writer, &workbench.take_notifications())
}
