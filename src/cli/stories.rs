//! Fetches and lists stories from the tracker.

use std::io::Write;

use casewright::{CasewrightConfig, Workbench, WorkbenchError};

use super::output::{write_no_stories, write_stories};

/// Fetches the stories matching the configured query and lists them.
///
/// # Errors
///
/// Returns configuration errors for a missing key or query, and any
/// workbench error.
pub async fn run<W: Write>(
    workbench: &Workbench,
    config: &CasewrightConfig,
    writer: &mut W,
) -> Result<(), WorkbenchError> {
    let api_key = config.resolve_jira_api_key()?;
    let jql = config.require_jql()?;

    let count = workbench.fetch_stories(&api_key, jql).await?;
    if count == 0 {
        write_no_stories(writer)
    } else {
        write_stories(writer, &workbench.store().user_stories())
    }
}
