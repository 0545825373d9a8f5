//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use camino::Utf8Path;
use casewright::context::ContextTemplate;
use casewright::{Notification, UserStory, WorkbenchError};

const SUMMARY_WIDTH: usize = 80;

/// Writes one line per fetched story.
pub fn write_stories<W: Write>(
    writer: &mut W,
    stories: &[UserStory],
) -> Result<(), WorkbenchError> {
    writeln!(writer, "User stories ({}):", stories.len()).map_err(|e| io_error(&e))?;
    for story in stories {
        let summary = first_line(&story.summary);
        writeln!(writer, "  {}  {summary}", story.key).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes a notice that the query matched nothing.
pub fn write_no_stories<W: Write>(writer: &mut W) -> Result<(), WorkbenchError> {
    writeln!(writer, "No user stories matched the query.").map_err(|e| io_error(&e))
}

/// Writes notifications as `[severity] message` lines.
pub fn write_notifications<W: Write>(
    writer: &mut W,
    notifications: &[Notification],
) -> Result<(), WorkbenchError> {
    for notification in notifications {
        writeln!(writer, "[{}] {}", notification.severity, notification.message)
            .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes every built-in context template under a heading.
pub fn write_templates<W: Write>(
    writer: &mut W,
    templates: &[ContextTemplate],
) -> Result<(), WorkbenchError> {
    for (index, template) in templates.iter().enumerate() {
        if index > 0 {
            writeln!(writer).map_err(|e| io_error(&e))?;
        }
        writeln!(
            writer,
            "== {} ({}, use with --context \"{}\") ==",
            template.title,
            template.id,
            template.kind.label()
        )
        .map_err(|e| io_error(&e))?;
        writeln!(writer, "{}", template.content).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes a rendered review page.
pub fn write_page<W: Write>(writer: &mut W, page: &str) -> Result<(), WorkbenchError> {
    write!(writer, "{page}").map_err(|e| io_error(&e))?;
    if !page.ends_with('\n') {
        writeln!(writer).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Reports where the spreadsheet export was saved.
pub fn write_export_path<W: Write>(
    writer: &mut W,
    path: &Utf8Path,
) -> Result<(), WorkbenchError> {
    writeln!(writer, "Saved test cases to {path}").map_err(|e| io_error(&e))
}

fn first_line(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= SUMMARY_WIDTH {
        return line.to_owned();
    }
    let mut cut: String = line.chars().take(SUMMARY_WIDTH.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

/// Converts an I/O error to a [`WorkbenchError::Io`].
pub(crate) fn io_error(error: &io::Error) -> WorkbenchError {
    WorkbenchError::Io {
        message: error.to_string(),
    }
}
