//! Prints the built-in context templates.

use std::io::Write;

use casewright::WorkbenchError;
use casewright::context::built_in_templates;

use super::output::write_templates;

/// Writes every template to `writer`.
///
/// # Errors
///
/// Returns [`WorkbenchError::Io`] when the writer fails.
pub fn run<W: Write>(writer: &mut W) -> Result<(), WorkbenchError> {
    write_templates(writer, built_in_templates())
}
