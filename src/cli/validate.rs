//! Checks a requirement locally without contacting the backend.

use std::io::Write;

use casewright::validation::Field;
use casewright::{CasewrightConfig, WorkbenchError};

use super::output::io_error;

/// Validates the configured requirement.
///
/// # Errors
///
/// Returns [`WorkbenchError::Validation`] with the rejection message when
/// the requirement is not acceptable, and configuration or I/O errors when
/// it cannot be read.
pub fn run<W: Write>(config: &CasewrightConfig, writer: &mut W) -> Result<(), WorkbenchError> {
    let requirement = config.resolve_requirement()?;
    let validator = config.requirement_validator()?;
    validator.require_valid(Field::ManualRequirement.name(), &requirement)?;
    writeln!(writer, "Requirement looks valid.").map_err(|e| io_error(&e))
}

#[cfg(test)]
mod tests {
    use casewright::{CasewrightConfig, WorkbenchError};
    use rstest::rstest;

    use super::run;

    const GOOD_REQUIREMENT: &str = "The system shall provide information on the help page so \
        that the user can get assistance when they have questions and needs access for business \
        purposes.";

    #[rstest]
    fn valid_requirement_is_reported() {
        let config = CasewrightConfig {
            requirement: Some(GOOD_REQUIREMENT.to_owned()),
            ..Default::default()
        };

        let mut buffer = Vec::new();
        run(&config, &mut buffer).expect("requirement should pass");

        assert_eq!(buffer, b"Requirement looks valid.\n");
    }

    #[rstest]
    fn short_requirement_is_rejected_with_message() {
        let config = CasewrightConfig {
            requirement: Some("Too short".to_owned()),
            ..Default::default()
        };

        let mut buffer = Vec::new();
        let error = run(&config, &mut buffer).expect_err("requirement should fail");

        assert_eq!(
            error,
            WorkbenchError::validation(
                "manual_input",
                "Requirement should contain at least 120 characters."
            )
        );
        assert!(buffer.is_empty());
    }
}
