//! Builders for model values shared by unit tests.

use super::{FileContext, TestCase, TestStep, UserStory};

pub(crate) fn sample_story(key: &str) -> UserStory {
    UserStory {
        key: key.to_owned(),
        summary: format!("{key} summary for the affiliate onboarding flow"),
        description: "As an admin I need access to onboarding data for business purposes"
            .to_owned(),
        acceptance_criteria: "The system shall provide information on the help page so that \
            the user can get assistance when they have questions and needs access for business \
            purposes."
            .to_owned(),
    }
}

pub(crate) fn sample_case(id: &str) -> TestCase {
    TestCase {
        id: id.to_owned(),
        title: format!("{id} title"),
        description: format!("{id} description"),
        steps: vec![TestStep {
            step_number: 1,
            action: "Open the help page".to_owned(),
            data: "NA".to_owned(),
            expected_result: "Help page is displayed".to_owned(),
        }],
    }
}

pub(crate) fn sample_cases(count: usize) -> Vec<TestCase> {
    (1..=count)
        .map(|number| sample_case(&format!("TC_{number:03}")))
        .collect()
}

pub(crate) fn sample_file_context(filename: &str, context: &str) -> FileContext {
    FileContext {
        filename: filename.to_owned(),
        context: context.to_owned(),
        message: "Context extracted".to_owned(),
    }
}
