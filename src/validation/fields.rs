//! Per-field rules for the tracker setup, story editing and scraping forms.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

use crate::error::WorkbenchError;
use crate::models::StoryEdit;

const MIN_JQL_CHARS: usize = 10;
const MIN_SUMMARY_CHARS: usize = 25;
const MIN_DESCRIPTION_CHARS: usize = 25;
const MIN_ACCEPTANCE_CRITERIA_CHARS: usize = 120;

/// Input fields that carry inline validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Tracker API key.
    JiraApiKey,
    /// Tracker query selecting the stories to fetch.
    JqlQuery,
    /// Story summary in the edit form.
    Summary,
    /// Story description in the edit form.
    Description,
    /// Story acceptance criteria in the edit form.
    AcceptanceCriteria,
    /// Page address to scrape for context.
    ScrapeUrl,
    /// Free-text requirement typed in manual mode.
    ManualRequirement,
}

impl Field {
    /// Stable identifier used in error values.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::JiraApiKey => "jira_api_key",
            Self::JqlQuery => "jql",
            Self::Summary => "summary",
            Self::Description => "description",
            Self::AcceptanceCriteria => "acceptance_criteria",
            Self::ScrapeUrl => "scrape_url",
            Self::ManualRequirement => "manual_input",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Inline error messages for one form, keyed by field.
///
/// Focusing a field clears its message; leaving it records the outcome of
/// its rule. Submission is blocked while any message is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: BTreeMap<Field, String>,
}

impl FieldErrors {
    /// Creates an empty error map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the message for `field` when the user returns to it.
    pub fn focus(&mut self, field: Field) {
        self.messages.remove(&field);
    }

    /// Records the result of checking `field` when the user leaves it.
    pub fn blur(&mut self, field: Field, result: Result<(), WorkbenchError>) {
        match result {
            Ok(()) => {
                self.messages.remove(&field);
            }
            Err(error) => {
                self.messages.insert(field, message_of(error));
            }
        }
    }

    /// Returns the message currently shown for `field`.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    /// Returns true when any field has a message.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Clears every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Converts the first recorded message into an error.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Validation`] for the first field (in
    /// declaration order) that carries a message.
    pub fn into_result(self) -> Result<(), WorkbenchError> {
        self.messages
            .into_iter()
            .next()
            .map_or(Ok(()), |(field, message)| {
                Err(WorkbenchError::validation(field.name(), message))
            })
    }
}

fn message_of(error: WorkbenchError) -> String {
    match error {
        WorkbenchError::Validation { message, .. } => message,
        other => other.to_string(),
    }
}

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn require_min_chars(
    field: Field,
    value: &str,
    min: usize,
    message: &str,
) -> Result<(), WorkbenchError> {
    if trimmed_len(value) < min {
        Err(WorkbenchError::validation(field.name(), message))
    } else {
        Ok(())
    }
}

/// Checks a tracker query on its own.
///
/// # Errors
///
/// Returns [`WorkbenchError::Validation`] when the trimmed query is shorter
/// than ten characters.
pub fn check_jql(jql: &str) -> Result<(), WorkbenchError> {
    require_min_chars(Field::JqlQuery, jql, MIN_JQL_CHARS, "Invalid JQL query")
}

/// Checks the tracker setup form before fetching stories.
///
/// # Errors
///
/// Returns [`WorkbenchError::Validation`] when either field is blank or the
/// query is too short.
pub fn check_jira_setup(api_key: &str, jql: &str) -> Result<(), WorkbenchError> {
    if api_key.trim().is_empty() {
        return Err(WorkbenchError::validation(
            Field::JiraApiKey.name(),
            "Invalid fields in Jira Setup section!!!",
        ));
    }
    if jql.trim().is_empty() {
        return Err(WorkbenchError::validation(
            Field::JqlQuery.name(),
            "Invalid fields in Jira Setup section!!!",
        ));
    }
    check_jql(jql)
}

/// Checks a story edit, returning every failing field.
#[must_use]
pub fn check_story_edit(edit: &StoryEdit) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.blur(
        Field::Summary,
        require_min_chars(
            Field::Summary,
            &edit.summary,
            MIN_SUMMARY_CHARS,
            "Summary should be at least 25 characters",
        ),
    );
    errors.blur(
        Field::Description,
        require_min_chars(
            Field::Description,
            &edit.description,
            MIN_DESCRIPTION_CHARS,
            "Description should be at least 25 characters",
        ),
    );
    errors.blur(
        Field::AcceptanceCriteria,
        require_min_chars(
            Field::AcceptanceCriteria,
            &edit.acceptance_criteria,
            MIN_ACCEPTANCE_CRITERIA_CHARS,
            "Acceptance Criteria should be at least 120 characters",
        ),
    );
    errors
}

/// Checks and parses a page address to scrape.
///
/// # Errors
///
/// Returns [`WorkbenchError::Validation`] when the address is blank or not
/// an absolute URL.
pub fn check_scrape_url(raw: &str) -> Result<Url, WorkbenchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WorkbenchError::validation(
            Field::ScrapeUrl.name(),
            "Scrape URL cannot be empty.",
        ));
    }
    Url::parse(trimmed).map_err(|_| {
        WorkbenchError::validation(Field::ScrapeUrl.name(), "Please enter a valid URL.")
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{
        Field, FieldErrors, check_jira_setup, check_jql, check_scrape_url, check_story_edit,
    };
    use crate::error::WorkbenchError;
    use crate::models::StoryEdit;

    #[rstest]
    #[case("", "project = BANK", "jira_api_key")]
    #[case("secret", "   ", "jql")]
    #[case("secret", "key = A", "jql")]
    fn jira_setup_rejects_incomplete_forms(
        #[case] api_key: &str,
        #[case] jql: &str,
        #[case] field: &str,
    ) {
        let error = check_jira_setup(api_key, jql).expect_err("form should be rejected");

        assert!(
            matches!(error, WorkbenchError::Validation { field: ref actual, .. } if actual == field),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn jira_setup_accepts_complete_form() {
        assert!(check_jira_setup("secret", "project = BANK AND issuetype = Story").is_ok());
    }

    #[rstest]
    #[case("", "Scrape URL cannot be empty.")]
    #[case("not a url", "Please enter a valid URL.")]
    fn scrape_url_rules(#[case] raw: &str, #[case] expected: &str) {
        let error = check_scrape_url(raw).expect_err("URL should be rejected");

        assert_eq!(error, WorkbenchError::validation("scrape_url", expected));
    }

    #[test]
    fn scrape_url_parses_absolute_address() {
        let url = check_scrape_url(" https://bank.example/help ").expect("URL should parse");

        assert_eq!(url.host_str(), Some("bank.example"));
    }

    #[test]
    fn story_edit_reports_every_short_field() {
        let edit = StoryEdit {
            summary: "too short".to_owned(),
            description: "Long enough description for the story".to_owned(),
            acceptance_criteria: "short".to_owned(),
        };

        let errors = check_story_edit(&edit);

        assert_eq!(
            errors.message(Field::Summary),
            Some("Summary should be at least 25 characters")
        );
        assert_eq!(errors.message(Field::Description), None);
        assert_eq!(
            errors.message(Field::AcceptanceCriteria),
            Some("Acceptance Criteria should be at least 120 characters")
        );
    }

    #[test]
    fn focus_clears_and_blur_records() {
        let mut errors = FieldErrors::new();
        errors.blur(Field::JqlQuery, check_jql("short"));
        assert!(errors.has_errors());

        errors.focus(Field::JqlQuery);

        assert!(!errors.has_errors());
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn into_result_reports_first_field_in_declaration_order() {
        let mut errors = FieldErrors::new();
        errors.blur(
            Field::AcceptanceCriteria,
            Err(WorkbenchError::validation("acceptance_criteria", "too short")),
        );
        errors.blur(
            Field::Summary,
            Err(WorkbenchError::validation("summary", "also too short")),
        );

        let error = errors.into_result().expect_err("errors should surface");

        assert_eq!(error, WorkbenchError::validation("summary", "also too short"));
    }
}
