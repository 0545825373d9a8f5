//! Mock backend responses for the generation flow BDD tests.

use std::str::FromStr;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// Requirement text accepted by the built-in vocabulary.
pub(crate) const GOOD_REQUIREMENT: &str = "The system shall provide information on the help \
    page so that the user can get assistance when they have questions and needs access for \
    business purposes.";

/// Tracker link returned by the mocked upload endpoint.
pub(crate) const TEST_EXECUTION_URL: &str = "https://jira.example/browse/BANK-99";

/// Number of generated test cases for parameterised steps.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CaseCount(usize);

impl CaseCount {
    pub(crate) const fn value(self) -> usize {
        self.0
    }
}

impl FromStr for CaseCount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Builds a generator response with `count` test cases.
pub(crate) fn generated_cases(count: CaseCount) -> Value {
    let cases: Vec<Value> = (1..=count.value())
        .map(|index| {
            json!({
                "Test Case ID": format!("TC_{index:03}"),
                "Title": format!("Generated case {index}"),
                "Description": "Checks the help page",
                "Steps": [{
                    "Step Number": 1,
                    "Action": "Open the help page",
                    "Data": "NA",
                    "Expected Result": "Help page is displayed"
                }]
            })
        })
        .collect();
    json!({ "test_steps": cases })
}

fn story(key: &str) -> Value {
    json!([{
        "key": key,
        "summary": "Customers can reach the help page",
        "description": "As a customer I want help so that I can finish my task",
        "acceptance_criteria": "The help page lists a contact address"
    }])
}

fn ok_json(value: &Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(value)
}

fn stories_mock(key: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/jira/stories"))
        .respond_with(ok_json(&story(key)))
}

/// Mocks for every endpoint the flow uses, all succeeding.
pub(crate) fn backend_mocks(key: &str, count: CaseCount) -> Vec<Mock> {
    let cases = generated_cases(count);
    vec![
        stories_mock(key),
        Mock::given(method("POST"))
            .and(path("/generate_test_scripts"))
            .respond_with(ok_json(&cases)),
        Mock::given(method("POST"))
            .and(path("/generate-test-script-from-manual-input"))
            .respond_with(ok_json(&cases)),
        Mock::given(method("POST"))
            .and(path("/upload_context"))
            .respond_with(ok_json(&json!({
                "filename": "app.json",
                "context": "{\"appName\": \"SmartBank\"}",
                "message": "Context extracted"
            }))),
        Mock::given(method("POST"))
            .and(path("/upload-test-scripts-to-jira"))
            .respond_with(ok_json(&json!({
                "message": "Test cases uploaded",
                "test_execution_url": TEST_EXECUTION_URL
            }))),
    ]
}

/// Mocks where story fetching works but the story generator fails.
pub(crate) fn failing_generator_mocks(key: &str, detail: &str) -> Vec<Mock> {
    vec![
        stories_mock(key),
        Mock::given(method("POST"))
            .and(path("/generate_test_scripts"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": detail }))),
    ]
}
