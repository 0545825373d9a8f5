//! Tests for configuration layer precedence.

use rstest::rstest;
use serde_json::{Value, json};

use super::helpers::build_config_from_layers;
use crate::backend::DEFAULT_BACKEND_URL;

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"jql": "project = DEFAULT"})), ("file", json!({"jql": "project = FILE"}))],
    "jql",
    "project = FILE",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"jira_api_key": "file-key"})), ("environment", json!({"jira_api_key": "env-key"}))],
    "jira_api_key",
    "env-key",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![("environment", json!({"story": "BANK-1"})), ("cli", json!({"story": "BANK-2"}))],
    "story",
    "BANK-2",
    "CLI should override environment"
)]
#[case::backend_url_defaults_file_env_cli(
    vec![
        ("defaults", json!({"backend_url": "http://default:8000"})),
        ("file", json!({"backend_url": "http://file:8000"})),
        ("environment", json!({"backend_url": "http://env:8000"})),
        ("cli", json!({"backend_url": "http://cli:8000"}))
    ],
    "backend_url",
    "http://cli:8000",
    "CLI should win for backend_url"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let config = build_config_from_layers(&layers);

    let actual = match field {
        "jql" => config.jql.as_deref(),
        "jira_api_key" => config.jira_api_key.as_deref(),
        "story" => config.story.as_deref(),
        "backend_url" => Some(config.backend_url.as_str()),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn unset_fields_fall_back_to_defaults() {
    let config = build_config_from_layers(&[("defaults", json!({"jql": null}))]);

    assert_eq!(config.backend_url, DEFAULT_BACKEND_URL, "default backend URL");
    assert!(config.jql.is_none(), "jql should be None");
    assert!(config.jira_api_key.is_none(), "jira_api_key should be None");
    assert!(!config.upload, "upload should default to false");
    assert_eq!(config.page_index(), 0, "page should default to the first");
}

#[rstest]
fn partial_overrides_preserve_lower_values() {
    let config = build_config_from_layers(&[
        (
            "file",
            json!({"jql": "project = BANK", "context": "Upload YAML", "page": 2}),
        ),
        ("cli", json!({"context": "json"})),
    ]);

    assert_eq!(config.jql.as_deref(), Some("project = BANK"), "file jql kept");
    assert_eq!(config.context.as_deref(), Some("json"), "CLI context wins");
    assert_eq!(config.page_index(), 1, "file page kept");
}
