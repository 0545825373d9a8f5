//! Conversion of transport failures and error bodies into workbench errors.

use http::StatusCode;
use serde_json::Value;

use crate::error::WorkbenchError;

const MAX_BODY_CHARS: usize = 160;

pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> WorkbenchError {
    WorkbenchError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &str) -> WorkbenchError {
    WorkbenchError::Backend {
        status: status.as_u16(),
        detail: extract_detail(body),
    }
}

/// Pulls the user-facing text out of an error body.
///
/// JSON bodies yield their `detail` (rendered as JSON when it is not a
/// string), then their `message`, then the whole document. Other bodies are
/// shortened.
pub(super) fn extract_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        let trimmed = body.trim();
        return if trimmed.is_empty() {
            "unknown error".to_owned()
        } else {
            truncate_for_message(trimmed, MAX_BODY_CHARS)
        };
    };

    match (value.get("detail"), value.get("message")) {
        (Some(Value::String(detail)), _) => detail.clone(),
        (Some(detail), _) if !detail.is_null() => detail.to_string(),
        (_, Some(Value::String(message))) => message.clone(),
        _ => value.to_string(),
    }
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;

    use super::{extract_detail, map_status_error};
    use crate::error::WorkbenchError;

    #[rstest]
    #[case(r#"{"detail": "Invalid JQL"}"#, "Invalid JQL")]
    #[case(r#"{"message": "Upload failed"}"#, "Upload failed")]
    #[case(
        r#"{"detail": [{"loc": ["body", "jql"], "msg": "field required"}]}"#,
        r#"[{"loc":["body","jql"],"msg":"field required"}]"#
    )]
    #[case(r#"{"error": "boom"}"#, r#"{"error":"boom"}"#)]
    #[case("Internal Server Error", "Internal Server Error")]
    #[case("   ", "unknown error")]
    fn detail_extraction(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(extract_detail(body), expected);
    }

    #[test]
    fn long_plain_bodies_are_truncated() {
        let body = "x".repeat(400);

        let detail = extract_detail(&body);

        assert_eq!(detail.chars().count(), 163);
        assert!(detail.ends_with("..."));
    }

    #[test]
    fn status_is_carried_into_backend_error() {
        let error = map_status_error(StatusCode::BAD_GATEWAY, r#"{"detail": "Jira down"}"#);

        assert_eq!(
            error,
            WorkbenchError::Backend {
                status: 502,
                detail: "Jira down".to_owned(),
            }
        );
    }
}
