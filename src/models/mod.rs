//! Data models exchanged with the test generation backend.
//!
//! Field names follow Rust conventions; serde attributes carry the wire
//! names the backend uses (including its spaced aliases such as
//! `"Test Case ID"` and `"Expected Result"`).

use serde::{Deserialize, Deserializer, Serialize};

mod story;

pub use story::{StoryEdit, UserStory};

/// Content extracted from an uploaded context file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContext {
    /// Name of the uploaded file as reported by the backend.
    pub filename: String,
    /// Raw or parsed file content.
    #[serde(default)]
    pub context: String,
    /// Backend acknowledgement shown to the user.
    #[serde(default)]
    pub message: String,
}

impl FileContext {
    /// Returns true when the uploaded file was a JSON document.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.filename.to_ascii_lowercase().ends_with(".json")
    }
}

/// Result of scraping a web page for context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedContext {
    /// Whether the backend managed to scrape the page.
    #[serde(rename = "isUrlScraped", default)]
    pub is_url_scraped: bool,
    /// Leading portion of the scraped page.
    #[serde(default)]
    pub context: String,
    /// Backend acknowledgement shown to the user.
    #[serde(default)]
    pub message: String,
}

/// One ordered step of a generated test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestStep {
    /// 1-based position of the step.
    #[serde(rename = "Step Number")]
    pub step_number: u32,
    /// Action the tester performs.
    #[serde(rename = "Action")]
    pub action: String,
    /// Input data for the step.
    ///
    /// The backend may send any JSON value here; non-string values are kept
    /// as their JSON rendering.
    #[serde(rename = "Data", default, deserialize_with = "data_as_text")]
    pub data: String,
    /// Outcome the tester should observe.
    #[serde(rename = "Expected Result")]
    pub expected_result: String,
}

/// A generated test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Identifier assigned by the generator (e.g. `TC_001`).
    #[serde(rename = "Test Case ID", alias = "id", default)]
    pub id: String,
    /// Short title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Longer description of what the case verifies.
    #[serde(rename = "Description", default)]
    pub description: String,
    /// Ordered steps.
    #[serde(rename = "Steps", default)]
    pub steps: Vec<TestStep>,
}

impl TestCase {
    /// Returns the identifier to display for the row at `index`.
    ///
    /// Cases without an identifier fall back to their 1-based row number.
    #[must_use]
    pub fn display_id(&self, index: usize) -> String {
        if self.id.trim().is_empty() {
            format!("#{}", index.saturating_add(1))
        } else {
            self.id.clone()
        }
    }
}

/// Acknowledgement returned after pushing test cases to the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Backend summary of the upload.
    #[serde(default)]
    pub message: String,
    /// Link to the created test execution issue.
    #[serde(default)]
    pub test_execution_url: Option<String>,
}

fn data_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod test_support;
