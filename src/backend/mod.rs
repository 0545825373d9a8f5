//! Gateway to the test generation backend.
//!
//! The backend fronts both the AI generator and the Jira tracker. The
//! [`BackendGateway`] trait is the seam the workbench talks to; the
//! reqwest-backed [`HttpBackendGateway`] performs the real HTTP calls and
//! tests substitute the generated mock.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::WorkbenchError;
use crate::models::{FileContext, ScrapedContext, TestCase, UploadReceipt, UserStory};

mod client;
mod error_mapping;

pub use client::{DEFAULT_BACKEND_URL, HttpBackendConfig, HttpBackendGateway};

/// Placeholder sent as manual-mode context when no file was attached.
pub const NO_CONTEXT_PROVIDED: &str = "No context provided";

/// Body of a story-driven generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryGenerationRequest {
    /// Story description.
    pub description: String,
    /// Acceptance criteria the cases must cover.
    pub requirement_text: String,
    /// Gathered context object (see [`crate::context::ContextPayload`]).
    pub context_json: Value,
}

/// Body of a manual-input generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualGenerationRequest {
    /// Requirement text typed by the user.
    pub manual_input: String,
    /// Attached file context, or [`NO_CONTEXT_PROVIDED`].
    pub context: Value,
}

/// Operations offered by the generation backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Fetches the stories matched by `jql`.
    async fn fetch_stories(
        &self,
        api_key: &str,
        jql: &str,
    ) -> Result<Vec<UserStory>, WorkbenchError>;

    /// Scrapes a web page for context.
    async fn scrape_url(&self, url: &str) -> Result<ScrapedContext, WorkbenchError>;

    /// Uploads a context file and returns its extracted content.
    async fn upload_context(
        &self,
        context_type: &str,
        filename: &str,
        contents: Vec<u8>,
    ) -> Result<FileContext, WorkbenchError>;

    /// Generates test cases for a story.
    async fn generate_test_scripts(
        &self,
        request: &StoryGenerationRequest,
    ) -> Result<Vec<TestCase>, WorkbenchError>;

    /// Generates test cases from a typed requirement.
    async fn generate_from_manual_input(
        &self,
        request: &ManualGenerationRequest,
    ) -> Result<Vec<TestCase>, WorkbenchError>;

    /// Renders test cases as a spreadsheet.
    async fn download(&self, cases: &[TestCase]) -> Result<Vec<u8>, WorkbenchError>;

    /// Pushes test cases to the tracker under a story summary.
    async fn upload_to_jira(
        &self,
        summary: &str,
        cases: &[TestCase],
    ) -> Result<UploadReceipt, WorkbenchError>;
}
