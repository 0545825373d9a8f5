//! reqwest implementation of [`BackendGateway`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::WorkbenchError;
use crate::models::{FileContext, ScrapedContext, TestCase, UploadReceipt, UserStory};

use super::error_mapping::{map_status_error, map_transport_error};
use super::{BackendGateway, ManualGenerationRequest, StoryGenerationRequest};

/// Backend address used when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Configuration for [`HttpBackendGateway`].
///
/// No request timeout is applied: generation calls can legitimately run
/// for minutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBackendConfig {
    /// Base URL of the backend (e.g. `http://127.0.0.1:8000`).
    pub base_url: String,
    /// Additional request headers (primarily useful for deterministic tests).
    #[cfg(any(test, feature = "test-support"))]
    pub additional_headers: Vec<(String, String)>,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

impl HttpBackendConfig {
    /// Creates configuration for the backend at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            #[cfg(any(test, feature = "test-support"))]
            additional_headers: Vec::new(),
        }
    }

    /// Adds one extra HTTP header.
    #[cfg(any(test, feature = "test-support"))]
    #[must_use]
    pub fn with_additional_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.additional_headers.push((name.into(), value.into()));
        self
    }
}

/// HTTP gateway to the generation backend.
#[derive(Debug, Clone)]
pub struct HttpBackendGateway {
    client: Client,
    config: HttpBackendConfig,
}

impl HttpBackendGateway {
    /// Creates a gateway from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Configuration`] when the base URL is not
    /// an absolute HTTP(S) URL or the HTTP client cannot be built.
    pub fn new(config: HttpBackendConfig) -> Result<Self, WorkbenchError> {
        let parsed =
            url::Url::parse(&config.base_url).map_err(|error| WorkbenchError::Configuration {
                message: format!("invalid backend URL '{}': {error}", config.base_url),
            })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(WorkbenchError::Configuration {
                message: format!(
                    "backend URL '{}' must use http or https",
                    config.base_url
                ),
            });
        }

        let client = Client::builder()
            .build()
            .map_err(|error| WorkbenchError::Configuration {
                message: format!("failed to configure backend HTTP client: {error}"),
            })?;
        Ok(Self { client, config })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let endpoint = format!("{}/{path}", self.base_url());
        #[cfg(any(test, feature = "test-support"))]
        let mut request_builder = self.client.post(endpoint);
        #[cfg(not(any(test, feature = "test-support")))]
        let request_builder = self.client.post(endpoint);
        #[cfg(any(test, feature = "test-support"))]
        for (name, value) in &self.config.additional_headers {
            request_builder = request_builder.header(name, value);
        }
        request_builder
    }

    /// Sends a request and turns non-success statuses into errors.
    async fn send(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<Response, WorkbenchError> {
        tracing::debug!("{operation}: sending request to {}", self.base_url());
        let response = request
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "(failed to read error response body)".to_owned());
        let error = map_status_error(status, &body);
        tracing::warn!("{operation} failed with status {}: {error}", status.as_u16());
        Err(error)
    }

    async fn post_json<B, T>(
        &self,
        operation: &str,
        path: &str,
        body: &B,
    ) -> Result<T, WorkbenchError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(operation, self.post(path).json(body)).await?;
        decode(operation, response).await
    }
}

async fn decode<T: DeserializeOwned>(
    operation: &str,
    response: Response,
) -> Result<T, WorkbenchError> {
    response
        .json()
        .await
        .map_err(|error| WorkbenchError::InvalidResponse {
            message: format!("{operation} response JSON decoding failed: {error}"),
        })
}

#[derive(Debug, Serialize)]
struct FetchStoriesBody<'a> {
    jira_api_key: &'a str,
    jql: &'a str,
}

#[derive(Debug, Serialize)]
struct ScrapeBody<'a> {
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct UploadToJiraBody<'a> {
    summary: &'a str,
    #[serde(rename = "testScripts")]
    test_scripts: &'a [TestCase],
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    test_steps: Option<Vec<TestCase>>,
}

impl GenerationResponse {
    fn into_cases(self) -> Vec<TestCase> {
        self.test_steps.unwrap_or_default()
    }
}

#[async_trait]
impl BackendGateway for HttpBackendGateway {
    async fn fetch_stories(
        &self,
        api_key: &str,
        jql: &str,
    ) -> Result<Vec<UserStory>, WorkbenchError> {
        let body = FetchStoriesBody {
            jira_api_key: api_key,
            jql,
        };
        self.post_json("fetch stories", "jira/stories", &body).await
    }

    async fn scrape_url(&self, url: &str) -> Result<ScrapedContext, WorkbenchError> {
        self.post_json("scrape URL", "scrape_url", &ScrapeBody { url })
            .await
    }

    async fn upload_context(
        &self,
        context_type: &str,
        filename: &str,
        contents: Vec<u8>,
    ) -> Result<FileContext, WorkbenchError> {
        let form = Form::new()
            .text("context_type", context_type.to_owned())
            .part("file", Part::bytes(contents).file_name(filename.to_owned()));
        let response = self
            .send("upload context", self.post("upload_context").multipart(form))
            .await?;
        decode("upload context", response).await
    }

    async fn generate_test_scripts(
        &self,
        request: &StoryGenerationRequest,
    ) -> Result<Vec<TestCase>, WorkbenchError> {
        let response: GenerationResponse = self
            .post_json("generate test scripts", "generate_test_scripts", request)
            .await?;
        Ok(response.into_cases())
    }

    async fn generate_from_manual_input(
        &self,
        request: &ManualGenerationRequest,
    ) -> Result<Vec<TestCase>, WorkbenchError> {
        let response: GenerationResponse = self
            .post_json(
                "generate from manual input",
                "generate-test-script-from-manual-input",
                request,
            )
            .await?;
        Ok(response.into_cases())
    }

    async fn download(&self, cases: &[TestCase]) -> Result<Vec<u8>, WorkbenchError> {
        let response = self
            .send("download", self.post("download").json(cases))
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|error| map_transport_error("download", &error))?;
        Ok(bytes.to_vec())
    }

    async fn upload_to_jira(
        &self,
        summary: &str,
        cases: &[TestCase],
    ) -> Result<UploadReceipt, WorkbenchError> {
        let body = UploadToJiraBody {
            summary,
            test_scripts: cases,
        };
        self.post_json("upload to Jira", "upload-test-scripts-to-jira", &body)
            .await
    }
}
