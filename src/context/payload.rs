//! Assembly of the context JSON sent with generation requests.

use serde_json::{Map, Value};

use crate::models::{FileContext, ScrapedContext};

/// Context gathered for one generation request.
///
/// Keys are only present for the sources that were supplied:
/// `manual_input`, `file_context` and `scraped_url_content`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextPayload {
    entries: Map<String, Value>,
}

impl ContextPayload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds typed requirement text, ignoring blank input.
    #[must_use]
    pub fn with_manual_input(mut self, input: Option<&str>) -> Self {
        if let Some(text) = input.map(str::trim).filter(|text| !text.is_empty()) {
            self.entries
                .insert("manual_input".to_owned(), Value::String(text.to_owned()));
        }
        self
    }

    /// Adds an uploaded file's content.
    ///
    /// JSON uploads are embedded as structured JSON when their content
    /// parses; everything else is sent as text.
    #[must_use]
    pub fn with_file_context(mut self, file: Option<&FileContext>) -> Self {
        if let Some(context) = file {
            let value = if context.is_json() {
                serde_json::from_str(&context.context).unwrap_or_else(|error| {
                    tracing::debug!(
                        "JSON context '{}' did not parse, sending as text: {error}",
                        context.filename
                    );
                    Value::String(context.context.clone())
                })
            } else {
                Value::String(context.context.clone())
            };
            self.entries.insert("file_context".to_owned(), value);
        }
        self
    }

    /// Adds scraped page content when the scrape succeeded.
    #[must_use]
    pub fn with_scraped(mut self, scraped: Option<&ScrapedContext>) -> Self {
        if let Some(page) = scraped.filter(|page| page.is_url_scraped) {
            self.entries.insert(
                "scraped_url_content".to_owned(),
                Value::String(page.context.trim().to_owned()),
            );
        }
        self
    }

    /// The typed requirement text, if any.
    #[must_use]
    pub fn manual_input(&self) -> Option<&str> {
        self.entries.get("manual_input").and_then(Value::as_str)
    }

    /// The file context entry, if any.
    #[must_use]
    pub fn file_context(&self) -> Option<&Value> {
        self.entries.get("file_context")
    }

    /// Consumes the payload into a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }
}
