//! Orchestration of the story-to-test-case flow.
//!
//! [`Workbench`] is the single entry point for user actions. It validates
//! input, talks to the backend through [`BackendGateway`], and commits
//! results to the shared [`SessionStore`]. Every action reports its outcome
//! through the overlay manager, and a failed action leaves the session as it
//! was before the action started.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value;

use crate::backend::{
    BackendGateway, ManualGenerationRequest, NO_CONTEXT_PROVIDED, StoryGenerationRequest,
};
use crate::context::{ContextKind, ContextPayload};
use crate::error::WorkbenchError;
use crate::models::{ScrapedContext, StoryEdit, UploadReceipt};
use crate::overlay::{Notification, OverlayManager};
use crate::review::ReviewTable;
use crate::session::SessionStore;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};
use crate::validation::{
    Field, RequirementValidator, check_jira_setup, check_scrape_url, check_story_edit,
};

mod in_flight;
mod phase;

use in_flight::{GeneratingGuard, InFlight};
pub use in_flight::Operation;
pub use phase::FlowPhase;

/// Which generator endpoint a generate action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Generate from the selected story's description and acceptance
    /// criteria.
    Story,
    /// Generate from a typed requirement.
    Manual,
}

impl GenerationMode {
    /// Stable name used in logs and telemetry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Story => "story",
            Self::Manual => "manual",
        }
    }
}

enum GenerationRequest {
    Story(StoryGenerationRequest),
    Manual(ManualGenerationRequest),
}

/// Coordinates user actions over a shared session.
pub struct Workbench {
    store: Rc<SessionStore>,
    gateway: Box<dyn BackendGateway>,
    validator: RequirementValidator,
    telemetry: Arc<dyn TelemetrySink>,
    overlays: RefCell<OverlayManager>,
    context_kind: Cell<ContextKind>,
    scraped: RefCell<Option<ScrapedContext>>,
    in_flight: InFlight,
}

impl std::fmt::Debug for Workbench {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Workbench")
            .field("store", &self.store)
            .field("context_kind", &self.context_kind.get())
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl Workbench {
    /// Creates a workbench over `store` that talks to `gateway`.
    #[must_use]
    pub fn new(
        store: Rc<SessionStore>,
        gateway: impl BackendGateway + 'static,
        validator: RequirementValidator,
    ) -> Self {
        Self {
            store,
            gateway: Box::new(gateway),
            validator,
            telemetry: Arc::new(NoopTelemetrySink),
            overlays: RefCell::new(OverlayManager::new()),
            context_kind: Cell::new(ContextKind::NoContext),
            scraped: RefCell::new(None),
            in_flight: InFlight::default(),
        }
    }

    /// Routes telemetry events to `sink`.
    #[must_use]
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = sink;
        self
    }

    /// The shared session.
    #[must_use]
    pub fn store(&self) -> &Rc<SessionStore> {
        &self.store
    }

    /// Notifications raised so far and not yet dismissed.
    #[must_use]
    pub fn overlays(&self) -> Ref<'_, OverlayManager> {
        self.overlays.borrow()
    }

    /// Removes and returns every pending notification.
    #[must_use]
    pub fn take_notifications(&self) -> Vec<Notification> {
        self.overlays.borrow_mut().drain()
    }

    /// The requirement validator in use.
    #[must_use]
    pub const fn validator(&self) -> &RequirementValidator {
        &self.validator
    }

    /// The currently chosen context kind.
    #[must_use]
    pub fn context_kind(&self) -> ContextKind {
        self.context_kind.get()
    }

    /// The last successful scrape, if any.
    #[must_use]
    pub fn scraped_context(&self) -> Option<ScrapedContext> {
        self.scraped.borrow().clone()
    }

    /// Returns true while a request of `operation`'s kind is in flight.
    #[must_use]
    pub fn is_busy(&self, operation: Operation) -> bool {
        self.in_flight.is_active(operation)
    }

    /// Current phase derived from the session.
    #[must_use]
    pub fn phase(&self) -> FlowPhase {
        FlowPhase::derive(
            self.store.is_generating(),
            self.store.test_script_count(),
            self.store.selected_story().is_some(),
            self.store.has_file_context() || self.scraped.borrow().is_some(),
        )
    }

    /// Fetches stories from the tracker and stores a non-empty result.
    ///
    /// Returns the number of stories received.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Validation`] for an incomplete setup form,
    /// [`WorkbenchError::GenerationInProgress`] while generating, and any
    /// gateway error.
    pub async fn fetch_stories(
        &self,
        api_key: &str,
        jql: &str,
    ) -> Result<usize, WorkbenchError> {
        let result = self.fetch_stories_inner(api_key, jql).await;
        self.report("Error fetching user stories", result)
    }

    async fn fetch_stories_inner(
        &self,
        api_key: &str,
        jql: &str,
    ) -> Result<usize, WorkbenchError> {
        check_jira_setup(api_key, jql)?;
        if self.store.is_generating() {
            return Err(WorkbenchError::GenerationInProgress);
        }
        let _guard = self.in_flight.begin(Operation::FetchStories)?;

        let stories = self.gateway.fetch_stories(api_key, jql.trim()).await?;
        let count = stories.len();
        tracing::info!("fetched {count} user stories");
        self.telemetry.record(TelemetryEvent::StoriesFetched { count });
        if count > 0 {
            self.store.set_user_stories(stories);
            self.overlays.borrow_mut().success("Got the user stories");
        }
        Ok(count)
    }

    /// Selects one of the fetched stories by key.
    ///
    /// Existing test cases stay in place until the next successful
    /// generation.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::UnknownStory`] when no fetched story has
    /// `key`.
    pub fn select_story(&self, key: &str) -> Result<(), WorkbenchError> {
        let result = self.store.find_story(key).map_or_else(
            || {
                Err(WorkbenchError::UnknownStory {
                    key: key.to_owned(),
                })
            },
            |story| {
                tracing::debug!("selected story {}", story.key);
                self.store.set_selected_story(Some(story));
                Ok(())
            },
        );
        self.report("Error selecting user story", result)
    }

    /// Replaces the editable fields of the selected story.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::GenerationInProgress`] while generating,
    /// [`WorkbenchError::NoStorySelected`] without a selection, and
    /// [`WorkbenchError::Validation`] for the first field that is too short.
    pub fn edit_selected_story(&self, edit: &StoryEdit) -> Result<(), WorkbenchError> {
        let result = self.edit_selected_story_inner(edit);
        self.report("Error updating user story", result)
    }

    fn edit_selected_story_inner(&self, edit: &StoryEdit) -> Result<(), WorkbenchError> {
        if self.store.is_generating() {
            return Err(WorkbenchError::GenerationInProgress);
        }
        let story = self
            .store
            .selected_story()
            .ok_or(WorkbenchError::NoStorySelected)?;
        check_story_edit(edit).into_result()?;

        self.store.set_selected_story(Some(story.with_edit(edit)));
        self.overlays
            .borrow_mut()
            .success("User Story Updated Successfully!");
        Ok(())
    }

    /// Chooses the kind of context to attach next.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::ContextAlreadyAttached`] while a file
    /// context is attached.
    pub fn choose_context(&self, kind: ContextKind) -> Result<(), WorkbenchError> {
        let result = if self.store.has_file_context() {
            Err(WorkbenchError::ContextAlreadyAttached)
        } else {
            self.context_kind.set(kind);
            Ok(())
        };
        self.report("Error selecting context", result)
    }

    /// Uploads a file as context of the chosen kind.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::ContextNotUploadable`] or
    /// [`WorkbenchError::UnsupportedFile`] when the file does not fit the
    /// chosen kind, [`WorkbenchError::ContextAlreadyAttached`] when a file is
    /// already attached, and any gateway error.
    pub async fn attach_file(
        &self,
        filename: &str,
        contents: Vec<u8>,
    ) -> Result<(), WorkbenchError> {
        let result = self.attach_file_inner(filename, contents).await;
        self.report("Error uploading context", result)
    }

    async fn attach_file_inner(
        &self,
        filename: &str,
        contents: Vec<u8>,
    ) -> Result<(), WorkbenchError> {
        let kind = self.context_kind.get();
        kind.check_file(filename)?;
        if self.store.has_file_context() {
            return Err(WorkbenchError::ContextAlreadyAttached);
        }
        let _guard = self.in_flight.begin(Operation::UploadContext)?;

        let context = self
            .gateway
            .upload_context(kind.type_tag(), filename, contents)
            .await?;
        tracing::info!("attached {} context from '{}'", kind.type_tag(), context.filename);
        self.telemetry.record(TelemetryEvent::ContextAttached {
            context_type: kind.type_tag().to_owned(),
            filename: context.filename.clone(),
        });
        self.overlays.borrow_mut().success(context.message.clone());
        self.store.set_file_context(Some(context));
        Ok(())
    }

    /// Detaches the uploaded file context and resets the context choice.
    pub fn remove_file_context(&self) {
        self.store.set_file_context(None);
        self.context_kind.set(ContextKind::NoContext);
    }

    /// Scrapes a page and keeps its content as context.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Validation`] for a blank or malformed URL,
    /// [`WorkbenchError::ContextAlreadyAttached`] while a file context is
    /// attached, and any gateway error.
    pub async fn scrape(&self, url: &str) -> Result<ScrapedContext, WorkbenchError> {
        let result = self.scrape_inner(url).await;
        self.report("Error scraping URL", result)
    }

    async fn scrape_inner(&self, raw_url: &str) -> Result<ScrapedContext, WorkbenchError> {
        let url = check_scrape_url(raw_url)?;
        if self.store.has_file_context() {
            return Err(WorkbenchError::ContextAlreadyAttached);
        }
        let _guard = self.in_flight.begin(Operation::ScrapeUrl)?;

        let scraped = self.gateway.scrape_url(url.as_str()).await?;
        let message = if scraped.message.trim().is_empty() {
            "Scrape successful".to_owned()
        } else {
            scraped.message.clone()
        };
        self.overlays.borrow_mut().success(message);
        *self.scraped.borrow_mut() = Some(scraped.clone());
        Ok(scraped)
    }

    /// Generates test cases and replaces the session's test cases.
    ///
    /// `manual_input` is included in the request context whenever it is
    /// non-blank; manual mode requires it. Returns the number of test cases
    /// generated.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::GenerationInProgress`] while another
    /// generation is in flight, [`WorkbenchError::NoStorySelected`] or
    /// [`WorkbenchError::Validation`] when the mode's inputs are missing, and
    /// any gateway error. On error the session's test cases are unchanged.
    pub async fn generate(
        &self,
        mode: GenerationMode,
        manual_input: Option<&str>,
    ) -> Result<usize, WorkbenchError> {
        let result = self.generate_inner(mode, manual_input).await;
        if let Err(error) = &result {
            self.telemetry.record(TelemetryEvent::GenerationFailed {
                mode: mode.as_str().to_owned(),
                error: error.to_string(),
            });
        }
        self.report("Error while generating test scripts", result)
    }

    async fn generate_inner(
        &self,
        mode: GenerationMode,
        manual_input: Option<&str>,
    ) -> Result<usize, WorkbenchError> {
        if self.store.is_generating() {
            return Err(WorkbenchError::GenerationInProgress);
        }
        let request = self.build_generation_request(mode, manual_input)?;
        let guard = GeneratingGuard::begin(&self.store)?;
        tracing::debug!("requesting {} generation", mode.as_str());

        let cases = match &request {
            GenerationRequest::Story(body) => self.gateway.generate_test_scripts(body).await?,
            GenerationRequest::Manual(body) => {
                self.gateway.generate_from_manual_input(body).await?
            }
        };

        let count = cases.len();
        self.store.set_test_scripts(cases);
        self.store.set_file_context(None);
        self.context_kind.set(ContextKind::NoContext);
        drop(guard);

        tracing::info!("generated {count} test cases");
        self.telemetry.record(TelemetryEvent::GenerationCompleted {
            mode: mode.as_str().to_owned(),
            test_case_count: count,
        });
        self.overlays
            .borrow_mut()
            .success("Test Scripts Generated Successfully");
        Ok(count)
    }

    fn build_generation_request(
        &self,
        mode: GenerationMode,
        manual_input: Option<&str>,
    ) -> Result<GenerationRequest, WorkbenchError> {
        let file_context = self.store.file_context();
        let mut payload = ContextPayload::new()
            .with_manual_input(manual_input)
            .with_file_context(file_context.as_ref());

        match mode {
            GenerationMode::Story => {
                let story = self
                    .store
                    .selected_story()
                    .filter(|story| !story.key.trim().is_empty())
                    .ok_or(WorkbenchError::NoStorySelected)?;
                payload = payload.with_scraped(self.scraped.borrow().as_ref());
                Ok(GenerationRequest::Story(StoryGenerationRequest {
                    description: story.description,
                    requirement_text: story.acceptance_criteria,
                    context_json: payload.into_value(),
                }))
            }
            GenerationMode::Manual => {
                let input = payload.manual_input().map(ToOwned::to_owned).ok_or_else(|| {
                    WorkbenchError::validation(
                        Field::ManualRequirement.name(),
                        "Please provide manual input.",
                    )
                })?;
                self.validator
                    .require_valid(Field::ManualRequirement.name(), &input)?;
                let context = payload
                    .file_context()
                    .cloned()
                    .unwrap_or_else(|| Value::String(NO_CONTEXT_PROVIDED.to_owned()));
                Ok(GenerationRequest::Manual(ManualGenerationRequest {
                    manual_input: input,
                    context,
                }))
            }
        }
    }

    /// Renders the session's test cases as a spreadsheet.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::NothingToExport`] without test cases and any
    /// gateway error.
    pub async fn download(&self) -> Result<Vec<u8>, WorkbenchError> {
        let result = self.download_inner().await;
        self.report("Error while downloading excel file", result)
    }

    async fn download_inner(&self) -> Result<Vec<u8>, WorkbenchError> {
        let cases = self.store.test_scripts();
        if cases.is_empty() {
            return Err(WorkbenchError::NothingToExport);
        }
        let _guard = self.in_flight.begin(Operation::Download)?;

        let bytes = self.gateway.download(&cases).await?;
        tracing::info!("downloaded {} bytes for {} test cases", bytes.len(), cases.len());
        Ok(bytes)
    }

    /// Pushes the selected test cases (or all of them when none are
    /// selected) to the tracker, then clears the selection.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::NothingToUpload`] without test cases and
    /// any gateway error. The selection is kept on error.
    pub async fn upload_to_tracker(
        &self,
        table: &RefCell<ReviewTable>,
    ) -> Result<UploadReceipt, WorkbenchError> {
        let result = self.upload_to_tracker_inner(table).await;
        self.report("Error while uploading test scripts to Jira", result)
    }

    async fn upload_to_tracker_inner(
        &self,
        table: &RefCell<ReviewTable>,
    ) -> Result<UploadReceipt, WorkbenchError> {
        let cases = self
            .store
            .with_test_scripts(|scripts| table.borrow().cases_to_upload(scripts));
        if cases.is_empty() {
            return Err(WorkbenchError::NothingToUpload);
        }
        let summary = self
            .store
            .selected_story()
            .map(|story| story.summary)
            .unwrap_or_default();
        let _guard = self.in_flight.begin(Operation::UploadToTracker)?;

        let receipt = self.gateway.upload_to_jira(&summary, &cases).await?;
        table.borrow_mut().clear_selection();
        self.telemetry.record(TelemetryEvent::TestCasesUploaded {
            count: cases.len(),
            test_execution_url: receipt.test_execution_url.clone(),
        });
        let message = receipt.test_execution_url.as_deref().map_or_else(
            || receipt.message.clone(),
            |url| format!("{}\nURL: {url}", receipt.message),
        );
        self.overlays.borrow_mut().success(message);
        Ok(receipt)
    }

    /// Pushes an error notification for a failed action.
    ///
    /// Rejections made before any request was sent are logged at debug;
    /// backend and transport failures at warn.
    fn report<T>(
        &self,
        prefix: &str,
        result: Result<T, WorkbenchError>,
    ) -> Result<T, WorkbenchError> {
        if let Err(error) = &result {
            let detail = match error {
                WorkbenchError::Validation { message, .. } => message.clone(),
                WorkbenchError::Backend { detail, .. } => detail.clone(),
                other => other.to_string(),
            };
            if error.is_client_side() {
                tracing::debug!("{prefix}: {error}");
            } else {
                tracing::warn!("{prefix}: {error}");
            }
            self.overlays.borrow_mut().error(format!("{prefix}: {detail}"));
        }
        result
    }
}
