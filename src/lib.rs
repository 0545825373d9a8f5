//! Casewright library crate: a requirement-to-test-case workbench client.
//!
//! The library validates requirements locally, assembles story and
//! document context, and drives an AI test-generation backend (which in
//! turn talks to the Jira tracker). Results are held in a session store
//! that independent consumers observe, reviewed page by page, and exported
//! or pushed back to the tracker.

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod files;
pub mod logging;
pub mod models;
pub mod overlay;
pub mod review;
pub mod session;
pub mod telemetry;
pub mod validation;
pub mod workflow;

pub use backend::{BackendGateway, HttpBackendConfig, HttpBackendGateway};
pub use config::{CasewrightConfig, OperationMode};
pub use context::{ContextKind, ContextPayload, map_context_label};
pub use error::WorkbenchError;
pub use models::{
    FileContext, ScrapedContext, StoryEdit, TestCase, TestStep, UploadReceipt, UserStory,
};
pub use overlay::{Notification, OverlayManager, Severity};
pub use review::{BoundReviewTable, ReviewTable, render_page};
pub use session::{SessionField, SessionStore};
pub use validation::{RequirementValidator, ValidationOutcome, Vocabulary, validate_requirement};
pub use workflow::{FlowPhase, GenerationMode, Operation, Workbench};
