//! Scenario state for the generation flow BDD tests.

use std::rc::Rc;

use casewright::{
    BoundReviewTable, HttpBackendConfig, HttpBackendGateway, RequirementValidator, SessionStore,
    Workbench,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use wiremock::MockServer;

use super::runtime::SharedRuntime;

/// Result type returned by every step.
pub(crate) type StepResult = Result<(), Box<dyn std::error::Error>>;

/// Scenario state for generation flow tests.
#[derive(ScenarioState, Default)]
pub(crate) struct FlowState {
    /// Shared Tokio runtime for async operations.
    pub(crate) runtime: Slot<SharedRuntime>,
    /// Mock generation backend.
    pub(crate) server: Slot<MockServer>,
    /// Workbench under test, created on first use.
    pub(crate) workbench: Slot<Rc<Workbench>>,
    /// Review table bound to the workbench's session.
    pub(crate) table: Slot<Rc<BoundReviewTable>>,
}

/// Returns the scenario's workbench, creating it against the mock backend.
///
/// # Errors
///
/// Returns an error when the mock backend has not been started.
pub(crate) fn workbench(state: &FlowState) -> Result<Rc<Workbench>, Box<dyn std::error::Error>> {
    if let Some(existing) = state.workbench.get() {
        return Ok(existing);
    }

    let uri = state
        .server
        .with_ref(MockServer::uri)
        .ok_or("mock backend not started")?;
    let config = HttpBackendConfig::new(uri).with_additional_header("x-test-run", "generation-flow");
    let gateway = HttpBackendGateway::new(config)?;
    let created = Rc::new(Workbench::new(
        SessionStore::shared(),
        gateway,
        RequirementValidator::default(),
    ));
    state.workbench.set(Rc::clone(&created));
    Ok(created)
}
