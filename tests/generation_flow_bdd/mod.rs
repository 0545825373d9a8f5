//! Support modules for the generation flow BDD tests.

pub(crate) mod harness;
#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use harness::{
    CaseCount, GOOD_REQUIREMENT, TEST_EXECUTION_URL, backend_mocks, failing_generator_mocks,
};
pub(crate) use state::{FlowState, StepResult, workbench};
