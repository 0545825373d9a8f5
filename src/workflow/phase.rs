//! Phases of the generation flow, derived from session state.

use std::fmt;

/// Where the user is in the story-to-test-case flow.
///
/// Phases are never stored; they are recomputed from the session so they
/// cannot drift from the data they describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    /// Nothing selected or attached yet.
    Idle,
    /// Context is attached but no story is selected.
    ContextAttaching,
    /// A story is selected and generation may start.
    ReadyToGenerate,
    /// A generation request is in flight.
    Generating,
    /// Generated test cases are available for review.
    Reviewing,
}

impl FlowPhase {
    /// Derives the phase from the facts that determine it.
    ///
    /// An in-flight generation dominates, then available test cases, then
    /// a selected story, then attached context.
    #[must_use]
    pub const fn derive(
        generating: bool,
        test_case_count: usize,
        has_story: bool,
        has_context: bool,
    ) -> Self {
        if generating {
            Self::Generating
        } else if test_case_count > 0 {
            Self::Reviewing
        } else if has_story {
            Self::ReadyToGenerate
        } else if has_context {
            Self::ContextAttaching
        } else {
            Self::Idle
        }
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Idle => "idle",
            Self::ContextAttaching => "attaching context",
            Self::ReadyToGenerate => "ready to generate",
            Self::Generating => "generating",
            Self::Reviewing => "reviewing",
        })
    }
}
