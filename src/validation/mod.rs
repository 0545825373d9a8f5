//! Client-side input validation.
//!
//! Validation failures block submission and never reach the network. The
//! [`requirement`] heuristic gates free-text requirements; [`fields`] holds
//! the simpler per-field length and format rules along with the per-form
//! error map that drives inline messages.

pub mod fields;
pub mod requirement;

pub use fields::{
    Field, FieldErrors, check_jira_setup, check_jql, check_scrape_url, check_story_edit,
};
pub use requirement::{
    DEFAULT_MIN_REQUIREMENT_CHARS, DEFAULT_VALID_WORD_PERCENT, RequirementValidator,
    ValidationOutcome, Vocabulary, validate_requirement,
};
