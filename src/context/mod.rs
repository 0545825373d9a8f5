//! Context sources attached to a requirement before generation.
//!
//! A context is selected by its human-readable label, tagged on the wire by
//! a short type string, and (for file kinds) restricted to a set of file
//! extensions. [`payload`] assembles the context JSON sent with generation
//! requests and [`templates`] carries the sample documents shown to users.

mod kind;
pub mod payload;
pub mod templates;

pub use kind::{ContextKind, map_context_label};
pub use payload::ContextPayload;
pub use templates::{ContextTemplate, built_in_templates, find_template};
