//! CLI operation mode handlers.
//!
//! This module contains the implementations for different operation modes:
//! - [`templates`]: Print the built-in context templates
//! - [`validate`]: Check a requirement locally
//! - [`stories`]: Fetch and list tracker stories
//! - [`generate`]: Generate, review, export and upload test cases
//!
//! Workbench construction lives in [`workbench`] and output formatting
//! utilities are in [`output`].

pub mod generate;
pub mod output;
pub mod stories;
pub mod templates;
pub mod validate;
pub mod workbench;
