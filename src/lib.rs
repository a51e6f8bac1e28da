//! outliner: a hierarchical outline editor.
//!
//! The [`domain`] layer holds the forest model and its pure edits; the
//! [`application`] layer runs them against stored documents.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
