//! # GraphiQL Test Utilities
//!
//! Shared test infrastructure for the workbench crates: cursor markers for
//! editor gestures, schema fixtures, and a scripted [`Transport`] double.
//!
//! [`Transport`]: graphiql_introspect::Transport

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_raw_string_hashes)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]

pub mod assertions;
pub mod cursor;
pub mod fixtures;
pub mod transport;

pub use assertions::format_messages;
pub use cursor::{extract_cursor, extract_cursors};
pub use fixtures::{pages_introspection, PAGES_DOCUMENT, PAGES_SCHEMA};
pub use transport::ScriptedTransport;

pub use graphiql_types::Position;

// Re-export insta for snapshot testing
pub use insta;
