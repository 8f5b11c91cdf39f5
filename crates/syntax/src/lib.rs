//! # Cursor-to-Definition Resolution
//!
//! This crate maps a cursor inside a multi-operation GraphQL document to the
//! top-level operation or fragment definition that contains it, and derives
//! the key the explorer panel uses to tag that definition's node.
//!
//! ```
//! use graphiql_syntax::resolve_definition_at;
//! use graphiql_types::CursorSpan;
//!
//! let text = "query A { f } query B { g }";
//! let g = text.find('g').unwrap();
//! let definition = resolve_definition_at(text, CursorSpan::new(g, g + 1)).unwrap();
//! assert_eq!(definition.key().as_str(), "query-B");
//! ```
//!
//! Parsing uses `apollo-parser`. Any syntax error aborts resolution; a
//! partially parsed document is never used.

mod definition;
mod resolve;
mod token;

pub use definition::{
    DefinitionKey, DefinitionKind, DefinitionNode, KeyKind, OperationType, UNKNOWN,
};
pub use resolve::{document_definitions, resolve_definition_at, ParsedDocument, ResolutionError};
pub use token::token_span_at;
