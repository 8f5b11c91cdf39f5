//! Mapping a cursor span to the top-level definition that contains it.

use crate::definition::{DefinitionKind, DefinitionNode, OperationType};
use apollo_parser::cst::{self, CstNode};
use graphiql_types::{CursorSpan, OffsetRange};

/// Why a cursor span could not be mapped to a definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// The document is not valid GraphQL syntax.
    #[error("Couldn't parse query document: {message} (at offset {offset})")]
    ParseFailure {
        /// First syntax error reported by the parser
        message: String,
        /// Byte offset where the error occurred
        offset: usize,
    },

    /// The span falls outside every top-level definition.
    #[error("Unable to find definition corresponding to cursor span {span}")]
    NoEnclosingDefinition { span: CursorSpan },
}

/// A fully parsed query document, reduced to its top-level definitions.
///
/// Built fresh for every resolution and never cached. Construction fails on
/// any syntax error, so a partial document is never observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    definitions: Vec<DefinitionNode>,
}

impl ParsedDocument {
    /// Parse `text` into its top-level definitions.
    pub fn parse(text: &str) -> Result<Self, ResolutionError> {
        let tree = apollo_parser::Parser::new(text).parse();

        if let Some(error) = tree.errors().next() {
            return Err(ResolutionError::ParseFailure {
                message: error.message().to_string(),
                offset: error.index(),
            });
        }

        let definitions: Vec<DefinitionNode> = tree
            .document()
            .definitions()
            .map(|def| describe_definition(&def))
            .collect();

        // An executable document needs at least one definition; a blank or
        // comment-only document is rejected like any other syntax error.
        if definitions.is_empty() {
            return Err(ResolutionError::ParseFailure {
                message: "expected at least one definition".to_string(),
                offset: text.len(),
            });
        }

        Ok(Self { definitions })
    }

    /// Top-level definitions in document order.
    #[must_use]
    pub fn definitions(&self) -> &[DefinitionNode] {
        &self.definitions
    }

    /// First definition, in document order, whose span encloses `span`.
    ///
    /// Top-level definitions never overlap, so at most one can match; taking
    /// the first is only a tie-break.
    #[must_use]
    pub fn definition_at(&self, span: CursorSpan) -> Option<&DefinitionNode> {
        self.definitions.iter().find(|def| {
            let Some(source_span) = def.source_span else {
                tracing::debug!(name = ?def.name, "Missing location information for definition");
                return false;
            };
            source_span.encloses(span)
        })
    }

    #[must_use]
    pub fn into_definitions(self) -> Vec<DefinitionNode> {
        self.definitions
    }
}

/// Resolve the top-level definition containing `span` in `text`.
///
/// The document is re-parsed on every call. This function is pure: it has
/// no side effects beyond debug logging.
pub fn resolve_definition_at(
    text: &str,
    span: CursorSpan,
) -> Result<DefinitionNode, ResolutionError> {
    let document = ParsedDocument::parse(text)?;
    let definition = document
        .definition_at(span)
        .cloned()
        .ok_or(ResolutionError::NoEnclosingDefinition { span })?;

    tracing::debug!(
        span = %span,
        key = %definition.key(),
        "Resolved definition at cursor"
    );
    Ok(definition)
}

/// All top-level definitions of `text`, in document order.
pub fn document_definitions(text: &str) -> Result<Vec<DefinitionNode>, ResolutionError> {
    ParsedDocument::parse(text).map(ParsedDocument::into_definitions)
}

fn describe_definition(def: &cst::Definition) -> DefinitionNode {
    let source_span = syntactic_span(def.syntax());

    match def {
        cst::Definition::OperationDefinition(op) => DefinitionNode {
            kind: DefinitionKind::Operation,
            operation_type: Some(
                op.operation_type()
                    .map_or(OperationType::Query, |op_type| operation_type(&op_type)),
            ),
            name: op.name().map(|n| n.text().to_string()),
            source_span,
        },
        cst::Definition::FragmentDefinition(frag) => DefinitionNode {
            kind: DefinitionKind::Fragment,
            operation_type: None,
            name: frag
                .fragment_name()
                .and_then(|n| n.name())
                .map(|n| n.text().to_string()),
            source_span,
        },
        _ => DefinitionNode {
            kind: DefinitionKind::Other,
            operation_type: None,
            name: None,
            source_span,
        },
    }
}

fn operation_type(op_type: &cst::OperationType) -> OperationType {
    if op_type.query_token().is_some() {
        OperationType::Query
    } else if op_type.mutation_token().is_some() {
        OperationType::Mutation
    } else {
        OperationType::Subscription
    }
}

/// Span from the first to the last significant token of a node.
///
/// Whitespace, commas and comments at either edge are excluded so that the
/// space between two definitions belongs to neither of them.
fn syntactic_span(node: &apollo_parser::SyntaxNode) -> Option<OffsetRange> {
    let mut span: Option<OffsetRange> = None;

    for element in node.descendants_with_tokens() {
        let apollo_parser::SyntaxElement::Token(token) = element else {
            continue;
        };
        if is_trivia(token.text()) {
            continue;
        }

        let range = token.text_range();
        let start: usize = range.start().into();
        let end: usize = range.end().into();
        span = Some(match span {
            Some(existing) => OffsetRange::new(existing.start, end),
            None => OffsetRange::new(start, end),
        });
    }

    span
}

pub(crate) fn is_trivia(text: &str) -> bool {
    text == ","
        || text.starts_with('#')
        || text.chars().all(|c| c.is_whitespace() || c == '\u{feff}')
}
