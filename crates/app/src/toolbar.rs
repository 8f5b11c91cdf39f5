//! Toolbar actions besides the explorer toggle: prettify and query history.

use apollo_compiler::ast::Document;

/// Most entries kept in the query history.
pub const HISTORY_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Couldn't prettify query document: {message}")]
pub struct PrettifyError {
    pub message: String,
}

/// Reformat a query document with canonical indentation.
///
/// Comments are not part of the syntax tree and are dropped.
pub fn prettify(text: &str) -> Result<String, PrettifyError> {
    let document = Document::parse(text, "query.graphql").map_err(|with_errors| {
        let messages: Vec<String> = with_errors
            .errors
            .iter()
            .map(|diagnostic| diagnostic.error.to_string())
            .collect();
        PrettifyError {
            message: messages.join("; "),
        }
    })?;
    Ok(document.to_string())
}

/// An operation that was run, as shown in the history panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub query: String,
    pub operation_name: Option<String>,
}

/// Record `entry` as the most recent run. Repeating the latest entry does not
/// add a new one.
pub(crate) fn push_history(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry) -> bool {
    if entries.first() == Some(&entry) {
        return false;
    }
    entries.insert(0, entry);
    entries.truncate(HISTORY_LIMIT);
    true
}
