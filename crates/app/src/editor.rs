//! The text editor collaborator.

use graphiql_types::{CursorSpan, Position};
use std::collections::BTreeMap;
use tokio::sync::watch;

/// Chord that triggers [`EditorAction::InspectOperation`] once a schema is loaded.
pub const INSPECT_OPERATION_CHORD: &str = "Shift-Alt-LeftClick";

/// Actions an editor key binding can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    /// Run the operation under the cursor.
    RunOperation,
    /// Reveal the definition under the pointer in the explorer.
    InspectOperation,
}

/// What the coordinator needs from the query editor.
pub trait QueryEditor {
    /// Bind `chord` to `action`, keeping every other binding in place.
    fn add_key_binding(&mut self, chord: &str, action: EditorAction);

    /// Span of the token under `position`. An empty span at the position
    /// when no token is there, `None` when the position is off the document.
    fn token_span_at(&self, position: Position) -> Option<CursorSpan>;
}

/// Headless editor following the coordinator's document.
#[derive(Debug, Clone)]
pub struct TextEditor {
    document: watch::Receiver<String>,
    key_bindings: BTreeMap<String, EditorAction>,
}

impl TextEditor {
    #[must_use]
    pub fn new(document: watch::Receiver<String>) -> Self {
        Self {
            document,
            key_bindings: BTreeMap::new(),
        }
    }

    /// An editor over fixed text, not bound to any coordinator.
    #[must_use]
    pub fn detached(text: impl Into<String>) -> Self {
        let (_sender, document) = watch::channel(text.into());
        Self::new(document)
    }

    #[must_use]
    pub fn with_key_binding(mut self, chord: &str, action: EditorAction) -> Self {
        self.add_key_binding(chord, action);
        self
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.document.borrow().clone()
    }

    #[must_use]
    pub fn key_binding(&self, chord: &str) -> Option<EditorAction> {
        self.key_bindings.get(chord).copied()
    }

    #[must_use]
    pub const fn key_bindings(&self) -> &BTreeMap<String, EditorAction> {
        &self.key_bindings
    }
}

impl QueryEditor for TextEditor {
    fn add_key_binding(&mut self, chord: &str, action: EditorAction) {
        tracing::debug!(chord, ?action, "Adding key binding");
        self.key_bindings.insert(chord.to_string(), action);
    }

    fn token_span_at(&self, position: Position) -> Option<CursorSpan> {
        graphiql_syntax::token_span_at(&self.document.borrow(), position)
    }
}
