//! Keeping the explorer index in step with the coordinator and scrolling
//! the panel to a definition's node.

use crate::{ExplorerIndex, NodeHandle};
use graphiql_introspect::ClientSchema;
use graphiql_syntax::{document_definitions, DefinitionKey};
use std::sync::Arc;
use tokio::sync::watch;

/// The rendered explorer panel.
pub trait ExplorerView {
    /// Bring the node into view without changing the selection.
    fn scroll_into_view(&mut self, node: NodeHandle);
}

/// Read-only subscriptions the explorer follows.
///
/// The coordinator owns the senders; the explorer never writes back.
#[derive(Debug, Clone)]
pub struct ExplorerBindings {
    pub document: watch::Receiver<String>,
    pub visible: watch::Receiver<bool>,
    pub schema: watch::Receiver<Option<Arc<ClientSchema>>>,
}

/// Reveals definitions in the explorer panel by key.
///
/// The index is rebuilt lazily whenever the document or the schema changed
/// since the last lookup. A document that fails to parse leaves the previous
/// index in place, the way the panel keeps showing its last good state.
pub struct ExplorerBridge<V> {
    view: V,
    bindings: ExplorerBindings,
    index: ExplorerIndex,
}

impl<V: ExplorerView> ExplorerBridge<V> {
    #[must_use]
    pub fn new(view: V, bindings: ExplorerBindings) -> Self {
        let mut bridge = Self {
            view,
            bindings,
            index: ExplorerIndex::new(),
        };
        bridge.rebuild();
        bridge
    }

    /// Scroll the node tagged `key` into view.
    ///
    /// Returns `false` when the explorer is closed or has no such node.
    #[tracing::instrument(skip_all, fields(key = %key))]
    pub fn reveal_in_explorer(&mut self, key: &DefinitionKey) -> bool {
        if !*self.bindings.visible.borrow() {
            tracing::debug!("Explorer is closed");
            return false;
        }

        self.sync();
        let Some(handle) = self.index.get(key) else {
            match self.index.closest_key(key) {
                Some(closest) => tracing::debug!(%closest, "No explorer node for key"),
                None => tracing::debug!(nodes = self.index.len(), "No explorer node for key"),
            }
            return false;
        };

        tracing::debug!(node = handle.index(), "Revealing explorer node");
        self.view.scroll_into_view(handle);
        true
    }

    /// The index for the current document.
    pub fn index(&mut self) -> &ExplorerIndex {
        self.sync();
        &self.index
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn sync(&mut self) {
        // A dropped sender reports an error; the last value still stands.
        let document_changed = self.bindings.document.has_changed().unwrap_or(false);
        let schema_changed = self.bindings.schema.has_changed().unwrap_or(false);
        if document_changed || schema_changed {
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        let document = self.bindings.document.borrow_and_update().clone();
        let schema = self.bindings.schema.borrow_and_update().clone();

        match document_definitions(&document) {
            Ok(definitions) => {
                self.index = ExplorerIndex::build(&definitions, schema.as_deref());
                tracing::debug!(nodes = self.index.len(), "Explorer index rebuilt");
            }
            Err(error) => {
                tracing::debug!(%error, "Keeping previous explorer index");
            }
        }
    }
}
