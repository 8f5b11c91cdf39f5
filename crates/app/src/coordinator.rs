//! The workbench state owner and its event handlers.

use crate::editor::{EditorAction, QueryEditor, INSPECT_OPERATION_CHORD};
use crate::runner::{OperationRunner, TransportRunner};
use crate::toolbar::{prettify, push_history, HistoryEntry, PrettifyError};
use graphiql_explorer::{ExplorerBindings, ExplorerBridge, ExplorerView};
use graphiql_introspect::{load_schema, ClientSchema, Result, Transport};
use graphiql_syntax::{resolve_definition_at, DefinitionKey, ResolutionError};
use graphiql_types::Position;
use std::cell::{Cell, RefCell};
use std::sync::Arc;
use tokio::sync::watch;

/// Document shown when the workbench opens.
pub const DEFAULT_QUERY: &str = "# shift-option/alt-click on a query below to jump to it in the explorer
# option/alt-click on a field in the explorer to select all subfields
query GET_PAGES {
  pages {
  \tedges {
  \t\tnode {
  \t\t\ttitle
  \t\t}
  \t}
  }
}
";

/// Result of an inspect gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectOutcome {
    /// The explorer scrolled to the definition's node.
    Revealed(DefinitionKey),
    /// The pointer is not on the document.
    NoToken,
    /// The document does not parse.
    ParseFailure { message: String },
    /// The pointer is outside every definition.
    NoEnclosingDefinition,
    /// The explorer is closed or has no node for the key.
    NodeNotFound(DefinitionKey),
}

/// Owns the workbench state and routes events between the editor, the
/// explorer and the transport.
///
/// State changes are published on `watch` channels. Subscribers see whole
/// values only; a document or schema is replaced, never patched.
pub struct Coordinator<T, V, R = TransportRunner<T>> {
    transport: Arc<T>,
    runner: R,
    explorer: RefCell<ExplorerBridge<V>>,
    document: watch::Sender<String>,
    explorer_visible: watch::Sender<bool>,
    history_visible: watch::Sender<bool>,
    history: watch::Sender<Vec<HistoryEntry>>,
    schema: watch::Sender<Option<Arc<ClientSchema>>>,
    schema_requested: Cell<bool>,
}

impl<T: Transport, V: ExplorerView> Coordinator<T, V> {
    /// A coordinator over the default document with the explorer open,
    /// running operations through `transport`.
    #[must_use]
    pub fn new(transport: T, view: V) -> Self {
        let transport = Arc::new(transport);
        let runner = TransportRunner::new(Arc::clone(&transport));
        Self::build(transport, runner, view)
    }
}

impl<T: Transport, V: ExplorerView, R: OperationRunner> Coordinator<T, V, R> {
    /// Like [`Coordinator::new`], with a custom operation runner.
    #[must_use]
    pub fn with_runner(transport: T, view: V, runner: R) -> Self {
        Self::build(Arc::new(transport), runner, view)
    }

    fn build(transport: Arc<T>, runner: R, view: V) -> Self {
        let (document, _) = watch::channel(DEFAULT_QUERY.to_string());
        let (explorer_visible, _) = watch::channel(true);
        let (schema, _) = watch::channel(None);
        let bindings = ExplorerBindings {
            document: document.subscribe(),
            visible: explorer_visible.subscribe(),
            schema: schema.subscribe(),
        };

        Self {
            transport,
            runner,
            explorer: RefCell::new(ExplorerBridge::new(view, bindings)),
            document,
            explorer_visible,
            history_visible: watch::channel(false).0,
            history: watch::channel(Vec::new()).0,
            schema,
            schema_requested: Cell::new(false),
        }
    }

    /// Replace the document text.
    pub fn on_edit(&self, text: impl Into<String>) {
        let text = text.into();
        tracing::trace!(length = text.len(), "Document edited");
        self.document.send_replace(text);
    }

    /// Open a closed explorer or close an open one.
    pub fn on_toggle_explorer(&self) {
        self.explorer_visible.send_modify(|visible| *visible = !*visible);
        tracing::debug!(visible = self.explorer_visible(), "Explorer toggled");
    }

    /// Open a closed history panel or close an open one.
    pub fn on_toggle_history(&self) {
        self.history_visible.send_modify(|visible| *visible = !*visible);
        tracing::debug!(visible = self.history_visible(), "History toggled");
    }

    /// Reformat the document in place.
    ///
    /// An unparsable document is left untouched. Subscribers are only
    /// notified when the text actually changes.
    pub fn on_prettify(&self) -> std::result::Result<(), PrettifyError> {
        let pretty = prettify(&self.document()).inspect_err(|error| {
            tracing::warn!(%error, "Leaving document unformatted");
        })?;
        self.document.send_if_modified(|document| {
            if *document == pretty {
                return false;
            }
            *document = pretty;
            true
        });
        Ok(())
    }

    /// Load a history entry into the editor.
    pub fn on_select_history(&self, entry: &HistoryEntry) {
        self.on_edit(entry.query.clone());
    }

    /// Run an operation of the current document and record it in the history.
    pub async fn on_run_operation(&self, operation_name: Option<&str>) -> Result<serde_json::Value> {
        let document = self.document();
        let entry = HistoryEntry {
            query: document.clone(),
            operation_name: operation_name.map(str::to_string),
        };
        self.history.send_if_modified(|entries| push_history(entries, entry));
        self.runner.run(&document, operation_name).await
    }

    /// Reveal the definition under `pointer` in the explorer.
    ///
    /// Never fails; every way the gesture can fall through is logged and
    /// reported in the outcome.
    #[must_use]
    #[tracing::instrument(skip(self, editor), fields(line = pointer.line, character = pointer.character))]
    pub fn inspect_operation<E: QueryEditor>(&self, editor: &E, pointer: Position) -> InspectOutcome {
        let Some(span) = editor.token_span_at(pointer) else {
            tracing::debug!("Pointer is outside the document");
            return InspectOutcome::NoToken;
        };

        let document = self.document();
        let definition = match resolve_definition_at(&document, span) {
            Ok(definition) => definition,
            Err(ResolutionError::ParseFailure { message, offset }) => {
                tracing::warn!(%message, offset, "Couldn't parse query document");
                return InspectOutcome::ParseFailure { message };
            }
            Err(ResolutionError::NoEnclosingDefinition { span }) => {
                tracing::warn!(%span, "Unable to find definition corresponding to pointer");
                return InspectOutcome::NoEnclosingDefinition;
            }
        };

        let key = definition.key();
        let Ok(mut explorer) = self.explorer.try_borrow_mut() else {
            tracing::warn!(%key, "Explorer is busy, not revealing");
            return InspectOutcome::NodeNotFound(key);
        };
        if explorer.reveal_in_explorer(&key) {
            InspectOutcome::Revealed(key)
        } else {
            InspectOutcome::NodeNotFound(key)
        }
    }

    /// Load the schema unless a load was already started this session.
    ///
    /// Returns the schema current after the call, which is `None` while
    /// the workbench runs without one.
    pub async fn ensure_schema<E: QueryEditor>(&self, editor: &mut E) -> Option<Arc<ClientSchema>> {
        if self.schema_requested.replace(true) {
            tracing::trace!("Schema already requested");
            return self.schema();
        }
        self.fetch_schema(editor).await
    }

    /// Fetch the schema again, regardless of earlier loads.
    pub async fn refresh_schema<E: QueryEditor>(&self, editor: &mut E) -> Option<Arc<ClientSchema>> {
        self.schema_requested.set(true);
        self.fetch_schema(editor).await
    }

    #[tracing::instrument(skip_all)]
    async fn fetch_schema<E: QueryEditor>(&self, editor: &mut E) -> Option<Arc<ClientSchema>> {
        match load_schema(&*self.transport).await {
            Ok(schema) => {
                editor.add_key_binding(INSPECT_OPERATION_CHORD, EditorAction::InspectOperation);
                let schema = Arc::new(schema);
                self.schema.send_replace(Some(Arc::clone(&schema)));
                Some(schema)
            }
            Err(error) => {
                tracing::warn!(%error, "Schema unavailable, continuing without one");
                self.schema()
            }
        }
    }

    #[must_use]
    pub fn document(&self) -> String {
        self.document.borrow().clone()
    }

    #[must_use]
    pub fn explorer_visible(&self) -> bool {
        *self.explorer_visible.borrow()
    }

    #[must_use]
    pub fn schema(&self) -> Option<Arc<ClientSchema>> {
        self.schema.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_document(&self) -> watch::Receiver<String> {
        self.document.subscribe()
    }

    #[must_use]
    pub fn subscribe_explorer_visible(&self) -> watch::Receiver<bool> {
        self.explorer_visible.subscribe()
    }

    #[must_use]
    pub fn history_visible(&self) -> bool {
        *self.history_visible.borrow()
    }

    /// Operations run this session, newest first.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_history_visible(&self) -> watch::Receiver<bool> {
        self.history_visible.subscribe()
    }

    #[must_use]
    pub fn subscribe_history(&self) -> watch::Receiver<Vec<HistoryEntry>> {
        self.history.subscribe()
    }

    #[must_use]
    pub fn subscribe_schema(&self) -> watch::Receiver<Option<Arc<ClientSchema>>> {
        self.schema.subscribe()
    }

    /// Run `f` with the explorer bridge, e.g. to render from its index.
    ///
    /// An inspect gesture handled inside `f` finds the explorer busy and
    /// reveals nothing.
    ///
    /// # Panics
    ///
    /// Panics if called from inside another `with_explorer` closure.
    pub fn with_explorer<O>(&self, f: impl FnOnce(&mut ExplorerBridge<V>) -> O) -> O {
        f(&mut self.explorer.borrow_mut())
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }
}
