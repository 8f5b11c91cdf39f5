//! # GraphiQL Workbench
//!
//! Ties the query editor, the explorer panel and the schema together.
//!
//! A [`Coordinator`] owns the document text, the explorer visibility and the
//! loaded schema. The editor and the explorer follow that state one-way
//! through `tokio::sync::watch` receivers. The coordinator also handles the
//! shift-alt-click gesture that jumps from a definition in the editor to its
//! node in the explorer.
//!
//! ```
//! use graphiql_app::{Coordinator, InspectOutcome, TextEditor};
//! use graphiql_explorer::{ExplorerView, NodeHandle};
//! use graphiql_introspect::HttpTransport;
//! use graphiql_syntax::DefinitionKey;
//! use graphiql_types::Position;
//!
//! struct Panel;
//!
//! impl ExplorerView for Panel {
//!     fn scroll_into_view(&mut self, _node: NodeHandle) {}
//! }
//!
//! let coordinator = Coordinator::new(HttpTransport::new("https://example.com/graphql"), Panel);
//! let editor = TextEditor::new(coordinator.subscribe_document());
//!
//! // Pointer on `title` inside the default GET_PAGES query.
//! let outcome = coordinator.inspect_operation(&editor, Position::new(6, 7));
//! assert_eq!(outcome, InspectOutcome::Revealed(DefinitionKey::parse("query-GET_PAGES").unwrap()));
//! ```

mod coordinator;
mod editor;
mod runner;
mod toolbar;

pub use coordinator::{Coordinator, InspectOutcome, DEFAULT_QUERY};
pub use editor::{EditorAction, QueryEditor, TextEditor, INSPECT_OPERATION_CHORD};
pub use runner::{OperationRunner, TransportRunner};
pub use toolbar::{prettify, HistoryEntry, PrettifyError, HISTORY_LIMIT};

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`.
///
/// Logging is off unless `RUST_LOG` says otherwise. Does nothing if a global
/// subscriber is already installed.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
