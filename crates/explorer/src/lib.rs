//! The explorer side of the editor/explorer link.
//!
//! The explorer panel shows one node per top-level definition of the current
//! document, tagged with the same [`DefinitionKey`] the resolver derives.
//! [`ExplorerIndex`] maps keys to node handles, and [`ExplorerBridge`] keeps
//! that index in step with the coordinator's state and scrolls the view to a
//! node on request.
//!
//! [`DefinitionKey`]: graphiql_syntax::DefinitionKey

mod bridge;
mod index;

pub use bridge::{ExplorerBindings, ExplorerBridge, ExplorerView};
pub use index::{ExplorerIndex, ExplorerNode, NodeHandle};
