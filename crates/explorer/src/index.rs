//! Lookup from definition keys to explorer nodes.

use graphiql_introspect::ClientSchema;
use graphiql_syntax::{DefinitionKey, DefinitionKind, DefinitionNode, OperationType};
use graphiql_types::OffsetRange;
use std::collections::HashMap;

/// Handle of a node in the explorer panel, stable for one index build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(usize);

impl NodeHandle {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One explorer node: a top-level operation or fragment of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerNode {
    pub handle: NodeHandle,
    pub key: DefinitionKey,
    pub span: Option<OffsetRange>,
    /// Root fields the schema offers for this operation. Empty for
    /// fragments, or when no schema is loaded.
    pub root_fields: Vec<String>,
}

/// Key to node lookup for the explorer panel.
///
/// Nodes are registered in document order. Several definitions can share a
/// key (anonymous operations, repeated names); each still gets its own node,
/// but lookups return the first one registered.
#[derive(Debug, Clone, Default)]
pub struct ExplorerIndex {
    nodes: Vec<ExplorerNode>,
    by_key: HashMap<DefinitionKey, NodeHandle>,
}

impl ExplorerIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the operations and fragments among `definitions`, annotating
    /// operations with the root fields of `schema` when one is loaded.
    /// Type-system definitions get no node.
    #[must_use]
    pub fn build(definitions: &[DefinitionNode], schema: Option<&ClientSchema>) -> Self {
        let mut index = Self::new();
        for definition in definitions {
            if definition.kind == DefinitionKind::Other {
                continue;
            }
            let root_fields = schema
                .zip(schema_operation(definition))
                .map(|(schema, operation)| {
                    schema
                        .root_fields(operation)
                        .into_iter()
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            index.register(definition.key(), definition.source_span, root_fields);
        }
        index
    }

    /// Add a node. The key maps to this node only if no earlier node claimed it.
    pub fn register(
        &mut self,
        key: DefinitionKey,
        span: Option<OffsetRange>,
        root_fields: Vec<String>,
    ) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len());
        self.by_key.entry(key.clone()).or_insert(handle);
        self.nodes.push(ExplorerNode {
            handle,
            key,
            span,
            root_fields,
        });
        handle
    }

    #[must_use]
    pub fn get(&self, key: &DefinitionKey) -> Option<NodeHandle> {
        self.by_key.get(key).copied()
    }

    #[must_use]
    pub fn node(&self, handle: NodeHandle) -> Option<&ExplorerNode> {
        self.nodes.get(handle.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ExplorerNode> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The registered key closest to `key` by edit distance, for diagnostics.
    #[must_use]
    pub fn closest_key(&self, key: &DefinitionKey) -> Option<&DefinitionKey> {
        self.by_key
            .keys()
            .map(|known| (strsim::levenshtein(key.as_str(), known.as_str()), known))
            .filter(|(distance, _)| *distance <= 3)
            .min_by(|(a, a_key), (b, b_key)| a.cmp(b).then_with(|| a_key.cmp(b_key)))
            .map(|(_, known)| known)
    }
}

fn schema_operation(definition: &DefinitionNode) -> Option<graphiql_introspect::OperationType> {
    if definition.kind != DefinitionKind::Operation {
        return None;
    }
    Some(match definition.operation_type? {
        OperationType::Query => graphiql_introspect::OperationType::Query,
        OperationType::Mutation => graphiql_introspect::OperationType::Mutation,
        OperationType::Subscription => graphiql_introspect::OperationType::Subscription,
    })
}
