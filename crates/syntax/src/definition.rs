//! Top-level definition descriptors and the explorer key grammar.

use graphiql_types::OffsetRange;

/// The literal used for a missing name or an unrecognised definition kind.
pub const UNKNOWN: &str = "unknown";

/// Kind of a top-level definition in a query document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    /// `query`, `mutation`, `subscription`, or an anonymous selection set
    Operation,
    /// `fragment Name on Type { ... }`
    Fragment,
    /// Type-system definitions and extensions. The grammar accepts them in a
    /// document, but the explorer never renders a node for them.
    Other,
}

/// Operation type of an operation definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    /// The keyword for this operation type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a parsed document's top-level definition list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionNode {
    /// Operation, fragment, or anything else
    pub kind: DefinitionKind,
    /// Set for operations only; the anonymous shorthand is a query
    pub operation_type: Option<OperationType>,
    /// Definition name, if it has one
    pub name: Option<String>,
    /// Syntactic extent in bytes, leading and trailing trivia excluded
    pub source_span: Option<OffsetRange>,
}

impl DefinitionNode {
    /// Label of the kind segment of this definition's key.
    #[must_use]
    pub const fn key_kind(&self) -> KeyKind {
        match (self.kind, self.operation_type) {
            (DefinitionKind::Operation, Some(OperationType::Query) | None) => KeyKind::Query,
            (DefinitionKind::Operation, Some(OperationType::Mutation)) => KeyKind::Mutation,
            (DefinitionKind::Operation, Some(OperationType::Subscription)) => {
                KeyKind::Subscription
            }
            (DefinitionKind::Fragment, _) => KeyKind::Fragment,
            (DefinitionKind::Other, _) => KeyKind::Unknown,
        }
    }

    /// The explorer key identifying this definition.
    #[must_use]
    pub fn key(&self) -> DefinitionKey {
        DefinitionKey::new(self.key_kind(), self.name.as_deref())
    }
}

/// Kind segment of a [`DefinitionKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Query,
    Mutation,
    Subscription,
    Fragment,
    Unknown,
}

impl KeyKind {
    const ALL: [Self; 5] = [
        Self::Query,
        Self::Mutation,
        Self::Subscription,
        Self::Fragment,
        Self::Unknown,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
            Self::Fragment => "fragment",
            Self::Unknown => UNKNOWN,
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == label)
    }
}

/// Identifier shared by the resolver and the explorer: `{kind}-{name}`.
///
/// `kind` is one of `query`, `mutation`, `subscription`, `fragment`,
/// `unknown`; `name` is the definition name or the literal `unknown`.
/// GraphQL names cannot contain `-`, so the first `-` always separates the
/// two segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefinitionKey(String);

impl DefinitionKey {
    #[must_use]
    pub fn new(kind: KeyKind, name: Option<&str>) -> Self {
        Self(format!("{}-{}", kind.as_str(), name.unwrap_or(UNKNOWN)))
    }

    /// Parse a key received from the explorer side.
    ///
    /// Returns `None` if the text does not follow the key grammar.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (kind, name) = text.split_once('-')?;
        KeyKind::from_label(kind)?;
        if name.is_empty() || !name.chars().all(|c| c == '_' || c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(Self(text.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The kind segment.
    #[must_use]
    pub fn kind(&self) -> KeyKind {
        self.0
            .split_once('-')
            .and_then(|(kind, _)| KeyKind::from_label(kind))
            .unwrap_or(KeyKind::Unknown)
    }

    /// The name segment.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.split_once('-').map_or(UNKNOWN, |(_, name)| name)
    }
}

impl std::fmt::Display for DefinitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DefinitionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
