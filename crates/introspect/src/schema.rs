//! Client-side schema built from an introspection result.

use crate::types::IntrospectionResponse;
use crate::{FetchError, Result};
use apollo_compiler::ast::OperationType;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::Schema;

/// Immutable schema snapshot shared by the editor and the explorer.
///
/// Built once per load and handed out behind an `Arc`; a reload replaces the
/// whole snapshot instead of mutating it.
#[derive(Debug)]
pub struct ClientSchema {
    sdl: String,
    schema: Schema,
}

impl ClientSchema {
    /// Build a schema from a decoded introspection response.
    ///
    /// A response with an `errors` list and no `data` is rejected with the
    /// first error message.
    pub fn from_introspection(response: &IntrospectionResponse) -> Result<Self> {
        let Some(data) = &response.data else {
            let message = response
                .errors
                .first()
                .map_or("response has no data", |e| e.message.as_str());
            return Err(FetchError::Invalid(message.to_string()));
        };

        let sdl = crate::introspection_to_sdl(&data.schema);
        Self::from_sdl(sdl)
    }

    /// Build a schema from SDL text.
    pub fn from_sdl(sdl: String) -> Result<Self> {
        let schema = Schema::parse(&sdl, "introspection.graphql").map_err(|with_errors| {
            let messages: Vec<String> = with_errors
                .errors
                .iter()
                .map(|diagnostic| diagnostic.error.to_string())
                .collect();
            FetchError::Invalid(messages.join("; "))
        })?;

        Ok(Self { sdl, schema })
    }

    /// The SDL the schema was built from.
    #[must_use]
    pub fn sdl(&self) -> &str {
        &self.sdl
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Name of the root type for an operation type, if the schema has one.
    #[must_use]
    pub fn root_type(&self, operation: OperationType) -> Option<&str> {
        self.schema
            .root_operation(operation)
            .map(apollo_compiler::Name::as_str)
    }

    /// Field names of the root type for an operation type, in schema order.
    #[must_use]
    pub fn root_fields(&self, operation: OperationType) -> Vec<&str> {
        let Some(root) = self.schema.root_operation(operation) else {
            return Vec::new();
        };
        match self.schema.types.get(root) {
            Some(ExtendedType::Object(object)) => {
                object.fields.keys().map(apollo_compiler::Name::as_str).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Number of types defined by the schema itself, built-ins excluded.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.schema
            .types
            .values()
            .filter(|t| !t.is_built_in())
            .count()
    }
}
