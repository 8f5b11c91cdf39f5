//! Schema loading over a [`Transport`].

use crate::{
    ClientSchema, FetchError, GraphQLRequest, IntrospectionResponse, Result, Transport,
    INTROSPECTION_QUERY,
};

/// Sends the introspection query through `transport` and builds a
/// [`ClientSchema`] from the response.
///
/// # Errors
///
/// Returns the transport's error unchanged, [`FetchError::Parse`] when the
/// response is not an introspection result, and [`FetchError::Invalid`] when
/// the server reports errors instead of data or the schema fails to build.
#[tracing::instrument(skip(transport))]
pub async fn load_schema<T: Transport>(transport: &T) -> Result<ClientSchema> {
    tracing::info!("Starting introspection");
    let request = GraphQLRequest::new(INTROSPECTION_QUERY)
        .with_operation_name("IntrospectionQuery")
        .retryable();
    let value = transport.execute(&request).await?;

    let response: IntrospectionResponse = serde_json::from_value(value).map_err(|e| {
        tracing::error!(error = %e, "Response is not an introspection result");
        FetchError::Parse(e.to_string())
    })?;

    let schema = ClientSchema::from_introspection(&response)?;
    tracing::info!(
        types = schema.type_count(),
        sdl_length = schema.sdl().len(),
        "Schema loaded"
    );
    Ok(schema)
}
