//! Running operations picked in the explorer.

use graphiql_introspect::{GraphQLRequest, Result, Transport};
use std::future::Future;
use std::sync::Arc;

/// Executes an operation of a document by name.
pub trait OperationRunner {
    /// Run `operation_name` from `document` and resolve to the raw response.
    ///
    /// The name is passed through as given, without checking that the
    /// document defines it.
    fn run(
        &self,
        document: &str,
        operation_name: Option<&str>,
    ) -> impl Future<Output = Result<serde_json::Value>>;
}

/// Runs operations through the transport used for introspection.
///
/// Requests are not marked retryable, so a transport sends each operation
/// exactly once.
#[derive(Debug)]
pub struct TransportRunner<T> {
    transport: Arc<T>,
}

impl<T> TransportRunner<T> {
    #[must_use]
    pub const fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }
}

impl<T> Clone for TransportRunner<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> OperationRunner for TransportRunner<T> {
    #[tracing::instrument(skip(self, document), fields(document_length = document.len()))]
    async fn run(&self, document: &str, operation_name: Option<&str>) -> Result<serde_json::Value> {
        let mut request = GraphQLRequest::new(document);
        if let Some(name) = operation_name {
            request = request.with_operation_name(name);
        }
        self.transport.execute(&request).await
    }
}
