//! Scripted transport double.

use graphiql_introspect::{FetchError, GraphQLRequest, Result, Transport};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A [`Transport`] that replays scripted responses in order and records
/// every request it receives.
///
/// Once the script runs out, further requests fail with a network error.
///
/// ```
/// use graphiql_introspect::{GraphQLRequest, Transport};
/// use graphiql_test_utils::ScriptedTransport;
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let transport = ScriptedTransport::new().respond(json!({ "data": { "f": 1 } }));
/// let response = transport.execute(&GraphQLRequest::new("{ f }")).await.unwrap();
/// assert_eq!(response["data"]["f"], 1);
/// assert_eq!(transport.requests()[0].query, "{ f }");
/// assert!(transport.execute(&GraphQLRequest::new("{ f }")).await.is_err());
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value>>>,
    requests: Mutex<Vec<GraphQLRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn respond(self, response: Value) -> Self {
        self.push(Ok(response));
        self
    }

    /// Queue a failure.
    pub fn fail(self, error: FetchError) -> Self {
        self.push(Err(error));
        self
    }

    /// Queue a response on an already shared transport.
    pub fn push(&self, response: Result<Value>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<GraphQLRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    async fn execute(&self, request: &GraphQLRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("no scripted response left".to_string())))
    }
}
