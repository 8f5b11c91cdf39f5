use graphiql_introspect::HttpTransport;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Connection settings supplied by the host page.
///
/// ```yaml
/// graphqlEndpoint: https://example.com/graphql
/// nonce: 0a1b2c3d
/// headers:
///   X-Request-Source: workbench
/// timeout: 60
/// retry: 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Absolute URL of the GraphQL endpoint. Defaults to the page origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphql_endpoint: Option<String>,

    /// Request-forgery nonce, sent as `X-WP-Nonce`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    /// Extra HTTP headers for every request.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// Request timeout in seconds (default: 30)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Number of retry attempts on failure (default: 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<u32>,
}

impl Settings {
    /// Keys a settings file may contain.
    pub const KEYS: &'static [&'static str] =
        &["graphqlEndpoint", "nonce", "headers", "timeout", "retry"];

    /// The endpoint to talk to, falling back to `origin` when none is set.
    #[must_use]
    pub fn endpoint<'a>(&'a self, origin: &'a str) -> &'a str {
        self.graphql_endpoint
            .as_deref()
            .filter(|endpoint| !endpoint.trim().is_empty())
            .unwrap_or(origin)
    }

    /// Build the HTTP transport these settings describe.
    #[must_use]
    pub fn transport(&self, origin: &str) -> HttpTransport {
        let mut transport = HttpTransport::new(self.endpoint(origin)).with_headers(
            self.headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );
        if let Some(nonce) = &self.nonce {
            transport = transport.with_nonce(nonce.as_str());
        }
        if let Some(timeout) = self.timeout {
            transport = transport.with_timeout(Duration::from_secs(timeout));
        }
        if let Some(retry) = self.retry {
            transport = transport.with_retries(retry);
        }
        transport
    }
}
