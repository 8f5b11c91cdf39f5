//! The transport seam and its HTTP implementation.
//!
//! Everything that talks to the GraphQL endpoint goes through [`Transport`].
//! The host application supplies [`HttpTransport`] configured with its
//! endpoint and authentication; tests supply scripted doubles.

use crate::{FetchError, GraphQLRequest, Result};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

/// Default timeout for requests (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default number of retry attempts.
const DEFAULT_RETRIES: u32 = 0;

/// Upper bound for the delay between two attempts.
const MAX_BACKOFF_SECS: u64 = 60;

/// Header carrying the host's request-forgery nonce.
pub const NONCE_HEADER: &str = "X-WP-Nonce";

/// Sends a GraphQL request and resolves to the decoded JSON response.
///
/// Endpoint resolution, authentication and timeouts belong to the
/// implementation. Callers only rely on the response being JSON with a
/// `data` field on success.
pub trait Transport {
    fn execute(&self, request: &GraphQLRequest) -> impl Future<Output = Result<serde_json::Value>>;
}

impl<T: Transport> Transport for &T {
    fn execute(&self, request: &GraphQLRequest) -> impl Future<Output = Result<serde_json::Value>> {
        (**self).execute(request)
    }
}

/// HTTP transport posting JSON to a GraphQL endpoint.
///
/// # Examples
///
/// ```no_run
/// use graphiql_introspect::{load_schema, HttpTransport};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = HttpTransport::new("https://example.com/graphql")
///     .with_nonce("0a1b2c3d")
///     .with_timeout(Duration::from_secs(60))
///     .with_retries(2);
/// let schema = load_schema(&transport).await?;
/// println!("{} types", schema.type_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    headers: HashMap<String, String>,
    timeout: Duration,
    connect_timeout: Duration,
    retries: u32,
}

impl HttpTransport {
    /// Creates a transport for `endpoint` with default settings.
    ///
    /// Default settings:
    /// - 30 second request timeout
    /// - 10 second connection timeout
    /// - No retries
    /// - No custom headers
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            headers: HashMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
        }
    }

    /// Adds a custom HTTP header to every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds multiple HTTP headers from an iterator.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Sends the host's nonce in the [`NONCE_HEADER`] header.
    #[must_use]
    pub fn with_nonce(self, nonce: impl Into<String>) -> Self {
        self.with_header(NONCE_HEADER, nonce)
    }

    /// Sets the request timeout (connection + transfer). Default is 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout. Default is 10 seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the number of retry attempts on retryable failures.
    ///
    /// Retries use exponential backoff starting at 1 second and capped at a
    /// minute. Only requests marked [`GraphQLRequest::retryable`] are retried;
    /// everything else is sent exactly once.
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute_with_retries(&self, request: &GraphQLRequest) -> Result<serde_json::Value> {
        let mut last_error = None;
        let attempts = if request.retryable {
            self.retries.saturating_add(1)
        } else {
            1
        };

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                tracing::info!(
                    attempt,
                    delay_secs = delay.as_secs(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            match self.execute_once(request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Request failed");
                    let retryable = e.is_retryable();
                    last_error = Some(e);
                    if !retryable {
                        break;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FetchError::Network("No attempts made".to_string())))
    }

    async fn execute_once(&self, request: &GraphQLRequest) -> Result<serde_json::Value> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {e}")))?;

        let mut builder = client
            .post(&self.endpoint)
            .header("Content-Type", "application/json");
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .json(request)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %error_body, "HTTP error response");
            return Err(FetchError::Http(status.as_u16(), error_body));
        }

        response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse response body");
            FetchError::Parse(e.to_string())
        })
    }
}

/// Delay before `attempt` (1-based among retries): 1s, 2s, 4s, ... up to
/// [`MAX_BACKOFF_SECS`].
fn backoff_delay(attempt: u32) -> Duration {
    let secs = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_secs(secs.min(MAX_BACKOFF_SECS))
}

impl Transport for HttpTransport {
    #[tracing::instrument(skip(self, request), fields(endpoint = %self.endpoint, operation = ?request.operation_name))]
    async fn execute(&self, request: &GraphQLRequest) -> Result<serde_json::Value> {
        self.execute_with_retries(request).await
    }
}
