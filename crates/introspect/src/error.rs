use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Failure of a request made through a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid introspection response: {0}")]
    Invalid(String),
}

impl FetchError {
    /// Network failures and 5xx responses may succeed on a later attempt.
    /// Parse errors, 4xx responses and invalid payloads will not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http(status, _) => *status >= 500,
            Self::Parse(_) | Self::Invalid(_) => false,
        }
    }
}
