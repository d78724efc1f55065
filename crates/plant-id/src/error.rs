//! Provider error types.

use thiserror::Error;

/// Failures of a single identification call.
///
/// Each variant renders a distinct message so callers can surface it to
/// clients unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The provider did not answer within the configured timeout.
    #[error("Timeout: the Plant.id API took too long to respond.")]
    Timeout,

    /// Transport failure (DNS, TLS, refused connection) or a non-success status.
    #[error("Connection error with Plant.id: {0}")]
    Connection(String),

    /// The body was not JSON, was empty, or had no top-level `result`.
    #[error("The Plant.id API returned an empty or malformed response.")]
    MalformedResponse,

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl ProviderError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Timeout => "timeout",
            ProviderError::Connection(_) => "connection",
            ProviderError::MalformedResponse => "malformed",
            ProviderError::ClientBuild(_) => "client_build",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Connection(err.to_string())
        }
    }
}

/// Convenience type alias for provider results.
pub type Result<T> = std::result::Result<T, ProviderError>;
