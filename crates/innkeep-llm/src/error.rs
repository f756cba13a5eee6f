//! Error types for the provider clients.

use thiserror::Error;

/// Result type alias using the provider error type.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors from the embedding and completion providers.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The provider answered with a non-success status.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Network/connectivity failure before a response was received.
    #[error("network error: {0}")]
    Network(String),

    /// Authentication failed (bad or missing API key).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Configuration error (API key missing, bad base URL, etc.).
    #[error("configuration error: {0}")]
    Config(String),

    /// The provider response could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid request parameters (e.g. empty input text).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error in the client itself.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            LlmError::Network(err.to_string())
        } else if err.is_decode() {
            LlmError::Serialization(err.to_string())
        } else {
            LlmError::Upstream(err.to_string())
        }
    }
}
