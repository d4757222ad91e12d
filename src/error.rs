//! Error types for the support bot.

use thiserror::Error;

/// Errors that can occur while answering support messages.
#[derive(Debug, Error)]
pub enum SupportError {
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Request is missing required fields or carries unusable values.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The FAQ corpus has no entries to match against.
    #[error("FAQ corpus is empty")]
    EmptyCorpus,

    /// No session is registered under the given id.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SupportError {
    /// Check if this error was caused by the caller rather than the service.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::SessionNotFound(_))
    }
}

/// Convenience result alias for support operations.
pub type SupportResult<T> = Result<T, SupportError>;
