//! Error types for the overlay suggestion subsystem.

use thiserror::Error;

/// Errors that can occur while talking to suggestion or image providers.
///
/// None of these escape the assignment engine: the cascade turns each one
/// into a logged transition and ultimately falls back to local assignment.
#[derive(Debug, Error)]
pub enum AiError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Provider answered successfully but without any message content.
    #[error("Provider returned empty content")]
    EmptyContent,

    /// Content could not be parsed into the expected JSON shape.
    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AI operations.
pub type AiResult<T> = std::result::Result<T, AiError>;
