//! Error types for ReelFX.

use thiserror::Error;

/// Main error type for ReelFX operations.
#[derive(Error, Debug)]
pub enum ReelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Segment not found: {0}")]
    SegmentNotFound(String),

    #[error("Invalid segment {id}: start {start}s must be before end {end}s")]
    InvalidSegment { id: String, start: f64, end: f64 },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Timeline error: {0}")]
    Timeline(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for ReelFX operations.
pub type Result<T> = std::result::Result<T, ReelError>;
