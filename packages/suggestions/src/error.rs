//! Typed errors for the suggestion library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during replay and extraction operations.
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// Transcript document was malformed or had an unsupported shape
    #[error("invalid transcript: {reason}")]
    InvalidTranscript { reason: String },

    /// Model backend unavailable or failed
    #[error("model error: {0}")]
    Model(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for suggestion operations.
pub type Result<T> = std::result::Result<T, SuggestionError>;
