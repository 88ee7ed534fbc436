//! Error types for price store operations.

use thiserror::Error;

/// Data-access failure reported by a price store.
///
/// The valuation and risk layers never retry or swallow these; they reach
/// the caller with the store's message intact.
#[derive(Debug, Error)]
pub enum TraitError {
    /// Connection to the backing store failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Store exists but cannot be used right now (e.g. locked)
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Operation timed out
    #[error("timeout")]
    Timeout,

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Database error
    #[error("database error: {0}")]
    DatabaseError(String),
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        TraitError::IoError(e.to_string())
    }
}

impl From<varlens_core::CoreError> for TraitError {
    fn from(e: varlens_core::CoreError) -> Self {
        TraitError::ParseError(e.to_string())
    }
}
