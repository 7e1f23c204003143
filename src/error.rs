//! Error types for BucketKV
//!
//! Provides a unified error type for all operations. Missing keys are not
//! errors: lookups report `None` and deletes of absent keys are no-ops.

use thiserror::Error;

/// Result type alias using BucketError
pub type Result<T> = std::result::Result<T, BucketError>;

/// Unified error type for BucketKV operations
#[derive(Debug, Error)]
pub enum BucketError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Index Errors
    // -------------------------------------------------------------------------
    #[error("Index invariant violated: {0}")]
    InvariantViolation(String),
}

impl From<serde_json::Error> for BucketError {
    fn from(err: serde_json::Error) -> Self {
        BucketError::Serialization(err.to_string())
    }
}
