//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Key is not a valid object key.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    /// Object metadata could not be encoded or decoded.
    #[error("object metadata error: {0}")]
    Metadata(#[from] serde_json::Error),
    /// The backend refused or could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Other error.
    #[error("{0}")]
    Other(String),
}
