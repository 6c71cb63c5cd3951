//! Error types for inventory persistence

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while saving or clearing the stored inventory
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error from serde_json
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The temp file could not be moved over the target
    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The platform has no data directory
    #[error("No data directory available")]
    NoDataDir,
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

