//! Error types for snapshot persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while persisting or loading a snapshot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Could not create the directory holding the snapshot.
    #[error("failed to create directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not write or rename the snapshot file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not read the snapshot file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
