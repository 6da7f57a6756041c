//! Error types for the storage layer.

use std::io;
use std::path::PathBuf;

use notes_core::{NoteId, ValidationError};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input failed field validation. The store is unchanged.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No note with this id exists.
    #[error("note not found: {0}")]
    NotFound(NoteId),

    /// Reading or writing the snapshot file failed.
    #[error("snapshot I/O failed for {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The snapshot could not be encoded or decoded.
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The snapshot decoded but breaks a store invariant.
    #[error("invalid snapshot {}: {reason}", .path.display())]
    InvalidSnapshot { path: PathBuf, reason: String },

    /// The id counter has no values left to hand out.
    #[error("note id space exhausted")]
    IdsExhausted,
}
