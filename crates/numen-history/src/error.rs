//! History error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors that can occur during history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The live note file does not exist.
    #[error("Note not found: {0}")]
    NoteNotFound(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata serialization error.
    #[error("Metadata error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HistoryError {
    /// Create a note not found error.
    pub fn note_not_found(path: impl Into<PathBuf>) -> Self {
        Self::NoteNotFound(path.into())
    }
}
