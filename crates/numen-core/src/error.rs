//! Core error types.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in note and config management.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Referenced note does not exist.
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Referenced template does not exist.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Referenced section index is out of range.
    #[error("Section {index} not found. Note has {count} sections (0-{})", count.saturating_sub(1))]
    SectionNotFound { index: usize, count: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config serialization error.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Frontmatter serialization error.
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] serde_yaml::Error),

    /// Invalid input or argument.
    #[error("{0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Create a note not found error.
    pub fn note_not_found(identifier: impl Into<String>) -> Self {
        Self::NoteNotFound(identifier.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
