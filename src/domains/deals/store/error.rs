//! Store-specific error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing deals.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No deal with the given id exists.
    #[error("Deal not found")]
    NotFound(String),

    /// A deal with the given id already exists.
    #[error("Deal already exists: {0}")]
    AlreadyExists(String),

    /// SQLite failure.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The deals file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The deals file is not valid JSON or holds invalid deals.
    #[error("Invalid deals file: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored value does not fit the deal model.
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// A thread panicked while holding the store lock.
    #[error("Deal store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Create a new "not found" error.
    pub fn not_found(deal_id: impl Into<String>) -> Self {
        Self::NotFound(deal_id.into())
    }

    /// Create a new "already exists" error.
    pub fn already_exists(deal_id: impl Into<String>) -> Self {
        Self::AlreadyExists(deal_id.into())
    }

    /// Create a new I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::deals::model::DEAL_NOT_FOUND;

    #[test]
    fn test_not_found_message_is_fixed() {
        let err = StoreError::not_found("D-42");
        assert_eq!(err.to_string(), DEAL_NOT_FOUND);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_already_exists_message() {
        let err = StoreError::already_exists("D-1");
        assert_eq!(err.to_string(), "Deal already exists: D-1");
        assert!(!err.is_not_found());
    }
}
