//! Storage error types.

/// Result type alias using [`StorageError`].
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from the persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Record not found.
    #[error("deployment not found: {0}")]
    NotFound(String),

    /// Record already exists.
    #[error("deployment already exists: {0}")]
    Conflict(String),

    /// Backend failure (connection, lock, serialization).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
