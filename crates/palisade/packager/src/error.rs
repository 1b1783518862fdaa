//! Packager error types.

/// Result type alias using [`PackagerError`].
pub type PackagerResult<T> = Result<T, PackagerError>;

/// Errors from rendering or writing deployment configuration documents.
#[derive(Debug, thiserror::Error)]
pub enum PackagerError {
    /// A document failed to serialize.
    #[error("failed to render document: {0}")]
    Render(#[from] serde_json::Error),

    /// Writing a rendered document to disk failed.
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),
}
