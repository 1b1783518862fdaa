//! Toolchain error types.

/// Result type alias using [`ToolchainError`].
pub type ToolchainResult<T> = Result<T, ToolchainError>;

/// Errors from driving the external compilation toolchain.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    /// Failed to spawn or communicate with the toolchain process.
    #[error("failed to run toolchain: {0}")]
    Io(#[from] std::io::Error),

    /// The toolchain did not finish within the bounded timeout.
    #[error("toolchain timed out after {0}s")]
    Timeout(u64),

    /// The toolchain reported real errors (not just warnings).
    #[error("compilation failed: {0}")]
    CompilationFailed(String),

    /// A unit descriptor could not be parsed.
    #[error("bad unit descriptor {path}: {reason}")]
    Descriptor { path: String, reason: String },
}
