//! Submission error types.

/// Result type alias using [`SubmitError`].
pub type SubmitResult<T> = Result<T, SubmitError>;

/// Errors from submitting a compiled unit to the network.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// No signing credential is configured.
    #[error("submitter has no signing credential configured")]
    NotInitialized,

    /// The target network is not one this service submits to.
    #[error("unsupported network: chain id {0}")]
    UnsupportedNetwork(u64),

    /// The network rejected or dropped the submission.
    #[error("network error: {0}")]
    Network(String),
}
