//! Generation error types.

/// Result type alias using [`GenerationError`].
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Errors from a single generation backend call.
///
/// These never escape [`BackendChain::generate`](crate::BackendChain::generate):
/// the deterministic fallback guarantees end-to-end success.
/// [`GenerationError::Exhausted`] is retained only as an internal
/// invariant-violation signal for a misconfigured chain.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Backend has no credential configured; skipped, not counted as failure.
    #[error("backend unavailable: no credential configured")]
    Unavailable,

    /// Backend did not answer within the bounded timeout.
    #[error("backend timed out after {0}s")]
    Timeout(u64),

    /// Transport-level failure (connection, HTTP status).
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider answered, but the payload failed structured extraction.
    #[error("malformed provider response: {0}")]
    Malformed(String),

    /// Provider rejected the call due to rate limiting.
    #[error("backend rate limited")]
    RateLimited,

    /// Every link in the chain failed, including the deterministic fallback.
    /// Reaching this means the chain was constructed without its fallback.
    #[error("generation chain exhausted with no fallback")]
    Exhausted,
}
