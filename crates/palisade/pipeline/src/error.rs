//! Pipeline error taxonomy.
//!
//! Validation errors surface before any record exists; toolchain and
//! submission errors halt the pipeline at their step. Storage write errors
//! during step tracking are logged and swallowed, but a failure to create
//! or load a record is fatal and surfaces here.

use palisade_storage::StorageError;
use palisade_submitter::SubmitError;
use palisade_toolchain::ToolchainError;
use palisade_types::{DeploymentId, StepStatus, ValidationError};

/// Result type alias using [`PipelineError`].
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors from running a deployment pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Packager(#[from] palisade_packager::PackagerError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No record exists for the deployment id.
    #[error("deployment {0} not found")]
    NotFound(DeploymentId),

    /// The step number does not exist in the deployment's plan.
    #[error("unknown step number {0}")]
    UnknownStep(u32),

    /// The requested step transition violates monotonicity.
    #[error("invalid transition for step {step}: {} -> {}", .from.as_str(), .to.as_str())]
    InvalidTransition {
        step: u32,
        from: StepStatus,
        to: StepStatus,
    },
}
