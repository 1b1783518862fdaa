//! # palisade-types
//!
//! Shared data model for the Palisade deployment orchestrator.
//!
//! A deployment starts as a [`RawDeploymentRequest`] (inbound JSON), is
//! normalized into a canonical [`DeploymentRequest`], and accumulates into
//! the [`Deployment`] aggregate as the pipeline advances:
//!
//! ```text
//! RawDeploymentRequest → DeploymentRequest
//!     │
//!     ▼
//! GeneratedArtifact → CompiledUnit → on-chain address
//!     │ (tracked step-by-step in Deployment.steps)
//!     ▼
//! RiskAssessment + MonitoringConfig + AlertRules
//! ```
//!
//! The aggregate exclusively owns all nested entities; pipeline steps are
//! only mutated through the tracker in `palisade-pipeline`.

#![deny(unsafe_code)]

pub mod artifact;
pub mod deployment;
pub mod ids;
pub mod monitoring;
pub mod network;
pub mod request;
pub mod step;
pub mod tier;

// Re-exports
pub use artifact::{CompiledUnit, FunctionParameter, FunctionSignature, GeneratedArtifact};
pub use deployment::{round_cost, Deployment, DeploymentStatus, COST_DECIMALS};
pub use ids::{DeploymentId, UserId};
pub use monitoring::{
    AlertAction, AlertRule, AlertSeverity, MonitoringConfig, MonitoringThresholds, RiskAssessment,
    RiskLevel,
};
pub use network::NetworkId;
pub use request::{
    normalize, DeploymentRequest, GuardCategory, RawDeploymentRequest, ValidationError,
};
pub use step::{PipelineStep, StepStatus, UserActionKind};
pub use tier::{ComplexityTier, MonitoringTier, SecurityTier};
