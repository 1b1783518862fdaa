//! Inbound deployment requests and the request normalizer.
//!
//! [`RawDeploymentRequest`] mirrors the inbound JSON contract with free-string
//! tier fields. [`normalize`] validates and clamps it into the canonical,
//! immutable [`DeploymentRequest`] the rest of the pipeline consumes.

use serde::{Deserialize, Serialize};

use crate::network::NetworkId;
use crate::tier::{ComplexityTier, MonitoringTier, SecurityTier};

/// Category of protective artifact the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardCategory {
    /// Honeypot-style contract that captures attacker funds.
    FundCapture,
    /// Passive observer of value flows.
    FlowWatcher,
    /// Access-restriction enforcement.
    AccessControl,
    /// General-purpose guard.
    Generic,
}

impl GuardCategory {
    /// Parse leniently: unknown values map to [`GuardCategory::Generic`].
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "fund_capture" | "honeypot" => Self::FundCapture,
            "flow_watcher" | "watcher" => Self::FlowWatcher,
            "access_control" => Self::AccessControl,
            _ => Self::Generic,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FundCapture => "fund_capture",
            Self::FlowWatcher => "flow_watcher",
            Self::AccessControl => "access_control",
            Self::Generic => "generic",
        }
    }
}

impl Default for GuardCategory {
    fn default() -> Self {
        Self::Generic
    }
}

/// Raw inbound request, exactly as received over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeploymentRequest {
    pub description: String,
    #[serde(default)]
    pub complexity_tier: String,
    #[serde(default)]
    pub security_tier: String,
    pub network_id: u64,
    pub budget: f64,
    #[serde(default)]
    pub artifact_category: String,
    #[serde(default)]
    pub monitoring_tier: String,
    #[serde(default)]
    pub custom_requirements: Vec<String>,
}

/// Canonical deployment request. Immutable once accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentRequest {
    pub description: String,
    pub complexity: ComplexityTier,
    pub security: SecurityTier,
    pub network: NetworkId,
    pub budget: f64,
    pub category: GuardCategory,
    pub monitoring: MonitoringTier,
    pub custom_requirements: Vec<String>,
}

/// Errors surfaced synchronously, before any pipeline step is created.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// Description was empty or whitespace-only.
    #[error("deployment description must not be empty")]
    EmptyDescription,

    /// Budget was zero, negative, or not a finite number.
    #[error("budget must be a positive amount, got {0}")]
    InvalidBudget(f64),

    /// Request named a network other than the supported one.
    #[error("unsupported network: chain id {0}")]
    UnsupportedNetwork(u64),
}

/// Validate and clamp a raw request into canonical form.
///
/// Tier fields never reject: unknown values fall back to their documented
/// defaults. The description, budget, and network id are hard requirements.
pub fn normalize(raw: &RawDeploymentRequest) -> Result<DeploymentRequest, ValidationError> {
    let description = raw.description.trim();
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    if !raw.budget.is_finite() || raw.budget <= 0.0 {
        return Err(ValidationError::InvalidBudget(raw.budget));
    }

    let network = NetworkId::new(raw.network_id);
    if !network.is_supported() {
        return Err(ValidationError::UnsupportedNetwork(raw.network_id));
    }

    Ok(DeploymentRequest {
        description: description.to_owned(),
        complexity: ComplexityTier::parse_lenient(&raw.complexity_tier),
        security: SecurityTier::parse_lenient(&raw.security_tier),
        network,
        budget: raw.budget,
        category: GuardCategory::parse_lenient(&raw.artifact_category),
        monitoring: MonitoringTier::parse_lenient(&raw.monitoring_tier),
        custom_requirements: raw
            .custom_requirements
            .iter()
            .map(|r| r.trim().to_owned())
            .filter(|r| !r.is_empty())
            .collect(),
    })
}
