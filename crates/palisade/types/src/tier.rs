//! Request tier enums.
//!
//! Inbound requests carry tiers as free strings. Unknown values fall back to
//! the documented default rather than being rejected, so the pipeline stays
//! resilient to client drift.

use serde::{Deserialize, Serialize};

/// Complexity of the requested guard contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    Simple,
    Medium,
    Advanced,
    Enterprise,
}

impl ComplexityTier {
    /// Parse leniently: unknown values map to the default (`Medium`).
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "simple" => Self::Simple,
            "advanced" => Self::Advanced,
            "enterprise" => Self::Enterprise,
            _ => Self::Medium,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Medium => "medium",
            Self::Advanced => "advanced",
            Self::Enterprise => "enterprise",
        }
    }
}

impl Default for ComplexityTier {
    fn default() -> Self {
        Self::Medium
    }
}

/// Security posture requested for the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityTier {
    Basic,
    Premium,
    Enterprise,
}

impl SecurityTier {
    /// Parse leniently: unknown values map to the default (`Basic`).
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "premium" => Self::Premium,
            "enterprise" => Self::Enterprise,
            _ => Self::Basic,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Enterprise => "enterprise",
        }
    }
}

impl Default for SecurityTier {
    fn default() -> Self {
        Self::Basic
    }
}

/// Post-deployment monitoring depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitoringTier {
    Basic,
    Premium,
    Enterprise,
}

impl MonitoringTier {
    /// Parse leniently: unknown values map to the default (`Basic`).
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "premium" => Self::Premium,
            "enterprise" => Self::Enterprise,
            _ => Self::Basic,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Enterprise => "enterprise",
        }
    }
}

impl Default for MonitoringTier {
    fn default() -> Self {
        Self::Basic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_lenient_parse() {
        assert_eq!(ComplexityTier::parse_lenient("simple"), ComplexityTier::Simple);
        assert_eq!(ComplexityTier::parse_lenient("ADVANCED"), ComplexityTier::Advanced);
        assert_eq!(ComplexityTier::parse_lenient("  enterprise "), ComplexityTier::Enterprise);
        // Unknown values never reject, they default
        assert_eq!(ComplexityTier::parse_lenient("ultra"), ComplexityTier::Medium);
        assert_eq!(ComplexityTier::parse_lenient(""), ComplexityTier::Medium);
    }

    #[test]
    fn security_lenient_parse_defaults_to_basic() {
        assert_eq!(SecurityTier::parse_lenient("premium"), SecurityTier::Premium);
        assert_eq!(SecurityTier::parse_lenient("gold"), SecurityTier::Basic);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(SecurityTier::Basic < SecurityTier::Premium);
        assert!(SecurityTier::Premium < SecurityTier::Enterprise);
        assert!(ComplexityTier::Simple < ComplexityTier::Enterprise);
    }
}
