//! Monitoring policy, alert rules, and risk assessment types.

use serde::{Deserialize, Serialize};

/// Overall risk classification of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Risk assessment attached to a deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub overall_risk: RiskLevel,
    /// Numeric score in [0, 100]; higher is riskier.
    pub score: f64,
    pub vulnerabilities: Vec<String>,
    pub mitigations: Vec<String>,
}

/// Ceilings the monitoring runtime alerts on.
///
/// The suspicious-activity ceiling is only set at the enterprise security
/// tier; lower tiers leave it unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringThresholds {
    /// Resource-usage (gas) ceiling per transaction.
    pub resource_usage: u64,
    /// Transaction-volume ceiling per poll window.
    pub transaction_volume: u64,
    /// Error-rate ceiling in [0, 1].
    pub error_rate: f64,
    /// Suspicious-activity event ceiling per poll window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspicious_activity: Option<u64>,
}

/// Monitoring policy derived from the request's security tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    /// Poll interval in seconds.
    pub poll_interval_secs: u64,
    pub thresholds: MonitoringThresholds,
    /// Log retention in days.
    pub log_retention_days: u32,
}

/// Severity of an alert rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// Automated response taken when an alert fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertAction {
    Notify,
    Pause,
    Shutdown,
    Custom,
}

/// One alert rule attached to a deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: String,
    pub name: String,
    /// Trigger condition expression, e.g. `error_rate > 0.05`.
    pub condition: String,
    pub severity: AlertSeverity,
    pub action: AlertAction,
    pub enabled: bool,
    /// Minimum seconds between consecutive firings.
    pub cooldown_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn thresholds_serialize_without_unset_ceiling() {
        let thresholds = MonitoringThresholds {
            resource_usage: 500_000,
            transaction_volume: 1_000,
            error_rate: 0.05,
            suspicious_activity: None,
        };
        let json = serde_json::to_string(&thresholds).unwrap();
        assert!(!json.contains("suspicious_activity"));
    }
}
