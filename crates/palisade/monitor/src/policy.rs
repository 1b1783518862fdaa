//! Monitoring policy and alert rule derivation.

use palisade_types::{
    AlertAction, AlertRule, AlertSeverity, DeploymentRequest, MonitoringConfig,
    MonitoringThresholds, SecurityTier,
};

/// Threshold ceilings per security tier. Every ceiling strictly tightens as
/// the tier rises; only enterprise sets the suspicious-activity ceiling.
fn thresholds_for(tier: SecurityTier) -> MonitoringThresholds {
    match tier {
        SecurityTier::Basic => MonitoringThresholds {
            resource_usage: 500_000,
            transaction_volume: 1_000,
            error_rate: 0.05,
            suspicious_activity: None,
        },
        SecurityTier::Premium => MonitoringThresholds {
            resource_usage: 300_000,
            transaction_volume: 500,
            error_rate: 0.02,
            suspicious_activity: None,
        },
        SecurityTier::Enterprise => MonitoringThresholds {
            resource_usage: 150_000,
            transaction_volume: 200,
            error_rate: 0.01,
            suspicious_activity: Some(10),
        },
    }
}

fn poll_interval_secs(tier: SecurityTier) -> u64 {
    match tier {
        SecurityTier::Basic => 300,
        SecurityTier::Premium => 60,
        SecurityTier::Enterprise => 15,
    }
}

fn log_retention_days(tier: SecurityTier) -> u32 {
    match tier {
        SecurityTier::Basic => 30,
        SecurityTier::Premium => 90,
        SecurityTier::Enterprise => 365,
    }
}

fn mentions_access_restriction(request: &DeploymentRequest) -> bool {
    request.custom_requirements.iter().any(|req| {
        let lowered = req.to_lowercase();
        lowered.contains("access") || lowered.contains("restrict")
    })
}

/// Derive the monitoring policy and alert rules for a request.
///
/// Pure function of the request; called once per deployment during the
/// final pipeline step.
pub fn configure(request: &DeploymentRequest) -> (MonitoringConfig, Vec<AlertRule>) {
    let tier = request.security;
    let thresholds = thresholds_for(tier);

    let mut rules = vec![
        AlertRule {
            id: "elevated-resource-usage".to_owned(),
            name: "Elevated resource usage".to_owned(),
            condition: format!("resource_usage > {}", thresholds.resource_usage),
            severity: AlertSeverity::Warning,
            action: AlertAction::Notify,
            enabled: true,
            cooldown_secs: 300,
        },
        AlertRule {
            id: "suspicious-activity".to_owned(),
            name: "Suspicious activity".to_owned(),
            condition: "suspicious_activity > 0".to_owned(),
            severity: AlertSeverity::Error,
            action: AlertAction::Pause,
            enabled: true,
            cooldown_secs: 60,
        },
        AlertRule {
            id: "error-rate-spike".to_owned(),
            name: "Error rate spike".to_owned(),
            condition: format!("error_rate > {}", thresholds.error_rate),
            severity: AlertSeverity::Critical,
            action: AlertAction::Shutdown,
            enabled: true,
            cooldown_secs: 60,
        },
    ];

    if mentions_access_restriction(request) {
        rules.push(AlertRule {
            id: "unauthorized-access".to_owned(),
            name: "Unauthorized access attempt".to_owned(),
            condition: "unauthorized_call == true".to_owned(),
            severity: AlertSeverity::Critical,
            action: AlertAction::Shutdown,
            enabled: true,
            cooldown_secs: 0,
        });
    }

    let config = MonitoringConfig {
        enabled: true,
        poll_interval_secs: poll_interval_secs(tier),
        thresholds,
        log_retention_days: log_retention_days(tier),
    };

    (config, rules)
}
