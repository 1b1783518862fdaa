//! Document rendering.
//!
//! Both documents serialize through structs with a fixed field order, so
//! rendering the same aggregate twice yields byte-identical output. Maps
//! are deliberately absent.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use palisade_types::{AlertRule, Deployment, MonitoringConfig, PipelineStep};

use crate::error::PackagerResult;

/// File name of the flat settings document.
pub const SETTINGS_FILE: &str = "guard.settings.json";
/// File name of the nested descriptor document.
pub const DESCRIPTOR_FILE: &str = "guard.descriptor.json";

/// The two rendered documents, ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedConfigs {
    pub settings: String,
    pub descriptor: String,
}

// ── Settings document (flat sections) ──

#[derive(Serialize)]
struct SettingsDocument {
    project: ProjectSection,
    network: NetworkSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    compilation: Option<CompilationSection>,
    monitoring: MonitoringSection,
    features: FeatureSection,
    cost: CostSection,
}

#[derive(Serialize)]
struct ProjectSection {
    name: String,
    deployment_id: String,
    user_id: String,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct NetworkSection {
    chain_id: u64,
    name: String,
    address: String,
    tx_id: String,
}

#[derive(Serialize)]
struct CompilationSection {
    unit_name: String,
    toolchain_version: String,
    optimized: bool,
    optimizer_runs: u32,
}

#[derive(Serialize)]
struct MonitoringSection {
    enabled: bool,
    poll_interval_secs: u64,
    resource_usage_ceiling: u64,
    transaction_volume_ceiling: u64,
    error_rate_ceiling: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    suspicious_activity_ceiling: Option<u64>,
    log_retention_days: u32,
}

#[derive(Serialize)]
struct FeatureSection {
    monitoring_enabled: bool,
    manual_build: bool,
    access_restricted: bool,
    alert_rule_count: usize,
}

#[derive(Serialize)]
struct CostSection {
    budget: f64,
    estimated: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual: Option<f64>,
}

// ── Descriptor document (nested mirror of the aggregate) ──

#[derive(Serialize)]
struct DescriptorDocument {
    id: String,
    user_id: String,
    status: String,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
    network: DescriptorNetwork,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<DescriptorUnit>,
    security: DescriptorSecurity,
    #[serde(skip_serializing_if = "Option::is_none")]
    monitoring: Option<MonitoringConfig>,
    alert_rules: Vec<AlertRule>,
    steps: Vec<DescriptorStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation: Option<DescriptorGeneration>,
}

#[derive(Serialize)]
struct DescriptorNetwork {
    chain_id: u64,
    name: String,
}

#[derive(Serialize)]
struct DescriptorUnit {
    name: String,
    address: String,
    tx_id: String,
    toolchain_version: String,
    optimized: bool,
    optimizer_runs: u32,
    entry_points: Vec<DescriptorEntryPoint>,
}

#[derive(Serialize)]
struct DescriptorEntryPoint {
    name: String,
    mutates_state: bool,
}

#[derive(Serialize)]
struct DescriptorSecurity {
    tier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    risk_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    risk_score: Option<f64>,
    vulnerabilities: Vec<String>,
    mitigations: Vec<String>,
}

#[derive(Serialize)]
struct DescriptorStep {
    number: u32,
    title: String,
    status: String,
    requires_user_action: bool,
}

#[derive(Serialize)]
struct DescriptorGeneration {
    backend: String,
    confidence: f64,
    generated_at: DateTime<Utc>,
    security_features: Vec<String>,
}

fn project_name(deployment: &Deployment) -> String {
    deployment
        .compiled_unit
        .as_ref()
        .map(|u| u.name.clone())
        .or_else(|| deployment.artifact.as_ref().map(|a| a.name.clone()))
        .unwrap_or_else(|| "guard".to_owned())
}

fn settings_document(deployment: &Deployment) -> SettingsDocument {
    let monitoring = match &deployment.monitoring {
        Some(config) => MonitoringSection {
            enabled: config.enabled,
            poll_interval_secs: config.poll_interval_secs,
            resource_usage_ceiling: config.thresholds.resource_usage,
            transaction_volume_ceiling: config.thresholds.transaction_volume,
            error_rate_ceiling: config.thresholds.error_rate,
            suspicious_activity_ceiling: config.thresholds.suspicious_activity,
            log_retention_days: config.log_retention_days,
        },
        None => MonitoringSection {
            enabled: false,
            poll_interval_secs: 0,
            resource_usage_ceiling: 0,
            transaction_volume_ceiling: 0,
            error_rate_ceiling: 0.0,
            suspicious_activity_ceiling: None,
            log_retention_days: 0,
        },
    };

    SettingsDocument {
        project: ProjectSection {
            name: project_name(deployment),
            deployment_id: deployment.id.to_string(),
            user_id: deployment.user_id.to_string(),
            status: deployment.status.as_str().to_owned(),
            created_at: deployment.created_at,
        },
        network: NetworkSection {
            chain_id: deployment.request.network.chain_id(),
            name: deployment.request.network.name().to_owned(),
            address: deployment.address.clone(),
            tx_id: deployment.tx_id.clone(),
        },
        compilation: deployment.compiled_unit.as_ref().map(|u| CompilationSection {
            unit_name: u.name.clone(),
            toolchain_version: u.toolchain_version.clone(),
            optimized: u.optimized,
            optimizer_runs: u.optimizer_runs,
        }),
        monitoring,
        features: FeatureSection {
            monitoring_enabled: deployment
                .monitoring
                .as_ref()
                .is_some_and(|m| m.enabled),
            manual_build: deployment.compiled_unit.is_none(),
            access_restricted: deployment
                .alert_rules
                .iter()
                .any(|r| r.id == "unauthorized-access"),
            alert_rule_count: deployment.alert_rules.len(),
        },
        cost: CostSection {
            budget: deployment.request.budget,
            estimated: deployment.estimated_cost,
            actual: deployment.actual_cost,
        },
    }
}

fn descriptor_step(step: &PipelineStep) -> DescriptorStep {
    DescriptorStep {
        number: step.number,
        title: step.title.clone(),
        status: step.status.as_str().to_owned(),
        requires_user_action: step.requires_user_action,
    }
}

fn descriptor_document(deployment: &Deployment) -> DescriptorDocument {
    DescriptorDocument {
        id: deployment.id.to_string(),
        user_id: deployment.user_id.to_string(),
        status: deployment.status.as_str().to_owned(),
        created_at: deployment.created_at,
        completed_at: deployment.completed_at,
        network: DescriptorNetwork {
            chain_id: deployment.request.network.chain_id(),
            name: deployment.request.network.name().to_owned(),
        },
        unit: deployment.compiled_unit.as_ref().map(|u| DescriptorUnit {
            name: u.name.clone(),
            address: deployment.address.clone(),
            tx_id: deployment.tx_id.clone(),
            toolchain_version: u.toolchain_version.clone(),
            optimized: u.optimized,
            optimizer_runs: u.optimizer_runs,
            entry_points: u
                .interface
                .iter()
                .map(|f| DescriptorEntryPoint {
                    name: f.name.clone(),
                    mutates_state: f.mutates_state,
                })
                .collect(),
        }),
        security: DescriptorSecurity {
            tier: deployment.request.security.as_str().to_owned(),
            risk_level: deployment
                .risk
                .as_ref()
                .map(|r| r.overall_risk.as_str().to_owned()),
            risk_score: deployment.risk.as_ref().map(|r| r.score),
            vulnerabilities: deployment
                .risk
                .as_ref()
                .map(|r| r.vulnerabilities.clone())
                .unwrap_or_default(),
            mitigations: deployment
                .risk
                .as_ref()
                .map(|r| r.mitigations.clone())
                .unwrap_or_default(),
        },
        monitoring: deployment.monitoring.clone(),
        alert_rules: deployment.alert_rules.clone(),
        steps: deployment.steps.iter().map(descriptor_step).collect(),
        generation: deployment.artifact.as_ref().map(|a| DescriptorGeneration {
            backend: a.backend.clone(),
            confidence: a.confidence,
            generated_at: a.generated_at,
            security_features: a.security_features.clone(),
        }),
    }
}

/// Render both documents. Pure function of the aggregate.
pub fn render(deployment: &Deployment) -> PackagerResult<RenderedConfigs> {
    Ok(RenderedConfigs {
        settings: serde_json::to_string_pretty(&settings_document(deployment))?,
        descriptor: serde_json::to_string_pretty(&descriptor_document(deployment))?,
    })
}

/// Render and write both documents into a deployment-scoped directory under
/// `base_dir`. Returns the directory written to.
pub async fn write_to(deployment: &Deployment, base_dir: &Path) -> PackagerResult<PathBuf> {
    let rendered = render(deployment)?;
    let dir = base_dir.join(deployment.id.as_str());
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(SETTINGS_FILE), rendered.settings.as_bytes()).await?;
    tokio::fs::write(dir.join(DESCRIPTOR_FILE), rendered.descriptor.as_bytes()).await?;
    info!(deployment = %deployment.id, dir = %dir.display(), "configuration documents written");
    Ok(dir)
}
