//! Storage contract for deployment records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use palisade_types::{
    AlertRule, CompiledUnit, Deployment, DeploymentId, DeploymentStatus, GeneratedArtifact,
    MonitoringConfig, PipelineStep, RiskAssessment, UserId,
};

use crate::error::StorageResult;

/// Partial update applied to a stored deployment record.
///
/// Only set fields are written; everything else is left untouched. The
/// pipeline tracker is the only writer, so patches never race on a single
/// record.
#[derive(Debug, Clone, Default)]
pub struct DeploymentPatch {
    pub status: Option<DeploymentStatus>,
    pub steps: Option<Vec<PipelineStep>>,
    pub artifact: Option<GeneratedArtifact>,
    pub compiled_unit: Option<CompiledUnit>,
    pub address: Option<String>,
    pub tx_id: Option<String>,
    pub actual_cost: Option<f64>,
    pub completed_at: Option<DateTime<Utc>>,
    pub risk: Option<RiskAssessment>,
    pub monitoring: Option<MonitoringConfig>,
    pub alert_rules: Option<Vec<AlertRule>>,
}

impl DeploymentPatch {
    /// A patch carrying only the aggregate status and step list.
    pub fn steps_update(status: DeploymentStatus, steps: Vec<PipelineStep>) -> Self {
        Self {
            status: Some(status),
            steps: Some(steps),
            ..Self::default()
        }
    }

    /// Apply this patch to an in-memory deployment.
    pub fn apply_to(self, deployment: &mut Deployment) {
        if let Some(status) = self.status {
            deployment.status = status;
        }
        if let Some(steps) = self.steps {
            deployment.steps = steps;
        }
        if let Some(artifact) = self.artifact {
            deployment.artifact = Some(artifact);
        }
        if let Some(unit) = self.compiled_unit {
            deployment.compiled_unit = Some(unit);
        }
        if let Some(address) = self.address {
            deployment.address = address;
        }
        if let Some(tx_id) = self.tx_id {
            deployment.tx_id = tx_id;
        }
        if let Some(cost) = self.actual_cost {
            deployment.actual_cost = Some(cost);
        }
        if let Some(at) = self.completed_at {
            deployment.completed_at = Some(at);
        }
        if let Some(risk) = self.risk {
            deployment.risk = Some(risk);
        }
        if let Some(monitoring) = self.monitoring {
            deployment.monitoring = Some(monitoring);
        }
        if let Some(rules) = self.alert_rules {
            deployment.alert_rules = rules;
        }
    }
}

/// Narrow CRUD contract over the persisted deployment records.
#[async_trait]
pub trait DeploymentStore: Send + Sync {
    /// Insert a newly created deployment record.
    async fn create(&self, deployment: &Deployment) -> StorageResult<()>;

    /// Apply a partial update to an existing record.
    async fn update(&self, id: &DeploymentId, patch: DeploymentPatch) -> StorageResult<()>;

    /// Fetch one record by id.
    async fn get(&self, id: &DeploymentId) -> StorageResult<Option<Deployment>>;

    /// List records owned by a user, newest first.
    async fn list_by_user(&self, user_id: &UserId) -> StorageResult<Vec<Deployment>>;
}
