//! The deployment aggregate root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::artifact::{CompiledUnit, GeneratedArtifact};
use crate::ids::{DeploymentId, UserId};
use crate::monitoring::{AlertRule, MonitoringConfig, RiskAssessment};
use crate::request::DeploymentRequest;
use crate::step::{PipelineStep, StepStatus};

/// Fixed decimal precision for cost values.
pub const COST_DECIMALS: u32 = 8;

/// Round a cost to the fixed decimal precision.
pub fn round_cost(value: f64) -> f64 {
    let factor = 10f64.powi(COST_DECIMALS as i32);
    (value * factor).round() / factor
}

/// Overall status of a deployment, derived from its pipeline steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    /// Step 1 (analysis/generation) has not completed yet.
    Analyzing,
    /// Later steps are underway.
    Deploying,
    /// The final step completed.
    Deployed,
    /// At least one step failed; the pipeline halted.
    Failed,
}

impl DeploymentStatus {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Deployed | Self::Failed)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Analyzing => "analyzing",
            Self::Deploying => "deploying",
            Self::Deployed => "deployed",
            Self::Failed => "failed",
        }
    }
}

/// Aggregate root owning everything produced for one deployment.
///
/// Nothing outside the orchestrator mutates a [`PipelineStep`] directly; all
/// mutation goes through the tracker in `palisade-pipeline`, which is also
/// the only writer to the persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub id: DeploymentId,
    pub user_id: UserId,
    pub request: DeploymentRequest,
    pub status: DeploymentStatus,
    pub steps: Vec<PipelineStep>,
    /// Set when the generation step completes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<GeneratedArtifact>,
    /// Set when a real compiled unit is selected; absent on the manual-build path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiled_unit: Option<CompiledUnit>,
    /// On-chain address; empty until submitted.
    pub address: String,
    /// Submission transaction identifier; empty until submitted.
    pub tx_id: String,
    pub estimated_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<MonitoringConfig>,
    pub alert_rules: Vec<AlertRule>,
}

impl Deployment {
    /// Create a fresh deployment with the given step plan.
    pub fn new(user_id: UserId, request: DeploymentRequest, steps: Vec<PipelineStep>) -> Self {
        let estimated_cost = round_cost(steps.iter().map(|s| s.estimated_cost).sum());
        Self {
            id: DeploymentId::generate(),
            user_id,
            request,
            status: DeploymentStatus::Analyzing,
            steps,
            artifact: None,
            compiled_unit: None,
            address: String::new(),
            tx_id: String::new(),
            estimated_cost,
            actual_cost: None,
            created_at: Utc::now(),
            completed_at: None,
            risk: None,
            monitoring: None,
            alert_rules: Vec::new(),
        }
    }

    /// Look up a step by number.
    pub fn step(&self, number: u32) -> Option<&PipelineStep> {
        self.steps.iter().find(|s| s.number == number)
    }

    /// The first step that is not yet completed, if any.
    pub fn current_step(&self) -> Option<&PipelineStep> {
        self.steps.iter().find(|s| s.status != StepStatus::Completed)
    }

    /// Number of completed steps.
    pub fn completed_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == StepStatus::Completed)
            .count()
    }

    /// Recompute the aggregate status from the step list.
    ///
    /// `failed` iff any step failed; `deployed` iff the final step completed;
    /// `analyzing` until step 1 completes; `deploying` otherwise.
    pub fn derive_status(&self) -> DeploymentStatus {
        if self.steps.iter().any(|s| s.status == StepStatus::Failed) {
            return DeploymentStatus::Failed;
        }
        if self
            .steps
            .last()
            .is_some_and(|s| s.status == StepStatus::Completed)
        {
            return DeploymentStatus::Deployed;
        }
        match self.step(1) {
            Some(first) if first.status == StepStatus::Completed => DeploymentStatus::Deploying,
            _ => DeploymentStatus::Analyzing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkId;
    use crate::request::GuardCategory;
    use crate::tier::{ComplexityTier, MonitoringTier, SecurityTier};

    fn request() -> DeploymentRequest {
        DeploymentRequest {
            description: "watch value flows".to_owned(),
            complexity: ComplexityTier::Medium,
            security: SecurityTier::Basic,
            network: NetworkId::SUPPORTED,
            budget: 0.05,
            category: GuardCategory::FlowWatcher,
            monitoring: MonitoringTier::Basic,
            custom_requirements: vec![],
        }
    }

    fn steps(n: u32) -> Vec<PipelineStep> {
        (1..=n)
            .map(|i| {
                PipelineStep::new(i, format!("step {i}"), "test step").with_estimates(30, 0.001)
            })
            .collect()
    }

    #[test]
    fn estimated_cost_sums_step_estimates() {
        let deployment = Deployment::new(UserId::new("u1"), request(), steps(5));
        assert!((deployment.estimated_cost - 0.005).abs() < 1e-9);
    }

    #[test]
    fn status_starts_analyzing() {
        let deployment = Deployment::new(UserId::new("u1"), request(), steps(5));
        assert_eq!(deployment.derive_status(), DeploymentStatus::Analyzing);
    }

    #[test]
    fn status_failed_when_any_step_failed() {
        let mut deployment = Deployment::new(UserId::new("u1"), request(), steps(5));
        deployment.steps[0].status = StepStatus::Completed;
        deployment.steps[1].status = StepStatus::Failed;
        assert_eq!(deployment.derive_status(), DeploymentStatus::Failed);
    }

    #[test]
    fn status_deployed_iff_final_step_completed() {
        let mut deployment = Deployment::new(UserId::new("u1"), request(), steps(3));
        for step in &mut deployment.steps {
            step.status = StepStatus::Completed;
        }
        assert_eq!(deployment.derive_status(), DeploymentStatus::Deployed);

        deployment.steps[2].status = StepStatus::InProgress;
        assert_eq!(deployment.derive_status(), DeploymentStatus::Deploying);
    }

    #[test]
    fn current_step_is_first_non_completed() {
        let mut deployment = Deployment::new(UserId::new("u1"), request(), steps(3));
        deployment.steps[0].status = StepStatus::Completed;
        assert_eq!(deployment.current_step().map(|s| s.number), Some(2));
        assert_eq!(deployment.completed_steps(), 1);
    }

    #[test]
    fn round_cost_fixed_precision() {
        assert_eq!(round_cost(0.123456789123), 0.12345679);
        assert_eq!(round_cost(0.0), 0.0);
    }
}
