//! Step state tracking with write-through persistence.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use palisade_storage::{DeploymentPatch, DeploymentStore};
use palisade_types::{
    Deployment, DeploymentId, DeploymentStatus, StepStatus, UserActionKind,
};

use crate::error::{PipelineError, PipelineResult};

/// Fixed per-step average used for remaining-time estimates.
pub const AVG_STEP_SECS: u64 = 45;

/// What a step transition records.
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// No payload, e.g. entering `in_progress`.
    None,
    /// Structured output recorded on completion.
    Output(serde_json::Value),
    /// Error message recorded on failure.
    Error(String),
}

/// A pending step that blocks on a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingUserAction {
    pub step: u32,
    pub kind: UserActionKind,
}

/// Progress summary for one deployment, serialized for the outbound
/// progress query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub status: DeploymentStatus,
    pub completed_steps: usize,
    pub total_steps: usize,
    /// First non-completed step, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<u32>,
    /// Remaining-step-count times the fixed per-step average.
    #[serde(rename = "estimatedTimeRemaining")]
    pub estimated_remaining_secs: u64,
    /// The next pending step that blocks on a user action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_user_action: Option<PendingUserAction>,
}

/// Progress summary computed from the step list alone.
pub fn progress(deployment: &Deployment) -> Progress {
    let completed = deployment.completed_steps();
    let total = deployment.steps.len();
    let remaining = total.saturating_sub(completed) as u64;
    let next_user_action = deployment
        .steps
        .iter()
        .filter(|s| !s.status.is_terminal())
        .find(|s| s.requires_user_action)
        .and_then(|s| {
            s.action_kind.map(|kind| PendingUserAction {
                step: s.number,
                kind,
            })
        });

    Progress {
        status: deployment.status,
        completed_steps: completed,
        total_steps: total,
        current_step: deployment.current_step().map(|s| s.number),
        estimated_remaining_secs: remaining * AVG_STEP_SECS,
        next_user_action,
    }
}

/// The only writer to a deployment's step list and persisted record.
pub struct StepTracker {
    store: Arc<dyn DeploymentStore>,
}

impl StepTracker {
    pub fn new(store: Arc<dyn DeploymentStore>) -> Self {
        Self { store }
    }

    /// Transition one step, recompute the aggregate status, and write the
    /// record through to persistence.
    ///
    /// Transitions must respect step-status monotonicity; a violating call
    /// fails without touching the deployment. A storage write failure is
    /// logged and swallowed; the in-memory aggregate stays authoritative
    /// for the rest of the run.
    pub async fn advance(
        &self,
        deployment: &mut Deployment,
        step_number: u32,
        next: StepStatus,
        outcome: StepOutcome,
    ) -> PipelineResult<()> {
        let step = deployment
            .steps
            .iter_mut()
            .find(|s| s.number == step_number)
            .ok_or(PipelineError::UnknownStep(step_number))?;

        if !step.status.can_transition_to(next) {
            return Err(PipelineError::InvalidTransition {
                step: step_number,
                from: step.status,
                to: next,
            });
        }

        step.status = next;
        match outcome {
            StepOutcome::None => {}
            StepOutcome::Output(output) => step.output = Some(output),
            StepOutcome::Error(message) => step.error = Some(message),
        }

        deployment.status = deployment.derive_status();
        if deployment.status.is_terminal() && deployment.completed_at.is_none() {
            deployment.completed_at = Some(Utc::now());
        }
        debug!(
            deployment = %deployment.id,
            step = step_number,
            status = next.as_str(),
            aggregate = deployment.status.as_str(),
            "step advanced"
        );

        let mut patch = DeploymentPatch::steps_update(deployment.status, deployment.steps.clone());
        patch.completed_at = deployment.completed_at;
        self.persist(&deployment.id, patch).await;
        Ok(())
    }

    /// Best-effort write-through. Storage failures are non-fatal.
    pub async fn persist(&self, id: &DeploymentId, patch: DeploymentPatch) {
        if let Err(error) = self.store.update(id, patch).await {
            warn!(deployment = %id, %error, "failed to persist deployment update");
        }
    }
}
