//! The end-to-end deployment orchestrator.
//!
//! Each deployment runs as a single sequential chain of stages; stages
//! either fully complete or fully fail before control returns. The
//! persisted record is the source of truth: `run` always reloads it and
//! continues from the first non-completed step, so a halted pipeline can be
//! resumed or inspected later.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use palisade_generation::BackendChain;
use palisade_monitor::{assess_risk, configure};
use palisade_storage::{DeploymentPatch, DeploymentStore};
use palisade_submitter::Submitter;
use palisade_toolchain::{select_unit, Toolchain};
use palisade_types::{
    normalize, Deployment, DeploymentId, DeploymentStatus, RawDeploymentRequest, StepStatus,
    UserId,
};

use crate::error::{PipelineError, PipelineResult};
use crate::notify::{Notification, Notifier};
use crate::plan::build_plan;
use crate::tracker::{StepOutcome, StepTracker};

/// Drives deployments end to end.
pub struct Orchestrator {
    store: Arc<dyn DeploymentStore>,
    chain: BackendChain,
    /// Absent when no toolchain is installed; compilation downgrades to the
    /// manual-build path.
    toolchain: Option<Toolchain>,
    submitter: Submitter,
    notifier: Arc<dyn Notifier>,
    tracker: StepTracker,
    /// Base directory configuration documents are written under.
    output_dir: PathBuf,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn DeploymentStore>,
        chain: BackendChain,
        toolchain: Option<Toolchain>,
        submitter: Submitter,
        notifier: Arc<dyn Notifier>,
        output_dir: PathBuf,
    ) -> Self {
        let tracker = StepTracker::new(store.clone());
        Self {
            store,
            chain,
            toolchain,
            submitter,
            notifier,
            tracker,
            output_dir,
        }
    }

    /// Validate a raw request and create the deployment record.
    ///
    /// Validation failures surface synchronously; no record is created for
    /// a rejected request.
    pub async fn begin(
        &self,
        user_id: UserId,
        raw: &RawDeploymentRequest,
    ) -> PipelineResult<Deployment> {
        let request = normalize(raw)?;
        let plan = build_plan(&request);
        let deployment = Deployment::new(user_id, request, plan);
        self.store.create(&deployment).await?;
        info!(
            deployment = %deployment.id,
            category = deployment.request.category.as_str(),
            estimated_cost = deployment.estimated_cost,
            "deployment accepted"
        );
        Ok(deployment)
    }

    /// Run (or resume) a deployment until it reaches a terminal state.
    ///
    /// Loads the persisted record and executes from the first non-completed
    /// step. A failing stage halts the pipeline: later steps stay pending
    /// and the error is returned after the failure notification is emitted.
    pub async fn run(&self, id: &DeploymentId) -> PipelineResult<Deployment> {
        let mut deployment = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| PipelineError::NotFound(id.clone()))?;

        // Already-terminal records are returned as-is; the terminal
        // notification for them has already been emitted.
        if deployment.status.is_terminal() {
            return Ok(deployment);
        }

        while !deployment.status.is_terminal() {
            let Some(number) = deployment.current_step().map(|s| s.number) else {
                break;
            };
            if let Err(error) = self.run_step(&mut deployment, number).await {
                self.emit_terminal(&deployment, Some(&error)).await;
                return Err(error);
            }
        }

        if deployment.status == DeploymentStatus::Deployed {
            self.emit_terminal(&deployment, None).await;
        }
        Ok(deployment)
    }

    /// Execute exactly one step of a deployment and return the updated
    /// record. A no-op for terminal deployments.
    pub async fn run_next_step(&self, id: &DeploymentId) -> PipelineResult<Deployment> {
        let mut deployment = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| PipelineError::NotFound(id.clone()))?;

        if deployment.status.is_terminal() {
            return Ok(deployment);
        }
        let Some(number) = deployment.current_step().map(|s| s.number) else {
            return Ok(deployment);
        };

        match self.run_step(&mut deployment, number).await {
            Ok(()) => {
                if deployment.status == DeploymentStatus::Deployed {
                    self.emit_terminal(&deployment, None).await;
                }
                Ok(deployment)
            }
            Err(error) => {
                self.emit_terminal(&deployment, Some(&error)).await;
                Err(error)
            }
        }
    }

    async fn run_step(&self, deployment: &mut Deployment, number: u32) -> PipelineResult<()> {
        self.tracker
            .advance(deployment, number, StepStatus::InProgress, StepOutcome::None)
            .await?;

        let result = match number {
            1 => self.generate(deployment).await,
            2 => self.compile(deployment).await,
            3 => self.submit(deployment).await,
            4 => self.package(deployment).await,
            5 => self.enable_monitoring(deployment).await,
            other => Err(PipelineError::UnknownStep(other)),
        };

        match result {
            Ok(output) => {
                self.tracker
                    .advance(
                        deployment,
                        number,
                        StepStatus::Completed,
                        StepOutcome::Output(output),
                    )
                    .await
            }
            Err(error) => {
                self.tracker
                    .advance(
                        deployment,
                        number,
                        StepStatus::Failed,
                        StepOutcome::Error(error.to_string()),
                    )
                    .await?;
                Err(error)
            }
        }
    }

    // ── Stage 1: generation ──

    async fn generate(&self, deployment: &mut Deployment) -> PipelineResult<serde_json::Value> {
        let artifact = self.chain.generate(&deployment.request).await;
        let output = json!({
            "backend": artifact.backend,
            "name": artifact.name,
            "confidence": artifact.confidence,
        });
        deployment.artifact = Some(artifact.clone());
        self.tracker
            .persist(
                &deployment.id,
                DeploymentPatch {
                    artifact: Some(artifact),
                    ..DeploymentPatch::default()
                },
            )
            .await;
        Ok(output)
    }

    // ── Stage 2: compilation ──

    async fn compile(&self, deployment: &mut Deployment) -> PipelineResult<serde_json::Value> {
        let Some(toolchain) = &self.toolchain else {
            warn!(
                deployment = %deployment.id,
                "no toolchain configured, downgrading to manual build"
            );
            return Ok(json!({"manualBuild": true}));
        };

        let batch = toolchain.compile_all().await?;
        let Some(unit) = select_unit(&deployment.request.description, &batch.units) else {
            warn!(
                deployment = %deployment.id,
                "compile produced no units, downgrading to manual build"
            );
            return Ok(json!({"manualBuild": true}));
        };

        let unit = unit.clone();
        let output = json!({
            "unit": unit.name,
            "warnings": batch.warnings.len(),
        });
        deployment.compiled_unit = Some(unit.clone());
        self.tracker
            .persist(
                &deployment.id,
                DeploymentPatch {
                    compiled_unit: Some(unit),
                    ..DeploymentPatch::default()
                },
            )
            .await;
        Ok(output)
    }

    // ── Stage 3: submission ──

    async fn submit(&self, deployment: &mut Deployment) -> PipelineResult<serde_json::Value> {
        let Some(unit) = &deployment.compiled_unit else {
            info!(
                deployment = %deployment.id,
                "manual-build path, no automated submission"
            );
            return Ok(json!({"manualSubmission": true}));
        };

        let outcome = self.submitter.submit(unit, &[], &deployment.request).await?;
        deployment.address = outcome.address.clone();
        deployment.tx_id = outcome.tx_id.clone();
        deployment.actual_cost = Some(outcome.actual_cost);
        self.tracker
            .persist(
                &deployment.id,
                DeploymentPatch {
                    address: Some(outcome.address.clone()),
                    tx_id: Some(outcome.tx_id.clone()),
                    actual_cost: Some(outcome.actual_cost),
                    ..DeploymentPatch::default()
                },
            )
            .await;
        Ok(json!({
            "address": outcome.address,
            "txId": outcome.tx_id,
            "cost": outcome.actual_cost,
        }))
    }

    // ── Stage 4: configuration packaging ──

    async fn package(&self, deployment: &mut Deployment) -> PipelineResult<serde_json::Value> {
        let dir = palisade_packager::write_to(deployment, &self.output_dir).await?;
        Ok(json!({"dir": dir.display().to_string()}))
    }

    // ── Stage 5: monitoring policy ──

    async fn enable_monitoring(
        &self,
        deployment: &mut Deployment,
    ) -> PipelineResult<serde_json::Value> {
        let (config, rules) = configure(&deployment.request);
        let features = deployment
            .artifact
            .as_ref()
            .map(|a| a.security_features.clone())
            .unwrap_or_default();
        let risk = assess_risk(&deployment.request, &features);

        let output = json!({
            "alertRules": rules.len(),
            "pollIntervalSecs": config.poll_interval_secs,
            "risk": risk.overall_risk.as_str(),
        });
        deployment.monitoring = Some(config.clone());
        deployment.alert_rules = rules.clone();
        deployment.risk = Some(risk.clone());
        self.tracker
            .persist(
                &deployment.id,
                DeploymentPatch {
                    monitoring: Some(config),
                    alert_rules: Some(rules),
                    risk: Some(risk),
                    ..DeploymentPatch::default()
                },
            )
            .await;
        Ok(output)
    }

    /// Fire-and-forget terminal notification; delivery failure never
    /// affects the recorded outcome.
    async fn emit_terminal(&self, deployment: &Deployment, error: Option<&PipelineError>) {
        let notification = match error {
            None => Notification::deployed(deployment.id.clone(), &deployment.address),
            Some(error) => Notification::failed(deployment.id.clone(), &error.to_string()),
        };
        if let Err(delivery) = self
            .notifier
            .notify(&deployment.user_id, notification)
            .await
        {
            warn!(deployment = %deployment.id, %delivery, "failed to deliver notification");
        }
    }
}
