//! Pipeline step tracking types.
//!
//! Step statuses are monotonic: `pending → in_progress → {completed|failed}`.
//! A terminal step never changes status again for that deployment. The
//! transition rules live here; enforcement is in `palisade-pipeline`.

use serde::{Deserialize, Serialize};

/// Status of a single pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl StepStatus {
    /// Whether this status can never change again.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether a transition to `next` is allowed by the monotonicity rules.
    pub const fn can_transition_to(&self, next: Self) -> bool {
        match (*self, next) {
            (Self::Pending, Self::InProgress) => true,
            // A step may fail before it was ever started, e.g. when the
            // pipeline aborts while creating the step's inputs.
            (Self::Pending, Self::Failed) => true,
            (Self::InProgress, Self::Completed) | (Self::InProgress, Self::Failed) => true,
            _ => false,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Kind of user action a step blocks on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserActionKind {
    Sign,
    Approve,
    Submit,
    Verify,
    Configure,
}

impl UserActionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sign => "sign",
            Self::Approve => "approve",
            Self::Submit => "submit",
            Self::Verify => "verify",
            Self::Configure => "configure",
        }
    }
}

/// One tracked stage of a deployment's lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStep {
    /// 1-based step number; strictly increasing, never reordered.
    pub number: u32,
    pub title: String,
    pub description: String,
    pub status: StepStatus,
    /// Whether this step blocks on a user action.
    pub requires_user_action: bool,
    /// The action kind, when one is required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_kind: Option<UserActionKind>,
    /// Estimated wall time for the step, in seconds.
    pub estimated_secs: u64,
    /// Estimated cost contribution of the step.
    pub estimated_cost: f64,
    /// Structured output recorded when the step completes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
    /// Error message recorded when the step fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PipelineStep {
    /// Create a pending step with no output or error.
    pub fn new(number: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            description: description.into(),
            status: StepStatus::Pending,
            requires_user_action: false,
            action_kind: None,
            estimated_secs: 0,
            estimated_cost: 0.0,
            output: None,
            error: None,
        }
    }

    /// Attach a required user action.
    pub fn with_user_action(mut self, kind: UserActionKind) -> Self {
        self.requires_user_action = true;
        self.action_kind = Some(kind);
        self
    }

    /// Attach time and cost estimates.
    pub fn with_estimates(mut self, secs: u64, cost: f64) -> Self {
        self.estimated_secs = secs;
        self.estimated_cost = cost;
        self
    }
}
