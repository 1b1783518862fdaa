//! # palisade-pipeline
//!
//! The orchestration core: builds the step plan for a request, drives each
//! stage through the generation chain, toolchain, submitter, packager, and
//! monitoring configurator, and tracks step state with write-through
//! persistence. The persisted record is the source of truth; a pipeline can
//! be resumed from it at any point.

#![deny(unsafe_code)]

pub mod error;
pub mod notify;
pub mod orchestrator;
pub mod plan;
pub mod tracker;

pub use error::{PipelineError, PipelineResult};
pub use notify::{Notification, Notifier, NoopNotifier, NotifyError, RecordingNotifier};
pub use orchestrator::Orchestrator;
pub use plan::{build_plan, TOTAL_STEPS};
pub use tracker::{
    progress, PendingUserAction, Progress, StepOutcome, StepTracker, AVG_STEP_SECS,
};
