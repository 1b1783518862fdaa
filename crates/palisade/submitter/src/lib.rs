//! # palisade-submitter
//!
//! Submits compiled units to the network and settles their actual cost from
//! the inclusion receipt. The network itself sits behind the
//! [`NetworkClient`] trait; [`SimulatedNetworkClient`] provides a
//! deterministic-shape implementation for development and tests.

#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod estimate;
pub mod submitter;

pub use client::{InclusionReceipt, NetworkClient, SimulatedNetworkClient, SubmissionPayload};
pub use error::{SubmitError, SubmitResult};
pub use estimate::estimate_cost;
pub use submitter::{SubmissionOutcome, Submitter, SubmitterConfig};
