//! # palisade-monitor
//!
//! Pure derivation of monitoring policy, alert rules, and risk assessment
//! from a deployment request. Nothing here does I/O; the rendered policy is
//! attached to the deployment aggregate and consumed by the packager and by
//! the external monitoring runtime.

#![deny(unsafe_code)]

pub mod policy;
pub mod risk;

pub use policy::configure;
pub use risk::assess_risk;
