//! # palisade-packager
//!
//! Renders the two declarative documents downstream tooling consumes for a
//! deployed guard: a flat settings document and a nested machine-readable
//! descriptor. Rendering is a pure function of the deployment aggregate and
//! must be byte-for-byte reproducible from the same state.

#![deny(unsafe_code)]

pub mod error;
pub mod render;

pub use error::{PackagerError, PackagerResult};
pub use render::{render, write_to, RenderedConfigs, DESCRIPTOR_FILE, SETTINGS_FILE};
