//! # palisade-toolchain
//!
//! Drives the external compilation toolchain as a subprocess and turns its
//! output directory into [`CompiledUnit`](palisade_types::CompiledUnit)s.
//!
//! Compilation is whole-project, not incremental: `compile_one` runs the
//! full batch and filters by name. Individual descriptor parse failures are
//! skipped with a warning rather than aborting the batch. Selecting which
//! unit to deploy is an ordered keyword table into a fixed catalog with a
//! guaranteed default.

#![deny(unsafe_code)]

pub mod catalog;
pub mod compiler;
pub mod config;
pub mod descriptor;
pub mod error;

pub use catalog::{catalog_unit_for, select_unit, DEFAULT_UNIT};
pub use compiler::{CompileBatch, Toolchain};
pub use config::ToolchainConfig;
pub use descriptor::parse_descriptor;
pub use error::{ToolchainError, ToolchainResult};
