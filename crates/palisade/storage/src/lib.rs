//! # palisade-storage
//!
//! Persistence collaborator for deployment records.
//!
//! The orchestrator treats storage as an external key-value/row store with a
//! narrow CRUD contract: [`DeploymentStore`]. Persistence failures are
//! non-fatal to the pipeline; the orchestrator logs them and keeps driving
//! the in-memory aggregate, so progress queries may be stale until the store
//! recovers.
//!
//! [`MemoryStore`] is the deterministic, test-friendly reference
//! implementation. Production deployments plug in a transactional backend
//! behind the same trait.

#![deny(unsafe_code)]

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use traits::{DeploymentPatch, DeploymentStore};
