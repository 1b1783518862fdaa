//! Target ledger network identifier.
//!
//! The orchestrator targets exactly one network. Requests naming any other
//! chain id are rejected during normalization, before a deployment record is
//! created.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Chain identifier of a ledger network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(u64);

impl NetworkId {
    /// The single network this orchestrator currently supports.
    pub const SUPPORTED: Self = Self(17000);

    pub const fn new(chain_id: u64) -> Self {
        Self(chain_id)
    }

    pub const fn chain_id(&self) -> u64 {
        self.0
    }

    /// Whether this is the supported network.
    pub const fn is_supported(&self) -> bool {
        self.0 == Self::SUPPORTED.0
    }

    /// Human-readable network name.
    pub const fn name(&self) -> &'static str {
        match self.0 {
            17000 => "holesky",
            _ => "unknown",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}
