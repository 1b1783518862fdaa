//! Generated and compiled artifact types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source produced by one generation backend.
///
/// Produced once per deployment; replaced only by a full retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    /// Contract source text.
    pub source: String,
    /// Declared contract name.
    pub name: String,
    /// Human-readable description of what the guard does.
    pub description: String,
    /// Safety idioms detected in the source.
    pub security_features: Vec<String>,
    /// Backend confidence in [0, 1].
    pub confidence: f64,
    /// Identifier of the backend that produced this artifact.
    pub backend: String,
    /// When the artifact was produced.
    pub generated_at: DateTime<Utc>,
}

impl GeneratedArtifact {
    /// Whether the artifact is structurally usable downstream.
    pub fn is_usable(&self) -> bool {
        !self.source.trim().is_empty() && !self.name.trim().is_empty()
    }
}

/// One typed parameter of a callable entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParameter {
    pub name: String,
    /// ABI type, e.g. `address` or `uint256`.
    pub param_type: String,
}

/// One callable entry point in a compiled unit's interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    pub inputs: Vec<FunctionParameter>,
    pub outputs: Vec<FunctionParameter>,
    /// Whether the entry point mutates chain state.
    pub mutates_state: bool,
}

/// Binary-plus-interface result of running source through the toolchain.
///
/// Derived from a [`GeneratedArtifact`]; immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledUnit {
    /// Unit (contract) name.
    pub name: String,
    /// Ordered callable entry points.
    pub interface: Vec<FunctionSignature>,
    /// Hex-encoded binary payload.
    pub bytecode: String,
    /// Toolchain version that produced the unit.
    pub toolchain_version: String,
    /// Whether the optimizer was enabled.
    pub optimized: bool,
    /// Optimizer iteration count.
    pub optimizer_runs: u32,
}

impl CompiledUnit {
    /// Look up an entry point by name.
    pub fn entry_point(&self, name: &str) -> Option<&FunctionSignature> {
        self.interface.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_usability() {
        let artifact = GeneratedArtifact {
            source: "contract G {}".to_owned(),
            name: "G".to_owned(),
            description: "guard".to_owned(),
            security_features: vec![],
            confidence: 0.85,
            backend: "test".to_owned(),
            generated_at: Utc::now(),
        };
        assert!(artifact.is_usable());

        let empty = GeneratedArtifact {
            source: "   ".to_owned(),
            ..artifact
        };
        assert!(!empty.is_usable());
    }

    #[test]
    fn compiled_unit_entry_point_lookup() {
        let unit = CompiledUnit {
            name: "FundCaptureGuard".to_owned(),
            interface: vec![FunctionSignature {
                name: "withdraw".to_owned(),
                inputs: vec![FunctionParameter {
                    name: "to".to_owned(),
                    param_type: "address".to_owned(),
                }],
                outputs: vec![],
                mutates_state: true,
            }],
            bytecode: "0x6080".to_owned(),
            toolchain_version: "0.8.24".to_owned(),
            optimized: true,
            optimizer_runs: 200,
        };

        assert!(unit.entry_point("withdraw").is_some());
        assert!(unit.entry_point("drain").is_none());
    }
}
