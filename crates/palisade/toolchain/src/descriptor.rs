//! Unit descriptor parsing.
//!
//! The toolchain writes one JSON descriptor per compiled unit into the
//! output directory. A descriptor carries the unit name, its ABI, and the
//! hex-encoded bytecode; everything else on [`CompiledUnit`] comes from the
//! [`ToolchainConfig`](crate::ToolchainConfig).

use serde::Deserialize;

use palisade_types::{CompiledUnit, FunctionParameter, FunctionSignature};

use crate::config::ToolchainConfig;
use crate::error::{ToolchainError, ToolchainResult};

#[derive(Debug, Deserialize)]
struct RawDescriptor {
    name: String,
    #[serde(default)]
    abi: Vec<RawAbiEntry>,
    bytecode: String,
}

#[derive(Debug, Deserialize)]
struct RawAbiEntry {
    #[serde(rename = "type")]
    entry_type: String,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "stateMutability")]
    state_mutability: String,
    #[serde(default)]
    inputs: Vec<RawAbiParam>,
    #[serde(default)]
    outputs: Vec<RawAbiParam>,
}

#[derive(Debug, Deserialize)]
struct RawAbiParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    param_type: String,
}

fn convert_params(params: Vec<RawAbiParam>) -> Vec<FunctionParameter> {
    params
        .into_iter()
        .map(|p| FunctionParameter {
            name: p.name,
            param_type: p.param_type,
        })
        .collect()
}

/// Parse one descriptor file's contents into a [`CompiledUnit`].
///
/// Only `function` ABI entries become interface entry points; constructors,
/// events and errors are dropped. An entry point mutates state unless its
/// mutability is `view` or `pure`.
pub fn parse_descriptor(
    path: &str,
    contents: &str,
    config: &ToolchainConfig,
) -> ToolchainResult<CompiledUnit> {
    let raw: RawDescriptor =
        serde_json::from_str(contents).map_err(|e| ToolchainError::Descriptor {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;

    if raw.name.trim().is_empty() {
        return Err(ToolchainError::Descriptor {
            path: path.to_owned(),
            reason: "empty unit name".to_owned(),
        });
    }
    if raw.bytecode.trim().is_empty() {
        return Err(ToolchainError::Descriptor {
            path: path.to_owned(),
            reason: "empty bytecode".to_owned(),
        });
    }

    let interface = raw
        .abi
        .into_iter()
        .filter(|entry| entry.entry_type == "function")
        .map(|entry| FunctionSignature {
            mutates_state: !matches!(entry.state_mutability.as_str(), "view" | "pure"),
            name: entry.name,
            inputs: convert_params(entry.inputs),
            outputs: convert_params(entry.outputs),
        })
        .collect();

    Ok(CompiledUnit {
        name: raw.name,
        interface,
        bytecode: raw.bytecode,
        toolchain_version: config.toolchain_version.clone(),
        optimized: config.optimize,
        optimizer_runs: config.optimizer_runs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ToolchainConfig {
        ToolchainConfig::for_project("/tmp/project")
    }

    #[test]
    fn parses_full_descriptor() {
        let contents = r#"{
            "name": "FundCaptureGuard",
            "abi": [
                {
                    "type": "function",
                    "name": "release",
                    "stateMutability": "nonpayable",
                    "inputs": [{"name": "to", "type": "address"}],
                    "outputs": []
                },
                {
                    "type": "function",
                    "name": "captured",
                    "stateMutability": "view",
                    "inputs": [],
                    "outputs": [{"name": "", "type": "uint256"}]
                },
                {"type": "event", "name": "FundsCaptured"}
            ],
            "bytecode": "0x6080604052"
        }"#;

        let unit = parse_descriptor("FundCaptureGuard.json", contents, &config())
            .expect("descriptor should parse");

        assert_eq!(unit.name, "FundCaptureGuard");
        assert_eq!(unit.interface.len(), 2);
        assert!(unit.entry_point("release").unwrap().mutates_state);
        assert!(!unit.entry_point("captured").unwrap().mutates_state);
        assert_eq!(unit.toolchain_version, "0.8.24");
        assert!(unit.optimized);
    }

    #[test]
    fn rejects_empty_bytecode() {
        let contents = r#"{"name": "Guard", "abi": [], "bytecode": "  "}"#;
        let err = parse_descriptor("Guard.json", contents, &config()).unwrap_err();
        assert!(matches!(err, ToolchainError::Descriptor { .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_descriptor("Bad.json", "not json", &config()).unwrap_err();
        assert!(matches!(err, ToolchainError::Descriptor { .. }));
    }
}
