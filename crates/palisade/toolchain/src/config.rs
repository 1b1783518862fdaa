//! Toolchain configuration.

use std::path::PathBuf;

/// Configuration for one toolchain invocation target.
#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    /// Toolchain executable.
    pub command: String,
    /// Arguments passed to the executable.
    pub args: Vec<String>,
    /// Project directory the toolchain runs in.
    pub project_dir: PathBuf,
    /// Directory the toolchain writes unit descriptors into. Cleared before
    /// every run.
    pub output_dir: PathBuf,
    /// Bounded timeout for the whole compile, in seconds.
    pub timeout_secs: u64,
    /// Toolchain version recorded on every compiled unit.
    pub toolchain_version: String,
    /// Whether the optimizer is enabled.
    pub optimize: bool,
    /// Optimizer iteration count.
    pub optimizer_runs: u32,
}

impl ToolchainConfig {
    /// Defaults for a forge-style project rooted at `project_dir`.
    pub fn for_project(project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        let output_dir = project_dir.join("out");
        Self {
            command: "forge".to_owned(),
            args: vec!["build".to_owned()],
            project_dir,
            output_dir,
            timeout_secs: 120,
            toolchain_version: "0.8.24".to_owned(),
            optimize: true,
            optimizer_runs: 200,
        }
    }
}
