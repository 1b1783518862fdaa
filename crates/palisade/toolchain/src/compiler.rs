//! The toolchain driver.

use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, warn};

use palisade_types::CompiledUnit;

use crate::config::ToolchainConfig;
use crate::descriptor::parse_descriptor;
use crate::error::{ToolchainError, ToolchainResult};

/// Result of one whole-project compile.
#[derive(Debug, Clone, Default)]
pub struct CompileBatch {
    /// Units parsed from the output directory, ordered by descriptor name.
    pub units: Vec<CompiledUnit>,
    /// Warning lines the toolchain emitted on stderr.
    pub warnings: Vec<String>,
}

/// Drives one external toolchain invocation target.
pub struct Toolchain {
    config: ToolchainConfig,
}

impl Toolchain {
    pub fn new(config: ToolchainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    /// Compile the whole project and collect every unit descriptor from the
    /// output directory.
    ///
    /// The output directory is cleared before the run so stale descriptors
    /// from a previous compile can never leak into the batch. Descriptors
    /// that fail to parse are skipped with a warning rather than failing
    /// the batch.
    pub async fn compile_all(&self) -> ToolchainResult<CompileBatch> {
        self.reset_output_dir().await?;

        info!(
            command = %self.config.command,
            project = %self.config.project_dir.display(),
            "running compilation toolchain"
        );

        let run = Command::new(&self.config.command)
            .args(&self.config.args)
            .current_dir(&self.config.project_dir)
            .output();

        let output = tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), run)
            .await
            .map_err(|_| ToolchainError::Timeout(self.config.timeout_secs))??;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let (errors, warnings) = classify_stderr(&stderr);

        if !errors.is_empty() {
            return Err(ToolchainError::CompilationFailed(errors.join("\n")));
        }
        if !output.status.success() && warnings.is_empty() {
            // Non-zero exit with nothing classifiable is still a failure.
            return Err(ToolchainError::CompilationFailed(
                stderr.trim().to_owned(),
            ));
        }

        let units = self.collect_units().await?;
        info!(
            units = units.len(),
            warnings = warnings.len(),
            "compilation finished"
        );

        Ok(CompileBatch { units, warnings })
    }

    /// Compile the whole project and return the named unit, if it compiled.
    pub async fn compile_one(&self, name: &str) -> ToolchainResult<Option<CompiledUnit>> {
        let batch = self.compile_all().await?;
        Ok(batch.units.into_iter().find(|u| u.name == name))
    }

    async fn reset_output_dir(&self) -> ToolchainResult<()> {
        match tokio::fs::remove_dir_all(&self.config.output_dir).await {
            Ok(()) => debug!(dir = %self.config.output_dir.display(), "cleared stale output"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        Ok(())
    }

    async fn collect_units(&self) -> ToolchainResult<Vec<CompiledUnit>> {
        let mut paths = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.config.output_dir).await?;
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        // Directory iteration order is unspecified; sort for determinism.
        paths.sort();

        let mut units = Vec::new();
        for path in paths {
            let display = path.display().to_string();
            let contents = tokio::fs::read_to_string(&path).await?;
            match parse_descriptor(&display, &contents, &self.config) {
                Ok(unit) => units.push(unit),
                Err(error) => {
                    warn!(%error, "skipping unparsable unit descriptor");
                }
            }
        }
        Ok(units)
    }
}

fn classify_stderr(stderr: &str) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for line in stderr.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        // Match the diagnostic marker, not the bare word; a warning about
        // an identifier like `error_count` must not fail the batch.
        let lowered = trimmed.to_lowercase();
        if lowered.contains("error:") {
            errors.push(trimmed.to_owned());
        } else if lowered.contains("warning:") {
            warnings.push(trimmed.to_owned());
        }
    }
    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_DESCRIPTOR: &str = r#"{"name":"BaseGuard","abi":[],"bytecode":"0x6080"}"#;
    const CAPTURE_DESCRIPTOR: &str =
        r#"{"name":"FundCaptureGuard","abi":[],"bytecode":"0x6090"}"#;

    /// Config whose "toolchain" is a shell script run in a temp project.
    fn script_config(dir: &tempfile::TempDir, script: String) -> ToolchainConfig {
        let mut config = ToolchainConfig::for_project(dir.path());
        config.command = "sh".to_owned();
        config.args = vec!["-c".to_owned(), script];
        config.timeout_secs = 10;
        config
    }

    fn write_descriptor(out: &std::path::Path, file: &str, contents: &str) -> String {
        format!("printf '%s' '{}' > '{}'", contents, out.join(file).display())
    }

    #[tokio::test]
    async fn compile_all_collects_descriptors() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let script = format!(
            "{} && {}",
            write_descriptor(&out, "BaseGuard.json", BASE_DESCRIPTOR),
            write_descriptor(&out, "FundCaptureGuard.json", CAPTURE_DESCRIPTOR),
        );

        let batch = Toolchain::new(script_config(&dir, script))
            .compile_all()
            .await
            .expect("compile should succeed");

        assert_eq!(batch.units.len(), 2);
        assert_eq!(batch.units[0].name, "BaseGuard");
        assert_eq!(batch.units[1].name, "FundCaptureGuard");
        assert!(batch.warnings.is_empty());
    }

    #[tokio::test]
    async fn warnings_attach_without_failing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let script = format!(
            "echo 'Warning: unused local variable' >&2 && {}",
            write_descriptor(&out, "BaseGuard.json", BASE_DESCRIPTOR),
        );

        let batch = Toolchain::new(script_config(&dir, script))
            .compile_all()
            .await
            .expect("warnings alone should not fail the batch");

        assert_eq!(batch.units.len(), 1);
        assert_eq!(batch.warnings.len(), 1);
        assert!(batch.warnings[0].contains("unused local variable"));
    }

    #[tokio::test]
    async fn warning_mentioning_an_error_identifier_does_not_fail() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let script = format!(
            "echo 'Warning: shadowed variable error_count' >&2 && {}",
            write_descriptor(&out, "BaseGuard.json", BASE_DESCRIPTOR),
        );

        let batch = Toolchain::new(script_config(&dir, script))
            .compile_all()
            .await
            .expect("a warning is not an error diagnostic");

        assert_eq!(batch.units.len(), 1);
        assert_eq!(batch.warnings.len(), 1);
    }

    #[tokio::test]
    async fn error_output_fails_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let script = "echo 'Error: expected semicolon' >&2; exit 1".to_owned();

        let err = Toolchain::new(script_config(&dir, script))
            .compile_all()
            .await
            .unwrap_err();

        match err {
            ToolchainError::CompilationFailed(msg) => {
                assert!(msg.contains("expected semicolon"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn nonzero_exit_without_diagnostics_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Toolchain::new(script_config(&dir, "exit 3".to_owned()))
            .compile_all()
            .await
            .unwrap_err();
        assert!(matches!(err, ToolchainError::CompilationFailed(_)));
    }

    #[tokio::test]
    async fn stale_descriptors_are_cleared_first() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("Stale.json"), BASE_DESCRIPTOR).unwrap();

        let batch = Toolchain::new(script_config(&dir, "true".to_owned()))
            .compile_all()
            .await
            .expect("empty compile should succeed");

        assert!(batch.units.is_empty());
    }

    #[tokio::test]
    async fn unparsable_descriptor_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let script = format!(
            "{} && {}",
            write_descriptor(&out, "BaseGuard.json", BASE_DESCRIPTOR),
            write_descriptor(&out, "Broken.json", "not json"),
        );

        let batch = Toolchain::new(script_config(&dir, script))
            .compile_all()
            .await
            .expect("one bad descriptor should not fail the batch");

        assert_eq!(batch.units.len(), 1);
        assert_eq!(batch.units[0].name, "BaseGuard");
    }

    #[tokio::test]
    async fn compile_one_filters_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let script = format!(
            "{} && {}",
            write_descriptor(&out, "BaseGuard.json", BASE_DESCRIPTOR),
            write_descriptor(&out, "FundCaptureGuard.json", CAPTURE_DESCRIPTOR),
        );
        let toolchain = Toolchain::new(script_config(&dir, script));

        let unit = toolchain.compile_one("FundCaptureGuard").await.unwrap();
        assert_eq!(unit.unwrap().name, "FundCaptureGuard");

        let missing = toolchain.compile_one("NoSuchGuard").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn slow_toolchain_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = script_config(&dir, "sleep 30".to_owned());
        config.timeout_secs = 1;

        let err = Toolchain::new(config).compile_all().await.unwrap_err();
        assert!(matches!(err, ToolchainError::Timeout(1)));
    }
}
