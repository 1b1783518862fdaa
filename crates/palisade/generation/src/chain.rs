//! The backend chain: ordered adapters plus the deterministic fallback.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use palisade_types::{DeploymentRequest, GeneratedArtifact};

use crate::config::ChainConfig;
use crate::error::GenerationResult;
use crate::template::TemplateGenerator;

/// One content-generation backend.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Backend identifier for logging and provenance.
    fn name(&self) -> &'static str;

    /// Whether a credential is configured. Unavailable backends are skipped
    /// without counting as failures.
    fn available(&self) -> bool;

    /// Produce an artifact for the request.
    async fn generate(&self, request: &DeploymentRequest) -> GenerationResult<GeneratedArtifact>;
}

/// Ordered chain of remote backends with a deterministic local fallback.
///
/// `generate` never fails: the fallback template generator is always
/// reachable and always succeeds.
pub struct BackendChain {
    remotes: Vec<Box<dyn GenerationBackend>>,
    fallback: TemplateGenerator,
    config: ChainConfig,
}

impl BackendChain {
    pub fn new(config: ChainConfig) -> Self {
        Self {
            remotes: Vec::new(),
            fallback: TemplateGenerator::new(),
            config,
        }
    }

    /// Append a remote backend; priority is insertion order.
    pub fn with_backend(mut self, backend: Box<dyn GenerationBackend>) -> Self {
        self.remotes.push(backend);
        self
    }

    /// Number of remote links (the fallback is not counted).
    pub fn remote_count(&self) -> usize {
        self.remotes.len()
    }

    /// Try each backend in priority order; return the first structurally
    /// valid artifact. Falls back to the deterministic template generator,
    /// so this cannot fail end-to-end.
    pub async fn generate(&self, request: &DeploymentRequest) -> GeneratedArtifact {
        let timeout = Duration::from_secs(self.config.per_backend_timeout_secs);

        for backend in &self.remotes {
            if !backend.available() {
                debug!(backend = backend.name(), "skipping unavailable backend");
                continue;
            }

            match tokio::time::timeout(timeout, backend.generate(request)).await {
                Ok(Ok(artifact)) if artifact.is_usable() => {
                    info!(
                        backend = backend.name(),
                        artifact = %artifact.name,
                        "generation backend succeeded"
                    );
                    return artifact;
                }
                Ok(Ok(artifact)) => {
                    warn!(
                        backend = backend.name(),
                        artifact = %artifact.name,
                        "backend returned structurally unusable artifact, trying next"
                    );
                }
                Ok(Err(error)) => {
                    warn!(
                        backend = backend.name(),
                        %error,
                        "generation backend failed, trying next"
                    );
                }
                Err(_) => {
                    warn!(
                        backend = backend.name(),
                        timeout_secs = self.config.per_backend_timeout_secs,
                        "generation backend timed out, trying next"
                    );
                }
            }
        }

        info!("all remote backends exhausted, using deterministic template generator");
        self.fallback.generate_artifact(request)
    }
}
