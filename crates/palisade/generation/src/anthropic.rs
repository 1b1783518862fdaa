//! Anthropic-style provider adapter.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use palisade_types::{DeploymentRequest, GeneratedArtifact};

use crate::chain::GenerationBackend;
use crate::config::ProviderConfig;
use crate::error::{GenerationError, GenerationResult};
use crate::extract::{parse_artifact_payload, scan_security_features, REMOTE_CONFIDENCE};
use crate::transport::{GenerationTransport, NoopTransport};

pub const BACKEND_NAME: &str = "anthropic";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

const SYSTEM_PROMPT: &str = "You generate protective smart contracts. Respond with a single JSON \
object with fields \"name\", \"description\", and \"source\" and nothing else.";

/// Messages-API response shape, reduced to what the adapter reads.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Adapter for an Anthropic-style messages provider.
pub struct AnthropicBackend {
    config: ProviderConfig,
    transport: Arc<dyn GenerationTransport>,
}

impl std::fmt::Debug for AnthropicBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicBackend")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AnthropicBackend {
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_transport(config, Arc::new(NoopTransport))
    }

    pub fn with_transport(config: ProviderConfig, transport: Arc<dyn GenerationTransport>) -> Self {
        Self { config, transport }
    }

    /// Convenience constructor with the provider's defaults.
    pub fn default_config() -> ProviderConfig {
        ProviderConfig::new(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }

    fn user_prompt(request: &DeploymentRequest) -> String {
        let mut prompt = format!(
            "Write a protective on-chain contract.\nDescription: {}\nCategory: {}\nComplexity: {}\nSecurity tier: {}\n",
            request.description,
            request.category.as_str(),
            request.complexity.as_str(),
            request.security.as_str(),
        );
        for requirement in &request.custom_requirements {
            prompt.push_str("Requirement: ");
            prompt.push_str(requirement);
            prompt.push('\n');
        }
        prompt
    }
}

#[async_trait]
impl GenerationBackend for AnthropicBackend {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn available(&self) -> bool {
        self.config.has_credential()
    }

    async fn generate(&self, request: &DeploymentRequest) -> GenerationResult<GeneratedArtifact> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(GenerationError::Unavailable)?;

        let body = json!({
            "model": self.config.model,
            "max_tokens": 4096,
            "system": SYSTEM_PROMPT,
            "messages": [
                { "role": "user", "content": Self::user_prompt(request) },
            ],
        });

        let raw = self
            .transport
            .complete(&self.config.endpoint, api_key, body)
            .await?;

        let response: MessagesResponse = serde_json::from_str(&raw).map_err(|e| {
            GenerationError::Malformed(format!("messages response is not JSON: {e}"))
        })?;
        let content = response
            .content
            .first()
            .map(|b| b.text.as_str())
            .ok_or_else(|| GenerationError::Malformed("no content blocks in response".to_owned()))?;

        let payload = parse_artifact_payload(content)?;
        let security_features = scan_security_features(&payload.source);

        Ok(GeneratedArtifact {
            source: payload.source,
            name: payload.name,
            description: payload.description,
            security_features,
            confidence: REMOTE_CONFIDENCE,
            backend: BACKEND_NAME.to_owned(),
            generated_at: Utc::now(),
        })
    }
}
