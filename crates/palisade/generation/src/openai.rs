//! OpenAI-style provider adapter.

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

pub const BACKEND_NAME: &str = "openai";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_PROMPT: &str = "You generate protective smart contracts. Respond with a single JSON \
object with fields \"name\", \"description\", and \"source\" and nothing else.";

/// Chat-completions response shape, reduced to what the adapter reads.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Adapter for an OpenAI-style chat-completions provider.
pub struct OpenAiBackend {
    config: ProviderConfig,
    transport: Arc<dyn GenerationTransport>,
}

impl std::fmt::Debug for OpenAiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiBackend")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OpenAiBackend {
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
        if !request.custom_requirements.is_empty() {
            prompt.push_str("Custom requirements:\n");
            for requirement in &request.custom_requirements {
                prompt.push_str("- ");
                prompt.push_str(requirement);
                prompt.push('\n');
            }
        }
        prompt
    }
}

#[async_trait]
impl GenerationBackend for OpenAiBackend {
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
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": Self::user_prompt(request) },
            ],
        });

        let raw = self
            .transport
            .complete(&self.config.endpoint, api_key, body)
            .await?;

        let response: ChatResponse = serde_json::from_str(&raw)
            .map_err(|e| GenerationError::Malformed(format!("chat response is not JSON: {e}")))?;
        let content = response
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| GenerationError::Malformed("no choices in response".to_owned()))?;

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

#[cfg(test)]
mod tests {
    use super::*;
    use palisade_types::{
        ComplexityTier, GuardCategory, MonitoringTier, NetworkId, SecurityTier,
    };

    struct StaticTransport(String);

    #[async_trait]
    impl GenerationTransport for StaticTransport {
        async fn complete(
            &self,
            _endpoint: &str,
            _api_key: &str,
            _body: serde_json::Value,
        ) -> GenerationResult<String> {
            Ok(self.0.clone())
        }
    }

    fn request() -> DeploymentRequest {
        DeploymentRequest {
            description: "capture funds from attackers".to_owned(),
            complexity: ComplexityTier::Medium,
            security: SecurityTier::Premium,
            network: NetworkId::SUPPORTED,
            budget: 0.02,
            category: GuardCategory::FundCapture,
            monitoring: MonitoringTier::Basic,
            custom_requirements: vec![],
        }
    }

    fn chat_reply(content: &str) -> String {
        serde_json::to_string(&json!({
            "choices": [ { "message": { "role": "assistant", "content": content } } ]
        }))
        .unwrap()
    }

    #[test]
    fn unavailable_without_credential() {
        let backend = OpenAiBackend::new(OpenAiBackend::default_config());
        assert!(!backend.available());
    }

    #[tokio::test]
    async fn generate_parses_valid_reply() {
        let content = r#"{"name":"FundCaptureGuard","description":"traps","source":"contract FundCaptureGuard { function f() external { require(true, \"x\"); } }"}"#;
        let backend = OpenAiBackend::with_transport(
            OpenAiBackend::default_config().with_api_key("sk-test"),
            Arc::new(StaticTransport(chat_reply(content))),
        );

        let artifact = backend.generate(&request()).await.unwrap();
        assert_eq!(artifact.name, "FundCaptureGuard");
        assert_eq!(artifact.backend, "openai");
        assert!((artifact.confidence - REMOTE_CONFIDENCE).abs() < 1e-9);
        assert!(artifact
            .security_features
            .contains(&"input-validation".to_owned()));
    }

    #[tokio::test]
    async fn generate_rejects_malformed_reply() {
        let backend = OpenAiBackend::with_transport(
            OpenAiBackend::default_config().with_api_key("sk-test"),
            Arc::new(StaticTransport("not json at all".to_owned())),
        );
        assert!(matches!(
            backend.generate(&request()).await,
            Err(GenerationError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn generate_without_credential_is_unavailable() {
        let backend = OpenAiBackend::new(OpenAiBackend::default_config());
        assert!(matches!(
            backend.generate(&request()).await,
            Err(GenerationError::Unavailable)
        ));
    }
}
