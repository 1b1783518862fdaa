//! Provider transport abstraction.
//!
//! Adapters talk to providers through [`GenerationTransport`], which sends a
//! JSON body and returns the raw response body. The HTTP implementation is
//! the production path; [`NoopTransport`] is the default for adapters wired
//! up without network access.

use async_trait::async_trait;

use crate::error::{GenerationError, GenerationResult};

/// Sends one completion request to a provider endpoint.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    /// POST `body` to `endpoint` authorized by `api_key`; return the raw
    /// response body on HTTP success.
    async fn complete(
        &self,
        endpoint: &str,
        api_key: &str,
        body: serde_json::Value,
    ) -> GenerationResult<String>;
}

/// Default no-op transport: always fails with a transport error.
#[derive(Debug, Default)]
pub struct NoopTransport;

#[async_trait]
impl GenerationTransport for NoopTransport {
    async fn complete(
        &self,
        _endpoint: &str,
        _api_key: &str,
        _body: serde_json::Value,
    ) -> GenerationResult<String> {
        Err(GenerationError::Transport(
            "no transport configured".to_owned(),
        ))
    }
}

/// HTTP transport over reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn complete(
        &self,
        endpoint: &str,
        api_key: &str,
        body: serde_json::Value,
    ) -> GenerationResult<String> {
        let response = self
            .client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(GenerationError::RateLimited);
        }
        if !status.is_success() {
            return Err(GenerationError::Transport(format!(
                "provider returned HTTP {status}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))
    }
}
