//! Provider and chain configuration.
//!
//! Configuration is constructed once at startup and passed by reference into
//! each backend adapter. Adapters never consult the environment or any other
//! ambient source at call time.

/// Immutable configuration for one remote generation provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API endpoint URL.
    pub endpoint: String,
    /// Model identifier sent to the provider.
    pub model: String,
    /// Credential; `None` marks the backend as unavailable (skipped, not failed).
    pub api_key: Option<String>,
}

impl ProviderConfig {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Whether a credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Chain-level settings shared by every backend link.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Bounded timeout applied to each remote backend call, in seconds.
    pub per_backend_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            per_backend_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_not_a_credential() {
        let config = ProviderConfig::new("https://api.example", "model-1");
        assert!(!config.has_credential());

        let config = config.with_api_key("");
        assert!(!config.has_credential());

        let config = config.with_api_key("sk-test");
        assert!(config.has_credential());
    }
}
