//! Backend configuration for the generation chain
//!
//! The surrounding service resolves these values once at process start and
//! passes them in explicitly; nothing in this crate reads the environment.

use serde::{Deserialize, Serialize};

/// LLM backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    /// Provider discriminator ("ollama", "openai", "mock", anything else
    /// falls back to a local ollama endpoint)
    pub provider: String,

    /// Model identifier passed to the backend
    pub model: String,

    /// Base URL for self-hosted backends
    pub base_url: Option<String>,

    /// API key for hosted backends
    pub api_key: Option<String>,
}

impl LLMConfig {
    /// Create a new configuration for a provider/model pair
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            base_url: None,
            api_key: None,
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = LLMConfig::new("ollama", "llama3")
            .with_base_url("http://llm.internal:11434")
            .with_api_key("secret");

        assert_eq!(config.provider, "ollama");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.base_url.as_deref(), Some("http://llm.internal:11434"));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }
}
