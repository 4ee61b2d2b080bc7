//! LLM provider implementations and backend selection

use crate::client::LLMClient;
use crate::config::LLMConfig;
use std::sync::Arc;
use tracing::warn;

/// LLM provider trait
pub trait LLMProvider: LLMClient {
    /// Get the provider name
    fn provider_name(&self) -> &str;
}

mod mock;
mod ollama;
mod openai;

pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;

/// Build a client for the configured backend.
///
/// The provider discriminator selects which connection parameters are used:
/// "ollama" takes a base URL, "openai" an API key (and optionally a base URL
/// for compatible gateways), "mock" takes neither. Unrecognized values fall
/// back to a local ollama endpoint.
pub fn build_client(config: &LLMConfig) -> Arc<dyn LLMClient> {
    match config.provider.as_str() {
        "ollama" => match &config.base_url {
            Some(base_url) => Arc::new(OllamaProvider::new(base_url.clone())),
            None => Arc::new(OllamaProvider::local()),
        },
        "openai" => {
            let api_key = config.api_key.clone().unwrap_or_default();
            match &config.base_url {
                Some(base_url) => Arc::new(OpenAIProvider::with_base_url(api_key, base_url.clone())),
                None => Arc::new(OpenAIProvider::new(api_key)),
            }
        }
        "mock" => Arc::new(MockProvider::new()),
        other => {
            warn!(provider = other, "unrecognized llm provider, falling back to a local ollama endpoint");
            Arc::new(OllamaProvider::local())
        }
    }
}
