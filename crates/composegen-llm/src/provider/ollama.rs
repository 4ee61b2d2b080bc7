//! Ollama provider implementation (self-hosted model server)

use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{GeneratorError, Result};
use crate::provider::LLMProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Default endpoint of a locally running ollama server
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Ollama provider (chat completions against a self-hosted server)
pub struct OllamaProvider {
    base_url: String,
    client: Client,
}

impl OllamaProvider {
    /// Create a new ollama provider against a custom base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// Create a provider against the default local endpoint
    pub fn local() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl LLMClient for OllamaProvider {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        // Build messages
        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(json!({
                "role": "system",
                "content": system
            }));
        }
        messages.push(json!({
            "role": "user",
            "content": request.prompt
        }));

        let mut options = json!({});
        if let Some(temperature) = request.temperature {
            options["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = request.max_tokens {
            options["num_predict"] = json!(max_tokens);
        }

        let body = json!({
            "model": request.model,
            "messages": messages,
            "stream": false,
            "options": options,
        });

        // Make API call
        let resp = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GeneratorError::ApiCall(format!("ollama api call failed: {e}")))?;

        let status = resp.status();
        let resp_text = resp
            .text()
            .await
            .map_err(|e| GeneratorError::ApiCall(format!("failed to read ollama response: {e}")))?;

        if !status.is_success() {
            return Err(GeneratorError::ApiCall(format!(
                "ollama api error ({status}): {resp_text}"
            )));
        }

        // Parse response
        let resp_json: serde_json::Value = serde_json::from_str(&resp_text)
            .map_err(|e| GeneratorError::ApiCall(format!("failed to parse ollama response: {e}")))?;

        let content = resp_json["message"]["content"]
            .as_str()
            .ok_or_else(|| GeneratorError::ApiCall("no content in ollama response".to_string()))?
            .to_string();

        let tokens_used = resp_json["eval_count"].as_u64().unwrap_or(0) as u32;
        let finish_reason = if resp_json["done"].as_bool().unwrap_or(true) {
            "stop"
        } else {
            "length"
        };

        Ok(LLMResponse::new(content, request.model)
            .with_tokens(tokens_used)
            .with_finish_reason(finish_reason.to_string()))
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

impl LLMProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "Ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::local();
        assert_eq!(provider.name(), "ollama");
        assert_eq!(provider.provider_name(), "Ollama");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_ollama_provider_custom_url() {
        let provider = OllamaProvider::new("http://llm.internal:11434");
        assert_eq!(provider.base_url, "http://llm.internal:11434");
    }
}
