//! Mock LLM provider for testing

use crate::client::{LLMClient, LLMRequest, LLMResponse};
use crate::error::{GeneratorError, Result};
use crate::provider::LLMProvider;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock LLM provider for testing.
///
/// Responses are scripted per call; every invocation is counted so tests can
/// assert how many times the backend was actually contacted.
pub struct MockProvider {
    name: String,
    responses: Vec<String>,
    default_response: String,
    fail_calls: bool,
    calls: AtomicUsize,
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            responses: Vec::new(),
            default_response: "Mock LLM response".to_string(),
            fail_calls: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create with a fixed response returned on every call
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            ..Self::new()
        }
    }

    /// Create with one scripted response per call, in order.
    ///
    /// Calls past the end of the script repeat the last entry.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses,
            ..Self::new()
        }
    }

    /// Create a provider whose every call fails
    pub fn failing() -> Self {
        Self {
            fail_calls: true,
            ..Self::new()
        }
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for MockProvider {
    async fn call(&self, request: LLMRequest) -> Result<LLMResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_calls {
            return Err(GeneratorError::ApiCall(
                "mock backend configured to fail".to_string(),
            ));
        }

        let content = self
            .responses
            .get(call)
            .or_else(|| self.responses.last())
            .unwrap_or(&self.default_response)
            .clone();

        Ok(LLMResponse::new(content, request.model)
            .with_tokens(10)
            .with_finish_reason("stop".to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl LLMProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider() {
        let provider = MockProvider::new();
        let request = LLMRequest::new("Test".to_string(), "mock-model".to_string());

        let response = provider.call(request).await.unwrap();
        assert_eq!(response.content, "Mock LLM response");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_provider_scripted_responses() {
        let provider =
            MockProvider::with_responses(vec!["first".to_string(), "second".to_string()]);

        let one = provider
            .call(LLMRequest::new("p".to_string(), "m".to_string()))
            .await
            .unwrap();
        let two = provider
            .call(LLMRequest::new("p".to_string(), "m".to_string()))
            .await
            .unwrap();
        let three = provider
            .call(LLMRequest::new("p".to_string(), "m".to_string()))
            .await
            .unwrap();

        assert_eq!(one.content, "first");
        assert_eq!(two.content, "second");
        assert_eq!(three.content, "second");
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_provider_failing() {
        let provider = MockProvider::failing();
        let result = provider
            .call(LLMRequest::new("p".to_string(), "m".to_string()))
            .await;

        assert!(result.is_err());
        assert_eq!(provider.call_count(), 1);
    }
}
