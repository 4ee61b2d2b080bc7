//! Compose file generation orchestrator

use crate::client::{LLMClient, LLMRequest};
use crate::config::LLMConfig;
use crate::error::{GeneratorError, Result};
use crate::generator::compose_config::parse_compose_config;
use crate::generator::env_store::EnvStore;
use crate::generator::params::{missing_params, render_template, ComposeParams, ComposeRequest};
use crate::generator::prompt_templates::{COMPOSE_SYSTEM_PROMPT, COMPOSE_TASK_TEMPLATE};
use crate::generator::GeneratorProfile;
use crate::models::GeneratedFile;
use crate::provider::build_client;
use std::sync::Arc;
use tracing::{debug, warn};

/// Upper bound on generation attempts: one try plus one retry
const MAX_ATTEMPTS: usize = 2;

/// Prompt capabilities of the compose generator
pub struct ComposeProfile;

impl GeneratorProfile for ComposeProfile {
    fn system_prompt(&self) -> &str {
        COMPOSE_SYSTEM_PROMPT
    }

    fn task_template(&self) -> &str {
        COMPOSE_TASK_TEMPLATE
    }

    fn required_params(&self) -> &'static [&'static str] {
        &["network_name", "network_exists", "services", "volume_mount"]
    }

    fn temperature(&self) -> f32 {
        0.0
    }
}

/// Configuration for compose generation
#[derive(Debug, Clone)]
pub struct ComposeGeneratorConfig {
    /// Model to use for generation
    pub model: String,
    /// Maximum tokens for the response
    pub max_tokens: Option<u32>,
    /// Skip the backend entirely and return the placeholder artifact
    pub dry_run: bool,
}

impl Default for ComposeGeneratorConfig {
    fn default() -> Self {
        Self {
            model: "llama3".to_string(),
            max_tokens: Some(4096),
            dry_run: false,
        }
    }
}

impl ComposeGeneratorConfig {
    /// Create a new configuration with a specific model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Compose file generator.
///
/// One generator holds the environment side table of one request; construct
/// a fresh generator per inbound request rather than sharing one.
pub struct ComposeGenerator {
    client: Arc<dyn LLMClient>,
    config: ComposeGeneratorConfig,
    profile: ComposeProfile,
    env_store: EnvStore,
}

impl ComposeGenerator {
    /// Create a new compose generator
    pub fn new(client: Arc<dyn LLMClient>, config: ComposeGeneratorConfig) -> Self {
        Self {
            client,
            config,
            profile: ComposeProfile,
            env_store: EnvStore::new(),
        }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<dyn LLMClient>) -> Self {
        Self::new(client, ComposeGeneratorConfig::default())
    }

    /// Create from a backend configuration, selecting the provider by name
    pub fn from_config(llm_config: &LLMConfig) -> Self {
        Self::new(
            build_client(llm_config),
            ComposeGeneratorConfig::new(llm_config.model.clone()),
        )
    }

    /// Get current configuration
    pub fn config(&self) -> &ComposeGeneratorConfig {
        &self.config
    }

    /// Generate a compose file and its environment files.
    ///
    /// Drives one validation-guarded generation attempt and, if the answer
    /// fails validation, exactly one retry with corrective feedback. The
    /// artifact list holds one environment file per extracted service
    /// followed by the compose file itself.
    ///
    /// # Errors
    /// * [`GeneratorError::InvalidParameters`] - required prompt parameters
    ///   missing or empty
    /// * [`GeneratorError::ModelFailedToRespond`] - backend unreachable,
    ///   erroring, or answering with empty text; never retried here
    /// * [`GeneratorError::InvalidModelResponse`] - the answer failed
    ///   validation on both attempts
    pub async fn run(&mut self, request: &ComposeRequest) -> Result<Vec<GeneratedFile>> {
        let mut params = ComposeParams::from_request(request);

        let missing = missing_params(&self.profile, &params);
        if !missing.is_empty() {
            return Err(GeneratorError::InvalidParameters(missing.join(", ")));
        }
        params.normalize()?;

        if self.config.dry_run {
            debug!("dry run, skipping backend invocation");
            return Ok(vec![GeneratedFile::no_response()]);
        }

        let mut attempt = 1;
        let document = loop {
            // re-normalization on the retry attempt is a no-op
            params.normalize()?;
            let text = self.invoke_chain(&params).await?;

            self.env_store.clear();
            match parse_compose_config(&text, &params, &mut self.env_store) {
                Ok(document) => break document,
                Err(GeneratorError::Validation(reason)) => {
                    if attempt >= MAX_ATTEMPTS {
                        return Err(GeneratorError::InvalidModelResponse(reason));
                    }
                    warn!(attempt, reason = %reason, "generated configuration failed validation, retrying");
                    params.mark_retry(reason);
                    attempt += 1;
                }
                Err(other) => return Err(other),
            }
        };

        let mut artifacts = Vec::with_capacity(self.env_store.len() + 1);
        for (service, vars) in self.env_store.iter() {
            artifacts.push(GeneratedFile::env_file(service, serde_yaml::to_string(vars)?));
        }
        artifacts.push(GeneratedFile::compose_file(serde_yaml::to_string(&document)?));

        Ok(artifacts)
    }

    /// Render the prompt for the bound parameters and call the backend once
    async fn invoke_chain(&self, params: &ComposeParams) -> Result<String> {
        let prompt = render_template(self.profile.task_template(), &params.bindings());

        let mut request = LLMRequest::new(prompt, self.config.model.clone())
            .with_temperature(self.profile.temperature())
            .with_system(self.profile.system_prompt().to_string());
        if let Some(max_tokens) = self.config.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        debug!(model = %self.config.model, backend = self.client.name(), "invoking generation backend");
        let response = self
            .client
            .call(request)
            .await
            .map_err(|err| GeneratorError::ModelFailedToRespond(err.to_string()))?;

        if response.content.trim().is_empty() {
            return Err(GeneratorError::ModelFailedToRespond(
                "the backend returned an empty completion".to_string(),
            ));
        }

        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResponseKind;
    use crate::provider::MockProvider;

    const VALID_COMPOSE: &str = "services:
  redis:
    image: redis:latest
    environment:
      VAR1: value1
networks:
  default: {}
";

    fn request() -> ComposeRequest {
        ComposeRequest {
            services: vec!["redis".to_string()],
            network_name: "default".to_string(),
            network_exists: false,
            volume_mount: false,
        }
    }

    #[test]
    fn test_profile_template_slots_match_required_params() {
        let profile = ComposeProfile;
        for name in profile.required_params() {
            assert!(
                profile.task_template().contains(&format!("{{{name}}}")),
                "template lacks slot for {name}"
            );
        }
        assert!(profile
            .task_template()
            .contains("{additional_instructions}"));
    }

    #[tokio::test]
    async fn test_dry_run_returns_placeholder_without_backend_call() {
        let provider = Arc::new(MockProvider::with_response(VALID_COMPOSE));
        let config = ComposeGeneratorConfig::default().with_dry_run(true);
        let mut generator = ComposeGenerator::new(provider.clone(), config);

        let artifacts = generator.run(&request()).await.unwrap();

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].kind, ResponseKind::NoResponse);
        assert_eq!(artifacts[0].data, "Lorem Ipsum");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_services_fails_before_backend_call() {
        let provider = Arc::new(MockProvider::with_response(VALID_COMPOSE));
        let mut generator = ComposeGenerator::with_defaults(provider.clone());

        let result = generator
            .run(&ComposeRequest {
                services: Vec::new(),
                network_name: "default".to_string(),
                network_exists: false,
                volume_mount: false,
            })
            .await;

        assert!(matches!(result, Err(GeneratorError::InvalidParameters(_))));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_end_to_end_generation() {
        let provider = Arc::new(MockProvider::with_response(VALID_COMPOSE));
        let mut generator = ComposeGenerator::with_defaults(provider.clone());

        let artifacts = generator.run(&request()).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(artifacts.len(), 2);

        assert_eq!(artifacts[0].kind, ResponseKind::EnvFile);
        assert_eq!(artifacts[0].name, ".env.redis");
        assert!(artifacts[0].data.contains("VAR1: value1"));

        assert_eq!(artifacts[1].kind, ResponseKind::ComposeFile);
        assert_eq!(artifacts[1].name, "compose.yml");
        assert!(artifacts[1].data.contains("env_file: .env.redis"));
        assert!(!artifacts[1].data.contains("environment"));
        assert!(artifacts[1].data.contains("networks"));
    }

    #[tokio::test]
    async fn test_invalid_response_retries_exactly_once() {
        // parses as a mapping but never satisfies the network rules
        let provider = Arc::new(MockProvider::with_response("invalid_yaml:"));
        let mut generator = ComposeGenerator::with_defaults(provider.clone());

        let result = generator.run(&request()).await;

        assert!(matches!(result, Err(GeneratorError::InvalidModelResponse(_))));
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_backend_failure_is_not_retried() {
        let provider = Arc::new(MockProvider::failing());
        let mut generator = ComposeGenerator::with_defaults(provider.clone());

        let result = generator.run(&request()).await;

        assert!(matches!(result, Err(GeneratorError::ModelFailedToRespond(_))));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_completion_is_not_retried() {
        let provider = Arc::new(MockProvider::with_response(""));
        let mut generator = ComposeGenerator::with_defaults(provider.clone());

        let result = generator.run(&request()).await;

        assert!(matches!(result, Err(GeneratorError::ModelFailedToRespond(_))));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_retry_reextracts_services_after_reset() {
        // first answer extracts redis, then trips over the empty volumes
        // section; the retry answer reuses the same service name and must
        // succeed because the store is reset between attempts
        let first = "services:
  redis:
    image: redis:latest
    environment:
      VAR1: value1
networks:
  default: {}
volumes: {}
";
        let provider = Arc::new(MockProvider::with_responses(vec![
            first.to_string(),
            VALID_COMPOSE.to_string(),
        ]));
        let mut generator = ComposeGenerator::with_defaults(provider.clone());

        let artifacts = generator.run(&request()).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].name, ".env.redis");
    }

    #[tokio::test]
    async fn test_from_config_selects_backend() {
        let generator = ComposeGenerator::from_config(&LLMConfig::new("mock", "test-model"));
        assert_eq!(generator.client.name(), "mock");
        assert_eq!(generator.config().model, "test-model");
    }
}
