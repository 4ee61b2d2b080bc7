//! Error types for the compose generation module

use thiserror::Error;

/// Result type alias for generation operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Compose generation errors
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Required prompt parameters are missing or empty
    #[error("the following parameters are missing or empty: {0}")]
    InvalidParameters(String),

    /// The backend was unreachable, errored, or returned an empty completion
    #[error("the model failed to respond: {0}")]
    ModelFailedToRespond(String),

    /// The generated text failed validation on both attempts
    #[error("response generation failed despite retry: {0}")]
    InvalidModelResponse(String),

    /// Generated text violated a structural rule.
    ///
    /// Internal to the generator: always caught by the orchestrator and
    /// converted into a retry or an [`InvalidModelResponse`](Self::InvalidModelResponse).
    #[error("the generated response failed validation: {0}")]
    Validation(String),

    /// External API call failed
    #[error("external api call failed: {0}")]
    ApiCall(String),

    /// YAML serialization error
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
}
