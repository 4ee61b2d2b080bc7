//! LLM-backed Docker Compose generation
//!
//! This crate turns a structured deployment request (services, network,
//! volume flags) into a validated compose file plus per-service environment
//! files by prompting a language model, parsing its free-text answer, and
//! retrying exactly once with corrective feedback when validation fails.
//!
//! The web layer, authentication, and settings bootstrap live in the
//! surrounding service; this crate only needs an [`LLMConfig`] (or a ready
//! [`LLMClient`]) and a [`ComposeRequest`] per call.

// Re-export core types
pub use client::{LLMClient, LLMRequest, LLMResponse};
pub use config::LLMConfig;
pub use error::{GeneratorError, Result};
pub use models::{GeneratedFile, ResponseKind};

// Re-export providers
pub use provider::{build_client, LLMProvider, MockProvider, OllamaProvider, OpenAIProvider};

// Re-export the generator
pub use generator::{
    ComposeGenerator, ComposeGeneratorConfig, ComposeProfile, ComposeRequest, EnvStore,
    GeneratorProfile,
};

pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod provider;
