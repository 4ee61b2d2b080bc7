//! Compose file generation from structured requests
//!
//! This module drives the one-shot generate/validate/retry pipeline: a
//! structured request is normalized into prompt fragments, sent to the
//! configured backend, and the free-text answer is parsed and checked
//! against the compose document rules. A response that fails validation is
//! regenerated exactly once with corrective feedback appended to the prompt.
//!
//! # Example
//! ```no_run
//! use composegen_llm::{ComposeGenerator, ComposeRequest, MockProvider};
//! use std::sync::Arc;
//!
//! # async fn example() -> composegen_llm::Result<()> {
//! let provider = Arc::new(MockProvider::new());
//! let mut generator = ComposeGenerator::with_defaults(provider);
//!
//! let request = ComposeRequest {
//!     services: vec!["redis".to_string(), "mariadb:12".to_string()],
//!     network_name: "backend".to_string(),
//!     network_exists: false,
//!     volume_mount: true,
//! };
//! let artifacts = generator.run(&request).await?;
//!
//! for artifact in artifacts {
//!     println!("--- {}\n{}", artifact.name, artifact.data);
//! }
//! # Ok(())
//! # }
//! ```

pub mod compose_config;
pub mod compose_generator;
pub mod env_store;
pub mod params;
pub mod prompt_templates;
pub mod yaml_extractor;

// Re-export main types
pub use compose_generator::{ComposeGenerator, ComposeGeneratorConfig, ComposeProfile};
pub use env_store::EnvStore;
pub use params::{ComposeParams, ComposeRequest};
pub use yaml_extractor::extract_yaml;

/// Capabilities of one generator kind.
///
/// Each generator kind supplies its own fixed prompts, the parameter names
/// its task template interpolates, and the sampling temperature. The
/// orchestrator is written against this trait so new file kinds only add an
/// implementation, not a subclass hierarchy.
pub trait GeneratorProfile: Send + Sync {
    /// Role instructions sent as the system message
    fn system_prompt(&self) -> &str;

    /// Task template with named `{slot}` placeholders
    fn task_template(&self) -> &str;

    /// Parameter names the task template requires at generation time
    fn required_params(&self) -> &'static [&'static str];

    /// Sampling temperature for this generator kind
    fn temperature(&self) -> f32;
}
