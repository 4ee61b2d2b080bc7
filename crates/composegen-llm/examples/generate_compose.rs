//! Example: Generate a compose file for a small redis + mariadb stack
//!
//! Run with:
//! ```bash
//! cargo run --example generate_compose
//! ```
//!
//! By default this talks to a local ollama server. Point `LLMConfig` at
//! "openai" with an API key to use a hosted backend instead.

use anyhow::Result;
use composegen_llm::{ComposeGenerator, ComposeRequest, LLMConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = LLMConfig::new("ollama", "llama3");
    let mut generator = ComposeGenerator::from_config(&config);

    let request = ComposeRequest {
        services: vec!["redis".to_string(), "mariadb:12".to_string()],
        network_name: "demo".to_string(),
        network_exists: false,
        volume_mount: true,
    };

    let artifacts = generator.run(&request).await?;

    for artifact in artifacts {
        println!("--- {} ---", artifact.name);
        println!("{}", artifact.data);
    }

    Ok(())
}
