//! Prompt templates for compose generation

/// System message for the compose generator
pub const COMPOSE_SYSTEM_PROMPT: &str = "\
You are a senior DevOps engineer.
Always generate valid configuration files exactly in the requested format.
Do not include comments, explanations, or extra text.
Use the latest official image for the specified software and version.
For each configuration, create or use a dedicated Docker network as indicated.";

/// Task template for the compose generator.
///
/// The slot names must match the bindings produced by
/// [`ComposeParams::bindings`](super::params::ComposeParams::bindings).
pub const COMPOSE_TASK_TEMPLATE: &str = "\
Generate a valid Docker Compose YAML configuration without anything else like code blocks.
Always include a 'networks' section defining network '{network_name}'.
Each service must explicitly reference this network.
Use or create this network according to: {network_exists}.
Deploy the following services: {services} at the specified versions with
any additional dependent services required at latest major version known if not specified.
Declare all required volumes in the volumes section.
Map each declared volume to {volume_mount} using named volume references.
{additional_instructions}";

/// Corrective instruction appended to the task prompt on the retry attempt
pub const RETRY_INSTRUCTIONS: &str =
    "The previous configuration was invalid because {error}. Regenerate the entire YAML";
