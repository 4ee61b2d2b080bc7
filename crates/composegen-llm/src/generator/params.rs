//! Prompt parameter normalization
//!
//! Converts the structured request into the exact string fragments injected
//! into the prompt template. Raw and rendered values are separate enum
//! variants, so re-normalizing an already-normalized parameter set is a
//! no-op by construction - the retry path re-applies normalization safely.

use crate::error::{GeneratorError, Result};
use crate::generator::prompt_templates::RETRY_INSTRUCTIONS;
use crate::generator::GeneratorProfile;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder network name used when the request leaves it empty
pub const DEFAULT_NETWORK_NAME: &str = "demo_network";

/// Prompt phrasing for `network_exists`
pub const NETWORK_EXISTS_TRUE: &str = "already exists";
pub const NETWORK_EXISTS_FALSE: &str = "should be created";

/// Prompt phrasing for `volume_mount`
pub const VOLUME_MOUNT_TRUE: &str = "docker volumes";
pub const VOLUME_MOUNT_FALSE: &str = "project folder";

const MAX_SERVICE_LEN: usize = 64;
const MAX_NETWORK_NAME_LEN: usize = 32;

/// Structured generation request as received from the boundary layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeRequest {
    /// Services to deploy, each as `name` or `name:tag`
    pub services: Vec<String>,

    /// Name of the docker network referenced by every service
    pub network_name: String,

    /// Whether the network already exists (declared external) or is created
    pub network_exists: bool,

    /// Whether volumes bind to docker-managed volumes or the project folder
    pub volume_mount: bool,
}

/// The services parameter, either as requested or rendered for the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServicesValue {
    Requested(Vec<String>),
    Rendered(String),
}

/// A boolean parameter, either raw or rendered into its prompt phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Raw(bool),
    Rendered(String),
}

impl FlagValue {
    /// The prompt phrase for this flag, rendering raw values on the fly
    fn as_text(&self, on: &str, off: &str) -> String {
        match self {
            FlagValue::Raw(true) => on.to_string(),
            FlagValue::Raw(false) => off.to_string(),
            FlagValue::Rendered(text) => text.clone(),
        }
    }

    fn render(&mut self, on: &str, off: &str) {
        if let FlagValue::Raw(_) = self {
            *self = FlagValue::Rendered(self.as_text(on, off));
        }
    }
}

/// Mutable working state of one generation run, derived from the request
#[derive(Debug, Clone)]
pub struct ComposeParams {
    pub services: ServicesValue,
    pub network_name: String,
    pub network_exists: FlagValue,
    pub volume_mount: FlagValue,

    /// Validation error from a failed first attempt; set marks this a retry
    pub retry: Option<String>,
}

impl ComposeParams {
    /// Derive working parameters from an inbound request
    pub fn from_request(request: &ComposeRequest) -> Self {
        Self {
            services: ServicesValue::Requested(request.services.clone()),
            network_name: request.network_name.clone(),
            network_exists: FlagValue::Raw(request.network_exists),
            volume_mount: FlagValue::Raw(request.volume_mount),
            retry: None,
        }
    }

    /// Transform the parameter values into prompt-injectable strings.
    ///
    /// Idempotent: already-rendered values pass through unchanged.
    pub fn normalize(&mut self) -> Result<()> {
        match &self.services {
            ServicesValue::Requested(list) => {
                if list.is_empty() {
                    return Err(GeneratorError::InvalidParameters("services".to_string()));
                }
                self.services = ServicesValue::Rendered(render_services(list));
            }
            ServicesValue::Rendered(rendered) => {
                if rendered.is_empty() {
                    return Err(GeneratorError::InvalidParameters("services".to_string()));
                }
            }
        }

        let cleaned = sanitize_fragment(&self.network_name, MAX_NETWORK_NAME_LEN);
        self.network_name = if cleaned.is_empty() {
            DEFAULT_NETWORK_NAME.to_string()
        } else {
            cleaned
        };

        self.network_exists
            .render(NETWORK_EXISTS_TRUE, NETWORK_EXISTS_FALSE);
        self.volume_mount.render(VOLUME_MOUNT_TRUE, VOLUME_MOUNT_FALSE);

        Ok(())
    }

    /// Record a failed attempt; the next prompt carries corrective feedback
    pub fn mark_retry(&mut self, error: String) {
        self.retry = Some(error);
    }

    /// Whether the request asked for an existing (external) network
    pub fn wants_external_network(&self) -> bool {
        self.network_exists
            .as_text(NETWORK_EXISTS_TRUE, NETWORK_EXISTS_FALSE)
            == NETWORK_EXISTS_TRUE
    }

    /// The corrective instruction block, empty outside of retry attempts
    pub fn additional_instructions(&self) -> String {
        match &self.retry {
            Some(error) => RETRY_INSTRUCTIONS.replace("{error}", error),
            None => String::new(),
        }
    }

    /// Name/value pairs for every slot of the task template
    pub fn bindings(&self) -> Vec<(&'static str, String)> {
        let services = match &self.services {
            ServicesValue::Requested(list) => render_services(list),
            ServicesValue::Rendered(rendered) => rendered.clone(),
        };

        vec![
            ("network_name", self.network_name.clone()),
            (
                "network_exists",
                self.network_exists
                    .as_text(NETWORK_EXISTS_TRUE, NETWORK_EXISTS_FALSE),
            ),
            ("services", services),
            (
                "volume_mount",
                self.volume_mount.as_text(VOLUME_MOUNT_TRUE, VOLUME_MOUNT_FALSE),
            ),
            ("additional_instructions", self.additional_instructions()),
        ]
    }

    fn binds(&self, name: &str) -> bool {
        matches!(
            name,
            "network_name" | "network_exists" | "services" | "volume_mount" | "additional_instructions"
        )
    }
}

/// Required parameter names the working state cannot bind
pub fn missing_params(profile: &dyn GeneratorProfile, params: &ComposeParams) -> Vec<&'static str> {
    profile
        .required_params()
        .iter()
        .copied()
        .filter(|name| !params.binds(name))
        .collect()
}

/// Substitute every `{name}` slot of the template with its bound value
pub fn render_template(template: &str, bindings: &[(&'static str, String)]) -> String {
    bindings.iter().fold(template.to_string(), |prompt, (name, value)| {
        prompt.replace(&format!("{{{name}}}"), value)
    })
}

fn render_services(services: &[String]) -> String {
    services
        .iter()
        .map(|service| format!("[ {} ]", sanitize_fragment(service, MAX_SERVICE_LEN)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reduce a user-supplied fragment to the image-reference character set.
///
/// The boundary layer already validates these fields; stripping everything
/// outside the allowlist here keeps template braces, quotes, and newlines
/// from ever reaching the prompt.
fn sanitize_fragment(raw: &str, max_len: usize) -> String {
    let allowlist = Regex::new(r"[^A-Za-z0-9._:+/-]+").unwrap();
    let mut cleaned = allowlist.replace_all(raw, "").into_owned();
    cleaned.truncate(max_len);
    cleaned
}
