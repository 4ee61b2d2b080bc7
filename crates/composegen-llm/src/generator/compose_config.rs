//! Compose document parsing and validation
//!
//! The generated text is parsed as a YAML mapping and checked against the
//! compose document rules in a fixed order; the first violated rule fails
//! with a [`GeneratorError::Validation`] carrying that rule's message, which
//! the orchestrator feeds back into the retry prompt.

use crate::error::{GeneratorError, Result};
use crate::generator::env_store::{is_empty_value, EnvStore};
use crate::generator::params::ComposeParams;
use crate::generator::yaml_extractor::extract_yaml;
use serde_yaml::{Mapping, Value};

fn validation(reason: impl Into<String>) -> GeneratorError {
    GeneratorError::Validation(reason.into())
}

/// Parse and validate generated compose content.
///
/// Checks, in order: the text parses as a non-empty mapping; a non-empty
/// `networks` section exists and contains the requested network (marked
/// `external: true` when the request says the network already exists); a
/// non-empty `services` section exists and every service declares an image;
/// inline `environment` blocks are moved into `env_store` and replaced by an
/// `env_file` reference; a `volumes` section, if declared, is non-empty and
/// entries without attributes are normalized to empty mappings.
///
/// Returns the mutated document.
pub fn parse_compose_config(
    content: &str,
    params: &ComposeParams,
    env_store: &mut EnvStore,
) -> Result<Mapping> {
    let payload = extract_yaml(content);

    let value: Value = serde_yaml::from_str(payload)
        .map_err(|err| validation(format!("could not load this yaml string: {err}")))?;

    let mut doc = match value {
        Value::Mapping(doc) if !doc.is_empty() => doc,
        _ => return Err(validation("empty yaml")),
    };

    {
        let networks = match doc.get("networks").and_then(Value::as_mapping) {
            Some(networks) if !networks.is_empty() => networks,
            _ => return Err(validation("missing network configuration")),
        };

        let network_entry = networks
            .get(params.network_name.as_str())
            .ok_or_else(|| validation("requested network name not present"))?;

        if params.wants_external_network() {
            let external = network_entry
                .as_mapping()
                .and_then(|attrs| attrs.get("external"))
                .and_then(Value::as_bool);
            if external != Some(true) {
                return Err(validation("requested network name not present"));
            }
        }
    }

    {
        let services = match doc.get_mut("services").and_then(Value::as_mapping_mut) {
            Some(services) if !services.is_empty() => services,
            _ => return Err(validation("missing services configuration")),
        };

        for (name, body) in services.iter_mut() {
            let service = name.as_str().unwrap_or_default().to_string();

            let body = body
                .as_mapping_mut()
                .ok_or_else(|| validation(format!("missing image for service {service}")))?;

            match body.get("image").and_then(Value::as_str) {
                Some(image) if !image.is_empty() => {}
                _ => return Err(validation(format!("missing image for service {service}"))),
            }

            if let Some(environment) = body.get("environment").cloned() {
                if !is_empty_value(&environment) {
                    env_store.extract(&service, &environment)?;
                    body.remove("environment");
                    body.insert(
                        Value::from("env_file"),
                        Value::from(format!(".env.{service}")),
                    );
                }
            }
        }
    }

    if doc.contains_key("volumes") {
        let volumes = match doc.get_mut("volumes").and_then(Value::as_mapping_mut) {
            Some(volumes) if !volumes.is_empty() => volumes,
            _ => return Err(validation("volumes declared but empty")),
        };

        for (_, attrs) in volumes.iter_mut() {
            if attrs.is_null() {
                *attrs = Value::Mapping(Mapping::new());
            }
        }
    }

    Ok(doc)
}
