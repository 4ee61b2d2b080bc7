//! Artifact types returned to callers

use serde::{Deserialize, Serialize};

/// File name of the compose artifact
pub const COMPOSE_FILE_NAME: &str = "compose.yml";

/// Kind of generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    ComposeFile,
    EnvFile,
    NoResponse,
}

/// One named, serialized output file produced by a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub kind: ResponseKind,
    pub name: String,
    pub data: String,
}

impl GeneratedFile {
    /// The compose file artifact
    pub fn compose_file(data: String) -> Self {
        Self {
            kind: ResponseKind::ComposeFile,
            name: COMPOSE_FILE_NAME.to_string(),
            data,
        }
    }

    /// A per-service environment file artifact
    pub fn env_file(service: &str, data: String) -> Self {
        Self {
            kind: ResponseKind::EnvFile,
            name: format!(".env.{service}"),
            data,
        }
    }

    /// Placeholder artifact returned by dry runs
    pub fn no_response() -> Self {
        Self {
            kind: ResponseKind::NoResponse,
            name: "dummy".to_string(),
            data: "Lorem Ipsum".to_string(),
        }
    }
}
