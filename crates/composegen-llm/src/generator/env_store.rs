//! Per-service environment side table
//!
//! Inline `environment` blocks are pulled out of the generated compose
//! document and accumulated here, one entry per service, to be serialized
//! into separate `.env.<service>` files. A service may be extracted at most
//! once for the lifetime of the store.

use crate::error::{GeneratorError, Result};
use serde_yaml::{Mapping, Value};

/// Ordered service -> variables side table
#[derive(Debug, Default)]
pub struct EnvStore {
    entries: Vec<(String, Mapping)>,
}

impl EnvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all entries; called at the start of every parse attempt
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, service: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == service)
    }

    pub fn get(&self, service: &str) -> Option<&Mapping> {
        self.entries
            .iter()
            .find(|(name, _)| name == service)
            .map(|(_, vars)| vars)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Mapping)> {
        self.entries.iter().map(|(name, vars)| (name.as_str(), vars))
    }

    /// Extract the environment block of one service into the store.
    ///
    /// Accepts a mapping (merged as-is, order preserved) or a sequence of
    /// `KEY=VALUE` strings (split at the first `=`, the value may itself
    /// contain `=`).
    pub fn extract(&mut self, service: &str, environment: &Value) -> Result<()> {
        if service.is_empty() || is_empty_value(environment) || self.contains(service) {
            return Err(GeneratorError::Validation(
                "empty environment or duplicated service environment".to_string(),
            ));
        }

        let mut vars = Mapping::new();
        match environment {
            Value::Mapping(map) => {
                for (key, value) in map {
                    vars.insert(key.clone(), value.clone());
                }
            }
            Value::Sequence(items) => {
                for item in items {
                    let Some(text) = item.as_str() else {
                        return Err(GeneratorError::Validation(
                            "environment must be a mapping or a list of strings".to_string(),
                        ));
                    };
                    match text.split_once('=') {
                        Some((key, value)) => {
                            vars.insert(Value::from(key), Value::from(value));
                        }
                        None => {
                            return Err(GeneratorError::Validation(format!(
                                "invalid list environment element: {text}"
                            )))
                        }
                    }
                }
            }
            _ => {
                return Err(GeneratorError::Validation(
                    "environment must be a mapping or a list".to_string(),
                ))
            }
        }

        self.entries.push((service.to_string(), vars));
        Ok(())
    }
}

/// Whether a YAML value counts as an absent/empty block
pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(set) => !set,
        Value::String(text) => text.is_empty(),
        Value::Sequence(items) => items.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping_env() -> Value {
        serde_yaml::from_str("KEY: VALUE\nOTHER: '2'").unwrap()
    }

    #[test]
    fn test_extract_mapping() {
        let mut store = EnvStore::new();
        store.extract("service1", &mapping_env()).unwrap();

        let vars = store.get("service1").unwrap();
        assert_eq!(vars.get("KEY").and_then(Value::as_str), Some("VALUE"));
        assert_eq!(vars.get("OTHER").and_then(Value::as_str), Some("2"));
    }

    #[test]
    fn test_extract_list() {
        let mut store = EnvStore::new();
        let env: Value = serde_yaml::from_str("- FOO=bar\n- BAZ=qux").unwrap();
        store.extract("service2", &env).unwrap();

        let vars = store.get("service2").unwrap();
        assert_eq!(vars.get("FOO").and_then(Value::as_str), Some("bar"));
        assert_eq!(vars.get("BAZ").and_then(Value::as_str), Some("qux"));
    }

    #[test]
    fn test_extract_list_value_may_contain_equals() {
        let mut store = EnvStore::new();
        let env: Value = serde_yaml::from_str("- 'JAVA_OPTS=-Xmx=512m'").unwrap();
        store.extract("app", &env).unwrap();

        let vars = store.get("app").unwrap();
        assert_eq!(vars.get("JAVA_OPTS").and_then(Value::as_str), Some("-Xmx=512m"));
    }

    #[test]
    fn test_extract_list_element_without_equals_fails() {
        let mut store = EnvStore::new();
        let env: Value = serde_yaml::from_str("- FOOBAR").unwrap();

        let err = store.extract("service", &env).unwrap_err();
        assert!(err.to_string().contains("FOOBAR"));
        assert!(!store.contains("service"));
    }

    #[test]
    fn test_extract_missing_prerequisites() {
        let mut store = EnvStore::new();

        let empty_map: Value = Value::Mapping(Mapping::new());
        assert!(store.extract("test", &empty_map).is_err());

        let empty_list: Value = Value::Sequence(Vec::new());
        assert!(store.extract("test", &empty_list).is_err());

        let empty_string = Value::from("");
        assert!(store.extract("test", &empty_string).is_err());

        assert!(store.extract("", &mapping_env()).is_err());

        let scalar = Value::from("KEY=VALUE");
        assert!(store.extract("test", &scalar).is_err());
    }

    #[test]
    fn test_extract_same_service_twice_fails() {
        let mut store = EnvStore::new();
        store.extract("test", &mapping_env()).unwrap();

        let different: Value = serde_yaml::from_str("ANOTHER: value").unwrap();
        let err = store.extract("test", &different).unwrap_err();
        assert!(matches!(err, GeneratorError::Validation(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_allows_reextraction() {
        let mut store = EnvStore::new();
        store.extract("test", &mapping_env()).unwrap();
        store.clear();

        assert!(store.is_empty());
        store.extract("test", &mapping_env()).unwrap();
        assert!(store.contains("test"));
    }

    #[test]
    fn test_iter_preserves_insertion_order() {
        let mut store = EnvStore::new();
        store.extract("zeta", &mapping_env()).unwrap();
        store.extract("alpha", &mapping_env()).unwrap();

        let names: Vec<&str> = store.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }
}
