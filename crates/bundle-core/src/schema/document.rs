//! Opaque configuration document

use crate::error::BundleError;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// A single configuration document (e.g. a constraint or constraint template)
///
/// The underlying mapping keeps the key order it was parsed with, so
/// rendering the same document repeatedly produces identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument(Mapping);

impl ConfigDocument {
    /// Parse a single YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, BundleError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Render this document as YAML
    pub fn to_yaml_string(&self) -> Result<String, BundleError> {
        Ok(serde_yaml::to_string(&self.0)?)
    }

    /// `kind`, if present and a string
    pub fn kind(&self) -> Option<&str> {
        self.0.get("kind").and_then(Value::as_str)
    }

    /// `metadata.name`
    pub fn name(&self) -> Option<&str> {
        self.metadata_str("name")
    }

    /// Keys under `metadata.annotations`, in document order
    pub fn annotation_keys(&self) -> impl Iterator<Item = &str> {
        self.metadata()
            .and_then(|m| m.get("annotations"))
            .and_then(Value::as_mapping)
            .into_iter()
            .flat_map(|annotations| annotations.keys().filter_map(Value::as_str))
    }

    /// Look up `data.<key>` as used by ConfigMap-style function configs
    ///
    /// Scalars are rendered to their string form, so an unquoted `true`
    /// reads back as `"true"`.
    pub fn data_value(&self, key: &str) -> Option<String> {
        match self.0.get("data")?.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn metadata(&self) -> Option<&Mapping> {
        self.0.get("metadata").and_then(Value::as_mapping)
    }

    fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata()?.get(key).and_then(Value::as_str)
    }
}

impl From<Mapping> for ConfigDocument {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}
