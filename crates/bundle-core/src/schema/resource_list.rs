//! ResourceList: the pipeline's function input/output envelope

use super::ConfigDocument;
use crate::error::BundleError;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

pub const RESOURCE_LIST_API_VERSION: &str = "config.kubernetes.io/v1";
pub const RESOURCE_LIST_KIND: &str = "ResourceList";

fn default_api_version() -> String {
    RESOURCE_LIST_API_VERSION.to_string()
}

fn default_kind() -> String {
    RESOURCE_LIST_KIND.to_string()
}

/// The set of documents flowing through one pipeline stage, together with
/// the function config that parameterizes the stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    /// Configuration documents, in pipeline order
    #[serde(default)]
    pub items: Vec<ConfigDocument>,

    /// ConfigMap carrying the function parameters under `data`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_config: Option<ConfigDocument>,

    /// Unknown fields (e.g. `results`) preserved for round trip
    #[serde(flatten)]
    pub unknown_fields: BTreeMap<String, Value>,
}

impl ResourceList {
    /// Build a ResourceList with no function config
    pub fn new(items: Vec<ConfigDocument>) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            items,
            function_config: None,
            unknown_fields: BTreeMap::new(),
        }
    }

    /// Attach a ConfigMap function config built from `data` pairs
    pub fn with_function_data<'a>(
        mut self,
        data: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut data_map = Mapping::new();
        for (key, value) in data {
            data_map.insert(Value::from(key), Value::from(value));
        }
        let mut metadata = Mapping::new();
        metadata.insert(Value::from("name"), Value::from("function-input"));

        let mut config_map = Mapping::new();
        config_map.insert(Value::from("apiVersion"), Value::from("v1"));
        config_map.insert(Value::from("kind"), Value::from("ConfigMap"));
        config_map.insert(Value::from("metadata"), Value::Mapping(metadata));
        config_map.insert(Value::from("data"), Value::Mapping(data_map));

        self.function_config = Some(ConfigDocument::from(config_map));
        self
    }

    /// Parse a ResourceList from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self, BundleError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Render this ResourceList as YAML
    pub fn to_yaml_string(&self) -> Result<String, BundleError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
