//! The caller-held configuration set a pipeline stage operates on

use crate::error::BundleError;
use crate::schema::{ConfigDocument, ResourceList};

/// Collection of configuration documents plus the parameters of the
/// current invocation
pub trait ConfigurationSet {
    /// Optional named parameter
    fn param(&self, key: &str) -> Option<String>;

    /// Required named parameter; absent or empty values are an error
    fn required_param(&self, key: &str) -> Result<String, BundleError> {
        match self.param(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(BundleError::MissingParameter {
                key: key.to_string(),
            }),
        }
    }

    /// All documents, in order
    fn documents(&self) -> &[ConfigDocument];

    /// Replace every document with `documents`, keeping their order
    ///
    /// Observers see either the old set or the new one, never a mix.
    fn replace_all(&mut self, documents: Vec<ConfigDocument>);
}

impl ConfigurationSet for ResourceList {
    fn param(&self, key: &str) -> Option<String> {
        self.function_config.as_ref()?.data_value(key)
    }

    fn documents(&self) -> &[ConfigDocument] {
        &self.items
    }

    fn replace_all(&mut self, documents: Vec<ConfigDocument>) {
        self.items = documents;
    }
}
