//! Error types for bundle resolution and materialization

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving or materializing a policy bundle
#[derive(Error, Debug)]
pub enum BundleError {
    /// A required function parameter was absent or empty
    #[error("missing required parameter: {key}")]
    MissingParameter { key: String },

    /// No bundle with the requested annotation name exists in the library
    #[error("bundle does not exist: {name}.")]
    BundleNotFound { name: String },

    /// Target file already exists and overwrite is disabled
    #[error("file already exists: {path} (set overwrite to 'true' to replace it)")]
    WriteConflict { path: PathBuf },

    /// Two documents in the same bundle map to one file
    #[error("multiple documents in bundle map to {path}")]
    DuplicateTarget { path: PathBuf },

    /// Document lacks the identity needed to name its file
    #[error("invalid document: {message}")]
    InvalidDocument { message: String },

    /// File I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse or render YAML
    #[error("YAML error: {source}")]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },
}

impl BundleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
