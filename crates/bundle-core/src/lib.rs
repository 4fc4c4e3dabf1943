//! Core types and operations for get-policy-bundle
//!
//! This crate resolves a named policy bundle from a library built out of the
//! pipeline's document corpus, optionally writes the bundle's documents to a
//! sink directory, and replaces the caller's configuration set with them.
//!
//! Document types are designed to:
//! - Treat each configuration document as an opaque, order-preserving mapping
//! - Render byte-identical YAML for the same document on every call
//! - Preserve unknown ResourceList fields across a read-modify-write cycle

pub mod bundle;
pub mod config;
pub mod config_set;
pub mod error;
pub mod io;
pub mod library;
pub mod logging;
pub mod resolver;
pub mod schema;

pub use bundle::{MaterializeReport, PolicyBundle};
pub use config::{BundleParams, ParamOverrides};
pub use config_set::ConfigurationSet;
pub use error::BundleError;
pub use library::{BUNDLE_ANNOTATION_PREFIX, PolicyLibrary};
pub use resolver::{ResolveReport, get_policy_bundle};
pub use schema::{ConfigDocument, ResourceList};
