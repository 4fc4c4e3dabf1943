//! Document model for the configuration pipeline
//!
//! Configuration documents are kept as opaque YAML mappings; only the
//! identity fields needed for bundle indexing and file naming are read.

mod document;
mod resource_list;

pub use document::ConfigDocument;
pub use resource_list::{RESOURCE_LIST_API_VERSION, RESOURCE_LIST_KIND, ResourceList};
