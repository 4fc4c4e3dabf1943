//! Policy library: every bundle in the document corpus, indexed by name

use crate::bundle::PolicyBundle;
use crate::schema::ConfigDocument;
use std::collections::HashMap;
use tracing::debug;

/// Annotation key prefix marking a document as a member of a bundle
///
/// The full annotation key (prefix included) is the bundle's name, e.g.
/// `bundles.validator.forsetisecurity.org/cis-v1.1`.
pub const BUNDLE_ANNOTATION_PREFIX: &str = "bundles.validator.forsetisecurity.org/";

/// Immutable, name-indexed collection of policy bundles
#[derive(Debug, Clone, Default)]
pub struct PolicyLibrary {
    bundles: HashMap<String, PolicyBundle>,
}

impl PolicyLibrary {
    /// Index `documents` into bundles
    ///
    /// A document joins one bundle per bundle annotation it carries. Bundle
    /// members keep the order they have in `documents`.
    pub fn from_documents(documents: &[ConfigDocument]) -> Self {
        let mut bundles: HashMap<String, PolicyBundle> = HashMap::new();
        for document in documents {
            for key in document
                .annotation_keys()
                .filter(|k| is_bundle_annotation(k))
            {
                bundles
                    .entry(key.to_string())
                    .or_insert_with(|| PolicyBundle::new(key))
                    .push(document.clone());
            }
        }
        debug!(
            "built policy library: {} bundles from {} documents",
            bundles.len(),
            documents.len()
        );
        Self { bundles }
    }

    /// Find a bundle by its exact annotation name
    pub fn lookup(&self, name: &str) -> Option<&PolicyBundle> {
        self.bundles.get(name)
    }

    /// Bundle names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bundles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Bundles sorted by name
    pub fn bundles(&self) -> Vec<&PolicyBundle> {
        let mut bundles: Vec<&PolicyBundle> = self.bundles.values().collect();
        bundles.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        bundles
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

fn is_bundle_annotation(key: &str) -> bool {
    key.len() > BUNDLE_ANNOTATION_PREFIX.len() && key.starts_with(BUNDLE_ANNOTATION_PREFIX)
}
