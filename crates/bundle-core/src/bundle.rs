//! Policy bundle: a named, ordered set of configuration documents

use crate::error::BundleError;
use crate::io::{WriteMode, atomic_write};
use crate::schema::ConfigDocument;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A named collection of policy documents
///
/// Documents are fixed once the owning library has been built; the bundle
/// exposes no way to mutate them.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyBundle {
    name: String,
    documents: Vec<ConfigDocument>,
}

/// Outcome of writing a bundle to a sink directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Files created or replaced, in bundle order
    pub written: Vec<PathBuf>,
}

impl PolicyBundle {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, document: ConfigDocument) {
        self.documents.push(document);
    }

    /// Annotation name identifying this bundle
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member documents in corpus order
    pub fn documents(&self) -> &[ConfigDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// File name a document is materialized under: `<kind>_<name>.yaml`,
    /// with the kind lowercased
    ///
    /// # Errors
    ///
    /// Returns `BundleError::InvalidDocument` when kind or name is missing,
    /// empty, or would leave the target directory.
    pub fn file_name(document: &ConfigDocument) -> Result<String, BundleError> {
        let kind = identity_part(document.kind(), "kind", document)?;
        let name = identity_part(document.name(), "metadata.name", document)?;
        Ok(format!("{}_{}.yaml", kind.to_lowercase(), name))
    }

    /// Target path for every document under `dir`, in bundle order
    ///
    /// # Errors
    ///
    /// Fails on an invalid document or when two documents share a file.
    pub fn target_paths(&self, dir: &Path) -> Result<Vec<PathBuf>, BundleError> {
        let mut seen = HashSet::new();
        let mut paths = Vec::with_capacity(self.documents.len());
        for document in &self.documents {
            let path = dir.join(Self::file_name(document)?);
            if !seen.insert(path.clone()) {
                return Err(BundleError::DuplicateTarget { path });
            }
            paths.push(path);
        }
        Ok(paths)
    }

    /// Write every document to its own YAML file under `dir`
    ///
    /// `dir` is created if needed. Without `overwrite`, all targets are
    /// checked before anything is written and the first existing one fails
    /// the call with `WriteConflict`. With `overwrite`, every target is
    /// replaced by a fresh regular file. Each file is written all-or-nothing.
    /// Files are not written transactionally as a group: if a later file
    /// fails with an I/O error, earlier ones remain on disk.
    ///
    /// # Errors
    ///
    /// Returns `WriteConflict`, `DuplicateTarget`, `InvalidDocument`, `Yaml`,
    /// or `Io`.
    pub fn materialize(&self, dir: &Path, overwrite: bool) -> Result<MaterializeReport, BundleError> {
        let paths = self.target_paths(dir)?;
        let rendered = self
            .documents
            .iter()
            .map(ConfigDocument::to_yaml_string)
            .collect::<Result<Vec<_>, _>>()?;

        if !overwrite
            && let Some(existing) = paths.iter().find(|p| fs::symlink_metadata(p).is_ok())
        {
            return Err(BundleError::WriteConflict {
                path: existing.clone(),
            });
        }

        fs::create_dir_all(dir).map_err(|e| BundleError::io(dir, e))?;

        let mode = if overwrite {
            WriteMode::Replace
        } else {
            WriteMode::CreateNew
        };

        let mut report = MaterializeReport::default();
        for (path, content) in paths.into_iter().zip(rendered) {
            atomic_write(&path, content.as_bytes(), mode)?;
            debug!("wrote {}", path.display());
            report.written.push(path);
        }

        info!(
            "materialized bundle {} into {}: {} files written",
            self.name,
            dir.display(),
            report.written.len()
        );
        Ok(report)
    }
}

fn identity_part<'a>(
    value: Option<&'a str>,
    field: &str,
    document: &ConfigDocument,
) -> Result<&'a str, BundleError> {
    match value {
        Some(v) if !v.is_empty() && v != "." && v != ".." && !v.contains(['/', '\\']) => Ok(v),
        Some(v) => Err(BundleError::InvalidDocument {
            message: format!("{field} {v:?} cannot be used in a file name"),
        }),
        None => Err(BundleError::InvalidDocument {
            message: format!(
                "{field} missing on document (kind={:?}, name={:?})",
                document.kind(),
                document.name()
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn doc(kind: &str, name: &str) -> ConfigDocument {
        ConfigDocument::from_yaml_str(&format!(
            "apiVersion: constraints.gatekeeper.sh/v1alpha1\nkind: {kind}\nmetadata:\n  name: {name}\nspec: {{}}\n"
        ))
        .unwrap()
    }

    fn bundle(docs: Vec<ConfigDocument>) -> PolicyBundle {
        let mut bundle = PolicyBundle::new("bundles.validator.forsetisecurity.org/cis-v1.1");
        for d in docs {
            bundle.push(d);
        }
        bundle
    }

    #[test]
    fn test_file_name_lowercases_kind() {
        let name = PolicyBundle::file_name(&doc("K8sAllowedRepos", "prod-repos")).unwrap();
        assert_eq!(name, "k8sallowedrepos_prod-repos.yaml");
    }

    #[test]
    fn test_file_name_rejects_missing_or_unsafe_identity() {
        let no_name = ConfigDocument::from_yaml_str("kind: K8sAllowedRepos\n").unwrap();
        assert!(matches!(
            PolicyBundle::file_name(&no_name),
            Err(BundleError::InvalidDocument { .. })
        ));
        assert!(PolicyBundle::file_name(&doc("Kind", "../escape")).is_err());
        assert!(PolicyBundle::file_name(&doc("Kind", "..")).is_err());
    }

    #[test]
    fn test_duplicate_targets_rejected_before_writing() {
        let temp_dir = TempDir::new().unwrap();
        let sink = temp_dir.path().join("out");
        let b = bundle(vec![doc("Kind", "same"), doc("KIND", "same")]);

        let err = b.materialize(&sink, true).unwrap_err();
        assert!(matches!(err, BundleError::DuplicateTarget { .. }));
        assert!(!sink.exists());
    }

    #[test]
    fn test_materialize_creates_directory_and_files() {
        let temp_dir = TempDir::new().unwrap();
        let sink = temp_dir.path().join("nested/out");
        let b = bundle(vec![doc("A", "one"), doc("B", "two")]);

        let report = b.materialize(&sink, false).unwrap();

        assert_eq!(report.written.len(), 2);
        let content = fs::read_to_string(sink.join("a_one.yaml")).unwrap();
        assert_eq!(content, b.documents()[0].to_yaml_string().unwrap());
        assert!(sink.join("b_two.yaml").is_file());
    }

    #[test]
    fn test_conflict_checked_before_any_write() {
        let temp_dir = TempDir::new().unwrap();
        let sink = temp_dir.path();
        fs::write(sink.join("b_two.yaml"), "original").unwrap();
        let b = bundle(vec![doc("A", "one"), doc("B", "two")]);

        let err = b.materialize(sink, false).unwrap_err();

        assert!(matches!(err, BundleError::WriteConflict { ref path } if path.ends_with("b_two.yaml")));
        assert_eq!(fs::read_to_string(sink.join("b_two.yaml")).unwrap(), "original");
        assert!(!sink.join("a_one.yaml").exists());
    }

    #[test]
    fn test_overwrite_replaces_and_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let sink = temp_dir.path();
        fs::write(sink.join("a_one.yaml"), "original").unwrap();
        let b = bundle(vec![doc("A", "one")]);

        let first = b.materialize(sink, true).unwrap();
        let after_first = fs::read(sink.join("a_one.yaml")).unwrap();
        let second = b.materialize(sink, true).unwrap();
        let after_second = fs::read(sink.join("a_one.yaml")).unwrap();

        assert_eq!(first.written.len(), 1);
        assert_eq!(second.written.len(), 1);
        assert_eq!(after_first, after_second);
        assert_eq!(
            after_first,
            b.documents()[0].to_yaml_string().unwrap().into_bytes()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_replaces_symlink_with_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let sink = temp_dir.path();
        let b = bundle(vec![doc("A", "one")]);
        let rendered = b.documents()[0].to_yaml_string().unwrap();
        let real = sink.join("real.yaml");
        fs::write(&real, &rendered).unwrap();
        std::os::unix::fs::symlink(&real, sink.join("a_one.yaml")).unwrap();

        b.materialize(sink, true).unwrap();

        let target = fs::symlink_metadata(sink.join("a_one.yaml")).unwrap();
        assert!(target.file_type().is_file());
        assert_eq!(fs::read_to_string(sink.join("a_one.yaml")).unwrap(), rendered);
        assert_eq!(fs::read_to_string(&real).unwrap(), rendered);
    }

    #[test]
    fn test_io_failure_keeps_earlier_files() {
        let temp_dir = TempDir::new().unwrap();
        let sink = temp_dir.path();
        let blocker = sink.join("b_two.yaml");
        fs::create_dir_all(blocker.join("occupied")).unwrap();
        let b = bundle(vec![doc("A", "one"), doc("B", "two")]);

        let err = b.materialize(sink, true).unwrap_err();

        assert!(matches!(err, BundleError::Io { ref path, .. } if path == &blocker));
        assert_eq!(
            fs::read_to_string(sink.join("a_one.yaml")).unwrap(),
            b.documents()[0].to_yaml_string().unwrap()
        );
        assert!(blocker.join("occupied").is_dir());
    }

    #[test]
    fn test_empty_bundle_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let sink = temp_dir.path().join("out");
        let report = bundle(Vec::new()).materialize(&sink, false).unwrap();
        assert!(report.written.is_empty());
        assert!(sink.is_dir());
    }
}
