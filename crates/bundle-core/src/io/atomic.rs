//! Temp-file-then-rename writes

use crate::error::BundleError;
use std::io::Write;
use std::path::Path;
use tempfile::Builder;

/// How `atomic_write` treats an existing target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Fail with `WriteConflict` if the target exists
    CreateNew,
    /// Replace the target if it exists
    Replace,
}

/// Write `contents` to `path` atomically
///
/// The data is written and synced to a temporary file next to `path`, then
/// persisted by rename. In `CreateNew` mode the rename is no-clobber, so a
/// file that exists (or appears concurrently) is left untouched and the call
/// fails with `BundleError::WriteConflict`. The temporary file is removed on
/// every failure path.
///
/// # Errors
///
/// Returns `BundleError::WriteConflict` on an existing target in
/// `CreateNew` mode, or `BundleError::Io` if staging or renaming fails.
pub fn atomic_write(path: &Path, contents: &[u8], mode: WriteMode) -> Result<(), BundleError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut staged = Builder::new()
        .prefix(".policy-bundle-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| BundleError::io(dir, e))?;
    staged
        .write_all(contents)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| BundleError::io(staged.path(), e))?;

    match mode {
        WriteMode::CreateNew => staged.persist_noclobber(path).map_err(|e| {
            if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                BundleError::WriteConflict {
                    path: path.to_path_buf(),
                }
            } else {
                BundleError::io(path, e.error)
            }
        })?,
        WriteMode::Replace => staged
            .persist(path)
            .map_err(|e| BundleError::io(path, e.error))?,
    };

    Ok(())
}
