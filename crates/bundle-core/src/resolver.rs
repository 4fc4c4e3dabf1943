//! Bundle resolver: one resolve-and-apply cycle of the pipeline stage

use crate::bundle::MaterializeReport;
use crate::config::{ParamOverrides, resolve_params};
use crate::config_set::ConfigurationSet;
use crate::error::BundleError;
use crate::library::PolicyLibrary;
use tracing::{debug, info};

/// Summary of a successful resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveReport {
    /// Name of the resolved bundle
    pub bundle: String,
    /// Number of documents now in the configuration set
    pub documents: usize,
    /// Files written, if a sink directory was configured
    pub materialized: Option<MaterializeReport>,
}

/// Resolve the requested bundle and make it the whole configuration set
///
/// Steps, strictly in order:
/// 1. resolve parameters (`bundle` required, `sink_dir` and `overwrite` optional)
/// 2. build the policy library from every document in `configs`
/// 3. look the bundle up
/// 4. materialize it when a sink directory is set
/// 5. replace all documents in `configs` with the bundle's, in bundle order
///
/// Any failure before step 5 leaves `configs` untouched. Lookup misses and
/// parameter errors happen before any filesystem access.
///
/// # Errors
///
/// `MissingParameter`, `BundleNotFound`, or any error from
/// `PolicyBundle::materialize`, unmodified.
pub fn get_policy_bundle<C: ConfigurationSet + ?Sized>(
    configs: &mut C,
    overrides: &ParamOverrides,
) -> Result<ResolveReport, BundleError> {
    let params = resolve_params(&*configs, overrides)?;

    let library = PolicyLibrary::from_documents(configs.documents());
    let Some(bundle) = library.lookup(&params.bundle) else {
        debug!("available bundles: {:?}", library.names());
        return Err(BundleError::BundleNotFound {
            name: params.bundle,
        });
    };

    let materialized = match params.sink_dir.as_deref() {
        Some(sink_dir) => Some(bundle.materialize(sink_dir, params.overwrite)?),
        None => None,
    };

    let documents = bundle.documents().to_vec();
    let count = documents.len();
    configs.replace_all(documents);

    info!("applied bundle {} ({count} documents)", params.bundle);
    Ok(ResolveReport {
        bundle: params.bundle,
        documents: count,
        materialized,
    })
}
