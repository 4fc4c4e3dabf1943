//! Typed invocation parameters

use crate::config_set::ConfigurationSet;
use crate::error::BundleError;
use std::path::PathBuf;

/// Name of the policy bundle to resolve
pub const BUNDLE_KEY: &str = "bundle";
/// Directory to write the bundle's documents into
pub const SINK_DIR_KEY: &str = "sink_dir";
/// Whether existing files in the sink directory may be replaced
pub const OVERWRITE_KEY: &str = "overwrite";

/// Function usage text
pub const USAGE: &str = "\
Get policy bundle of constraints based on annotation.

Configured using a ConfigMap with the following keys:
bundle: Name of the policy bundle.
overwrite: [Optional] If 'true', overwrite existing YAML files. Otherwise, fail if any YAML files exist.
sink_dir: [Optional] Path to the config directory to write to; will create if it does not exist.
Example:
apiVersion: v1
kind: ConfigMap
data:
  bundle: 'bundles.validator.forsetisecurity.org/cis-v1.1'
  overwrite: 'true'
  sink_dir: /path/to/sink/dir
metadata:
  name: my-config
";

/// Parameters of one resolve invocation, parsed once at the boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleParams {
    /// Annotation name of the bundle
    pub bundle: String,
    /// Materialization target; `None` means no filesystem writes
    pub sink_dir: Option<PathBuf>,
    /// Replace existing files instead of failing
    pub overwrite: bool,
}

/// Command-line overrides for the function config
#[derive(Debug, Default, Clone)]
pub struct ParamOverrides {
    /// Override bundle name
    pub bundle: Option<String>,
    /// Override sink directory
    pub sink_dir: Option<PathBuf>,
    /// Force overwrite on
    pub overwrite: Option<bool>,
}

/// Resolve parameters from overrides and the configuration set
///
/// Only the literal string `"true"` enables overwrite; any other value,
/// including an absent one, disables it. An empty `sink_dir` counts as unset.
pub fn resolve_params<C: ConfigurationSet + ?Sized>(
    configs: &C,
    overrides: &ParamOverrides,
) -> Result<BundleParams, BundleError> {
    let bundle = match overrides.bundle.as_ref().filter(|b| !b.is_empty()) {
        Some(bundle) => bundle.clone(),
        None => configs.required_param(BUNDLE_KEY)?,
    };

    let sink_dir = overrides
        .sink_dir
        .clone()
        .filter(|dir| !dir.as_os_str().is_empty())
        .or_else(|| {
            configs
                .param(SINK_DIR_KEY)
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
        });

    let overwrite = overrides
        .overwrite
        .unwrap_or_else(|| configs.param(OVERWRITE_KEY).as_deref() == Some("true"));

    Ok(BundleParams {
        bundle,
        sink_dir,
        overwrite,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ResourceList;

    fn configs(data: &[(&'static str, &'static str)]) -> ResourceList {
        ResourceList::new(Vec::new()).with_function_data(data.iter().copied())
    }

    #[test]
    fn test_defaults() {
        let params = resolve_params(&configs(&[("bundle", "b")]), &ParamOverrides::default())
            .unwrap();
        assert_eq!(
            params,
            BundleParams {
                bundle: "b".to_string(),
                sink_dir: None,
                overwrite: false,
            }
        );
    }

    #[test]
    fn test_overwrite_requires_literal_true() {
        for (raw, expected) in [("true", true), ("True", false), ("yes", false), ("1", false)] {
            let params = resolve_params(
                &configs(&[("bundle", "b"), ("overwrite", raw)]),
                &ParamOverrides::default(),
            )
            .unwrap();
            assert_eq!(params.overwrite, expected, "overwrite={raw}");
        }
    }

    #[test]
    fn test_empty_sink_dir_is_unset() {
        let params = resolve_params(
            &configs(&[("bundle", "b"), ("sink_dir", "")]),
            &ParamOverrides::default(),
        )
        .unwrap();
        assert_eq!(params.sink_dir, None);
    }

    #[test]
    fn test_empty_sink_dir_override_is_unset() {
        let overrides = ParamOverrides {
            sink_dir: Some(PathBuf::new()),
            ..Default::default()
        };
        let params = resolve_params(&configs(&[("bundle", "b"), ("sink_dir", "/config")]), &overrides)
            .unwrap();
        assert_eq!(params.sink_dir, Some(PathBuf::from("/config")));

        let params = resolve_params(&configs(&[("bundle", "b")]), &overrides).unwrap();
        assert_eq!(params.sink_dir, None);
    }

    #[test]
    fn test_missing_bundle_fails() {
        let err = resolve_params(&configs(&[("sink_dir", "/out")]), &ParamOverrides::default())
            .unwrap_err();
        assert!(matches!(err, BundleError::MissingParameter { ref key } if key == BUNDLE_KEY));
    }

    #[test]
    fn test_overrides_take_priority() {
        let overrides = ParamOverrides {
            bundle: Some("from-flag".to_string()),
            sink_dir: Some(PathBuf::from("/flag")),
            overwrite: Some(true),
        };
        let params = resolve_params(
            &configs(&[("bundle", "from-config"), ("sink_dir", "/config")]),
            &overrides,
        )
        .unwrap();
        assert_eq!(params.bundle, "from-flag");
        assert_eq!(params.sink_dir, Some(PathBuf::from("/flag")));
        assert!(params.overwrite);
    }

    #[test]
    fn test_override_supplies_missing_bundle() {
        let overrides = ParamOverrides {
            bundle: Some("b".to_string()),
            ..Default::default()
        };
        let params = resolve_params(&ResourceList::new(Vec::new()), &overrides).unwrap();
        assert_eq!(params.bundle, "b");
    }
}
