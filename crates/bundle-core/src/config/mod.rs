//! Parameter resolution
//!
//! Resolves the stage parameters from two sources with priority:
//! 1. Command-line flags (passed as `ParamOverrides`)
//! 2. Function config (`functionConfig.data`)

mod params;

pub use params::{
    BUNDLE_KEY, BundleParams, OVERWRITE_KEY, ParamOverrides, SINK_DIR_KEY, USAGE, resolve_params,
};
