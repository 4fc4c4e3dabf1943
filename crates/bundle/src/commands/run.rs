//! Run command implementation

use anyhow::Result;
use bundle_core::{ParamOverrides, get_policy_bundle};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use super::input::{read_resource_list, write_resource_list};

/// Resolve a bundle and emit the resulting ResourceList
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Read the ResourceList from this file instead of stdin
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Write the ResourceList to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Override the `bundle` function config key
    #[arg(long)]
    bundle: Option<String>,

    /// Override the `sink_dir` function config key
    #[arg(long)]
    sink_dir: Option<PathBuf>,

    /// Replace existing files in the sink directory
    #[arg(long)]
    overwrite: bool,
}

/// Execute the run command
pub fn execute(args: RunArgs) -> Result<()> {
    let mut list = read_resource_list(args.input.as_deref())?;

    let overrides = ParamOverrides {
        bundle: args.bundle,
        sink_dir: args.sink_dir,
        overwrite: args.overwrite.then_some(true),
    };

    let report = get_policy_bundle(&mut list, &overrides)?;
    if let Some(materialized) = &report.materialized {
        info!("{} files written", materialized.written.len());
    }

    write_resource_list(&list, args.output.as_deref())
}
