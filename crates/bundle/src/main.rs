//! get-policy-bundle - apply a policy bundle in a configuration pipeline
//!
//! Reads a ResourceList, replaces its items with the requested policy
//! bundle, optionally writes the bundle to a sink directory, and emits the
//! resulting ResourceList.

use clap::Parser;

mod commands;

use commands::Cli;

fn main() {
    bundle_core::logging::init();
    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
