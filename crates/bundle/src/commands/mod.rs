//! CLI command dispatch and execution

use anyhow::Result;
use clap::{Parser, Subcommand};

mod input;
mod list;
mod run;

/// get-policy-bundle - apply a policy bundle in a configuration pipeline
#[derive(Parser, Debug)]
#[command(
    name = "get-policy-bundle",
    version,
    about = "Replace a ResourceList with a policy bundle from its documents",
    long_about = bundle_core::config::USAGE
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a bundle and emit the resulting ResourceList
    Run(run::RunArgs),

    /// List the bundles found in a ResourceList
    List(list::ListArgs),

    /// Print the function usage text
    Usage,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Run(args) => run::execute(args),
            Commands::List(args) => list::execute(args),
            Commands::Usage => {
                print!("{}", bundle_core::config::USAGE);
                Ok(())
            }
        }
    }
}
