//! List command implementation

use anyhow::Result;
use bundle_core::PolicyLibrary;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::input::read_resource_list;

/// List the bundles found in a ResourceList
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Read the ResourceList from this file instead of stdin
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct BundleSummary<'a> {
    name: &'a str,
    documents: usize,
}

/// Execute the list command
pub fn execute(args: ListArgs) -> Result<()> {
    let list = read_resource_list(args.input.as_deref())?;
    let library = PolicyLibrary::from_documents(&list.items);

    let summaries: Vec<BundleSummary<'_>> = library
        .bundles()
        .into_iter()
        .map(|bundle| BundleSummary {
            name: bundle.name(),
            documents: bundle.len(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else if library.is_empty() {
        println!("No bundles found");
    } else {
        for summary in &summaries {
            println!("{}\t{}", summary.name, summary.documents);
        }
    }

    Ok(())
}
