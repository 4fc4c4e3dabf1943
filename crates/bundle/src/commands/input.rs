//! ResourceList input and output

use anyhow::{Context, Result};
use bundle_core::ResourceList;
use std::io::{Read, Write};
use std::path::Path;

/// Read a ResourceList from `path`, or stdin when `None`
pub fn read_resource_list(path: Option<&Path>) -> Result<ResourceList> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    ResourceList::from_yaml_str(&content).context("input is not a valid ResourceList")
}

/// Write a ResourceList to `path`, or stdout when `None`
pub fn write_resource_list(list: &ResourceList, path: Option<&Path>) -> Result<()> {
    let rendered = list.to_yaml_string()?;
    match path {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
