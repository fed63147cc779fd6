//! Metadata command implementation.

use super::Workspace;
use anyhow::{Context, Result};
use panreader_core::DocumentReader;
use std::path::Path;

/// Print a document's flattened metadata as JSON
pub fn show_metadata(workspace: &Workspace, file: &Path) -> Result<()> {
    let metadata = workspace
        .reader_for(file)?
        .read_metadata(file)
        .with_context(|| format!("Failed to read metadata from {:?}", file))?;

    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}
