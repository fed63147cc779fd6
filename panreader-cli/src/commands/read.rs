//! Read command implementation.

use super::Workspace;
use anyhow::{Context, Result};
use panreader_core::{DocumentReader, Metadata};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ReadOutput<'a> {
    content: &'a str,
    metadata: &'a Metadata,
}

/// Run the full reader pipeline and print the result
pub fn read_document(workspace: &Workspace, file: &Path, json: bool) -> Result<()> {
    let reader = workspace.reader_for(file)?;
    let (content, metadata) = reader
        .read(file)
        .with_context(|| format!("Failed to read {:?}", file))?;

    if json {
        let payload = serde_json::to_string_pretty(&ReadOutput {
            content: &content,
            metadata: &metadata,
        })?;
        println!("{}", payload);
    } else {
        print!("{}", content);
    }

    Ok(())
}
