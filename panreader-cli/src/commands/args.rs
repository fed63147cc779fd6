//! Args command implementation: a dry run of the converter invocation.

use super::Workspace;
use anyhow::{Context, Result};
use panreader_core::{build_args, converter::command_args, ConversionRequest, DocumentReader};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ArgsOutput<'a> {
    binary: &'a Path,
    args: Vec<String>,
    request: &'a ConversionRequest,
}

pub fn show_args(workspace: &Workspace, file: &Path, json: bool) -> Result<()> {
    let metadata = workspace
        .reader_for(file)?
        .read_metadata(file)
        .with_context(|| format!("Failed to read metadata from {:?}", file))?;

    let request = build_args(&metadata, &workspace.settings, file);
    let args = command_args(
        file,
        &request.to,
        &request.format,
        &request.extra_args,
        &request.filters,
    );

    if json {
        let payload = serde_json::to_string_pretty(&ArgsOutput {
            binary: workspace.converter.binary(),
            args,
            request: &request,
        })?;
        println!("{}", payload);
    } else {
        println!("{} {}", workspace.converter.binary().display(), args.join(" "));
    }

    Ok(())
}
