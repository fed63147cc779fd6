//! Settings inspection commands.

use super::Workspace;
use anyhow::{bail, Result};

/// Print one setting by its option name
pub fn show_setting(workspace: &Workspace, key: &str) -> Result<()> {
    match workspace.settings.get(key) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => bail!("Setting '{}' is unknown or unset", key),
    }
}

/// Print the extensions routed to the reader, one per line
pub fn list_extensions(workspace: &Workspace) -> Result<()> {
    for ext in workspace.registry.extensions() {
        println!("{}", ext);
    }
    Ok(())
}
