//! CLI command implementations.

pub mod args;
pub mod check;
pub mod config;
pub mod metadata;
pub mod read;

pub use args::show_args;
pub use check::check_documents;
pub use config::{list_extensions, show_setting};
pub use metadata::show_metadata;
pub use read::read_document;

use anyhow::{anyhow, Context, Result};
use panreader_core::{
    register, DocumentReader, PandocConverter, ReaderRegistry, ReadersInit, Settings, SiteHost,
};
use std::path::Path;
use std::sync::Arc;

/// Settings file picked up from the working directory when `--config` is absent
pub const DEFAULT_SETTINGS_FILE: &str = "panreader.yml";

/// Loaded settings plus the reader table built from them
pub struct Workspace {
    pub settings: Settings,
    pub converter: PandocConverter,
    pub registry: ReaderRegistry,
}

impl Workspace {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let settings = load_settings(config_path)?;

        let converter = match PandocConverter::locate(settings.pandoc_path().as_deref()) {
            Ok(converter) => converter,
            Err(err) => {
                // Only `read` runs the converter; it reports the launch failure.
                tracing::debug!("{}", err);
                PandocConverter::new("pandoc")
            }
        };

        let mut readers_init = ReadersInit::new();
        register(
            &mut readers_init,
            SiteHost::new(settings.clone()),
            converter.clone(),
        );

        let mut registry = ReaderRegistry::new();
        readers_init.send(&mut registry);

        Ok(Self {
            settings,
            converter,
            registry,
        })
    }

    /// Reader registered for the document's extension
    pub fn reader_for(&self, path: &Path) -> Result<&Arc<dyn DocumentReader>> {
        self.registry.reader_for(path).ok_or_else(|| {
            anyhow!(
                "No reader registered for {:?} (handled extensions: {})",
                path,
                self.registry.extensions().join(", ")
            )
        })
    }
}

fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    match config_path {
        Some(path) => {
            tracing::debug!("Loading settings from {:?}", path);
            Settings::from_file(path).context("Failed to load settings")
        }
        None => {
            let default = Path::new(DEFAULT_SETTINGS_FILE);
            if default.is_file() {
                tracing::debug!("Loading settings from {:?}", default);
                Settings::from_file(default).context("Failed to load settings")
            } else {
                Ok(Settings::default())
            }
        }
    }
}
