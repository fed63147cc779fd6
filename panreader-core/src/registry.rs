//! Extension-to-reader table and the "readers initialized" signal.
//!
//! The host owns a [`ReaderRegistry`] and, once its built-in readers are in
//! place, sends [`ReadersInit`] so plugins can install their own.

use crate::converter::Converter;
use crate::host::ReaderHost;
use crate::reader::{DocumentReader, PandocReader};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Maps lowercase file extensions to the reader handling them
#[derive(Default)]
pub struct ReaderRegistry {
    readers: BTreeMap<String, Arc<dyn DocumentReader>>,
}

impl ReaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `reader` for every extension it declares.
    ///
    /// Later installs replace earlier ones. Disabled readers are ignored.
    pub fn install(&mut self, reader: Arc<dyn DocumentReader>) {
        if !reader.enabled() {
            debug!("Skipping disabled reader");
            return;
        }
        for ext in reader.file_extensions() {
            self.readers.insert(ext.to_lowercase(), Arc::clone(&reader));
        }
    }

    pub fn get(&self, extension: &str) -> Option<&Arc<dyn DocumentReader>> {
        self.readers.get(&extension.to_lowercase())
    }

    /// Reader for a path, chosen by its extension
    pub fn reader_for(&self, path: &Path) -> Option<&Arc<dyn DocumentReader>> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.get(ext))
    }

    /// Registered extensions, sorted
    pub fn extensions(&self) -> Vec<&str> {
        self.readers.keys().map(String::as_str).collect()
    }
}

type Handler = Box<dyn Fn(&mut ReaderRegistry) + Send + Sync>;

/// Signal sent once the host's reader table is ready
#[derive(Default)]
pub struct ReadersInit {
    handlers: Vec<Handler>,
}

impl ReadersInit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect<F>(&mut self, handler: F)
    where
        F: Fn(&mut ReaderRegistry) + Send + Sync + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Run every connected handler against `registry`, in connection order
    pub fn send(&self, registry: &mut ReaderRegistry) {
        for handler in &self.handlers {
            handler(registry);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Plugin entry point: install a [`PandocReader`] when readers initialize
pub fn register<H, C>(signal: &mut ReadersInit, host: H, converter: C)
where
    H: ReaderHost + 'static,
    C: Converter + 'static,
{
    let reader: Arc<dyn DocumentReader> = Arc::new(PandocReader::new(host, converter));
    signal.connect(move |registry| registry.install(Arc::clone(&reader)));
}
