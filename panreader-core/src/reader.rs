//! The pandoc-backed Markdown reader.

use crate::args::{build_args, ConversionRequest};
use crate::bibliography;
use crate::converter::{ConvertError, Converter};
use crate::frontmatter::{parse_frontmatter, FrontmatterError};
use crate::host::ReaderHost;
use crate::metadata::{flatten, Metadata};
use crate::sanitize::sanitize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Extensions handled by [`PandocReader`]
pub const FILE_EXTENSIONS: [&str; 4] = ["md", "markdown", "mkd", "mdown"];

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front matter in {}: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// A reader the host can dispatch source files to
pub trait DocumentReader: Send + Sync {
    /// Disabled readers are skipped at registration
    fn enabled(&self) -> bool {
        true
    }

    fn file_extensions(&self) -> &[&'static str];

    fn read_metadata(&self, path: &Path) -> Result<Metadata, ReadError>;

    /// Convert a document, returning its HTML and metadata
    fn read(&self, path: &Path) -> Result<(String, Metadata), ReadError>;
}

/// Reads Markdown documents by handing them to an external converter
pub struct PandocReader<H, C> {
    host: H,
    converter: C,
}

impl<H: ReaderHost, C: Converter> PandocReader<H, C> {
    pub fn new(host: H, converter: C) -> Self {
        Self { host, converter }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Converter request for a document whose metadata is already known
    pub fn conversion_request(&self, path: &Path, metadata: &Metadata) -> ConversionRequest {
        build_args(metadata, self.host.settings(), path)
    }
}

impl<H: ReaderHost, C: Converter> DocumentReader for PandocReader<H, C> {
    fn file_extensions(&self) -> &[&'static str] {
        &FILE_EXTENSIONS
    }

    fn read_metadata(&self, path: &Path) -> Result<Metadata, ReadError> {
        let content = fs::read_to_string(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (fields, _body) =
            parse_frontmatter(&content).map_err(|source| ReadError::Frontmatter {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(flatten(&fields, |key, value| {
            self.host.process_metadata(key, value)
        }))
    }

    fn read(&self, path: &Path) -> Result<(String, Metadata), ReadError> {
        info!("Reading {:?}", path);

        let metadata = self.read_metadata(path)?;
        let request = self.conversion_request(path, &metadata);
        bibliography::probe(&request, path, self.host.settings().bib_check);

        let output = self.converter.convert(path, &request)?;

        Ok((sanitize(&output), metadata))
    }
}
