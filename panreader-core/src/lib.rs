//! # panreader-core
//!
//! A Markdown reader for static site generators that delegates conversion
//! to pandoc.
//!
//! Reading a document runs a short pipeline: front matter is flattened into
//! string metadata, the pandoc invocation is assembled from site settings
//! and that metadata (including bibliography wiring), pandoc runs, and its
//! output has the generator's link placeholders restored.

pub mod args;
pub mod bibliography;
pub mod config;
pub mod converter;
pub mod frontmatter;
pub mod host;
pub mod metadata;
pub mod models;
pub mod reader;
pub mod registry;
pub mod sanitize;

pub use args::{build_args, input_format, ConversionRequest, OUTPUT_FORMAT};
pub use bibliography::BibliographyStatus;
pub use config::{BibliographyCheck, Settings};
pub use converter::{ConvertError, Converter, PandocConverter};
pub use host::{ReaderHost, SiteHost};
pub use metadata::Metadata;
pub use models::{Diagnostic, DiagnosticSeverity};
pub use reader::{DocumentReader, PandocReader, ReadError, FILE_EXTENSIONS};
pub use registry::{register, ReaderRegistry, ReadersInit};
pub use sanitize::sanitize;
