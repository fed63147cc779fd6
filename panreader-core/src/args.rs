//! Assembly of the converter invocation for a single document.

use crate::config::Settings;
use crate::metadata::Metadata;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output format requested from the converter
pub const OUTPUT_FORMAT: &str = "html5";

/// Base input format, extended by `PANDOC_EXTENSIONS`
pub const INPUT_FORMAT: &str = "markdown";

/// Metadata field naming a document's bibliography file
pub const BIBLIOGRAPHY_KEY: &str = "bibliography";

/// Everything the converter needs for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRequest {
    pub to: String,
    pub format: String,
    pub extra_args: Vec<String>,
    pub filters: Vec<String>,
    /// Resolved bibliography file, when the document names one
    pub bibliography: Option<PathBuf>,
}

/// Input format string: `markdown` followed by the extension modifiers
pub fn input_format(settings: &Settings) -> String {
    format!("{}{}", INPUT_FORMAT, settings.extension_modifier())
}

/// Build the converter request for `path` from its metadata and the site
/// settings.
pub fn build_args(metadata: &Metadata, settings: &Settings, path: &Path) -> ConversionRequest {
    let mut extra_args = settings.extra_args.clone();

    let bibliography = metadata.get(BIBLIOGRAPHY_KEY).map(|name| {
        let bib_file = settings.bib_dir().join(name);
        extra_args.push(format!("--bibliography={}", bib_file.display()));

        if let Some(header) = &settings.bib_header {
            extra_args.push(format!("--metadata=reference-section-title=\"{}\"", header));
        }

        bib_file
    });

    debug!("Converter arguments for {:?}: {:?}", path, extra_args);

    ConversionRequest {
        to: OUTPUT_FORMAT.to_string(),
        format: input_format(settings),
        extra_args,
        filters: settings.filters.clone(),
        bibliography,
    }
}
