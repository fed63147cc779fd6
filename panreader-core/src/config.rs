//! Reader settings and their loading from a YAML settings file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Extension modifiers appended to the `markdown` input format.
///
/// Accepts either a single string (`"+smart-raw_html"`) or a list of tokens
/// (`["+smart", "-raw_html"]`), which are concatenated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extensions {
    Joined(String),
    Tokens(Vec<String>),
}

impl Extensions {
    pub fn as_modifier(&self) -> String {
        match self {
            Extensions::Joined(s) => s.clone(),
            Extensions::Tokens(tokens) => tokens.concat(),
        }
    }
}

impl Default for Extensions {
    fn default() -> Self {
        Extensions::Joined(String::new())
    }
}

/// How much work the reader spends on bibliography files before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BibliographyCheck {
    /// No existence check and no log output.
    Off,
    /// Check whether the resolved file exists and log the outcome.
    #[default]
    Warn,
}

impl BibliographyCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            BibliographyCheck::Off => "off",
            BibliographyCheck::Warn => "warn",
        }
    }
}

/// Site-wide conversion settings, keyed by the host's option names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "PANDOC_BIBDIR", default)]
    pub bib_dir: PathBuf,

    #[serde(rename = "PANDOC_BIBHEADER", default)]
    pub bib_header: Option<String>,

    #[serde(rename = "PANDOC_ARGS", default)]
    pub extra_args: Vec<String>,

    #[serde(rename = "PANDOC_FILTERS", default)]
    pub filters: Vec<String>,

    #[serde(rename = "PANDOC_EXTENSIONS", default)]
    pub extensions: Extensions,

    #[serde(rename = "PANDOC_BIBCHECK", default)]
    pub bib_check: BibliographyCheck,

    /// Explicit path to the pandoc binary
    #[serde(rename = "PANDOC_PATH", default)]
    pub pandoc_path: Option<PathBuf>,

    // Internal: path to settings file (for relative path resolution)
    #[serde(skip)]
    settings_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut settings = Self::from_yaml_str(&contents)?;

        settings.settings_path = Some(path.to_path_buf());

        Ok(settings)
    }

    /// Parse settings from YAML text. An empty document yields the defaults.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Bibliography directory, resolved relative to the settings file
    pub fn bib_dir(&self) -> PathBuf {
        self.resolve_path(&self.bib_dir)
    }

    /// Input format modifier string (`PANDOC_EXTENSIONS` normalized)
    pub fn extension_modifier(&self) -> String {
        self.extensions.as_modifier()
    }

    /// Look up a setting by its option name (e.g. `PANDOC_BIBDIR`)
    ///
    /// Lists are rendered as space-separated values.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "PANDOC_BIBDIR" => Some(self.bib_dir().to_string_lossy().to_string()),
            "PANDOC_BIBHEADER" => self.bib_header.clone(),
            "PANDOC_ARGS" => Some(self.extra_args.join(" ")),
            "PANDOC_FILTERS" => Some(self.filters.join(" ")),
            "PANDOC_EXTENSIONS" => Some(self.extension_modifier()),
            "PANDOC_BIBCHECK" => Some(self.bib_check.as_str().to_string()),
            "PANDOC_PATH" => self
                .pandoc_path
                .as_ref()
                .map(|p| self.resolve_path(p).to_string_lossy().to_string()),
            _ => None,
        }
    }

    /// Resolve a path relative to the settings file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || path.as_os_str().is_empty() {
            return path.to_path_buf();
        }
        match self.settings_path.as_deref().and_then(Path::parent) {
            Some(parent) => parent.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Resolved pandoc binary override, if any
    pub fn pandoc_path(&self) -> Option<PathBuf> {
        self.pandoc_path.as_ref().map(|p| self.resolve_path(p))
    }
}
