//! The external document converter.

use crate::args::ConversionRequest;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;
use which::which;

/// Environment variable naming the pandoc binary
pub const PANDOC_BIN_ENV: &str = "PANDOC_BIN";

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unable to locate a pandoc binary. Set PANDOC_PATH or PANDOC_BIN to override the detection.")]
    NotFound,

    #[error("Failed to launch pandoc ({}): {source}", binary.display())]
    Launch {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("pandoc exited with {status} while converting {}: {stderr}", path.display())]
    Failed {
        path: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("pandoc produced output that is not valid UTF-8: {0}")]
    InvalidOutput(#[from] std::string::FromUtf8Error),
}

/// Converts one file on disk into the requested output format.
pub trait Converter: Send + Sync {
    fn convert_file(
        &self,
        path: &Path,
        to: &str,
        format: &str,
        extra_args: &[String],
        filters: &[String],
    ) -> Result<String, ConvertError>;

    /// Convert with a prepared request
    fn convert(&self, path: &Path, request: &ConversionRequest) -> Result<String, ConvertError> {
        self.convert_file(
            path,
            &request.to,
            &request.format,
            &request.extra_args,
            &request.filters,
        )
    }
}

/// Converter that runs the pandoc binary as a subprocess
#[derive(Debug, Clone)]
pub struct PandocConverter {
    binary: PathBuf,
}

impl PandocConverter {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Locate pandoc: explicit override, then `PANDOC_BIN`, then `PATH`.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ConvertError> {
        if let Some(path) = explicit {
            return Ok(Self::new(path));
        }

        if let Some(path) = env::var_os(PANDOC_BIN_ENV) {
            if !path.is_empty() {
                return Ok(Self::new(path));
            }
        }

        which("pandoc")
            .map(|binary| Self { binary })
            .map_err(|_| ConvertError::NotFound)
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

/// Arguments passed to pandoc, excluding the binary itself.
///
/// Filters ending in `.lua` are passed as Lua filters.
pub fn command_args(
    path: &Path,
    to: &str,
    format: &str,
    extra_args: &[String],
    filters: &[String],
) -> Vec<String> {
    let mut args = vec![format!("--from={}", format), format!("--to={}", to)];
    args.extend(extra_args.iter().cloned());
    args.extend(filters.iter().map(|filter| {
        if filter.ends_with(".lua") {
            format!("--lua-filter={}", filter)
        } else {
            format!("--filter={}", filter)
        }
    }));
    args.push(path.to_string_lossy().to_string());
    args
}

impl Converter for PandocConverter {
    fn convert_file(
        &self,
        path: &Path,
        to: &str,
        format: &str,
        extra_args: &[String],
        filters: &[String],
    ) -> Result<String, ConvertError> {
        let args = command_args(path, to, format, extra_args, filters);
        debug!("Running {:?} {:?}", self.binary, args);

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|source| ConvertError::Launch {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                path: path.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}
