//! Advisory checks on the bibliography a document points the converter at.
//!
//! Nothing here changes the converter invocation: a missing file is still
//! passed along and the converter reports on it.

use crate::args::ConversionRequest;
use crate::config::BibliographyCheck;
use crate::models::{Diagnostic, DiagnosticSeverity};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where a document's bibliography stands before conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum BibliographyStatus {
    Found(PathBuf),
    Missing(PathBuf),
    NotSpecified,
}

impl BibliographyStatus {
    /// Classify a request by checking the resolved file on disk
    pub fn of(request: &ConversionRequest) -> Self {
        match &request.bibliography {
            Some(path) if path.is_file() => BibliographyStatus::Found(path.clone()),
            Some(path) => BibliographyStatus::Missing(path.clone()),
            None => BibliographyStatus::NotSpecified,
        }
    }

    /// Diagnostic for statuses worth surfacing
    pub fn diagnostic(&self, document: &Path) -> Option<Diagnostic> {
        match self {
            BibliographyStatus::Missing(bib) => Some(Diagnostic {
                code: "bibliography.missing".to_string(),
                message: format!("Bibliography file not found: {}", bib.display()),
                severity: DiagnosticSeverity::Warning,
                source_path: Some(document.to_string_lossy().to_string()),
                context: Some(bib.to_string_lossy().to_string()),
            }),
            BibliographyStatus::Found(_) | BibliographyStatus::NotSpecified => None,
        }
    }
}

/// Probe the request's bibliography at the configured level.
///
/// Returns `None` when checking is turned off; otherwise logs the outcome
/// and returns it.
pub fn probe(
    request: &ConversionRequest,
    document: &Path,
    level: BibliographyCheck,
) -> Option<BibliographyStatus> {
    if level == BibliographyCheck::Off {
        return None;
    }

    let status = BibliographyStatus::of(request);
    match &status {
        BibliographyStatus::Found(bib) => {
            debug!("Using bibliography {:?} for {:?}", bib, document)
        }
        BibliographyStatus::Missing(bib) => {
            warn!("Bibliography {:?} for {:?} does not exist", bib, document)
        }
        BibliographyStatus::NotSpecified => {
            debug!("No bibliography specified for {:?}", document)
        }
    }
    Some(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn request(bibliography: Option<PathBuf>) -> ConversionRequest {
        ConversionRequest {
            to: "html5".into(),
            format: "markdown".into(),
            extra_args: vec![],
            filters: vec![],
            bibliography,
        }
    }

    #[test]
    fn test_found() {
        let dir = tempdir().unwrap();
        let bib = dir.path().join("refs.bib");
        fs::write(&bib, "@book{key, title={T}}").unwrap();

        let status = probe(&request(Some(bib.clone())), Path::new("a.md"), BibliographyCheck::Warn);
        assert_eq!(status, Some(BibliographyStatus::Found(bib)));
    }

    #[test]
    fn test_missing_produces_diagnostic() {
        let dir = tempdir().unwrap();
        let bib = dir.path().join("absent.bib");

        let status = probe(&request(Some(bib.clone())), Path::new("a.md"), BibliographyCheck::Warn)
            .unwrap();
        assert_eq!(status, BibliographyStatus::Missing(bib));

        let diag = status.diagnostic(Path::new("a.md")).unwrap();
        assert_eq!(diag.code, "bibliography.missing");
        assert_eq!(diag.severity, DiagnosticSeverity::Warning);
        assert_eq!(diag.source_path.as_deref(), Some("a.md"));
    }

    #[test]
    fn test_directory_is_not_a_bibliography() {
        let dir = tempdir().unwrap();
        let status = BibliographyStatus::of(&request(Some(dir.path().to_path_buf())));
        assert!(matches!(status, BibliographyStatus::Missing(_)));
    }

    #[test]
    fn test_not_specified() {
        let status = probe(&request(None), Path::new("a.md"), BibliographyCheck::Warn);
        assert_eq!(status, Some(BibliographyStatus::NotSpecified));
        assert!(BibliographyStatus::NotSpecified
            .diagnostic(Path::new("a.md"))
            .is_none());
    }

    #[test]
    fn test_off_skips_the_check() {
        let status = probe(
            &request(Some(PathBuf::from("/nonexistent/refs.bib"))),
            Path::new("a.md"),
            BibliographyCheck::Off,
        );
        assert_eq!(status, None);
    }
}
