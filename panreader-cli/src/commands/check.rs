//! Check documents for front-matter and bibliography problems.

use super::Workspace;
use anyhow::{bail, Result};
use panreader_core::{
    build_args, BibliographyStatus, Diagnostic, DiagnosticSeverity, DocumentReader,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Serialize)]
struct CheckSummary<'a> {
    documents: usize,
    errors: usize,
    warnings: usize,
    diagnostics: &'a [Diagnostic],
}

/// Inspect every document under `paths` without running the converter.
pub fn check_documents(workspace: &Workspace, paths: &[PathBuf], json: bool) -> Result<()> {
    let documents = discover_documents(workspace, paths);
    let mut diagnostics = Vec::new();

    for document in &documents {
        diagnostics.extend(check_document(workspace, document));
    }

    let errors = count(&diagnostics, DiagnosticSeverity::Error);
    let warnings = count(&diagnostics, DiagnosticSeverity::Warning);

    if json {
        let summary = CheckSummary {
            documents: documents.len(),
            errors,
            warnings,
            diagnostics: &diagnostics,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Checked {} documents: {} errors, {} warnings",
            documents.len(),
            errors,
            warnings
        );
        for diag in &diagnostics {
            let source = diag
                .source_path
                .as_deref()
                .map(|s| format!(" ({})", s))
                .unwrap_or_default();
            println!("- {:?} {}{}: {}", diag.severity, diag.code, source, diag.message);
        }
    }

    if errors > 0 {
        bail!("{} document(s) failed the check", errors);
    }
    Ok(())
}

fn check_document(workspace: &Workspace, document: &Path) -> Option<Diagnostic> {
    let Some(reader) = workspace.registry.reader_for(document) else {
        return Some(Diagnostic {
            code: "document.unsupported".to_string(),
            message: "No reader registered for this file extension".to_string(),
            severity: DiagnosticSeverity::Warning,
            source_path: Some(document.to_string_lossy().to_string()),
            context: None,
        });
    };

    match reader.read_metadata(document) {
        Ok(metadata) => {
            let request = build_args(&metadata, &workspace.settings, document);
            BibliographyStatus::of(&request).diagnostic(document)
        }
        Err(err) => Some(Diagnostic {
            code: "document.unreadable".to_string(),
            message: err.to_string(),
            severity: DiagnosticSeverity::Error,
            source_path: Some(document.to_string_lossy().to_string()),
            context: None,
        }),
    }
}

/// Expand directories into the documents the registry has a reader for
fn discover_documents(workspace: &Workspace, paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|p| workspace.registry.reader_for(p).is_some());
            documents.extend(found);
        } else {
            documents.push(path.clone());
        }
    }
    documents
}

fn count(diagnostics: &[Diagnostic], severity: DiagnosticSeverity) -> usize {
    diagnostics.iter().filter(|d| d.severity == severity).count()
}
