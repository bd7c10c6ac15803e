#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! PDF text extraction and input discovery for fund fact sheets.
//!
//! Fact sheets arrive as a directory of PDF files. This crate finds them
//! (everything else in the directory is ignored) and turns each one into
//! plain text using pure-Rust extraction ([`pdf_extract`]). Interpreting
//! that text is the AI crate's job.

use std::path::{Path, PathBuf};

/// Errors specific to reading fact sheet PDFs.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// PDF text extraction failed.
    #[error("PDF extraction error: {0}")]
    Extraction(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extracts the full plain-text content of a PDF file.
///
/// # Errors
///
/// Returns [`PdfError`] if the file cannot be read or is not a parseable
/// PDF.
pub fn extract_text(path: &Path) -> Result<String, PdfError> {
    let bytes = std::fs::read(path)?;

    log::debug!("Read {} bytes from {}", bytes.len(), path.display());

    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
        PdfError::Extraction(format!(
            "failed to extract text from {}: {e}",
            path.display()
        ))
    })?;

    log::debug!(
        "Extracted {} characters of text from {}",
        text.len(),
        path.display()
    );

    Ok(text)
}

/// Lists the fact sheet PDFs in `dir`, sorted by file name.
///
/// Only regular files with a `.pdf` extension (case-insensitive) are
/// returned. Directory listing order is platform-defined, so the result
/// is sorted to keep output row order stable across runs.
///
/// # Errors
///
/// Returns [`PdfError::Io`] if the directory cannot be read.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>, PdfError> {
    let mut paths = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_pdf(&path) {
            paths.push(path);
        }
    }

    paths.sort();

    log::debug!("Found {} PDF file(s) in {}", paths.len(), dir.display());

    Ok(paths)
}

/// Whether `path` has a `.pdf` extension, case-insensitively.
fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_matches_case_insensitively() {
        assert!(is_pdf(Path::new("sheets/alpha_fund.pdf")));
        assert!(is_pdf(Path::new("sheets/ALPHA_FUND.PDF")));
        assert!(!is_pdf(Path::new("sheets/notes.txt")));
        assert!(!is_pdf(Path::new("sheets/alpha_fund")));
    }

    #[test]
    fn listing_filters_and_sorts() {
        let dir = std::env::temp_dir().join(format!(
            "fund_sheets_pdf_test_{}_{}",
            std::process::id(),
            line!()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        for name in ["b.pdf", "a.PDF", "ignored.txt", "c.pdf"] {
            std::fs::write(dir.join(name), b"%PDF-1.4").unwrap();
        }

        let names: Vec<String> = list_documents(&dir)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.PDF", "b.pdf", "c.pdf"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
