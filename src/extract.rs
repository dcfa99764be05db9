//! Document extraction interface.
//!
//! Text extraction from PDF/DOCX/TXT containers is an external concern;
//! this module owns the boundary: the supported-format check, the
//! extractor trait, and simple statistics over extracted text.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

lazy_static! {
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]+").expect("valid regex");
}

/// Supported document container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Portable Document Format
    Pdf,
    /// Office Open XML document
    Docx,
    /// Plain text
    Txt,
}

impl DocumentKind {
    /// Determine the kind from a file extension.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            "txt" => Ok(DocumentKind::Txt),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }

    /// Determine the kind from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }
}

/// Check that a file exists and has a supported extension.
///
/// Both failures are fatal for the run: there is no fallback for an
/// unreadable or unrecognized input.
pub fn ensure_supported(path: &Path) -> Result<DocumentKind> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    DocumentKind::from_path(path)
}

/// Extracted document text with its detected container kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    /// Whitespace-cleaned full text
    pub text: String,
    /// Detected container format
    pub kind: DocumentKind,
}

/// External text extractor for supported containers.
pub trait Extractor {
    /// Extract cleaned text from a file.
    fn extract(&self, path: &Path) -> Result<Extraction>;
}

/// Basic statistics over extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Total characters
    pub character_count: usize,
    /// Whitespace-separated words
    pub word_count: usize,
    /// Sentences of more than ten characters
    pub sentence_count: usize,
    /// Non-empty lines
    pub paragraph_count: usize,
}

/// Compute statistics for extracted text.
pub fn document_stats(text: &str) -> DocumentStats {
    let sentence_count = SENTENCE_END
        .split(text)
        .filter(|s| s.trim().chars().count() > 10)
        .count();
    DocumentStats {
        character_count: text.chars().count(),
        word_count: text.split_whitespace().count(),
        sentence_count,
        paragraph_count: text.lines().filter(|l| !l.trim().is_empty()).count(),
    }
}
