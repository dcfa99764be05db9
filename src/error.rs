//! Error types for the lease analysis library.
//!
//! This module defines all error types that can occur during document
//! analysis, translation alignment, and highlight rendering.

use std::path::PathBuf;

/// Result type alias for lease analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single external call (classifier or translator).
///
/// The transient/permanent split exists so callers can layer retry policy
/// on top without the core pipeline changing: the pipeline itself is
/// single-attempt.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CallError {
    /// Failure that might succeed on retry (timeout, rate limit, 5xx).
    #[error("transient failure: {0}")]
    Transient(String),

    /// Failure that will not succeed on retry (auth, bad request, quota).
    #[error("permanent failure: {0}")]
    Permanent(String),
}

impl CallError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, CallError::Transient(_))
    }
}

/// Error types that can occur during lease document analysis.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input file does not exist
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Input file has an extension outside pdf/docx/txt
    #[error("unsupported file format: '{0}' (supported: pdf, docx, txt)")]
    UnsupportedFormat(String),

    /// The translator call failed; the whole translation is aborted
    #[error("translation failed: {0}")]
    Translation(#[source] CallError),

    /// A translator is required for this document's language but none was configured
    #[error("document language '{0}' requires a translator, none configured")]
    TranslatorMissing(String),

    /// Renderer-level failure (open/page/save)
    #[error("render error: {0}")]
    Render(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_error() {
        let err = Error::UnsupportedFormat("odt".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("unsupported file format"));
        assert!(msg.contains("odt"));
    }

    #[test]
    fn test_not_found_error() {
        let err = Error::NotFound(PathBuf::from("missing.pdf"));
        assert!(format!("{}", err).contains("missing.pdf"));
    }

    #[test]
    fn test_call_error_transience() {
        assert!(CallError::Transient("timeout".into()).is_transient());
        assert!(!CallError::Permanent("bad key".into()).is_transient());
    }

    #[test]
    fn test_translation_error_wraps_call_error() {
        let err = Error::Translation(CallError::Transient("429".into()));
        let msg = format!("{}", err);
        assert!(msg.contains("translation failed"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
        assert_send_sync::<CallError>();
    }
}
