//! Renderer interface: page geometry, literal search, and annotation.
//!
//! The crate does not parse PDF containers itself; a renderer
//! implementation supplies page text, the block/line/span layout tree,
//! literal search, and highlight annotation. The document handle is a
//! single mutable resource per highlighting pass: opened, annotated
//! page by page, saved, and released by drop on every exit path.

use crate::classify::Severity;
use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::PageLayout;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An RGB highlight color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightColor {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

impl HighlightColor {
    /// Create a color from components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// The annotation color for a severity tier: red for high, yellow for
/// medium, blue for low.
pub fn severity_color(severity: Severity) -> HighlightColor {
    match severity {
        Severity::High => HighlightColor::new(1.0, 0.2, 0.2),
        Severity::Medium => HighlightColor::new(1.0, 1.0, 0.2),
        Severity::Low => HighlightColor::new(0.2, 0.2, 1.0),
    }
}

/// A rendered document open for annotation.
///
/// Page-level methods are fallible per page: the pipeline skips a failing
/// page and continues, so one bad page never aborts a highlighting pass.
pub trait RenderedDocument {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Plain text of one page.
    fn page_text(&self, page: usize) -> Result<String>;

    /// Structured layout of one page.
    fn page_layout(&self, page: usize) -> Result<PageLayout>;

    /// Literal substring search on one page, returning match boxes.
    fn search_literal(&self, page: usize, needle: &str) -> Result<Vec<Rect>>;

    /// Add a highlight annotation on one page.
    fn add_highlight(&mut self, page: usize, bbox: Rect, color: HighlightColor) -> Result<()>;

    /// Write the annotated document to `path`.
    fn save(&mut self, path: &Path) -> Result<()>;
}

/// Opens files into annotatable documents.
pub trait Renderer {
    /// The document type this renderer produces.
    type Document: RenderedDocument;

    /// Open a file for annotation.
    fn open(&self, path: &Path) -> Result<Self::Document>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_colors() {
        assert_eq!(severity_color(Severity::High), HighlightColor::new(1.0, 0.2, 0.2));
        assert_eq!(severity_color(Severity::Medium), HighlightColor::new(1.0, 1.0, 0.2));
        assert_eq!(severity_color(Severity::Low), HighlightColor::new(0.2, 0.2, 1.0));
    }
}
