//! Page layout tree: blocks, lines, and spans with bounding boxes.
//!
//! This is the structured representation a renderer exposes for one page,
//! the shape the structural fuzzy locator walks. Spans are complete text
//! runs as the renderer provides them, not individual characters.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// A text run with its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The run's literal text
    pub text: String,
    /// Bounding box of the run
    pub bbox: Rect,
}

impl TextSpan {
    /// Create a span from text and bounds.
    pub fn new(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// One visual line of text, made of one or more spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Spans in visual order
    pub spans: Vec<TextSpan>,
    /// Bounding box of the whole line
    pub bbox: Rect,
}

impl TextLine {
    /// Build a line from spans, computing the line box as their union.
    pub fn from_spans(spans: Vec<TextSpan>) -> Self {
        let bbox = spans
            .iter()
            .map(|s| s.bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
        Self { spans, bbox }
    }

    /// The line's text, spans joined with single spaces.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A block of lines (a paragraph or column fragment on the page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Lines in reading order
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    /// Create a block from lines.
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self { lines }
    }
}

/// The structured layout of a single rendered page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageLayout {
    /// Blocks in reading order
    pub blocks: Vec<TextBlock>,
}

impl PageLayout {
    /// Create a layout from blocks.
    pub fn new(blocks: Vec<TextBlock>) -> Self {
        Self { blocks }
    }

    /// Iterate all lines across all blocks in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }
}
