//! Locating text fragments in rendered page geometry.
//!
//! Literal search in a renderer fails more often than it should: glyph
//! runs split mid-word, punctuation lives in separate spans, and for some
//! scripts the renderer's text index is simply unreliable. The locator
//! runs a cascade per page and stops at the first stage that produces
//! boxes:
//!
//! 1. (aggressive mode only) structural fuzzy line matching, first, at a
//!    lowered threshold. For scripts where literal search is a lost
//!    cause, trying it first only wastes the good strategy's priority.
//! 2. Literal search for the fragment as-is.
//! 3. Literal search with punctuation folded to spaces.
//! 4. Structural fuzzy line matching: word-overlap ratio or whole-line
//!    similarity against every layout line.
//! 5. Literal search for the leading 70% of the fragment's words.
//! 6. Literal search for the middle half of a long fragment.
//!
//! Page search short-circuits: the first page yielding any boxes wins.
//! A stage that errors internally counts as "no match at this stage";
//! locating is best-effort and never aborts the highlighting pass.

use crate::config::AnalyzerConfig;
use crate::geometry::Rect;
use crate::layout::PageLayout;
use crate::matcher::similarity;
use crate::normalize::{fold_key, fold_punctuation, normalize, normalized_words};
use crate::render::RenderedDocument;
use std::collections::HashSet;

/// Outcome of a locate attempt on one page.
#[derive(Debug, Clone, PartialEq)]
pub enum LocateOutcome {
    /// Bounding boxes to highlight on this page.
    Located(Vec<Rect>),
    /// Nothing found on this page; the caller tries the next one.
    NotFound,
}

impl LocateOutcome {
    /// Whether any boxes were found.
    pub fn is_located(&self) -> bool {
        matches!(self, LocateOutcome::Located(_))
    }
}

/// Cascade locator over rendered pages.
pub struct HighlightLocator<'a> {
    config: &'a AnalyzerConfig,
}

impl<'a> HighlightLocator<'a> {
    /// Create a locator with the given configuration.
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Search the whole document for `target`, page by page.
    ///
    /// Returns the first page with any boxes and stops there; pages that
    /// error are skipped.
    pub fn locate<D: RenderedDocument + ?Sized>(
        &self,
        doc: &D,
        target: &str,
        aggressive: bool,
    ) -> Option<(usize, Vec<Rect>)> {
        for page in 0..doc.page_count() {
            match self.locate_on_page(doc, page, target, aggressive) {
                LocateOutcome::Located(boxes) => {
                    log::debug!("located fragment on page {}", page + 1);
                    return Some((page, boxes));
                }
                LocateOutcome::NotFound => continue,
            }
        }
        None
    }

    /// Run the locate cascade against a single page.
    pub fn locate_on_page<D: RenderedDocument + ?Sized>(
        &self,
        doc: &D,
        page: usize,
        target: &str,
        aggressive: bool,
    ) -> LocateOutcome {
        let target = normalize(target);
        if target.is_empty() {
            return LocateOutcome::NotFound;
        }

        let layout = match doc.page_layout(page) {
            Ok(layout) => Some(layout),
            Err(e) => {
                log::debug!("page {} layout unavailable: {}", page + 1, e);
                None
            }
        };

        // Stage 1: aggressive-first structural matching.
        if aggressive {
            if let Some(layout) = &layout {
                if let Some(bbox) = self.fuzzy_line_match(
                    layout,
                    &target,
                    self.config.aggressive_line_match_threshold,
                ) {
                    return LocateOutcome::Located(vec![bbox]);
                }
            }
        }

        // Stage 2: literal search as-is.
        let boxes = self.search(doc, page, &target);
        if !boxes.is_empty() {
            return LocateOutcome::Located(boxes);
        }

        // Stage 3: literal search with punctuation folded.
        let folded = fold_punctuation(&target);
        if !folded.is_empty() && folded != target {
            let boxes = self.search(doc, page, &folded);
            if !boxes.is_empty() {
                return LocateOutcome::Located(boxes);
            }
        }

        // Stage 4: structural matching at the standard threshold. In
        // aggressive mode this already ran at a lower threshold, so a
        // second pass cannot find anything new.
        if !aggressive {
            if let Some(layout) = &layout {
                if let Some(bbox) =
                    self.fuzzy_line_match(layout, &target, self.config.line_match_threshold)
                {
                    return LocateOutcome::Located(vec![bbox]);
                }
            }
        }

        // Stage 5: leading portion of the words.
        let words: Vec<&str> = target.split_whitespace().collect();
        if words.len() >= self.config.min_partial_words {
            let partial_len = (words.len() as f64 * self.config.partial_word_fraction) as usize;
            if partial_len >= self.config.min_partial_words {
                let partial = words[..partial_len].join(" ");
                let boxes = self.search(doc, page, &partial);
                if !boxes.is_empty() {
                    log::debug!("located via partial match on page {}", page + 1);
                    return LocateOutcome::Located(boxes);
                }
            }
        }

        // Stage 6: middle half of a long fragment.
        let chars: Vec<char> = target.chars().collect();
        if chars.len() > self.config.middle_span_min_chars {
            let middle: String = chars[chars.len() / 4..3 * chars.len() / 4].iter().collect();
            let middle = middle.trim();
            if middle.chars().count() > self.config.middle_span_keep_chars {
                let boxes = self.search(doc, page, middle);
                if !boxes.is_empty() {
                    log::debug!("located via middle portion on page {}", page + 1);
                    return LocateOutcome::Located(boxes);
                }
            }
        }

        LocateOutcome::NotFound
    }

    /// Structural matching: the first layout line whose word-overlap
    /// ratio or whole-string similarity reaches the threshold.
    fn fuzzy_line_match(&self, layout: &PageLayout, target: &str, threshold: f64) -> Option<Rect> {
        let target_key = fold_key(target);
        let target_words: HashSet<String> = normalized_words(target).into_iter().collect();

        for line in layout.lines() {
            let line_key = fold_key(&line.text());
            let line_words: HashSet<String> = normalized_words(&line_key).into_iter().collect();

            if !target_words.is_empty() && !line_words.is_empty() {
                let overlap = target_words.intersection(&line_words).count();
                let ratio = overlap as f64 / target_words.len().min(line_words.len()) as f64;
                if ratio >= threshold {
                    return Some(line.bbox);
                }
            }

            if similarity(&target_key, &line_key) >= threshold {
                return Some(line.bbox);
            }
        }
        None
    }

    /// Literal search with errors demoted to "no match".
    fn search<D: RenderedDocument + ?Sized>(&self, doc: &D, page: usize, needle: &str) -> Vec<Rect> {
        match doc.search_literal(page, needle) {
            Ok(boxes) => boxes,
            Err(e) => {
                log::debug!("literal search failed on page {}: {}", page + 1, e);
                Vec::new()
            }
        }
    }
}
