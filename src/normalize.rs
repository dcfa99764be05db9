//! Text normalization for comparison.
//!
//! Every comparison in the matcher and locator runs on normalized text:
//! whitespace runs collapsed, decorative quotes stripped. Extracted PDF
//! text is full of both.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").expect("valid regex");
}

/// Canonicalize text for comparison.
///
/// Collapses whitespace runs to single spaces, trims, and strips straight
/// and curly double quotes. Pure and total; empty input yields empty output.
///
/// # Examples
///
/// ```
/// use lease_lens::normalize::normalize;
///
/// assert_eq!(normalize("  Tenant \u{201C}shall\u{201D}\n pay  rent. "), "Tenant shall pay rent.");
/// ```
pub fn normalize(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .chars()
        .filter(|c| !matches!(c, '"' | '\u{201C}' | '\u{201D}'))
        .collect()
}

/// Normalized, lowercased form used as a deduplication/equality key.
pub fn fold_key(text: &str) -> String {
    normalize(text).to_lowercase()
}

/// Remove punctuation entirely, keeping word characters and whitespace.
///
/// `\w` is Unicode-aware, so Kannada (and any other script's) letters
/// survive; only punctuation and symbols are dropped.
pub fn strip_punctuation(text: &str) -> String {
    NON_WORD.replace_all(text, "").into_owned()
}

/// Replace punctuation with spaces and re-collapse.
///
/// The locator uses this form for literal search: renderers often store
/// punctuation in separate glyph runs, so folding it to word gaps makes
/// literal search succeed where the raw string fails.
pub fn fold_punctuation(text: &str) -> String {
    let spaced = NON_WORD.replace_all(text, " ");
    normalize(&spaced)
}

/// Lowercased bag of normalized words.
pub fn normalized_words(text: &str) -> Vec<String> {
    fold_key(text)
        .split_whitespace()
        .map(|w| w.to_string())
        .collect()
}
