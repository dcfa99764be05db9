//! Candidate sentence extraction.
//!
//! The pool of sentences a classified fragment can reconcile against is
//! built from two independent passes over the document text: a linguistic
//! sentence-boundary pass (UAX #29) and a paragraph/punctuation heuristic
//! pass. LLM classifiers paraphrase and renderers mangle line breaks, so
//! neither pass alone covers what comes back; together they usually do.

use crate::config::AnalyzerConfig;
use crate::normalize::fold_key;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    static ref TERMINATOR_SPLIT: Regex = Regex::new(r"[.!?]+\s+").expect("valid regex");
}

/// Lazily yield unique candidate sentences from document text.
///
/// Linguistic-pass sentences come first and win on duplicates; the
/// heuristic pass fills in what boundary detection missed. Deduplication
/// is by normalized, lowercased equality, preserving first-seen order.
/// Sentences of `min_sentence_chars` normalized characters or fewer are
/// dropped. An empty document yields an empty stream.
pub fn sentence_stream<'a>(
    text: &'a str,
    config: &AnalyzerConfig,
) -> impl Iterator<Item = String> + 'a {
    let min_chars = config.min_sentence_chars;
    let long_para = config.long_paragraph_chars;

    let linguistic = text.unicode_sentences().map(|s| s.trim().to_string());
    let heuristic = heuristic_sentences(text, long_para).into_iter();

    let mut seen: HashSet<String> = HashSet::new();
    linguistic.chain(heuristic).filter(move |sentence| {
        let key = fold_key(sentence);
        key.chars().count() > min_chars && seen.insert(key)
    })
}

/// Build the candidate sentence pool for one analysis run.
pub fn extract_sentences(text: &str, config: &AnalyzerConfig) -> Vec<String> {
    let pool: Vec<String> = sentence_stream(text, config).collect();
    log::debug!("extracted {} unique candidate sentences", pool.len());
    pool
}

/// Paragraph/punctuation pass: split on blank lines, re-split long
/// paragraphs on sentence terminators, and restore terminal punctuation
/// (the terminator split consumes it).
fn heuristic_sentences(text: &str, long_paragraph_chars: usize) -> Vec<String> {
    let mut sentences = Vec::new();
    for paragraph in text.split("\n\n") {
        let para = paragraph.trim();
        if para.is_empty() {
            continue;
        }
        if para.chars().count() > long_paragraph_chars {
            for fragment in TERMINATOR_SPLIT.split(para) {
                let fragment = fragment.trim();
                if !fragment.is_empty() {
                    sentences.push(with_terminal_punctuation(fragment));
                }
            }
        } else {
            sentences.push(with_terminal_punctuation(para));
        }
    }
    sentences
}

fn with_terminal_punctuation(sentence: &str) -> String {
    if sentence.ends_with(['.', '!', '?']) {
        sentence.to_string()
    } else {
        format!("{}.", sentence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(text: &str) -> Vec<String> {
        extract_sentences(text, &AnalyzerConfig::default())
    }

    #[test]
    fn test_empty_text_yields_empty_pool() {
        assert!(pool("").is_empty());
        assert!(pool("   \n\n  ").is_empty());
    }

    #[test]
    fn test_short_fragments_are_dropped() {
        // 15 normalized chars or fewer never enter the pool.
        assert!(pool("Short line.").is_empty());
        assert_eq!(pool("The tenant shall pay rent monthly.").len(), 1);
    }

    #[test]
    fn test_basic_two_sentence_split() {
        let sentences = pool(
            "Tenant shall pay rent by the 5th of each month.\n\n\
             Landlord may terminate this lease for breach.",
        );
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].starts_with("Tenant shall pay rent"));
        assert!(sentences[1].starts_with("Landlord may terminate"));
    }

    #[test]
    fn test_single_paragraph_contributes_whole_and_parts() {
        // Within one paragraph the linguistic pass yields the sentences
        // and the heuristic pass adds the paragraph itself.
        let sentences = pool(
            "Tenant shall pay rent by the 5th of each month. \
             Landlord may terminate this lease for breach.",
        );
        assert_eq!(sentences.len(), 3);
        assert!(sentences[0].starts_with("Tenant shall pay rent"));
        assert!(sentences[1].starts_with("Landlord may terminate"));
        assert!(sentences[2].contains("month. Landlord"));
    }

    #[test]
    fn test_dedup_is_case_insensitive_and_order_preserving() {
        let sentences = pool(
            "The tenant shall maintain the premises.\n\n\
             THE TENANT SHALL MAINTAIN THE PREMISES.",
        );
        assert_eq!(sentences.len(), 1);
        // First-seen (linguistic pass) casing wins.
        assert!(sentences[0].starts_with("The tenant"));
    }

    #[test]
    fn test_no_duplicates_after_normalization() {
        let text = "Tenant agrees to keep the property clean.  \
                    Tenant  agrees to keep the property clean.";
        let sentences = pool(text);
        let keys: HashSet<String> = sentences.iter().map(|s| fold_key(s)).collect();
        assert_eq!(keys.len(), sentences.len());
    }

    #[test]
    fn test_paragraph_without_terminator_gets_one() {
        let sentences = pool("Clause 4: security deposit held by landlord");
        assert!(sentences.iter().any(|s| s.ends_with('.')));
    }

    #[test]
    fn test_long_paragraph_is_resplit() {
        let long = "The landlord reserves the right to inspect the premises upon advance notice. \
                    The tenant must not sublet any part of the property without written consent. \
                    All utility charges during the term are borne solely by the tenant."
            .to_string();
        assert!(long.chars().count() > 200);
        let sentences = pool(&long);
        assert_eq!(sentences.len(), 3);
        for s in &sentences {
            assert!(s.ends_with(['.', '!', '?']));
        }
    }

    #[test]
    fn test_stream_is_lazy_front() {
        let text = "The tenant shall pay rent monthly without demand. \
                    The landlord shall provide two keys at move-in.";
        let first = sentence_stream(text, &AnalyzerConfig::default()).next();
        assert!(first.unwrap().starts_with("The tenant shall pay"));
    }
}
