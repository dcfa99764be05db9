//! Configuration for the analysis pipeline.
//!
//! All fuzzy-match thresholds and length gates live here rather than at
//! call sites. The defaults reproduce the tuning the pipeline ships with;
//! none of them have a derivation beyond empirical behavior on real
//! lease documents, which is exactly why they are configurable.

/// Analysis pipeline configuration.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Acceptance threshold for fragment-to-sentence fuzzy matching.
    pub match_threshold: f64,

    /// Acceptance threshold when resolving an English sentence back to an
    /// original-language sentence through the reverse translation map.
    /// Higher than `match_threshold`: the stakes are sentence-level.
    pub sentence_match_threshold: f64,

    /// Structural line-match threshold used by the highlight locator.
    pub line_match_threshold: f64,

    /// Line-match threshold in aggressive mode (non-default scripts,
    /// where literal search in the renderer is unreliable).
    pub aggressive_line_match_threshold: f64,

    /// Sentences at or below this many normalized characters are dropped
    /// from the candidate pool.
    pub min_sentence_chars: usize,

    /// Source-language fragments at or below this length are not sent
    /// for translation.
    pub min_translation_chars: usize,

    /// Substring containment only counts as a match when the contained
    /// string has at least this many characters.
    pub min_containment_chars: usize,

    /// Paragraphs longer than this are re-split on sentence terminators.
    pub long_paragraph_chars: usize,

    /// Number of sentences per translation request.
    pub translation_batch_size: usize,

    /// Fraction of leading words used by the partial-match locate fallback.
    pub partial_word_fraction: f64,

    /// Minimum word count for the partial-match locate fallback.
    pub min_partial_words: usize,

    /// Fragments longer than this are eligible for the middle-portion
    /// locate fallback.
    pub middle_span_min_chars: usize,

    /// The extracted middle portion must exceed this length to be searched.
    pub middle_span_keep_chars: usize,

    /// Keywords marking a sentence high-severity in fallback classification.
    pub high_keywords: Vec<String>,

    /// Keywords marking a sentence medium-severity in fallback classification.
    pub medium_keywords: Vec<String>,

    /// How many pool sentences the fallback classifier scans.
    pub fallback_sentence_limit: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerConfig {
    /// Create a new configuration with default thresholds.
    pub fn new() -> Self {
        Self {
            match_threshold: 0.6,
            sentence_match_threshold: 0.75,
            line_match_threshold: 0.8,
            aggressive_line_match_threshold: 0.7,
            min_sentence_chars: 15,
            min_translation_chars: 20,
            min_containment_chars: 30,
            long_paragraph_chars: 200,
            translation_batch_size: 5,
            partial_word_fraction: 0.7,
            min_partial_words: 3,
            middle_span_min_chars: 50,
            middle_span_keep_chars: 20,
            high_keywords: [
                "eviction", "penalty", "breach", "terminate", "default", "forfeit", "liable",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            medium_keywords: [
                "rent", "payment", "maintenance", "repair", "notice", "access", "inspect",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            fallback_sentence_limit: 10,
        }
    }

    /// Set the fragment-to-sentence match threshold.
    pub fn with_match_threshold(mut self, value: f64) -> Self {
        self.match_threshold = value;
        self
    }

    /// Set the reverse-translation sentence match threshold.
    pub fn with_sentence_match_threshold(mut self, value: f64) -> Self {
        self.sentence_match_threshold = value;
        self
    }

    /// Set the structural line-match thresholds (default, aggressive).
    pub fn with_line_match_thresholds(mut self, default: f64, aggressive: f64) -> Self {
        self.line_match_threshold = default;
        self.aggressive_line_match_threshold = aggressive;
        self
    }

    /// Set the translation batch size.
    pub fn with_translation_batch_size(mut self, size: usize) -> Self {
        self.translation_batch_size = size;
        self
    }

    /// Replace the fallback keyword lists.
    pub fn with_fallback_keywords(mut self, high: Vec<String>, medium: Vec<String>) -> Self {
        self.high_keywords = high;
        self.medium_keywords = medium;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let cfg = AnalyzerConfig::default();
        assert_eq!(cfg.match_threshold, 0.6);
        assert_eq!(cfg.sentence_match_threshold, 0.75);
        assert_eq!(cfg.line_match_threshold, 0.8);
        assert_eq!(cfg.aggressive_line_match_threshold, 0.7);
        assert_eq!(cfg.translation_batch_size, 5);
        assert_eq!(cfg.min_containment_chars, 30);
    }

    #[test]
    fn test_builder() {
        let cfg = AnalyzerConfig::new()
            .with_match_threshold(0.5)
            .with_line_match_thresholds(0.9, 0.6)
            .with_translation_batch_size(3);
        assert_eq!(cfg.match_threshold, 0.5);
        assert_eq!(cfg.line_match_threshold, 0.9);
        assert_eq!(cfg.aggressive_line_match_threshold, 0.6);
        assert_eq!(cfg.translation_batch_size, 3);
    }

    #[test]
    fn test_default_keywords_present() {
        let cfg = AnalyzerConfig::default();
        assert!(cfg.high_keywords.iter().any(|k| k == "terminate"));
        assert!(cfg.medium_keywords.iter().any(|k| k == "rent"));
        assert_eq!(cfg.fallback_sentence_limit, 10);
    }
}
