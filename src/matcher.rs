//! Fuzzy matching of classifier fragments against candidate sentences.
//!
//! Classifiers paraphrase: the text that comes back rarely equals any
//! extracted sentence byte-for-byte. The matcher runs a deterministic
//! cascade, cheapest first, and stops at the first stage that succeeds:
//!
//! 1. Case-insensitive equality after normalization.
//! 2. Equality after additionally stripping punctuation.
//! 3. Substring containment in either direction, gated on the contained
//!    string being long enough to rule out trivial hits.
//! 4. Best edit-similarity ratio across the pool, accepted only strictly
//!    above the configured threshold.
//!
//! The same cascade resolves English sentences back to original-language
//! sentences through the reverse translation map, at a higher threshold.

use crate::config::AnalyzerConfig;
use crate::normalize::{fold_key, strip_punctuation};

/// Outcome of a fragment-to-candidate match attempt.
///
/// An explicit value rather than a bare `Option` so "no match" is a
/// first-class result the orchestrator records, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// The winning candidate, verbatim as it appears in the pool.
    Matched(String),
    /// No stage of the cascade succeeded.
    Unmatched,
}

impl MatchOutcome {
    /// The matched candidate, if any.
    pub fn into_matched(self) -> Option<String> {
        match self {
            MatchOutcome::Matched(s) => Some(s),
            MatchOutcome::Unmatched => None,
        }
    }

    /// Whether a candidate was found.
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }
}

/// Normalized edit-similarity ratio in `[0, 1]`.
///
/// 1.0 means equal strings; the ratio decreases with edit distance.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Cascade matcher over a pool of candidate sentences.
pub struct FuzzyMatcher<'a> {
    config: &'a AnalyzerConfig,
}

impl<'a> FuzzyMatcher<'a> {
    /// Create a matcher with the given configuration.
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Find the best candidate for `target` at the default threshold.
    ///
    /// Never mutates `candidates`; the returned sentence is always an
    /// element of the pool.
    pub fn find_best(&self, target: &str, candidates: &[String]) -> MatchOutcome {
        self.find_best_with_threshold(target, candidates, self.config.match_threshold)
    }

    /// Find the best candidate for `target`, accepting similarity only
    /// strictly above `threshold`.
    pub fn find_best_with_threshold(
        &self,
        target: &str,
        candidates: &[String],
        threshold: f64,
    ) -> MatchOutcome {
        let target_key = fold_key(target);
        if target_key.is_empty() || candidates.is_empty() {
            return MatchOutcome::Unmatched;
        }

        // Stage 1: case-insensitive exact equality.
        for candidate in candidates {
            if target_key == fold_key(candidate) {
                return MatchOutcome::Matched(candidate.clone());
            }
        }

        // Stage 2: equality ignoring punctuation.
        let target_clean = strip_punctuation(&target_key);
        for candidate in candidates {
            if target_clean == strip_punctuation(&fold_key(candidate)) {
                return MatchOutcome::Matched(candidate.clone());
            }
        }

        // Stage 3: substring containment, either direction. The contained
        // string must reach the length gate or a short fragment would
        // "match" every sentence mentioning it.
        let gate = self.config.min_containment_chars;
        let target_len = target_key.chars().count();
        for candidate in candidates {
            let candidate_key = fold_key(candidate);
            let candidate_len = candidate_key.chars().count();
            if (candidate_key.contains(&target_key) && target_len >= gate)
                || (target_key.contains(&candidate_key) && candidate_len >= gate)
            {
                return MatchOutcome::Matched(candidate.clone());
            }
        }

        // Stage 4: best similarity ratio over both representations.
        // Strictly-above comparison keeps the first-seen candidate on ties.
        let mut best_ratio = threshold;
        let mut best: Option<&String> = None;
        for candidate in candidates {
            let candidate_key = fold_key(candidate);
            let ratio = similarity(&target_key, &candidate_key).max(similarity(
                &target_clean,
                &strip_punctuation(&candidate_key),
            ));
            if ratio > best_ratio {
                best_ratio = ratio;
                best = Some(candidate);
            }
        }

        match best {
            Some(candidate) => MatchOutcome::Matched(candidate.clone()),
            None => MatchOutcome::Unmatched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher_config() -> AnalyzerConfig {
        AnalyzerConfig::default()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let cfg = matcher_config();
        let matcher = FuzzyMatcher::new(&cfg);
        let pool = strings(&[
            "Tenant shall pay rent by the 5th of each month.",
            "Landlord may terminate this lease for breach.",
        ]);
        let outcome = matcher.find_best("tenant shall PAY RENT by the 5th of each month.", &pool);
        assert_eq!(outcome, MatchOutcome::Matched(pool[0].clone()));
    }

    #[test]
    fn test_punctuation_stripped_equality() {
        let cfg = matcher_config();
        let matcher = FuzzyMatcher::new(&cfg);
        let pool = strings(&["Tenant shall pay rent, by the 5th, of each month."]);
        let outcome = matcher.find_best("Tenant shall pay rent by the 5th of each month", &pool);
        assert!(outcome.is_matched());
    }

    #[test]
    fn test_containment_requires_length_gate() {
        let cfg = matcher_config();
        let matcher = FuzzyMatcher::new(&cfg);
        let pool = strings(&["Provided always that the Tenant remains in occupation of the premises for the full term."]);
        // Contained, but far below the containment gate, and too
        // dissimilar for the ratio stage.
        let outcome = matcher.find_best("the Tenant", &pool);
        assert_eq!(outcome, MatchOutcome::Unmatched);
    }

    #[test]
    fn test_containment_accepts_long_fragment() {
        let cfg = matcher_config();
        let matcher = FuzzyMatcher::new(&cfg);
        let pool = strings(&[
            "Notwithstanding anything herein, the landlord may terminate this lease for material breach upon thirty days notice.",
        ]);
        let outcome =
            matcher.find_best("the landlord may terminate this lease for material breach", &pool);
        assert_eq!(outcome, MatchOutcome::Matched(pool[0].clone()));
    }

    #[test]
    fn test_fuzzy_stage_picks_most_similar() {
        let cfg = matcher_config();
        let matcher = FuzzyMatcher::new(&cfg);
        let pool = strings(&[
            "The security deposit is refundable at the end of the term.",
            "Tenant shall pay rent by the fifth day of each month.",
        ]);
        let outcome = matcher.find_best("Tenant will pay rent by the fifth day of every month.", &pool);
        assert_eq!(outcome, MatchOutcome::Matched(pool[1].clone()));
    }

    #[test]
    fn test_below_threshold_is_unmatched() {
        let cfg = matcher_config();
        let matcher = FuzzyMatcher::new(&cfg);
        let pool = strings(&["The premises include one covered parking space."]);
        let outcome = matcher.find_best("Arbitration shall be governed by state law entirely.", &pool);
        assert_eq!(outcome, MatchOutcome::Unmatched);
    }

    #[test]
    fn test_empty_inputs() {
        let cfg = matcher_config();
        let matcher = FuzzyMatcher::new(&cfg);
        assert_eq!(matcher.find_best("", &strings(&["anything"])), MatchOutcome::Unmatched);
        assert_eq!(matcher.find_best("anything", &[]), MatchOutcome::Unmatched);
    }

    #[test]
    fn test_result_is_pool_element() {
        let cfg = matcher_config();
        let matcher = FuzzyMatcher::new(&cfg);
        let pool = strings(&[
            "Tenant shall pay rent by the 5th of each month.",
            "Landlord may enter with 24 hours notice to inspect.",
        ]);
        if let MatchOutcome::Matched(found) =
            matcher.find_best("Landlord may enter with 24 hours notice to inspect", &pool)
        {
            assert!(pool.contains(&found));
        } else {
            panic!("expected a match");
        }
    }

    #[test]
    fn test_higher_threshold_rejects_weak_match() {
        let cfg = matcher_config();
        let matcher = FuzzyMatcher::new(&cfg);
        let pool = strings(&["The tenant agrees to maintain the garden and lawn areas."]);
        let target = "The tenant maintains garden areas.";
        // Accepted at a permissive threshold, rejected at the strict one.
        assert!(matcher
            .find_best_with_threshold(target, &pool, 0.3)
            .is_matched());
        assert!(!matcher
            .find_best_with_threshold(target, &pool, 0.95)
            .is_matched());
    }
}
