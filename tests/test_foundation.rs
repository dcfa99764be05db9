//! Property tests for the foundation invariants: pool deduplication,
//! matcher guarantees, and normalization.

use lease_lens::config::AnalyzerConfig;
use lease_lens::matcher::{FuzzyMatcher, MatchOutcome};
use lease_lens::normalize::{fold_key, normalize};
use lease_lens::report::{favorability_score, AnalysisResult, Clause};
use lease_lens::sentences::extract_sentences;
use lease_lens::{Language, Severity};
use proptest::prelude::*;
use std::collections::HashSet;

fn word() -> impl Strategy<Value = String> {
    "[a-z]{2,9}"
}

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 3..12).prop_map(|words| format!("{}.", words.join(" ")))
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(sentence(), 0..12).prop_map(|sentences| sentences.join(" "))
}

proptest! {
    /// No two pool entries are equal after normalization and lowercasing,
    /// and every entry clears the minimum length.
    #[test]
    fn prop_pool_is_deduplicated(text in document()) {
        let cfg = AnalyzerConfig::default();
        let pool = extract_sentences(&text, &cfg);
        let keys: HashSet<String> = pool.iter().map(|s| fold_key(s)).collect();
        prop_assert_eq!(keys.len(), pool.len());
        for entry in &pool {
            prop_assert!(fold_key(entry).chars().count() > cfg.min_sentence_chars);
        }
    }

    /// `find_best` returns an element of the pool or nothing, and never
    /// mutates the pool.
    #[test]
    fn prop_find_best_returns_pool_member(
        target in sentence(),
        pool in prop::collection::vec(sentence(), 0..8),
    ) {
        let cfg = AnalyzerConfig::default();
        let matcher = FuzzyMatcher::new(&cfg);
        let before = pool.clone();
        match matcher.find_best(&target, &pool) {
            MatchOutcome::Matched(found) => prop_assert!(pool.contains(&found)),
            MatchOutcome::Unmatched => {}
        }
        prop_assert_eq!(before, pool);
    }

    /// If the target equals a pool sentence case-insensitively after
    /// normalization, the match succeeds with an equal-keyed sentence.
    #[test]
    fn prop_stage_one_guarantee(
        pool in prop::collection::vec(sentence(), 1..8),
        index in any::<prop::sample::Index>(),
    ) {
        let cfg = AnalyzerConfig::default();
        let matcher = FuzzyMatcher::new(&cfg);
        let chosen = index.get(&pool);
        let target = format!("  {}  ", chosen.to_uppercase());
        match matcher.find_best(&target, &pool) {
            MatchOutcome::Matched(found) => {
                prop_assert_eq!(fold_key(&found), fold_key(&target));
            }
            MatchOutcome::Unmatched => prop_assert!(false, "stage one must match"),
        }
    }

    /// Normalization is idempotent on arbitrary input.
    #[test]
    fn prop_normalize_idempotent(text in ".{0,200}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
    }

    /// The favorability score stays within its documented range.
    #[test]
    fn prop_favorability_in_range(high in 0usize..40, medium in 0usize..40, low in 0usize..40) {
        let mut result = AnalysisResult::empty(Language::English);
        for severity in [Severity::High, Severity::Medium, Severity::Low] {
            let count = match severity {
                Severity::High => high,
                Severity::Medium => medium,
                Severity::Low => low,
            };
            for i in 0..count {
                result.tier_mut(severity).push(Clause {
                    severity,
                    text: format!("clause {}", i),
                    classifier_text: format!("clause {}", i),
                    source_text: None,
                    reason: "r".to_string(),
                    match_failed: false,
                });
            }
        }
        let score = favorability_score(&result);
        prop_assert!((1.0..=10.0).contains(&score));
    }
}
