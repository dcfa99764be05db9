//! Analysis results, highlight statistics, and derived reporting.
//!
//! Everything here is the pipeline's output surface: serializable,
//! immutable once assembled, and safe to hand to a presentation layer.

use crate::classify::Severity;
use crate::language::Language;
use crate::translate::TranslationInfo;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One reconciled clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Risk tier assigned by the classifier.
    pub severity: Severity,
    /// The document sentence this clause reconciled to, or the
    /// classifier's own text when reconciliation failed.
    pub text: String,
    /// The classifier's literal output for this fragment.
    pub classifier_text: String,
    /// The original-language sentence, when the document was translated
    /// and the reverse mapping resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
    /// The classifier's justification.
    pub reason: String,
    /// True when no pool sentence matched; such clauses are reported but
    /// cannot be highlighted.
    pub match_failed: bool,
}

/// Why a sentence landed in its tier, keyed by the reconciled text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityExplanation {
    /// Assigned tier
    pub severity: Severity,
    /// Classifier justification
    pub reason: String,
}

/// Sentiment label reported by an external scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    /// Overall positive tone
    Positive,
    /// Overall negative tone
    Negative,
    /// Neither
    Neutral,
}

/// Sentiment of the document, supplied by an external collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Polarity label
    pub label: SentimentLabel,
    /// Scorer confidence in `[0, 1]`
    pub score: f64,
}

/// A named entity recognized in the document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity text
    pub text: String,
    /// Entity label (person, org, date, money, …)
    pub label: String,
    /// Start character offset
    pub start: usize,
    /// End character offset
    pub end: usize,
}

/// The full result of one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// High-severity clauses
    pub high_severity: Vec<Clause>,
    /// Medium-severity clauses
    pub medium_severity: Vec<Clause>,
    /// Low-severity clauses
    pub low_severity: Vec<Clause>,
    /// Document sentiment, when an external scorer supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    /// Named entities, when an external recognizer supplied them
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// The candidate sentence pool the run reconciled against
    pub document_sentences: Vec<String>,
    /// Reconciled sentence → tier and justification
    pub severity_explanations: IndexMap<String, SeverityExplanation>,
    /// Detected source language
    pub original_language: Language,
    /// Sentence-aligned translation, for non-English documents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_info: Option<TranslationInfo>,
}

impl AnalysisResult {
    /// An empty result for a document in the given language.
    pub fn empty(language: Language) -> Self {
        Self {
            original_language: language,
            ..Default::default()
        }
    }

    /// Clauses of one tier.
    pub fn tier(&self, severity: Severity) -> &[Clause] {
        match severity {
            Severity::High => &self.high_severity,
            Severity::Medium => &self.medium_severity,
            Severity::Low => &self.low_severity,
        }
    }

    /// Mutable clauses of one tier.
    pub fn tier_mut(&mut self, severity: Severity) -> &mut Vec<Clause> {
        match severity {
            Severity::High => &mut self.high_severity,
            Severity::Medium => &mut self.medium_severity,
            Severity::Low => &mut self.low_severity,
        }
    }

    /// Total clause count across tiers.
    pub fn clause_count(&self) -> usize {
        self.high_severity.len() + self.medium_severity.len() + self.low_severity.len()
    }
}

/// Per-tier highlight accounting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierStats {
    /// Clauses classified at this tier before locating
    pub expected: usize,
    /// Clauses whose location was found and highlighted
    pub found: usize,
    /// Previews (first 100 chars) of clauses that could not be located
    pub missed: Vec<String>,
}

/// Highlight statistics for one highlighting pass.
///
/// For every tier, `found ≤ expected` and
/// `missed.len() == expected − found`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightStatistics {
    /// High tier accounting
    pub high_severity: TierStats,
    /// Medium tier accounting
    pub medium_severity: TierStats,
    /// Low tier accounting
    pub low_severity: TierStats,
}

impl HighlightStatistics {
    /// Stats for one tier.
    pub fn tier(&self, severity: Severity) -> &TierStats {
        match severity {
            Severity::High => &self.high_severity,
            Severity::Medium => &self.medium_severity,
            Severity::Low => &self.low_severity,
        }
    }

    /// Mutable stats for one tier.
    pub fn tier_mut(&mut self, severity: Severity) -> &mut TierStats {
        match severity {
            Severity::High => &mut self.high_severity,
            Severity::Medium => &mut self.medium_severity,
            Severity::Low => &mut self.low_severity,
        }
    }

    /// Total clauses expected across tiers.
    pub fn total_expected(&self) -> usize {
        Severity::all().iter().map(|s| self.tier(*s).expected).sum()
    }

    /// Total clauses highlighted across tiers.
    pub fn total_found(&self) -> usize {
        Severity::all().iter().map(|s| self.tier(*s).found).sum()
    }
}

/// Tenant-favorability score in `[1.0, 10.0]`, one decimal.
///
/// Starts from a neutral base and moves with the clause mix: high-risk
/// clauses pull it down hardest, informational clauses nudge it up, and
/// a document with a substantial number of classified clauses gets a
/// small completeness credit.
pub fn favorability_score(result: &AnalysisResult) -> f64 {
    let high = result.high_severity.len() as f64;
    let medium = result.medium_severity.len() as f64;
    let low = result.low_severity.len() as f64;

    let mut score = 7.0;
    score -= high * 0.3;
    score -= medium * 0.1;
    score += low * 0.05;

    match result.sentiment.map(|s| s.label) {
        Some(SentimentLabel::Positive) => score += 0.5,
        Some(SentimentLabel::Negative) => score -= 0.5,
        _ => {}
    }

    if result.clause_count() > 5 {
        score += 0.3;
    }

    (score.clamp(1.0, 10.0) * 10.0).round() / 10.0
}

/// Deterministic summary assembled without any model call.
///
/// Used when no generated summary is available; states the clause mix,
/// tone, and language provenance in presentation-ready Markdown.
pub fn fallback_summary(result: &AnalysisResult) -> String {
    let high = result.high_severity.len();
    let medium = result.medium_severity.len();
    let low = result.low_severity.len();

    let mut parts: Vec<String> = Vec::new();

    if result.original_language == Language::Kannada {
        parts.push(
            "**Language**: This document was originally in Kannada and has been \
             analyzed after translation."
                .to_string(),
        );
    }

    if let Some(sentiment) = result.sentiment {
        let tone = match sentiment.label {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        };
        parts.push(format!(
            "**Overall Assessment**: This lease agreement has a {} tone overall.",
            tone
        ));
    }

    parts.push(format!(
        "**Clause Analysis**: Found {} high-severity, {} medium-severity, and {} \
         low-severity clauses.",
        high, medium, low
    ));

    if high > 0 {
        parts.push(format!(
            "**Key Concerns**: The {} high-severity clauses may pose significant \
             risks and should be carefully reviewed.",
            high
        ));
    }

    if medium > 0 {
        parts.push(format!(
            "**Important Obligations**: The {} medium-severity clauses outline key \
             responsibilities and terms.",
            medium
        ));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(severity: Severity, text: &str) -> Clause {
        Clause {
            severity,
            text: text.to_string(),
            classifier_text: text.to_string(),
            source_text: None,
            reason: "test".to_string(),
            match_failed: false,
        }
    }

    fn result_with(high: usize, medium: usize, low: usize) -> AnalysisResult {
        let mut result = AnalysisResult::empty(Language::English);
        for i in 0..high {
            result.high_severity.push(clause(Severity::High, &format!("h{}", i)));
        }
        for i in 0..medium {
            result.medium_severity.push(clause(Severity::Medium, &format!("m{}", i)));
        }
        for i in 0..low {
            result.low_severity.push(clause(Severity::Low, &format!("l{}", i)));
        }
        result
    }

    #[test]
    fn test_score_neutral_base() {
        let result = result_with(0, 0, 0);
        assert_eq!(favorability_score(&result), 7.0);
    }

    #[test]
    fn test_score_high_clauses_pull_down() {
        let result = result_with(3, 2, 0);
        // 7.0 - 0.9 - 0.2; five clauses total, so no completeness credit
        assert_eq!(favorability_score(&result), 5.9);
    }

    #[test]
    fn test_score_completeness_credit() {
        let result = result_with(0, 0, 6);
        // 7.0 + 0.3 + 0.3
        assert_eq!(favorability_score(&result), 7.6);
    }

    #[test]
    fn test_score_sentiment_shift() {
        let mut result = result_with(1, 0, 0);
        result.sentiment = Some(Sentiment {
            label: SentimentLabel::Negative,
            score: 0.9,
        });
        assert_eq!(favorability_score(&result), 6.2);
    }

    #[test]
    fn test_score_clamped() {
        let result = result_with(40, 0, 0);
        assert_eq!(favorability_score(&result), 1.0);
    }

    #[test]
    fn test_stats_invariant_helpers() {
        let mut stats = HighlightStatistics::default();
        stats.tier_mut(Severity::High).expected = 3;
        stats.tier_mut(Severity::High).found = 2;
        stats.tier_mut(Severity::High).missed.push("missed".to_string());
        assert_eq!(stats.total_expected(), 3);
        assert_eq!(stats.total_found(), 2);
        let tier = stats.tier(Severity::High);
        assert!(tier.found <= tier.expected);
        assert_eq!(tier.missed.len(), tier.expected - tier.found);
    }

    #[test]
    fn test_fallback_summary_mentions_counts() {
        let result = result_with(2, 1, 0);
        let summary = fallback_summary(&result);
        assert!(summary.contains("2 high-severity"));
        assert!(summary.contains("Key Concerns"));
        assert!(summary.contains("Important Obligations"));
        assert!(!summary.contains("Kannada"));
    }

    #[test]
    fn test_fallback_summary_notes_translation() {
        let mut result = result_with(0, 0, 1);
        result.original_language = Language::Kannada;
        assert!(fallback_summary(&result).contains("Kannada"));
    }

    #[test]
    fn test_analysis_result_serde_round_trip() {
        let mut result = result_with(1, 1, 1);
        result.severity_explanations.insert(
            "h0".to_string(),
            SeverityExplanation {
                severity: Severity::High,
                reason: "test".to_string(),
            },
        );
        let json = serde_json::to_string(&result).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.clause_count(), 3);
        assert_eq!(back.high_severity[0].text, "h0");
    }
}
