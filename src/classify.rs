//! Severity classification interface and response parsing.
//!
//! The classifier itself is an external model call; this module owns the
//! boundary: the trait the caller implements, the strict parse of the
//! model's JSON response into typed fragments, and the deterministic
//! keyword fallback used when that parse fails. Nothing downstream ever
//! sees unvalidated model output.

use crate::config::AnalyzerConfig;
use crate::error::CallError;
use serde::{Deserialize, Serialize};

/// Risk severity tier of a lease clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Critical risk: termination, penalties, liability, breach consequences.
    High,
    /// Important obligation: rent terms, maintenance, notice, access.
    Medium,
    /// General information: parties, property description, definitions.
    Low,
}

impl Severity {
    /// All tiers, highest first.
    pub fn all() -> [Severity; 3] {
        [Severity::High, Severity::Medium, Severity::Low]
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// External severity classifier.
///
/// Implementations return the raw model response for a document; parsing
/// and validation happen here, not in the implementation. The response
/// may be malformed; that is recovered from, not crashed on.
pub trait Classifier {
    /// Classify the document text, returning the raw response.
    fn classify(&self, document_text: &str) -> std::result::Result<String, CallError>;
}

/// One classified fragment exactly as the model returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFragment {
    /// The fragment text, which may paraphrase the document.
    pub text: String,
    /// The model's justification for the tier.
    #[serde(default = "default_reason")]
    pub reason: String,
}

fn default_reason() -> String {
    "No explanation provided".to_string()
}

/// Validated classifier output, one list per tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedFragments {
    /// High-severity fragments
    #[serde(default)]
    pub high_severity: Vec<RawFragment>,
    /// Medium-severity fragments
    #[serde(default)]
    pub medium_severity: Vec<RawFragment>,
    /// Low-severity fragments
    #[serde(default)]
    pub low_severity: Vec<RawFragment>,
}

impl ClassifiedFragments {
    /// Fragments of one tier.
    pub fn tier(&self, severity: Severity) -> &[RawFragment] {
        match severity {
            Severity::High => &self.high_severity,
            Severity::Medium => &self.medium_severity,
            Severity::Low => &self.low_severity,
        }
    }

    /// Mutable fragments of one tier.
    pub fn tier_mut(&mut self, severity: Severity) -> &mut Vec<RawFragment> {
        match severity {
            Severity::High => &mut self.high_severity,
            Severity::Medium => &mut self.medium_severity,
            Severity::Low => &mut self.low_severity,
        }
    }

    /// Total fragment count across tiers.
    pub fn len(&self) -> usize {
        self.high_severity.len() + self.medium_severity.len() + self.low_severity.len()
    }

    /// Whether no fragments were classified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The model response did not parse as the expected structure.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    /// What went wrong, for logging.
    pub message: String,
}

/// Strictly parse a raw classifier response.
///
/// Models wrap JSON in Markdown code fences more often than not; fences
/// are stripped before parsing. Anything that does not deserialize into
/// [`ClassifiedFragments`] is a [`ParseFailure`], and the caller falls back
/// to keyword classification rather than trusting partial structure.
pub fn parse_classifier_response(
    raw: &str,
) -> std::result::Result<ClassifiedFragments, ParseFailure> {
    let body = strip_code_fences(raw);
    serde_json::from_str(body.trim()).map_err(|e| ParseFailure {
        message: format!("classifier response is not the expected structure: {}", e),
    })
}

fn strip_code_fences(raw: &str) -> &str {
    if let Some(rest) = raw.split_once("```json").map(|(_, r)| r) {
        rest.split("```").next().unwrap_or(rest)
    } else if let Some(rest) = raw.split_once("```").map(|(_, r)| r) {
        rest.split("```").next().unwrap_or(rest)
    } else {
        raw
    }
}

/// Deterministic keyword classification over the first few pool sentences.
///
/// Used when the model response is malformed or the call fails: scans
/// `fallback_sentence_limit` sentences, assigning high severity on any
/// risk keyword, medium on any obligation keyword, low otherwise.
pub fn fallback_classification(
    sentences: &[String],
    config: &AnalyzerConfig,
) -> ClassifiedFragments {
    let mut fragments = ClassifiedFragments::default();
    for sentence in sentences.iter().take(config.fallback_sentence_limit) {
        let lower = sentence.to_lowercase();
        if config.high_keywords.iter().any(|k| lower.contains(k)) {
            fragments.high_severity.push(RawFragment {
                text: sentence.clone(),
                reason: "Contains high-risk keywords".to_string(),
            });
        } else if config.medium_keywords.iter().any(|k| lower.contains(k)) {
            fragments.medium_severity.push(RawFragment {
                text: sentence.clone(),
                reason: "Contains obligation-related keywords".to_string(),
            });
        } else {
            fragments.low_severity.push(RawFragment {
                text: sentence.clone(),
                reason: "General information".to_string(),
            });
        }
    }
    fragments
}
