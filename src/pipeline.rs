//! The reconciliation pipeline.
//!
//! One analysis run moves through fixed stages:
//!
//! ```text
//! EXTRACTED → (TRANSLATED?) → CLASSIFIED → RECONCILED → LOCATED → REPORTED
//! ```
//!
//! [`Analyzer`] drives extraction through reconciliation and produces an
//! [`AnalysisResult`]; [`Highlighter`] drives the locate/annotate pass
//! over a rendered document and produces [`HighlightStatistics`]. Both
//! are explicit per-run context objects: configuration and collaborators
//! are constructed and passed in, never ambient.
//!
//! Degradation rules: a malformed classifier response falls back to
//! keyword classification; an unmatched fragment is kept and flagged; an
//! unlocatable clause is counted as missed; a failing page is skipped.
//! Only unsupported input and translator failure abort a run.

use crate::classify::{
    fallback_classification, parse_classifier_response, ClassifiedFragments, Classifier, Severity,
};
use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::extract::{ensure_supported, Extractor};
use crate::language::{self, Language};
use crate::locate::HighlightLocator;
use crate::matcher::{FuzzyMatcher, MatchOutcome};
use crate::render::{severity_color, RenderedDocument, Renderer};
use crate::report::{AnalysisResult, Clause, HighlightStatistics, SeverityExplanation};
use crate::sentences::extract_sentences;
use crate::translate::{self, Translator};
use std::path::Path;

/// Per-run analysis context: configuration plus external collaborators.
pub struct Analyzer<'a> {
    config: AnalyzerConfig,
    classifier: &'a dyn Classifier,
    translator: Option<&'a dyn Translator>,
}

impl<'a> Analyzer<'a> {
    /// Create an analyzer for one run.
    pub fn new(config: AnalyzerConfig, classifier: &'a dyn Classifier) -> Self {
        Self {
            config,
            classifier,
            translator: None,
        }
    }

    /// Attach a translator, enabling non-English documents.
    pub fn with_translator(mut self, translator: &'a dyn Translator) -> Self {
        self.translator = Some(translator);
        self
    }

    /// The run configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Extract text from a file and analyze it.
    pub fn analyze_file(&self, extractor: &dyn Extractor, path: &Path) -> Result<AnalysisResult> {
        ensure_supported(path)?;
        let extraction = extractor.extract(path)?;
        self.analyze(&extraction.text)
    }

    /// Analyze document text: detect language, translate if needed,
    /// classify, and reconcile every fragment against the sentence pool.
    ///
    /// Always returns a structured result for supported input; the only
    /// propagated failures are translator errors (per policy: a Kannada
    /// run without its translation is not silently analyzed as English).
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let original_language = language::detect(text);
        log::debug!("run stage EXTRACTED: language {}", original_language);

        let mut translation_info = None;
        let analysis_text = if original_language == Language::Kannada {
            let translator = self
                .translator
                .ok_or_else(|| Error::TranslatorMissing(original_language.to_string()))?;
            let info = translate::align(translator, text, &self.config)?;
            log::debug!("run stage TRANSLATED: {} sentence pairs", info.forward.len());
            let translated = info.translated_text.clone();
            translation_info = Some(info);
            translated
        } else {
            text.to_string()
        };

        let pool = extract_sentences(&analysis_text, &self.config);

        let fragments = self.classify_with_fallback(&analysis_text, &pool);
        log::debug!("run stage CLASSIFIED: {} fragments", fragments.len());

        let mut result = AnalysisResult::empty(original_language);
        result.document_sentences = pool.clone();

        let matcher = FuzzyMatcher::new(&self.config);
        for severity in Severity::all() {
            for fragment in fragments.tier(severity) {
                let fragment_text = fragment.text.trim();
                if fragment_text.is_empty() {
                    continue;
                }
                let clause = match matcher.find_best(fragment_text, &pool) {
                    MatchOutcome::Matched(sentence) => {
                        let source_text = translation_info.as_ref().and_then(|info| {
                            translate::resolve_source_sentence(&sentence, info, &self.config)
                        });
                        Clause {
                            severity,
                            text: sentence,
                            classifier_text: fragment_text.to_string(),
                            source_text,
                            reason: fragment.reason.clone(),
                            match_failed: false,
                        }
                    }
                    MatchOutcome::Unmatched => {
                        log::debug!(
                            "no pool sentence for {} fragment: {:?}…",
                            severity,
                            fragment_text.chars().take(40).collect::<String>()
                        );
                        Clause {
                            severity,
                            text: fragment_text.to_string(),
                            classifier_text: fragment_text.to_string(),
                            source_text: None,
                            reason: fragment.reason.clone(),
                            match_failed: true,
                        }
                    }
                };
                result.severity_explanations.insert(
                    clause.text.clone(),
                    SeverityExplanation {
                        severity,
                        reason: clause.reason.clone(),
                    },
                );
                result.tier_mut(severity).push(clause);
            }
        }

        result.translation_info = translation_info;
        log::debug!("run stage RECONCILED: {} clauses", result.clause_count());
        Ok(result)
    }

    /// Call the classifier; on call failure or malformed output, fall
    /// back to deterministic keyword classification.
    fn classify_with_fallback(&self, text: &str, pool: &[String]) -> ClassifiedFragments {
        match self.classifier.classify(text) {
            Ok(raw) => match parse_classifier_response(&raw) {
                Ok(fragments) => fragments,
                Err(failure) => {
                    log::warn!("{}; using keyword fallback", failure.message);
                    fallback_classification(pool, &self.config)
                }
            },
            Err(e) => {
                log::warn!("classifier call failed ({}); using keyword fallback", e);
                fallback_classification(pool, &self.config)
            }
        }
    }
}

/// Per-run highlighting context.
pub struct Highlighter<'a, R: Renderer> {
    config: &'a AnalyzerConfig,
    renderer: &'a R,
}

impl<'a, R: Renderer> Highlighter<'a, R> {
    /// Create a highlighter for one pass.
    pub fn new(config: &'a AnalyzerConfig, renderer: &'a R) -> Self {
        Self { config, renderer }
    }

    /// Locate every reconciled clause in the rendered document, annotate
    /// it with its severity color, and save to `output`.
    ///
    /// Fatal only for unsupported input. Everything else degrades: a
    /// document that cannot be opened or saved leaves a plain copy of
    /// the original at `output`, clauses that cannot be located are
    /// counted as missed, and the returned statistics always satisfy
    /// `found ≤ expected` per tier.
    pub fn reconcile_and_highlight(
        &self,
        file: &Path,
        analysis: &AnalysisResult,
        output: &Path,
    ) -> Result<HighlightStatistics> {
        ensure_supported(file)?;

        let mut stats = HighlightStatistics::default();
        let aggressive = analysis.original_language == Language::Kannada;
        if aggressive {
            log::info!("non-default script: using original-language text for highlighting");
        }

        let mut doc = match self.renderer.open(file) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("could not open document for highlighting: {}", e);
                self.copy_through(file, output);
                return Ok(stats);
            }
        };

        let locator = HighlightLocator::new(self.config);
        for severity in Severity::all() {
            let clauses = analysis.tier(severity);
            stats.tier_mut(severity).expected = clauses.len();
            log::debug!("run stage LOCATED: {} {} clauses", clauses.len(), severity);

            for clause in clauses {
                // A translated document is highlighted in its original
                // script; the English text exists only in the analysis.
                let target = if aggressive {
                    clause.source_text.as_deref().unwrap_or(&clause.text)
                } else {
                    clause.text.as_str()
                };
                let target = target.trim();

                if clause.match_failed || target.is_empty() {
                    stats.tier_mut(severity).missed.push(preview(target));
                    continue;
                }

                match locator.locate(&doc, target, aggressive) {
                    Some((page, boxes)) => {
                        for bbox in boxes {
                            if let Err(e) =
                                doc.add_highlight(page, bbox, severity_color(severity))
                            {
                                log::warn!("highlight annotation failed: {}", e);
                            }
                        }
                        stats.tier_mut(severity).found += 1;
                    }
                    None => {
                        log::debug!("could not locate {} clause in document", severity);
                        stats.tier_mut(severity).missed.push(preview(target));
                    }
                }
            }
        }

        for severity in Severity::all() {
            let tier = stats.tier(severity);
            log::info!(
                "{} severity: {}/{} highlighted",
                severity,
                tier.found,
                tier.expected
            );
        }

        if let Err(e) = doc.save(output) {
            log::warn!("could not save highlighted document: {}", e);
            drop(doc);
            self.copy_through(file, output);
        }
        log::debug!("run stage REPORTED");
        Ok(stats)
    }

    /// Last-resort fallback: leave an unannotated copy of the original at
    /// the output path so the caller never sees a half-written file.
    fn copy_through(&self, file: &Path, output: &Path) {
        match std::fs::copy(file, output) {
            Ok(_) => log::info!("wrote unannotated copy of the original"),
            Err(e) => log::warn!("could not copy original to output: {}", e),
        }
    }
}

fn preview(text: &str) -> String {
    text.chars().take(100).collect()
}
