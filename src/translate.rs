//! Sentence-aligned translation for non-English documents.
//!
//! Classification prompts are written in English, so a Kannada lease is
//! translated first, sentence by sentence in small numbered batches, so
//! that every translated sentence can be walked back to the original one
//! when it is time to highlight the source PDF. The numbered-list protocol
//! is positional: response line *i* of a batch pairs with request sentence
//! *i*. A response with a different line count than the request silently
//! produces a shorter mapping for that batch; that misalignment is a known
//! defect of the protocol and is surfaced in `truncated_batches` rather
//! than guessed at.

use crate::config::AnalyzerConfig;
use crate::error::{CallError, Error, Result};
use crate::matcher::FuzzyMatcher;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref SENTENCE_TERMINATORS: Regex = Regex::new(r"[।.\n]+").expect("valid regex");
    static ref LIST_NUMBER: Regex = Regex::new(r"^\d+\.\s*").expect("valid regex");
}

/// External sentence-batch translator.
///
/// Implementations receive one batch of source-language sentences and
/// return the raw model response: a numbered list, one translation per
/// line. The pipeline builds the numbered request block itself (see
/// [`numbered_block`]) and parses the response positionally; the
/// implementation only has to carry the text to the model and back.
pub trait Translator {
    /// Translate one batch of sentences, returning the raw numbered
    /// response text.
    fn translate_batch(&self, sentences: &[String]) -> std::result::Result<String, CallError>;
}

/// Sentence-aligned translation of one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationInfo {
    /// All translated sentences joined with newlines, in source order.
    /// This becomes the analysis input in place of the original text.
    pub translated_text: String,
    /// Source sentence → translated sentence.
    pub forward: IndexMap<String, String>,
    /// Translated sentence → source sentence. Near-duplicate translations
    /// collide here; last write wins.
    pub reverse: IndexMap<String, String>,
    /// Source sentences in document order, as sent for translation.
    pub source_sentences: Vec<String>,
    /// Batches whose response line count did not cover the request.
    pub truncated_batches: usize,
}

/// Split source text into translatable sentences.
///
/// Paragraphs split on blank lines, then sentences on script-appropriate
/// terminators; the danda (`।`) counts the same as `.`. Fragments of
/// `min_translation_chars` characters or fewer are discarded.
pub fn split_source_sentences(text: &str, config: &AnalyzerConfig) -> Vec<String> {
    let mut sentences = Vec::new();
    for paragraph in text.split("\n\n") {
        let para = paragraph.trim();
        if para.is_empty() {
            continue;
        }
        for fragment in SENTENCE_TERMINATORS.split(para) {
            let fragment = fragment.trim();
            if fragment.chars().count() > config.min_translation_chars {
                sentences.push(fragment.to_string());
            }
        }
    }
    sentences
}

/// Render a batch as the numbered request block: `1. …\n2. …`.
pub fn numbered_block(batch: &[String]) -> String {
    batch
        .iter()
        .enumerate()
        .map(|(i, sentence)| format!("{}. {}", i + 1, sentence))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Translate `text` sentence-by-sentence and build the alignment table.
///
/// Any translator failure aborts the whole translation: there is no
/// partial result, and no silent fall-through to analyzing the original
/// text in the wrong language.
pub fn align(
    translator: &dyn Translator,
    text: &str,
    config: &AnalyzerConfig,
) -> Result<TranslationInfo> {
    let source_sentences = split_source_sentences(text, config);
    log::info!("translating {} source sentences", source_sentences.len());

    let mut info = TranslationInfo {
        source_sentences: source_sentences.clone(),
        ..Default::default()
    };
    let mut translated_sentences: Vec<String> = Vec::new();

    for batch in source_sentences.chunks(config.translation_batch_size.max(1)) {
        let response = translator
            .translate_batch(batch)
            .map_err(Error::Translation)?;

        let mut paired = 0usize;
        for (i, line) in response.lines().enumerate() {
            let translation = LIST_NUMBER.replace(line.trim(), "").trim().to_string();
            // An empty line still consumes its index: the pairing is
            // positional, not content-based.
            if !translation.is_empty() && i < batch.len() {
                let source = batch[i].clone();
                info.forward.insert(source.clone(), translation.clone());
                info.reverse.insert(translation.clone(), source);
                translated_sentences.push(translation);
                paired += 1;
            }
        }

        if paired < batch.len() {
            log::warn!(
                "translation batch returned {} of {} lines; mapping truncated",
                paired,
                batch.len()
            );
            info.truncated_batches += 1;
        }
    }

    info.translated_text = translated_sentences.join("\n");
    log::info!("translation produced {} sentence pairs", info.forward.len());
    Ok(info)
}

/// Resolve the original-language sentence behind a translated one.
///
/// Runs the standard matching cascade over the reverse-map keys at the
/// sentence-level threshold, then returns the mapped source sentence.
pub fn resolve_source_sentence(
    english_sentence: &str,
    info: &TranslationInfo,
    config: &AnalyzerConfig,
) -> Option<String> {
    let keys: Vec<String> = info.reverse.keys().cloned().collect();
    let matcher = FuzzyMatcher::new(config);
    matcher
        .find_best_with_threshold(english_sentence, &keys, config.sentence_match_threshold)
        .into_matched()
        .and_then(|key| info.reverse.get(&key).cloned())
}
