//! Source-language detection.
//!
//! Classification prompts are authored in English, so anything else has
//! to go through the translation aligner first. Detection is by script:
//! a document whose text is more than 10% Kannada-block codepoints is
//! treated as Kannada.

use serde::{Deserialize, Serialize};

/// Unicode block for the Kannada script.
pub const KANNADA_BLOCK: std::ops::RangeInclusive<char> = '\u{0C80}'..='\u{0CFF}';

/// Fraction of Kannada codepoints above which a document counts as Kannada.
const KANNADA_RATIO: f64 = 0.1;

/// Detected document language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// The default language; analysis runs on the text as-is.
    #[default]
    English,
    /// Requires translation alignment before classification.
    Kannada,
}

impl Language {
    /// Whether this is the language classification prompts are written in.
    pub fn is_default(&self) -> bool {
        matches!(self, Language::English)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "english"),
            Language::Kannada => write!(f, "kannada"),
        }
    }
}

/// Count codepoints inside the Kannada block.
pub fn kannada_char_count(text: &str) -> usize {
    text.chars().filter(|c| KANNADA_BLOCK.contains(c)).count()
}

/// Detect the document language from its extracted text.
pub fn detect(text: &str) -> Language {
    let total = text.chars().count();
    if total == 0 {
        return Language::English;
    }
    let kannada = kannada_char_count(text);
    if kannada as f64 > total as f64 * KANNADA_RATIO {
        Language::Kannada
    } else {
        Language::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_english() {
        assert_eq!(detect("The tenant shall pay rent monthly."), Language::English);
    }

    #[test]
    fn test_detect_empty_is_default() {
        assert_eq!(detect(""), Language::English);
    }

    #[test]
    fn test_detect_kannada() {
        // ಬಾಡಿಗೆದಾರನು ಬಾಡಿಗೆ ಪಾವತಿಸಬೇಕು
        let text = "\u{0CAC}\u{0CBE}\u{0CA1}\u{0CBF}\u{0C97}\u{0CC6}\u{0CA6}\u{0CBE}\u{0CB0}\u{0CA8}\u{0CC1} \u{0CAC}\u{0CBE}\u{0CA1}\u{0CBF}\u{0C97}\u{0CC6} \u{0CAA}\u{0CBE}\u{0CB5}\u{0CA4}\u{0CBF}";
        assert_eq!(detect(text), Language::Kannada);
    }

    #[test]
    fn test_detect_mixed_below_ratio_is_english() {
        // A single Kannada word in a long English document stays English.
        let text = format!("{} \u{0CAC}\u{0CBE}\u{0CA1}\u{0CBF}", "lease terms apply ".repeat(20));
        assert_eq!(detect(&text), Language::English);
    }

    #[test]
    fn test_language_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Language::Kannada).unwrap(), "\"kannada\"");
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"english\"");
    }

    #[test]
    fn test_is_default() {
        assert!(Language::English.is_default());
        assert!(!Language::Kannada.is_default());
    }
}
