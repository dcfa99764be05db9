//! # Lease Lens
//!
//! Lease-agreement clause analysis: reconcile LLM severity classifications
//! with the source document and locate each clause in rendered page
//! geometry for highlighting.
//!
//! The pipeline reconciles three imperfectly-aligned representations of
//! the same document:
//!
//! - the fragments an external classifier returns (paraphrase-prone),
//! - the sentence pool extracted from the document text,
//! - the text a renderer can actually find on each page.
//!
//! For non-English documents (currently Kannada) a fourth representation
//! joins in: the sentence-aligned translation table, so highlights land
//! on the original-language text.
//!
//! ## Core Flow
//!
//! ```text
//! document text
//!     ↓
//! [sentences]  candidate sentence pool
//!     ↓
//! [translate]  optional sentence-aligned translation
//!     ↓
//! [classify]   external classifier + strict parse + keyword fallback
//!     ↓
//! [matcher]    fragment → pool sentence reconciliation
//!     ↓
//! [locate]     pool sentence → page bounding boxes
//!     ↓
//! highlighted document + statistics
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use lease_lens::classify::Classifier;
//! use lease_lens::config::AnalyzerConfig;
//! use lease_lens::error::CallError;
//! use lease_lens::pipeline::Analyzer;
//!
//! struct MyClassifier;
//!
//! impl Classifier for MyClassifier {
//!     fn classify(&self, text: &str) -> Result<String, CallError> {
//!         // call your model of choice here
//!         Ok(r#"{"high_severity": [], "medium_severity": [], "low_severity": []}"#.into())
//!     }
//! }
//!
//! # fn main() -> lease_lens::error::Result<()> {
//! let analyzer = Analyzer::new(AnalyzerConfig::default(), &MyClassifier);
//! let result = analyzer.analyze("Tenant shall pay rent by the 5th of each month.")?;
//! println!("{} clauses classified", result.clause_count());
//! # Ok(())
//! # }
//! ```
//!
//! Everything external (text extraction, the classifier and translator
//! calls, rendering) enters through traits; the crate never performs
//! network or container I/O itself.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry and page layout
pub mod geometry;
pub mod layout;

// Text processing
pub mod language;
pub mod normalize;
pub mod sentences;

// Matching and locating
pub mod locate;
pub mod matcher;

// External collaborator boundaries
pub mod classify;
pub mod extract;
pub mod render;
pub mod translate;

// Results and orchestration
pub mod pipeline;
pub mod report;

pub use classify::{ClassifiedFragments, Classifier, Severity};
pub use config::AnalyzerConfig;
pub use error::{CallError, Error, Result};
pub use language::Language;
pub use matcher::{FuzzyMatcher, MatchOutcome};
pub use pipeline::{Analyzer, Highlighter};
pub use report::{AnalysisResult, Clause, HighlightStatistics};
pub use translate::{TranslationInfo, Translator};
