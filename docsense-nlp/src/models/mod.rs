//! Model capability interfaces.
//!
//! Every signal source the analysis depends on sits behind a trait here so the
//! engines never know which concrete model produced a score:
//!
//! - [`PolarityScorer`]: local scalar scorers returning polarity plus a
//!   confidence or subjectivity value ([`LexicalPolarityScorer`],
//!   [`ValenceScorer`])
//! - [`SentimentClassifier`]: neural label classifier ([`RemoteSentimentClassifier`])
//! - [`Embedder`]: sentence embeddings for readability ([`RemoteEmbedder`])
//! - [`Summarizer`]: abstractive summaries ([`RemoteSummarizer`])
//!
//! The emotion classifier trait lives in [`crate::emotion`] next to the
//! category enum it reports on.

mod lexical;
mod remote;
mod valence;

pub use lexical::LexicalPolarityScorer;
pub use remote::{
    RemoteEmbedder, RemoteEmotionClassifier, RemoteSentimentClassifier, RemoteSummarizer,
};
pub use valence::ValenceScorer;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

use docsense_common::util::truncate_chars;

/// Default chunk size for model input, in characters.
pub const DEFAULT_CHUNK_CHARS: usize = 400;

static SENTENCE_TERMINATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

// ============================================================================
// Errors
// ============================================================================

/// Failure of a single model call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// Model not configured, not loaded or not reachable
    #[error("model unavailable: {0}")]
    Unavailable(String),

    /// The call reached the model but inference failed
    #[error("inference failed: {0}")]
    Inference(String),
}

// ============================================================================
// Scores
// ============================================================================

/// Output of one scalar scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorerResult {
    /// Polarity in [-1, 1]
    pub polarity: f64,
    /// Model confidence or subjectivity in [0, 1]
    pub confidence: f64,
}

impl ScorerResult {
    pub fn new(polarity: f64, confidence: f64) -> Self {
        Self {
            polarity: clamp_finite(polarity, -1.0, 1.0),
            confidence: clamp_finite(confidence, 0.0, 1.0),
        }
    }
}

fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        0.0
    }
}

/// Label and score returned by a neural sentiment classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOutput {
    /// Predicted label, e.g. "POSITIVE" or "NEGATIVE"
    pub label: String,
    /// Probability of the predicted label
    pub score: f64,
}

impl ClassifierOutput {
    /// Signed polarity: negative labels flip the score.
    pub fn signed_score(&self) -> f64 {
        let label = self.label.to_ascii_uppercase();
        if label.starts_with("NEG") || label == "LABEL_0" {
            -self.score
        } else if label.starts_with("NEU") {
            0.0
        } else {
            self.score
        }
    }

    /// As a scorer result: signed score with the raw score as confidence.
    pub fn to_scorer_result(&self) -> ScorerResult {
        ScorerResult::new(self.signed_score(), self.score)
    }
}

// ============================================================================
// Capability traits
// ============================================================================

/// Local scalar polarity scorer.
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<ScorerResult, ModelError>;

    fn name(&self) -> &str;
}

/// Neural sentiment classifier.
pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<ClassifierOutput, ModelError>;

    fn name(&self) -> &str;
}

/// Sentence embedding model.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError>;

    fn name(&self) -> &str;
}

/// Abstractive summarization model.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str) -> Result<String, ModelError>;

    fn name(&self) -> &str;
}

// ============================================================================
// Availability
// ============================================================================

/// Availability of one component in a single analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    /// Ran and contributed
    Available,
    /// Ran but some calls failed; partial contribution
    Degraded,
    /// Not configured or every call failed; defaults reported
    Unavailable,
}

impl ComponentStatus {
    /// Status from the number of successful calls out of those attempted.
    pub fn from_counts(succeeded: usize, attempted: usize) -> Self {
        if attempted == 0 || succeeded == 0 {
            Self::Unavailable
        } else if succeeded < attempted {
            Self::Degraded
        } else {
            Self::Available
        }
    }
}

// ============================================================================
// Chunking
// ============================================================================

/// Run a model call over every chunk, optionally on the rayon pool.
///
/// Results keep chunk order regardless of completion order.
pub fn map_chunks<T, F>(chunks: &[String], parallel: bool, call: F) -> Vec<Result<T, ModelError>>
where
    T: Send,
    F: Fn(&str) -> Result<T, ModelError> + Sync,
{
    if parallel && chunks.len() > 1 {
        use rayon::prelude::*;
        chunks.par_iter().map(|c| call(c)).collect()
    } else {
        chunks.iter().map(|c| call(c)).collect()
    }
}

/// Split text into sentence-aligned chunks of at most `max_chars` characters.
///
/// Sentences are packed greedily; a single sentence longer than the limit
/// becomes its own chunk. Text with no usable sentence falls back to its
/// first `max_chars` characters.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in SENTENCE_TERMINATORS.split(text) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        let joined_len = current.chars().count() + 1 + sentence.chars().count();
        if joined_len <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(sentence);
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current = sentence.to_string();
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    if chunks.is_empty() {
        chunks.push(truncate_chars(text, max_chars).to_string());
    }
    chunks
}
