//! Readability prediction.
//!
//! Two signals feed one 0-100 difficulty scale: the spread of sentence
//! embeddings from an optional [`Embedder`], and classic readability
//! formulas computed from the annotated document (optionally overridden by
//! caller-supplied scores). When both are present they are blended 60/40 in
//! favour of the embedding signal.

use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use std::sync::Arc;

use docsense_common::util::round_to;

use crate::document::AnnotatedDocument;
use crate::language::count_syllables;
use crate::models::{chunk_text, map_chunks, ComponentStatus, Embedder};

pub const FLESCH_READING_EASE: &str = "flesch_reading_ease";
pub const FLESCH_KINCAID_GRADE: &str = "flesch_kincaid_grade";
pub const SMOG_INDEX: &str = "smog_index";
pub const AUTOMATED_READABILITY_INDEX: &str = "automated_readability_index";
pub const COLEMAN_LIAU_INDEX: &str = "coleman_liau_index";
pub const DALE_CHALL_SCORE: &str = "dale_chall_readability_score";
pub const GUNNING_FOG: &str = "gunning_fog";

/// Formulas reporting a US school grade.
const GRADE_LEVEL_SCORES: &[&str] = &[
    FLESCH_KINCAID_GRADE,
    SMOG_INDEX,
    AUTOMATED_READABILITY_INDEX,
    COLEMAN_LIAU_INDEX,
    GUNNING_FOG,
];
const MAX_GRADE: f64 = 16.0;
const MAX_DALE_CHALL: f64 = 10.0;

/// Embedding standard deviations mapped to 0 and 100.
const MIN_EMBEDDING_STD: f64 = 0.03;
const MAX_EMBEDDING_STD: f64 = 0.08;

const FALLBACK_SCORE: f64 = 50.0;

// ============================================================================
// Traditional formulas
// ============================================================================

/// Surface counts the formulas are built from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextCounts {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
    /// Words of three or more syllables
    pub polysyllables: usize,
    pub letters: usize,
}

impl TextCounts {
    pub fn from_document(doc: &AnnotatedDocument) -> Self {
        let mut counts = Self {
            sentences: doc.sentence_texts().len(),
            ..Self::default()
        };
        for token in doc.tokens.iter().filter(|t| t.is_alpha) {
            let syllables = count_syllables(&token.text);
            counts.words += 1;
            counts.syllables += syllables;
            counts.letters += token.text.chars().filter(|c| c.is_alphabetic()).count();
            if syllables >= 3 {
                counts.polysyllables += 1;
            }
        }
        counts
    }
}

/// Flesch, Flesch-Kincaid, SMOG, ARI and Coleman-Liau scores keyed by name.
///
/// Empty when the document has no words or sentences.
pub fn traditional_scores(counts: &TextCounts) -> BTreeMap<String, f64> {
    let mut scores = BTreeMap::new();
    if counts.words == 0 || counts.sentences == 0 {
        return scores;
    }

    let words = counts.words as f64;
    let sentences = counts.sentences as f64;
    let words_per_sentence = words / sentences;
    let syllables_per_word = counts.syllables as f64 / words;
    let letters_per_word = counts.letters as f64 / words;

    let fre = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    let fk = 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59;
    let smog = 1.0430 * (counts.polysyllables as f64 * 30.0 / sentences).sqrt() + 3.1291;
    let ari = 4.71 * letters_per_word + 0.5 * words_per_sentence - 21.43;
    let cli = 0.0588 * (letters_per_word * 100.0) - 0.296 * (sentences / words * 100.0) - 15.8;

    for (name, value) in [
        (FLESCH_READING_EASE, fre),
        (FLESCH_KINCAID_GRADE, fk),
        (SMOG_INDEX, smog),
        (AUTOMATED_READABILITY_INDEX, ari),
        (COLEMAN_LIAU_INDEX, cli),
    ] {
        scores.insert(name.to_string(), round_to(value, 2));
    }
    scores
}

/// A named score on the 0-100 difficulty scale, if the name is known.
pub fn normalized_difficulty(name: &str, value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let difficulty = if name == FLESCH_READING_EASE {
        100.0 - value
    } else if name == DALE_CHALL_SCORE {
        value / MAX_DALE_CHALL * 100.0
    } else if GRADE_LEVEL_SCORES.contains(&name) {
        value / MAX_GRADE * 100.0
    } else {
        return None;
    };
    Some(difficulty.clamp(0.0, 100.0))
}

/// Mean normalised difficulty over the recognised scores.
pub fn traditional_difficulty(scores: &BTreeMap<String, f64>) -> Option<f64> {
    let normalized: Vec<f64> = scores
        .iter()
        .filter_map(|(name, &value)| normalized_difficulty(name, value))
        .collect();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.mean())
    }
}

// ============================================================================
// Embedding complexity
// ============================================================================

/// Difficulty of one chunk from the spread of its L2-normalised embedding.
fn embedding_difficulty(embedding: &[f32]) -> Option<f64> {
    let values: Vec<f64> = embedding.iter().map(|&v| f64::from(v)).collect();
    let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
    if values.is_empty() || !norm.is_finite() {
        return None;
    }
    let normalized: Vec<f64> = if norm > 0.0 {
        values.iter().map(|v| v / norm).collect()
    } else {
        values
    };
    Some(scale_std(normalized.population_std_dev()))
}

fn scale_std(std: f64) -> f64 {
    ((std - MIN_EMBEDDING_STD) / (MAX_EMBEDDING_STD - MIN_EMBEDDING_STD) * 100.0).clamp(0.0, 100.0)
}

/// Weighted mean with weights spaced evenly from 0.8 to 1.2, so later
/// chunks count more.
fn weighted_chunk_mean(scores: &[f64]) -> Option<f64> {
    match scores.len() {
        0 => None,
        1 => Some(scores[0]),
        n => {
            let weights: Vec<f64> = (0..n)
                .map(|i| 0.8 + 0.4 * i as f64 / (n - 1) as f64)
                .collect();
            let total: f64 = weights.iter().sum();
            Some(scores.iter().zip(&weights).map(|(s, w)| s * w).sum::<f64>() / total)
        }
    }
}

pub fn describe(score: f64) -> &'static str {
    if score < 20.0 {
        "Very easy to read"
    } else if score < 40.0 {
        "Easy to read"
    } else if score < 60.0 {
        "Moderate difficulty"
    } else if score < 80.0 {
        "Difficult to read"
    } else {
        "Very difficult to read"
    }
}

// ============================================================================
// Predictor
// ============================================================================

#[derive(Debug, Clone)]
pub struct ReadabilityConfig {
    /// Chunk size for embedding calls, in characters
    pub max_chunk_chars: usize,
    pub parallel_chunks: bool,
    /// Share of the embedding signal when both signals are present
    pub embedding_weight: f64,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: 2000,
            parallel_chunks: true,
            embedding_weight: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadabilityReport {
    pub difficulty_score: f64,
    pub description: String,
    pub method: String,
    pub chunks_processed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traditional_score: Option<f64>,
    /// Formula scores used, computed or caller-supplied
    pub traditional_scores: BTreeMap<String, f64>,
}

pub struct ReadabilityPredictor {
    embedder: Option<Arc<dyn Embedder>>,
    config: ReadabilityConfig,
}

impl std::fmt::Debug for ReadabilityPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadabilityPredictor")
            .field("embedder", &self.embedder.as_ref().map(|e| e.name().to_string()))
            .field("config", &self.config)
            .finish()
    }
}

impl Default for ReadabilityPredictor {
    fn default() -> Self {
        Self::new(ReadabilityConfig::default())
    }
}

impl ReadabilityPredictor {
    pub fn new(config: ReadabilityConfig) -> Self {
        Self {
            embedder: None,
            config,
        }
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn has_embedder(&self) -> bool {
        self.embedder.is_some()
    }

    /// Predict difficulty. `overrides` replace or extend the computed
    /// formula scores by name.
    pub fn predict(
        &self,
        doc: &AnnotatedDocument,
        overrides: &BTreeMap<String, f64>,
    ) -> (ReadabilityReport, ComponentStatus) {
        if doc.text.trim().is_empty() {
            let report = ReadabilityReport {
                difficulty_score: 0.0,
                description: "Empty text".to_string(),
                method: "Empty".to_string(),
                chunks_processed: 0,
                embedding_score: None,
                traditional_score: None,
                traditional_scores: BTreeMap::new(),
            };
            return (report, ComponentStatus::Unavailable);
        }

        let mut scores = traditional_scores(&TextCounts::from_document(doc));
        for (name, &value) in overrides {
            scores.insert(name.clone(), value);
        }
        let traditional = traditional_difficulty(&scores);

        let (embedding, chunks_processed, status) = match &self.embedder {
            Some(embedder) => self.embedding_score(embedder.as_ref(), &doc.text),
            None => (None, 0, ComponentStatus::Unavailable),
        };

        let embedder_name = self.embedder.as_ref().map(|e| e.name()).unwrap_or_default();
        let (score, description, method) = match (embedding, traditional) {
            (Some(e), Some(t)) => {
                let w = self.config.embedding_weight;
                let score = w * e + (1.0 - w) * t;
                (
                    score,
                    describe(score).to_string(),
                    format!("Hybrid (Transformer ({embedder_name}) + traditional formulas)"),
                )
            }
            (Some(e), None) => (
                e,
                describe(e).to_string(),
                format!("Transformer ({embedder_name})"),
            ),
            (None, Some(t)) => (t, describe(t).to_string(), "Traditional formulas".to_string()),
            (None, None) => (
                FALLBACK_SCORE,
                "Model unavailable".to_string(),
                "Fallback".to_string(),
            ),
        };

        tracing::debug!(
            difficulty = score,
            chunks = chunks_processed,
            method = %method,
            "Readability predicted"
        );

        let report = ReadabilityReport {
            difficulty_score: round_to(score, 2),
            description,
            method,
            chunks_processed,
            embedding_score: embedding.map(|e| round_to(e, 2)),
            traditional_score: traditional.map(|t| round_to(t, 2)),
            traditional_scores: scores,
        };
        (report, status)
    }

    fn embedding_score(
        &self,
        embedder: &dyn Embedder,
        text: &str,
    ) -> (Option<f64>, usize, ComponentStatus) {
        let chunks = chunk_text(text, self.config.max_chunk_chars);
        let results = map_chunks(&chunks, self.config.parallel_chunks, |chunk| {
            embedder.embed(chunk)
        });

        let mut scores = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(embedding) => {
                    if let Some(score) = embedding_difficulty(&embedding) {
                        scores.push(score);
                    }
                }
                Err(e) => {
                    tracing::warn!(model = embedder.name(), error = %e, "Embedding chunk failed")
                }
            }
        }

        let status = ComponentStatus::from_counts(scores.len(), chunks.len());
        (weighted_chunk_mean(&scores), scores.len(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentAnnotator, RuleBasedAnnotator};
    use crate::models::ModelError;

    struct FlatEmbedder;

    impl Embedder for FlatEmbedder {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, ModelError> {
            Ok(vec![0.5; 8])
        }

        fn name(&self) -> &str {
            "flat"
        }
    }

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn embed(&self, _text: &str) -> Result<Vec<f32>, ModelError> {
            Err(ModelError::Unavailable("offline".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn doc(text: &str) -> AnnotatedDocument {
        RuleBasedAnnotator::new().annotate(text).unwrap()
    }

    const SIMPLE: &str = "The cat sat on the mat. The dog ran to the park. We had fun in the sun.";

    #[test]
    fn test_traditional_scores() {
        let counts = TextCounts {
            words: 110,
            sentences: 10,
            syllables: 165,
            polysyllables: 10,
            letters: 495,
        };
        let scores = traditional_scores(&counts);
        assert!((scores[FLESCH_READING_EASE] - 68.77).abs() < 1e-9);
        assert!((scores[FLESCH_KINCAID_GRADE] - 6.4).abs() < 1e-9);
        assert_eq!(scores.len(), 5);
        assert!(traditional_scores(&TextCounts::default()).is_empty());
    }

    #[test]
    fn test_normalized_difficulty() {
        assert_eq!(normalized_difficulty(FLESCH_READING_EASE, 70.0), Some(30.0));
        assert_eq!(normalized_difficulty(FLESCH_READING_EASE, 120.0), Some(0.0));
        assert_eq!(normalized_difficulty(FLESCH_KINCAID_GRADE, 8.0), Some(50.0));
        assert_eq!(normalized_difficulty(DALE_CHALL_SCORE, 12.0), Some(100.0));
        assert_eq!(normalized_difficulty("unknown_metric", 5.0), None);
    }

    #[test]
    fn test_scale_and_weights() {
        assert_eq!(scale_std(0.03), 0.0);
        assert!((scale_std(0.055) - 50.0).abs() < 1e-9);
        assert_eq!(scale_std(0.2), 100.0);
        assert_eq!(weighted_chunk_mean(&[]), None);
        assert_eq!(weighted_chunk_mean(&[40.0]), Some(40.0));
        // weights 0.8 and 1.2
        let mean = weighted_chunk_mean(&[0.0, 100.0]).unwrap();
        assert!((mean - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_traditional_only() {
        let (report, status) =
            ReadabilityPredictor::default().predict(&doc(SIMPLE), &BTreeMap::new());
        assert_eq!(status, ComponentStatus::Unavailable);
        assert_eq!(report.method, "Traditional formulas");
        assert!(report.difficulty_score < 40.0);
        assert_eq!(report.description, describe(report.difficulty_score));
        assert!(report.traditional_scores.contains_key(FLESCH_READING_EASE));
    }

    #[test]
    fn test_hybrid_blend() {
        let predictor = ReadabilityPredictor::default().with_embedder(Arc::new(FlatEmbedder));
        let (report, status) = predictor.predict(&doc(SIMPLE), &BTreeMap::new());
        assert_eq!(status, ComponentStatus::Available);
        assert!(report.method.starts_with("Hybrid"));
        assert_eq!(report.chunks_processed, 1);
        // a flat embedding has no spread
        assert_eq!(report.embedding_score, Some(0.0));
        let traditional = report.traditional_score.unwrap();
        assert!((report.difficulty_score - 0.4 * traditional).abs() < 0.01);
    }

    #[test]
    fn test_overrides_add_and_replace() {
        let overrides = BTreeMap::from([
            (DALE_CHALL_SCORE.to_string(), 10.0),
            (FLESCH_READING_EASE.to_string(), 0.0),
        ]);
        let (base, _) = ReadabilityPredictor::default().predict(&doc(SIMPLE), &BTreeMap::new());
        let (report, _) = ReadabilityPredictor::default().predict(&doc(SIMPLE), &overrides);
        assert_eq!(report.traditional_scores[FLESCH_READING_EASE], 0.0);
        assert!(report.traditional_scores.contains_key(DALE_CHALL_SCORE));
        assert!(report.difficulty_score > base.difficulty_score);
    }

    #[test]
    fn test_failing_embedder_falls_back() {
        let predictor = ReadabilityPredictor::default().with_embedder(Arc::new(FailingEmbedder));
        let (report, status) = predictor.predict(&doc(SIMPLE), &BTreeMap::new());
        assert_eq!(status, ComponentStatus::Unavailable);
        assert_eq!(report.method, "Traditional formulas");
        assert_eq!(report.chunks_processed, 0);
    }

    #[test]
    fn test_empty_and_fallback() {
        let (report, _) = ReadabilityPredictor::default()
            .predict(&AnnotatedDocument::default(), &BTreeMap::new());
        assert_eq!(report.difficulty_score, 0.0);
        assert_eq!(report.description, "Empty text");

        let numbers = doc("2019 2020 2021");
        let (report, _) = ReadabilityPredictor::default().predict(&numbers, &BTreeMap::new());
        assert_eq!(report.difficulty_score, 50.0);
        assert_eq!(report.description, "Model unavailable");
    }

    #[test]
    fn test_description_bands() {
        assert_eq!(describe(10.0), "Very easy to read");
        assert_eq!(describe(20.0), "Easy to read");
        assert_eq!(describe(59.9), "Moderate difficulty");
        assert_eq!(describe(60.0), "Difficult to read");
        assert_eq!(describe(95.0), "Very difficult to read");
    }
}
