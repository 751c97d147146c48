//! Document and sentence sentiment.

use serde::Serialize;
use statrs::statistics::Statistics;
use std::sync::Arc;

use docsense_common::util::{
    percentage, round_to, truncate_chars, truncate_with_ellipsis, word_count,
};

use super::ensemble::{EnsembleConfig, EnsembleInput, EnsembleScore, SentimentLabel};
use super::factual::FactualContentDetector;
use crate::models::{
    chunk_text, map_chunks, ComponentStatus, LexicalPolarityScorer, PolarityScorer, ScorerResult,
    SentimentClassifier, ValenceScorer, DEFAULT_CHUNK_CHARS,
};

/// Sentences shorter than this are neutral without scoring.
const MIN_SENTENCE_WORDS: usize = 4;
/// Characters of sentence text kept in the details.
const SENTENCE_PREVIEW_CHARS: usize = 100;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct SentimentConfig {
    pub ensemble: EnsembleConfig,
    /// Character budget per neural chunk
    pub max_chunk_chars: usize,
    /// Score chunks and sentences on the rayon pool
    pub parallel: bool,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            ensemble: EnsembleConfig::default(),
            max_chunk_chars: DEFAULT_CHUNK_CHARS,
            parallel: true,
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// Share of sentences carrying one label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LabelShare {
    pub percentage: f64,
    pub sentences: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentDistribution {
    pub positive: LabelShare,
    pub neutral: LabelShare,
    pub negative: LabelShare,
}

impl SentimentDistribution {
    pub fn from_labels(labels: &[SentimentLabel]) -> Self {
        let total = labels.len();
        let share = |label: SentimentLabel| {
            let count = labels.iter().filter(|l| **l == label).count();
            LabelShare {
                percentage: round_to(percentage(count, total), 1),
                sentences: count,
            }
        };
        Self {
            positive: share(SentimentLabel::Positive),
            neutral: share(SentimentLabel::Neutral),
            negative: share(SentimentLabel::Negative),
        }
    }

    pub fn total(&self) -> usize {
        self.positive.sentences + self.neutral.sentences + self.negative.sentences
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceSentiment {
    /// Sentence text, shortened for display
    pub sentence: String,
    pub sentiment: SentimentLabel,
    pub score: f64,
    pub confidence: f64,
}

/// Raw output of each scorer on the whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ModelScores {
    pub lexical: Option<f64>,
    pub subjectivity: Option<f64>,
    pub valence: Option<f64>,
    pub neural: Option<f64>,
    pub neural_confidence: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentStatus {
    pub lexical: ComponentStatus,
    pub valence: ComponentStatus,
    pub neural: ComponentStatus,
}

/// Overall sentiment rounded for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallSentiment {
    pub score: f64,
    pub label: SentimentLabel,
    pub percentage: f64,
    pub confidence: f64,
}

/// Full sentiment analysis of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentAnalysis {
    /// Unrounded ensemble output
    pub ensemble: EnsembleScore,
    pub subjectivity: f64,
    pub factual_score: f64,
    pub model_scores: ModelScores,
    pub distribution: SentimentDistribution,
    pub sentences: Vec<SentenceSentiment>,
    pub description: String,
    pub status: SentimentStatus,
}

impl SentimentAnalysis {
    pub fn overall(&self) -> OverallSentiment {
        OverallSentiment {
            score: round_to(self.ensemble.score, 3),
            label: self.ensemble.label,
            percentage: round_to(self.ensemble.percentage, 1),
            confidence: round_to(self.ensemble.confidence, 3),
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Runs every scorer over a document and its sentences and combines them.
#[derive(Clone)]
pub struct SentimentEngine {
    lexical: Arc<dyn PolarityScorer>,
    valence: Arc<dyn PolarityScorer>,
    neural: Option<Arc<dyn SentimentClassifier>>,
    factual: FactualContentDetector,
    config: SentimentConfig,
}

impl Default for SentimentEngine {
    fn default() -> Self {
        Self::new(SentimentConfig::default())
    }
}

impl SentimentEngine {
    pub fn new(config: SentimentConfig) -> Self {
        Self {
            lexical: Arc::new(LexicalPolarityScorer::default()),
            valence: Arc::new(ValenceScorer::default()),
            neural: None,
            factual: FactualContentDetector::default(),
            config,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn SentimentClassifier>) -> Self {
        self.neural = Some(classifier);
        self
    }

    pub fn config(&self) -> &SentimentConfig {
        &self.config
    }

    pub fn has_classifier(&self) -> bool {
        self.neural.is_some()
    }

    /// Analyze a document given its text and sentence texts.
    pub fn analyze(&self, text: &str, sentences: &[&str]) -> SentimentAnalysis {
        let factual_score = self.factual.score(text);
        let lexical = run_scorer(self.lexical.as_ref(), text);
        let valence = run_scorer(self.valence.as_ref(), text);
        let (neural, neural_status) = match self.neural.as_deref() {
            Some(classifier) => self.score_chunked(classifier, text),
            None => (None, ComponentStatus::Unavailable),
        };

        let subjectivity = lexical.map_or(0.0, |r| r.confidence);
        let input = EnsembleInput {
            lexical,
            valence,
            neural,
        };
        let ensemble = self.config.ensemble.combine(&input, subjectivity, factual_score);

        let details = self.analyze_sentences(sentences);
        let labels: Vec<SentimentLabel> = details.iter().map(|d| d.sentiment).collect();
        let distribution = SentimentDistribution::from_labels(&labels);

        let model_scores = ModelScores {
            lexical: lexical.map(|r| r.polarity),
            subjectivity: lexical.map(|r| r.confidence),
            valence: valence.map(|r| r.polarity),
            neural: neural.map(|r| r.polarity),
            neural_confidence: neural.map(|r| r.confidence),
        };
        let description = describe(&ensemble, &model_scores, &distribution);

        tracing::debug!(
            score = ensemble.score,
            label = ensemble.label.as_str(),
            confidence = ensemble.confidence,
            models = ensemble.models_used,
            factual = factual_score,
            "Sentiment ensemble computed"
        );

        SentimentAnalysis {
            ensemble,
            subjectivity,
            factual_score,
            model_scores,
            distribution,
            sentences: details,
            description,
            status: SentimentStatus {
                lexical: availability(lexical.is_some()),
                valence: availability(valence.is_some()),
                neural: neural_status,
            },
        }
    }

    fn analyze_sentences(&self, sentences: &[&str]) -> Vec<SentenceSentiment> {
        if self.config.parallel && sentences.len() > 1 {
            use rayon::prelude::*;
            sentences.par_iter().map(|s| self.analyze_sentence(s)).collect()
        } else {
            sentences.iter().map(|s| self.analyze_sentence(s)).collect()
        }
    }

    /// Ensemble sentiment of one sentence.
    pub fn analyze_sentence(&self, sentence: &str) -> SentenceSentiment {
        let preview = truncate_with_ellipsis(sentence.trim(), SENTENCE_PREVIEW_CHARS);
        if word_count(sentence) < MIN_SENTENCE_WORDS {
            return SentenceSentiment {
                sentence: preview,
                sentiment: SentimentLabel::Neutral,
                score: 0.0,
                confidence: 0.0,
            };
        }

        let lexical = run_scorer(self.lexical.as_ref(), sentence);
        let valence = run_scorer(self.valence.as_ref(), sentence);
        let neural = self.neural.as_deref().and_then(|classifier| {
            classifier
                .classify(truncate_chars(sentence, self.config.max_chunk_chars))
                .map_err(|e| {
                    tracing::trace!(
                        classifier = classifier.name(),
                        error = %e,
                        "Sentence classification skipped"
                    );
                })
                .ok()
                .map(|out| out.to_scorer_result())
        });

        let subjectivity = lexical.map_or(0.0, |r| r.confidence);
        let input = EnsembleInput {
            lexical,
            valence,
            neural,
        };
        let score = self
            .config
            .ensemble
            .combine(&input, subjectivity, self.factual.score(sentence));

        SentenceSentiment {
            sentence: preview,
            sentiment: score.label,
            score: round_to(score.score, 3),
            confidence: round_to(score.confidence, 3),
        }
    }

    /// Classify sentence-aligned chunks and average the signed results.
    fn score_chunked(
        &self,
        classifier: &dyn SentimentClassifier,
        text: &str,
    ) -> (Option<ScorerResult>, ComponentStatus) {
        let chunks = chunk_text(text, self.config.max_chunk_chars);
        let results = map_chunks(&chunks, self.config.parallel, |c| {
            classifier.classify(c).map(|out| out.to_scorer_result())
        });

        let attempted = results.len();
        let mut scored = Vec::with_capacity(attempted);
        for result in results {
            match result {
                Ok(r) => scored.push(r),
                Err(e) => tracing::warn!(
                    classifier = classifier.name(),
                    error = %e,
                    "Sentiment chunk failed"
                ),
            }
        }
        let status = ComponentStatus::from_counts(scored.len(), attempted);
        tracing::debug!(chunks = attempted, succeeded = scored.len(), "Neural sentiment scored");
        (mean_result(&scored), status)
    }
}

/// Mean polarity and confidence; `None` for no results.
pub fn mean_result(results: &[ScorerResult]) -> Option<ScorerResult> {
    if results.is_empty() {
        return None;
    }
    Some(ScorerResult::new(
        results.iter().map(|r| r.polarity).mean(),
        results.iter().map(|r| r.confidence).mean(),
    ))
}

fn run_scorer(scorer: &dyn PolarityScorer, text: &str) -> Option<ScorerResult> {
    match scorer.score(text) {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::warn!(scorer = scorer.name(), error = %e, "Scorer failed");
            None
        }
    }
}

fn availability(ran: bool) -> ComponentStatus {
    if ran {
        ComponentStatus::Available
    } else {
        ComponentStatus::Unavailable
    }
}

fn describe(
    ensemble: &EnsembleScore,
    scores: &ModelScores,
    distribution: &SentimentDistribution,
) -> String {
    let models: Vec<String> = [
        ("Lexical", scores.lexical),
        ("Valence", scores.valence),
        ("Neural", scores.neural),
    ]
    .into_iter()
    .filter_map(|(name, score)| score.map(|s| format!("{name}: {s:.2}")))
    .collect();
    let models = if models.is_empty() {
        "No scorer available".to_string()
    } else {
        models.join(", ")
    };

    format!(
        "Multi-model sentiment analysis shows {} sentiment (ensemble score: {:.3}). {}. \
         Distribution: {} positive, {} neutral, {} negative sentences.",
        ensemble.label.as_str(),
        ensemble.score,
        models,
        distribution.positive.sentences,
        distribution.neutral.sentences,
        distribution.negative.sentences,
    )
}
