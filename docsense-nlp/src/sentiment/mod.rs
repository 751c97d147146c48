//! Sentiment ensemble.
//!
//! Up to three independent scorers (lexical polarity, rule-based valence and
//! an optional neural classifier) are combined with fixed slot weights into
//! one calibrated score. Agreement between the scorers drives confidence,
//! factual text is dampened, and a [`LabelPolicy`] turns the score into a
//! label. The same logic runs per sentence for the distribution.

mod engine;
mod ensemble;
mod factual;

pub use engine::{
    mean_result, LabelShare, ModelScores, OverallSentiment, SentenceSentiment, SentimentAnalysis,
    SentimentConfig, SentimentDistribution, SentimentEngine, SentimentStatus,
};
pub use ensemble::{
    display_percentage, model_agreement, EnsembleConfig, EnsembleInput, EnsembleScore,
    LabelPolicy, SentimentLabel,
};
pub use factual::{FactualContentDetector, FactualLexicon};
