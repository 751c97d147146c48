//! Analysis pipeline.
//!
//! Sequences preprocessing, annotation and every analyzer over one text and
//! shapes the combined report. Component failures are absorbed into status
//! flags; only empty, too-short or unannotatable input fails the whole run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use docsense_common::config::{AnalysisConfig, Config, PreprocessingConfig};
use docsense_common::util::{format_duration_ms, round_to, word_count};

use crate::document::{AnnotatedDocument, DocumentAnnotator, RuleBasedAnnotator};
use crate::emotion::{
    EmotionAggregator, EmotionClassifier, EmotionConfig, EmotionInput, EmotionLexicon,
    EmotionProfile, EmotionResult, EmotionSource,
};
use crate::error::{AnalysisError, AnalysisFailure};
use crate::keywords::{KeywordConfig, KeywordExtractor, KeywordReport};
use crate::language::{LanguageAnalyzer, LanguagePatterns};
use crate::models::{
    chunk_text, ComponentStatus, Embedder, RemoteEmbedder, RemoteEmotionClassifier,
    RemoteSentimentClassifier, RemoteSummarizer, SentimentClassifier, Summarizer,
};
use crate::preprocess::{TextPreprocessor, TextQualityReport};
use crate::readability::{ReadabilityConfig, ReadabilityPredictor, ReadabilityReport};
use crate::sentiment::{
    EnsembleConfig, LabelPolicy, ModelScores, OverallSentiment, SentenceSentiment,
    SentimentConfig, SentimentDistribution, SentimentEngine,
};
use crate::summary::{DocumentSummarizer, DocumentSummary, SummaryConfig};
use crate::topics::{TopicConfig, TopicModel, TopicModeler};

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Texts with fewer words after preprocessing are rejected
    pub min_word_count: usize,
    pub preprocessing: PreprocessingConfig,
    pub sentiment: SentimentConfig,
    pub emotion: EmotionConfig,
    pub keywords: KeywordConfig,
    pub topics: TopicConfig,
    pub readability: ReadabilityConfig,
    pub summary: SummaryConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_analysis(&AnalysisConfig::default())
    }
}

impl PipelineConfig {
    pub fn from_analysis(analysis: &AnalysisConfig) -> Self {
        let policy = analysis.label_policy.parse::<LabelPolicy>().unwrap_or_else(|e| {
            tracing::warn!(
                policy = %analysis.label_policy,
                error = %e,
                "Unknown label policy, using default"
            );
            LabelPolicy::default()
        });

        Self {
            min_word_count: analysis.min_word_count,
            preprocessing: analysis.preprocessing.clone(),
            sentiment: SentimentConfig {
                ensemble: EnsembleConfig {
                    policy,
                    factual_dampening: analysis.factual_dampening,
                },
                max_chunk_chars: analysis.max_chunk_chars,
                parallel: analysis.parallel_chunks,
            },
            emotion: EmotionConfig {
                gating: analysis.emotion_gating,
                classifier_threshold: analysis.emotion_threshold,
                parallel_chunks: analysis.parallel_chunks,
            },
            keywords: KeywordConfig::default(),
            topics: TopicConfig::default(),
            readability: ReadabilityConfig {
                parallel_chunks: analysis.parallel_chunks,
                ..ReadabilityConfig::default()
            },
            summary: SummaryConfig {
                parallel_chunks: analysis.parallel_chunks,
                ..SummaryConfig::default()
            },
        }
    }
}

// ============================================================================
// Request / Report
// ============================================================================

/// One text to analyze.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
    /// Caller-supplied formula scores, by formula name
    #[serde(default)]
    pub readability_metrics: BTreeMap<String, f64>,
    /// Opaque upstream metadata echoed back in the report
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentReport {
    pub overall_sentiment: OverallSentiment,
    pub sentiment_distribution: SentimentDistribution,
    pub emotional_tone: EmotionProfile,
    pub emotion_source: EmotionSource,
    pub subjectivity: f64,
    pub factual_score: f64,
    pub description: String,
    pub sentence_details: Vec<SentenceSentiment>,
    pub model_scores: ModelScores,
}

/// Per-component status for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Availability {
    pub annotator: String,
    pub lexical_sentiment: ComponentStatus,
    pub valence_sentiment: ComponentStatus,
    pub neural_sentiment: ComponentStatus,
    pub emotion_classifier: ComponentStatus,
    pub embedder: ComponentStatus,
    pub summarizer: ComponentStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub trace_id: String,
    pub word_count: usize,
    pub sentence_count: usize,
    pub analyzed_at: DateTime<Utc>,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub sentiment_analysis: SentimentReport,
    pub keyword_extraction: KeywordReport,
    pub topic_modeling: TopicModel,
    pub language_patterns: LanguagePatterns,
    pub readability: ReadabilityReport,
    pub summary: DocumentSummary,
    pub preprocessing: TextQualityReport,
    pub availability: Availability,
    pub metadata: ReportMetadata,
}

// ============================================================================
// Pipeline
// ============================================================================

pub struct AnalysisPipeline {
    config: PipelineConfig,
    annotator: Arc<dyn DocumentAnnotator>,
    preprocessor: TextPreprocessor,
    sentiment: SentimentEngine,
    emotions: EmotionAggregator,
    keywords: KeywordExtractor,
    topics: TopicModeler,
    language: LanguageAnalyzer,
    readability: ReadabilityPredictor,
    summarizer: DocumentSummarizer,
}

impl std::fmt::Debug for AnalysisPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisPipeline")
            .field("annotator", &self.annotator.name())
            .field("neural_sentiment", &self.sentiment.has_classifier())
            .field("emotion_classifier", &self.emotions.classifier_name())
            .field("readability", &self.readability)
            .field("summarizer", &self.summarizer)
            .finish()
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl AnalysisPipeline {
    /// Pipeline with the built-in annotator, lexicons and no remote models.
    pub fn new(config: PipelineConfig) -> Self {
        let lexicon = Arc::new(EmotionLexicon::default());
        Self {
            annotator: Arc::new(RuleBasedAnnotator::new()),
            preprocessor: TextPreprocessor::new(config.preprocessing.clone()),
            sentiment: SentimentEngine::new(config.sentiment.clone()),
            emotions: EmotionAggregator::new(lexicon.clone(), config.emotion.clone()),
            keywords: KeywordExtractor::new(config.keywords.clone()),
            topics: TopicModeler::new(config.topics.clone()),
            language: LanguageAnalyzer::new(lexicon),
            readability: ReadabilityPredictor::new(config.readability.clone()),
            summarizer: DocumentSummarizer::new(config.summary.clone()),
            config,
        }
    }

    /// Pipeline from service configuration. Remote models are attached for
    /// every configured endpoint; an endpoint that cannot be set up is
    /// logged and left out.
    ///
    /// Must be called from within a tokio runtime when any model URL is set.
    pub fn from_config(config: &Config) -> Self {
        let mut pipeline = Self::new(PipelineConfig::from_analysis(&config.analysis));
        let timeout = Duration::from_secs(config.models.timeout_secs);

        if let Some(url) = &config.models.sentiment_url {
            match RemoteSentimentClassifier::new(url, timeout) {
                Ok(classifier) => {
                    pipeline = pipeline.with_sentiment_classifier(Arc::new(classifier))
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Neural sentiment model unavailable")
                }
            }
        }
        if let Some(url) = &config.models.emotion_url {
            match RemoteEmotionClassifier::new(url, timeout) {
                Ok(classifier) => pipeline = pipeline.with_emotion_classifier(Arc::new(classifier)),
                Err(e) => tracing::warn!(url = %url, error = %e, "Emotion model unavailable"),
            }
        }
        if let Some(url) = &config.models.embedding_url {
            match RemoteEmbedder::new(url, timeout) {
                Ok(embedder) => pipeline = pipeline.with_embedder(Arc::new(embedder)),
                Err(e) => tracing::warn!(url = %url, error = %e, "Embedding model unavailable"),
            }
        }
        if let Some(url) = &config.models.summarizer_url {
            match RemoteSummarizer::new(url, timeout) {
                Ok(model) => pipeline = pipeline.with_summarizer(Arc::new(model)),
                Err(e) => tracing::warn!(url = %url, error = %e, "Summarization model unavailable"),
            }
        }

        tracing::info!(
            neural_sentiment = pipeline.sentiment.has_classifier(),
            emotion_classifier = pipeline.emotions.classifier_name().is_some(),
            embedder = pipeline.readability.has_embedder(),
            summarizer = pipeline.summarizer.has_model(),
            "Analysis pipeline ready"
        );
        pipeline
    }

    pub fn with_annotator(mut self, annotator: Arc<dyn DocumentAnnotator>) -> Self {
        self.annotator = annotator;
        self
    }

    pub fn with_sentiment_classifier(mut self, classifier: Arc<dyn SentimentClassifier>) -> Self {
        self.sentiment = self.sentiment.with_classifier(classifier);
        self
    }

    pub fn with_emotion_classifier(mut self, classifier: Arc<dyn EmotionClassifier>) -> Self {
        self.emotions = self.emotions.with_classifier(classifier);
        self
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.readability = self.readability.with_embedder(embedder);
        self
    }

    pub fn with_summarizer(mut self, model: Arc<dyn Summarizer>) -> Self {
        self.summarizer = self.summarizer.with_model(model);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full analysis. Blocking; call from a blocking context when
    /// remote models are attached.
    pub fn analyze(
        &self,
        request: &AnalysisRequest,
        trace_id: &str,
    ) -> Result<AnalysisReport, AnalysisFailure> {
        let started = Instant::now();

        let (text, quality) = self.preprocessor.preprocess(&request.text);
        let fail = |error: AnalysisError| {
            AnalysisFailure::new(error, trace_id).with_preprocessing(quality.clone())
        };

        if text.trim().is_empty() {
            return Err(fail(AnalysisError::Empty));
        }
        let words = word_count(&text);
        if words < self.config.min_word_count {
            return Err(fail(AnalysisError::TooShort {
                words,
                minimum: self.config.min_word_count,
            }));
        }

        let doc = self
            .annotator
            .annotate(&text)
            .map_err(|e| fail(AnalysisError::from(e)))?;
        tracing::debug!(
            trace_id = %trace_id,
            tokens = doc.tokens.len(),
            sentences = doc.sentences.len(),
            "Document annotated"
        );

        let sentiment = self.sentiment.analyze(&doc.text, &doc.sentence_texts());
        let emotion = self.analyze_emotions(
            &doc,
            sentiment.ensemble.score,
            sentiment.subjectivity,
            sentiment.factual_score,
        );
        let keywords = self.keywords.extract(&doc);
        let topics = self.topics.model(&doc);
        let language = self.language.analyze(&doc);
        let (readability, embedder_status) =
            self.readability.predict(&doc, &request.readability_metrics);
        let (summary, summarizer_status) = self.summarizer.summarize(&doc);

        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            trace_id = %trace_id,
            words = words,
            sentences = doc.sentences.len(),
            label = ?sentiment.ensemble.label,
            topics = topics.primary_topics.len(),
            duration_ms = duration_ms,
            "Analysis complete in {}",
            format_duration_ms(duration_ms)
        );

        let overall_sentiment = sentiment.overall();
        Ok(AnalysisReport {
            sentiment_analysis: SentimentReport {
                overall_sentiment,
                sentiment_distribution: sentiment.distribution,
                emotional_tone: emotion.profile.rounded(3),
                emotion_source: emotion.source,
                subjectivity: round_to(sentiment.subjectivity, 3),
                factual_score: round_to(sentiment.factual_score, 3),
                description: sentiment.description,
                sentence_details: sentiment.sentences,
                model_scores: sentiment.model_scores,
            },
            keyword_extraction: keywords,
            topic_modeling: topics,
            language_patterns: language,
            readability,
            summary,
            preprocessing: quality,
            availability: Availability {
                annotator: self.annotator.name().to_string(),
                lexical_sentiment: sentiment.status.lexical,
                valence_sentiment: sentiment.status.valence,
                neural_sentiment: sentiment.status.neural,
                emotion_classifier: emotion.classifier_status,
                embedder: embedder_status,
                summarizer: summarizer_status,
            },
            metadata: ReportMetadata {
                trace_id: trace_id.to_string(),
                word_count: words,
                sentence_count: doc.sentences.len(),
                analyzed_at: Utc::now(),
                duration_ms,
                upstream: request.metadata.clone(),
            },
        })
    }

    fn analyze_emotions(
        &self,
        doc: &AnnotatedDocument,
        overall_sentiment: f64,
        subjectivity: f64,
        factual_score: f64,
    ) -> EmotionResult {
        let chunks = if self.emotions.classifier_name().is_some() {
            chunk_text(&doc.text, self.config.sentiment.max_chunk_chars)
        } else {
            Vec::new()
        };

        self.emotions.analyze(EmotionInput {
            tokens: &doc.tokens,
            text: &doc.text,
            chunks: &chunks,
            overall_sentiment,
            subjectivity,
            factual_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::AnnotationError;
    use crate::emotion::Emotion;
    use crate::models::{ClassifierOutput, ModelError};
    use crate::sentiment::SentimentLabel;
    use crate::summary::SummaryMethod;

    const REVIEW: &str = "The new library is wonderful and the staff are friendly. \
        I love the bright reading rooms and the quiet study corners. \
        The collection of books is excellent and the coffee shop is great. \
        Every visit feels like a small holiday and I am always happy to return. \
        The events for children are fun and the garden outside is beautiful. \
        We are delighted with the renovation and grateful to the city.";

    fn pipeline_with_min(min_word_count: usize) -> AnalysisPipeline {
        AnalysisPipeline::new(PipelineConfig {
            min_word_count,
            ..PipelineConfig::default()
        })
    }

    struct PositiveClassifier;

    impl SentimentClassifier for PositiveClassifier {
        fn classify(&self, _text: &str) -> Result<ClassifierOutput, ModelError> {
            Ok(ClassifierOutput {
                label: "POSITIVE".into(),
                score: 0.95,
            })
        }

        fn name(&self) -> &str {
            "stub-positive"
        }
    }

    struct DownClassifier;

    impl EmotionClassifier for DownClassifier {
        fn classify(&self, _text: &str) -> Result<Vec<(Emotion, f64)>, ModelError> {
            Err(ModelError::Unavailable("connection refused".into()))
        }

        fn name(&self) -> &str {
            "stub-down"
        }
    }

    struct HeadlineSummarizer;

    impl Summarizer for HeadlineSummarizer {
        fn summarize(&self, _text: &str) -> Result<String, ModelError> {
            Ok("A well loved library after its renovation.".into())
        }

        fn name(&self) -> &str {
            "stub-headline"
        }
    }

    struct BrokenAnnotator;

    impl DocumentAnnotator for BrokenAnnotator {
        fn annotate(&self, _text: &str) -> Result<AnnotatedDocument, AnnotationError> {
            Err(AnnotationError::Failed("model not loaded".into()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn test_from_analysis_config() {
        let analysis = AnalysisConfig {
            label_policy: "permissive".into(),
            min_word_count: 10,
            ..AnalysisConfig::default()
        };
        let config = PipelineConfig::from_analysis(&analysis);
        assert_eq!(config.min_word_count, 10);
        assert_eq!(config.sentiment.ensemble.policy, LabelPolicy::Permissive);
    }

    #[test]
    fn test_unknown_label_policy_falls_back() {
        let analysis = AnalysisConfig {
            label_policy: "aggressive".into(),
            ..AnalysisConfig::default()
        };
        let config = PipelineConfig::from_analysis(&analysis);
        assert_eq!(config.sentiment.ensemble.policy, LabelPolicy::default());
    }

    #[test]
    fn test_too_short() {
        let err = pipeline_with_min(50)
            .analyze(&AnalysisRequest::new("Far too short to analyze."), "t-1")
            .unwrap_err();
        assert!(matches!(err.error, AnalysisError::TooShort { words: 5, minimum: 50 }));
        assert_eq!(err.trace_id, "t-1");
        assert!(err.preprocessing.is_some());
    }

    #[test]
    fn test_empty_after_preprocessing() {
        let err = pipeline_with_min(1)
            .analyze(&AnalysisRequest::new("   https://example.com   "), "t-2")
            .unwrap_err();
        assert!(matches!(err.error, AnalysisError::Empty));
    }

    #[test]
    fn test_annotation_failure() {
        let pipeline = pipeline_with_min(1).with_annotator(Arc::new(BrokenAnnotator));
        let err = pipeline.analyze(&AnalysisRequest::new(REVIEW), "t-3").unwrap_err();
        assert!(matches!(err.error, AnalysisError::Annotation(ref m) if m == "model not loaded"));
    }

    #[test]
    fn test_full_report() {
        let report = pipeline_with_min(50)
            .analyze(&AnalysisRequest::new(REVIEW), "t-4")
            .unwrap();

        let sentiment = &report.sentiment_analysis;
        assert_eq!(sentiment.overall_sentiment.label, SentimentLabel::Positive);
        assert_eq!(sentiment.sentiment_distribution.total(), report.metadata.sentence_count);
        assert_eq!(report.metadata.sentence_count, 6);
        assert!(!report.keyword_extraction.keywords.is_empty());
        assert!(report.readability.difficulty_score >= 0.0);
        assert_eq!(report.readability.method, "Traditional formulas");
        assert_eq!(report.availability.annotator, "rule-based");
        assert_eq!(report.availability.neural_sentiment, ComponentStatus::Unavailable);
        assert_eq!(report.availability.embedder, ComponentStatus::Unavailable);
        assert_eq!(report.availability.summarizer, ComponentStatus::Unavailable);
        assert_eq!(report.summary.method, SummaryMethod::Extractive);
        assert_eq!(report.summary.original_word_count, report.metadata.word_count);
        assert_eq!(report.metadata.trace_id, "t-4");
    }

    #[test]
    fn test_attached_models_report_status() {
        let pipeline = pipeline_with_min(50)
            .with_sentiment_classifier(Arc::new(PositiveClassifier))
            .with_emotion_classifier(Arc::new(DownClassifier));
        let report = pipeline.analyze(&AnalysisRequest::new(REVIEW), "t-5").unwrap();

        assert_eq!(report.availability.neural_sentiment, ComponentStatus::Available);
        assert_eq!(report.availability.emotion_classifier, ComponentStatus::Unavailable);
        assert_eq!(report.sentiment_analysis.emotion_source, EmotionSource::Lexicon);
        assert!(report.sentiment_analysis.model_scores.neural.is_some());
    }

    #[test]
    fn test_readability_overrides_and_metadata_pass_through() {
        let mut request = AnalysisRequest::new(REVIEW);
        request.readability_metrics.insert("gunning_fog".into(), 12.0);
        request.metadata = Some(serde_json::json!({"source": "upload"}));

        let report = pipeline_with_min(50).analyze(&request, "t-6").unwrap();
        assert_eq!(report.readability.traditional_scores.get("gunning_fog"), Some(&12.0));
        assert_eq!(report.metadata.upstream, Some(serde_json::json!({"source": "upload"})));
    }

    #[test]
    fn test_attached_summarizer() {
        let pipeline = pipeline_with_min(50).with_summarizer(Arc::new(HeadlineSummarizer));
        let report = pipeline.analyze(&AnalysisRequest::new(REVIEW), "t-7").unwrap();

        assert_eq!(report.availability.summarizer, ComponentStatus::Available);
        assert_eq!(report.summary.method, SummaryMethod::Abstractive);
        assert_eq!(report.summary.summary, "A well loved library after its renovation.");
        assert_eq!(report.summary.summary_word_count, 7);
        assert!(report.summary.compression_ratio > 0.0 && report.summary.compression_ratio < 0.2);
    }
}
