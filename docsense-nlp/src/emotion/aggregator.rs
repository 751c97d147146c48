//! Emotion aggregation.
//!
//! The lexicon pass walks the alphabetic tokens once. Each trigger starts at
//! 1.0, is multiplied by every modifier within two tokens on either side and
//! by -0.5 when a negator appears in the three tokens before it. Category
//! totals are floored at zero and divided by the number of non-stop
//! alphabetic tokens.

use serde::Serialize;
use std::sync::Arc;

use super::{Emotion, EmotionClassifier, EmotionLexicon, EmotionProfile};
use crate::document::AnnotatedToken;
use crate::models::{map_chunks, ComponentStatus};

const MODIFIER_WINDOW: usize = 2;
const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

const GATE_MIN_SENTIMENT: f64 = 0.2;
const GATE_MIN_SUBJECTIVITY: f64 = 0.3;
const GATE_MAX_FACTUAL: f64 = 0.6;
const VALENCE_AGREEMENT_MIN: f64 = 0.3;

/// Emotion aggregation settings.
#[derive(Debug, Clone)]
pub struct EmotionConfig {
    /// Suppress emotions on neutral, objective or factual text
    pub gating: bool,
    /// Minimum averaged classifier score for a category to be kept
    pub classifier_threshold: f64,
    /// Score classifier chunks on the rayon pool
    pub parallel_chunks: bool,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            gating: true,
            classifier_threshold: 0.4,
            parallel_chunks: true,
        }
    }
}

/// Which signal produced the reported profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionSource {
    Lexicon,
    Classifier,
}

/// Everything the aggregator needs from the rest of the analysis.
#[derive(Debug, Clone, Copy)]
pub struct EmotionInput<'a> {
    pub tokens: &'a [AnnotatedToken],
    pub text: &'a str,
    pub chunks: &'a [String],
    pub overall_sentiment: f64,
    pub subjectivity: f64,
    pub factual_score: f64,
}

/// Aggregation outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionResult {
    /// Reported profile after validation and gating
    pub profile: EmotionProfile,
    /// Raw lexicon profile before gating
    pub lexicon_profile: EmotionProfile,
    pub source: EmotionSource,
    /// Whether the gate suppressed the profile
    pub gated: bool,
    pub classifier_status: ComponentStatus,
}

/// Combines the emotion lexicon with an optional classifier.
#[derive(Clone)]
pub struct EmotionAggregator {
    lexicon: Arc<EmotionLexicon>,
    classifier: Option<Arc<dyn EmotionClassifier>>,
    config: EmotionConfig,
}

impl EmotionAggregator {
    pub fn new(lexicon: Arc<EmotionLexicon>, config: EmotionConfig) -> Self {
        Self {
            lexicon,
            classifier: None,
            config,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn EmotionClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn lexicon(&self) -> &EmotionLexicon {
        &self.lexicon
    }

    pub fn classifier_name(&self) -> Option<&str> {
        self.classifier.as_deref().map(|c| c.name())
    }

    /// Lexicon-based profile for a token sequence.
    pub fn aggregate(&self, tokens: &[AnnotatedToken]) -> EmotionProfile {
        // Negation clitics ("n't") are not alphabetic but must stay visible
        let window: Vec<(String, bool)> = tokens
            .iter()
            .filter(|t| t.is_alpha || self.lexicon.is_negator(&t.lemma_lower()))
            .map(|t| (t.lemma_lower(), t.is_stop))
            .collect();
        let content_count = tokens.iter().filter(|t| t.is_alpha && !t.is_stop).count();

        let mut totals = [0.0f64; 6];
        for (i, (lemma, is_stop)) in window.iter().enumerate() {
            if *is_stop {
                continue;
            }
            let emotions: Vec<Emotion> = self.lexicon.emotions_for(lemma).collect();
            if emotions.is_empty() {
                continue;
            }

            let mut score = 1.0;
            let lo = i.saturating_sub(MODIFIER_WINDOW);
            let hi = (i + MODIFIER_WINDOW + 1).min(window.len());
            for j in (lo..hi).filter(|&j| j != i) {
                if let Some(factor) = self.lexicon.modifier(&window[j].0) {
                    score *= factor;
                }
            }
            let negated = window[i.saturating_sub(NEGATION_WINDOW)..i]
                .iter()
                .any(|(l, _)| self.lexicon.is_negator(l));
            if negated {
                score *= NEGATION_FACTOR;
            }

            for emotion in emotions {
                totals[emotion as usize] += score;
            }
        }

        let mut profile = EmotionProfile::default();
        if content_count == 0 {
            return profile;
        }
        for emotion in Emotion::ALL {
            profile.set(emotion, totals[emotion as usize].max(0.0) / content_count as f64);
        }
        profile
    }

    /// Whether the text carries enough subjective signal to report emotions.
    pub fn passes_gate(
        &self,
        overall_sentiment: f64,
        subjectivity: f64,
        factual_score: f64,
    ) -> bool {
        !self.config.gating
            || (overall_sentiment.abs() >= GATE_MIN_SENTIMENT
                && subjectivity >= GATE_MIN_SUBJECTIVITY
                && factual_score < GATE_MAX_FACTUAL)
    }

    /// Apply the gate to a profile.
    pub fn filter(
        &self,
        profile: EmotionProfile,
        overall_sentiment: f64,
        subjectivity: f64,
        factual_score: f64,
    ) -> EmotionProfile {
        if self.passes_gate(overall_sentiment, subjectivity, factual_score) {
            profile
        } else {
            EmotionProfile::default()
        }
    }

    /// Average classifier scores over chunks and keep corroborated categories.
    ///
    /// Returns `None` when no chunk produced a result.
    pub fn classify_validated(
        &self,
        classifier: &dyn EmotionClassifier,
        text: &str,
        chunks: &[String],
        overall_sentiment: f64,
    ) -> (Option<EmotionProfile>, ComponentStatus) {
        let results = map_chunks(chunks, self.config.parallel_chunks, |c| classifier.classify(c));
        let attempted = results.len();

        let mut sums = [0.0f64; 6];
        let mut succeeded = 0usize;
        for result in results {
            match result {
                Ok(scores) => {
                    succeeded += 1;
                    for (emotion, score) in scores {
                        sums[emotion as usize] += score;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        classifier = classifier.name(),
                        error = %e,
                        "Emotion chunk skipped"
                    );
                }
            }
        }
        let status = ComponentStatus::from_counts(succeeded, attempted);
        if succeeded == 0 {
            return (None, status);
        }

        let mut profile = EmotionProfile::default();
        for emotion in Emotion::ALL {
            let score = sums[emotion as usize] / succeeded as f64;
            if score > self.config.classifier_threshold
                && self.is_corroborated(emotion, text, overall_sentiment)
            {
                profile.set(emotion, score);
            }
        }
        (Some(profile), status)
    }

    fn is_corroborated(&self, emotion: Emotion, text: &str, overall_sentiment: f64) -> bool {
        if self.lexicon.occurs_in(text, emotion) {
            return true;
        }
        let agrees = if emotion.is_positive() {
            overall_sentiment > 0.0
        } else {
            overall_sentiment < 0.0
        };
        agrees && overall_sentiment.abs() > VALENCE_AGREEMENT_MIN
    }

    /// Full emotion analysis for one document.
    pub fn analyze(&self, input: EmotionInput<'_>) -> EmotionResult {
        let lexicon_profile = self.aggregate(input.tokens);

        let (classified, classifier_status) = match self.classifier.as_deref() {
            Some(classifier) => self.classify_validated(
                classifier,
                input.text,
                input.chunks,
                input.overall_sentiment,
            ),
            None => (None, ComponentStatus::Unavailable),
        };

        let (profile, source) = match classified {
            Some(profile) => (profile, EmotionSource::Classifier),
            None => (lexicon_profile, EmotionSource::Lexicon),
        };

        let gated =
            !self.passes_gate(input.overall_sentiment, input.subjectivity, input.factual_score);
        let profile = if gated {
            EmotionProfile::default()
        } else {
            profile
        };

        tracing::debug!(
            source = ?source,
            gated,
            dominant = ?profile.dominant().map(|(e, _)| e.as_str()),
            "Emotion profile computed"
        );

        EmotionResult {
            profile,
            lexicon_profile,
            source,
            gated,
            classifier_status,
        }
    }
}

impl std::fmt::Debug for EmotionAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmotionAggregator")
            .field("classifier", &self.classifier_name())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentAnnotator, RuleBasedAnnotator};
    use crate::models::ModelError;

    fn aggregator() -> EmotionAggregator {
        EmotionAggregator::new(Arc::new(EmotionLexicon::default()), EmotionConfig::default())
    }

    fn profile(text: &str) -> EmotionProfile {
        let doc = RuleBasedAnnotator::new().annotate(text).unwrap();
        aggregator().aggregate(&doc.tokens)
    }

    struct FixedClassifier(Vec<(Emotion, f64)>);

    impl EmotionClassifier for FixedClassifier {
        fn classify(&self, _text: &str) -> Result<Vec<(Emotion, f64)>, ModelError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingClassifier;

    impl EmotionClassifier for FailingClassifier {
        fn classify(&self, _text: &str) -> Result<Vec<(Emotion, f64)>, ModelError> {
            Err(ModelError::Inference("boom".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_modifier_increases_intensity() {
        let plain = profile("The customer was angry about the delayed shipment today.");
        let boosted = profile("The customer was very angry about the delayed shipment today.");
        assert!(plain.anger > 0.0);
        assert!(boosted.anger > plain.anger);
    }

    #[test]
    fn test_negation_never_goes_negative() {
        let p = profile("I am not happy at all. I'm not happy. Never happy.");
        for (_, v) in p.iter() {
            assert!(v >= 0.0);
        }
        assert_eq!(p.joy, 0.0);
    }

    #[test]
    fn test_no_tokens_is_zero() {
        assert!(aggregator().aggregate(&[]).is_zero());
    }

    #[test]
    fn test_intensity_normalised_by_content_tokens() {
        // content tokens: happy, dog, played, garden
        let p = profile("The happy dog played in the garden.");
        assert!((p.joy - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_gate() {
        let agg = aggregator();
        assert!(agg.passes_gate(0.5, 0.6, 0.1));
        assert!(!agg.passes_gate(0.1, 0.6, 0.1));
        assert!(!agg.passes_gate(0.5, 0.2, 0.1));
        assert!(!agg.passes_gate(0.5, 0.6, 0.7));

        let mut p = EmotionProfile::default();
        p.set(Emotion::Joy, 0.3);
        assert!(agg.filter(p, 0.05, 0.9, 0.0).is_zero());

        let ungated = EmotionAggregator::new(
            Arc::new(EmotionLexicon::default()),
            EmotionConfig {
                gating: false,
                ..Default::default()
            },
        );
        assert_eq!(ungated.filter(p, 0.0, 0.0, 1.0), p);
    }

    #[test]
    fn test_classifier_validation() {
        let agg = aggregator();
        let classifier = FixedClassifier(vec![
            (Emotion::Joy, 0.8),
            (Emotion::Anger, 0.9),
            (Emotion::Fear, 0.3),
        ]);
        let chunks = vec!["a".to_string(), "b".to_string()];

        // joy agrees with positive sentiment; anger has no trigger and disagrees
        let (profile, status) =
            agg.classify_validated(&classifier, "What a lovely day", &chunks, 0.6);
        let profile = profile.unwrap();
        assert_eq!(status, ComponentStatus::Available);
        assert!((profile.joy - 0.8).abs() < 1e-9);
        assert_eq!(profile.anger, 0.0);
        assert_eq!(profile.fear, 0.0);

        // literal trigger corroborates anger even with weak sentiment
        let (profile, _) =
            agg.classify_validated(&classifier, "They were furious", &chunks, 0.1);
        assert!((profile.unwrap().anger - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_failing_classifier_falls_back_to_lexicon() {
        let agg = aggregator().with_classifier(Arc::new(FailingClassifier));
        let text = "I am extremely happy and delighted with this wonderful result.";
        let doc = RuleBasedAnnotator::new().annotate(text).unwrap();
        let chunks = vec![text.to_string()];
        let result = agg.analyze(EmotionInput {
            tokens: &doc.tokens,
            text,
            chunks: &chunks,
            overall_sentiment: 0.7,
            subjectivity: 0.8,
            factual_score: 0.0,
        });
        assert_eq!(result.source, EmotionSource::Lexicon);
        assert_eq!(result.classifier_status, ComponentStatus::Unavailable);
        assert!(!result.gated);
        assert!(result.profile.joy > 0.0);
    }
}
