use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::str::FromStr;

use crate::models::ScorerResult;

/// Slot weights for three, two and one available scorers.
const WEIGHTS_3: [f64; 3] = [0.3, 0.4, 0.3];
const WEIGHTS_2: [f64; 2] = [0.5, 0.5];

const DAMPENING_SCORE: f64 = 0.4;
const DAMPENING_CONFIDENCE: f64 = 0.3;
const MIN_DAMPENED_CONFIDENCE: f64 = 0.1;
const SINGLE_MODEL_AGREEMENT: f64 = 0.5;

// ============================================================================
// Labels
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// Thresholds used to turn an ensemble score into a label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPolicy {
    /// ±0.15, and low-confidence weak scores stay neutral
    #[default]
    Conservative,
    /// ±0.05
    Permissive,
}

impl LabelPolicy {
    pub fn label(&self, score: f64, confidence: f64) -> SentimentLabel {
        let threshold = match self {
            Self::Permissive => 0.05,
            Self::Conservative => {
                if confidence < 0.6 && score.abs() < 0.3 {
                    return SentimentLabel::Neutral;
                }
                0.15
            }
        };
        if score > threshold {
            SentimentLabel::Positive
        } else if score < -threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl FromStr for LabelPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "permissive" => Ok(Self::Permissive),
            other => Err(format!("unknown label policy: {other}")),
        }
    }
}

/// Display percentage: distance from the opposite pole for labelled
/// scores, a small offset from 50 for neutral ones.
pub fn display_percentage(score: f64, label: SentimentLabel) -> f64 {
    match label {
        SentimentLabel::Neutral => 50.0 + score.abs() * 10.0,
        _ => ((score + 1.0) * 50.0).min(100.0),
    }
}

// ============================================================================
// Ensemble
// ============================================================================

/// Scorer outputs in fixed slot order. `None` means the scorer did not run
/// or failed; a `Some` with polarity 0.0 is a genuine neutral reading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnsembleInput {
    pub lexical: Option<ScorerResult>,
    pub valence: Option<ScorerResult>,
    pub neural: Option<ScorerResult>,
}

impl EnsembleInput {
    pub fn available(&self) -> usize {
        [self.lexical, self.valence, self.neural]
            .iter()
            .filter(|s| s.is_some())
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnsembleScore {
    pub score: f64,
    pub label: SentimentLabel,
    pub confidence: f64,
    pub percentage: f64,
    /// Number of scorers that contributed
    pub models_used: usize,
}

impl EnsembleScore {
    fn neutral() -> Self {
        Self {
            score: 0.0,
            label: SentimentLabel::Neutral,
            confidence: 0.0,
            percentage: 50.0,
            models_used: 0,
        }
    }
}

/// Weighted ensemble with optional factual dampening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnsembleConfig {
    pub policy: LabelPolicy,
    pub factual_dampening: bool,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            policy: LabelPolicy::Conservative,
            factual_dampening: true,
        }
    }
}

impl EnsembleConfig {
    /// Combine the available scorer outputs.
    ///
    /// `subjectivity` is the lexical scorer's subjectivity and only counts
    /// toward the base confidence when the lexical slot is filled.
    pub fn combine(
        &self,
        input: &EnsembleInput,
        subjectivity: f64,
        factual_score: f64,
    ) -> EnsembleScore {
        let polarities: Vec<f64> = [input.lexical, input.valence, input.neural]
            .iter()
            .flatten()
            .map(|r| r.polarity)
            .collect();
        if polarities.is_empty() {
            return EnsembleScore::neutral();
        }

        let mut score: f64 = match polarities.len() {
            3 => polarities.iter().zip(WEIGHTS_3).map(|(p, w)| p * w).sum(),
            2 => polarities.iter().zip(WEIGHTS_2).map(|(p, w)| p * w).sum(),
            _ => polarities[0],
        };

        let factual = factual_score.clamp(0.0, 1.0);
        if self.factual_dampening {
            score *= 1.0 - DAMPENING_SCORE * factual;
        }

        let base_parts: Vec<f64> = [
            input.lexical.map(|_| subjectivity.clamp(0.0, 1.0)),
            input.valence.map(|r| r.polarity.abs()),
            input.neural.map(|r| r.confidence),
        ]
        .into_iter()
        .flatten()
        .collect();
        let base = base_parts.iter().mean();
        let agreement = model_agreement(&polarities);

        let mut confidence = (base + agreement) / 2.0;
        if self.factual_dampening {
            confidence = (confidence - DAMPENING_CONFIDENCE * factual).max(MIN_DAMPENED_CONFIDENCE);
        }
        let confidence = confidence.clamp(0.0, 1.0);

        let score = score.clamp(-1.0, 1.0);
        let label = self.policy.label(score, confidence);
        EnsembleScore {
            score,
            label,
            confidence,
            percentage: display_percentage(score, label),
            models_used: polarities.len(),
        }
    }
}

/// `1 - stdev / 2` over the available polarities, floored at 0.
pub fn model_agreement(polarities: &[f64]) -> f64 {
    if polarities.len() < 2 {
        return SINGLE_MODEL_AGREEMENT;
    }
    let stdev = polarities.iter().std_dev();
    if !stdev.is_finite() {
        return SINGLE_MODEL_AGREEMENT;
    }
    (1.0 - stdev / 2.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn r(p: f64, c: f64) -> Option<ScorerResult> {
        Some(ScorerResult::new(p, c))
    }

    fn plain() -> EnsembleConfig {
        EnsembleConfig {
            policy: LabelPolicy::Permissive,
            factual_dampening: false,
        }
    }

    #[test]
    fn test_three_model_weights() {
        let input = EnsembleInput {
            lexical: r(0.5, 0.6),
            valence: r(0.8, 0.8),
            neural: r(0.9, 0.95),
        };
        let out = plain().combine(&input, 0.6, 0.0);
        assert!((out.score - (0.15 + 0.32 + 0.27)).abs() < 1e-9);
        assert_eq!(out.label, SentimentLabel::Positive);
        assert_eq!(out.models_used, 3);
    }

    #[test]
    fn test_two_and_one_model_weights() {
        let two = EnsembleInput {
            lexical: r(0.2, 0.5),
            valence: r(0.6, 0.6),
            neural: None,
        };
        assert!((plain().combine(&two, 0.5, 0.0).score - 0.4).abs() < 1e-9);

        let one = EnsembleInput {
            valence: r(-0.7, 0.7),
            ..Default::default()
        };
        let out = plain().combine(&one, 0.0, 0.0);
        assert!((out.score + 0.7).abs() < 1e-9);
        // single model: agreement 0.5, base |valence| 0.7
        assert!((out.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_zero_polarity_is_available() {
        let input = EnsembleInput {
            lexical: r(0.0, 0.0),
            valence: r(0.6, 0.6),
            neural: r(0.0, 0.9),
        };
        let out = plain().combine(&input, 0.0, 0.0);
        assert_eq!(out.models_used, 3);
        assert!((out.score - 0.24).abs() < 1e-9);
    }

    #[test]
    fn test_no_models_is_neutral() {
        let out = EnsembleConfig::default().combine(&EnsembleInput::default(), 0.9, 0.0);
        assert_eq!(out.score, 0.0);
        assert_eq!(out.label, SentimentLabel::Neutral);
        assert_eq!(out.models_used, 0);
    }

    #[test]
    fn test_factual_dampening() {
        let input = EnsembleInput {
            lexical: r(0.5, 0.5),
            valence: r(0.5, 0.5),
            neural: None,
        };
        let damped = EnsembleConfig {
            policy: LabelPolicy::Permissive,
            factual_dampening: true,
        };
        let full = plain().combine(&input, 0.5, 1.0);
        let out = damped.combine(&input, 0.5, 1.0);
        assert!((out.score - 0.3).abs() < 1e-9);
        assert!((out.confidence - (full.confidence - 0.3)).abs() < 1e-9);
    }

    #[test]
    fn test_dampened_confidence_floor() {
        let input = EnsembleInput {
            valence: r(0.0, 0.0),
            ..Default::default()
        };
        let out = EnsembleConfig::default().combine(&input, 0.0, 1.0);
        assert_eq!(out.confidence, 0.1);
    }

    #[test]
    fn test_weights_follow_available_scorers() {
        let (lexical, valence, neural) = (r(0.2, 0.5), r(0.6, 0.6), r(-0.4, 0.9));
        let cases = [
            (EnsembleInput { lexical, valence, neural }, 0.06 + 0.24 - 0.12),
            (EnsembleInput { lexical, valence, neural: None }, 0.4),
            (EnsembleInput { lexical, valence: None, neural }, -0.1),
            (EnsembleInput { lexical: None, valence, neural }, 0.1),
            (EnsembleInput { neural, ..Default::default() }, -0.4),
            (EnsembleInput { lexical, ..Default::default() }, 0.2),
        ];

        for (input, expected) in cases {
            let out = plain().combine(&input, 0.5, 0.0);
            assert!(
                (out.score - expected).abs() < 1e-9,
                "{input:?}: got {}, expected {expected}",
                out.score
            );
            assert_eq!(out.models_used, input.available());
        }
    }

    #[test]
    fn test_agreement() {
        assert_eq!(model_agreement(&[0.4]), 0.5);
        assert!((model_agreement(&[0.5, 0.5]) - 1.0).abs() < 1e-12);
        // sample stdev of [-1, 1] is sqrt(2)
        assert!((model_agreement(&[-1.0, 1.0]) - (1.0 - 2f64.sqrt() / 2.0)).abs() < 1e-12);
    }

    #[test_case(LabelPolicy::Permissive, 0.06, 0.1 => SentimentLabel::Positive ; "permissive weak positive")]
    #[test_case(LabelPolicy::Permissive, -0.06, 0.1 => SentimentLabel::Negative ; "permissive weak negative")]
    #[test_case(LabelPolicy::Permissive, 0.05, 0.9 => SentimentLabel::Neutral ; "permissive boundary")]
    #[test_case(LabelPolicy::Conservative, 0.2, 0.5 => SentimentLabel::Neutral ; "conservative low confidence")]
    #[test_case(LabelPolicy::Conservative, 0.2, 0.7 => SentimentLabel::Positive ; "conservative confident")]
    #[test_case(LabelPolicy::Conservative, 0.35, 0.2 => SentimentLabel::Positive ; "conservative strong score")]
    #[test_case(LabelPolicy::Conservative, -0.1, 0.9 => SentimentLabel::Neutral ; "conservative below threshold")]
    #[test_case(LabelPolicy::Conservative, -0.16, 0.9 => SentimentLabel::Negative ; "conservative negative")]
    fn test_label_policy(policy: LabelPolicy, score: f64, confidence: f64) -> SentimentLabel {
        policy.label(score, confidence)
    }

    #[test_case(0.5, SentimentLabel::Positive => 75.0 ; "positive")]
    #[test_case(-0.5, SentimentLabel::Negative => 25.0 ; "negative")]
    #[test_case(-0.1, SentimentLabel::Neutral => 51.0 ; "neutral")]
    #[test_case(1.0, SentimentLabel::Positive => 100.0 ; "capped")]
    fn test_display_percentage(score: f64, label: SentimentLabel) -> f64 {
        display_percentage(score, label)
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Permissive".parse::<LabelPolicy>(), Ok(LabelPolicy::Permissive));
        assert_eq!(" conservative ".parse::<LabelPolicy>(), Ok(LabelPolicy::Conservative));
        assert!("strict".parse::<LabelPolicy>().is_err());
    }
}
