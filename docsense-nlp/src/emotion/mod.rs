//! Emotion detection.
//!
//! Lexicon triggers with intensity modifiers and negation produce a
//! per-category profile; an optional multi-label classifier can replace it
//! when its categories are corroborated by the text or by the overall
//! sentiment direction.

mod aggregator;
mod lexicon;

pub use aggregator::{EmotionAggregator, EmotionConfig, EmotionInput, EmotionResult, EmotionSource};
pub use lexicon::EmotionLexicon;

use serde::{Deserialize, Serialize};

use crate::models::ModelError;

/// Fixed emotion categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Anger,
    Fear,
    Sadness,
    Surprise,
    Disgust,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Joy,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Sadness,
        Emotion::Surprise,
        Emotion::Disgust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Sadness => "sadness",
            Self::Surprise => "surprise",
            Self::Disgust => "disgust",
        }
    }

    /// Map a classifier label onto a category; unknown labels such as
    /// "neutral" map to nothing.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "joy" | "happy" | "happiness" => Some(Self::Joy),
            "anger" | "angry" => Some(Self::Anger),
            "fear" | "scared" => Some(Self::Fear),
            "sadness" | "sad" => Some(Self::Sadness),
            "surprise" | "surprised" => Some(Self::Surprise),
            "disgust" | "disgusted" => Some(Self::Disgust),
            _ => None,
        }
    }

    /// Emotions that accompany positive sentiment.
    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Joy | Self::Surprise)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Intensity per emotion category, never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionProfile {
    pub joy: f64,
    pub anger: f64,
    pub fear: f64,
    pub sadness: f64,
    pub surprise: f64,
    pub disgust: f64,
}

impl EmotionProfile {
    pub fn get(&self, emotion: Emotion) -> f64 {
        self.as_array()[emotion.index()]
    }

    /// Set an intensity; negative and non-finite values are stored as 0.
    pub fn set(&mut self, emotion: Emotion, value: f64) {
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        match emotion {
            Emotion::Joy => self.joy = value,
            Emotion::Anger => self.anger = value,
            Emotion::Fear => self.fear = value,
            Emotion::Sadness => self.sadness = value,
            Emotion::Surprise => self.surprise = value,
            Emotion::Disgust => self.disgust = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.iter().map(move |&e| (e, self.get(e)))
    }

    /// Category with the highest non-zero intensity.
    pub fn dominant(&self) -> Option<(Emotion, f64)> {
        self.iter()
            .filter(|(_, v)| *v > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn is_zero(&self) -> bool {
        self.iter().all(|(_, v)| v == 0.0)
    }

    /// Copy with every value rounded for reporting.
    pub fn rounded(&self, places: u32) -> Self {
        let mut out = Self::default();
        for (e, v) in self.iter() {
            out.set(e, docsense_common::util::round_to(v, places));
        }
        out
    }

    fn as_array(&self) -> [f64; 6] {
        [
            self.joy,
            self.anger,
            self.fear,
            self.sadness,
            self.surprise,
            self.disgust,
        ]
    }
}

/// Neural multi-label emotion classifier.
pub trait EmotionClassifier: Send + Sync {
    /// Score per category for one chunk of text. Categories the model does
    /// not report are simply absent.
    fn classify(&self, text: &str) -> Result<Vec<(Emotion, f64)>, ModelError>;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_set_clamps_negative() {
        let mut profile = EmotionProfile::default();
        profile.set(Emotion::Joy, -0.3);
        profile.set(Emotion::Fear, f64::NAN);
        profile.set(Emotion::Anger, 0.25);
        assert_eq!(profile.joy, 0.0);
        assert_eq!(profile.fear, 0.0);
        assert_eq!(profile.get(Emotion::Anger), 0.25);
        assert_eq!(profile.dominant(), Some((Emotion::Anger, 0.25)));
    }

    #[test]
    fn test_from_label() {
        assert_eq!(Emotion::from_label("JOY"), Some(Emotion::Joy));
        assert_eq!(Emotion::from_label(" sadness "), Some(Emotion::Sadness));
        assert_eq!(Emotion::from_label("neutral"), None);
    }

    #[test]
    fn test_profile_serializes_all_categories() {
        let value = serde_json::to_value(EmotionProfile::default()).unwrap();
        let obj = value.as_object().unwrap();
        for e in Emotion::ALL {
            assert!(obj.contains_key(e.as_str()));
        }
        assert!(EmotionProfile::default().is_zero());
    }
}
