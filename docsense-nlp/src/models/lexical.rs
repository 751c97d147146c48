//! Lexicon-based polarity scorer with subjectivity.
//!
//! Each lexicon word carries a polarity in [-1, 1] and a subjectivity in
//! [0, 1]. An intensifier directly before a word scales its polarity and a
//! preceding negator flips it at half strength. The text score is the mean
//! over all matched words; subjectivity is reported as the confidence.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::{ModelError, PolarityScorer, ScorerResult};

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").unwrap());

const NEGATION_FACTOR: f64 = -0.5;

const DEFAULT_ENTRIES: &[(&str, f64, f64)] = &[
    // Positive
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("awesome", 1.0, 1.0),
    ("brilliant", 0.9, 1.0),
    ("superb", 1.0, 1.0),
    ("outstanding", 0.5, 0.6),
    ("perfect", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("lovely", 0.5, 0.75),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("loves", 0.5, 0.6),
    ("like", 0.2, 0.4),
    ("enjoy", 0.4, 0.5),
    ("enjoyed", 0.4, 0.5),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("pleased", 0.5, 1.0),
    ("delighted", 0.7, 0.9),
    ("excited", 0.4, 0.75),
    ("nice", 0.6, 1.0),
    ("pleasant", 0.73, 0.97),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("impressive", 1.0, 1.0),
    ("remarkable", 0.75, 0.75),
    ("helpful", 0.5, 0.5),
    ("useful", 0.3, 0.0),
    ("valuable", 0.6, 0.5),
    ("recommend", 0.3, 0.4),
    ("incredible", 0.9, 0.9),
    ("exceptional", 0.67, 1.0),
    ("favorite", 0.5, 1.0),
    ("fun", 0.3, 0.2),
    ("positive", 0.23, 0.55),
    ("calm", 0.3, 0.75),
    ("bright", 0.7, 0.9),
    ("warm", 0.6, 0.6),
    ("profound", 0.4, 0.6),
    ("fascinating", 0.6, 0.8),
    ("inspiring", 0.5, 0.6),
    ("successful", 0.75, 0.95),
    ("easy", 0.43, 0.83),
    ("clear", 0.1, 0.38),
    ("friendly", 0.38, 0.5),
    ("kind", 0.6, 0.9),
    ("thank", 0.2, 0.2),
    ("thanks", 0.2, 0.2),
    ("grateful", 0.6, 0.8),
    ("satisfied", 0.5, 1.0),
    ("smooth", 0.4, 0.6),
    ("reliable", 0.5, 0.5),
    ("stunning", 0.5, 0.9),
    ("gorgeous", 0.7, 0.9),
    ("joy", 0.8, 0.9),
    ("wonder", 0.3, 0.5),
    ("sublime", 0.6, 0.8),
    ("magnificent", 0.9, 1.0),
    ("splendid", 0.9, 1.0),
    ("admirable", 0.7, 0.9),
    ("superior", 0.7, 0.9),
    // Negative
    ("bad", -0.7, 0.67),
    ("poor", -0.4, 0.6),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("hate", -0.8, 0.9),
    ("hated", -0.8, 0.9),
    ("dislike", -0.5, 0.6),
    ("disappointing", -0.6, 0.7),
    ("disappointed", -0.75, 0.75),
    ("sad", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("angry", -0.5, 1.0),
    ("furious", -0.8, 1.0),
    ("annoying", -0.8, 0.9),
    ("annoyed", -0.4, 0.7),
    ("frustrated", -0.7, 0.9),
    ("frustrating", -0.6, 0.8),
    ("upset", -0.4, 0.7),
    ("miserable", -1.0, 1.0),
    ("gloomy", -0.6, 0.9),
    ("ugly", -0.7, 1.0),
    ("rude", -0.6, 0.8),
    ("broken", -0.4, 0.4),
    ("useless", -0.5, 0.2),
    ("boring", -1.0, 1.0),
    ("dull", -0.4, 0.8),
    ("slow", -0.3, 0.4),
    ("unacceptable", -0.8, 0.8),
    ("wrong", -0.5, 0.9),
    ("difficult", -0.5, 1.0),
    ("problem", -0.2, 0.3),
    ("fail", -0.5, 0.3),
    ("failed", -0.5, 0.3),
    ("failure", -0.3, 0.3),
    ("scared", -0.5, 0.9),
    ("afraid", -0.6, 0.9),
    ("worried", -0.4, 0.8),
    ("anxious", -0.25, 0.75),
    ("nervous", -0.3, 1.0),
    ("disgusting", -1.0, 1.0),
    ("disgusted", -0.7, 1.0),
    ("sick", -0.71, 0.86),
    ("painful", -0.7, 0.9),
    ("dangerous", -0.6, 0.9),
    ("negative", -0.3, 0.4),
    ("dark", -0.15, 0.4),
    ("cold", -0.6, 1.0),
    ("pathetic", -1.0, 1.0),
    ("stupid", -0.8, 1.0),
    ("lousy", -0.9, 0.9),
    ("mediocre", -0.4, 0.7),
    ("unfortunate", -0.5, 0.9),
    ("expensive", -0.5, 0.7),
    ("complicated", -0.5, 1.0),
    ("confusing", -0.3, 0.6),
    ("overwhelming", -0.2, 0.4),
    ("grief", -0.7, 0.9),
    ("despair", -0.8, 0.9),
];

const DEFAULT_INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("absolutely", 1.4),
    ("totally", 1.3),
    ("completely", 1.3),
    ("quite", 1.1),
    ("so", 1.2),
    ("too", 1.1),
    ("somewhat", 0.8),
    ("slightly", 0.6),
    ("barely", 0.5),
];

const DEFAULT_NEGATORS: &[&str] = &["not", "never", "no", "n't", "cannot", "without", "hardly"];

/// Adjective-centric polarity and subjectivity scorer.
#[derive(Debug, Clone)]
pub struct LexicalPolarityScorer {
    entries: HashMap<String, (f64, f64)>,
    intensifiers: HashMap<String, f64>,
    negators: Vec<String>,
}

impl Default for LexicalPolarityScorer {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ENTRIES
                .iter()
                .map(|&(w, p, s)| (w.to_string(), (p, s)))
                .collect(),
            intensifiers: DEFAULT_INTENSIFIERS
                .iter()
                .map(|&(w, f)| (w.to_string(), f))
                .collect(),
            negators: DEFAULT_NEGATORS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl LexicalPolarityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a lexicon entry.
    pub fn with_entry(mut self, word: &str, polarity: f64, subjectivity: f64) -> Self {
        self.entries.insert(
            word.to_lowercase(),
            (polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)),
        );
        self
    }

    /// Polarity and subjectivity of a text, `(0, 0)` when no lexicon word occurs.
    pub fn assess(&self, text: &str) -> (f64, f64) {
        let lower = text.to_lowercase().replace('’', "'");
        let words: Vec<&str> = WORD_PATTERN
            .find_iter(&lower)
            .flat_map(|m| split_negation(m.as_str()))
            .collect();

        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut matched = 0usize;

        for (i, word) in words.iter().enumerate() {
            let Some(&(polarity, subjectivity)) = self.entries.get(*word) else {
                continue;
            };

            let mut p = polarity;
            let mut s = subjectivity;
            let before = i.checked_sub(1).map(|j| words[j]);
            if let Some(factor) = before.and_then(|w| self.intensifiers.get(w)) {
                p *= factor;
                s *= factor;
            }
            let negated = words[i.saturating_sub(3)..i]
                .iter()
                .any(|w| self.negators.iter().any(|n| n == w));
            if negated {
                p *= NEGATION_FACTOR;
            }

            polarity_sum += p.clamp(-1.0, 1.0);
            subjectivity_sum += s.clamp(0.0, 1.0);
            matched += 1;
        }

        if matched == 0 {
            return (0.0, 0.0);
        }
        let n = matched as f64;
        (polarity_sum / n, subjectivity_sum / n)
    }
}

/// "don't" -> ["do", "n't"]
fn split_negation(word: &str) -> Vec<&str> {
    match word.strip_suffix("n't") {
        Some(head) if !head.is_empty() => vec![head, &word[head.len()..]],
        _ => vec![word],
    }
}

impl PolarityScorer for LexicalPolarityScorer {
    fn score(&self, text: &str) -> Result<ScorerResult, ModelError> {
        let (polarity, subjectivity) = self.assess(text);
        Ok(ScorerResult::new(polarity, subjectivity))
    }

    fn name(&self) -> &str {
        "lexical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_and_negative() {
        let scorer = LexicalPolarityScorer::new();
        let (p, s) = scorer.assess("This is a wonderful and excellent product.");
        assert!(p > 0.9);
        assert!(s > 0.9);
        let (p, _) = scorer.assess("The service was terrible.");
        assert!(p < -0.9);
    }

    #[test]
    fn test_no_lexicon_words_is_zero() {
        let scorer = LexicalPolarityScorer::new();
        assert_eq!(scorer.assess("The study measured 45 samples."), (0.0, 0.0));
        assert_eq!(scorer.assess(""), (0.0, 0.0));
    }

    #[test]
    fn test_negation_flips_at_half_strength() {
        let scorer = LexicalPolarityScorer::new();
        let (plain, _) = scorer.assess("It is good.");
        let (negated, _) = scorer.assess("It is not good.");
        assert!((negated - plain * NEGATION_FACTOR).abs() < 1e-9);
        let (contracted, _) = scorer.assess("It isn't good.");
        assert!((contracted - negated).abs() < 1e-9);
    }

    #[test]
    fn test_intensifier_scales() {
        let scorer = LexicalPolarityScorer::new();
        let (plain, _) = scorer.assess("a good day");
        let (boosted, _) = scorer.assess("a very good day");
        assert!(boosted > plain);
    }

    #[test]
    fn test_custom_entry() {
        let scorer = LexicalPolarityScorer::new().with_entry("Stellar", 0.9, 0.8);
        let result = scorer.score("A stellar result").unwrap();
        assert!((result.polarity - 0.9).abs() < 1e-9);
        assert!((result.confidence - 0.8).abs() < 1e-9);
        assert_eq!(scorer.name(), "lexical");
    }
}
