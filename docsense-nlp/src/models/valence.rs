//! Rule-based valence scorer.
//!
//! Word valences on a [-4, 4] scale are adjusted by preceding boosters and
//! dampeners, flipped by negations in a three-word window, emphasised by
//! ALL-CAPS words in mixed-case text, re-weighted around "but", and lifted
//! by exclamation and question marks. The summed valence is squashed into a
//! compound score in [-1, 1] with `x / sqrt(x^2 + 15)`.

use std::collections::{HashMap, HashSet};

use super::{ModelError, PolarityScorer, ScorerResult};

const BOOST_INCREMENT: f64 = 0.293;
const BOOST_DECREMENT: f64 = -0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;

const DEFAULT_VALENCES: &[(&str, f64)] = &[
    ("admire", 2.1),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("calm", 1.3),
    ("cheerful", 2.5),
    ("delight", 2.9),
    ("delighted", 2.3),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("grateful", 2.0),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("hope", 1.9),
    ("impressive", 2.3),
    ("inspired", 2.2),
    ("inspiring", 2.2),
    ("joy", 2.8),
    ("kind", 2.4),
    ("like", 1.5),
    ("liked", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("loves", 2.7),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("pleased", 1.9),
    ("positive", 2.6),
    ("praise", 2.6),
    ("recommend", 1.5),
    ("satisfied", 1.8),
    ("stunning", 1.6),
    ("success", 2.7),
    ("successful", 2.8),
    ("superb", 3.1),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("thrilled", 1.9),
    ("valuable", 2.1),
    ("warm", 0.9),
    ("win", 2.8),
    ("wonder", 1.3),
    ("wonderful", 2.7),
    ("afraid", -2.0),
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("annoying", -1.9),
    ("anxious", -1.0),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("broken", -1.1),
    ("cry", -2.1),
    ("depressed", -2.3),
    ("despair", -1.3),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disgusted", -2.4),
    ("disgusting", -2.4),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fear", -2.2),
    ("frustrated", -2.4),
    ("frustrating", -2.2),
    ("furious", -2.7),
    ("grief", -2.2),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("mad", -2.2),
    ("miserable", -2.2),
    ("nervous", -1.1),
    ("outraged", -2.3),
    ("pain", -2.3),
    ("painful", -2.4),
    ("poor", -2.1),
    ("problem", -1.7),
    ("rude", -2.0),
    ("sad", -2.1),
    ("scared", -1.9),
    ("sick", -2.3),
    ("stupid", -2.4),
    ("terrible", -2.1),
    ("ugly", -2.3),
    ("unacceptable", -2.0),
    ("upset", -1.6),
    ("worried", -1.2),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

const DEFAULT_BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOST_INCREMENT),
    ("completely", BOOST_INCREMENT),
    ("deeply", BOOST_INCREMENT),
    ("enormously", BOOST_INCREMENT),
    ("entirely", BOOST_INCREMENT),
    ("especially", BOOST_INCREMENT),
    ("exceptionally", BOOST_INCREMENT),
    ("extremely", BOOST_INCREMENT),
    ("greatly", BOOST_INCREMENT),
    ("highly", BOOST_INCREMENT),
    ("hugely", BOOST_INCREMENT),
    ("incredibly", BOOST_INCREMENT),
    ("intensely", BOOST_INCREMENT),
    ("most", BOOST_INCREMENT),
    ("particularly", BOOST_INCREMENT),
    ("quite", BOOST_INCREMENT),
    ("really", BOOST_INCREMENT),
    ("remarkably", BOOST_INCREMENT),
    ("so", BOOST_INCREMENT),
    ("totally", BOOST_INCREMENT),
    ("tremendously", BOOST_INCREMENT),
    ("truly", BOOST_INCREMENT),
    ("utterly", BOOST_INCREMENT),
    ("very", BOOST_INCREMENT),
    ("almost", BOOST_DECREMENT),
    ("barely", BOOST_DECREMENT),
    ("hardly", BOOST_DECREMENT),
    ("less", BOOST_DECREMENT),
    ("little", BOOST_DECREMENT),
    ("marginally", BOOST_DECREMENT),
    ("occasionally", BOOST_DECREMENT),
    ("partly", BOOST_DECREMENT),
    ("scarcely", BOOST_DECREMENT),
    ("slightly", BOOST_DECREMENT),
    ("somewhat", BOOST_DECREMENT),
];

const DEFAULT_NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nope", "nor", "nothing", "nowhere", "neither", "without",
    "cannot", "cant", "dont", "doesnt", "didnt", "isnt", "arent", "wasnt", "werent", "wont",
    "wouldnt", "shouldnt", "couldnt", "aint", "rarely", "seldom", "despite",
];

/// Rule-based valence scorer producing a compound polarity.
#[derive(Debug, Clone)]
pub struct ValenceScorer {
    valences: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl Default for ValenceScorer {
    fn default() -> Self {
        Self {
            valences: DEFAULT_VALENCES
                .iter()
                .map(|&(w, v)| (w.to_string(), v))
                .collect(),
            boosters: DEFAULT_BOOSTERS
                .iter()
                .map(|&(w, v)| (w.to_string(), v))
                .collect(),
            negations: DEFAULT_NEGATIONS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl ValenceScorer {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_negation(&self, lower: &str) -> bool {
        self.negations.contains(lower) || lower.ends_with("n't")
    }

    /// Compound score in [-1, 1].
    pub fn compound(&self, text: &str) -> f64 {
        let words: Vec<&str> = text
            .split_whitespace()
            .map(strip_punctuation)
            .filter(|w| w.chars().count() > 1)
            .collect();
        if words.is_empty() {
            return 0.0;
        }
        let lowers: Vec<String> = words
            .iter()
            .map(|w| w.to_lowercase().replace('’', "'"))
            .collect();

        let upper_count = words.iter().filter(|w| is_shouting(w)).count();
        let caps_differential = upper_count > 0 && upper_count < words.len();

        let mut sentiments: Vec<f64> = Vec::with_capacity(words.len());
        for (i, lower) in lowers.iter().enumerate() {
            let Some(&base) = self.valences.get(lower.as_str()) else {
                sentiments.push(0.0);
                continue;
            };
            if self.boosters.contains_key(lower.as_str()) {
                sentiments.push(0.0);
                continue;
            }

            let mut valence = base;
            if caps_differential && is_shouting(words[i]) {
                valence += CAPS_INCREMENT * base.signum();
            }

            for distance in 1..=3 {
                let Some(j) = i.checked_sub(distance) else {
                    break;
                };
                let prev = lowers[j].as_str();
                if self.valences.contains_key(prev) {
                    continue;
                }
                if let Some(&boost) = self.boosters.get(prev) {
                    let mut scalar = if valence < 0.0 { -boost } else { boost };
                    if caps_differential && is_shouting(words[j]) {
                        scalar += CAPS_INCREMENT * valence.signum();
                    }
                    scalar *= match distance {
                        2 => 0.95,
                        3 => 0.9,
                        _ => 1.0,
                    };
                    valence += scalar;
                }
                if self.is_negation(prev) {
                    valence *= NEGATION_SCALAR;
                }
            }

            sentiments.push(valence);
        }

        // Contrast: "but" shifts weight onto the clause that follows
        if let Some(pivot) = lowers.iter().position(|w| w == "but") {
            for (i, s) in sentiments.iter_mut().enumerate() {
                if i < pivot {
                    *s *= 0.5;
                } else if i > pivot {
                    *s *= 1.5;
                }
            }
        }

        let mut sum: f64 = sentiments.iter().sum();
        if sum != 0.0 {
            let emphasis = punctuation_emphasis(text);
            sum += emphasis * sum.signum();
        }
        normalize(sum)
    }
}

fn strip_punctuation(word: &str) -> &str {
    let stripped = word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '’');
    if stripped.chars().count() <= 2 {
        word
    } else {
        stripped
    }
}

fn is_shouting(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
        && word
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + question_emphasis
}

fn normalize(score: f64) -> f64 {
    let normalized = score / (score * score + NORMALIZATION_ALPHA).sqrt();
    normalized.clamp(-1.0, 1.0)
}

impl PolarityScorer for ValenceScorer {
    fn score(&self, text: &str) -> Result<ScorerResult, ModelError> {
        let compound = self.compound(text);
        Ok(ScorerResult::new(compound, compound.abs()))
    }

    fn name(&self) -> &str {
        "valence"
    }
}
