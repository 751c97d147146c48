//! Language and style metrics.

use serde::Serialize;
use std::sync::Arc;

use docsense_common::util::round_to;

use crate::document::{AnnotatedDocument, DepLabel, PartOfSpeech};
use crate::emotion::EmotionLexicon;

const FORMAL_INDICATORS: &[&str] = &[
    "therefore",
    "however",
    "moreover",
    "furthermore",
    "consequently",
    "nevertheless",
    "nonetheless",
];

const ACADEMIC_INDICATORS: &[&str] = &[
    "research",
    "study",
    "analysis",
    "data",
    "findings",
    "conclusion",
    "hypothesis",
    "methodology",
];

const PERSONAL_PRONOUNS: &[&str] = &["i", "me", "my", "we", "us", "our"];

const TECHNICAL_TERM_CHARS: usize = 7;
const CLARITY_SENTENCE_WORDS: f64 = 20.0;

/// Syllables in a word, counted as vowel groups.
///
/// A trailing silent `e` is dropped unless it is the only vowel group or
/// ends a consonant + `le` syllable. Every word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let chars: Vec<char> = lower.chars().filter(|c| c.is_alphabetic()).collect();
    if chars.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| "aeiouy".contains(c);
    let mut groups = 0;
    let mut previous_vowel = false;
    for &c in &chars {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            groups += 1;
        }
        previous_vowel = vowel;
    }

    let n = chars.len();
    let silent_e = n > 2
        && chars[n - 1] == 'e'
        && !is_vowel(chars[n - 2])
        && !(chars[n - 2] == 'l' && !is_vowel(chars[n - 3]));
    if silent_e && groups > 1 {
        groups -= 1;
    }
    groups.max(1)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityMetrics {
    pub average_syllables_per_word: f64,
    pub polysyllabic_words: usize,
    pub technical_terms: usize,
    pub passive_voice_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StylisticFeatures {
    pub formal_language_score: f64,
    pub academic_tone_score: f64,
    pub objectivity_score: f64,
    pub clarity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguagePatterns {
    pub complexity_metrics: ComplexityMetrics,
    pub stylistic_features: StylisticFeatures,
}

/// Computes complexity and style metrics over an annotated document.
///
/// Emotion trigger words from the lexicon count against objectivity.
#[derive(Debug, Clone)]
pub struct LanguageAnalyzer {
    emotions: Arc<EmotionLexicon>,
}

impl Default for LanguageAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(EmotionLexicon::default()))
    }
}

impl LanguageAnalyzer {
    pub fn new(emotions: Arc<EmotionLexicon>) -> Self {
        Self { emotions }
    }

    pub fn analyze(&self, doc: &AnnotatedDocument) -> LanguagePatterns {
        let words: Vec<_> = doc.tokens.iter().filter(|t| t.is_alpha && !t.is_punct).collect();
        let num_words = words.len();
        let num_sentences = doc.sentences.len().max(1);

        let syllables: Vec<usize> = words.iter().map(|t| count_syllables(&t.text)).collect();
        let average_syllables = ratio(syllables.iter().sum::<usize>(), num_words);
        let polysyllabic_words = syllables.iter().filter(|&&s| s >= 3).count();
        let technical_terms = words
            .iter()
            .filter(|t| {
                t.text.chars().count() > TECHNICAL_TERM_CHARS || t.pos == PartOfSpeech::Propn
            })
            .count();

        let passive = doc.tokens.iter().filter(|t| t.dep == DepLabel::Auxpass).count();
        let passive_percentage = passive as f64 / num_sentences as f64 * 100.0;

        let mut formal = 0;
        let mut academic = 0;
        let mut subjective = 0;
        for token in &doc.tokens {
            let lemma = token.lemma_lower();
            if FORMAL_INDICATORS.contains(&lemma.as_str()) {
                formal += 1;
            }
            if ACADEMIC_INDICATORS.contains(&lemma.as_str()) {
                academic += 1;
            }
            if token.pos == PartOfSpeech::Pron && PERSONAL_PRONOUNS.contains(&lemma.as_str()) {
                subjective += 1;
            }
            subjective += self.emotions.emotions_for(&lemma).count();
        }

        let objectivity = if num_words == 0 {
            0.0
        } else {
            (1.0 - subjective as f64 / num_words as f64).max(0.0)
        };
        let words_per_sentence = num_words as f64 / num_sentences as f64;
        let clarity = (1.0 - words_per_sentence / CLARITY_SENTENCE_WORDS).max(0.1);

        LanguagePatterns {
            complexity_metrics: ComplexityMetrics {
                average_syllables_per_word: round_to(average_syllables, 2),
                polysyllabic_words,
                technical_terms,
                passive_voice_percentage: round_to(passive_percentage, 1),
            },
            stylistic_features: StylisticFeatures {
                formal_language_score: round_to(ratio(formal, num_words), 3),
                academic_tone_score: round_to(ratio(academic, num_words), 3),
                objectivity_score: round_to(objectivity, 3),
                clarity_score: round_to(clarity, 3),
            },
        }
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
