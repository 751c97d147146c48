use std::collections::{HashMap, HashSet};

use super::Emotion;

const JOY: &[&str] = &[
    "happy", "joy", "excited", "cheerful", "delighted", "elated", "jubilant", "pleased", "glad",
    "content", "ecstatic", "thrilled", "blissful", "euphoric", "overjoyed",
];
const ANGER: &[&str] = &[
    "angry", "mad", "furious", "rage", "annoyed", "irritated", "upset", "frustrated", "outraged",
    "livid", "irate", "enraged", "incensed", "wrathful", "indignant",
];
const FEAR: &[&str] = &[
    "afraid", "scared", "terrified", "anxious", "worried", "nervous", "panic", "fearful",
    "alarmed", "dread", "apprehensive", "petrified", "horrified", "intimidated", "uneasy",
];
const SADNESS: &[&str] = &[
    "sad", "depressed", "miserable", "gloomy", "melancholy", "grief", "sorrow", "despair",
    "dejected", "blue", "heartbroken", "mournful", "despondent", "forlorn", "downcast",
];
const SURPRISE: &[&str] = &[
    "surprised", "amazed", "shocked", "astonished", "stunned", "bewildered", "startled",
    "astounded", "flabbergasted", "dumbfounded", "taken aback", "speechless",
];
const DISGUST: &[&str] = &[
    "disgusted", "revolted", "repulsed", "sick", "nauseated", "appalled", "repugnant", "loathe",
    "abhor", "detest", "repelled", "sickened", "offended",
];

const MODIFIERS: &[(&str, f64)] = &[
    ("very", 1.5),
    ("extremely", 2.0),
    ("really", 1.3),
    ("quite", 1.2),
    ("rather", 1.1),
    ("somewhat", 0.8),
    ("slightly", 0.7),
    ("barely", 0.5),
    ("hardly", 0.4),
    ("absolutely", 2.0),
    ("completely", 1.8),
    ("totally", 1.7),
    ("incredibly", 1.9),
];

const NEGATORS: &[&str] = &["not", "no", "never", "none", "neither", "hardly"];

/// Emotion trigger words, intensity modifiers and negators.
///
/// Immutable once built; construct with [`EmotionLexicon::default`] and the
/// `with_*` builders.
#[derive(Debug, Clone)]
pub struct EmotionLexicon {
    triggers: HashMap<Emotion, HashSet<String>>,
    modifiers: HashMap<String, f64>,
    negators: HashSet<String>,
}

impl Default for EmotionLexicon {
    fn default() -> Self {
        let sets: [(Emotion, &[&str]); 6] = [
            (Emotion::Joy, JOY),
            (Emotion::Anger, ANGER),
            (Emotion::Fear, FEAR),
            (Emotion::Sadness, SADNESS),
            (Emotion::Surprise, SURPRISE),
            (Emotion::Disgust, DISGUST),
        ];
        Self {
            triggers: sets
                .into_iter()
                .map(|(e, words)| (e, words.iter().map(|w| w.to_string()).collect()))
                .collect(),
            modifiers: MODIFIERS
                .iter()
                .map(|&(w, f)| (w.to_string(), f))
                .collect(),
            negators: NEGATORS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl EmotionLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trigger(mut self, emotion: Emotion, word: &str) -> Self {
        self.triggers
            .entry(emotion)
            .or_default()
            .insert(word.to_lowercase());
        self
    }

    pub fn with_modifier(mut self, word: &str, factor: f64) -> Self {
        self.modifiers.insert(word.to_lowercase(), factor);
        self
    }

    /// Categories triggered by a lower-cased lemma.
    pub fn emotions_for(&self, lemma: &str) -> impl Iterator<Item = Emotion> + '_ {
        let lemma = lemma.to_string();
        Emotion::ALL
            .into_iter()
            .filter(move |e| self.triggers.get(e).is_some_and(|set| set.contains(&lemma)))
    }

    /// Any category triggered by a lower-cased lemma.
    pub fn is_trigger(&self, lemma: &str) -> bool {
        self.triggers.values().any(|set| set.contains(lemma))
    }

    pub fn modifier(&self, lemma: &str) -> Option<f64> {
        self.modifiers.get(lemma).copied()
    }

    pub fn is_negator(&self, lemma: &str) -> bool {
        self.negators.contains(lemma)
    }

    /// Whether any trigger of `emotion` occurs as a whole word or phrase in
    /// the text.
    pub fn occurs_in(&self, text: &str, emotion: Emotion) -> bool {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        let Some(set) = self.triggers.get(&emotion) else {
            return false;
        };

        set.iter().any(|trigger| {
            let parts: Vec<&str> = trigger.split_whitespace().collect();
            !parts.is_empty()
                && words
                    .windows(parts.len())
                    .any(|window| window.iter().zip(&parts).all(|(w, p)| w == p))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let lexicon = EmotionLexicon::default();
        assert_eq!(lexicon.emotions_for("furious").collect::<Vec<_>>(), vec![Emotion::Anger]);
        assert_eq!(lexicon.modifier("extremely"), Some(2.0));
        assert_eq!(lexicon.modifier("hardly"), Some(0.4));
        assert!(lexicon.is_negator("hardly"));
        assert!(!lexicon.is_trigger("table"));
    }

    #[test]
    fn test_occurs_in_whole_words_and_phrases() {
        let lexicon = EmotionLexicon::default();
        assert!(lexicon.occurs_in("She was taken aback by it.", Emotion::Surprise));
        assert!(lexicon.occurs_in("A SAD day", Emotion::Sadness));
        assert!(!lexicon.occurs_in("The madness of crowds", Emotion::Anger));
    }

    #[test]
    fn test_builders() {
        let lexicon = EmotionLexicon::default()
            .with_trigger(Emotion::Joy, "Gleeful")
            .with_modifier("super", 1.6);
        assert!(lexicon.emotions_for("gleeful").any(|e| e == Emotion::Joy));
        assert_eq!(lexicon.modifier("super"), Some(1.6));
    }
}
