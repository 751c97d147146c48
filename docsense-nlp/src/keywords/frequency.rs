use std::collections::HashMap;

use super::{Keyword, KeywordSource};
use crate::document::{AnnotatedToken, PartOfSpeech};

/// Bonus per occurrence for long, usually domain-specific words.
const LONG_WORD_BONUS: f64 = 0.5;
const LONG_WORD_CHARS: usize = 7;

fn role_weight(pos: PartOfSpeech) -> f64 {
    match pos {
        PartOfSpeech::Noun | PartOfSpeech::Propn => 3.0,
        PartOfSpeech::Adj => 2.0,
        PartOfSpeech::Verb => 1.5,
        _ => 1.0,
    }
}

struct Tally {
    term: String,
    frequency: usize,
    role_score: f64,
}

/// Frequency and grammatical-role keywords over content tokens.
///
/// Candidates are ranked by frequency; ties keep first-occurrence order.
pub fn frequency_keywords(tokens: &[AnnotatedToken], limit: usize) -> Vec<Keyword> {
    let content: Vec<&AnnotatedToken> = tokens.iter().filter(|t| t.is_content()).collect();
    if content.is_empty() {
        return Vec::new();
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut tallies: Vec<Tally> = Vec::new();
    for token in &content {
        let term = token.lemma_lower();
        let slot = *index.entry(term.clone()).or_insert_with(|| {
            tallies.push(Tally {
                term,
                frequency: 0,
                role_score: 0.0,
            });
            tallies.len() - 1
        });
        let tally = &mut tallies[slot];
        tally.frequency += 1;
        tally.role_score += role_weight(token.pos);
        if token.text.chars().count() > LONG_WORD_CHARS {
            tally.role_score += LONG_WORD_BONUS;
        }
    }

    // stable sort keeps first-occurrence order among equal counts
    tallies.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    tallies.truncate(limit);

    let total = content.len() as f64;
    tallies
        .into_iter()
        .map(|t| {
            let freq = t.frequency as f64;
            Keyword::new(
                t.term,
                t.frequency,
                freq * t.role_score / total,
                (freq + 1.0).ln() * t.role_score,
                KeywordSource::Frequency,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentAnnotator, RuleBasedAnnotator};

    fn keywords(text: &str) -> Vec<Keyword> {
        let doc = RuleBasedAnnotator::new().annotate(text).unwrap();
        frequency_keywords(&doc.tokens, 20)
    }

    #[test]
    fn test_most_frequent_first() {
        let kws = keywords(
            "The engine runs well. The engine was rebuilt. A new engine part arrived today.",
        );
        assert_eq!(kws[0].term, "engine");
        assert_eq!(kws[0].frequency, 3);
        assert!(kws[0].sources.contains(&KeywordSource::Frequency));
    }

    #[test]
    fn test_plural_and_singular_share_lemma() {
        let kws = keywords("Our customers praised the product. One customer complained.");
        let customer = kws.iter().find(|k| k.term == "customer").unwrap();
        assert_eq!(customer.frequency, 2);
    }

    #[test]
    fn test_stop_words_and_short_tokens_excluded() {
        let kws = keywords("It is what it is, and so it goes on.");
        let terms: Vec<&str> = kws.iter().map(|k| k.term.as_str()).collect();
        for stop in ["it", "is", "what", "and", "so", "on"] {
            assert!(!terms.contains(&stop), "{stop} in {terms:?}");
        }
    }

    #[test]
    fn test_weights() {
        let kws = keywords("The gardens.");
        let garden = kws.iter().find(|k| k.term == "garden").unwrap();
        assert!((garden.relevance - 3.0).abs() < 1e-9);
        assert!((garden.weight - 2f64.ln() * 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_limit_and_empty() {
        assert!(frequency_keywords(&[], 20).is_empty());
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet";
        let doc = RuleBasedAnnotator::new().annotate(text).unwrap();
        assert_eq!(frequency_keywords(&doc.tokens, 3).len(), 3);
    }
}
