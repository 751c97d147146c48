use serde::Serialize;
use std::collections::HashMap;

use docsense_common::util::round_to;

use crate::document::{AnnotatedDocument, DepLabel, PartOfSpeech};

const MIN_PHRASE_CHARS: usize = 4;
const CANDIDATES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhraseType {
    /// One or two words
    Simple,
    /// More than two words
    Compound,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyPhrase {
    pub phrase: String,
    pub frequency: usize,
    pub relevance: f64,
    #[serde(rename = "type")]
    pub phrase_type: PhraseType,
}

/// Noun chunks and verb-object patterns ranked by frequency.
pub fn key_phrases(doc: &AnnotatedDocument, limit: usize) -> Vec<KeyPhrase> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    let mut count = |phrase: String| {
        let entry = counts.entry(phrase.clone()).or_insert(0);
        if *entry == 0 {
            order.push(phrase);
        }
        *entry += 1;
    };

    for chunk in &doc.noun_chunks {
        let tokens = doc.chunk_tokens(chunk);
        if chunk.text.split_whitespace().count() < 2 || tokens.iter().all(|t| t.is_stop) {
            continue;
        }
        let phrase = chunk.text.trim().to_lowercase();
        if phrase.chars().count() > MIN_PHRASE_CHARS {
            count(phrase);
        }
    }

    for token in &doc.tokens {
        if token.pos != PartOfSpeech::Verb || token.is_stop {
            continue;
        }
        let mut parts = vec![token.lemma_lower()];
        parts.extend(
            doc.children(token.index)
                .filter(|c| matches!(c.dep, DepLabel::Dobj | DepLabel::Pobj | DepLabel::Attr))
                .filter(|c| !c.is_stop)
                .map(|c| c.lemma_lower()),
        );
        if parts.len() > 1 {
            count(parts.join(" "));
        }
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|p| {
            let n = counts.get(&p).copied().unwrap_or(0);
            (p, n)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(CANDIDATES.min(limit));

    let chunk_count = doc.noun_chunks.len();
    ranked
        .into_iter()
        .map(|(phrase, frequency)| {
            let relevance = if chunk_count == 0 {
                0.0
            } else {
                round_to(frequency as f64 / chunk_count as f64, 4)
            };
            let phrase_type = if phrase.split_whitespace().count() > 2 {
                PhraseType::Compound
            } else {
                PhraseType::Simple
            };
            KeyPhrase {
                phrase,
                frequency,
                relevance,
                phrase_type,
            }
        })
        .collect()
}
