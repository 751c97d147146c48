//! Keyword, phrase and entity extraction.
//!
//! Two keyword sources are fused by normalised term: a frequency source that
//! weights content lemmas by grammatical role, and a statistical source
//! (YAKE). Key phrases come from noun chunks and verb-object dependencies;
//! entities are grouped mentions from the annotated document.

mod entities;
mod frequency;
mod fusion;
mod phrases;
mod statistical;

pub use entities::{entity_confidence, named_entities, NamedEntity};
pub use frequency::frequency_keywords;
pub use fusion::fuse;
pub use phrases::{key_phrases, KeyPhrase, PhraseType};
pub use statistical::{StatisticalConfig, StatisticalExtractor};

use serde::Serialize;
use std::collections::BTreeSet;

use docsense_common::util::round_to;

use crate::document::AnnotatedDocument;

/// Which extractor reported a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordSource {
    Frequency,
    Statistical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    /// Lower-cased term, unique within a fused list
    pub term: String,
    pub frequency: usize,
    pub relevance: f64,
    pub weight: f64,
    pub sources: BTreeSet<KeywordSource>,
}

impl Keyword {
    pub fn new(
        term: String,
        frequency: usize,
        relevance: f64,
        weight: f64,
        source: KeywordSource,
    ) -> Self {
        Self {
            term,
            frequency,
            relevance,
            weight,
            sources: BTreeSet::from([source]),
        }
    }

    fn rounded(mut self) -> Self {
        self.relevance = round_to(self.relevance, 4);
        self.weight = round_to(self.weight, 3);
        self
    }
}

#[derive(Debug, Clone)]
pub struct KeywordConfig {
    /// Candidates taken from the frequency source
    pub frequency_candidates: usize,
    pub statistical: StatisticalConfig,
    /// Fused keywords reported
    pub max_keywords: usize,
    pub max_phrases: usize,
    pub max_entities: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            frequency_candidates: 20,
            statistical: StatisticalConfig::default(),
            max_keywords: 15,
            max_phrases: 8,
            max_entities: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordReport {
    pub keywords: Vec<Keyword>,
    pub key_phrases: Vec<KeyPhrase>,
    pub named_entities: Vec<NamedEntity>,
}

#[derive(Debug)]
pub struct KeywordExtractor {
    config: KeywordConfig,
    statistical: StatisticalExtractor,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(KeywordConfig::default())
    }
}

impl KeywordExtractor {
    pub fn new(config: KeywordConfig) -> Self {
        Self {
            statistical: StatisticalExtractor::new(config.statistical.clone()),
            config,
        }
    }

    pub fn extract(&self, doc: &AnnotatedDocument) -> KeywordReport {
        let frequency = frequency_keywords(&doc.tokens, self.config.frequency_candidates);
        let statistical = self.statistical.extract(&doc.text);
        tracing::trace!(
            frequency = frequency.len(),
            statistical = statistical.len(),
            "Keyword candidates"
        );

        KeywordReport {
            keywords: fuse(vec![frequency, statistical], self.config.max_keywords)
                .into_iter()
                .map(Keyword::rounded)
                .collect(),
            key_phrases: key_phrases(doc, self.config.max_phrases),
            named_entities: named_entities(doc, self.config.max_entities),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentAnnotator, RuleBasedAnnotator};
    use std::collections::HashSet;

    #[test]
    fn test_extract_report() {
        let text = "Solar energy is growing quickly. Solar panels convert sunlight into energy. \
                    Many households in Germany now install solar panels on their roofs.";
        let doc = RuleBasedAnnotator::new().annotate(text).unwrap();
        let report = KeywordExtractor::default().extract(&doc);

        assert!(!report.keywords.is_empty());
        assert!(report.keywords.len() <= 15);
        let terms: HashSet<&str> = report.keywords.iter().map(|k| k.term.as_str()).collect();
        assert_eq!(terms.len(), report.keywords.len());
        assert!(terms.contains("solar"));
        assert!(report.named_entities.iter().any(|e| e.entity == "Germany"));
    }

    #[test]
    fn test_sources_serialize_as_tags() {
        let mut kw = Keyword::new("solar".into(), 2, 0.5, 1.0, KeywordSource::Frequency);
        kw.sources.insert(KeywordSource::Statistical);
        let value = serde_json::to_value(&kw).unwrap();
        assert_eq!(value["sources"], serde_json::json!(["frequency", "statistical"]));
    }
}
