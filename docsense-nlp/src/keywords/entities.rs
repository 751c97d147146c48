use serde::Serialize;
use std::collections::HashMap;

use docsense_common::util::{round_to, truncate_with_ellipsis};

use crate::document::{AnnotatedDocument, EntityLabel};

const CANDIDATES: usize = 15;
const MAX_CONTEXTS: usize = 2;
const CONTEXT_CHARS: usize = 100;
const MAX_CONFIDENCE: f64 = 0.95;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedEntity {
    pub entity: String,
    #[serde(rename = "type")]
    pub label: EntityLabel,
    pub frequency: usize,
    pub confidence: f64,
    /// Sentences the entity appears in, shortened
    pub contexts: Vec<String>,
}

/// Heuristic confidence from frequency, category and capitalisation.
pub fn entity_confidence(text: &str, label: EntityLabel, frequency: usize) -> f64 {
    let mut confidence = 0.5 + (frequency as f64 * 0.1).min(0.3);
    confidence += match label {
        EntityLabel::Person | EntityLabel::Org | EntityLabel::Gpe | EntityLabel::Loc => 0.2,
        EntityLabel::Date | EntityLabel::Time | EntityLabel::Money | EntityLabel::Percent => 0.1,
        _ => 0.0,
    };
    if text.chars().next().is_some_and(char::is_uppercase) {
        confidence += 0.1;
    }
    confidence.min(MAX_CONFIDENCE)
}

/// Entity mentions grouped by text and category, most frequent first.
pub fn named_entities(doc: &AnnotatedDocument, limit: usize) -> Vec<NamedEntity> {
    let mut counts: HashMap<(String, EntityLabel), usize> = HashMap::new();
    let mut order: Vec<(String, EntityLabel)> = Vec::new();
    let mut contexts: HashMap<String, Vec<String>> = HashMap::new();

    for span in &doc.entities {
        let key = (span.text.clone(), span.label);
        let count = counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;

        let snippets = contexts.entry(span.text.clone()).or_default();
        if snippets.len() < MAX_CONTEXTS {
            if let Some(sentence) = doc.sentences.get(span.sentence) {
                snippets.push(truncate_with_ellipsis(sentence.text.trim(), CONTEXT_CHARS));
            }
        }
    }

    let mut ranked: Vec<((String, EntityLabel), usize)> = order
        .into_iter()
        .map(|key| {
            let n = counts.get(&key).copied().unwrap_or(0);
            (key, n)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(CANDIDATES.min(limit));

    ranked
        .into_iter()
        .map(|((entity, label), frequency)| NamedEntity {
            confidence: round_to(entity_confidence(&entity, label, frequency), 3),
            contexts: contexts.get(&entity).cloned().unwrap_or_default(),
            entity,
            label,
            frequency,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentAnnotator, RuleBasedAnnotator};
    use test_case::test_case;

    #[test_case("Google", EntityLabel::Org, 1 => 0.9 ; "org once")]
    #[test_case("Google", EntityLabel::Org, 5 => 0.95 ; "capped")]
    #[test_case("2019", EntityLabel::Date, 2 => 0.8 ; "date")]
    #[test_case("three", EntityLabel::Cardinal, 1 => 0.6 ; "lowercase cardinal")]
    fn test_confidence(text: &str, label: EntityLabel, frequency: usize) -> f64 {
        round_to(entity_confidence(text, label, frequency), 3)
    }

    #[test]
    fn test_grouping_and_contexts() {
        let doc = RuleBasedAnnotator::new()
            .annotate(
                "Dr. Maria Lopez joined Acme Corporation in 2019. Later Dr. Maria Lopez \
                 moved to Paris. Dr. Maria Lopez still consults for Acme Corporation.",
            )
            .unwrap();
        let entities = named_entities(&doc, 10);
        let acme = entities
            .iter()
            .find(|e| e.entity == "Acme Corporation")
            .unwrap();
        assert_eq!(acme.label, EntityLabel::Org);
        assert_eq!(acme.frequency, 2);
        assert_eq!(acme.contexts.len(), 2);
        assert!(entities[0].frequency >= entities.last().unwrap().frequency);
    }

    #[test]
    fn test_no_entities() {
        let doc = RuleBasedAnnotator::new()
            .annotate("the cat sat on the mat.")
            .unwrap();
        assert!(named_entities(&doc, 10).is_empty());
    }
}
