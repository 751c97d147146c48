//! Statistical keyword extraction using YAKE.
//!
//! YAKE scores are lower for better keywords; they are inverted into a
//! relevance in (0, 1] so they can be fused with the frequency source.

use regex::Regex;
use std::collections::HashSet;
use yake_rust::{get_n_best, Config, StopWords};

use super::{Keyword, KeywordSource};

#[derive(Debug, Clone)]
pub struct StatisticalConfig {
    /// Candidates requested from YAKE
    pub candidates: usize,
    /// Candidates kept after ranking
    pub keep: usize,
    /// Maximum n-gram size
    pub ngrams: usize,
    /// Similarity above which candidates are treated as duplicates
    pub dedup_threshold: f64,
    /// Minimum characters per candidate
    pub min_chars: usize,
    /// Stop-word language (ISO 639-1)
    pub language: String,
}

impl Default for StatisticalConfig {
    fn default() -> Self {
        Self {
            candidates: 20,
            keep: 15,
            ngrams: 3,
            dedup_threshold: 0.7,
            min_chars: 3,
            language: "en".to_string(),
        }
    }
}

pub struct StatisticalExtractor {
    config: StatisticalConfig,
    stopwords: StopWords,
}

impl StatisticalExtractor {
    pub fn new(config: StatisticalConfig) -> Self {
        let stopwords = StopWords::predefined(&config.language)
            .or_else(|| StopWords::predefined("en"))
            .unwrap_or_else(|| StopWords::custom(HashSet::new()));
        Self { config, stopwords }
    }

    pub fn extract(&self, text: &str) -> Vec<Keyword> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let punctuation: HashSet<char> = [
            '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', ':', ';',
            '<', '=', '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~',
        ]
        .into_iter()
        .collect();
        let yake_config = Config {
            ngrams: self.config.ngrams,
            punctuation,
            remove_duplicates: true,
            deduplication_threshold: self.config.dedup_threshold,
            minimum_chars: self.config.min_chars,
            ..Config::default()
        };

        let lower = text.to_lowercase();
        get_n_best(self.config.candidates, text, &self.stopwords, &yake_config)
            .into_iter()
            .take(self.config.keep)
            .map(|item| {
                let term = item.keyword.to_lowercase();
                let relevance = 1.0 / (1.0 + item.score);
                Keyword::new(
                    term.clone(),
                    whole_word_count(&lower, &term),
                    relevance,
                    relevance * 10.0,
                    KeywordSource::Statistical,
                )
            })
            .collect()
    }
}

impl Default for StatisticalExtractor {
    fn default() -> Self {
        Self::new(StatisticalConfig::default())
    }
}

impl std::fmt::Debug for StatisticalExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticalExtractor")
            .field("config", &self.config)
            .finish()
    }
}

/// Whole-word occurrences of `term` in already lower-cased text.
fn whole_word_count(text: &str, term: &str) -> usize {
    Regex::new(&format!(r"\b{}\b", regex::escape(term)))
        .map_or(0, |re| re.find_iter(text).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic() {
        let extractor = StatisticalExtractor::default();
        let text = "Renewable energy adoption keeps growing. Solar panels and wind turbines \
                    now supply renewable energy to millions of homes, and renewable energy \
                    investment doubled last year.";
        let keywords = extractor.extract(text);
        assert!(!keywords.is_empty());
        assert!(keywords.len() <= 15);
        for k in &keywords {
            assert_eq!(k.term, k.term.to_lowercase());
            assert!(k.relevance > 0.0 && k.relevance <= 1.0);
            assert!((k.weight - k.relevance * 10.0).abs() < 1e-12);
            assert!(k.sources.contains(&KeywordSource::Statistical));
        }
    }

    #[test]
    fn test_empty_text() {
        assert!(StatisticalExtractor::default().extract("   ").is_empty());
    }

    #[test]
    fn test_whole_word_count() {
        let text = "the cat sat on the category of cats. the cat ran.";
        assert_eq!(whole_word_count(text, "cat"), 2);
        assert_eq!(whole_word_count(text, "the cat"), 2);
        assert_eq!(whole_word_count(text, "c++"), 0);
    }
}
