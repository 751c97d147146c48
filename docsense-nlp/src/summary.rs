//! Document summarization.
//!
//! Short documents pass through unchanged. Longer ones go to the configured
//! [`Summarizer`] in sentence-aligned chunks whose summaries are joined, and
//! re-summarized when the joined text is still long. Without a model, or when
//! every model call fails, the most central sentences are extracted instead.

use serde::Serialize;
use std::sync::Arc;

use docsense_common::util::{round_to, truncate_chars, word_count};

use crate::document::AnnotatedDocument;
use crate::models::{map_chunks, ComponentStatus, Summarizer};
use crate::topics::vectorize;

#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// Documents with fewer words are returned as they are
    pub min_words: usize,
    /// Passthrough summaries are cut to this many characters
    pub passthrough_chars: usize,
    /// Model input budget per chunk, in words
    pub max_chunk_words: usize,
    /// Joined chunk summaries longer than this are summarized again
    pub combine_limit_words: usize,
    /// Upper bound on extracted sentences
    pub max_extracted_sentences: usize,
    pub parallel_chunks: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            min_words: 50,
            passthrough_chars: 500,
            max_chunk_words: 380,
            combine_limit_words: 200,
            max_extracted_sentences: 5,
            parallel_chunks: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMethod {
    Empty,
    Passthrough,
    Abstractive,
    Extractive,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub summary: String,
    pub method: SummaryMethod,
    pub confidence: f64,
    pub chunks_processed: usize,
    pub original_word_count: usize,
    pub summary_word_count: usize,
    /// Summary words over original words, two decimals
    pub compression_ratio: f64,
}

impl DocumentSummary {
    fn new(summary: String, method: SummaryMethod, confidence: f64, original: usize) -> Self {
        let summary_word_count = word_count(&summary);
        let compression_ratio = if original == 0 {
            0.0
        } else {
            round_to(summary_word_count as f64 / original as f64, 2)
        };
        Self {
            summary,
            method,
            confidence,
            chunks_processed: 0,
            original_word_count: original,
            summary_word_count,
            compression_ratio,
        }
    }
}

pub struct DocumentSummarizer {
    config: SummaryConfig,
    model: Option<Arc<dyn Summarizer>>,
}

impl std::fmt::Debug for DocumentSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSummarizer")
            .field("config", &self.config)
            .field("model", &self.model.as_ref().map(|m| m.name().to_string()))
            .finish()
    }
}

impl Default for DocumentSummarizer {
    fn default() -> Self {
        Self::new(SummaryConfig::default())
    }
}

impl DocumentSummarizer {
    pub fn new(config: SummaryConfig) -> Self {
        Self {
            config,
            model: None,
        }
    }

    pub fn with_model(mut self, model: Arc<dyn Summarizer>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Summarize a document, reporting the model status for the run.
    pub fn summarize(&self, doc: &AnnotatedDocument) -> (DocumentSummary, ComponentStatus) {
        let text = doc.text.trim();
        let words = word_count(text);

        if words == 0 {
            return (
                DocumentSummary::new(String::new(), SummaryMethod::Empty, 0.0, 0),
                ComponentStatus::Unavailable,
            );
        }
        if words < self.config.min_words {
            let summary = if text.chars().count() > self.config.passthrough_chars {
                format!("{}...", truncate_chars(text, self.config.passthrough_chars))
            } else {
                text.to_string()
            };
            let mut result = DocumentSummary::new(summary, SummaryMethod::Passthrough, 1.0, words);
            result.summary_word_count = words;
            result.compression_ratio = 1.0;
            return (result, ComponentStatus::Unavailable);
        }

        let Some(model) = &self.model else {
            return (self.extract(doc, words), ComponentStatus::Unavailable);
        };

        let chunks = pack_sentences(&doc.sentence_texts(), self.config.max_chunk_words);
        let results = map_chunks(&chunks, self.config.parallel_chunks, |c| model.summarize(c));
        let attempted = results.len();
        let summaries: Vec<String> = results
            .into_iter()
            .filter_map(|r| match r {
                Ok(summary) if !summary.trim().is_empty() => Some(summary),
                Ok(_) => None,
                Err(e) => {
                    tracing::debug!(model = model.name(), error = %e, "Summary chunk failed");
                    None
                }
            })
            .collect();
        let status = ComponentStatus::from_counts(summaries.len(), attempted);

        if summaries.is_empty() {
            tracing::warn!(
                model = model.name(),
                chunks = attempted,
                "Summarizer failed, extracting sentences"
            );
            return (self.extract(doc, words), status);
        }

        let chunks_processed = summaries.len();
        let summary = self.combine(model.as_ref(), summaries);
        let mut result = DocumentSummary::new(summary, SummaryMethod::Abstractive, 0.85, words);
        result.chunks_processed = chunks_processed;
        (result, status)
    }

    /// Join chunk summaries, summarizing again when the result is long.
    fn combine(&self, model: &dyn Summarizer, mut summaries: Vec<String>) -> String {
        if summaries.len() == 1 {
            return summaries.remove(0);
        }
        let joined = summaries.join(" ");
        if word_count(&joined) <= self.config.combine_limit_words {
            return joined;
        }
        match model.summarize(&joined) {
            Ok(summary) if !summary.trim().is_empty() => summary,
            Ok(_) | Err(_) => summaries.remove(0),
        }
    }

    /// Pick the sentences closest to the document centroid, in document order.
    fn extract(&self, doc: &AnnotatedDocument, words: usize) -> DocumentSummary {
        let sentences: Vec<(&str, Vec<String>)> = doc
            .sentences
            .iter()
            .map(|s| {
                let terms = doc
                    .sentence_tokens(s)
                    .iter()
                    .filter(|t| t.is_content())
                    .map(|t| t.lemma_lower())
                    .collect();
                (s.text.trim(), terms)
            })
            .filter(|(text, _)| !text.is_empty())
            .collect();

        let terms: Vec<Vec<String>> = sentences.iter().map(|(_, t)| t.clone()).collect();
        let matrix = vectorize(&terms, 500);
        let dim = matrix.vocabulary.len();
        let mut centroid = vec![0.0; dim];
        for row in &matrix.rows {
            for (acc, v) in centroid.iter_mut().zip(row) {
                *acc += v;
            }
        }

        let keep = (sentences.len() as f64 * 0.2)
            .round()
            .clamp(1.0, self.config.max_extracted_sentences as f64) as usize;
        let mut ranked: Vec<(usize, f64)> = matrix
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i, row.iter().zip(&centroid).map(|(a, b)| a * b).sum()))
            .collect();
        // Stable sort keeps earlier sentences ahead on ties
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        let mut chosen: Vec<usize> = ranked.into_iter().take(keep).map(|(i, _)| i).collect();
        chosen.sort_unstable();

        let summary = chosen
            .into_iter()
            .map(|i| sentences[i].0)
            .collect::<Vec<_>>()
            .join(" ");
        let mut result = DocumentSummary::new(summary, SummaryMethod::Extractive, 0.6, words);
        result.chunks_processed = 1;
        result
    }
}

/// Pack sentences greedily into chunks of at most `max_words` words. A single
/// longer sentence becomes its own chunk.
fn pack_sentences(sentences: &[&str], max_words: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_words = 0;

    for sentence in sentences {
        let words = word_count(sentence);
        if !current.is_empty() && current_words + words > max_words {
            chunks.push(current.join(" "));
            current.clear();
            current_words = 0;
        }
        current.push(sentence);
        current_words += words;
    }
    if !current.is_empty() {
        chunks.push(current.join(" "));
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentAnnotator, RuleBasedAnnotator};
    use crate::models::ModelError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CITY: &str = "The city council met on Monday to discuss the new budget. \
        Council members debated funding for parks, roads and public libraries. \
        The mayor argued that the budget must protect library hours. \
        Several residents spoke about potholes on the main roads near the river. \
        After a long debate the council approved the budget with small changes. \
        The approved budget adds money for road repairs and library staff. \
        Park funding stays the same as last year. \
        The next council meeting will review the school transport plan.";

    /// Returns the first sentence of its input and counts calls.
    struct LeadSummarizer {
        calls: AtomicUsize,
    }

    impl LeadSummarizer {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Summarizer for LeadSummarizer {
        fn summarize(&self, text: &str) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let end = text.find(". ").map_or(text.len(), |i| i + 1);
            Ok(text[..end].to_string())
        }

        fn name(&self) -> &str {
            "lead"
        }
    }

    struct DownSummarizer;

    impl Summarizer for DownSummarizer {
        fn summarize(&self, _text: &str) -> Result<String, ModelError> {
            Err(ModelError::Unavailable("down".into()))
        }

        fn name(&self) -> &str {
            "down"
        }
    }

    fn annotate(text: &str) -> AnnotatedDocument {
        RuleBasedAnnotator::new().annotate(text).unwrap()
    }

    #[test]
    fn test_short_text_passes_through() {
        let text = "The council approved the budget on Monday.";
        let summarizer = DocumentSummarizer::default().with_model(Arc::new(DownSummarizer));
        let (summary, status) = summarizer.summarize(&annotate(text));

        assert_eq!(summary.method, SummaryMethod::Passthrough);
        assert_eq!(summary.summary, text);
        assert_eq!(summary.confidence, 1.0);
        assert_eq!(summary.compression_ratio, 1.0);
        assert_eq!(summary.original_word_count, 7);
        assert_eq!(summary.chunks_processed, 0);
        assert_eq!(status, ComponentStatus::Unavailable);
    }

    #[test]
    fn test_long_passthrough_is_cut() {
        let text = vec!["Supercalifragilisticexpialidocious"; 20].join(" ");
        let (summary, _) = DocumentSummarizer::default().summarize(&annotate(&text));
        assert_eq!(summary.method, SummaryMethod::Passthrough);
        assert_eq!(summary.summary.chars().count(), 503);
        assert!(summary.summary.ends_with("..."));
    }

    #[test]
    fn test_abstractive_ratio() {
        let model = Arc::new(LeadSummarizer::new());
        let summarizer = DocumentSummarizer::default().with_model(model.clone());
        let (summary, status) = summarizer.summarize(&annotate(CITY));

        assert_eq!(status, ComponentStatus::Available);
        assert_eq!(summary.method, SummaryMethod::Abstractive);
        assert_eq!(summary.summary, "The city council met on Monday to discuss the new budget.");
        assert_eq!(summary.chunks_processed, 1);
        assert_eq!(summary.summary_word_count, 11);
        let expected = round_to(11.0 / summary.original_word_count as f64, 2);
        assert_eq!(summary.compression_ratio, expected);
        assert!(summary.compression_ratio < 1.0);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_long_document_is_chunked() {
        let model = Arc::new(LeadSummarizer::new());
        let summarizer = DocumentSummarizer::new(SummaryConfig {
            max_chunk_words: 30,
            parallel_chunks: false,
            ..SummaryConfig::default()
        })
        .with_model(model.clone());
        let (summary, _) = summarizer.summarize(&annotate(CITY));

        assert!(summary.chunks_processed > 1);
        assert!(summary.summary.starts_with("The city council met on Monday"));
        // Joined summaries stay under the combine limit, no second pass
        assert_eq!(model.calls.load(Ordering::SeqCst), summary.chunks_processed);
    }

    #[test]
    fn test_failed_model_falls_back_to_extraction() {
        let summarizer = DocumentSummarizer::default().with_model(Arc::new(DownSummarizer));
        let (summary, status) = summarizer.summarize(&annotate(CITY));

        assert_eq!(status, ComponentStatus::Unavailable);
        assert_eq!(summary.method, SummaryMethod::Extractive);
        let doc = annotate(CITY);
        let extracted = doc
            .sentence_texts()
            .iter()
            .filter(|s| summary.summary.contains(*s))
            .count();
        assert_eq!(extracted, 2);
        assert!(summary.compression_ratio > 0.0 && summary.compression_ratio < 1.0);
    }

    #[test]
    fn test_extraction_keeps_document_order() {
        let (summary, _) = DocumentSummarizer::default().summarize(&annotate(CITY));
        let doc = annotate(CITY);
        let positions: Vec<usize> = doc
            .sentence_texts()
            .iter()
            .filter_map(|s| summary.summary.find(s))
            .collect();
        assert!(!positions.is_empty());
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_pack_sentences() {
        let chunks = pack_sentences(&["one two three.", "four five.", "six seven eight nine."], 5);
        assert_eq!(chunks, vec!["one two three. four five.", "six seven eight nine."]);
        assert!(pack_sentences(&[], 5).is_empty());
    }
}
