use serde::Serialize;

use docsense_common::util::round_to;

use super::evolution::{track, TopicEvolutionPoint};
use super::kmeans::{distance, kmeans, Clustering, KMeansConfig};
use super::tfidf::vectorize;
use crate::document::AnnotatedDocument;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct TopicConfig {
    /// Vocabulary cap for the TF-IDF matrix
    pub max_features: usize,
    pub min_topics: usize,
    pub max_topics: usize,
    /// One topic per this many usable sentences
    pub sentences_per_topic: usize,
    /// Highest centroid dimensions considered per topic
    pub candidate_terms: usize,
    pub keywords_per_topic: usize,
    /// Clustering parameters; `k` is derived per document
    pub kmeans: KMeansConfig,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            max_features: 50,
            min_topics: 2,
            max_topics: 5,
            sentences_per_topic: 3,
            candidate_terms: 8,
            keywords_per_topic: 5,
            kmeans: KMeansConfig::default(),
        }
    }
}

// ============================================================================
// Output
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    /// `topic_N`, numbered from 1
    pub id: String,
    #[serde(rename = "name")]
    pub label: String,
    pub keywords: Vec<String>,
    /// Share of all sentences assigned to this topic
    pub percentage: f64,
    pub coherence: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicModel {
    pub primary_topics: Vec<Topic>,
    pub topic_coherence_score: f64,
    pub topic_evolution: Vec<TopicEvolutionPoint>,
}

impl TopicModel {
    pub fn empty() -> Self {
        Self {
            primary_topics: Vec::new(),
            topic_coherence_score: 0.0,
            topic_evolution: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary_topics.is_empty()
    }
}

// ============================================================================
// Modeler
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct TopicModeler {
    config: TopicConfig,
}

impl TopicModeler {
    pub fn new(config: TopicConfig) -> Self {
        Self { config }
    }

    /// Cluster the sentences of an annotated document into topics.
    pub fn model(&self, doc: &AnnotatedDocument) -> TopicModel {
        let sentences: Vec<Vec<String>> = doc
            .sentences
            .iter()
            .map(|s| {
                doc.sentence_tokens(s)
                    .iter()
                    .filter(|t| t.is_content())
                    .map(|t| t.lemma_lower())
                    .collect()
            })
            .collect();
        self.model_terms(&sentences)
    }

    /// Cluster pre-filtered sentence terms, given in document order.
    ///
    /// Sentences without terms are left out of the clustering but still
    /// count towards topic percentages and evolution ranges.
    pub fn model_terms(&self, sentences: &[Vec<String>]) -> TopicModel {
        let usable: Vec<Vec<String>> = sentences
            .iter()
            .filter(|terms| !terms.is_empty())
            .cloned()
            .collect();
        if usable.len() < 2 {
            tracing::debug!(usable = usable.len(), "Too few sentences for topic modeling");
            return TopicModel::empty();
        }

        let matrix = vectorize(&usable, self.config.max_features);
        if matrix.is_empty() {
            return TopicModel::empty();
        }

        let k = (usable.len() / self.config.sentences_per_topic.max(1))
            .clamp(self.config.min_topics, self.config.max_topics)
            .min(usable.len());
        let params = KMeansConfig {
            k,
            ..self.config.kmeans
        };
        let Some(clustering) = kmeans(&matrix.rows, &params) else {
            return TopicModel::empty();
        };

        let mut topics = Vec::new();
        for cluster in 0..k {
            let members: Vec<usize> = clustering.members(cluster).collect();
            if members.is_empty() {
                continue;
            }
            let centroid = &clustering.centroids[cluster];
            let keywords = self.top_terms(centroid, &matrix.vocabulary);
            if keywords.is_empty() {
                continue;
            }

            let mean_distance = members
                .iter()
                .map(|&i| distance(&matrix.rows[i], centroid))
                .sum::<f64>()
                / members.len() as f64;
            let number = topics.len() + 1;
            topics.push(Topic {
                id: format!("topic_{number}"),
                label: format!("Topic {}: {}", number, title_case(&keywords[0])),
                description: format!(
                    "Topic covering: {}",
                    keywords.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
                ),
                percentage: round_to(members.len() as f64 / sentences.len() as f64 * 100.0, 1),
                coherence: round_to(1.0 / (1.0 + mean_distance), 3),
                keywords,
            });
        }

        let coherence = overall_coherence(&matrix.rows, &clustering, k);
        let evolution = track(sentences, &topics);
        tracing::debug!(
            sentences = sentences.len(),
            k,
            topics = topics.len(),
            coherence,
            "Topic model built"
        );

        TopicModel {
            primary_topics: topics,
            topic_coherence_score: round_to(coherence, 3),
            topic_evolution: evolution,
        }
    }

    /// Highest-weighted positive centroid dimensions.
    fn top_terms(&self, centroid: &[f64], vocabulary: &[String]) -> Vec<String> {
        let mut dims: Vec<usize> = (0..centroid.len()).collect();
        dims.sort_by(|&a, &b| centroid[b].total_cmp(&centroid[a]).then(a.cmp(&b)));
        dims.into_iter()
            .take(self.config.candidate_terms)
            .filter(|&d| centroid[d] > 0.0)
            .take(self.config.keywords_per_topic)
            .map(|d| vocabulary[d].clone())
            .collect()
    }
}

fn title_case(term: &str) -> String {
    term.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Separation of the clusters relative to their spread.
fn overall_coherence(points: &[Vec<f64>], clustering: &Clustering, k: usize) -> f64 {
    let fallback = (1.0 - clustering.inertia / (points.len() as f64 * 1000.0)).clamp(0.1, 0.9);

    let populated: Vec<&Vec<f64>> = (0..k)
        .filter(|&c| clustering.size(c) > 0)
        .map(|c| &clustering.centroids[c])
        .collect();
    if populated.len() < 2 {
        return fallback;
    }

    let mut inter = 0.0;
    let mut pairs = 0usize;
    for (i, a) in populated.iter().enumerate() {
        for b in &populated[i + 1..] {
            inter += distance(a, b);
            pairs += 1;
        }
    }
    let inter = inter / pairs as f64;

    let intra = points
        .iter()
        .zip(&clustering.labels)
        .map(|(p, &label)| distance(p, &clustering.centroids[label]))
        .sum::<f64>()
        / points.len() as f64;

    if intra <= 0.0 {
        return fallback;
    }
    (inter / intra).clamp(0.1, 0.95)
}
