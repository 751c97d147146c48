//! Cluster-based topic extraction.
//!
//! Sentences are vectorised with TF-IDF over unigrams and bigrams of their
//! content lemmas, clustered with seeded k-means, and each populated
//! cluster becomes a topic named after its strongest centroid terms. Topic
//! intensity is then tracked across overlapping sentence windows.

mod evolution;
mod kmeans;
mod modeler;
mod tfidf;

pub use evolution::{segments, track, SentenceRange, TopicEvolutionPoint};
pub use kmeans::{distance, kmeans, squared_distance, Clustering, KMeansConfig};
pub use modeler::{Topic, TopicConfig, TopicModel, TopicModeler};
pub use tfidf::{vectorize, TfidfMatrix};
