//! HTTP-backed model adapters.
//!
//! Each adapter posts `{"inputs": text}` to a configured endpoint and accepts
//! the common inference-server response shapes (a bare object, a list, or a
//! list of lists). Calls are synchronous from the caller's point of view: the
//! request runs on the tokio runtime captured at construction and the caller
//! blocks on it, bounded by the client timeout. Call sites must therefore be
//! blocking threads (`spawn_blocking`, rayon), never runtime workers.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::runtime::Handle;

use super::{ClassifierOutput, Embedder, ModelError, SentimentClassifier, Summarizer};
use crate::emotion::{Emotion, EmotionClassifier};

/// Shared HTTP plumbing for remote models.
#[derive(Debug, Clone)]
struct RemoteClient {
    endpoint: String,
    client: Client,
    runtime: Handle,
}

impl RemoteClient {
    fn new(endpoint: &str, timeout: Duration) -> Result<Self, ModelError> {
        let runtime = Handle::try_current()
            .map_err(|_| ModelError::Unavailable("no async runtime for remote model".into()))?;
        let endpoint = endpoint.trim_end_matches('/');
        reqwest::Url::parse(endpoint)
            .map_err(|e| ModelError::Unavailable(format!("invalid endpoint {endpoint}: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| ModelError::Unavailable(format!("http client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
            runtime,
        })
    }

    fn infer(&self, text: &str) -> Result<Value, ModelError> {
        let body = json!({ "inputs": text });
        self.runtime.block_on(async {
            let response = self
                .client
                .post(&self.endpoint)
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    if e.is_connect() {
                        ModelError::Unavailable(format!("{}: {e}", self.endpoint))
                    } else {
                        ModelError::Inference(e.to_string())
                    }
                })?;

            let status = response.status();
            if status == reqwest::StatusCode::SERVICE_UNAVAILABLE
                || status == reqwest::StatusCode::NOT_FOUND
            {
                return Err(ModelError::Unavailable(format!(
                    "{} returned {status}",
                    self.endpoint
                )));
            }
            if !status.is_success() {
                return Err(ModelError::Inference(format!(
                    "{} returned {status}",
                    self.endpoint
                )));
            }

            response
                .json::<Value>()
                .await
                .map_err(|e| ModelError::Inference(format!("invalid response: {e}")))
        })
    }
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Flatten `{..}`, `[{..}]` and `[[{..}]]` into label/score pairs.
fn label_scores(value: Value) -> Result<Vec<LabelScore>, ModelError> {
    let items = match value {
        Value::Array(outer) if outer.first().is_some_and(Value::is_array) => outer
            .into_iter()
            .next()
            .and_then(|v| match v {
                Value::Array(inner) => Some(inner),
                _ => None,
            })
            .unwrap_or_default(),
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(ModelError::Inference(format!(
                "unexpected response shape: {other}"
            )))
        }
    };

    items
        .into_iter()
        .map(|v| {
            serde_json::from_value::<LabelScore>(v)
                .map_err(|e| ModelError::Inference(format!("invalid label score: {e}")))
        })
        .collect()
}

// ============================================================================
// Sentiment
// ============================================================================

/// Neural sentiment classifier behind an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct RemoteSentimentClassifier {
    remote: RemoteClient,
}

impl RemoteSentimentClassifier {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ModelError> {
        Ok(Self {
            remote: RemoteClient::new(endpoint, timeout)?,
        })
    }
}

impl SentimentClassifier for RemoteSentimentClassifier {
    fn classify(&self, text: &str) -> Result<ClassifierOutput, ModelError> {
        let scores = label_scores(self.remote.infer(text)?)?;
        scores
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|best| ClassifierOutput {
                label: best.label,
                score: best.score,
            })
            .ok_or_else(|| ModelError::Inference("empty classifier response".into()))
    }

    fn name(&self) -> &str {
        "remote-sentiment"
    }
}

// ============================================================================
// Emotion
// ============================================================================

/// Multi-label emotion classifier behind an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct RemoteEmotionClassifier {
    remote: RemoteClient,
}

impl RemoteEmotionClassifier {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ModelError> {
        Ok(Self {
            remote: RemoteClient::new(endpoint, timeout)?,
        })
    }
}

impl EmotionClassifier for RemoteEmotionClassifier {
    fn classify(&self, text: &str) -> Result<Vec<(Emotion, f64)>, ModelError> {
        let scores = label_scores(self.remote.infer(text)?)?;
        Ok(scores
            .into_iter()
            .filter_map(|s| Emotion::from_label(&s.label).map(|e| (e, s.score)))
            .collect())
    }

    fn name(&self) -> &str {
        "remote-emotion"
    }
}

// ============================================================================
// Embeddings
// ============================================================================

/// Sentence embedder behind an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct RemoteEmbedder {
    remote: RemoteClient,
}

impl RemoteEmbedder {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ModelError> {
        Ok(Self {
            remote: RemoteClient::new(endpoint, timeout)?,
        })
    }
}

/// Accept a flat vector or token-level rows (mean pooled).
fn pool_embedding(value: Value) -> Result<Vec<f32>, ModelError> {
    let rows: Vec<Vec<f32>> = match serde_json::from_value::<Vec<f32>>(value.clone()) {
        Ok(flat) => vec![flat],
        Err(_) => match serde_json::from_value::<Vec<Vec<f32>>>(value.clone()) {
            Ok(rows) => rows,
            Err(_) => serde_json::from_value::<Vec<Vec<Vec<f32>>>>(value)
                .map_err(|e| ModelError::Inference(format!("invalid embedding: {e}")))?
                .into_iter()
                .next()
                .unwrap_or_default(),
        },
    };

    let dim = rows.first().map_or(0, Vec::len);
    if dim == 0 || rows.iter().any(|r| r.len() != dim) {
        return Err(ModelError::Inference("empty or ragged embedding".into()));
    }
    let mut pooled = vec![0f32; dim];
    for row in &rows {
        for (acc, v) in pooled.iter_mut().zip(row) {
            *acc += v;
        }
    }
    let n = rows.len() as f32;
    pooled.iter_mut().for_each(|v| *v /= n);
    Ok(pooled)
}

impl Embedder for RemoteEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, ModelError> {
        pool_embedding(self.remote.infer(text)?)
    }

    fn name(&self) -> &str {
        "remote-embedding"
    }
}

// ============================================================================
// Summarization
// ============================================================================

/// Abstractive summarizer behind an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct RemoteSummarizer {
    remote: RemoteClient,
}

impl RemoteSummarizer {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ModelError> {
        Ok(Self {
            remote: RemoteClient::new(endpoint, timeout)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    #[serde(alias = "generated_text")]
    summary_text: String,
}

/// Accept `{"summary_text": ..}`, a list of those, or a bare string.
fn summary_text(value: Value) -> Result<String, ModelError> {
    let item = match value {
        Value::String(text) => return Ok(text.trim().to_string()),
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::Inference("empty summarizer response".into()))?,
        other => other,
    };
    serde_json::from_value::<GeneratedText>(item)
        .map(|g| g.summary_text.trim().to_string())
        .map_err(|e| ModelError::Inference(format!("invalid summary: {e}")))
}

impl Summarizer for RemoteSummarizer {
    fn summarize(&self, text: &str) -> Result<String, ModelError> {
        summary_text(self.remote.infer(text)?)
    }

    fn name(&self) -> &str {
        "remote-summarizer"
    }
}
