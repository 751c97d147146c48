//! HTTP routes for the analysis service.

use axum::{
    extract::State,
    http::HeaderMap,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use docsense_common::logging::RequestContext;

use crate::error::{AnalysisError, AnalysisFailure};
use crate::pipeline::{AnalysisReport, AnalysisRequest};
use crate::NlpState;

const SERVICE_NAME: &str = "docsense-nlp";

// ============================================================================
// Request / Response Types
// ============================================================================

/// One block of an upstream parsed document.
#[derive(Debug, Clone, Deserialize)]
pub struct TextBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub text: String,
}

/// Analyze request body. Either `text` or `text_blocks` must be present.
#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub text_blocks: Vec<TextBlock>,
    #[serde(default)]
    pub readability_metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl AnalyzeBody {
    fn into_request(self) -> docsense_common::Result<AnalysisRequest> {
        let text = match (self.text, self.text_blocks.is_empty()) {
            (Some(text), _) => text,
            (None, false) => self
                .text_blocks
                .iter()
                .map(|b| b.text.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n\n"),
            (None, true) => {
                return Err(docsense_common::Error::InvalidInput(
                    "either `text` or `text_blocks` is required".into(),
                ))
            }
        };

        Ok(AnalysisRequest {
            text,
            readability_metrics: self.readability_metrics,
            metadata: self.metadata,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

// ============================================================================
// Router
// ============================================================================

pub fn build_router(state: Arc<NlpState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/analyze", post(analyze))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Run the full analysis on one document.
pub async fn analyze(
    State(state): State<Arc<NlpState>>,
    headers: HeaderMap,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalysisReport>, AnalysisFailure> {
    let ctx = RequestContext::from_headers(&headers, SERVICE_NAME);
    let request = body
        .into_request()
        .map_err(|e| AnalysisFailure::new(e.into(), ctx.trace_id.clone()))?;

    tracing::debug!(
        trace_id = %ctx.trace_id,
        chars = request.text.len(),
        "Analysis request received"
    );

    let pipeline = state.pipeline.clone();
    let trace_id = ctx.trace_id.clone();
    let span = docsense_common::request_span!("analyze", ctx.trace_id, service = SERVICE_NAME);
    let report = tokio::task::spawn_blocking(move || {
        let _enter = span.enter();
        pipeline.analyze(&request, &trace_id)
    })
    .await
    .map_err(|e| {
        AnalysisFailure::new(AnalysisError::Internal(e.to_string()), ctx.trace_id.clone())
    })??;

    tracing::debug!(
        trace_id = %ctx.trace_id,
        elapsed_ms = ctx.elapsed_ms(),
        "Analysis response ready"
    );
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{AnalysisPipeline, PipelineConfig};
    use axum::{body::Body, http::Request, http::StatusCode};
    use docsense_common::config::Config;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app(min_word_count: usize) -> Router {
        let pipeline = AnalysisPipeline::new(PipelineConfig {
            min_word_count,
            ..PipelineConfig::default()
        });
        build_router(Arc::new(NlpState {
            config: Config::default(),
            pipeline: Arc::new(pipeline),
        }))
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header("content-type", "application/json")
            .header("x-trace-id", "trace-abc")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = test_app(50)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "docsense-nlp");
    }

    #[tokio::test]
    async fn test_analyze_text() {
        let response = test_app(5)
            .oneshot(post_json(
                r#"{"text": "The garden is lovely in spring. The roses bloom early and the paths are clean."}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["metadata"]["trace_id"], "trace-abc");
        assert_eq!(body["metadata"]["sentence_count"], 2);
        assert!(body["sentiment_analysis"]["overall_sentiment"]["label"].is_string());
        assert!(body["keyword_extraction"]["keywords"].is_array());
        assert!(body["readability"]["difficulty_score"].is_number());
    }

    #[tokio::test]
    async fn test_analyze_text_blocks() {
        let response = test_app(5)
            .oneshot(post_json(
                r#"{
                    "text_blocks": [
                        {"type": "heading", "text": "Annual report"},
                        {"type": "paragraph", "text": "Revenue grew in every region this year."}
                    ],
                    "metadata": {"document_id": "doc-7"}
                }"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["metadata"]["upstream"]["document_id"], "doc-7");
        assert_eq!(body["metadata"]["word_count"], 9);
    }

    #[tokio::test]
    async fn test_too_short_is_bad_request() {
        let response = test_app(50)
            .oneshot(post_json(r#"{"text": "Only a handful of words here."}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "TEXT_TOO_SHORT");
        assert_eq!(body["trace_id"], "trace-abc");
        assert_eq!(body["preprocessing"]["words_count"], 6);
    }

    #[tokio::test]
    async fn test_missing_text_is_bad_request() {
        let response = test_app(50)
            .oneshot(post_json(r#"{"metadata": {}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "INVALID_REQUEST");
    }
}
