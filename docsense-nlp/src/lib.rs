//! docsense NLP library
//!
//! Text analysis over a single document: ensemble sentiment, emotion
//! profile, keywords, topics, readability, language style and a summary,
//! served over HTTP by [`NlpService`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                   docsense-nlp (Rust Service)                    │
//! │                             :4450                                │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  preprocess ─► document annotator ─► sentiment ─► emotion        │
//! │                        │                                         │
//! │                        ├─► keywords    ├─► topics                │
//! │                        ├─► language    └─► readability           │
//! │                        └─► summary                               │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Remote models (neural sentiment, emotion classifier, embeddings,
//! summarizer) are optional. When one is missing or failing its signal is
//! dropped and the report carries the component status instead.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod document;
pub mod emotion;
pub mod error;
pub mod keywords;
pub mod language;
pub mod models;
pub mod pipeline;
pub mod preprocess;
pub mod readability;
pub mod routes;
pub mod sentiment;
pub mod summary;
pub mod topics;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use docsense_common::config::Config;

pub use error::{AnalysisError, AnalysisFailure};
pub use pipeline::{AnalysisPipeline, AnalysisReport, AnalysisRequest, PipelineConfig};

/// Shared service state
pub struct NlpState {
    /// Configuration
    pub config: Config,
    /// Analysis pipeline, read-only across requests
    pub pipeline: Arc<AnalysisPipeline>,
}

impl NlpState {
    /// Build state and the pipeline from configuration.
    pub fn new(config: Config) -> Self {
        let pipeline = Arc::new(AnalysisPipeline::from_config(&config));
        Self { config, pipeline }
    }
}

/// Main analysis service
pub struct NlpService {
    state: Arc<NlpState>,
}

impl NlpService {
    /// Create a new analysis service. Call from within the tokio runtime.
    pub fn new(config: Config) -> Self {
        let state = Arc::new(NlpState::new(config));
        Self { state }
    }

    /// Start the HTTP server and run until shutdown.
    pub async fn start(self) -> Result<()> {
        let service = &self.state.config.service;

        let origins: Vec<HeaderValue> = service
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any);

        let app = routes::build_router(self.state.clone())
            .layer(RequestBodyLimitLayer::new(service.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(service.request_timeout_secs)))
            .layer(cors);

        let addr: SocketAddr = self
            .state
            .config
            .bind_address()
            .parse()
            .context("Invalid bind address")?;
        tracing::info!(address = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
