//! docsense NLP - text analysis service.
//!
//! Serves sentiment, emotion, keyword, topic, readability and style analysis
//! over HTTP.

use anyhow::Result;
use docsense_common::config::Config;
use docsense_common::logging::init_logging;
use docsense_nlp::NlpService;

#[tokio::main]
async fn main() -> Result<()> {
    // Start timing immediately for cold-start measurement
    let startup_start = std::time::Instant::now();

    let config = Config::load_and_validate()?;

    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
        &config.observability.excluded_targets,
    );

    tracing::info!("docsense NLP v{}", env!("CARGO_PKG_VERSION"));

    let service = NlpService::new(config);

    let startup_duration = startup_start.elapsed();
    tracing::info!(
        duration_ms = startup_duration.as_millis() as u64,
        "Service initialized in {:?}",
        startup_duration
    );

    service.start().await
}
