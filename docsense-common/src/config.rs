//! Configuration management for docsense services.
//!
//! The analysis service reads a single configuration file at
//! `~/.docsense/config.json`, optionally overlaid by `models.json` in the
//! same directory (see [`crate::config_loader`]).
//!
//! # Configuration Priority
//!
//! 1. Environment variables (DOCSENSE_* prefix)
//! 2. Explicit config file values
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `DOCSENSE_PORT` → service.port
//! - `DOCSENSE_BIND_ADDRESS` → network.bind
//! - `DOCSENSE_LOG_LEVEL` → observability.log_level
//! - `DOCSENSE_LOG_FORMAT` → observability.log_format
//! - `DOCSENSE_MIN_WORDS` → analysis.min_word_count
//! - `DOCSENSE_SENTIMENT_MODEL_URL` → models.sentiment_url
//! - `DOCSENSE_EMOTION_MODEL_URL` → models.emotion_url
//! - `DOCSENSE_EMBEDDING_MODEL_URL` → models.embedding_url
//! - `DOCSENSE_SUMMARIZER_MODEL_URL` → models.summarizer_url

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config_loader::load_modular_config;

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".docsense"),
        |dirs| dirs.home_dir().join(".docsense"),
    )
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration for the docsense analysis service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Network binding
    #[serde(default)]
    pub network: NetworkConfig,

    /// HTTP service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Logging and tracing
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Analysis pipeline tuning
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Remote model endpoints
    #[serde(default)]
    pub models: ModelsConfig,
}

impl Config {
    /// Load configuration from the default directory, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let dir = config_dir();
        if !dir.join("config.json").exists() && !dir.join("models.json").exists() {
            tracing::info!("Config file not found, using defaults");
            let mut config = Self::default();
            config.apply_env_overrides();
            return Ok(config);
        }

        let mut config = Self::load_from_dir(&dir)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a directory holding `config.json` and/or `models.json`.
    ///
    /// Environment overrides are not applied.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let value = load_modular_config(Some(dir.to_path_buf()))?;
        serde_json::from_value(value)
            .with_context(|| format!("Failed to parse config from {}", dir.display()))
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (the environment in production).
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("DOCSENSE_PORT") {
            if let Ok(p) = port.parse() {
                self.service.port = p;
            }
        }
        if let Some(bind) = lookup("DOCSENSE_BIND_ADDRESS") {
            self.network.bind = bind;
        }
        if let Some(level) = lookup("DOCSENSE_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = lookup("DOCSENSE_LOG_FORMAT") {
            self.observability.log_format = format;
        }
        if let Some(words) = lookup("DOCSENSE_MIN_WORDS") {
            if let Ok(n) = words.parse() {
                self.analysis.min_word_count = n;
            }
        }
        if let Some(url) = lookup("DOCSENSE_SENTIMENT_MODEL_URL") {
            self.models.sentiment_url = non_empty(url);
        }
        if let Some(url) = lookup("DOCSENSE_EMOTION_MODEL_URL") {
            self.models.emotion_url = non_empty(url);
        }
        if let Some(url) = lookup("DOCSENSE_EMBEDDING_MODEL_URL") {
            self.models.embedding_url = non_empty(url);
        }
        if let Some(url) = lookup("DOCSENSE_SUMMARIZER_MODEL_URL") {
            self.models.summarizer_url = non_empty(url);
        }
    }

    /// Socket address string the HTTP service binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.network.bind, self.service.port)
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Network configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Bind address (e.g. "127.0.0.1", "0.0.0.0")
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// HTTP service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
            cors_origins: Vec::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,

    /// Additional module targets to hold at `warn`.
    #[serde(default)]
    pub excluded_targets: Vec<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            excluded_targets: Vec::new(),
        }
    }
}

/// Analysis pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Documents with fewer words are rejected
    #[serde(default = "default_min_word_count")]
    pub min_word_count: usize,

    /// Sentiment label policy: "conservative" or "permissive"
    #[serde(default = "default_label_policy")]
    pub label_policy: String,

    /// Scale ensemble scores down for factual text
    #[serde(default = "default_true")]
    pub factual_dampening: bool,

    /// Suppress emotions for neutral, objective or factual text
    #[serde(default = "default_true")]
    pub emotion_gating: bool,

    /// Minimum classifier score for an emotion to be reported
    #[serde(default = "default_emotion_threshold")]
    pub emotion_threshold: f64,

    /// Character budget per chunk sent to neural models
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Score neural chunks on the rayon pool
    #[serde(default = "default_true")]
    pub parallel_chunks: bool,

    /// Text cleaning applied before analysis
    #[serde(default)]
    pub preprocessing: PreprocessingConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_word_count: default_min_word_count(),
            label_policy: default_label_policy(),
            factual_dampening: true,
            emotion_gating: true,
            emotion_threshold: default_emotion_threshold(),
            max_chunk_chars: default_max_chunk_chars(),
            parallel_chunks: true,
            preprocessing: PreprocessingConfig::default(),
        }
    }
}

/// Text cleaning switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub normalize_unicode: bool,
    #[serde(default = "default_true")]
    pub remove_urls: bool,
    #[serde(default = "default_true")]
    pub remove_emails: bool,
    #[serde(default)]
    pub remove_social_handles: bool,
    #[serde(default = "default_true")]
    pub fix_repeated_chars: bool,
    #[serde(default)]
    pub expand_contractions: bool,
    #[serde(default = "default_true")]
    pub fix_punctuation_spacing: bool,
    #[serde(default = "default_true")]
    pub normalize_whitespace: bool,
    /// Truncate longer input (characters)
    #[serde(default = "default_max_text_length")]
    pub max_length: usize,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            normalize_unicode: true,
            remove_urls: true,
            remove_emails: true,
            remove_social_handles: false,
            fix_repeated_chars: true,
            expand_contractions: false,
            fix_punctuation_spacing: true,
            normalize_whitespace: true,
            max_length: default_max_text_length(),
        }
    }
}

/// Remote model endpoints. An absent URL marks the model unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Neural sentiment classifier endpoint
    #[serde(default)]
    pub sentiment_url: Option<String>,

    /// Neural emotion classifier endpoint
    #[serde(default)]
    pub emotion_url: Option<String>,

    /// Sentence embedding endpoint
    #[serde(default)]
    pub embedding_url: Option<String>,

    /// Abstractive summarization endpoint
    #[serde(default)]
    pub summarizer_url: Option<String>,

    /// Per-call timeout in seconds
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            sentiment_url: None,
            emotion_url: None,
            embedding_url: None,
            summarizer_url: None,
            timeout_secs: default_model_timeout(),
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

fn default_bind() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    4450
}
fn default_request_timeout() -> u64 {
    120
}
fn default_max_body_bytes() -> usize {
    5 * 1024 * 1024
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "pretty".into()
}
fn default_min_word_count() -> usize {
    50
}
fn default_label_policy() -> String {
    "conservative".into()
}
fn default_emotion_threshold() -> f64 {
    0.4
}
fn default_max_chunk_chars() -> usize {
    400
}
fn default_max_text_length() -> usize {
    1_000_000
}
fn default_model_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.service.port, 4450);
        assert_eq!(config.network.bind, "127.0.0.1");
        assert_eq!(config.analysis.min_word_count, 50);
        assert_eq!(config.analysis.label_policy, "conservative");
        assert!(config.analysis.factual_dampening);
        assert_eq!(config.analysis.max_chunk_chars, 400);
        assert!(config.models.sentiment_url.is_none());
        assert_eq!(config.bind_address(), "127.0.0.1:4450");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.json");
        std::fs::write(&path, r#"{"analysis": {"min_word_count": 20}}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.analysis.min_word_count, 20);
        assert_eq!(config.service.port, 4450);
        assert!(Config::load_from(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"service": {"port": 9000}, "analysis": {}}"#).unwrap();
        assert_eq!(config.service.port, 9000);
        assert_eq!(config.service.request_timeout_secs, 120);
        assert_eq!(config.analysis.emotion_threshold, 0.4);
        assert!(config.analysis.preprocessing.remove_urls);
    }

    #[test]
    fn test_observability_aliases() {
        let config: Config =
            serde_json::from_str(r#"{"observability": {"level": "debug", "format": "json"}}"#)
                .unwrap();
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.observability.log_format, "json");
        assert!(config.observability.excluded_targets.is_empty());

        let config: Config = serde_json::from_str(
            r#"{"observability": {"excluded_targets": ["yake_rust", "rayon_core"]}}"#,
        )
        .unwrap();
        assert_eq!(config.observability.excluded_targets, vec!["yake_rust", "rayon_core"]);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("DOCSENSE_PORT", "8123"),
            ("DOCSENSE_BIND_ADDRESS", "0.0.0.0"),
            ("DOCSENSE_MIN_WORDS", "10"),
            ("DOCSENSE_SENTIMENT_MODEL_URL", "http://localhost:9001/classify"),
            ("DOCSENSE_EMOTION_MODEL_URL", "  "),
            ("DOCSENSE_SUMMARIZER_MODEL_URL", "http://localhost:9004/summarize"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.models.emotion_url = Some("http://old".into());
        config.apply_overrides_from(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.service.port, 8123);
        assert_eq!(config.network.bind, "0.0.0.0");
        assert_eq!(config.analysis.min_word_count, 10);
        assert_eq!(
            config.models.sentiment_url.as_deref(),
            Some("http://localhost:9001/classify")
        );
        assert!(config.models.emotion_url.is_none());
        assert_eq!(
            config.models.summarizer_url.as_deref(),
            Some("http://localhost:9004/summarize")
        );
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides_from(|k| (k == "DOCSENSE_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.service.port, 4450);
    }
}
