//! Configuration validation for docsense services.
//!
//! Checks that every configuration field is present and within a valid range
//! before the service starts.

use thiserror::Error;

use crate::config::{
    AnalysisConfig, Config, ModelsConfig, ObservabilityConfig, PreprocessingConfig, ServiceConfig,
};

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port {port}: must be between 1 and 65535")]
    InvalidPort { port: u16, field: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable configuration sections.
pub trait Validate {
    /// Validate this configuration section.
    fn validate(&self) -> ValidationResult<()>;
}

impl Config {
    /// Validate the entire configuration.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if self.network.bind.trim().is_empty() {
            errors.push(ValidationError::MissingField {
                field: "network.bind".into(),
            });
        }

        let sections: [&dyn Validate; 4] = [
            &self.service,
            &self.observability,
            &self.analysis,
            &self.models,
        ];
        for section in sections {
            if let Err(e) = section.validate() {
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.remove(0))
        } else {
            Err(ValidationError::Multiple(errors))
        }
    }

    /// Load and validate configuration.
    pub fn load_and_validate() -> anyhow::Result<Self> {
        let config = Self::load()?;
        config.validate().map_err(|e| anyhow::anyhow!("{}", e))?;
        Ok(config)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort {
                port: self.port,
                field: "service.port".into(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "service.request_timeout_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.max_body_bytes < 1024 {
            return Err(ValidationError::InvalidValue {
                field: "service.max_body_bytes".into(),
                reason: "must be at least 1024".into(),
            });
        }
        Ok(())
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_level".into(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            });
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.log_format.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            });
        }

        Ok(())
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.min_word_count == 0 {
            return Err(ValidationError::InvalidValue {
                field: "analysis.min_word_count".into(),
                reason: "must be greater than 0".into(),
            });
        }

        let valid_policies = ["conservative", "permissive"];
        if !valid_policies.contains(&self.label_policy.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "analysis.label_policy".into(),
                reason: format!("must be one of: {}", valid_policies.join(", ")),
            });
        }

        if !(0.0..=1.0).contains(&self.emotion_threshold) {
            return Err(ValidationError::InvalidValue {
                field: "analysis.emotion_threshold".into(),
                reason: "must be within [0, 1]".into(),
            });
        }

        if self.max_chunk_chars < 50 {
            return Err(ValidationError::InvalidValue {
                field: "analysis.max_chunk_chars".into(),
                reason: "must be at least 50".into(),
            });
        }

        self.preprocessing.validate()
    }
}

impl Validate for PreprocessingConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.max_length == 0 {
            return Err(ValidationError::InvalidValue {
                field: "analysis.preprocessing.max_length".into(),
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

impl Validate for ModelsConfig {
    fn validate(&self) -> ValidationResult<()> {
        let endpoints = [
            ("models.sentiment_url", &self.sentiment_url),
            ("models.emotion_url", &self.emotion_url),
            ("models.embedding_url", &self.embedding_url),
            ("models.summarizer_url", &self.summarizer_url),
        ];
        for (field, endpoint) in endpoints {
            if let Some(raw) = endpoint {
                let parsed = url::Url::parse(raw).map_err(|e| ValidationError::InvalidValue {
                    field: field.into(),
                    reason: format!("invalid URL {raw}: {e}"),
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(ValidationError::InvalidValue {
                        field: field.into(),
                        reason: format!("unsupported scheme {}", parsed.scheme()),
                    });
                }
            }
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "models.timeout_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.observability.log_level = "invalid".into();
        let result = config.validate();
        assert!(result.is_err());
        if let Err(ValidationError::InvalidValue { field, .. }) = result {
            assert_eq!(field, "observability.log_level");
        }
    }

    #[test]
    fn test_zero_port() {
        let mut config = Config::default();
        config.service.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPort { .. })
        ));
    }

    #[test_case(-0.1 ; "below zero")]
    #[test_case(1.5 ; "above one")]
    fn test_emotion_threshold_range(threshold: f64) {
        let mut config = Config::default();
        config.analysis.emotion_threshold = threshold;
        assert!(config.validate().is_err());
    }

    #[test_case("ftp://models.local/x" ; "wrong scheme")]
    #[test_case("not a url" ; "unparseable")]
    fn test_model_url_rejected(url: &str) {
        let mut config = Config::default();
        config.models.embedding_url = Some(url.into());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.models.summarizer_url = Some(url.into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut config = Config::default();
        config.analysis.label_policy = "strict".into();
        config.observability.log_format = "xml".into();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::Multiple(ref errs)) if errs.len() == 2
        ));
    }
}
