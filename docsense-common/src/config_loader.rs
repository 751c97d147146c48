//! Modular configuration loader.
//!
//! Supports loading configuration from multiple files:
//! - `config.json` - Core configuration
//! - `models.json` - Remote model endpoints, merged into `models`
//!
//! Files are loaded from `~/.docsense/` unless another directory is given.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::config_dir;

/// Load a JSON file and return its contents as a Value.
/// Returns None if file doesn't exist.
fn load_json_file(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(Some(value))
}

/// Deep merge two JSON values.
/// Source values override target values, with object merging at each level.
pub fn merge_json(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match target_map.get_mut(&key) {
                    Some(target_value) => merge_json(target_value, source_value),
                    None => {
                        target_map.insert(key, source_value);
                    }
                }
            }
        }
        (target, source) => {
            *target = source;
        }
    }
}

/// Load modular configuration from the config directory.
///
/// Priority (lowest to highest):
/// 1. config.json
/// 2. models.json (merged into the `models` section)
/// 3. Environment variables (applied separately)
pub fn load_modular_config(dir: Option<PathBuf>) -> Result<Value> {
    let cfg_dir = dir.unwrap_or_else(config_dir);

    let mut config = load_json_file(&cfg_dir.join("config.json"))?
        .unwrap_or(Value::Object(Default::default()));

    tracing::debug!("Loading modular config from {}", cfg_dir.display());

    if let Some(models) = load_json_file(&cfg_dir.join("models.json"))? {
        // Drop meta-fields ($schema, _comment, ...)
        let models = match models {
            Value::Object(obj) => Value::Object(
                obj.into_iter()
                    .filter(|(key, _)| !key.starts_with('$') && !key.starts_with('_'))
                    .collect(),
            ),
            other => other,
        };

        if let Some(config_obj) = config.as_object_mut() {
            match config_obj.get_mut("models") {
                Some(existing) => merge_json(existing, models),
                None => {
                    config_obj.insert("models".to_string(), models);
                }
            }
        }
        tracing::debug!("Loaded models.json");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    #[test]
    fn test_merge_json_objects() {
        let mut target = json!({
            "a": 1,
            "b": { "x": 10, "y": 20 }
        });
        let source = json!({
            "b": { "y": 25, "z": 30 },
            "c": 3
        });

        merge_json(&mut target, source);

        assert_eq!(target["a"], 1);
        assert_eq!(target["b"]["x"], 10);
        assert_eq!(target["b"]["y"], 25);
        assert_eq!(target["b"]["z"], 30);
        assert_eq!(target["c"], 3);
    }

    #[test]
    fn test_merge_json_overwrite_non_object() {
        let mut target = json!({ "a": [1, 2, 3] });
        merge_json(&mut target, json!({ "a": [4, 5] }));
        assert_eq!(target["a"], json!([4, 5]));
    }

    #[test]
    fn test_models_file_overlays_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{"service": {"port": 5000}, "models": {"timeout_secs": 5, "emotion_url": "http://a"}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("models.json"),
            r#"{"$schema": "x", "sentiment_url": "http://localhost:9001/classify"}"#,
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.service.port, 5000);
        assert_eq!(config.models.timeout_secs, 5);
        assert_eq!(config.models.emotion_url.as_deref(), Some("http://a"));
        assert_eq!(
            config.models.sentiment_url.as_deref(),
            Some("http://localhost:9001/classify")
        );
    }

    #[test]
    fn test_empty_dir_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.service.port, 4450);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.json"), "{ not json").unwrap();
        assert!(load_modular_config(Some(dir.path().to_path_buf())).is_err());
    }
}
