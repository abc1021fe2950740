//! Config file loading (YAML or JSON) and environment overrides.

use super::TranslatorConfig;
use crate::error::{Error, ErrorContext};
use crate::Result;
use std::path::Path;

pub const ENV_API_KEY: &str = "AI_TRANSLATE_API_KEY";
pub const ENV_REQUEST_PATH: &str = "AI_TRANSLATE_REQUEST_PATH";
pub const ENV_MODEL: &str = "AI_TRANSLATE_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "AI_TRANSLATE_TIMEOUT_SECS";

/// Load a config file. The format is picked by extension: `.yaml`/`.yml`
/// or `.json`.
pub fn load_config(path: impl AsRef<Path>) -> Result<TranslatorConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let config = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| {
            Error::configuration_with_context(
                format!("failed to parse YAML config: {}", e),
                ErrorContext::new()
                    .with_details(path.display().to_string())
                    .with_source("config_loader"),
            )
        })?,
        "json" => serde_json::from_str(&content)?,
        other => {
            return Err(Error::configuration_with_context(
                format!("unsupported config format '{}'", other),
                ErrorContext::new()
                    .with_details(path.display().to_string())
                    .with_source("config_loader"),
            ))
        }
    };

    tracing::debug!(path = %path.display(), "loaded translator config");
    Ok(config)
}

/// Overlay `AI_TRANSLATE_*` environment variables onto `config`.
pub fn apply_env_overrides(config: &mut TranslatorConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

/// Overlay values from an arbitrary lookup (the environment in production).
pub fn apply_overrides_from<F>(config: &mut TranslatorConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = lookup(ENV_API_KEY) {
        config.api_key = key.trim().to_string();
    }
    if let Some(path) = lookup(ENV_REQUEST_PATH) {
        config.request_path = path.trim().to_string();
    }
    if let Some(model) = lookup(ENV_MODEL) {
        config.model = model.trim().to_string();
    }
    if let Some(secs) = lookup(ENV_TIMEOUT_SECS).and_then(|s| s.trim().parse::<u64>().ok()) {
        config.timeout_secs = secs;
    }
}
