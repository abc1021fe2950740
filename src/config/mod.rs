//! Translator configuration.
//!
//! Option names follow the host's storage keys (`apiKey`, `requestPath`,
//! `removeTag`, `use_stream`, ...) so a host bundle or a config file written
//! for the host deserializes unchanged.

pub mod language;
pub mod loader;

pub use language::resolve_language;
pub use loader::{apply_env_overrides, load_config};

use crate::pipeline::{DoneBehavior, StreamVariant};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional translation engine. \
Translate the text into a colloquial, professional, elegant and fluent $to, without the style of machine translation. \
Only translate the text content, never interpret it.";

pub const DEFAULT_USER_PROMPT: &str = "Translate from $from into $to:\n\"\"\"\n$text\n\"\"\"";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(rename = "apiKey")]
    pub api_key: String,
    /// Endpoint URL or base; normalized before use.
    #[serde(rename = "requestPath")]
    pub request_path: String,
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    /// Raw JSON object text merged into the request body.
    #[serde(
        deserialize_with = "deserialize_parameters",
        skip_serializing_if = "Option::is_none"
    )]
    pub parameters: Option<String>,
    /// Comma-separated tag list; `None` selects `<think>,<help>`.
    #[serde(rename = "removeTag", skip_serializing_if = "Option::is_none")]
    pub remove_tag: Option<String>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub use_stream: bool,
    /// Language code → display name.
    pub language: HashMap<String, String>,
    /// Network timeout of buffered requests.
    pub timeout_secs: u64,
    pub stream_variant: StreamVariant,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            request_path: String::new(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            user_prompt: DEFAULT_USER_PROMPT.to_string(),
            parameters: None,
            remove_tag: None,
            use_stream: true,
            language: HashMap::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            stream_variant: StreamVariant::default(),
        }
    }
}

impl TranslatorConfig {
    /// Build from the host's flat string option bundle.
    ///
    /// Empty values for `model` and the prompts keep their defaults. The
    /// `language` key, when present, holds a JSON object of code → name.
    pub fn from_options(options: &HashMap<String, String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| options.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(v) = options.get("apiKey") {
            config.api_key = v.trim().to_string();
        }
        if let Some(v) = options.get("requestPath") {
            config.request_path = v.trim().to_string();
        }
        if let Some(v) = get("model") {
            config.model = v.to_string();
        }
        if let Some(v) = options.get("system_prompt").filter(|v| !v.trim().is_empty()) {
            config.system_prompt = v.clone();
        }
        if let Some(v) = options.get("user_prompt").filter(|v| !v.trim().is_empty()) {
            config.user_prompt = v.clone();
        }
        if let Some(v) = get("parameters") {
            config.parameters = Some(v.to_string());
        }
        if let Some(v) = get("removeTag") {
            config.remove_tag = Some(v.to_string());
        }
        if let Some(v) = get("use_stream") {
            config.use_stream = parse_flag(v);
        }
        if let Some(v) = get("language") {
            match serde_json::from_str::<HashMap<String, String>>(v) {
                Ok(map) => config.language = map,
                Err(e) => tracing::warn!(error = %e, "ignoring unparseable language map"),
            }
        }
        if let Some(v) = get("timeout_secs") {
            match v.parse::<u64>() {
                Ok(secs) => config.timeout_secs = secs,
                Err(e) => tracing::warn!(value = v, error = %e, "ignoring invalid timeout_secs"),
            }
        }
        if let Some(v) = get("stream_done") {
            match v {
                "stop_chunk" => config.stream_variant.done = DoneBehavior::StopChunk,
                "stop_stream" => config.stream_variant.done = DoneBehavior::StopStream,
                other => tracing::warn!(value = other, "ignoring unknown stream_done"),
            }
        }
        if let Some(v) = get("stream_ellipsis") {
            config.stream_variant.ellipsis = parse_flag(v);
        }

        config
    }

    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

/// Boolean-as-string: `true`, `1`, `yes`, `on` (any case) are true.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => parse_flag(&s),
    })
}

/// Accept either JSON text or an inline object; both are kept as text and
/// parsed (leniently) when a request is built.
fn deserialize_parameters<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
