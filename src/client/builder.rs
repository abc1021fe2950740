use crate::client::core::Translator;
use crate::config::{apply_env_overrides, load_config, TranslatorConfig};
use crate::pipeline::StreamVariant;
use crate::transport::{Fetch, HttpTransport};
use crate::Result;
use std::path::Path;
use std::sync::Arc;

/// Builder for creating translators with custom configuration.
///
/// Keep this surface area small and predictable: start from a config (file,
/// host options or defaults), adjust a few fields, optionally inject a
/// transport, then `build()`.
pub struct TranslatorBuilder {
    config: TranslatorConfig,
    transport: Option<Arc<dyn Fetch>>,
    env_overrides: bool,
}

impl TranslatorBuilder {
    pub fn new() -> Self {
        Self {
            config: TranslatorConfig::default(),
            transport: None,
            env_overrides: false,
        }
    }

    /// Start from an existing configuration.
    pub fn config(mut self, config: TranslatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from a YAML or JSON config file.
    pub fn config_path(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.config = load_config(path)?;
        Ok(self)
    }

    /// Apply `AI_TRANSLATE_*` environment variables at build time.
    pub fn env_overrides(mut self, enable: bool) -> Self {
        self.env_overrides = enable;
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Endpoint URL or base; normalized on each call.
    pub fn request_path(mut self, path: impl Into<String>) -> Self {
        self.config.request_path = path.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set both prompt templates.
    pub fn prompts(mut self, system: impl Into<String>, user: impl Into<String>) -> Self {
        self.config.system_prompt = system.into();
        self.config.user_prompt = user.into();
        self
    }

    /// Raw JSON object text merged into the request body.
    pub fn parameters(mut self, json: impl Into<String>) -> Self {
        self.config.parameters = Some(json.into());
        self
    }

    /// Comma-separated tags to strip; an empty string disables stripping.
    pub fn remove_tags(mut self, tags: impl Into<String>) -> Self {
        self.config.remove_tag = Some(tags.into());
        self
    }

    pub fn use_stream(mut self, enable: bool) -> Self {
        self.config.use_stream = enable;
        self
    }

    pub fn stream_variant(mut self, variant: StreamVariant) -> Self {
        self.config.stream_variant = variant;
        self
    }

    /// Map a language code to the name used in prompts.
    pub fn language(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.config.language.insert(code.into(), name.into());
        self
    }

    /// Network timeout of buffered requests, in seconds. `0` disables it.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Inject the HTTP primitive. Default is [`HttpTransport`].
    pub fn transport(mut self, transport: Arc<dyn Fetch>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the translator.
    pub fn build(self) -> Result<Translator> {
        let mut config = self.config;
        if self.env_overrides {
            apply_env_overrides(&mut config);
        }

        let transport: Arc<dyn Fetch> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new()?),
        };

        Translator::with_transport(config, transport)
    }
}

impl Default for TranslatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
