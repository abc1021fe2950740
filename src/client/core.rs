use crate::client::endpoint::normalize_endpoint;
use crate::client::params::merge_parameters;
use crate::config::TranslatorConfig;
use crate::error::{Error, ErrorContext};
use crate::pipeline::strip::DEFAULT_REMOVE_TAGS;
use crate::pipeline::{consume_stream, StreamContext, TagStripper};
use crate::prompt::{PromptRenderer, ResolvedLanguages};
use crate::transport::{Fetch, FetchRequest, FetchResponse, HttpTransport};
use crate::types::wire::error_details;
use crate::types::{ChatRequest, CompletionPayload};
use crate::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};
use url::Url;
use uuid::Uuid;

/// One translation job as handed over by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateRequest<'a> {
    pub text: &'a str,
    /// Source language code.
    pub from: &'a str,
    /// Target language code.
    pub to: &'a str,
    /// Language detected by the host, if any.
    pub detect: Option<&'a str>,
}

impl<'a> TranslateRequest<'a> {
    pub fn new(text: &'a str, from: &'a str, to: &'a str) -> Self {
        Self {
            text,
            from,
            to,
            detect: None,
        }
    }

    pub fn with_detect(mut self, detect: &'a str) -> Self {
        self.detect = Some(detect);
        self
    }
}

/// Translation client for an OpenAI-compatible chat-completion endpoint.
///
/// Cheap to share: wrap in an `Arc` and call [`Translator::translate`] from
/// any task. Every call owns its own request and stream state.
pub struct Translator {
    pub(crate) config: TranslatorConfig,
    pub(crate) transport: Arc<dyn Fetch>,
    pub(crate) renderer: PromptRenderer,
    pub(crate) stripper: TagStripper,
}

impl Translator {
    /// Create a translator using the default `reqwest` transport.
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new()?);
        Self::with_transport(config, transport)
    }

    /// Create a translator on top of a host-provided transport.
    pub fn with_transport(config: TranslatorConfig, transport: Arc<dyn Fetch>) -> Result<Self> {
        let stripper =
            TagStripper::parse(config.remove_tag.as_deref().unwrap_or(DEFAULT_REMOVE_TAGS))?;
        let renderer = PromptRenderer::new(&config.system_prompt, &config.user_prompt);
        Ok(Self {
            config,
            transport,
            renderer,
            stripper,
        })
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Assemble the chat-completion body for `request`.
    pub fn build_request(&self, request: &TranslateRequest<'_>, stream: bool) -> ChatRequest {
        let langs = ResolvedLanguages::resolve(
            &self.config.language,
            request.from,
            request.to,
            request.detect,
        );
        let (system, user) = self.renderer.render(request.text, &langs);
        ChatRequest {
            model: self.config.model.clone(),
            system,
            user,
            parameters: merge_parameters(self.config.parameters.as_deref()),
            stream,
        }
    }

    /// Translate `request.text`.
    ///
    /// Streams when `use_stream` is enabled and `on_update` is supplied;
    /// `on_update` then receives the displayed text after every delta and the
    /// final text once more at the end. Otherwise a single buffered request
    /// is made and `on_update` is not called.
    pub async fn translate(
        &self,
        request: &TranslateRequest<'_>,
        on_update: Option<&mut (dyn FnMut(&str) + Send)>,
    ) -> Result<String> {
        let url = self.validate()?;
        let request_id = Uuid::new_v4().to_string();

        match on_update {
            Some(on_update) if self.config.use_stream => {
                self.translate_stream(url, request, request_id, on_update).await
            }
            _ => self.translate_buffered(url, request, request_id).await,
        }
    }

    /// Check credentials and endpoint; no request is made when this fails.
    fn validate(&self) -> Result<Url> {
        if self.config.api_key.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "API key is empty",
                ErrorContext::new()
                    .with_field_path("apiKey")
                    .with_source("translator"),
            ));
        }
        if self.config.request_path.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "request path is empty",
                ErrorContext::new()
                    .with_field_path("requestPath")
                    .with_source("translator"),
            ));
        }
        normalize_endpoint(&self.config.request_path)
    }

    async fn send(
        &self,
        url: Url,
        chat: &ChatRequest,
        request_id: &str,
    ) -> Result<(FetchResponse, Instant)> {
        info!(
            model = %chat.model,
            request_id,
            endpoint = %url,
            stream = chat.stream,
            "translation request prepared"
        );

        let fetch = FetchRequest {
            url,
            api_key: self.config.api_key.trim().to_string(),
            body: chat.to_body(),
            stream: chat.stream,
            timeout: if chat.stream {
                None
            } else {
                self.config.timeout()
            },
            request_id: request_id.to_string(),
        };

        let start = Instant::now();
        let resp = self.transport.fetch(fetch).await.map_err(|e| {
            error!(
                error = %e,
                request_id,
                elapsed_ms = start.elapsed().as_millis(),
                "translation request failed"
            );
            Error::Transport(e)
        })?;
        Ok((resp, start))
    }

    async fn reject(resp: FetchResponse, request_id: &str, start: Instant) -> Error {
        let status = resp.status;
        let details = match resp.text().await {
            Ok(body) => error_details(&body),
            Err(e) => e.to_string(),
        };
        error!(
            http_status = status,
            request_id,
            duration_ms = start.elapsed().as_millis(),
            details = %preview(&details, 400),
            "translation endpoint returned an error"
        );
        Error::Api { status, details }
    }

    async fn translate_buffered(
        &self,
        url: Url,
        request: &TranslateRequest<'_>,
        request_id: String,
    ) -> Result<String> {
        let chat = self.build_request(request, false);
        let (resp, start) = self.send(url, &chat, &request_id).await?;
        if !resp.is_success() {
            return Err(Self::reject(resp, &request_id, start).await);
        }

        let status = resp.status;
        let body = resp.text().await?;
        info!(
            http_status = status,
            request_id = %request_id,
            duration_ms = start.elapsed().as_millis(),
            "translation response received"
        );

        match CompletionPayload::classify(&body) {
            CompletionPayload::Content(content) => {
                let text = self.stripper.strip(content.trim());
                debug!(len = text.len(), preview = %preview(&text, 200), "translation extracted");
                Ok(text)
            }
            CompletionPayload::Failure(details) => {
                error!(
                    http_status = status,
                    request_id = %request_id,
                    "error payload in success response"
                );
                Err(Error::Api { status, details })
            }
            CompletionPayload::Malformed(reason) => {
                error!(
                    reason = %reason,
                    body_preview = %preview(&body, 400),
                    "unexpected response structure"
                );
                Err(Error::structure(reason, body))
            }
        }
    }

    async fn translate_stream(
        &self,
        url: Url,
        request: &TranslateRequest<'_>,
        request_id: String,
        on_update: &mut (dyn FnMut(&str) + Send),
    ) -> Result<String> {
        let chat = self.build_request(request, true);
        let (resp, start) = self.send(url, &chat, &request_id).await?;
        if !resp.is_success() {
            return Err(Self::reject(resp, &request_id, start).await);
        }

        let status = resp.status;
        let Some(body) = resp.body else {
            error!(http_status = status, request_id = %request_id, "stream response has no body");
            return Err(Error::structure("response body is empty in stream mode", ""));
        };
        info!(http_status = status, request_id = %request_id, "translation stream opened");

        let ctx = StreamContext {
            stripper: &self.stripper,
            variant: self.config.stream_variant,
        };
        let text = consume_stream(body, ctx, on_update).await?;
        info!(
            request_id = %request_id,
            duration_ms = start.elapsed().as_millis(),
            len = text.len(),
            "translation stream finished"
        );
        Ok(text)
    }
}

/// Single-line, length-capped rendering of `input` for logs.
pub(crate) fn preview(input: &str, limit: usize) -> String {
    let cleaned = input.replace(['\n', '\r'], " ");
    let mut chars = cleaned.chars();
    let mut out: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        out.push_str("...");
    }
    out
}
