use super::{Fetch, FetchRequest, FetchResponse, TransportError};
use futures::TryStreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Proxy;
use std::env;
use std::time::Duration;

/// Default transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client with pool defaults (env-overridable).
    ///
    /// No client-wide timeout is set: the buffered path passes its own
    /// per-request timeout and the streaming path runs unbounded.
    pub fn new() -> crate::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(
                env::var("AI_TRANSLATE_POOL_MAX_IDLE_PER_HOST")
                    .ok()
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(8),
            )
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Ok(proxy_url) = env::var("AI_TRANSLATE_PROXY_URL") {
            match Proxy::all(&proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => {
                    tracing::warn!(proxy = %proxy_url, error = %e, "ignoring invalid proxy url")
                }
            }
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self { client })
    }

    /// Wrap an existing client (shared pools, custom TLS, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Fetch for HttpTransport {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportError> {
        let mut req = self
            .client
            .post(request.url)
            .bearer_auth(&request.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header("x-request-id", &request.request_id)
            .json(&request.body);

        if request.stream {
            req = req.header(ACCEPT, "text/event-stream");
        }
        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();

        let body: crate::BoxStream<'static, bytes::Bytes> = Box::pin(
            resp.bytes_stream()
                .map_err(|e| crate::Error::Transport(TransportError::Http(e))),
        );

        Ok(FetchResponse {
            status,
            body: Some(body),
        })
    }
}
