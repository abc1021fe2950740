//! HTTP transport seam.
//!
//! The translator never talks to `reqwest` directly: it hands a [`FetchRequest`]
//! to an injected [`Fetch`] implementation and receives a status plus a byte
//! stream. [`HttpTransport`] is the default, `reqwest`-backed implementation;
//! hosts and tests may supply their own.

pub mod http;

pub use http::HttpTransport;

use crate::BoxStream;
use bytes::Bytes;
use futures::StreamExt;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// A single outbound POST.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: Url,
    pub api_key: String,
    pub body: Value,
    /// Ask for `text/event-stream`.
    pub stream: bool,
    /// Per-request network timeout. `None` leaves the call open indefinitely.
    pub timeout: Option<Duration>,
    /// Correlation id sent as `x-request-id`.
    pub request_id: String,
}

/// Status line and (possibly absent) body of a response.
pub struct FetchResponse {
    pub status: u16,
    pub body: Option<BoxStream<'static, Bytes>>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Drain the body into a string (lossy UTF-8). An absent body reads as empty.
    pub async fn text(self) -> crate::Result<String> {
        let mut buf = Vec::new();
        if let Some(mut body) = self.body {
            while let Some(chunk) = body.next().await {
                buf.extend_from_slice(&chunk?);
            }
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl std::fmt::Debug for FetchResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchResponse")
            .field("status", &self.status)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Fetch-like primitive used by the translator.
#[async_trait::async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
