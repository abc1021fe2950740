//! In-memory `Fetch` double that replays a fixed chunk sequence.

use ai_translator::transport::TransportError;
use ai_translator::{BoxStream, Fetch, FetchRequest, FetchResponse};
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct ChunkedTransport {
    status: u16,
    chunks: Option<Vec<Result<Vec<u8>, String>>>,
    calls: AtomicUsize,
    last: Mutex<Option<FetchRequest>>,
}

impl ChunkedTransport {
    /// 200 response delivering `chunks` exactly as split.
    pub fn ok(chunks: &[&str]) -> Self {
        Self::with_status(200, chunks)
    }

    pub fn with_status(status: u16, chunks: &[&str]) -> Self {
        Self {
            status,
            chunks: Some(chunks.iter().map(|c| Ok(c.as_bytes().to_vec())).collect()),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// Raw byte chunks, for splitting inside multi-byte characters.
    pub fn bytes(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            status: 200,
            chunks: Some(chunks.into_iter().map(Ok).collect()),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// 200 response whose body is absent.
    pub fn without_body() -> Self {
        Self {
            status: 200,
            chunks: None,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// Deliver `chunks`, then fail the read.
    pub fn failing_after(chunks: &[&str], reason: &str) -> Self {
        let mut items: Vec<Result<Vec<u8>, String>> =
            chunks.iter().map(|c| Ok(c.as_bytes().to_vec())).collect();
        items.push(Err(reason.to_string()));
        Self {
            status: 200,
            chunks: Some(items),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<FetchRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Fetch for ChunkedTransport {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request);

        let body = self.chunks.clone().map(|chunks| {
            let items = chunks.into_iter().map(|c| match c {
                Ok(bytes) => Ok(Bytes::from(bytes)),
                Err(reason) => Err(ai_translator::Error::Transport(TransportError::Other(reason))),
            });
            Box::pin(futures::stream::iter(items)) as BoxStream<'static, Bytes>
        });

        Ok(FetchResponse {
            status: self.status,
            body,
        })
    }
}
