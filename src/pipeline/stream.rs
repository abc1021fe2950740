//! Streaming consumer: SSE lines -> accumulated text -> update callback.

use super::decode::{SseLine, SseLineDecoder};
use super::strip::TagStripper;
use super::{DoneBehavior, StreamVariant};
use crate::types::StreamChunk;
use crate::{BoxStream, Result};
use bytes::Bytes;
use futures::StreamExt;
use tracing::{debug, warn};

/// Suffix appended to intermediate pushes when [`StreamVariant::ellipsis`] is on.
pub const ELLIPSIS: &str = "...";

/// Per-call accumulation state, owned by the consuming loop.
#[derive(Debug, Default)]
pub struct StreamState {
    /// Raw concatenation of every delta received so far.
    pub text: String,
    /// Number of content deltas applied.
    pub deltas: usize,
    /// Set once `[DONE]` has been seen.
    pub done: bool,
    decoder: SseLineDecoder,
}

/// Whether the read loop should keep pulling chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Shared, read-only inputs of the consumer.
#[derive(Debug, Clone, Copy)]
pub struct StreamContext<'a> {
    pub stripper: &'a TagStripper,
    pub variant: StreamVariant,
}

impl StreamState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text as it should be displayed right now.
    pub fn display(&self, stripper: &TagStripper) -> String {
        stripper.strip(&self.text)
    }
}

/// Process every complete line of one chunk.
pub fn process_chunk(
    state: &mut StreamState,
    chunk: &[u8],
    ctx: StreamContext<'_>,
    on_update: &mut (dyn FnMut(&str) + Send),
) -> Flow {
    let lines = state.decoder.push(chunk);
    for line in lines {
        if process_line(state, &line, ctx, on_update) == Flow::Stop {
            return match ctx.variant.done {
                DoneBehavior::StopChunk => Flow::Continue,
                DoneBehavior::StopStream => Flow::Stop,
            };
        }
    }
    Flow::Continue
}

/// Apply one line. Returns [`Flow::Stop`] on the terminator.
fn process_line(
    state: &mut StreamState,
    line: &str,
    ctx: StreamContext<'_>,
    on_update: &mut (dyn FnMut(&str) + Send),
) -> Flow {
    let payload = match SseLine::parse(line) {
        None => return Flow::Continue,
        Some(SseLine::Done) => {
            state.done = true;
            return Flow::Stop;
        }
        Some(SseLine::Data(payload)) => payload,
    };

    let chunk: StreamChunk = match serde_json::from_str(&payload) {
        Ok(chunk) => chunk,
        Err(e) => {
            warn!(error = %e, line = %payload, "skipping malformed stream line");
            return Flow::Continue;
        }
    };

    let Some(content) = chunk.content() else {
        debug!("stream chunk without delta content");
        return Flow::Continue;
    };

    state.text.push_str(content);
    state.deltas += 1;

    let mut shown = state.display(ctx.stripper);
    if ctx.variant.ellipsis {
        shown.push_str(ELLIPSIS);
    }
    on_update(&shown);
    Flow::Continue
}

/// Drive a response body to completion.
///
/// Pushes the displayed text after every delta and once more, without the
/// ellipsis, when the stream ends. Returns that final text. A transport error
/// mid-stream is fatal; updates already pushed stay pushed.
pub async fn consume_stream(
    mut body: BoxStream<'static, Bytes>,
    ctx: StreamContext<'_>,
    on_update: &mut (dyn FnMut(&str) + Send),
) -> Result<String> {
    let mut state = StreamState::new();
    let mut flow = Flow::Continue;

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        flow = process_chunk(&mut state, &chunk, ctx, on_update);
        if flow == Flow::Stop {
            break;
        }
    }

    if flow == Flow::Continue {
        if let Some(rest) = state.decoder.finish() {
            process_line(&mut state, &rest, ctx, on_update);
        }
    }

    let final_text = state.display(ctx.stripper);
    debug!(
        deltas = state.deltas,
        saw_done = state.done,
        len = final_text.len(),
        "stream finished"
    );
    on_update(&final_text);
    Ok(final_text)
}
