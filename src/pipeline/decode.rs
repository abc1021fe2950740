//! Line-oriented SSE decoding (bytes -> `data:` payloads).
//!
//! Chunks are split on `\n`; the trailing fragment of each chunk is carried
//! over until its newline arrives. Splitting happens on bytes so a multi-byte
//! character cut across two chunks is reassembled before decoding.

/// Terminator payload of an OpenAI stream.
pub const DONE_SIGNAL: &str = "[DONE]";

const DATA_PREFIX: &str = "data:";

/// An actionable SSE line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// Trimmed payload after `data:`.
    Data(String),
    /// `data: [DONE]`
    Done,
}

impl SseLine {
    /// Classify one complete line. Comments, `event:`/`id:` fields and blank
    /// lines are not actionable.
    pub fn parse(line: &str) -> Option<Self> {
        let payload = line.trim().strip_prefix(DATA_PREFIX)?.trim();
        if payload == DONE_SIGNAL {
            Some(SseLine::Done)
        } else {
            Some(SseLine::Data(payload.to_string()))
        }
    }
}

/// Incremental splitter holding the carry-over fragment.
#[derive(Debug, Default)]
pub struct SseLineDecoder {
    carry: Vec<u8>,
}

impl SseLineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return its complete lines, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.carry.extend_from_slice(chunk);

        let Some(last_newline) = self.carry.iter().rposition(|b| *b == b'\n') else {
            return Vec::new();
        };

        let rest = self.carry.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.carry, rest);

        complete[..complete.len() - 1]
            .split(|b| *b == b'\n')
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect()
    }

    /// Take the unterminated trailing fragment, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.carry.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.carry);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}
