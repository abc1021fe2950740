//! Response post-processing: SSE decoding, delta accumulation and tag stripping.
//!
//! ```text
//! Raw Bytes → SseLineDecoder → SseLine → StreamChunk delta → StreamState.text
//!                                                               │
//!                                       TagStripper ────────────┤
//!                                                               ▼
//!                                                      update callback / result
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`decode`] | Carry-over line splitting and `data:` classification |
//! | [`stream`] | The read loop driving a response body to completion |
//! | [`strip`] | Marker-tag removal |

pub mod decode;
pub mod stream;
pub mod strip;

pub use decode::{SseLine, SseLineDecoder};
pub use stream::{consume_stream, StreamContext, StreamState};
pub use strip::TagStripper;

use serde::{Deserialize, Serialize};

/// What `data: [DONE]` stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoneBehavior {
    /// Discard the rest of the current chunk; keep reading later chunks.
    StopChunk,
    /// Stop reading the response altogether.
    #[default]
    StopStream,
}

/// Presentation and termination options of the stream consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamVariant {
    pub done: DoneBehavior,
    /// Append `...` to intermediate updates.
    pub ellipsis: bool,
}
