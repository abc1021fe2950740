//! Core data types: chat messages and the chat-completion wire payloads.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role and text content |
//! | [`ChatRequest`] | Outbound body: model, two messages, merged parameters, stream flag |
//! | [`CompletionPayload`] | Classified buffered response (content, error, malformed) |
//! | [`StreamChunk`] | One `data:` payload of a streamed response |

pub mod message;
pub mod wire;

pub use message::{Message, MessageRole};
pub use wire::{ChatRequest, CompletionPayload, StreamChunk};
