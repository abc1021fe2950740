//! # ai-translator
//!
//! Translation adapter for OpenAI-compatible chat-completion endpoints.
//!
//! ## Overview
//!
//! A [`Translator`] renders a system and a user prompt from templates, posts a
//! single chat-completion request (buffered or streamed over server-sent
//! events), extracts the model's text and strips configured marker tags such
//! as `<think>…</think>`. In streaming mode the partially translated text is
//! pushed to a caller-supplied callback after every delta.
//!
//! ```text
//! config → endpoint normalizer → prompt renderer + parameter merger
//!        → transport (buffered | SSE) → decoder → tag stripper → text
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ai_translator::{TranslateRequest, TranslatorBuilder};
//!
//! #[tokio::main]
//! async fn main() -> ai_translator::Result<()> {
//!     let translator = TranslatorBuilder::new()
//!         .api_key("sk-...")
//!         .request_path("api.openai.com/v1")
//!         .build()?;
//!
//!     let request = TranslateRequest::new("Guten Morgen", "de", "en");
//!
//!     // Buffered
//!     let text = translator.translate(&request, None).await?;
//!     println!("{text}");
//!
//!     // Streamed, with live updates
//!     let mut show = |partial: &str| eprintln!("{partial}");
//!     let text = translator.translate(&request, Some(&mut show)).await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | `Translator`, its builder, endpoint normalization, parameter merging |
//! | [`config`] | Configuration, file loading, language names |
//! | [`prompt`] | Placeholder substitution |
//! | [`pipeline`] | SSE decoding, stream consumption, tag stripping |
//! | [`transport`] | Fetch trait and the `reqwest` transport |
//! | [`types`] | Messages and wire payloads |

pub mod client;
pub mod config;
pub mod pipeline;
pub mod prompt;
pub mod transport;
pub mod types;

pub use client::{TranslateRequest, Translator, TranslatorBuilder};
pub use config::TranslatorConfig;
pub use pipeline::{DoneBehavior, StreamVariant, TagStripper};
pub use transport::{Fetch, FetchRequest, FetchResponse, HttpTransport};
pub use types::{Message, MessageRole};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
