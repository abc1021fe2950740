//! Wire payloads of the OpenAI chat-completion protocol.
//!
//! Responses are validated once at the boundary into [`CompletionPayload`]
//! instead of probing optional fields at every use site.

use super::message::Message;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Outbound chat-completion body.
///
/// Holds exactly two messages, system first. `model`, `messages` and `stream`
/// are written after the merged parameters so they always win.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub system: Message,
    pub user: Message,
    pub parameters: Map<String, Value>,
    pub stream: bool,
}

impl ChatRequest {
    pub fn to_body(&self) -> Value {
        let mut body = self.parameters.clone();
        body.insert("model".to_string(), Value::String(self.model.clone()));
        body.insert(
            "messages".to_string(),
            serde_json::json!([self.system, self.user]),
        );
        body.insert("stream".to_string(), Value::Bool(self.stream));
        Value::Object(body)
    }
}

/// A buffered response body, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionPayload {
    /// `choices[0].message.content`, untrimmed.
    Content(String),
    /// An `{"error": ...}` body; carries the rendered error detail.
    Failure(String),
    /// Anything else; carries the reason it was rejected.
    Malformed(String),
}

#[derive(Deserialize)]
struct CompletionBody {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl CompletionPayload {
    pub fn classify(body: &str) -> Self {
        let value: Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(e) => return CompletionPayload::Malformed(format!("response is not JSON: {}", e)),
        };

        if value.get("choices").is_none() {
            if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
                return CompletionPayload::Failure(render_error_value(error));
            }
        }

        let parsed: CompletionBody = match serde_json::from_value(value) {
            Ok(p) => p,
            Err(e) => return CompletionPayload::Malformed(format!("missing choices: {}", e)),
        };

        match parsed.choices.into_iter().next() {
            None => CompletionPayload::Malformed("choices is empty".to_string()),
            Some(choice) => match choice.message.and_then(|m| m.content) {
                Some(content) => CompletionPayload::Content(content),
                None => CompletionPayload::Malformed(
                    "choices[0].message.content is missing".to_string(),
                ),
            },
        }
    }
}

/// Best-effort detail string for an error response body: the `error` member
/// (or whole document) when it is JSON, the raw text otherwise.
pub fn error_details(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => match value.get("error") {
            Some(error) if !error.is_null() => render_error_value(error),
            _ => value.to_string(),
        },
        Err(_) => body.trim().to_string(),
    }
}

fn render_error_value(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One streamed chat-completion chunk (`data:` payload).
#[derive(Debug, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Option<StreamDelta>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

impl StreamChunk {
    /// Content of the first choice's delta, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.as_ref())
            .and_then(|d| d.content.as_deref())
    }
}
