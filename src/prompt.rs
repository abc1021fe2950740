//! Prompt rendering.
//!
//! Templates are plain strings with `$text`, `$from`, `$to` and `$detect`
//! placeholders. Each placeholder is replaced at its first occurrence only,
//! literally, with no escaping. Language placeholders are substituted before
//! `$text` so placeholder-like sequences inside the payload survive.

use crate::config::resolve_language;
use crate::types::Message;
use std::collections::HashMap;

pub const PLACEHOLDER_TEXT: &str = "$text";
pub const PLACEHOLDER_FROM: &str = "$from";
pub const PLACEHOLDER_TO: &str = "$to";
pub const PLACEHOLDER_DETECT: &str = "$detect";

/// Display names resolved for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLanguages {
    pub from: String,
    pub to: String,
    pub detect: String,
}

impl ResolvedLanguages {
    /// Resolve codes through `map`. A missing `detect` falls back to the source language.
    pub fn resolve(
        map: &HashMap<String, String>,
        from: &str,
        to: &str,
        detect: Option<&str>,
    ) -> Self {
        let from_name = resolve_language(map, from);
        let detect = match detect.filter(|d| !d.is_empty()) {
            Some(code) => resolve_language(map, code),
            None => from_name.clone(),
        };
        Self {
            from: from_name,
            to: resolve_language(map, to),
            detect,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromptRenderer {
    system_template: String,
    user_template: String,
}

impl PromptRenderer {
    pub fn new(system_template: impl Into<String>, user_template: impl Into<String>) -> Self {
        Self {
            system_template: system_template.into(),
            user_template: user_template.into(),
        }
    }

    /// Render the system and user messages, in that order.
    pub fn render(&self, text: &str, langs: &ResolvedLanguages) -> (Message, Message) {
        (
            Message::system(render_template(&self.system_template, text, langs)),
            Message::user(render_template(&self.user_template, text, langs)),
        )
    }
}

pub fn render_template(template: &str, text: &str, langs: &ResolvedLanguages) -> String {
    template
        .replacen(PLACEHOLDER_FROM, &langs.from, 1)
        .replacen(PLACEHOLDER_TO, &langs.to, 1)
        .replacen(PLACEHOLDER_DETECT, &langs.detect, 1)
        .replacen(PLACEHOLDER_TEXT, text, 1)
}
