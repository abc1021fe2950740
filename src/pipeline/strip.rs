//! Marker-tag removal.
//!
//! Models frequently wrap reasoning or commentary in tags such as
//! `<think>…</think>`. Each configured tag name yields one matcher for the
//! paired form (non-greedy, spanning lines) and the self-closing form.

use crate::error::{Error, ErrorContext};
use regex::Regex;

/// Tag list used when `removeTag` is not configured.
pub const DEFAULT_REMOVE_TAGS: &str = "<think>,<help>";

#[derive(Debug, Clone, Default)]
pub struct TagStripper {
    matchers: Vec<Regex>,
}

impl TagStripper {
    /// Compile a comma-separated tag list such as `"<think>,<help>"` or `"think, help"`.
    /// Blank entries are ignored; an empty list strips nothing.
    pub fn parse(list: &str) -> crate::Result<Self> {
        let mut matchers = Vec::new();
        for name in list.split(',').filter_map(tag_name) {
            let escaped = regex::escape(name);
            let pattern = format!(r"(?s)<{0}>.*?</{0}>|<{0}/>", escaped);
            let re = Regex::new(&pattern).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid tag '{}': {}", name, e),
                    ErrorContext::new()
                        .with_field_path("removeTag")
                        .with_source("tag_stripper"),
                )
            })?;
            matchers.push(re);
        }
        Ok(Self { matchers })
    }

    /// Remove every complete tag span, then trim.
    ///
    /// An opening tag without its closing marker is left untouched.
    pub fn strip(&self, text: &str) -> String {
        let mut out = text.to_string();
        for re in &self.matchers {
            if re.is_match(&out) {
                out = re.replace_all(&out, "").into_owned();
            }
        }
        out.trim().to_string()
    }
}

fn tag_name(raw: &str) -> Option<&str> {
    let name = raw
        .trim()
        .trim_start_matches('<')
        .trim_end_matches('>')
        .trim_end_matches('/')
        .trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
