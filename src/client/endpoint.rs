//! Endpoint normalization.

use crate::error::{Error, ErrorContext};
use crate::Result;
use url::Url;

pub const CHAT_COMPLETIONS_SUFFIX: &str = "/chat/completions";

/// Turn a user-supplied path into a chat-completion URL.
///
/// - adds `https://` when no scheme is given
/// - appends `/chat/completions` to the path unless already there
/// - keeps any query string
///
/// Idempotent: an already-normalized URL comes back unchanged.
pub fn normalize_endpoint(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(invalid("request path is empty", raw));
    }

    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let mut url =
        Url::parse(&with_scheme).map_err(|e| invalid(&format!("invalid URL: {}", e), raw))?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("URL is not a usable HTTP base", raw));
    }

    let path = url.path().trim_end_matches('/').to_string();
    if path.ends_with(CHAT_COMPLETIONS_SUFFIX) {
        url.set_path(&path);
    } else {
        url.set_path(&format!("{}{}", path, CHAT_COMPLETIONS_SUFFIX));
    }

    Ok(url)
}

fn invalid(message: &str, raw: &str) -> Error {
    Error::configuration_with_context(
        message,
        ErrorContext::new()
            .with_field_path("requestPath")
            .with_details(raw.to_string())
            .with_source("endpoint_normalizer"),
    )
}
