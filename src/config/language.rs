//! Language code → display name resolution.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Built-in names for the language codes hosts commonly send.
static DEFAULT_LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("auto", "Auto"),
        ("zh_cn", "Simplified Chinese"),
        ("zh_tw", "Traditional Chinese"),
        ("yue", "Cantonese"),
        ("en", "English"),
        ("ja", "Japanese"),
        ("ko", "Korean"),
        ("fr", "French"),
        ("es", "Spanish"),
        ("ru", "Russian"),
        ("de", "German"),
        ("it", "Italian"),
        ("tr", "Turkish"),
        ("pt_pt", "Portuguese"),
        ("pt_br", "Brazilian Portuguese"),
        ("vi", "Vietnamese"),
        ("id", "Indonesian"),
        ("th", "Thai"),
        ("ms", "Malay"),
        ("ar", "Arabic"),
        ("hi", "Hindi"),
        ("mn_cy", "Mongolian (Cyrillic)"),
        ("mn_mo", "Mongolian"),
        ("km", "Khmer"),
        ("nb_no", "Norwegian Bokmål"),
        ("nn_no", "Norwegian Nynorsk"),
        ("fa", "Persian"),
        ("sv", "Swedish"),
        ("pl", "Polish"),
        ("nl", "Dutch"),
        ("uk", "Ukrainian"),
        ("he", "Hebrew"),
    ])
});

/// Resolve `code` through the user map, then the built-in table, falling
/// back to the raw code.
pub fn resolve_language(user_map: &HashMap<String, String>, code: &str) -> String {
    if let Some(name) = user_map.get(code) {
        return name.clone();
    }
    DEFAULT_LANGUAGES
        .get(code)
        .map(|name| name.to_string())
        .unwrap_or_else(|| code.to_string())
}
