//! Best-effort plain-text extraction from feed entry markup.
//!
//! Tags are removed with a single `<[^>]*>` pass, so literal angle brackets
//! outside of markup (`a < b > c`) are eaten as well. Callers that need real
//! HTML safety should swap in a markup-aware extractor behind `sanitize`.

use once_cell::sync::Lazy;
use regex::Regex;

pub const SNIPPET_MAX_CHARS: usize = 250;
pub const ELLIPSIS: &str = "...";

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

// Applied in this order, each over the whole text.
const ENTITIES: [(&str, &str); 5] = [
    ("&amp;", "&"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
];

/// Strip tags, decode the five basic entities and trim.
pub fn sanitize(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let mut text = TAG.replace_all(raw, "").into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }

    text.trim().to_string()
}

/// Cut `text` to `SNIPPET_MAX_CHARS` characters, appending `...` only when
/// something was cut.
pub fn truncate_snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}
