//! Markup stripping and snippet truncation.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum characters kept in a description snippet before the ellipsis.
pub const SNIPPET_MAX_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid markup tag regex"));

/// Remove every `<...>` tag, keeping the text between tags as-is.
///
/// ```rust
/// use shelf_content::strip_markup;
///
/// assert_eq!(strip_markup("<h1>Title</h1><p>Body</p>"), "TitleBody");
/// assert_eq!(strip_markup("no tags"), "no tags");
/// ```
pub fn strip_markup(markup: &str) -> String {
    TAG_RE.replace_all(markup, "").into_owned()
}

/// Keep at most `max` characters, appending `...` when anything was cut.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// Plain-text snippet of a markup description.
pub fn snippet(markup: &str) -> String {
    truncate_chars(&strip_markup(markup), SNIPPET_MAX_CHARS)
}

// ============================================================================
// Tests
// ============================================================================
