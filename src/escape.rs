//! String helpers shared by the page and feed renderers.

/// Number of characters kept by [`truncate`] on index cards.
pub const SUMMARY_LENGTH: usize = 100;

/// Escapes `s` so it can sit inside a single- or double-quoted JavaScript
/// string literal. `<` is hex-escaped so a value can never close the
/// surrounding `<script>` element.
pub fn escape_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\x3C"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes `s` for use in HTML text and double-quoted attribute values.
/// Apostrophes pass through unchanged.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // Writing into a `String` cannot fail.
    let _ = pulldown_cmark::escape::escape_html(&mut out, s);
    out
}

/// Keeps the first `max_chars` characters of `s` and appends an ellipsis. The
/// cut ignores word boundaries and the ellipsis is always added, matching the
/// index card layout.
pub fn truncate(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// The English Wikipedia article URL for a specimen name.
pub fn wikipedia_url(name: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", name.replace(' ', "_"))
}
