//! Shared HTML helpers for directive fragments.

/// Escape text for use in HTML content and attribute values.
///
/// Square brackets are escaped too, so escaped text can never form directive
/// syntax (`keyword: [...]`).
///
/// # Example
///
/// ```
/// use dw_renderer::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">[1]</a>"#), "&lt;a href=&quot;x&quot;&gt;&#91;1&#93;&lt;/a&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '[' => out.push_str("&#91;"),
            ']' => out.push_str("&#93;"),
            c => out.push(c),
        }
    }
    out
}

/// Encode the characters directive syntax is built from: `[`, `]`, `(`, `)`.
///
/// Used for directive titles and targets, which are otherwise emitted as
/// written. Browsers decode the entities, so the page shows the same text, but
/// the fragment can no longer match any directive pattern.
///
/// # Example
///
/// ```
/// use dw_renderer::escape_directive;
///
/// assert_eq!(escape_directive("video: [x](y)"), "video: &#91;x&#93;&#40;y&#41;");
/// assert_eq!(escape_directive("http://example.com/page"), "http://example.com/page");
/// ```
pub fn escape_directive(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '[' => out.push_str("&#91;"),
            ']' => out.push_str("&#93;"),
            '(' => out.push_str("&#40;"),
            ')' => out.push_str("&#41;"),
            c => out.push(c),
        }
    }
    out
}

/// Plain hyperlink every family falls back to for unrecognized targets.
///
/// Title and target are emitted as written, except for directive syntax
/// characters (see [`escape_directive`]).
///
/// # Example
///
/// ```
/// use dw_renderer::fallback_link;
///
/// assert_eq!(
///     fallback_link("Site", "http://example.com/page"),
///     r#"<a href="http://example.com/page" target="_blank" title="Site">Site</a>"#
/// );
/// ```
pub fn fallback_link(title: &str, target: &str) -> String {
    let title = escape_directive(title);
    let target = escape_directive(target);
    format!(r#"<a href="{target}" target="_blank" title="{title}">{title}</a>"#)
}
