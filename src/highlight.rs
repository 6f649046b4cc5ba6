use regex::RegexBuilder;
use unicode_segmentation::UnicodeSegmentation;

pub const HIGHLIGHT_OPEN: &str = r#"<mark class="search-highlight">"#;
pub const HIGHLIGHT_CLOSE: &str = "</mark>";

/// Default snippet length when the query is not found
pub const DEFAULT_SNIPPET_LENGTH: usize = 150;

/// Graphemes of context kept on each side of a match
const SNIPPET_CONTEXT: usize = 50;

const ELLIPSIS: &str = "...";

/// Wrap every case-insensitive occurrence of `query` in a `<mark>` element.
///
/// The query is matched literally. All of `text` is HTML-escaped, so the
/// output is safe to embed as raw markup.
pub fn highlight(text: &str, query: &str) -> String {
    if query.trim().is_empty() {
        return html_escape::encode_text(text).into_owned();
    }

    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(err) => {
            tracing::warn!(error = %err, "cannot build highlight pattern");
            return html_escape::encode_text(text).into_owned();
        }
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in pattern.find_iter(text) {
        out.push_str(&html_escape::encode_text(&text[last..m.start()]));
        out.push_str(HIGHLIGHT_OPEN);
        out.push_str(&html_escape::encode_text(m.as_str()));
        out.push_str(HIGHLIGHT_CLOSE);
        last = m.end();
    }
    out.push_str(&html_escape::encode_text(&text[last..]));
    out
}

/// Excerpt of `content` around the first occurrence of `query`.
///
/// Works on grapheme clusters so Hangul and other multi-byte text is never
/// cut mid-character. Falls back to the first `max_length` graphemes and an
/// ellipsis when the query does not occur.
pub fn snippet(content: &str, query: &str, max_length: usize) -> String {
    let graphemes: Vec<&str> = content.graphemes(true).collect();

    if query.trim().is_empty() {
        return leading(&graphemes, max_length);
    }

    let needle: Vec<String> = query.graphemes(true).map(str::to_lowercase).collect();
    let Some(index) = find_graphemes(&graphemes, &needle) else {
        return leading(&graphemes, max_length);
    };

    let start = index.saturating_sub(SNIPPET_CONTEXT);
    let end = graphemes.len().min(index + needle.len() + SNIPPET_CONTEXT);

    let mut out = String::new();
    if start > 0 {
        out.push_str(ELLIPSIS);
    }
    out.push_str(&graphemes[start..end].concat());
    if end < graphemes.len() {
        out.push_str(ELLIPSIS);
    }
    out
}

fn leading(graphemes: &[&str], max_length: usize) -> String {
    let mut out = graphemes[..graphemes.len().min(max_length)].concat();
    out.push_str(ELLIPSIS);
    out
}

/// Index of the first case-insensitive occurrence of `needle` in `haystack`
fn find_graphemes(haystack: &[&str], needle: &[String]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }

    let lowered: Vec<String> = haystack.iter().map(|g| g.to_lowercase()).collect();
    lowered
        .windows(needle.len())
        .position(|window| window == needle)
}
