use serde::Serialize;

use super::types::Span;

/// Lowercased text surrounding a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextWindow {
    pub text: String,
    /// Byte offset of the window start in the source text.
    pub start: usize,
    /// Byte offset of the window end in the source text.
    pub end: usize,
}

/// Extracts up to `radius` characters on each side of `span`, clamped to the text bounds.
///
/// The match itself is part of the window.
pub fn context_window(text: &str, span: &Span, radius: usize) -> ContextWindow {
    let start = text[..span.start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(span.start, |(i, _)| i);

    let end = text[span.end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| span.end + i);

    ContextWindow {
        text: text[start..end].to_lowercase(),
        start,
        end,
    }
}
