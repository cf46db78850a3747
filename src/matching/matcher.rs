use tracing::trace;

use super::text::{is_bounded, next_char_boundary};
use super::types::{MatchSpan, Span};
use crate::index::AliasIndex;

/// Finds boundary-safe, non-overlapping alias occurrences in a text.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    index: &'a AliasIndex,
}

#[derive(Debug, Clone, Copy)]
struct Hit {
    span: Span,
    chars: usize,
    entry: usize,
}

impl<'a> Matcher<'a> {
    pub fn new(index: &'a AliasIndex) -> Self {
        Self { index }
    }

    /// All surviving matches in left-to-right order.
    ///
    /// Aliases are scanned longest first. Overlapping candidates are resolved greedily: the
    /// longer span (in characters) wins, ties go to the earlier start.
    pub fn find_matches(&self, text: &str) -> Vec<MatchSpan<'a>> {
        let entries = self.index.aliases_longest_first();
        let lowered = text.to_lowercase();
        let mut hits = Vec::new();

        for (entry_idx, entry) in entries.iter().enumerate() {
            if !lowered.contains(entry.first_token()) {
                continue;
            }

            let mut at = 0;
            while at <= text.len() {
                let Some(m) = entry.pattern().find_at(text, at) else {
                    break;
                };
                if is_bounded(text, m.start(), m.end()) {
                    hits.push(Hit {
                        span: Span::new(m.start(), m.end()),
                        chars: m.as_str().chars().count(),
                        entry: entry_idx,
                    });
                    at = m.end();
                } else if m.start() < text.len() {
                    at = next_char_boundary(text, m.start());
                } else {
                    break;
                }
            }
        }

        let kept = select_non_overlapping(hits);

        kept.into_iter()
            .map(|hit| {
                let entry = &entries[hit.entry];
                trace!(
                    alias = entry.alias(),
                    start = hit.span.start,
                    end = hit.span.end,
                    "Alias matched"
                );
                MatchSpan {
                    span: hit.span,
                    matched_text: text[hit.span.start..hit.span.end].to_string(),
                    alias: entry.alias(),
                    candidates: entry.candidates(),
                }
            })
            .collect()
    }
}

fn select_non_overlapping(mut hits: Vec<Hit>) -> Vec<Hit> {
    hits.sort_by(|a, b| {
        b.chars
            .cmp(&a.chars)
            .then_with(|| a.span.start.cmp(&b.span.start))
            .then_with(|| a.entry.cmp(&b.entry))
    });

    let mut kept: Vec<Hit> = Vec::with_capacity(hits.len());
    for hit in hits {
        if kept.iter().all(|k| !k.span.overlaps(&hit.span)) {
            kept.push(hit);
        }
    }

    kept.sort_by_key(|hit| hit.span.start);
    kept
}
