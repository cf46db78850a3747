use serde::Serialize;

use crate::index::Candidate;

/// Half-open byte range into the source text (always on char boundaries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One alias occurrence in a text, borrowing its candidates from the index.
#[derive(Debug, Clone)]
pub struct MatchSpan<'a> {
    pub span: Span,
    /// Exact source slice that matched.
    pub matched_text: String,
    /// Normalized index key of the alias.
    pub alias: &'a str,
    pub candidates: &'a [Candidate],
}

impl MatchSpan<'_> {
    /// Returns `true` if more than one distinct ingredient key shares this alias.
    pub fn is_ambiguous(&self) -> bool {
        self.candidates
            .split_first()
            .is_some_and(|(first, rest)| rest.iter().any(|c| c.key() != first.key()))
    }
}
