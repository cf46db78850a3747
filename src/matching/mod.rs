//! Boundary-safe alias matching and context extraction.
//!
//! The [`Matcher`] scans a text with every indexed alias, longest first, and keeps the
//! non-overlapping occurrences. [`context_window`] then cuts the lowercased neighborhood of a
//! span that the disambiguator reads.

pub mod context;
pub mod matcher;
pub mod text;
pub mod types;


pub use context::{ContextWindow, context_window};
pub use matcher::Matcher;
pub use text::{contains_phrase, is_bounded, is_word_char};
pub use types::{MatchSpan, Span};
