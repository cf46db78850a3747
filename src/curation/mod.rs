//! Collection of unresolved matches for external curation.
//!
//! Unresolved spans are never guessed at. The host feeds them into a [`CurationQueue`] after
//! each text; identical (alias, window) pairs collapse into one entry with a frequency count so
//! curators see the most common gaps first.

pub mod queue;


pub use queue::{CurationEntry, CurationQueue};
