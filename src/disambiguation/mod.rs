//! Context disambiguation for ambiguous aliases.
//!
//! Each candidate form is judged on its own against the lowercased context window:
//!
//! 1. an exclude word in the window rejects it;
//! 2. otherwise an include word accepts it;
//! 3. otherwise a form without include vocabulary is accepted;
//! 4. otherwise the outcome is inconclusive.
//!
//! A span resolves only when exactly one distinct ingredient is accepted. Candidates sharing a
//! key or a normalized standard name are the same ingredient. Zero accepted ingredients or a tie
//! leaves the span unresolved, with every per-candidate decision attached for curation.

pub mod disambiguator;
pub mod types;


pub use disambiguator::Disambiguator;
pub use types::{
    AcceptReason, CandidateDecision, CandidateOutcome, Resolution, UnresolvedMatch,
    UnresolvedReason,
};
