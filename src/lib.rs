//! Tincture library crate (used by the CLI, integration tests and benchmarks).
//!
//! Classifies free-text ingredient-label strings against curated reference dictionaries.
//!
//! # Pipeline
//!
//! `text → Matcher → context window → Disambiguator → PriorityResolver → ClassificationResult`
//!
//! - [`matching`] finds boundary-safe alias occurrences, longest alias first.
//! - [`disambiguation`] settles ambiguous aliases (one acronym, several compounds) from the
//!   surrounding words, or leaves the span unresolved. It never guesses.
//! - [`scoring`] assigns exactly one scoring category to a resolved ingredient, even when it
//!   sits in several databases.
//!
//! [`Classifier`] wires the stages together over shared, immutable [`ReferenceData`].
//!
//! ## Test/Mock Support
//! In-memory reference fixtures are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod curation;
pub mod disambiguation;
pub mod hashing;
pub mod index;
pub mod matching;
pub mod pipeline;
pub mod reference;
pub mod scoring;
pub mod stats;

pub use config::{Config, ConfigError};
pub use curation::{CurationEntry, CurationQueue};
pub use disambiguation::{
    AcceptReason, CandidateDecision, CandidateOutcome, Disambiguator, Resolution,
    UnresolvedMatch, UnresolvedReason,
};
pub use hashing::hash_curation_key;
pub use index::{AliasIndex, Candidate, IndexOptions};
pub use matching::{ContextWindow, MatchSpan, Matcher, Span, context_window};
pub use pipeline::{Classifier, ClassifierOptions, TextClassification};
pub use reference::{
    AuditReport, Category, EntryError, IngredientForm, IngredientRecord, LoadReport, Membership,
    Origin, PriorityOrder, PriorityOrderError, ReferenceData, ReferenceError, Severity, audit,
};
pub use scoring::{ClassificationResult, PriorityDecision, PriorityResolver};
pub use stats::{ClassifierStats, StatsSnapshot};
