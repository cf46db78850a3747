//! Per-text classification pipeline.
//!
//! `text → Matcher → context window → Disambiguator → PriorityResolver → records`.
//! A [`Classifier`] holds only shared immutable reference data plus atomic counters, so one
//! instance can serve any number of worker threads.

pub mod classifier;


pub use classifier::{Classifier, ClassifierOptions, TextClassification};
