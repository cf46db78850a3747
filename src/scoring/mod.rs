//! Priority resolution: one scoring category per resolved ingredient occurrence.
//!
//! An ingredient may sit in several databases at once (maltodextrin is both a harmful sweetener
//! and a passive filler). Scoring it under every membership would penalize it twice, so the
//! [`PriorityResolver`] keeps only the highest-priority category:
//!
//! - absent from every database: unclassified;
//! - present once: that category;
//! - present several times: the highest category is scored. Context-dependent ingredients keep
//!   the next-highest category as non-scoring `secondary_category` metadata; for all others the
//!   lower memberships are dropped.
//!
//! The default order is `Banned > Harmful > Allergen > Passive`; hosts may configure another
//! [`PriorityOrder`](crate::reference::PriorityOrder).

pub mod resolver;
pub mod types;


pub use resolver::PriorityResolver;
pub use types::{ClassificationResult, PriorityDecision};
