use std::fmt;

use serde::Serialize;

use crate::disambiguation::UnresolvedReason;
use crate::matching::Span;
use crate::reference::{Category, Membership, Severity};

/// Outcome of priority resolution for one ingredient key.
#[derive(Debug, Clone, PartialEq)]
pub enum PriorityDecision {
    /// The key belongs to no classification database.
    Unclassified,
    Classified {
        /// Membership of the highest-priority category present.
        scored: Membership,
        /// Next-highest category, kept only for context-dependent ingredients.
        secondary: Option<Category>,
        context_dependent: bool,
        /// Every category present, highest priority first.
        overlapping: Vec<Category>,
    },
}

impl PriorityDecision {
    pub fn scored_category(&self) -> Option<Category> {
        match self {
            PriorityDecision::Classified { scored, .. } => Some(scored.category),
            PriorityDecision::Unclassified => None,
        }
    }

    pub fn secondary_category(&self) -> Option<Category> {
        match self {
            PriorityDecision::Classified { secondary, .. } => *secondary,
            PriorityDecision::Unclassified => None,
        }
    }

    /// Returns `true` if the key appears in more than one category.
    pub fn is_overlap(&self) -> bool {
        matches!(self, PriorityDecision::Classified { overlapping, .. } if overlapping.len() > 1)
    }

    pub fn debug_status(&self) -> &'static str {
        match self {
            PriorityDecision::Unclassified => "UNCLASSIFIED",
            PriorityDecision::Classified {
                secondary: Some(_), ..
            } => "CLASSIFIED_WITH_SECONDARY",
            PriorityDecision::Classified { .. } => "CLASSIFIED",
        }
    }
}

impl fmt::Display for PriorityDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityDecision::Unclassified => write!(f, "UNCLASSIFIED"),
            PriorityDecision::Classified {
                scored,
                secondary: Some(secondary),
                ..
            } => write!(
                f,
                "CLASSIFIED ({}, severity: {}, secondary: {})",
                scored.category, scored.severity, secondary
            ),
            PriorityDecision::Classified { scored, .. } => write!(
                f,
                "CLASSIFIED ({}, severity: {})",
                scored.category, scored.severity
            ),
        }
    }
}

/// One classified (or unresolved) ingredient occurrence.
///
/// Unresolved occurrences carry `unresolved_reason` and no key or category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_name: Option<String>,
    /// Normalized alias that matched.
    pub matched_alias: String,
    /// Exact source slice.
    pub matched_text: String,
    pub span: Span,
    pub scored_category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_priority: Option<u8>,
    pub context_dependent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unresolved_reason: Option<UnresolvedReason>,
}

impl ClassificationResult {
    pub fn is_unresolved(&self) -> bool {
        self.unresolved_reason.is_some()
    }

    /// Resolved and present in at least one database.
    pub fn is_classified(&self) -> bool {
        self.scored_category.is_some()
    }
}
