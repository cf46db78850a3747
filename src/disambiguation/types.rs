use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::matching::Span;
use crate::reference::{IngredientForm, Origin};

/// Why a candidate was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptReason {
    /// An include word occurred in the window.
    IncludeWord(String),
    /// The form declares no include vocabulary and nothing excluded it.
    NoIncludeRules,
}

/// Per-candidate outcome of context evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateDecision {
    Accept(AcceptReason),
    /// An exclude word occurred in the window.
    Reject { word: String },
    /// Include vocabulary exists but none of it occurred.
    Inconclusive,
}

impl CandidateDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CandidateDecision::Accept(_))
    }

    pub fn debug_status(&self) -> &'static str {
        match self {
            CandidateDecision::Accept(AcceptReason::IncludeWord(_)) => "ACCEPT_INCLUDE",
            CandidateDecision::Accept(AcceptReason::NoIncludeRules) => "ACCEPT_NO_RULES",
            CandidateDecision::Reject { .. } => "REJECT",
            CandidateDecision::Inconclusive => "INCONCLUSIVE",
        }
    }
}

impl fmt::Display for CandidateDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateDecision::Accept(AcceptReason::IncludeWord(word)) => {
                write!(f, "ACCEPT (include: {})", word)
            }
            CandidateDecision::Accept(AcceptReason::NoIncludeRules) => {
                write!(f, "ACCEPT (no include rules)")
            }
            CandidateDecision::Reject { word } => write!(f, "REJECT (exclude: {})", word),
            CandidateDecision::Inconclusive => write!(f, "INCONCLUSIVE"),
        }
    }
}

/// One candidate considered for a span, with its decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateOutcome {
    pub key: String,
    pub origin: Origin,
    pub decision: CandidateDecision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum UnresolvedReason {
    /// Every candidate was rejected or inconclusive.
    NoAcceptedCandidate,
    /// More than one distinct ingredient was accepted.
    Tie { keys: Vec<String> },
}

impl UnresolvedReason {
    pub fn debug_status(&self) -> &'static str {
        match self {
            UnresolvedReason::NoAcceptedCandidate => "NO_ACCEPTED_CANDIDATE",
            UnresolvedReason::Tie { .. } => "TIE",
        }
    }
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::NoAcceptedCandidate => write!(f, "no accepted candidate"),
            UnresolvedReason::Tie { keys } => write!(f, "tie between {}", keys.join(", ")),
        }
    }
}

/// Diagnostics for a span that could not be resolved, kept for curation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedMatch {
    /// Normalized alias.
    pub alias: String,
    pub matched_text: String,
    pub span: Span,
    /// Lowercased context window that was evaluated.
    pub window: String,
    pub reason: UnresolvedReason,
    pub outcomes: Vec<CandidateOutcome>,
}

/// Terminal state of a matched span after disambiguation.
#[derive(Debug, Clone)]
pub enum Resolution {
    Resolved {
        key: String,
        form: Arc<IngredientForm>,
        outcomes: Vec<CandidateOutcome>,
    },
    Unresolved(UnresolvedMatch),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }

    /// Resolved ingredient key, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Resolution::Resolved { key, .. } => Some(key),
            Resolution::Unresolved(_) => None,
        }
    }

    pub fn outcomes(&self) -> &[CandidateOutcome] {
        match self {
            Resolution::Resolved { outcomes, .. } => outcomes,
            Resolution::Unresolved(unresolved) => &unresolved.outcomes,
        }
    }
}
