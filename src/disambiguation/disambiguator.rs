use std::sync::Arc;

use tracing::debug;

use super::types::{
    AcceptReason, CandidateDecision, CandidateOutcome, Resolution, UnresolvedMatch,
    UnresolvedReason,
};
use crate::index::{Candidate, group_by_ingredient};
use crate::matching::{ContextWindow, MatchSpan, contains_phrase};
use crate::reference::IngredientForm;

/// Context-vocabulary disambiguation. Stateless; never guesses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disambiguator;

impl Disambiguator {
    /// Evaluates one candidate form against a lowercased context window.
    ///
    /// Exclude words are checked before include words.
    pub fn evaluate(window: &str, form: &IngredientForm) -> CandidateDecision {
        if let Some(word) = form
            .context_exclude()
            .iter()
            .find(|w| contains_phrase(window, w))
        {
            return CandidateDecision::Reject { word: word.clone() };
        }

        if let Some(word) = form
            .context_include()
            .iter()
            .find(|w| contains_phrase(window, w))
        {
            return CandidateDecision::Accept(AcceptReason::IncludeWord(word.clone()));
        }

        if form.context_include().is_empty() {
            CandidateDecision::Accept(AcceptReason::NoIncludeRules)
        } else {
            CandidateDecision::Inconclusive
        }
    }

    /// Resolves a span to a single ingredient key.
    ///
    /// Accepted candidates naming the same ingredient (one key under several origins, or
    /// same-named entries filed under different ids) count once. The first of them supplies the
    /// key.
    pub fn resolve(span: &MatchSpan<'_>, window: &ContextWindow) -> Resolution {
        let mut outcomes = Vec::with_capacity(span.candidates.len());
        let mut accepted: Vec<&Candidate> = Vec::new();

        for candidate in span.candidates {
            let decision = Self::evaluate(&window.text, &candidate.form);
            debug!(
                alias = span.alias,
                key = candidate.key(),
                origin = %candidate.origin,
                decision = decision.debug_status(),
                "Evaluated candidate"
            );

            if decision.is_accepted() {
                accepted.push(candidate);
            }
            outcomes.push(CandidateOutcome {
                key: candidate.key().to_string(),
                origin: candidate.origin,
                decision,
            });
        }

        let groups = group_by_ingredient(accepted);
        let reason = match groups.as_slice() {
            [group] => {
                let first = group[0];
                return Resolution::Resolved {
                    key: first.key().to_string(),
                    form: Arc::clone(&first.form),
                    outcomes,
                };
            }
            [] => UnresolvedReason::NoAcceptedCandidate,
            many => UnresolvedReason::Tie {
                keys: many.iter().map(|group| group[0].key().to_string()).collect(),
            },
        };

        debug!(
            alias = span.alias,
            start = span.span.start,
            reason = reason.debug_status(),
            "Match left unresolved"
        );

        Resolution::Unresolved(UnresolvedMatch {
            alias: span.alias.to_string(),
            matched_text: span.matched_text.clone(),
            span: span.span,
            window: window.text.clone(),
            reason,
            outcomes,
        })
    }
}
