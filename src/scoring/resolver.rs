use tracing::debug;

use super::types::{ClassificationResult, PriorityDecision};
use crate::disambiguation::UnresolvedMatch;
use crate::matching::MatchSpan;
use crate::reference::{Membership, PriorityOrder, ReferenceData};
use crate::stats::ClassifierStats;

/// Picks the single scoring category for a resolved ingredient.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityResolver {
    order: PriorityOrder,
}

impl PriorityResolver {
    pub fn new(order: PriorityOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> &PriorityOrder {
        &self.order
    }

    /// Resolves a set of memberships to one scored category. Pure and idempotent.
    ///
    /// A category listed twice counts once (first membership wins).
    pub fn resolve<'m, I>(&self, memberships: I) -> PriorityDecision
    where
        I: IntoIterator<Item = &'m Membership>,
    {
        let mut present: Vec<&Membership> = Vec::new();
        for membership in memberships {
            if !present.iter().any(|m| m.category == membership.category) {
                present.push(membership);
            }
        }
        present.sort_by_key(|m| self.order.rank(m.category));

        let Some((scored, rest)) = present.split_first() else {
            return PriorityDecision::Unclassified;
        };

        let context_dependent = present.iter().any(|m| m.context_dependent);
        let secondary = if context_dependent {
            rest.first().map(|m| m.category)
        } else {
            None
        };

        PriorityDecision::Classified {
            scored: (*scored).clone(),
            secondary,
            context_dependent,
            overlapping: present.iter().map(|m| m.category).collect(),
        }
    }

    /// Classifies a resolved span and records it in `stats`.
    pub fn classify(
        &self,
        span: &MatchSpan<'_>,
        key: &str,
        reference: &ReferenceData,
        stats: &ClassifierStats,
    ) -> ClassificationResult {
        let decision = self.resolve(reference.memberships(key));

        stats.record_resolved();
        if decision.is_overlap() {
            stats.record_overlap();
        }

        debug!(
            key,
            start = span.span.start,
            status = decision.debug_status(),
            scored = ?decision.scored_category(),
            secondary = ?decision.secondary_category(),
            "Classified ingredient"
        );

        let mut result = ClassificationResult {
            ingredient_key: Some(key.to_string()),
            standard_name: reference.standard_name(key).map(str::to_string),
            matched_alias: span.alias.to_string(),
            matched_text: span.matched_text.clone(),
            span: span.span,
            scored_category: None,
            severity: None,
            category_label: None,
            scoring_priority: None,
            context_dependent: false,
            secondary_category: None,
            unresolved_reason: None,
        };

        match decision {
            PriorityDecision::Unclassified => stats.record_unclassified(),
            PriorityDecision::Classified {
                scored,
                secondary,
                context_dependent,
                ..
            } => {
                result.scored_category = Some(scored.category);
                result.severity = Some(scored.severity);
                result.category_label = scored.category_label;
                result.scoring_priority = scored.scoring_priority;
                result.context_dependent = context_dependent;
                result.secondary_category = secondary;
            }
        }

        result
    }

    /// Record for a span that disambiguation left unresolved.
    pub fn unresolved(
        &self,
        unresolved: &UnresolvedMatch,
        stats: &ClassifierStats,
    ) -> ClassificationResult {
        stats.record_unresolved();

        ClassificationResult {
            ingredient_key: None,
            standard_name: None,
            matched_alias: unresolved.alias.clone(),
            matched_text: unresolved.matched_text.clone(),
            span: unresolved.span,
            scored_category: None,
            severity: None,
            category_label: None,
            scoring_priority: None,
            context_dependent: false,
            secondary_category: None,
            unresolved_reason: Some(unresolved.reason.clone()),
        }
    }
}
