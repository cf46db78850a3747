//! Consistency audit over loaded reference data.
//!
//! Surfaces the situations that change classification outcomes silently: ingredients listed in
//! several databases, aliases shared by unrelated ingredients, and harmful entries that carry no
//! risk at all.

use std::collections::HashMap;

use serde::Serialize;

use super::data::ReferenceData;
use super::types::{Category, Severity};
use crate::index::group_by_ingredient;

/// An ingredient present in more than one database.
///
/// Entries are joined by key or by normalized standard name, so files that give the same
/// ingredient different ids still overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOverlap {
    /// Key of the highest-priority entry.
    pub key: String,
    /// Every entry key joined into this ingredient, highest priority first.
    pub keys: Vec<String>,
    /// Highest priority first.
    pub categories: Vec<Category>,
    /// When `false`, every category but the first is dropped at classification time.
    pub context_dependent: bool,
}

/// A normalized alias declared by more than one distinct ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousAlias {
    pub alias: String,
    /// One key per distinct ingredient.
    pub keys: Vec<String>,
    /// Keys that declare no include vocabulary; they are accepted whenever not excluded.
    pub unguarded_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskWarning {
    pub key: String,
    pub category: Category,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub category_overlaps: Vec<CategoryOverlap>,
    pub ambiguous_aliases: Vec<AmbiguousAlias>,
    pub risk_warnings: Vec<RiskWarning>,
}

impl AuditReport {
    /// Overlaps whose lower categories will be dropped.
    pub fn unflagged_overlaps(&self) -> impl Iterator<Item = &CategoryOverlap> {
        self.category_overlaps
            .iter()
            .filter(|o| !o.context_dependent)
    }

    pub fn is_clean(&self) -> bool {
        self.category_overlaps.is_empty()
            && self.ambiguous_aliases.is_empty()
            && self.risk_warnings.is_empty()
    }
}

#[derive(Default)]
struct OverlapGroup<'a> {
    keys: Vec<&'a str>,
    categories: Vec<Category>,
    context_dependent: bool,
}

pub fn audit(reference: &ReferenceData) -> AuditReport {
    let mut groups: Vec<OverlapGroup<'_>> = Vec::new();
    let mut by_key: HashMap<&str, usize> = HashMap::new();
    let mut by_identity: HashMap<&str, usize> = HashMap::new();
    let mut risk_warnings = Vec::new();

    for database in reference.databases() {
        for entry in database.entries() {
            let key = entry.record.key();
            let identity = entry.record.identity();
            let slot = match by_key.get(key).or_else(|| by_identity.get(identity)) {
                Some(&slot) => slot,
                None => {
                    groups.push(OverlapGroup::default());
                    groups.len() - 1
                }
            };
            by_key.entry(key).or_insert(slot);
            by_identity.entry(identity).or_insert(slot);

            let group = &mut groups[slot];
            if !group.keys.contains(&key) {
                group.keys.push(key);
            }
            if !group.categories.contains(&database.category()) {
                group.categories.push(database.category());
            }
            group.context_dependent |= entry.membership.context_dependent;

            if database.category() == Category::Harmful
                && entry.membership.severity == Severity::None
            {
                risk_warnings.push(RiskWarning {
                    key: key.to_string(),
                    category: Category::Harmful,
                    reason: "harmful entry with risk level 'none'; consider the passive list"
                        .to_string(),
                });
            }
        }
    }

    let mut category_overlaps: Vec<CategoryOverlap> = groups
        .into_iter()
        .filter(|group| group.categories.len() > 1)
        .map(|mut group| {
            group.categories.sort_by(|a, b| b.cmp(a));
            CategoryOverlap {
                key: group.keys[0].to_string(),
                keys: group.keys.iter().map(|k| k.to_string()).collect(),
                categories: group.categories,
                context_dependent: group.context_dependent,
            }
        })
        .collect();
    category_overlaps.sort_by(|a, b| a.key.cmp(&b.key));

    let mut ambiguous_aliases = Vec::new();
    for indexed in reference.index().aliases_longest_first() {
        let ingredients = group_by_ingredient(indexed.candidates());
        if ingredients.len() < 2 {
            continue;
        }

        let keys = ingredients
            .iter()
            .map(|group| group[0].key().to_string())
            .collect();
        let unguarded_keys = ingredients
            .iter()
            .filter(|group| group.iter().any(|c| c.form.context_include().is_empty()))
            .map(|group| group[0].key().to_string())
            .collect();
        ambiguous_aliases.push(AmbiguousAlias {
            alias: indexed.alias().to_string(),
            keys,
            unguarded_keys,
        });
    }
    ambiguous_aliases.sort_by(|a, b| a.alias.cmp(&b.alias));

    AuditReport {
        category_overlaps,
        ambiguous_aliases,
        risk_warnings,
    }
}
