use std::collections::HashMap;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::reference::{EntryError, IngredientForm, Origin};

/// Alias normalization and matching options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexOptions {
    /// Match aliases with their declared case. Default: `false`.
    pub case_sensitive: bool,
}

/// One (form, originating-category) pair declaring an alias.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub form: Arc<IngredientForm>,
    pub origin: Origin,
}

impl Candidate {
    /// Ingredient key this candidate resolves to.
    #[inline]
    pub fn key(&self) -> &str {
        self.form.key()
    }

    #[inline]
    pub fn identity(&self) -> &str {
        self.form.identity()
    }

    /// Same key, or same identity: one ingredient listed under several origins or ids.
    pub fn same_ingredient(&self, other: &Candidate) -> bool {
        self.key() == other.key() || self.identity() == other.identity()
    }
}

/// Groups candidates that name the same ingredient, preserving first-seen order.
pub fn group_by_ingredient<'c, I>(candidates: I) -> Vec<Vec<&'c Candidate>>
where
    I: IntoIterator<Item = &'c Candidate>,
{
    let mut groups: Vec<Vec<&Candidate>> = Vec::new();
    for candidate in candidates {
        match groups
            .iter_mut()
            .find(|group| group.iter().any(|c| c.same_ingredient(candidate)))
        {
            Some(group) => group.push(candidate),
            None => groups.push(vec![candidate]),
        }
    }
    groups
}

/// A normalized alias with its compiled search pattern and candidates.
#[derive(Debug, Clone)]
pub struct IndexedAlias {
    alias: String,
    first_token: String,
    char_len: usize,
    pattern: Regex,
    candidates: Vec<Candidate>,
}

impl IndexedAlias {
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Length of the normalized alias in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub(crate) fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub(crate) fn first_token(&self) -> &str {
        &self.first_token
    }
}

/// Normalized alias → candidate forms, with aliases ordered longest first.
#[derive(Debug, Clone)]
pub struct AliasIndex {
    options: IndexOptions,
    entries: Vec<IndexedAlias>,
    by_alias: HashMap<String, usize>,
}

impl AliasIndex {
    pub fn builder(options: IndexOptions) -> IndexBuilder {
        IndexBuilder::new(options)
    }

    /// Trims, collapses whitespace runs and (unless case-sensitive) lowercases.
    pub fn normalize(&self, text: &str) -> String {
        normalize_alias(text, self.options)
    }

    /// Candidates for an alias; empty when the alias is unknown.
    pub fn lookup(&self, alias: &str) -> &[Candidate] {
        self.by_alias
            .get(&self.normalize(alias))
            .map(|&i| self.entries[i].candidates())
            .unwrap_or(&[])
    }

    pub fn get(&self, alias: &str) -> Option<&IndexedAlias> {
        self.by_alias
            .get(&self.normalize(alias))
            .map(|&i| &self.entries[i])
    }

    /// Indexed aliases, longest first (ties alphabetical).
    pub fn aliases_longest_first(&self) -> &[IndexedAlias] {
        &self.entries
    }

    pub fn options(&self) -> IndexOptions {
        self.options
    }

    /// Number of distinct normalized aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulates forms before compiling the index.
#[derive(Debug)]
pub struct IndexBuilder {
    options: IndexOptions,
    order: Vec<String>,
    candidates: HashMap<String, Vec<Candidate>>,
}

impl IndexBuilder {
    fn new(options: IndexOptions) -> Self {
        Self {
            options,
            order: Vec::new(),
            candidates: HashMap::new(),
        }
    }

    /// Adds every alias of `form`. Returns how many aliases were indexed.
    ///
    /// A form without a single non-blank alias is rejected and nothing is added.
    pub fn add_form(
        &mut self,
        form: &Arc<IngredientForm>,
        origin: Origin,
    ) -> Result<usize, EntryError> {
        let aliases: Vec<String> = form
            .aliases()
            .iter()
            .map(|a| normalize_alias(a, self.options))
            .filter(|a| !a.is_empty())
            .collect();

        if aliases.is_empty() {
            return Err(EntryError::empty_aliases(form.key(), origin));
        }

        let mut added = 0;
        for alias in aliases {
            if !self.candidates.contains_key(&alias) {
                self.order.push(alias.clone());
            }
            let slot = self.candidates.entry(alias).or_default();

            let duplicate = slot
                .iter()
                .any(|c| c.key() == form.key() && c.origin == origin);
            if !duplicate {
                slot.push(Candidate {
                    form: Arc::clone(form),
                    origin,
                });
                added += 1;
            }
        }

        Ok(added)
    }

    /// Compiles search patterns and sorts aliases longest first.
    pub fn build(mut self) -> (AliasIndex, Vec<EntryError>) {
        let mut errors = Vec::new();
        let mut entries = Vec::with_capacity(self.order.len());

        for alias in self.order {
            let Some(candidates) = self.candidates.remove(&alias) else {
                continue;
            };

            match compile_pattern(&alias, self.options) {
                Ok(pattern) => entries.push(IndexedAlias {
                    first_token: alias.split(' ').next().unwrap_or_default().to_lowercase(),
                    char_len: alias.chars().count(),
                    alias,
                    pattern,
                    candidates,
                }),
                Err(e) => {
                    for candidate in &candidates {
                        errors.push(EntryError::InvalidAlias {
                            key: candidate.key().to_string(),
                            alias: alias.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        entries.sort_by(|a, b| {
            b.char_len
                .cmp(&a.char_len)
                .then_with(|| a.alias.cmp(&b.alias))
        });

        let by_alias = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.alias.clone(), i))
            .collect();

        debug!(
            aliases = entries.len(),
            rejected = errors.len(),
            case_sensitive = self.options.case_sensitive,
            "Built alias index"
        );

        (
            AliasIndex {
                options: self.options,
                entries,
                by_alias,
            },
            errors,
        )
    }
}

pub(crate) fn normalize_alias(text: &str, options: IndexOptions) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if options.case_sensitive {
        collapsed
    } else {
        collapsed.to_lowercase()
    }
}

// Tokens may be separated by any whitespace run in the source. Word boundaries are checked by
// the matcher, since `\b` misbehaves next to aliases that start or end with punctuation.
fn compile_pattern(alias: &str, options: IndexOptions) -> Result<Regex, regex::Error> {
    let pattern = alias
        .split(' ')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .build()
}
