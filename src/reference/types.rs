use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::PriorityOrderError;
use crate::constants::{ALLERGEN_FILENAME, BANNED_FILENAME, HARMFUL_FILENAME, PASSIVE_FILENAME};

/// Hazard/quality category a classification database belongs to.
///
/// Ordering is the scoring priority: `Banned > Harmful > Allergen > Passive`. Every variant must
/// have an arm in [`Category::rank`], so a new category cannot be added without placing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Banned or recalled ingredients.
    Banned,
    /// Harmful additives with a risk level.
    Harmful,
    /// Declared allergens.
    Allergen,
    /// Passive/inactive excipients.
    Passive,
}

impl Category {
    /// All categories, highest priority first.
    pub const ALL: [Category; 4] = [
        Category::Banned,
        Category::Harmful,
        Category::Allergen,
        Category::Passive,
    ];

    fn rank(self) -> u8 {
        match self {
            Category::Banned => 3,
            Category::Harmful => 2,
            Category::Allergen => 1,
            Category::Passive => 0,
        }
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Banned => "banned",
            Category::Harmful => "harmful",
            Category::Allergen => "allergen",
            Category::Passive => "passive",
        }
    }

    /// Reference file holding this category's database.
    pub fn filename(self) -> &'static str {
        match self {
            Category::Banned => BANNED_FILENAME,
            Category::Harmful => HARMFUL_FILENAME,
            Category::Allergen => ALLERGEN_FILENAME,
            Category::Passive => PASSIVE_FILENAME,
        }
    }

    /// Severity assumed when an entry does not declare one.
    pub fn default_severity(self) -> Severity {
        match self {
            Category::Banned => Severity::Critical,
            Category::Harmful | Category::Allergen => Severity::Low,
            Category::Passive => Severity::None,
        }
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PriorityOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "banned" | "recalled" | "banned_recalled" => Ok(Category::Banned),
            "harmful" | "harmful_additives" => Ok(Category::Harmful),
            "allergen" | "allergens" => Ok(Category::Allergen),
            "passive" | "inactive" | "passive_inactive" => Ok(Category::Passive),
            other => Err(PriorityOrderError::UnknownCategory {
                value: other.to_string(),
            }),
        }
    }
}

/// Host-configurable priority order: a permutation of all four categories, highest first.
///
/// The default follows [`Category`]'s own ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityOrder([Category; 4]);

impl PriorityOrder {
    /// Builds an order from categories listed highest priority first.
    pub fn new(order: [Category; 4]) -> Result<Self, PriorityOrderError> {
        for category in Category::ALL {
            let count = order.iter().filter(|c| **c == category).count();
            if count != 1 {
                return Err(PriorityOrderError::NotAPermutation { category, count });
            }
        }
        Ok(Self(order))
    }

    /// Position of `category` in this order (`0` is the highest priority).
    pub fn rank(&self, category: Category) -> usize {
        self.0
            .iter()
            .position(|c| *c == category)
            .unwrap_or(self.0.len())
    }

    /// Categories highest priority first.
    pub fn categories(&self) -> &[Category; 4] {
        &self.0
    }
}

impl Default for PriorityOrder {
    fn default() -> Self {
        Self(Category::ALL)
    }
}

impl fmt::Display for PriorityOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|c| c.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

impl FromStr for PriorityOrder {
    type Err = PriorityOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Category::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        let order: [Category; 4] =
            parsed
                .as_slice()
                .try_into()
                .map_err(|_| PriorityOrderError::WrongLength {
                    count: parsed.len(),
                })?;
        Self::new(order)
    }
}

/// Risk level / severity attached to a database membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    #[serde(alias = "medium")]
    Moderate,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Where an indexed form came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "category")]
pub enum Origin {
    /// General ingredient catalog (no classification membership of its own).
    Catalog,
    /// A classification database.
    Database(Category),
}

impl Origin {
    /// Originating category, if any.
    pub fn category(self) -> Option<Category> {
        match self {
            Origin::Catalog => None,
            Origin::Database(category) => Some(category),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Catalog => f.write_str("catalog"),
            Origin::Database(category) => write!(f, "{}", category),
        }
    }
}

/// A specific compound or spelling variant with its own alias set and context vocabulary.
///
/// Vocabulary words are stored trimmed and lowercased; blank words are dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientForm {
    key: String,
    /// Normalized name linking same-named entries across databases; the key when unnamed.
    identity: String,
    aliases: Vec<String>,
    context_include: Vec<String>,
    context_exclude: Vec<String>,
    weight: Option<f32>,
}

impl IngredientForm {
    /// Creates a form; `key` is normalized to trimmed lowercase.
    pub fn new<I, S>(key: &str, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = normalize_key(key);
        Self {
            identity: key.clone(),
            key,
            aliases: aliases.into_iter().map(Into::into).collect(),
            context_include: Vec::new(),
            context_exclude: Vec::new(),
            weight: None,
        }
    }

    pub fn with_include<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.context_include = normalize_vocabulary(words);
        self
    }

    pub fn with_exclude<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.context_exclude = normalize_vocabulary(words);
        self
    }

    pub fn with_weight(mut self, weight: Option<f32>) -> Self {
        self.weight = weight;
        self
    }

    /// Ties this form to its entry's standard name. A blank name leaves the key in place.
    pub fn with_identity(mut self, standard_name: &str) -> Self {
        let name = normalize_name(standard_name);
        if !name.is_empty() {
            self.identity = name;
        }
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn context_include(&self) -> &[String] {
        &self.context_include
    }

    pub fn context_exclude(&self) -> &[String] {
        &self.context_exclude
    }

    pub fn weight(&self) -> Option<f32> {
        self.weight
    }
}

/// Forms sharing one conceptual identity (an acronym entry may group unrelated compounds).
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientRecord {
    key: String,
    standard_name: String,
    identity: String,
    forms: Vec<Arc<IngredientForm>>,
}

impl IngredientRecord {
    pub fn new(key: &str, standard_name: &str, forms: Vec<IngredientForm>) -> Self {
        let key = normalize_key(key);
        let identity = match normalize_name(standard_name) {
            name if name.is_empty() => key.clone(),
            name => name,
        };
        Self {
            key,
            standard_name: standard_name.trim().to_string(),
            identity,
            forms: forms.into_iter().map(Arc::new).collect(),
        }
    }

    /// Overrides the identity derived from the standard name. A blank name is ignored.
    pub fn with_identity(mut self, name: &str) -> Self {
        let name = normalize_name(name);
        if !name.is_empty() {
            self.identity = name;
        }
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn standard_name(&self) -> &str {
        &self.standard_name
    }

    /// Normalized standard name. Entries in different databases that share it are one
    /// ingredient, whatever their ids.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn forms(&self) -> &[Arc<IngredientForm>] {
        &self.forms
    }
}

/// One ingredient's membership in one classification database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Membership {
    pub category: Category,
    pub severity: Severity,
    /// Free-form label from the database (e.g. `"sweetener"`, `"excipient"`).
    pub category_label: Option<String>,
    /// Usage role (active vs. excipient) decides the final category downstream.
    pub context_dependent: bool,
    /// Carried through as metadata; never reorders categories.
    pub scoring_priority: Option<u8>,
}

impl Membership {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            severity: category.default_severity(),
            category_label: None,
            context_dependent: false,
            scoring_priority: None,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.category_label = Some(label.into());
        self
    }

    pub fn context_dependent(mut self, flag: bool) -> Self {
        self.context_dependent = flag;
        self
    }

    pub fn with_scoring_priority(mut self, hint: Option<u8>) -> Self {
        self.scoring_priority = hint;
        self
    }
}

/// A database row: the ingredient's forms plus its membership metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseEntry {
    pub record: IngredientRecord,
    pub membership: Membership,
}

/// One category's dictionary, keyed by ingredient key (and form key, and identity).
#[derive(Debug, Clone)]
pub struct ClassificationDatabase {
    category: Category,
    entries: Vec<DatabaseEntry>,
    by_key: HashMap<String, usize>,
    by_form_key: HashMap<String, usize>,
    by_identity: HashMap<String, usize>,
}

impl ClassificationDatabase {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            entries: Vec::new(),
            by_key: HashMap::new(),
            by_form_key: HashMap::new(),
            by_identity: HashMap::new(),
        }
    }

    /// Appends an entry. Returns it back if another entry already has its key.
    ///
    /// The entry is also reachable through its forms' keys and its identity, unless an earlier
    /// entry claimed them. Only entry keys take part in the duplicate check.
    pub fn insert(&mut self, entry: DatabaseEntry) -> Result<(), DatabaseEntry> {
        let key = entry.record.key().to_string();
        if self.by_key.contains_key(&key) {
            return Err(entry);
        }
        let position = self.entries.len();
        self.by_key.insert(key, position);
        for form in entry.record.forms() {
            self.by_form_key
                .entry(form.key().to_string())
                .or_insert(position);
        }
        self.by_identity
            .entry(entry.record.identity().to_string())
            .or_insert(position);
        self.entries.push(entry);
        Ok(())
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Entry by its own key, falling back to the key of one of its forms.
    pub fn get(&self, key: &str) -> Option<&DatabaseEntry> {
        self.by_key
            .get(key)
            .or_else(|| self.by_form_key.get(key))
            .map(|&i| &self.entries[i])
    }

    /// First entry whose normalized standard name is `identity`.
    pub fn get_by_identity(&self, identity: &str) -> Option<&DatabaseEntry> {
        self.by_identity.get(identity).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[DatabaseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Trimmed, lowercased ingredient key.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Lowercased name with whitespace runs collapsed.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn normalize_vocabulary<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for word in words {
        let word = normalize_name(word.as_ref());
        if !word.is_empty() && !out.contains(&word) {
            out.push(word);
        }
    }
    out
}
