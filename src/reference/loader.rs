//! JSON reference file parsing.
//!
//! A file that cannot be read or parsed as a whole is a [`ReferenceError`]. Individual entries
//! are deserialized one at a time so a single malformed row becomes an [`EntryError`] and the
//! rest of the file still loads.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use super::error::{EntryError, ReferenceError, ReferenceResult};
use super::types::{
    Category, ClassificationDatabase, DatabaseEntry, IngredientForm, IngredientRecord, Membership,
    Origin, Severity, normalize_key,
};

#[derive(Debug, Deserialize)]
struct RawFile {
    #[serde(
        alias = "harmful_additives",
        alias = "passive_inactive_ingredients",
        alias = "common_allergens",
        alias = "banned_ingredients"
    )]
    ingredients: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    id: String,
    #[serde(default)]
    standard_name: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    context_include: Vec<String>,
    #[serde(default)]
    context_exclude: Vec<String>,
    #[serde(default)]
    weight: Option<f32>,
    #[serde(default, alias = "severity", alias = "severity_level")]
    risk_level: Option<Severity>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    context_dependent: bool,
    #[serde(default)]
    scoring_priority: Option<u8>,
    #[serde(default)]
    forms: Vec<RawForm>,
}

#[derive(Debug, Deserialize)]
struct RawForm {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    context_include: Vec<String>,
    #[serde(default)]
    context_exclude: Vec<String>,
    #[serde(default)]
    weight: Option<f32>,
}

impl RawEntry {
    fn into_record(self, origin: Origin) -> Result<IngredientRecord, EntryError> {
        let declared_name = self
            .standard_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let standard_name = declared_name.clone().unwrap_or_else(|| self.id.clone());
        // Ids are file-specific; without a declared name the primary alias names the ingredient.
        let identity = declared_name
            .clone()
            .or_else(|| self.aliases.iter().find(|a| !a.trim().is_empty()).cloned())
            .unwrap_or_else(|| self.id.clone());

        let mut forms = Vec::with_capacity(self.forms.len() + 1);

        // Top-level aliases declare the record's own form; the standard name joins any usable
        // alias set. An all-blank set is kept as-is so the index rejects it.
        if !self.aliases.is_empty() {
            let mut aliases = self.aliases;
            let usable = aliases.iter().any(|a| !a.trim().is_empty());
            if usable && !aliases.iter().any(|a| a.trim().eq_ignore_ascii_case(&standard_name)) {
                aliases.insert(0, standard_name.clone());
            }
            forms.push(
                IngredientForm::new(&self.id, aliases)
                    .with_include(&self.context_include)
                    .with_exclude(&self.context_exclude)
                    .with_weight(self.weight)
                    .with_identity(&identity),
            );
        } else if self.forms.is_empty() {
            // A bare entry still matches on its declared standard name.
            let Some(name) = declared_name else {
                return Err(EntryError::empty_aliases(&normalize_key(&self.id), origin));
            };
            forms.push(
                IngredientForm::new(&self.id, [name])
                    .with_include(&self.context_include)
                    .with_exclude(&self.context_exclude)
                    .with_weight(self.weight)
                    .with_identity(&identity),
            );
        }

        for form in self.forms {
            let extra = IngredientForm::new(form.id.as_deref().unwrap_or(&self.id), form.aliases)
                .with_include(&form.context_include)
                .with_exclude(&form.context_exclude)
                .with_weight(form.weight);
            // Forms with their own id are distinct compounds, not the entry itself.
            forms.push(match form.id {
                Some(_) => extra,
                None => extra.with_identity(&identity),
            });
        }

        Ok(IngredientRecord::new(&self.id, &standard_name, forms).with_identity(&identity))
    }
}

fn parse_entries(
    source_name: &str,
    json: &str,
) -> ReferenceResult<(Vec<RawEntry>, Vec<EntryError>)> {
    let file: RawFile = serde_json::from_str(json).map_err(|source| ReferenceError::Parse {
        name: source_name.to_string(),
        source,
    })?;

    let mut entries = Vec::with_capacity(file.ingredients.len());
    let mut errors = Vec::new();

    for (index, value) in file.ingredients.into_iter().enumerate() {
        match serde_json::from_value::<RawEntry>(value) {
            Ok(entry) if entry.id.trim().is_empty() => errors.push(EntryError::Malformed {
                source_name: source_name.to_string(),
                index,
                reason: "empty id".to_string(),
            }),
            Ok(entry) => entries.push(entry),
            Err(e) => errors.push(EntryError::Malformed {
                source_name: source_name.to_string(),
                index,
                reason: e.to_string(),
            }),
        }
    }

    Ok((entries, errors))
}

/// Parses one category's database from JSON text.
pub fn parse_database(
    category: Category,
    source_name: &str,
    json: &str,
) -> ReferenceResult<(ClassificationDatabase, Vec<EntryError>)> {
    let (entries, mut errors) = parse_entries(source_name, json)?;
    let mut database = ClassificationDatabase::new(category);

    for raw in entries {
        let membership = Membership::new(category)
            .with_severity(raw.risk_level.unwrap_or(category.default_severity()))
            .context_dependent(raw.context_dependent)
            .with_scoring_priority(raw.scoring_priority);
        let membership = match raw.category.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => membership.with_label(label),
            _ => membership,
        };

        let record = match raw.into_record(Origin::Database(category)) {
            Ok(record) => record,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };
        let entry = DatabaseEntry { record, membership };

        if let Err(rejected) = database.insert(entry) {
            errors.push(EntryError::DuplicateKey {
                source_name: source_name.to_string(),
                key: rejected.record.key().to_string(),
            });
        }
    }

    debug!(
        %category,
        source = source_name,
        entries = database.len(),
        rejected = errors.len(),
        "Parsed classification database"
    );

    Ok((database, errors))
}

/// Parses the general ingredient catalog from JSON text.
pub fn parse_catalog(
    source_name: &str,
    json: &str,
) -> ReferenceResult<(Vec<IngredientRecord>, Vec<EntryError>)> {
    let (entries, mut errors) = parse_entries(source_name, json)?;
    let mut records: Vec<IngredientRecord> = Vec::with_capacity(entries.len());

    for raw in entries {
        let record = match raw.into_record(Origin::Catalog) {
            Ok(record) => record,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };
        if records.iter().any(|r| r.key() == record.key()) {
            errors.push(EntryError::DuplicateKey {
                source_name: source_name.to_string(),
                key: record.key().to_string(),
            });
            continue;
        }
        records.push(record);
    }

    Ok((records, errors))
}

pub(crate) fn read_file(path: &Path) -> ReferenceResult<String> {
    fs::read_to_string(path).map_err(|source| ReferenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn log_entry_errors(errors: &[EntryError]) {
    for error in errors {
        warn!(%error, "Skipping reference entry");
    }
}
