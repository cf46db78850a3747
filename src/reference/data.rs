use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tracing::{info, warn};

use super::audit::audit;
use super::error::{EntryError, ReferenceError, ReferenceResult};
use super::loader::{log_entry_errors, parse_catalog, parse_database, read_file};
use super::types::{Category, ClassificationDatabase, IngredientRecord, Membership, Origin};
use crate::constants::CATALOG_FILENAME;
use crate::index::{AliasIndex, IndexOptions};

/// Immutable reference bundle: the four classification databases, the general catalog and the
/// alias index built over all of them.
#[derive(Debug)]
pub struct ReferenceData {
    databases: Vec<ClassificationDatabase>,
    catalog: Vec<IngredientRecord>,
    /// Record and form keys → catalog position.
    catalog_by_key: HashMap<String, usize>,
    index: AliasIndex,
}

/// Summary of a successful load, including entries that were skipped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub entry_errors: Vec<EntryError>,
    pub catalog_records: usize,
    pub database_entries: HashMap<Category, usize>,
    pub aliases: usize,
}

impl LoadReport {
    /// Returns `true` if any entry was rejected.
    pub fn has_rejections(&self) -> bool {
        !self.entry_errors.is_empty()
    }
}

/// Assembles [`ReferenceData`]; every category must be supplied exactly once.
#[derive(Debug, Default)]
pub struct ReferenceDataBuilder {
    options: IndexOptions,
    catalog: Vec<IngredientRecord>,
    databases: Vec<ClassificationDatabase>,
    entry_errors: Vec<EntryError>,
}

impl ReferenceDataBuilder {
    pub fn new(options: IndexOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn catalog(mut self, records: Vec<IngredientRecord>) -> Self {
        self.catalog.extend(records);
        self
    }

    pub fn database(mut self, database: ClassificationDatabase) -> Self {
        self.databases.push(database);
        self
    }

    /// Carries parse-time rejections into the final [`LoadReport`].
    pub fn entry_errors(mut self, errors: Vec<EntryError>) -> Self {
        self.entry_errors.extend(errors);
        self
    }

    /// Validates the database set and builds the alias index.
    ///
    /// Forms are indexed catalog first, then databases in default priority order, so candidate
    /// lists are deterministic.
    pub fn build(self) -> ReferenceResult<(ReferenceData, LoadReport)> {
        let mut databases = Vec::with_capacity(Category::ALL.len());
        let mut supplied = self.databases;

        for category in Category::ALL {
            let count = supplied.iter().filter(|d| d.category() == category).count();
            if count > 1 {
                return Err(ReferenceError::DuplicateDatabase { category });
            }
            let position = supplied
                .iter()
                .position(|d| d.category() == category)
                .ok_or(ReferenceError::MissingDatabase { category })?;
            databases.push(supplied.swap_remove(position));
        }

        let mut errors = self.entry_errors;
        let mut builder = AliasIndex::builder(self.options);

        for record in &self.catalog {
            for form in record.forms() {
                if let Err(e) = builder.add_form(form, Origin::Catalog) {
                    errors.push(e);
                }
            }
        }

        for database in &databases {
            let origin = Origin::Database(database.category());
            for entry in database.entries() {
                for form in entry.record.forms() {
                    if let Err(e) = builder.add_form(form, origin) {
                        errors.push(e);
                    }
                }
            }
        }

        let (index, index_errors) = builder.build();
        errors.extend(index_errors);

        let mut catalog = Vec::with_capacity(self.catalog.len());
        let mut catalog_by_key = HashMap::new();
        for record in self.catalog {
            if catalog_by_key.contains_key(record.key()) {
                continue;
            }
            let position = catalog.len();
            catalog_by_key.insert(record.key().to_string(), position);
            for form in record.forms() {
                catalog_by_key
                    .entry(form.key().to_string())
                    .or_insert(position);
            }
            catalog.push(record);
        }

        let report = LoadReport {
            catalog_records: catalog.len(),
            database_entries: databases.iter().map(|d| (d.category(), d.len())).collect(),
            aliases: index.len(),
            entry_errors: errors,
        };

        Ok((
            ReferenceData {
                databases,
                catalog,
                catalog_by_key,
                index,
            },
            report,
        ))
    }
}

impl ReferenceData {
    pub fn builder(options: IndexOptions) -> ReferenceDataBuilder {
        ReferenceDataBuilder::new(options)
    }

    /// Loads every reference file from `dir`.
    ///
    /// The four database files are required; `ingredient_catalog.json` is optional. Any file
    /// that cannot be read or parsed aborts the load. Rejected entries are logged and listed in
    /// the returned [`LoadReport`].
    pub fn load_dir(dir: &Path, options: IndexOptions) -> ReferenceResult<(Self, LoadReport)> {
        let mut builder = Self::builder(options);

        let catalog_path = dir.join(CATALOG_FILENAME);
        if catalog_path.is_file() {
            let json = read_file(&catalog_path)?;
            let (records, errors) = parse_catalog(CATALOG_FILENAME, &json)?;
            builder = builder.catalog(records).entry_errors(errors);
        }

        for category in Category::ALL {
            let name = category.filename();
            let json = read_file(&dir.join(name))?;
            let (database, errors) = parse_database(category, name, &json)?;
            builder = builder.database(database).entry_errors(errors);
        }

        let (data, report) = builder.build()?;
        log_entry_errors(&report.entry_errors);

        info!(
            dir = %dir.display(),
            catalog = report.catalog_records,
            aliases = report.aliases,
            rejected = report.entry_errors.len(),
            "Loaded reference data"
        );

        let findings = audit(&data);
        if !findings.category_overlaps.is_empty() || !findings.ambiguous_aliases.is_empty() {
            warn!(
                overlaps = findings.category_overlaps.len(),
                unflagged_overlaps = findings.unflagged_overlaps().count(),
                ambiguous_aliases = findings.ambiguous_aliases.len(),
                risk_warnings = findings.risk_warnings.len(),
                "Reference audit findings"
            );
        }

        Ok((data, report))
    }

    pub fn index(&self) -> &AliasIndex {
        &self.index
    }

    pub fn database(&self, category: Category) -> &ClassificationDatabase {
        // `build` guarantees one database per category, stored in `Category::ALL` order.
        let position = Category::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or_default();
        &self.databases[position]
    }

    pub fn databases(&self) -> &[ClassificationDatabase] {
        &self.databases
    }

    pub fn catalog(&self) -> &[IngredientRecord] {
        &self.catalog
    }

    /// Every membership of `key` across the databases, in default priority order.
    ///
    /// A database without `key` contributes the entry sharing the ingredient's identity, so the
    /// same ingredient filed under different ids in different files is classified as one.
    pub fn memberships(&self, key: &str) -> Vec<&Membership> {
        let identity = self.identity(key);
        self.databases
            .iter()
            .filter_map(|d| {
                d.get(key)
                    .or_else(|| identity.and_then(|i| d.get_by_identity(i)))
            })
            .map(|entry| &entry.membership)
            .collect()
    }

    /// Identity of the form with `key`, looked up in the databases first, then the catalog.
    pub fn identity(&self, key: &str) -> Option<&str> {
        self.databases
            .iter()
            .filter_map(|d| d.get(key))
            .find_map(|entry| form_identity(&entry.record, key))
            .or_else(|| {
                self.catalog_by_key
                    .get(key)
                    .and_then(|&i| form_identity(&self.catalog[i], key))
            })
    }

    /// Display name for an ingredient or form key, preferring database entries over the catalog.
    pub fn standard_name(&self, key: &str) -> Option<&str> {
        self.databases
            .iter()
            .find_map(|d| d.get(key))
            .map(|entry| entry.record.standard_name())
            .or_else(|| {
                self.catalog_by_key
                    .get(key)
                    .map(|&i| self.catalog[i].standard_name())
            })
    }
}

fn form_identity<'r>(record: &'r IngredientRecord, key: &str) -> Option<&'r str> {
    record
        .forms()
        .iter()
        .find(|form| form.key() == key)
        .map(|form| form.identity())
}

static SHARED: OnceLock<Arc<ReferenceData>> = OnceLock::new();

/// Installs the process-wide reference data. Succeeds once; later calls fail.
pub fn install(data: ReferenceData) -> ReferenceResult<Arc<ReferenceData>> {
    let data = Arc::new(data);
    SHARED
        .set(Arc::clone(&data))
        .map_err(|_| ReferenceError::AlreadyInstalled)?;
    Ok(data)
}

/// The process-wide reference data, if installed.
pub fn shared() -> Option<Arc<ReferenceData>> {
    SHARED.get().cloned()
}
