//! Cross-cutting, shared constants.
//!
//! File names here are the contract with whoever authors the reference data; keep them in sync
//! with the data directory layout documented on [`crate::reference::ReferenceData::load_dir`].

/// Characters of context kept on each side of a match for disambiguation.
pub const DEFAULT_CONTEXT_RADIUS: usize = 20;

/// Default reference data directory.
pub const DEFAULT_DATA_DIR: &str = "./data";

pub const BANNED_FILENAME: &str = "banned_recalled.json";
pub const HARMFUL_FILENAME: &str = "harmful_additives.json";
pub const ALLERGEN_FILENAME: &str = "allergens.json";
pub const PASSIVE_FILENAME: &str = "passive_inactive_ingredients.json";

/// Optional catalog of ingredient forms that belong to no classification database.
pub const CATALOG_FILENAME: &str = "ingredient_catalog.json";

/// Upper bound on distinct entries retained by a [`crate::curation::CurationQueue`].
pub const DEFAULT_CURATION_CAPACITY: usize = 50_000;
