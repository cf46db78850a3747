//! Reference dictionaries: ingredient forms, classification databases and their loading.
//!
//! Everything here is built once at startup and never mutated. A malformed file aborts the load
//! with a [`ReferenceError`]; a malformed entry is skipped and reported as an [`EntryError`].
//!
//! Hosts that want a single process-wide instance call [`install`] once and read it back with
//! [`shared`]; everything else passes an `Arc<ReferenceData>` around explicitly.

pub mod audit;
pub mod data;
pub mod error;
pub mod loader;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod fixtures;

#[cfg(test)]
mod tests;

pub use audit::{AmbiguousAlias, AuditReport, CategoryOverlap, RiskWarning, audit};
pub use data::{LoadReport, ReferenceData, ReferenceDataBuilder, install, shared};
pub use error::{EntryError, PriorityOrderError, ReferenceError, ReferenceResult};
pub use loader::{parse_catalog, parse_database};
pub use types::{
    Category, ClassificationDatabase, DatabaseEntry, IngredientForm, IngredientRecord, Membership,
    Origin, PriorityOrder, Severity, normalize_key, normalize_name,
};
