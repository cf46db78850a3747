//! Alias index: normalized alias text → candidate ingredient forms.
//!
//! Built once from every form in the catalog and the classification databases, then shared
//! read-only. Aliases are kept longest first so the matcher can prefer specific multi-word
//! aliases over shorter ones they contain.

pub mod alias;


pub use alias::{
    AliasIndex, Candidate, IndexBuilder, IndexOptions, IndexedAlias, group_by_ingredient,
};
