//! Reference data error types.
//!
//! [`ReferenceError`] is fatal: the classifier must not run against a partial dictionary.
//! [`EntryError`] describes one rejected entry; loading continues without it.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use super::types::{Category, Origin};

/// Fatal reference-data failures.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// A reference file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A reference file is not valid JSON or lacks the `ingredients` array.
    #[error("failed to parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A category has no database.
    #[error("missing {category} database")]
    MissingDatabase { category: Category },

    /// A category was supplied twice.
    #[error("duplicate {category} database")]
    DuplicateDatabase { category: Category },

    /// [`install`](super::install) was called more than once.
    #[error("reference data already installed")]
    AlreadyInstalled,
}

/// A single rejected reference entry (skip-and-report).
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryError {
    /// The entry does not have the expected structure.
    #[error("{source_name}[{index}]: malformed entry: {reason}")]
    Malformed {
        source_name: String,
        index: usize,
        reason: String,
    },

    /// The key already appeared earlier in the same file.
    #[error("{source_name}: duplicate ingredient key '{key}'")]
    DuplicateKey { source_name: String, key: String },

    /// The form has no alias left after normalization.
    #[error("form '{key}' ({origin}) declares no usable aliases")]
    EmptyAliases { key: String, origin: String },

    /// An alias could not be turned into a search pattern.
    #[error("alias '{alias}' of form '{key}' rejected: {reason}")]
    InvalidAlias {
        key: String,
        alias: String,
        reason: String,
    },
}

impl EntryError {
    pub(crate) fn empty_aliases(key: &str, origin: Origin) -> Self {
        EntryError::EmptyAliases {
            key: key.to_string(),
            origin: origin.to_string(),
        }
    }
}

/// Invalid category priority configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriorityOrderError {
    #[error("unknown category '{value}'")]
    UnknownCategory { value: String },

    #[error("expected 4 categories, got {count}")]
    WrongLength { count: usize },

    #[error("category {category} appears {count} times")]
    NotAPermutation { category: Category, count: usize },
}

pub type ReferenceResult<T> = Result<T, ReferenceError>;
