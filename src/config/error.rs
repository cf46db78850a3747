//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::reference::PriorityOrderError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Context radius is not a non-negative integer.
    #[error("invalid context radius '{value}': {source}")]
    InvalidRadius {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A boolean variable holds something other than true/false.
    #[error("invalid boolean for {name}: '{value}'")]
    InvalidBool { name: &'static str, value: String },

    /// The category priority list is not a permutation of the four categories.
    #[error("invalid category priority '{value}': {source}")]
    InvalidPriorityOrder {
        value: String,
        #[source]
        source: PriorityOrderError,
    },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
