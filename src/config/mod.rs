//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `TINCTURE_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_CONTEXT_RADIUS, DEFAULT_DATA_DIR};
use crate::index::IndexOptions;
use crate::reference::PriorityOrder;

/// Classifier configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `TINCTURE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the reference JSON files. Default: `./data`.
    pub data_dir: PathBuf,

    /// Context window radius in characters on each side of a match. Default: `20`.
    pub context_radius: usize,

    /// Match aliases with their declared case. Default: `false`.
    pub case_sensitive: bool,

    /// Category priority, highest first. Default: `banned,harmful,allergen,passive`.
    pub priority: PriorityOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            context_radius: DEFAULT_CONTEXT_RADIUS,
            case_sensitive: false,
            priority: PriorityOrder::default(),
        }
    }
}

impl Config {
    const ENV_DATA_DIR: &'static str = "TINCTURE_DATA_DIR";
    const ENV_CONTEXT_RADIUS: &'static str = "TINCTURE_CONTEXT_RADIUS";
    const ENV_CASE_SENSITIVE: &'static str = "TINCTURE_CASE_SENSITIVE";
    const ENV_CATEGORY_PRIORITY: &'static str = "TINCTURE_CATEGORY_PRIORITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = Self::parse_path_from_env(Self::ENV_DATA_DIR, defaults.data_dir);
        let context_radius = Self::parse_radius_from_env(defaults.context_radius)?;
        let case_sensitive =
            Self::parse_bool_from_env(Self::ENV_CASE_SENSITIVE, defaults.case_sensitive)?;
        let priority = Self::parse_priority_from_env(defaults.priority)?;

        Ok(Self {
            data_dir,
            context_radius,
            case_sensitive,
            priority,
        })
    }

    /// Validates the data directory (does not create it).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.data_dir.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.data_dir.clone(),
            });
        }
        if !self.data_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.data_dir.clone(),
            });
        }
        Ok(())
    }

    /// Alias index options derived from this configuration.
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            case_sensitive: self.case_sensitive,
        }
    }

    fn parse_radius_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_CONTEXT_RADIUS) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidRadius { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_priority_from_env(default: PriorityOrder) -> Result<PriorityOrder, ConfigError> {
        match env::var(Self::ENV_CATEGORY_PRIORITY) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidPriorityOrder { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }
}
