use super::*;
use crate::reference::{Category, PriorityOrderError};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_tincture_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("TINCTURE_DATA_DIR");
        env::remove_var("TINCTURE_CONTEXT_RADIUS");
        env::remove_var("TINCTURE_CASE_SENSITIVE");
        env::remove_var("TINCTURE_CATEGORY_PRIORITY");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.data_dir, PathBuf::from("./data"));
    assert_eq!(config.context_radius, 20);
    assert!(!config.case_sensitive);
    assert_eq!(config.priority.categories(), &Category::ALL);
}

#[test]
fn test_index_options_follow_case_sensitivity() {
    let config = Config {
        case_sensitive: true,
        ..Default::default()
    };
    assert!(config.index_options().case_sensitive);
    assert!(!Config::default().index_options().case_sensitive);
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_tincture_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.data_dir, PathBuf::from("./data"));
    assert_eq!(config.context_radius, 20);
    assert!(!config.case_sensitive);
}

#[test]
#[serial]
fn test_from_env_with_overrides() {
    clear_tincture_env();

    let config = with_env_vars(
        &[
            ("TINCTURE_DATA_DIR", "/srv/reference"),
            ("TINCTURE_CONTEXT_RADIUS", "35"),
            ("TINCTURE_CASE_SENSITIVE", "yes"),
            ("TINCTURE_CATEGORY_PRIORITY", "banned, allergen, harmful, passive"),
        ],
        Config::from_env,
    )
    .expect("should parse overrides");

    assert_eq!(config.data_dir, PathBuf::from("/srv/reference"));
    assert_eq!(config.context_radius, 35);
    assert!(config.case_sensitive);
    assert_eq!(
        config.priority.categories(),
        &[
            Category::Banned,
            Category::Allergen,
            Category::Harmful,
            Category::Passive
        ]
    );
}

#[test]
#[serial]
fn test_blank_data_dir_falls_back_to_default() {
    clear_tincture_env();

    let config = with_env_vars(&[("TINCTURE_DATA_DIR", "   ")], Config::from_env)
        .expect("should parse");

    assert_eq!(config.data_dir, PathBuf::from("./data"));
}

#[test]
#[serial]
fn test_invalid_radius() {
    clear_tincture_env();

    let result = with_env_vars(&[("TINCTURE_CONTEXT_RADIUS", "-3")], Config::from_env);

    assert!(matches!(
        result,
        Err(ConfigError::InvalidRadius { ref value, .. }) if value == "-3"
    ));
}

#[test]
#[serial]
fn test_invalid_bool() {
    clear_tincture_env();

    let result = with_env_vars(&[("TINCTURE_CASE_SENSITIVE", "maybe")], Config::from_env);

    assert!(matches!(
        result,
        Err(ConfigError::InvalidBool {
            name: "TINCTURE_CASE_SENSITIVE",
            ..
        })
    ));
}

#[test]
#[serial]
fn test_priority_must_name_each_category_once() {
    clear_tincture_env();

    let result = with_env_vars(
        &[("TINCTURE_CATEGORY_PRIORITY", "banned,banned,allergen,passive")],
        Config::from_env,
    );

    assert!(matches!(
        result,
        Err(ConfigError::InvalidPriorityOrder {
            source: PriorityOrderError::NotAPermutation { .. },
            ..
        })
    ));
}

#[test]
#[serial]
fn test_priority_rejects_unknown_and_short_lists() {
    clear_tincture_env();

    let unknown = with_env_vars(
        &[("TINCTURE_CATEGORY_PRIORITY", "banned,toxic,allergen,passive")],
        Config::from_env,
    );
    assert!(matches!(
        unknown,
        Err(ConfigError::InvalidPriorityOrder {
            source: PriorityOrderError::UnknownCategory { .. },
            ..
        })
    ));

    let short = with_env_vars(
        &[("TINCTURE_CATEGORY_PRIORITY", "banned,harmful")],
        Config::from_env,
    );
    assert!(matches!(
        short,
        Err(ConfigError::InvalidPriorityOrder {
            source: PriorityOrderError::WrongLength { count: 2 },
            ..
        })
    ));
}

#[test]
fn test_validate_missing_dir() {
    let config = Config {
        data_dir: PathBuf::from("/nonexistent/tincture/data"),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_file_instead_of_dir() {
    let temp = TempDir::new().expect("should create temp dir");
    let file = temp.path().join("banned_recalled.json");
    std::fs::write(&file, "{}").expect("should write file");

    let config = Config {
        data_dir: file,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_validate_existing_dir() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = Config {
        data_dir: temp.path().to_path_buf(),
        ..Default::default()
    };

    assert!(config.validate().is_ok());
}
