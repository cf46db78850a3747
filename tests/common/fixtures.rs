//! Shared builders for integration tests.

use std::sync::Arc;

use tempfile::TempDir;
use tincture::index::IndexOptions;
use tincture::pipeline::{Classifier, ClassifierOptions, TextClassification};
use tincture::reference::fixtures::{sample_reference, write_reference_dir};
use tincture::reference::{Category, ClassificationDatabase, ReferenceData, parse_database};
use tincture::scoring::ClassificationResult;

pub const OMEGA3_LABEL: &str = "Fish oil containing 300mg EPA and 200mg DHA for heart health";
pub const DHEA_LABEL: &str = "DHEA supplement for hormone support and energy";
pub const ALA_LABEL: &str = "ALA 100 mg per serving";

/// Harmful and passive files that give the same ingredient file-specific ids.
pub const SPLIT_ID_HARMFUL: &str = r#"{
  "harmful_additives": [
    { "id": "ADD_MALTODEXTRIN", "aliases": ["maltodextrin"], "risk_level": "moderate", "category": "sweetener" },
    { "id": "ADD_RED_40", "standard_name": "Red 40", "risk_level": "high", "category": "colorant" }
  ]
}"#;

pub const SPLIT_ID_PASSIVE: &str = r#"{
  "passive_inactive_ingredients": [
    { "id": "PII_MALTODEXTRIN", "aliases": ["maltodextrin"], "category": "filler" }
  ]
}"#;

pub fn classifier() -> Classifier {
    classifier_with(ClassifierOptions::default())
}

pub fn classifier_with(options: ClassifierOptions) -> Classifier {
    Classifier::new(Arc::new(sample_reference()), options)
}

pub fn split_id_classifier() -> Classifier {
    let (harmful, _) = parse_database(Category::Harmful, "harmful_additives.json", SPLIT_ID_HARMFUL)
        .expect("should parse harmful");
    let (passive, _) = parse_database(
        Category::Passive,
        "passive_inactive_ingredients.json",
        SPLIT_ID_PASSIVE,
    )
    .expect("should parse passive");

    let (reference, report) = ReferenceData::builder(IndexOptions::default())
        .database(ClassificationDatabase::new(Category::Banned))
        .database(harmful)
        .database(ClassificationDatabase::new(Category::Allergen))
        .database(passive)
        .build()
        .expect("should build");
    assert!(!report.has_rejections());

    Classifier::new(Arc::new(reference), ClassifierOptions::default())
}

/// A temp directory holding the fixture reference files.
pub fn reference_dir() -> TempDir {
    let dir = TempDir::new().expect("should create temp dir");
    write_reference_dir(dir.path()).expect("should write fixture files");
    dir
}

/// The single result whose normalized alias is `alias`.
pub fn result_for<'a>(
    classification: &'a TextClassification,
    alias: &str,
) -> &'a ClassificationResult {
    let mut found = classification
        .results
        .iter()
        .filter(|r| r.matched_alias == alias);
    let first = found
        .next()
        .unwrap_or_else(|| panic!("no result for alias {:?}", alias));
    assert!(found.next().is_none(), "alias {:?} matched twice", alias);
    first
}
