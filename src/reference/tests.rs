use std::str::FromStr;

use super::audit::audit;
use super::data::{ReferenceData, install, shared};
use super::error::{EntryError, PriorityOrderError, ReferenceError};
use super::fixtures::{HARMFUL_JSON, sample_builder, sample_reference};
use super::loader::{parse_catalog, parse_database};
use super::types::{
    Category, ClassificationDatabase, DatabaseEntry, IngredientForm, IngredientRecord, Membership,
    PriorityOrder, Severity,
};
use crate::index::IndexOptions;

const SPLIT_ID_HARMFUL: &str = r#"{
  "harmful_additives": [
    { "id": "ADD_MALTODEXTRIN", "aliases": ["maltodextrin"], "risk_level": "moderate" },
    { "id": "ADD_RED_40", "standard_name": "Red 40", "risk_level": "high" }
  ]
}"#;

const SPLIT_ID_PASSIVE: &str = r#"{
  "passive_inactive_ingredients": [
    { "id": "PII_MALTODEXTRIN", "aliases": ["maltodextrin"], "category": "filler" }
  ]
}"#;

/// Reference data whose harmful and passive files use their own id prefixes.
fn split_id_reference() -> ReferenceData {
    let (harmful, _) = parse_database(Category::Harmful, "harmful_additives.json", SPLIT_ID_HARMFUL)
        .expect("should parse");
    let (passive, _) =
        parse_database(Category::Passive, "passive_inactive_ingredients.json", SPLIT_ID_PASSIVE)
            .expect("should parse");

    let (data, _) = ReferenceData::builder(IndexOptions::default())
        .database(ClassificationDatabase::new(Category::Banned))
        .database(harmful)
        .database(ClassificationDatabase::new(Category::Allergen))
        .database(passive)
        .build()
        .expect("should build");
    data
}

fn entry(key: &str, forms: Vec<IngredientForm>) -> DatabaseEntry {
    DatabaseEntry {
        record: IngredientRecord::new(key, key, forms),
        membership: Membership::new(Category::Harmful),
    }
}

#[test]
fn test_category_total_order() {
    assert!(Category::Banned > Category::Harmful);
    assert!(Category::Harmful > Category::Allergen);
    assert!(Category::Allergen > Category::Passive);

    let mut shuffled = vec![
        Category::Passive,
        Category::Banned,
        Category::Allergen,
        Category::Harmful,
    ];
    shuffled.sort_by(|a, b| b.cmp(a));
    assert_eq!(shuffled, Category::ALL.to_vec());
}

#[test]
fn test_category_from_str_accepts_file_names() {
    assert_eq!(Category::from_str("Banned_Recalled"), Ok(Category::Banned));
    assert_eq!(Category::from_str(" allergens "), Ok(Category::Allergen));
    assert!(matches!(
        Category::from_str("toxic"),
        Err(PriorityOrderError::UnknownCategory { .. })
    ));
}

#[test]
fn test_priority_order_default_and_display() {
    let order = PriorityOrder::default();
    assert_eq!(order.to_string(), "banned,harmful,allergen,passive");
    assert_eq!(order.rank(Category::Banned), 0);
    assert_eq!(order.rank(Category::Passive), 3);
    assert!(order.rank(Category::Harmful) < order.rank(Category::Allergen));
}

#[test]
fn test_priority_order_round_trips_through_display() {
    let order: PriorityOrder = "passive,allergen,harmful,banned".parse().expect("valid");
    assert_eq!(order.to_string().parse::<PriorityOrder>(), Ok(order));
    assert_eq!(order.rank(Category::Passive), 0);
    assert_eq!(order.rank(Category::Banned), 3);
}

#[test]
fn test_priority_order_new_rejects_repeats() {
    let result = PriorityOrder::new([
        Category::Banned,
        Category::Banned,
        Category::Allergen,
        Category::Passive,
    ]);
    assert_eq!(
        result,
        Err(PriorityOrderError::NotAPermutation {
            category: Category::Banned,
            count: 2
        })
    );
}

#[test]
fn test_parse_database_reads_membership_fields() {
    let (database, errors) =
        parse_database(Category::Harmful, "harmful_additives.json", HARMFUL_JSON)
            .expect("should parse");

    assert!(errors.is_empty());
    assert_eq!(database.len(), 4);

    let maltodextrin = database.get("maltodextrin").expect("entry exists");
    assert_eq!(maltodextrin.membership.severity, Severity::Moderate);
    assert_eq!(
        maltodextrin.membership.category_label.as_deref(),
        Some("sweetener")
    );
    assert_eq!(maltodextrin.membership.scoring_priority, Some(2));

    let sucralose = database.get("sucralose").expect("entry exists");
    assert_eq!(sucralose.membership.severity, Severity::Moderate);

    let honey = database.get("honey").expect("entry exists");
    assert!(honey.membership.context_dependent);
}

#[test]
fn test_default_severity_per_category() {
    let json = r#"{ "ingredients": [ { "id": "x", "aliases": ["x"] } ] }"#;

    let expected = [
        (Category::Banned, Severity::Critical),
        (Category::Harmful, Severity::Low),
        (Category::Allergen, Severity::Low),
        (Category::Passive, Severity::None),
    ];
    for (category, severity) in expected {
        let (database, _) = parse_database(category, "test.json", json).expect("should parse");
        assert_eq!(
            database.get("x").expect("entry exists").membership.severity,
            severity
        );
    }
}

#[test]
fn test_standard_name_defaults_to_id_and_joins_aliases() {
    let json = r#"{ "ingredients": [ { "id": "Sodium_Benzoate", "aliases": ["E211"] } ] }"#;
    let (database, _) =
        parse_database(Category::Harmful, "test.json", json).expect("should parse");

    let entry = database.get("sodium_benzoate").expect("key is lowercased");
    assert_eq!(entry.record.standard_name(), "Sodium_Benzoate");
    assert_eq!(
        entry.record.forms()[0].aliases(),
        &["Sodium_Benzoate".to_string(), "E211".to_string()]
    );
}

#[test]
fn test_extra_forms_default_to_record_key() {
    let json = r#"{
      "ingredients": [
        {
          "id": "tocopherol",
          "aliases": ["vitamin e"],
          "forms": [
            { "aliases": ["tocopherol"], "context_include": ["  Natural  Source "] },
            { "id": "tocopheryl_acetate", "aliases": ["tocopheryl acetate"], "weight": 0.5 }
          ]
        }
      ]
    }"#;
    let (records, errors) = parse_catalog("catalog.json", json).expect("should parse");

    assert!(errors.is_empty());
    let forms = records[0].forms();
    assert_eq!(forms.len(), 3);
    assert_eq!(forms[1].key(), "tocopherol");
    assert_eq!(forms[1].context_include(), &["natural source".to_string()]);
    assert_eq!(forms[2].key(), "tocopheryl_acetate");
    assert_eq!(forms[2].weight(), Some(0.5));
}

#[test]
fn test_malformed_entries_are_skipped_and_reported() {
    let json = r#"{
      "ingredients": [
        { "id": "ok", "aliases": ["ok"] },
        { "aliases": ["no id"] },
        { "id": "   " },
        42,
        { "id": "OK", "aliases": ["dup"] }
      ]
    }"#;
    let (database, errors) =
        parse_database(Category::Passive, "passive.json", json).expect("file is valid");

    assert_eq!(database.len(), 1);
    assert_eq!(errors.len(), 4);
    assert!(matches!(errors[0], EntryError::Malformed { index: 1, .. }));
    assert!(matches!(errors[1], EntryError::Malformed { index: 2, .. }));
    assert!(matches!(errors[2], EntryError::Malformed { index: 3, .. }));
    assert_eq!(
        errors[3],
        EntryError::DuplicateKey {
            source_name: "passive.json".to_string(),
            key: "ok".to_string()
        }
    );
}

#[test]
fn test_entry_with_only_standard_name_matches_on_it() {
    let (database, errors) =
        parse_database(Category::Harmful, "harmful_additives.json", SPLIT_ID_HARMFUL)
            .expect("should parse");

    assert!(errors.is_empty());
    let red_40 = database.get("add_red_40").expect("entry exists");
    assert_eq!(red_40.record.forms().len(), 1);
    assert_eq!(red_40.record.forms()[0].aliases(), &["Red 40".to_string()]);
    assert_eq!(red_40.membership.severity, Severity::High);
}

#[test]
fn test_entry_without_any_name_is_reported() {
    let json = r#"{ "ingredients": [ { "id": "ADD_NAMELESS", "risk_level": "high" }, { "id": "ok", "aliases": ["ok"] } ] }"#;
    let (database, errors) =
        parse_database(Category::Harmful, "harmful_additives.json", json).expect("file is valid");

    assert_eq!(database.len(), 1);
    assert_eq!(
        errors,
        vec![EntryError::EmptyAliases {
            key: "add_nameless".to_string(),
            origin: "harmful".to_string()
        }]
    );
}

#[test]
fn test_identity_prefers_standard_name_then_primary_alias() {
    let (harmful, _) =
        parse_database(Category::Harmful, "harmful_additives.json", SPLIT_ID_HARMFUL)
            .expect("should parse");

    let maltodextrin = harmful.get("add_maltodextrin").expect("entry exists");
    assert_eq!(maltodextrin.record.identity(), "maltodextrin");
    assert_eq!(maltodextrin.record.forms()[0].identity(), "maltodextrin");
    assert_eq!(harmful.get("add_red_40").expect("entry exists").record.identity(), "red 40");
    assert!(harmful.get_by_identity("maltodextrin").is_some());
}

#[test]
fn test_form_key_does_not_block_later_entry_key() {
    let mut database = ClassificationDatabase::new(Category::Harmful);
    database
        .insert(entry(
            "carrageenan",
            vec![
                IngredientForm::new("carrageenan", ["carrageenan"]),
                IngredientForm::new("e407", ["E407"]),
            ],
        ))
        .expect("first entry inserts");
    database
        .insert(entry("e407", vec![IngredientForm::new("e407", ["E407"])]))
        .expect("a form key is not an entry key");

    assert_eq!(database.len(), 2);
    assert_eq!(database.get("e407").expect("entry exists").record.key(), "e407");
    assert!(
        database
            .insert(entry("carrageenan", vec![IngredientForm::new("carrageenan", ["x"])]))
            .is_err()
    );
}

#[test]
fn test_invalid_file_is_fatal() {
    let result = parse_database(Category::Banned, "banned.json", "{ not json");
    assert!(matches!(result, Err(ReferenceError::Parse { ref name, .. }) if name == "banned.json"));

    let missing_array = parse_database(Category::Banned, "banned.json", r#"{ "items": [] }"#);
    assert!(matches!(missing_array, Err(ReferenceError::Parse { .. })));
}

#[test]
fn test_build_requires_every_database() {
    let (records, _) = parse_catalog("catalog.json", r#"{ "ingredients": [] }"#)
        .expect("empty catalog parses");
    let result = ReferenceData::builder(IndexOptions::default())
        .catalog(records)
        .database(super::types::ClassificationDatabase::new(Category::Banned))
        .build();

    assert!(matches!(
        result,
        Err(ReferenceError::MissingDatabase {
            category: Category::Harmful
        })
    ));
}

#[test]
fn test_build_rejects_duplicate_database() {
    let result = sample_builder(IndexOptions::default())
        .database(super::types::ClassificationDatabase::new(Category::Allergen))
        .build();

    assert!(matches!(
        result,
        Err(ReferenceError::DuplicateDatabase {
            category: Category::Allergen
        })
    ));
}

#[test]
fn test_form_without_aliases_is_reported_at_build() {
    let json = r#"{ "ingredients": [ { "id": "ghost", "forms": [ { "aliases": ["  "] } ] } ] }"#;
    let (records, errors) = parse_catalog("catalog.json", json).expect("should parse");
    assert!(errors.is_empty());

    let (data, report) = sample_builder(IndexOptions::default())
        .catalog(records)
        .build()
        .expect("should build");

    assert!(report.has_rejections());
    assert!(
        report
            .entry_errors
            .iter()
            .any(|e| matches!(e, EntryError::EmptyAliases { key, .. } if key == "ghost"))
    );
    assert!(data.index().lookup("ghost").is_empty());
}

#[test]
fn test_load_report_counts() {
    let (_, report) = sample_builder(IndexOptions::default())
        .build()
        .expect("should build");

    assert_eq!(report.catalog_records, 7);
    assert_eq!(report.database_entries[&Category::Banned], 3);
    assert_eq!(report.database_entries[&Category::Passive], 6);
    assert!(!report.has_rejections());
}

#[test]
fn test_memberships_in_priority_order() {
    let reference = sample_reference();
    let categories: Vec<Category> = reference
        .memberships("titanium_dioxide")
        .iter()
        .map(|m| m.category)
        .collect();

    assert_eq!(categories, vec![Category::Banned, Category::Harmful]);
    assert!(reference.memberships("vitamin_c").is_empty());
}

#[test]
fn test_memberships_join_same_ingredient_across_ids() {
    let reference = split_id_reference();

    let categories: Vec<Category> = reference
        .memberships("add_maltodextrin")
        .iter()
        .map(|m| m.category)
        .collect();
    assert_eq!(categories, vec![Category::Harmful, Category::Passive]);
    assert_eq!(reference.identity("pii_maltodextrin"), Some("maltodextrin"));
    assert_eq!(reference.memberships("add_red_40").len(), 1);
}

#[test]
fn test_standard_name_lookup() {
    let reference = sample_reference();

    assert_eq!(reference.standard_name("lactose"), Some("Lactose"));
    assert_eq!(reference.standard_name("docosahexaenoic_acid"), Some("DHA"));
    assert_eq!(reference.standard_name("vitamin_c"), Some("Vitamin C"));
    assert_eq!(reference.standard_name("unknown"), None);
}

#[test]
fn test_audit_reports_overlaps_and_ambiguity() {
    let report = audit(&sample_reference());

    let overlaps: Vec<&str> = report
        .category_overlaps
        .iter()
        .map(|o| o.key.as_str())
        .collect();
    assert_eq!(
        overlaps,
        vec!["honey", "lactose", "maltodextrin", "titanium_dioxide"]
    );

    let unflagged: Vec<&str> = report.unflagged_overlaps().map(|o| o.key.as_str()).collect();
    assert_eq!(unflagged, vec!["lactose", "maltodextrin", "titanium_dioxide"]);

    let lactose = &report.category_overlaps[1];
    assert_eq!(lactose.categories, vec![Category::Allergen, Category::Passive]);

    let aliases: Vec<&str> = report
        .ambiguous_aliases
        .iter()
        .map(|a| a.alias.as_str())
        .collect();
    assert_eq!(aliases, vec!["ala", "dha"]);
    assert_eq!(report.ambiguous_aliases[1].keys.len(), 3);
    assert!(report.ambiguous_aliases[1].unguarded_keys.is_empty());

    assert!(report.risk_warnings.is_empty());
    assert!(!report.is_clean());
}

#[test]
fn test_audit_joins_overlaps_by_identity() {
    let report = audit(&split_id_reference());

    assert_eq!(report.category_overlaps.len(), 1);
    let overlap = &report.category_overlaps[0];
    assert_eq!(overlap.key, "add_maltodextrin");
    assert_eq!(overlap.keys, vec!["add_maltodextrin", "pii_maltodextrin"]);
    assert_eq!(overlap.categories, vec![Category::Harmful, Category::Passive]);
    assert!(report.ambiguous_aliases.is_empty());
}

#[test]
fn test_audit_flags_harmless_harmful_entry() {
    let json = r#"{ "ingredients": [ { "id": "water", "aliases": ["water"], "risk_level": "none" } ] }"#;
    let (harmful, _) = parse_database(Category::Harmful, "harmful.json", json).expect("parses");

    let mut builder = ReferenceData::builder(IndexOptions::default()).database(harmful);
    for category in [Category::Banned, Category::Allergen, Category::Passive] {
        builder = builder.database(super::types::ClassificationDatabase::new(category));
    }
    let (data, _) = builder.build().expect("should build");

    let report = audit(&data);
    assert_eq!(report.risk_warnings.len(), 1);
    assert_eq!(report.risk_warnings[0].key, "water");
}

#[test]
fn test_install_succeeds_once() {
    let first = install(sample_reference()).expect("first install succeeds");
    let again = install(sample_reference());

    assert!(matches!(again, Err(ReferenceError::AlreadyInstalled)));
    let current = shared().expect("installed data is visible");
    assert!(std::sync::Arc::ptr_eq(&first, &current));
}
