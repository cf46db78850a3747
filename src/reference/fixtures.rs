//! In-memory reference data for tests, demos and benchmarks.

use std::fs;
use std::io;
use std::path::Path;

use super::data::{ReferenceData, ReferenceDataBuilder};
use super::loader::{parse_catalog, parse_database};
use super::types::Category;
use crate::constants::CATALOG_FILENAME;
use crate::index::IndexOptions;

pub const CATALOG_JSON: &str = r#"{
  "ingredients": [
    {
      "id": "dha",
      "standard_name": "DHA",
      "forms": [
        {
          "id": "docosahexaenoic_acid",
          "aliases": ["DHA", "docosahexaenoic acid"],
          "context_include": ["fish", "oil", "epa", "omega", "omega-3", "algal", "krill"],
          "context_exclude": ["ascorbic", "vitamin c", "dhea", "hormone"]
        },
        {
          "id": "dehydroascorbic_acid",
          "aliases": ["DHA", "dehydroascorbic acid"],
          "context_include": ["vitamin c", "ascorbic", "ascorbate", "dehydroascorbic"],
          "context_exclude": ["fish", "omega", "omega-3", "epa", "hormone"]
        }
      ]
    },
    {
      "id": "dhea",
      "standard_name": "DHEA",
      "forms": [
        {
          "id": "dehydroepiandrosterone",
          "aliases": ["DHEA", "DHA", "dehydroepiandrosterone"],
          "context_include": ["hormone", "dhea", "androgen", "prasterone"],
          "context_exclude": ["fish", "oil", "omega", "epa", "ascorbic"]
        }
      ]
    },
    {
      "id": "ala",
      "standard_name": "ALA",
      "forms": [
        {
          "id": "alpha_lipoic_acid",
          "aliases": ["ALA", "alpha lipoic acid", "alpha-lipoic acid", "thioctic acid"],
          "context_include": ["lipoic", "antioxidant", "thioctic"],
          "context_exclude": ["flax", "flaxseed", "linolenic", "omega-3", "chia"]
        },
        {
          "id": "alpha_linolenic_acid",
          "aliases": ["ALA", "alpha linolenic acid", "alpha-linolenic acid"],
          "context_include": ["flax", "flaxseed", "linolenic", "omega-3", "chia"],
          "context_exclude": ["lipoic", "thioctic", "antioxidant"]
        }
      ]
    },
    { "id": "fish_oil", "standard_name": "Fish Oil", "aliases": ["fish oil", "fish body oil"] },
    { "id": "eicosapentaenoic_acid", "standard_name": "EPA", "aliases": ["EPA", "eicosapentaenoic acid"] },
    { "id": "vitamin_c", "standard_name": "Vitamin C", "aliases": ["vitamin c", "ascorbic acid"] },
    { "id": "magnesium", "standard_name": "Magnesium", "aliases": ["magnesium"] }
  ]
}"#;

pub const BANNED_JSON: &str = r#"{
  "ingredients": [
    { "id": "ephedra", "standard_name": "Ephedra", "aliases": ["ephedra", "ma huang", "ephedra sinica"], "category": "stimulant" },
    { "id": "dmaa", "standard_name": "DMAA", "aliases": ["DMAA", "1,3-dimethylamylamine", "methylhexanamine"], "severity": "critical", "category": "stimulant" },
    { "id": "titanium_dioxide", "standard_name": "Titanium Dioxide", "aliases": ["titanium dioxide", "E171"], "severity": "high", "category": "eu_banned_colorant" }
  ]
}"#;

pub const HARMFUL_JSON: &str = r#"{
  "harmful_additives": [
    { "id": "maltodextrin", "standard_name": "Maltodextrin", "aliases": ["maltodextrin", "malto dextrin"], "risk_level": "moderate", "category": "sweetener", "scoring_priority": 2 },
    { "id": "honey", "standard_name": "Honey", "aliases": ["honey", "raw honey"], "risk_level": "low", "category": "sugar", "context_dependent": true },
    { "id": "titanium_dioxide", "standard_name": "Titanium Dioxide", "aliases": ["titanium dioxide", "E171", "TiO2"], "risk_level": "high", "category": "colorant" },
    { "id": "sucralose", "standard_name": "Sucralose", "aliases": ["sucralose", "E955"], "risk_level": "medium", "category": "artificial_sweetener" }
  ]
}"#;

pub const ALLERGEN_JSON: &str = r#"{
  "common_allergens": [
    { "id": "soy", "standard_name": "Soy", "aliases": ["soy", "soybean", "soya"], "severity_level": "high", "category": "major_allergen" },
    { "id": "lactose", "standard_name": "Lactose", "aliases": ["lactose", "milk sugar"], "severity_level": "moderate", "category": "dairy" },
    { "id": "fish", "standard_name": "Fish", "aliases": ["fish"], "severity_level": "high", "category": "major_allergen" }
  ]
}"#;

pub const PASSIVE_JSON: &str = r#"{
  "passive_inactive_ingredients": [
    { "id": "maltodextrin", "standard_name": "Maltodextrin", "aliases": ["maltodextrin"], "category": "filler" },
    { "id": "honey", "standard_name": "Honey", "aliases": ["honey"], "category": "excipient", "context_dependent": true },
    { "id": "magnesium_stearate", "standard_name": "Magnesium Stearate", "aliases": ["magnesium stearate", "vegetable magnesium stearate"], "category": "flow_agent" },
    { "id": "soy_lecithin", "standard_name": "Soy Lecithin", "aliases": ["soy lecithin", "soya lecithin"], "category": "emulsifier" },
    { "id": "rice_flour", "standard_name": "Rice Flour", "aliases": ["rice flour"], "category": "filler" },
    { "id": "lactose", "aliases": ["lactose"], "category": "filler" }
  ]
}"#;

/// JSON text of a category's fixture database.
pub fn database_json(category: Category) -> &'static str {
    match category {
        Category::Banned => BANNED_JSON,
        Category::Harmful => HARMFUL_JSON,
        Category::Allergen => ALLERGEN_JSON,
        Category::Passive => PASSIVE_JSON,
    }
}

/// Builder pre-loaded with the fixture catalog and databases.
pub fn sample_builder(options: IndexOptions) -> ReferenceDataBuilder {
    let (records, errors) =
        parse_catalog(CATALOG_FILENAME, CATALOG_JSON).expect("fixture catalog parses");
    let mut builder = ReferenceData::builder(options)
        .catalog(records)
        .entry_errors(errors);

    for category in Category::ALL {
        let (database, errors) =
            parse_database(category, category.filename(), database_json(category))
                .expect("fixture database parses");
        builder = builder.database(database).entry_errors(errors);
    }
    builder
}

pub fn sample_reference_with(options: IndexOptions) -> ReferenceData {
    let (data, _report) = sample_builder(options)
        .build()
        .expect("fixture reference data is complete");
    data
}

/// Fixture reference data with default (case-insensitive) options.
pub fn sample_reference() -> ReferenceData {
    sample_reference_with(IndexOptions::default())
}

/// Writes the fixture files into `dir` in the on-disk layout.
pub fn write_reference_dir(dir: &Path) -> io::Result<()> {
    fs::write(dir.join(CATALOG_FILENAME), CATALOG_JSON)?;
    for category in Category::ALL {
        fs::write(dir.join(category.filename()), database_json(category))?;
    }
    Ok(())
}
