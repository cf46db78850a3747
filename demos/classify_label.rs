//! Classifying a few supplement labels against the in-memory fixtures.

use anyhow::Result;

#[cfg(feature = "mock")]
fn main() -> Result<()> {
    use std::sync::Arc;

    use tincture::reference::fixtures::sample_reference;
    use tincture::{Classifier, ClassifierOptions, CurationQueue};

    let classifier = Classifier::new(Arc::new(sample_reference()), ClassifierOptions::default());
    let queue = CurationQueue::default();

    let labels = [
        "Fish oil containing 300mg EPA and 200mg DHA for heart health",
        "DHEA supplement for hormone support and energy",
        "Maltodextrin, raw honey, magnesium stearate",
        "ALA 100 mg per serving",
    ];

    for label in labels {
        let classification = classifier.classify(label);
        println!("{}", label);
        for result in &classification.results {
            match (&result.ingredient_key, result.scored_category) {
                (Some(key), Some(category)) => println!(
                    "  {:<20} -> {} ({})",
                    result.matched_text,
                    category,
                    key
                ),
                (Some(key), None) => println!("  {:<20} -> unclassified ({})", result.matched_text, key),
                (None, _) => println!("  {:<20} -> unresolved", result.matched_text),
            }
        }
        queue.extend(classification.unresolved);
    }

    println!("{}", serde_json::to_string_pretty(&queue.drain_sorted())?);
    println!("{:?}", classifier.stats());

    Ok(())
}

#[cfg(not(feature = "mock"))]
fn main() {
    eprintln!("Run with: cargo run --example classify_label --features mock");
}
