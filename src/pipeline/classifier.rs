use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::constants::DEFAULT_CONTEXT_RADIUS;
use crate::disambiguation::{Disambiguator, Resolution, UnresolvedMatch};
use crate::matching::{Matcher, context_window};
use crate::reference::{PriorityOrder, ReferenceData};
use crate::scoring::{ClassificationResult, PriorityResolver};
use crate::stats::{ClassifierStats, StatsSnapshot};

/// Per-classifier tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierOptions {
    /// Characters of context on each side of a match.
    pub context_radius: usize,
    pub priority: PriorityOrder,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            context_radius: DEFAULT_CONTEXT_RADIUS,
            priority: PriorityOrder::default(),
        }
    }
}

impl From<&Config> for ClassifierOptions {
    fn from(config: &Config) -> Self {
        Self {
            context_radius: config.context_radius,
            priority: config.priority,
        }
    }
}

/// Everything produced for one input text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextClassification {
    /// One record per surviving match, in source order.
    pub results: Vec<ClassificationResult>,
    /// Diagnostics for the unresolved matches, in source order.
    pub unresolved: Vec<UnresolvedMatch>,
}

impl TextClassification {
    /// Records that were resolved and carry a scored category.
    pub fn classified(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.results.iter().filter(|r| r.is_classified())
    }
}

/// Matcher, context extractor, disambiguator and priority resolver wired together.
///
/// Cheap to clone; clones share the reference data and the counters.
#[derive(Debug, Clone)]
pub struct Classifier {
    reference: Arc<ReferenceData>,
    resolver: PriorityResolver,
    context_radius: usize,
    stats: Arc<ClassifierStats>,
}

impl Classifier {
    pub fn new(reference: Arc<ReferenceData>, options: ClassifierOptions) -> Self {
        Self {
            reference,
            resolver: PriorityResolver::new(options.priority),
            context_radius: options.context_radius,
            stats: Arc::new(ClassifierStats::new()),
        }
    }

    /// Classifies one ingredient-label string. Pure apart from the counters.
    pub fn classify(&self, text: &str) -> TextClassification {
        let matcher = Matcher::new(self.reference.index());
        let spans = matcher.find_matches(text);
        let mut out = TextClassification {
            results: Vec::with_capacity(spans.len()),
            unresolved: Vec::new(),
        };

        for span in &spans {
            self.stats.record_match();
            let window = context_window(text, &span.span, self.context_radius);

            match Disambiguator::resolve(span, &window) {
                Resolution::Resolved { key, .. } => {
                    out.results.push(self.resolver.classify(
                        span,
                        &key,
                        &self.reference,
                        &self.stats,
                    ));
                }
                Resolution::Unresolved(unresolved) => {
                    out.results
                        .push(self.resolver.unresolved(&unresolved, &self.stats));
                    out.unresolved.push(unresolved);
                }
            }
        }

        debug!(
            text_len = text.len(),
            matches = spans.len(),
            unresolved = out.unresolved.len(),
            "Classified text"
        );

        out
    }

    pub fn reference(&self) -> &Arc<ReferenceData> {
        &self.reference
    }

    pub fn context_radius(&self) -> usize {
        self.context_radius
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
