//! Monotonic pipeline counters, shared across workers.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Lock-free counters updated while texts are classified.
#[derive(Debug, Default)]
pub struct ClassifierStats {
    matches: AtomicU64,
    resolved: AtomicU64,
    unresolved: AtomicU64,
    unclassified: AtomicU64,
    overlaps: AtomicU64,
}

/// Point-in-time copy of [`ClassifierStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub matches: u64,
    pub resolved: u64,
    pub unresolved: u64,
    pub unclassified: u64,
    /// Resolved occurrences present in more than one category.
    pub overlaps: u64,
}

impl ClassifierStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_match(&self) {
        self.matches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_resolved(&self) {
        self.resolved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unresolved(&self) {
        self.unresolved.fetch_add(1, Ordering::Relaxed);
    }

    /// Resolved, but absent from every database.
    pub fn record_unclassified(&self) {
        self.unclassified.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_overlap(&self) {
        self.overlaps.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            matches: self.matches.load(Ordering::Relaxed),
            resolved: self.resolved.load(Ordering::Relaxed),
            unresolved: self.unresolved.load(Ordering::Relaxed),
            unclassified: self.unclassified.load(Ordering::Relaxed),
            overlaps: self.overlaps.load(Ordering::Relaxed),
        }
    }
}
