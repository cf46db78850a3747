use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::warn;

use crate::constants::DEFAULT_CURATION_CAPACITY;
use crate::disambiguation::{CandidateOutcome, UnresolvedMatch, UnresolvedReason};
use crate::hashing::hash_curation_key;

/// One distinct unresolved (alias, window) pair and how often it was seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurationEntry {
    pub alias: String,
    /// Exact source text of the first occurrence.
    pub matched_text: String,
    pub window: String,
    pub reason: UnresolvedReason,
    pub outcomes: Vec<CandidateOutcome>,
    pub occurrences: u64,
}

impl CurationEntry {
    fn from_match(unresolved: UnresolvedMatch) -> Self {
        Self {
            alias: unresolved.alias,
            matched_text: unresolved.matched_text,
            window: unresolved.window,
            reason: unresolved.reason,
            outcomes: unresolved.outcomes,
            occurrences: 1,
        }
    }
}

#[derive(Debug, Default)]
struct QueueState {
    entries: HashMap<u64, CurationEntry>,
    dropped: u64,
}

/// Deduplicating collector of unresolved matches for human curation.
///
/// Bounded: once `capacity` distinct entries are held, new distinct entries are dropped and
/// counted; repeats of held entries still increment their frequency.
#[derive(Debug)]
pub struct CurationQueue {
    state: Mutex<QueueState>,
    capacity: usize,
}

impl Default for CurationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_CURATION_CAPACITY)
    }
}

impl CurationQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            capacity,
        }
    }

    /// Adds one unresolved match. Returns `false` if it was dropped for capacity.
    pub fn push(&self, unresolved: UnresolvedMatch) -> bool {
        let key = hash_curation_key(&unresolved.alias, &unresolved.window);
        let mut state = self.state.lock();

        if let Some(entry) = state.entries.get_mut(&key) {
            entry.occurrences += 1;
            return true;
        }

        if state.entries.len() >= self.capacity {
            state.dropped += 1;
            if state.dropped == 1 {
                warn!(capacity = self.capacity, "Curation queue full; dropping new entries");
            }
            return false;
        }

        state.entries.insert(key, CurationEntry::from_match(unresolved));
        true
    }

    pub fn extend<I>(&self, unresolved: I)
    where
        I: IntoIterator<Item = UnresolvedMatch>,
    {
        for item in unresolved {
            self.push(item);
        }
    }

    /// Distinct entries held.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Distinct entries rejected for capacity since the last drain.
    pub fn dropped(&self) -> u64 {
        self.state.lock().dropped
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Empties the queue, most frequent first (ties by alias, then window).
    pub fn drain_sorted(&self) -> Vec<CurationEntry> {
        let mut entries: Vec<CurationEntry> = {
            let mut state = self.state.lock();
            state.dropped = 0;
            state.entries.drain().map(|(_, entry)| entry).collect()
        };

        entries.sort_by(|a, b| {
            b.occurrences
                .cmp(&a.occurrences)
                .then_with(|| a.alias.cmp(&b.alias))
                .then_with(|| a.window.cmp(&b.window))
        });
        entries
    }
}
