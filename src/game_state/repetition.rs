//! Position-signature frequency tracking for repetition detection.
//!
//! The game keeps one long-lived [`RepetitionTable`]; a search keeps its own
//! line-local table, and the legality filter records nothing at all.

use std::collections::HashMap;

/// Sink for position signatures produced by make/unmake.
pub trait RepetitionTracker {
    fn record(&mut self, key: u64);
    fn release(&mut self, key: u64);
    fn count(&self, key: u64) -> u32;
}

/// Signature → occurrence count. Entries that fall to zero are removed so two
/// tables with the same history compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: HashMap::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Number of distinct signatures currently tracked.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl RepetitionTracker for RepetitionTable {
    #[inline]
    fn record(&mut self, key: u64) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    #[inline]
    fn release(&mut self, key: u64) {
        if let Some(count) = self.counts.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&key);
            }
        }
    }

    #[inline]
    fn count(&self, key: u64) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }
}

/// Tracker that ignores every signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRepetitionTracking;

impl RepetitionTracker for NoRepetitionTracking {
    #[inline]
    fn record(&mut self, _key: u64) {}

    #[inline]
    fn release(&mut self, _key: u64) {}

    #[inline]
    fn count(&self, _key: u64) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_removes_entries_that_reach_zero() {
        let mut table = RepetitionTable::new();
        table.record(7);
        table.record(7);
        assert_eq!(table.count(7), 2);
        table.release(7);
        table.release(7);
        assert_eq!(table.count(7), 0);
        assert!(table.is_empty());
        assert_eq!(table, RepetitionTable::new());
    }

    #[test]
    fn releasing_unknown_key_is_ignored() {
        let mut table = RepetitionTable::new();
        table.release(42);
        assert!(table.is_empty());
    }

    #[test]
    fn no_op_tracker_never_counts() {
        let mut tracker = NoRepetitionTracking;
        tracker.record(1);
        assert_eq!(tracker.count(1), 0);
    }
}
