//! Bounded, newest-first history.
//!
//! [`Ledger`] backs both the alert history (capacity 50 in the alert view)
//! and the log buffer (capacity 200). Capacity is always supplied by the
//! consumer.

use std::collections::VecDeque;

use super::alert::TradeAlert;

/// Alert history as shown in the alert view.
pub type AlertLedger = Ledger<TradeAlert>;

/// Fixed-capacity history ordered newest-first.
///
/// Entries are never merged or deduplicated; once the capacity is reached
/// each new entry evicts the oldest one.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger<T> {
    capacity: usize,
    entries: VecDeque<T>,
}

impl<T> Ledger<T> {
    /// Create an empty ledger holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Return a ledger with `entry` prepended and the cap enforced.
    #[must_use]
    pub fn push(mut self, entry: T) -> Self {
        self.record(entry);
        self
    }

    /// Prepend `entry` in place, dropping the oldest entries past capacity.
    pub fn record(&mut self, entry: T) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// All entries, newest first.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &T> + DoubleEndedIterator + '_ {
        self.entries.iter()
    }

    /// Most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.entries.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> Ledger<T> {
    /// Owned copy of all entries, newest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_prepends() {
        let ledger = Ledger::new(3).push(1).push(2);
        assert_eq!(ledger.to_vec(), vec![2, 1]);
        assert_eq!(ledger.latest(), Some(&2));
    }

    #[test]
    fn push_drops_oldest_past_capacity() {
        let ledger = (1..=5).fold(Ledger::new(3), Ledger::push);
        assert_eq!(ledger.to_vec(), vec![5, 4, 3]);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn all_is_restartable() {
        let ledger = Ledger::new(4).push("a").push("b");
        let first: Vec<_> = ledger.all().collect();
        let second: Vec<_> = ledger.all().collect();
        assert_eq!(first, second);
        assert_eq!(ledger.all().len(), 2);
    }

    #[test]
    fn duplicates_by_value_are_kept() {
        let ledger = Ledger::new(4).push(7).push(7);
        assert_eq!(ledger.to_vec(), vec![7, 7]);
    }

    #[test]
    fn zero_capacity_holds_nothing() {
        let ledger = Ledger::new(0).push(1);
        assert!(ledger.is_empty());
        assert_eq!(ledger.capacity(), 0);
    }

    #[test]
    fn record_matches_push() {
        let mut in_place = Ledger::new(2);
        in_place.record('x');
        in_place.record('y');
        in_place.record('z');
        let pure = Ledger::new(2).push('x').push('y').push('z');
        assert_eq!(in_place, pure);
    }
}
