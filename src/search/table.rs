//! Transposition table keyed by canonical position and player to move

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::polygon::StateKey;

/// How a stored value relates to the true game value.
///
/// An alpha-beta search that stops early only proves a bound. Recording a
/// bound as if it were exact lets a later lookup under a different window
/// return the wrong value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bound {
    Exact,
    /// True value is at least the stored value
    Lower,
    /// True value is at most the stored value
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub value: i8,
    pub bound: Bound,
}

impl Entry {
    /// Classify a fail-soft search result against the window it was
    /// searched with.
    pub fn from_search(value: i8, alpha: i8, beta: i8) -> Self {
        let bound = if value <= alpha {
            Bound::Upper
        } else if value >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        Entry { value, bound }.normalized()
    }

    pub fn exact(value: i8) -> Self {
        Entry {
            value,
            bound: Bound::Exact,
        }
    }

    // Game values are only ever -1 or +1, so a lower bound of +1 and an
    // upper bound of -1 are exact.
    fn normalized(self) -> Self {
        match self.bound {
            Bound::Lower if self.value >= 1 => Entry::exact(1),
            Bound::Upper if self.value <= -1 => Entry::exact(-1),
            _ => self,
        }
    }

    /// The stored value if it settles a search over `(alpha, beta)`.
    pub fn usable(&self, alpha: i8, beta: i8) -> Option<i8> {
        match self.bound {
            Bound::Exact => Some(self.value),
            Bound::Lower if self.value >= beta => Some(self.value),
            Bound::Upper if self.value <= alpha => Some(self.value),
            _ => None,
        }
    }
}

/// Solved positions for one solver. Entries are never evicted.
#[derive(Debug, Clone, Default)]
pub struct TranspositionTable {
    entries: HashMap<StateKey, Entry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &StateKey) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Look up `key` and return its value if it settles the window.
    pub fn probe(&self, key: &StateKey, alpha: i8, beta: i8) -> Option<i8> {
        self.entries.get(key)?.usable(alpha, beta)
    }

    /// Exact value of `key`, if one has been proven.
    pub fn exact(&self, key: &StateKey) -> Option<i8> {
        self.entries
            .get(key)
            .filter(|entry| entry.bound == Bound::Exact)
            .map(|entry| entry.value)
    }

    /// Record an entry. Exact entries are never downgraded to bounds.
    pub fn store(&mut self, key: StateKey, entry: Entry) {
        match self.entries.get(&key) {
            Some(existing) if existing.bound == Bound::Exact => {}
            _ => {
                self.entries.insert(key, entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries holding an exact value.
    pub fn exact_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.bound == Bound::Exact)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::{GapSequence, Player};

    fn key(gaps: &[u32], player: Player) -> StateKey {
        let total = gaps.iter().sum();
        StateKey::new(&GapSequence::new(gaps.to_vec(), total).unwrap(), player)
    }

    #[test]
    fn bounds_from_search_window() {
        assert_eq!(Entry::from_search(1, -2, 2).bound, Bound::Exact);
        assert_eq!(Entry::from_search(-1, -1, 2).bound, Bound::Exact);
        // A failed-low +1 is still an upper bound
        assert_eq!(Entry::from_search(1, 1, 2).bound, Bound::Upper);
        // A failed-high -1 is still a lower bound
        assert_eq!(Entry::from_search(-1, -2, -1).bound, Bound::Lower);
    }

    #[test]
    fn bound_entries_only_settle_matching_windows() {
        let lower = Entry {
            value: -1,
            bound: Bound::Lower,
        };
        assert_eq!(lower.usable(-2, -1), Some(-1));
        assert_eq!(lower.usable(-2, 2), None);

        let upper = Entry {
            value: 1,
            bound: Bound::Upper,
        };
        assert_eq!(upper.usable(1, 2), Some(1));
        assert_eq!(upper.usable(-2, 2), None);
    }

    #[test]
    fn exact_entries_are_not_overwritten_by_bounds() {
        let mut table = TranspositionTable::new();
        let k = key(&[1, 1, 3], Player::One);
        table.store(k.clone(), Entry::exact(1));
        table.store(
            k.clone(),
            Entry {
                value: -1,
                bound: Bound::Lower,
            },
        );
        assert_eq!(table.exact(&k), Some(1));
        assert_eq!(table.len(), 1);
        assert_eq!(table.exact_count(), 1);
    }

    #[test]
    fn symmetric_positions_share_an_entry() {
        let mut table = TranspositionTable::new();
        table.store(key(&[1, 1, 3], Player::Two), Entry::exact(-1));
        assert_eq!(table.probe(&key(&[3, 1, 1], Player::Two), -2, 2), Some(-1));
        assert_eq!(table.probe(&key(&[1, 3, 1], Player::One), -2, 2), None);
    }
}
