//! Sparse transition table of an epsilon-NFA.

use crate::automaton::state::StateId;
use crate::automaton::symbol::{EPSILON, SymbolId};
use indexmap::IndexSet;
use std::collections::HashMap;

/// Destinations of one `(state, symbol)` pair, in the order they were added.
///
/// Stored sparsely, so a lookup costs the number of destinations regardless
/// of how large the state ids are.
pub type Destinations = IndexSet<StateId>;

/// Maps `(state, symbol)` to the set of destination states.
///
/// A table belongs to a single simulation run. Build a fresh one per run
/// instead of clearing and reusing an old one.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    transitions: HashMap<(StateId, SymbolId), Destinations>,
    /// Returned for absent keys so lookups never fail.
    empty: Destinations,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `from --symbol--> to`. Repeating an identical transition is a no-op.
    pub fn add(&mut self, from: StateId, symbol: SymbolId, to: StateId) {
        self.transitions
            .entry((from, symbol))
            .or_default()
            .insert(to);
    }

    /// Destinations of `state` on `symbol`; empty for unknown pairs.
    pub fn lookup(&self, state: StateId, symbol: SymbolId) -> &Destinations {
        self.transitions
            .get(&(state, symbol))
            .unwrap_or(&self.empty)
    }

    /// Destinations of `state` on a single epsilon transition.
    pub fn epsilon(&self, state: StateId) -> &Destinations {
        self.lookup(state, EPSILON)
    }

    /// Number of distinct `(from, symbol, to)` triples.
    pub fn len(&self) -> usize {
        self.transitions.values().map(IndexSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.values().all(IndexSet::is_empty)
    }
}

impl FromIterator<(StateId, SymbolId, StateId)> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = (StateId, SymbolId, StateId)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (from, symbol, to) in iter {
            table.add(from, symbol, to);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dests(set: &Destinations) -> Vec<StateId> {
        set.iter().copied().collect()
    }

    #[test]
    fn test_lookup_absent_pair_is_empty() {
        let mut table = TransitionTable::new();
        assert!(table.lookup(0, 0).is_empty());
        assert!(table.epsilon(42).is_empty());

        table.add(0, 0, 1);
        assert!(table.lookup(0, 1).is_empty());
        assert!(table.lookup(1, 0).is_empty());
        assert!(table.epsilon(0).is_empty());
    }

    #[test]
    fn test_multiple_destinations() {
        // 0 -b-> 0, 0 -b-> 1
        let table: TransitionTable = [(0, 1, 0), (0, 1, 1)].into_iter().collect();
        assert_eq!(dests(table.lookup(0, 1)), vec![0, 1]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut table = TransitionTable::new();
        table.add(1, EPSILON, 2);
        table.add(1, EPSILON, 2);
        assert_eq!(dests(table.epsilon(1)), vec![2]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_large_state_ids_stay_sparse() {
        let far = 3_999_999_999;
        let table: TransitionTable = [(far, 0, far), (far, EPSILON, 0)].into_iter().collect();
        assert_eq!(dests(table.lookup(far, 0)), vec![far]);
        assert_eq!(dests(table.epsilon(far)), vec![0]);
        assert!(table.lookup(0, 0).is_empty());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_tables_are_independent() {
        let mut first = TransitionTable::new();
        first.add(0, 0, 1);
        let second = TransitionTable::new();
        assert!(second.is_empty());
        assert!(second.lookup(0, 0).is_empty());
        assert!(!first.is_empty());
    }
}
