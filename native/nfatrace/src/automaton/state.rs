//! State identifiers and state sets.

use fixedbitset::FixedBitSet;
use serde::{Serialize, Serializer};
use std::fmt;

/// A state identifier. States are numbered `0..num_states`.
pub type StateId = u32;

/// A set of states backed by a growable bit set.
///
/// The bit set spans up to the largest member, so it is used for the start
/// and final sets, whose states validation bounds by the state count.
/// Iteration is always in ascending state order, so anything built by walking
/// a `StateSet` comes out in the same order on every run.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Insert a state, growing the set if needed. Returns `true` if the state was new.
    pub fn insert(&mut self, state: StateId) -> bool {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over the members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, state) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{state}")?;
        }
        write!(f, "}}")
    }
}

impl Serialize for StateSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_new_members() {
        let mut set = StateSet::default();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert!(set.insert(9));
        assert_eq!(set.len(), 2);
        assert!(set.contains(9));
        assert!(!set.contains(100));
    }

    #[test]
    fn test_iteration_is_ascending() {
        let set: StateSet = [7, 0, 3, 3].into_iter().collect();
        assert_eq!(set.to_vec(), vec![0, 3, 7]);
        assert_eq!(set.to_string(), "{0, 3, 7}");
    }

    #[test]
    fn test_empty_set() {
        let set = StateSet::default();
        assert!(set.is_empty());
        assert_eq!(set.to_string(), "{}");
        assert_eq!(serde_json::to_string(&set).unwrap(), "[]");
    }
}
