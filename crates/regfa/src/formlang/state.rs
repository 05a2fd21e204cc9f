//! State types for automata.

use fixedbitset::FixedBitSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A state identifier: the index of the state's name in its automaton.
pub type StateId = u32;

/// A set of states backed by a growable bit set.
///
/// Equality and hashing only look at the members, so two sets built with
/// different capacities or in a different insertion order are the same key.
/// This is what lets a `StateSet` stand for a composite DFA state.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state, returning `true` if it was not present yet.
    pub fn insert(&mut self, state: StateId) -> bool {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over the states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Check if this set intersects with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }

    /// Check if every state of this set is also in `other`.
    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.iter().all(|state| other.contains(state))
    }

    /// Canonical representation: the members in ascending order.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }

    /// Render the set as `{a, b}` using `name` for each member.
    ///
    /// Members are listed in ascending id order, so equal sets always get
    /// equal labels.
    pub fn label<'a, F>(&self, name: F) -> String
    where
        F: Fn(StateId) -> &'a str,
    {
        let members: Vec<&str> = self.iter().map(name).collect();
        format!("{{{}}}", members.join(", "))
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl Hash for StateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for member in self.iter() {
            member.hash(state);
        }
        self.len().hash(state);
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::default();
        for state in iter {
            set.insert(state);
        }
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
    use std::collections::HashSet;

    #[test]
    fn test_state_set_basic() {
        let mut set = StateSet::with_capacity(10);
        assert!(set.is_empty());

        assert!(set.insert(3));
        assert!(set.insert(7));
        assert!(!set.insert(7));
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(!set.contains(5));
        assert!(!set.contains(500));
    }

    #[test]
    fn test_state_set_union() {
        let mut set1: StateSet = [1, 3].into_iter().collect();
        let set2: StateSet = [2, 3, 40].into_iter().collect();

        set1.union_with(&set2);
        assert_eq!(set1.to_vec(), vec![1, 2, 3, 40]);
        assert!(set2.is_subset(&set1));
        assert!(!set1.is_subset(&set2));
    }

    #[test]
    fn test_equality_ignores_capacity_and_order() {
        let mut small = StateSet::with_capacity(2);
        small.insert(1);
        small.insert(0);
        let mut large = StateSet::with_capacity(128);
        large.insert(0);
        large.insert(1);

        assert_eq!(small, large);

        let keys: HashSet<StateSet> = [small, large].into_iter().collect();
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_label_is_sorted() {
        let names = ["q0", "q1", "q2"];
        let set: StateSet = [2, 0].into_iter().collect();
        assert_eq!(set.label(|s| names[s as usize]), "{q0, q2}");
        assert_eq!(StateSet::default().label(|s| names[s as usize]), "{}");
    }

    #[test]
    fn test_state_set_singleton() {
        let set = StateSet::singleton(5, 10);
        assert_eq!(set.len(), 1);
        assert!(set.contains(5));
        assert!(set.intersects(&StateSet::singleton(5, 1)));
        assert!(!set.intersects(&StateSet::singleton(4, 1)));
    }
}
