//! Treaps ordered by key.
//!
//! The same node algebra as [`crate::Treap`], but values are kept sorted by
//! [`Keyed::key`] instead of being placed by position.
//!
//! Duplicate keys are allowed. A new value is inserted before all values with an equal key,
//! since the insertion point is found by splitting off the keys strictly less than it.
//! [`KeyedTreap::erase`] removes the first value with a matching key that it meets on the way
//! down from the root; since the search compares keys strictly, a key that is present is
//! always found. To remove every occurrence, use [`KeyedTreap::erase_all`].

use super::algebra;
use super::basic_tree::{self, IntoIter, Iter, Tree};
use super::ownership::{Ownership, Unique};
use crate::data::Keyed;
use crate::priority::PrioritySource;
use std::fmt;

/// A sorted multiset of values.
///
///```
/// use treaps::*;
/// use treaps::example_data::SumNum;
///
/// let mut tree: KeyedTreap<SumNum> = KeyedTreap::with_seed(1);
/// for x in [5, 1, 4, 1, 3] {
///     tree.insert(SumNum::new(x));
/// }
/// assert_eq!(tree.iter().map(|x| x.value).collect::<Vec<_>>(), vec![1, 1, 3, 4, 5]);
/// assert_eq!(tree.erase(&1).map(|x| x.value), Some(1));
/// assert_eq!(tree.erase(&2).map(|x| x.value), None);
/// assert_eq!(tree.rank(&4), 2);
///```
pub struct KeyedTreap<D: Keyed, O: Ownership<D> = Unique> {
    tree: Tree<D, O>,
    priorities: PrioritySource,
}

impl<D: Keyed, O: Ownership<D>> KeyedTreap<D, O> {
    pub fn new() -> Self {
        KeyedTreap::with_priorities(PrioritySource::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        KeyedTreap::with_priorities(PrioritySource::seeded(seed))
    }

    pub fn with_priorities(priorities: PrioritySource) -> Self {
        KeyedTreap {
            tree: Tree::Empty,
            priorities,
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn tree(&self) -> &Tree<D, O> {
        &self.tree
    }

    /// The data at the root, whose aggregates describe all of the values.
    pub fn aggregate(&self) -> Option<&D> {
        self.tree.data()
    }

    /// Takes `O(n)` time.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Iterates over the values in key order.
    pub fn iter(&self) -> Iter<'_, D, O> {
        self.tree.iter()
    }

    /// The value at `position` in key order.
    pub fn nth(&self, position: usize) -> Option<&D> {
        self.tree.get(position)
    }

    /// Inserts the value before all values with an equal key.
    pub fn insert(&mut self, data: D) {
        tracing::trace!(len = self.len(), "insert");
        let priority = self.priorities.next_priority();
        self.tree = algebra::insert_by_key(self.tree.take(), data, priority);
    }

    /// Removes one value with the given key and returns it.
    /// If there is no such value, nothing changes and `None` is returned.
    pub fn erase(&mut self, key: &D::Key) -> Option<D> {
        let res = basic_tree::erase_key(&mut self.tree, key);
        tracing::trace!(found = res.is_some(), len = self.len(), "erase");
        res
    }

    /// Removes all values with the given key, and returns how many were removed.
    pub fn erase_all(&mut self, key: &D::Key) -> usize {
        if !self.contains(key) {
            return 0;
        }
        let (less, rest) = algebra::split_by_key(self.tree.take(), key);
        let (equal, greater) = algebra::split_by_key_inclusive(rest, key);
        self.tree = algebra::merge(less, greater);
        tracing::trace!(removed = equal.len(), len = self.len(), "erase_all");
        equal.len()
    }

    pub fn contains(&self, key: &D::Key) -> bool {
        algebra::contains(&self.tree, key)
    }

    /// Returns a value with the given key, if there is one.
    pub fn find(&self, key: &D::Key) -> Option<&D> {
        algebra::find(&self.tree, key)
    }

    /// The number of values with a key strictly less than `key`.
    pub fn rank(&self, key: &D::Key) -> usize {
        algebra::count_prefix(&self.tree, |data| data.key() < key)
    }

    /// The number of values with the given key.
    pub fn count(&self, key: &D::Key) -> usize {
        algebra::count_prefix(&self.tree, |data| data.key() <= key) - self.rank(key)
    }

    /// The data at the root of the values with `low <= key < high`, whose aggregates
    /// describe exactly those values. Returns `None` if there are none.
    pub fn key_range_aggregate(&mut self, low: &D::Key, high: &D::Key) -> Option<D> {
        let (less, rest) = algebra::split_by_key(self.tree.take(), low);
        let (middle, greater) = algebra::split_by_key(rest, high);
        let res = middle.data().cloned();
        self.tree = algebra::merge(less, algebra::merge(middle, greater));
        res
    }

    /// Splits the treap in two: the values with keys less than `key` stay in `self`,
    /// and the rest are returned.
    pub fn split_off(&mut self, key: &D::Key) -> Self {
        let (less, rest) = algebra::split_by_key(self.tree.take(), key);
        self.tree = less;
        KeyedTreap {
            tree: rest,
            priorities: self.priorities.clone(),
        }
    }

    /// Moves all of the values of `other` into `self`, keeping everything sorted.
    /// See [`algebra::union`].
    pub fn union(&mut self, other: Self) {
        let tree = self.tree.take();
        self.tree = algebra::union(tree, other.tree);
    }

    /// Checks that the sizes, aggregates and priorities are correct, and that the keys
    /// are in order. Panics otherwise.
    pub fn assert_correctness(&self)
    where
        D: PartialEq,
    {
        self.tree.assert_correctness();
        self.tree.assert_ordered();
    }
}

impl<D: Keyed, O: Ownership<D>> Default for KeyedTreap<D, O> {
    fn default() -> Self {
        KeyedTreap::new()
    }
}

/// With shared ownership, this takes `O(1)` time and saves the current state.
impl<D: Keyed, O: Ownership<D>> Clone for KeyedTreap<D, O> {
    fn clone(&self) -> Self {
        KeyedTreap {
            tree: self.tree.clone(),
            priorities: self.priorities.clone(),
        }
    }
}

impl<D: Keyed + fmt::Debug, O: Ownership<D>> fmt::Debug for KeyedTreap<D, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<D: Keyed, O: Ownership<D>> Extend<D> for KeyedTreap<D, O> {
    fn extend<I: IntoIterator<Item = D>>(&mut self, iter: I) {
        for data in iter {
            self.insert(data);
        }
    }
}

impl<D: Keyed, O: Ownership<D>> std::iter::FromIterator<D> for KeyedTreap<D, O> {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        let mut res = KeyedTreap::new();
        res.extend(iter);
        res
    }
}

impl<D: Keyed, O: Ownership<D>> IntoIterator for KeyedTreap<D, O> {
    type Item = D;
    type IntoIter = IntoIter<D, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, D: Keyed, O: Ownership<D>> IntoIterator for &'a KeyedTreap<D, O> {
    type Item = &'a D;
    type IntoIter = Iter<'a, D, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.iter()
    }
}
