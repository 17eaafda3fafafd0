//! Implementation of treaps, indexed by position.
//!
//! A treap is a balanced tree algorithm that supports splitting and concatenation.
//! Every node gets a random priority when it is created, and the tree is kept in heap
//! order of the priorities, which makes its shape that of a random binary search tree.
//!
//! Its operations take `O(log n)` expected time, probabilistically.
//! Each operation may take up to linear time, but the probability of any operation
//! taking more than `O(log n)` time is extremely low.

use super::algebra;
use super::basic_tree::{self, IntoIter, Iter, Tree};
use super::ownership::{Ownership, Unique};
use crate::data::Data;
use crate::error::{self, Result};
use crate::priority::PrioritySource;
use std::fmt;

/// A sequence of values, indexed by position.
///
/// With the default [`Unique`] ownership, this is a regular mutable container.
/// With [`crate::Shared`] or [`crate::Atomic`] ownership, `.clone()` takes `O(1)` time and
/// saves the current state: modifications afterwards copy only the nodes they change.
/// See also [`crate::PersistentTreap`].
///
/// Clones and split off treaps draw their priorities from the same source as the original.
pub struct Treap<D: Data, O: Ownership<D> = Unique> {
    pub(crate) tree: Tree<D, O>,
    pub(crate) priorities: PrioritySource,
}

impl<D: Data, O: Ownership<D>> Treap<D, O> {
    /// An empty treap, with priorities seeded from entropy.
    pub fn new() -> Self {
        Treap::with_priorities(PrioritySource::from_entropy())
    }

    /// An empty treap whose shape is determined by the seed.
    pub fn with_seed(seed: u64) -> Self {
        Treap::with_priorities(PrioritySource::seeded(seed))
    }

    pub fn with_priorities(priorities: PrioritySource) -> Self {
        Treap {
            tree: Tree::Empty,
            priorities,
        }
    }

    /// Builds a treap from an iterator of values, in order, in `O(n)` time.
    pub fn build<I>(values: I, mut priorities: PrioritySource) -> Self
    where
        I: IntoIterator<Item = D>,
    {
        let tree = basic_tree::build(values, &mut priorities);
        Treap { tree, priorities }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The underlying tree.
    pub fn tree(&self) -> &Tree<D, O> {
        &self.tree
    }

    /// The value at `position`, or `None` if it is out of bounds.
    pub fn get(&self, position: usize) -> Option<&D> {
        self.tree.get(position)
    }

    /// The data at the root, whose aggregates describe the whole sequence.
    pub fn aggregate(&self) -> Option<&D> {
        self.tree.data()
    }

    /// Takes `O(n)` time.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Iterates over the whole treap.
    ///```
    /// use treaps::*;
    /// use treaps::example_data::SumNum;
    ///
    /// let tree: Treap<SumNum> = (17..=89).map(SumNum::new).collect();
    ///
    /// assert_eq!(tree.iter().map(|x| x.value).collect::<Vec<_>>(), (17..=89).collect::<Vec<_>>());
    /// # tree.assert_correctness();
    ///```
    pub fn iter(&self) -> Iter<'_, D, O> {
        self.tree.iter()
    }

    /// Inserts `data` so that it ends up at `position`.
    /// `position` may be anything from `0` to `self.len()`, inclusive.
    pub fn insert_at(&mut self, position: usize, data: D) -> Result<()> {
        error::check_insert_position(position, self.len()).map_err(|err| {
            tracing::debug!(%err, "rejected insert");
            err
        })?;
        tracing::trace!(position, len = self.len(), "insert_at");
        let priority = self.priorities.next_priority();
        self.tree = algebra::insert_at(self.tree.take(), position, data, priority);
        Ok(())
    }

    /// Inserts `data` at the end.
    pub fn push_back(&mut self, data: D) {
        let priority = self.priorities.next_priority();
        let tree = self.tree.take();
        self.tree = algebra::merge(tree, Tree::singleton(data, priority));
    }

    /// Removes the value at `position` and returns it.
    /// `position` must be less than `self.len()`.
    pub fn delete_at(&mut self, position: usize) -> Result<D> {
        error::check_position(position, self.len()).map_err(|err| {
            tracing::debug!(%err, "rejected delete");
            err
        })?;
        tracing::trace!(position, len = self.len(), "delete_at");
        let res = basic_tree::erase_at(&mut self.tree, position);
        Ok(res.expect("a validated position is always present"))
    }

    /// Detaches the segment of positions `[start, end]`, inclusive, passes it to `f`,
    /// and puts back whatever `f` leaves there. Returns `f`'s result.
    ///
    /// `f` may read the segment's aggregate, modify its values with
    /// [`Tree::update_each`], or replace it with another tree altogether.
    ///```
    /// use treaps::*;
    /// use treaps::example_data::SumNum;
    ///
    /// let mut tree: Treap<SumNum> = Treap::build((0..10).map(SumNum::new), PrioritySource::seeded(1));
    /// // add 100 to every value in positions 2 to 4
    /// tree.range_apply(2, 4, |segment| segment.update_each(&mut |x: &mut SumNum| x.value += 100)).unwrap();
    ///
    /// assert_eq!(tree.iter().map(|x| x.value).collect::<Vec<_>>(), vec![0, 1, 102, 103, 104, 5, 6, 7, 8, 9]);
    /// assert_eq!(tree.aggregate().unwrap().aggregate, 345);
    /// # tree.assert_correctness();
    ///```
    pub fn range_apply<F, R>(&mut self, start: usize, end: usize, f: F) -> Result<R>
    where
        F: FnOnce(&mut Tree<D, O>) -> R,
    {
        error::check_range(start, end, self.len()).map_err(|err| {
            tracing::debug!(%err, "rejected range apply");
            err
        })?;
        tracing::trace!(start, end, len = self.len(), "range_apply");
        Ok(algebra::apply_range(&mut self.tree, start, end, f))
    }

    /// The data at the root of the segment `[start, end]`, inclusive, whose aggregates
    /// describe exactly that segment.
    pub fn range_aggregate(&mut self, start: usize, end: usize) -> Result<D> {
        let res = self.range_apply(start, end, |segment| segment.data().cloned())?;
        Ok(res.expect("a validated range is never empty"))
    }

    /// Splits the treap in two: the first `position` values stay in `self`,
    /// and the rest are returned.
    ///```
    /// use treaps::*;
    /// use treaps::example_data::SumNum;
    ///
    /// let mut tree: Treap<SumNum> = (17..88).map(SumNum::new).collect();
    /// let tree2 = tree.split_off(7).unwrap();
    ///
    /// assert_eq!(tree.iter().map(|x| x.value).collect::<Vec<_>>(), (17..24).collect::<Vec<_>>());
    /// assert_eq!(tree2.iter().map(|x| x.value).collect::<Vec<_>>(), (24..88).collect::<Vec<_>>());
    /// # tree.assert_correctness();
    ///```
    pub fn split_off(&mut self, position: usize) -> Result<Self> {
        error::check_insert_position(position, self.len())?;
        let (left, right) = algebra::split_by_size(self.tree.take(), position);
        self.tree = left;
        Ok(Treap {
            tree: right,
            priorities: self.priorities.clone(),
        })
    }

    /// Concatenates the treaps: the values of `other` are put after the values of `self`.
    ///
    /// A clone keeps the priorities of its nodes, so appending a treap to its own clone
    /// repeatedly doesn't stay balanced. See [`crate::PersistentTreap::concat`].
    pub fn append(&mut self, other: Self) {
        let tree = self.tree.take();
        self.tree = algebra::merge(tree, other.tree);
    }

    /// Checks that invariants remain correct. i.e., that every node's size and aggregates
    /// are made from its sons, and that the priorities are heap ordered.
    /// If it finds any violation, it panics.
    pub fn assert_correctness(&self)
    where
        D: PartialEq,
    {
        self.tree.assert_correctness()
    }
}

impl<D: Data, O: Ownership<D>> Default for Treap<D, O> {
    fn default() -> Self {
        Treap::new()
    }
}

impl<D: Data, O: Ownership<D>> Clone for Treap<D, O> {
    fn clone(&self) -> Self {
        Treap {
            tree: self.tree.clone(),
            priorities: self.priorities.clone(),
        }
    }
}

impl<D: Data + fmt::Debug, O: Ownership<D>> fmt::Debug for Treap<D, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<D: Data, O: Ownership<D>> std::iter::FromIterator<D> for Treap<D, O> {
    /// This takes `O(n)` worst-case time.
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        Treap::build(iter, PrioritySource::from_entropy())
    }
}

impl<D: Data, O: Ownership<D>> Extend<D> for Treap<D, O> {
    fn extend<I: IntoIterator<Item = D>>(&mut self, iter: I) {
        let tail = basic_tree::build(iter, &mut self.priorities);
        let tree = self.tree.take();
        self.tree = algebra::merge(tree, tail);
    }
}

impl<D: Data, O: Ownership<D>> IntoIterator for Treap<D, O> {
    type Item = D;
    type IntoIter = IntoIter<D, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, D: Data, O: Ownership<D>> IntoIterator for &'a Treap<D, O> {
    type Item = &'a D;
    type IntoIter = Iter<'a, D, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreapError;
    use crate::example_data::{MaxNum, SumNum};
    use crate::trees::ownership::Shared;

    fn values<O: Ownership<SumNum>>(tree: &Treap<SumNum, O>) -> Vec<i64> {
        tree.iter().map(|x| x.value).collect()
    }

    #[test]
    fn insert_scenario() {
        let mut tree: Treap<SumNum> = Treap::with_seed(0);
        tree.insert_at(0, SumNum::new(3)).unwrap();
        tree.insert_at(1, SumNum::new(7)).unwrap();
        tree.insert_at(2, SumNum::new(9)).unwrap();
        tree.insert_at(2, SumNum::new(4)).unwrap();
        assert_eq!(values(&tree), vec![3, 7, 4, 9]);
        assert_eq!(tree.range_aggregate(1, 2).unwrap().aggregate, 11);
        assert_eq!(values(&tree), vec![3, 7, 4, 9]);
        tree.assert_correctness();
    }

    #[test]
    fn treap_insert() {
        let arr: Vec<i64> = (0..500).collect();
        for i in 0..=arr.len() {
            let new_val = 13;
            let mut tree: Treap<SumNum> =
                Treap::build(arr.iter().cloned().map(SumNum::new), PrioritySource::seeded(i as u64));
            tree.insert_at(i, SumNum::new(new_val)).unwrap();
            assert_eq!(tree.get(i).map(|x| x.value), Some(new_val));
            tree.assert_correctness();
            assert_eq!(
                values(&tree),
                arr[..i]
                    .iter()
                    .chain([new_val].iter())
                    .chain(arr[i..].iter())
                    .cloned()
                    .collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn treap_delete() {
        let arr: Vec<i64> = (0..500).collect();
        for i in 0..arr.len() {
            let mut tree: Treap<SumNum> =
                Treap::build(arr.iter().cloned().map(SumNum::new), PrioritySource::seeded(i as u64));
            let res = tree.delete_at(i).unwrap();
            assert_eq!(res.value, arr[i]);
            tree.assert_correctness();
            assert_eq!(
                values(&tree),
                arr[..i]
                    .iter()
                    .chain(arr[i + 1..].iter())
                    .cloned()
                    .collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn out_of_range_calls_fail_without_changes() {
        let mut tree: Treap<SumNum> = Treap::build((0..5).map(SumNum::new), PrioritySource::seeded(4));
        assert_eq!(
            tree.insert_at(6, SumNum::new(1)),
            Err(TreapError::PositionOutOfBounds { position: 6, len: 5 })
        );
        assert_eq!(
            tree.delete_at(5).map(|x| x.value),
            Err(TreapError::PositionOutOfBounds { position: 5, len: 5 })
        );
        assert_eq!(
            tree.range_aggregate(3, 5).map(|x| x.aggregate),
            Err(TreapError::InvalidRange { start: 3, end: 5, len: 5 })
        );
        assert!(tree.range_apply(3, 2, |_| ()).is_err());
        assert!(tree.split_off(6).is_err());
        assert_eq!(values(&tree), vec![0, 1, 2, 3, 4]);

        let mut empty: Treap<SumNum> = Treap::with_seed(1);
        assert!(empty.delete_at(0).is_err());
        assert!(empty.range_aggregate(0, 0).is_err());
        assert!(empty.insert_at(0, SumNum::new(2)).is_ok());
    }

    #[test]
    fn range_apply_can_replace_segment() {
        let mut tree: Treap<MaxNum> = Treap::build((0..10).map(MaxNum::new), PrioritySource::seeded(9));
        let replaced = tree
            .range_apply(3, 6, |segment| {
                let old = segment.take();
                *segment = basic_tree::build(
                    [MaxNum::new(100), MaxNum::new(-5)],
                    &mut PrioritySource::seeded(77),
                );
                old.len()
            })
            .unwrap();
        assert_eq!(replaced, 4);
        assert_eq!(tree.len(), 8);
        assert_eq!(
            tree.iter().map(|x| x.value).collect::<Vec<_>>(),
            vec![0, 1, 2, 100, -5, 7, 8, 9]
        );
        assert_eq!(tree.aggregate().map(|x| x.aggregate), Some(100));
        assert_eq!(tree.range_aggregate(4, 7).unwrap().aggregate, 9);
        tree.assert_correctness();
    }

    #[test]
    fn split_off_and_append() {
        let mut tree: Treap<SumNum> = Treap::build((0..30).map(SumNum::new), PrioritySource::seeded(5));
        let mut tail = tree.split_off(12).unwrap();
        tail.push_back(SumNum::new(30));
        tree.append(tail);
        tree.extend((31..40).map(SumNum::new));
        tree.assert_correctness();
        assert_eq!(values(&tree), (0..40).collect::<Vec<_>>());
        assert_eq!(tree.into_iter().map(|x| x.value).sum::<i64>(), (0..40).sum());
    }

    #[test]
    fn appended_clones_stay_balanced() {
        let base: Treap<SumNum> = Treap::with_seed(2);
        let mut acc = base.clone();
        for i in 0..2000 {
            let mut single = base.clone();
            single.push_back(SumNum::new(i));
            let mut rest = single.split_off(1).unwrap();
            rest.push_back(SumNum::new(-i));
            single.append(rest);
            acc.append(single);
        }
        assert_eq!(acc.len(), 4000);
        assert!((acc.height() as f64) <= 6.0 * 4000f64.log2(), "height {}", acc.height());
        acc.assert_correctness();
    }

    #[test]
    fn shared_clone_is_a_snapshot() {
        let mut tree: Treap<SumNum, Shared> =
            Treap::build((0..100).map(SumNum::new), PrioritySource::seeded(12));
        let snapshot = tree.clone();
        tree.delete_at(50).unwrap();
        tree.insert_at(0, SumNum::new(-1)).unwrap();
        tree.range_apply(10, 20, |segment| segment.update_each(&mut |x: &mut SumNum| x.value = 0))
            .unwrap();
        tree.assert_correctness();
        snapshot.assert_correctness();
        assert_eq!(values(&snapshot), (0..100).collect::<Vec<_>>());
        assert_eq!(tree.len(), 100);
    }
}
