//! Persistent treaps: every modification returns a new version.
//!
//! A [`PersistentTreap`] is an immutable handle to one version of a sequence. Modifying it
//! returns a new handle, and leaves the original handle, and every other handle derived from
//! it, exactly as it was. This is implemented by copy on write: the new version copies the
//! nodes on the paths that the modification walks, `O(log n)` of them in expectation, and
//! shares every other node with the versions it was derived from.
//!
//! Nodes are freed when no version references them anymore. With [`Shared`] ownership the
//! reference counts aren't atomic, so versions stay on one thread. With [`crate::Atomic`]
//! ownership, versions can be read from many threads, and new versions can be derived
//! from the same base version on different threads.
//!
//! All of the versions derived from one another draw their priorities from the same
//! [`crate::PrioritySource`] stream, so new nodes in sibling versions get distinct
//! priorities, and siblings can be concatenated without losing balance.

use super::algebra;
use super::basic_tree::{self, Iter, Tree};
use super::ownership::{Shared, SharedOwnership};
use super::treap::Treap;
use crate::data::Data;
use crate::error::{self, Result};
use crate::priority::PrioritySource;
use std::fmt;

/// One version of a persistent sequence, indexed by position.
///
///```
/// use treaps::*;
/// use treaps::example_data::SumNum;
///
/// let v1: PersistentTreap<SumNum> = PersistentTreap::with_seed(3);
/// let v2 = v1.insert_at(0, SumNum::new(5)).unwrap();
/// let v3 = v2.insert_at(1, SumNum::new(6)).unwrap();
/// let v4 = v3.delete_at(0).unwrap();
///
/// assert_eq!(v1.len(), 0);
/// assert_eq!(v2.iter().map(|x| x.value).collect::<Vec<_>>(), vec![5]);
/// assert_eq!(v3.iter().map(|x| x.value).collect::<Vec<_>>(), vec![5, 6]);
/// assert_eq!(v4.iter().map(|x| x.value).collect::<Vec<_>>(), vec![6]);
///```
pub struct PersistentTreap<D: Data, O: SharedOwnership<D> = Shared> {
    treap: Treap<D, O>,
}

impl<D: Data, O: SharedOwnership<D>> PersistentTreap<D, O> {
    /// The empty version, with priorities seeded from entropy.
    pub fn new() -> Self {
        PersistentTreap { treap: Treap::new() }
    }

    pub fn with_seed(seed: u64) -> Self {
        PersistentTreap {
            treap: Treap::with_seed(seed),
        }
    }

    pub fn with_priorities(priorities: PrioritySource) -> Self {
        PersistentTreap {
            treap: Treap::with_priorities(priorities),
        }
    }

    /// Builds a version from an iterator of values, in order, in `O(n)` time.
    pub fn build<I>(values: I, priorities: PrioritySource) -> Self
    where
        I: IntoIterator<Item = D>,
    {
        PersistentTreap {
            treap: Treap::build(values, priorities),
        }
    }

    /// Makes a version out of the current state of a treap.
    pub fn from_treap(treap: Treap<D, O>) -> Self {
        PersistentTreap { treap }
    }

    /// A mutable treap starting from this version. Modifying it doesn't affect this version.
    pub fn to_treap(&self) -> Treap<D, O> {
        self.treap.clone()
    }

    pub fn into_treap(self) -> Treap<D, O> {
        self.treap
    }

    pub fn len(&self) -> usize {
        self.treap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.treap.is_empty()
    }

    pub fn tree(&self) -> &Tree<D, O> {
        self.treap.tree()
    }

    pub fn get(&self, position: usize) -> Option<&D> {
        self.treap.get(position)
    }

    /// The data at the root, whose aggregates describe the whole sequence.
    pub fn aggregate(&self) -> Option<&D> {
        self.treap.aggregate()
    }

    /// Takes `O(n)` time.
    pub fn height(&self) -> usize {
        self.treap.height()
    }

    pub fn iter(&self) -> Iter<'_, D, O> {
        self.treap.iter()
    }

    /// Returns whether the two versions have the same root node, which implies that
    /// they hold the same sequence.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self.tree().node(), other.tree().node()) {
            (None, None) => true,
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            _ => false,
        }
    }

    /// The number of nodes of this version that aren't shared with `base`.
    /// If this version was derived from `base` by one modification, these are exactly the
    /// nodes that modification allocated or copied.
    pub fn count_unshared(&self, base: &Self) -> usize {
        self.tree().count_unshared(base.tree())
    }

    /// Runs `f` on a copy of this version, and returns the copy as the new version.
    /// The copy shares all of its nodes with this version until `f` writes to them.
    fn derive<F, R>(&self, f: F) -> Result<(Self, R)>
    where
        F: FnOnce(&mut Treap<D, O>) -> Result<R>,
    {
        let mut treap = self.treap.clone();
        let res = f(&mut treap)?;
        Ok((PersistentTreap { treap }, res))
    }

    /// A new version with `data` inserted so that it ends up at `position`.
    pub fn insert_at(&self, position: usize, data: D) -> Result<Self> {
        let (version, ()) = self.derive(|treap| treap.insert_at(position, data))?;
        Ok(version)
    }

    /// A new version with `data` inserted at the end.
    pub fn push_back(&self, data: D) -> Self {
        let mut treap = self.treap.clone();
        treap.push_back(data);
        PersistentTreap { treap }
    }

    /// A new version without the value at `position`.
    pub fn delete_at(&self, position: usize) -> Result<Self> {
        let (version, _) = self.derive(|treap| treap.delete_at(position))?;
        Ok(version)
    }

    /// A new version in which `f` was applied to the segment `[start, end]`, inclusive.
    /// Returns the new version and `f`'s result. See [`Treap::range_apply`].
    pub fn range_apply<F, R>(&self, start: usize, end: usize, f: F) -> Result<(Self, R)>
    where
        F: FnOnce(&mut Tree<D, O>) -> R,
    {
        self.derive(|treap| treap.range_apply(start, end, f))
    }

    /// The aggregate of the segment `[start, end]`, inclusive.
    /// The segment is split out of a temporary copy, so this version isn't modified.
    pub fn range_aggregate(&self, start: usize, end: usize) -> Result<D> {
        error::check_range(start, end, self.len())?;
        let mut tree = self.tree().clone();
        let res = algebra::apply_range(&mut tree, start, end, |segment| segment.data().cloned());
        Ok(res.expect("a validated range is never empty"))
    }

    /// Two new versions: the first `position` values, and the rest.
    pub fn split_at(&self, position: usize) -> Result<(Self, Self)> {
        let (left, right) = self.derive(|treap| treap.split_off(position))?;
        Ok((left, PersistentTreap { treap: right }))
    }

    /// A new version with the values of `self` followed by the values of `other`.
    ///
    /// Nodes that occur in both versions, like the common base of two siblings, occur twice
    /// in the result with the same priorities. Concatenating a version with itself over and
    /// over therefore piles up equal priorities, and the result is no longer balanced.
    pub fn concat(&self, other: &Self) -> Self {
        let mut treap = self.treap.clone();
        treap.append(other.treap.clone());
        PersistentTreap { treap }
    }

    /// See [`Treap::assert_correctness`].
    pub fn assert_correctness(&self)
    where
        D: PartialEq,
    {
        self.treap.assert_correctness()
    }
}

impl<D: Data, O: SharedOwnership<D>> Default for PersistentTreap<D, O> {
    fn default() -> Self {
        PersistentTreap::new()
    }
}

/// Takes `O(1)` time. The clone is the same version.
impl<D: Data, O: SharedOwnership<D>> Clone for PersistentTreap<D, O> {
    fn clone(&self) -> Self {
        PersistentTreap {
            treap: self.treap.clone(),
        }
    }
}

impl<D: Data + fmt::Debug, O: SharedOwnership<D>> fmt::Debug for PersistentTreap<D, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.treap, f)
    }
}

impl<D: Data, O: SharedOwnership<D>> std::iter::FromIterator<D> for PersistentTreap<D, O> {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        PersistentTreap {
            treap: iter.into_iter().collect(),
        }
    }
}

impl<'a, D: Data, O: SharedOwnership<D>> IntoIterator for &'a PersistentTreap<D, O> {
    type Item = &'a D;
    type IntoIter = basic_tree::Iter<'a, D, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
