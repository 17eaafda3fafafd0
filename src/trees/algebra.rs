//! The node algebra: merging and splitting trees.
//!
//! Every structural operation on the containers is a combination of [`merge`] and one of
//! the split functions. They all take `O(log n)` expected time, since a random treap has
//! expected logarithmic height. Each of them only walks down a single path (or two paths,
//! for [`merge`]), and rebuilds the nodes on that path bottom-up, after the recursive call
//! returns.
//!
//! Mutable access to a node is always requested through `Tree::node_mut`, so on shared
//! trees exactly the nodes on the walked path are copied, and the rest stays shared.

use crate::data::{Data, Keyed};
use crate::priority::Priority;
use crate::trees::basic_tree::Tree::{self, *};
use crate::trees::basic_tree::Node;
use crate::trees::ownership::Ownership;
use std::cmp::Ordering;

/// Concatenates two trees. Every value of `left` must precede every value of `right`.
///
/// The root with the smaller priority becomes the root of the result. On equal priorities,
/// the root of `right` wins. Merging with an empty tree returns the other tree unchanged.
pub fn merge<D: Data, O: Ownership<D>>(left: Tree<D, O>, right: Tree<D, O>) -> Tree<D, O> {
    match (left, right) {
        (Empty, right) => right,
        (left, Empty) => left,
        (Root(mut left), Root(mut right)) => {
            if left.priority() == right.priority() {
                tracing::trace!(priority = left.priority(), "merging roots with equal priorities");
            }
            if left.priority() < right.priority() {
                let node = O::make_mut(&mut left);
                node.right = merge(node.right.take(), Root(right));
                node.rebuild();
                Root(left)
            } else {
                let node = O::make_mut(&mut right);
                node.left = merge(Root(left), node.left.take());
                node.rebuild();
                Root(right)
            }
        }
    }
}

/// Splits the tree in two: the first `k` values, and the rest.
/// Relative order is preserved. `k = 0` and `k = tree.len()` are valid, and return an empty
/// tree on one side; a larger `k` is treated as `tree.len()`.
pub fn split_by_size<D: Data, O: Ownership<D>>(
    tree: Tree<D, O>,
    k: usize,
) -> (Tree<D, O>, Tree<D, O>) {
    if k == 0 {
        return (Empty, tree);
    }
    if k >= tree.len() {
        return (tree, Empty);
    }
    let mut tree = tree;
    let node = match tree.node_mut() {
        None => return (Empty, Empty),
        Some(node) => node,
    };
    let left_size = node.left.len();
    if k <= left_size {
        let (first, rest) = split_by_size(node.left.take(), k);
        node.left = rest;
        node.rebuild();
        (first, tree)
    } else {
        let (first, rest) = split_by_size(node.right.take(), k - left_size - 1);
        node.right = first;
        node.rebuild();
        (tree, rest)
    }
}

/// Splits the tree in two according to a predicate, which must be monotone along the tree:
/// true for some prefix of the values, and false for the rest.
/// Returns the prefix and the rest.
pub fn split_by<D, O, F>(tree: Tree<D, O>, is_left: &mut F) -> (Tree<D, O>, Tree<D, O>)
where
    D: Data,
    O: Ownership<D>,
    F: FnMut(&D) -> bool,
{
    let mut tree = tree;
    let node = match tree.node_mut() {
        None => return (Empty, Empty),
        Some(node) => node,
    };
    if is_left(&node.data) {
        let (first, rest) = split_by(node.right.take(), is_left);
        node.right = first;
        node.rebuild();
        (tree, rest)
    } else {
        let (first, rest) = split_by(node.left.take(), is_left);
        node.left = rest;
        node.rebuild();
        (first, tree)
    }
}

/// Splits a key ordered tree into the values with keys strictly less than `key`,
/// and the rest. Values with a key equal to `key` end up on the right side.
pub fn split_by_key<D: Keyed, O: Ownership<D>>(
    tree: Tree<D, O>,
    key: &D::Key,
) -> (Tree<D, O>, Tree<D, O>) {
    split_by(tree, &mut |data: &D| data.key() < key)
}

/// Splits a key ordered tree into the values with keys less than or equal to `key`,
/// and the rest.
pub fn split_by_key_inclusive<D: Keyed, O: Ownership<D>>(
    tree: Tree<D, O>,
    key: &D::Key,
) -> (Tree<D, O>, Tree<D, O>) {
    split_by(tree, &mut |data: &D| data.key() <= key)
}

/// Inserts a new value so that it ends up at `position`.
/// A `position` larger than the tree's length is treated as the length.
pub fn insert_at<D: Data, O: Ownership<D>>(
    tree: Tree<D, O>,
    position: usize,
    data: D,
    priority: Priority,
) -> Tree<D, O> {
    let (left, right) = split_by_size(tree, position);
    merge(merge(left, Tree::singleton(data, priority)), right)
}

/// Inserts a new value into a key ordered tree. The new value is placed before
/// any values with an equal key.
pub fn insert_by_key<D: Keyed, O: Ownership<D>>(
    tree: Tree<D, O>,
    data: D,
    priority: Priority,
) -> Tree<D, O> {
    let (left, right) = split_by_key(tree, data.key());
    merge(merge(left, Tree::singleton(data, priority)), right)
}

/// Detaches the segment `[start, end]` (inclusive, by position), passes it to `f`,
/// and merges the three parts back together. The segment is clamped to the tree.
///
/// `f` may read the segment, replace values in it, or replace it altogether;
/// whatever it leaves behind is put back in place of the segment.
pub fn apply_range<D, O, F, R>(tree: &mut Tree<D, O>, start: usize, end: usize, f: F) -> R
where
    D: Data,
    O: Ownership<D>,
    F: FnOnce(&mut Tree<D, O>) -> R,
{
    let (rest, right) = split_by_size(tree.take(), end.saturating_add(1));
    let (left, mut middle) = split_by_size(rest, start);
    let res = f(&mut middle);
    *tree = merge(merge(left, middle), right);
    res
}

/// Finds a value with the given key, searching from the root down.
pub fn find<'a, D: Keyed, O: Ownership<D>>(tree: &'a Tree<D, O>, key: &D::Key) -> Option<&'a D> {
    let mut node: &Node<D, O> = tree.node()?;
    loop {
        node = match key.cmp(node.data().key()) {
            Ordering::Less => node.left().node()?,
            Ordering::Equal => return Some(node.data()),
            Ordering::Greater => node.right().node()?,
        };
    }
}

pub fn contains<D: Keyed, O: Ownership<D>>(tree: &Tree<D, O>, key: &D::Key) -> bool {
    find(tree, key).is_some()
}

/// The number of values for which the predicate holds, where the predicate
/// is monotone as in [`split_by`]. Doesn't modify the tree.
pub fn count_prefix<D, O, F>(tree: &Tree<D, O>, mut is_left: F) -> usize
where
    D: Data,
    O: Ownership<D>,
    F: FnMut(&D) -> bool,
{
    let mut res = 0;
    let mut current = tree;
    while let Some(node) = current.node() {
        if is_left(node.data()) {
            res += node.left().len() + 1;
            current = node.right();
        } else {
            current = node.left();
        }
    }
    res
}

/// Computes the union of two key ordered trees.
/// This is different from [`merge`], which puts first all values of the first tree,
/// and then all of the values of the second tree.
///
/// Values with equal keys are all kept, and are placed next to each other
/// in an arbitrary order.
///
/// # Complexity
/// If the sizes of the two trees are `n,k`, with `n < k`, then the complexity is
/// `O(n*log(1+k/n))` in the average case.
pub fn union<D: Keyed, O: Ownership<D>>(tree1: Tree<D, O>, tree2: Tree<D, O>) -> Tree<D, O> {
    let (mut tree1, tree2) = match (tree1.priority(), tree2.priority()) {
        (None, _) => return tree2,
        (_, None) => return tree1,
        (Some(p1), Some(p2)) if p1 > p2 => (tree2, tree1),
        _ => (tree1, tree2),
    };
    let node = match tree1.node_mut() {
        None => return tree2,
        Some(node) => node,
    };
    let (left, right) = split_by_key(tree2, node.data.key());
    node.left = union(node.left.take(), left);
    node.right = union(node.right.take(), right);
    node.rebuild();
    tree1
}
