//! The basic tree module.
//!
//! [`Tree`] and [`Node`] are the representation shared by all of the containers:
//! a possibly empty tree, and a node with a priority, a subtree size, two sons and
//! the user's [`Data`]. They keep the bookkeeping (sizes and aggregates) consistent,
//! but know nothing about balancing: that is the job of [`crate::trees::algebra`].
//!
//! The ownership type parameter decides whether the tree is persistent.
//! See [`crate::trees::ownership`].

mod implementations;
mod iterators;
mod walker;

pub use implementations::*;
pub use iterators::*;
pub use walker::*;

use crate::data::Data;
use crate::priority::Priority;
use crate::trees::ownership::{Ownership, Unique};
use std::collections::HashSet;

/// A tree. might be empty.
pub enum Tree<D: Data, O: Ownership<D> = Unique> {
    /// An empty tree
    Empty,
    /// A non empty tree, with a root node
    Root(O::Ptr),
}
use Tree::*;

/// A node. can be viewed as a non-empty tree: it always has at least one value.
pub struct Node<D: Data, O: Ownership<D> = Unique> {
    priority: Priority,
    size: usize,
    pub(crate) left: Tree<D, O>,
    pub(crate) right: Tree<D, O>,
    pub(crate) data: D,
}

impl<D: Data, O: Ownership<D>> Node<D, O> {
    /// Creates a node with a single value.
    pub fn new(data: D, priority: Priority) -> Node<D, O> {
        let mut node = Node {
            priority,
            size: 1,
            left: Empty,
            right: Empty,
            data,
        };
        node.rebuild();
        node
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// The number of nodes in this node's subtree, including itself.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The data of this node. Its accumulated fields describe the whole subtree.
    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn left(&self) -> &Tree<D, O> {
        &self.left
    }

    pub fn right(&self) -> &Tree<D, O> {
        &self.right
    }

    /// Remakes the size and the data that is stored in this node, based on its sons.
    /// This is necessary whenever the sons might have changed.
    /// For example, after inserting a new node, all of the nodes from it to the root
    /// must be rebuilt, in order for the aggregates over the whole
    /// subtree to be accurate.
    pub fn rebuild(&mut self) {
        self.size = 1 + self.left.len() + self.right.len();
        self.data.rebuild_data(self.left.data(), self.right.data());
    }
}

impl<D: Data, O: Ownership<D>> Tree<D, O> {
    pub fn new() -> Self {
        Empty
    }

    /// Constructs a new non-empty tree from a node.
    pub fn from_node(node: Node<D, O>) -> Self {
        Root(O::alloc(node))
    }

    /// A tree with a single node.
    pub fn singleton(data: D, priority: Priority) -> Self {
        Tree::from_node(Node::new(data, priority))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Empty)
    }

    /// The number of values in the tree.
    pub fn len(&self) -> usize {
        self.node().map_or(0, Node::size)
    }

    /// Returns the inner node.
    pub fn node(&self) -> Option<&Node<D, O>> {
        match self {
            Empty => None,
            Root(ptr) => Some(&**ptr),
        }
    }

    /// Returns the inner node, for mutation.
    /// If the node is shared with other trees, it is cloned first.
    pub(crate) fn node_mut(&mut self) -> Option<&mut Node<D, O>> {
        match self {
            Empty => None,
            Root(ptr) => Some(O::make_mut(ptr)),
        }
    }

    /// Returns the inner node, cloning it if it is shared with other trees.
    pub fn into_node(self) -> Option<Node<D, O>> {
        match self {
            Empty => None,
            Root(ptr) => Some(O::into_node(ptr)),
        }
    }

    /// The data at the root, which describes the whole tree.
    /// Returns `None` if the tree is empty.
    pub fn data(&self) -> Option<&D> {
        self.node().map(Node::data)
    }

    /// The priority of the root.
    pub fn priority(&self) -> Option<Priority> {
        self.node().map(Node::priority)
    }

    /// Leaves an empty tree in place of this one.
    pub fn take(&mut self) -> Tree<D, O> {
        std::mem::take(self)
    }

    /// Rebuilds the root. See [`Node::rebuild`].
    pub(crate) fn rebuild(&mut self) {
        if let Some(node) = self.node_mut() {
            node.rebuild()
        }
    }

    /// The number of nodes on the longest path from the root down. Takes `O(n)` time.
    pub fn height(&self) -> usize {
        match self.node() {
            None => 0,
            Some(node) => 1 + std::cmp::max(node.left.height(), node.right.height()),
        }
    }

    /// Returns the value at the given position, or `None` if it is out of bounds.
    pub fn get(&self, mut position: usize) -> Option<&D> {
        let mut node = self.node()?;
        loop {
            let left_size = node.left.len();
            match position.cmp(&left_size) {
                std::cmp::Ordering::Less => node = node.left.node()?,
                std::cmp::Ordering::Equal => return Some(&node.data),
                std::cmp::Ordering::Greater => {
                    position -= left_size + 1;
                    node = node.right.node()?;
                }
            }
        }
    }

    /// Modifies every value in the tree, in order, and then rebuilds the whole tree.
    /// Takes `O(n)` time for a tree with `n` nodes.
    ///
    /// This is meant to be used on a segment that was split out of a larger tree,
    /// e.g., inside [`crate::Treap::range_apply`].
    pub fn update_each<F: FnMut(&mut D)>(&mut self, f: &mut F) {
        if let Some(node) = self.node_mut() {
            node.left.update_each(f);
            f(&mut node.data);
            node.right.update_each(f);
            node.rebuild();
        }
    }

    /// Counts the nodes reachable from this tree that aren't reachable from `base`.
    /// For a tree that was derived from `base` by a single modification, this is the
    /// number of nodes that the modification allocated or copied.
    ///
    /// Takes `O(n)` time, where `n` is the size of `base`.
    pub fn count_unshared(&self, base: &Tree<D, O>) -> usize {
        let mut seen = HashSet::new();
        base.collect_addresses(&mut seen);
        self.count_unshared_internal(&seen)
    }

    fn collect_addresses(&self, seen: &mut HashSet<*const Node<D, O>>) {
        if let Some(node) = self.node() {
            let address: *const Node<D, O> = node;
            // a shared node's whole subtree is shared
            if seen.insert(address) {
                node.left.collect_addresses(seen);
                node.right.collect_addresses(seen);
            }
        }
    }

    fn count_unshared_internal(&self, seen: &HashSet<*const Node<D, O>>) -> usize {
        match self.node() {
            None => 0,
            Some(node) if seen.contains(&(node as *const Node<D, O>)) => 0,
            Some(node) => {
                1 + node.left.count_unshared_internal(seen)
                    + node.right.count_unshared_internal(seen)
            }
        }
    }

    /// Checks that invariants remain correct: that every node's size is the sum of the sizes
    /// of its sons plus one, that every node's data is what rebuilding it would produce,
    /// and that no node has a bigger priority than its sons.
    /// If any of them is violated, panics.
    pub fn assert_correctness(&self)
    where
        D: PartialEq,
    {
        if let Some(node) = self.node() {
            Self::assert_correctness_locally(node);
            node.left.assert_correctness();
            node.right.assert_correctness();
        }
    }

    fn assert_correctness_locally(node: &Node<D, O>)
    where
        D: PartialEq,
    {
        assert_eq!(
            node.size,
            1 + node.left.len() + node.right.len(),
            "Incorrect sizes found."
        );
        let mut rebuilt = node.data.clone();
        rebuilt.rebuild_data(node.left.data(), node.right.data());
        assert!(rebuilt == node.data, "Incorrect aggregates found.");
        for son in [&node.left, &node.right] {
            if let Some(priority) = son.priority() {
                assert!(node.priority <= priority, "Heap order violated.");
            }
        }
    }
}

impl<D: crate::data::Keyed, O: Ownership<D>> Tree<D, O> {
    /// Checks that the keys are sorted in order. Panics otherwise.
    pub fn assert_ordered(&self) {
        let mut iter = self.iter();
        if let Some(mut prev) = iter.next() {
            for data in iter {
                assert!(prev.key() <= data.key(), "Keys out of order.");
                prev = data;
            }
        }
    }
}
