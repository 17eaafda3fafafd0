//! The data stored inside the trees.

pub mod example_data;

/// This trait represents the data that will be stored inside the tree.
///
/// Every node stores exactly one value of this type. It holds both the user's value at that
/// node and whatever is accumulated over the node's subtree: sizes, sums, maximums and
/// minimums of subtrees, or whatever your heart desires for your data structure needs.
///
/// The trees call [`Data::rebuild_data`] after every structural change, bottom-up,
/// so when a node is rebuilt its sons have already been rebuilt.
pub trait Data: Clone {
    /// Rebuild the accumulated data from this node's own value and the data of its sons.
    /// An empty son is passed as `None`.
    ///
    /// The accumulation must be associative, but doesn't need to be commutative:
    /// everything in `left` precedes this node, which precedes everything in `right`.
    fn rebuild_data(&mut self, left: Option<&Self>, right: Option<&Self>);
}

/// Data that can be ordered by a key, for use with [`crate::KeyedTreap`].
///
/// The convention is that smaller keys go on the left.
pub trait Keyed: Data {
    type Key: Ord;
    fn key(&self) -> &Self::Key;
}
