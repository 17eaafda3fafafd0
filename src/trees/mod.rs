//! The trees themselves.
//!
//! [`basic_tree`] holds the node representation shared by every container, together with
//! its walker and iterators. [`algebra`] holds the operations everything else is built from:
//! merging, splitting and their combinations. The containers wrap a [`basic_tree::Tree`]
//! together with the source of priorities for new nodes.

pub mod algebra;
pub mod basic_tree;
pub mod keyed_treap;
pub mod ownership;
pub mod persistent_treap;
pub mod treap;

pub use keyed_treap::KeyedTreap;
pub use ownership::{Atomic, Ownership, Shared, SharedOwnership, Unique};
pub use persistent_treap::PersistentTreap;
pub use treap::Treap;
