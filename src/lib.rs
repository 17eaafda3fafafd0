//! Treaps: randomized balanced binary trees.
//!
//! The trees in this crate keep a sequence of values, and support insertion and
//! deletion by position or by key, splitting and concatenation, and subtree aggregates
//! (sums, minimums, gcds, or anything else the user defines through [`Data`]),
//! all in `O(log n)` expected time.
//!
//! Three containers are provided:
//! * [`Treap`], a positional sequence that is mutated in place.
//! * [`PersistentTreap`], where every modification returns a new version, and
//!   all previous versions remain valid. Versions share all of their unmodified nodes.
//! * [`KeyedTreap`], which keeps its values sorted by key.
//!
//! The way nodes are owned is chosen by a type parameter (see [`ownership`]):
//! [`Unique`] nodes are boxed and always mutated in place, while [`Shared`] and [`Atomic`]
//! nodes are reference counted and copied on write.
//!
//!```
//! use treaps::*;
//! use treaps::example_data::SumNum;
//!
//! let mut tree: Treap<SumNum> = Treap::with_seed(7);
//! tree.insert_at(0, SumNum::new(3)).unwrap();
//! tree.insert_at(1, SumNum::new(7)).unwrap();
//! tree.insert_at(2, SumNum::new(9)).unwrap();
//! tree.insert_at(2, SumNum::new(4)).unwrap();
//!
//! assert_eq!(tree.iter().map(|x| x.value).collect::<Vec<_>>(), vec![3, 7, 4, 9]);
//! assert_eq!(tree.range_aggregate(1, 2).unwrap().aggregate, 11);
//!```

pub mod data;
pub mod error;
pub mod priority;
pub mod trees;

pub use data::example_data;
pub use data::{Data, Keyed};
pub use error::{Result, TreapError};
pub use priority::{Priority, PrioritySource};
pub use trees::*;
