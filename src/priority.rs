//! The source of the random priorities of treap nodes.
//!
//! A priority is drawn once, when a node is created, and never changes afterwards.
//! The numerically smaller priority goes higher up the tree.
//!
//! Every container owns a handle to a source, instead of using a process-wide generator,
//! so that a tree built from a fixed seed is always built the same way.
//! Cloning a handle doesn't copy the generator: the clones draw from one stream.
//! Containers that are cloned, split off or derived as new versions from each other
//! therefore never draw the same priorities, and can be concatenated again safely.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};

/// The type that is used for the heap order of the nodes.
pub type Priority = u64;

/// A seedable generator of i.i.d. node priorities.
///
/// Clones share the generator, and may be sent to other threads.
#[derive(Clone, Debug)]
pub struct PrioritySource {
    rng: Arc<Mutex<StdRng>>,
}

impl PrioritySource {
    fn from_rng(rng: StdRng) -> Self {
        PrioritySource {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// A source seeded from the operating system's entropy.
    pub fn from_entropy() -> Self {
        PrioritySource::from_rng(StdRng::from_entropy())
    }

    /// A deterministic source. Two sources with the same seed produce the same priorities.
    ///```
    /// use treaps::PrioritySource;
    ///
    /// let mut a = PrioritySource::seeded(5);
    /// let mut b = PrioritySource::seeded(5);
    /// assert_eq!(a.next_priority(), b.next_priority());
    ///```
    pub fn seeded(seed: u64) -> Self {
        PrioritySource::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Draws the priority of a new node.
    pub fn next_priority(&mut self) -> Priority {
        // a poisoned generator is still a valid generator
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen()
    }

    /// Returns true if both handles draw from the same stream.
    pub fn same_stream(&self, other: &PrioritySource) -> bool {
        Arc::ptr_eq(&self.rng, &other.rng)
    }
}

impl Default for PrioritySource {
    fn default() -> Self {
        PrioritySource::from_entropy()
    }
}
