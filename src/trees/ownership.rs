//! How nodes own their sons.
//!
//! The node algebra is written once, generically over an [`Ownership`] kind:
//! * [`Unique`] boxes the nodes. Every node has exactly one owner, and is mutated in place.
//! * [`Shared`] puts the nodes in [`Rc`] pointers. Cloning a tree takes `O(1)` time, and
//!   after that the two trees share all of their nodes. A node is mutated in place only if
//!   its `Rc` is the only pointer to it; otherwise it is first cloned (copy on write), so that
//!   no other tree ever observes the change.
//! * [`Atomic`] is the same as [`Shared`], with [`Arc`] pointers, so that versions can be
//!   sent to and derived on other threads.
//!
//! Since merging and splitting only ever call [`Ownership::make_mut`] on nodes along the path
//! they walk, a modification of a shared tree copies exactly the nodes on that path.

use crate::data::Data;
use crate::trees::basic_tree::Node;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

pub trait Ownership<D: Data>: Sized {
    /// The pointer from a node to its son.
    type Ptr: Deref<Target = Node<D, Self>>;

    fn alloc(node: Node<D, Self>) -> Self::Ptr;

    /// Gives mutable access to the node, cloning it first if it is shared.
    fn make_mut(ptr: &mut Self::Ptr) -> &mut Node<D, Self>;

    /// Takes the node out of its pointer, cloning it if it is shared.
    fn into_node(ptr: Self::Ptr) -> Node<D, Self>;

    /// A pointer to an equal subtree. Deep copies [`Unique`] trees, and shares the others.
    fn duplicate(ptr: &Self::Ptr) -> Self::Ptr;
}

/// Ownership kinds in which [`Ownership::duplicate`] takes `O(1)` and shares structure.
/// Persistence is only efficient with these.
pub trait SharedOwnership<D: Data>: Ownership<D> {}

/// Boxed nodes, mutated in place.
#[derive(Debug)]
pub enum Unique {}

/// Reference counted nodes, copied on write.
#[derive(Debug)]
pub enum Shared {}

/// Atomically reference counted nodes, copied on write.
#[derive(Debug)]
pub enum Atomic {}

impl<D: Data> Ownership<D> for Unique {
    type Ptr = Box<Node<D, Unique>>;

    fn alloc(node: Node<D, Unique>) -> Self::Ptr {
        Box::new(node)
    }

    fn make_mut(ptr: &mut Self::Ptr) -> &mut Node<D, Unique> {
        &mut **ptr
    }

    fn into_node(ptr: Self::Ptr) -> Node<D, Unique> {
        *ptr
    }

    fn duplicate(ptr: &Self::Ptr) -> Self::Ptr {
        Box::new((**ptr).clone())
    }
}

impl<D: Data> Ownership<D> for Shared {
    type Ptr = Rc<Node<D, Shared>>;

    fn alloc(node: Node<D, Shared>) -> Self::Ptr {
        Rc::new(node)
    }

    fn make_mut(ptr: &mut Self::Ptr) -> &mut Node<D, Shared> {
        Rc::make_mut(ptr)
    }

    fn into_node(ptr: Self::Ptr) -> Node<D, Shared> {
        match Rc::try_unwrap(ptr) {
            Ok(node) => node,
            Err(rc) => (*rc).clone(),
        }
    }

    fn duplicate(ptr: &Self::Ptr) -> Self::Ptr {
        Rc::clone(ptr)
    }
}

impl<D: Data> SharedOwnership<D> for Shared {}

impl<D: Data> Ownership<D> for Atomic {
    type Ptr = Arc<Node<D, Atomic>>;

    fn alloc(node: Node<D, Atomic>) -> Self::Ptr {
        Arc::new(node)
    }

    fn make_mut(ptr: &mut Self::Ptr) -> &mut Node<D, Atomic> {
        Arc::make_mut(ptr)
    }

    fn into_node(ptr: Self::Ptr) -> Node<D, Atomic> {
        match Arc::try_unwrap(ptr) {
            Ok(node) => node,
            Err(arc) => (*arc).clone(),
        }
    }

    fn duplicate(ptr: &Self::Ptr) -> Self::Ptr {
        Arc::clone(ptr)
    }
}

impl<D: Data> SharedOwnership<D> for Atomic {}
