// This is a private module, so no documentation for it directly.
// instead look for documentation of the `Walker` struct.

use super::*;
use crate::data::Keyed;
use crate::trees::algebra;
use recursive_reference::*;
use std::cmp::Ordering;

const NO_VALUE_ERROR: &str = "invariant violated: RecRef can't be empty";

/// Which son of its parent a position is.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    Left,
    Right,
}

/// This struct implements a walker for the [`Tree`] type.
/// It is a struct that has a mutable reference of the tree, and allows you to walk up and down
/// on it. The walker may also be in a position which is the son of a node, but doesn't contain
/// a node by itself, and then it is said to be in an empty position.
///
/// Going down into a node's son gives mutable access to the node, so in a shared tree,
/// every node the walker passes through is copied on write. Nodes off the path are never touched.
///
/// The walker will automatically go back up the tree to the root when dropped,
/// in order to rebuild all the nodes.
///
/// Internally, [`recursive_reference::RecRef`] is used, in order to be able to dynamically
/// go up and down the tree without upsetting the borrow checker.
pub struct Walker<'a, D: Data, O: Ownership<D> = Unique> {
    /// Holds references to all the subtrees from the root to the current position.
    rec_ref: RecRef<'a, Tree<D, O>>,

    /// For every node on the path, whether the next subtree is its left son or its right son.
    /// Always one shorter than [`Walker::rec_ref`].
    is_left: Vec<Side>,
}

impl<'a, D: Data, O: Ownership<D>> Walker<'a, D, O> {
    pub fn new(tree: &'a mut Tree<D, O>) -> Walker<'a, D, O> {
        Walker {
            rec_ref: RecRef::new(tree),
            is_left: vec![],
        }
    }

    /// Returns true if at an empty position.
    pub fn is_empty(&self) -> bool {
        self.rec_ref.is_empty()
    }

    /// The number of steps from the root to the current position.
    pub fn depth(&self) -> usize {
        self.is_left.len()
    }

    pub fn node(&self) -> Option<&Node<D, O>> {
        self.rec_ref.node()
    }

    /// The subtree at the current position. Nodes above it get rebuilt on the way up,
    /// so it may be replaced freely.
    pub fn inner_mut(&mut self) -> &mut Tree<D, O> {
        &mut self.rec_ref
    }

    pub fn go_left(&mut self) -> Result<(), ()> {
        let res = RecRef::extend_result(&mut self.rec_ref, |tree| match tree.node_mut() {
            Some(node) => Ok(&mut node.left),
            None => Err(()),
        });
        if res.is_ok() {
            self.is_left.push(Side::Left);
        }
        res
    }

    pub fn go_right(&mut self) -> Result<(), ()> {
        let res = RecRef::extend_result(&mut self.rec_ref, |tree| match tree.node_mut() {
            Some(node) => Ok(&mut node.right),
            None => Err(()),
        });
        if res.is_ok() {
            self.is_left.push(Side::Right);
        }
        res
    }

    /// Goes up to the parent and rebuilds it.
    /// Returns which son we came from, or `Err(())` if already at the root.
    pub fn go_up(&mut self) -> Result<Side, ()> {
        let side = self.is_left.pop().ok_or(())?;
        RecRef::pop(&mut self.rec_ref).expect(NO_VALUE_ERROR);
        self.rec_ref.rebuild();
        Ok(side)
    }

    /// Removes the node at the current position, and returns its value.
    /// Its two subtrees are merged in its place.
    /// If currently at an empty position, returns `None` and does nothing.
    pub fn delete(&mut self) -> Option<D> {
        let node = self.inner_mut().take().into_node()?;
        let Node {
            left, right, data, ..
        } = node;
        *self.inner_mut() = algebra::merge(left, right);
        Some(data)
    }

    /// Goes down to the node at `position`, relative to the current subtree.
    /// If the position is out of bounds, ends at an empty position.
    pub fn search_position(&mut self, mut position: usize) {
        while let Some(node) = self.node() {
            let left_size = node.left.len();
            let step = match position.cmp(&left_size) {
                Ordering::Less => self.go_left(),
                Ordering::Equal => return,
                Ordering::Greater => {
                    position -= left_size + 1;
                    self.go_right()
                }
            };
            step.expect(NO_VALUE_ERROR);
        }
    }
}

impl<'a, D: Keyed, O: Ownership<D>> Walker<'a, D, O> {
    /// Goes down to the first node with the given key that is met on the way down from the
    /// current position. If there is no such node, ends at the empty position where it would be.
    pub fn search_key(&mut self, key: &D::Key) {
        while let Some(node) = self.node() {
            let ordering = key.cmp(node.data.key());
            let step = match ordering {
                Ordering::Less => self.go_left(),
                Ordering::Equal => return,
                Ordering::Greater => self.go_right(),
            };
            step.expect(NO_VALUE_ERROR);
        }
    }
}

impl<'a, D: Data, O: Ownership<D>> Drop for Walker<'a, D, O> {
    fn drop(&mut self) {
        while self.go_up().is_ok() {}
    }
}

/// Removes the value at `position` and returns it.
/// If the position is out of bounds, the tree is left as it was and `None` is returned.
pub fn erase_at<D: Data, O: Ownership<D>>(tree: &mut Tree<D, O>, position: usize) -> Option<D> {
    if position >= tree.len() {
        return None;
    }
    let mut walker = Walker::new(tree);
    walker.search_position(position);
    walker.delete()
}

/// Removes the first value with the given key found on the way down from the root,
/// and returns it. With duplicate keys, this is the occurrence closest to the root,
/// not necessarily the first one in order.
/// If the key is absent, the tree is left as it was and `None` is returned.
pub fn erase_key<D: Keyed, O: Ownership<D>>(tree: &mut Tree<D, O>, key: &D::Key) -> Option<D> {
    // checked first, so that a shared tree doesn't copy a path for nothing
    if !algebra::contains(tree, key) {
        return None;
    }
    let mut walker = Walker::new(tree);
    walker.search_key(key);
    walker.delete()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example_data::SumNum;
    use crate::priority::PrioritySource;

    fn sample(len: i64, seed: u64) -> Tree<SumNum> {
        build((0..len).map(SumNum::new), &mut PrioritySource::seeded(seed))
    }

    #[test]
    fn walker_delete() {
        let arr: Vec<i64> = (0..500).collect();
        for i in 0..arr.len() {
            let mut tree = sample(500, i as u64);
            let mut walker = Walker::new(&mut tree);
            walker.search_position(i);
            assert_eq!(walker.node().map(|n| n.data().value), Some(arr[i]));
            let res = walker.delete();
            assert_eq!(res.map(|d| d.value), Some(arr[i]));
            drop(walker);
            tree.assert_correctness();
            assert_eq!(
                tree.iter().map(|d| d.value).collect::<Vec<_>>(),
                arr[..i]
                    .iter()
                    .chain(arr[i + 1..].iter())
                    .cloned()
                    .collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn walker_goes_back_up() {
        let mut tree = sample(100, 17);
        let mut walker = Walker::new(&mut tree);
        walker.search_position(42);
        assert_eq!(walker.node().map(|n| n.data().value), Some(42));
        let depth = walker.depth();
        let mut steps = 0;
        while walker.go_up().is_ok() {
            steps += 1;
        }
        assert_eq!(steps, depth);
        assert_eq!(walker.depth(), 0);
        assert_eq!(walker.node().map(Node::size), Some(100));
        assert_eq!(walker.go_up(), Err(()));
    }

    #[test]
    fn erase_out_of_bounds_is_noop() {
        let mut tree = sample(10, 1);
        assert!(erase_at(&mut tree, 10).is_none());
        assert_eq!(tree.len(), 10);
        assert!(tree.iter().map(|d| d.value).eq(0..10));
    }

    #[test]
    fn erase_key_present_and_absent() {
        let mut tree = sample(50, 8);
        assert_eq!(erase_key(&mut tree, &20).map(|d| d.value), Some(20));
        assert_eq!(erase_key(&mut tree, &20).map(|d| d.value), None);
        assert_eq!(tree.len(), 49);
        tree.assert_correctness();
        tree.assert_ordered();
        assert_eq!(tree.data().map(|d| d.aggregate), Some((0..50i64).sum::<i64>() - 20));
    }
}
