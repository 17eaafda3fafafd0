use super::*;
use crate::priority::PrioritySource;
use std::fmt;

impl<D: Data, O: Ownership<D>> Default for Tree<D, O> {
    fn default() -> Self {
        Empty
    }
}

/// Cloning a [`crate::Shared`] or [`crate::Atomic`] tree takes `O(1)` time.
/// From this point forward they will behave as separate trees to any user,
/// and will share as much of their nodes as possible.
/// Cloning a [`crate::Unique`] tree copies all of its nodes.
impl<D: Data, O: Ownership<D>> Clone for Tree<D, O> {
    fn clone(&self) -> Self {
        match self {
            Empty => Empty,
            Root(ptr) => Root(O::duplicate(ptr)),
        }
    }
}

// the derived instance would require `O: Clone`
impl<D: Data, O: Ownership<D>> Clone for Node<D, O> {
    fn clone(&self) -> Self {
        Node {
            priority: self.priority,
            size: self.size,
            left: self.left.clone(),
            right: self.right.clone(),
            data: self.data.clone(),
        }
    }
}

impl<D: Data + fmt::Debug, O: Ownership<D>> fmt::Debug for Tree<D, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Builds a tree from an iterator of values, in order, in `O(n)` time.
///
/// Every value gets a fresh priority, and the values are arranged in heap order of
/// their priorities, as a sequence of insertions would arrange them.
pub fn build<D, O, I>(values: I, priorities: &mut PrioritySource) -> Tree<D, O>
where
    D: Data,
    O: Ownership<D>,
    I: IntoIterator<Item = D>,
{
    // the right spine of the tree built so far. Each node on it is still missing
    // its right son, and therefore wasn't rebuilt yet.
    let mut spine: Vec<Node<D, O>> = vec![];
    for data in values {
        let mut node = Node::new(data, priorities.next_priority());
        let mut detached = Empty;
        while let Some(mut top) = spine.pop() {
            if top.priority <= node.priority {
                spine.push(top);
                break;
            }
            top.right = detached;
            top.rebuild();
            detached = Tree::from_node(top);
        }
        node.left = detached;
        spine.push(node);
    }

    let mut tree = Empty;
    while let Some(mut node) = spine.pop() {
        node.right = tree;
        node.rebuild();
        tree = Tree::from_node(node);
    }
    tree
}

#[test]
fn build_is_balanced_and_correct() {
    let mut priorities = PrioritySource::seeded(3);
    let values = (0..1000).map(crate::example_data::SumNum::new);
    let tree: Tree<_> = build(values, &mut priorities);
    tree.assert_correctness();
    assert_eq!(tree.len(), 1000);
    assert_eq!(tree.data().map(|d| d.aggregate), Some((0..1000i64).sum::<i64>()));
    assert!(tree.iter().map(|d| d.value).eq(0..1000));
    assert!(tree.height() < 60);
}
