use super::*;

/// Iterates over the values of a tree, in order.
pub struct Iter<'a, D: Data, O: Ownership<D> = Unique> {
    // the nodes whose value and right subtree are still to be visited
    stack: Vec<&'a Node<D, O>>,
    remaining: usize,
}

impl<'a, D: Data, O: Ownership<D>> Iter<'a, D, O> {
    pub fn new(tree: &'a Tree<D, O>) -> Self {
        let mut res = Iter {
            stack: vec![],
            remaining: tree.len(),
        };
        res.push_left_spine(tree);
        res
    }

    fn push_left_spine(&mut self, mut tree: &'a Tree<D, O>) {
        while let Some(node) = tree.node() {
            self.stack.push(node);
            tree = &node.left;
        }
    }
}

impl<'a, D: Data, O: Ownership<D>> Iterator for Iter<'a, D, O> {
    type Item = &'a D;

    fn next(&mut self) -> Option<&'a D> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        self.remaining -= 1;
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, D: Data, O: Ownership<D>> ExactSizeIterator for Iter<'a, D, O> {}

/// Iterates over the values of a tree, in order, consuming it.
/// Nodes that are shared with other trees are cloned as they are consumed.
pub struct IntoIter<D: Data, O: Ownership<D> = Unique> {
    stack: Vec<Node<D, O>>,
    remaining: usize,
}

impl<D: Data, O: Ownership<D>> IntoIter<D, O> {
    pub fn new(tree: Tree<D, O>) -> Self {
        let mut res = IntoIter {
            stack: vec![],
            remaining: tree.len(),
        };
        res.push_left_spine(tree);
        res
    }

    fn push_left_spine(&mut self, mut tree: Tree<D, O>) {
        while let Some(mut node) = tree.into_node() {
            tree = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<D: Data, O: Ownership<D>> Iterator for IntoIter<D, O> {
    type Item = D;

    fn next(&mut self) -> Option<D> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.remaining -= 1;
        Some(node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<D: Data, O: Ownership<D>> ExactSizeIterator for IntoIter<D, O> {}

impl<D: Data, O: Ownership<D>> Tree<D, O> {
    /// Iterates over the whole tree.
    pub fn iter(&self) -> Iter<'_, D, O> {
        Iter::new(self)
    }
}

impl<'a, D: Data, O: Ownership<D>> IntoIterator for &'a Tree<D, O> {
    type Item = &'a D;
    type IntoIter = Iter<'a, D, O>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

impl<D: Data, O: Ownership<D>> IntoIterator for Tree<D, O> {
    type Item = D;
    type IntoIter = IntoIter<D, O>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
