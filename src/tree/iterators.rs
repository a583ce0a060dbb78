use super::deallocator::deallocate_nonrecursive;
use super::*;

/// In-order iterator over a [`SplayTree`].
///
/// The iterator keeps a stack of the nodes whose left subtrees it has descended
/// into but which it hasn't yielded yet, so it needs neither recursion nor parent
/// pointers. It never splays.
///
/// Two iterators are equal when their remaining stacks hold the same nodes. In
/// particular every exhausted iterator is equal to [`Iter::end`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: &'a Link<K, V>) -> Self {
        let mut res = Iter { stack: vec![] };
        res.push_to_min(root.as_deref());
        res
    }

    /// The position past the last pair.
    pub fn end() -> Self {
        Iter { stack: vec![] }
    }

    /// Returns the pair the iterator is at, without advancing.
    pub fn peek(&self) -> Option<(&'a K, &'a V)> {
        let node = *self.stack.last()?;
        Some((&node.key, &node.value))
    }

    // pushes the tree's root and its whole left spine
    fn push_to_min(&mut self, mut tree: Option<&'a Node<K, V>>) {
        while let Some(node) = tree {
            self.stack.push(node);
            tree = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_to_min(node.right.as_deref());
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl<'a, K, V> std::iter::FusedIterator for Iter<'a, K, V> {}

// the derived implementations would require `K: Clone` and `K: PartialEq`
impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, K, V> PartialEq for Iter<'a, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.stack.len() == other.stack.len()
            && self
                .stack
                .iter()
                .zip(other.stack.iter())
                .all(|(a, b)| std::ptr::eq(*a, *b))
    }
}

impl<'a, K, V> Eq for Iter<'a, K, V> {}

impl<'a, K, V> Default for Iter<'a, K, V> {
    fn default() -> Self {
        Iter::end()
    }
}

/// Consuming in-order iterator over a [`SplayTree`].
///
/// Works like [`Iter`], except that nodes are detached from the tree as the
/// iterator descends past them.
pub struct IntoIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Link<K, V>) -> Self {
        let mut res = IntoIter { stack: vec![] };
        res.push_to_min(root);
        res
    }

    fn push_to_min(&mut self, mut tree: Link<K, V>) {
        while let Some(mut node) = tree {
            tree = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_to_min(node.right.take());
        let Node { key, value, .. } = *node;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl<K, V> std::iter::FusedIterator for IntoIter<K, V> {}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        // the nodes on the stack still own their right subtrees
        for node in self.stack.drain(..) {
            deallocate_nonrecursive(&mut Some(node));
        }
    }
}
