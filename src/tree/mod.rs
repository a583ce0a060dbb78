//! The splay tree itself.
//!
//! A [`SplayTree`] owns its nodes through `Option<Box<_>>` slots: the root slot,
//! and the left and right slots of every node. There are no upward links.
//! Every operation walks down from the root with a [`PathWalker`], which records
//! the slots it passed through, and then splays the node it stopped at back to
//! the root along that same path.

pub mod iterators;
mod deallocator;
mod render;
mod rotations;
mod walker;

use crate::error::SplayError;
use crate::side::Side;
use deallocator::deallocate_nonrecursive;
use walker::PathWalker;

pub use iterators::{IntoIter, Iter};

const NO_ROOT_ERROR: &str = "invariant violated: splayed node missing from the root";

/// An owning slot: either empty, or the top of a subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

pub(crate) struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub left: Link<K, V>,
    pub right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    pub fn new(key: K, value: V) -> Node<K, V> {
        Node {
            key,
            value,
            left: None,
            right: None,
        }
    }

    pub fn child(&self, side: Side) -> &Link<K, V> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut Link<K, V> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// An ordered map implemented as a splay tree without parent pointers.
///
/// Duplicate keys are allowed: inserting a key that is already present adds
/// another node, which iterates before the existing nodes with that key.
///
/// Every lookup restructures the tree, including lookups that miss: the last
/// node visited by the search becomes the new root.
pub struct SplayTree<K, V> {
    root: Link<K, V>,
    size: usize,
}

impl<K, V> SplayTree<K, V> {
    pub fn new() -> Self {
        SplayTree {
            root: None,
            size: 0,
        }
    }

    /// Returns the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the pair stored at the root, without splaying.
    pub fn root(&self) -> Option<(&K, &V)> {
        self.root.as_deref().map(|node| (&node.key, &node.value))
    }

    /// Iterates over the pairs in ascending key order. Iterating never splays.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root)
    }

    /// Removes every node. The nodes are freed without recursion.
    pub fn clear(&mut self) {
        deallocate_nonrecursive(&mut self.root);
        self.size = 0;
    }
}

impl<K: Ord, V> SplayTree<K, V> {
    /// Inserts a new node, and splays it to the root.
    /// An existing node with an equal key is kept, and the new node is placed
    /// to its left.
    pub fn insert(&mut self, key: K, value: V) {
        let mut walker = PathWalker::new(&mut self.root);
        walker.search_vacancy(&key);
        walker
            .fill(Node::new(key, value))
            .expect("invariant violated: insertion slot was occupied");
        drop(walker);
        self.size += 1;
    }

    /// Removes one node with the given key and returns its value.
    ///
    /// If the key is absent, the last node visited by the search is splayed
    /// to the root and `None` is returned.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        if self.root.is_none() {
            return None;
        }
        let mut walker = PathWalker::new(&mut self.root);
        if !walker.search(key) {
            return None; // the walker splays the last visited node on drop
        }
        let node = walker.into_root().take().expect(NO_ROOT_ERROR);
        self.size -= 1;

        let Node {
            value, left, right, ..
        } = *node;
        self.root = splice(left, right);
        Some(value)
    }

    /// Returns whether a node with this key exists.
    /// Splays the found node, or the last visited node, to the root.
    pub fn exists(&mut self, key: &K) -> bool {
        let mut walker = PathWalker::new(&mut self.root);
        walker.search(key)
    }

    /// Finds a node with the given key, splays it to the root and returns its pair.
    /// On a miss the last visited node is splayed to the root instead, and
    /// `None` is returned.
    pub fn find(&mut self, key: &K) -> Option<(&K, &V)> {
        let mut walker = PathWalker::new(&mut self.root);
        let found = walker.search(key);
        let root = walker.into_root();
        if found {
            root.as_deref().map(|node| (&node.key, &node.value))
        } else {
            None
        }
    }

    /// Returns a mutable reference to the value of a node with this key.
    ///
    /// Splays the same way [`find`](SplayTree::find) does, and fails with
    /// [`SplayError::KeyNotFound`] if the key is absent.
    pub fn try_value_mut(&mut self, key: &K) -> Result<&mut V, SplayError> {
        let mut walker = PathWalker::new(&mut self.root);
        let found = walker.search(key);
        let root = walker.into_root();
        match root.as_deref_mut() {
            Some(node) if found => Ok(&mut node.value),
            _ => Err(SplayError::KeyNotFound),
        }
    }

    /// Indexed access. The key must be present.
    ///
    /// # Panics
    ///
    /// Panics if no node has this key. The tree is still splayed before panicking.
    pub fn value_mut(&mut self, key: &K) -> &mut V {
        match self.try_value_mut(key) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    /// Checks that the tree is a search tree and that its node count is accurate.
    /// If it is not, panics.
    ///
    /// Equal keys may end up on either side of each other after rotations,
    /// so only the in-order sequence of keys is required to be non-decreasing.
    pub fn assert_correctness(&self) {
        let mut count = 0;
        let mut prev: Option<&K> = None;
        for (key, _) in self.iter() {
            if let Some(prev) = prev {
                assert!(prev <= key, "splay tree keys out of order");
            }
            prev = Some(key);
            count += 1;
        }
        assert_eq!(count, self.size, "splay tree size doesn't match its node count");
    }
}

/// Joins two trees where every key of `left` is at most every key of `right`.
/// The maximum of `left` is splayed to its root, and `right` becomes its right son.
fn splice<K, V>(left: Link<K, V>, right: Link<K, V>) -> Link<K, V> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (mut left, right) => {
            let mut walker = PathWalker::new(&mut left);
            walker.search_max();
            let top = walker
                .into_root()
                .as_deref_mut()
                .expect(NO_ROOT_ERROR);
            debug_assert!(top.right.is_none());
            top.right = right;
            left
        }
    }
}

impl<K, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        SplayTree::new()
    }
}

impl<K, V> Drop for SplayTree<K, V> {
    fn drop(&mut self) {
        deallocate_nonrecursive(&mut self.root);
    }
}

impl<K: Ord, V> Extend<(K, V)> for SplayTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> std::iter::FromIterator<(K, V)> for SplayTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = SplayTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V> IntoIterator for &'a SplayTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for SplayTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(mut self) -> Self::IntoIter {
        self.size = 0;
        IntoIter::new(self.root.take())
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for SplayTree<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
