use super::*;

/// Frees a tree with an explicit stack of boxed nodes instead of recursion,
/// so a tree whose height is its size can't overflow the call stack.
struct NonrecursiveDeallocator<K, V> {
    stack: Vec<Box<Node<K, V>>>,
}

impl<K, V> NonrecursiveDeallocator<K, V> {
    // detaches the sons of the top node before it gets freed
    fn step(&mut self) -> Option<()> {
        let mut node = self.stack.pop()?;
        self.push(node.left.take());
        self.push(node.right.take());
        drop(node);
        Some(())
    }

    fn push(&mut self, tree: Link<K, V>) {
        if let Some(node) = tree {
            self.stack.push(node);
        }
    }
}

/// Replaces the tree with an empty tree, and deallocates the tree iteratively
pub(crate) fn deallocate_nonrecursive<K, V>(tree: &mut Link<K, V>) {
    let my_tree = tree.take();
    let mut deallocator = NonrecursiveDeallocator { stack: vec![] };
    deallocator.push(my_tree);
    while let Some(()) = deallocator.step() {}
}
