// This is a private module, so no documentation for it directly.
// instead look for documentation of the `PathWalker` struct.

use super::rotations::rot_side;
use super::*;
use recursive_reference::RecRef;
use std::cmp::Ordering;

const NO_VALUE_ERROR: &str = "invariant violated: RecRef can't be empty";
const MISSING_CHILD_ERROR: &str = "invariant violated: splay path names a missing son";

/// A walker that stands in for parent pointers.
///
/// It holds a mutable reference to the root slot of a tree, and a stack of
/// reborrowed references to every slot on the way from the root down to the
/// current position, together with the side taken at each step. The current
/// position may be an empty slot: this is the "not found here" end of a search.
///
/// Every lookup and mutation goes through a walker, and it always splays on
/// its way out: when it is dropped, or when it is turned into
/// a reference to the root with [`PathWalker::into_root`], the node at the
/// current position is splayed to the root. If the current position is empty,
/// the last node above it is splayed instead.
///
/// Internally, [`recursive_reference::RecRef`] is used, in order to be able to
/// go up and down the tree without upsetting the borrow checker.
#[derive(destructure)]
pub(crate) struct PathWalker<'a, K, V> {
    /// References to all the slots from the root to the current position.
    rec_ref: RecRef<'a, Link<K, V>>,

    /// For every step down, which son was taken.
    /// Always one shorter than [`PathWalker::rec_ref`].
    sides: Vec<Side>,
}

impl<'a, K, V> PathWalker<'a, K, V> {
    pub fn new(root: &'a mut Link<K, V>) -> PathWalker<'a, K, V> {
        PathWalker {
            rec_ref: RecRef::new(root),
            sides: vec![],
        }
    }

    fn slot(&self) -> &Link<K, V> {
        &self.rec_ref
    }

    fn slot_mut(&mut self) -> &mut Link<K, V> {
        &mut self.rec_ref
    }

    /// Returns true if at an empty position.
    pub fn is_empty(&self) -> bool {
        self.slot().is_none()
    }

    /// Returns true if the current position is the root slot.
    /// Note: even at the root, the position might still be empty.
    pub fn is_root(&self) -> bool {
        self.sides.is_empty()
    }

    pub fn node(&self) -> Option<&Node<K, V>> {
        self.slot().as_deref()
    }

    /// Moves to the son on the given side.
    /// Fails if the current position is empty.
    pub fn go(&mut self, side: Side) -> Result<(), ()> {
        let res = RecRef::extend_result(&mut self.rec_ref, |slot| match slot {
            Some(node) => Ok(node.child_mut(side)),
            None => Err(()),
        });
        if res.is_ok() {
            self.sides.push(side);
        }
        res
    }

    /// Moves to the parent, returning which son the previous position was.
    /// Fails at the root.
    pub fn go_up(&mut self) -> Result<Side, ()> {
        let side = self.sides.pop().ok_or(())?;
        RecRef::pop(&mut self.rec_ref).expect(NO_VALUE_ERROR);
        Ok(side)
    }

    /// If the current position is empty, puts a new node there.
    pub fn fill(&mut self, node: Node<K, V>) -> Option<()> {
        if self.is_empty() {
            *self.slot_mut() = Some(Box::new(node));
            Some(())
        } else {
            None
        }
    }

    /// Goes down along right sons to the maximum of the current subtree.
    pub fn search_max(&mut self) {
        while let Some(node) = self.node() {
            if node.child(Side::Right).is_none() {
                break;
            }
            self.go(Side::Right).expect(NO_VALUE_ERROR);
        }
    }

    // the amortized cost of any splay step, except the zig step near the root, is at most
    // 3 * (rank(node after) - rank(node before)) - 1 where rank is log of the subtree size.
    // the -1 pays for having walked down the two levels in the first place.

    /// If at the root, does nothing.
    /// Otherwise, moves the current node up by one splay step (zig, zig-zig or zig-zag).
    fn splay_step(&mut self) {
        let s1 = match self.go_up() {
            Err(()) => return, // already the root
            Ok(s1) => s1,
        };

        let s2 = match self.go_up() {
            Err(()) => {
                // zig: the parent is the root
                rot_side(self.slot_mut(), s1.flip()).expect(MISSING_CHILD_ERROR);
                return;
            }
            Ok(s2) => s2,
        };

        // The current position is now the grandparent's slot, which belongs to the
        // great-grandparent (or is the root slot). Both rotations below rewrite
        // that slot, so the great-grandparent ends up pointing at the promoted node.
        if s1 == s2 {
            // zig-zig: rotate the grandparent, then the parent, in the same direction
            rot_side(self.slot_mut(), s2.flip()).expect(MISSING_CHILD_ERROR);
            rot_side(self.slot_mut(), s1.flip()).expect(MISSING_CHILD_ERROR);
        } else {
            // zig-zag: rotate the parent inside the grandparent's son slot,
            // which relinks the grandparent to the node, then rotate the grandparent
            let grandparent = self.slot_mut().as_deref_mut().expect(MISSING_CHILD_ERROR);
            rot_side(grandparent.child_mut(s2), s1.flip()).expect(MISSING_CHILD_ERROR);
            rot_side(self.slot_mut(), s2.flip()).expect(MISSING_CHILD_ERROR);
        }
    }

    /// Splays the node at the current position to the root.
    /// An empty position stands for a missed search, so its parent is splayed instead.
    pub fn splay(&mut self) {
        if self.is_empty() {
            let _ = self.go_up();
        }
        while !self.is_root() {
            self.splay_step();
        }
    }

    /// Splays, and turns the walker into a reference to the root slot.
    pub fn into_root(mut self) -> &'a mut Link<K, V> {
        self.splay();
        let (rec_ref, _) = self.destructure();
        RecRef::into_ref(rec_ref)
    }
}

impl<'a, K: Ord, V> PathWalker<'a, K, V> {
    /// Goes down towards `key`, stopping at the first node with an equal key.
    /// Returns whether such a node was found. Otherwise, the walker ends at an
    /// empty position.
    pub fn search(&mut self, key: &K) -> bool {
        loop {
            let side = match self.node() {
                None => return false,
                Some(node) => match key.cmp(&node.key) {
                    Ordering::Equal => return true,
                    Ordering::Greater => Side::Right,
                    Ordering::Less => Side::Left,
                },
            };
            self.go(side).expect(NO_VALUE_ERROR);
        }
    }

    /// Goes down to the empty position where `key` should be inserted.
    /// Equal keys are passed on the left.
    pub fn search_vacancy(&mut self, key: &K) {
        loop {
            let side = match self.node() {
                None => return,
                Some(node) if *key > node.key => Side::Right,
                Some(_) => Side::Left,
            };
            self.go(side).expect(NO_VALUE_ERROR);
        }
    }
}

/// This implementation exists in order to splay
/// when the walker gets dropped
impl<'a, K, V> Drop for PathWalker<'a, K, V> {
    fn drop(&mut self) {
        self.splay();
    }
}
