//! Single rotations. They take the slot holding the top of the rotated subtree,
//! and rewrite that slot to hold the new top, so whoever owns the slot is relinked
//! along with the rotation.

use super::*;

/// Performs a left rotation: the right son of the top node takes its place.
/// Returns [`None`], leaving the slot untouched, if the slot is empty or the
/// top node has no right son.
pub(crate) fn rot_left<K, V>(slot: &mut Link<K, V>) -> Option<()> {
    let top = slot.as_deref_mut()?;
    let mut new_top = top.right.take()?;
    top.right = new_top.left.take();

    new_top.left = slot.take();
    *slot = Some(new_top);
    Some(())
}

/// Performs a right rotation: the left son of the top node takes its place.
/// Returns [`None`], leaving the slot untouched, if the slot is empty or the
/// top node has no left son.
pub(crate) fn rot_right<K, V>(slot: &mut Link<K, V>) -> Option<()> {
    let top = slot.as_deref_mut()?;
    let mut new_top = top.left.take()?;
    top.left = new_top.right.take();

    new_top.right = slot.take();
    *slot = Some(new_top);
    Some(())
}

/// Performs rot_left if `side` is [`Side::Left`]
/// rot_right otherwise
pub(crate) fn rot_side<K, V>(slot: &mut Link<K, V>, side: Side) -> Option<()> {
    match side {
        Side::Left => rot_left(slot),
        Side::Right => rot_right(slot),
    }
}
