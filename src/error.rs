use thiserror::Error;

/// Errors reported by [`SplayTree`](crate::SplayTree) operations that require
/// their key to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SplayError {
    /// Indexed access was attempted with a key that isn't in the tree.
    #[error("key not found in splay tree")]
    KeyNotFound,
}
