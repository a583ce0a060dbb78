//! An ordered key/value container backed by a splay tree whose nodes keep no
//! parent pointers.
//!
//! Every access moves the node it reached to the root of the tree. Since nodes
//! only point downwards, the tree is restructured along an explicit path of
//! references from the root to the accessed node, which is recorded while
//! searching and consumed by the splay.
//!
//! ```
//! use path_splay::SplayTree;
//!
//! let mut tree = SplayTree::new();
//! for key in [50, 40, 30] {
//!     tree.insert(key, key + 100);
//! }
//! assert!(tree.exists(&40));
//! assert_eq!(tree.root(), Some((&40, &140)));
//! assert_eq!(tree.find(&30), Some((&30, &130)));
//! assert_eq!(tree.to_string(), "(-, 30:130, (-, 40:140, (-, 50:150, -)))");
//! ```
//!
//! Lookups change the shape of the tree, so even `find` and `exists` take
//! `&mut self`.

#[macro_use]
extern crate derive_destructure;

pub mod error;
mod side;
pub mod tree;

pub use error::SplayError;
pub use tree::iterators::{IntoIter, Iter};
pub use tree::SplayTree;
