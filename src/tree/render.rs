//! The debug rendering of a tree's shape.
//!
//! An empty subtree renders as `-`, and a node as
//! `(` left `, ` key `:` value `, ` right `)`.

use super::*;
use std::fmt;

enum Piece<'a, K, V> {
    Subtree(Option<&'a Node<K, V>>),
    Pair(&'a Node<K, V>),
    Close,
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for SplayTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pieces are pushed in reverse, so that they are popped in writing order
        let mut stack = vec![Piece::Subtree(self.root.as_deref())];
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Subtree(None) => f.write_str("-")?,
                Piece::Subtree(Some(node)) => {
                    f.write_str("(")?;
                    stack.push(Piece::Close);
                    stack.push(Piece::Subtree(node.right.as_deref()));
                    stack.push(Piece::Pair(node));
                    stack.push(Piece::Subtree(node.left.as_deref()));
                }
                Piece::Pair(node) => write!(f, ", {}:{}, ", node.key, node.value)?,
                Piece::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}
