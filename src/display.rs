//! Textual rendering of expression trees.
//!
//! [`Display`] prints a tree in flat infix form: `left op right`, separated by single spaces,
//! without parentheses. It loses grouping (`(1 + 2) * 3` prints as `1 + 2 * 3`), which keeps
//! rewrite results short to compare in tests. Use [`Node::to_bracket_string`] when the shape
//! matters.

use std::fmt::{Display, Formatter};

use crate::node::Node;

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Value(value) => write!(f, "{}", value),
            Node::BinOp { op, left, right } => write!(f, "{} {} {}", left, op, right),
        }
    }
}

impl Node {
    /// Fully parenthesized rendering, e.g. `((1 + 2) * 3)`.
    pub fn to_bracket_string(&self) -> String {
        match self {
            Node::Value(value) => value.to_string(),
            Node::BinOp { op, left, right } => format!(
                "({} {} {})",
                left.to_bracket_string(),
                op,
                right.to_bracket_string()
            ),
        }
    }
}
