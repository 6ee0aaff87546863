//! Shallow-child matching.

use crate::node::Node;
use crate::predicate::Predicate;

/// Lifts `p` from a node to its immediate children.
///
/// For a binary node the result is `p(left) || p(right)`; grandchildren are never inspected.
/// A value node has no children, so the result is `false`.
pub fn match_within(p: Predicate) -> Predicate {
    Predicate::new(move |node| match node {
        Node::BinOp { left, right, .. } => p.test(left) || p.test(right),
        Node::Value(_) => false,
    })
}
