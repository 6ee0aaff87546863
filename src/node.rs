//! Expression tree nodes.
//!
//! A tree is made of two kinds of nodes: [`Node::Value`] leaves holding a scalar, and
//! [`Node::BinOp`] nodes holding an operator symbol and exactly two children.
//! Nodes are immutable and shared through the [`Ast`] handle (an [`Arc<Node>`]), so a
//! rewrite that leaves a subtree untouched hands back the very same allocation.
//!
//! # Examples
//!
//! ```
//! use ast_rewrite::node::{mul, num, plus};
//!
//! // (1 + 2) * 3
//! let ast = mul(plus(num(1), num(2)), num(3));
//! assert_eq!(ast.to_string(), "1 + 2 * 3");
//! ```

use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Shared handle to an immutable node.
pub type Ast = Arc<Node>;

/// Scalar held by a value node.
pub type Value = i64;

/// Operator symbol of a binary node, e.g. `+` or `*`.
///
/// The engine treats the symbol as opaque: it is compared and printed, never interpreted.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Op(Cow<'static, str>);

impl Op {
    pub const ADD: Op = Op(Cow::Borrowed("+"));
    pub const SUB: Op = Op(Cow::Borrowed("-"));
    pub const MUL: Op = Op(Cow::Borrowed("*"));
    pub const DIV: Op = Op(Cow::Borrowed("/"));

    pub fn new(symbol: impl Into<Cow<'static, str>>) -> Self {
        Op(symbol.into())
    }

    pub fn symbol(&self) -> &str {
        &self.0
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&'static str> for Op {
    fn from(symbol: &'static str) -> Self {
        Op(Cow::Borrowed(symbol))
    }
}

impl From<String> for Op {
    fn from(symbol: String) -> Self {
        Op(Cow::Owned(symbol))
    }
}

/// Tree node.
///
/// The set of kinds is closed. Every consumer in this crate matches on it exhaustively,
/// so adding a variant is a compile error at each site until that site handles it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Node {
    Value(Value),
    BinOp { op: Op, left: Ast, right: Ast },
}

/// Tag of a node, without its payload.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NodeKind {
    Value,
    BinOp,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Value => write!(f, "value"),
            NodeKind::BinOp => write!(f, "binop"),
        }
    }
}

// Constructors
impl Node {
    pub fn value(value: Value) -> Ast {
        Arc::new(Node::Value(value))
    }

    pub fn bin_op(op: impl Into<Op>, left: Ast, right: Ast) -> Ast {
        Arc::new(Node::BinOp {
            op: op.into(),
            left,
            right,
        })
    }
}

// Getters
impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Value(_) => NodeKind::Value,
            Node::BinOp { .. } => NodeKind::BinOp,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Node::Value(_))
    }

    pub fn is_bin_op(&self) -> bool {
        matches!(self, Node::BinOp { .. })
    }

    /// Scalar of a value node, `None` for a binary node.
    pub fn as_value(&self) -> Option<Value> {
        match self {
            Node::Value(value) => Some(*value),
            Node::BinOp { .. } => None,
        }
    }

    /// Operator of a binary node, `None` for a value node.
    pub fn op(&self) -> Option<&Op> {
        match self {
            Node::Value(_) => None,
            Node::BinOp { op, .. } => Some(op),
        }
    }

    pub fn left(&self) -> Option<&Ast> {
        match self {
            Node::Value(_) => None,
            Node::BinOp { left, .. } => Some(left),
        }
    }

    pub fn right(&self) -> Option<&Ast> {
        match self {
            Node::Value(_) => None,
            Node::BinOp { right, .. } => Some(right),
        }
    }

    /// Immediate children as `(left, right)`, `None` for a value node.
    pub fn children(&self) -> Option<(&Ast, &Ast)> {
        match self {
            Node::Value(_) => None,
            Node::BinOp { left, right, .. } => Some((left, right)),
        }
    }
}

/// Returns `true` if both handles point to the same allocation.
///
/// This is the identity the traversal uses to decide whether a subtree changed.
pub fn same(a: &Ast, b: &Ast) -> bool {
    Arc::ptr_eq(a, b)
}

/// Value leaf.
pub fn num(value: Value) -> Ast {
    Node::value(value)
}

/// Binary node with an arbitrary operator.
pub fn bin_op(op: impl Into<Op>, left: Ast, right: Ast) -> Ast {
    Node::bin_op(op, left, right)
}

pub fn plus(left: Ast, right: Ast) -> Ast {
    Node::bin_op(Op::ADD, left, right)
}

pub fn sub(left: Ast, right: Ast) -> Ast {
    Node::bin_op(Op::SUB, left, right)
}

pub fn mul(left: Ast, right: Ast) -> Ast {
    Node::bin_op(Op::MUL, left, right)
}

pub fn div(left: Ast, right: Ast) -> Ast {
    Node::bin_op(Op::DIV, left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_node() {
        let n = num(7);
        assert_eq!(n.kind(), NodeKind::Value);
        assert!(n.is_value());
        assert!(!n.is_bin_op());
        assert_eq!(n.as_value(), Some(7));
        assert_eq!(n.op(), None);
        assert!(n.left().is_none());
        assert!(n.right().is_none());
    }

    #[test]
    fn test_bin_op_node() {
        let a = num(1);
        let b = num(2);
        let n = plus(a.clone(), b.clone());
        assert_eq!(n.kind(), NodeKind::BinOp);
        assert!(n.is_bin_op());
        assert_eq!(n.as_value(), None);
        assert_eq!(n.op(), Some(&Op::ADD));
        assert!(same(n.left().unwrap(), &a));
        assert!(same(n.right().unwrap(), &b));
        let (l, r) = n.children().unwrap();
        assert!(same(l, &a) && same(r, &b));
        assert!(a.children().is_none());
    }

    #[test]
    fn test_custom_op() {
        let n = bin_op("max", num(1), num(2));
        assert_eq!(n.op().map(Op::symbol), Some("max"));
        let n = bin_op(String::from("min"), num(1), num(2));
        assert_eq!(n.op().map(Op::symbol), Some("min"));
    }

    #[test]
    fn test_same_is_identity_not_equality() {
        let a = num(1);
        let b = num(1);
        assert_eq!(a, b);
        assert!(!same(&a, &b));
        assert!(same(&a, &a.clone()));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NodeKind::Value.to_string(), "value");
        assert_eq!(NodeKind::BinOp.to_string(), "binop");
    }
}
