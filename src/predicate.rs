//! Node predicates and their combinators.
//!
//! A [`Predicate`] is a cheap-to-clone boolean function over a [`Node`]. Predicates compose
//! with [`and`], [`or`], [`not`] and the neutral [`always`], or equivalently with the `&`,
//! `|` and `!` operators:
//!
//! ```
//! use ast_rewrite::node::{num, plus, Op};
//! use ast_rewrite::predicate::{has_op, has_value};
//! use ast_rewrite::within::match_within;
//!
//! // A `+` node that does not have a `2` directly below it.
//! let p = has_op(Op::ADD) & !match_within(has_value(2));
//!
//! assert!(p.test(&plus(num(1), num(3))));
//! assert!(!p.test(&plus(num(1), num(2))));
//! assert!(!p.test(&num(1)));
//! ```
//!
//! `and` and `or` short-circuit: the second operand is not evaluated when the first one
//! already decides the result.

use std::fmt::{Debug, Formatter};
use std::ops::{BitAnd, BitOr, Not};
use std::sync::Arc;

use crate::node::{Node, Op, Value};

/// Boolean function over a node.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Node) -> bool + Send + Sync>);

impl Predicate {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Node) -> bool + Send + Sync + 'static,
    {
        Predicate(Arc::new(f))
    }

    /// Evaluates the predicate on `node`.
    pub fn test(&self, node: &Node) -> bool {
        (self.0)(node)
    }
}

impl Debug for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// `p1(node) && p2(node)`. `p2` is not called when `p1` is false.
pub fn and(p1: Predicate, p2: Predicate) -> Predicate {
    Predicate::new(move |node| p1.test(node) && p2.test(node))
}

/// `p1(node) || p2(node)`. `p2` is not called when `p1` is true.
pub fn or(p1: Predicate, p2: Predicate) -> Predicate {
    Predicate::new(move |node| p1.test(node) || p2.test(node))
}

/// `!p(node)`.
pub fn not(p: Predicate) -> Predicate {
    Predicate::new(move |node| !p.test(node))
}

/// True for every node.
pub fn always() -> Predicate {
    Predicate::new(|_| true)
}

/// False for every node.
pub fn never() -> Predicate {
    Predicate::new(|_| false)
}

impl BitAnd for Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        and(self, rhs)
    }
}

impl BitOr for Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        or(self, rhs)
    }
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        not(self)
    }
}

// Node predicates

/// Matches value leaves.
pub fn is_value() -> Predicate {
    Predicate::new(Node::is_value)
}

/// Matches binary nodes.
pub fn is_bin_op() -> Predicate {
    Predicate::new(Node::is_bin_op)
}

/// Matches a value leaf holding exactly `value`.
pub fn has_value(value: Value) -> Predicate {
    and(
        is_value(),
        Predicate::new(move |node| node.as_value() == Some(value)),
    )
}

/// Matches a binary node with operator `op`.
pub fn has_op(op: impl Into<Op>) -> Predicate {
    let op = op.into();
    and(
        is_bin_op(),
        Predicate::new(move |node| node.op() == Some(&op)),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use test_log::test;

    use super::*;
    use crate::node::{mul, num, plus, sub, Ast};

    fn samples() -> Vec<Ast> {
        vec![
            num(0),
            num(2),
            num(-7),
            plus(num(1), num(2)),
            mul(plus(num(1), num(2)), num(3)),
            sub(num(2), num(2)),
        ]
    }

    fn counting(result: bool, counter: Arc<AtomicUsize>) -> Predicate {
        Predicate::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            result
        })
    }

    #[test]
    fn test_always_and_never() {
        for node in samples() {
            assert!(always().test(&node));
            assert!(!never().test(&node));
        }
    }

    #[test]
    fn test_and_with_always_is_identity() {
        let p = has_value(2);
        let q = and(always(), p.clone());
        for node in samples() {
            assert_eq!(q.test(&node), p.test(&node), "node = {}", node);
        }
    }

    #[test]
    fn test_or_with_always_is_always() {
        let q = or(always(), has_value(2));
        for node in samples() {
            assert!(q.test(&node), "node = {}", node);
        }
    }

    #[test]
    fn test_double_negation() {
        let p = has_op("+");
        let q = not(not(p.clone()));
        for node in samples() {
            assert_eq!(q.test(&node), p.test(&node), "node = {}", node);
        }
    }

    #[test]
    fn test_and_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let p = and(never(), counting(true, calls.clone()));
        assert!(!p.test(&num(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let p = and(always(), counting(true, calls.clone()));
        assert!(p.test(&num(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_or_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let p = or(always(), counting(false, calls.clone()));
        assert!(p.test(&num(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let p = or(never(), counting(false, calls.clone()));
        assert!(!p.test(&num(1)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_and_does_not_call_panicking_second() {
        let boom = Predicate::new(|_| panic!("second predicate must not be called"));
        assert!(!and(never(), boom.clone()).test(&num(1)));
        assert!(or(always(), boom).test(&num(1)));
    }

    #[test]
    fn test_operators_match_functions() {
        let p = is_value();
        let q = has_value(2);
        let both = p.clone() & q.clone();
        let either = p.clone() | q.clone();
        let neither = !(p.clone() | q.clone());
        for node in samples() {
            assert_eq!(both.test(&node), p.test(&node) && q.test(&node));
            assert_eq!(either.test(&node), p.test(&node) || q.test(&node));
            assert_eq!(neither.test(&node), !either.test(&node));
        }
    }

    #[test]
    fn test_node_predicates() {
        assert!(is_value().test(&num(1)));
        assert!(!is_value().test(&plus(num(1), num(2))));
        assert!(is_bin_op().test(&plus(num(1), num(2))));
        assert!(!is_bin_op().test(&num(1)));

        assert!(has_value(2).test(&num(2)));
        assert!(!has_value(2).test(&num(3)));
        assert!(!has_value(2).test(&plus(num(2), num(2))));

        assert!(has_op("+").test(&plus(num(1), num(2))));
        assert!(has_op(Op::MUL).test(&mul(num(1), num(2))));
        assert!(!has_op("+").test(&mul(num(1), num(2))));
        assert!(!has_op("+").test(&num(1)));
    }

    #[test]
    fn test_nested_compound() {
        let p = and(has_op("+"), and(not(has_value(2)), not(has_op("*"))));
        assert!(p.test(&plus(num(1), num(2))));
        assert!(!p.test(&mul(num(1), num(2))));
        assert!(!p.test(&num(2)));
    }
}
