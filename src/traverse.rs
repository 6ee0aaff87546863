//! Bottom-up traversal.
//!
//! The walk is post-order: both children of a binary node are rewritten first, the node is
//! rebuilt only if one of them actually changed (by identity, see [`same`]), and then the
//! strategy is applied to it exactly once. Leaves get the strategy directly.
//!
//! A node produced by a transform is never offered to the rules again during the same pass.
//! Call the traversal again to continue rewriting.
//!
//! Every untouched subtree of the input is returned as-is, so the result shares structure with
//! the input and the input stays valid:
//!
//! ```
//! use ast_rewrite::node::{mul, num, plus, same};
//! use ast_rewrite::predicate::has_value;
//! use ast_rewrite::rule::Rule;
//!
//! let ast = mul(plus(num(1), num(2)), num(3));
//! let rule = Rule::new(has_value(3), |_| num(30));
//!
//! let out = rule.rewrite(&ast);
//! assert_eq!(out.to_string(), "1 + 2 * 30");
//! assert!(same(out.left().unwrap(), ast.left().unwrap()));
//! assert_eq!(ast.to_string(), "1 + 2 * 3");
//! ```

use std::sync::Arc;

use log::{debug, trace};

use crate::node::{same, Ast, Node};
use crate::rule::{Apply, Rule, RuleSet};

/// Rewrites `node` bottom-up, running `strategy` once at every position.
///
/// This is the only recursive walk in the crate; the single-rule and rule-set entry points
/// differ only in the strategy they pass.
pub fn rewrite_with<A>(strategy: &A, node: &Ast) -> Ast
where
    A: Apply + ?Sized,
{
    trace!("visit {}", node.kind());

    let node = match &**node {
        Node::BinOp { op, left, right } => {
            let new_left = rewrite_with(strategy, left);
            let new_right = rewrite_with(strategy, right);
            if same(left, &new_left) && same(right, &new_right) {
                Arc::clone(node)
            } else {
                debug!("rebuild {} with {} and {}", op, new_left, new_right);
                Node::bin_op(op.clone(), new_left, new_right)
            }
        }
        Node::Value(_) => Arc::clone(node),
    };

    strategy.apply(node)
}

/// Single-rule traversal, as a reusable function.
pub fn single_traverse(rule: &Rule) -> impl Fn(&Ast) -> Ast + '_ {
    move |node: &Ast| rewrite_with(rule, node)
}

/// Rule-set traversal, as a reusable function.
pub fn traverse(rules: &[Rule]) -> impl Fn(&Ast) -> Ast + '_ {
    move |node: &Ast| rewrite_with(rules, node)
}

impl Rule {
    /// One bottom-up pass of this rule over `ast`.
    pub fn rewrite(&self, ast: &Ast) -> Ast {
        rewrite_with(self, ast)
    }
}

impl RuleSet {
    /// One bottom-up pass of this rule set over `ast`.
    pub fn rewrite(&self, ast: &Ast) -> Ast {
        rewrite_with(self, ast)
    }
}
