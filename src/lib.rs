//! # ast-rewrite: Rule-based rewriting of expression trees
//!
//! **`ast-rewrite`** applies conditional rewrite rules to immutable expression trees in a
//! single bottom-up pass.
//!
//! ## Overview
//!
//! A tree is made of value leaves and binary operation nodes, shared through
//! [`Ast`][crate::node::Ast] handles. A [`Rule`][crate::rule::Rule] pairs a
//! [`Predicate`][crate::predicate::Predicate] with a transform; the traversal rewrites the
//! children of every node first, then offers the node to the rule (or rule set) exactly once.
//!
//! ## Key Features
//!
//! - **Persistent Trees**: Nodes are never mutated. Subtrees no rule touched come back as the
//!   same allocation, so "nothing changed" is observable by identity.
//! - **Predicate Algebra**: [`and`][crate::predicate::and], [`or`][crate::predicate::or],
//!   [`not`][crate::predicate::not] and [`always`][crate::predicate::always], plus
//!   [`match_within`][crate::within::match_within] to look one level below a node.
//! - **Sequential Rule Sets**: Rules in a set are folded in order, each one seeing the output of
//!   the previous one. It is not first-match-wins.
//! - **Single Pass**: A node produced by a transform is not rewritten again in the same pass.
//!
//! ## Basic Usage
//!
//! ```rust
//! use ast_rewrite::node::{mul, num, plus};
//! use ast_rewrite::predicate::{has_value, is_bin_op};
//! use ast_rewrite::rule::Rule;
//! use ast_rewrite::within::match_within;
//!
//! // 1. Build a tree: (1 + 2) * 3
//! let ast = mul(plus(num(1), num(2)), num(3));
//!
//! // 2. Describe a rule: a binary node with a 2 directly below it
//! //    becomes a leaf holding its left operand times 4.
//! let rule = Rule::new(is_bin_op() & match_within(has_value(2)), |node| {
//!     num(node.left().and_then(|l| l.as_value()).unwrap_or(0) * 4)
//! });
//!
//! // 3. Rewrite bottom-up
//! let result = rule.rewrite(&ast);
//! assert_eq!(result.to_string(), "4 * 3");
//!
//! // 4. The input is untouched
//! assert_eq!(ast.to_string(), "1 + 2 * 3");
//! ```
//!
//! ## Core Components
//!
//! - **[`node`]**: Tree nodes and construction helpers.
//! - **[`predicate`]**: Node predicates and combinators.
//! - **[`within`]**: Shallow-child matching.
//! - **[`rule`]**: Rules, rule sets, and their application at a single node.
//! - **[`traverse`]**: The bottom-up traversal.
//! - **[`dot`]**: Graphviz rendering.
//! - **[`debug`]**: Inspection helpers.

pub mod debug;
pub mod display;
pub mod dot;
pub mod node;
pub mod predicate;
pub mod rule;
pub mod traverse;
pub mod within;
