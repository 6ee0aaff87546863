//! Debug utilities for inspecting expression trees.
//!
//! This module provides helpers for exploring trees and checking how much structure a
//! rewrite reused. These are primarily useful in tests and during development.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::node::{Ast, Node};

/// Size information about a single tree.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct TreeStats {
    /// Number of value leaves, counted per occurrence
    pub values: usize,
    /// Number of binary nodes, counted per occurrence
    pub bin_ops: usize,
    /// Number of distinct allocations reachable from the root
    pub unique: usize,
    /// Length of the longest root-to-leaf path, in nodes
    pub height: usize,
}

impl TreeStats {
    /// Total node count, per occurrence.
    pub fn nodes(&self) -> usize {
        self.values + self.bin_ops
    }
}

impl Display for TreeStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "nodes={} (values={}, binops={}), unique={}, height={}",
            self.nodes(),
            self.values,
            self.bin_ops,
            self.unique,
            self.height
        )
    }
}

/// Computes [`TreeStats`] for `ast`.
pub fn tree_stats(ast: &Ast) -> TreeStats {
    fn go(node: &Ast, seen: &mut HashSet<*const Node>, stats: &mut TreeStats) -> usize {
        seen.insert(Arc::as_ptr(node));
        match &**node {
            Node::Value(_) => {
                stats.values += 1;
                1
            }
            Node::BinOp { left, right, .. } => {
                stats.bin_ops += 1;
                let l = go(left, seen, stats);
                let r = go(right, seen, stats);
                1 + l.max(r)
            }
        }
    }

    let mut seen = HashSet::new();
    let mut stats = TreeStats::default();
    let height = go(ast, &mut seen, &mut stats);
    stats.height = height;
    stats.unique = seen.len();
    stats
}

/// Counts the nodes of `after` that are the very same allocation as some node of `before`.
///
/// After a rewrite, this is the number of nodes the result reused from the input.
pub fn shared_nodes(before: &Ast, after: &Ast) -> usize {
    fn collect(node: &Ast, out: &mut HashSet<*const Node>) {
        if !out.insert(Arc::as_ptr(node)) {
            return;
        }
        match &**node {
            Node::Value(_) => {}
            Node::BinOp { left, right, .. } => {
                collect(left, out);
                collect(right, out);
            }
        }
    }

    fn count(node: &Ast, known: &HashSet<*const Node>, seen: &mut HashSet<*const Node>) -> usize {
        let key = Arc::as_ptr(node);
        if !seen.insert(key) {
            return 0;
        }
        let here = usize::from(known.contains(&key));
        match &**node {
            Node::Value(_) => here,
            Node::BinOp { left, right, .. } => {
                here + count(left, known, seen) + count(right, known, seen)
            }
        }
    }

    let mut known = HashSet::new();
    collect(before, &mut known);
    count(after, &known, &mut HashSet::new())
}

/// Indented, one-node-per-line rendering of a tree.
#[derive(Debug, Clone)]
pub struct DebugTree<'a> {
    pub root: &'a Ast,
}

impl Display for DebugTree<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn go(f: &mut Formatter<'_>, node: &Ast, depth: usize) -> std::fmt::Result {
            let indent = depth * 2;
            match &**node {
                Node::Value(value) => writeln!(f, "{:indent$}{}", "", value),
                Node::BinOp { op, left, right } => {
                    writeln!(f, "{:indent$}{}", "", op)?;
                    go(f, left, depth + 1)?;
                    go(f, right, depth + 1)
                }
            }
        }

        go(f, self.root, 0)
    }
}

/// Wraps `ast` for indented display.
pub fn debug_tree(ast: &Ast) -> DebugTree<'_> {
    DebugTree { root: ast }
}
