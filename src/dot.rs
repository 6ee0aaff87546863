//! Expression tree to DOT (Graphviz) conversion.
//!
//! This module renders one or more trees as a directed graph, which can be visualized with
//! Graphviz tools like `dot` or online viewers.
//!
//! # DOT Format
//!
//! The generated DOT output follows these conventions:
//! - **Value nodes** are rendered as squares at the bottom (sink rank)
//! - **Binary nodes** are rendered as circles labeled with their operator
//! - **Edges**:
//!   - Solid lines point to the left operand
//!   - Dashed lines point to the right operand
//! - **Root nodes** are rendered as rectangles at the top (source rank), labeled with the
//!   flat rendering of their tree
//!
//! When [`DotConfig::share_subtrees`] is set (the default), a node reachable from several
//! places is drawn once. Rendering an input tree together with its rewrite result then shows
//! exactly which subtrees the rewrite reused.
//!
//! # Examples
//!
//! ```
//! use ast_rewrite::dot::to_dot;
//! use ast_rewrite::node::{mul, num, plus};
//! use ast_rewrite::predicate::has_value;
//! use ast_rewrite::rule::Rule;
//!
//! let ast = mul(plus(num(1), num(2)), num(3));
//! let out = Rule::new(has_value(3), |_| num(4)).rewrite(&ast);
//!
//! let dot = to_dot(&[ast, out]).unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::node::{Ast, Node};

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings.
///
/// # Examples
///
/// ```
/// use ast_rewrite::dot::{to_dot_with_config, DotConfig};
/// use ast_rewrite::node::{num, plus};
///
/// let config = DotConfig {
///     op_shape: "ellipse",
///     share_subtrees: false,
///     ..DotConfig::default()
/// };
///
/// let dot = to_dot_with_config(&[plus(num(1), num(2))], &config).unwrap();
/// assert!(dot.contains("shape=ellipse"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for binary nodes (default: "circle")
    pub op_shape: &'static str,
    /// Shape for value nodes (default: "square")
    pub value_shape: &'static str,
    /// Shape for root nodes (default: "rect")
    pub root_shape: &'static str,
    /// Style for edges to the left operand (default: "solid")
    pub left_edge_style: &'static str,
    /// Style for edges to the right operand (default: "dashed")
    pub right_edge_style: &'static str,
    /// Draw a node reachable from several places only once (default: true)
    pub share_subtrees: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            op_shape: "circle",
            value_shape: "square",
            root_shape: "rect",
            left_edge_style: "solid",
            right_edge_style: "dashed",
            share_subtrees: true,
        }
    }
}

/// Converts trees to DOT format with the default configuration.
///
/// # Returns
///
/// * `Ok(String)` - A DOT-formatted string
/// * `Err(std::fmt::Error)` - If string formatting fails (rare)
pub fn to_dot(roots: &[Ast]) -> Result<String, std::fmt::Error> {
    to_dot_with_config(roots, &DotConfig::default())
}

/// Converts trees to DOT format with custom configuration.
pub fn to_dot_with_config(roots: &[Ast], config: &DotConfig) -> Result<String, std::fmt::Error> {
    let mut writer = DotWriter {
        config,
        ids: HashMap::new(),
        next_id: 0,
        nodes: String::new(),
        values: String::new(),
        edges: String::new(),
    };

    let mut targets = Vec::with_capacity(roots.len());
    for root in roots {
        targets.push(writer.node(root)?);
    }

    let mut dot = String::new();
    writeln!(dot, "digraph {{")?;
    dot.push_str(&writer.nodes);

    // Values at the bottom
    writeln!(dot, "{{ rank=sink")?;
    dot.push_str(&writer.values);
    writeln!(dot, "}}")?;

    dot.push_str(&writer.edges);

    // Roots at the top
    writeln!(dot, "{{ rank=source")?;
    for (i, root) in roots.iter().enumerate() {
        writeln!(
            dot,
            "r{} [shape={}, label=\"{}\"];",
            i,
            config.root_shape,
            escape(&root.to_string())
        )?;
    }
    writeln!(dot, "}}")?;

    for (i, target) in targets.iter().enumerate() {
        writeln!(dot, "r{} -> n{};", i, target)?;
    }

    writeln!(dot, "}}")?;
    Ok(dot)
}

struct DotWriter<'a> {
    config: &'a DotConfig,
    ids: HashMap<*const Node, usize>,
    next_id: usize,
    nodes: String,
    values: String,
    edges: String,
}

impl DotWriter<'_> {
    fn node(&mut self, node: &Ast) -> Result<usize, std::fmt::Error> {
        let key = Arc::as_ptr(node);
        if self.config.share_subtrees {
            if let Some(&id) = self.ids.get(&key) {
                return Ok(id);
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(key, id);

        match &**node {
            Node::Value(value) => {
                writeln!(
                    self.values,
                    "n{} [label=\"{}\", shape={}];",
                    id, value, self.config.value_shape
                )?;
            }
            Node::BinOp { op, left, right } => {
                writeln!(
                    self.nodes,
                    "n{} [label=\"{}\", shape={}];",
                    id,
                    escape(op.symbol()),
                    self.config.op_shape
                )?;
                let left = self.node(left)?;
                let right = self.node(right)?;
                writeln!(
                    self.edges,
                    "n{} -> n{} [style={}];",
                    id, left, self.config.left_edge_style
                )?;
                writeln!(
                    self.edges,
                    "n{} -> n{} [style={}];",
                    id, right, self.config.right_edge_style
                )?;
            }
        }

        Ok(id)
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
