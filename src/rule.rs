//! Rewrite rules and their application at a single node.
//!
//! A [`Rule`] pairs a matcher [`Predicate`] with a transform. A [`RuleSet`] is an ordered list
//! of rules applied by sequential folding: every rule receives the output of the previous
//! one, so several rules may fire on the same position and order changes the outcome.
//!
//! ```
//! use ast_rewrite::node::num;
//! use ast_rewrite::predicate::has_value;
//! use ast_rewrite::rule::{apply_rule_set, Rule};
//!
//! let inc_two = Rule::new(has_value(2), |n| num(n.as_value().unwrap() + 1));
//! let dec_three = Rule::new(has_value(3), |n| num(n.as_value().unwrap() - 4));
//!
//! // 2 -> 3 -> -1: the second rule sees the first rule's output.
//! let out = apply_rule_set(&[inc_two.clone(), dec_three.clone()], num(2));
//! assert_eq!(out.as_value(), Some(-1));
//!
//! // Reversed, only the first step fires.
//! let out = apply_rule_set(&[dec_three, inc_two], num(2));
//! assert_eq!(out.as_value(), Some(3));
//! ```

use std::borrow::Cow;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use log::debug;

use crate::node::{Ast, Node};
use crate::predicate::Predicate;

/// Node-to-node rewrite function.
pub type Transform = Arc<dyn Fn(&Ast) -> Ast + Send + Sync>;

/// Conditional rewrite: `transform` is applied to nodes accepted by `matcher`.
#[derive(Clone)]
pub struct Rule {
    name: Option<Cow<'static, str>>,
    matcher: Predicate,
    transform: Transform,
}

impl Rule {
    pub fn new<F>(matcher: Predicate, transform: F) -> Self
    where
        F: Fn(&Ast) -> Ast + Send + Sync + 'static,
    {
        Self {
            name: None,
            matcher,
            transform: Arc::new(transform),
        }
    }

    /// Same as [`Rule::new`], with a name that shows up in log output.
    pub fn named<F>(name: impl Into<Cow<'static, str>>, matcher: Predicate, transform: F) -> Self
    where
        F: Fn(&Ast) -> Ast + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            ..Self::new(matcher, transform)
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn matcher(&self) -> &Predicate {
        &self.matcher
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.matcher.test(node)
    }

    /// Applies the transform unconditionally.
    pub fn transform(&self, node: &Ast) -> Ast {
        (self.transform)(node)
    }
}

impl Debug for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// Returns `rule.transform(node)` if the rule matches, or `node` itself otherwise.
pub fn apply_if_matches(rule: &Rule, node: Ast) -> Ast {
    if rule.matches(&node) {
        debug!(
            "rule {} matched {}",
            rule.name().unwrap_or("<anonymous>"),
            node
        );
        rule.transform(&node)
    } else {
        node
    }
}

/// Folds `node` through `rules` in order, each rule seeing the previous rule's output.
pub fn apply_rule_set(rules: &[Rule], node: Ast) -> Ast {
    rules
        .iter()
        .fold(node, |acc, rule| apply_if_matches(rule, acc))
}

/// Ordered sequence of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `rule`, builder style.
    pub fn with(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// What the traversal does at each position, once the children are final.
pub trait Apply {
    fn apply(&self, node: Ast) -> Ast;
}

impl Apply for Rule {
    fn apply(&self, node: Ast) -> Ast {
        apply_if_matches(self, node)
    }
}

impl Apply for [Rule] {
    fn apply(&self, node: Ast) -> Ast {
        apply_rule_set(self, node)
    }
}

impl Apply for RuleSet {
    fn apply(&self, node: Ast) -> Ast {
        apply_rule_set(&self.rules, node)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::node::{num, plus, same, sub};
    use crate::predicate::{always, has_value, is_bin_op, is_value, never};

    fn add(delta: i64) -> impl Fn(&Ast) -> Ast + Send + Sync + 'static {
        move |node: &Ast| num(node.as_value().unwrap() + delta)
    }

    #[test]
    fn test_apply_if_matches_transforms() {
        let rule = Rule::new(is_value(), add(10));
        let out = apply_if_matches(&rule, num(1));
        assert_eq!(out.as_value(), Some(11));
    }

    #[test]
    fn test_apply_if_matches_passthrough_is_same_node() {
        let rule = Rule::new(never(), |_| panic!("transform must not be called"));
        let node = plus(num(1), num(2));
        let out = apply_if_matches(&rule, node.clone());
        assert!(same(&out, &node));
    }

    #[test]
    fn test_transform_may_change_kind() {
        let collapse = Rule::new(is_bin_op(), |node| node.left().unwrap().clone());
        let node = plus(num(1), num(2));
        let out = apply_if_matches(&collapse, node.clone());
        assert!(same(&out, node.left().unwrap()));

        let expand = Rule::new(is_value(), |node| sub(node.clone(), num(0)));
        let out = apply_if_matches(&expand, num(4));
        assert_eq!(out.to_string(), "4 - 0");
    }

    #[test]
    fn test_rule_set_chains() {
        let rules = [
            Rule::new(has_value(2), add(1)),
            Rule::new(has_value(3), add(-4)),
        ];
        assert_eq!(apply_rule_set(&rules, num(2)).as_value(), Some(-1));
        assert_eq!(apply_rule_set(&rules, num(3)).as_value(), Some(-1));
        assert_eq!(apply_rule_set(&rules, num(7)).as_value(), Some(7));
    }

    #[test]
    fn test_rule_set_is_not_first_match_wins() {
        let rules = [Rule::new(always(), add(1)), Rule::new(always(), add(1))];
        assert_eq!(apply_rule_set(&rules, num(0)).as_value(), Some(2));
    }

    #[test]
    fn test_rule_set_order_matters() {
        let r1 = Rule::new(is_value(), |n| num(n.as_value().unwrap() * 2));
        let r2 = Rule::new(is_value(), add(1));
        let forward = apply_rule_set(&[r1.clone(), r2.clone()], num(5));
        let backward = apply_rule_set(&[r2, r1], num(5));
        assert_eq!(forward.as_value(), Some(11));
        assert_eq!(backward.as_value(), Some(12));
    }

    #[test]
    fn test_empty_rule_set_is_identity() {
        let node = num(5);
        let out = apply_rule_set(&[], node.clone());
        assert!(same(&out, &node));
    }

    #[test]
    fn test_apply_strategies_agree() {
        let rule = Rule::new(has_value(2), add(1));
        let set = RuleSet::new().with(rule.clone());
        let slice: &[Rule] = std::slice::from_ref(&rule);
        for value in [1, 2, 3] {
            let a = rule.apply(num(value));
            let b = set.apply(num(value));
            let c = slice.apply(num(value));
            assert_eq!(a, b);
            assert_eq!(b, c);
        }
    }

    #[test]
    fn test_rule_set_collections() {
        let mut set: RuleSet = vec![Rule::new(always(), add(0))].into();
        assert_eq!(set.len(), 1);
        set.push(Rule::named("inc", always(), add(1)));
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        let names: Vec<_> = set.iter().map(Rule::name).collect();
        assert_eq!(names, vec![None, Some("inc")]);

        let collected: RuleSet = set.rules().iter().cloned().collect();
        assert_eq!(collected.len(), 2);
        assert!(RuleSet::new().is_empty());
    }

    #[test]
    fn test_rule_debug() {
        let rule = Rule::named("double", is_value(), add(0));
        assert_eq!(format!("{:?}", rule), "Rule { name: Some(\"double\"), .. }");
    }
}
