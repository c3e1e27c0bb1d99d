//! Suffix rule tree.
//!
//! An arena-backed trie keyed by domain label and rooted at the TLD. Rules
//! are inserted right-to-left (`co.uk` adds edge `uk`, then `co` below it).
//! Once built the tree is never mutated, so lookups need no locking.

use std::collections::HashMap;

use crate::types::{Rule, RuleCounts, RuleKind};

const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct Node {
    children: HashMap<Box<str>, usize>,
    /// A normal rule ends here
    terminal: bool,
    /// Any single label below this node is a suffix label
    wildcard: bool,
    /// An exception rule ends here
    exception: bool,
}

/// Outcome of matching a host against the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixMatch {
    /// A listed rule matched; the suffix has this many labels
    Rule(usize),
    /// No rule matched the host's TLD
    Unlisted,
}

/// Immutable public suffix rule tree
#[derive(Debug, Clone)]
pub struct RuleTree {
    nodes: Vec<Node>,
}

impl Default for RuleTree {
    fn default() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }
}

impl RuleTree {
    /// Build a tree from rules. Order does not matter and duplicates are no-ops.
    pub fn new<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> Self {
        let mut tree = Self::default();
        for rule in rules {
            tree.insert(rule);
        }
        tree
    }

    fn insert(&mut self, rule: &Rule) {
        let mut current = ROOT;
        for label in rule.path().iter().rev() {
            current = match self.nodes[current].children.get(label.as_str()) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[current]
                        .children
                        .insert(label.as_str().into(), child);
                    child
                }
            };
        }

        let node = &mut self.nodes[current];
        match rule.kind() {
            RuleKind::Normal => node.terminal = true,
            RuleKind::Wildcard => node.wildcard = true,
            RuleKind::Exception => node.exception = true,
        }
    }

    /// Find the public suffix length for a host given its labels left to right.
    ///
    /// Labels must already be lowercase ASCII. Walks from the TLD, taking
    /// the deepest normal or wildcard match. Reaching an exception node stops
    /// the walk and yields the exception path minus its leftmost label.
    pub fn match_labels<'a, I>(&self, labels: I) -> SuffixMatch
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut current = ROOT;
        let mut best = None;

        for (depth, label) in labels.into_iter().rev().enumerate() {
            if label.is_empty() {
                break;
            }
            let node = &self.nodes[current];
            if node.wildcard {
                best = Some(depth + 1);
            }

            let Some(&child) = node.children.get(label) else {
                break;
            };
            let child_node = &self.nodes[child];
            if child_node.exception {
                return SuffixMatch::Rule(depth);
            }
            if child_node.terminal {
                best = Some(depth + 1);
            }
            current = child;
        }

        match best {
            Some(len) => SuffixMatch::Rule(len),
            None => SuffixMatch::Unlisted,
        }
    }

    /// Check whether the exact label path ends at an exception rule.
    pub fn is_exception<'a, I>(&self, labels: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut current = ROOT;
        let mut walked = false;
        for label in labels.into_iter().rev() {
            match self.nodes[current].children.get(label) {
                Some(&child) => current = child,
                None => return false,
            }
            walked = true;
        }
        walked && self.nodes[current].exception
    }

    /// Count the rules held by the tree.
    pub fn counts(&self) -> RuleCounts {
        self.nodes.iter().fold(RuleCounts::default(), |mut counts, node| {
            counts.normal += usize::from(node.terminal);
            counts.wildcard += usize::from(node.wildcard);
            counts.exception += usize::from(node.exception);
            counts
        })
    }

    /// Number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Rules held by the tree, in no particular order
    pub fn rules(&self) -> Vec<Rule> {
        let mut rules = Vec::new();
        let mut path = Vec::new();
        self.collect(ROOT, &mut path, &mut rules);
        rules
    }

    fn collect(&self, id: usize, path: &mut Vec<String>, out: &mut Vec<Rule>) {
        let node = &self.nodes[id];
        let labels = || path.iter().rev().cloned().collect::<Vec<_>>();

        if node.terminal {
            out.extend(Rule::new(labels(), RuleKind::Normal));
        }
        if node.wildcard {
            let mut wildcard = vec!["*".to_string()];
            wildcard.extend(labels());
            out.extend(Rule::new(wildcard, RuleKind::Wildcard));
        }
        if node.exception {
            out.extend(Rule::new(labels(), RuleKind::Exception));
        }

        for (label, &child) in &node.children {
            path.push(label.to_string());
            self.collect(child, path, out);
            path.pop();
        }
    }
}

impl<'a> FromIterator<&'a Rule> for RuleTree {
    fn from_iter<T: IntoIterator<Item = &'a Rule>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl PartialEq for RuleTree {
    fn eq(&self, other: &Self) -> bool {
        let mut ours = self.rules();
        let mut theirs = other.rules();
        ours.sort_by_key(|r| r.to_string());
        theirs.sort_by_key(|r| r.to_string());
        ours == theirs
    }
}

impl Eq for RuleTree {}
