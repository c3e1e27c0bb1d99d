use std::fmt;

use serde::Serialize;

/// Kind of a suffix list rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Plain rule: "co.uk"
    Normal,
    /// Wildcard rule, leftmost label is `*`: "*.ck"
    Wildcard,
    /// Exception rule, written with a leading `!`: "!www.ck"
    Exception,
}

/// A single validated suffix list rule.
///
/// Labels are lowercase ASCII (non-ASCII labels are stored as punycode) and
/// kept left-to-right as written. A wildcard rule keeps its `*` label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    labels: Vec<String>,
    kind: RuleKind,
}

impl Rule {
    /// Build a rule from already-converted ASCII labels.
    ///
    /// Returns `None` when the labels do not form a valid rule of `kind`:
    /// empty labels, a `*` anywhere but the leftmost label of a wildcard
    /// rule, or an exception rule with fewer than two labels.
    pub fn new(labels: Vec<String>, kind: RuleKind) -> Option<Self> {
        if labels.is_empty() || labels.iter().any(|l| l.is_empty()) {
            return None;
        }

        let stars = labels.iter().filter(|l| l.contains('*')).count();
        let valid = match kind {
            RuleKind::Normal => stars == 0,
            RuleKind::Wildcard => stars == 1 && labels[0] == "*",
            RuleKind::Exception => stars == 0 && labels.len() >= 2,
        };
        if !valid {
            return None;
        }

        let labels = labels.into_iter().map(|l| l.to_ascii_lowercase()).collect();
        Some(Self { labels, kind })
    }

    /// Labels left-to-right, as written in the list
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Rule kind
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Labels that form a path in the rule tree (without the wildcard `*`).
    pub(crate) fn path(&self) -> &[String] {
        match self.kind {
            RuleKind::Wildcard => &self.labels[1..],
            _ => &self.labels,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == RuleKind::Exception {
            f.write_str("!")?;
        }
        f.write_str(&self.labels.join("."))
    }
}

/// Number of rules of each kind held by a rule tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RuleCounts {
    pub normal: usize,
    pub wildcard: usize,
    pub exception: usize,
}

impl RuleCounts {
    /// Total number of distinct rules
    pub fn total(&self) -> usize {
        self.normal + self.wildcard + self.exception
    }
}

/// Diagnostic information about a loaded suffix list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub rule_counts: RuleCounts,
}
