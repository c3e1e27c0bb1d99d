use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{RegDomError, Result};
use crate::idn::{Idna, Uts46};
use crate::types::{Rule, RuleKind};

/// Parse suffix list rules from text.
///
/// Lines starting with `//` and blank lines are skipped. A rule is the
/// first whitespace-delimited token of a line. Fails on the first malformed
/// line.
pub fn parse_rules(text: &str) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1; // 1-based line numbers

        if let Some(rule) = parse_line(line, line_num)? {
            rules.push(rule);
        }
    }

    Ok(rules)
}

/// Parse suffix list rules from text, skipping malformed lines.
pub fn parse_rules_lossy(text: &str) -> Vec<Rule> {
    let mut rules = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        match parse_line(line, line_num + 1) {
            Ok(Some(rule)) => rules.push(rule),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Skipping malformed suffix list line"),
        }
    }

    rules
}

/// Parse suffix list rules from a file.
pub fn parse_rules_from_file(path: impl AsRef<Path>) -> Result<Vec<Rule>> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_rules(&text)
}

/// Parse a single line; `None` for comments and blank lines.
fn parse_line(line: &str, line_num: usize) -> Result<Option<Rule>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") {
        return Ok(None);
    }

    // Rules end at the first whitespace
    let token = line.split_whitespace().next().unwrap_or(line);

    parse_single_rule(token)
        .map(Some)
        .map_err(|e| RegDomError::ParseErrorAtLine {
            line: line_num,
            message: e.to_string(),
        })
}

/// Parse one rule such as `co.uk`, `*.ck` or `!www.ck`.
fn parse_single_rule(token: &str) -> Result<Rule> {
    let (body, exception) = match token.strip_prefix('!') {
        Some(body) => (body, true),
        None => (token, false),
    };

    let mut labels = Vec::new();
    for label in body.split('.') {
        if label.is_ascii() {
            labels.push(label.to_ascii_lowercase());
            continue;
        }
        let ascii = Uts46.to_ascii(label);
        if !ascii.is_ascii() {
            return Err(RegDomError::InvalidRule(format!(
                "{token}: cannot convert label '{label}' to ASCII"
            )));
        }
        labels.push(ascii);
    }

    let kind = if exception {
        RuleKind::Exception
    } else if labels.first().is_some_and(|l| l == "*") {
        RuleKind::Wildcard
    } else {
        RuleKind::Normal
    };

    Rule::new(labels, kind).ok_or_else(|| RegDomError::InvalidRule(token.to_string()))
}

impl FromStr for Rule {
    type Err = RegDomError;

    fn from_str(s: &str) -> Result<Self> {
        parse_single_rule(s.trim())
    }
}
