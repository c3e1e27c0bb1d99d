//! Public suffix resolution.
//!
//! [`PublicSuffixList`] owns an immutable [`RuleTree`] and answers "what is
//! the public suffix of this host" and "is this host itself a public
//! suffix". Lookups only read the tree, so a list can be shared between
//! threads without locking.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{RegDomError, Result};
use crate::idn::{Idna, Uts46};
use crate::normalize::NormalizedHost;
use crate::parser::{parse_rules, parse_rules_from_file};
use crate::tree::{RuleTree, SuffixMatch};
use crate::types::{Metadata, Rule};

/// Public suffix list options.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Treat an unlisted TLD as a public suffix (the implicit `*` rule)
    pub implicit_wildcard: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            implicit_wildcard: true,
        }
    }
}

impl ListOptions {
    /// Create new list options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the implicit `*` rule.
    pub fn with_implicit_wildcard(mut self, enabled: bool) -> Self {
        self.implicit_wildcard = enabled;
        self
    }
}

/// A host resolved against the list
#[derive(Debug, Clone)]
pub(crate) struct Resolved {
    /// ASCII host, dots trimmed
    pub ascii: String,
    /// Number of labels in `ascii`
    pub labels: usize,
    /// Number of trailing labels forming the public suffix
    pub suffix: usize,
}

impl Resolved {
    pub fn suffix(&self) -> &str {
        tail_labels(&self.ascii, self.suffix)
    }

    pub fn is_public_suffix(&self) -> bool {
        self.suffix == self.labels
    }
}

/// Public suffix list backed by an immutable rule tree
pub struct PublicSuffixList {
    tree: RuleTree,
    idna: Arc<dyn Idna>,
    implicit_wildcard: bool,
}

impl fmt::Debug for PublicSuffixList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicSuffixList")
            .field("rule_counts", &self.tree.counts())
            .field("implicit_wildcard", &self.implicit_wildcard)
            .finish()
    }
}

impl PublicSuffixList {
    /// Create a list from rules with default options.
    pub fn new(rules: &[Rule]) -> Self {
        Self::with_options(rules, ListOptions::default())
    }

    /// Create a list from rules.
    pub fn with_options(rules: &[Rule], options: ListOptions) -> Self {
        Self::from_tree(RuleTree::new(rules), options)
    }

    /// Create a list around an already built tree.
    pub fn from_tree(tree: RuleTree, options: ListOptions) -> Self {
        let counts = tree.counts();
        tracing::debug!(
            normal = counts.normal,
            wildcard = counts.wildcard,
            exception = counts.exception,
            "Built public suffix tree"
        );

        Self {
            tree,
            idna: Arc::new(Uts46),
            implicit_wildcard: options.implicit_wildcard,
        }
    }

    /// Parse a list from suffix list text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::new(&parse_rules(text)?))
    }

    /// Load a list from a suffix list file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(&parse_rules_from_file(path)?))
    }

    /// Replace the IDNA converter.
    pub fn with_idna(mut self, idna: impl Idna + 'static) -> Self {
        self.idna = Arc::new(idna);
        self
    }

    /// The underlying rule tree
    pub fn tree(&self) -> &RuleTree {
        &self.tree
    }

    /// The IDNA converter in use
    pub fn idna(&self) -> &dyn Idna {
        self.idna.as_ref()
    }

    /// Check if `host` is itself a public suffix.
    pub fn is_public_suffix(&self, host: &str) -> bool {
        self.resolve(host).is_some_and(|r| r.is_public_suffix())
    }

    /// Get the public suffix of `host` in ASCII form.
    ///
    /// Returns `None` for empty input, IP literals, and (with the implicit
    /// rule disabled) hosts whose TLD is not listed.
    pub fn public_suffix(&self, host: &str) -> Option<String> {
        self.resolve(host).map(|r| r.suffix().to_string())
    }

    /// Check if `host` is the subject of an exception rule, like `www.ck`.
    pub fn is_exception(&self, host: &str) -> bool {
        let host = NormalizedHost::new(host, self.idna());
        if host.is_empty() || host.is_ip_literal() {
            return false;
        }
        self.tree
            .is_exception(host.ascii().trim_start_matches('.').split('.'))
    }

    /// Diagnostic information about the loaded rules
    pub fn metadata(&self) -> Metadata {
        Metadata {
            rule_counts: self.tree.counts(),
        }
    }

    pub(crate) fn resolve(&self, host: &str) -> Option<Resolved> {
        let host = NormalizedHost::new(host, self.idna());
        if host.is_ip_literal() {
            return None;
        }

        let ascii = host.ascii().trim_start_matches('.');
        if ascii.is_empty() {
            return None;
        }

        let suffix = self.suffix_len(ascii)?;
        Some(Resolved {
            ascii: ascii.to_string(),
            labels: ascii.split('.').count(),
            suffix,
        })
    }

    fn suffix_len(&self, ascii: &str) -> Option<usize> {
        match self.tree.match_labels(ascii.split('.')) {
            SuffixMatch::Rule(len) => Some(len),
            SuffixMatch::Unlisted if self.implicit_wildcard => Some(1),
            SuffixMatch::Unlisted => None,
        }
    }
}

impl FromStr for PublicSuffixList {
    type Err = RegDomError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// The last `n` dot-separated labels of `host`.
pub(crate) fn tail_labels(host: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match host.rmatch_indices('.').nth(n - 1) {
        Some((idx, _)) => &host[idx + 1..],
        None => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idn::NilIdna;

    const RULES: &str = "\
com
uk
co.uk
jp
*.kawasaki.jp
!city.kawasaki.jp
*.ck
!www.ck
cn
com.cn
公司.cn
";

    fn list() -> PublicSuffixList {
        RULES.parse().unwrap()
    }

    #[test]
    fn test_tail_labels() {
        assert_eq!(tail_labels("a.b.c", 0), "");
        assert_eq!(tail_labels("a.b.c", 1), "c");
        assert_eq!(tail_labels("a.b.c", 2), "b.c");
        assert_eq!(tail_labels("a.b.c", 3), "a.b.c");
        assert_eq!(tail_labels("a.b.c", 4), "a.b.c");
    }

    #[test]
    fn test_public_suffix() {
        let psl = list();
        assert_eq!(psl.public_suffix("example.com").as_deref(), Some("com"));
        assert_eq!(psl.public_suffix("www.example.co.uk").as_deref(), Some("co.uk"));
        assert_eq!(psl.public_suffix("com").as_deref(), Some("com"));
        assert_eq!(psl.public_suffix("sub.something.ck").as_deref(), Some("something.ck"));
    }

    #[test]
    fn test_public_suffix_exceptions() {
        let psl = list();
        assert_eq!(psl.public_suffix("sub.city.kawasaki.jp").as_deref(), Some("kawasaki.jp"));
        assert_eq!(psl.public_suffix("city.kawasaki.jp").as_deref(), Some("kawasaki.jp"));
        assert_eq!(psl.public_suffix("sub.www.ck").as_deref(), Some("ck"));
        assert_eq!(psl.public_suffix("www.ck").as_deref(), Some("ck"));
    }

    #[test]
    fn test_public_suffix_absent() {
        let psl = list();
        assert_eq!(psl.public_suffix(""), None);
        assert_eq!(psl.public_suffix("..."), None);
        assert_eq!(psl.public_suffix("192.168.1.1"), None);
        assert_eq!(psl.public_suffix("[::1]:443"), None);
        assert_eq!(psl.public_suffix("https://bad host.com/x"), None);
        assert!(!psl.is_public_suffix("https://exa<mple.com/"));
    }

    #[test]
    fn test_implicit_wildcard() {
        let psl = list();
        assert_eq!(psl.public_suffix("example.example").as_deref(), Some("example"));
        assert_eq!(psl.public_suffix("localhost").as_deref(), Some("localhost"));
        assert!(psl.is_public_suffix("localhost"));

        let strict = PublicSuffixList::with_options(
            &parse_rules(RULES).unwrap(),
            ListOptions::new().with_implicit_wildcard(false),
        );
        assert_eq!(strict.public_suffix("example.example"), None);
        assert!(!strict.is_public_suffix("localhost"));
        assert_eq!(strict.public_suffix("example.com").as_deref(), Some("com"));
    }

    #[test]
    fn test_is_public_suffix() {
        let psl = list();
        assert!(psl.is_public_suffix("com"));
        assert!(psl.is_public_suffix("co.uk"));
        assert!(psl.is_public_suffix("anything.ck"));
        assert!(psl.is_public_suffix(".com."));
        assert!(psl.is_public_suffix("COM"));
        assert!(!psl.is_public_suffix("example.com"));
        assert!(!psl.is_public_suffix("www.ck"));
        assert!(!psl.is_public_suffix(""));
        assert!(!psl.is_public_suffix("127.0.0.1"));
    }

    #[test]
    fn test_idn_hosts() {
        let psl = list();
        assert_eq!(psl.public_suffix("test.公司.cn").as_deref(), Some("xn--55qx5d.cn"));
        assert_eq!(psl.public_suffix("test.xn--55qx5d.cn").as_deref(), Some("xn--55qx5d.cn"));
        assert_eq!(psl.public_suffix("公司.cn"), psl.public_suffix("xn--55qx5d.cn"));
        assert!(psl.is_public_suffix("公司.cn"));
        assert!(psl.is_public_suffix("xn--55qx5d.cn"));
        assert!(!psl.is_public_suffix("test.公司.cn"));
    }

    #[test]
    fn test_nil_idna_still_matches_punycode() {
        let psl = list().with_idna(NilIdna);
        assert!(psl.is_public_suffix("xn--55qx5d.cn"));
        // Without conversion the Unicode label is unknown below cn
        assert_eq!(psl.public_suffix("公司.cn").as_deref(), Some("cn"));
    }

    #[test]
    fn test_is_exception() {
        let psl = list();
        assert!(psl.is_exception("www.ck"));
        assert!(psl.is_exception("WWW.CK."));
        assert!(psl.is_exception("city.kawasaki.jp"));
        assert!(!psl.is_exception("com"));
        assert!(!psl.is_exception("example.com"));
        assert!(!psl.is_exception(""));
    }

    #[test]
    fn test_metadata() {
        let counts = list().metadata().rule_counts;
        assert_eq!(counts.normal, 7);
        assert_eq!(counts.wildcard, 2);
        assert_eq!(counts.exception, 2);
    }

    #[test]
    fn test_shared_between_threads() {
        let psl = list();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        assert_eq!(psl.public_suffix("a.b.example.co.uk").as_deref(), Some("co.uk"));
                        assert_eq!(psl.public_suffix("sub.www.ck").as_deref(), Some("ck"));
                    }
                });
            }
        });
    }

    #[test]
    fn test_parse_error_propagates() {
        let result = "com\n*.*.bad".parse::<PublicSuffixList>();
        assert!(result.is_err());
    }
}
