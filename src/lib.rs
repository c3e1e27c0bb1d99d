//! regdom - public suffix resolution for Rust
//!
//! This library answers three questions about a host name, using the
//! public suffix list:
//! - what is its public suffix (`co.uk`, `com`, `xn--55qx5d.cn`)
//! - what is its registrable domain (`example.co.uk`)
//! - may a cookie scoped to some domain be set for it
//!
//! Hosts may be given as bare names, URLs, `host:port` or bracketed IPv6
//! literals, in Unicode or punycode.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use regdom_r::{CookieDomainMatcher, PublicSuffixList, RegisteredDomain};
//!
//! let rules_text = "
//! // ===BEGIN ICANN DOMAINS===
//! com
//! uk
//! co.uk
//! *.ck
//! !www.ck
//! ";
//!
//! let psl: PublicSuffixList = rules_text.parse().unwrap();
//! assert_eq!(psl.public_suffix("www.example.co.uk").as_deref(), Some("co.uk"));
//! assert!(psl.is_public_suffix("anything.ck"));
//!
//! let psl = Arc::new(psl);
//! let extractor = RegisteredDomain::new(Arc::clone(&psl));
//! assert_eq!(extractor.registered_domain("sub.www.ck").as_deref(), Some("www.ck"));
//!
//! let cookies = CookieDomainMatcher::new(psl);
//! assert!(cookies.domain_matches("www.example.com", "example.com"));
//! assert!(!cookies.domain_matches("example.com", "com"));
//! ```
//!
//! # Rule Syntax
//!
//! | Rule | Example | Meaning |
//! |------|---------|---------|
//! | Normal | `co.uk` | `co.uk` is a public suffix |
//! | Wildcard | `*.ck` | every label below `ck` is a public suffix |
//! | Exception | `!www.ck` | `www.ck` is registrable despite `*.ck` |
//!
//! Lines starting with `//` are comments. A TLD with no rule at all is
//! still treated as a public suffix (the implicit `*` rule), unless
//! disabled through [`ListOptions`].

pub mod cookie;
pub mod error;
pub mod idn;
pub mod list;
pub mod normalize;
pub mod parser;
pub mod regdom;
pub mod registered;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use cookie::{CookieDomainMatcher, CookieOptions};
pub use error::{RegDomError, Result};
pub use idn::{Idna, NilIdna, Uts46};
pub use list::{ListOptions, PublicSuffixList};
pub use normalize::{is_ip_literal, normalize, NormalizedHost};
pub use parser::{parse_rules, parse_rules_from_file, parse_rules_lossy};
pub use regdom::RegDom;
pub use registered::{OutputForm, RegisteredDomain};
pub use tree::{RuleTree, SuffixMatch};
pub use types::{Metadata, Rule, RuleCounts, RuleKind};
