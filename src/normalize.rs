//! Host normalization.
//!
//! Turns arbitrary input (bare host, URL, bracketed IPv6 literal,
//! `host:port`) into a lowercase host string with brackets, port and
//! trailing dots removed. Unicode is kept; ASCII conversion happens in
//! [`NormalizedHost`] or at the caller.

use std::net::IpAddr;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::idn::Idna;

/// `host:port`, where host has no other colon (bare IPv6 keeps its colons)
static PORT_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^:]*):[0-9]+$").expect("PORT_SUFFIX: hardcoded regex is invalid")
});

/// Normalize a host or URL for matching.
///
/// The result is idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let host = if input.contains('/') {
        match url_host(input) {
            Some(host) => host,
            None => return String::new(),
        }
    } else {
        input.to_string()
    };

    let mut host = host.to_lowercase().trim().to_string();
    loop {
        let next = strip_once(&host);
        if next.len() == host.len() {
            return host;
        }
        host = next.to_string();
    }
}

/// Extract the host component of a URL. Input without a `scheme://` is
/// retried as `http://`.
fn url_host(input: &str) -> Option<String> {
    let parsed = |s: &str| {
        Url::parse(s)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .filter(|h| !h.is_empty())
    };

    if input.contains("://") {
        return parsed(input);
    }
    parsed(input).or_else(|| {
        let rest = input.trim_start_matches('/');
        parsed(&format!("http://{rest}"))
    })
}

/// One round of bracket, trailing dot, port and whitespace stripping.
fn strip_once(host: &str) -> &str {
    let host = host.trim();

    if let Some(inner) = host.strip_prefix('[') {
        return match inner.find(']') {
            Some(end) => {
                let rest = &inner[end + 1..];
                if rest.is_empty() || is_port(rest) {
                    &inner[..end]
                } else {
                    host.trim_matches(|c: char| c == '[' || c == ']')
                }
            }
            None => inner,
        };
    }

    let host = host.trim_end_matches('.');
    match PORT_SUFFIX.captures(host) {
        Some(caps) => caps.get(1).map_or(host, |m| m.as_str()),
        None => host,
    }
}

fn is_port(s: &str) -> bool {
    s.strip_prefix(':')
        .is_some_and(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

/// Check whether `host` is an IPv4 or IPv6 literal (brackets allowed).
pub fn is_ip_literal(host: &str) -> bool {
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    host.parse::<IpAddr>().is_ok()
}

/// A normalized host in both its cleaned (possibly Unicode) and ASCII forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedHost {
    original: String,
    ascii: String,
}

impl NormalizedHost {
    /// Normalize `input` and convert it to ASCII with `idna`.
    pub fn new(input: &str, idna: &dyn Idna) -> Self {
        let original = normalize(input);
        let ascii = if original.is_empty() || is_ip_literal(&original) {
            original.clone()
        } else {
            idna.to_ascii(&original)
        };
        Self { original, ascii }
    }

    /// Cleaned input, Unicode preserved
    pub fn original(&self) -> &str {
        &self.original
    }

    /// ASCII (punycode) form used for matching
    pub fn ascii(&self) -> &str {
        &self.ascii
    }

    pub fn is_empty(&self) -> bool {
        self.ascii.is_empty()
    }

    pub fn is_ip_literal(&self) -> bool {
        is_ip_literal(&self.ascii)
    }

    /// ASCII labels, left to right
    pub fn labels(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.ascii.split('.')
    }
}
