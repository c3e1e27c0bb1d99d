//! Cookie domain matching (RFC 6265 section 5.1.3) with public suffix
//! checks.

use std::sync::Arc;

use crate::list::PublicSuffixList;
use crate::normalize::{is_ip_literal, normalize};
use crate::registered::registered_ascii;

/// Cookie matcher options.
#[derive(Debug, Clone)]
pub struct CookieOptions {
    /// Reject public suffix domains and cross-registrable-domain scopes
    pub enforce_public_suffix: bool,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            enforce_public_suffix: true,
        }
    }
}

impl CookieOptions {
    /// Create new cookie options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable public suffix enforcement.
    pub fn with_enforce_public_suffix(mut self, enabled: bool) -> Self {
        self.enforce_public_suffix = enabled;
        self
    }
}

/// Decides whether a cookie `Domain` attribute may scope a request host
#[derive(Debug, Clone)]
pub struct CookieDomainMatcher {
    psl: Arc<PublicSuffixList>,
    options: CookieOptions,
}

impl CookieDomainMatcher {
    /// Create a matcher with public suffix enforcement enabled.
    pub fn new(psl: Arc<PublicSuffixList>) -> Self {
        Self::with_options(psl, CookieOptions::default())
    }

    pub fn with_options(psl: Arc<PublicSuffixList>, options: CookieOptions) -> Self {
        Self { psl, options }
    }

    pub fn options(&self) -> &CookieOptions {
        &self.options
    }

    /// Check whether a cookie for `domain` may be set by or sent to `host`.
    ///
    /// An empty domain is a host-only cookie and always matches. `localhost`
    /// and IP literals never match as a domain scope.
    pub fn domain_matches(&self, host: &str, domain: &str) -> bool {
        let host = normalize(host);
        let domain = domain.trim();
        let domain = normalize(domain.strip_prefix('.').unwrap_or(domain));

        if domain.is_empty() {
            return true;
        }
        if domain == "localhost" {
            return false;
        }
        if is_ip_literal(&host) || is_ip_literal(&domain) {
            return false;
        }

        if self.options.enforce_public_suffix {
            if self.psl.is_public_suffix(&domain) {
                return false;
            }
            let host_reg = registered_ascii(&self.psl, &host);
            let domain_reg = registered_ascii(&self.psl, &domain);
            if let (Some(host_reg), Some(domain_reg)) = (host_reg, domain_reg) {
                if host_reg != domain_reg {
                    return false;
                }
            }
        }

        let idna = self.psl.idna();
        let host = idna.to_ascii(&host);
        let domain = idna.to_ascii(&domain);

        host == domain
            || (host.len() > domain.len()
                && host.ends_with(&domain)
                && host.as_bytes()[host.len() - domain.len() - 1] == b'.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = "com\nuk\nco.uk\nde\n*.ck\n!www.ck\n";

    fn matcher() -> CookieDomainMatcher {
        CookieDomainMatcher::new(Arc::new(RULES.parse().unwrap()))
    }

    #[test]
    fn test_exact_and_subdomain() {
        let m = matcher();
        assert!(m.domain_matches("example.com", "example.com"));
        assert!(m.domain_matches("www.example.com", "example.com"));
        assert!(m.domain_matches("a.b.example.com", "example.com"));
        assert!(!m.domain_matches("example.com", "www.example.com"));
        assert!(!m.domain_matches("notexample.com", "example.com"));
    }

    #[test]
    fn test_host_only_cookie() {
        let m = matcher();
        assert!(m.domain_matches("example.com", ""));
        assert!(m.domain_matches("192.168.0.1", ""));
        assert!(m.domain_matches("localhost", ""));
        assert!(m.domain_matches("", ""));
        assert!(m.domain_matches("example.com", "."));
    }

    #[test]
    fn test_localhost_rejected() {
        let m = matcher();
        assert!(!m.domain_matches("localhost", "localhost"));
        assert!(!m.domain_matches("app.localhost", "localhost"));
    }

    #[test]
    fn test_ip_literals_rejected() {
        let m = matcher();
        assert!(!m.domain_matches("192.168.1.1", "192.168.1.1"));
        assert!(!m.domain_matches("192.168.1.1", "1.1"));
        assert!(!m.domain_matches("[::1]:443", "::1"));
        assert!(!m.domain_matches("example.com", "10.0.0.1"));
    }

    #[test]
    fn test_public_suffix_rejected() {
        let m = matcher();
        assert!(!m.domain_matches("example.com", "com"));
        assert!(!m.domain_matches("example.co.uk", "co.uk"));
        assert!(!m.domain_matches("example.co.uk", ".co.uk"));
        assert!(!m.domain_matches("sub.something.ck", "something.ck"));
        assert!(m.domain_matches("sub.www.ck", "www.ck"));
    }

    #[test]
    fn test_cross_domain_rejected() {
        let m = matcher();
        assert!(!m.domain_matches("google.com", "facebook.com"));
        assert!(!m.domain_matches("google.co.uk", "amazon.co.uk"));
    }

    #[test]
    fn test_normalization() {
        let m = matcher();
        assert!(m.domain_matches("WWW.EXAMPLE.COM", "example.com"));
        assert!(m.domain_matches("example.com", ".example.com"));
        assert!(m.domain_matches("www.example.com", " .example.com"));
        assert!(m.domain_matches("example.com:8080", "example.com"));
        assert!(m.domain_matches("https://www.example.com/login", "example.com"));
        assert!(m.domain_matches("example.com.", "example.com"));
    }

    #[test]
    fn test_idn_match() {
        let m = matcher();
        assert!(m.domain_matches("münchen.de", "münchen.de"));
        assert!(m.domain_matches("www.münchen.de", "xn--mnchen-3ya.de"));
        assert!(m.domain_matches("www.xn--mnchen-3ya.de", "münchen.de"));
    }

    #[test]
    fn test_without_public_suffix_enforcement() {
        let m = CookieDomainMatcher::with_options(
            Arc::new(RULES.parse().unwrap()),
            CookieOptions::new().with_enforce_public_suffix(false),
        );
        assert!(!m.options().enforce_public_suffix);
        assert!(m.domain_matches("example.com", "com"));
        // Still never matches across unrelated names
        assert!(!m.domain_matches("google.com", "facebook.com"));
        assert!(!m.domain_matches("localhost", "localhost"));
        assert!(!m.domain_matches("192.168.1.1", "192.168.1.1"));
    }
}
