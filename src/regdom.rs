//! Swappable front end over a public suffix list.
//!
//! Queries run against a snapshot of the active list. A refreshed list is
//! installed with [`RegDom::replace`]; queries already running keep the
//! list they started with.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::cookie::{CookieDomainMatcher, CookieOptions};
use crate::list::PublicSuffixList;
use crate::registered::{OutputForm, RegisteredDomain};
use crate::types::Metadata;

/// Public suffix queries over a replaceable list
pub struct RegDom {
    active: RwLock<Arc<PublicSuffixList>>,
    cookie_options: CookieOptions,
}

impl RegDom {
    /// Create a new front end with default cookie options.
    pub fn new(list: PublicSuffixList) -> Self {
        Self::with_cookie_options(list, CookieOptions::default())
    }

    pub fn with_cookie_options(list: PublicSuffixList, cookie_options: CookieOptions) -> Self {
        Self {
            active: RwLock::new(Arc::new(list)),
            cookie_options,
        }
    }

    /// Snapshot of the active list
    pub fn list(&self) -> Arc<PublicSuffixList> {
        self.active.read().clone()
    }

    /// Install a new list, returning the previous one.
    pub fn replace(&self, list: PublicSuffixList) -> Arc<PublicSuffixList> {
        let counts = list.metadata().rule_counts;
        let previous = std::mem::replace(&mut *self.active.write(), Arc::new(list));
        tracing::info!(
            normal = counts.normal,
            wildcard = counts.wildcard,
            exception = counts.exception,
            "Replaced active public suffix list"
        );
        previous
    }

    pub fn is_public_suffix(&self, host: &str) -> bool {
        self.list().is_public_suffix(host)
    }

    pub fn public_suffix(&self, host: &str) -> Option<String> {
        self.list().public_suffix(host)
    }

    pub fn is_exception(&self, host: &str) -> bool {
        self.list().is_exception(host)
    }

    /// Registrable domain of `host`, rendered in Unicode.
    pub fn registered_domain(&self, host: &str) -> Option<String> {
        RegisteredDomain::new(self.list()).registered_domain(host)
    }

    pub fn registered_domain_with(&self, host: &str, form: OutputForm) -> Option<String> {
        RegisteredDomain::new(self.list()).registered_domain_with(host, form)
    }

    /// Cookie domain match, see [`CookieDomainMatcher::domain_matches`].
    pub fn domain_matches(&self, host: &str, domain: &str) -> bool {
        CookieDomainMatcher::with_options(self.list(), self.cookie_options.clone())
            .domain_matches(host, domain)
    }

    pub fn metadata(&self) -> Metadata {
        self.list().metadata()
    }
}
