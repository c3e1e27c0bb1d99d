use std::sync::Arc;

use crate::list::{tail_labels, PublicSuffixList};

/// Script used when rendering a registrable domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputForm {
    /// Unicode labels, e.g. "食狮.公司.cn"
    #[default]
    Unicode,
    /// ASCII/punycode labels, e.g. "xn--85x722f.xn--55qx5d.cn"
    Ascii,
}

/// Extracts the registrable domain (public suffix plus one label)
#[derive(Debug, Clone)]
pub struct RegisteredDomain {
    psl: Arc<PublicSuffixList>,
}

impl RegisteredDomain {
    /// Create a new extractor over a suffix list.
    pub fn new(psl: Arc<PublicSuffixList>) -> Self {
        Self { psl }
    }

    /// The suffix list in use
    pub fn list(&self) -> &Arc<PublicSuffixList> {
        &self.psl
    }

    /// Get the registrable domain of `host`, rendered in Unicode.
    ///
    /// Returns `None` for empty input, IP literals, and hosts that are
    /// themselves a public suffix.
    pub fn registered_domain(&self, host: &str) -> Option<String> {
        self.registered_domain_with(host, OutputForm::Unicode)
    }

    /// Get the registrable domain of `host`, rendered in `form`.
    pub fn registered_domain_with(&self, host: &str, form: OutputForm) -> Option<String> {
        let ascii = registered_ascii(&self.psl, host)?;
        Some(match form {
            OutputForm::Ascii => ascii,
            OutputForm::Unicode => self.psl.idna().to_unicode(&ascii),
        })
    }
}

/// Registrable domain of `host` in ASCII form.
pub(crate) fn registered_ascii(psl: &PublicSuffixList, host: &str) -> Option<String> {
    let resolved = psl.resolve(host)?;
    if resolved.is_public_suffix() {
        return None;
    }

    let domain = tail_labels(&resolved.ascii, resolved.suffix + 1);
    // "a..com" has an empty label right before the suffix
    if domain.starts_with('.') {
        return None;
    }
    Some(domain.to_string())
}
