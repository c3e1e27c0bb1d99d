//! IDNA conversion seam.
//!
//! Matching always happens on ASCII (punycode) labels; the Unicode form is
//! only used when rendering results back to callers. Both conversions are
//! total: on failure the input comes back unchanged.

/// Trait for converting domain names between Unicode and ASCII forms
pub trait Idna: Send + Sync {
    /// Convert a domain to its ASCII (punycode) form
    fn to_ascii(&self, domain: &str) -> String;

    /// Convert a domain to its Unicode form
    fn to_unicode(&self, domain: &str) -> String;
}

/// UTS #46 conversion backed by the `idna` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct Uts46;

impl Idna for Uts46 {
    fn to_ascii(&self, domain: &str) -> String {
        if domain.is_ascii() {
            return domain.to_ascii_lowercase();
        }
        match idna::domain_to_ascii(domain) {
            Ok(ascii) => ascii,
            Err(e) => {
                tracing::debug!(domain = %domain, error = ?e, "IDNA ToASCII failed, keeping input");
                domain.to_string()
            }
        }
    }

    fn to_unicode(&self, domain: &str) -> String {
        if !domain.split('.').any(|l| l.starts_with("xn--")) {
            return domain.to_string();
        }
        let (unicode, result) = idna::domain_to_unicode(domain);
        match result {
            Ok(()) => unicode,
            Err(e) => {
                tracing::debug!(domain = %domain, error = ?e, "IDNA ToUnicode failed, keeping input");
                domain.to_string()
            }
        }
    }
}

/// Pass-through conversion, for callers without IDN support
#[derive(Debug, Clone, Copy, Default)]
pub struct NilIdna;

impl Idna for NilIdna {
    fn to_ascii(&self, domain: &str) -> String {
        domain.to_string()
    }

    fn to_unicode(&self, domain: &str) -> String {
        domain.to_string()
    }
}
