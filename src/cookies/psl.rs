//! Public Suffix List (PSL) validation for cookie domain security.
//!
//! Prevents supercookie attacks by rejecting cookies set on public
//! suffixes like `.com`, `.co.uk`, etc.
//!
//! The suffix data is an external dependency of the jar, expressed as the
//! [`PublicSuffixList`] trait. [`MozillaPsl`] backs it with Mozilla's
//! Public Suffix List via the `psl` crate.

use crate::cookies::matching::is_ip_literal;
use psl::{List, Psl};

/// Lookup of the public suffix of a host.
pub trait PublicSuffixList: Send + Sync {
    /// The public suffix of `host` (e.g. `co.uk` for `www.example.co.uk`),
    /// or `None` when the list has no opinion.
    fn public_suffix(&self, host: &str) -> Option<String>;
}

/// Mozilla's Public Suffix List, compiled into the binary by the `psl` crate.
///
/// Hosts under an unlisted TLD fall back to the implicit `*` rule, so a
/// single-label host such as `localhost` is its own public suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct MozillaPsl;

impl PublicSuffixList for MozillaPsl {
    fn public_suffix(&self, host: &str) -> Option<String> {
        let host_lower = host.to_lowercase();
        List.suffix(host_lower.as_bytes())
            .and_then(|s| std::str::from_utf8(s.as_bytes()).ok())
            .map(|s| s.to_string())
    }
}

/// Check if a domain is a public suffix (e.g., "com", "co.uk") according to `list`.
///
/// IP literals are never public suffixes.
pub fn is_public_suffix_in(list: &dyn PublicSuffixList, domain: &str) -> bool {
    let domain = domain.strip_prefix('.').unwrap_or(domain).to_lowercase();
    if domain.is_empty() || is_ip_literal(&domain) {
        return false;
    }

    match list.public_suffix(&domain) {
        // The domain is a public suffix if it equals its own suffix
        Some(suffix) => suffix.eq_ignore_ascii_case(&domain),
        // Unknown TLD - the list has no opinion
        None => false,
    }
}

/// Check if a domain is a public suffix (e.g., "com", "co.uk").
/// Returns true if the domain itself is a public suffix.
pub fn is_public_suffix(domain: &str) -> bool {
    is_public_suffix_in(&MozillaPsl, domain)
}

/// Get the registrable domain (eTLD+1) for a domain.
/// For "sub.example.com", returns "example.com".
/// For "example.com", returns "example.com".
/// For "com" (public suffix), returns None.
pub fn registrable_domain(domain: &str) -> Option<String> {
    let domain_lower = domain.to_lowercase();
    psl::domain(domain_lower.as_bytes())
        .and_then(|d| std::str::from_utf8(d.as_bytes()).ok())
        .map(|s| s.to_string())
}

/// Guard deciding whether a `Domain` attribute may be stored.
///
/// A cookie whose domain is a public suffix would be sent to every site
/// under that suffix. Such cookies are only legal as host-only cookies on
/// a host that literally is the suffix (e.g. `localhost`).
pub struct PublicSuffixGuard {
    list: Box<dyn PublicSuffixList>,
}

impl std::fmt::Debug for PublicSuffixGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicSuffixGuard").finish_non_exhaustive()
    }
}

impl Default for PublicSuffixGuard {
    fn default() -> Self {
        Self::new(MozillaPsl)
    }
}

impl PublicSuffixGuard {
    pub fn new(list: impl PublicSuffixList + 'static) -> Self {
        Self {
            list: Box::new(list),
        }
    }

    /// Whether `domain` is itself a public suffix.
    pub fn is_public_suffix(&self, domain: &str) -> bool {
        is_public_suffix_in(self.list.as_ref(), domain)
    }

    /// Whether a cookie scoped to `domain` may be stored for `request_host`.
    ///
    /// `host_only` is true when the domain came from the request host rather
    /// than from a `Domain` attribute.
    pub fn allows(&self, domain: &str, request_host: &str, host_only: bool) -> bool {
        if is_ip_literal(request_host) {
            return true;
        }
        if !self.is_public_suffix(domain) {
            return true;
        }
        host_only && domain.eq_ignore_ascii_case(request_host)
    }
}
