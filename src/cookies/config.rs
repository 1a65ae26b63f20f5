//! Cookie jar policy configuration.

use serde::{Deserialize, Serialize};

/// Maximum cookies per domain (Chromium default).
pub const MAX_COOKIES_PER_DOMAIN: usize = 50;

/// Maximum total cookies.
/// Chromium uses 3300, but we use a slightly lower limit to keep memory usage predictable.
pub const MAX_COOKIES_TOTAL: usize = 3000;

/// Cookie jar acceptance policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieJarConfig {
    /// Reject cookies whose domain is a public suffix
    pub reject_public_suffixes: bool,
    /// Reject `Secure` cookies set over insecure schemes, and require a
    /// secure origin for `__Secure-`/`__Host-` names
    pub enforce_secure_origin: bool,
    /// Enforce `__Secure-`/`__Host-` name prefix rules
    pub enforce_prefixes: bool,
    /// Accept nameless cookies (`=value`, `value`)
    pub loose_mode: bool,
    /// Per-domain cookie quota; 0 means unlimited
    pub max_cookies_per_domain: usize,
    /// Jar-wide cookie quota; 0 means unlimited
    pub max_cookies_total: usize,
}

impl Default for CookieJarConfig {
    fn default() -> Self {
        Self {
            reject_public_suffixes: true,
            enforce_secure_origin: false,
            enforce_prefixes: true,
            loose_mode: false,
            max_cookies_per_domain: MAX_COOKIES_PER_DOMAIN,
            max_cookies_total: MAX_COOKIES_TOTAL,
        }
    }
}

impl CookieJarConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable public suffix rejection.
    pub fn reject_public_suffixes(mut self, enable: bool) -> Self {
        self.reject_public_suffixes = enable;
        self
    }

    /// Enable or disable secure-origin enforcement.
    pub fn enforce_secure_origin(mut self, enable: bool) -> Self {
        self.enforce_secure_origin = enable;
        self
    }

    /// Enable or disable name prefix enforcement.
    pub fn enforce_prefixes(mut self, enable: bool) -> Self {
        self.enforce_prefixes = enable;
        self
    }

    /// Enable or disable loose parsing.
    pub fn loose_mode(mut self, enable: bool) -> Self {
        self.loose_mode = enable;
        self
    }

    /// Set the per-domain quota.
    pub fn max_cookies_per_domain(mut self, max: usize) -> Self {
        self.max_cookies_per_domain = max;
        self
    }

    /// Set the jar-wide quota.
    pub fn max_cookies_total(mut self, max: usize) -> Self {
        self.max_cookies_total = max;
        self
    }
}

/// Per-call retrieval options for [`CookieJar::get_cookies_with`](crate::cookies::jar::CookieJar::get_cookies_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCookiesOptions {
    /// Remove expired cookies encountered during the scan
    pub expire: bool,
    /// Ignore path matching
    pub all_paths: bool,
    /// Apply RFC 6265 §5.4 ordering
    pub sort: bool,
    /// Update `last_access_time` on returned cookies
    pub touch: bool,
}

impl Default for GetCookiesOptions {
    fn default() -> Self {
        Self {
            expire: true,
            all_paths: false,
            sort: true,
            touch: true,
        }
    }
}

impl GetCookiesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expire(mut self, enable: bool) -> Self {
        self.expire = enable;
        self
    }

    pub fn all_paths(mut self, enable: bool) -> Self {
        self.all_paths = enable;
        self
    }

    pub fn sort(mut self, enable: bool) -> Self {
        self.sort = enable;
        self
    }

    pub fn touch(mut self, enable: bool) -> Self {
        self.touch = enable;
        self
    }
}
