use crate::cookies::cookie_date::format_http_date;
use crate::cookies::error::CookieRejection;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, Duration, Month, OffsetDateTime, Time};

/// Source of creation indices.
///
/// Indices only need to be monotonic, not dense. Restored snapshots bump
/// the counter past their highest index so that cookies set after a
/// restore sort after the restored ones.
static NEXT_CREATION_INDEX: AtomicU64 = AtomicU64::new(1);

/// Allocate the next creation index.
pub fn next_creation_index() -> u64 {
    NEXT_CREATION_INDEX.fetch_add(1, Ordering::Relaxed)
}

/// Make sure future indices are strictly greater than `index`.
pub fn observe_creation_index(index: u64) {
    NEXT_CREATION_INDEX.fetch_max(index.saturating_add(1), Ordering::Relaxed);
}

/// Latest expiry a cookie can have (RFC 6265 §5.2.2 "latest representable date").
pub fn max_expiry() -> OffsetDateTime {
    Date::from_calendar_date(9999, Month::December, 31)
        .map(|d| d.with_time(Time::MIDNIGHT).assume_utc())
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

/// Absolute expiry for a `Max-Age` received at `now`.
///
/// Zero and negative values mean "already expired" and map to the epoch.
pub fn expiry_from_max_age(now: OffsetDateTime, max_age: i64) -> OffsetDateTime {
    if max_age <= 0 {
        return OffsetDateTime::UNIX_EPOCH;
    }
    now.checked_add(Duration::seconds(max_age))
        .filter(|t| *t < max_expiry())
        .unwrap_or_else(max_expiry)
}

/// Represents a stored cookie.
/// Modeled after Chromium's `net::CanonicalCookie`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    /// Lower-cased, without a leading dot.
    pub domain: String,
    /// Always starts with `/`.
    pub path: String,
    pub creation_time: OffsetDateTime,
    /// `None` for session cookies.
    pub expiration_time: Option<OffsetDateTime>,
    /// The `Max-Age` the cookie was set with, kept in snapshots.
    pub max_age: Option<i64>,
    pub last_access_time: OffsetDateTime,
    pub secure: bool,
    pub http_only: bool,
    pub host_only: bool,
    pub same_site: SameSite,
    pub priority: CookiePriority,
    pub creation_index: u64,
    /// Unrecognized attributes, verbatim.
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SameSite {
    #[default]
    #[serde(rename = "unspecified")]
    Unspecified,
    #[serde(rename = "none")]
    NoRestriction,
    #[serde(rename = "lax")]
    Lax,
    #[serde(rename = "strict")]
    Strict,
}

impl SameSite {
    /// Parse an attribute value. Unknown values are `Unspecified`.
    pub fn from_attribute(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => SameSite::Strict,
            "lax" => SameSite::Lax,
            "none" => SameSite::NoRestriction,
            _ => SameSite::Unspecified,
        }
    }

    /// Restriction level: a cookie is only sent in contexts at least this strict.
    pub fn level(self) -> u8 {
        match self {
            SameSite::Strict => 3,
            SameSite::Lax => 2,
            SameSite::NoRestriction | SameSite::Unspecified => 1,
        }
    }

    pub fn as_attribute(self) -> Option<&'static str> {
        match self {
            SameSite::Strict => Some("Strict"),
            SameSite::Lax => Some("Lax"),
            SameSite::NoRestriction => Some("None"),
            SameSite::Unspecified => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CookiePriority {
    Low,
    #[default]
    Medium,
    High,
}

impl CookiePriority {
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(CookiePriority::Low),
            "medium" => Some(CookiePriority::Medium),
            "high" => Some(CookiePriority::High),
            _ => None,
        }
    }

    pub fn as_attribute(self) -> &'static str {
        match self {
            CookiePriority::Low => "Low",
            CookiePriority::Medium => "Medium",
            CookiePriority::High => "High",
        }
    }
}

/// RFC 6265bis cookie name prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookiePrefix {
    /// `__Secure-`
    Secure,
    /// `__Host-`
    Host,
}

impl CookiePrefix {
    pub fn from_name(name: &str) -> Option<Self> {
        if name.starts_with("__Secure-") {
            Some(CookiePrefix::Secure)
        } else if name.starts_with("__Host-") {
            Some(CookiePrefix::Host)
        } else {
            None
        }
    }
}

impl CanonicalCookie {
    /// A host-only session cookie with default attributes.
    pub fn new(
        name: String,
        value: String,
        domain: String,
        path: String,
        creation_time: OffsetDateTime,
        expiration_time: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            name,
            value,
            domain,
            path,
            creation_time,
            expiration_time,
            max_age: None,
            last_access_time: creation_time,
            secure: false,
            http_only: false,
            host_only: true, // Default to host-only if not specified
            same_site: SameSite::Unspecified,
            priority: CookiePriority::Medium,
            creation_index: next_creation_index(),
            extensions: Vec::new(),
        }
    }

    /// The `(domain, path, name)` triple identifying this cookie in a store.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.domain, &self.path, &self.name)
    }

    pub fn same_key(&self, other: &CanonicalCookie) -> bool {
        self.key() == other.key()
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        match self.expiration_time {
            Some(expiry) => expiry <= current_time,
            None => false, // Session cookie
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.expiration_time.is_some()
    }

    pub fn prefix(&self) -> Option<CookiePrefix> {
        CookiePrefix::from_name(&self.name)
    }

    /// Validate __Secure- and __Host- cookie prefixes per RFC 6265bis.
    /// - __Secure- cookies MUST have the Secure attribute
    /// - __Host- cookies MUST have Secure, Path="/", and no Domain attribute
    ///
    /// When `require_secure_origin` is set the setting request must also
    /// have come over a secure scheme.
    pub fn validate_prefix(
        &self,
        secure_origin: bool,
        require_secure_origin: bool,
    ) -> Result<(), CookieRejection> {
        let origin_ok = secure_origin || !require_secure_origin;

        match self.prefix() {
            Some(CookiePrefix::Secure) if !self.secure || !origin_ok => {
                Err(CookieRejection::PrefixConstraintViolation)
            }
            Some(CookiePrefix::Host)
                if !self.secure || self.path != "/" || !self.host_only || !origin_ok =>
            {
                Err(CookieRejection::PrefixConstraintViolation)
            }
            _ => Ok(()),
        }
    }

    /// The `name=value` form used in a `Cookie` request header.
    ///
    /// Nameless cookies (accepted in loose mode) render as just the value.
    pub fn cookie_string(&self) -> String {
        if self.name.is_empty() {
            self.value.clone()
        } else {
            format!("{}={}", self.name, self.value)
        }
    }

    /// Render the cookie back into a `Set-Cookie` header value.
    ///
    /// Persistent cookies always carry an absolute `Expires`, so the
    /// rendered header describes the same lifetime whenever it is parsed.
    pub fn to_set_cookie_string(&self) -> String {
        let mut out = self.cookie_string();

        if let Some(expires) = self.expiration_time {
            out.push_str(&format!("; Expires={}", format_http_date(expires)));
        }

        if !self.host_only {
            out.push_str(&format!("; Domain={}", self.domain));
        }
        out.push_str(&format!("; Path={}", self.path));

        if self.secure {
            out.push_str("; Secure");
        }
        if self.http_only {
            out.push_str("; HttpOnly");
        }
        if let Some(same_site) = self.same_site.as_attribute() {
            out.push_str(&format!("; SameSite={}", same_site));
        }
        if self.priority != CookiePriority::Medium {
            out.push_str(&format!("; Priority={}", self.priority.as_attribute()));
        }
        for ext in &self.extensions {
            out.push_str("; ");
            out.push_str(ext);
        }

        out
    }
}
