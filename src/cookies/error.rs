//! Typed outcomes of a `Set-Cookie` attempt.
//!
//! A server trying and failing to set an illegal cookie is routine, so
//! these are values returned to the caller rather than errors. Only store
//! failures travel through [`CookieError`](crate::base::error::CookieError).

use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::parsed_cookie::ParseFailure;
use thiserror::Error;

/// Why a cookie was declined.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CookieRejection {
    #[error("Malformed Set-Cookie header: {0}")]
    MalformedHeader(ParseFailure),
    #[error("Cookie domain does not domain-match the request host")]
    DomainMismatch,
    #[error("Cookie domain is a public suffix")]
    PublicSuffixDomain,
    #[error("Cookie prefix validation failed")]
    PrefixConstraintViolation,
    #[error("Cannot overwrite an HttpOnly cookie from script")]
    HttpOnlyOverwriteBlocked,
    #[error("Cannot set an HttpOnly cookie from script")]
    HttpOnlyFromScript,
    #[error("Secure cookie set over an insecure scheme")]
    InsecureOrigin,
    #[error("SameSite cookie set from a cross-site context")]
    SameSiteContextMismatch,
}

/// Result of [`CookieJar::set_cookie`](crate::cookies::jar::CookieJar::set_cookie).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetCookieOutcome {
    /// The cookie was inserted or replaced an existing one.
    Stored(CanonicalCookie),
    /// The cookie arrived already expired; any stored cookie with the same
    /// key was removed.
    Deleted(CanonicalCookie),
    /// The cookie was declined by policy.
    Rejected(CookieRejection),
}

impl SetCookieOutcome {
    /// The processed cookie, unless it was rejected.
    pub fn cookie(&self) -> Option<&CanonicalCookie> {
        match self {
            SetCookieOutcome::Stored(c) | SetCookieOutcome::Deleted(c) => Some(c),
            SetCookieOutcome::Rejected(_) => None,
        }
    }

    pub fn into_cookie(self) -> Option<CanonicalCookie> {
        match self {
            SetCookieOutcome::Stored(c) | SetCookieOutcome::Deleted(c) => Some(c),
            SetCookieOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<CookieRejection> {
        match self {
            SetCookieOutcome::Rejected(r) => Some(*r),
            _ => None,
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, SetCookieOutcome::Stored(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, SetCookieOutcome::Rejected(_))
    }
}

impl From<CookieRejection> for SetCookieOutcome {
    fn from(rejection: CookieRejection) -> Self {
        SetCookieOutcome::Rejected(rejection)
    }
}
