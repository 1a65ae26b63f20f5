//! `Set-Cookie` header parsing.
//!
//! Modeled after Chromium's `net::ParsedCookie`: the parser only extracts
//! what the server sent. Domain and path resolution, prefix enforcement
//! and every other policy decision belong to the jar.
//!
//! Parsing is deliberately lenient. Empty segments, stray whitespace,
//! unknown attributes and unparsable attribute values are skipped rather
//! than failing the whole cookie. Only a header with no usable
//! `name=value` pair fails.

use crate::cookies::canonical_cookie::{
    expiry_from_max_age, CookiePrefix, CookiePriority, SameSite,
};
use crate::cookies::cookie_date::parse_cookie_date;
use crate::cookies::matching::canonical_domain;
use thiserror::Error;
use time::OffsetDateTime;

/// Maximum combined size of name and value (RFC 6265bis).
pub const MAX_NAME_VALUE_SIZE: usize = 4096;

/// Maximum size of a single attribute value (RFC 6265bis).
pub const MAX_ATTRIBUTE_VALUE_SIZE: usize = 1024;

/// Why a header yielded no cookie at all.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("header is empty")]
    Empty,
    #[error("no name=value pair")]
    MissingName,
    #[error("name and value exceed 4096 bytes")]
    TooLarge,
}

/// A `Set-Cookie` header broken into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCookie {
    pub name: String,
    pub value: String,
    /// Canonicalized `Domain` attribute; `None` when absent or empty.
    pub domain: Option<String>,
    /// `Path` attribute; `None` when absent or not starting with `/`.
    pub path: Option<String>,
    pub expires: Option<OffsetDateTime>,
    pub max_age: Option<i64>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub priority: CookiePriority,
    pub prefix: Option<CookiePrefix>,
    /// Unrecognized attributes, verbatim.
    pub extensions: Vec<String>,
}

impl ParsedCookie {
    /// Parse a `Set-Cookie` header value.
    pub fn parse(line: &str) -> Result<Self, ParseFailure> {
        Self::parse_with(line, false)
    }

    /// Parse accepting nameless cookies (`=value` or just `value`).
    pub fn parse_loose(line: &str) -> Result<Self, ParseFailure> {
        Self::parse_with(line, true)
    }

    pub fn parse_with(line: &str, loose: bool) -> Result<Self, ParseFailure> {
        // Anything after a control character is not part of this header
        let line = match line.find(['\r', '\n', '\0']) {
            Some(idx) => &line[..idx],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseFailure::Empty);
        }

        let (pair, attributes) = line.split_once(';').unwrap_or((line, ""));
        let (name, value) = Self::parse_pair(pair, loose)?;

        if name.len() + value.len() > MAX_NAME_VALUE_SIZE {
            return Err(ParseFailure::TooLarge);
        }

        let mut cookie = ParsedCookie {
            prefix: CookiePrefix::from_name(&name),
            name,
            value,
            ..Default::default()
        };

        for segment in attributes.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            cookie.apply_attribute(segment);
        }

        Ok(cookie)
    }

    fn parse_pair(pair: &str, loose: bool) -> Result<(String, String), ParseFailure> {
        let (name, value) = match pair.split_once('=') {
            Some((name, value)) => (name.trim(), value.trim()),
            None if loose => ("", pair.trim()),
            None => return Err(ParseFailure::MissingName),
        };

        if name.is_empty() {
            if !loose {
                return Err(ParseFailure::MissingName);
            }
            if value.is_empty() {
                return Err(ParseFailure::Empty);
            }
        }

        Ok((name.to_string(), value.to_string()))
    }

    fn apply_attribute(&mut self, segment: &str) {
        let (key, value) = match segment.split_once('=') {
            Some((k, v)) => (k.trim(), Some(v.trim())),
            None => (segment, None),
        };

        if value.is_some_and(|v| v.len() > MAX_ATTRIBUTE_VALUE_SIZE) {
            tracing::trace!(attribute = %key, "ignoring oversized cookie attribute");
            return;
        }

        match key.to_ascii_lowercase().as_str() {
            "expires" => {
                if let Some(expires) = value.and_then(parse_cookie_date) {
                    self.expires = Some(expires);
                }
            }
            "max-age" => {
                if let Some(max_age) = value.and_then(parse_max_age) {
                    self.max_age = Some(max_age);
                }
            }
            "domain" => {
                // An empty Domain= is the same as no Domain at all
                let domain = value.map(canonical_domain).unwrap_or_default();
                if !domain.is_empty() {
                    self.domain = Some(domain);
                }
            }
            "path" => {
                self.path = value
                    .filter(|p| p.starts_with('/'))
                    .map(|p| p.to_string());
            }
            "secure" => self.secure = true,
            "httponly" => self.http_only = true,
            "samesite" => self.same_site = SameSite::from_attribute(value.unwrap_or("")),
            "priority" => {
                if let Some(priority) = value.and_then(CookiePriority::from_attribute) {
                    self.priority = priority;
                }
            }
            _ => self.extensions.push(segment.to_string()),
        }
    }

    /// True when a `Domain` attribute was present, which clears host-only.
    pub fn has_explicit_domain(&self) -> bool {
        self.domain.is_some()
    }

    /// Absolute expiry when received at `now`; `Max-Age` wins over `Expires`.
    pub fn expiry(&self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        match self.max_age {
            Some(max_age) => Some(expiry_from_max_age(now, max_age)),
            None => self.expires,
        }
    }
}

/// `Max-Age` must be `-?[0-9]+`; out-of-range values saturate.
fn parse_max_age(value: &str) -> Option<i64> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match value.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) if value.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}
