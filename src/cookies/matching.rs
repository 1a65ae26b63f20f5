//! RFC 6265 domain and path matching.
//!
//! These are pure functions; the jar and the stores share them so that a
//! store which pre-filters by domain agrees with the jar's own filtering.

use std::net::IpAddr;

/// Whether `host` is a literal IPv4 or IPv6 address (brackets allowed).
pub fn is_ip_literal(host: &str) -> bool {
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    host.parse::<IpAddr>().is_ok()
}

/// Canonicalize a host or `Domain` attribute value.
///
/// Trims whitespace, strips a single leading dot, converts IDNs to their
/// ASCII form and lower-cases the result.
pub fn canonical_domain(domain: &str) -> String {
    let domain = domain.trim();
    let domain = domain.strip_prefix('.').unwrap_or(domain);

    if !domain.is_ascii() {
        if let Ok(url::Host::Domain(ascii)) = url::Host::parse(domain) {
            return ascii;
        }
    }

    domain.to_ascii_lowercase()
}

/// RFC 6265 §5.1.3 domain matching.
///
/// An exact (case-insensitive) match always succeeds. A suffix match is
/// only considered for domain cookies and never for IP-literal hosts.
pub fn domain_match(request_host: &str, cookie_domain: &str, host_only: bool) -> bool {
    let cookie_domain = cookie_domain.strip_prefix('.').unwrap_or(cookie_domain);

    if request_host.eq_ignore_ascii_case(cookie_domain) {
        return true;
    }

    if host_only || is_ip_literal(request_host) {
        return false;
    }

    if request_host.len() <= cookie_domain.len() {
        return false;
    }

    let boundary = request_host.len() - cookie_domain.len();
    if !request_host.is_char_boundary(boundary) {
        return false;
    }
    let (head, suffix) = request_host.split_at(boundary);
    suffix.eq_ignore_ascii_case(cookie_domain) && head.ends_with('.')
}

/// RFC 6265 §5.1.4 path matching.
pub fn path_match(request_path: &str, cookie_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }

    if let Some(rest) = request_path.strip_prefix(cookie_path) {
        // Cookie path is a directory prefix
        return cookie_path.ends_with('/') || rest.starts_with('/');
    }

    false
}

/// RFC 6265 §5.1.4 default-path of a request path.
///
/// `/a/b/c` becomes `/a/b`; anything without an interior `/` becomes `/`.
pub fn default_path(request_path: &str) -> String {
    if !request_path.starts_with('/') {
        return "/".to_string();
    }

    match request_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => request_path[..idx].to_string(),
    }
}

/// The host itself followed by every parent domain a cookie could be
/// scoped to, most specific first.
///
/// For `foo.bar.example.com` this yields `foo.bar.example.com`,
/// `bar.example.com`, `example.com`, `com`. IP literals only yield
/// themselves.
pub fn permute_domain(host: &str) -> Vec<String> {
    let host = host.to_ascii_lowercase();
    if is_ip_literal(&host) {
        return vec![host];
    }

    let mut domains = vec![host.clone()];
    let mut rest = host.as_str();
    while let Some((_, parent)) = rest.split_once('.') {
        if parent.is_empty() {
            break;
        }
        domains.push(parent.to_string());
        rest = parent;
    }

    domains
}
