//! Cookie management.
//!
//! This module provides a complete RFC 6265 client-side cookie jar:
//!
//! - **Parsing**: lenient `Set-Cookie` parsing ([`ParsedCookie`](parsed_cookie::ParsedCookie))
//! - **Policy**: domain/path matching, public suffix rejection, name prefixes
//! - **Storage**: pluggable async stores ([`store`]) with an in-memory reference store
//! - **Persistence**: versioned JSON snapshots of a whole jar
//!
//! # Architecture
//!
//! The layering mirrors Chromium's cookie stack:
//!
//! | Chromium (C++) | cookiemonster (Rust) | Responsibility |
//! |----------------|----------------------|----------------|
//! | `net::CookieMonster` | [`CookieJar`](jar::CookieJar) | Policy, ordering, eviction |
//! | `net::CanonicalCookie` | [`CanonicalCookie`](canonical_cookie::CanonicalCookie) | Single cookie representation |
//! | `net::ParsedCookie` | [`ParsedCookie`](parsed_cookie::ParsedCookie) | Header parsing |
//! | `CookieMonster::PersistentCookieStore` | [`CookieStore`](store::CookieStore) | Storage backend |
//!
//! # Example
//!
//! ```rust,no_run
//! use cookiemonster::cookies::jar::CookieJar;
//! use cookiemonster::cookies::request_context::RequestContext;
//!
//! # async fn run() -> Result<(), cookiemonster::base::error::CookieError> {
//! let jar = CookieJar::new();
//! let ctx = RequestContext::new("www.example.com", "/", "https");
//!
//! jar.set_cookie("session=abc; Domain=example.com; Secure", &ctx).await?;
//! assert_eq!(jar.get_cookie_string(&ctx).await?, "session=abc");
//! # Ok(())
//! # }
//! ```
//!
//! # Chromium References
//!
//! - Cookie monster: `net/cookies/cookie_monster.cc`
//! - Parsing: `net/cookies/parsed_cookie.cc`
//! - Matching: `net/cookies/cookie_util.cc`

pub mod canonical_cookie;
pub mod config;
pub mod cookie_date;
pub mod error;
pub mod jar;
pub mod matching;
pub mod parsed_cookie;
pub mod persistence;
pub mod psl;
pub mod request_context;
pub mod store;
