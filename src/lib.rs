//! # cookiemonster
//!
//! An RFC 6265 client-side cookie jar for Rust.
//!
//! `cookiemonster` turns `Set-Cookie` headers into stored cookies and
//! answers "which cookies go with this request" in the exact order browsers
//! use. Storage is delegated to a pluggable [`CookieStore`]; the jar itself
//! only applies policy.
//!
//! ## Features
//!
//! - **Lenient parsing**: accepts the malformed headers real servers send
//! - **Domain & path scoping**: RFC 6265 §5.1.3/§5.1.4 matching, host-only cookies
//! - **Public Suffix List**: rejects supercookies such as `Domain=co.uk`
//! - **Name prefixes**: `__Secure-` and `__Host-` enforcement
//! - **Eviction**: per-domain (50) and global (3000) limits, priority-aware
//! - **Persistence**: versioned JSON snapshots that keep creation order
//! - **Async & blocking**: every jar operation in both conventions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cookiemonster::{CookieJar, RequestContext};
//!
//! #[tokio::main]
//! async fn main() {
//!     let jar = CookieJar::new();
//!     let ctx = RequestContext::parse("https://a.example.com/login").unwrap();
//!
//!     jar.set_cookie("sid=42; Domain=example.com; Path=/", &ctx).await.unwrap();
//!
//!     let other = RequestContext::parse("https://b.example.com/").unwrap();
//!     println!("Cookie: {}", jar.get_cookie_string(&other).await.unwrap());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types and error-context helpers
//! - [`cookies`] - Parsing, matching, storage and the jar
//!
//! ## Security
//!
//! This library implements several security features from Chromium:
//! - Public Suffix List validation to prevent supercookie attacks
//! - `__Host-`/`__Secure-` prefix checks
//! - HttpOnly cookies hidden from, and protected against, script access

pub mod base;
pub mod cookies;

pub use base::error::CookieError;
pub use cookies::canonical_cookie::{CanonicalCookie, CookiePriority, SameSite};
pub use cookies::config::{CookieJarConfig, GetCookiesOptions};
pub use cookies::error::{CookieRejection, SetCookieOutcome};
pub use cookies::jar::CookieJar;
pub use cookies::persistence::SerializedJar;
pub use cookies::request_context::{RequestContext, SameSiteContext};
pub use cookies::store::{CookieStore, MemoryCookieStore, SyncCookieStore};
