//! Cookie storage backends.
//!
//! The jar never holds cookies itself; every lookup and mutation goes
//! through a [`CookieStore`]. The trait is asynchronous so that backends
//! can sit on disk or across the network. Backends that can answer
//! immediately implement [`SyncCookieStore`] instead, which provides
//! [`CookieStore`] for free and unlocks the jar's blocking API.
//!
//! | Backend | Type | Notes |
//! |---------|------|-------|
//! | Memory | [`MemoryCookieStore`] | Reference implementation |
//! | JSON file | [`JsonFileCookieStore`] | Rewrites its file after each mutation |

#[cfg(feature = "json")]
pub mod json;
pub mod memory;

#[cfg(feature = "json")]
pub use json::JsonFileCookieStore;
pub use memory::MemoryCookieStore;

use crate::base::error::CookieError;
use crate::cookies::canonical_cookie::CanonicalCookie;
use async_trait::async_trait;

/// Persistence boundary for cookie records.
///
/// Cookies are addressed by `(domain, path, name)`. Implementations must
/// be safe to call concurrently and serialize conflicting writes
/// themselves.
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Short backend identifier, recorded in serialized jars.
    fn store_type(&self) -> &'static str;

    /// Whether every operation completes without suspending. The jar's
    /// blocking API is only available when this is true.
    fn is_synchronous(&self) -> bool {
        false
    }

    /// The cookie stored under exactly this key.
    async fn find_cookie(
        &self,
        domain: &str,
        path: &str,
        name: &str,
    ) -> Result<Option<CanonicalCookie>, CookieError>;

    /// Candidate cookies for a request host: those whose domain is the
    /// host or one of its parent domains, optionally path-matched against
    /// `path`. Unordered.
    async fn find_cookies(
        &self,
        host: &str,
        path: Option<&str>,
    ) -> Result<Vec<CanonicalCookie>, CookieError>;

    /// Insert a cookie.
    async fn put_cookie(&self, cookie: CanonicalCookie) -> Result<(), CookieError>;

    /// Replace `old` with `new`, keeping `old`'s creation index.
    async fn update_cookie(
        &self,
        old: &CanonicalCookie,
        new: CanonicalCookie,
    ) -> Result<(), CookieError>;

    async fn remove_cookie(&self, domain: &str, path: &str, name: &str)
        -> Result<(), CookieError>;

    /// Remove every cookie of `domain`, or only those at `path`.
    async fn remove_cookies(&self, domain: &str, path: Option<&str>) -> Result<(), CookieError>;

    async fn remove_all_cookies(&self) -> Result<(), CookieError>;

    /// Every stored cookie, ordered by creation index.
    async fn get_all_cookies(&self) -> Result<Vec<CanonicalCookie>, CookieError>;
}

/// Blocking flavour of [`CookieStore`].
pub trait SyncCookieStore: Send + Sync {
    fn store_type(&self) -> &'static str;

    fn find_cookie(
        &self,
        domain: &str,
        path: &str,
        name: &str,
    ) -> Result<Option<CanonicalCookie>, CookieError>;

    fn find_cookies(&self, host: &str, path: Option<&str>)
        -> Result<Vec<CanonicalCookie>, CookieError>;

    fn put_cookie(&self, cookie: CanonicalCookie) -> Result<(), CookieError>;

    fn update_cookie(&self, old: &CanonicalCookie, new: CanonicalCookie)
        -> Result<(), CookieError>;

    fn remove_cookie(&self, domain: &str, path: &str, name: &str) -> Result<(), CookieError>;

    fn remove_cookies(&self, domain: &str, path: Option<&str>) -> Result<(), CookieError>;

    fn remove_all_cookies(&self) -> Result<(), CookieError>;

    fn get_all_cookies(&self) -> Result<Vec<CanonicalCookie>, CookieError>;
}

#[async_trait]
impl<T: SyncCookieStore> CookieStore for T {
    fn store_type(&self) -> &'static str {
        SyncCookieStore::store_type(self)
    }

    fn is_synchronous(&self) -> bool {
        true
    }

    async fn find_cookie(
        &self,
        domain: &str,
        path: &str,
        name: &str,
    ) -> Result<Option<CanonicalCookie>, CookieError> {
        SyncCookieStore::find_cookie(self, domain, path, name)
    }

    async fn find_cookies(
        &self,
        host: &str,
        path: Option<&str>,
    ) -> Result<Vec<CanonicalCookie>, CookieError> {
        SyncCookieStore::find_cookies(self, host, path)
    }

    async fn put_cookie(&self, cookie: CanonicalCookie) -> Result<(), CookieError> {
        SyncCookieStore::put_cookie(self, cookie)
    }

    async fn update_cookie(
        &self,
        old: &CanonicalCookie,
        new: CanonicalCookie,
    ) -> Result<(), CookieError> {
        SyncCookieStore::update_cookie(self, old, new)
    }

    async fn remove_cookie(
        &self,
        domain: &str,
        path: &str,
        name: &str,
    ) -> Result<(), CookieError> {
        SyncCookieStore::remove_cookie(self, domain, path, name)
    }

    async fn remove_cookies(&self, domain: &str, path: Option<&str>) -> Result<(), CookieError> {
        SyncCookieStore::remove_cookies(self, domain, path)
    }

    async fn remove_all_cookies(&self) -> Result<(), CookieError> {
        SyncCookieStore::remove_all_cookies(self)
    }

    async fn get_all_cookies(&self) -> Result<Vec<CanonicalCookie>, CookieError> {
        SyncCookieStore::get_all_cookies(self)
    }
}
