//! File-backed store.
//!
//! Keeps every cookie in a [`MemoryCookieStore`] and rewrites a JSON
//! snapshot (the [`SerializedJar`] format) after each mutation. Writes go
//! to a sibling temp file that is renamed over the target, so a crash
//! mid-write leaves the previous snapshot intact. A mutation whose write
//! fails is rolled back in memory as well.

use crate::base::context::IoResultExt;
use crate::base::error::CookieError;
use crate::cookies::canonical_cookie::{observe_creation_index, CanonicalCookie};
use crate::cookies::config::CookieJarConfig;
use crate::cookies::persistence::SerializedJar;
use crate::cookies::store::memory::MemoryCookieStore;
use crate::cookies::store::SyncCookieStore;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

const STORE_TYPE: &str = "json";

/// Cookie store persisted to a single JSON file.
///
/// The store reports itself as synchronous, and every mutation performs
/// blocking `std::fs` writes before returning. The async [`CookieStore`]
/// methods therefore block the calling thread too. On a multi-threaded
/// runtime, drive a jar over this store from
/// `tokio::task::spawn_blocking` or through the jar's `_sync` methods.
///
/// [`CookieStore`]: crate::cookies::store::CookieStore
#[derive(Debug)]
pub struct JsonFileCookieStore {
    path: PathBuf,
    cookies: MemoryCookieStore,
    // Held across a mutation and its snapshot write
    write_lock: Mutex<()>,
}

impl JsonFileCookieStore {
    /// Open the store at `path`, loading any snapshot already there.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CookieError> {
        let path = path.into();
        let cookies = MemoryCookieStore::new();

        if path.exists() {
            let snapshot = SerializedJar::load(&path)?;
            for snap in snapshot.cookies {
                let cookie = snap.into_cookie()?;
                observe_creation_index(cookie.creation_index);
                cookies.put_cookie(cookie)?;
            }
            tracing::debug!(
                path = %path.display(),
                count = cookies.total_cookie_count(),
                "loaded cookie snapshot"
            );
        }

        Ok(Self {
            path,
            cookies,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, CookieError> {
        self.write_lock
            .lock()
            .map_err(|_| CookieError::store_unavailable(STORE_TYPE, "write lock poisoned"))
    }

    /// Apply `mutate` to the in-memory cookies and write the snapshot.
    /// If either step fails the in-memory cookies are put back as they were.
    fn commit(
        &self,
        mutate: impl FnOnce(&MemoryCookieStore) -> Result<(), CookieError>,
    ) -> Result<(), CookieError> {
        let _guard = self.lock()?;
        let before = self.cookies.get_all_cookies()?;

        let result = mutate(&self.cookies).and_then(|()| self.write_snapshot());
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "cookie write failed, rolling back");
            self.restore(before)?;
            return Err(e);
        }
        Ok(())
    }

    fn restore(&self, cookies: Vec<CanonicalCookie>) -> Result<(), CookieError> {
        self.cookies.remove_all_cookies()?;
        for cookie in cookies {
            self.cookies.put_cookie(cookie)?;
        }
        Ok(())
    }

    fn write_snapshot(&self) -> Result<(), CookieError> {
        let all = self.cookies.get_all_cookies()?;
        let snapshot = SerializedJar::new(STORE_TYPE, CookieJarConfig::default(), &all);
        let json = snapshot.to_json_pretty()?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).store_context(STORE_TYPE)?;
        fs::rename(&tmp, &self.path).store_context(STORE_TYPE)?;

        tracing::trace!(path = %self.path.display(), count = all.len(), "flushed cookie snapshot");
        Ok(())
    }
}

/// Whether `new` differs from `old` only by its access time.
fn only_touched(old: &CanonicalCookie, new: &CanonicalCookie) -> bool {
    let mut touched = old.clone();
    touched.last_access_time = new.last_access_time;
    touched == *new
}

impl SyncCookieStore for JsonFileCookieStore {
    fn store_type(&self) -> &'static str {
        STORE_TYPE
    }

    fn find_cookie(
        &self,
        domain: &str,
        path: &str,
        name: &str,
    ) -> Result<Option<CanonicalCookie>, CookieError> {
        self.cookies.find_cookie(domain, path, name)
    }

    fn find_cookies(
        &self,
        host: &str,
        path: Option<&str>,
    ) -> Result<Vec<CanonicalCookie>, CookieError> {
        self.cookies.find_cookies(host, path)
    }

    fn put_cookie(&self, cookie: CanonicalCookie) -> Result<(), CookieError> {
        self.commit(|cookies| cookies.put_cookie(cookie))
    }

    fn update_cookie(
        &self,
        old: &CanonicalCookie,
        new: CanonicalCookie,
    ) -> Result<(), CookieError> {
        // Access-time touches stay in memory until the next real mutation
        if only_touched(old, &new) {
            let _guard = self.lock()?;
            return self.cookies.update_cookie(old, new);
        }
        self.commit(|cookies| cookies.update_cookie(old, new))
    }

    fn remove_cookie(&self, domain: &str, path: &str, name: &str) -> Result<(), CookieError> {
        self.commit(|cookies| cookies.remove_cookie(domain, path, name))
    }

    fn remove_cookies(&self, domain: &str, path: Option<&str>) -> Result<(), CookieError> {
        self.commit(|cookies| cookies.remove_cookies(domain, path))
    }

    fn remove_all_cookies(&self) -> Result<(), CookieError> {
        self.commit(|cookies| cookies.remove_all_cookies())
    }

    fn get_all_cookies(&self) -> Result<Vec<CanonicalCookie>, CookieError> {
        self.cookies.get_all_cookies()
    }
}
