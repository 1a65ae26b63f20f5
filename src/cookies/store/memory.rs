use crate::base::error::CookieError;
use crate::cookies::canonical_cookie::CanonicalCookie;
use crate::cookies::matching::{path_match, permute_domain};
use crate::cookies::store::SyncCookieStore;
use dashmap::DashMap;
use std::sync::Arc;

/// The reference in-memory store.
///
/// Cookies are bucketed by domain. Each bucket is guarded by its DashMap
/// shard lock, so conflicting writes to the same domain are serialized.
/// Cloning yields another handle to the same cookies.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieStore {
    // Store: Map<Domain, List<Cookie>>
    // Using DashMap for high concurrency.
    cookies: Arc<DashMap<String, Vec<CanonicalCookie>>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.cookies.iter().map(|e| e.value().len()).sum()
    }

    /// Iterate over all cookies, unordered.
    pub fn iter_all_cookies(&self) -> impl Iterator<Item = CanonicalCookie> + '_ {
        self.cookies.iter().flat_map(|entry| entry.value().clone())
    }

    fn prune_empty(&self, domain: &str) {
        self.cookies.remove_if(domain, |_, bucket| bucket.is_empty());
    }
}

impl SyncCookieStore for MemoryCookieStore {
    fn store_type(&self) -> &'static str {
        "memory"
    }

    fn find_cookie(
        &self,
        domain: &str,
        path: &str,
        name: &str,
    ) -> Result<Option<CanonicalCookie>, CookieError> {
        Ok(self.cookies.get(domain).and_then(|bucket| {
            bucket
                .iter()
                .find(|c| c.path == path && c.name == name)
                .cloned()
        }))
    }

    fn find_cookies(
        &self,
        host: &str,
        path: Option<&str>,
    ) -> Result<Vec<CanonicalCookie>, CookieError> {
        let mut result = Vec::new();

        for domain in permute_domain(host) {
            if let Some(bucket) = self.cookies.get(&domain) {
                result.extend(
                    bucket
                        .iter()
                        .filter(|c| path.map_or(true, |p| path_match(p, &c.path)))
                        .cloned(),
                );
            }
        }

        Ok(result)
    }

    fn put_cookie(&self, cookie: CanonicalCookie) -> Result<(), CookieError> {
        let mut bucket = self.cookies.entry(cookie.domain.clone()).or_default();

        // Put overwrites: remove existing if name/path match
        bucket.retain(|c| c.name != cookie.name || c.path != cookie.path);
        bucket.push(cookie);
        Ok(())
    }

    fn update_cookie(
        &self,
        old: &CanonicalCookie,
        mut new: CanonicalCookie,
    ) -> Result<(), CookieError> {
        new.creation_index = old.creation_index;

        if !old.same_key(&new) {
            let (domain, path, name) = old.key();
            SyncCookieStore::remove_cookie(self, domain, path, name)?;
        }
        SyncCookieStore::put_cookie(self, new)
    }

    fn remove_cookie(&self, domain: &str, path: &str, name: &str) -> Result<(), CookieError> {
        if let Some(mut bucket) = self.cookies.get_mut(domain) {
            bucket.retain(|c| c.path != path || c.name != name);
        }
        self.prune_empty(domain);
        Ok(())
    }

    fn remove_cookies(&self, domain: &str, path: Option<&str>) -> Result<(), CookieError> {
        match path {
            Some(path) => {
                if let Some(mut bucket) = self.cookies.get_mut(domain) {
                    bucket.retain(|c| c.path != path);
                }
                self.prune_empty(domain);
            }
            None => {
                self.cookies.remove(domain);
            }
        }
        Ok(())
    }

    fn remove_all_cookies(&self) -> Result<(), CookieError> {
        self.cookies.clear();
        Ok(())
    }

    fn get_all_cookies(&self) -> Result<Vec<CanonicalCookie>, CookieError> {
        let mut all: Vec<CanonicalCookie> = self.iter_all_cookies().collect();
        all.sort_by_key(|c| c.creation_index);
        Ok(all)
    }
}
