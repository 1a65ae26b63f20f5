use crate::base::error::CookieError;
use crate::cookies::canonical_cookie::{
    next_creation_index, observe_creation_index, CanonicalCookie, SameSite,
};
use crate::cookies::config::{CookieJarConfig, GetCookiesOptions};
use crate::cookies::error::{CookieRejection, SetCookieOutcome};
use crate::cookies::matching::{canonical_domain, default_path, domain_match, path_match};
use crate::cookies::parsed_cookie::ParsedCookie;
use crate::cookies::persistence::SerializedJar;
use crate::cookies::psl::{PublicSuffixGuard, PublicSuffixList};
use crate::cookies::request_context::{RequestContext, SameSiteContext};
use crate::cookies::store::{CookieStore, MemoryCookieStore};
use futures::lock::Mutex;
use std::cmp::Ordering;
use std::future::Future;
use std::sync::Arc;
use time::OffsetDateTime;

/// RFC 6265 §5.4 retrieval order: longer paths first, then earlier
/// creation.
pub fn cookie_compare(a: &CanonicalCookie, b: &CanonicalCookie) -> Ordering {
    b.path
        .len()
        .cmp(&a.path.len())
        .then_with(|| a.creation_index.cmp(&b.creation_index))
}

/// The main entry point for cookie management.
/// Modeled after Chromium's `net::CookieMonster`.
///
/// The jar owns policy only; cookies live in its [`CookieStore`]. Every
/// operation comes in an async form and a blocking `_sync` form. The
/// blocking form needs a store whose [`CookieStore::is_synchronous`] is
/// true and fails with [`CookieError::SyncUnsupported`] otherwise.
///
/// Operations on one jar never interleave: each holds the jar's lock for
/// its whole sequence of store calls. Jars sharing a store are not
/// coordinated with each other.
pub struct CookieJar {
    store: Arc<dyn CookieStore>,
    config: CookieJarConfig,
    psl: Arc<PublicSuffixGuard>,
    lock: Mutex<()>,
}

impl std::fmt::Debug for CookieJar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieJar")
            .field("store", &self.store.store_type())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    /// A jar over a fresh [`MemoryCookieStore`].
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryCookieStore::new()))
    }

    pub fn with_store(store: Arc<dyn CookieStore>) -> Self {
        Self::with_config(store, CookieJarConfig::default())
    }

    pub fn with_config(store: Arc<dyn CookieStore>, config: CookieJarConfig) -> Self {
        Self {
            store,
            config,
            psl: Arc::new(PublicSuffixGuard::default()),
            lock: Mutex::new(()),
        }
    }

    /// Replace the public suffix data (Mozilla's list by default).
    pub fn public_suffix_list(mut self, list: impl PublicSuffixList + 'static) -> Self {
        self.psl = Arc::new(PublicSuffixGuard::new(list));
        self
    }

    pub fn config(&self) -> &CookieJarConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn CookieStore> {
        &self.store
    }

    // ---- set path ----

    /// Process a `Set-Cookie` header received for `ctx`.
    ///
    /// Policy rejections come back as [`SetCookieOutcome::Rejected`]; only
    /// store failures are errors.
    pub async fn set_cookie(
        &self,
        header: &str,
        ctx: &RequestContext,
    ) -> Result<SetCookieOutcome, CookieError> {
        self.set_cookie_at(header, ctx, OffsetDateTime::now_utc())
            .await
    }

    /// [`set_cookie`](Self::set_cookie) with an explicit clock.
    pub async fn set_cookie_at(
        &self,
        header: &str,
        ctx: &RequestContext,
        now: OffsetDateTime,
    ) -> Result<SetCookieOutcome, CookieError> {
        let _guard = self.lock.lock().await;

        let cookie = match self.build_cookie(header, ctx, now) {
            Ok(cookie) => cookie,
            Err(rejection) => {
                tracing::debug!(host = %ctx.host, reason = %rejection, "cookie rejected");
                return Ok(SetCookieOutcome::Rejected(rejection));
            }
        };

        self.persist_cookie(cookie, ctx, now).await
    }

    /// Parse and validate a header into a cookie ready to store.
    fn build_cookie(
        &self,
        header: &str,
        ctx: &RequestContext,
        now: OffsetDateTime,
    ) -> Result<CanonicalCookie, CookieRejection> {
        let parsed = ParsedCookie::parse_with(header, self.config.loose_mode)
            .map_err(CookieRejection::MalformedHeader)?;

        let host = canonical_domain(&ctx.host);

        if ctx.same_site == Some(SameSiteContext::None)
            && matches!(parsed.same_site, SameSite::Strict | SameSite::Lax)
        {
            return Err(CookieRejection::SameSiteContextMismatch);
        }

        if parsed.http_only && ctx.from_script {
            return Err(CookieRejection::HttpOnlyFromScript);
        }

        // A server may only scope cookies to itself or a parent domain
        let (domain, host_only) = match &parsed.domain {
            Some(domain) => {
                // Only one leading dot is ignored; "..example.com" names no host
                if domain.starts_with('.') || !domain_match(&host, domain, false) {
                    return Err(CookieRejection::DomainMismatch);
                }
                (domain.clone(), false)
            }
            None => (host.clone(), true),
        };

        if self.config.reject_public_suffixes && !self.psl.allows(&domain, &host, host_only) {
            return Err(CookieRejection::PublicSuffixDomain);
        }

        let path = match &parsed.path {
            Some(path) if !path.is_empty() => path.clone(),
            _ => default_path(&ctx.path),
        };

        let expiration_time = parsed.expiry(now);
        let cookie = CanonicalCookie {
            name: parsed.name,
            value: parsed.value,
            domain,
            path,
            creation_time: now,
            expiration_time,
            max_age: parsed.max_age,
            last_access_time: now,
            secure: parsed.secure,
            http_only: parsed.http_only,
            host_only,
            same_site: parsed.same_site,
            priority: parsed.priority,
            // Assigned when persisted
            creation_index: 0,
            extensions: parsed.extensions,
        };

        if self.config.enforce_prefixes {
            cookie.validate_prefix(ctx.is_secure(), self.config.enforce_secure_origin)?;
        }

        if cookie.secure && !ctx.is_secure() && self.config.enforce_secure_origin {
            return Err(CookieRejection::InsecureOrigin);
        }

        Ok(cookie)
    }

    async fn persist_cookie(
        &self,
        mut cookie: CanonicalCookie,
        ctx: &RequestContext,
        now: OffsetDateTime,
    ) -> Result<SetCookieOutcome, CookieError> {
        let existing = self
            .store
            .find_cookie(&cookie.domain, &cookie.path, &cookie.name)
            .await?;

        if let Some(old) = &existing {
            if old.http_only && ctx.from_script {
                tracing::debug!(
                    domain = %cookie.domain,
                    name = %cookie.name,
                    "script may not overwrite HttpOnly cookie"
                );
                return Ok(SetCookieOutcome::Rejected(
                    CookieRejection::HttpOnlyOverwriteBlocked,
                ));
            }
        }

        // Setting an already-expired cookie is how servers delete one
        if cookie.is_expired(now) {
            cookie.creation_index = match &existing {
                Some(old) => old.creation_index,
                None => next_creation_index(),
            };
            if existing.is_some() {
                self.store
                    .remove_cookie(&cookie.domain, &cookie.path, &cookie.name)
                    .await?;
                tracing::debug!(domain = %cookie.domain, name = %cookie.name, "cookie deleted by expiry");
            }
            return Ok(SetCookieOutcome::Deleted(cookie));
        }

        match existing {
            Some(old) => {
                cookie.creation_index = old.creation_index;
                cookie.creation_time = old.creation_time;
                self.store.update_cookie(&old, cookie.clone()).await?;
            }
            None => {
                cookie.creation_index = next_creation_index();
                self.store.put_cookie(cookie.clone()).await?;
            }
        }

        self.enforce_domain_limit(&cookie, now).await?;
        self.enforce_global_limit(&cookie, now).await?;

        Ok(SetCookieOutcome::Stored(cookie))
    }

    /// Drop expired cookies, then evict the least valuable ones until at
    /// most `max` remain. Lower priority goes first, then older cookies.
    /// `keep` is the cookie just set and is never a candidate.
    async fn evict(
        &self,
        cookies: Vec<CanonicalCookie>,
        max: usize,
        keep: &CanonicalCookie,
        now: OffsetDateTime,
    ) -> Result<(), CookieError> {
        let (expired, mut live): (Vec<_>, Vec<_>) =
            cookies.into_iter().partition(|c| c.is_expired(now));

        for cookie in &expired {
            let (domain, path, name) = cookie.key();
            self.store.remove_cookie(domain, path, name).await?;
        }

        if live.len() <= max {
            return Ok(());
        }

        live.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.creation_index.cmp(&b.creation_index))
        });

        let excess = live.len() - max;
        let candidates = live.iter().filter(|c| !c.same_key(keep));
        for cookie in candidates.take(excess) {
            tracing::debug!(
                domain = %cookie.domain,
                name = %cookie.name,
                creation_index = cookie.creation_index,
                "evicting cookie over quota"
            );
            let (domain, path, name) = cookie.key();
            self.store.remove_cookie(domain, path, name).await?;
        }

        Ok(())
    }

    /// Enforce the per-domain limit. Zero disables it.
    async fn enforce_domain_limit(
        &self,
        just_set: &CanonicalCookie,
        now: OffsetDateTime,
    ) -> Result<(), CookieError> {
        let max = self.config.max_cookies_per_domain;
        if max == 0 {
            return Ok(());
        }

        let domain = just_set.domain.as_str();
        let cookies: Vec<CanonicalCookie> = self
            .store
            .find_cookies(domain, None)
            .await?
            .into_iter()
            .filter(|c| c.domain == domain)
            .collect();

        if cookies.len() <= max {
            return Ok(());
        }
        self.evict(cookies, max, just_set, now).await
    }

    /// Enforce the jar-wide limit. Zero disables it.
    async fn enforce_global_limit(
        &self,
        just_set: &CanonicalCookie,
        now: OffsetDateTime,
    ) -> Result<(), CookieError> {
        let max = self.config.max_cookies_total;
        if max == 0 {
            return Ok(());
        }

        let cookies = self.store.get_all_cookies().await?;
        if cookies.len() <= max {
            return Ok(());
        }
        self.evict(cookies, max, just_set, now).await
    }

    // ---- get path ----

    /// Cookies to send with a request for `ctx`, in RFC 6265 §5.4 order.
    pub async fn get_cookies(&self, ctx: &RequestContext) -> Result<Vec<CanonicalCookie>, CookieError> {
        self.get_cookies_with(ctx, GetCookiesOptions::default())
            .await
    }

    pub async fn get_cookies_with(
        &self,
        ctx: &RequestContext,
        options: GetCookiesOptions,
    ) -> Result<Vec<CanonicalCookie>, CookieError> {
        self.get_cookies_at(ctx, options, OffsetDateTime::now_utc())
            .await
    }

    /// [`get_cookies_with`](Self::get_cookies_with) with an explicit clock.
    pub async fn get_cookies_at(
        &self,
        ctx: &RequestContext,
        options: GetCookiesOptions,
        now: OffsetDateTime,
    ) -> Result<Vec<CanonicalCookie>, CookieError> {
        let _guard = self.lock.lock().await;

        let host = canonical_domain(&ctx.host);
        let path_filter = if options.all_paths {
            None
        } else {
            Some(ctx.path.as_str())
        };
        let candidates = self.store.find_cookies(&host, path_filter).await?;

        let secure = ctx.is_secure();
        let mut result = Vec::with_capacity(candidates.len());

        for cookie in candidates {
            if !domain_match(&host, &cookie.domain, cookie.host_only) {
                continue;
            }
            if !options.all_paths && !path_match(&ctx.path, &cookie.path) {
                continue;
            }
            if cookie.secure && !secure {
                continue;
            }
            if cookie.http_only && ctx.from_script {
                continue;
            }
            if let Some(context) = ctx.same_site {
                if cookie.same_site.level() > context.level() {
                    continue;
                }
            }

            if cookie.is_expired(now) {
                if options.expire {
                    let (domain, path, name) = cookie.key();
                    if let Err(e) = self.store.remove_cookie(domain, path, name).await {
                        tracing::warn!(domain = %domain, name = %name, error = %e, "failed to remove expired cookie");
                    }
                }
                continue;
            }

            tracing::trace!(domain = %cookie.domain, name = %cookie.name, "cookie matched");
            result.push(cookie);
        }

        if options.sort {
            result.sort_by(cookie_compare);
        }

        if options.touch {
            for cookie in result.iter_mut() {
                let old = cookie.clone();
                cookie.last_access_time = now;
                // Best-effort: a failed touch must not fail retrieval
                if let Err(e) = self.store.update_cookie(&old, cookie.clone()).await {
                    tracing::warn!(domain = %cookie.domain, name = %cookie.name, error = %e, "failed to update last access time");
                }
            }
        }

        Ok(result)
    }

    /// The `Cookie` request header value for `ctx` (`k=v; k2=v2`).
    pub async fn get_cookie_string(&self, ctx: &RequestContext) -> Result<String, CookieError> {
        let cookies = self.get_cookies(ctx).await?;
        Ok(cookies
            .iter()
            .map(CanonicalCookie::cookie_string)
            .collect::<Vec<_>>()
            .join("; "))
    }

    /// Matching cookies rendered back into `Set-Cookie` header values.
    pub async fn get_set_cookie_strings(&self, ctx: &RequestContext) -> Result<Vec<String>, CookieError> {
        let cookies = self.get_cookies(ctx).await?;
        Ok(cookies
            .iter()
            .map(CanonicalCookie::to_set_cookie_string)
            .collect())
    }

    // ---- removal ----

    pub async fn remove_cookie(&self, domain: &str, path: &str, name: &str) -> Result<(), CookieError> {
        let _guard = self.lock.lock().await;
        self.store
            .remove_cookie(&canonical_domain(domain), path, name)
            .await
    }

    pub async fn remove_cookies(&self, domain: &str, path: Option<&str>) -> Result<(), CookieError> {
        let _guard = self.lock.lock().await;
        self.store
            .remove_cookies(&canonical_domain(domain), path)
            .await
    }

    pub async fn remove_all_cookies(&self) -> Result<(), CookieError> {
        let _guard = self.lock.lock().await;
        self.store.remove_all_cookies().await
    }

    /// Every stored cookie, expired or not, in creation order.
    pub async fn get_all_cookies(&self) -> Result<Vec<CanonicalCookie>, CookieError> {
        let _guard = self.lock.lock().await;
        self.store.get_all_cookies().await
    }

    // ---- serialization ----

    /// Snapshot the jar's policy and every stored cookie.
    pub async fn serialize(&self) -> Result<SerializedJar, CookieError> {
        let _guard = self.lock.lock().await;
        let cookies = self.store.get_all_cookies().await?;
        Ok(SerializedJar::new(
            self.store.store_type(),
            self.config.clone(),
            &cookies,
        ))
    }

    /// Rebuild a jar over a fresh [`MemoryCookieStore`].
    pub async fn deserialize(serialized: SerializedJar) -> Result<CookieJar, CookieError> {
        Self::deserialize_into(serialized, Arc::new(MemoryCookieStore::new())).await
    }

    /// Rebuild a jar over `store`.
    ///
    /// Creation indices are restored as stored. Cookies that expired while
    /// the snapshot was at rest are skipped.
    pub async fn deserialize_into(
        serialized: SerializedJar,
        store: Arc<dyn CookieStore>,
    ) -> Result<CookieJar, CookieError> {
        serialized.check_version()?;

        let jar = CookieJar::with_config(store, serialized.config);
        jar.restore(serialized.cookies.into_iter().map(|s| s.into_cookie()))
            .await?;
        Ok(jar)
    }

    async fn restore(
        &self,
        cookies: impl Iterator<Item = Result<CanonicalCookie, CookieError>>,
    ) -> Result<(), CookieError> {
        let now = OffsetDateTime::now_utc();
        let mut restored = 0usize;

        for cookie in cookies {
            let cookie = cookie?;
            if cookie.is_expired(now) {
                tracing::debug!(domain = %cookie.domain, name = %cookie.name, "skipping expired cookie");
                continue;
            }
            observe_creation_index(cookie.creation_index);
            self.store.put_cookie(cookie).await?;
            restored += 1;
        }

        tracing::debug!(count = restored, store = self.store.store_type(), "restored cookie jar");
        Ok(())
    }

    /// Copy this jar, policy and cookies, into a new jar over `store`.
    pub async fn clone_into(&self, store: Arc<dyn CookieStore>) -> Result<CookieJar, CookieError> {
        let serialized = self.serialize().await?;
        let mut jar = Self::deserialize_into(serialized, store).await?;
        jar.psl = Arc::clone(&self.psl);
        Ok(jar)
    }

    // ---- blocking convention ----

    fn run_sync<T>(&self, fut: impl Future<Output = Result<T, CookieError>>) -> Result<T, CookieError> {
        if !self.store.is_synchronous() {
            return Err(CookieError::SyncUnsupported);
        }
        futures::executor::block_on(fut)
    }

    pub fn set_cookie_sync(&self, header: &str, ctx: &RequestContext) -> Result<SetCookieOutcome, CookieError> {
        self.run_sync(self.set_cookie(header, ctx))
    }

    pub fn set_cookie_at_sync(
        &self,
        header: &str,
        ctx: &RequestContext,
        now: OffsetDateTime,
    ) -> Result<SetCookieOutcome, CookieError> {
        self.run_sync(self.set_cookie_at(header, ctx, now))
    }

    pub fn get_cookies_sync(&self, ctx: &RequestContext) -> Result<Vec<CanonicalCookie>, CookieError> {
        self.run_sync(self.get_cookies(ctx))
    }

    pub fn get_cookies_with_sync(
        &self,
        ctx: &RequestContext,
        options: GetCookiesOptions,
    ) -> Result<Vec<CanonicalCookie>, CookieError> {
        self.run_sync(self.get_cookies_with(ctx, options))
    }

    pub fn get_cookies_at_sync(
        &self,
        ctx: &RequestContext,
        options: GetCookiesOptions,
        now: OffsetDateTime,
    ) -> Result<Vec<CanonicalCookie>, CookieError> {
        self.run_sync(self.get_cookies_at(ctx, options, now))
    }

    pub fn get_cookie_string_sync(&self, ctx: &RequestContext) -> Result<String, CookieError> {
        self.run_sync(self.get_cookie_string(ctx))
    }

    pub fn get_set_cookie_strings_sync(&self, ctx: &RequestContext) -> Result<Vec<String>, CookieError> {
        self.run_sync(self.get_set_cookie_strings(ctx))
    }

    pub fn remove_cookie_sync(&self, domain: &str, path: &str, name: &str) -> Result<(), CookieError> {
        self.run_sync(self.remove_cookie(domain, path, name))
    }

    pub fn remove_cookies_sync(&self, domain: &str, path: Option<&str>) -> Result<(), CookieError> {
        self.run_sync(self.remove_cookies(domain, path))
    }

    pub fn remove_all_cookies_sync(&self) -> Result<(), CookieError> {
        self.run_sync(self.remove_all_cookies())
    }

    pub fn get_all_cookies_sync(&self) -> Result<Vec<CanonicalCookie>, CookieError> {
        self.run_sync(self.get_all_cookies())
    }

    pub fn serialize_sync(&self) -> Result<SerializedJar, CookieError> {
        self.run_sync(self.serialize())
    }

    pub fn deserialize_sync(serialized: SerializedJar) -> Result<CookieJar, CookieError> {
        futures::executor::block_on(Self::deserialize(serialized))
    }

    pub fn deserialize_into_sync(
        serialized: SerializedJar,
        store: Arc<dyn CookieStore>,
    ) -> Result<CookieJar, CookieError> {
        if !store.is_synchronous() {
            return Err(CookieError::SyncUnsupported);
        }
        futures::executor::block_on(Self::deserialize_into(serialized, store))
    }

    pub fn clone_into_sync(&self, store: Arc<dyn CookieStore>) -> Result<CookieJar, CookieError> {
        if !store.is_synchronous() {
            return Err(CookieError::SyncUnsupported);
        }
        self.run_sync(self.clone_into(store))
    }
}
