use cookiemonster::cookies::canonical_cookie::CanonicalCookie;
use cookiemonster::cookies::config::{CookieJarConfig, GetCookiesOptions};
use cookiemonster::cookies::error::{CookieRejection, SetCookieOutcome};
use cookiemonster::cookies::jar::CookieJar;
use cookiemonster::cookies::parsed_cookie::ParseFailure;
use cookiemonster::cookies::request_context::{RequestContext, SameSiteContext};
use cookiemonster::cookies::store::MemoryCookieStore;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};

fn ctx(url: &str) -> RequestContext {
    RequestContext::parse(url).unwrap()
}

fn names(cookies: &[CanonicalCookie]) -> Vec<&str> {
    cookies.iter().map(|c| c.name.as_str()).collect()
}

fn jar_with(config: CookieJarConfig) -> CookieJar {
    CookieJar::with_config(Arc::new(MemoryCookieStore::new()), config)
}

#[test]
fn test_parse_and_save() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/foo");
    let outcome = jar.set_cookie_sync("foo=bar; Path=/", &url).unwrap();
    assert!(outcome.is_stored());

    let cookies = jar.get_cookies_sync(&url).unwrap();
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "foo");
    assert_eq!(cookies[0].value, "bar");
    assert_eq!(cookies[0].path, "/");
}

#[test]
fn test_domain_matching() {
    let jar = CookieJar::new();
    let a = ctx("https://a.example.com");
    let b = ctx("https://b.example.com");

    // Cookie for exact host
    jar.set_cookie_sync("host=val", &a).unwrap();
    // Cookie for domain
    jar.set_cookie_sync("domain=val; Domain=.example.com", &a).unwrap();

    let cookies = jar.get_cookies_sync(&a).unwrap();
    assert_eq!(names(&cookies), vec!["host", "domain"]);

    // Host-only cookies never reach siblings
    let cookies = jar.get_cookies_sync(&b).unwrap();
    assert_eq!(names(&cookies), vec!["domain"]);

    let cookies = jar.get_cookies_sync(&ctx("https://example.com")).unwrap();
    assert_eq!(names(&cookies), vec!["domain"]);
}

#[test]
fn test_domain_mismatch_rejected() {
    let jar = CookieJar::new();
    let outcome = jar
        .set_cookie_sync("a=b; Domain=other.com", &ctx("https://example.com"))
        .unwrap();
    assert_eq!(outcome.rejection(), Some(CookieRejection::DomainMismatch));

    // A subdomain of the request host is not a parent
    let outcome = jar
        .set_cookie_sync("a=b; Domain=sub.example.com", &ctx("https://example.com"))
        .unwrap();
    assert_eq!(outcome.rejection(), Some(CookieRejection::DomainMismatch));
}

#[test]
fn test_repeated_leading_dots_rejected() {
    let jar = CookieJar::new();
    let url = ctx("http://a.example.com/");

    let outcome = jar
        .set_cookie_sync("a=b; Domain=..example.com", &url)
        .unwrap();
    assert_eq!(outcome.rejection(), Some(CookieRejection::DomainMismatch));

    // Nothing unreachable is left behind in the store
    assert!(jar.get_all_cookies_sync().unwrap().is_empty());
    assert!(jar.get_cookies_sync(&url).unwrap().is_empty());

    // A single leading dot is still ignored
    let outcome = jar.set_cookie_sync("a=b; Domain=.example.com", &url).unwrap();
    assert!(outcome.is_stored());
    assert_eq!(names(&jar.get_cookies_sync(&url).unwrap()), vec!["a"]);
}

#[test]
fn test_ip_host_matches_exactly() {
    let jar = CookieJar::new();
    let ip = ctx("http://192.168.0.1/");

    let outcome = jar.set_cookie_sync("a=b; Domain=168.0.1", &ip).unwrap();
    assert_eq!(outcome.rejection(), Some(CookieRejection::DomainMismatch));

    assert!(jar.set_cookie_sync("a=b", &ip).unwrap().is_stored());
    assert_eq!(jar.get_cookie_string_sync(&ip).unwrap(), "a=b");
}

#[test]
fn test_localhost_public_suffix() {
    let jar = CookieJar::new();
    let localhost = ctx("http://localhost");

    let outcome = jar.set_cookie_sync("a=b; Domain=localhost", &localhost).unwrap();
    assert_eq!(outcome.rejection(), Some(CookieRejection::PublicSuffixDomain));

    // An empty Domain is as if absent, giving a host-only cookie
    let outcome = jar.set_cookie_sync("a=b; Domain=", &localhost).unwrap();
    let cookie = outcome.cookie().unwrap();
    assert!(cookie.host_only);
    assert_eq!(cookie.domain, "localhost");

    assert_eq!(jar.get_cookie_string_sync(&localhost).unwrap(), "a=b");
}

#[test]
fn test_supercookie_rejected() {
    let jar = CookieJar::new();

    let outcome = jar
        .set_cookie_sync("a=b; Domain=co.uk", &ctx("https://example.co.uk"))
        .unwrap();
    assert_eq!(outcome.rejection(), Some(CookieRejection::PublicSuffixDomain));

    let outcome = jar
        .set_cookie_sync("a=b; Domain=.com", &ctx("https://example.com"))
        .unwrap();
    assert_eq!(outcome.rejection(), Some(CookieRejection::PublicSuffixDomain));

    // The guard can be switched off
    let lax = jar_with(CookieJarConfig::new().reject_public_suffixes(false));
    let outcome = lax
        .set_cookie_sync("a=b; Domain=co.uk", &ctx("https://example.co.uk"))
        .unwrap();
    assert!(outcome.is_stored());
}

#[test]
fn test_path_matching() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/foo/bar");

    jar.set_cookie_sync("root=val; Path=/", &url).unwrap();
    jar.set_cookie_sync("foo=val; Path=/foo", &url).unwrap();
    jar.set_cookie_sync("baz=val; Path=/baz", &url).unwrap();

    let cookies = jar.get_cookies_sync(&url).unwrap();
    assert_eq!(names(&cookies), vec!["foo", "root"]);

    // Prefix match must stop at a segment boundary
    let cookies = jar.get_cookies_sync(&ctx("https://example.com/foobar")).unwrap();
    assert_eq!(names(&cookies), vec!["root"]);
}

#[test]
fn test_path_specificity_ordering() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/some/path/file");

    jar.set_cookie_sync("root=1; Path=/", &url).unwrap();
    jar.set_cookie_sync("deep=1; Path=/some/path/", &url).unwrap();

    let cookies = jar.get_cookies_sync(&url).unwrap();
    assert_eq!(names(&cookies), vec!["deep", "root"]);
}

#[test]
fn test_creation_order_survives_update() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/");

    let first = jar.set_cookie_sync("a=1", &url).unwrap().into_cookie().unwrap();
    jar.set_cookie_sync("b=1", &url).unwrap();
    let updated = jar.set_cookie_sync("a=2", &url).unwrap().into_cookie().unwrap();

    assert_eq!(updated.creation_index, first.creation_index);
    assert_eq!(updated.creation_time, first.creation_time);
    assert_eq!(jar.get_cookie_string_sync(&url).unwrap(), "a=2; b=1");
}

#[test]
fn test_default_path() {
    let jar = CookieJar::new();
    let outcome = jar
        .set_cookie_sync("a=1", &ctx("https://example.com/dir/page"))
        .unwrap();
    assert_eq!(outcome.cookie().unwrap().path, "/dir");

    let outcome = jar
        .set_cookie_sync("b=1; Path=relative", &ctx("https://example.com/page"))
        .unwrap();
    assert_eq!(outcome.cookie().unwrap().path, "/");
}

#[test]
fn test_malformed_input_tolerance() {
    let jar = CookieJar::new();
    let url = ctx("http://example.com/dir/index.html");

    let outcome = jar.set_cookie_sync("broken_path=testme; path=/;", &url).unwrap();
    assert_eq!(outcome.cookie().unwrap().path, "/");

    let outcome = jar.set_cookie_sync("b=2; Path=/;;;;", &url).unwrap();
    assert_eq!(outcome.cookie().unwrap().path, "/");

    let outcome = jar.set_cookie_sync("c=3;   Secure ;HttpOnly;", &url).unwrap();
    let cookie = outcome.cookie().unwrap();
    assert!(cookie.secure);
    assert!(cookie.http_only);

    // Bad attribute values drop the attribute, not the cookie
    let outcome = jar
        .set_cookie_sync("d=4; Max-Age=soon; Expires=whenever", &url)
        .unwrap();
    let cookie = outcome.cookie().unwrap();
    assert!(cookie.expiration_time.is_none());
}

#[test]
fn test_unusable_header_rejected() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/");

    for header in ["", "   ", ";;"] {
        let outcome = jar.set_cookie_sync(header, &url).unwrap();
        assert!(matches!(
            outcome.rejection(),
            Some(CookieRejection::MalformedHeader(_))
        ));
    }

    let outcome = jar.set_cookie_sync("novalue", &url).unwrap();
    assert_eq!(
        outcome.rejection(),
        Some(CookieRejection::MalformedHeader(ParseFailure::MissingName))
    );

    // Loose mode keeps nameless cookies
    let loose = jar_with(CookieJarConfig::new().loose_mode(true));
    assert!(loose.set_cookie_sync("novalue", &url).unwrap().is_stored());
    assert_eq!(loose.get_cookie_string_sync(&url).unwrap(), "novalue");
}

#[test]
fn test_expiry_deletes_existing() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/");

    jar.set_cookie_sync("a=1; Max-Age=3600", &url).unwrap();
    jar.set_cookie_sync("b=1; Max-Age=3600", &url).unwrap();
    assert_eq!(jar.get_cookies_sync(&url).unwrap().len(), 2);

    let outcome = jar.set_cookie_sync("a=1; Max-Age=0", &url).unwrap();
    assert!(matches!(outcome, SetCookieOutcome::Deleted(_)));

    let outcome = jar
        .set_cookie_sync("b=1; Expires=Thu, 01 Jan 1970 00:00:00 GMT", &url)
        .unwrap();
    assert!(matches!(outcome, SetCookieOutcome::Deleted(_)));

    assert!(jar.get_cookies_sync(&url).unwrap().is_empty());
    assert!(jar.get_all_cookies_sync().unwrap().is_empty());
}

#[test]
fn test_max_age_wins_over_expires() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/");

    let outcome = jar
        .set_cookie_sync(
            "a=1; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=3600",
            &url,
        )
        .unwrap();
    assert!(outcome.is_stored());
    assert!(outcome.cookie().unwrap().is_persistent());
}

#[test]
fn test_lazy_expiry_on_read() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/");
    let now = OffsetDateTime::now_utc();

    jar.set_cookie_at_sync("short=1; Max-Age=60", &url, now).unwrap();
    jar.set_cookie_at_sync("session=1", &url, now).unwrap();

    let later = now + Duration::minutes(2);
    let cookies = jar
        .get_cookies_at_sync(&url, GetCookiesOptions::default(), later)
        .unwrap();
    assert_eq!(names(&cookies), vec!["session"]);

    let remaining = jar.get_all_cookies_sync().unwrap();
    assert_eq!(names(&remaining), vec!["session"]);
}

#[test]
fn test_lazy_expiry_can_be_disabled() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/");
    let now = OffsetDateTime::now_utc();

    jar.set_cookie_at_sync("short=1; Max-Age=60", &url, now).unwrap();
    let cookies = jar
        .get_cookies_at_sync(
            &url,
            GetCookiesOptions::new().expire(false),
            now + Duration::minutes(2),
        )
        .unwrap();
    assert!(cookies.is_empty());
    assert_eq!(jar.get_all_cookies_sync().unwrap().len(), 1);
}

#[test]
fn test_last_access_touched() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/");
    let now = OffsetDateTime::now_utc();

    jar.set_cookie_at_sync("a=1", &url, now).unwrap();
    let later = now + Duration::hours(1);
    jar.get_cookies_at_sync(&url, GetCookiesOptions::default(), later)
        .unwrap();

    let stored = jar.get_all_cookies_sync().unwrap();
    assert_eq!(stored[0].last_access_time, later);
    assert_eq!(stored[0].creation_time, now);
}

#[test]
fn test_host_prefix() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/");

    let outcome = jar
        .set_cookie_sync("__Host-a=b; Domain=example.com; Path=/sub", &url)
        .unwrap();
    assert_eq!(
        outcome.rejection(),
        Some(CookieRejection::PrefixConstraintViolation)
    );

    // Default path of a nested request is not the root
    let nested = ctx("https://example.com/dir/page");
    let outcome = jar.set_cookie_sync("__Host-a=b; Secure", &nested).unwrap();
    assert_eq!(
        outcome.rejection(),
        Some(CookieRejection::PrefixConstraintViolation)
    );

    let outcome = jar.set_cookie_sync("__Host-a=b; Secure; Path=/", &url).unwrap();
    assert!(outcome.is_stored());
}

#[test]
fn test_secure_prefix() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/");

    let outcome = jar.set_cookie_sync("__Secure-a=b", &url).unwrap();
    assert_eq!(
        outcome.rejection(),
        Some(CookieRejection::PrefixConstraintViolation)
    );

    let outcome = jar
        .set_cookie_sync("__Secure-a=b; Secure; Domain=example.com", &url)
        .unwrap();
    assert!(outcome.is_stored());
}

#[test]
fn test_secure_flag() {
    let jar = CookieJar::new();
    let https_url = ctx("https://example.com");
    let http_url = ctx("http://example.com");

    jar.set_cookie_sync("sec=saved; Secure", &https_url).unwrap();

    let cookies_https = jar.get_cookies_sync(&https_url).unwrap();
    assert_eq!(cookies_https.len(), 1);

    let cookies_http = jar.get_cookies_sync(&http_url).unwrap();
    assert_eq!(cookies_http.len(), 0);
}

#[test]
fn test_secure_origin_policy() {
    let http_url = ctx("http://example.com");

    // Permissive by default
    let jar = CookieJar::new();
    assert!(jar.set_cookie_sync("a=1; Secure", &http_url).unwrap().is_stored());

    let strict = jar_with(CookieJarConfig::new().enforce_secure_origin(true));
    let outcome = strict.set_cookie_sync("a=1; Secure", &http_url).unwrap();
    assert_eq!(outcome.rejection(), Some(CookieRejection::InsecureOrigin));

    let outcome = strict
        .set_cookie_sync("__Secure-a=1; Secure", &http_url)
        .unwrap();
    assert_eq!(
        outcome.rejection(),
        Some(CookieRejection::PrefixConstraintViolation)
    );
}

#[test]
fn test_http_only_from_script() {
    let jar = CookieJar::new();
    let http = ctx("https://example.com/");
    let script = ctx("https://example.com/").from_script(true);

    jar.set_cookie_sync("sid=1; HttpOnly", &http).unwrap();
    jar.set_cookie_sync("pref=dark", &http).unwrap();

    // Hidden from script, visible to HTTP
    assert_eq!(jar.get_cookie_string_sync(&script).unwrap(), "pref=dark");
    assert_eq!(jar.get_cookie_string_sync(&http).unwrap(), "sid=1; pref=dark");

    let outcome = jar.set_cookie_sync("sid=2", &script).unwrap();
    assert_eq!(
        outcome.rejection(),
        Some(CookieRejection::HttpOnlyOverwriteBlocked)
    );

    let outcome = jar.set_cookie_sync("other=1; HttpOnly", &script).unwrap();
    assert_eq!(outcome.rejection(), Some(CookieRejection::HttpOnlyFromScript));

    // HTTP may still replace it
    assert!(jar.set_cookie_sync("sid=3; HttpOnly", &http).unwrap().is_stored());
    assert_eq!(jar.get_cookie_string_sync(&http).unwrap(), "sid=3; pref=dark");
}

#[test]
fn test_same_site_contexts() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/");

    jar.set_cookie_sync("s=1; SameSite=Strict", &url).unwrap();
    jar.set_cookie_sync("l=1; SameSite=Lax", &url).unwrap();
    jar.set_cookie_sync("n=1; SameSite=None; Secure", &url).unwrap();

    let all = jar.get_cookies_sync(&url).unwrap();
    assert_eq!(names(&all), vec!["s", "l", "n"]);

    let same_site = url.clone().same_site(SameSiteContext::Strict);
    assert_eq!(names(&jar.get_cookies_sync(&same_site).unwrap()), vec!["s", "l", "n"]);

    let navigation = url.clone().same_site(SameSiteContext::Lax);
    assert_eq!(names(&jar.get_cookies_sync(&navigation).unwrap()), vec!["l", "n"]);

    let cross_site = url.clone().same_site(SameSiteContext::None);
    assert_eq!(names(&jar.get_cookies_sync(&cross_site).unwrap()), vec!["n"]);

    let outcome = jar.set_cookie_sync("x=1; SameSite=Lax", &cross_site).unwrap();
    assert_eq!(
        outcome.rejection(),
        Some(CookieRejection::SameSiteContextMismatch)
    );
}

#[test]
fn test_cookie_and_set_cookie_strings() {
    let jar = CookieJar::new();
    let url = ctx("https://www.example.com/");

    jar.set_cookie_sync(
        "a=1; Domain=example.com; Path=/; Secure; HttpOnly; SameSite=Lax",
        &url,
    )
    .unwrap();
    jar.set_cookie_sync("b=2; Priority=High", &url).unwrap();

    assert_eq!(jar.get_cookie_string_sync(&url).unwrap(), "a=1; b=2");
    assert_eq!(
        jar.get_set_cookie_strings_sync(&url).unwrap(),
        vec![
            "a=1; Domain=example.com; Path=/; Secure; HttpOnly; SameSite=Lax".to_string(),
            "b=2; Path=/; Priority=High".to_string(),
        ]
    );
}

#[test]
fn test_per_domain_eviction() {
    let jar = jar_with(CookieJarConfig::new().max_cookies_per_domain(3));
    let url = ctx("https://example.com/");

    for i in 0..5 {
        jar.set_cookie_sync(&format!("c{}=v", i), &url).unwrap();
    }

    let cookies = jar.get_cookies_sync(&url).unwrap();
    assert_eq!(names(&cookies), vec!["c2", "c3", "c4"]);
}

#[test]
fn test_eviction_respects_priority() {
    let jar = jar_with(CookieJarConfig::new().max_cookies_per_domain(2));
    let url = ctx("https://example.com/");

    jar.set_cookie_sync("a=1; Priority=High", &url).unwrap();
    jar.set_cookie_sync("b=1", &url).unwrap();
    jar.set_cookie_sync("c=1", &url).unwrap();

    let cookies = jar.get_cookies_sync(&url).unwrap();
    assert_eq!(names(&cookies), vec!["a", "c"]);
}

#[test]
fn test_cookie_being_set_is_never_evicted() {
    let jar = jar_with(CookieJarConfig::new().max_cookies_per_domain(2));
    let url = ctx("https://example.com/");

    jar.set_cookie_sync("a=1", &url).unwrap();
    jar.set_cookie_sync("b=1", &url).unwrap();

    // Lowest priority, but it is the cookie that triggered eviction
    let outcome = jar.set_cookie_sync("c=1; Priority=Low", &url).unwrap();
    assert!(outcome.is_stored());
    assert_eq!(outcome.cookie().map(|c| c.name.as_str()), Some("c"));

    let cookies = jar.get_cookies_sync(&url).unwrap();
    assert_eq!(names(&cookies), vec!["b", "c"]);
}

#[test]
fn test_cookie_being_set_survives_global_limit() {
    let jar = jar_with(CookieJarConfig::new().max_cookies_total(2));

    jar.set_cookie_sync("k=v", &ctx("https://a.com/")).unwrap();
    jar.set_cookie_sync("k=v", &ctx("https://b.com/")).unwrap();
    let outcome = jar
        .set_cookie_sync("k=v; Priority=Low", &ctx("https://c.com/"))
        .unwrap();
    assert!(outcome.is_stored());

    let domains: Vec<String> = jar
        .get_all_cookies_sync()
        .unwrap()
        .into_iter()
        .map(|c| c.domain)
        .collect();
    assert_eq!(domains, vec!["b.com", "c.com"]);
}

#[test]
fn test_global_eviction() {
    let jar = jar_with(CookieJarConfig::new().max_cookies_total(3));

    for host in ["a.com", "b.com", "c.com", "d.com"] {
        jar.set_cookie_sync("k=v", &ctx(&format!("https://{}/", host)))
            .unwrap();
    }

    let domains: Vec<String> = jar
        .get_all_cookies_sync()
        .unwrap()
        .into_iter()
        .map(|c| c.domain)
        .collect();
    assert_eq!(domains, vec!["b.com", "c.com", "d.com"]);
}

#[test]
fn test_zero_limit_is_unlimited() {
    let jar = jar_with(CookieJarConfig::new().max_cookies_per_domain(0));
    let url = ctx("https://example.com/");

    for i in 0..60 {
        jar.set_cookie_sync(&format!("c{}=v", i), &url).unwrap();
    }
    assert_eq!(jar.get_cookies_sync(&url).unwrap().len(), 60);
}

#[test]
fn test_removal() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/dir/page");

    jar.set_cookie_sync("a=1; Path=/", &url).unwrap();
    jar.set_cookie_sync("b=1; Path=/dir", &url).unwrap();
    jar.set_cookie_sync("c=1; Path=/dir", &url).unwrap();
    jar.set_cookie_sync("d=1", &ctx("https://other.com/")).unwrap();

    jar.remove_cookie_sync("example.com", "/", "a").unwrap();
    assert_eq!(names(&jar.get_cookies_sync(&url).unwrap()), vec!["b", "c"]);

    jar.remove_cookies_sync("EXAMPLE.com", Some("/dir")).unwrap();
    assert!(jar.get_cookies_sync(&url).unwrap().is_empty());
    assert_eq!(jar.get_all_cookies_sync().unwrap().len(), 1);

    jar.remove_all_cookies_sync().unwrap();
    assert!(jar.get_all_cookies_sync().unwrap().is_empty());
}

#[test]
fn test_all_paths_option() {
    let jar = CookieJar::new();
    let url = ctx("https://example.com/a");

    jar.set_cookie_sync("root=1; Path=/", &url).unwrap();
    jar.set_cookie_sync("other=1; Path=/elsewhere", &url).unwrap();

    let cookies = jar
        .get_cookies_with_sync(&url, GetCookiesOptions::new().all_paths(true))
        .unwrap();
    assert_eq!(names(&cookies), vec!["other", "root"]);
}

#[tokio::test]
async fn test_async_convention() {
    let jar = CookieJar::new();
    let url = ctx("https://a.example.com/");

    let outcome = jar
        .set_cookie("sid=42; Domain=example.com", &url)
        .await
        .unwrap();
    assert!(outcome.is_stored());

    let other = ctx("https://b.example.com/");
    assert_eq!(jar.get_cookie_string(&other).await.unwrap(), "sid=42");

    jar.remove_all_cookies().await.unwrap();
    assert!(jar.get_cookies(&other).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sets() {
    let jar = Arc::new(CookieJar::new());

    let mut handles = Vec::new();
    for i in 0..20 {
        let jar = Arc::clone(&jar);
        handles.push(tokio::spawn(async move {
            let url = RequestContext::new("example.com", "/", "https");
            jar.set_cookie(&format!("c{}=v", i), &url).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let url = RequestContext::new("example.com", "/", "https");
    let cookies = jar.get_cookies(&url).await.unwrap();
    assert_eq!(cookies.len(), 20);

    // Creation order is strictly increasing in retrieval order
    assert!(cookies
        .windows(2)
        .all(|w| w[0].creation_index < w[1].creation_index));
}
