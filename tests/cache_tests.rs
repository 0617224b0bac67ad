// Host-side tests for the cache worker's strategies, run against an
// in-memory store and a scripted network.

#![allow(dead_code)]
mod cache {
    include!("../src/core/cache.rs");
}

use cache::*;
use pollster::block_on;
use std::cell::{Cell, RefCell};

// Bodies starting with "error:" stand in for 4xx/5xx responses
impl Reply for String {
    fn is_cacheable(&self) -> bool {
        !self.starts_with("error:")
    }

    fn duplicate(&self) -> Result<Self, CacheError> {
        Ok(self.clone())
    }
}

/// Insertion-ordered store, like Cache Storage.
#[derive(Default)]
struct MemCache {
    entries: RefCell<Vec<(String, String)>>,
    writes: Cell<usize>,
}

impl MemCache {
    fn with(entries: &[(&str, &str)]) -> Self {
        let cache = Self::default();
        cache.entries.borrow_mut().extend(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        cache
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

impl CacheStore for MemCache {
    type Request = String;
    type Response = String;

    async fn lookup(&self, req: &String) -> Result<Option<String>, CacheError> {
        Ok(self.get(req))
    }

    async fn lookup_url(&self, url: &str) -> Result<Option<String>, CacheError> {
        Ok(self.get(url))
    }

    async fn store(&self, req: &String, response: String) -> Result<(), CacheError> {
        self.writes.set(self.writes.get() + 1);
        let mut entries = self.entries.borrow_mut();
        // A put replaces the entry in place
        match entries.iter_mut().find(|(k, _)| k == req) {
            Some(slot) => slot.1 = response,
            None => entries.push((req.clone(), response)),
        }
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.entries.borrow().iter().map(|(k, _)| k.clone()).collect())
    }

    async fn remove(&self, url: &str) -> Result<bool, CacheError> {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(k, _)| k != url);
        Ok(entries.len() != before)
    }
}

/// Cache whose writes always fail, as with a full quota.
struct QuotaFull(MemCache);

impl CacheStore for QuotaFull {
    type Request = String;
    type Response = String;

    async fn lookup(&self, req: &String) -> Result<Option<String>, CacheError> {
        self.0.lookup(req).await
    }

    async fn lookup_url(&self, url: &str) -> Result<Option<String>, CacheError> {
        self.0.lookup_url(url).await
    }

    async fn store(&self, _: &String, _: String) -> Result<(), CacheError> {
        Err(CacheError::Storage("QuotaExceededError".to_string()))
    }

    async fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.0.keys().await
    }

    async fn remove(&self, url: &str) -> Result<bool, CacheError> {
        self.0.remove(url).await
    }
}

/// Answers `body:<key>` with a version counter, an error status when one is
/// set, or fails when offline.
#[derive(Default)]
struct FakeNet {
    offline: Cell<bool>,
    status: Cell<Option<u16>>,
    fetches: Cell<usize>,
}

impl FakeNet {
    fn offline() -> Self {
        let net = Self::default();
        net.offline.set(true);
        net
    }
}

impl Network for FakeNet {
    type Request = String;
    type Response = String;

    async fn fetch(&self, req: &String) -> Result<String, CacheError> {
        self.fetches.set(self.fetches.get() + 1);
        if self.offline.get() {
            return Err(CacheError::Network(format!("offline: {req}")));
        }
        if let Some(code) = self.status.get() {
            return Ok(format!("error:{code}"));
        }
        Ok(format!("body:{req}#{}", self.fetches.get()))
    }
}

const LOGO: &str = "https://site.test/assets/logo.svg";
const CLIP: &str = "https://site.test/assets/nestbank/16.mp4";
const HOME: &str = "https://site.test/";

fn info<'a>(path: &'a str, accept: &'a str) -> RequestInfo<'a> {
    RequestInfo {
        method: "GET",
        navigate: false,
        accept,
        origin: "https://site.test",
        path,
    }
}

fn swr<C>(runtime: &C, shell: &C, net: &FakeNet, url: &str) -> Result<Served<String>, CacheError>
where
    C: CacheStore<Request = String, Response = String>,
{
    block_on(stale_while_revalidate(runtime, shell, net, &url.to_string(), url))
}

fn nav<C>(
    shell: &C,
    net: &FakeNet,
    url: &str,
    preloaded: Option<String>,
) -> Result<Served<String>, CacheError>
where
    C: CacheStore<Request = String, Response = String>,
{
    block_on(network_first(shell, net, &url.to_string(), url, preloaded))
}

fn follow<C>(
    served: Served<String>,
    cache: &C,
    net: &FakeNet,
    url: &str,
) -> Result<(), CacheError>
where
    C: CacheStore<Request = String, Response = String>,
{
    block_on(run_follow_up(
        served.follow_up,
        cache,
        net,
        &url.to_string(),
        url,
        RUNTIME_MAX_ENTRIES,
    ))
}

#[test]
fn uncached_asset_is_returned_before_it_is_cached() {
    let (runtime, shell, net) = (MemCache::default(), MemCache::default(), FakeNet::default());
    let served = swr(&runtime, &shell, &net, LOGO).unwrap();
    assert_eq!(served.response, format!("body:{LOGO}#1"));
    assert_eq!(served.follow_up, FollowUp::StoreAndTrim(format!("body:{LOGO}#1")));
    assert_eq!(net.fetches.get(), 1);
    assert_eq!(runtime.writes.get(), 0, "the put waits for the follow-up");

    follow(served, &runtime, &net, LOGO).unwrap();
    assert_eq!(runtime.writes.get(), 1);
    assert_eq!(runtime.get(LOGO), Some(format!("body:{LOGO}#1")));
    assert_eq!(net.fetches.get(), 1);
}

#[test]
fn cached_asset_is_served_without_the_network() {
    let (runtime, shell, net) = (MemCache::default(), MemCache::default(), FakeNet::default());
    let served = swr(&runtime, &shell, &net, LOGO).unwrap();
    follow(served, &runtime, &net, LOGO).unwrap();

    // Second request: answered from cache even while offline
    net.offline.set(true);
    let served = swr(&runtime, &shell, &net, LOGO).unwrap();
    assert_eq!(served.response, format!("body:{LOGO}#1"));
    assert_eq!(net.fetches.get(), 1);
    assert_eq!(served.follow_up, FollowUp::Revalidate);
}

#[test]
fn revalidation_refreshes_the_cached_copy() {
    let runtime = MemCache::with(&[(LOGO, "stale")]);
    let net = FakeNet::default();
    let served = swr(&runtime, &MemCache::default(), &net, LOGO).unwrap();
    assert_eq!(served.response, "stale");
    follow(served, &runtime, &net, LOGO).unwrap();
    assert_eq!(runtime.get(LOGO), Some(format!("body:{LOGO}#1")));
    assert_eq!(runtime.len(), 1);
}

#[test]
fn error_status_never_replaces_a_cached_asset() {
    let runtime = MemCache::with(&[(LOGO, "good")]);
    let net = FakeNet::default();
    net.status.set(Some(503));
    let served = swr(&runtime, &MemCache::default(), &net, LOGO).unwrap();
    follow(served, &runtime, &net, LOGO).unwrap();
    assert_eq!(net.fetches.get(), 1);
    assert_eq!(runtime.get(LOGO), Some("good".to_string()));
    assert_eq!(runtime.writes.get(), 0);
}

#[test]
fn error_status_on_a_miss_is_served_but_not_cached() {
    let (runtime, shell, net) = (MemCache::default(), MemCache::default(), FakeNet::default());
    net.status.set(Some(404));
    let served = swr(&runtime, &shell, &net, CLIP).unwrap();
    assert_eq!(served.response, "error:404");
    assert_eq!(served.follow_up, FollowUp::None);

    let page = nav(&shell, &net, HOME, None).unwrap();
    assert_eq!(page.response, "error:404");
    assert_eq!(page.follow_up, FollowUp::None);
}

#[test]
fn failed_cache_writes_never_fail_the_request() {
    let net = FakeNet::default();
    let full = QuotaFull(MemCache::default());
    let quota = Err(CacheError::Storage("QuotaExceededError".to_string()));

    let served = swr(&full, &full, &net, CLIP).unwrap();
    assert_eq!(served.response, format!("body:{CLIP}#1"));
    assert_eq!(follow(served, &full, &net, CLIP), quota);

    let page = nav(&full, &net, HOME, None).unwrap();
    assert_eq!(page.response, "body:https://site.test/#2");
    assert_eq!(follow(page, &full, &net, HOME), quota);
}

#[test]
fn asset_miss_offline_falls_back_to_shell_then_fails() {
    let runtime = MemCache::default();
    let shell = MemCache::with(&[(LOGO, "shell-logo")]);
    let net = FakeNet::offline();
    let served = swr(&runtime, &shell, &net, LOGO).unwrap();
    assert_eq!(served.response, "shell-logo");
    assert_eq!(served.follow_up, FollowUp::None);

    let err = swr(&runtime, &MemCache::default(), &net, LOGO);
    assert!(matches!(err, Err(CacheError::Network(_))));
}

#[test]
fn trim_evicts_oldest_first_and_respects_the_max() {
    let cache = MemCache::default();
    let net = FakeNet::default();
    let max = 5;
    for i in 0..12 {
        let key = format!("https://site.test/assets/{i}.jpg");
        let body = block_on(net.fetch(&key)).unwrap();
        block_on(cache.store(&key, body)).unwrap();
        let removed = block_on(trim(&cache, max)).unwrap();
        assert!(cache.len() <= max);
        assert_eq!(removed, usize::from(i >= max));
    }
    let keys = block_on(cache.keys()).unwrap();
    let expected: Vec<String> = (7..12)
        .map(|i| format!("https://site.test/assets/{i}.jpg"))
        .collect();
    assert_eq!(keys, expected);
}

#[test]
fn excess_keys_are_the_oldest_prefix() {
    let keys = ["a", "b", "c", "d"];
    assert_eq!(excess_keys(&keys, 2), &["a", "b"]);
    assert!(excess_keys(&keys, 4).is_empty());
    assert!(excess_keys(&keys, 10).is_empty());
}

#[test]
fn navigation_prefers_the_network_and_updates_the_shell() {
    let shell = MemCache::with(&[(HOME, "old")]);
    let net = FakeNet::default();
    let page = nav(&shell, &net, HOME, None).unwrap();
    assert_eq!(page.response, "body:https://site.test/#1");
    assert_eq!(shell.get(HOME), Some("old".to_string()));

    let fresh = page.response.clone();
    follow(page, &shell, &net, HOME).unwrap();
    assert_eq!(shell.get(HOME), Some(fresh));
}

#[test]
fn navigation_uses_a_preloaded_response() {
    let shell = MemCache::default();
    let net = FakeNet::default();
    let url = "https://site.test/nestbank.html";
    let page = nav(&shell, &net, url, Some("preloaded".to_string())).unwrap();
    assert_eq!(page.response, "preloaded");
    assert_eq!(net.fetches.get(), 0);
    follow(page, &shell, &net, url).unwrap();
    assert_eq!(shell.writes.get(), 1);
    assert_eq!(net.fetches.get(), 0);
}

#[test]
fn offline_navigation_falls_back_to_shell_then_index() {
    let net = FakeNet::offline();
    let shell = MemCache::with(&[
        ("https://site.test/nestbank.html", "cached-case-study"),
        (FALLBACK_DOCUMENT, "cached-index"),
    ]);
    let hit = nav(&shell, &net, "https://site.test/nestbank.html", None).unwrap();
    assert_eq!(hit.response, "cached-case-study");
    assert_eq!(hit.follow_up, FollowUp::None);

    let fallback = nav(&shell, &net, "https://site.test/about", None).unwrap();
    assert_eq!(fallback.response, "cached-index");

    let miss = nav(&MemCache::default(), &net, HOME, None);
    assert!(matches!(miss, Err(CacheError::Miss(url)) if url == HOME));
}

#[test]
fn classification_follows_method_mode_and_path() {
    let origin = "https://site.test";
    let post = RequestInfo {
        method: "POST",
        ..info("/assets/a.png", "*/*")
    };
    assert_eq!(classify(&post, origin), Strategy::Passthrough);

    let nav = RequestInfo {
        navigate: true,
        ..info("/nestbank.html", "*/*")
    };
    assert_eq!(classify(&nav, origin), Strategy::NetworkFirst);
    assert_eq!(
        classify(&info("/", "text/html,application/xhtml+xml"), origin),
        Strategy::NetworkFirst
    );

    assert_eq!(
        classify(&info("/assets/nestbank/1.jpg", "image/*"), origin),
        Strategy::StaleWhileRevalidate
    );
    assert_eq!(
        classify(&info("/fonts/Inter.WOFF2", "*/*"), origin),
        Strategy::StaleWhileRevalidate
    );
    assert_eq!(classify(&info("/api/data", "*/*"), origin), Strategy::Passthrough);

    let cross = RequestInfo {
        origin: "https://cdn.test",
        ..info("/lib.js", "*/*")
    };
    assert_eq!(classify(&cross, origin), Strategy::Passthrough);
}

#[test]
fn static_paths_match_prefix_or_extension() {
    assert!(is_static_path("/assets/anything"));
    assert!(is_static_path("/styles.css"));
    assert!(is_static_path("/a/b/clip.MP4"));
    assert!(!is_static_path("/index.html"));
    assert!(!is_static_path("/no-extension"));
    assert!(!is_static_path("/dir.png/file"));
}

#[test]
fn stale_caches_are_everything_but_the_current_pair() {
    let names = CacheNames::default();
    assert_eq!(names.shell, "jg-shell-v1");
    assert_eq!(names.runtime, "jg-runtime-v1");
    let keys = vec![
        "jg-shell-v0".to_string(),
        "jg-shell-v1".to_string(),
        "jg-runtime-v1".to_string(),
        "other".to_string(),
    ];
    assert_eq!(names.stale(&keys), vec!["jg-shell-v0", "other"]);
}
