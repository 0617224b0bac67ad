use std::future::Future;
use thiserror::Error;

pub const CACHE_VERSION: &str = "v1";
pub const CACHE_PREFIX: &str = "jg";
pub const RUNTIME_MAX_ENTRIES: usize = 120;
pub const FALLBACK_DOCUMENT: &str = "./index.html";

/// Top-level documents and assets precached on install.
pub const SHELL_ASSETS: &[&str] = &[
    "./",
    "./index.html",
    "./nestbank.html",
    "./styles.css",
    "./main.js",
    "./assets/logo.svg",
];

const STATIC_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "svg", "ico", "bmp", "tiff", "mp4", "webm", "css",
    "js", "woff", "woff2", "ttf", "otf",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("network request failed: {0}")]
    Network(String),
    #[error("cache storage error: {0}")]
    Storage(String),
    #[error("no cached response for {0}")]
    Miss(String),
}

/// Version-suffixed cache names for one worker generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheNames {
    pub shell: String,
    pub runtime: String,
}

impl CacheNames {
    pub fn for_version(version: &str) -> Self {
        Self {
            shell: format!("{CACHE_PREFIX}-shell-{version}"),
            runtime: format!("{CACHE_PREFIX}-runtime-{version}"),
        }
    }

    #[inline]
    pub fn is_current(&self, name: &str) -> bool {
        name == self.shell || name == self.runtime
    }

    /// Caches left behind by other versions, to delete on activate.
    pub fn stale<'a>(&self, keys: &'a [String]) -> Vec<&'a str> {
        keys.iter()
            .map(String::as_str)
            .filter(|k| !self.is_current(k))
            .collect()
    }
}

impl Default for CacheNames {
    fn default() -> Self {
        Self::for_version(CACHE_VERSION)
    }
}

/// How the worker answers a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    NetworkFirst,
    StaleWhileRevalidate,
    /// Not intercepted; the browser handles it.
    Passthrough,
}

/// The parts of a fetch the classifier looks at.
#[derive(Clone, Copy, Debug)]
pub struct RequestInfo<'a> {
    pub method: &'a str,
    pub navigate: bool,
    pub accept: &'a str,
    pub origin: &'a str,
    pub path: &'a str,
}

pub fn is_static_path(path: &str) -> bool {
    if path.starts_with("/assets/") {
        return true;
    }
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| STATIC_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

pub fn classify(req: &RequestInfo<'_>, scope_origin: &str) -> Strategy {
    if !req.method.eq_ignore_ascii_case("GET") {
        return Strategy::Passthrough;
    }
    if req.navigate || req.accept.contains("text/html") {
        return Strategy::NetworkFirst;
    }
    if req.origin == scope_origin && is_static_path(req.path) {
        return Strategy::StaleWhileRevalidate;
    }
    Strategy::Passthrough
}

/// Oldest keys to evict so at most `max` remain. Keys are in insertion order.
pub fn excess_keys<K>(keys: &[K], max: usize) -> &[K] {
    let over = keys.len().saturating_sub(max);
    &keys[..over]
}

/// What the strategies need to know about a response.
pub trait Reply: Sized {
    /// Whether the response may replace a cached entry.
    fn is_cacheable(&self) -> bool;
    /// A copy with its own body, taken before the original is handed out.
    fn duplicate(&self) -> Result<Self, CacheError>;
}

/// A named cache. Implementations keep keys in insertion order, the way
/// Cache Storage does.
pub trait CacheStore {
    type Request;
    type Response: Reply;

    fn lookup(
        &self,
        req: &Self::Request,
    ) -> impl Future<Output = Result<Option<Self::Response>, CacheError>>;
    fn lookup_url(&self, url: &str)
        -> impl Future<Output = Result<Option<Self::Response>, CacheError>>;
    fn store(
        &self,
        req: &Self::Request,
        response: Self::Response,
    ) -> impl Future<Output = Result<(), CacheError>>;
    fn keys(&self) -> impl Future<Output = Result<Vec<String>, CacheError>>;
    fn remove(&self, url: &str) -> impl Future<Output = Result<bool, CacheError>>;
}

pub trait Network {
    type Request;
    type Response: Reply;

    /// Fetch the intercepted request as is, headers and mode included.
    fn fetch(&self, req: &Self::Request) -> impl Future<Output = Result<Self::Response, CacheError>>;
}

/// Background work a response leaves behind. Runs after the response has
/// been handed out, so its failures never reach the page.
#[derive(Debug, PartialEq, Eq)]
pub enum FollowUp<R> {
    None,
    /// Put a copy of a fresh network response.
    Store(R),
    /// Put a copy, then evict the oldest runtime entries beyond the limit.
    StoreAndTrim(R),
    /// Refresh a cached entry from the network.
    Revalidate,
}

pub struct Served<R> {
    pub response: R,
    pub follow_up: FollowUp<R>,
}

fn cache_copy<R: Reply>(response: &R, url: &str) -> Option<R> {
    if !response.is_cacheable() {
        log::debug!("[sw] not caching {}", url);
        return None;
    }
    match response.duplicate() {
        Ok(copy) => Some(copy),
        Err(e) => {
            log::warn!("[sw] could not copy {}: {}", url, e);
            None
        }
    }
}

/// Network-first for documents: fresh when online, shell cache when not.
pub async fn network_first<C, N>(
    shell: &C,
    net: &N,
    req: &C::Request,
    url: &str,
    preloaded: Option<C::Response>,
) -> Result<Served<C::Response>, CacheError>
where
    C: CacheStore,
    N: Network<Request = C::Request, Response = C::Response>,
{
    let fetched = match preloaded {
        Some(r) => Ok(r),
        None => net.fetch(req).await,
    };
    match fetched {
        Ok(response) => {
            let follow_up = cache_copy(&response, url).map_or(FollowUp::None, FollowUp::Store);
            Ok(Served { response, follow_up })
        }
        Err(err) => {
            log::info!("[sw] offline navigation {}: {}", url, err);
            let hit = match shell.lookup(req).await? {
                Some(hit) => hit,
                None => shell
                    .lookup_url(FALLBACK_DOCUMENT)
                    .await?
                    .ok_or_else(|| CacheError::Miss(url.to_string()))?,
            };
            Ok(Served {
                response: hit,
                follow_up: FollowUp::None,
            })
        }
    }
}

/// Stale-while-revalidate for static assets.
///
/// A hit returns immediately and asks for a background revalidation; a miss
/// goes to the network once and hands the response straight back, leaving
/// the put and the trim to the follow-up.
pub async fn stale_while_revalidate<C, N>(
    runtime: &C,
    shell: &C,
    net: &N,
    req: &C::Request,
    url: &str,
) -> Result<Served<C::Response>, CacheError>
where
    C: CacheStore,
    N: Network<Request = C::Request, Response = C::Response>,
{
    if let Some(hit) = runtime.lookup(req).await? {
        return Ok(Served {
            response: hit,
            follow_up: FollowUp::Revalidate,
        });
    }
    match net.fetch(req).await {
        Ok(response) => {
            let follow_up =
                cache_copy(&response, url).map_or(FollowUp::None, FollowUp::StoreAndTrim);
            Ok(Served { response, follow_up })
        }
        Err(err) => match shell.lookup(req).await? {
            Some(hit) => Ok(Served {
                response: hit,
                follow_up: FollowUp::None,
            }),
            None => Err(err),
        },
    }
}

/// Replace a cached entry with a fresh copy. Error statuses leave the
/// cached entry alone.
pub async fn revalidate<C, N>(
    runtime: &C,
    net: &N,
    req: &C::Request,
    url: &str,
) -> Result<(), CacheError>
where
    C: CacheStore,
    N: Network<Request = C::Request, Response = C::Response>,
{
    let fresh = net.fetch(req).await?;
    if !fresh.is_cacheable() {
        log::debug!("[sw] keeping cached {}", url);
        return Ok(());
    }
    runtime.store(req, fresh).await
}

/// Evict oldest-inserted entries until at most `max` remain. Returns the
/// number of entries removed.
pub async fn trim<C: CacheStore>(cache: &C, max: usize) -> Result<usize, CacheError> {
    let keys = cache.keys().await?;
    let victims = excess_keys(&keys, max);
    for key in victims {
        cache.remove(key).await?;
    }
    if !victims.is_empty() {
        log::debug!("[sw] trimmed {} entries", victims.len());
    }
    Ok(victims.len())
}

/// Run the follow-up a served response asked for against `cache`.
pub async fn run_follow_up<C, N>(
    follow_up: FollowUp<C::Response>,
    cache: &C,
    net: &N,
    req: &C::Request,
    url: &str,
    max: usize,
) -> Result<(), CacheError>
where
    C: CacheStore,
    N: Network<Request = C::Request, Response = C::Response>,
{
    match follow_up {
        FollowUp::None => Ok(()),
        FollowUp::Store(copy) => cache.store(req, copy).await,
        FollowUp::StoreAndTrim(copy) => {
            cache.store(req, copy).await?;
            trim(cache, max).await.map(|_| ())
        }
        FollowUp::Revalidate => revalidate(cache, net, req, url).await,
    }
}
