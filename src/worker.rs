use crate::core::cache::{
    classify, network_first, run_follow_up, stale_while_revalidate, CacheError, CacheNames,
    CacheStore, FollowUp, Network, Reply, RequestInfo, Strategy, RUNTIME_MAX_ENTRIES,
    SHELL_ASSETS,
};
use std::cell::OnceCell;
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys as web;

fn storage_err(e: JsValue) -> CacheError {
    CacheError::Storage(format!("{e:?}"))
}

fn network_err(e: JsValue) -> CacheError {
    CacheError::Network(format!("{e:?}"))
}

impl Reply for web::Response {
    fn is_cacheable(&self) -> bool {
        // Cache Storage rejects partial content
        self.ok() && self.status() != 206
    }

    fn duplicate(&self) -> Result<Self, CacheError> {
        self.clone().map_err(storage_err)
    }
}

/// One named cache from Cache Storage.
#[derive(Clone)]
struct WebCache(web::Cache);

impl WebCache {
    async fn open(storage: &web::CacheStorage, name: &str) -> Result<Self, CacheError> {
        let cache = JsFuture::from(storage.open(name)).await.map_err(storage_err)?;
        Ok(Self(cache.unchecked_into()))
    }
}

async fn matched(promise: js_sys::Promise) -> Result<Option<web::Response>, CacheError> {
    let hit = JsFuture::from(promise).await.map_err(storage_err)?;
    Ok(hit.dyn_into::<web::Response>().ok())
}

impl CacheStore for WebCache {
    type Request = web::Request;
    type Response = web::Response;

    async fn lookup(&self, req: &web::Request) -> Result<Option<web::Response>, CacheError> {
        matched(self.0.match_with_request(req)).await
    }

    async fn lookup_url(&self, url: &str) -> Result<Option<web::Response>, CacheError> {
        matched(self.0.match_with_str(url)).await
    }

    async fn store(&self, req: &web::Request, response: web::Response) -> Result<(), CacheError> {
        JsFuture::from(self.0.put_with_request(req, &response))
            .await
            .map_err(storage_err)?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, CacheError> {
        let requests: js_sys::Array = JsFuture::from(self.0.keys())
            .await
            .map_err(storage_err)?
            .unchecked_into();
        Ok(requests
            .iter()
            .filter_map(|r| r.dyn_into::<web::Request>().ok())
            .map(|r| r.url())
            .collect())
    }

    async fn remove(&self, url: &str) -> Result<bool, CacheError> {
        let removed = JsFuture::from(self.0.delete_with_str(url))
            .await
            .map_err(storage_err)?;
        Ok(removed.as_bool().unwrap_or(false))
    }
}

/// `fetch()` on the worker global. Navigations go out untouched; a
/// navigate-mode request rejects any init.
#[derive(Clone)]
struct WebNetwork {
    scope: web::ServiceWorkerGlobalScope,
    same_origin: bool,
}

impl Network for WebNetwork {
    type Request = web::Request;
    type Response = web::Response;

    async fn fetch(&self, req: &web::Request) -> Result<web::Response, CacheError> {
        let pending = if self.same_origin {
            let init = web::RequestInit::new();
            init.set_credentials(web::RequestCredentials::SameOrigin);
            self.scope.fetch_with_request_and_init(req, &init)
        } else {
            self.scope.fetch_with_request(req)
        };
        let response = JsFuture::from(pending).await.map_err(network_err)?;
        response.dyn_into().map_err(network_err)
    }
}

/// Service worker state shared by the lifecycle handlers.
struct Worker {
    scope: web::ServiceWorkerGlobalScope,
    storage: web::CacheStorage,
    names: CacheNames,
}

thread_local! {
    static WORKER: OnceCell<Rc<Worker>> = const { OnceCell::new() };
}

fn worker() -> Result<Rc<Worker>, JsValue> {
    WORKER.with(|cell| {
        if let Some(w) = cell.get() {
            return Ok(w.clone());
        }
        let scope: web::ServiceWorkerGlobalScope = js_sys::global().dyn_into()?;
        let storage = scope.caches()?;
        let w = Rc::new(Worker {
            scope,
            storage,
            names: CacheNames::default(),
        });
        Ok(cell.get_or_init(|| w).clone())
    })
}

fn to_promise<F>(fut: F) -> js_sys::Promise
where
    F: Future<Output = Result<JsValue, CacheError>> + 'static,
{
    future_to_promise(async move {
        fut.await.map_err(|e| {
            log::warn!("[sw] {}", e);
            JsValue::from_str(&e.to_string())
        })
    })
}

impl Worker {
    async fn install(self: Rc<Self>) -> Result<JsValue, CacheError> {
        let shell = WebCache::open(&self.storage, &self.names.shell).await?;
        let assets: js_sys::Array = SHELL_ASSETS.iter().map(|a| JsValue::from_str(a)).collect();
        JsFuture::from(shell.0.add_all_with_str_sequence(&assets))
            .await
            .map_err(storage_err)?;
        let skip = self.scope.skip_waiting().map_err(storage_err)?;
        JsFuture::from(skip).await.map_err(storage_err)?;
        log::info!("[sw] installed {}", self.names.shell);
        Ok(JsValue::UNDEFINED)
    }

    async fn activate(self: Rc<Self>) -> Result<JsValue, CacheError> {
        let keys: js_sys::Array = JsFuture::from(self.storage.keys())
            .await
            .map_err(storage_err)?
            .unchecked_into();
        let keys: Vec<String> = keys.iter().filter_map(|k| k.as_string()).collect();
        for stale in self.names.stale(&keys) {
            JsFuture::from(self.storage.delete(stale))
                .await
                .map_err(storage_err)?;
            log::info!("[sw] deleted stale cache {}", stale);
        }
        JsFuture::from(self.scope.clients().claim())
            .await
            .map_err(storage_err)?;
        self.enable_navigation_preload().await;
        Ok(JsValue::UNDEFINED)
    }

    /// `registration.navigationPreload.enable()`, where supported.
    async fn enable_navigation_preload(&self) {
        let manager = js_sys::Reflect::get(
            &self.scope.registration(),
            &JsValue::from_str("navigationPreload"),
        )
        .ok()
        .filter(JsValue::is_object);
        let Some(manager) = manager else {
            return;
        };
        let enable = js_sys::Reflect::get(&manager, &JsValue::from_str("enable"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        if let Some(Ok(p)) = enable.map(|f| f.call0(&manager)) {
            if let Ok(p) = p.dyn_into::<js_sys::Promise>() {
                _ = JsFuture::from(p).await;
            }
        }
    }

    fn network(&self, navigate: bool) -> WebNetwork {
        WebNetwork {
            scope: self.scope.clone(),
            same_origin: !navigate,
        }
    }

    /// The response promise for a fetch the worker answers, or `None` when
    /// the browser should handle it.
    fn respond(self: &Rc<Self>, ev: &web::FetchEvent) -> Option<js_sys::Promise> {
        let request = ev.request();
        let url = request.url();
        let parsed = web::Url::new(&url).ok()?;
        let method = request.method();
        let accept = request
            .headers()
            .get("accept")
            .ok()
            .flatten()
            .unwrap_or_default();
        let origin = parsed.origin();
        let path = parsed.pathname();
        let info = RequestInfo {
            method: &method,
            navigate: request.mode() == web::RequestMode::Navigate,
            accept: &accept,
            origin: &origin,
            path: &path,
        };
        match classify(&info, &self.scope.location().origin()) {
            Strategy::Passthrough => None,
            Strategy::NetworkFirst => {
                let preload = js_sys::Reflect::get(ev, &JsValue::from_str("preloadResponse"))
                    .ok()
                    .and_then(|p| p.dyn_into::<js_sys::Promise>().ok());
                Some(to_promise(self.clone().navigate(ev.clone(), preload)))
            }
            Strategy::StaleWhileRevalidate => Some(to_promise(self.clone().asset(ev.clone()))),
        }
    }

    async fn navigate(
        self: Rc<Self>,
        ev: web::FetchEvent,
        preload: Option<js_sys::Promise>,
    ) -> Result<JsValue, CacheError> {
        let preloaded = match preload {
            Some(p) => JsFuture::from(p)
                .await
                .ok()
                .and_then(|r| r.dyn_into::<web::Response>().ok()),
            None => None,
        };
        let request = ev.request();
        let url = request.url();
        let shell = WebCache::open(&self.storage, &self.names.shell).await?;
        let net = self.network(true);
        let served = network_first(&shell, &net, &request, &url, preloaded).await?;
        extend(&ev, served.follow_up, shell, net, request, url);
        Ok(served.response.into())
    }

    async fn asset(self: Rc<Self>, ev: web::FetchEvent) -> Result<JsValue, CacheError> {
        let request = ev.request();
        let url = request.url();
        let runtime = WebCache::open(&self.storage, &self.names.runtime).await?;
        let shell = WebCache::open(&self.storage, &self.names.shell).await?;
        let net = self.network(false);
        let served = stale_while_revalidate(&runtime, &shell, &net, &request, &url).await?;
        extend(&ev, served.follow_up, runtime, net, request, url);
        Ok(served.response.into())
    }
}

/// Hand a follow-up to `waitUntil`. Called while `respondWith` is still
/// pending, so the event can still be extended.
fn extend(
    ev: &web::FetchEvent,
    follow_up: FollowUp<web::Response>,
    cache: WebCache,
    net: WebNetwork,
    request: web::Request,
    url: String,
) {
    if matches!(follow_up, FollowUp::None) {
        return;
    }
    let background = async move {
        run_follow_up(follow_up, &cache, &net, &request, &url, RUNTIME_MAX_ENTRIES).await?;
        Ok(JsValue::UNDEFINED)
    };
    if let Err(e) = ev.wait_until(&to_promise(background)) {
        log::debug!("[sw] waitUntil rejected: {:?}", e);
    }
}

// Entry points for the worker script. It registers its listeners during
// its first evaluation and forwards each event here once the module is
// instantiated.

#[wasm_bindgen(js_name = swInstall)]
pub fn sw_install() -> Result<js_sys::Promise, JsValue> {
    Ok(to_promise(worker()?.install()))
}

#[wasm_bindgen(js_name = swActivate)]
pub fn sw_activate() -> Result<js_sys::Promise, JsValue> {
    Ok(to_promise(worker()?.activate()))
}

/// Answer `ev` if the worker handles it. Returns `false` when the browser
/// should fetch on its own.
#[wasm_bindgen(js_name = swFetch)]
pub fn sw_fetch(ev: web::FetchEvent) -> Result<bool, JsValue> {
    match worker()?.respond(&ev) {
        Some(promise) => {
            ev.respond_with(&promise)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Response promise for a fetch that arrived before the module was ready
/// and was already claimed with `respondWith`. Requests the worker would
/// not handle go straight to the network.
#[wasm_bindgen(js_name = swRespond)]
pub fn sw_respond(ev: web::FetchEvent) -> Result<js_sys::Promise, JsValue> {
    let worker = worker()?;
    Ok(worker
        .respond(&ev)
        .unwrap_or_else(|| worker.scope.fetch_with_request(&ev.request())))
}
