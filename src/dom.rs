use crate::constants::{REDUCED_MOTION_QUERY, SMALL_SCREEN_QUERY};
use crate::core::Profile;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn query(document: &web::Document, selector: &str) -> Option<web::Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    node_list_elements(document.query_selector_all(selector).ok())
}

pub fn query_all_in(root: &web::Element, selector: &str) -> Vec<web::Element> {
    node_list_elements(root.query_selector_all(selector).ok())
}

fn node_list_elements(list: Option<web::NodeList>) -> Vec<web::Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

#[inline]
pub fn media_matches(query: &str) -> bool {
    web::window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|m| m.matches())
        .unwrap_or(false)
}

#[inline]
pub fn small_screen() -> bool {
    media_matches(SMALL_SCREEN_QUERY)
}

#[inline]
pub fn reduced_motion() -> bool {
    media_matches(REDUCED_MOTION_QUERY)
}

/// `navigator.connection.saveData`; not exposed by web-sys, so read it
/// reflectively.
fn save_data() -> bool {
    let Some(w) = web::window() else {
        return false;
    };
    js_sys::Reflect::get(&w.navigator(), &JsValue::from_str("connection"))
        .ok()
        .filter(|c| c.is_object())
        .and_then(|c| js_sys::Reflect::get(&c, &JsValue::from_str("saveData")).ok())
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

pub fn detect_profile() -> Profile {
    Profile {
        small_screen: small_screen(),
        save_data: save_data(),
        reduced_motion: reduced_motion(),
    }
}

/// Milliseconds since page load (`performance.now()`).
#[inline]
pub fn now_ms() -> f64 {
    instant::now()
}

#[inline]
pub fn viewport() -> (f64, f64) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

pub fn set_timeout(ms: i32, f: impl FnOnce() + 'static) {
    if let Some(w) = web::window() {
        let cb = Closure::once_into_js(f);
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms);
    }
}

pub fn request_animation_frame(f: impl FnOnce() + 'static) {
    if let Some(w) = web::window() {
        let cb = Closure::once_into_js(f);
        _ = w.request_animation_frame(cb.unchecked_ref());
    }
}

/// Attach a long-lived listener. The closure is leaked, like every other
/// page-lifetime handler.
pub fn listen<E>(
    target: &web::EventTarget,
    event: &str,
    passive: bool,
    mut handler: impl FnMut(E) + 'static,
) where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(move |ev: E| handler(ev)) as Box<dyn FnMut(E)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(passive);
    _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

/// Listener that removes itself after the first call.
pub fn listen_once(target: &web::EventTarget, event: &str, f: impl FnOnce() + 'static) {
    let cb = Closure::once_into_js(f);
    let opts = web::AddEventListenerOptions::new();
    opts.set_once(true);
    _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        cb.unchecked_ref(),
        &opts,
    );
}

#[inline]
pub fn add_class(el: &web::Element, class: &str) {
    _ = el.class_list().add_1(class);
}

#[inline]
pub fn remove_class(el: &web::Element, class: &str) {
    _ = el.class_list().remove_1(class);
}

pub fn add_class_all(els: &[web::Element], class: &str) {
    els.iter().for_each(|e| add_class(e, class));
}

pub fn remove_class_all(els: &[web::Element], class: &str) {
    els.iter().for_each(|e| remove_class(e, class));
}

#[inline]
pub fn html_root(document: &web::Document) -> Option<web::Element> {
    document.document_element()
}

#[inline]
pub fn set_style(el: &web::HtmlElement, prop: &str, value: &str) {
    _ = el.style().set_property(prop, value);
}

/// Whether the event target sits inside an element matching `selector`.
pub fn target_within(target: Option<web::EventTarget>, selector: &str) -> bool {
    target
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

/// Read layout so pending class changes are committed before the next ones.
pub fn force_reflow(document: &web::Document) {
    if let Some(body) = document.body() {
        _ = body.offset_width();
    }
}

pub fn navigate(href: &str) {
    if let Some(w) = web::window() {
        _ = w.location().set_href(href);
    }
}

pub fn open_new_tab(url: &str) {
    let Some(w) = web::window() else {
        return;
    };
    if w
        .open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer")
        .is_err()
    {
        navigate(url);
    }
}

/// Enter or space, the keys that activate a button-like element.
#[inline]
pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}
