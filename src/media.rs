use crate::core::MediaKind;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const VIDEO_READY_EVENTS: [&str; 3] = ["canplaythrough", "loadeddata", "loadedmetadata"];
const IMAGE_READY_EVENTS: [&str; 2] = ["load", "error"];

/// A media element ready to become a slideshow layer.
pub struct Preloaded {
    pub kind: MediaKind,
    pub el: web::HtmlElement,
}

/// Resolve on the first of `events` or after `timeout_ms`, whichever
/// comes first. Never rejects.
async fn ready_or_timeout(target: &web::EventTarget, events: &[&str], timeout_ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let opts = web::AddEventListenerOptions::new();
        opts.set_once(true);
        for ev in events {
            _ = target.add_event_listener_with_callback_and_add_event_listener_options(
                ev, &resolve, &opts,
            );
        }
        if let Some(w) = web::window() {
            _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
        }
    });
    _ = JsFuture::from(promise).await;
}

/// Muted, looping, inline playback that only starts when asked.
pub fn prepare_loop(v: &web::HtmlMediaElement) {
    v.set_muted(true);
    v.set_loop(true);
    v.set_autoplay(false);
    v.set_preload("metadata");
    _ = v.set_attribute("playsinline", "");
}

/// Start playback if paused. Autoplay rejections are expected and dropped.
pub fn play_quietly(v: &web::HtmlMediaElement) {
    if !v.paused() {
        return;
    }
    if let Ok(p) = v.play() {
        spawn_local(async move {
            _ = JsFuture::from(p).await;
        });
    }
}

pub(crate) fn create_video(document: &web::Document, src: &str) -> Option<web::HtmlVideoElement> {
    let v = document
        .create_element("video")
        .ok()?
        .dyn_into::<web::HtmlVideoElement>()
        .ok()?;
    v.set_src(src);
    Some(v)
}

/// Load one asset, waiting until it is usable or its timeout passes.
pub async fn preload_file(document: web::Document, src: String) -> Option<Preloaded> {
    let kind = MediaKind::from_path(&src);
    match kind {
        MediaKind::Video => {
            let v = create_video(&document, &src)?;
            v.set_preload("auto");
            v.load();
            ready_or_timeout(&v, &VIDEO_READY_EVENTS, kind.ready_timeout_ms()).await;
            Some(Preloaded {
                kind,
                el: v.unchecked_into(),
            })
        }
        MediaKind::Image => {
            let img = web::HtmlImageElement::new().ok()?;
            img.set_decoding("async");
            img.set_src(&src);
            if !img.complete() {
                ready_or_timeout(&img, &IMAGE_READY_EVENTS, kind.ready_timeout_ms()).await;
            }
            // Decode errors still leave a showable element
            _ = JsFuture::from(img.decode()).await;
            Some(Preloaded {
                kind,
                el: img.unchecked_into(),
            })
        }
    }
}

/// Elements for a forced start: sources assigned, nothing awaited.
pub fn unloaded(document: &web::Document, paths: &[&str]) -> Vec<Option<Preloaded>> {
    paths
        .iter()
        .map(|src| {
            let kind = MediaKind::from_path(src);
            let el: web::HtmlElement = match kind {
                MediaKind::Video => create_video(document, src)?.unchecked_into(),
                MediaKind::Image => {
                    let img = web::HtmlImageElement::new().ok()?;
                    img.set_src(src);
                    img.unchecked_into()
                }
            };
            Some(Preloaded { kind, el })
        })
        .collect()
}
