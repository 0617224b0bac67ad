#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::core::preload::preload_pool;
use crate::core::{EngineConfig, Profile, ZoomEngine, ASSET_LIST};
use crate::frame::Renderer;
use crate::layers::DomLayers;
use crate::media::Preloaded;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod details;
mod dom;
mod events;
mod frame;
mod home;
mod layers;
mod media;
mod overlay;
mod theme;
mod worker;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    // The same module serves the page and the service worker; the worker
    // script drives the `sw*` exports itself
    if js_sys::global().is_instance_of::<web::ServiceWorkerGlobalScope>() {
        log::info!("[sw] module ready");
        return Ok(());
    }

    log::info!("zoomfolio-web starting");
    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let profile = dom::detect_profile();
    log::info!(
        "[init] small={} save_data={} reduced_motion={}",
        profile.small_screen,
        profile.save_data,
        profile.reduced_motion
    );
    overlay::wire_resize_guard(&document);
    home::wire_split_nav(&document);

    let Some(root) = document.get_element_by_id(BG_ROOT_ID) else {
        init_home(&document, profile);
        return Ok(());
    };
    init_case_study(document, root, profile).await
}

fn init_home(document: &web::Document, profile: Profile) {
    overlay::play_nav_intro(document, profile.reduced_motion);
    home::wire_tiles(document, profile.reduced_motion);
    home::wire_tabs(document);
}

/// Case-study page state between preload and the first frame.
struct Boot {
    document: web::Document,
    root: web::Element,
    profile: Profile,
    config: EngineConfig,
    started: Cell<bool>,
}

impl Boot {
    /// Build the layers and start the experience. Runs once, whichever of
    /// preload completion and the force-start timer comes first.
    fn launch(self: &Rc<Self>, media: Vec<Option<Preloaded>>) -> anyhow::Result<()> {
        if self.started.replace(true) {
            return Ok(());
        }
        let media: Vec<(String, Preloaded)> = ASSET_LIST
            .iter()
            .zip(media)
            .filter_map(|(src, m)| Some((src.to_string(), m?)))
            .collect();
        let layers = DomLayers::build(&self.root, media);
        let engine = ZoomEngine::new(layers.len(), self.config.clone())?;
        let renderer = Renderer::new(engine, layers);
        if self.config.warm_up {
            renderer.warm_up();
        }

        let boot = self.clone();
        dom::request_animation_frame(move || boot.reveal(renderer));
        Ok(())
    }

    /// One frame to settle, then drop the preloading state and wire input.
    fn reveal(&self, renderer: Rc<Renderer>) {
        let document = &self.document;
        let reduced = self.profile.reduced_motion;
        if let Some(html) = dom::html_root(document) {
            dom::remove_class(&html, PRELOADING_CLASS);
        }
        renderer.start();
        #[cfg(not(feature = "adaptive-theme"))]
        theme::apply(document, crate::core::theme::Foreground::Light);

        overlay::play_nav_intro(document, reduced);
        overlay::play_card_intro(document, reduced);

        events::wire_wheel(&renderer);
        events::wire_keyboard(&renderer);
        events::wire_touch(&renderer);
        events::wire_card_scroller(document);
        wire_resize_redraw(&renderer);

        let details = details::DetailCards::wire(document);
        overlay::wire_edge_reveal(document, reduced);
        overlay::wire_background_click(document, reduced, details);
    }
}

fn wire_resize_redraw(renderer: &Rc<Renderer>) {
    let Some(window) = web::window() else {
        return;
    };
    let renderer = renderer.clone();
    dom::listen(&window, "resize", true, move |_: web::Event| renderer.kick());
}

async fn init_case_study(
    document: web::Document,
    root: web::Element,
    profile: Profile,
) -> anyhow::Result<()> {
    if let Some(html) = dom::html_root(&document) {
        dom::add_class(&html, PRELOADING_CLASS);
    }
    let boot = Rc::new(Boot {
        document: document.clone(),
        root,
        profile,
        config: EngineConfig::for_profile(profile),
        started: Cell::new(false),
    });

    {
        let boot = boot.clone();
        dom::set_timeout(FORCE_START_MS, move || {
            if boot.started.get() {
                return;
            }
            log::warn!("[preload] stalled, forcing start");
            let media = media::unloaded(&boot.document, ASSET_LIST);
            if let Err(e) = boot.launch(media) {
                log::error!("forced start failed: {:?}", e);
            }
        });
    }

    let concurrency = boot.config.preload_concurrency;
    log::info!(
        "[preload] {} assets, concurrency {}",
        ASSET_LIST.len(),
        concurrency
    );
    let results = preload_pool(ASSET_LIST, concurrency, |_, src| {
        media::preload_file(document.clone(), src)
    })
    .await;
    log::info!(
        "[preload] done, {}/{} ready",
        results.iter().filter(|r| r.is_some()).count(),
        results.len()
    );
    boot.launch(results)
}
