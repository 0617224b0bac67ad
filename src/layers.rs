use crate::constants::{FIRST_LAYER_CLASS, KEEP_CONTAIN_CLASS, LAYER_CLASS};
use crate::core::playback::{intersects_viewport, Rect};
use crate::core::preload::keeps_contain;
use crate::core::{MediaKind, RenderTarget, ZoomEngine};
use crate::dom;
use crate::media::{self, Preloaded};
use wasm_bindgen::JsCast;
use web_sys as web;

/// One slideshow element plus the last values written to it, so unchanged
/// styles are not rewritten every frame.
struct Layer {
    el: web::HtmlElement,
    video: Option<web::HtmlMediaElement>,
    scale: f64,
    z: i32,
    visible: Option<bool>,
}

/// DOM-backed render target: every layer is a child of the slideshow root.
pub struct DomLayers {
    layers: Vec<Layer>,
    viewport: (f64, f64),
}

impl DomLayers {
    /// Append the preloaded media to `root` in asset order.
    pub fn build(root: &web::Element, media: Vec<(String, Preloaded)>) -> Self {
        let mut layers = Vec::with_capacity(media.len());
        for (i, (src, p)) in media.into_iter().enumerate() {
            let el = p.el;
            let video = match p.kind {
                MediaKind::Video => el.clone().dyn_into::<web::HtmlMediaElement>().ok(),
                MediaKind::Image => None,
            };
            if let Some(v) = &video {
                media::prepare_loop(v);
            }
            el.set_class_name(LAYER_CLASS);
            _ = el.dataset().set("src", &src);
            if keeps_contain(&src) {
                dom::add_class(&el, KEEP_CONTAIN_CLASS);
            }
            if i == 0 {
                dom::add_class(&el, FIRST_LAYER_CLASS);
            }
            let scale = ZoomEngine::initial_scale(i);
            dom::set_style(&el, "opacity", "1");
            dom::set_style(&el, "visibility", "visible");
            dom::set_style(&el, "transform", &format!("scale({scale})"));
            _ = root.append_child(&el);
            layers.push(Layer {
                el,
                video,
                scale,
                z: i32::MIN,
                visible: None,
            });
        }
        log::info!("[layers] built {} layers", layers.len());
        Self {
            layers,
            viewport: dom::viewport(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Refresh the cached viewport size; called once per frame.
    pub fn sync_viewport(&mut self) {
        self.viewport = dom::viewport();
    }

    pub fn element(&self, index: usize) -> Option<&web::HtmlElement> {
        self.layers.get(index).map(|l| &l.el)
    }
}

impl RenderTarget for DomLayers {
    fn set_scale(&mut self, index: usize, scale: f64) {
        let Some(l) = self.layers.get_mut(index) else {
            return;
        };
        if l.scale != scale {
            l.scale = scale;
            dom::set_style(&l.el, "transform", &format!("scale({scale})"));
        }
    }

    fn set_z_order(&mut self, index: usize, z: i32) {
        let Some(l) = self.layers.get_mut(index) else {
            return;
        };
        if l.z != z {
            l.z = z;
            dom::set_style(&l.el, "z-index", &z.to_string());
        }
    }

    fn set_visible(&mut self, index: usize, visible: bool) {
        let Some(l) = self.layers.get_mut(index) else {
            return;
        };
        if l.visible == Some(visible) {
            return;
        }
        l.visible = Some(visible);
        // Toggle display rather than detaching to avoid layout churn
        if visible {
            dom::set_style(&l.el, "display", "");
            dom::set_style(&l.el, "visibility", "visible");
        } else {
            dom::set_style(&l.el, "display", "none");
            dom::set_style(&l.el, "visibility", "hidden");
        }
    }

    fn is_video(&self, index: usize) -> bool {
        self.layers.get(index).is_some_and(|l| l.video.is_some())
    }

    fn on_screen(&self, index: usize) -> bool {
        let Some(l) = self.layers.get(index) else {
            return false;
        };
        let r = l.el.get_bounding_client_rect();
        let rect = Rect {
            left: r.left(),
            top: r.top(),
            right: r.right(),
            bottom: r.bottom(),
        };
        let (vw, vh) = self.viewport;
        intersects_viewport(rect, vw, vh, l.visible.unwrap_or(true))
    }

    fn set_playing(&mut self, index: usize, playing: bool) {
        let Some(v) = self.layers.get(index).and_then(|l| l.video.as_ref()) else {
            return;
        };
        if playing {
            // A rejected play is retried on the next frame
            media::play_quietly(v);
        } else if !v.paused() {
            _ = v.pause();
        }
    }
}
