use crate::constants::THEME_LIGHT_CLASS;
use crate::core::theme::Foreground;
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

#[cfg(feature = "adaptive-theme")]
pub use adaptive::AdaptiveTheme;

/// Write the foreground colour variable and light-theme class.
pub fn apply(document: &web::Document, fg: Foreground) {
    let Some(root) = dom::html_root(document) else {
        return;
    };
    if let Some(el) = root.dyn_ref::<web::HtmlElement>() {
        dom::set_style(el, "--fg-color", fg.css_color());
    }
    match fg {
        Foreground::Dark => dom::add_class(&root, THEME_LIGHT_CLASS),
        Foreground::Light => dom::remove_class(&root, THEME_LIGHT_CLASS),
    }
}

#[cfg(feature = "adaptive-theme")]
mod adaptive {
    use super::apply;
    use crate::core::theme::{mean_luminance, Foreground, ThemeSampler, SAMPLE_SIZE};
    use crate::core::timeline::Segment;
    use wasm_bindgen::JsCast;
    use web_sys as web;

    /// Samples the visible layer into a tiny canvas and picks the foreground.
    pub struct AdaptiveTheme {
        document: web::Document,
        ctx: web::CanvasRenderingContext2d,
        sampler: ThemeSampler,
    }

    impl AdaptiveTheme {
        pub fn new(document: &web::Document) -> Option<Self> {
            let canvas = document
                .create_element("canvas")
                .ok()?
                .dyn_into::<web::HtmlCanvasElement>()
                .ok()?;
            canvas.set_width(SAMPLE_SIZE);
            canvas.set_height(SAMPLE_SIZE);
            let ctx = canvas
                .get_context("2d")
                .ok()
                .flatten()?
                .dyn_into::<web::CanvasRenderingContext2d>()
                .ok()?;
            Some(Self {
                document: document.clone(),
                ctx,
                sampler: ThemeSampler::default(),
            })
        }

        /// Average luminance of `el`, or `None` when it can't be drawn yet
        /// (not decoded, tainted canvas).
        fn luminance_of(&self, el: &web::HtmlElement) -> Option<f64> {
            let size = SAMPLE_SIZE as f64;
            self.ctx.clear_rect(0.0, 0.0, size, size);
            if let Some(img) = el.dyn_ref::<web::HtmlImageElement>() {
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, size, size)
                    .ok()?;
            } else if let Some(v) = el.dyn_ref::<web::HtmlVideoElement>() {
                self.ctx
                    .draw_image_with_html_video_element_and_dw_and_dh(v, 0.0, 0.0, size, size)
                    .ok()?;
            } else {
                return None;
            }
            let data = self.ctx.get_image_data(0.0, 0.0, size, size).ok()?;
            mean_luminance(&data.data())
        }

        /// Resample when due and apply the resulting foreground.
        pub fn update(
            &mut self,
            seg: &Segment,
            layer_at: impl Fn(usize) -> Option<web::HtmlElement>,
        ) {
            let Some(i) = self.sampler.poll(seg.index, seg.next, seg.progress) else {
                return;
            };
            if let Some(lum) = layer_at(i).and_then(|el| self.luminance_of(&el)) {
                apply(&self.document, Foreground::for_luminance(lum));
            }
        }
    }
}
