use crate::core::{InputEvent, ZoomEngine};
#[cfg(feature = "profiling")]
use crate::core::perf::PerfWindow;
use crate::dom;
use crate::layers::DomLayers;
#[cfg(feature = "adaptive-theme")]
use crate::theme::AdaptiveTheme;
use std::cell::RefCell;
use std::rc::Rc;

/// Page-side render loop: the engine, its DOM target and frame bookkeeping.
///
/// Input handlers call [`Renderer::feed`]; the engine's frame gate decides
/// whether a new animation frame must be requested, so at most one render
/// is ever queued.
pub struct Renderer {
    engine: RefCell<ZoomEngine>,
    layers: RefCell<DomLayers>,
    #[cfg(feature = "profiling")]
    perf: RefCell<PerfWindow>,
    #[cfg(feature = "adaptive-theme")]
    theme: RefCell<Option<AdaptiveTheme>>,
}

impl Renderer {
    pub fn new(engine: ZoomEngine, layers: DomLayers) -> Rc<Self> {
        Rc::new(Self {
            engine: RefCell::new(engine),
            layers: RefCell::new(layers),
            #[cfg(feature = "profiling")]
            perf: RefCell::new(PerfWindow::default()),
            #[cfg(feature = "adaptive-theme")]
            theme: RefCell::new(dom::window_document().and_then(|d| AdaptiveTheme::new(&d))),
        })
    }

    /// The single input channel into the engine.
    pub fn feed(self: &Rc<Self>, event: InputEvent) {
        let schedule = self.engine.borrow_mut().handle(event, dom::now_ms());
        if schedule {
            self.schedule();
        }
    }

    pub fn touch_multiplier(&self) -> f64 {
        self.engine.borrow().config().touch_multiplier
    }

    /// Request a frame without moving the timeline (e.g. after a resize).
    pub fn kick(self: &Rc<Self>) {
        let schedule = self.engine.borrow().request_frame();
        if schedule {
            self.schedule();
        }
    }

    /// Render every warm-up position once, then restore the timeline.
    pub fn warm_up(&self) {
        let now = dom::now_ms();
        let mut layers = self.layers.borrow_mut();
        self.engine.borrow_mut().warm_up(&mut *layers, now);
    }

    /// Jump to the default view and draw it. `false` if already started.
    pub fn start(self: &Rc<Self>) -> bool {
        if !self.engine.borrow_mut().start() {
            return false;
        }
        self.frame();
        true
    }

    fn schedule(self: &Rc<Self>) {
        let this = self.clone();
        dom::request_animation_frame(move || this.frame());
    }

    fn frame(self: &Rc<Self>) {
        #[cfg(feature = "profiling")]
        let t0 = dom::now_ms();
        let report = {
            let mut layers = self.layers.borrow_mut();
            layers.sync_viewport();
            self.engine.borrow_mut().render(&mut *layers, dom::now_ms())
        };

        #[cfg(feature = "adaptive-theme")]
        if let Some(theme) = self.theme.borrow_mut().as_mut() {
            let layers = self.layers.borrow();
            theme.update(&report.segment, |i| layers.element(i).cloned());
        }

        #[cfg(feature = "profiling")]
        {
            let now = dom::now_ms();
            let summary = self.perf.borrow_mut().record(now - t0, now);
            if let Some(summary) = summary {
                let seg = report.segment;
                let len = self.layers.borrow().len();
                let target = crate::core::timeline::wrap(self.engine.borrow().timeline().target(), len);
                log::info!(
                    "[perf] img {}/{} | t={:.3} -> {:.3} p={:.3} | {}",
                    seg.index + 1,
                    len,
                    seg.loop_pos,
                    target,
                    seg.progress,
                    summary
                );
            }
        }

        if report.reschedule {
            self.schedule();
        }
    }
}
