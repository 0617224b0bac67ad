use crate::constants::{CARD_SCROLLER_SELECTOR, NAV_SELECTOR};
use crate::core::input::{normalize_wheel, Inertia, TouchGesture, TouchOrigin};
use crate::core::InputEvent;
use crate::dom;
use crate::frame::Renderer;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

pub fn wire_wheel(renderer: &Rc<Renderer>) {
    let Some(window) = web::window() else {
        return;
    };
    let renderer = renderer.clone();
    dom::listen(&window, "wheel", false, move |ev: web::WheelEvent| {
        ev.prevent_default();
        let (_, vh) = dom::viewport();
        let delta = normalize_wheel(ev.delta_y(), ev.delta_mode(), vh);
        renderer.feed(InputEvent::Wheel(delta));
    });
}

/// Touch state shared by the start/move/end handlers and the inertia loop.
struct TouchWiring {
    renderer: Rc<Renderer>,
    gesture: RefCell<TouchGesture>,
    inertia: RefCell<Option<Inertia>>,
    // Bumped on every launch/cancel so stale animation frames stop
    generation: Cell<u32>,
    multiplier: f64,
}

impl TouchWiring {
    fn cancel_inertia(&self) {
        self.inertia.borrow_mut().take();
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    fn launch(self: &Rc<Self>, inertia: Inertia) {
        self.cancel_inertia();
        *self.inertia.borrow_mut() = Some(inertia);
        let generation = self.generation.get();
        let this = self.clone();
        dom::request_animation_frame(move || this.coast(generation));
    }

    fn coast(self: Rc<Self>, generation: u32) {
        if generation != self.generation.get() {
            return;
        }
        let step = self.inertia.borrow_mut().as_mut().and_then(Inertia::step);
        match step {
            Some(delta) => {
                self.renderer.feed(InputEvent::Inertia(delta));
                let this = self.clone();
                dom::request_animation_frame(move || this.coast(generation));
            }
            None => self.cancel_inertia(),
        }
    }
}

fn touch_origin(target: Option<web::EventTarget>) -> TouchOrigin {
    if dom::target_within(target.clone(), NAV_SELECTOR) {
        TouchOrigin::Nav
    } else if dom::target_within(target, CARD_SCROLLER_SELECTOR) {
        TouchOrigin::Scroller
    } else {
        TouchOrigin::Background
    }
}

fn first_touch(ev: &web::TouchEvent) -> Option<web::Touch> {
    ev.touches().get(0)
}

/// Drag to scrub the timeline; release coasts with decaying inertia.
pub fn wire_touch(renderer: &Rc<Renderer>) {
    let Some(window) = web::window() else {
        return;
    };
    let multiplier = renderer.touch_multiplier();
    let w = Rc::new(TouchWiring {
        renderer: renderer.clone(),
        gesture: RefCell::new(TouchGesture::default()),
        inertia: RefCell::new(None),
        generation: Cell::new(0),
        multiplier,
    });

    {
        let w = w.clone();
        dom::listen(&window, "touchstart", true, move |ev: web::TouchEvent| {
            let Some(t) = first_touch(&ev) else {
                return;
            };
            w.cancel_inertia();
            w.gesture.borrow_mut().begin(
                t.client_x() as f64,
                t.client_y() as f64,
                touch_origin(ev.target()),
            );
        });
    }

    {
        let w = w.clone();
        dom::listen(&window, "touchmove", false, move |ev: web::TouchEvent| {
            let Some(t) = first_touch(&ev) else {
                return;
            };
            let dy = w
                .gesture
                .borrow_mut()
                .update(t.client_x() as f64, t.client_y() as f64);
            if let Some(dy) = dy {
                w.renderer.feed(InputEvent::TouchDrag(dy));
                // We consumed the gesture; keep the page from scrolling too
                ev.prevent_default();
            }
        });
    }

    dom::listen(&window, "touchend", true, move |_: web::TouchEvent| {
        let inertia = w.gesture.borrow_mut().end(w.multiplier);
        if let Some(inertia) = inertia {
            log::debug!("[touch] inertia v={:.2}", inertia.velocity());
            w.launch(inertia);
        }
    });
}
