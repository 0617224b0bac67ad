use crate::constants::{CARD_SCROLLER_SELECTOR, TABLET_QUERY};
use crate::dom;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// On tablets and phones the card row scrolls itself; on desktop the page
/// scrolls horizontally.
fn scroll_element(scroller: &web::Element) -> Option<web::Element> {
    if dom::media_matches(TABLET_QUERY) {
        return Some(scroller.clone());
    }
    let document = dom::window_document()?;
    document
        .scrolling_element()
        .or_else(|| document.document_element())
}

#[derive(Default)]
struct Drag {
    active: Cell<bool>,
    start_x: Cell<f64>,
    start_scroll_left: Cell<f64>,
}

/// Click-drag scrolling for the card row, and wheel redirection onto the
/// row on narrow viewports.
pub fn wire_card_scroller(document: &web::Document) {
    let Some(scroller) = dom::query(document, CARD_SCROLLER_SELECTOR) else {
        return;
    };
    let Some(window) = web::window() else {
        return;
    };
    let drag = Rc::new(Drag::default());

    {
        let drag = drag.clone();
        let s = scroller.clone();
        dom::listen(&scroller, "mousedown", false, move |ev: web::MouseEvent| {
            if ev.button() != 0 {
                return;
            }
            drag.active.set(true);
            dom::add_class(&s, "dragging");
            drag.start_x.set(ev.client_x() as f64);
            let left = scroll_element(&s).map(|e| e.scroll_left() as f64).unwrap_or(0.0);
            drag.start_scroll_left.set(left);
            ev.prevent_default();
        });
    }
    {
        let drag = drag.clone();
        let s = scroller.clone();
        dom::listen(&window, "mousemove", false, move |ev: web::MouseEvent| {
            if !drag.active.get() {
                return;
            }
            let dx = drag.start_x.get() - ev.client_x() as f64;
            if let Some(el) = scroll_element(&s) {
                el.set_scroll_left((drag.start_scroll_left.get() + dx) as i32);
            }
            ev.prevent_default();
        });
    }
    for (target, event) in [
        (window.unchecked_ref::<web::EventTarget>(), "mouseup"),
        (scroller.unchecked_ref::<web::EventTarget>(), "mouseleave"),
    ] {
        let drag = drag.clone();
        let s = scroller.clone();
        dom::listen(target, event, true, move |_: web::MouseEvent| {
            if drag.active.replace(false) {
                dom::remove_class(&s, "dragging");
            }
        });
    }

    let s = scroller.clone();
    dom::listen(&scroller, "wheel", false, move |ev: web::WheelEvent| {
        // Desktop: let the background timeline keep the wheel
        if !dom::media_matches(TABLET_QUERY) {
            return;
        }
        let delta = if ev.delta_x().abs() > ev.delta_y().abs() {
            ev.delta_x()
        } else {
            ev.delta_y()
        };
        if let Some(el) = scroll_element(&s) {
            el.set_scroll_left(el.scroll_left() + delta as i32);
        }
        ev.stop_propagation();
        ev.prevent_default();
    });
}
