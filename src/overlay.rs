use crate::constants::*;
use crate::core::choreo::{
    background_click_action, pointer_zone, ClickAction, ClickTarget, Stagger, UiSnapshot,
    ZoneTracker, CARD_INTRO, CARD_REVEAL, NAV_INTRO,
};
use crate::details::DetailCards;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Run `apply` on each element on the stagger schedule, or all at once
/// under reduced motion.
fn stagger(els: Vec<web::Element>, plan: Stagger, reduced: bool, apply: fn(&web::Element)) {
    match plan.delays(els.len(), reduced) {
        None => els.iter().for_each(apply),
        Some(delays) => {
            for (el, ms) in els.into_iter().zip(delays) {
                dom::set_timeout(ms as i32, move || apply(&el));
            }
        }
    }
}

fn show_from_top(el: &web::Element) {
    dom::remove_class(el, INTRO_TOP_HIDDEN);
    dom::add_class(el, INTRO_TOP_VISIBLE);
}

fn show_from_below(el: &web::Element) {
    dom::remove_class(el, INTRO_HIDDEN);
    dom::add_class(el, INTRO_VISIBLE);
}

/// Top nav bars slide in from the top, staggered.
pub fn play_nav_intro(document: &web::Document, reduced: bool) {
    let navs = dom::query_all(document, NAV_SELECTOR);
    dom::remove_class_all(&navs, EXIT_OUT);
    dom::add_class_all(&navs, INTRO_TOP_HIDDEN);
    stagger(navs, NAV_INTRO, reduced, show_from_top);
}

/// Category cards slide up after the nav has started.
pub fn play_card_intro(document: &web::Document, reduced: bool) {
    let cards = dom::query_all(document, CARD_SELECTOR);
    if let Some(root) = dom::html_root(document) {
        dom::remove_class(&root, UI_EXITED_CLASS);
    }
    dom::remove_class_all(&cards, EXIT_OUT);
    dom::add_class_all(&cards, INTRO_HIDDEN);
    if dom::small_screen() {
        pin_visible(document);
    }
    stagger(cards, CARD_INTRO, reduced, show_from_below);
}

pub fn is_exited(document: &web::Document) -> bool {
    dom::html_root(document)
        .map(|r| r.class_list().contains(UI_EXITED_CLASS))
        .unwrap_or(false)
}

/// Clear every exit marker immediately (small screens never hide the UI).
pub fn pin_visible(document: &web::Document) {
    if let Some(root) = dom::html_root(document) {
        dom::remove_class(&root, UI_EXITED_CLASS);
    }
    if let Some(nav) = dom::query(document, NAV_SELECTOR) {
        dom::remove_class(&nav, EXIT_OUT);
    }
    dom::remove_class_all(&dom::query_all(document, CARD_SELECTOR), EXIT_OUT);
}

/// Bring an exited UI back: nav first, then cards with a light stagger.
pub fn reveal(document: &web::Document, reduced: bool) {
    if !is_exited(document) {
        return;
    }
    let nav = dom::query(document, NAV_SELECTOR);
    let cards = dom::query_all(document, CARD_SELECTOR);
    pin_visible(document);
    dom::force_reflow(document);
    if let Some(nav) = &nav {
        dom::add_class(nav, INTRO_TOP_VISIBLE);
    }
    dom::remove_class_all(&cards, INTRO_HIDDEN);
    stagger(cards, CARD_REVEAL, reduced, |el| {
        dom::add_class(el, INTRO_VISIBLE)
    });
}

/// Slide the nav and cards out.
pub fn exit(document: &web::Document) {
    let Some(root) = dom::html_root(document) else {
        return;
    };
    dom::add_class(&root, UI_EXITED_CLASS);
    let nav = dom::query(document, NAV_SELECTOR);
    let cards = dom::query_all(document, CARD_SELECTOR);
    if let Some(nav) = &nav {
        dom::remove_class(nav, INTRO_TOP_HIDDEN);
        dom::remove_class(nav, INTRO_TOP_VISIBLE);
    }
    for el in &cards {
        dom::remove_class(el, INTRO_HIDDEN);
        dom::remove_class(el, INTRO_VISIBLE);
    }
    // Commit the current transforms before adding the exit classes
    dom::force_reflow(document);
    dom::request_animation_frame(move || {
        if let Some(nav) = &nav {
            dom::add_class(nav, EXIT_OUT);
        }
        dom::add_class_all(&cards, EXIT_OUT);
    });
}

/// Pointer entering the top or bottom edge reveals an exited UI.
pub fn wire_edge_reveal(document: &web::Document, reduced: bool) {
    let Some(window) = web::window() else {
        return;
    };
    let document = document.clone();
    let tracker = RefCell::new(ZoneTracker::default());
    dom::listen(&window, "mousemove", true, move |ev: web::MouseEvent| {
        let (_, vh) = dom::viewport();
        let zone = pointer_zone(ev.client_y() as f64, vh);
        if tracker.borrow_mut().update(zone) && !dom::small_screen() {
            reveal(&document, reduced);
        }
    });
}

/// Background clicks collapse details, then hide or reveal the UI.
pub fn wire_background_click(
    document: &web::Document,
    reduced: bool,
    details: Rc<RefCell<DetailCards>>,
) {
    let doc = document.clone();
    dom::listen(document, "click", false, move |ev: web::MouseEvent| {
        if ev.default_prevented() {
            return;
        }
        let target = ClickTarget {
            inside_card: dom::target_within(ev.target(), CARD_SELECTOR),
            inside_detail: dom::target_within(ev.target(), DETAIL_SELECTOR),
            inside_nav: dom::target_within(ev.target(), NAV_SELECTOR),
        };
        let ui = UiSnapshot {
            small_screen: dom::small_screen(),
            exited: is_exited(&doc),
            open_cards: details.borrow().open_count(),
        };
        let action = background_click_action(target, ui);
        log::debug!("[ui] background click -> {:?}", action);
        match action {
            ClickAction::Ignore => {}
            ClickAction::CloseAllAndPin => {
                details.borrow_mut().close_all();
                pin_visible(&doc);
            }
            ClickAction::Reveal => {
                ev.prevent_default();
                reveal(&doc, reduced);
            }
            ClickAction::CloseAll => details.borrow_mut().close_all(),
            ClickAction::Exit => {
                // Next frame, so any close transitions settle first
                let doc = doc.clone();
                let details = details.clone();
                dom::request_animation_frame(move || {
                    if details.borrow().open_count() == 0 {
                        exit(&doc);
                    }
                });
            }
        }
    });
}

/// Shrinking to a small screen always brings the UI back.
pub fn wire_resize_guard(document: &web::Document) {
    let Some(window) = web::window() else {
        return;
    };
    let document = document.clone();
    dom::listen(&window, "resize", true, move |_: web::Event| {
        if dom::small_screen() {
            pin_visible(&document);
        }
    });
}
