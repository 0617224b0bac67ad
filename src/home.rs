use crate::constants::*;
use crate::core::choreo::TILE_INTRO;
use crate::core::home::{
    all_tile_backgrounds, next_tab, nearest_tile, tile_background, tilt_degrees, TILE_VIDEOS,
};
use crate::dom;
use crate::media;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const SELECTED_CLASS: &str = "selected";
const HOVER_PROXY_CLASS: &str = "hover-proxy";

fn make_link(el: &web::Element, go: fn()) {
    _ = el.set_attribute("tabindex", "0");
    _ = el.set_attribute("role", "link");
    dom::listen(el, "click", false, move |_: web::MouseEvent| go());
    dom::listen(el, "keydown", false, move |ev: web::KeyboardEvent| {
        if dom::is_activation_key(&ev.key()) {
            ev.prevent_default();
            go();
        }
    });
}

/// Left half of the split nav goes home, right half opens the profile.
/// Skipped when the split is used as a tab list.
pub fn wire_split_nav(document: &web::Document) {
    let Some(split) = dom::query(document, SPLIT_NAV_SELECTOR) else {
        return;
    };
    if split.get_attribute("role").as_deref() == Some("tablist") {
        return;
    }
    if let Ok(Some(left)) = split.query_selector(".nav-left") {
        make_link(&left, || dom::navigate(HOME_HREF));
    }
    if let Ok(Some(right)) = split.query_selector(".nav-right") {
        make_link(&right, || dom::open_new_tab(PROFILE_URL));
    }
}

/// Selectable project tiles on the home page.
struct Tiles {
    body: Option<web::HtmlElement>,
    tiles: Vec<web::HtmlElement>,
    videos: Vec<(usize, web::HtmlMediaElement)>,
    proxy: Cell<Option<usize>>,
}

impl Tiles {
    fn select(&self, index: usize) {
        self.clear_proxy();
        for (i, t) in self.tiles.iter().enumerate() {
            let on = i == index;
            _ = t.class_list().toggle_with_force(SELECTED_CLASS, on);
            _ = t.set_attribute("aria-pressed", if on { "true" } else { "false" });
        }
        if let Some(body) = &self.body {
            for class in all_tile_backgrounds() {
                dom::remove_class(body, class);
            }
            if let Some(class) = tile_background(index) {
                dom::add_class(body, class);
            }
        }
        for (i, v) in &self.videos {
            if *i == index {
                media::play_quietly(v);
            } else {
                if !v.paused() {
                    _ = v.pause();
                }
                // Keep a visible first frame while paused
                v.set_current_time(v.current_time().max(0.01));
            }
        }
    }

    fn is_selected(&self, index: usize) -> bool {
        self.tiles
            .get(index)
            .is_some_and(|t| t.class_list().contains(SELECTED_CLASS))
    }

    /// Click or activation key: the first tile, once expanded, opens the
    /// case study.
    fn activate(&self, index: usize) {
        if index == 0 && self.is_selected(0) {
            dom::navigate(CASE_STUDY_HREF);
            return;
        }
        self.select(index);
    }

    fn clear_proxy(&self) {
        self.proxy.set(None);
        for t in &self.tiles {
            dom::remove_class(t, HOVER_PROXY_CLASS);
        }
    }

    /// Pointer in the gaps between tiles slightly expands the nearest one.
    fn update_proxy(&self, x: f64, y: f64) {
        let centers: Vec<(f64, f64)> = self
            .tiles
            .iter()
            .map(|t| {
                let r = t.get_bounding_client_rect();
                (r.left() + r.width() / 2.0, r.top() + r.height() / 2.0)
            })
            .collect();
        match nearest_tile(&centers, x, y) {
            Some(best) if !self.is_selected(best) => {
                if self.proxy.get() != Some(best) {
                    self.clear_proxy();
                    dom::add_class(&self.tiles[best], HOVER_PROXY_CLASS);
                    self.proxy.set(Some(best));
                }
            }
            _ => self.clear_proxy(),
        }
    }
}

fn attach_video(document: &web::Document, tile: &web::HtmlElement, src: &str) -> Option<web::HtmlMediaElement> {
    let v: web::HtmlMediaElement = media::create_video(document, src)?.unchecked_into();
    media::prepare_loop(&v);
    _ = v.set_attribute("aria-hidden", "true");
    let nudge = v.clone();
    dom::listen_once(&v, "loadedmetadata", move || {
        if nudge.current_time() == 0.0 {
            nudge.set_current_time(0.01);
        }
    });
    tile.set_inner_html("");
    _ = tile.append_child(&v);
    Some(v)
}

fn wire_tilt(tile: &web::HtmlElement) {
    let t = tile.clone();
    dom::listen(tile, "mousemove", true, move |ev: web::MouseEvent| {
        if !t.class_list().contains(SELECTED_CLASS) {
            return;
        }
        let r = t.get_bounding_client_rect();
        if r.width() <= 0.0 || r.height() <= 0.0 {
            return;
        }
        let u = (ev.client_x() as f64 - r.left()) / r.width();
        let v = (ev.client_y() as f64 - r.top()) / r.height();
        let (rx, ry) = tilt_degrees(u, v);
        dom::set_style(&t, "--tiltX", &format!("{rx:.2}deg"));
        dom::set_style(&t, "--tiltY", &format!("{ry:.2}deg"));
    });
    let t = tile.clone();
    dom::listen(tile, "mouseleave", true, move |_: web::MouseEvent| {
        dom::set_style(&t, "--tiltX", "0deg");
        dom::set_style(&t, "--tiltY", "0deg");
    });
}

/// Tile grid: intro, selection, preview videos, hover proxy and tilt.
pub fn wire_tiles(document: &web::Document, reduced: bool) {
    let tiles: Vec<web::HtmlElement> = dom::query_all(document, TILE_SELECTOR)
        .into_iter()
        .filter_map(|e| e.dyn_into().ok())
        .collect();
    if tiles.is_empty() {
        return;
    }
    for t in &tiles {
        t.set_tab_index(0);
        _ = t.set_attribute("role", "button");
        _ = t.set_attribute("aria-pressed", "false");
    }

    if let Some(delays) = TILE_INTRO.delays(tiles.len(), reduced) {
        for (t, ms) in tiles.iter().zip(delays) {
            dom::add_class(t, INTRO_HIDDEN);
            let t = t.clone();
            dom::set_timeout(ms as i32, move || {
                dom::remove_class(&t, INTRO_HIDDEN);
                dom::add_class(&t, INTRO_VISIBLE);
            });
        }
    }

    let videos = TILE_VIDEOS
        .iter()
        .filter_map(|&(i, src)| Some((i, attach_video(document, tiles.get(i)?, src)?)))
        .collect();
    let state = Rc::new(Tiles {
        body: document.body(),
        tiles: tiles.clone(),
        videos,
        proxy: Cell::new(None),
    });

    let hover = dom::media_matches(FINE_HOVER_QUERY);
    for (i, t) in tiles.iter().enumerate() {
        let s = state.clone();
        dom::listen(t, "click", false, move |_: web::MouseEvent| s.activate(i));
        let s = state.clone();
        dom::listen(t, "keydown", false, move |ev: web::KeyboardEvent| {
            if dom::is_activation_key(&ev.key()) {
                ev.prevent_default();
                s.activate(i);
            }
        });
        if hover {
            wire_tilt(t);
        }
    }
    state.select(0);

    if let Some(grid) = dom::query(document, TILE_GRID_SELECTOR) {
        let s = state.clone();
        dom::listen(&grid, "mousemove", true, move |ev: web::MouseEvent| {
            // Over a real tile, native :hover takes over
            if dom::target_within(ev.target(), ".tile") {
                s.clear_proxy();
            } else {
                s.update_proxy(ev.client_x() as f64, ev.client_y() as f64);
            }
        });
        dom::listen(&grid, "mouseleave", true, move |_: web::MouseEvent| {
            state.clear_proxy()
        });
    }
    log::info!("[home] wired {} tiles", tiles.len());
}

/// Roving-focus tabs (All, Product, Branding).
pub fn wire_tabs(document: &web::Document) {
    let Some(list) = dom::query(document, TABLIST_SELECTOR) else {
        return;
    };
    let tabs: Rc<Vec<web::HtmlElement>> = Rc::new(
        dom::query_all_in(&list, TAB_SELECTOR)
            .into_iter()
            .filter_map(|e| e.dyn_into().ok())
            .collect(),
    );
    if tabs.is_empty() {
        return;
    }
    let set_active = {
        let tabs = tabs.clone();
        move |idx: usize| {
            for (i, t) in tabs.iter().enumerate() {
                let active = i == idx;
                _ = t.class_list().toggle_with_force("active", active);
                _ = t.set_attribute("aria-selected", if active { "true" } else { "false" });
                t.set_tab_index(if active { 0 } else { -1 });
            }
        }
    };
    let current = Rc::new(Cell::new(
        tabs.iter()
            .position(|t| t.class_list().contains("active"))
            .unwrap_or(0),
    ));
    set_active(current.get());

    for (i, t) in tabs.iter().enumerate() {
        let current = current.clone();
        let set_active = set_active.clone();
        let tab = t.clone();
        dom::listen(t, "click", false, move |ev: web::MouseEvent| {
            ev.prevent_default();
            current.set(i);
            set_active(i);
            _ = tab.focus();
        });
    }
    dom::listen(&list, "keydown", false, move |ev: web::KeyboardEvent| {
        let Some(next) = next_tab(current.get(), &ev.key(), tabs.len()) else {
            return;
        };
        ev.prevent_default();
        current.set(next);
        set_active(next);
        _ = tabs[next].focus();
    });
}
