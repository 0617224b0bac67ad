use crate::constants::*;
use crate::core::details::{panel_specs, DetailKind, DetailSet, PanelSpec, Toggle};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const OPEN_CLASS: &str = "open";
const EMPHASIZE_CLASS: &str = "emphasize";

/// Expandable category cards. Several may be open at once; each owns one or
/// more detail panels inserted right after it in its column.
pub struct DetailCards {
    document: web::Document,
    cards: Vec<web::Element>,
    set: DetailSet<usize, web::HtmlElement>,
}

fn text_of(el: Option<web::Element>) -> String {
    el.and_then(|e| e.text_content()).unwrap_or_default()
}

/// First paragraph after the label reading `name`, skipping further labels
/// and line breaks.
fn paragraph_after_label(body: &web::Element, name: &str) -> String {
    let label = dom::query_all_in(body, CARD_LABEL_SELECTOR)
        .into_iter()
        .find(|l| text_of(Some(l.clone())).trim().eq_ignore_ascii_case(name));
    let mut node = label.and_then(|l| l.next_element_sibling());
    while let Some(n) = &node {
        let skip = n.class_list().contains("text-label") || n.tag_name() == "BR";
        if !skip {
            break;
        }
        node = n.next_element_sibling();
    }
    node.filter(|n| n.tag_name() == "P")
        .map(|n| n.outer_html())
        .unwrap_or_default()
}

impl DetailCards {
    /// Prepare every card and attach click/keyboard toggles.
    pub fn wire(document: &web::Document) -> Rc<RefCell<Self>> {
        // Stray panels from an earlier run would double up
        for stray in dom::query_all(document, DETAIL_SELECTOR) {
            stray.remove();
        }
        let cards = dom::query_all(document, CARD_SELECTOR);
        let this = Rc::new(RefCell::new(Self {
            document: document.clone(),
            cards: cards.clone(),
            set: DetailSet::default(),
        }));
        for (idx, card) in cards.iter().enumerate() {
            if let Some(h) = card.dyn_ref::<web::HtmlElement>() {
                h.set_tab_index(0);
            }
            _ = card.set_attribute("role", "button");
            _ = card.set_attribute("aria-expanded", "false");
            _ = card.set_attribute("aria-controls", &format!("detail-for-{idx}"));

            let on_click = this.clone();
            dom::listen(card, "click", false, move |ev: web::MouseEvent| {
                ev.stop_propagation();
                on_click.borrow_mut().toggle(idx);
            });
            let on_key = this.clone();
            dom::listen(card, "keydown", false, move |ev: web::KeyboardEvent| {
                let key = ev.key();
                if dom::is_activation_key(&key) {
                    ev.prevent_default();
                    on_key.borrow_mut().toggle(idx);
                } else if key == "Escape" {
                    ev.prevent_default();
                    on_key.borrow_mut().close(idx, false);
                }
            });
        }
        log::info!("[details] wired {} cards", cards.len());
        this
    }

    #[inline]
    pub fn open_count(&self) -> usize {
        self.set.open_count()
    }

    pub fn toggle(&mut self, idx: usize) {
        let Some(card) = self.cards.get(idx).cloned() else {
            return;
        };
        let label = text_of(card.query_selector(CARD_LABEL_SELECTOR).ok().flatten());
        let kind = DetailKind::from_label(&label);
        match self.set.toggle(&idx, kind.panel_count()) {
            Toggle::Closed(panels) => {
                collapse(&panels, false);
                _ = card.set_attribute("aria-expanded", "false");
            }
            Toggle::Open { reuse } => self.open(idx, &card, kind, &label, reuse),
        }
    }

    fn open(
        &mut self,
        idx: usize,
        card: &web::Element,
        kind: DetailKind,
        label: &str,
        reuse: Option<impl IntoIterator<Item = web::HtmlElement>>,
    ) {
        let body = card.query_selector(CARD_BODY_SELECTOR).ok().flatten();
        let body_html = body.as_ref().map(|b| b.inner_html()).unwrap_or_default();
        let (problem, solution) = match (&body, kind) {
            (Some(b), DetailKind::ProblemSolution) => (
                paragraph_after_label(b, "problem"),
                paragraph_after_label(b, "solution"),
            ),
            _ => (String::new(), String::new()),
        };
        let specs = panel_specs(kind, label, &body_html, &problem, &solution);

        let panels: Vec<web::HtmlElement> = match reuse {
            Some(existing) => existing
                .into_iter()
                .zip(&specs)
                .map(|(p, layout)| {
                    reset_panel(&p, layout, kind.emphasized());
                    p
                })
                .collect(),
            None => specs
                .iter()
                .filter_map(|layout| self.make_panel(layout, kind.emphasized()))
                .collect(),
        };

        let column = card
            .closest(CARD_COLUMN_SELECTOR)
            .ok()
            .flatten()
            .or_else(|| card.parent_element());
        if let Some(col) = &column {
            let mut after: web::Node = card.clone().into();
            for p in &panels {
                _ = col.insert_before(p, after.next_sibling().as_ref());
                after = p.clone().into();
            }
        }
        if let Some(first) = panels.first() {
            first.set_id(&format!("detail-for-{idx}"));
        }
        for p in &panels {
            expand(p);
        }
        _ = card.set_attribute("aria-expanded", "true");
        self.set.opened(idx, panels);
    }

    fn make_panel(&self, layout: &PanelSpec, emphasized: bool) -> Option<web::HtmlElement> {
        let panel = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<web::HtmlElement>()
            .ok()?;
        panel.set_class_name(DETAIL_CLASS);
        _ = panel.set_attribute("role", "region");
        _ = panel.set_attribute("aria-label", &layout.aria_label);
        let inner = self.document.create_element("div").ok()?;
        inner.set_class_name(DETAIL_INNER_CLASS);
        inner.set_inner_html(&layout.html);
        if emphasized {
            dom::add_class(&inner, EMPHASIZE_CLASS);
        }
        _ = panel.append_child(&inner);
        Some(panel)
    }

    /// Close one card; `immediate` skips the height transition.
    pub fn close(&mut self, idx: usize, immediate: bool) {
        let Some(panels) = self.set.close(&idx) else {
            return;
        };
        collapse(&panels, immediate);
        if let Some(card) = self.cards.get(idx) {
            _ = card.set_attribute("aria-expanded", "false");
        }
    }

    pub fn close_all(&mut self) {
        for (idx, panels) in self.set.close_all() {
            collapse(&panels, false);
            if let Some(card) = self.cards.get(idx) {
                _ = card.set_attribute("aria-expanded", "false");
            }
        }
    }
}

fn inner_of(panel: &web::HtmlElement) -> web::Element {
    panel
        .query_selector(&format!(".{DETAIL_INNER_CLASS}"))
        .ok()
        .flatten()
        .unwrap_or_else(|| panel.clone().into())
}

fn reset_panel(panel: &web::HtmlElement, layout: &PanelSpec, emphasized: bool) {
    dom::remove_class(panel, OPEN_CLASS);
    dom::set_style(panel, "margin-top", "");
    dom::set_style(panel, "opacity", "");
    dom::set_style(panel, "pointer-events", "");
    let inner = inner_of(panel);
    inner.set_inner_html(&layout.html);
    if emphasized {
        dom::add_class(&inner, EMPHASIZE_CLASS);
    } else {
        dom::remove_class(&inner, EMPHASIZE_CLASS);
    }
}

/// Animate from zero to the content height, then release to `auto`.
fn expand(panel: &web::HtmlElement) {
    dom::set_style(panel, "pointer-events", "auto");
    dom::set_style(panel, "height", "0px");
    let panel = panel.clone();
    dom::request_animation_frame(move || {
        let target_h = panel.scroll_height();
        dom::add_class(&panel, OPEN_CLASS);
        dom::set_style(&panel, "height", &format!("{target_h}px"));
        let p = panel.clone();
        dom::listen_once(&panel, "transitionend", move || {
            dom::set_style(&p, "height", "auto");
        });
    });
}

/// Collapse panels in place; they stay in the DOM to avoid a late reflow.
fn collapse(panels: &[web::HtmlElement], immediate: bool) {
    for p in panels {
        if immediate {
            dom::remove_class(p, OPEN_CLASS);
            settle_closed(p);
            dom::set_style(p, "height", "0px");
            continue;
        }
        dom::set_style(p, "height", &format!("{}px", p.scroll_height()));
        _ = p.offset_height();
        dom::remove_class(p, OPEN_CLASS);
        dom::set_style(p, "height", "0px");
        let done = p.clone();
        dom::listen_once(p, "transitionend", move || settle_closed(&done));
    }
}

fn settle_closed(p: &web::HtmlElement) {
    dom::set_style(p, "margin-top", "0px");
    dom::set_style(p, "opacity", "0");
    dom::set_style(p, "pointer-events", "none");
}
