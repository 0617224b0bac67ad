use crate::core::input::key_step;
use crate::core::InputEvent;
use crate::dom;
use crate::frame::Renderer;
use std::rc::Rc;
use web_sys as web;

/// Arrow/Page keys and space step the timeline.
pub fn wire_keyboard(renderer: &Rc<Renderer>) {
    let Some(window) = web::window() else {
        return;
    };
    let renderer = renderer.clone();
    dom::listen(&window, "keydown", false, move |ev: web::KeyboardEvent| {
        if let Some(step) = key_step(&ev.key()) {
            ev.prevent_default();
            renderer.feed(InputEvent::Key(step));
        }
    });
}
