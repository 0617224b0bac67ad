mod keyboard;
mod pointer;
mod scroller;

pub use keyboard::wire_keyboard;
pub use pointer::{wire_touch, wire_wheel};
pub use scroller::wire_card_scroller;
