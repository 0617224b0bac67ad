pub mod cache;
pub mod choreo;
pub mod config;
pub mod constants;
pub mod details;
pub mod engine;
pub mod home;
pub mod input;
pub mod perf;
pub mod playback;
pub mod preload;
pub mod theme;
pub mod timeline;

pub use config::{EngineConfig, Profile};
pub use engine::{RenderTarget, ZoomEngine};
pub use input::InputEvent;
pub use preload::{MediaKind, ASSET_LIST};
