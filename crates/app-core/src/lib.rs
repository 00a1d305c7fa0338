pub mod annotation;
pub mod camera;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod picking;
pub mod transition;

pub static SKYBOX_WGSL: &str = include_str!("../shaders/skybox.wgsl");
pub static MARKER_WGSL: &str = include_str!("../shaders/marker.wgsl");
pub static OVERLAY_WGSL: &str = include_str!("../shaders/overlay.wgsl");

pub use annotation::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use controller::*;
pub use error::*;
pub use picking::*;
pub use transition::*;
