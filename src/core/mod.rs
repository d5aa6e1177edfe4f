pub mod capability;
pub mod color;
pub mod constants;
pub mod contact;
pub mod cursor;
pub mod fluid;
pub mod hero;
pub mod lifecycle;
pub mod particles;
pub mod pin;
pub mod pointer;
pub mod reveal;
pub mod site;
pub mod timeline;
pub mod timers;

pub use capability::*;
pub use constants::*;

// Shaders bundled as string constants
pub static FLUID_SIM_WGSL: &str = include_str!("../../shaders/fluid_sim.wgsl");
pub static FLUID_RENDER_WGSL: &str = include_str!("../../shaders/fluid_render.wgsl");
