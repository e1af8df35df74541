// ============================================================================
// EMBER FIELD - Pointer-reactive particle background
// ============================================================================
//
// Sixty embers drift across a canvas, get pulled toward the pointer, bounce
// off the viewport edges and link up with faint lines when close. Four
// blurred orbs float underneath on their own clock.
//
//   sim/     particle set and per-frame physics
//   render   frame painting onto any `Surface`
//   orbs     floating orb tweens
//   scene    mount/unmount lifecycle against a `Host`
//   host/    host boundary; `host::web` binds it to the browser

pub mod color;
pub mod host;
pub mod input;
pub mod orbs;
pub mod render;
pub mod scene;
pub mod sim;
pub mod world;

pub use color::{Color, Palette};
pub use host::{Host, HostError};
pub use render::{Renderer, Surface};
pub use scene::{Scene, SceneConfig};
pub use sim::{Particle, Particles, Simulation};
pub use world::Viewport;

#[cfg(target_arch = "wasm32")]
pub use host::web::AnimatedBackground;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}
