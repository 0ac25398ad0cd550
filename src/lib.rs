// Visual effects for the liquid glass landing page, compiled to WebAssembly.
//
// The heart of the crate is `field::ParticleField`, a small particle
// simulation drawn onto any `surface::Surface`. The remaining modules
// compute the page's glass, tilt, scroll and button styling; `web` wires
// all of it to the DOM.

mod utils;

pub mod animation;
pub mod button;
pub mod color;
pub mod config;
pub mod field;
pub mod glass;
pub mod particle;
pub mod scroll;
pub mod surface;
pub mod tilt;
pub mod web;

pub use config::{FieldConfig, FieldOptions};
pub use field::{Connection, ParticleField};
pub use particle::Particle;
pub use surface::{CanvasSurface, DrawCommand, Recorder, Surface};

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Call once from JavaScript before using anything else.
#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logger(log::LevelFilter::Info);
    log::info!("liquid glass effects initialized");
}
