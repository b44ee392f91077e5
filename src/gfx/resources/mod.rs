// src/gfx/resources/mod.rs
//! Materials, images, and GPU texture resources.

pub mod loader;
pub mod material;
pub mod texture;

// Re-export main types
pub use loader::{LoadOutcome, TextureLoader};
pub use material::{format_hex_colour, random_colour, Colour, Material};
pub use texture::{ImagePixels, TextureResource};
