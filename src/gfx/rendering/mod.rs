// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles the render pipeline, GPU resource management, and frame rendering.

pub mod render_engine;

// Re-export main types
pub use render_engine::{DrawableGpu, ObjectUniform, RenderEngine};
