//! # Graphics Module
//!
//! Everything the stage draws with: the fixed camera, geometry generation,
//! ray picking, the wgpu render engine, and scene/resource management.
//!
//! - **Camera** ([`camera`]) - Fixed perspective camera and its uniform
//! - **Geometry** ([`geometry`]) - Box and plane mesh generation
//! - **Picking** ([`picking`]) - Pointer rays and bounding-box tests
//! - **Rendering** ([`rendering`]) - Unlit pipeline and per-drawable GPU state
//! - **Resources** ([`resources`]) - Materials, image decoding, texture upload
//! - **Scene** ([`scene`]) - Drawables and the retained scene

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::StageCamera;
pub use rendering::render_engine::RenderEngine;
pub use scene::Scene;
