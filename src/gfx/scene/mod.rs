//! # Scene Management Module
//!
//! The retained scene the stage renders every frame.
//!
//! ## Key Components
//!
//! - [`Scene`] - Container owning the drawables, the background colour, and
//!   the camera
//! - [`Drawable`] - One visual object with geometry, transform, and material
//! - [`Vertex3D`] - GPU vertex layout with position, normal, and UV

pub mod drawable;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use drawable::Drawable;
pub use scene::Scene;
pub use vertex::Vertex3D;
