// src/lib.rs
//! Vitrine
//!
//! A small retained-mode 3D stage built on wgpu and winit: a scene of
//! pickable drawables, a play/pause render loop, pointer picking with
//! swappable policies, and an ImGui control panel over the subject's
//! transform.
//!
//! ```no_run
//! fn main() -> Result<(), vitrine::VitrineError> {
//!     let app = vitrine::default();
//!     app.run()
//! }
//! ```

pub mod app;
pub mod control;
pub mod error;
pub mod frame;
pub mod gfx;
pub mod pick;
pub mod stage;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::VitrineApp;
pub use control::{ControlAxis, ControlProperty};
pub use error::VitrineError;
pub use frame::FrameLoop;
pub use pick::{PickDispatcher, PickPolicy, TextureCycle};
pub use stage::{Stage, StageConfig};

/// Creates an application showing the default cube stage
pub fn default() -> VitrineApp {
    VitrineApp::new(StageConfig::cube())
}
