//! # User Interface Module
//!
//! Dear ImGui-based control panel overlay. The [`UiManager`] handles ImGui
//! integration with winit and wgpu (input capture, frame timing, rendering);
//! [`panel`] provides the built-in stage control panel.
//!
//! Input capture matters here: when the panel has the mouse, pick dispatch
//! is suppressed so a click on a slider never recolours the cube behind it.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{stage_control_panel, PanelState};
