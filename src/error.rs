//! Error types shared across the crate.

use thiserror::Error;

use crate::control::{ControlAxis, ControlProperty};

/// Errors surfaced by stage, control, and rendering operations.
#[derive(Debug, Error)]
pub enum VitrineError {
    /// Colour text that does not parse as `#rrggbb`.
    #[error("invalid colour {value:?}: {reason}")]
    InvalidColour { value: String, reason: &'static str },

    /// Control values must be finite.
    #[error("control value {value} is not finite")]
    NonFiniteControl { value: f32 },

    /// The property does not expose the requested axis.
    #[error("{property:?} has no {axis:?} axis")]
    UnsupportedAxis {
        property: ControlProperty,
        axis: ControlAxis,
    },

    /// Image decode failure while loading a texture source.
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    /// The window has no usable rendering surface.
    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No suitable graphics adapter was found.
    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    /// The adapter refused to provide a device.
    #[error("failed to acquire graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The winit event loop failed to start or ended abnormally.
    #[error("event loop failure: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
