//! # Stage
//!
//! The aggregate owning all mutable stage state: scene, frame loop, pick
//! dispatcher, and texture loader. The app layer feeds it window events and
//! ticks it once per frame; nothing in here is global or shared.

use crate::control::{self, ControlAxis, ControlProperty};
use crate::error::VitrineError;
use crate::frame::FrameLoop;
use crate::gfx::picking::{PickHit, PointerNdc};
use crate::gfx::resources::loader::TextureLoader;
use crate::gfx::scene::Scene;
use crate::pick::{PickDispatcher, PickPolicy, TextureCycle};

/// Which scene and pick policy a stage starts with.
enum Preset {
    Cube,
    Gallery {
        sources: Vec<String>,
        base_scale: f32,
    },
}

/// Construction parameters for a [`Stage`].
pub struct StageConfig {
    pub title: String,
    pub speed_x: f32,
    pub speed_y: f32,
    preset: Preset,
}

impl StageConfig {
    /// The spinning cube with colour-swap picking.
    pub fn cube() -> Self {
        StageConfig {
            title: "vitrine".to_string(),
            speed_x: 0.01,
            speed_y: 0.01,
            preset: Preset::Cube,
        }
    }

    /// The textured plane cycling through `sources` on click.
    pub fn gallery(sources: Vec<String>) -> Self {
        StageConfig {
            title: "vitrine gallery".to_string(),
            speed_x: 0.01,
            speed_y: 0.01,
            preset: Preset::Gallery {
                sources,
                base_scale: 3.0,
            },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_speeds(mut self, speed_x: f32, speed_y: f32) -> Self {
        self.speed_x = speed_x;
        self.speed_y = speed_y;
        self
    }

    /// Resize the gallery plane; ignored for the cube preset.
    pub fn with_base_scale(mut self, scale: f32) -> Self {
        if let Preset::Gallery { base_scale, .. } = &mut self.preset {
            *base_scale = scale;
        }
        self
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        Self::cube()
    }
}

/// Everything the app drives, in one owned value.
pub struct Stage {
    pub scene: Scene,
    pub frame: FrameLoop,
    pub picker: PickDispatcher,
    pub loader: TextureLoader,
    title: String,
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        let (scene, policy) = match config.preset {
            Preset::Cube => (Scene::cube_stage(), PickPolicy::ColourSwap),
            Preset::Gallery {
                sources,
                base_scale,
            } => (
                Scene::gallery_stage(base_scale),
                PickPolicy::TextureCycle(TextureCycle::new(sources, base_scale)),
            ),
        };

        Stage {
            scene,
            frame: FrameLoop::with_speeds(config.speed_x, config.speed_y),
            picker: PickDispatcher::new(policy),
            loader: TextureLoader::new(),
            title: config.title,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Per-frame work before drawing: land finished texture loads first,
    /// then advance the animation, so a fresh texture shows the same frame
    /// it arrives.
    pub fn tick(&mut self) {
        self.picker
            .absorb_completions(&mut self.scene, &mut self.loader);
        if let Some(subject) = self.scene.subject_mut() {
            self.frame.advance(subject);
        }
    }

    /// Dispatch a pointer-down event in client coordinates.
    pub fn pointer_down(
        &mut self,
        client_x: f32,
        client_y: f32,
        viewport_w: f32,
        viewport_h: f32,
    ) -> Option<PickHit> {
        let pointer = PointerNdc::from_client(client_x, client_y, viewport_w, viewport_h)?;
        self.picker
            .pointer_down(pointer, &mut self.scene, &mut self.loader)
    }

    /// Keep the camera's aspect in line with the viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.scene.camera.resize_viewport(width, height);
    }

    /// Write a control value to the subject drawable or the frame loop.
    pub fn apply_control(
        &mut self,
        property: ControlProperty,
        axis: ControlAxis,
        value: f32,
    ) -> Result<(), VitrineError> {
        match self.scene.subject_mut() {
            Some(subject) => control::apply_control(subject, &mut self.frame, property, axis, value),
            None => Ok(()),
        }
    }

    /// Recolour the subject drawable from hex text.
    pub fn apply_colour(&mut self, text: &str) -> Result<(), VitrineError> {
        match self.scene.subject_mut() {
            Some(subject) => control::apply_colour(subject, text),
            None => Ok(()),
        }
    }

    pub fn stop(&mut self) {
        self.frame.stop();
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_running()
    }
}
