//! # Frame Loop State
//!
//! The play/pause gate and per-frame rotation speeds behind the render
//! loop. The loop itself is scheduled by the app layer (every completed
//! frame requests the next redraw); this state decides what a frame tick
//! does to the scene and whether the loop should keep going at all.

use crate::gfx::scene::Drawable;

/// Animation state advanced once per rendered frame.
///
/// Two states: idle (`playing == false`, ticks draw but do not rotate) and
/// animating. The stage starts idle, matching the demo it reproduces.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    /// Whether `advance` applies rotation.
    pub playing: bool,
    /// Radians added to the subject's rotation.x per frame while playing.
    pub speed_x: f32,
    /// Radians added to the subject's rotation.y per frame while playing.
    pub speed_y: f32,
    running: bool,
}

impl Default for FrameLoop {
    fn default() -> Self {
        FrameLoop {
            playing: false,
            speed_x: 0.01,
            speed_y: 0.01,
            running: true,
        }
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speeds(speed_x: f32, speed_y: f32) -> Self {
        FrameLoop {
            speed_x,
            speed_y,
            ..Default::default()
        }
    }

    /// Apply one animation tick to the drawable.
    ///
    /// While playing, adds the per-axis speeds to the rotation; while idle,
    /// leaves it untouched. Resuming continues from the current angles.
    pub fn advance(&self, drawable: &mut Drawable) {
        if self.playing {
            drawable.rotation.x += self.speed_x;
            drawable.rotation.y += self.speed_y;
        }
    }

    /// Stop scheduling frames. Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("frame loop stopped");
        }
    }

    /// True until `stop` is called; the app exits its loop once false.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::GeometryKind;
    use crate::gfx::resources::material::{Colour, Material};

    fn cube() -> Drawable {
        Drawable::new(
            "cube",
            GeometryKind::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Material::solid(Colour::WHITE),
        )
    }

    #[test]
    fn test_starts_idle_with_default_speeds() {
        let frame = FrameLoop::new();
        assert!(!frame.playing);
        assert_eq!(frame.speed_x, 0.01);
        assert_eq!(frame.speed_y, 0.01);
        assert!(frame.is_running());
    }

    #[test]
    fn test_five_ticks_accumulate_speed() {
        let mut frame = FrameLoop::with_speeds(0.02, 0.01);
        frame.playing = true;
        let mut drawable = cube();
        for _ in 0..5 {
            frame.advance(&mut drawable);
        }
        assert!((drawable.rotation.x - 0.10).abs() < 1e-6);
        assert!((drawable.rotation.y - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_idle_ticks_do_not_rotate() {
        let frame = FrameLoop::new();
        let mut drawable = cube();
        for _ in 0..10 {
            frame.advance(&mut drawable);
        }
        assert_eq!(drawable.rotation.x, 0.0);
        assert_eq!(drawable.rotation.y, 0.0);
    }

    #[test]
    fn test_resume_continues_from_current_angle() {
        let mut frame = FrameLoop::with_speeds(0.02, 0.02);
        let mut drawable = cube();

        frame.playing = true;
        frame.advance(&mut drawable);
        let after_one = drawable.rotation.x;

        frame.playing = false;
        frame.advance(&mut drawable);
        assert_eq!(drawable.rotation.x, after_one);

        frame.playing = true;
        frame.advance(&mut drawable);
        assert!((drawable.rotation.x - 2.0 * 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_negative_speed_reverses_spin() {
        let mut frame = FrameLoop::with_speeds(-0.01, 0.0);
        frame.playing = true;
        let mut drawable = cube();
        frame.advance(&mut drawable);
        assert!(drawable.rotation.x < 0.0);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut frame = FrameLoop::new();
        frame.stop();
        assert!(!frame.is_running());
        frame.stop();
        assert!(!frame.is_running());
    }
}
