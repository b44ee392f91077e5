//! # Pick Dispatch
//!
//! Pointer clicks become scene mutations here. The geometry (NDC
//! conversion, rays, slab tests) lives in [`crate::gfx::picking`]; this
//! module picks the drawable to mutate and applies the stage's policy.
//!
//! Two policies exist:
//!
//! - **Colour swap**: the hit drawable gets a fresh random solid colour.
//! - **Texture cycle**: each hit advances a cursor over a fixed list of
//!   image sources and starts a background load of the next one. Loads
//!   resolve later through [`PickDispatcher::absorb_completions`].

use crate::gfx::picking::{self, PickHit, PointerNdc};
use crate::gfx::resources::loader::{LoadOutcome, TextureLoader};
use crate::gfx::resources::material::{random_colour, Material};
use crate::gfx::scene::Scene;

/// What a successful pick does to the hit drawable.
pub enum PickPolicy {
    /// Swap the material for a random solid colour.
    ColourSwap,
    /// Cycle through an ordered list of image sources.
    TextureCycle(TextureCycle),
}

/// Cursor over an ordered, fixed list of image sources.
///
/// The cursor starts at `None` (nothing shown yet); the first advance lands
/// on index 0 and later advances step by one, wrapping past the end. With
/// `N` sources, the `(k+1)`-th advance therefore lands on `k mod N`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureCycle {
    sources: Vec<String>,
    cursor: Option<usize>,
    base_scale: f32,
}

impl TextureCycle {
    pub fn new(sources: Vec<String>, base_scale: f32) -> Self {
        TextureCycle {
            sources,
            cursor: None,
            base_scale,
        }
    }

    /// Step the cursor and return the source now selected.
    ///
    /// With no sources this is a no-op returning `None`.
    pub fn advance(&mut self) -> Option<&str> {
        if self.sources.is_empty() {
            return None;
        }
        let next = match self.cursor {
            None => 0,
            Some(i) => (i + 1) % self.sources.len(),
        };
        self.cursor = Some(next);
        Some(&self.sources[next])
    }

    /// Index currently shown, if any pick has landed yet.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Scale the plane stretches from when a landscape or portrait image
    /// arrives.
    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Routes pointer-down events to the nearest pickable drawable and applies
/// the configured policy.
pub struct PickDispatcher {
    policy: PickPolicy,
}

impl PickDispatcher {
    pub fn new(policy: PickPolicy) -> Self {
        PickDispatcher { policy }
    }

    pub fn policy(&self) -> &PickPolicy {
        &self.policy
    }

    /// Cast a ray through the pointer and mutate the nearest pickable hit.
    ///
    /// A miss changes nothing and returns `None`.
    pub fn pointer_down(
        &mut self,
        pointer: PointerNdc,
        scene: &mut Scene,
        loader: &mut TextureLoader,
    ) -> Option<PickHit> {
        let ray = scene.camera.ray_through(pointer);
        let hit = picking::nearest_hit(&ray, scene.pickable_bounds())?;
        log::debug!(
            "pick hit {} at distance {:.2}",
            scene.drawables[hit.index].name,
            hit.distance
        );

        match &mut self.policy {
            PickPolicy::ColourSwap => {
                let colour = random_colour();
                if let Some(drawable) = scene.drawable_mut(hit.index) {
                    log::debug!("swapping {} to {}", drawable.name, colour.to_hex());
                    drawable.set_material(Material::solid(colour));
                }
            }
            PickPolicy::TextureCycle(cycle) => {
                if let Some(source) = cycle.advance() {
                    loader.request(source, hit.index);
                }
            }
        }

        Some(hit)
    }

    /// Apply the newest finished texture load, if one arrived.
    ///
    /// Called once per frame before drawing, so a landed texture shows the
    /// same frame. Failed loads keep the previous material in place.
    pub fn absorb_completions(&mut self, scene: &mut Scene, loader: &mut TextureLoader) {
        if let Some(outcome) = loader.poll_latest() {
            self.apply_outcome(scene, outcome);
        }
    }

    pub(crate) fn apply_outcome(&mut self, scene: &mut Scene, outcome: LoadOutcome) {
        match outcome.result {
            Ok(pixels) => {
                log::debug!(
                    "texture {} loaded at {}x{}",
                    outcome.source,
                    pixels.width,
                    pixels.height
                );
                if let Some(drawable) = scene.drawable_mut(outcome.target) {
                    if let PickPolicy::TextureCycle(cycle) = &self.policy {
                        drawable.scale.y = cycle.base_scale * pixels.aspect();
                    }
                    drawable.set_material(Material::textured(outcome.source, pixels));
                }
            }
            Err(err) => {
                log::warn!(
                    "texture load from {} failed: {err}; keeping previous texture",
                    outcome.source
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::texture::ImagePixels;
    use cgmath::Vector4;

    fn cycle3() -> TextureCycle {
        TextureCycle::new(
            vec!["a.png".into(), "b.png".into(), "c.png".into()],
            3.0,
        )
    }

    /// NDC of a world point under the scene's camera, so pick tests aim
    /// exactly where the drawable is.
    fn ndc_of(scene: &Scene, world: [f32; 3]) -> PointerNdc {
        let clip =
            scene.camera.view_projection() * Vector4::new(world[0], world[1], world[2], 1.0);
        PointerNdc {
            x: clip.x / clip.w,
            y: clip.y / clip.w,
        }
    }

    #[test]
    fn test_cycle_first_advance_lands_on_zero() {
        let mut cycle = cycle3();
        assert_eq!(cycle.cursor(), None);
        assert_eq!(cycle.advance(), Some("a.png"));
        assert_eq!(cycle.cursor(), Some(0));
    }

    #[test]
    fn test_cycle_wraps_around() {
        let mut cycle = cycle3();
        for _ in 0..3 {
            cycle.advance();
        }
        assert_eq!(cycle.cursor(), Some(2));
        assert_eq!(cycle.advance(), Some("a.png"));
        assert_eq!(cycle.cursor(), Some(0));
    }

    #[test]
    fn test_cycle_len_advances_return_to_start() {
        // Advancing exactly len times from any position is the identity
        for start in 0..3 {
            let mut cycle = cycle3();
            for _ in 0..=start {
                cycle.advance();
            }
            let before = cycle.cursor();
            for _ in 0..cycle.len() {
                cycle.advance();
            }
            assert_eq!(cycle.cursor(), before);
        }
    }

    #[test]
    fn test_cycle_kth_pick_shows_k_mod_n() {
        let mut cycle = cycle3();
        for k in 0..7 {
            cycle.advance();
            assert_eq!(cycle.cursor(), Some(k % 3));
        }
    }

    #[test]
    fn test_empty_cycle_never_moves() {
        let mut cycle = TextureCycle::new(Vec::new(), 1.0);
        assert_eq!(cycle.advance(), None);
        assert_eq!(cycle.cursor(), None);
    }

    #[test]
    fn test_colour_swap_on_hit() {
        let mut scene = Scene::cube_stage();
        scene.camera.resize_viewport(800, 600);
        let mut loader = TextureLoader::new();
        let mut dispatcher = PickDispatcher::new(PickPolicy::ColourSwap);

        let pointer = ndc_of(&scene, [1.0, 0.0, 0.0]);
        let hit = dispatcher.pointer_down(pointer, &mut scene, &mut loader);
        assert_eq!(hit.unwrap().index, 0);
        assert_eq!(scene.subject().unwrap().material_revision(), 1);
        assert!(!scene.subject().unwrap().material().is_textured());
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut scene = Scene::cube_stage();
        scene.camera.resize_viewport(800, 600);
        let mut loader = TextureLoader::new();
        let mut dispatcher =
            PickDispatcher::new(PickPolicy::TextureCycle(cycle3()));

        // Bottom-left corner is far away from the cube
        let miss = dispatcher.pointer_down(
            PointerNdc { x: -0.9, y: -0.9 },
            &mut scene,
            &mut loader,
        );
        assert!(miss.is_none());
        assert_eq!(scene.subject().unwrap().material_revision(), 0);
        match dispatcher.policy() {
            PickPolicy::TextureCycle(cycle) => assert_eq!(cycle.cursor(), None),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_texture_cycle_advances_per_hit() {
        let mut scene = Scene::gallery_stage(3.0);
        scene.camera.resize_viewport(800, 600);
        let mut loader = TextureLoader::new();
        let mut dispatcher =
            PickDispatcher::new(PickPolicy::TextureCycle(cycle3()));

        let pointer = ndc_of(&scene, [0.0, 0.0, 0.0]);
        for k in 0..7 {
            dispatcher.pointer_down(pointer, &mut scene, &mut loader);
            match dispatcher.policy() {
                PickPolicy::TextureCycle(cycle) => assert_eq!(cycle.cursor(), Some(k % 3)),
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn test_completion_applies_texture_and_rescales() {
        let mut scene = Scene::gallery_stage(3.0);
        let mut dispatcher =
            PickDispatcher::new(PickPolicy::TextureCycle(cycle3()));

        // A landscape image, twice as wide as tall
        let outcome = LoadOutcome {
            seq: 1,
            target: 0,
            source: "a.png".into(),
            result: Ok(ImagePixels::solid(4, 2, [9, 9, 9, 255])),
        };
        dispatcher.apply_outcome(&mut scene, outcome);

        let plane = scene.subject().unwrap();
        assert!(plane.material().is_textured());
        assert_eq!(plane.material().source.as_deref(), Some("a.png"));
        assert_eq!(plane.scale.x, 3.0);
        assert_eq!(plane.scale.y, 1.5);
    }

    #[test]
    fn test_failed_completion_keeps_previous_material() {
        let mut scene = Scene::gallery_stage(3.0);
        let mut dispatcher =
            PickDispatcher::new(PickPolicy::TextureCycle(cycle3()));

        let good = LoadOutcome {
            seq: 1,
            target: 0,
            source: "a.png".into(),
            result: Ok(ImagePixels::solid(2, 2, [1, 2, 3, 255])),
        };
        dispatcher.apply_outcome(&mut scene, good);
        let revision = scene.subject().unwrap().material_revision();

        let bad = LoadOutcome {
            seq: 2,
            target: 0,
            source: "b.png".into(),
            result: Err(crate::error::VitrineError::InvalidColour {
                value: "stand-in".into(),
                reason: "decode failed",
            }),
        };
        dispatcher.apply_outcome(&mut scene, bad);

        let plane = scene.subject().unwrap();
        assert_eq!(plane.material_revision(), revision);
        assert_eq!(plane.material().source.as_deref(), Some("a.png"));
    }
}
