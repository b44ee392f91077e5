//! Scene container and stage presets.

use crate::gfx::camera::StageCamera;
use crate::gfx::geometry::GeometryKind;
use crate::gfx::picking::AABB;
use crate::gfx::resources::material::{Colour, Material};
use crate::gfx::scene::drawable::Drawable;

/// Colour of the default cube, as the stage has always shipped it.
pub const CUBE_COLOUR: &str = "#4287f5";

/// Container owning everything the renderer draws: the drawables, the
/// background colour, and the camera.
pub struct Scene {
    pub drawables: Vec<Drawable>,
    pub background: Colour,
    pub camera: StageCamera,
}

impl Scene {
    pub fn new(background: Colour) -> Self {
        Scene {
            drawables: Vec::new(),
            background,
            camera: StageCamera::default(),
        }
    }

    /// The spinning-cube preset: one pickable unit cube, nudged right of
    /// centre, on a black background.
    pub fn cube_stage() -> Self {
        let colour = Colour::from_hex(CUBE_COLOUR).unwrap_or(Colour::WHITE);
        let cube = Drawable::new(
            "cube",
            GeometryKind::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Material::solid(colour),
        )
        .with_position(1.0, 0.0, 0.0)
        .with_pickable(true);

        let mut scene = Scene::new(Colour::BLACK);
        scene.add_drawable(cube);
        scene
    }

    /// The gallery preset: one pickable unit plane scaled by `base_scale`,
    /// textured by the pick policy once the first image lands.
    pub fn gallery_stage(base_scale: f32) -> Self {
        let plane = Drawable::new(
            "gallery",
            GeometryKind::Plane {
                width: 1.0,
                height: 1.0,
            },
            Material::solid(Colour::WHITE),
        )
        .with_scale(base_scale, base_scale, 1.0)
        .with_pickable(true);

        let mut scene = Scene::new(Colour::BLACK);
        scene.add_drawable(plane);
        scene
    }

    /// Append a drawable, returning its index.
    pub fn add_drawable(&mut self, drawable: Drawable) -> usize {
        self.drawables.push(drawable);
        self.drawables.len() - 1
    }

    pub fn drawable_mut(&mut self, index: usize) -> Option<&mut Drawable> {
        self.drawables.get_mut(index)
    }

    /// The primary drawable the panel and animation drive.
    pub fn subject(&self) -> Option<&Drawable> {
        self.drawables.first()
    }

    pub fn subject_mut(&mut self) -> Option<&mut Drawable> {
        self.drawables.first_mut()
    }

    /// World-space bounds of every pickable drawable, in scene order.
    pub fn pickable_bounds(&self) -> impl Iterator<Item = (usize, AABB)> + '_ {
        self.drawables
            .iter()
            .enumerate()
            .filter(|(_, d)| d.pickable)
            .map(|(i, d)| (i, d.world_aabb()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_stage_constants() {
        let scene = Scene::cube_stage();
        assert_eq!(scene.background, Colour::BLACK);
        assert_eq!(scene.drawables.len(), 1);

        let cube = scene.subject().unwrap();
        assert_eq!(cube.position.x, 1.0);
        assert_eq!(cube.position.y, 0.0);
        assert!(cube.pickable);
        assert_eq!(cube.material().colour.to_hex(), CUBE_COLOUR);
        assert_eq!(scene.camera.eye.z, 400.0);
    }

    #[test]
    fn test_gallery_stage_scales_plane() {
        let scene = Scene::gallery_stage(3.0);
        let plane = scene.subject().unwrap();
        assert_eq!(plane.scale.x, 3.0);
        assert_eq!(plane.scale.y, 3.0);
        assert!(plane.pickable);
        assert!(!plane.material().is_textured());
    }

    #[test]
    fn test_pickable_bounds_skips_unpickable() {
        let mut scene = Scene::cube_stage();
        let backdrop = Drawable::new(
            "backdrop",
            GeometryKind::Plane {
                width: 10.0,
                height: 10.0,
            },
            Material::solid(Colour::BLACK),
        );
        scene.add_drawable(backdrop);

        let indices: Vec<usize> = scene.pickable_bounds().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0]);
    }
}
