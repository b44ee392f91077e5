//! A single visual object in the scene.

use cgmath::{Matrix4, Rad, Vector3};

use crate::gfx::geometry::{GeometryData, GeometryKind};
use crate::gfx::picking::AABB;
use crate::gfx::rendering::DrawableGpu;
use crate::gfx::resources::material::Material;

/// One object the stage can draw and pick.
///
/// Transform fields are free to mutate from the panel or pick policies; the
/// material goes through [`Drawable::set_material`] so the renderer notices
/// the change and re-uploads.
pub struct Drawable {
    pub name: String,
    pub kind: GeometryKind,
    pub geometry: GeometryData,
    pub position: Vector3<f32>,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    /// Whether pick rays may hit this object.
    pub pickable: bool,
    material: Material,
    material_revision: u64,
    base_aabb: AABB,
    /// Lazily created by the renderer on first sync.
    pub(crate) gpu: Option<DrawableGpu>,
}

impl Drawable {
    pub fn new(name: impl Into<String>, kind: GeometryKind, material: Material) -> Self {
        let geometry = kind.generate();
        let base_aabb = AABB::from_positions(&geometry.positions);
        Drawable {
            name: name.into(),
            kind,
            geometry,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            pickable: false,
            material,
            material_revision: 0,
            base_aabb,
            gpu: None,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    pub fn with_pickable(mut self, pickable: bool) -> Self {
        self.pickable = pickable;
        self
    }

    /// Object-to-world transform: translation, then X/Y/Z rotation, then
    /// scale applied closest to the vertices.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Bounds in world space under the current transform.
    pub fn world_aabb(&self) -> AABB {
        self.base_aabb.transform(&self.model_matrix())
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Replace the material and mark it for GPU re-upload.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.material_revision += 1;
    }

    /// Bumped on every material change; the renderer compares this against
    /// the revision it last uploaded.
    pub fn material_revision(&self) -> u64 {
        self.material_revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::resources::material::Colour;

    fn unit_cube() -> Drawable {
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
    fn test_world_aabb_follows_position() {
        let cube = unit_cube().with_position(3.0, 0.0, 0.0);
        let aabb = cube.world_aabb();
        assert!((aabb.min.x - 2.5).abs() < 1e-5);
        assert!((aabb.max.x - 3.5).abs() < 1e-5);
    }

    #[test]
    fn test_world_aabb_follows_scale() {
        let cube = unit_cube().with_scale(2.0, 4.0, 1.0);
        let aabb = cube.world_aabb();
        assert!((aabb.max.x - 1.0).abs() < 1e-5);
        assert!((aabb.max.y - 2.0).abs() < 1e-5);
        assert!((aabb.max.z - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_rotated_aabb_stays_conservative() {
        let mut cube = unit_cube();
        cube.rotation.y = std::f32::consts::FRAC_PI_4;
        let aabb = cube.world_aabb();
        // A 45 degree yaw widens X and Z bounds to sqrt(2)/2 each side
        let expected = (2.0f32).sqrt() / 2.0;
        assert!((aabb.max.x - expected).abs() < 1e-4);
        assert!((aabb.max.z - expected).abs() < 1e-4);
        assert!((aabb.max.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_material_revision_bumps_on_set() {
        let mut cube = unit_cube();
        assert_eq!(cube.material_revision(), 0);
        cube.set_material(Material::solid(Colour::BLACK));
        assert_eq!(cube.material_revision(), 1);
        cube.set_material(Material::solid(Colour::WHITE));
        assert_eq!(cube.material_revision(), 2);
    }
}
