//! # Stage Camera
//!
//! A fixed perspective camera looking down the negative Z axis at the
//! origin. The defaults reproduce the stage's signature framing: a 1 degree
//! field of view from 400 units out, which flattens perspective almost to
//! orthographic while keeping true 3D picking.

use cgmath::{
    perspective, Deg, EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Vector3, Vector4,
};

use crate::gfx::picking::{PointerNdc, Ray};

/// Converts OpenGL clip space (Z in -1..1) to wgpu clip space (Z in 0..1).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Perspective camera with a fixed eye and target.
#[derive(Debug, Clone)]
pub struct StageCamera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov_y: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for StageCamera {
    fn default() -> Self {
        StageCamera {
            eye: Point3::new(0.0, 0.0, 400.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            fov_y: Deg(1.0),
            aspect: 1.0,
            znear: 1.0,
            zfar: 1000.0,
        }
    }
}

impl StageCamera {
    pub fn new(aspect: f32) -> Self {
        StageCamera {
            aspect,
            ..Default::default()
        }
    }

    /// Track the viewport so projection matches the surface exactly.
    ///
    /// Zero-sized viewports are ignored; the previous aspect stays.
    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Combined view-projection matrix in wgpu clip space.
    pub fn view_projection(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = perspective(self.fov_y, self.aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }

    /// World-space ray through a pointer position.
    ///
    /// Unprojects the NDC point on two depth slices through the inverse
    /// view-projection; the ray runs from the near point toward the far one.
    pub fn ray_through(&self, pointer: PointerNdc) -> Ray {
        let inverse = self
            .view_projection()
            .invert()
            .unwrap_or_else(Matrix4::identity);

        let near_clip = Vector4::new(pointer.x, pointer.y, -1.0, 1.0);
        let far_clip = Vector4::new(pointer.x, pointer.y, 1.0, 1.0);

        let near_world = inverse * near_clip;
        let far_world = inverse * far_clip;

        let near_point = Point3::from_vec(near_world.truncate() / near_world.w);
        let far_point = Point3::from_vec(far_world.truncate() / far_world.w);

        Ray {
            origin: near_point,
            direction: (far_point - near_point).normalize(),
        }
    }
}

/// Camera data in the layout the shader expects.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        CameraUniform {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update(&mut self, camera: &StageCamera) {
        self.view_position = camera.eye.to_homogeneous().into();
        self.view_proj = camera.view_projection().into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_default_framing() {
        let camera = StageCamera::default();
        assert_eq!(camera.eye.z, 400.0);
        assert_eq!(camera.fov_y, Deg(1.0));
        assert_eq!(camera.znear, 1.0);
        assert_eq!(camera.zfar, 1000.0);
    }

    #[test]
    fn test_resize_sets_exact_aspect() {
        let mut camera = StageCamera::default();
        camera.resize_viewport(800, 600);
        assert_eq!(camera.aspect, 800.0 / 600.0);
        camera.resize_viewport(1279, 719);
        assert_eq!(camera.aspect, 1279.0 / 719.0);
        // Degenerate sizes leave the aspect alone
        camera.resize_viewport(0, 719);
        assert_eq!(camera.aspect, 1279.0 / 719.0);
    }

    #[test]
    fn test_origin_projects_to_screen_centre() {
        let camera = StageCamera::new(16.0 / 9.0);
        let clip = camera.view_projection() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(approx(clip.x / clip.w, 0.0, 1e-5));
        assert!(approx(clip.y / clip.w, 0.0, 1e-5));
    }

    #[test]
    fn test_centre_ray_points_at_target() {
        let camera = StageCamera::new(1.0);
        let ray = camera.ray_through(PointerNdc { x: 0.0, y: 0.0 });
        assert!(approx(ray.direction.x, 0.0, 1e-4));
        assert!(approx(ray.direction.y, 0.0, 1e-4));
        assert!(ray.direction.z < -0.99);
    }

    #[test]
    fn test_corner_ray_leans_toward_corner() {
        let camera = StageCamera::new(1.0);
        let ray = camera.ray_through(PointerNdc { x: 1.0, y: 1.0 });
        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.y > 0.0);
        assert!(ray.direction.z < 0.0);
    }
}
