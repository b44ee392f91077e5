//! # Ray Picking
//!
//! Geometry for turning pointer positions into world-space ray hits:
//!
//! 1. **Pointer to NDC**: normalize client coordinates against the viewport
//! 2. **NDC to Ray**: the camera unprojects through its view-projection
//! 3. **Ray vs AABB**: slab tests against drawable bounds, nearest hit wins
//!
//! The policy applied to a hit (colour swap, texture cycle) lives in
//! [`crate::pick`]; this module is pure geometry.

use cgmath::{ElementWise, EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3, Vector4};

/// A pointer position in normalized device coordinates.
///
/// X runs -1 (left) to 1 (right), Y runs -1 (bottom) to 1 (top).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerNdc {
    pub x: f32,
    pub y: f32,
}

impl PointerNdc {
    /// Normalize client-area coordinates against the viewport size.
    ///
    /// `(0, 0)` maps to `(-1, 1)` and `(width, height)` to `(1, -1)`.
    /// Returns `None` for a degenerate viewport.
    pub fn from_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(PointerNdc {
            x: (client_x / width) * 2.0 - 1.0,
            y: -(client_y / height) * 2.0 + 1.0,
        })
    }
}

/// A 3D ray for intersection testing.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Point3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point along the ray at distance `t`.
    pub fn point_at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing.
#[derive(Debug, Clone, Copy)]
pub struct AABB {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl AABB {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// Bounding box of a set of positions.
    pub fn from_positions(positions: &[[f32; 3]]) -> Self {
        if positions.is_empty() {
            return Self::new(Point3::origin(), Point3::origin());
        }

        let mut min = Point3::from(positions[0]);
        let mut max = min;
        for p in positions.iter().skip(1) {
            min.x = min.x.min(p[0]);
            min.y = min.y.min(p[1]);
            min.z = min.z.min(p[2]);
            max.x = max.x.max(p[0]);
            max.y = max.y.max(p[1]);
            max.z = max.z.max(p[2]);
        }
        Self::new(min, max)
    }

    /// Slab-test ray intersection.
    ///
    /// Returns the distance to the entry point, or the exit point when the
    /// ray starts inside the box; `None` when the ray misses entirely or the
    /// box is behind the origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let to_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let to_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            to_min.x.min(to_max.x),
            to_min.y.min(to_max.y),
            to_min.z.min(to_max.z),
        );
        let t2 = Vector3::new(
            to_min.x.max(to_max.x),
            to_min.y.max(to_max.y),
            to_min.z.max(to_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Transform the box and re-box the result.
    ///
    /// Transforms all 8 corners and takes the bounds of the images, so
    /// rotated boxes stay conservative rather than exact.
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let corners = [
            [self.min.x, self.min.y, self.min.z],
            [self.max.x, self.min.y, self.min.z],
            [self.min.x, self.max.y, self.min.z],
            [self.min.x, self.min.y, self.max.z],
            [self.max.x, self.max.y, self.min.z],
            [self.max.x, self.min.y, self.max.z],
            [self.min.x, self.max.y, self.max.z],
            [self.max.x, self.max.y, self.max.z],
        ];

        let mut transformed = Vec::with_capacity(8);
        for corner in &corners {
            let homogeneous = Vector4::new(corner[0], corner[1], corner[2], 1.0);
            let image = matrix * homogeneous;
            transformed.push([
                image.x / image.w,
                image.y / image.w,
                image.z / image.w,
            ]);
        }

        Self::from_positions(&transformed)
    }
}

/// Result of a successful pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Index of the hit drawable in the scene.
    pub index: usize,
    /// Distance from the ray origin to the intersection.
    pub distance: f32,
}

/// Nearest intersection among a set of candidate boxes.
///
/// Candidates iterate in scene order; on equal distance the earlier one
/// wins, so results are stable.
pub fn nearest_hit(ray: &Ray, candidates: impl Iterator<Item = (usize, AABB)>) -> Option<PickHit> {
    let mut closest: Option<PickHit> = None;
    for (index, aabb) in candidates {
        if let Some(distance) = aabb.intersect_ray(ray) {
            let nearer = closest.map_or(true, |hit| distance < hit.distance);
            if nearer {
                closest = Some(PickHit { index, distance });
            }
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_corners_exact() {
        let top_left = PointerNdc::from_client(0.0, 0.0, 800.0, 600.0).unwrap();
        assert_eq!(top_left, PointerNdc { x: -1.0, y: 1.0 });

        let bottom_right = PointerNdc::from_client(800.0, 600.0, 800.0, 600.0).unwrap();
        assert_eq!(bottom_right, PointerNdc { x: 1.0, y: -1.0 });

        let centre = PointerNdc::from_client(400.0, 300.0, 800.0, 600.0).unwrap();
        assert_eq!(centre, PointerNdc { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_ndc_degenerate_viewport() {
        assert!(PointerNdc::from_client(10.0, 10.0, 0.0, 600.0).is_none());
        assert!(PointerNdc::from_client(10.0, 10.0, 800.0, 0.0).is_none());
    }

    #[test]
    fn test_aabb_from_positions() {
        let positions = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = AABB::from_positions(&positions);
        assert_eq!(aabb.min, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = AABB::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));

        // Ray hitting the box head on, entering through the near face
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        let t = aabb.intersect_ray(&ray).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert!((ray.point_at(t).z - (-1.0)).abs() < 1e-5);

        // Ray missing the box
        let miss = Ray::new(Point3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&miss).is_none());

        // Box entirely behind the origin
        let behind = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&behind).is_none());
    }

    #[test]
    fn test_ray_starting_inside_box() {
        let aabb = AABB::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        let t = aabb.intersect_ray(&ray).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_aabb_transform_translates() {
        let aabb = AABB::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let moved = aabb.transform(&Matrix4::from_translation(Vector3::new(5.0, 0.0, 0.0)));
        assert_eq!(moved.min.x, 4.0);
        assert_eq!(moved.max.x, 6.0);
        assert_eq!(moved.min.y, -1.0);
    }

    #[test]
    fn test_nearest_hit_prefers_closer_box() {
        let near = AABB::new(Point3::new(-1.0, -1.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let far = AABB::new(Point3::new(-1.0, -1.0, 5.0), Point3::new(1.0, 1.0, 6.0));
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));

        // Scene order has the far box first; distance still decides
        let hit = nearest_hit(&ray, [(0, far), (1, near)].into_iter()).unwrap();
        assert_eq!(hit.index, 1);

        let miss_ray = Ray::new(Point3::new(10.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(nearest_hit(&miss_ray, [(0, far), (1, near)].into_iter()).is_none());
    }
}
