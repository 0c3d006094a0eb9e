//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use std::sync::Arc;

use rayborn_math::{Aabb, Interval, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};
use crate::Material;

/// Determinants smaller than this mean the ray runs along the triangle.
const DETERMINANT_EPSILON: f32 = 1e-8;

pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Triangle {
    /// Create a new triangle. The face normal follows the winding
    /// `(v1 - v0) x (v2 - v0)`.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<dyn Material>) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();

        // Flat axes get padded so the slab test still sees the triangle
        let bbox = Aabb::from_point_cloud(&[v0, v1, v2]);

        Self {
            v0,
            v1,
            v2,
            normal,
            material,
            bbox,
        }
    }
}

impl Hittable for Triangle {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle (or the triangle is degenerate)
        if a.abs() < DETERMINANT_EPSILON {
            return false;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        let t = f * edge2.dot(q);
        if !ray_t.contains(t) {
            return false;
        }

        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, self.normal);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lambertian;

    /// Triangle in the z = -1 plane, facing +Z.
    fn triangle() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            Arc::new(Lambertian::new(Vec3::splat(0.5))),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert_eq!(rec.normal, Vec3::Z);
        assert!(rec.front_face);
    }

    #[test]
    fn test_triangle_outside_barycentric_bounds() {
        let tri = triangle();
        let mut rec = HitRecord::default();

        // Hits the supporting plane z = -1, but left of the triangle
        let beside = Ray::new(Vec3::new(-3.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!tri.hit(&beside, Interval::new(0.001, f32::INFINITY), &mut rec));

        // Above the apex
        let above = Ray::new(Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!tri.hit(&above, Interval::new(0.001, f32::INFINITY), &mut rec));

        // Beyond the u + v <= 1 edge
        let past_edge = Ray::new(Vec3::new(0.8, 0.5, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!tri.hit(&past_edge, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_triangle_parallel_and_behind() {
        let tri = triangle();
        let mut rec = HitRecord::default();

        let parallel = Ray::new(Vec3::new(-2.0, 0.0, -1.0), Vec3::X);
        assert!(!tri.hit(&parallel, Interval::new(0.001, f32::INFINITY), &mut rec));

        let away = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(!tri.hit(&away, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_triangle_back_face() {
        let tri = triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_Z);
    }

    #[test]
    fn test_triangle_bbox_is_padded() {
        let tri = triangle();
        let bbox = tri.bounding_box();

        assert!(bbox.z.size() > 0.0);
        assert!(bbox.z.contains(-1.0));
        assert_eq!(bbox.x, Interval::new(-1.0, 1.0));
    }
}
