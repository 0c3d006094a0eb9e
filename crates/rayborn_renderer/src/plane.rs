//! Infinite plane primitive.

use std::sync::Arc;

use rayborn_math::{Aabb, Interval, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};
use crate::Material;

/// Rays closer to parallel than this never hit the plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// An infinite plane through `point` with unit `normal`.
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Arc<dyn Material>,
}

impl Plane {
    /// Create a new plane. A (near) zero normal falls back to +Y.
    pub fn new(point: Vec3, normal: Vec3, material: Arc<dyn Material>) -> Self {
        let length = normal.length();
        let normal = if length < 1e-6 {
            log::warn!("Plane at {} has a degenerate normal, using +Y", point);
            Vec3::Y
        } else {
            normal / length
        };

        Self {
            point,
            normal,
            material,
        }
    }
}

impl Hittable for Plane {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_EPSILON {
            return false;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if !ray_t.contains(t) {
            return false;
        }

        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, self.normal);
        rec.material = self.material.as_ref();

        true
    }

    /// Planes are unbounded.
    fn bounding_box(&self) -> Aabb {
        Aabb::UNIVERSE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lambertian;

    fn ground() -> Plane {
        Plane::new(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
            Arc::new(Lambertian::new(Vec3::splat(0.5))),
        )
    }

    #[test]
    fn test_plane_hit() {
        let plane = ground();
        let ray = Ray::new(Vec3::new(2.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let mut rec = HitRecord::default();

        assert!(plane.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!((rec.p - Vec3::new(2.0, -1.0, 0.0)).length() < 1e-5);
        assert_eq!(rec.normal, Vec3::Y);
        assert!(rec.front_face);
    }

    #[test]
    fn test_plane_hit_from_below() {
        let plane = ground();
        let ray = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        let mut rec = HitRecord::default();

        assert!(plane.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_plane_parallel_and_behind() {
        let plane = ground();
        let mut rec = HitRecord::default();

        let parallel = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(!plane.hit(&parallel, Interval::new(0.001, f32::INFINITY), &mut rec));

        let away = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(!plane.hit(&away, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_plane_degenerate_normal() {
        let plane = Plane::new(Vec3::ZERO, Vec3::ZERO, Arc::new(Lambertian::new(Vec3::ONE)));
        assert_eq!(plane.normal, Vec3::Y);
        assert_eq!(plane.bounding_box(), Aabb::UNIVERSE);
    }
}
