//! Sphere primitive.

use std::sync::Arc;

use rayborn_math::{Aabb, Interval, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};
use crate::Material;

/// Smallest radius a sphere is built with.
const MIN_RADIUS: f32 = 1e-9;

pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere. Zero and negative radii are raised to a tiny
    /// positive radius.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(MIN_RADIUS);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (h + sqrtd) / a;
            if !ray_t.contains(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(root);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
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

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::ZERO, 1.0, Arc::new(Lambertian::new(Vec3::splat(0.5))))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.p - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!((rec.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_far_root_from_inside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-5);
        // Normal is flipped to face back toward the origin
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();
        let mut rec = HitRecord::default();

        // Ray passes beside the sphere
        let beside = Ray::new(Vec3::new(2.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!sphere.hit(&beside, Interval::new(0.001, f32::INFINITY), &mut rec));

        // Sphere lies beyond the interval
        let toward = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!sphere.hit(&toward, Interval::new(0.001, 3.0), &mut rec));
    }

    #[test]
    fn test_degenerate_radius_keeps_normal_finite() {
        for radius in [0.0, -1.0] {
            let sphere = Sphere::new(Vec3::ZERO, radius, Arc::new(Lambertian::new(Vec3::ONE)));
            assert!(sphere.radius > 0.0);

            // Aimed straight at the center
            let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z);
            let mut rec = HitRecord::default();

            assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
            assert!(rec.normal.is_finite());
            assert!(rec.p.is_finite());
        }
    }

    #[test]
    fn test_sphere_bounding_box() {
        let sphere = Sphere::new(
            Vec3::new(1.0, 2.0, 3.0),
            0.5,
            Arc::new(Lambertian::new(Vec3::ONE)),
        );
        assert_eq!(
            sphere.bounding_box(),
            Aabb::from_points(Vec3::new(0.5, 1.5, 2.5), Vec3::new(1.5, 2.5, 3.5))
        );
    }
}
