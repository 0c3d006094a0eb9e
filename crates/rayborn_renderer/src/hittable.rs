//! Hittable trait and HitRecord for ray-object intersection.

use std::sync::Arc;

use rand::RngCore;
use rayborn_math::{Aabb, Interval, Ray, Vec3};

use crate::{Material, ScatterResult};

/// Placeholder material for `HitRecord::default()`.
/// Always absorbs light (returns None from scatter).
struct Absorber;

impl Material for Absorber {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }
}

static ABSORBER: Absorber = Absorber;

/// Record of a ray-object intersection.
///
/// Callers own the record and pass it down as scratch space; a hittable only
/// writes to it when it reports a hit.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the side the outward normal points toward
    pub front_face: bool,
    /// Material at the intersection point
    pub material: &'a dyn Material,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            t: 0.0,
            front_face: false,
            material: &ABSORBER,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// Set the face normal based on ray direction and outward normal.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given interval.
    ///
    /// Returns true on the nearest hit inside `ray_t` and fills in `rec`;
    /// leaves `rec` untouched otherwise.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

/// An ordered list of shared hittable objects, tested linearly.
///
/// This is also the scene ("world"): the BVH is built over clones of the
/// same `Arc`s, so both views share the primitives.
#[derive(Clone)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add a shared object to the list.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Add an owned object to the list.
    pub fn push<H: Hittable + 'static>(&mut self, object: H) {
        self.add(Arc::new(object));
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if object.hit(ray, Interval::new(ray_t.min, closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};

    fn sphere(z: f32) -> Sphere {
        Sphere::new(
            Vec3::new(0.0, 0.0, z),
            0.5,
            Arc::new(Lambertian::new(Vec3::splat(0.5))),
        )
    }

    #[test]
    fn test_set_face_normal() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        rec.set_face_normal(&ray, Vec3::Z);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);

        // Hitting from behind flips the stored normal
        rec.set_face_normal(&ray, Vec3::NEG_Z);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_list_returns_nearest() {
        let mut world = HittableList::new();
        world.push(sphere(-5.0));
        world.push(sphere(-2.0));
        world.push(sphere(-8.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(world.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_list_bbox_and_empty() {
        let mut world = HittableList::new();
        assert!(world.is_empty());
        assert_eq!(world.bounding_box(), Aabb::EMPTY);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        assert!(!world.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));

        world.push(sphere(-2.0));
        world.push(sphere(-8.0));
        assert_eq!(world.len(), 2);
        assert!((world.bounding_box().z.min - (-8.5)).abs() < 1e-5);
        assert!((world.bounding_box().z.max - (-1.5)).abs() < 1e-5);

        world.clear();
        assert!(world.is_empty());
    }
}
