//! Axis-aligned cube built from twelve triangles.

use std::sync::Arc;

use rayborn_math::{Aabb, Interval, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::{Material, Triangle};

/// Two triangles per face, wound counter-clockwise seen from outside.
const FACES: [[usize; 3]; 12] = [
    // back (-Z)
    [0, 2, 1],
    [0, 3, 2],
    // front (+Z)
    [4, 5, 6],
    [4, 6, 7],
    // left (-X)
    [0, 4, 7],
    [0, 7, 3],
    // right (+X)
    [1, 2, 6],
    [1, 6, 5],
    // bottom (-Y)
    [0, 1, 5],
    [0, 5, 4],
    // top (+Y)
    [3, 7, 6],
    [3, 6, 2],
];

/// A cube of edge length `size` centered at `center`.
pub struct Cube {
    faces: HittableList,
    bbox: Aabb,
}

impl Cube {
    pub fn new(center: Vec3, size: f32, material: Arc<dyn Material>) -> Self {
        let half = size.abs() * 0.5;
        let corners = [
            center + Vec3::new(-half, -half, -half),
            center + Vec3::new(half, -half, -half),
            center + Vec3::new(half, half, -half),
            center + Vec3::new(-half, half, -half),
            center + Vec3::new(-half, -half, half),
            center + Vec3::new(half, -half, half),
            center + Vec3::new(half, half, half),
            center + Vec3::new(-half, half, half),
        ];

        let mut faces = HittableList::new();
        for [a, b, c] in FACES {
            faces.push(Triangle::new(
                corners[a],
                corners[b],
                corners[c],
                Arc::clone(&material),
            ));
        }

        Self {
            faces,
            bbox: Aabb::from_points(center - Vec3::splat(half), center + Vec3::splat(half)),
        }
    }
}

impl Hittable for Cube {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.faces.hit(ray, ray_t, rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
