//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over shared scene objects. Building never copies a
//! primitive: leaves hold clones of the same `Arc`s the scene list holds.

use std::sync::Arc;

use rayborn_math::{Aabb, Interval, Ray};

use crate::hittable::{HitRecord, Hittable, HittableList};

/// BVH node - either a branch with two children or a leaf with one object.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node wrapping a single object.
    Leaf {
        object: Arc<dyn Hittable>,
        bbox: Aabb,
    },
    /// Built from an empty scene; never hit.
    Empty,
}

impl BvhNode {
    /// Create a BVH from a list of shared hittable objects.
    pub fn new(objects: Vec<Arc<dyn Hittable>>) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }
        Self::build(objects)
    }

    /// Create a BVH over the objects of a scene list.
    pub fn from_list(list: &HittableList) -> Self {
        Self::new(list.objects().to_vec())
    }

    /// Recursive median split on the longest axis of the objects' union box.
    fn build(mut objects: Vec<Arc<dyn Hittable>>) -> Self {
        let bounds = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| Aabb::surrounding(&acc, &o.bounding_box()));

        if objects.len() == 1 {
            let object = objects.remove(0);
            return BvhNode::Leaf {
                bbox: object.bounding_box(),
                object,
            };
        }

        let axis = bounds.longest_axis();
        objects.sort_unstable_by(|a, b| {
            let a_val = a.bounding_box().centroid()[axis];
            let b_val = b.bounding_box().centroid()[axis];
            // Unbounded objects have NaN centroids; total_cmp keeps the order total
            a_val.total_cmp(&b_val)
        });

        let mid = objects.len() / 2;
        let right_objects = objects.split_off(mid);
        let left_objects = objects;

        let left = Self::build(left_objects);
        let right = Self::build(right_objects);

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox: bounds,
        }
    }

    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { object, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }
                object.hit(ray, ray_t, rec)
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec);

                // Only check right up to closest hit
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rec);

                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
