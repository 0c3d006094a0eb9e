//! Rayborn Renderer - CPU ray tracing.
//!
//! A Monte Carlo ray tracer over a BVH-accelerated scene of spheres, planes,
//! triangles and cubes with Lambertian and metal surfaces.

mod bvh;
mod camera;
mod cube;
mod hittable;
mod material;
mod output;
mod plane;
mod random;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use bvh::BvhNode;
pub use camera::Camera;
pub use cube::Cube;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{default_material, Color, Lambertian, Material, Metal, ScatterResult};
pub use output::{color_to_rgba, linear_to_gamma, ImageBuffer, ImageError};
pub use plane::Plane;
pub use renderer::{background_color, ray_color, render, render_pixel, RenderConfig};
pub use scene::{build_world, load_world};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math types used throughout the public API
pub use rayborn_math::{Aabb, Interval, Ray, Vec3};
