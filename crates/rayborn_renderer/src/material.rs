//! Material trait for surface scattering.

use std::sync::Arc;

use rand::RngCore;
use rayborn_math::{Ray, Vec3};

use crate::hittable::HitRecord;
use crate::random::random_unit_vector;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outgoing ray and the color it is filtered by.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some` if the ray scatters, or `None` if it is absorbed.
    /// Must not mutate any shared state; randomness comes from `rng`.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore)
        -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let direction = lambertian_direction(rec.normal, random_unit_vector(rng));
        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Metal (mirror) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
}

impl Metal {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, reflected),
        })
    }
}

/// Material given to objects that were described without one.
pub fn default_material() -> Arc<dyn Material> {
    Arc::new(Lambertian::new(Color::splat(0.5)))
}

// =============================================================================
// Helper functions
// =============================================================================

/// Diffuse bounce direction, falling back to the normal when the sample
/// almost cancels it out.
#[inline]
fn lambertian_direction(normal: Vec3, unit_sample: Vec3) -> Vec3 {
    let direction = normal + unit_sample;
    if near_zero(direction) {
        normal
    } else {
        direction
    }
}

#[inline]
fn near_zero(v: Vec3) -> bool {
    const S: f32 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
