//! Sampling helpers.
//!
//! Everything draws from a generator handed in by the caller. Each render
//! worker owns its own generator; nothing here touches shared state.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayborn_math::Vec3;

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniformly distributed direction on the unit sphere (rejection sampling).
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-30 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Random offset inside the pixel footprint, [-0.5, 0.5]² with z = 0.
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}

/// Generator for one image row.
///
/// Mixing the row into the render seed makes every row's sample sequence
/// independent of which worker claims it.
pub fn row_rng(seed: u64, row: u32) -> StdRng {
    let mixed = seed ^ (u64::from(row) + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mixed)
}
