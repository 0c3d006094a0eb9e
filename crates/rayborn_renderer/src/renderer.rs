//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Anti-aliasing via multi-sampling
//! - Row-parallel rendering on a fixed worker pool
//!
//! Every image row draws its samples from a generator seeded by
//! `(seed, row)`, so a seeded render produces the same image whether it runs
//! serially or on any number of workers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::RngCore;
use rayborn_math::{Interval, Ray};

use crate::output::ImageBuffer;
use crate::random::row_rng;
use crate::{Camera, Color, HitRecord, Hittable};

/// Worker count used when the hardware concurrency is unknown.
const FALLBACK_THREADS: usize = 4;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Render rows on a worker pool instead of the calling thread
    pub use_parallel: bool,
    /// Worker count; `None` uses the hardware concurrency
    pub threads: Option<usize>,
    /// Sampling seed; `None` draws a fresh one per render
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            use_parallel: true,
            threads: None,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Number of workers a parallel render will use.
    pub fn worker_count(&self) -> usize {
        self.threads.filter(|&n| n > 0).unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(FALLBACK_THREADS)
        })
    }
}

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, bouncing off surfaces and multiplying
/// in each surface's attenuation until the ray escapes or `depth` runs out.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(0.001, f32::INFINITY), &mut rec) {
        return background_color(ray);
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Vertical gradient seen by rays that escape the scene.
pub fn background_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    let bottom = Color::new(0.2, 0.2, 0.5);
    let top = Color::new(0.3, 0.3, 0.5);
    bottom * (1.0 - a) + top * a
}

/// Render a single pixel with multi-sampling.
///
/// `y` counts up from the bottom row. The camera must be initialized.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel.max(1) {
        // Camera.get_ray already adds random offset for anti-aliasing
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth, rng);
    }

    // Average the samples
    pixel_color * camera.samples_scale()
}

/// Render one row of pixels, `y` counting up from the bottom.
fn render_row(camera: &Camera, world: &dyn Hittable, y: u32, seed: u64) -> Vec<Color> {
    let mut rng = row_rng(seed, y);
    (0..camera.image_width)
        .map(|x| render_pixel(camera, world, x, y, &mut rng))
        .collect()
}

/// Render the entire scene to an image buffer.
///
/// Re-initializes the camera first, so configuration changes made since the
/// last render take effect.
pub fn render(camera: &mut Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    camera.initialize();
    let camera = &*camera;

    let width = camera.image_width;
    let height = camera.image_height();
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut image = ImageBuffer::new(width, height);

    log::info!(
        "Rendering {}x{} at {} spp, max depth {}",
        width,
        height,
        camera.samples_per_pixel,
        camera.max_depth
    );
    let start = Instant::now();

    let threads = if config.use_parallel {
        render_parallel(camera, world, seed, config.worker_count(), &mut image)
    } else {
        None
    };

    let threads = match threads {
        Some(threads) => threads,
        None => {
            render_serial(camera, world, seed, &mut image);
            1
        }
    };

    log::info!(
        "Rendered in {:.2?} on {} thread{}",
        start.elapsed(),
        threads,
        if threads == 1 { "" } else { "s" }
    );

    image
}

fn render_serial(camera: &Camera, world: &dyn Hittable, seed: u64, image: &mut ImageBuffer) {
    let height = image.height;
    for y in 0..height {
        let row = render_row(camera, world, y, seed);
        image.row_mut(height - 1 - y).copy_from_slice(&row);
    }
}

/// Render on a pool of `threads` workers. Each worker claims rows from a
/// shared counter until none are left.
///
/// Returns the number of workers used, or `None` if the pool could not be
/// built.
fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    seed: u64,
    threads: usize,
    image: &mut ImageBuffer,
) -> Option<usize> {
    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("rayborn-worker-{}", i))
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            log::warn!("Failed to start {} render threads, rendering serially: {}", threads, e);
            return None;
        }
    };

    let height = image.height;
    let next_row = AtomicUsize::new(0);

    let finished: Vec<Vec<(u32, Vec<Color>)>> = pool.broadcast(|_| {
        let mut rows = Vec::new();
        loop {
            let y = next_row.fetch_add(1, Ordering::Relaxed);
            if y >= height as usize {
                break;
            }
            let y = y as u32;
            rows.push((y, render_row(camera, world, y, seed)));
        }
        rows
    });

    for (y, row) in finished.into_iter().flatten() {
        image.row_mut(height - 1 - y).copy_from_slice(&row);
    }

    Some(pool.current_num_threads())
}
