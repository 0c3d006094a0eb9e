//! Camera for ray generation.

use rand::RngCore;
use rayborn_core::CameraDescription;
use rayborn_math::{Ray, Vec3};

use crate::random::sample_square;

/// Camera for generating rays into the scene.
///
/// Public fields are configuration; everything else is derived by
/// [`Camera::initialize`], which the renderer calls before every render.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub aspect_ratio: f32,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    // Camera positioning
    pub origin: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f32, // Vertical field of view in degrees
    pub focal_length: f32,

    // Cached computed values (set by initialize())
    image_height: u32,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    samples_scale: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 1080,
            samples_per_pixel: 10,
            max_depth: 50,
            origin: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            focal_length: 1.0,
            // Cached values (initialized to defaults)
            image_height: 1,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            samples_scale: 0.1,
        }
    }

    /// Set image width and aspect ratio; the height is derived.
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f32) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, origin: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.origin = origin;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, focal_length: f32) -> Self {
        self.vfov = vfov;
        self.focal_length = focal_length;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        let aspect_ratio = if self.aspect_ratio > 0.0 {
            self.aspect_ratio
        } else {
            log::warn!("Invalid aspect ratio {}, using 16:9", self.aspect_ratio);
            16.0 / 9.0
        };
        self.image_width = self.image_width.max(1);
        self.image_height = ((self.image_width as f32 / aspect_ratio) as u32).max(1);
        self.samples_scale = 1.0 / self.samples_per_pixel.max(1) as f32;

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focal_length;
        let viewport_width =
            viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate camera basis vectors
        let w = (self.origin - self.look_at).try_normalize().unwrap_or(Vec3::Z);
        // vup parallel to the view direction: take any axis perpendicular to w
        let u = self
            .vup
            .cross(w)
            .try_normalize()
            .unwrap_or_else(|| w.any_orthonormal_vector());
        let v = w.cross(u);

        // Pixel rows count upward from the bottom of the viewport
        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_lower_left =
            self.origin - self.focal_length * w - viewport_u / 2.0 - viewport_v / 2.0;

        self.pixel00_loc = viewport_lower_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }

    /// Generate a ray through pixel (x, y), jittered within the pixel.
    ///
    /// `y` counts up from the bottom row of the image.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((x as f32) + offset.x) * self.pixel_delta_u
            + ((y as f32) + offset.y) * self.pixel_delta_v;

        Ray::new(self.origin, pixel_sample - self.origin)
    }

    /// Image height derived from width and aspect ratio.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&CameraDescription> for Camera {
    fn from(desc: &CameraDescription) -> Self {
        let origin = Vec3::from_array(desc.origin);
        let look_at = desc
            .look_at
            .map(Vec3::from_array)
            .unwrap_or(origin - Vec3::Z);

        Camera::new()
            .with_resolution(desc.image_width, desc.aspect_ratio)
            .with_quality(desc.samples_per_pixel, desc.max_depth)
            .with_position(origin, look_at, Vec3::from_array(desc.vup))
            .with_lens(desc.vfov, desc.focal_length)
    }
}
