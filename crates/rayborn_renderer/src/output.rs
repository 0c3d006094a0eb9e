//! Render target and PNG export.
//!
//! Pixels are stored as linear colors, row-major, top row first. Conversion
//! to 8-bit happens only on export: gamma 2, clamp to [0, 0.999], scale by 256.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use rayborn_math::Interval;
use thiserror::Error;

use crate::Color;

/// Errors from accessing or exporting an image.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Encode error: {0}")]
    Encode(#[from] image::ImageError),
}

/// Width x height grid of linear colors.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, ImageError> {
        if x >= self.width || y >= self.height {
            return Err(ImageError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Result<Color, ImageError> {
        let index = self.index(x, y)?;
        Ok(self.pixels[index])
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) -> Result<(), ImageError> {
        let index = self.index(x, y)?;
        self.pixels[index] = color;
        Ok(())
    }

    /// Mutable view of one row, top row first.
    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [Color] {
        let width = self.width as usize;
        let start = y as usize * width;
        &mut self.pixels[start..start + width]
    }

    /// Encode the buffer as an 8-bit RGBA PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageError> {
        let path = path.as_ref();
        let rgba = RgbaImage::from_fn(self.width, self.height, |x, y| {
            let index = y as usize * self.width as usize + x as usize;
            Rgba(color_to_rgba(self.pixels[index]))
        });

        rgba.save_with_format(path, ImageFormat::Png)?;
        log::info!("Image saved as {}", path.display());
        Ok(())
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGBA with full alpha.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let intensity = Interval::new(0.0, 0.999);
    let quantize = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z), 255]
}
