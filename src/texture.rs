//! Texture sampling.

use crate::color::Color;

#[cfg(feature = "image_compat")]
use std::path::Path;

#[cfg(feature = "image_compat")]
use crate::error::RenderResult;

/// A sampler over a 2D image. Both samplers wrap `u` and `v` to
/// `[0, 1)` and flip `v` to match image-origin conventions.
pub trait Texture: Send + Sync {
    /// Nearest-neighbor sample.
    fn sample(&self, u: f64, v: f64) -> Color;

    /// Four-tap bilinear sample.
    fn bilinear_sample(&self, u: f64, v: f64) -> Color;
}

/// Reference texture backed by linear [`Color`] pixels in row-major order.
#[derive(Debug, Clone)]
pub struct TextureBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl TextureBuffer {
    /// Wraps `pixels` (row-major, `width * height` entries).
    pub fn new(width: usize, height: usize, pixels: Vec<Color>) -> TextureBuffer {
        assert!(width > 0 && height > 0, "texture must have non-zero dimensions");
        assert_eq!(pixels.len(), width * height, "pixel count must match dimensions");
        TextureBuffer {
            width,
            height,
            pixels,
        }
    }

    /// Builds a texture by evaluating `f(x, y)` per texel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> TextureBuffer
    where
        F: FnMut(usize, usize) -> Color,
    {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        TextureBuffer::new(width, height, pixels)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Decodes an image file into a texture.
    #[cfg(feature = "image_compat")]
    pub fn open<P: AsRef<Path>>(path: P) -> RenderResult<TextureBuffer> {
        let image = image::open(path)?.to_rgba8();
        Ok(TextureBuffer::from_image(&image))
    }

    /// Converts a decoded RGBA image into a texture.
    #[cfg(feature = "image_compat")]
    pub fn from_image(image: &image::RgbaImage) -> TextureBuffer {
        let (width, height) = image.dimensions();
        let pixels = image
            .pixels()
            .map(|p| Color::from_nrgba(p.0))
            .collect();
        TextureBuffer::new(width as usize, height as usize, pixels)
    }

    #[inline]
    fn texel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }
}

impl Texture for TextureBuffer {
    fn sample(&self, u: f64, v: f64) -> Color {
        let v = 1.0 - v;
        let u = u - u.floor();
        let v = v - v.floor();
        let x = ((u * self.width as f64) as usize).min(self.width - 1);
        let y = ((v * self.height as f64) as usize).min(self.height - 1);
        self.texel(x, y)
    }

    fn bilinear_sample(&self, u: f64, v: f64) -> Color {
        let v = 1.0 - v;
        let u = u - u.floor();
        let v = v - v.floor();
        let x = u * self.width as f64;
        let y = v * self.height as f64;
        let x0 = (x as usize).min(self.width - 1);
        let y0 = (y as usize).min(self.height - 1);
        let x1 = (x0 + 1) % self.width;
        let y1 = (y0 + 1) % self.height;
        let fx = x - x0 as f64;
        let fy = y - y0 as f64;
        self.texel(x0, y0) * ((1.0 - fx) * (1.0 - fy))
            + self.texel(x1, y0) * (fx * (1.0 - fy))
            + self.texel(x0, y1) * ((1.0 - fx) * fy)
            + self.texel(x1, y1) * (fx * fy)
    }
}
