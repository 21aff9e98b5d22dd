//! Interleaved 8-bit NRGBA pixel storage.

use crate::color::Color;

#[cfg(feature = "image_compat")]
use std::path::Path;

#[cfg(feature = "image_compat")]
use crate::error::RenderResult;

use super::PixelBuffer;

/// The reference color buffer: non-premultiplied RGBA, 8 bits per
/// channel, row-major with a stride of `4 * width`.
#[derive(Debug, Clone)]
pub struct NrgbaBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl NrgbaBuffer {
    pub fn new(width: usize, height: usize) -> NrgbaBuffer {
        NrgbaBuffer {
            width,
            height,
            data: vec![0; 4 * width * height],
        }
    }

    /// Raw interleaved bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// The NRGBA bytes of one pixel.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// The color of one pixel, dequantized.
    pub fn pixel_color(&self, x: usize, y: usize) -> Color {
        Color::from_nrgba(self.pixel(x, y))
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        4 * (y * self.width + x)
    }

    /// Copies the buffer into a decoded RGBA image.
    #[cfg(feature = "image_compat")]
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
            .expect("buffer length always matches dimensions")
    }

    /// Encodes the buffer as a PNG file.
    #[cfg(feature = "image_compat")]
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

impl PixelBuffer for NrgbaBuffer {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        let c = color.to_nrgba();
        for pixel in self.data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&c);
        }
    }

    #[inline]
    fn write(&mut self, x: usize, y: usize, color: Color) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&color.to_nrgba());
    }

    fn blend(&mut self, x: usize, y: usize, color: Color) {
        // integer source-over with 16-bit intermediates; the source is
        // premultiplied on the fly, the destination stays non-premultiplied
        let [r, g, b, a] = color.to_nrgba();
        let sa = a as u32 * 0x101;
        let premultiply = |c: u8| (c as u32 * 0x101) * a as u32 / 0xff;
        let src = [premultiply(r), premultiply(g), premultiply(b), sa];
        let na = (0xffff - sa) * 0x101;
        let i = self.offset(x, y);
        for (dst, s) in self.data[i..i + 4].iter_mut().zip(src) {
            *dst = ((*dst as u32 * na / 0xffff + s) >> 8) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_fills_every_pixel() {
        let mut b = NrgbaBuffer::new(3, 2);
        b.clear(Color::new(1.0, 0.0, 0.0, 1.0));
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(b.pixel(x, y), [255, 0, 0, 255]);
            }
        }
    }

    #[test]
    fn write_is_isolated() {
        let mut b = NrgbaBuffer::new(2, 2);
        b.write(1, 0, Color::WHITE);
        assert_eq!(b.pixel(1, 0), [255, 255, 255, 255]);
        assert_eq!(b.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(b.pixel(1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn blend_half_black_over_white_is_mid_gray() {
        let mut b = NrgbaBuffer::new(1, 1);
        b.clear(Color::WHITE);
        b.blend(0, 0, Color::new(0.0, 0.0, 0.0, 0.5));
        let [r, g, bl, a] = b.pixel(0, 0);
        assert!((r as i32 - 128).abs() <= 1, "r = {}", r);
        assert!((g as i32 - 128).abs() <= 1);
        assert!((bl as i32 - 128).abs() <= 1);
        assert_eq!(a, 255);
    }

    #[test]
    fn blend_opaque_replaces() {
        let mut b = NrgbaBuffer::new(1, 1);
        b.clear(Color::new(0.0, 1.0, 0.0, 1.0));
        b.blend(0, 0, Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(b.pixel(0, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn blend_transparent_is_a_no_op() {
        let mut b = NrgbaBuffer::new(1, 1);
        b.clear(Color::new(0.2, 0.4, 0.6, 1.0));
        let before = b.pixel(0, 0);
        b.blend(0, 0, Color::new(1.0, 1.0, 1.0, 0.0));
        assert_eq!(b.pixel(0, 0), before);
    }
}
