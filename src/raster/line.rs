//! Thick lines and wireframe edges as rasterized quads.

use nalgebra::Vector3;

use crate::context::Context;
use crate::framebuffer::PixelBuffer;
use crate::geometry::Vertex;
use crate::math::VectorExt;

use super::RasterStats;

impl<B: PixelBuffer> Context<B> {
    /// Expands the screen-space segment `s0..s1` into a square-capped quad
    /// of the configured line width and rasterizes it as two triangles.
    pub(crate) fn rasterize_line(
        &self,
        v0: Vertex,
        v1: Vertex,
        s0: Vector3<f64>,
        s1: Vector3<f64>,
    ) -> RasterStats {
        let half = self.state.line_width / 2.0;
        let n = (s1 - s0).perpendicular() * half;
        let s0 = s0 + (s0 - s1).normalize() * half;
        let s1 = s1 + (s1 - s0).normalize() * half;
        let s00 = s0 + n;
        let s01 = s0 - n;
        let s10 = s1 + n;
        let s11 = s1 - n;
        let stats1 = self.rasterize_triangle(v1, v0, v0, s11, s01, s00);
        let stats2 = self.rasterize_triangle(v1, v1, v0, s10, s11, s00);
        stats1 + stats2
    }

    /// Draws the three edges of a triangle as thick lines.
    pub(crate) fn rasterize_wireframe(
        &self,
        v0: Vertex,
        v1: Vertex,
        v2: Vertex,
        s0: Vector3<f64>,
        s1: Vector3<f64>,
        s2: Vector3<f64>,
    ) -> RasterStats {
        let stats1 = self.rasterize_line(v0, v1, s0, s1);
        let stats2 = self.rasterize_line(v1, v2, s1, s2);
        let stats3 = self.rasterize_line(v2, v0, s2, s0);
        stats1 + stats2 + stats3
    }
}
