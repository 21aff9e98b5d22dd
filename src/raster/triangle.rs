//! The edge-function triangle walker.

use nalgebra::{Vector3, Vector4};

use crate::context::Context;
use crate::framebuffer::PixelBuffer;
use crate::geometry::{interpolate_vertices, Vertex};
use crate::math::VectorExt;
use crate::shader::Fragment;

use super::RasterStats;

/// Signed edge function: twice the signed area of `(c, b, a)`.
#[inline]
fn edge(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> f64 {
    (b.x - c.x) * (a.y - c.y) - (b.y - c.y) * (a.x - c.x)
}

impl<B: PixelBuffer> Context<B> {
    /// Rasterizes one screen-space triangle.
    ///
    /// `v0..v2` are the clipped vertices with homogeneous outputs;
    /// `s0..s2` their screen-space positions with z in `[0, 1]`.
    pub(crate) fn rasterize_triangle(
        &self,
        v0: Vertex,
        v1: Vertex,
        v2: Vertex,
        s0: Vector3<f64>,
        s1: Vector3<f64>,
        s2: Vector3<f64>,
    ) -> RasterStats {
        let mut stats = RasterStats::default();

        let (width, height) = (self.width() as i64, self.height() as i64);
        let state = &self.state;

        // integer bounding box
        let min = s0.inf(&s1.inf(&s2)).floor();
        let max = s0.sup(&s1.sup(&s2)).ceil();
        let x0 = min.x as i64;
        let x1 = max.x as i64;
        let y0 = min.y as i64;
        let y1 = max.y as i64;

        // edge values at the first sample and their step deltas
        let p = Vector3::new(x0 as f64 + 0.5, y0 as f64 + 0.5, 0.0);
        let mut w00 = edge(s1, s2, p);
        let mut w01 = edge(s2, s0, p);
        let mut w02 = edge(s0, s1, p);
        let a01 = s1.y - s0.y;
        let b01 = s0.x - s1.x;
        let a12 = s2.y - s1.y;
        let b12 = s1.x - s2.x;
        let a20 = s0.y - s2.y;
        let b20 = s2.x - s0.x;

        // reciprocals, precomputed once
        let ra = 1.0 / edge(s0, s1, s2);
        let r0 = 1.0 / v0.output.w;
        let r1 = 1.0 / v1.output.w;
        let r2 = 1.0 / v2.output.w;
        let ra12 = 1.0 / a12;
        let ra20 = 1.0 / a20;
        let ra01 = 1.0 / a01;

        for y in y0..=y1 {
            // skip distance to the first pixel that can be inside
            let mut d = 0.0f64;
            let d0 = -w00 * ra12;
            let d1 = -w01 * ra20;
            let d2 = -w02 * ra01;
            if w00 < 0.0 && d0 > d {
                d = d0;
            }
            if w01 < 0.0 && d1 > d {
                d = d1;
            }
            if w02 < 0.0 && d2 > d {
                d = d2;
            }
            let mut d = d.trunc();
            if d < 0.0 {
                // occurs in pathological cases
                d = 0.0;
            }

            let mut w0 = w00 + a12 * d;
            let mut w1 = w01 + a20 * d;
            let mut w2 = w02 + a01 * d;
            let mut was_inside = false;

            for x in (x0 + d as i64)..=x1 {
                let b0 = w0 * ra;
                let b1 = w1 * ra;
                let b2 = w2 * ra;
                w0 += a12;
                w1 += a20;
                w2 += a01;

                // the span of inside pixels on a row is contiguous
                if b0 < 0.0 || b1 < 0.0 || b2 < 0.0 {
                    if was_inside {
                        break;
                    }
                    continue;
                }
                was_inside = true;

                // clipping roundoff and fat line quads can land just
                // outside the buffer
                if x < 0 || x >= width || y < 0 || y >= height {
                    continue;
                }
                let (xu, yu) = (x as usize, y as usize);
                let i = yu * width as usize + xu;

                stats.total_pixels += 1;

                let z = b0 * s0.z + b1 * s1.z + b2 * s2.z;
                let bz = z + state.depth_bias;
                // racy pre-test; re-checked under the tile lock
                if state.read_depth && bz > self.depth_slice()[i] {
                    continue;
                }

                // perspective-correct interpolation of vertex data
                let mut b = Vector4::new(b0 * r0, b1 * r1, b2 * r2, 0.0);
                b.w = 1.0 / (b.x + b.y + b.z);
                let v = interpolate_vertices(&v0, &v1, &v2, b);

                let color = match self.shader.fragment(&v) {
                    Fragment::Color(color) => color,
                    Fragment::Discard => continue,
                };

                let _tile = self.lock_pixel(xu, yu);
                let depth = self.depth_slice_mut();
                if bz <= depth[i] || !state.read_depth {
                    stats.updated_pixels += 1;
                    if state.write_depth {
                        depth[i] = z;
                    }
                    if state.write_color {
                        let buffer = self.buffer_cell_mut();
                        if state.alpha_blend && color.a < 1.0 {
                            buffer.blend(xu, yu, color);
                        } else {
                            buffer.write(xu, yu, color);
                        }
                    }
                }
            }

            w00 += b12;
            w01 += b20;
            w02 += b01;
        }

        stats
    }
}
