//! The rendering context: buffers, state, and the draw operations.

use std::sync::mpsc;

use log::debug;
use nalgebra::Matrix4;
use parking_lot::MutexGuard;
use scoped_threadpool::Pool;

use crate::clip::{clip_line, clip_triangle};
use crate::color::Color;
use crate::framebuffer::{NrgbaBuffer, PixelBuffer};
use crate::geometry::{Line, Mesh, Triangle, Vertex};
use crate::math::{screen, Transform};
use crate::parallel::{TileLocks, TrustedCell};
use crate::raster::RasterStats;
use crate::shader::{Shader, SolidColorShader};

/// Winding order that counts as front-facing, as seen before the
/// viewport transform (NDC; the screen matrix flips y).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceWinding {
    Clockwise,
    CounterClockwise,
}

/// Which faces to reject before rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    None,
    Front,
    Back,
}

/// Value-typed render options consulted by the draw operations.
///
/// Mutating the state between draws is fine; mutating it while a draw is
/// in flight is not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// Skip fragments whose biased depth is behind the stored depth.
    pub read_depth: bool,
    /// Store the unbiased depth of passing fragments.
    pub write_depth: bool,
    /// Write passing fragments to the color buffer.
    pub write_color: bool,
    /// Source-over blend fragments whose alpha is below 1.
    pub alpha_blend: bool,
    /// Draw triangles as three thick edges instead of filled.
    pub wireframe: bool,
    pub front_face: FaceWinding,
    pub cull: CullMode,
    /// Pixel width of lines and wireframe edges.
    pub line_width: f64,
    /// Bias added to a fragment's depth for the read comparison only.
    pub depth_bias: f64,
    /// Color used by [`Context::clear_color_buffer`].
    pub clear_color: Color,
    /// Depth used by [`Context::clear_depth_buffer`].
    pub clear_depth: f64,
}

impl Default for RenderState {
    fn default() -> RenderState {
        RenderState {
            read_depth: true,
            write_depth: true,
            write_color: true,
            alpha_blend: true,
            wireframe: false,
            front_face: FaceWinding::CounterClockwise,
            cull: CullMode::Back,
            line_width: 2.0,
            depth_bias: 0.0,
            clear_color: Color::TRANSPARENT,
            clear_depth: f64::INFINITY,
        }
    }
}

/// A rendering context over a pixel buffer.
///
/// Owns the color buffer, the depth buffer, the bound shader and the
/// render state. Draw calls take `&self`: fragment commits are
/// serialized through a fixed pool of tile locks, which is what lets a
/// single draw call fan its primitives across worker threads.
pub struct Context<B: PixelBuffer = NrgbaBuffer> {
    width: usize,
    height: usize,
    color: TrustedCell<B>,
    depth: TrustedCell<Vec<f64>>,
    /// The bound shader. A solid magenta shader is installed at
    /// construction so the context always has one.
    pub shader: Box<dyn Shader>,
    pub state: RenderState,
    /// Worker threads per batched draw call. Defaults to the available
    /// parallelism; set to 1 for strictly sequential submission.
    pub workers: usize,
    screen_matrix: Matrix4<f64>,
    locks: TileLocks,
}

impl Context<NrgbaBuffer> {
    /// A context over a fresh NRGBA buffer of the given size.
    pub fn new(width: usize, height: usize) -> Context<NrgbaBuffer> {
        Context::with_buffer(NrgbaBuffer::new(width, height))
    }
}

impl<B: PixelBuffer> Context<B> {
    /// A context drawing into `buffer`. The depth buffer starts cleared
    /// to `+inf`.
    pub fn with_buffer(buffer: B) -> Context<B> {
        let (width, height) = buffer.dimensions();
        assert!(width > 0, "pixel buffer must have a non-zero width");
        assert!(height > 0, "pixel buffer must have a non-zero height");

        Context {
            width,
            height,
            color: TrustedCell::new(buffer),
            depth: TrustedCell::new(vec![f64::INFINITY; width * height]),
            shader: Box::new(SolidColorShader::new(
                Matrix4::identity(),
                Color::new(1.0, 0.0, 1.0, 1.0),
            )),
            state: RenderState::default(),
            workers: num_cpus::get(),
            screen_matrix: screen(width, height),
            locks: TileLocks::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Replaces the bound shader.
    pub fn bind_shader<S: Shader + 'static>(&mut self, shader: S) {
        self.shader = Box::new(shader);
    }

    pub fn buffer(&self) -> &B {
        self.color.as_ref()
    }

    pub fn buffer_mut(&mut self) -> &mut B {
        self.color.get_mut()
    }

    pub fn into_buffer(self) -> B {
        self.color.into_inner()
    }

    /// The depth buffer, row-major.
    pub fn depth_buffer(&self) -> &[f64] {
        self.depth.as_ref()
    }

    pub fn clear_color_buffer_with(&mut self, color: Color) {
        self.color.get_mut().clear(color);
    }

    /// Clears the color buffer with the state's `clear_color`.
    pub fn clear_color_buffer(&mut self) {
        self.clear_color_buffer_with(self.state.clear_color);
    }

    pub fn clear_depth_buffer_with(&mut self, value: f64) {
        for d in self.depth.get_mut() {
            *d = value;
        }
    }

    /// Clears the depth buffer with the state's `clear_depth`.
    pub fn clear_depth_buffer(&mut self) {
        self.clear_depth_buffer_with(self.state.clear_depth);
    }

    // raw accessors for the rasterizer; commits go through lock_pixel

    #[inline]
    pub(crate) fn depth_slice(&self) -> &[f64] {
        self.depth.as_ref()
    }

    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub(crate) fn depth_slice_mut(&self) -> &mut [f64] {
        self.depth.as_mut()
    }

    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub(crate) fn buffer_cell_mut(&self) -> &mut B {
        self.color.as_mut()
    }

    #[inline]
    pub(crate) fn lock_pixel(&self, x: usize, y: usize) -> MutexGuard<'_, ()> {
        self.locks.lock(x, y)
    }

    /// Runs one triangle through the vertex stage, clips it when any
    /// output leaves the view volume, and rasterizes the result.
    pub fn draw_triangle(&self, triangle: &Triangle) -> RasterStats {
        let v1 = self.shader.vertex(triangle.v1);
        let v2 = self.shader.vertex(triangle.v2);
        let v3 = self.shader.vertex(triangle.v3);

        // w of zero marks geometry collapsed by the transform
        if v1.output.w == 0.0 || v2.output.w == 0.0 || v3.output.w == 0.0 {
            return RasterStats::default();
        }

        if v1.outside() || v2.outside() || v3.outside() {
            clip_triangle(&Triangle::new(v1, v2, v3))
                .iter()
                .map(|t| self.draw_clipped_triangle(t.v1, t.v2, t.v3))
                .sum()
        } else {
            self.draw_clipped_triangle(v1, v2, v3)
        }
    }

    /// Runs one line through the vertex stage, clips it, and rasterizes
    /// it as a thick quad.
    pub fn draw_line(&self, line: &Line) -> RasterStats {
        let v1 = self.shader.vertex(line.v1);
        let v2 = self.shader.vertex(line.v2);

        if v1.output.w == 0.0 || v2.output.w == 0.0 {
            return RasterStats::default();
        }

        if v1.outside() || v2.outside() {
            match clip_line(&Line::new(v1, v2)) {
                Some(line) => self.draw_clipped_line(line.v1, line.v2),
                None => RasterStats::default(),
            }
        } else {
            self.draw_clipped_line(v1, v2)
        }
    }

    /// Draws a batch of triangles across the worker pool.
    pub fn draw_triangles(&self, triangles: &[Triangle]) -> RasterStats {
        debug!(
            "drawing {} triangles across {} workers",
            triangles.len(),
            self.workers.max(1)
        );
        self.draw_batch(triangles, Self::draw_triangle)
    }

    /// Draws a batch of lines across the worker pool.
    pub fn draw_lines(&self, lines: &[Line]) -> RasterStats {
        debug!(
            "drawing {} lines across {} workers",
            lines.len(),
            self.workers.max(1)
        );
        self.draw_batch(lines, Self::draw_line)
    }

    /// Draws all triangles, then all lines, of a mesh.
    pub fn draw_mesh(&self, mesh: &Mesh) -> RasterStats {
        self.draw_triangles(&mesh.triangles) + self.draw_lines(&mesh.lines)
    }

    /// Modulo-N partition over a scoped pool; each worker accumulates its
    /// own counters and posts them to a channel for the summed reduction.
    fn draw_batch<T: Sync>(&self, items: &[T], draw: fn(&Self, &T) -> RasterStats) -> RasterStats {
        let workers = self.workers.max(1);
        if workers == 1 || items.len() <= 1 {
            return items.iter().map(|item| draw(self, item)).sum();
        }

        let mut pool = Pool::new(workers as u32);
        let (tx, rx) = mpsc::channel();
        pool.scoped(|scope| {
            for wi in 0..workers {
                let tx = tx.clone();
                scope.execute(move || {
                    let mut stats = RasterStats::default();
                    for (i, item) in items.iter().enumerate() {
                        if i % workers == wi {
                            stats += draw(self, item);
                        }
                    }
                    let _ = tx.send(stats);
                });
            }
            drop(tx);
        });
        rx.iter().sum()
    }

    fn draw_clipped_triangle(&self, mut v0: Vertex, mut v1: Vertex, mut v2: Vertex) -> RasterStats {
        // normalized device coordinates
        let mut ndc0 = (v0.output / v0.output.w).xyz();
        let mut ndc1 = (v1.output / v1.output.w).xyz();
        let mut ndc2 = (v2.output / v2.output.w).xyz();

        // back-face culling: reorder to the canonical winding, then test
        // the signed area against the state
        let mut a = (ndc1.x - ndc0.x) * (ndc2.y - ndc0.y) - (ndc2.x - ndc0.x) * (ndc1.y - ndc0.y);
        if a < 0.0 {
            std::mem::swap(&mut v0, &mut v2);
            std::mem::swap(&mut ndc0, &mut ndc2);
        }
        if self.state.cull == CullMode::Front {
            a = -a;
        }
        if self.state.front_face == FaceWinding::Clockwise {
            a = -a;
        }
        if self.state.cull != CullMode::None && a <= 0.0 {
            return RasterStats::default();
        }

        // screen coordinates
        let s0 = self.screen_matrix.mul_position(ndc0);
        let s1 = self.screen_matrix.mul_position(ndc1);
        let s2 = self.screen_matrix.mul_position(ndc2);

        if self.state.wireframe {
            self.rasterize_wireframe(v0, v1, v2, s0, s1, s2)
        } else {
            self.rasterize_triangle(v0, v1, v2, s0, s1, s2)
        }
    }

    fn draw_clipped_line(&self, v0: Vertex, v1: Vertex) -> RasterStats {
        let ndc0 = (v0.output / v0.output.w).xyz();
        let ndc1 = (v1.output / v1.output.w).xyz();

        let s0 = self.screen_matrix.mul_position(ndc0);
        let s1 = self.screen_matrix.mul_position(ndc1);

        self.rasterize_line(v0, v1, s0, s1)
    }

    /// A normalized grayscale rendering of the depth buffer: the nearest
    /// finite depth maps to black, the farthest to white, `+inf` to white.
    pub fn depth_image(&self) -> NrgbaBuffer {
        let depth = self.depth.as_ref();
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &d in depth.iter() {
            if d.is_finite() {
                lo = lo.min(d);
                hi = hi.max(d);
            }
        }

        let mut image = NrgbaBuffer::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let d = depth[y * self.width + x];
                let t = if !d.is_finite() {
                    1.0
                } else if hi > lo {
                    (d - lo) / (hi - lo)
                } else {
                    0.0
                };
                image.write(x, y, Color::gray(t));
            }
        }
        image
    }
}
