//! Pipeline vertices and barycentric attribute interpolation.

use nalgebra::{Vector3, Vector4};

use crate::color::Color;
use crate::math::HomogeneousExt;

/// A single vertex, before and after the vertex shader stage.
///
/// `output` is the homogeneous clip-space position produced by the vertex
/// shader; the remaining slots are interpolated across the triangle and
/// handed to the fragment shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Object-space position.
    pub position: Vector3<f64>,
    /// Surface normal. A zero normal is replaced with the face normal
    /// when a triangle is constructed.
    pub normal: Vector3<f64>,
    /// Texture coordinate; only x and y are used.
    pub texcoord: Vector3<f64>,
    /// Per-vertex color.
    pub color: Color,
    /// Post-vertex-shader homogeneous position.
    pub output: Vector4<f64>,
}

impl Vertex {
    /// A vertex at `position` with all other slots zeroed.
    pub fn new(position: Vector3<f64>) -> Vertex {
        Vertex {
            position,
            ..Vertex::default()
        }
    }

    /// True when the shaded position lies outside the clip volume.
    #[inline]
    pub fn outside(&self) -> bool {
        self.output.outside()
    }
}

impl Default for Vertex {
    fn default() -> Vertex {
        Vertex {
            position: Vector3::zeros(),
            normal: Vector3::zeros(),
            texcoord: Vector3::zeros(),
            color: Color::TRANSPARENT,
            output: Vector4::zeros(),
        }
    }
}

/// Barycentric coordinates of `p` with respect to the triangle
/// `(p1, p2, p3)`, packed as `(u, v, w, 1)` for [`interpolate_vertices`].
pub fn barycentric(
    p1: Vector3<f64>,
    p2: Vector3<f64>,
    p3: Vector3<f64>,
    p: Vector3<f64>,
) -> Vector4<f64> {
    let e0 = p2 - p1;
    let e1 = p3 - p1;
    let e2 = p - p1;
    let d00 = e0.dot(&e0);
    let d01 = e0.dot(&e1);
    let d11 = e1.dot(&e1);
    let d20 = e2.dot(&e0);
    let d21 = e2.dot(&e1);
    let d = d00 * d11 - d01 * d01;
    let v = (d11 * d20 - d01 * d21) / d;
    let w = (d00 * d21 - d01 * d20) / d;
    let u = 1.0 - v - w;
    Vector4::new(u, v, w, 1.0)
}

/// Blends three vertices with the weights `(b.x, b.y, b.z)`, scaled by
/// `b.w`. The rasterizer packs perspective-corrected weights this way;
/// the clipper passes plain barycentrics with `b.w == 1`.
pub fn interpolate_vertices(v1: &Vertex, v2: &Vertex, v3: &Vertex, b: Vector4<f64>) -> Vertex {
    Vertex {
        position: interpolate_vectors(v1.position, v2.position, v3.position, b),
        normal: interpolate_vectors(v1.normal, v2.normal, v3.normal, b).normalize(),
        texcoord: interpolate_vectors(v1.texcoord, v2.texcoord, v3.texcoord, b),
        color: (v1.color * b.x + v2.color * b.y + v3.color * b.z) * b.w,
        output: (v1.output * b.x + v2.output * b.y + v3.output * b.z) * b.w,
    }
}

#[inline]
fn interpolate_vectors(
    v1: Vector3<f64>,
    v2: Vector3<f64>,
    v3: Vector3<f64>,
    b: Vector4<f64>,
) -> Vector3<f64> {
    (v1 * b.x + v2 * b.y + v3 * b.z) * b.w
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barycentric_corners_are_unit_weights() {
        let p1 = Vector3::new(0.0, 0.0, 0.0);
        let p2 = Vector3::new(1.0, 0.0, 0.0);
        let p3 = Vector3::new(0.0, 1.0, 0.0);
        let b = barycentric(p1, p2, p3, p1);
        assert!((b.x - 1.0).abs() < 1e-12 && b.y.abs() < 1e-12 && b.z.abs() < 1e-12);
        let b = barycentric(p1, p2, p3, p3);
        assert!((b.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn barycentric_partition_of_unity() {
        let p1 = Vector3::new(-2.0, 1.0, 3.0);
        let p2 = Vector3::new(4.0, -1.0, 0.5);
        let p3 = Vector3::new(0.0, 5.0, -2.0);
        let p = p1 * 0.2 + p2 * 0.5 + p3 * 0.3;
        let b = barycentric(p1, p2, p3, p);
        assert!((b.x + b.y + b.z - 1.0).abs() < 1e-9);
        assert!((b.x - 0.2).abs() < 1e-9);
        assert!((b.y - 0.5).abs() < 1e-9);
        assert!((b.z - 0.3).abs() < 1e-9);
    }

    #[test]
    fn interpolation_blends_attributes() {
        let mut v1 = Vertex::new(Vector3::zeros());
        let mut v2 = Vertex::new(Vector3::new(1.0, 0.0, 0.0));
        let mut v3 = Vertex::new(Vector3::new(0.0, 1.0, 0.0));
        v1.color = Color::new(1.0, 0.0, 0.0, 1.0);
        v2.color = Color::new(0.0, 1.0, 0.0, 1.0);
        v3.color = Color::new(0.0, 0.0, 1.0, 1.0);
        v1.normal = Vector3::new(0.0, 0.0, 1.0);
        v2.normal = Vector3::new(0.0, 0.0, 1.0);
        v3.normal = Vector3::new(0.0, 0.0, 1.0);
        let b = Vector4::new(0.25, 0.25, 0.5, 1.0);
        let v = interpolate_vertices(&v1, &v2, &v3, b);
        assert_eq!(v.color, Color::new(0.25, 0.25, 0.5, 1.0));
        assert!((v.normal - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
        assert!((v.position - Vector3::new(0.25, 0.5, 0.0)).norm() < 1e-12);
    }
}
