//! 4x4 transform factories and the position/direction multiply contract.
//!
//! All factories produce matrices meant to left-multiply column vectors;
//! `a.rotated(..)`-style combinators compose in application order. Inverse,
//! determinant, transpose and multiplication come from nalgebra.

use nalgebra::{Matrix4, Vector3, Vector4};

use super::bounds::Aabb;
use super::vector::VectorExt;

/// Translation by `v`.
pub fn translate(v: Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new(
        1.0, 0.0, 0.0, v.x, //
        0.0, 1.0, 0.0, v.y, //
        0.0, 0.0, 1.0, v.z, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Non-uniform scale by `v`.
pub fn scale(v: Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new(
        v.x, 0.0, 0.0, 0.0, //
        0.0, v.y, 0.0, 0.0, //
        0.0, 0.0, v.z, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Rotation by `angle` radians about the axis `v`.
pub fn rotate(v: Vector3<f64>, angle: f64) -> Matrix4<f64> {
    let v = v.normalize();
    let s = angle.sin();
    let c = angle.cos();
    let m = 1.0 - c;
    Matrix4::new(
        m * v.x * v.x + c,
        m * v.x * v.y + v.z * s,
        m * v.z * v.x - v.y * s,
        0.0,
        m * v.x * v.y - v.z * s,
        m * v.y * v.y + c,
        m * v.y * v.z + v.x * s,
        0.0,
        m * v.z * v.x + v.y * s,
        m * v.y * v.z - v.x * s,
        m * v.z * v.z + c,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
    )
}

/// The shortest rotation mapping unit vector `a` onto unit vector `b`.
///
/// Falls back to the identity for nearly parallel inputs and to a half
/// turn about any perpendicular axis for nearly anti-parallel inputs.
pub fn rotate_to(a: Vector3<f64>, b: Vector3<f64>) -> Matrix4<f64> {
    const EPSILON: f64 = 1e-4;
    let dot = b.dot(&a);
    if (dot - 1.0).abs() < EPSILON {
        Matrix4::identity()
    } else if (dot + 1.0).abs() < EPSILON {
        rotate(a.perpendicular(), std::f64::consts::PI)
    } else {
        rotate(b.cross(&a).normalize(), dot.acos())
    }
}

/// Perspective frustum with the given clip bounds.
pub fn frustum(l: f64, r: f64, b: f64, t: f64, n: f64, f: f64) -> Matrix4<f64> {
    let t1 = 2.0 * n;
    let t2 = r - l;
    let t3 = t - b;
    let t4 = f - n;
    Matrix4::new(
        t1 / t2,
        0.0,
        (r + l) / t2,
        0.0,
        0.0,
        t1 / t3,
        (t + b) / t3,
        0.0,
        0.0,
        0.0,
        (-f - n) / t4,
        (-t1 * f) / t4,
        0.0,
        0.0,
        -1.0,
        0.0,
    )
}

/// Orthographic projection with the given clip bounds.
pub fn orthographic(l: f64, r: f64, b: f64, t: f64, n: f64, f: f64) -> Matrix4<f64> {
    Matrix4::new(
        2.0 / (r - l),
        0.0,
        0.0,
        -(r + l) / (r - l),
        0.0,
        2.0 / (t - b),
        0.0,
        -(t + b) / (t - b),
        0.0,
        0.0,
        -2.0 / (f - n),
        -(f + n) / (f - n),
        0.0,
        0.0,
        0.0,
        1.0,
    )
}

/// Perspective projection from a vertical field of view in degrees.
pub fn perspective(fovy: f64, aspect: f64, near: f64, far: f64) -> Matrix4<f64> {
    let ymax = near * (fovy * std::f64::consts::PI / 360.0).tan();
    let xmax = ymax * aspect;
    frustum(-xmax, xmax, -ymax, ymax, near, far)
}

/// View matrix for a camera at `eye` looking at `center`.
pub fn look_at(eye: Vector3<f64>, center: Vector3<f64>, up: Vector3<f64>) -> Matrix4<f64> {
    let z = (eye - center).normalize();
    let x = up.cross(&z).normalize();
    let y = z.cross(&x);
    Matrix4::new(
        x.x,
        x.y,
        x.z,
        -x.dot(&eye),
        y.x,
        y.y,
        y.z,
        -y.dot(&eye),
        z.x,
        z.y,
        z.z,
        -z.dot(&eye),
        0.0,
        0.0,
        0.0,
        1.0,
    )
}

/// Orientation-only variant of [`look_at`] for a forward direction.
pub fn look_at_direction(forward: Vector3<f64>, up: Vector3<f64>) -> Matrix4<f64> {
    let z = forward.normalize();
    let x = up.cross(&z).normalize();
    let y = z.cross(&x);
    Matrix4::new(
        x.x, x.y, x.z, 0.0, //
        y.x, y.y, y.z, 0.0, //
        z.x, z.y, z.z, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Maps NDC `[-1, 1]^2 x [-1, 1]` onto pixel coordinates `[0, w] x [0, h]`
/// with the y axis flipped and z compressed to `[0, 1]`.
pub fn screen(w: usize, h: usize) -> Matrix4<f64> {
    let w2 = w as f64 / 2.0;
    let h2 = h as f64 / 2.0;
    Matrix4::new(
        w2, 0.0, 0.0, w2, //
        0.0, -h2, 0.0, h2, //
        0.0, 0.0, 0.5, 0.5, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Generalization of [`screen`] to an arbitrary viewport rectangle,
/// without the y flip.
pub fn viewport(x: f64, y: f64, w: f64, h: f64) -> Matrix4<f64> {
    let l = x;
    let b = y;
    let r = x + w;
    let t = y + h;
    Matrix4::new(
        (r - l) / 2.0,
        0.0,
        0.0,
        (r + l) / 2.0,
        0.0,
        (t - b) / 2.0,
        0.0,
        (t + b) / 2.0,
        0.0,
        0.0,
        0.5,
        0.5,
        0.0,
        0.0,
        0.0,
        1.0,
    )
}

/// Applying a 4x4 transform to the geometric types.
pub trait Transform {
    /// Transforms a position, ignoring the projective row.
    fn mul_position(&self, p: Vector3<f64>) -> Vector3<f64>;

    /// Transforms a position into homogeneous clip space.
    fn mul_position_w(&self, p: Vector3<f64>) -> Vector4<f64>;

    /// Transforms a direction by the linear part and re-normalizes.
    fn mul_direction(&self, d: Vector3<f64>) -> Vector3<f64>;

    /// Transforms an axis-aligned box into the axis-aligned box of its image.
    fn mul_box(&self, b: &Aabb) -> Aabb;

    /// This transform followed by a translation.
    fn translated(&self, v: Vector3<f64>) -> Self;

    /// This transform followed by a scale.
    fn scaled(&self, v: Vector3<f64>) -> Self;

    /// This transform followed by an axis-angle rotation.
    fn rotated(&self, axis: Vector3<f64>, angle: f64) -> Self;

    /// This transform followed by the shortest rotation from `a` to `b`.
    fn rotated_to(&self, a: Vector3<f64>, b: Vector3<f64>) -> Self;
}

impl Transform for Matrix4<f64> {
    #[inline]
    fn mul_position(&self, p: Vector3<f64>) -> Vector3<f64> {
        (self * Vector4::new(p.x, p.y, p.z, 1.0)).xyz()
    }

    #[inline]
    fn mul_position_w(&self, p: Vector3<f64>) -> Vector4<f64> {
        self * Vector4::new(p.x, p.y, p.z, 1.0)
    }

    #[inline]
    fn mul_direction(&self, d: Vector3<f64>) -> Vector3<f64> {
        (self * Vector4::new(d.x, d.y, d.z, 0.0)).xyz().normalize()
    }

    fn mul_box(&self, b: &Aabb) -> Aabb {
        // transform the basis columns and recombine the extremes
        let r = Vector3::new(self[(0, 0)], self[(1, 0)], self[(2, 0)]);
        let u = Vector3::new(self[(0, 1)], self[(1, 1)], self[(2, 1)]);
        let f = Vector3::new(self[(0, 2)], self[(1, 2)], self[(2, 2)]);
        let t = Vector3::new(self[(0, 3)], self[(1, 3)], self[(2, 3)]);
        let (xa, xb) = (r * b.min.x, r * b.max.x);
        let (ya, yb) = (u * b.min.y, u * b.max.y);
        let (za, zb) = (f * b.min.z, f * b.max.z);
        let (xa, xb) = (xa.inf(&xb), xa.sup(&xb));
        let (ya, yb) = (ya.inf(&yb), ya.sup(&yb));
        let (za, zb) = (za.inf(&zb), za.sup(&zb));
        Aabb::new(xa + ya + za + t, xb + yb + zb + t)
    }

    fn translated(&self, v: Vector3<f64>) -> Self {
        translate(v) * self
    }

    fn scaled(&self, v: Vector3<f64>) -> Self {
        scale(v) * self
    }

    fn rotated(&self, axis: Vector3<f64>, angle: f64) -> Self {
        rotate(axis, angle) * self
    }

    fn rotated_to(&self, a: Vector3<f64>, b: Vector3<f64>) -> Self {
        rotate_to(a, b) * self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vector3<f64>, b: Vector3<f64>) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn translate_then_scale_composes_in_order() {
        let m = Matrix4::identity()
            .translated(Vector3::new(1.0, 0.0, 0.0))
            .scaled(Vector3::new(2.0, 2.0, 2.0));
        assert!(close(
            m.mul_position(Vector3::new(1.0, 1.0, 1.0)),
            Vector3::new(4.0, 2.0, 2.0)
        ));
    }

    #[test]
    fn rotate_to_parallel_is_identity() {
        let a = Vector3::new(0.0, 0.0, 1.0);
        let m = rotate_to(a, a);
        assert!(close(m.mul_position(Vector3::new(3.0, -2.0, 5.0)), Vector3::new(3.0, -2.0, 5.0)));
    }

    #[test]
    fn rotate_to_maps_a_onto_b() {
        let a = Vector3::new(0.0, 0.0, 1.0);
        let b = Vector3::new(0.0, 1.0, 0.0);
        let m = rotate_to(a, b);
        assert!(close(m.mul_position(a), b));

        // anti-parallel takes the half-turn branch
        let m = rotate_to(a, -a);
        assert!(close(m.mul_position(a), -a));
    }

    #[test]
    fn screen_maps_ndc_corners() {
        let m = screen(100, 50);
        assert!(close(
            m.mul_position(Vector3::new(-1.0, 1.0, -1.0)),
            Vector3::new(0.0, 0.0, 0.0)
        ));
        assert!(close(
            m.mul_position(Vector3::new(1.0, -1.0, 1.0)),
            Vector3::new(100.0, 50.0, 1.0)
        ));
        assert!(close(
            m.mul_position(Vector3::new(0.0, 0.0, 0.0)),
            Vector3::new(50.0, 25.0, 0.5)
        ));
    }

    #[test]
    fn orthographic_unit_cube_is_ndc() {
        let m = orthographic(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
        let p = m.mul_position_w(Vector3::new(0.5, -0.25, 0.0));
        assert!((p.x - 0.5).abs() < 1e-12);
        assert!((p.y + 0.25).abs() < 1e-12);
        assert!((p.w - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perspective_inverse_round_trips() {
        let m = perspective(60.0, 1.5, 0.1, 100.0);
        let inv = m.try_inverse().expect("perspective must be invertible");
        let p = Vector4::new(0.3, -0.2, -5.0, 1.0);
        let q = inv * (m * p);
        assert!((q - p).norm() < 1e-9);
        assert!(m.determinant().abs() > 0.0);
    }

    #[test]
    fn mul_box_contains_transformed_corners() {
        let b = Aabb::new(Vector3::new(-1.0, -2.0, -3.0), Vector3::new(1.0, 2.0, 3.0));
        let m = rotate(Vector3::new(1.0, 1.0, 0.0), 0.7).translated(Vector3::new(5.0, 0.0, 0.0));
        let tb = m.mul_box(&b);
        for &x in &[b.min.x, b.max.x] {
            for &y in &[b.min.y, b.max.y] {
                for &z in &[b.min.z, b.max.z] {
                    let p = m.mul_position(Vector3::new(x, y, z));
                    assert!(tb.contains(&p), "corner {:?} escaped {:?}", p, tb);
                }
            }
        }
    }
}
