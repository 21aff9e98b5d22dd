//! Vector operations beyond what nalgebra ships.

use nalgebra::{Vector3, Vector4};

/// Renderer-specific operations on 3-component `f64` vectors.
///
/// Component-wise arithmetic, `dot`, `cross`, `normalize`, `lerp`,
/// `inf`/`sup` and the norms all come straight from nalgebra; this trait
/// carries only the operations it lacks.
pub trait VectorExt: Sized {
    /// True when any component is NaN or infinite.
    fn is_degenerate(&self) -> bool;

    /// Lexicographic ordering by x, then y, then z.
    fn less_than(&self, other: &Self) -> bool;

    /// Component-wise floor.
    fn floor(&self) -> Self;

    /// Component-wise ceiling.
    fn ceil(&self) -> Self;

    /// Component-wise GLSL-style modulo: `a - b * floor(a / b)`.
    fn modulo(&self, other: &Self) -> Self;

    /// Walks `distance` units from `self` toward `other`.
    fn lerp_distance(&self, other: &Self, distance: f64) -> Self;

    /// Reflects the incident vector `self` about the unit normal `n`.
    fn reflect(&self, n: &Self) -> Self;

    /// Any unit vector orthogonal to `self`.
    ///
    /// Returns zero for the zero vector.
    fn perpendicular(&self) -> Self;

    /// Distance from `self` to the segment `vw`.
    fn segment_distance(&self, v: &Self, w: &Self) -> f64;
}

impl VectorExt for Vector3<f64> {
    fn is_degenerate(&self) -> bool {
        !(self.x.is_finite() && self.y.is_finite() && self.z.is_finite())
    }

    fn less_than(&self, other: &Self) -> bool {
        if self.x != other.x {
            return self.x < other.x;
        }
        if self.y != other.y {
            return self.y < other.y;
        }
        self.z < other.z
    }

    #[inline]
    fn floor(&self) -> Self {
        self.map(f64::floor)
    }

    #[inline]
    fn ceil(&self) -> Self {
        self.map(f64::ceil)
    }

    fn modulo(&self, other: &Self) -> Self {
        self.zip_map(other, |a, b| a - b * (a / b).floor())
    }

    fn lerp_distance(&self, other: &Self, distance: f64) -> Self {
        self + (other - self).normalize() * distance
    }

    #[inline]
    fn reflect(&self, n: &Self) -> Self {
        self - n * (2.0 * n.dot(self))
    }

    fn perpendicular(&self) -> Self {
        if self.x == 0.0 && self.y == 0.0 {
            if self.z == 0.0 {
                return Vector3::zeros();
            }
            return Vector3::new(0.0, 1.0, 0.0);
        }
        Vector3::new(-self.y, self.x, 0.0).normalize()
    }

    fn segment_distance(&self, v: &Self, w: &Self) -> f64 {
        let l2 = (w - v).norm_squared();
        if l2 == 0.0 {
            return (self - v).norm();
        }
        let t = (self - v).dot(&(w - v)) / l2;
        if t < 0.0 {
            return (self - v).norm();
        }
        if t > 1.0 {
            return (self - w).norm();
        }
        ((v + (w - v) * t) - self).norm()
    }
}

/// The canonical clip-volume test on homogeneous points.
pub trait HomogeneousExt {
    /// True when the point lies outside `|x| <= w`, `|y| <= w`, `|z| <= w`.
    fn outside(&self) -> bool;
}

impl HomogeneousExt for Vector4<f64> {
    #[inline]
    fn outside(&self) -> bool {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        x < -w || x > w || y < -w || y > w || z < -w || z > w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perpendicular_is_orthogonal_and_unit() {
        for v in [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-4.0, 0.5, 0.0),
            Vector3::new(0.0, 0.0, 2.0),
            Vector3::new(0.0, -7.0, 1.0),
        ] {
            let p = v.perpendicular();
            assert!(v.dot(&p).abs() < 1e-12, "not orthogonal for {:?}", v);
            assert!((p.norm() - 1.0).abs() < 1e-12, "not unit for {:?}", v);
        }
        assert_eq!(Vector3::zeros().perpendicular(), Vector3::zeros());
    }

    #[test]
    fn reflect_about_axis() {
        let i = Vector3::new(1.0, -1.0, 0.0);
        let n = Vector3::new(0.0, 1.0, 0.0);
        let r = i.reflect(&n);
        assert!((r - Vector3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn modulo_wraps_like_glsl() {
        let a = Vector3::new(1.25, -0.25, 3.0);
        let b = Vector3::new(1.0, 1.0, 1.0);
        let m = a.modulo(&b);
        assert!((m - Vector3::new(0.25, 0.75, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn outside_respects_w() {
        assert!(!Vector4::new(0.5, -0.5, 0.0, 1.0).outside());
        assert!(Vector4::new(1.5, 0.0, 0.0, 1.0).outside());
        assert!(Vector4::new(0.0, -2.5, 0.0, 2.0).outside());
        assert!(Vector4::new(0.0, 0.0, 3.0, 2.0).outside());
        // boundary points are inside
        assert!(!Vector4::new(1.0, -1.0, 1.0, 1.0).outside());
    }

    #[test]
    fn lexicographic_order() {
        let a = Vector3::new(1.0, 5.0, 9.0);
        let b = Vector3::new(1.0, 6.0, 0.0);
        assert!(a.less_than(&b));
        assert!(!b.less_than(&a));
        assert!(!a.less_than(&a));
    }

    #[test]
    fn segment_distance_endpoints_and_interior() {
        let v = Vector3::new(0.0, 0.0, 0.0);
        let w = Vector3::new(10.0, 0.0, 0.0);
        assert!((Vector3::new(-3.0, 4.0, 0.0).segment_distance(&v, &w) - 5.0).abs() < 1e-12);
        assert!((Vector3::new(5.0, 2.0, 0.0).segment_distance(&v, &w) - 2.0).abs() < 1e-12);
        assert!((Vector3::new(13.0, 4.0, 0.0).segment_distance(&v, &w) - 5.0).abs() < 1e-12);
    }
}
