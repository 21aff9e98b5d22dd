//! The triangle primitive.

use nalgebra::{Matrix4, Vector3};

use crate::math::{Aabb, Transform, VectorExt};

use super::vertex::Vertex;

/// Three vertices in winding order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v1: Vertex,
    pub v2: Vertex,
    pub v3: Vertex,
}

impl Triangle {
    /// Builds a triangle, replacing any zero vertex normal with the
    /// geometric face normal.
    pub fn new(v1: Vertex, v2: Vertex, v3: Vertex) -> Triangle {
        let mut t = Triangle { v1, v2, v3 };
        t.fix_normals();
        t
    }

    /// A triangle from bare positions; normals come from the face.
    pub fn from_points(p1: Vector3<f64>, p2: Vector3<f64>, p3: Vector3<f64>) -> Triangle {
        Triangle::new(Vertex::new(p1), Vertex::new(p2), Vertex::new(p3))
    }

    /// Unit face normal from the winding order.
    pub fn normal(&self) -> Vector3<f64> {
        let e1 = self.v2.position - self.v1.position;
        let e2 = self.v3.position - self.v1.position;
        e1.cross(&e2).normalize()
    }

    pub fn area(&self) -> f64 {
        let e1 = self.v2.position - self.v1.position;
        let e2 = self.v3.position - self.v1.position;
        e1.cross(&e2).norm() / 2.0
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points([self.v1.position, self.v2.position, self.v3.position])
    }

    /// Transforms positions by `matrix` and normals by its direction part,
    /// in place.
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for v in [&mut self.v1, &mut self.v2, &mut self.v3] {
            v.position = matrix.mul_position(v.position);
            v.normal = matrix.mul_direction(v.normal);
        }
    }

    /// Swaps the winding order and negates every normal.
    pub fn reverse_winding(&mut self) {
        std::mem::swap(&mut self.v1, &mut self.v3);
        self.v1.normal = -self.v1.normal;
        self.v2.normal = -self.v2.normal;
        self.v3.normal = -self.v3.normal;
    }

    /// True for coincident or non-finite vertices.
    pub fn is_degenerate(&self) -> bool {
        let (p1, p2, p3) = (self.v1.position, self.v2.position, self.v3.position);
        if p1 == p2 || p1 == p3 || p2 == p3 {
            return true;
        }
        p1.is_degenerate() || p2.is_degenerate() || p3.is_degenerate()
    }

    fn fix_normals(&mut self) {
        let n = self.normal();
        let zero = Vector3::zeros();
        for v in [&mut self.v1, &mut self.v2, &mut self.v3] {
            if v.normal == zero {
                v.normal = n;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::from_points(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn construction_fills_zero_normals() {
        let t = unit_triangle();
        let n = Vector3::new(0.0, 0.0, 1.0);
        assert!((t.v1.normal - n).norm() < 1e-12);
        assert!((t.v2.normal - n).norm() < 1e-12);

        // explicit normals survive
        let mut v = Vertex::new(Vector3::zeros());
        v.normal = Vector3::new(1.0, 0.0, 0.0);
        let t = Triangle::new(
            v,
            Vertex::new(Vector3::new(1.0, 0.0, 0.0)),
            Vertex::new(Vector3::new(0.0, 1.0, 0.0)),
        );
        assert_eq!(t.v1.normal, Vector3::new(1.0, 0.0, 0.0));
        assert!((t.v2.normal - n).norm() < 1e-12);
    }

    #[test]
    fn area_and_bounds() {
        let t = unit_triangle();
        assert!((t.area() - 0.5).abs() < 1e-12);
        let b = t.bounding_box();
        assert_eq!(b.min, Vector3::zeros());
        assert_eq!(b.max, Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn reverse_winding_flips_normals() {
        let mut t = unit_triangle();
        let n = t.normal();
        t.reverse_winding();
        assert!((t.normal() + n).norm() < 1e-12);
        assert!((t.v1.normal + n).norm() < 1e-12);
    }

    #[test]
    fn degenerate_detection() {
        assert!(!unit_triangle().is_degenerate());
        let p = Vector3::new(1.0, 2.0, 3.0);
        let t = Triangle::from_points(p, p, Vector3::new(0.0, 1.0, 0.0));
        assert!(t.is_degenerate());
        let t = Triangle::from_points(
            Vector3::new(f64::NAN, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        );
        assert!(t.is_degenerate());
    }
}
