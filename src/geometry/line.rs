//! The line primitive.

use nalgebra::{Matrix4, Vector3};

use crate::math::{Aabb, Transform};

use super::vertex::Vertex;

/// A segment between two vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub v1: Vertex,
    pub v2: Vertex,
}

impl Line {
    pub fn new(v1: Vertex, v2: Vertex) -> Line {
        Line { v1, v2 }
    }

    pub fn from_points(p1: Vector3<f64>, p2: Vector3<f64>) -> Line {
        Line::new(Vertex::new(p1), Vertex::new(p2))
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points([self.v1.position, self.v2.position])
    }

    /// Same transform contract as [`Triangle::transform`](super::Triangle::transform).
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for v in [&mut self.v1, &mut self.v2] {
            v.position = matrix.mul_position(v.position);
            v.normal = matrix.mul_direction(v.normal);
        }
    }
}
