//! Triangle/line soups with a cached bounding box.

use std::cell::Cell;

use nalgebra::{Matrix4, Vector3};

use crate::math::{translate, Aabb, Transform};

use super::line::Line;
use super::triangle::Triangle;

/// An ordered sequence of triangles and lines.
///
/// The bounding box is computed on demand and cached until the next
/// mutation.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    pub lines: Vec<Line>,
    cached_box: Cell<Option<Aabb>>,
}

impl Mesh {
    pub fn new() -> Mesh {
        Mesh::default()
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Mesh {
        Mesh {
            triangles,
            ..Mesh::default()
        }
    }

    pub fn from_lines(lines: Vec<Line>) -> Mesh {
        Mesh {
            lines,
            ..Mesh::default()
        }
    }

    pub fn push_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
        self.dirty();
    }

    pub fn push_line(&mut self, line: Line) {
        self.lines.push(line);
        self.dirty();
    }

    /// Appends all primitives of `other`.
    pub fn add(&mut self, other: &Mesh) {
        self.triangles.extend_from_slice(&other.triangles);
        self.lines.extend_from_slice(&other.lines);
        self.dirty();
    }

    /// Transforms every primitive in place.
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for t in &mut self.triangles {
            t.transform(matrix);
        }
        for l in &mut self.lines {
            l.transform(matrix);
        }
        self.dirty();
    }

    /// Reverses the winding of every triangle, negating normals.
    pub fn reverse_winding(&mut self) {
        for t in &mut self.triangles {
            t.reverse_winding();
        }
        self.dirty();
    }

    /// Moves the mesh so its bounding-box `anchor` lands on `position`.
    pub fn move_to(&mut self, position: Vector3<f64>, anchor: Vector3<f64>) {
        let matrix = translate(position - self.bounding_box().anchor(anchor));
        self.transform(&matrix);
    }

    /// Uniformly scales and translates the mesh to fit inside `target`,
    /// distributing any slack according to `anchor`.
    pub fn fit_inside(&mut self, target: &Aabb, anchor: Vector3<f64>) {
        let size = self.bounding_box().size();
        let scale = target.size().component_div(&size).min();
        let extra = target.size() - size * scale;
        let matrix = Matrix4::identity()
            .translated(-self.bounding_box().min)
            .scaled(Vector3::from_element(scale))
            .translated(target.min + extra.component_mul(&anchor));
        self.transform(&matrix);
    }

    /// Fits the mesh into the unit cube `[0, 1]^3`, centered.
    pub fn unit_cube(&mut self) {
        self.fit_inside(
            &Aabb::new(Vector3::zeros(), Vector3::from_element(1.0)),
            Vector3::zeros(),
        );
        self.move_to(Vector3::zeros(), Vector3::from_element(0.5));
    }

    /// Fits the mesh into `[-1, 1]^3`, centered.
    pub fn bi_unit_cube(&mut self) {
        self.fit_inside(
            &Aabb::new(Vector3::from_element(-1.0), Vector3::from_element(1.0)),
            Vector3::from_element(0.5),
        );
    }

    /// Bounding box over all primitives; empty for an empty mesh.
    pub fn bounding_box(&self) -> Aabb {
        if let Some(b) = self.cached_box.get() {
            return b;
        }
        let mut b = self
            .triangles
            .iter()
            .fold(Aabb::empty(), |b, t| b.extend(&t.bounding_box()));
        for l in &self.lines {
            b = b.extend(&l.bounding_box());
        }
        self.cached_box.set(Some(b));
        b
    }

    fn dirty(&mut self) {
        self.cached_box.set(None);
    }
}
