//! Homogeneous clipping against the canonical view volume.
//!
//! Triangles go through Sutherland-Hodgman against the six half-spaces
//! `w + x >= 0`, `w - x >= 0`, `w + y >= 0`, `w - y >= 0`, `w + z >= 0`,
//! `w - z >= 0`, in that order, and the resulting polygon is
//! fan-triangulated. Attributes of the new corners are rebuilt from 3D
//! barycentrics against the original clip-space positions. Lines are
//! clipped per plane as plain segments.

use nalgebra::Vector4;
use smallvec::SmallVec;

use crate::geometry::{barycentric, interpolate_vertices, Line, Triangle, Vertex};

/// One of the six clip-volume half-spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

/// All clipping planes, in clip order.
pub const ALL_CLIP_PLANES: [ClipPlane; 6] = [
    ClipPlane::Left,
    ClipPlane::Right,
    ClipPlane::Bottom,
    ClipPlane::Top,
    ClipPlane::Near,
    ClipPlane::Far,
];

impl ClipPlane {
    /// Signed distance-like quantity, positive inside the half-space.
    #[inline]
    pub fn signed_distance(self, v: &Vector4<f64>) -> f64 {
        match self {
            ClipPlane::Left => v.w + v.x,
            ClipPlane::Right => v.w - v.x,
            ClipPlane::Bottom => v.w + v.y,
            ClipPlane::Top => v.w - v.y,
            ClipPlane::Near => v.w + v.z,
            ClipPlane::Far => v.w - v.z,
        }
    }

    /// Check if the clipping plane has the given clip-space point inside of it.
    #[inline]
    pub fn has_inside(self, v: &Vector4<f64>) -> bool {
        self.signed_distance(v) > 0.0
    }

    /// Intersection of the segment `ab` with the plane, computed directly
    /// in homogeneous coordinates.
    #[inline]
    pub fn intersect(self, a: &Vector4<f64>, b: &Vector4<f64>) -> Vector4<f64> {
        let da = self.signed_distance(a);
        let db = self.signed_distance(b);
        let t = da / (da - db);
        a + (b - a) * t
    }
}

type Polygon = SmallVec<[Vector4<f64>; 8]>;

fn sutherland_hodgman(points: &[Vector4<f64>]) -> Polygon {
    let mut output = Polygon::from_slice(points);
    for plane in ALL_CLIP_PLANES {
        if output.is_empty() {
            return output;
        }
        let input = std::mem::take(&mut output);
        let mut s = input[input.len() - 1];
        for &e in &input {
            if plane.has_inside(&e) {
                if !plane.has_inside(&s) {
                    output.push(plane.intersect(&s, &e));
                }
                output.push(e);
            } else if plane.has_inside(&s) {
                output.push(plane.intersect(&s, &e));
            }
            s = e;
        }
    }
    output
}

/// Clips a triangle against the view volume.
///
/// A triangle entirely inside is returned unchanged; a triangle entirely
/// outside yields nothing. Otherwise the clipped polygon is
/// fan-triangulated from its first vertex.
pub fn clip_triangle(triangle: &Triangle) -> Vec<Triangle> {
    if !triangle.v1.outside() && !triangle.v2.outside() && !triangle.v3.outside() {
        return vec![*triangle];
    }

    let w1 = triangle.v1.output;
    let w2 = triangle.v2.output;
    let w3 = triangle.v3.output;
    let p1 = w1.xyz();
    let p2 = w2.xyz();
    let p3 = w3.xyz();

    let polygon = sutherland_hodgman(&[w1, w2, w3]);

    let reconstruct = |point: &Vector4<f64>| -> Vertex {
        let b = barycentric(p1, p2, p3, point.xyz());
        let mut v = interpolate_vertices(&triangle.v1, &triangle.v2, &triangle.v3, b);
        v.output = *point;
        v
    };

    let mut result = Vec::new();
    for i in 2..polygon.len() {
        let v1 = reconstruct(&polygon[0]);
        let v2 = reconstruct(&polygon[i - 1]);
        let v3 = reconstruct(&polygon[i]);
        result.push(Triangle::new(v1, v2, v3));
    }
    result
}

/// Clips a line segment against the view volume, or drops it entirely.
///
/// Only the clip-space outputs are adjusted; the remaining vertex
/// attributes keep their original values.
pub fn clip_line(line: &Line) -> Option<Line> {
    let mut w1 = line.v1.output;
    let mut w2 = line.v2.output;
    for plane in ALL_CLIP_PLANES {
        let f1 = plane.has_inside(&w1);
        let f2 = plane.has_inside(&w2);
        match (f1, f2) {
            (true, true) => {}
            (true, false) => w2 = plane.intersect(&w1, &w2),
            (false, true) => w1 = plane.intersect(&w2, &w1),
            (false, false) => return None,
        }
    }
    let mut v1 = line.v1;
    let mut v2 = line.v2;
    v1.output = w1;
    v2.output = w2;
    Some(Line::new(v1, v2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{orthographic, HomogeneousExt, Transform};
    use nalgebra::Vector3;

    fn shaded(p: Vector3<f64>) -> Vertex {
        let mut v = Vertex::new(p);
        v.output = orthographic(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0).mul_position_w(p);
        v
    }

    fn shaded_triangle(p1: Vector3<f64>, p2: Vector3<f64>, p3: Vector3<f64>) -> Triangle {
        Triangle::new(shaded(p1), shaded(p2), shaded(p3))
    }

    #[test]
    fn inside_triangle_passes_through_unchanged() {
        let t = shaded_triangle(
            Vector3::new(-0.5, -0.5, 0.0),
            Vector3::new(0.5, -0.5, 0.0),
            Vector3::new(0.0, 0.5, 0.0),
        );
        let clipped = clip_triangle(&t);
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0], t);
    }

    #[test]
    fn outside_triangle_vanishes() {
        let t = shaded_triangle(
            Vector3::new(5.0, 5.0, 0.0),
            Vector3::new(6.0, 5.0, 0.0),
            Vector3::new(5.0, 6.0, 0.0),
        );
        assert!(clip_triangle(&t).is_empty());
    }

    #[test]
    fn straddling_triangle_stays_inside_the_volume() {
        let t = shaded_triangle(
            Vector3::new(-0.5, -0.5, 0.0),
            Vector3::new(3.0, -0.5, 0.0),
            Vector3::new(-0.5, 3.0, 0.0),
        );
        let clipped = clip_triangle(&t);
        assert!(!clipped.is_empty());
        for sub in &clipped {
            for v in [&sub.v1, &sub.v2, &sub.v3] {
                let o = v.output;
                let eps = 1e-9;
                assert!(o.x >= -o.w - eps && o.x <= o.w + eps);
                assert!(o.y >= -o.w - eps && o.y <= o.w + eps);
                assert!(o.z >= -o.w - eps && o.z <= o.w + eps);
            }
        }
    }

    #[test]
    fn clipped_attributes_interpolate() {
        // color ramp along x; the clipped edge at x = 1 must carry the
        // blend of its endpoints
        let mut t = shaded_triangle(
            Vector3::new(0.0, -0.5, 0.0),
            Vector3::new(2.0, -0.5, 0.0),
            Vector3::new(0.0, 0.5, 0.0),
        );
        t.v1.color = crate::Color::new(0.0, 0.0, 0.0, 1.0);
        t.v2.color = crate::Color::new(1.0, 0.0, 0.0, 1.0);
        t.v3.color = crate::Color::new(0.0, 0.0, 0.0, 1.0);
        for sub in clip_triangle(&t) {
            for v in [&sub.v1, &sub.v2, &sub.v3] {
                // red never exceeds the ramp value at the clip boundary
                assert!(v.color.r <= 0.5 + 1e-9, "unexpected red {}", v.color.r);
                assert!((v.color.r - v.position.x / 2.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn line_clipping_cases() {
        let inside = Line::new(
            shaded(Vector3::new(-0.5, 0.0, 0.0)),
            shaded(Vector3::new(0.5, 0.0, 0.0)),
        );
        let clipped = clip_line(&inside).expect("fully inside line survives");
        assert_eq!(clipped, inside);

        let crossing = Line::new(
            shaded(Vector3::new(0.0, 0.0, 0.0)),
            shaded(Vector3::new(3.0, 0.0, 0.0)),
        );
        let clipped = clip_line(&crossing).expect("crossing line survives");
        assert!(!clipped.v2.output.outside());
        assert!((clipped.v2.output.x - clipped.v2.output.w).abs() < 1e-9);

        let outside = Line::new(
            shaded(Vector3::new(3.0, 0.0, 0.0)),
            shaded(Vector3::new(5.0, 0.0, 0.0)),
        );
        assert!(clip_line(&outside).is_none());
    }
}
