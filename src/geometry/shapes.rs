//! Procedural meshes for common solids.
//!
//! All generators produce unit-ish geometry centered on the origin with
//! outward counter-clockwise winding; compose with
//! [`Mesh::transform`] to place them.

use nalgebra::Vector3;

use crate::math::{lat_lng_to_xyz, radians, scale, Aabb, Transform};

use super::line::Line;
use super::mesh::Mesh;
use super::triangle::Triangle;

/// A unit square in the z = 0 plane.
pub fn plane() -> Mesh {
    let v1 = Vector3::new(-0.5, -0.5, 0.0);
    let v2 = Vector3::new(0.5, -0.5, 0.0);
    let v3 = Vector3::new(0.5, 0.5, 0.0);
    let v4 = Vector3::new(-0.5, 0.5, 0.0);
    Mesh::from_triangles(vec![
        Triangle::from_points(v1, v2, v3),
        Triangle::from_points(v1, v3, v4),
    ])
}

/// A unit cube spanning `[-0.5, 0.5]` on each axis.
pub fn cube() -> Mesh {
    let v = [
        Vector3::new(-1.0, -1.0, -1.0),
        Vector3::new(-1.0, -1.0, 1.0),
        Vector3::new(-1.0, 1.0, -1.0),
        Vector3::new(-1.0, 1.0, 1.0),
        Vector3::new(1.0, -1.0, -1.0),
        Vector3::new(1.0, -1.0, 1.0),
        Vector3::new(1.0, 1.0, -1.0),
        Vector3::new(1.0, 1.0, 1.0),
    ];
    let indices = [
        [3, 5, 7],
        [5, 3, 1],
        [0, 6, 4],
        [6, 0, 2],
        [0, 5, 1],
        [5, 0, 4],
        [5, 6, 7],
        [6, 5, 4],
        [6, 3, 7],
        [3, 6, 2],
        [0, 3, 2],
        [3, 0, 1],
    ];
    let mut mesh = Mesh::from_triangles(
        indices
            .iter()
            .map(|&[a, b, c]| Triangle::from_points(v[a], v[b], v[c]))
            .collect(),
    );
    mesh.transform(&scale(Vector3::new(0.5, 0.5, 0.5)));
    mesh
}

/// A cube filling the given box.
pub fn cube_for_box(b: &Aabb) -> Mesh {
    let mut mesh = cube();
    let matrix = crate::math::translate(Vector3::new(0.5, 0.5, 0.5))
        .scaled(b.size())
        .translated(b.min);
    mesh.transform(&matrix);
    mesh
}

/// The twelve edges of the given box as a line mesh.
pub fn cube_outline_for_box(b: &Aabb) -> Mesh {
    let (x0, y0, z0) = (b.min.x, b.min.y, b.min.z);
    let (x1, y1, z1) = (b.max.x, b.max.y, b.max.z);
    let p = Vector3::new;
    Mesh::from_lines(vec![
        Line::from_points(p(x0, y0, z0), p(x0, y0, z1)),
        Line::from_points(p(x0, y1, z0), p(x0, y1, z1)),
        Line::from_points(p(x1, y0, z0), p(x1, y0, z1)),
        Line::from_points(p(x1, y1, z0), p(x1, y1, z1)),
        Line::from_points(p(x0, y0, z0), p(x0, y1, z0)),
        Line::from_points(p(x0, y0, z1), p(x0, y1, z1)),
        Line::from_points(p(x1, y0, z0), p(x1, y1, z0)),
        Line::from_points(p(x1, y0, z1), p(x1, y1, z1)),
        Line::from_points(p(x0, y0, z0), p(x1, y0, z0)),
        Line::from_points(p(x0, y1, z0), p(x1, y1, z0)),
        Line::from_points(p(x0, y0, z1), p(x1, y0, z1)),
        Line::from_points(p(x0, y1, z1), p(x1, y1, z1)),
    ])
}

/// A unit sphere triangulated along latitude/longitude lines, with UVs.
///
/// Steps are in degrees and should divide 180 and 360 respectively.
pub fn lat_lng_sphere(lat_step: i64, lng_step: i64) -> Mesh {
    let mut triangles = Vec::new();
    let mut lat0 = -90;
    while lat0 < 90 {
        let lat1 = lat0 + lat_step;
        let v0 = (lat0 + 90) as f64 / 180.0;
        let v1 = (lat1 + 90) as f64 / 180.0;
        let mut lng0 = -180;
        while lng0 < 180 {
            let lng1 = lng0 + lng_step;
            let u0 = (lng0 + 180) as f64 / 360.0;
            let u1 = (lng1 + 180) as f64 / 360.0;
            let lng1 = if lng1 >= 180 { lng1 - 360 } else { lng1 };
            let p00 = lat_lng_to_xyz(lat0 as f64, lng0 as f64);
            let p01 = lat_lng_to_xyz(lat0 as f64, lng1 as f64);
            let p10 = lat_lng_to_xyz(lat1 as f64, lng0 as f64);
            let p11 = lat_lng_to_xyz(lat1 as f64, lng1 as f64);
            if lat0 != -90 {
                let mut t = Triangle::from_points(p00, p01, p11);
                t.v1.texcoord = Vector3::new(u0, v0, 0.0);
                t.v2.texcoord = Vector3::new(u1, v0, 0.0);
                t.v3.texcoord = Vector3::new(u1, v1, 0.0);
                triangles.push(t);
            }
            if lat1 != 90 {
                let mut t = Triangle::from_points(p00, p11, p10);
                t.v1.texcoord = Vector3::new(u0, v0, 0.0);
                t.v2.texcoord = Vector3::new(u1, v1, 0.0);
                t.v3.texcoord = Vector3::new(u0, v1, 0.0);
                triangles.push(t);
            }
            lng0 += lng_step;
        }
        lat0 += lat_step;
    }
    Mesh::from_triangles(triangles)
}

/// A unit icosahedron.
pub fn icosahedron() -> Mesh {
    const A: f64 = 0.8506507174597755;
    const B: f64 = 0.5257312591858783;
    let v = [
        Vector3::new(-A, -B, 0.0),
        Vector3::new(-A, B, 0.0),
        Vector3::new(-B, 0.0, -A),
        Vector3::new(-B, 0.0, A),
        Vector3::new(0.0, -A, -B),
        Vector3::new(0.0, -A, B),
        Vector3::new(0.0, A, -B),
        Vector3::new(0.0, A, B),
        Vector3::new(B, 0.0, -A),
        Vector3::new(B, 0.0, A),
        Vector3::new(A, -B, 0.0),
        Vector3::new(A, B, 0.0),
    ];
    let indices = [
        [0, 3, 1],
        [1, 3, 7],
        [2, 0, 1],
        [2, 1, 6],
        [4, 0, 2],
        [4, 5, 0],
        [5, 3, 0],
        [6, 1, 7],
        [6, 7, 11],
        [7, 3, 9],
        [8, 2, 6],
        [8, 4, 2],
        [8, 6, 11],
        [8, 10, 4],
        [8, 11, 10],
        [9, 3, 5],
        [10, 5, 4],
        [10, 9, 5],
        [11, 7, 9],
        [11, 9, 10],
    ];
    Mesh::from_triangles(
        indices
            .iter()
            .map(|&[a, b, c]| Triangle::from_points(v[a], v[b], v[c]))
            .collect(),
    )
}

/// A unit sphere from `detail` rounds of icosahedron subdivision.
pub fn sphere(detail: usize) -> Mesh {
    let mut triangles = Vec::new();
    for t in icosahedron().triangles {
        subdivide_sphere(detail, t.v1.position, t.v2.position, t.v3.position, &mut triangles);
    }
    Mesh::from_triangles(triangles)
}

fn subdivide_sphere(
    detail: usize,
    v1: Vector3<f64>,
    v2: Vector3<f64>,
    v3: Vector3<f64>,
    out: &mut Vec<Triangle>,
) {
    if detail == 0 {
        out.push(Triangle::from_points(v1, v2, v3));
        return;
    }
    let v12 = ((v1 + v2) / 2.0).normalize();
    let v13 = ((v1 + v3) / 2.0).normalize();
    let v23 = ((v2 + v3) / 2.0).normalize();
    subdivide_sphere(detail - 1, v1, v12, v13, out);
    subdivide_sphere(detail - 1, v2, v23, v12, out);
    subdivide_sphere(detail - 1, v3, v13, v23, out);
    subdivide_sphere(detail - 1, v12, v23, v13, out);
}

/// A cylinder of radius 1 along the z axis, spanning `z` in `[-0.5, 0.5]`.
pub fn cylinder(step: i64, capped: bool) -> Mesh {
    let mut triangles = Vec::new();
    let mut a0 = 0;
    while a0 < 360 {
        let a1 = (a0 + step) % 360;
        let r0 = radians(a0 as f64);
        let r1 = radians(a1 as f64);
        let (x0, y0) = (r0.cos(), r0.sin());
        let (x1, y1) = (r1.cos(), r1.sin());
        let p00 = Vector3::new(x0, y0, -0.5);
        let p10 = Vector3::new(x1, y1, -0.5);
        let p11 = Vector3::new(x1, y1, 0.5);
        let p01 = Vector3::new(x0, y0, 0.5);
        triangles.push(Triangle::from_points(p00, p10, p11));
        triangles.push(Triangle::from_points(p00, p11, p01));
        if capped {
            let p0 = Vector3::new(0.0, 0.0, -0.5);
            let p1 = Vector3::new(0.0, 0.0, 0.5);
            triangles.push(Triangle::from_points(p0, p10, p00));
            triangles.push(Triangle::from_points(p1, p01, p11));
        }
        a0 += step;
    }
    Mesh::from_triangles(triangles)
}

/// A cone of radius 1 with its apex at `z = 0.5`.
pub fn cone(step: i64, capped: bool) -> Mesh {
    let mut triangles = Vec::new();
    let mut a0 = 0;
    while a0 < 360 {
        let a1 = (a0 + step) % 360;
        let r0 = radians(a0 as f64);
        let r1 = radians(a1 as f64);
        let (x0, y0) = (r0.cos(), r0.sin());
        let (x1, y1) = (r1.cos(), r1.sin());
        let p00 = Vector3::new(x0, y0, -0.5);
        let p10 = Vector3::new(x1, y1, -0.5);
        let apex = Vector3::new(0.0, 0.0, 0.5);
        triangles.push(Triangle::from_points(p00, p10, apex));
        if capped {
            let p0 = Vector3::new(0.0, 0.0, -0.5);
            triangles.push(Triangle::from_points(p0, p10, p00));
        }
        a0 += step;
    }
    Mesh::from_triangles(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_spans_the_half_unit_box() {
        let c = cube();
        assert_eq!(c.triangles.len(), 12);
        let b = c.bounding_box();
        assert_eq!(b.min, Vector3::new(-0.5, -0.5, -0.5));
        assert_eq!(b.max, Vector3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn cube_winding_points_outward() {
        for t in cube().triangles {
            let n = t.normal();
            let c = (t.v1.position + t.v2.position + t.v3.position) / 3.0;
            assert!(n.dot(&c) > 0.0, "inward face at {:?}", c);
        }
    }

    #[test]
    fn cube_for_box_fills_it() {
        let target = Aabb::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(3.0, 5.0, 4.0));
        let b = cube_for_box(&target).bounding_box();
        assert!((b.min - target.min).norm() < 1e-9);
        assert!((b.max - target.max).norm() < 1e-9);
    }

    #[test]
    fn spheres_sit_on_the_unit_ball() {
        for mesh in [sphere(1), lat_lng_sphere(30, 30)] {
            assert!(!mesh.triangles.is_empty());
            for t in &mesh.triangles {
                for v in [&t.v1, &t.v2, &t.v3] {
                    assert!((v.position.norm() - 1.0).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn lat_lng_sphere_has_wrapped_uvs() {
        let mesh = lat_lng_sphere(30, 30);
        for t in &mesh.triangles {
            for v in [&t.v1, &t.v2, &t.v3] {
                assert!((0.0..=1.0).contains(&v.texcoord.x));
                assert!((0.0..=1.0).contains(&v.texcoord.y));
            }
        }
    }

    #[test]
    fn cylinder_and_cone_triangle_counts() {
        assert_eq!(cylinder(30, false).triangles.len(), 24);
        assert_eq!(cylinder(30, true).triangles.len(), 48);
        assert_eq!(cone(30, false).triangles.len(), 12);
        assert_eq!(cone(30, true).triangles.len(), 24);
        assert_eq!(icosahedron().triangles.len(), 20);
    }

    #[test]
    fn outline_has_twelve_edges() {
        let b = Aabb::new(Vector3::zeros(), Vector3::new(1.0, 1.0, 1.0));
        let outline = cube_outline_for_box(&b);
        assert_eq!(outline.lines.len(), 12);
        assert!(outline.triangles.is_empty());
    }
}
