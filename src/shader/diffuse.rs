//! Ambient + diffuse lighting, no specular term.

use nalgebra::{Matrix4, Vector3};

use crate::color::Color;
use crate::geometry::Vertex;
use crate::math::Transform;

use super::{Fragment, Shader};

/// Lambertian shading: `ambient + diffuse * max(N . L, 0)`.
#[derive(Debug, Clone)]
pub struct DiffuseShader {
    pub matrix: Matrix4<f64>,
    /// Unit direction toward the light.
    pub light_direction: Vector3<f64>,
    /// Overrides the per-vertex color when set.
    pub object_color: Option<Color>,
    pub ambient_color: Color,
    pub diffuse_color: Color,
}

impl DiffuseShader {
    pub fn new(matrix: Matrix4<f64>, light_direction: Vector3<f64>) -> DiffuseShader {
        DiffuseShader {
            matrix,
            light_direction,
            object_color: None,
            ambient_color: Color::new(0.2, 0.2, 0.2, 1.0),
            diffuse_color: Color::new(0.8, 0.8, 0.8, 1.0),
        }
    }
}

impl Shader for DiffuseShader {
    fn vertex(&self, mut vertex: Vertex) -> Vertex {
        vertex.output = self.matrix.mul_position_w(vertex.position);
        vertex
    }

    fn fragment(&self, vertex: &Vertex) -> Fragment {
        let diffuse = vertex.normal.dot(&self.light_direction).max(0.0);
        let light = (self.ambient_color + self.diffuse_color * diffuse).min(&Color::WHITE);
        let color = self.object_color.unwrap_or(vertex.color);
        Fragment::Color((color * light).with_alpha(color.a))
    }
}
