//! Constant-color shading.

use nalgebra::Matrix4;

use crate::color::Color;
use crate::geometry::Vertex;
use crate::math::Transform;

use super::{Fragment, Shader};

/// Renders every fragment with a single color.
#[derive(Debug, Clone)]
pub struct SolidColorShader {
    pub matrix: Matrix4<f64>,
    pub color: Color,
}

impl SolidColorShader {
    pub fn new(matrix: Matrix4<f64>, color: Color) -> SolidColorShader {
        SolidColorShader { matrix, color }
    }
}

impl Shader for SolidColorShader {
    fn vertex(&self, mut vertex: Vertex) -> Vertex {
        vertex.output = self.matrix.mul_position_w(vertex.position);
        vertex
    }

    fn fragment(&self, _vertex: &Vertex) -> Fragment {
        Fragment::Color(self.color)
    }
}
