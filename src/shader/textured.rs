//! Unlit textured shading.

use std::sync::Arc;

use nalgebra::Matrix4;

use crate::geometry::Vertex;
use crate::math::Transform;
use crate::texture::Texture;

use super::{Fragment, Shader};

/// Samples a texture with the interpolated UV, with no lighting.
///
/// Fragment alpha comes from the texture sample.
#[derive(Clone)]
pub struct TextureShader {
    pub matrix: Matrix4<f64>,
    pub texture: Arc<dyn Texture>,
}

impl TextureShader {
    pub fn new(matrix: Matrix4<f64>, texture: Arc<dyn Texture>) -> TextureShader {
        TextureShader { matrix, texture }
    }
}

impl Shader for TextureShader {
    fn vertex(&self, mut vertex: Vertex) -> Vertex {
        vertex.output = self.matrix.mul_position_w(vertex.position);
        vertex
    }

    fn fragment(&self, vertex: &Vertex) -> Fragment {
        Fragment::Color(
            self.texture
                .bilinear_sample(vertex.texcoord.x, vertex.texcoord.y),
        )
    }
}
