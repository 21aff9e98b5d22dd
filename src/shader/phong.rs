//! Phong lighting with an optional texture.

use std::sync::Arc;

use nalgebra::{Matrix4, Vector3};

use crate::color::Color;
use crate::geometry::Vertex;
use crate::math::{Transform, VectorExt};
use crate::texture::Texture;

use super::{Fragment, Shader};

/// Ambient + diffuse + specular lighting against a single directional
/// light.
///
/// The lit surface color is taken from the texture when one is bound,
/// else from `object_color` when set, else from the interpolated vertex
/// color; its alpha survives the lighting multiply unchanged.
#[derive(Clone)]
pub struct PhongShader {
    pub matrix: Matrix4<f64>,
    /// Unit direction toward the light.
    pub light_direction: Vector3<f64>,
    pub camera_position: Vector3<f64>,
    /// Overrides the per-vertex color when set.
    pub object_color: Option<Color>,
    pub ambient_color: Color,
    pub diffuse_color: Color,
    pub specular_color: Color,
    pub specular_power: f64,
    pub texture: Option<Arc<dyn Texture>>,
}

impl PhongShader {
    pub fn new(
        matrix: Matrix4<f64>,
        light_direction: Vector3<f64>,
        camera_position: Vector3<f64>,
    ) -> PhongShader {
        PhongShader {
            matrix,
            light_direction,
            camera_position,
            object_color: None,
            ambient_color: Color::new(0.2, 0.2, 0.2, 1.0),
            diffuse_color: Color::new(0.8, 0.8, 0.8, 1.0),
            specular_color: Color::new(0.2, 0.2, 0.2, 1.0),
            specular_power: 32.0,
            texture: None,
        }
    }
}

impl Shader for PhongShader {
    fn vertex(&self, mut vertex: Vertex) -> Vertex {
        vertex.output = self.matrix.mul_position_w(vertex.position);
        vertex
    }

    fn fragment(&self, vertex: &Vertex) -> Fragment {
        let mut light = self.ambient_color;
        let diffuse = vertex.normal.dot(&self.light_direction).max(0.0);
        light = light + self.diffuse_color * diffuse;
        if diffuse > 0.0 && self.specular_power > 0.0 {
            let camera = (self.camera_position - vertex.position).normalize();
            let reflected = (-self.light_direction).reflect(&vertex.normal);
            let specular = camera.dot(&reflected).max(0.0);
            if specular > 0.0 {
                light = light + self.specular_color * specular.powf(self.specular_power);
            }
        }
        let light = light.min(&Color::WHITE);
        let color = match &self.texture {
            Some(texture) => texture.bilinear_sample(vertex.texcoord.x, vertex.texcoord.y),
            None => self.object_color.unwrap_or(vertex.color),
        };
        Fragment::Color((color * light).with_alpha(color.a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_vertex(normal: Vector3<f64>) -> Vertex {
        let mut v = Vertex::new(Vector3::zeros());
        v.normal = normal;
        v.color = Color::new(1.0, 1.0, 1.0, 0.5);
        v
    }

    #[test]
    fn facing_light_is_brighter_than_facing_away() {
        let light = Vector3::new(0.0, 0.0, 1.0);
        let shader = PhongShader::new(Matrix4::identity(), light, Vector3::new(0.0, 0.0, 5.0));
        let toward = match shader.fragment(&lit_vertex(light)) {
            Fragment::Color(c) => c,
            Fragment::Discard => panic!("phong never discards"),
        };
        let away = match shader.fragment(&lit_vertex(-light)) {
            Fragment::Color(c) => c,
            Fragment::Discard => panic!("phong never discards"),
        };
        assert!(toward.r > away.r);
        // facing away leaves only the ambient term
        assert!((away.r - 0.2).abs() < 1e-12);
    }

    #[test]
    fn alpha_comes_from_the_color_source() {
        let shader = PhongShader::new(
            Matrix4::identity(),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, 5.0),
        );
        match shader.fragment(&lit_vertex(Vector3::new(0.0, 0.0, 1.0))) {
            Fragment::Color(c) => assert_eq!(c.a, 0.5),
            Fragment::Discard => panic!("phong never discards"),
        }
    }

    #[test]
    fn light_clamps_to_white() {
        let mut shader = PhongShader::new(
            Matrix4::identity(),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, 5.0),
        );
        shader.ambient_color = Color::new(5.0, 5.0, 5.0, 1.0);
        shader.object_color = Some(Color::WHITE);
        match shader.fragment(&lit_vertex(Vector3::new(0.0, 0.0, 1.0))) {
            Fragment::Color(c) => {
                assert!(c.r <= 1.0 && c.g <= 1.0 && c.b <= 1.0);
            }
            Fragment::Discard => panic!("phong never discards"),
        }
    }
}
