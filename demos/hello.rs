//! Renders a color-ramp triangle and dumps coverage statistics.
//!
//! Run with `cargo run --example hello`.

use nalgebra::Vector3;

use softraster::math::orthographic;
use softraster::{Color, Context, Fragment, Shader, Transform, Triangle, Vertex};

/// Pass the interpolated per-vertex color straight through.
struct VertexColorShader {
    matrix: nalgebra::Matrix4<f64>,
}

impl Shader for VertexColorShader {
    fn vertex(&self, mut vertex: Vertex) -> Vertex {
        vertex.output = self.matrix.mul_position_w(vertex.position);
        vertex
    }

    fn fragment(&self, vertex: &Vertex) -> Fragment {
        Fragment::Color(vertex.color)
    }
}

fn main() {
    env_logger::init();

    let mut context = Context::new(512, 512);
    context.state.clear_color = Color::BLACK;
    context.clear_color_buffer();
    context.bind_shader(VertexColorShader {
        matrix: orthographic(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0),
    });

    let mut triangle = Triangle::from_points(
        Vector3::new(-0.9, -0.9, 0.0),
        Vector3::new(0.9, -0.9, 0.0),
        Vector3::new(0.0, 0.9, 0.0),
    );
    triangle.v1.color = Color::new(1.0, 0.0, 0.0, 1.0);
    triangle.v2.color = Color::new(0.0, 1.0, 0.0, 1.0);
    triangle.v3.color = Color::new(0.0, 0.0, 1.0, 1.0);

    let stats = context.draw_triangle(&triangle);
    println!(
        "considered {} fragments, wrote {}",
        stats.total_pixels, stats.updated_pixels
    );
}
