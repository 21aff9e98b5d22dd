//! Renders a Phong-lit cube to `cube.png`.
//!
//! Run with `cargo run --example spinning_cube --features image_compat`.

use nalgebra::Vector3;

use softraster::geometry::shapes;
use softraster::math::{look_at, perspective, rotate};
use softraster::{Color, Context, PhongShader};

fn main() {
    env_logger::init();

    let mut mesh = shapes::cube();
    mesh.transform(&rotate(Vector3::new(0.0, 1.0, 0.0), 0.6));

    let eye = Vector3::new(1.6, 1.2, 1.6);
    let center = Vector3::new(0.0, 0.0, 0.0);
    let up = Vector3::new(0.0, 1.0, 0.0);
    let matrix =
        perspective(50.0, 1.0, 0.5, 10.0) * look_at(eye, center, up);

    let mut shader = PhongShader::new(
        matrix,
        Vector3::new(0.6, 1.0, 0.8).normalize(),
        eye,
    );
    shader.object_color = Some(Color::hex("#468966"));

    let mut context = Context::new(800, 800);
    context.state.clear_color = Color::gray(0.1);
    context.clear_color_buffer();
    context.bind_shader(shader);

    let stats = context.draw_mesh(&mesh);
    println!(
        "considered {} fragments, wrote {}",
        stats.total_pixels, stats.updated_pixels
    );

    context.buffer().save_png("cube.png").expect("failed to write cube.png");
}
