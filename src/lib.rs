//! A CPU-only software rasterizer.
//!
//! Triangle meshes and line primitives are rendered into a pixel buffer
//! with a depth buffer, through a programmable vertex/fragment shader
//! pair and a caller-supplied model-view-projection transform. The
//! pipeline clips against the canonical view volume, performs the
//! perspective divide and viewport mapping, and rasterizes with
//! perspective-correct attribute interpolation; batched draw calls fan
//! out across worker threads with tile-locked depth/color commits.
//!
//! ```no_run
//! use nalgebra::Vector3;
//! use softraster::math::orthographic;
//! use softraster::{Color, Context, SolidColorShader, Triangle};
//!
//! let mut context = Context::new(256, 256);
//! context.state.clear_color = Color::BLACK;
//! context.clear_color_buffer();
//! context.bind_shader(SolidColorShader::new(
//!     orthographic(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0),
//!     Color::new(1.0, 0.0, 0.0, 1.0),
//! ));
//! let triangle = Triangle::from_points(
//!     Vector3::new(-1.0, -1.0, 0.0),
//!     Vector3::new(1.0, -1.0, 0.0),
//!     Vector3::new(0.0, 1.0, 0.0),
//! );
//! let stats = context.draw_triangle(&triangle);
//! println!("wrote {} pixels", stats.updated_pixels);
//! ```

pub mod clip;
pub mod color;
pub mod context;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod math;
pub mod raster;
pub mod shader;
pub mod texture;

mod parallel;

pub use self::color::Color;
pub use self::context::{Context, CullMode, FaceWinding, RenderState};
pub use self::error::{RenderError, RenderResult};
pub use self::framebuffer::{NrgbaBuffer, PixelBuffer};
pub use self::geometry::{Line, Mesh, Triangle, Vertex};
pub use self::math::{Aabb, HomogeneousExt, Transform, VectorExt};
pub use self::raster::RasterStats;
pub use self::shader::{
    DiffuseShader, Fragment, PhongShader, Shader, SolidColorShader, TextureShader,
};
pub use self::texture::{Texture, TextureBuffer};
