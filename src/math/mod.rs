//! `f64` linear algebra for the rendering pipeline.
//!
//! The vector and matrix types are nalgebra's; the traits and free
//! functions here add the operations a rasterizer needs on top of them,
//! with this renderer's conventions (row-vector-free right multiplication,
//! y-down screen space, z mapped to `[0, 1]`).

pub mod bounds;
pub mod matrix;
pub mod vector;

pub use self::bounds::Aabb;
pub use self::matrix::{
    frustum, look_at, look_at_direction, orthographic, perspective, rotate, rotate_to, scale,
    screen, translate, viewport, Transform,
};
pub use self::vector::{HomogeneousExt, VectorExt};

use std::f64::consts::PI;

use nalgebra::Vector3;

/// Converts degrees to radians.
#[inline]
pub fn radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Converts radians to degrees.
#[inline]
pub fn degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// A point on the unit sphere from latitude/longitude in degrees.
pub fn lat_lng_to_xyz(lat: f64, lng: f64) -> Vector3<f64> {
    let (lat, lng) = (radians(lat), radians(lng));
    Vector3::new(lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin())
}
