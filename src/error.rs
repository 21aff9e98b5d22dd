//! Error types for the fallible edges of the crate.
//!
//! The rendering pipeline itself is total: draw calls cannot fail. Errors
//! only arise at the I/O boundary (texture decoding, image export), all of
//! which lives behind the `image_compat` feature.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "image_compat")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;
