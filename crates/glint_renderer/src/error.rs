//! Error types for the render pipeline.
//!
//! Geometric and radiometric edge cases are handled locally by clamping
//! or substitution; these errors cover the only hard failures, invalid
//! configuration and sink I/O.

use thiserror::Error;

/// Camera configuration rejected before rendering begins.
#[derive(Debug, Error, PartialEq)]
pub enum CameraConfigError {
    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("image width must be at least 1 pixel")]
    ZeroImageWidth,

    #[error("samples per pixel must be at least 1")]
    ZeroSamplesPerPixel,

    #[error("vertical field of view must lie strictly between 0 and 180 degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("look_from and look_at coincide; the view direction is undefined")]
    DegenerateViewDirection,

    #[error("vup is parallel to the view direction; the camera basis is undefined")]
    DegenerateUpVector,
}

/// Failure while rendering an image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid camera configuration: {0}")]
    Config(#[from] CameraConfigError),

    #[error("failed to write to the image sink: {0}")]
    Io(#[from] std::io::Error),
}
