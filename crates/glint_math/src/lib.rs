// Re-export glam for convenience
pub use glam::*;

mod interval;
pub use interval::Interval;

/// Position in 3D space. Alias over Vec3 for domain clarity.
pub type Point3 = Vec3;

/// RGB reflectance/radiance, nominally 0-1 per channel but unclamped
/// until output.
pub type Color = Vec3;
