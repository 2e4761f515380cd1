//! Sequential CPU ray tracer.
//!
//! Traces camera rays against a flat list of primitives, scattering off
//! materials recursively until the ray is absorbed, escapes to the sky,
//! or runs out of bounces. Output is a P3 PPM stream written to any
//! `io::Write` sink.

mod camera;
mod error;
mod hittable;
mod material;
mod ppm;
mod ray;
mod renderer;
mod sphere;

pub use camera::Camera;
pub use error::{CameraConfigError, RenderError};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, Scatter};
pub use ppm::{write_color, write_header};
pub use ray::Ray;
pub use renderer::{ray_color, sky_gradient};
pub use sphere::Sphere;

/// Re-export the math types used across the public API.
pub use glint_math::{Color, Interval, Point3, Vec3};

use rand::RngCore;

/// Generate a uniform f32 in [0, 1) from the top 24 bits of the generator.
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}
