//! Recursive ray-color evaluation.
//!
//! The core radiometric simulation: trace the ray into the scene,
//! bounce off materials while multiplying attenuation, and fall back to
//! the sky gradient on a miss. All failure is encoded in values (black,
//! `None`), never raised.

use crate::{Hittable, Ray};
use glint_math::{Color, Interval};
use rand::RngCore;

/// Compute the color seen by a ray.
///
/// `depth` is the number of bounces still allowed; at zero no more
/// light is gathered and the result is black.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    // The 0.001 lower bound suppresses shadow acne: a bounced ray must
    // not re-hit the surface it just left due to floating point error
    if let Some(rec) = world.hit(ray, Interval::new(0.001, f32::INFINITY)) {
        return match rec.material.scatter(ray, &rec, rng) {
            Some(scatter) => {
                scatter.attenuation * ray_color(&scatter.scattered, world, depth - 1, rng)
            }
            // Absorbed
            None => Color::ZERO,
        };
    }

    sky_gradient(ray)
}

/// Vertical white-to-blue background gradient.
///
/// Blends on the ray's unit y component remapped from [-1, 1] to [0, 1].
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}
