//! Camera configuration and the render pipeline.

use crate::{gen_f32, ppm, ray_color, CameraConfigError, Hittable, Ray, RenderError};
use glint_math::{Color, Point3, Vec3};
use rand::RngCore;
use std::io::Write;

/// Camera configuration.
///
/// All fields have defaults and can be set independently; derived view
/// state is computed once per render invocation and never recomputed
/// mid-render.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Ratio of image width over height
    pub aspect_ratio: f32,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Count of random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into the scene
    pub max_depth: u32,
    /// Vertical view angle (field of view) in degrees
    pub vfov: f32,
    /// Point the camera is looking from
    pub look_from: Point3,
    /// Point the camera is looking at
    pub look_at: Point3,
    /// Camera-relative up direction
    pub vup: Vec3,
}

impl Camera {
    /// Create a camera with default settings.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            look_from: Point3::new(0.0, 0.0, 0.0),
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
        }
    }

    /// Set image shape.
    pub fn with_image(mut self, aspect_ratio: f32, image_width: u32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self.image_width = image_width;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_vfov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// Render the scene to the given sink as a P3 PPM stream.
    ///
    /// Validates the configuration, derives the view frame once, then
    /// walks pixels row-major top-to-bottom, averaging
    /// `samples_per_pixel` jittered rays per pixel.
    pub fn render(
        &self,
        world: &dyn Hittable,
        rng: &mut dyn RngCore,
        out: &mut dyn Write,
    ) -> Result<(), RenderError> {
        let frame = self.initialize()?;

        log::info!(
            "rendering {}x{} at {} spp, depth {}",
            frame.image_width,
            frame.image_height,
            self.samples_per_pixel,
            self.max_depth
        );

        ppm::write_header(out, frame.image_width, frame.image_height)?;

        for j in 0..frame.image_height {
            log::debug!("scanlines remaining: {}", frame.image_height - j);
            for i in 0..frame.image_width {
                let mut pixel_color = Color::ZERO;
                for _ in 0..self.samples_per_pixel {
                    let ray = frame.get_ray(i, j, rng);
                    pixel_color += ray_color(&ray, world, self.max_depth, rng);
                }
                ppm::write_color(out, frame.pixel_samples_scale * pixel_color)?;
            }
        }

        log::info!("render done");
        Ok(())
    }

    /// Validate the configuration and compute the derived view frame.
    pub(crate) fn initialize(&self) -> Result<ViewFrame, CameraConfigError> {
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(CameraConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.image_width == 0 {
            return Err(CameraConfigError::ZeroImageWidth);
        }
        if self.samples_per_pixel == 0 {
            return Err(CameraConfigError::ZeroSamplesPerPixel);
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(CameraConfigError::InvalidFieldOfView(self.vfov));
        }

        let view = self.look_from - self.look_at;
        if view.length_squared() < 1e-12 {
            return Err(CameraConfigError::DegenerateViewDirection);
        }

        // Camera basis: w points back, u right, v up
        let w = view.normalize();
        let cross = self.vup.cross(w);
        if cross.length_squared() < 1e-12 {
            return Err(CameraConfigError::DegenerateUpVector);
        }
        let u = cross.normalize();
        let v = w.cross(u);

        let image_height = ((self.image_width as f32 / self.aspect_ratio) as u32).max(1);

        // Viewport dimensions from the vertical field of view at the
        // focal distance
        let focal_length = view.length();
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * focal_length;
        let viewport_width = viewport_height * (self.image_width as f32 / image_height as f32);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;

        let pixel_delta_u = viewport_u / self.image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let center = self.look_from;
        let viewport_upper_left = center - focal_length * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        Ok(ViewFrame {
            image_width: self.image_width,
            image_height,
            pixel_samples_scale: 1.0 / self.samples_per_pixel as f32,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Derived view state, cached for the duration of one render.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ViewFrame {
    pub(crate) image_width: u32,
    pub(crate) image_height: u32,
    pub(crate) pixel_samples_scale: f32,
    pub(crate) center: Point3,
    pub(crate) pixel00_loc: Point3,
    pub(crate) pixel_delta_u: Vec3,
    pub(crate) pixel_delta_v: Vec3,
}

impl ViewFrame {
    /// Construct a camera ray toward a random point in the unit square
    /// around pixel (i, j).
    pub(crate) fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + (i as f32 + offset.x) * self.pixel_delta_u
            + (j as f32 + offset.y) * self.pixel_delta_v;

        Ray::new(self.center, pixel_sample - self.center)
    }
}

/// Sample a random point in the [-0.5, 0.5] x [-0.5, 0.5] unit square.
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Lambertian, Sphere};
    use glint_math::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    #[test]
    fn test_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.aspect_ratio, 1.0);
        assert_eq!(camera.image_width, 100);
        assert_eq!(camera.samples_per_pixel, 10);
        assert_eq!(camera.vfov, 90.0);
    }

    #[test]
    fn test_config_validation() {
        let base = Camera::new();

        assert_eq!(
            base.clone().with_image(0.0, 100).initialize().unwrap_err(),
            CameraConfigError::InvalidAspectRatio(0.0)
        );
        assert_eq!(
            base.clone().with_image(1.0, 0).initialize().unwrap_err(),
            CameraConfigError::ZeroImageWidth
        );
        assert_eq!(
            base.clone().with_quality(0, 10).initialize().unwrap_err(),
            CameraConfigError::ZeroSamplesPerPixel
        );
        assert_eq!(
            base.clone().with_vfov(180.0).initialize().unwrap_err(),
            CameraConfigError::InvalidFieldOfView(180.0)
        );
        assert_eq!(
            base.clone().with_vfov(-10.0).initialize().unwrap_err(),
            CameraConfigError::InvalidFieldOfView(-10.0)
        );
    }

    #[test]
    fn test_degenerate_view_rejected() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let camera = Camera::new().with_position(p, p, Vec3::Y);
        assert_eq!(
            camera.initialize().unwrap_err(),
            CameraConfigError::DegenerateViewDirection
        );
    }

    #[test]
    fn test_parallel_vup_rejected() {
        // Looking straight down with vup along the view direction
        let camera = Camera::new().with_position(
            Point3::new(0.0, 5.0, 0.0),
            Point3::ZERO,
            Vec3::new(0.0, -1.0, 0.0),
        );
        assert_eq!(
            camera.initialize().unwrap_err(),
            CameraConfigError::DegenerateUpVector
        );
    }

    #[test]
    fn test_image_height_has_floor_of_one() {
        let frame = Camera::new().with_image(100.0, 10).initialize().unwrap();
        assert_eq!(frame.image_height, 1);
    }

    #[test]
    fn test_frame_geometry() {
        // Camera at origin looking down -z with 90 degree fov and a
        // focal length of 1: viewport spans [-1, 1] in both axes
        let frame = Camera::new().with_image(1.0, 10).initialize().unwrap();

        assert_eq!(frame.image_height, 10);
        assert_eq!(frame.center, Point3::ZERO);
        assert!((frame.pixel_delta_u - Vec3::new(0.2, 0.0, 0.0)).length() < 1e-5);
        assert!((frame.pixel_delta_v - Vec3::new(0.0, -0.2, 0.0)).length() < 1e-5);
        assert!((frame.pixel00_loc - Point3::new(-0.9, 0.9, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let frame = Camera::new().with_image(1.0, 11).initialize().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        // Rays through the middle pixel point roughly down -z; the
        // jitter stays within one pixel
        let ray = frame.get_ray(5, 5, &mut rng);
        let dir = ray.direction().normalize();
        assert!(dir.z < -0.9);
        assert!(dir.x.abs() < 0.2);
        assert!(dir.y.abs() < 0.2);
    }

    #[test]
    fn test_samples_scale() {
        let frame = Camera::new().with_quality(8, 10).initialize().unwrap();
        assert_eq!(frame.pixel_samples_scale, 0.125);
    }

    fn parse_ppm(bytes: &[u8]) -> (u32, u32, Vec<u32>) {
        let text = std::str::from_utf8(bytes).unwrap();
        let mut tokens = text.split_ascii_whitespace();
        assert_eq!(tokens.next(), Some("P3"));
        let width: u32 = tokens.next().unwrap().parse().unwrap();
        let height: u32 = tokens.next().unwrap().parse().unwrap();
        assert_eq!(tokens.next(), Some("255"));
        let values: Vec<u32> = tokens.map(|t| t.parse().unwrap()).collect();
        (width, height, values)
    }

    #[test]
    fn test_render_stream_shape() {
        let world = HittableList::new();
        let camera = Camera::new().with_image(2.0, 8).with_quality(1, 4);
        let mut rng = StdRng::seed_from_u64(1);
        let mut out = Vec::new();

        camera.render(&world, &mut rng, &mut out).unwrap();

        let (width, height, values) = parse_ppm(&out);
        assert_eq!((width, height), (8, 4));
        assert_eq!(values.len() as u32, width * height * 3);
        assert!(values.iter().all(|&v| v <= 255));
    }

    #[test]
    fn test_render_single_sphere_scene() {
        // Sphere of radius 0.5 at (0,0,-1), camera at the origin with a
        // 90 degree fov: the silhouette covers the image center and the
        // background gradient fills the corners, bluer at the top
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Point3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
        )));

        let camera = Camera::new().with_image(1.0, 21).with_quality(1, 2);
        let mut rng = StdRng::seed_from_u64(7);
        let mut out = Vec::new();
        camera.render(&world, &mut rng, &mut out).unwrap();

        let (width, height, values) = parse_ppm(&out);
        let pixel = |x: u32, y: u32| {
            let base = ((y * width + x) * 3) as usize;
            (values[base], values[base + 1], values[base + 2])
        };

        // Top row is the blue-biased end of the gradient, bottom row
        // the white-biased end
        let (top_r, _, top_b) = pixel(width / 2, 0);
        let (bottom_r, _, bottom_b) = pixel(width / 2, height - 1);
        assert!(top_r < bottom_r);
        assert!(top_b >= top_r);
        assert!(bottom_b >= bottom_r);

        // The center pixel hits the sphere and is darker than the sky
        let (center_r, center_g, center_b) = pixel(width / 2, height / 2);
        let center_sum = center_r + center_g + center_b;
        let corner = pixel(0, 0);
        let corner_sum = corner.0 + corner.1 + corner.2;
        assert!(center_sum < corner_sum);
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let world = HittableList::new();
        let camera = Camera::new().with_quality(0, 4);
        let mut rng = StdRng::seed_from_u64(1);
        let mut out = Vec::new();

        let err = camera.render(&world, &mut rng, &mut out).unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
        assert!(out.is_empty());
    }
}
