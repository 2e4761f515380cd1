use anyhow::Result;
use clap::Parser;
use glint_math::{Color, Point3, Vec3};
use glint_renderer::{Camera, Dielectric, HittableList, Lambertian, Metal, Sphere};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "glint", about = "Sequential CPU ray tracer")]
struct Args {
    /// Rendered image width in pixels
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Random samples per pixel
    #[arg(long, default_value_t = 100)]
    samples: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value_t = 50)]
    max_depth: u32,

    /// Seed for the sampling generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output PPM file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Ground plane sphere plus a diffuse, a glass, and a fuzzy metal sphere.
fn build_scene() -> HittableList {
    let ground = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass = Arc::new(Dielectric::new(1.5));
    let metal = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, -100.5, -1.0),
        100.0,
        ground,
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, 0.0, -1.2),
        0.5,
        center,
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(-1.0, 0.0, -1.0),
        0.5,
        glass,
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(1.0, 0.0, -1.0),
        0.5,
        metal,
    )));
    world
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let world = build_scene();
    let camera = Camera::new()
        .with_image(16.0 / 9.0, args.width)
        .with_quality(args.samples, args.max_depth)
        .with_position(
            Point3::new(-2.0, 2.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .with_vfov(20.0);

    let mut rng = StdRng::seed_from_u64(args.seed);

    match &args.output {
        Some(path) => {
            log::info!("writing {}", path.display());
            let mut out = BufWriter::new(File::create(path)?);
            camera.render(&world, &mut rng, &mut out)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            camera.render(&world, &mut rng, &mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}
