//! Plain-text PPM (P3) output sink.

use glint_math::{Color, Interval};
use std::io::{self, Write};

/// Channel values are clamped to [0, 1] before scaling; accumulated
/// samples on bright pixels can overshoot
const INTENSITY: Interval = Interval { min: 0.0, max: 1.0 };

/// Write the P3 header for an image of the given dimensions.
pub fn write_header(out: &mut dyn Write, width: u32, height: u32) -> io::Result<()> {
    write!(out, "P3\n{} {}\n255\n", width, height)
}

/// Write one pixel as an "R G B" line of integers in [0, 255].
///
/// Scaling is linear; no gamma correction is applied.
pub fn write_color(out: &mut dyn Write, color: Color) -> io::Result<()> {
    let r = (255.0 * INTENSITY.clamp(color.x)) as u32;
    let g = (255.0 * INTENSITY.clamp(color.y)) as u32;
    let b = (255.0 * INTENSITY.clamp(color.z)) as u32;

    writeln!(out, "{} {} {}", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_format() {
        let mut out = Vec::new();
        write_header(&mut out, 256, 144).unwrap();
        assert_eq!(out, b"P3\n256 144\n255\n");
    }

    #[test]
    fn test_color_scaling() {
        let mut out = Vec::new();
        write_color(&mut out, Color::new(0.0, 0.5, 1.0)).unwrap();
        assert_eq!(out, b"0 127 255\n");
    }

    #[test]
    fn test_out_of_range_channels_clamped() {
        let mut out = Vec::new();
        write_color(&mut out, Color::new(2.0, -1.0, 0.25)).unwrap();
        assert_eq!(out, b"255 0 63\n");
    }
}
