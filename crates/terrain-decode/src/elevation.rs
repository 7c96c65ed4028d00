//! Terrain-RGB elevation decoding.
//!
//! Elevation tiles pack a 24-bit integer across the red, green and blue
//! channels. The integer counts tenths of a meter above -10000 m:
//!
//! ```text
//! elevation = -10000 + (r * 256 * 256 + g * 256 + b) * 0.1
//! ```
//!
//! The constants are part of the tile format and must not be tuned.

use image::RgbaImage;

use crate::error::{DecodeError, DecodeResult};

/// Decode one pixel with channels normalized to `[0, 1]`.
///
/// The arithmetic runs in `f32` in the same order as a texture sampler based
/// decoder, so results match bit for bit.
#[must_use]
pub fn decode_pixel(r: f32, g: f32, b: f32) -> f32 {
    -10000.0 + (r * 255.0 * 256.0 * 256.0 + g * 255.0 * 256.0 + b * 255.0) * 0.1
}

/// Decode one pixel from raw 8-bit channels.
#[must_use]
pub fn decode_rgb8(r: u8, g: u8, b: u8) -> f32 {
    decode_pixel(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    )
}

/// Row-major grid of elevations in meters.
///
/// Row 0 is the top (northern) row of the source raster.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl ElevationGrid {
    /// Wrap a sample buffer, checking that it covers `width * height` cells.
    pub fn new(width: u32, height: u32, samples: Vec<f32>) -> DecodeResult<Self> {
        if samples.len() != width as usize * height as usize {
            return Err(DecodeError::GridSizeMismatch {
                width,
                height,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Decode every pixel of a terrain-RGB raster. Alpha is ignored.
    #[must_use]
    pub fn from_rgba(image: &RgbaImage) -> Self {
        let samples = image
            .pixels()
            .map(|p| decode_rgb8(p[0], p[1], p[2]))
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            samples,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Elevation at column `x`, row `y`, if inside the grid.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Lowest and highest elevation, or `None` for an empty grid.
    #[must_use]
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut iter = self.samples.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), e| (lo.min(e), hi.max(e))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn black_is_base_elevation() {
        assert!((decode_pixel(0.0, 0.0, 0.0) - -10000.0).abs() < f32::EPSILON);
        assert!((decode_rgb8(0, 0, 0) - -10000.0).abs() < f32::EPSILON);
    }

    #[test]
    fn white_is_max_elevation() {
        // -10000 + 16777215 * 0.1 rounded to f32.
        let top = decode_pixel(1.0, 1.0, 1.0);
        assert!((top - 1_667_721.5).abs() < 0.5, "got {top}");
        assert!((decode_rgb8(255, 255, 255) - top).abs() < 0.5);
    }

    #[test]
    fn sea_level() {
        // 100000 tenths of a meter = 0x01_86_A0.
        let sea = decode_rgb8(0x01, 0x86, 0xA0);
        assert!(sea.abs() < 0.01, "got {sea}");
    }

    #[test]
    fn monotonic_in_each_channel() {
        let mut last = decode_rgb8(0, 0, 0);
        for b in 1..=255u8 {
            let e = decode_rgb8(0, 0, b);
            assert!(e > last, "blue {b}: {e} <= {last}");
            last = e;
        }

        let mut last = decode_rgb8(0, 0, 0);
        for g in 1..=255u8 {
            let e = decode_rgb8(0, g, 0);
            assert!(e > last, "green {g}: {e} <= {last}");
            last = e;
        }

        let mut last = decode_rgb8(0, 0, 0);
        for r in 1..=255u8 {
            let e = decode_rgb8(r, 0, 0);
            assert!(e > last, "red {r}: {e} <= {last}");
            last = e;
        }
    }

    #[test]
    fn grid_rejects_wrong_sample_count() {
        let err = ElevationGrid::new(3, 2, vec![0.0; 5]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::GridSizeMismatch {
                width: 3,
                height: 2,
                actual: 5
            }
        ));
    }

    #[test]
    fn grid_from_rgba_is_row_major() {
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([0x01, 0x86, 0xA0, 255]));
        image.put_pixel(1, 0, Rgba([0x01, 0x86, 0xAA, 0]));
        image.put_pixel(0, 1, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 1, Rgba([0x01, 0x87, 0xA0, 255]));

        let grid = ElevationGrid::from_rgba(&image);
        assert_eq!((grid.width(), grid.height()), (2, 2));

        let at = |x, y| grid.get(x, y).unwrap();
        assert!(at(0, 0).abs() < 0.01);
        assert!((at(1, 0) - 1.0).abs() < 0.01);
        assert!((at(0, 1) - -10000.0).abs() < 0.01);
        assert!((at(1, 1) - 25.6).abs() < 0.01);
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn min_max() {
        let grid = ElevationGrid::new(2, 2, vec![3.0, -1.0, 7.5, 0.0]).unwrap();
        assert_eq!(grid.min_max(), Some((-1.0, 7.5)));
        assert_eq!(ElevationGrid::new(0, 0, Vec::new()).unwrap().min_max(), None);
    }
}
