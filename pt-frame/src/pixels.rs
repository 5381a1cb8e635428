//! This module handles the [`PixelGrid`], the fixed-size image sample that the particles copy
//! their colours from.

use crate::Colour;
use glam::Vec3;
use std::fmt;

/// The width and height of a sampled image.
pub const SAMPLE_SIZE: usize = 100;

/// The number of pixels in a sampled image.
pub const SAMPLE_PIXELS: usize = SAMPLE_SIZE * SAMPLE_SIZE;

/// A [`SAMPLE_SIZE`] by [`SAMPLE_SIZE`] grid of RGBA pixels, stored row by row from the top left
/// with each channel normalised to `[0, 1]`.
#[derive(Clone, PartialEq)]
pub struct PixelGrid {
    /// The flattened RGBA data. Always `SAMPLE_PIXELS * 4` long.
    data: Vec<f32>,
}

impl fmt::Debug for PixelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelGrid")
            .field("size", &SAMPLE_SIZE)
            .finish()
    }
}

impl PixelGrid {
    /// Create a grid from raw 8-bit RGBA bytes. Return `None` if there aren't exactly
    /// `SAMPLE_PIXELS * 4` bytes.
    pub fn from_rgba_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != SAMPLE_PIXELS * 4 {
            return None;
        }

        Some(Self {
            data: bytes.iter().map(|&byte| f32::from(byte) / 255.).collect(),
        })
    }

    /// Create a grid by calling the given function with the `(x, y)` coordinates of every pixel.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> [f32; 4]) -> Self {
        let mut data = Vec::with_capacity(SAMPLE_PIXELS * 4);
        for y in 0..SAMPLE_SIZE {
            for x in 0..SAMPLE_SIZE {
                data.extend(f(x, y));
            }
        }

        Self { data }
    }

    /// Get the RGBA channels of the pixel at the given index. Indices wrap around, so any index
    /// is valid.
    pub fn pixel(&self, index: usize) -> [f32; 4] {
        let start = (index % SAMPLE_PIXELS) * 4;
        [
            self.data[start],
            self.data[start + 1],
            self.data[start + 2],
            self.data[start + 3],
        ]
    }

    /// Get the colour of the pixel at the given index, ignoring alpha. Indices wrap around.
    pub fn colour(&self, index: usize) -> Colour {
        let [r, g, b, _] = self.pixel(index);
        Vec3::new(r, g, b)
    }

    /// The flattened RGBA data.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba_bytes_test() {
        assert_eq!(PixelGrid::from_rgba_bytes(&[0; 12]), None);

        let mut bytes = vec![0u8; SAMPLE_PIXELS * 4];
        bytes[4..8].copy_from_slice(&[255, 51, 0, 255]);
        let grid = PixelGrid::from_rgba_bytes(&bytes).unwrap();

        assert_eq!(grid.pixel(1), [1., 0.2, 0., 1.]);
        assert_eq!(grid.pixel(SAMPLE_PIXELS + 1), [1., 0.2, 0., 1.]);
        assert_eq!(grid.colour(0), Vec3::ZERO);
        assert_eq!(grid.as_slice().len(), SAMPLE_PIXELS * 4);
    }

    #[test]
    fn from_fn_is_row_major() {
        let grid = PixelGrid::from_fn(|x, y| [x as f32 / 99., y as f32 / 99., 0., 1.]);

        assert_eq!(grid.colour(0), Vec3::ZERO);
        assert_eq!(grid.colour(99), Vec3::new(1., 0., 0.));
        assert_eq!(grid.colour(SAMPLE_PIXELS - 100), Vec3::new(0., 1., 0.));
    }

    #[test]
    fn debug_output_skips_the_pixels() {
        let grid = PixelGrid::from_fn(|_, _| [0.5; 4]);
        assert_eq!(format!("{grid:?}"), "PixelGrid { size: 100 }");
    }
}
