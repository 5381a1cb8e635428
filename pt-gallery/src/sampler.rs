//! This module turns image files into [`PixelGrid`]s that the particles can copy their colours
//! from.

use image::imageops::FilterType;
use pt_frame::{PixelGrid, SAMPLE_PIXELS, SAMPLE_SIZE};
use std::path::Path;
use thiserror::Error;
use tracing::{instrument, trace};

/// An error encountered while sampling an image.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The file couldn't be read.
    #[error("Unable to read image file: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes weren't a supported image.
    #[error("Unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The blocking decode task panicked or was cancelled.
    #[error("Image decoding task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// The resampled image came out the wrong size.
    #[error("Resampled image had {0} bytes instead of {}", SAMPLE_PIXELS * 4)]
    WrongSize(usize),
}

/// Decode the given encoded image and scale it to exactly [`SAMPLE_SIZE`] by [`SAMPLE_SIZE`]
/// pixels, ignoring its aspect ratio.
pub fn sample_bytes(bytes: &[u8]) -> Result<PixelGrid, SampleError> {
    let image = image::load_from_memory(bytes)?;
    trace!(width = image.width(), height = image.height(), "Decoded image");

    let size = SAMPLE_SIZE as u32;
    let rgba = image.resize_exact(size, size, FilterType::Triangle).to_rgba8();
    let raw = rgba.as_raw();

    PixelGrid::from_rgba_bytes(raw).ok_or(SampleError::WrongSize(raw.len()))
}

/// Read the image file at the given path and sample it. The decoding happens on the blocking
/// thread pool.
#[instrument(skip_all, fields(path = ?path.as_ref()))]
pub async fn sample_image(path: impl AsRef<Path>) -> Result<PixelGrid, SampleError> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    tokio::task::spawn_blocking(move || sample_bytes(&bytes)).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    /// Encode an image as a PNG where the left half is red and the right half is blue.
    fn split_png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });

        let mut bytes = vec![];
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("Encoding a PNG in memory should work");
        bytes
    }

    #[test]
    fn sample_bytes_resizes_to_the_grid() {
        let pixels = sample_bytes(&split_png(640, 480)).expect("Sampling should work");
        assert_eq!(pixels.as_slice().len(), 100 * 100 * 4);
        assert!(pixels.as_slice().iter().all(|c| (0.0..=1.).contains(c)));

        // Top left is red and top right is blue, so the image wasn't flipped
        let [r, g, b, a] = pixels.pixel(0);
        assert_eq!((r, g, b, a), (1., 0., 0., 1.));
        let [r, g, b, a] = pixels.pixel(99);
        assert_eq!((r, g, b, a), (0., 0., 1., 1.));
    }

    #[test]
    fn sample_bytes_rejects_garbage() {
        assert!(matches!(
            sample_bytes(b"definitely not an image"),
            Err(SampleError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn sample_image_reads_files() {
        let dir = tempfile::tempdir().expect("Should be able to make a temp dir");
        let path = dir.path().join("split.png");
        std::fs::write(&path, split_png(20, 30)).expect("Should be able to write the image");

        let pixels = sample_image(&path).await.expect("Sampling should work");
        assert_eq!(pixels.colour(0).x, 1.);

        assert!(matches!(
            sample_image(dir.path().join("missing.png")).await,
            Err(SampleError::Io(_))
        ));
    }
}
