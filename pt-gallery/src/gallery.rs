//! This module handles the [`Gallery`], the list of uploaded photos that the tree can turn into.

use crate::sampler::sample_image;
use futures::future::join_all;
use pt_frame::PixelGrid;
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info, instrument, warn};

/// The unique ID of an image in a [`Gallery`]. IDs are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(u64);

impl ImageId {
    /// Get the ID with the given number.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An image in the gallery.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryImage {
    /// The ID of this image.
    pub id: ImageId,

    /// Where the image was loaded from.
    pub source: PathBuf,

    /// The sampled pixels, shared with the particle tree.
    pub pixels: Arc<PixelGrid>,
}

/// A list of photos with one of them selected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gallery {
    /// The images, in upload order.
    images: Vec<GalleryImage>,

    /// The index of the selected image. Always a valid index unless the gallery is empty.
    selected: usize,

    /// The ID to give the next image.
    next_id: u64,
}

impl Gallery {
    /// Create an empty gallery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an already sampled image to the end of the gallery and return its ID.
    pub fn push(&mut self, source: PathBuf, pixels: PixelGrid) -> ImageId {
        let id = ImageId(self.next_id);
        self.next_id += 1;

        self.images.push(GalleryImage {
            id,
            source,
            pixels: Arc::new(pixels),
        });

        id
    }

    /// Sample every image at the given paths concurrently and add the ones that worked to the
    /// end of the gallery, in the order they were given. Images that fail are logged and skipped.
    /// Return the IDs of the new images.
    #[instrument(skip_all, fields(count = paths.len()))]
    pub async fn upload<P: AsRef<Path>>(&mut self, paths: &[P]) -> Vec<ImageId> {
        let results = join_all(paths.iter().map(|path| sample_image(path.as_ref()))).await;

        let mut ids = Vec::with_capacity(paths.len());
        for (path, result) in paths.iter().zip(results) {
            let path = path.as_ref();
            match result {
                Ok(pixels) => {
                    let id = self.push(path.to_path_buf(), pixels);
                    debug!(?path, %id, "Added image");
                    ids.push(id);
                }
                Err(error) => warn!(?path, %error, "Unable to load image"),
            }
        }

        info!(added = ids.len(), total = self.images.len(), "Uploaded images");
        ids
    }

    /// Remove the image with the given ID. Return whether it was there.
    ///
    /// If the selected image was at the end, the selection moves to the new last image.
    pub fn remove(&mut self, id: ImageId) -> bool {
        let Some(index) = self.images.iter().position(|image| image.id == id) else {
            return false;
        };

        self.images.remove(index);
        self.selected = self.selected.min(self.images.len().saturating_sub(1));
        debug!(%id, selected = self.selected, "Removed image");
        true
    }

    /// Select the image at the given index. Return false and keep the old selection if the index
    /// is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// The selected image, if there are any images.
    pub fn selected(&self) -> Option<&GalleryImage> {
        self.images.get(self.selected)
    }

    /// The index of the selected image.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// All the images, in order.
    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    /// The number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether there are no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn flat(shade: f32) -> PixelGrid {
        PixelGrid::from_fn(|_, _| [shade, shade, shade, 1.])
    }

    fn gallery(count: usize) -> Gallery {
        let mut gallery = Gallery::new();
        for i in 0..count {
            gallery.push(PathBuf::from(format!("{i}.png")), flat(i as f32 / 10.));
        }
        gallery
    }

    #[test]
    fn remove_clamps_the_selection() {
        let mut gallery = gallery(3);
        assert!(gallery.select(2));

        assert!(gallery.remove(ImageId::new(2)));
        assert_eq!(gallery.selected_index(), 1);
        assert_eq!(gallery.selected().map(|image| image.id), Some(ImageId::new(1)));

        assert!(!gallery.remove(ImageId::new(2)));

        assert!(gallery.remove(ImageId::new(0)));
        assert!(gallery.remove(ImageId::new(1)));
        assert!(gallery.is_empty());
        assert_eq!(gallery.selected(), None);
        assert_eq!(gallery.selected_index(), 0);
    }

    #[test]
    fn select_rejects_bad_indices() {
        let mut gallery = gallery(2);
        assert!(gallery.select(1));
        assert!(!gallery.select(2));
        assert_eq!(gallery.selected_index(), 1);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut gallery = gallery(2);
        gallery.remove(ImageId::new(1));

        let id = gallery.push(PathBuf::from("new.png"), flat(0.5));
        assert_eq!(id, ImageId::new(2));
    }

    #[tokio::test]
    async fn upload_keeps_order_and_skips_failures() {
        let dir = tempfile::tempdir().expect("Should be able to make a temp dir");

        let mut paths = vec![];
        for (name, shade) in [("dark.png", 0u8), ("light.png", 255)] {
            let path = dir.path().join(name);
            RgbaImage::from_pixel(8, 8, Rgba([shade, shade, shade, 255]))
                .save(&path)
                .expect("Should be able to save the image");
            paths.push(path);
        }

        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, b"not a png").expect("Should be able to write the file");
        paths.insert(1, broken);
        paths.push(dir.path().join("missing.png"));

        let mut gallery = Gallery::new();
        let ids = gallery.upload(&paths).await;

        assert_eq!(ids.len(), 2);
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.images()[0].source, paths[0]);
        assert_eq!(gallery.images()[1].source, paths[2]);
        assert_eq!(gallery.images()[0].pixels.colour(0).x, 0.);
        assert_eq!(gallery.images()[1].pixels.colour(0).x, 1.);
        assert_eq!(gallery.selected().map(|image| image.id), Some(ids[0]));
    }
}
