//! This crate provides the image sampler, which turns photos into small pixel grids, and the
//! [`Gallery`] that holds them.

mod gallery;
pub mod sampler;

pub use self::{
    gallery::{Gallery, GalleryImage, ImageId},
    sampler::{sample_bytes, sample_image, SampleError},
};
