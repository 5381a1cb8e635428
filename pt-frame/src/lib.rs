//! This crate provides the building blocks shared by the simulation and the renderers: colours,
//! sampled image grids, the shape generators that compute particle targets, the cosmetic
//! ornament layouts, and the [`SceneFrame`] snapshot.

pub mod colour;
mod frame;
pub mod ornaments;
mod pixels;
pub mod shapes;

pub use self::{
    colour::{parse_hex_colour, Colour, ParseColourError},
    frame::{CameraView, ImagePlane, Lighting, PointCloud, SceneFrame, TreeOrnaments},
    pixels::{PixelGrid, SAMPLE_PIXELS, SAMPLE_SIZE},
    shapes::{Shape, Target},
};
