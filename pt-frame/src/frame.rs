//! This module handles the [`SceneFrame`], a read-only snapshot of everything that a renderer
//! needs to draw one frame.

use crate::{ornaments::Decoration, Colour, PixelGrid};
use glam::Vec3;
use std::fmt;

/// A snapshot of the whole scene for a single frame.
#[derive(Clone, PartialEq)]
pub struct SceneFrame<'a> {
    /// The particles themselves.
    pub points: PointCloud<'a>,

    /// The rotation of the tree group around the vertical axis, in radians.
    pub yaw: f32,

    /// The ornaments on the tree. These only exist in tree mode.
    pub ornaments: Option<TreeOrnaments<'a>>,

    /// The flat image that the particles dissolve into. Only present while it's visible.
    pub image_plane: Option<ImagePlane<'a>>,

    /// The positions of the falling snowflakes.
    pub snow: &'a [Vec3],

    /// Where the camera is and what it's looking at.
    pub camera: CameraView,

    /// The lighting and post-processing settings.
    pub lighting: Lighting,

    /// Whether the tree and everything on it should be drawn at all.
    pub content_visible: bool,

    /// Whether the whole scene should be blurred and darkened, like behind the splash screen.
    pub blurred: bool,
}

impl fmt::Debug for SceneFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneFrame")
            .field("points", &self.points)
            .field("yaw", &self.yaw)
            .field("ornaments", &self.ornaments)
            .field("image_plane", &self.image_plane)
            .field("snowflakes", &self.snow.len())
            .field("camera", &self.camera)
            .field("lighting", &self.lighting)
            .field("content_visible", &self.content_visible)
            .field("blurred", &self.blurred)
            .finish()
    }
}

impl SceneFrame<'static> {
    /// A frame with nothing in it, used to clear a renderer.
    pub fn blank() -> Self {
        Self {
            points: PointCloud {
                positions: &[],
                colours: &[],
                size: 0.,
                opacity: 0.,
            },
            yaw: 0.,
            ornaments: None,
            image_plane: None,
            snow: &[],
            camera: CameraView {
                position: Vec3::new(0., 1.2, 14.),
                target: Vec3::new(0., 1.2, 0.),
                fov_degrees: 45.,
            },
            lighting: Lighting {
                ambient: 0.,
                point: 0.,
                environment: 0.,
                bloom: 0.,
                vignette_offset: 0.,
                vignette_darkness: 0.,
            },
            content_visible: false,
            blurred: false,
        }
    }
}

/// The particle buffer, ready to be drawn as additive points.
#[derive(Clone, PartialEq)]
pub struct PointCloud<'a> {
    /// The current position of every particle.
    pub positions: &'a [Vec3],

    /// The current colour of every particle.
    pub colours: &'a [Colour],

    /// The size of each point.
    pub size: f32,

    /// The opacity of the whole cloud.
    pub opacity: f32,
}

impl fmt::Debug for PointCloud<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let centroid = if self.positions.is_empty() {
            Vec3::ZERO
        } else {
            self.positions.iter().sum::<Vec3>() / self.positions.len() as f32
        };

        f.debug_struct("PointCloud")
            .field("count", &self.positions.len())
            .field("centroid", &centroid)
            .field("size", &self.size)
            .field("opacity", &self.opacity)
            .finish()
    }
}

/// Everything hung on the tree in tree mode.
#[derive(Clone, PartialEq)]
pub struct TreeOrnaments<'a> {
    /// The layout of the decorations.
    pub decorations: &'a [Decoration],

    /// The current scale of each decoration.
    pub decoration_scales: &'a [f32],

    /// The current emissive intensity of each decoration.
    pub decoration_glows: &'a [f32],

    /// The points along the ribbon's spiral.
    pub ribbon: &'a [Vec3],

    /// The emissive intensity of the ribbon.
    pub ribbon_glow: f32,

    /// Where the star on top of the tree sits.
    pub star_position: Vec3,

    /// The scale of the star on top of the tree.
    pub star_scale: f32,
}

impl fmt::Debug for TreeOrnaments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeOrnaments")
            .field("decorations", &self.decorations.len())
            .field("ribbon_points", &self.ribbon.len())
            .field("ribbon_glow", &self.ribbon_glow)
            .field("star_position", &self.star_position)
            .field("star_scale", &self.star_scale)
            .finish()
    }
}

/// The flat image plane used to cross-fade from particles to the real photo.
#[derive(Clone, Debug, PartialEq)]
pub struct ImagePlane<'a> {
    /// The image to show.
    pub pixels: &'a PixelGrid,

    /// The centre of the plane.
    pub centre: Vec3,

    /// The side length of the plane.
    pub size: f32,

    /// How opaque the plane is.
    pub opacity: f32,
}

/// The camera for a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    /// The position of the camera.
    pub position: Vec3,

    /// The point the camera is looking at.
    pub target: Vec3,

    /// The vertical field of view in degrees.
    pub fov_degrees: f32,
}

/// Lighting and post-processing for a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    /// The intensity of the ambient light.
    pub ambient: f32,

    /// The intensity of the point light in front of the tree.
    pub point: f32,

    /// The intensity of the environment lighting.
    pub environment: f32,

    /// The intensity of the bloom effect.
    pub bloom: f32,

    /// The offset of the vignette.
    pub vignette_offset: f32,

    /// How dark the vignette gets.
    pub vignette_darkness: f32,
}
