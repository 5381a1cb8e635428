//! This module handles the shapes that particles can be arranged into.
//!
//! A [`Shape`] maps a particle index to a [`Target`]: where that particle should end up, what
//! colour it should fade to, and the velocity it should be flung with if the shape is entered
//! with a burst.

use crate::{Colour, PixelGrid};
use glam::Vec3;
use rand::Rng;
use tracing::{instrument, trace};

mod image;
mod tree;

pub use self::tree::{tier_radius, TRUNK_FRACTION, TRUNK_RADIUS};

/// The side length of the square that a loaded image is laid out on.
///
/// A camera 14 units away with a 45° field of view sees 11.597 units vertically, and this is 3/5
/// of that.
pub const IMAGE_DISPLAY_SCALE: f32 = 6.96;

/// The height of the centre of the image and the scatter sphere. This matches the orbit target of
/// the camera.
pub const IMAGE_Y_CENTER: f32 = 1.2;

/// The target of a single particle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Target {
    /// Where the particle should end up.
    pub position: Vec3,

    /// The colour that the particle should fade to.
    pub colour: Colour,

    /// The initial velocity of the particle, used while bursting into this shape.
    pub velocity: Vec3,
}

/// A shape that the particles can be arranged into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape<'a> {
    /// A tiered Christmas tree with a trunk and snow caps.
    Tree {
        /// The height of the top of the tree.
        height: f32,

        /// The width of the widest tier at the base.
        width: f32,

        /// The base colour of the foliage.
        colour: Colour,
    },

    /// A hollow sphere of gold and white sparkles, used in image mode before an image is loaded.
    Scatter,

    /// A flat picture of the given image, one particle per pixel.
    Image(&'a PixelGrid),
}

impl Shape<'_> {
    /// A short name for this shape, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tree { .. } => "tree",
            Self::Scatter => "scatter",
            Self::Image(_) => "image",
        }
    }

    /// Compute the target of the particle with the given index.
    pub fn target<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Target {
        match *self {
            Self::Tree {
                height,
                width,
                colour,
            } => tree::tree_target(height, width, colour, rng),
            Self::Scatter => image::scatter_target(rng),
            Self::Image(pixels) => image::image_target(index, pixels, rng),
        }
    }

    /// Write the targets of every particle into the given slices, where index `i` of each slice
    /// belongs to particle `i`.
    ///
    /// The slices should all be the same length. If they're not, only the common prefix gets
    /// written.
    #[instrument(skip_all, fields(shape = self.name(), count = positions.len()))]
    pub fn write_targets<R: Rng + ?Sized>(
        &self,
        positions: &mut [Vec3],
        colours: &mut [Colour],
        velocities: &mut [Vec3],
        rng: &mut R,
    ) {
        debug_assert!(
            positions.len() == colours.len() && colours.len() == velocities.len(),
            "Target slices should all be the same length"
        );

        for (index, ((position, colour), velocity)) in positions
            .iter_mut()
            .zip(colours.iter_mut())
            .zip(velocities.iter_mut())
            .enumerate()
        {
            let target = self.target(index, rng);
            *position = target.position;
            *colour = target.colour;
            *velocity = target.velocity;
        }

        trace!("Finished writing targets");
    }
}

/// Generate a velocity in a random direction in the XY plane with a random Z component, with a
/// speed in the given range.
fn burst_velocity<R: Rng + ?Sized>(rng: &mut R, min_speed: f32, max_speed: f32) -> Vec3 {
    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    let speed = min_speed + rng.gen::<f32>() * (max_speed - min_speed);

    Vec3::new(
        angle.cos() * speed,
        angle.sin() * speed,
        (rng.gen::<f32>() - 0.5) * speed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn write_targets_fills_every_particle() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut positions = vec![Vec3::NAN; 500];
        let mut colours = vec![Vec3::NAN; 500];
        let mut velocities = vec![Vec3::NAN; 500];

        Shape::Scatter.write_targets(&mut positions, &mut colours, &mut velocities, &mut rng);

        assert!(positions.iter().all(|p| p.is_finite()));
        assert!(colours.iter().all(|c| c.is_finite()));
        assert!(velocities.iter().all(|v| v.length() > 0.));
    }

    #[test]
    fn write_targets_handles_empty_slices() {
        let mut rng = StdRng::seed_from_u64(12345);
        Shape::Scatter.write_targets(&mut [], &mut [], &mut [], &mut rng);
    }

    #[test]
    fn burst_velocity_speed_is_in_range() {
        let mut rng = StdRng::seed_from_u64(12345);

        for _ in 0..1000 {
            let velocity = burst_velocity(&mut rng, 30., 80.);
            let planar_speed = velocity.truncate().length();
            assert!((29.99..80.01).contains(&planar_speed), "{planar_speed}");
            assert!(velocity.z.abs() <= planar_speed / 2. + 0.01);
        }
    }
}
