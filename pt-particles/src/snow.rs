//! This module handles the [`SnowField`], the snow that falls behind and in front of the tree.

use crate::{easing::REFERENCE_FPS, rng};
use glam::Vec3;
use rand::{rngs::StdRng, Rng};
use std::f32::consts::TAU;

/// The number of snowflakes.
pub const SNOWFLAKE_COUNT: usize = 3000;

/// The size of the box that snow falls in. X and Z are centred on the origin, and Y goes from 0
/// up to this.
const BOUNDS: Vec3 = Vec3::new(60., 40., 60.);

/// Flakes that fall below this height respawn at the top.
const FLOOR: f32 = -10.;

/// How a single flake moves.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FlakeMotion {
    /// How fast it falls.
    speed: f32,

    /// The phase of its sideways drift.
    phase: f32,

    /// How far it drifts sideways per frame at the reference frame rate.
    drift: f32,
}

/// A field of falling snowflakes.
#[derive(Clone, Debug)]
pub struct SnowField {
    /// The position of every flake.
    positions: Vec<Vec3>,

    /// How every flake moves.
    motions: Vec<FlakeMotion>,

    /// The RNG used to respawn flakes.
    rng: StdRng,
}

/// A random horizontal coordinate within the given width, centred on 0.
fn centred<R: Rng + ?Sized>(rng: &mut R, width: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * width
}

impl SnowField {
    /// Create a field of [`SNOWFLAKE_COUNT`] flakes.
    pub fn new() -> Self {
        Self::with_count(SNOWFLAKE_COUNT)
    }

    /// Create a field with the given number of flakes.
    pub fn with_count(count: usize) -> Self {
        let mut rng = rng!();

        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    centred(&mut rng, BOUNDS.x),
                    rng.gen::<f32>() * BOUNDS.y,
                    centred(&mut rng, BOUNDS.z),
                )
            })
            .collect();

        let motions = (0..count)
            .map(|_| FlakeMotion {
                speed: 1. + rng.gen::<f32>() * 2.5,
                phase: rng.gen::<f32>() * TAU,
                drift: 0.02 + rng.gen::<f32>() * 0.08,
            })
            .collect();

        Self {
            positions,
            motions,
            rng,
        }
    }

    /// Let the snow fall. `time` is the total elapsed time in seconds.
    pub fn update(&mut self, time: f32, delta: f32) {
        let frames = delta * REFERENCE_FPS;

        for (position, motion) in self.positions.iter_mut().zip(&self.motions) {
            position.y -= motion.speed * delta * 2.;
            position.x += (time * motion.speed * 0.5 + motion.phase).sin() * motion.drift * frames;
            position.z += (time * motion.speed * 0.3 + motion.phase).cos() * motion.drift * frames;

            if position.y < FLOOR {
                *position = Vec3::new(
                    centred(&mut self.rng, BOUNDS.x),
                    BOUNDS.y,
                    centred(&mut self.rng, BOUNDS.z),
                );
            }
        }
    }

    /// The position of every flake.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
}

impl Default for SnowField {
    fn default() -> Self {
        Self::new()
    }
}
