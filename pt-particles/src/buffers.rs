//! This module handles [`ParticleBuffers`], the parallel arrays that hold the state of every
//! particle.

use crate::easing::{ease_fraction, ease_towards, per_frame_decay};
use glam::Vec3;
use pt_frame::{Colour, Shape};
use rand::Rng;
use tracing::{debug, instrument};

/// The side length of the cube that particles start scattered in.
const INITIAL_SPREAD: f32 = 60.;

/// How much velocity is kept per frame at the reference frame rate while bursting.
const BURST_VELOCITY_DECAY: f32 = 0.92;

/// How fast colours ease towards their targets while bursting.
const BURST_COLOUR_RATE: f32 = 5.;

/// The state of every particle, stored as parallel arrays.
///
/// Index `i` of every array belongs to particle `i` for the whole lifetime of the buffers.
/// Switching shape only rewrites the targets and velocities; the arrays themselves are only ever
/// allocated in [`ParticleBuffers::new`].
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleBuffers {
    /// The current position of each particle.
    positions: Vec<Vec3>,

    /// The position that each particle is moving towards.
    target_positions: Vec<Vec3>,

    /// The current velocity of each particle. Only used while bursting.
    velocities: Vec<Vec3>,

    /// The current colour of each particle.
    colours: Vec<Colour>,

    /// The colour that each particle is fading towards.
    target_colours: Vec<Colour>,
}

impl ParticleBuffers {
    /// Allocate buffers for the given number of particles, scattered randomly around the origin
    /// with white colours and no targets.
    #[instrument(skip(rng))]
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let positions = (0..count)
            .map(|_| (rng.gen::<Vec3>() - Vec3::splat(0.5)) * INITIAL_SPREAD)
            .collect();

        debug!("Allocated particle buffers");

        Self {
            positions,
            target_positions: vec![Vec3::ZERO; count],
            velocities: vec![Vec3::ZERO; count],
            colours: vec![Colour::ONE; count],
            target_colours: vec![Colour::ONE; count],
        }
    }

    /// The number of particles.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether there are no particles at all.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Rewrite every target and velocity for the given shape.
    pub fn retarget<R: Rng + ?Sized>(&mut self, shape: &Shape<'_>, rng: &mut R) {
        shape.write_targets(
            &mut self.target_positions,
            &mut self.target_colours,
            &mut self.velocities,
            rng,
        );
    }

    /// Advance one frame of the burst: particles fly along their velocities, which decay, and
    /// colours fade towards their targets.
    pub fn burst_step(&mut self, delta: f32) {
        let decay = per_frame_decay(BURST_VELOCITY_DECAY, delta);
        let colour_fraction = ease_fraction(BURST_COLOUR_RATE, delta);

        for (position, velocity) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            *position += *velocity * delta;
            *velocity *= decay;
        }

        for (colour, &target) in self.colours.iter_mut().zip(&self.target_colours) {
            ease_towards(colour, target, colour_fraction);
        }
    }

    /// Advance one frame of exponential easing of positions and colours towards their targets.
    pub fn ease_step(&mut self, rate: f32, delta: f32) {
        let fraction = ease_fraction(rate, delta);

        for (position, &target) in self.positions.iter_mut().zip(&self.target_positions) {
            ease_towards(position, target, fraction);
        }

        for (colour, &target) in self.colours.iter_mut().zip(&self.target_colours) {
            ease_towards(colour, target, fraction);
        }
    }

    /// The current position of each particle.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// The target position of each particle.
    pub fn target_positions(&self) -> &[Vec3] {
        &self.target_positions
    }

    /// The current velocity of each particle.
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    /// The current colour of each particle.
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// The target colour of each particle.
    pub fn target_colours(&self) -> &[Colour] {
        &self.target_colours
    }
}
