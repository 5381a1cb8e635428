//! This module handles the layout of the stars and fairy lights hung on the tree.

use crate::{
    colour::{LIGHT_RED, STAR_GOLD},
    shapes::tier_radius,
    Colour,
};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use tracing::{debug, instrument};

/// The maximum number of random positions to try for each decoration before giving up on the
/// minimum distance.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// The minimum distance between any two decorations, when the tree is big enough for it.
pub const MIN_DECORATION_DISTANCE: f32 = 0.4;

/// The kinds of decoration, in the order that they get placed, along with how many of each.
const DECORATION_COUNTS: [(DecorationKind, usize); 3] = [
    (DecorationKind::Star, 6),
    (DecorationKind::GoldLight, 8),
    (DecorationKind::RedLight, 8),
];

/// A kind of decoration.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum DecorationKind {
    /// A small golden star.
    Star,

    /// A golden fairy light that pulses.
    GoldLight,

    /// A red fairy light that pulses.
    RedLight,
}

impl DecorationKind {
    /// The colour of this kind of decoration.
    pub fn colour(self) -> Colour {
        match self {
            Self::Star | Self::GoldLight => STAR_GOLD,
            Self::RedLight => LIGHT_RED,
        }
    }

    /// Whether this decoration is a light, which means it pulses.
    pub fn is_light(self) -> bool {
        matches!(self, Self::GoldLight | Self::RedLight)
    }
}

/// A single decoration on the tree.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    /// Where the decoration sits.
    pub position: Vec3,

    /// What kind of decoration this is.
    pub kind: DecorationKind,

    /// The phase offset of the pulse, in radians.
    pub offset: f32,

    /// The Euler rotation of the decoration, in radians.
    pub rotation: Vec3,
}

/// Generate a random position on the surface of the tree.
fn random_position<R: Rng + ?Sized>(height: f32, width: f32, rng: &mut R) -> Vec3 {
    let t = 0.1 + rng.gen::<f32>() * 0.85;
    let radius = tier_radius(t, width * 0.5, 0.6) * 0.92;
    let theta = rng.gen::<f32>() * TAU;

    Vec3::new(theta.cos() * radius, t * height, theta.sin() * radius)
}

/// Whether the position is at least [`MIN_DECORATION_DISTANCE`] away from every decoration.
fn is_spaced(existing: &[Decoration], position: Vec3) -> bool {
    existing
        .iter()
        .all(|other| other.position.distance(position) >= MIN_DECORATION_DISTANCE)
}

/// Try up to [`MAX_PLACEMENT_ATTEMPTS`] random positions for a new decoration. Return the first
/// spaced out position, or the last one tried and `false` if none of them were.
fn place<R: Rng + ?Sized>(
    existing: &[Decoration],
    height: f32,
    width: f32,
    rng: &mut R,
) -> (Vec3, bool) {
    let mut position = random_position(height, width, rng);

    for _ in 1..MAX_PLACEMENT_ATTEMPTS {
        if is_spaced(existing, position) {
            return (position, true);
        }
        position = random_position(height, width, rng);
    }

    (position, is_spaced(existing, position))
}

/// Lay out all the decorations on a tree of the given dimensions.
///
/// Each decoration is placed at the first random position that is at least
/// [`MIN_DECORATION_DISTANCE`] away from all the others. If that fails
/// [`MAX_PLACEMENT_ATTEMPTS`] times in a row, then the tree is too crowded and the last position
/// tried gets used anyway.
#[instrument(skip(rng))]
pub fn layout_decorations<R: Rng + ?Sized>(height: f32, width: f32, rng: &mut R) -> Vec<Decoration> {
    let mut decorations: Vec<Decoration> = Vec::with_capacity(22);

    for (kind, count) in DECORATION_COUNTS {
        for _ in 0..count {
            let (position, spaced) = place(&decorations, height, width, rng);

            if !spaced {
                debug!(?kind, ?position, "Ran out of attempts to space out decoration");
            }

            decorations.push(Decoration {
                position,
                kind,
                offset: rng.gen::<f32>() * TAU,
                rotation: Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, 0.),
            });
        }
    }

    decorations
}
