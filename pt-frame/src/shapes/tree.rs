//! This module provides the tree shape.

use super::Target;
use crate::{
    colour::{TRUNK_BROWN, WHITE},
    Colour,
};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// The proportion of particles that make up the trunk.
pub const TRUNK_FRACTION: f32 = 0.05;

/// The radius of the trunk, unless the tree is thinner than that.
pub const TRUNK_RADIUS: f32 = 0.18;

/// The number of tiers of foliage.
const TIERS: f32 = 4.;

/// How much the foliage colour is brightened by.
const FOLIAGE_BOOST: f32 = 1.2;

/// The radius of a tier at the given height fraction `t` in `[0, 1]`, where `base_width` is half
/// the width of the tree and `slope` is how much each of the lower tiers narrows towards its top.
///
/// The top tier always narrows to a point.
pub fn tier_radius(t: f32, base_width: f32, slope: f32) -> f32 {
    let scaled = t.clamp(0., 1.) * TIERS;
    let tier = scaled.floor().min(TIERS - 1.);
    let fraction = scaled - tier;

    match tier as u8 {
        3 => base_width * 0.3 * (1. - fraction),
        2 => base_width * 0.5 * (1. - fraction * slope),
        1 => base_width * 0.75 * (1. - fraction * slope),
        _ => base_width * (1. - fraction * slope),
    }
}

/// Compute the target of a single particle in a tree of the given dimensions.
pub(super) fn tree_target<R: Rng + ?Sized>(
    height: f32,
    width: f32,
    colour: Colour,
    rng: &mut R,
) -> Target {
    let base_width = width * 0.5;

    if rng.gen::<f32>() < TRUNK_FRACTION {
        let radius = rng.gen::<f32>() * TRUNK_RADIUS.min(base_width);
        let theta = rng.gen::<f32>() * TAU;
        let y = rng.gen::<f32>() * 0.8 - 0.5;

        return Target {
            position: Vec3::new(theta.cos() * radius, y, theta.sin() * radius),
            colour: TRUNK_BROWN,
            velocity: Vec3::ZERO,
        };
    }

    // Biased towards the top, where the tree is thinner, so the density looks even
    let t = 1. - rng.gen::<f32>().sqrt();
    let theta = rng.gen::<f32>() * TAU;

    let scaled = t * TIERS;
    let tier = scaled.floor().min(TIERS - 1.) as u8;
    let fraction_in_tier = scaled - f32::from(tier);

    let distance = rng.gen::<f32>().sqrt();
    let radius = (tier_radius(t, base_width, 0.7) * distance).max(0.);

    let is_at_edge = distance > 0.9;
    let is_base_of_tier = fraction_in_tier < 0.18;

    let colour = if is_at_edge && is_base_of_tier {
        let snow_probability = if tier <= 1 { 1. } else { 0.85 };
        if rng.gen::<f32>() < snow_probability {
            WHITE
        } else {
            colour * FOLIAGE_BOOST
        }
    } else {
        colour * FOLIAGE_BOOST
    };

    Target {
        position: Vec3::new(theta.cos() * radius, t * height, theta.sin() * radius),
        colour,
        velocity: Vec3::ZERO,
    }
}
