//! This module provides the golden ribbon that spirals down the tree.

use glam::Vec3;
use std::f32::consts::TAU;

/// The number of segments in the ribbon. There is one more point than this.
pub const RIBBON_SEGMENTS: usize = 300;

/// How many times the ribbon wraps around the tree.
const LOOPS: f32 = 3.3;

/// Compute the points of the ribbon from the bottom of the tree to the top.
pub fn ribbon_points(height: f32, width: f32) -> Vec<Vec3> {
    (0..=RIBBON_SEGMENTS)
        .map(|i| {
            let t = i as f32 / RIBBON_SEGMENTS as f32;
            let angle = t * TAU * LOOPS;
            let radius = width * 0.45 * (1. - t) + 0.005;
            Vec3::new(angle.cos() * radius, t * height, angle.sin() * radius)
        })
        .collect()
}
