//! This module provides the outline of a five-pointed star.

use glam::Vec2;
use std::f32::consts::PI;

/// The outer radius of the star on top of the tree.
pub const TOPPER_OUTER_RADIUS: f32 = 0.5;

/// The inner radius of the star on top of the tree.
pub const TOPPER_INNER_RADIUS: f32 = 0.22;

/// Compute the 10 vertices of a five-pointed star, alternating between the outer and inner
/// radius. The first vertex is a point at `rotation` radians anticlockwise from the x axis.
pub fn star_outline(outer: f32, inner: f32, rotation: f32) -> [Vec2; 10] {
    std::array::from_fn(|i| {
        let angle = i as f32 * PI / 5. + rotation;
        let radius = if i % 2 == 0 { outer } else { inner };
        Vec2::new(angle.cos() * radius, angle.sin() * radius)
    })
}
