//! This module contains the easing helpers used by the per-frame updates.
//!
//! Some of the animations are defined as "move this fraction of the way every frame". To keep
//! them independent of the frame rate, those fractions are defined per frame at
//! [`REFERENCE_FPS`] and scaled to whatever delta the frame actually took.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// The frame rate that per-frame fractions and decays are defined at.
pub const REFERENCE_FPS: f32 = 60.;

/// Turn a frame delta into something safe to simulate with. Negative, infinite, and NaN deltas
/// become 0.
pub fn sanitise_delta(delta: f32) -> f32 {
    if delta.is_finite() && delta > 0. {
        delta
    } else {
        0.
    }
}

/// The fraction of the remaining distance to cover this frame for exponential easing at the
/// given rate, clamped so that it never overshoots.
pub fn ease_fraction(rate: f32, delta: f32) -> f32 {
    (rate * delta).clamp(0., 1.)
}

/// Scale a fraction defined per frame at [`REFERENCE_FPS`] to a frame of the given delta.
pub fn per_frame_fraction(fraction: f32, delta: f32) -> f32 {
    1. - per_frame_decay(1. - fraction, delta)
}

/// Scale a decay factor defined per frame at [`REFERENCE_FPS`] to a frame of the given delta.
pub fn per_frame_decay(factor: f32, delta: f32) -> f32 {
    factor.powf(delta * REFERENCE_FPS)
}

/// Linearly interpolate between `from` and `to`.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Move `value` the given fraction of the way towards `target`.
pub fn ease_towards(value: &mut Vec3, target: Vec3, fraction: f32) {
    *value += (target - *value) * fraction;
}

/// Wrap an angle into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped == -PI {
        PI
    } else {
        wrapped
    }
}
