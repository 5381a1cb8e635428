//! This module handles the [`CameraRig`], an orbit camera around the tree.

use crate::{
    easing::{lerp, per_frame_fraction, wrap_angle},
    Mode,
};
use glam::Vec3;
use pt_frame::{shapes::IMAGE_Y_CENTER, CameraView};
use std::{
    f32::consts::{FRAC_PI_2, PI, TAU},
    ops::RangeInclusive,
};

/// The distance at which a displayed image fills 3/5 of the screen height.
pub const REFERENCE_DISTANCE: f32 = 14.;

/// How close and how far the camera can get from its target.
pub const DISTANCE_RANGE: RangeInclusive<f32> = 2.0..=40.0;

/// The vertical field of view in degrees.
const FOV_DEGREES: f32 = 45.;

/// How much of the way the camera returns to the front per frame in image mode.
const RESET_EASE: f32 = 0.1;

/// A camera that orbits around a fixed target.
///
/// The azimuth is measured around the vertical axis from +Z, and the polar angle is measured down
/// from +Y, so an azimuth of 0 and a polar angle of `PI / 2` looks straight at the front of the
/// tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    /// The point the camera orbits around.
    target: Vec3,

    /// The horizontal angle around the target.
    azimuth: f32,

    /// The angle down from straight above the target.
    polar: f32,

    /// The distance from the target.
    distance: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    /// Create a camera looking at the front of the tree from the reference distance.
    pub fn new() -> Self {
        Self {
            target: Vec3::new(0., IMAGE_Y_CENTER, 0.),
            azimuth: 0.,
            polar: FRAC_PI_2,
            distance: REFERENCE_DISTANCE,
        }
    }

    /// Move the camera for one frame. In image mode it returns to the front, and in tree mode it
    /// spins around the tree while the tree is visible.
    pub fn update(&mut self, mode: Mode, content_visible: bool, rotation_speed: f32, delta: f32) {
        match mode {
            Mode::Image => {
                let fraction = per_frame_fraction(RESET_EASE, delta);
                self.azimuth = lerp(self.azimuth, 0., fraction);
                self.polar = lerp(self.polar, FRAC_PI_2, fraction);
                self.distance = lerp(self.distance, REFERENCE_DISTANCE, fraction);
            }
            Mode::Tree if content_visible => {
                self.azimuth = wrap_angle(self.azimuth + TAU / 60. * rotation_speed * delta);
            }
            Mode::Tree => {}
        }
    }

    /// Orbit the camera around its target by the given angles. Non-finite angles are ignored.
    pub fn orbit(&mut self, azimuth: f32, polar: f32) {
        if !(azimuth.is_finite() && polar.is_finite()) {
            return;
        }

        self.azimuth = wrap_angle(self.azimuth + azimuth);
        self.polar = (self.polar + polar).clamp(0., PI);
    }

    /// Move the camera towards or away from its target by the given factor.
    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0. {
            self.distance =
                (self.distance * factor).clamp(*DISTANCE_RANGE.start(), *DISTANCE_RANGE.end());
        }
    }

    /// The position of the camera.
    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();

        self.target
            + self.distance * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    /// The camera for a frame.
    pub fn view(&self) -> CameraView {
        CameraView {
            position: self.position(),
            target: self.target,
            fov_degrees: FOV_DEGREES,
        }
    }

    /// The horizontal angle around the target.
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// The distance from the target.
    pub fn distance(&self) -> f32 {
        self.distance
    }
}
