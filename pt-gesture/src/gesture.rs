//! This module classifies a single frame of [`HandLandmarks`] into a [`Gesture`].

use crate::landmarks::{HandLandmarks, FINGER_TIPS, INDEX_TIP, MIDDLE_KNUCKLE, THUMB_TIP, WRIST};

/// Below this normalised fingertip distance, the hand is a fist.
pub const FIST_THRESHOLD: f32 = 1.4;

/// Above this normalised fingertip distance, the hand is open.
pub const OPEN_THRESHOLD: f32 = 2.0;

/// Below this fraction of the hand scale, the thumb and index finger are pinching.
pub const PINCH_THRESHOLD: f32 = 0.4;

/// A hand gesture.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Gesture {
    /// All fingers curled in.
    Fist,

    /// All fingers stretched out.
    Open,

    /// Thumb and index finger touching.
    Pinch,

    /// Nothing recognisable.
    #[default]
    None,
}

/// Classify the gesture that a hand is making in a single frame.
///
/// Everything is measured relative to the hand scale, the distance from the wrist to the middle
/// knuckle, so the result doesn't depend on how far the hand is from the camera.
pub fn classify(hand: &HandLandmarks) -> Gesture {
    let scale = hand.planar_distance(WRIST, MIDDLE_KNUCKLE);
    if scale == 0. || !scale.is_finite() {
        return Gesture::None;
    }

    let average_tip_distance = FINGER_TIPS
        .iter()
        .map(|&tip| hand.planar_distance(tip, WRIST))
        .sum::<f32>()
        / FINGER_TIPS.len() as f32
        / scale;

    if average_tip_distance < FIST_THRESHOLD {
        Gesture::Fist
    } else if average_tip_distance > OPEN_THRESHOLD {
        Gesture::Open
    } else if hand.planar_distance(THUMB_TIP, INDEX_TIP) < scale * PINCH_THRESHOLD {
        Gesture::Pinch
    } else {
        Gesture::None
    }
}
