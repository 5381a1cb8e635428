//! This module handles [`HandLandmarks`], the 21 tracked points of a single hand.

use glam::Vec3;
use std::str::FromStr;
use thiserror::Error;

/// The number of landmarks tracked on a hand.
pub const LANDMARK_COUNT: usize = 21;

/// The index of the wrist.
pub const WRIST: usize = 0;

/// The index of the tip of the thumb.
pub const THUMB_TIP: usize = 4;

/// The index of the tip of the index finger.
pub const INDEX_TIP: usize = 8;

/// The index of the knuckle at the base of the middle finger.
pub const MIDDLE_KNUCKLE: usize = 9;

/// The index of the tip of the middle finger.
pub const MIDDLE_TIP: usize = 12;

/// The index of the tip of the ring finger.
pub const RING_TIP: usize = 16;

/// The index of the tip of the little finger.
pub const PINKY_TIP: usize = 20;

/// The indices of the four fingertips, not counting the thumb.
pub const FINGER_TIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// An error encountered while parsing [`HandLandmarks`] from text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseLandmarksError {
    /// There weren't exactly `3 * LANDMARK_COUNT` numbers.
    #[error("Expected {} numbers but found {0}", LANDMARK_COUNT * 3)]
    WrongCount(usize),

    /// One of the numbers couldn't be parsed.
    #[error("Invalid number: {0:?}")]
    BadNumber(String),
}

/// The landmarks of a single hand, in normalised image coordinates where X and Y go from 0 to 1
/// across the camera image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandLandmarks([Vec3; LANDMARK_COUNT]);

impl HandLandmarks {
    /// Wrap the given points.
    pub fn new(points: [Vec3; LANDMARK_COUNT]) -> Self {
        Self(points)
    }

    /// Copy the landmarks out of a slice. Return `None` unless it has exactly
    /// [`LANDMARK_COUNT`] points.
    pub fn from_slice(points: &[Vec3]) -> Option<Self> {
        points.try_into().ok().map(Self)
    }

    /// Get the landmark with the given index. See the constants in this module.
    pub fn point(&self, index: usize) -> Vec3 {
        self.0[index]
    }

    /// The distance between two landmarks in the image plane, ignoring depth.
    pub fn planar_distance(&self, a: usize, b: usize) -> f32 {
        self.0[a].truncate().distance(self.0[b].truncate())
    }
}

impl FromStr for HandLandmarks {
    type Err = ParseLandmarksError;

    /// Parse landmarks from whitespace or comma separated numbers, with three numbers (X, Y, Z)
    /// for each point.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let numbers = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|word| !word.is_empty())
            .map(|word| {
                word.parse::<f32>()
                    .map_err(|_| ParseLandmarksError::BadNumber(word.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if numbers.len() != LANDMARK_COUNT * 3 {
            return Err(ParseLandmarksError::WrongCount(numbers.len()));
        }

        let points: Vec<Vec3> = numbers.chunks_exact(3).map(Vec3::from_slice).collect();
        Self::from_slice(&points).ok_or(ParseLandmarksError::WrongCount(numbers.len()))
    }
}
