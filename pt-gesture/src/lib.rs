//! This crate provides the hand gesture classifier. It takes the landmarks of a tracked hand and
//! works out whether it's making a fist, an open palm, or a pinch, smoothing the result over a
//! few frames.

mod gesture;
pub mod landmarks;
mod tracker;

pub use self::{
    gesture::{classify, Gesture, FIST_THRESHOLD, OPEN_THRESHOLD, PINCH_THRESHOLD},
    landmarks::{HandLandmarks, ParseLandmarksError},
    tracker::{GestureSmoother, HandData, HandTracker, HISTORY_SIZE},
};
