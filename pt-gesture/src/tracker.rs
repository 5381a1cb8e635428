//! This module smooths per-frame gesture classifications into a stable gesture and turns
//! landmarks into [`HandData`].

use crate::{
    gesture::{classify, Gesture},
    landmarks::{HandLandmarks, INDEX_TIP},
};
use std::collections::VecDeque;
use strum::IntoEnumIterator;
use tracing::debug;

/// How many raw classifications the majority vote looks at.
pub const HISTORY_SIZE: usize = 4;

/// A majority vote over the last few raw classifications, to stop the reported gesture from
/// flickering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GestureSmoother {
    /// The most recent raw classifications, oldest first.
    history: VecDeque<Gesture>,

    /// The last stable gesture that was reported.
    stable: Gesture,
}

impl GestureSmoother {
    /// Create a smoother with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw classification and return the stable gesture.
    ///
    /// The stable gesture is the most common one in the history. If several are tied, the
    /// previous stable gesture wins if it's one of them, and otherwise the one seen most recently
    /// wins.
    pub fn push(&mut self, raw: Gesture) -> Gesture {
        self.history.push_back(raw);
        while self.history.len() > HISTORY_SIZE {
            self.history.pop_front();
        }

        let count = |gesture: Gesture| self.history.iter().filter(|&&g| g == gesture).count();
        let best = Gesture::iter().map(count).max().unwrap_or(0);

        let stable = if count(self.stable) == best {
            self.stable
        } else {
            self.history
                .iter()
                .rev()
                .copied()
                .find(|&gesture| count(gesture) == best)
                .unwrap_or_default()
        };

        if stable != self.stable {
            debug!(from = %self.stable, to = %stable, "Stable gesture changed");
        }
        self.stable = stable;
        stable
    }

    /// Forget the history, like when the hand disappears.
    pub fn clear(&mut self) {
        self.history.clear();
        self.stable = Gesture::None;
    }

    /// The last stable gesture that was reported.
    pub fn stable(&self) -> Gesture {
        self.stable
    }
}

/// What the hand is doing, ready for the app to consume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandData {
    /// The stable gesture.
    pub gesture: Gesture,

    /// The horizontal position of the index fingertip, mirrored so that moving your hand to the
    /// right moves the cursor to the right.
    pub x: f32,

    /// The vertical position of the index fingertip.
    pub y: f32,

    /// Whether a hand was seen at all.
    pub detected: bool,
}

impl HandData {
    /// The data reported when there is no hand.
    pub const NO_HAND: Self = Self {
        gesture: Gesture::None,
        x: 0.5,
        y: 0.5,
        detected: false,
    };
}

/// Turns a stream of per-frame landmarks into smoothed [`HandData`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HandTracker {
    /// The majority vote.
    smoother: GestureSmoother,
}

impl HandTracker {
    /// Create a tracker that hasn't seen a hand yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one frame. `None` means that no hand was found in the frame.
    pub fn process(&mut self, hand: Option<&HandLandmarks>) -> HandData {
        let Some(hand) = hand else {
            self.smoother.clear();
            return HandData::NO_HAND;
        };

        let gesture = self.smoother.push(classify(hand));
        let tip = hand.point(INDEX_TIP);

        HandData {
            gesture,
            x: 1. - tip.x,
            y: tip.y,
            detected: true,
        }
    }
}
