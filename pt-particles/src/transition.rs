//! This module handles the [`TransitionController`], which decides which physics the particles
//! follow and when the image plane gets revealed.
//!
//! Each time the targets are refreshed, a new transition generation starts and gets a fresh
//! [`TransitionToken`]. Timers remember the token of the generation that scheduled them and are
//! discarded if their generation has been superseded by the time they come due.

use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// How long particles burst for before they start easing into place.
pub const BURST_DURATION: Duration = Duration::from_millis(400);

/// How long after the burst ends that the real image gets revealed.
pub const REVEAL_DELAY: Duration = Duration::from_millis(800);

/// The physics that the particles are currently following.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
pub enum Phase {
    /// Particles ease exponentially towards their targets.
    #[default]
    Steady,

    /// Particles fly ballistically along their velocities.
    Bursting,
}

/// Identifies a transition generation. Only timers with the current token may fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionToken(u64);

/// Something that happened when polling the timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum TransitionEvent {
    /// The burst finished and the particles are now easing into place.
    BurstEnded,

    /// The real image should now fade in over the particles.
    ImageRevealed,
}

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerKind {
    /// End the burst and schedule the reveal.
    EndBurst,

    /// Reveal the image.
    RevealImage,
}

/// A timer waiting to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingTimer {
    /// The generation that scheduled this timer.
    token: TransitionToken,

    /// What to do when it fires.
    kind: TimerKind,

    /// When it comes due.
    fires_at: Instant,
}

/// The state machine for transitions between shapes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionController {
    /// The token of the current generation.
    token: TransitionToken,

    /// The current phase.
    phase: Phase,

    /// Whether the image has been revealed in this generation.
    revealed: bool,

    /// Timers that haven't fired yet. Some of these may belong to old generations.
    timers: Vec<PendingTimer>,
}

impl TransitionController {
    /// Create a controller in the steady phase with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, invalidating every timer from the previous ones.
    fn next_generation(&mut self) -> TransitionToken {
        self.token = TransitionToken(self.token.0 + 1);
        self.revealed = false;
        self.token
    }

    /// Start a new generation that goes straight to the steady phase.
    pub fn settle(&mut self) -> TransitionToken {
        let token = self.next_generation();
        self.phase = Phase::Steady;
        debug!(?token, "Settling");
        token
    }

    /// Start a new generation with a burst that ends [`BURST_DURATION`] after `now`.
    pub fn burst(&mut self, now: Instant) -> TransitionToken {
        let token = self.next_generation();
        self.phase = Phase::Bursting;
        self.timers.push(PendingTimer {
            token,
            kind: TimerKind::EndBurst,
            fires_at: now + BURST_DURATION,
        });
        debug!(?token, "Bursting");
        token
    }

    /// Fire every timer of the current generation that is due at `now`, in order, and return what
    /// happened. Timers from old generations are dropped without firing.
    pub fn poll(&mut self, now: Instant) -> Vec<TransitionEvent> {
        let mut events = vec![];

        while let Some(index) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.fires_at <= now)
            .min_by_key(|(_, timer)| timer.fires_at)
            .map(|(index, _)| index)
        {
            let timer = self.timers.swap_remove(index);

            if timer.token != self.token {
                trace!(?timer, current = ?self.token, "Discarding stale timer");
                continue;
            }

            match timer.kind {
                TimerKind::EndBurst => {
                    self.phase = Phase::Steady;
                    self.timers.push(PendingTimer {
                        token: timer.token,
                        kind: TimerKind::RevealImage,
                        fires_at: timer.fires_at + REVEAL_DELAY,
                    });
                    events.push(TransitionEvent::BurstEnded);
                }
                TimerKind::RevealImage => {
                    self.revealed = true;
                    events.push(TransitionEvent::ImageRevealed);
                }
            }
        }

        if !events.is_empty() {
            debug!(?events, token = ?self.token, "Transition timers fired");
        }

        events
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the image has been revealed in the current generation.
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// The token of the current generation.
    pub fn token(&self) -> TransitionToken {
        self.token
    }

    /// Whether the given token belongs to the current generation.
    pub fn is_current(&self, token: TransitionToken) -> bool {
        self.token == token
    }

    /// The number of timers still waiting, including stale ones.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
