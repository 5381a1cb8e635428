//! This crate provides the particle simulation: the particle buffers, the transitions between
//! tree and image mode, the per-frame update rule, and the cosmetic layers around them, all
//! composed into a [`Scene`].

mod buffers;
mod camera;
pub mod easing;
mod ornaments;
mod scene;
mod snow;
mod transition;
mod tree;

pub use self::{
    buffers::ParticleBuffers,
    camera::CameraRig,
    ornaments::OrnamentLayer,
    scene::{Scene, Stage},
    snow::{SnowField, SNOWFLAKE_COUNT},
    transition::{
        Phase, TransitionController, TransitionEvent, TransitionToken, BURST_DURATION,
        REVEAL_DELAY,
    },
    tree::{Mode, ParticleTree},
};

/// Create a `rand::rngs::StdRng` from entropy in a normal build, or seeded from 12345 in a test or
/// bench build.
macro_rules! rng {
    () => {{
        use ::rand::{rngs::StdRng, SeedableRng};

        cfg_if::cfg_if! {
            if #[cfg(any(test, feature = "bench"))] {
                StdRng::seed_from_u64(12345)
            } else {
                StdRng::from_entropy()
            }
        }
    }};
}

pub(crate) use rng;
