//! This crate provides a very simple [`DebugRenderer`] to test things with.

use pt_frame::SceneFrame;
use pt_renderer_trait::Renderer;
use tracing::{info, instrument};

/// A simple debug renderer that just logs all its input with tracing at the info level.
#[derive(Debug, Default)]
pub struct DebugRenderer {
    /// How many frames have been rendered so far.
    frames: u64,
}

impl DebugRenderer {
    /// How many frames have been rendered so far, including blank ones.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugRenderer {
    fn init() -> Self {
        Self::default()
    }

    #[instrument(skip_all, fields(number = self.frames))]
    fn render_frame(&mut self, frame: &SceneFrame<'_>) {
        info!(?frame);
        self.frames += 1;
    }
}
