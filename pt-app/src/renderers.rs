//! This module picks the renderer. See `Cargo.toml` for the features that enable the renderers
//! and their explanations.

use pt_frame::SceneFrame;
use pt_renderer_trait::Renderer;
use std::ops::{Deref, DerefMut};
use tracing::{error, info, instrument};

cfg_if::cfg_if! {
    if #[cfg(feature = "renderer-debug")] {
        use debug::DebugRenderer as RendererImpl;
    } else {
        compile_error!("You must enable exactly one renderer feature");
    }
}

/// A transparent wrapper around the `Renderer` trait implementation. This wrapper clears the
/// display when dropped.
pub struct RendererWrapper(RendererImpl);

impl Deref for RendererWrapper {
    type Target = RendererImpl;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RendererWrapper {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for RendererWrapper {
    #[instrument(skip_all)]
    fn drop(&mut self) {
        info!("Dropping RendererWrapper");

        if std::thread::panicking() {
            error!("Thread is panicking. Unable to clear the display");
        } else {
            self.clear();
        }
    }
}

impl Renderer for RendererWrapper {
    fn init() -> Self {
        Self(RendererImpl::init())
    }

    #[inline]
    fn render_frame(&mut self, frame: &SceneFrame<'_>) {
        self.0.render_frame(frame);
    }
}
