//! This crate provides the [`Renderer`] trait and nothing else.
//!
//! It's structured like this so that renderers only need to depend on the frame types, not on
//! the simulation.

use pt_frame::SceneFrame;

/// The trait implemented by all renderers.
pub trait Renderer {
    /// Initialise the renderer.
    fn init() -> Self
    where
        Self: Sized;

    /// Draw the given frame.
    fn render_frame(&mut self, frame: &SceneFrame<'_>);

    /// Clear the display by rendering [`SceneFrame::blank`].
    fn clear(&mut self) {
        self.render_frame(&SceneFrame::blank());
    }
}
