//! This module handles the [`OrnamentLayer`], the decorations and ribbon that animate on top of
//! the particles in tree mode.

use crate::{
    easing::{lerp, per_frame_fraction},
    Mode,
};
use glam::Vec3;
use pt_frame::ornaments::{layout_decorations, ribbon_points, Decoration};
use rand::Rng;
use tracing::debug;

/// How much of the way decorations scale per frame.
const SCALE_EASE: f32 = 0.2;

/// The scale of decorations in image mode. Not quite 0 so they never degenerate.
const HIDDEN_SCALE: f32 = 0.001;

/// The glow of a decoration that doesn't pulse.
const STAR_GLOW: f32 = 0.8;

/// How far above the top of the tree the star sits.
const STAR_HEIGHT_OFFSET: f32 = 0.05;

/// The decorations, ribbon, and star position for the current tree dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct OrnamentLayer {
    /// The decorations and where they are.
    decorations: Vec<Decoration>,

    /// The current scale of each decoration.
    scales: Vec<f32>,

    /// The current glow of each decoration.
    glows: Vec<f32>,

    /// The spiral ribbon.
    ribbon: Vec<Vec3>,

    /// The current glow of the ribbon.
    ribbon_glow: f32,

    /// Where the star on top sits.
    star_position: Vec3,
}

impl OrnamentLayer {
    /// Lay out the ornaments for a tree of the given dimensions.
    pub fn new<R: Rng + ?Sized>(height: f32, width: f32, rng: &mut R) -> Self {
        let mut layer = Self {
            decorations: vec![],
            scales: vec![],
            glows: vec![],
            ribbon: vec![],
            ribbon_glow: 0.,
            star_position: Vec3::ZERO,
        };
        layer.relayout(height, width, rng);
        layer
    }

    /// Lay everything out again for new tree dimensions. Decorations restart fully grown.
    pub fn relayout<R: Rng + ?Sized>(&mut self, height: f32, width: f32, rng: &mut R) {
        self.decorations = layout_decorations(height, width, rng);
        self.scales = vec![1.; self.decorations.len()];
        self.glows = self
            .decorations
            .iter()
            .map(|decoration| if decoration.kind.is_light() { 0.3 } else { STAR_GLOW })
            .collect();
        self.ribbon = ribbon_points(height, width);
        self.star_position = Vec3::new(0., height + STAR_HEIGHT_OFFSET, 0.);

        debug!(height, width, "Laid out ornaments");
    }

    /// Animate the ornaments. `time` is the total elapsed time in seconds.
    pub fn update(&mut self, mode: Mode, time: f32, delta: f32) {
        let target_scale = match mode {
            Mode::Tree => 1.,
            Mode::Image => HIDDEN_SCALE,
        };
        let fraction = per_frame_fraction(SCALE_EASE, delta);

        for ((decoration, scale), glow) in self
            .decorations
            .iter()
            .zip(self.scales.iter_mut())
            .zip(self.glows.iter_mut())
        {
            *scale = lerp(*scale, target_scale, fraction);
            *glow = if decoration.kind.is_light() {
                0.3 + (time * 3. + decoration.offset).sin() * 0.4
            } else {
                STAR_GLOW
            };
        }

        self.ribbon_glow = 0.6 + (time * 2.).sin() * 0.4;
    }

    /// The decorations.
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// The current scale of each decoration.
    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    /// The current glow of each decoration.
    pub fn glows(&self) -> &[f32] {
        &self.glows
    }

    /// The points of the ribbon.
    pub fn ribbon(&self) -> &[Vec3] {
        &self.ribbon
    }

    /// The current glow of the ribbon.
    pub fn ribbon_glow(&self) -> f32 {
        self.ribbon_glow
    }

    /// Where the star on top of the tree sits.
    pub fn star_position(&self) -> Vec3 {
        self.star_position
    }
}
