//! This module handles colours.
//!
//! Colours are stored as RGB [`Vec3`]s where each component is normally in `[0, 1]`. Nothing
//! clamps them though, so a boosted colour like the foliage tint can go slightly above 1.

use glam::Vec3;
use thiserror::Error;

/// An RGB colour with components normally in `[0, 1]`.
pub type Colour = Vec3;

/// Plain white, used for snow caps and the scattered sparkles.
pub const WHITE: Colour = Vec3::ONE;

/// The colour of the trunk, `#4d3319`.
pub const TRUNK_BROWN: Colour = Vec3::new(77. / 255., 51. / 255., 25. / 255.);

/// The gold used for the scattered sparkles when no image is loaded.
pub const SPARKLE_GOLD: Colour = Vec3::new(1., 0.85, 0.3);

/// The gold of the stars and gold lights, `#ffd700`.
pub const STAR_GOLD: Colour = Vec3::new(1., 215. / 255., 0.);

/// The red of the red lights, `#ff4444`.
pub const LIGHT_RED: Colour = Vec3::new(1., 68. / 255., 68. / 255.);

/// The error returned by [`parse_hex_colour`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseColourError {
    /// The colour had the wrong number of hex digits.
    #[error("Expected 3 or 6 hex digits but found {0}")]
    BadLength(usize),

    /// The colour contained a character that isn't a hex digit.
    #[error("Invalid hex digit `{0}`")]
    BadDigit(char),
}

/// Parse a CSS-style hex colour like `#1b4d2a` or `#fff`. The leading `#` is optional.
pub fn parse_hex_colour(hex: &str) -> Result<Colour, ParseColourError> {
    let digits = hex.trim().trim_start_matches('#');

    let values = digits
        .chars()
        .map(|c| c.to_digit(16).ok_or(ParseColourError::BadDigit(c)))
        .collect::<Result<Vec<u32>, _>>()?;

    let [r, g, b] = match values[..] {
        [r, g, b] => [r * 17, g * 17, b * 17],
        [r1, r2, g1, g2, b1, b2] => [r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2],
        _ => return Err(ParseColourError::BadLength(values.len())),
    };

    Ok(Vec3::new(r as f32, g as f32, b as f32) / 255.)
}
