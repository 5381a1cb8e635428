//! This module contains the layouts of the cosmetic ornaments that sit on the tree.

mod decorations;
mod ribbon;
mod star;

pub use self::{
    decorations::{
        layout_decorations, Decoration, DecorationKind, MAX_PLACEMENT_ATTEMPTS,
        MIN_DECORATION_DISTANCE,
    },
    ribbon::{ribbon_points, RIBBON_SEGMENTS},
    star::{star_outline, TOPPER_INNER_RADIUS, TOPPER_OUTER_RADIUS},
};
