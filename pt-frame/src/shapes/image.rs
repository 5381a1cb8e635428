//! This module provides the image mode shapes: the sparkle sphere shown when no image is loaded,
//! and the flat picture shown when one is.

use super::{burst_velocity, Target, IMAGE_DISPLAY_SCALE, IMAGE_Y_CENTER};
use crate::{
    colour::{SPARKLE_GOLD, WHITE},
    PixelGrid, SAMPLE_PIXELS, SAMPLE_SIZE,
};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Compute the target of a particle on the sparkle sphere.
pub(super) fn scatter_target<R: Rng + ?Sized>(rng: &mut R) -> Target {
    let radius = 12. + rng.gen::<f32>() * 15.;
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2. * rng.gen::<f32>() - 1.).acos();

    let position = Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin() + IMAGE_Y_CENTER,
        radius * phi.cos(),
    );

    let colour = if rng.gen::<f32>() > 0.4 {
        SPARKLE_GOLD
    } else {
        WHITE
    };

    Target {
        position,
        colour,
        velocity: burst_velocity(rng, 50., 130.),
    }
}

/// Compute the target of the particle with the given index when showing the given image.
///
/// Particles are assigned to pixels in order, wrapping around if there are more particles than
/// pixels.
pub(super) fn image_target<R: Rng + ?Sized>(
    index: usize,
    pixels: &PixelGrid,
    rng: &mut R,
) -> Target {
    let pixel_index = index % SAMPLE_PIXELS;
    let px = (pixel_index % SAMPLE_SIZE) as f32;
    let py = (pixel_index / SAMPLE_SIZE) as f32;
    let last = (SAMPLE_SIZE - 1) as f32;

    let position = Vec3::new(
        (px / last - 0.5) * IMAGE_DISPLAY_SCALE,
        (0.5 - py / last) * IMAGE_DISPLAY_SCALE + IMAGE_Y_CENTER,
        0.,
    );

    Target {
        position,
        colour: pixels.colour(pixel_index),
        velocity: burst_velocity(rng, 30., 80.),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn gradient() -> PixelGrid {
        PixelGrid::from_fn(|x, y| [x as f32 / 99., y as f32 / 99., 0.5, 1.])
    }

    #[test]
    fn scatter_targets_sit_on_the_shell() {
        let mut rng = StdRng::seed_from_u64(12345);
        let centre = Vec3::new(0., IMAGE_Y_CENTER, 0.);

        let mut gold = 0;
        for _ in 0..10_000 {
            let target = scatter_target(&mut rng);
            let distance = target.position.distance(centre);
            assert!((11.99..=27.01).contains(&distance), "distance = {distance}");
            assert!(target.colour == SPARKLE_GOLD || target.colour == WHITE);

            if target.colour == SPARKLE_GOLD {
                gold += 1;
            }
        }

        // Roughly a 60/40 split
        assert!((5_500..6_500).contains(&gold), "gold = {gold}");
    }

    #[test]
    fn image_target_copies_pixel_colours_exactly() {
        let mut rng = StdRng::seed_from_u64(12345);
        let pixels = gradient();

        for index in [0, 1, 99, 100, 4321, SAMPLE_PIXELS - 1, SAMPLE_PIXELS + 7] {
            let target = image_target(index, &pixels, &mut rng);
            let [r, g, b, _] = pixels.pixel(index);
            assert_eq!(target.colour, Vec3::new(r, g, b));
            assert_eq!(target.position.z, 0.);
        }
    }

    #[test]
    fn image_target_lays_pixels_out_in_a_square() {
        let mut rng = StdRng::seed_from_u64(12345);
        let pixels = gradient();
        let half = IMAGE_DISPLAY_SCALE / 2.;

        let top_left = image_target(0, &pixels, &mut rng).position;
        assert_approx_eq!(f32, top_left.x, -half);
        assert_approx_eq!(f32, top_left.y, half + IMAGE_Y_CENTER);

        let bottom_right = image_target(SAMPLE_PIXELS - 1, &pixels, &mut rng).position;
        assert_approx_eq!(f32, bottom_right.x, half);
        assert_approx_eq!(f32, bottom_right.y, -half + IMAGE_Y_CENTER);

        // Wraps around
        let wrapped = image_target(SAMPLE_PIXELS, &pixels, &mut rng).position;
        assert_eq!(wrapped, top_left);
    }
}
