//! This module handles the [`ParticleTree`], which owns the particle buffers and runs the
//! per-frame update rule.

use crate::{
    buffers::ParticleBuffers,
    easing::{lerp, per_frame_fraction, sanitise_delta, wrap_angle},
    rng,
    transition::{Phase, TransitionController, TransitionEvent},
};
use glam::Vec3;
use pt_config::{ConfigChange, TreeConfig};
use pt_frame::{
    shapes::{IMAGE_DISPLAY_SCALE, IMAGE_Y_CENTER},
    ImagePlane, PixelGrid, PointCloud, Shape,
};
use rand::rngs::StdRng;
use std::{sync::Arc, time::Instant};
use tracing::{debug, info, instrument};

/// The easing rate of particles in image mode.
const IMAGE_EASE_RATE: f32 = 9.;

/// The easing rate of particles in tree mode.
const TREE_EASE_RATE: f32 = 4.;

/// How much of the way the yaw unwinds towards 0 per frame in image mode.
const YAW_EASE: f32 = 0.1;

/// How much of the way the star scales per frame.
const STAR_EASE: f32 = 0.15;

/// The scale of the star on top of the tree in tree mode.
const STAR_TREE_SCALE: f32 = 0.4;

/// How much of the way the image plane and the points fade per frame.
const FADE_EASE: f32 = 0.1;

/// The image plane is only drawn while its opacity is above this.
const PLANE_VISIBLE_THRESHOLD: f32 = 0.01;

/// What the particles are showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Mode {
    /// A Christmas tree.
    #[default]
    Tree,

    /// The selected image, or a sparkly scatter if there isn't one.
    Image,
}

impl Mode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Tree => Self::Image,
            Self::Image => Self::Tree,
        }
    }
}

/// Work out the shape that the particles should form.
fn shape_for<'a>(mode: Mode, config: &TreeConfig, image: Option<&'a PixelGrid>) -> Shape<'a> {
    match (mode, image) {
        (Mode::Tree, _) => Shape::Tree {
            height: config.tree_height,
            width: config.tree_width,
            colour: config.base_colour(),
        },
        (Mode::Image, Some(pixels)) => Shape::Image(pixels),
        (Mode::Image, None) => Shape::Scatter,
    }
}

/// The particle tree. This owns every particle and decides where they go.
#[derive(Clone, Debug)]
pub struct ParticleTree {
    /// The current config. This is always sanitised.
    config: TreeConfig,

    /// What the particles are showing.
    mode: Mode,

    /// The image to show in image mode.
    image: Option<Arc<PixelGrid>>,

    /// The particles themselves.
    buffers: ParticleBuffers,

    /// Decides the physics and when to reveal the image.
    transitions: TransitionController,

    /// The rotation of the whole tree around the vertical axis.
    yaw: f32,

    /// The scale of the star on top of the tree.
    star_scale: f32,

    /// The opacity of the flat image plane.
    plane_opacity: f32,

    /// The opacity of the particles.
    points_opacity: f32,

    /// The RNG used for the targets.
    rng: StdRng,
}

impl ParticleTree {
    /// Create a new tree with the given config, in tree mode with no image.
    #[instrument(skip_all, fields(count = config.particle_count))]
    pub fn new(config: TreeConfig) -> Self {
        let config = config.sanitised();
        let mut rng = rng!();
        let buffers = ParticleBuffers::new(config.particle_count, &mut rng);

        let mut tree = Self {
            config,
            mode: Mode::Tree,
            image: None,
            buffers,
            transitions: TransitionController::new(),
            yaw: 0.,
            star_scale: 1.,
            plane_opacity: 0.,
            points_opacity: 1.,
            rng,
        };
        tree.refresh_targets(Instant::now());
        tree
    }

    /// Regenerate every target for the current mode and start a new transition.
    fn refresh_targets(&mut self, now: Instant) {
        let shape = shape_for(self.mode, &self.config, self.image.as_deref());
        self.buffers.retarget(&shape, &mut self.rng);

        let token = match self.mode {
            Mode::Tree => self.transitions.settle(),
            Mode::Image => self.transitions.burst(now),
        };

        debug!(shape = shape.name(), ?token, "Refreshed targets");
    }

    /// Switch to the given mode. Switching to the current mode does nothing.
    pub fn set_mode(&mut self, mode: Mode, now: Instant) {
        if mode == self.mode {
            return;
        }

        info!(from = %self.mode, to = %mode, "Switching mode");
        self.mode = mode;
        self.refresh_targets(now);
    }

    /// Set the image to show in image mode. Setting the same image again does nothing.
    pub fn set_image(&mut self, image: Option<Arc<PixelGrid>>, now: Instant) {
        let same = match (&self.image, &image) {
            (None, None) => true,
            (Some(old), Some(new)) => Arc::ptr_eq(old, new),
            _ => false,
        };
        if same {
            return;
        }

        debug!(has_image = image.is_some(), "Changing image");
        self.image = image;
        self.refresh_targets(now);
    }

    /// Apply a new config and return what changed. Changing the particle count reallocates the
    /// buffers, and any change to the shape regenerates the targets.
    #[instrument(skip_all)]
    pub fn set_config(&mut self, config: TreeConfig, now: Instant) -> ConfigChange {
        let config = config.sanitised();
        let changes = self.config.changes(&config);
        self.config = config;

        if changes.count {
            info!(count = self.config.particle_count, "Reallocating particle buffers");
            self.buffers = ParticleBuffers::new(self.config.particle_count, &mut self.rng);
        }

        if changes.shape {
            self.refresh_targets(now);
        }

        changes
    }

    /// Advance the simulation by `delta` seconds, firing any transition timers due at `now`.
    pub fn update(&mut self, delta: f32, now: Instant) -> Vec<TransitionEvent> {
        let delta = sanitise_delta(delta);
        let events = self.transitions.poll(now);

        match self.transitions.phase() {
            Phase::Bursting => self.buffers.burst_step(delta),
            Phase::Steady => {
                let rate = match self.mode {
                    Mode::Tree => TREE_EASE_RATE,
                    Mode::Image => IMAGE_EASE_RATE,
                };
                self.buffers.ease_step(rate, delta);
            }
        }

        match self.mode {
            Mode::Tree => self.yaw = wrap_angle(self.yaw + self.config.rotation_speed * delta),
            Mode::Image => self.yaw = lerp(self.yaw, 0., per_frame_fraction(YAW_EASE, delta)),
        }

        let star_target = match self.mode {
            Mode::Tree => STAR_TREE_SCALE,
            Mode::Image => 0.,
        };
        self.star_scale = lerp(
            self.star_scale,
            star_target,
            per_frame_fraction(STAR_EASE, delta),
        );

        let fade = per_frame_fraction(FADE_EASE, delta);
        let has_image = self.image.is_some();

        let plane_target = if self.transitions.revealed() && has_image {
            1.
        } else {
            0.
        };
        self.plane_opacity = lerp(self.plane_opacity, plane_target, fade);

        let points_target = if has_image {
            1. - self.plane_opacity
        } else {
            1.
        };
        self.points_opacity = lerp(self.points_opacity, points_target, fade);

        events
    }

    /// The particles, ready to render.
    pub fn point_cloud(&self) -> PointCloud<'_> {
        PointCloud {
            positions: self.buffers.positions(),
            colours: self.buffers.colours(),
            size: self.config.particle_size,
            opacity: self.points_opacity,
        }
    }

    /// The image plane, if it's visible.
    pub fn image_plane(&self) -> Option<ImagePlane<'_>> {
        if !self.plane_visible() {
            return None;
        }

        self.image.as_deref().map(|pixels| ImagePlane {
            pixels,
            centre: Vec3::new(0., IMAGE_Y_CENTER, 0.),
            size: IMAGE_DISPLAY_SCALE,
            opacity: self.plane_opacity,
        })
    }

    /// Whether the image plane should be drawn.
    pub fn plane_visible(&self) -> bool {
        self.plane_opacity > PLANE_VISIBLE_THRESHOLD
    }

    /// The current config.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The image shown in image mode.
    pub fn image(&self) -> Option<&Arc<PixelGrid>> {
        self.image.as_ref()
    }

    /// The particle buffers.
    pub fn buffers(&self) -> &ParticleBuffers {
        &self.buffers
    }

    /// The current transition phase.
    pub fn phase(&self) -> Phase {
        self.transitions.phase()
    }

    /// Whether the image has been revealed since the last refresh.
    pub fn revealed(&self) -> bool {
        self.transitions.revealed()
    }

    /// The rotation of the tree around the vertical axis.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// The scale of the star on top of the tree.
    pub fn star_scale(&self) -> f32 {
        self.star_scale
    }

    /// The opacity of the image plane.
    pub fn plane_opacity(&self) -> f32 {
        self.plane_opacity
    }

    /// The opacity of the particles.
    pub fn points_opacity(&self) -> f32 {
        self.points_opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::BURST_DURATION;
    use float_cmp::assert_approx_eq;
    use std::time::Duration;

    const FRAME: f32 = 1. / 60.;

    fn config(count: usize) -> TreeConfig {
        TreeConfig {
            particle_count: count,
            ..TreeConfig::default()
        }
    }

    fn gradient() -> Arc<PixelGrid> {
        Arc::new(PixelGrid::from_fn(|x, y| {
            [x as f32 / 99., y as f32 / 99., 0.5, 1.]
        }))
    }

    /// Run the tree at 60fps for the given number of seconds, starting at `start`, and return the
    /// time it got to.
    fn run(tree: &mut ParticleTree, start: Instant, seconds: f32) -> Instant {
        let frames = (seconds / FRAME) as u32;
        let mut now = start;
        for _ in 0..frames {
            now += Duration::from_secs_f32(FRAME);
            tree.update(FRAME, now);
        }
        now
    }

    fn assert_tree_bounds(tree: &ParticleTree) {
        let TreeConfig {
            tree_height,
            tree_width,
            ..
        } = *tree.config();

        for target in tree.buffers().target_positions() {
            assert!(
                (-0.5..=tree_height + 1e-4).contains(&target.y),
                "{target:?}"
            );
            let radial = Vec3::new(target.x, 0., target.z).length();
            assert!(radial <= tree_width / 2. + 1e-4, "{target:?}");
        }
    }

    fn mean_height_and_radius(tree: &ParticleTree) -> (f32, f32) {
        let targets = tree.buffers().target_positions();
        let count = targets.len() as f32;
        let height = targets.iter().map(|p| p.y).sum::<f32>() / count;
        let radius = targets
            .iter()
            .map(|p| Vec3::new(p.x, 0., p.z).length())
            .sum::<f32>()
            / count;
        (height, radius)
    }

    #[test]
    fn mode_toggled_test() {
        assert_eq!(Mode::Tree.toggled(), Mode::Image);
        assert_eq!(Mode::Image.toggled(), Mode::Tree);
    }

    #[test]
    fn tree_targets_stay_in_bounds_after_regenerating() {
        let start = Instant::now();
        let mut tree = ParticleTree::new(config(3000));
        assert_tree_bounds(&tree);

        for i in 0..5 {
            let now = start + Duration::from_millis(100 * i);
            tree.set_mode(Mode::Image, now);
            tree.set_mode(Mode::Tree, now);
            assert_tree_bounds(&tree);
        }

        tree.set_config(
            TreeConfig {
                tree_height: 7.,
                tree_width: 1.,
                ..config(3000)
            },
            start,
        );
        assert_tree_bounds(&tree);
    }

    #[test]
    fn image_targets_copy_pixel_colours_exactly() {
        let start = Instant::now();
        let image = gradient();
        let mut tree = ParticleTree::new(config(12_000));

        tree.set_image(Some(Arc::clone(&image)), start);
        tree.set_mode(Mode::Image, start);
        assert_eq!(tree.phase(), Phase::Bursting);

        for (index, &colour) in tree.buffers().target_colours().iter().enumerate() {
            assert_eq!(colour, image.colour(index % 10_000));
        }
        for target in tree.buffers().target_positions() {
            assert_eq!(target.z, 0.);
        }
    }

    #[test]
    fn tree_image_tree_restores_the_distribution() {
        let start = Instant::now();
        let mut tree = ParticleTree::new(config(5000));
        let (height_before, radius_before) = mean_height_and_radius(&tree);

        tree.set_mode(Mode::Image, start);
        let (_, image_radius) = mean_height_and_radius(&tree);
        assert!(image_radius > 5., "{image_radius}");

        tree.set_mode(Mode::Tree, start + Duration::from_millis(50));
        let (height_after, radius_after) = mean_height_and_radius(&tree);

        assert_approx_eq!(f32, height_before, height_after, epsilon = 0.1);
        assert_approx_eq!(f32, radius_before, radius_after, epsilon = 0.1);
        assert_eq!(tree.phase(), Phase::Steady);
    }

    #[test]
    fn zero_particles_is_a_no_op() {
        let start = Instant::now();
        let mut tree = ParticleTree::new(config(0));

        tree.set_mode(Mode::Image, start);
        tree.set_image(Some(gradient()), start);
        run(&mut tree, start, 2.);

        assert!(tree.point_cloud().positions.is_empty());
        assert!(tree.buffers().is_empty());
    }

    #[test]
    fn burst_timing_is_independent_of_particle_count() {
        for count in [0, 10, 20_000] {
            let start = Instant::now();
            let mut tree = ParticleTree::new(config(count));
            tree.set_mode(Mode::Image, start);

            tree.update(FRAME, start + BURST_DURATION - Duration::from_millis(1));
            assert_eq!(tree.phase(), Phase::Bursting, "count = {count}");

            let events = tree.update(FRAME, start + BURST_DURATION);
            assert_eq!(events, vec![TransitionEvent::BurstEnded], "count = {count}");
            assert_eq!(tree.phase(), Phase::Steady, "count = {count}");
        }
    }

    #[test]
    fn image_cross_fades_in_after_the_reveal() {
        let start = Instant::now();
        let mut tree = ParticleTree::new(config(1000));
        tree.set_image(Some(gradient()), start);
        tree.set_mode(Mode::Image, start);

        run(&mut tree, start, 1.);
        assert!(!tree.revealed());
        assert!(!tree.plane_visible());
        assert!(tree.image_plane().is_none());

        run(&mut tree, start + Duration::from_secs(1), 3.);
        assert!(tree.revealed());
        assert!(tree.plane_opacity() > 0.9, "{}", tree.plane_opacity());
        assert!(tree.points_opacity() < 0.2, "{}", tree.points_opacity());
        assert!(tree.image_plane().is_some());

        // Going back to the tree hides the plane again
        let now = start + Duration::from_secs(4);
        tree.set_mode(Mode::Tree, now);
        run(&mut tree, now, 3.);
        assert!(!tree.plane_visible());
        assert!(tree.points_opacity() > 0.9);
    }

    #[test]
    fn scatter_never_reveals_a_plane() {
        let start = Instant::now();
        let mut tree = ParticleTree::new(config(500));
        tree.set_mode(Mode::Image, start);

        run(&mut tree, start, 3.);
        assert!(tree.revealed());
        assert!(!tree.plane_visible());
        assert_approx_eq!(f32, tree.points_opacity(), 1.);
    }

    #[test]
    fn steady_particles_settle_on_their_targets() {
        let start = Instant::now();
        let mut tree = ParticleTree::new(config(500));
        run(&mut tree, start, 5.);

        let buffers = tree.buffers();
        for (position, target) in buffers.positions().iter().zip(buffers.target_positions()) {
            assert!(position.abs_diff_eq(*target, 1e-3));
        }
    }

    #[test]
    fn yaw_and_star_follow_the_mode() {
        let start = Instant::now();
        let mut tree = ParticleTree::new(config(100));
        run(&mut tree, start, 1.);
        assert!(tree.yaw() > 0.);
        assert_approx_eq!(f32, tree.star_scale(), STAR_TREE_SCALE, epsilon = 1e-3);

        let now = start + Duration::from_secs(1);
        tree.set_mode(Mode::Image, now);
        run(&mut tree, now, 3.);
        assert_approx_eq!(f32, tree.yaw(), 0., epsilon = 1e-3);
        assert_approx_eq!(f32, tree.star_scale(), 0., epsilon = 1e-3);
    }

    #[test]
    fn changing_the_count_reallocates() {
        let start = Instant::now();
        let mut tree = ParticleTree::new(config(100));

        let changes = tree.set_config(config(250), start);
        assert!(changes.count && changes.shape);
        assert_eq!(tree.buffers().len(), 250);
        assert_eq!(tree.buffers().target_colours().len(), 250);

        let changes = tree.set_config(
            TreeConfig {
                rotation_speed: 1.5,
                ..config(250)
            },
            start,
        );
        assert!(!changes.shape);
        assert_eq!(tree.buffers().len(), 250);
    }

    #[test]
    fn setting_the_same_image_does_nothing() {
        let start = Instant::now();
        let image = gradient();
        let mut tree = ParticleTree::new(config(100));
        tree.set_mode(Mode::Image, start);
        tree.set_image(Some(Arc::clone(&image)), start);
        tree.update(FRAME, start + Duration::from_secs(1));
        assert_eq!(tree.phase(), Phase::Steady);

        tree.set_image(Some(image), start + Duration::from_secs(1));
        assert_eq!(tree.phase(), Phase::Steady);
    }

    #[test]
    fn new_image_restarts_the_burst_and_cancels_the_old_reveal() {
        let start = Instant::now();
        let first = gradient();
        let second = Arc::new(PixelGrid::from_fn(|_, _| [1., 0., 0., 1.]));
        let mut tree = ParticleTree::new(config(100));
        tree.set_mode(Mode::Image, start);
        tree.set_image(Some(Arc::clone(&first)), start);

        let events = tree.update(FRAME, start + Duration::from_millis(1300));
        assert_eq!(
            events,
            vec![TransitionEvent::BurstEnded, TransitionEvent::ImageRevealed]
        );
        assert!(tree.revealed());

        // A new image hides the old one and bursts again
        let swap = start + Duration::from_millis(1400);
        tree.set_image(Some(second), swap);
        assert_eq!(tree.phase(), Phase::Bursting);
        assert!(!tree.revealed());

        assert_eq!(
            tree.update(FRAME, swap + Duration::from_millis(500)),
            vec![TransitionEvent::BurstEnded]
        );

        // Another image arrives before that reveal is due
        let swap_again = swap + Duration::from_millis(1100);
        tree.set_image(Some(Arc::clone(&first)), swap_again);
        assert_eq!(tree.phase(), Phase::Bursting);

        assert!(tree
            .update(FRAME, swap + Duration::from_millis(1200))
            .is_empty());
        assert_eq!(tree.phase(), Phase::Bursting);
        assert!(!tree.revealed());

        assert_eq!(
            tree.update(FRAME, swap_again + BURST_DURATION),
            vec![TransitionEvent::BurstEnded]
        );
        assert!(!tree.revealed());

        assert_eq!(
            tree.update(FRAME, swap_again + Duration::from_millis(1200)),
            vec![TransitionEvent::ImageRevealed]
        );
        assert!(tree.revealed());
        assert!(Arc::ptr_eq(
            tree.image().expect("The image should still be set"),
            &first
        ));
    }
}
