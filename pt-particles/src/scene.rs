//! This module handles the [`Scene`], which puts the particle tree, its ornaments, the snow, and
//! the camera together, and tracks which screen the app is on.

use crate::{
    camera::CameraRig,
    easing::sanitise_delta,
    ornaments::OrnamentLayer,
    rng,
    snow::SnowField,
    transition::TransitionEvent,
    tree::{Mode, ParticleTree},
};
use pt_config::TreeConfig;
use pt_frame::{Lighting, PixelGrid, SceneFrame, TreeOrnaments};
use rand::rngs::StdRng;
use std::{sync::Arc, time::Instant};
use tracing::{debug, info, instrument};

/// Which screen the app is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Stage {
    /// The opening screen, with the scene blurred behind it.
    #[default]
    Splash,

    /// The tree itself.
    Main,
}

/// Everything in the scene, plus the state of the app around it.
#[derive(Debug)]
pub struct Scene {
    /// The particles.
    tree: ParticleTree,

    /// The decorations and ribbon.
    ornaments: OrnamentLayer,

    /// The falling snow.
    snow: SnowField,

    /// The camera.
    camera: CameraRig,

    /// Which screen we're on.
    stage: Stage,

    /// Whether the settings panel is open.
    settings_open: bool,

    /// The total simulated time in seconds.
    elapsed: f32,

    /// The RNG used to lay out the ornaments.
    rng: StdRng,
}

impl Scene {
    /// Create a scene on the splash screen, with the tree built from the given config.
    #[instrument(skip_all)]
    pub fn new(config: TreeConfig) -> Self {
        let tree = ParticleTree::new(config);
        let mut rng = rng!();
        let ornaments = OrnamentLayer::new(
            tree.config().tree_height,
            tree.config().tree_width,
            &mut rng,
        );

        Self {
            tree,
            ornaments,
            snow: SnowField::new(),
            camera: CameraRig::new(),
            stage: Stage::Splash,
            settings_open: false,
            elapsed: 0.,
            rng,
        }
    }

    /// Leave the splash screen for the main scene and close the settings.
    pub fn start(&mut self) {
        info!("Starting");
        self.stage = Stage::Main;
        self.settings_open = false;
    }

    /// Handle a click on the star on top of the tree. From the main scene, this goes back to the
    /// splash screen and the tree.
    pub fn star_clicked(&mut self, now: Instant) {
        if self.stage == Stage::Main {
            info!("Returning to splash screen");
            self.stage = Stage::Splash;
            self.tree.set_mode(Mode::Tree, now);
        }
    }

    /// Handle a click anywhere in the scene. In image mode, this goes back to the tree.
    pub fn scene_clicked(&mut self, now: Instant) {
        if self.tree.mode() == Mode::Image {
            self.tree.set_mode(Mode::Tree, now);
        }
    }

    /// Handle a double click anywhere in the scene, which toggles between the tree and the image.
    pub fn double_clicked(&mut self, now: Instant) {
        self.tree.set_mode(self.tree.mode().toggled(), now);
    }

    /// Open or close the settings panel.
    pub fn set_settings_open(&mut self, open: bool) {
        debug!(open, "Settings panel");
        self.settings_open = open;
    }

    /// Switch the particles to the given mode.
    pub fn set_mode(&mut self, mode: Mode, now: Instant) {
        self.tree.set_mode(mode, now);
    }

    /// Set the selected image.
    pub fn set_image(&mut self, image: Option<Arc<PixelGrid>>, now: Instant) {
        self.tree.set_image(image, now);
    }

    /// Apply a new config to the tree, laying out the ornaments again if the tree changed size.
    pub fn set_config(&mut self, config: TreeConfig, now: Instant) {
        let changes = self.tree.set_config(config, now);

        if changes.dimensions {
            let config = self.tree.config();
            self.ornaments
                .relayout(config.tree_height, config.tree_width, &mut self.rng);
        }
    }

    /// Drag the camera around the tree. This only works while looking at the tree.
    pub fn orbit(&mut self, azimuth: f32, polar: f32) {
        if self.tree.mode() == Mode::Tree && self.content_visible() && !self.blurred() {
            self.camera.orbit(azimuth, polar);
        }
    }

    /// Zoom the camera in or out by the given factor.
    pub fn zoom(&mut self, factor: f32) {
        self.camera.zoom(factor);
    }

    /// Advance everything by `delta` seconds, firing any transition timers due at `now`.
    pub fn update(&mut self, delta: f32, now: Instant) -> Vec<TransitionEvent> {
        let delta = sanitise_delta(delta);
        self.elapsed += delta;

        let events = self.tree.update(delta, now);
        let mode = self.tree.mode();

        self.ornaments.update(mode, self.elapsed, delta);
        self.snow.update(self.elapsed, delta);
        self.camera.update(
            mode,
            self.content_visible(),
            self.tree.config().rotation_speed,
            delta,
        );

        events
    }

    /// Whether the tree and everything on it should be drawn.
    pub fn content_visible(&self) -> bool {
        self.stage == Stage::Main || self.settings_open
    }

    /// Whether the scene should be blurred behind the splash screen.
    pub fn blurred(&self) -> bool {
        self.stage == Stage::Splash && !self.settings_open
    }

    /// The lighting for the current mode.
    fn lighting(&self) -> Lighting {
        let config = self.tree.config();
        let image_mode = self.tree.mode() == Mode::Image;

        Lighting {
            ambient: if image_mode { 2.0 } else { 0.8 },
            point: if image_mode { 1.5 } else { 0.5 },
            environment: config.light_intensity,
            bloom: config.bloom_intensity,
            vignette_offset: if image_mode { 0.05 } else { 0.15 },
            vignette_darkness: if image_mode { 0.3 } else { 0.9 },
        }
    }

    /// Take a snapshot of the scene for a renderer.
    pub fn frame(&self) -> SceneFrame<'_> {
        let ornaments = (self.tree.mode() == Mode::Tree).then(|| TreeOrnaments {
            decorations: self.ornaments.decorations(),
            decoration_scales: self.ornaments.scales(),
            decoration_glows: self.ornaments.glows(),
            ribbon: self.ornaments.ribbon(),
            ribbon_glow: self.ornaments.ribbon_glow(),
            star_position: self.ornaments.star_position(),
            star_scale: self.tree.star_scale(),
        });

        SceneFrame {
            points: self.tree.point_cloud(),
            yaw: self.tree.yaw(),
            ornaments,
            image_plane: self.tree.image_plane(),
            snow: self.snow.positions(),
            camera: self.camera.view(),
            lighting: self.lighting(),
            content_visible: self.content_visible(),
            blurred: self.blurred(),
        }
    }

    /// The particle tree.
    pub fn tree(&self) -> &ParticleTree {
        &self.tree
    }

    /// The camera.
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// Which screen we're on.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether the settings panel is open.
    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    /// The total simulated time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::time::Duration;

    fn scene() -> Scene {
        Scene::new(TreeConfig {
            particle_count: 500,
            ..TreeConfig::default()
        })
    }

    #[test]
    fn visibility_follows_stage_and_settings() {
        let mut scene = scene();

        for (stage, settings_open, visible, blurred) in [
            (Stage::Splash, false, false, true),
            (Stage::Splash, true, true, false),
            (Stage::Main, false, true, false),
            (Stage::Main, true, true, false),
        ] {
            scene.stage = stage;
            scene.set_settings_open(settings_open);
            assert_eq!(scene.content_visible(), visible, "{stage} {settings_open}");
            assert_eq!(scene.blurred(), blurred, "{stage} {settings_open}");

            let frame = scene.frame();
            assert_eq!(frame.content_visible, visible);
            assert_eq!(frame.blurred, blurred);
        }
    }

    #[test]
    fn start_closes_settings() {
        let mut scene = scene();
        scene.set_settings_open(true);
        scene.start();

        assert_eq!(scene.stage(), Stage::Main);
        assert!(!scene.settings_open());
    }

    #[test]
    fn star_click_returns_to_splash_only_from_main() {
        let now = Instant::now();
        let mut scene = scene();

        scene.set_mode(Mode::Image, now);
        scene.star_clicked(now);
        assert_eq!(scene.stage(), Stage::Splash);
        assert_eq!(scene.tree().mode(), Mode::Image);

        scene.start();
        scene.star_clicked(now);
        assert_eq!(scene.stage(), Stage::Splash);
        assert_eq!(scene.tree().mode(), Mode::Tree);
    }

    #[test]
    fn clicks_switch_modes() {
        let now = Instant::now();
        let mut scene = scene();
        scene.start();

        scene.scene_clicked(now);
        assert_eq!(scene.tree().mode(), Mode::Tree);

        scene.double_clicked(now);
        assert_eq!(scene.tree().mode(), Mode::Image);

        scene.scene_clicked(now);
        assert_eq!(scene.tree().mode(), Mode::Tree);

        scene.double_clicked(now);
        scene.double_clicked(now);
        assert_eq!(scene.tree().mode(), Mode::Tree);
    }

    #[test]
    fn ornaments_and_lighting_follow_the_mode() {
        let now = Instant::now();
        let mut scene = scene();
        scene.start();

        let frame = scene.frame();
        assert!(frame.ornaments.is_some());
        assert_eq!(frame.lighting.ambient, 0.8);
        assert_eq!(frame.lighting.vignette_darkness, 0.9);
        assert_eq!(frame.lighting.bloom, 1.5);

        scene.set_mode(Mode::Image, now);
        let frame = scene.frame();
        assert!(frame.ornaments.is_none());
        assert_eq!(frame.lighting.ambient, 2.0);
        assert_eq!(frame.lighting.point, 1.5);
        assert_eq!(frame.lighting.vignette_offset, 0.05);
    }

    #[test]
    fn resizing_the_tree_moves_the_star() {
        let now = Instant::now();
        let mut scene = scene();

        scene.set_config(
            TreeConfig {
                tree_height: 6.,
                particle_count: 500,
                ..TreeConfig::default()
            },
            now,
        );

        let ornaments = scene.frame().ornaments.expect("Tree mode should have ornaments");
        assert_eq!(ornaments.star_position, Vec3::new(0., 6.05, 0.));
        assert_eq!(ornaments.decorations.len(), 22);
    }

    #[test]
    fn camera_only_orbits_while_looking_at_the_tree() {
        let now = Instant::now();
        let mut scene = scene();

        scene.orbit(1., 0.);
        assert_eq!(scene.camera().azimuth(), 0.);

        scene.start();
        scene.orbit(1., 0.);
        assert_eq!(scene.camera().azimuth(), 1.);

        scene.set_mode(Mode::Image, now);
        scene.orbit(1., 0.);
        assert_eq!(scene.camera().azimuth(), 1.);
    }

    #[test]
    fn non_finite_orbit_leaves_the_camera_usable() {
        let start = Instant::now();
        let mut scene = scene();
        scene.start();

        scene.orbit(f32::INFINITY, f32::NAN);
        scene.set_mode(Mode::Image, start);

        let mut now = start;
        for _ in 0..600 {
            now += Duration::from_millis(16);
            scene.update(1. / 60., now);
        }

        let camera = scene.frame().camera;
        assert!(camera.position.is_finite());
        assert!(scene.camera().position().abs_diff_eq(Vec3::new(0., 1.2, 14.), 1e-3));
    }

    #[test]
    fn update_advances_time_and_fires_transitions() {
        let start = Instant::now();
        let mut scene = scene();
        scene.start();
        scene.double_clicked(start);

        let mut events = vec![];
        let mut now = start;
        for _ in 0..120 {
            now += Duration::from_millis(16);
            events.extend(scene.update(0.016, now));
        }

        assert_eq!(
            events,
            vec![TransitionEvent::BurstEnded, TransitionEvent::ImageRevealed]
        );
        assert!((scene.elapsed() - 1.92).abs() < 1e-3);
        assert_eq!(scene.frame().snow.len(), crate::SNOWFLAKE_COUNT);
    }
}
