//! This module holds the [`App`], which owns the scene and the gallery and carries out commands.

use crate::commands::{Command, HELP};
use pt_config::TreeConfig;
use pt_gallery::Gallery;
use pt_gesture::HandTracker;
use pt_particles::Scene;
use std::{path::PathBuf, sync::Arc, time::Instant};
use tracing::{debug, info, instrument, warn};

/// Whether the frame loop should keep going after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,

    /// Save and exit.
    Quit,
}

/// Everything the app needs between frames.
#[derive(Debug)]
pub struct App {
    /// The scene being rendered.
    pub scene: Scene,

    /// The uploaded photos.
    pub gallery: Gallery,

    /// The hand tracker.
    pub hands: HandTracker,

    /// Where to save the config.
    config_path: PathBuf,
}

impl App {
    /// Create the app with the given config, which gets saved to the given path.
    pub fn new(config: TreeConfig, config_path: PathBuf) -> Self {
        Self {
            scene: Scene::new(config),
            gallery: Gallery::new(),
            hands: HandTracker::new(),
            config_path,
        }
    }

    /// Give the selected gallery image to the scene.
    fn sync_selected_image(&mut self, now: Instant) {
        let pixels = self
            .gallery
            .selected()
            .map(|image| Arc::clone(&image.pixels));
        self.scene.set_image(pixels, now);
    }

    /// Sample the given images, add them to the gallery, and show the selected one.
    pub async fn upload(&mut self, paths: &[PathBuf], now: Instant) {
        self.gallery.upload(paths).await;
        self.sync_selected_image(now);
    }

    /// Save the config to its file, logging any error.
    #[instrument(skip_all, fields(path = ?self.config_path))]
    pub fn save_config(&self) {
        match self.scene.tree().config().save_to_file(&self.config_path) {
            Ok(()) => info!("Saved config"),
            Err(error) => warn!(%error, "Unable to save config"),
        }
    }

    /// Carry out the given command at the given time.
    #[instrument(skip(self, now))]
    pub async fn handle(&mut self, command: Command, now: Instant) -> Control {
        match command {
            Command::Start => self.scene.start(),
            Command::Star => self.scene.star_clicked(now),
            Command::Click => self.scene.scene_clicked(now),
            Command::DoubleClick => self.scene.double_clicked(now),
            Command::Mode(mode) => self.scene.set_mode(mode, now),
            Command::ToggleSettings => {
                let open = !self.scene.settings_open();
                self.scene.set_settings_open(open);
            }
            Command::Upload(paths) => self.upload(&paths, now).await,
            Command::Select(index) => {
                if self.gallery.select(index) {
                    self.sync_selected_image(now);
                } else {
                    warn!(index, count = self.gallery.len(), "No image at that index");
                }
            }
            Command::Remove(id) => {
                if self.gallery.remove(id) {
                    self.sync_selected_image(now);
                } else {
                    warn!(%id, "No image with that ID");
                }
            }
            Command::ListImages => {
                for (index, image) in self.gallery.images().iter().enumerate() {
                    let selected = index == self.gallery.selected_index();
                    info!(index, id = %image.id, source = ?image.source, selected);
                }
            }
            Command::Set { field, value } => {
                let mut config = self.scene.tree().config().clone();
                match config.set_field(&field, &value) {
                    Ok(()) => {
                        self.scene.set_config(config, now);
                        debug!(config = ?self.scene.tree().config(), "Updated config");
                    }
                    Err(error) => warn!(%error, "Unable to set config field"),
                }
            }
            Command::Save => self.save_config(),
            Command::Orbit { azimuth, polar } => self.scene.orbit(azimuth, polar),
            Command::Zoom(factor) => self.scene.zoom(factor),
            Command::Hand(landmarks) => {
                let data = self.hands.process(landmarks.as_deref());
                info!(
                    gesture = %data.gesture,
                    x = data.x,
                    y = data.y,
                    detected = data.detected,
                    "Hand"
                );
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Control::Quit,
        }

        Control::Continue
    }
}
