//! This crate provides [`TreeConfig`], the user-facing configuration of the tree, along with
//! loading and saving it as RON.

use pt_frame::{parse_hex_colour, Colour, ParseColourError};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    ops::RangeInclusive,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// The default foliage colour.
pub const DEFAULT_PARTICLE_COLOUR: &str = "#1b4d2a";

/// The valid range of [`TreeConfig::rotation_speed`].
pub const ROTATION_SPEED_RANGE: RangeInclusive<f32> = 0.0..=2.0;

/// The valid range of [`TreeConfig::light_intensity`].
pub const LIGHT_INTENSITY_RANGE: RangeInclusive<f32> = 0.0..=10.0;

/// The valid range of [`TreeConfig::particle_count`].
pub const PARTICLE_COUNT_RANGE: RangeInclusive<usize> = 0..=200_000;

/// The valid range of [`TreeConfig::tree_height`].
pub const TREE_HEIGHT_RANGE: RangeInclusive<f32> = 1.0..=10.0;

/// The valid range of [`TreeConfig::tree_width`].
pub const TREE_WIDTH_RANGE: RangeInclusive<f32> = 0.5..=10.0;

/// The valid range of [`TreeConfig::particle_size`].
pub const PARTICLE_SIZE_RANGE: RangeInclusive<f32> = 0.01..=0.2;

/// The valid range of [`TreeConfig::bloom_intensity`].
pub const BLOOM_INTENSITY_RANGE: RangeInclusive<f32> = 0.0..=4.0;

/// The directory to keep config and logs in. This is `$PT_DATA_DIR` or `data` if that isn't set.
pub fn data_dir() -> PathBuf {
    std::env::var_os("PT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// The default path of the config file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.ron")
}

/// An error from loading, saving, or editing a [`TreeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the config file.
    #[error("IO error: `{0:?}`")]
    Io(#[from] io::Error),

    /// The config file wasn't valid RON.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The config couldn't be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    /// There is no config field with this name.
    #[error("Unknown config field `{0}`")]
    UnknownField(String),

    /// The value couldn't be parsed for this field.
    #[error("Invalid value `{value}` for config field `{field}`")]
    InvalidValue {
        /// The name of the field.
        field: String,

        /// The value that failed to parse.
        value: String,
    },

    /// The colour wasn't a valid hex colour.
    #[error("Invalid colour: {0}")]
    Colour(#[from] ParseColourError),
}

/// Which parts of the tree need to be rebuilt after a config change. See [`TreeConfig::changes`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigChange {
    /// The particle count changed, so the buffers need reallocating.
    pub count: bool,

    /// Something that affects the particle targets changed.
    pub shape: bool,

    /// The height or width of the tree changed, so the ornaments need laying out again.
    pub dimensions: bool,
}

/// The configuration of the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// The base colour of the foliage as a hex string like `#1b4d2a`.
    pub particle_colour: String,

    /// How fast the tree spins, in radians per second.
    pub rotation_speed: f32,

    /// The intensity of the environment lighting.
    pub light_intensity: f32,

    /// How many particles make up the tree.
    pub particle_count: usize,

    /// The height of the tree.
    pub tree_height: f32,

    /// The width of the base of the tree.
    pub tree_width: f32,

    /// The size of each particle.
    pub particle_size: f32,

    /// The intensity of the bloom effect.
    pub bloom_intensity: f32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            particle_colour: DEFAULT_PARTICLE_COLOUR.to_string(),
            rotation_speed: 0.6,
            light_intensity: 2.0,
            particle_count: 30_000,
            tree_height: 4.2,
            tree_width: 4.0,
            particle_size: 0.07,
            bloom_intensity: 1.5,
        }
    }
}

/// Clamp the value into the range, or use the default if it's not a finite number.
fn clamp_finite(value: f32, range: &RangeInclusive<f32>, default: f32) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        default
    }
}

impl TreeConfig {
    /// Return a copy of this config with every field forced into its valid range. An invalid
    /// colour is replaced with the default one.
    #[instrument(skip_all)]
    pub fn sanitised(&self) -> Self {
        let default = Self::default();

        let particle_colour = match parse_hex_colour(&self.particle_colour) {
            Ok(_) => self.particle_colour.clone(),
            Err(error) => {
                warn!(colour = ?self.particle_colour, ?error, "Invalid particle colour, using default");
                default.particle_colour
            }
        };

        let sanitised = Self {
            particle_colour,
            rotation_speed: clamp_finite(
                self.rotation_speed,
                &ROTATION_SPEED_RANGE,
                default.rotation_speed,
            ),
            light_intensity: clamp_finite(
                self.light_intensity,
                &LIGHT_INTENSITY_RANGE,
                default.light_intensity,
            ),
            particle_count: self
                .particle_count
                .clamp(*PARTICLE_COUNT_RANGE.start(), *PARTICLE_COUNT_RANGE.end()),
            tree_height: clamp_finite(self.tree_height, &TREE_HEIGHT_RANGE, default.tree_height),
            tree_width: clamp_finite(self.tree_width, &TREE_WIDTH_RANGE, default.tree_width),
            particle_size: clamp_finite(
                self.particle_size,
                &PARTICLE_SIZE_RANGE,
                default.particle_size,
            ),
            bloom_intensity: clamp_finite(
                self.bloom_intensity,
                &BLOOM_INTENSITY_RANGE,
                default.bloom_intensity,
            ),
        };

        if &sanitised != self {
            debug!(before = ?self, after = ?sanitised, "Sanitised config");
        }

        sanitised
    }

    /// The foliage colour as RGB. Falls back to the default colour if the hex string is invalid.
    pub fn base_colour(&self) -> Colour {
        parse_hex_colour(&self.particle_colour)
            .or_else(|_| parse_hex_colour(DEFAULT_PARTICLE_COLOUR))
            .unwrap_or(Colour::ONE)
    }

    /// Work out what needs rebuilding when moving from this config to the new one.
    pub fn changes(&self, new: &Self) -> ConfigChange {
        let count = self.particle_count != new.particle_count;
        let dimensions = self.tree_height != new.tree_height || self.tree_width != new.tree_width;

        ConfigChange {
            count,
            shape: count || dimensions || self.base_colour() != new.base_colour(),
            dimensions,
        }
    }

    /// Set the field with the given name by parsing the given value.
    ///
    /// The value isn't range checked here. Use [`Self::sanitised`] for that.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), ConfigError> {
        /// Parse the value as the given type or return [`ConfigError::InvalidValue`].
        macro_rules! parse {
            () => {
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: field.to_string(),
                        value: value.to_string(),
                    })?
            };
        }

        match field {
            "particle_colour" | "particle_color" => {
                parse_hex_colour(value)?;
                self.particle_colour = value.trim().to_string();
            }
            "rotation_speed" => self.rotation_speed = parse!(),
            "light_intensity" => self.light_intensity = parse!(),
            "particle_count" => self.particle_count = parse!(),
            "tree_height" => self.tree_height = parse!(),
            "tree_width" => self.tree_width = parse!(),
            "particle_size" => self.particle_size = parse!(),
            "bloom_intensity" => self.bloom_intensity = parse!(),
            _ => return Err(ConfigError::UnknownField(field.to_string())),
        };

        Ok(())
    }

    /// Load the config from the given file.
    pub fn try_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }

    /// Load the config from the given file, or use the default if the file is unavailable or
    /// invalid. Also save the default to the file for future editing in that case.
    #[instrument]
    pub fn from_file(path: &Path) -> Self {
        match Self::try_from_file(path) {
            Ok(config) => config.sanitised(),
            Err(error) => {
                warn!(?error, "Unable to load config, using default");

                let default = Self::default();
                if let Err(error) = default.save_to_file(path) {
                    warn!(?error, "Unable to save default config");
                }
                default
            }
        }
    }

    /// Save the config to the given file, creating its parent directory if needed.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::DirBuilder::new().recursive(true).create(parent)?;
        }

        let text = ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default().struct_names(true),
        )?;
        fs::write(path, text)?;

        Ok(())
    }
}
