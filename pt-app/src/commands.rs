//! This module parses the commands that can be typed into `stdin` while the app is running.

use pt_gallery::ImageId;
use pt_gesture::{HandLandmarks, ParseLandmarksError};
use pt_particles::Mode;
use std::{path::PathBuf, str::FromStr};
use thiserror::Error;

/// The help text listing every command.
pub const HELP: &str = "\
Commands:
  start                  leave the splash screen
  star                   click the star on top of the tree
  click                  click the scene
  dblclick               double click the scene
  tree | image           switch mode
  settings               open or close the settings panel
  upload <paths..>       add images to the gallery
  select <n>             select the nth image in the gallery
  remove <id>            remove the image with the given ID
  images                 list the images in the gallery
  set <field> <value>    change a config field
  save                   save the config
  orbit <azimuth> <polar>  drag the camera by the given angles
  zoom <factor>          move the camera closer or further away
  hand <63 numbers>      feed the landmarks of a tracked hand
  hand none              report that no hand is visible
  help                   show this text
  quit                   save and exit";

/// A command typed into `stdin`.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Leave the splash screen.
    Start,

    /// Click the star on top of the tree.
    Star,

    /// Click the scene.
    Click,

    /// Double click the scene.
    DoubleClick,

    /// Switch to the given mode.
    Mode(Mode),

    /// Open or close the settings panel.
    ToggleSettings,

    /// Sample these images and add them to the gallery.
    Upload(Vec<PathBuf>),

    /// Select the image at this index.
    Select(usize),

    /// Remove the image with this ID.
    Remove(ImageId),

    /// List the images in the gallery.
    ListImages,

    /// Set a config field.
    Set {
        /// The name of the field.
        field: String,

        /// The new value, unparsed.
        value: String,
    },

    /// Save the config to its file.
    Save,

    /// Drag the camera by these angles.
    Orbit {
        /// The horizontal angle in radians.
        azimuth: f32,

        /// The vertical angle in radians.
        polar: f32,
    },

    /// Zoom the camera by this factor.
    Zoom(f32),

    /// One frame of hand tracking. `None` means no hand was visible.
    Hand(Option<Box<HandLandmarks>>),

    /// Show the help text.
    Help,

    /// Save and exit.
    Quit,
}

/// An error encountered while parsing a [`Command`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseCommandError {
    /// The line was blank.
    #[error("Empty command")]
    Empty,

    /// The first word wasn't a command.
    #[error("Unknown command {0:?}. Type `help` for a list of commands")]
    Unknown(String),

    /// The command needs an argument that wasn't given.
    #[error("Command `{0}` is missing an argument")]
    MissingArgument(&'static str),

    /// An argument couldn't be parsed.
    #[error("Invalid argument {value:?} for `{command}`")]
    InvalidArgument {
        /// The command being parsed.
        command: &'static str,

        /// The argument that was invalid.
        value: String,
    },

    /// The hand landmarks couldn't be parsed.
    #[error("Invalid hand landmarks: {0}")]
    Landmarks(#[from] ParseLandmarksError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));
        let mut words = rest.split_whitespace();

        /// Take the next word and parse it, or return an error if it's missing or invalid.
        macro_rules! arg {
            ($command:literal) => {{
                let word = words
                    .next()
                    .ok_or(ParseCommandError::MissingArgument($command))?;
                word.parse()
                    .map_err(|_| ParseCommandError::InvalidArgument {
                        command: $command,
                        value: word.to_string(),
                    })?
            }};
        }

        let command = match name.to_lowercase().as_str() {
            "" => return Err(ParseCommandError::Empty),
            "start" => Self::Start,
            "star" => Self::Star,
            "click" => Self::Click,
            "dblclick" | "doubleclick" => Self::DoubleClick,
            "tree" => Self::Mode(Mode::Tree),
            "image" => Self::Mode(Mode::Image),
            "settings" => Self::ToggleSettings,
            "upload" => {
                let paths: Vec<PathBuf> = words.map(PathBuf::from).collect();
                if paths.is_empty() {
                    return Err(ParseCommandError::MissingArgument("upload"));
                }
                Self::Upload(paths)
            }
            "select" => Self::Select(arg!("select")),
            "remove" => Self::Remove(ImageId::new(arg!("remove"))),
            "images" => Self::ListImages,
            "set" => {
                let field = words
                    .next()
                    .ok_or(ParseCommandError::MissingArgument("set"))?
                    .to_string();
                let value = words.collect::<Vec<_>>().join(" ");
                if value.is_empty() {
                    return Err(ParseCommandError::MissingArgument("set"));
                }
                Self::Set { field, value }
            }
            "save" => Self::Save,
            "orbit" => Self::Orbit {
                azimuth: arg!("orbit"),
                polar: arg!("orbit"),
            },
            "zoom" => Self::Zoom(arg!("zoom")),
            "hand" => match rest {
                "" => return Err(ParseCommandError::MissingArgument("hand")),
                none if none.eq_ignore_ascii_case("none") => Self::Hand(None),
                landmarks => Self::Hand(Some(Box::new(landmarks.parse()?))),
            },
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(ParseCommandError::Unknown(name.to_string())),
        };

        Ok(command)
    }
}
