//! Persisted user settings.
//!
//! Stored as a flat JSON object with camelCase keys. Loading merges the file over
//! [`Settings::default`] one field at a time: a key that is missing or `null` keeps its
//! default, keys this version does not know are ignored.

use crate::direction::Direction;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key of the horizontal padding flag.
pub const ADD_SPACE_BETWEEN_KEY: &str = "addSpaceBetween";

/// Errors raised while reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file exists but could not be read.
    #[error("failed to read settings at {path}: {source}")]
    Read {
        /// Settings file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not a JSON object of the expected shape.
    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        /// Settings file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The file (or its directory) could not be written.
    #[error("failed to write settings to {path}: {source}")]
    Write {
        /// Settings file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Serialising the settings failed.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
    /// `key=value` naming a key that does not exist.
    #[error("unknown setting '{0}'")]
    UnknownKey(String),
    /// `key=value` whose value is not a boolean.
    #[error("setting '{key}' expects true or false, got '{value}'")]
    InvalidValue {
        /// Setting key.
        key: String,
        /// Rejected value.
        value: String,
    },
}

/// Process-wide configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Put one space between the original and a horizontal duplicate.
    pub add_space_between: bool,
    /// Enables `duplicate-line-down`.
    pub duplicate_line_down: bool,
    /// Enables `duplicate-line-up`.
    pub duplicate_line_up: bool,
    /// Enables `duplicate-line-left`.
    pub duplicate_line_left: bool,
    /// Enables `duplicate-line-right`.
    pub duplicate_line_right: bool,
    /// Enables `duplicate-selection-down`.
    pub duplicate_selection_down: bool,
    /// Enables `duplicate-selection-up`.
    pub duplicate_selection_up: bool,
    /// Enables `duplicate-right-then-down`.
    pub duplicate_right_then_down: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            add_space_between: true,
            duplicate_line_down: true,
            duplicate_line_up: true,
            duplicate_line_left: true,
            duplicate_line_right: true,
            duplicate_selection_down: true,
            duplicate_selection_up: true,
            duplicate_right_then_down: false,
        }
    }
}

/// Settings as found on disk: every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredSettings {
    add_space_between: Option<bool>,
    duplicate_line_down: Option<bool>,
    duplicate_line_up: Option<bool>,
    duplicate_line_left: Option<bool>,
    duplicate_line_right: Option<bool>,
    duplicate_selection_down: Option<bool>,
    duplicate_selection_up: Option<bool>,
    duplicate_right_then_down: Option<bool>,
}

impl Settings {
    /// Fill every field of `stored` that is absent with its default.
    pub fn merge_with_defaults(stored: StoredSettings) -> Self {
        let d = Self::default();
        Self {
            add_space_between: stored.add_space_between.unwrap_or(d.add_space_between),
            duplicate_line_down: stored.duplicate_line_down.unwrap_or(d.duplicate_line_down),
            duplicate_line_up: stored.duplicate_line_up.unwrap_or(d.duplicate_line_up),
            duplicate_line_left: stored.duplicate_line_left.unwrap_or(d.duplicate_line_left),
            duplicate_line_right: stored
                .duplicate_line_right
                .unwrap_or(d.duplicate_line_right),
            duplicate_selection_down: stored
                .duplicate_selection_down
                .unwrap_or(d.duplicate_selection_down),
            duplicate_selection_up: stored
                .duplicate_selection_up
                .unwrap_or(d.duplicate_selection_up),
            duplicate_right_then_down: stored
                .duplicate_right_then_down
                .unwrap_or(d.duplicate_right_then_down),
        }
    }

    /// Parse a JSON document and merge it over the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let stored: StoredSettings = serde_json::from_str(json)?;
        Ok(Self::merge_with_defaults(stored))
    }

    /// Pretty-printed JSON with every key present.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// JSON key of the enable flag for `direction`.
    pub fn enabled_key(direction: Direction) -> &'static str {
        match direction {
            Direction::Down => "duplicateLineDown",
            Direction::Up => "duplicateLineUp",
            Direction::Left => "duplicateLineLeft",
            Direction::Right => "duplicateLineRight",
            Direction::SelectionDown => "duplicateSelectionDown",
            Direction::SelectionUp => "duplicateSelectionUp",
            Direction::RightThenDown => "duplicateRightThenDown",
        }
    }

    /// Whether the command for `direction` is enabled.
    pub fn is_enabled(&self, direction: Direction) -> bool {
        match direction {
            Direction::Down => self.duplicate_line_down,
            Direction::Up => self.duplicate_line_up,
            Direction::Left => self.duplicate_line_left,
            Direction::Right => self.duplicate_line_right,
            Direction::SelectionDown => self.duplicate_selection_down,
            Direction::SelectionUp => self.duplicate_selection_up,
            Direction::RightThenDown => self.duplicate_right_then_down,
        }
    }

    /// Enable or disable the command for `direction`.
    pub fn set_enabled(&mut self, direction: Direction, enabled: bool) {
        let flag = match direction {
            Direction::Down => &mut self.duplicate_line_down,
            Direction::Up => &mut self.duplicate_line_up,
            Direction::Left => &mut self.duplicate_line_left,
            Direction::Right => &mut self.duplicate_line_right,
            Direction::SelectionDown => &mut self.duplicate_selection_down,
            Direction::SelectionUp => &mut self.duplicate_selection_up,
            Direction::RightThenDown => &mut self.duplicate_right_then_down,
        };
        *flag = enabled;
    }

    /// Set a flag by its JSON key from a `key=value` assignment.
    pub fn assign(&mut self, assignment: &str) -> Result<(), SettingsError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| SettingsError::InvalidValue {
                key: assignment.to_string(),
                value: String::new(),
            })?;
        let (key, value) = (key.trim(), value.trim());
        let value = match value {
            "true" | "on" | "1" => true,
            "false" | "off" | "0" => false,
            _ => {
                return Err(SettingsError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        };

        if key == ADD_SPACE_BETWEEN_KEY {
            self.add_space_between = value;
            return Ok(());
        }
        let direction = Direction::ALL
            .into_iter()
            .find(|d| Self::enabled_key(*d) == key)
            .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
        self.set_enabled(direction, value);
        Ok(())
    }
}

/// Settings bound to the file they are persisted in.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Default location: `<config dir>/dupline/settings.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dupline").join("settings.json"))
    }

    /// Load the file at `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Settings not found at {}, using defaults", path.display());
                return Ok(Self {
                    path,
                    settings: Settings::default(),
                });
            }
            Err(source) => return Err(SettingsError::Read { path, source }),
        };

        let settings = Settings::from_json(&content).map_err(|source| SettingsError::Parse {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(Self { path, settings })
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutate the settings and persist them.
    pub fn update(&mut self, f: impl FnOnce(&mut Settings)) -> Result<(), SettingsError> {
        f(&mut self.settings);
        self.save()
    }

    /// Write the settings, creating the parent directory if needed.
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        let content = self.settings.to_json().map_err(SettingsError::Serialize)?;
        std::fs::write(&self.path, content).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
