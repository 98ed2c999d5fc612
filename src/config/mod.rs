//! Configuration file support for figure-actions.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/figure-actions/config.toml`. Settings cover gesture timing,
//! edge band width and the triggers of the contour drawing action.
//!
//! If no config file exists, defaults are used automatically.

pub mod types;

pub use types::{ContoursConfig, InteractionConfig};

use crate::input::zone::MAX_EDGE_FRACTION;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MAX_DELAY_SECONDS: f64 = 5.0;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [interaction]
/// edge_fraction = 0.2
/// delay_seconds = 0.2
///
/// [contours]
/// add_point = { zone = "centre", button = "left", gesture = "click" }
/// remove_artist = { zone = ["centre", "edge"], button = "right", gesture = "pick" }
/// num_points = -1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Gesture classification settings
    #[serde(default)]
    pub interaction: InteractionConfig,

    /// Contour drawing action settings
    #[serde(default)]
    pub contours: ContoursConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `interaction.edge_fraction`: 0.0 - 0.5
    /// - `interaction.delay_seconds`: 0.0 - 5.0
    pub fn validate_and_clamp(&mut self) {
        let fraction = self.interaction.edge_fraction;
        if fraction.is_nan() {
            log::warn!("Invalid edge_fraction NaN, falling back to 0.2");
            self.interaction.edge_fraction = 0.2;
        } else if !(0.0..=MAX_EDGE_FRACTION).contains(&fraction) {
            log::warn!(
                "Invalid edge_fraction {:.3}, clamping to 0.0-{:.1} range",
                fraction,
                MAX_EDGE_FRACTION
            );
            self.interaction.edge_fraction = fraction.clamp(0.0, MAX_EDGE_FRACTION);
        }

        let delay = self.interaction.delay_seconds;
        if delay.is_nan() {
            log::warn!("Invalid delay_seconds NaN, falling back to 0.2");
            self.interaction.delay_seconds = 0.2;
        } else if !(0.0..=MAX_DELAY_SECONDS).contains(&delay) {
            log::warn!(
                "Invalid delay_seconds {:.3}, clamping to 0.0-{:.1} range",
                delay,
                MAX_DELAY_SECONDS
            );
            self.interaction.delay_seconds = delay.clamp(0.0, MAX_DELAY_SECONDS);
        }

        let contours = &self.contours;
        for (name, signature) in [
            ("add_point", &contours.add_point),
            ("remove_artist", &contours.remove_artist),
            ("clear_drawing", &contours.clear_drawing),
        ] {
            if signature.zone.is_empty() {
                log::warn!("Contour trigger '{}' matches no zone and will never fire", name);
            }
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/figure-actions/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("figure-actions");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `path`, or returns defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Serializes the config to TOML and writes it to `path`, creating the
    /// parent directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
