//! Configuration file support for inkboard.
//!
//! Loads and validates user settings from
//! `~/.config/inkboard/config.toml`: drawing defaults, undo history depth,
//! board persistence, and UI preferences. If no config file exists,
//! sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::{ColorSpec, StorageMode, StoreCompression};
pub use types::{DrawingConfig, HistoryConfig, SessionConfig, UiConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure containing all user settings.
///
/// Root type deserialized from the TOML file. Every field has a default
/// and may be omitted.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#6366f1"
/// default_stroke_width = 3
///
/// [history]
/// max_entries = 20
///
/// [session]
/// storage = "auto"
/// compress = "auto"
///
/// [ui]
/// dark_mode = true
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Brush and shape defaults
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Undo history depth
    #[serde(default)]
    pub history: HistoryConfig,

    /// Board persistence settings
    #[serde(default)]
    pub session: SessionConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Validates and clamps configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a
    /// warning is logged.
    fn validate_and_clamp(&mut self) {
        // Stroke width: 1 - 100
        if !(1..=100).contains(&self.drawing.default_stroke_width) {
            log::warn!(
                "Invalid default_stroke_width {}, clamping to 1-100 range",
                self.drawing.default_stroke_width
            );
            self.drawing.default_stroke_width = self.drawing.default_stroke_width.clamp(1, 100);
        }

        // History depth: 1 - 500
        if !(1..=500).contains(&self.history.max_entries) {
            log::warn!(
                "Invalid history.max_entries {}, clamping to 1-500 range",
                self.history.max_entries
            );
            self.history.max_entries = self.history.max_entries.clamp(1, 500);
        }

        // Backup retention: 0 or 1
        if self.session.backup_retention > 1 {
            log::warn!(
                "Invalid session.backup_retention {}, clamping to 1",
                self.session.backup_retention
            );
            self.session.backup_retention = 1;
        }
    }

    /// Loads configuration from the default path, falling back to
    /// defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(path),
            None => {
                debug!("No config directory available; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}; using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate_and_clamp();
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default config file location (`~/.config/inkboard/config.toml`).
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("inkboard").join("config.toml"))
    }

    /// Directory containing the config file, used by `storage = "config"`.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("inkboard"))
    }
}
