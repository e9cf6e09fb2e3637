//! Configuration type definitions.

use super::enums::{ColorSpec, StorageMode, StoreCompression};
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the appearance of the brushes and of newly created shapes
/// when the board first opens. All values can be changed at runtime from
/// the properties panel.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Initial drawing color - hex string or RGB array
    #[serde(default = "default_drawing_color")]
    pub default_color: ColorSpec,

    /// Initial stroke width in pixels (valid range: 1 - 100)
    #[serde(default = "default_stroke_width")]
    pub default_stroke_width: u32,

    /// Whether new strokes and shapes start dashed
    #[serde(default)]
    pub default_dashed: bool,

    /// Highlighter brush color; the alpha channel controls translucency
    #[serde(default = "default_highlighter_color")]
    pub highlighter_color: ColorSpec,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_drawing_color(),
            default_stroke_width: default_stroke_width(),
            default_dashed: false,
            highlighter_color: default_highlighter_color(),
        }
    }
}

/// Undo history settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of undo entries kept in memory (valid range: 1 - 500)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

/// Board persistence settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where the board store file lives
    #[serde(default = "default_storage_mode")]
    pub storage: StorageMode,

    /// Directory used when `storage = "custom"`
    #[serde(default)]
    pub custom_directory: Option<String>,

    /// Compression preference for the store file
    #[serde(default = "default_compression")]
    pub compress: StoreCompression,

    /// Refuse to save or load store files larger than this (MiB)
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Auto-compression kicks in above this payload size (KiB)
    #[serde(default = "default_auto_compress_threshold_kb")]
    pub auto_compress_threshold_kb: u64,

    /// How many rotated backups of the previous store file to keep (0 or 1)
    #[serde(default = "default_backup_retention")]
    pub backup_retention: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage: default_storage_mode(),
            custom_directory: None,
            compress: default_compression(),
            max_file_size_mb: default_max_file_size_mb(),
            auto_compress_threshold_kb: default_auto_compress_threshold_kb(),
            backup_retention: default_backup_retention(),
        }
    }
}

/// UI preferences.
#[derive(Debug, Serialize, Deserialize)]
pub struct UiConfig {
    /// Start in dark mode
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: default_dark_mode(),
        }
    }
}

fn default_drawing_color() -> ColorSpec {
    ColorSpec::Hex("#f3f4f6".to_string())
}

fn default_stroke_width() -> u32 {
    3
}

fn default_highlighter_color() -> ColorSpec {
    ColorSpec::Rgba([255, 255, 0, 102])
}

fn default_max_entries() -> usize {
    crate::history::DEFAULT_HISTORY_LIMIT
}

fn default_storage_mode() -> StorageMode {
    StorageMode::Auto
}

fn default_compression() -> StoreCompression {
    StoreCompression::Auto
}

fn default_max_file_size_mb() -> u64 {
    10
}

fn default_auto_compress_threshold_kb() -> u64 {
    100
}

fn default_backup_retention() -> usize {
    1
}

fn default_dark_mode() -> bool {
    true
}
