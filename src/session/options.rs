use crate::config::{Config, SessionConfig, StorageMode, StoreCompression};
use anyhow::{Result, anyhow};
use std::path::PathBuf;

/// Fixed key under which the single board snapshot is stored.
pub const BOARD_STATE_KEY: &str = "vr-board-state";

pub const DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES: u64 = 100 * 1024; // 100 KiB

/// Compression preference for the board store file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Always write plain JSON.
    Off,
    /// Always write gzip-compressed JSON.
    On,
    /// Write gzip when payload exceeds the configured threshold.
    Auto,
}

/// Runtime options derived from configuration for board persistence.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub base_dir: PathBuf,
    pub max_file_size_bytes: u64,
    pub compression: CompressionMode,
    pub auto_compress_threshold_bytes: u64,
    pub backup_retention: usize,
}

impl StoreOptions {
    /// Creates options with sensible defaults. Intended mainly for tests.
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            max_file_size_bytes: 10 * 1024 * 1024,
            compression: CompressionMode::Auto,
            auto_compress_threshold_bytes: DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES,
            backup_retention: 1,
        }
    }

    pub fn board_file_path(&self) -> PathBuf {
        self.base_dir.join(format!("{BOARD_STATE_KEY}.json"))
    }

    pub fn backup_file_path(&self) -> PathBuf {
        self.base_dir.join(format!("{BOARD_STATE_KEY}.json.bak"))
    }

    pub fn lock_file_path(&self) -> PathBuf {
        self.base_dir.join(format!("{BOARD_STATE_KEY}.lock"))
    }
}

/// Build runtime store options from configuration values.
pub fn options_from_config(session_cfg: &SessionConfig) -> Result<StoreOptions> {
    let base_dir = match session_cfg.storage {
        StorageMode::Auto => {
            let root = dirs::data_dir()
                .ok_or_else(|| anyhow!("no platform data directory available"))?;
            root.join("inkboard")
        }
        StorageMode::Config => Config::config_dir()
            .ok_or_else(|| anyhow!("no platform config directory available"))?,
        StorageMode::Custom => {
            let raw = session_cfg.custom_directory.as_ref().ok_or_else(|| {
                anyhow!("session.custom_directory must be set when storage = \"custom\"")
            })?;
            let expanded = expand_tilde(raw);
            if expanded.as_os_str().is_empty() {
                return Err(anyhow!("session.custom_directory resolved to an empty path"));
            }
            expanded
        }
    };

    let mut options = StoreOptions::new(base_dir);
    options.max_file_size_bytes = session_cfg.max_file_size_mb.saturating_mul(1024 * 1024).max(1);
    options.auto_compress_threshold_bytes = session_cfg
        .auto_compress_threshold_kb
        .saturating_mul(1024)
        .max(1);
    options.compression = match session_cfg.compress {
        StoreCompression::Auto => CompressionMode::Auto,
        StoreCompression::On => CompressionMode::On,
        StoreCompression::Off => CompressionMode::Off,
    };
    options.backup_retention = session_cfg.backup_retention;

    Ok(options)
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
