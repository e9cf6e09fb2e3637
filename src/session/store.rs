//! On-disk board store: one serialized scene snapshot under a fixed key.

use super::options::{CompressionMode, StoreOptions};
use crate::draw::SceneContents;
use anyhow::{Context, Result};
use chrono::Utc;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct BoardFile {
    version: u32,
    last_modified: String,
    board: SceneContents,
}

/// Persist the board to disk according to the configured options.
///
/// An empty board removes any existing store file instead of writing one.
pub fn save_board(contents: &SceneContents, options: &StoreOptions) -> Result<()> {
    fs::create_dir_all(&options.base_dir).with_context(|| {
        format!(
            "failed to create store directory {}",
            options.base_dir.display()
        )
    })?;

    let lock_path = options.lock_file_path();
    let lock_file = open_lock_file(&lock_path)?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("failed to lock store file {}", lock_path.display()))?;

    let result = save_board_inner(contents, options);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!("failed to unlock store file {}: {}", lock_path.display(), err)
    });

    result
}

fn save_board_inner(contents: &SceneContents, options: &StoreOptions) -> Result<()> {
    let board_path = options.board_file_path();
    let backup_path = options.backup_file_path();

    if contents.objects.is_empty() {
        if board_path.exists() {
            debug!(
                "Removing store file {} because the board is empty",
                board_path.display()
            );
            fs::remove_file(&board_path).with_context(|| {
                format!("failed to remove empty store file {}", board_path.display())
            })?;
        }
        return Ok(());
    }

    let payload = BoardFile {
        version: CURRENT_VERSION,
        last_modified: Utc::now().to_rfc3339(),
        board: contents.clone(),
    };

    let mut json_bytes =
        serde_json::to_vec_pretty(&payload).context("failed to serialize board payload")?;

    if json_bytes.len() as u64 > options.max_file_size_bytes {
        warn!(
            "Board data size {} bytes exceeds the configured limit of {} bytes; skipping save",
            json_bytes.len(),
            options.max_file_size_bytes
        );
        return Ok(());
    }

    let should_compress = match options.compression {
        CompressionMode::Off => false,
        CompressionMode::On => true,
        CompressionMode::Auto => (json_bytes.len() as u64) >= options.auto_compress_threshold_bytes,
    };

    if should_compress {
        json_bytes = compress_bytes(&json_bytes)?;
    }

    let tmp_path = temp_path(&board_path)?;
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .with_context(|| format!("failed to open temporary store file {}", tmp_path.display()))?;
        tmp_file
            .write_all(&json_bytes)
            .context("failed to write board payload")?;
        tmp_file
            .sync_all()
            .context("failed to sync temporary store file")?;
    }

    if board_path.exists() {
        if options.backup_retention > 0 {
            if backup_path.exists() {
                fs::remove_file(&backup_path).ok();
            }
            fs::rename(&board_path, &backup_path).with_context(|| {
                format!(
                    "failed to rotate previous store file {} -> {}",
                    board_path.display(),
                    backup_path.display()
                )
            })?;
        } else {
            fs::remove_file(&board_path).ok();
        }
    }

    fs::rename(&tmp_path, &board_path).with_context(|| {
        format!(
            "failed to move temporary store file {} -> {}",
            tmp_path.display(),
            board_path.display()
        )
    })?;

    info!(
        "Board saved to {} ({} bytes, compression={})",
        board_path.display(),
        json_bytes.len(),
        should_compress
    );

    Ok(())
}

/// Attempt to load a previously saved board.
///
/// Returns `Ok(None)` when no usable store file exists (absent, empty, or
/// over the size limit); parse failures are errors for the caller to log
/// and recover from by starting empty.
pub fn load_board(options: &StoreOptions) -> Result<Option<SceneContents>> {
    let board_path = options.board_file_path();
    if !board_path.exists() {
        debug!(
            "No store file present at {}, skipping load",
            board_path.display()
        );
        return Ok(None);
    }

    let metadata = fs::metadata(&board_path)
        .with_context(|| format!("failed to stat store file {}", board_path.display()))?;
    if metadata.len() > options.max_file_size_bytes {
        warn!(
            "Store file {} is {} bytes which exceeds the configured limit ({} bytes); refusing to load",
            board_path.display(),
            metadata.len(),
            options.max_file_size_bytes
        );
        return Ok(None);
    }

    let lock_path = options.lock_file_path();
    let lock_file = open_lock_file(&lock_path)?;
    lock_file
        .lock_shared()
        .with_context(|| format!("failed to acquire shared lock {}", lock_path.display()))?;

    let result = load_board_inner(&board_path);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!("failed to unlock store file {}: {}", lock_path.display(), err)
    });

    result
}

fn load_board_inner(board_path: &Path) -> Result<Option<SceneContents>> {
    let mut file_bytes = Vec::new();
    {
        let mut file = File::open(board_path)
            .with_context(|| format!("failed to open store file {}", board_path.display()))?;
        file.read_to_end(&mut file_bytes)
            .context("failed to read store file")?;
    }

    let decompressed = if is_gzip(&file_bytes) {
        let mut decoder = GzDecoder::new(&file_bytes[..]);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .context("failed to decompress store file")?;
        out
    } else {
        file_bytes
    };

    let board_file: BoardFile =
        serde_json::from_slice(&decompressed).context("failed to parse board json")?;

    if board_file.version > CURRENT_VERSION {
        warn!(
            "Store file {} has version {} (supported: {}); refusing to load",
            board_path.display(),
            board_file.version,
            CURRENT_VERSION
        );
        return Ok(None);
    }

    if board_file.board.objects.is_empty() {
        debug!(
            "Loaded store file at {} but it contained no objects",
            board_path.display()
        );
        return Ok(None);
    }

    Ok(Some(board_file.board))
}

/// Remove persisted board files (store, backup, and lock).
///
/// Returns true when anything was removed.
pub fn clear_board(options: &StoreOptions) -> Result<bool> {
    let mut removed = false;
    for path in [
        options.board_file_path(),
        options.backup_file_path(),
        options.lock_file_path(),
    ] {
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
            removed = true;
        }
    }
    Ok(removed)
}

fn open_lock_file(lock_path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .with_context(|| format!("failed to open store lock file {}", lock_path.display()))
}

fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .context("failed to compress board payload")?;
    encoder
        .finish()
        .context("failed to finalize compressed board payload")
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn temp_path(target: &Path) -> Result<PathBuf> {
    let mut candidate = target.with_extension("json.tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_extension(format!("json.tmp{counter}"));
    }
    Ok(candidate)
}
