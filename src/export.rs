//! Rasterized PNG export via the rendering collaborator.

use crate::draw::Scene;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed file name of the exported board image.
pub const EXPORT_FILE_NAME: &str = "vr-whiteboard.png";

/// Pixel-density multiplier applied on export.
pub const EXPORT_PIXEL_MULTIPLIER: f64 = 2.0;

/// Errors produced by the export path.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rasterization failed: {0}")]
    Rasterize(String),

    #[error("failed to write exported image: {0}")]
    Io(#[from] std::io::Error),
}

/// Rasterization is owned by the rendering collaborator; the editor only
/// supplies the scene and the pixel multiplier and names the result.
pub trait Rasterizer {
    /// Renders the scene into encoded PNG bytes at the given pixel
    /// density multiplier.
    fn rasterize(&self, scene: &Scene, multiplier: f64) -> Result<Vec<u8>, ExportError>;
}

/// A finished export: encoded bytes plus the fixed download file name.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub file_name: &'static str,
    pub png_bytes: Vec<u8>,
}

impl ExportedImage {
    /// Writes the image into `dir` under its fixed name — the analog of a
    /// client-side download.
    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name);
        fs::write(&path, &self.png_bytes)?;
        log::info!(
            "exported board to {} ({} bytes)",
            path.display(),
            self.png_bytes.len()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_to_dir_uses_fixed_name() {
        let temp = tempfile::tempdir().unwrap();
        let image = ExportedImage {
            file_name: EXPORT_FILE_NAME,
            png_bytes: vec![0x89, 0x50, 0x4e, 0x47],
        };
        let path = image.save_to_dir(temp.path()).unwrap();
        assert_eq!(path.file_name().unwrap().to_string_lossy(), EXPORT_FILE_NAME);
        assert_eq!(std::fs::read(path).unwrap(), image.png_bytes);
    }
}
