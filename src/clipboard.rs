//! Clipboard collaborator: payload types, trait seam, and the system
//! implementation backed by `arboard`.

use thiserror::Error;

/// Errors surfaced by clipboard reads.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard access denied or not supported: {0}")]
    AccessDenied(String),

    #[error("clipboard has no readable content")]
    Empty,
}

/// Decoded image fetched from the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Raw RGBA pixel data, row-major.
    pub rgba: Vec<u8>,
}

/// What a clipboard read produced. Image is preferred over text when both
/// are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardPayload {
    Image(ClipboardImage),
    Text(String),
}

/// Abstraction over the host clipboard so the paste flow can be driven by
/// a mock in tests.
pub trait ClipboardSource {
    /// Reads the richest available payload, preferring images.
    fn read(&mut self) -> Result<ClipboardPayload, ClipboardError>;

    /// Reads plain text only. Used as the fallback path when the rich
    /// read is denied.
    fn read_text(&mut self) -> Result<String, ClipboardError>;
}

/// System clipboard via `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|err| ClipboardError::AccessDenied(err.to_string()))?;
        Ok(Self { inner })
    }
}

impl ClipboardSource for SystemClipboard {
    fn read(&mut self) -> Result<ClipboardPayload, ClipboardError> {
        match self.inner.get_image() {
            Ok(image) => {
                return Ok(ClipboardPayload::Image(ClipboardImage {
                    width: image.width as u32,
                    height: image.height as u32,
                    rgba: image.bytes.into_owned(),
                }));
            }
            Err(arboard::Error::ContentNotAvailable) => {
                // No image on the clipboard; fall through to text.
            }
            Err(err) => return Err(ClipboardError::AccessDenied(err.to_string())),
        }
        self.read_text().map(ClipboardPayload::Text)
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        match self.inner.get_text() {
            Ok(text) if !text.is_empty() => Ok(text),
            Ok(_) | Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::Empty),
            Err(err) => Err(ClipboardError::AccessDenied(err.to_string())),
        }
    }
}
