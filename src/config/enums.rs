//! Configuration enum types.

use crate::draw::Color;
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a `#rrggbb` hex string or an RGB(A) array.
///
/// # Examples
/// ```toml
/// # Hex string
/// default_color = "#6366f1"
///
/// # RGB (0-255 per component)
/// default_color = [99, 102, 241]
///
/// # RGBA (alpha 0-255)
/// highlighter_color = [255, 255, 0, 102]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// `#rrggbb` hex string
    Hex(String),
    /// `[red, green, blue]`, each 0-255
    Rgb([u8; 3]),
    /// `[red, green, blue, alpha]`, each 0-255
    Rgba([u8; 4]),
}

impl ColorSpec {
    /// Converts the specification to a [`Color`], falling back to the
    /// provided default (with a warning) on malformed hex strings.
    pub fn to_color(&self, fallback: Color) -> Color {
        match self {
            ColorSpec::Hex(hex) => Color::from_hex(hex).unwrap_or_else(|| {
                warn!("Invalid hex color '{hex}', using default");
                fallback
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
            ColorSpec::Rgba([r, g, b, a]) => Color::from_rgba8(*r, *g, *b, *a as f64 / 255.0),
        }
    }
}

/// Where the board store file lives.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StorageMode {
    /// Platform data directory (e.g. `~/.local/share/inkboard`)
    Auto,
    /// Next to the configuration file
    Config,
    /// A user-provided directory (`session.custom_directory`)
    Custom,
}

/// Compression preference for the board store file.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StoreCompression {
    /// Compress when the payload exceeds the configured threshold
    Auto,
    /// Always gzip
    On,
    /// Always plain JSON
    Off,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::SWATCHES;

    #[test]
    fn hex_spec_parses() {
        let spec = ColorSpec::Hex("#f3f4f6".to_string());
        assert_eq!(spec.to_color(SWATCHES[8]), SWATCHES[0]);
    }

    #[test]
    fn malformed_hex_falls_back() {
        let spec = ColorSpec::Hex("oops".to_string());
        assert_eq!(spec.to_color(SWATCHES[8]), SWATCHES[8]);
    }

    #[test]
    fn rgba_spec_scales_alpha() {
        let spec = ColorSpec::Rgba([255, 255, 0, 102]);
        let color = spec.to_color(SWATCHES[0]);
        assert!((color.a - 0.4).abs() < 0.01);
    }
}
