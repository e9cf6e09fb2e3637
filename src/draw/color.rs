//! RGBA color type, hex parsing, and the fixed UI palette.

use serde::{Deserialize, Serialize};

/// RGBA color with floating-point components in the range 0.0 to 1.0.
///
/// Colors are part of serialized scene snapshots, so the representation
/// must round-trip exactly through JSON.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component
    pub g: f64,
    /// Blue component
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a fully opaque color from 8-bit RGB components.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Creates a color from 8-bit RGB components and a 0.0-1.0 alpha.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a,
        }
    }

    /// Parses a `#rrggbb` hex string.
    ///
    /// Returns `None` for anything that is not exactly seven characters of
    /// `#` plus six hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Self::from_rgb8(r, g, b))
    }
}

/// The nine fixed swatch colors offered by the palette, in display order.
pub const SWATCHES: [Color; 9] = [
    Color::from_rgb8(0xf3, 0xf4, 0xf6), // white/text
    Color::from_rgb8(0xef, 0x44, 0x44), // red
    Color::from_rgb8(0xf5, 0x9e, 0x0b), // orange
    Color::from_rgb8(0x10, 0xb9, 0x81), // green
    Color::from_rgb8(0x3b, 0x82, 0xf6), // blue
    Color::from_rgb8(0x63, 0x66, 0xf1), // indigo
    Color::from_rgb8(0x8b, 0x5c, 0xf6), // violet
    Color::from_rgb8(0xec, 0x48, 0x99), // pink
    Color::from_rgb8(0x00, 0x00, 0x00), // black
];

/// Default drawing color (the first swatch).
pub const DEFAULT_DRAWING: Color = SWATCHES[0];

/// Semi-transparent yellow used by the highlighter brush.
pub const HIGHLIGHTER_YELLOW: Color = Color::from_rgba8(255, 255, 0, 0.4);

/// Board background in dark mode.
pub const DARK_BACKGROUND: Color = Color::from_rgb8(0x0f, 0x0f, 0x12);

/// Board background in light mode.
pub const LIGHT_BACKGROUND: Color = Color::from_rgb8(0xff, 0xff, 0xff);
