//! Free-drawing brush configuration.

use super::color::Color;
use super::object::DASH_PATTERN;

/// Width multiplier applied to the shared stroke width for the highlighter.
pub const HIGHLIGHTER_WIDTH_FACTOR: u32 = 3;

/// Configuration for the pluggable free-drawing brush.
///
/// Two instances exist for the session (pen and highlighter) so that
/// switching tools never clobbers the other tool's settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: Color,
    pub width: u32,
    /// `None` means a solid stroke.
    pub dash: Option<[f64; 2]>,
}

impl Brush {
    pub fn new(color: Color, width: u32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    /// Pushes the shared style state into a pen brush.
    pub fn apply_pen_style(&mut self, color: Color, stroke_width: u32, dashed: bool) {
        self.color = color;
        self.width = stroke_width;
        self.dash = dashed.then_some(DASH_PATTERN);
    }

    /// Pushes the shared style state into a highlighter brush.
    ///
    /// The highlighter keeps its fixed color, triples the shared width,
    /// and is always solid.
    pub fn apply_highlighter_style(&mut self, highlighter_color: Color, stroke_width: u32) {
        self.color = highlighter_color;
        self.width = stroke_width.saturating_mul(HIGHLIGHTER_WIDTH_FACTOR);
        self.dash = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{HIGHLIGHTER_YELLOW, SWATCHES};

    #[test]
    fn pen_style_tracks_dash_toggle() {
        let mut brush = Brush::new(SWATCHES[0], 3);
        brush.apply_pen_style(SWATCHES[4], 5, true);
        assert_eq!(brush.color, SWATCHES[4]);
        assert_eq!(brush.width, 5);
        assert_eq!(brush.dash, Some(DASH_PATTERN));

        brush.apply_pen_style(SWATCHES[4], 5, false);
        assert_eq!(brush.dash, None);
    }

    #[test]
    fn highlighter_triples_width_and_stays_solid() {
        let mut brush = Brush::new(HIGHLIGHTER_YELLOW, 3);
        brush.apply_highlighter_style(HIGHLIGHTER_YELLOW, 4);
        assert_eq!(brush.width, 12);
        assert_eq!(brush.dash, None);
        assert_eq!(brush.color, HIGHLIGHTER_YELLOW);
    }
}
