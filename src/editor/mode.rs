//! Tool modes and their derived surface behavior.

/// The active interaction mode. Exactly one is active at a time; it
/// decides how pointer input is interpreted and which brush (if any) is
/// installed on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Move the viewport; objects remain selectable.
    #[default]
    Pan,
    Pen,
    Highlighter,
    /// Click-to-delete.
    Eraser,
    ShapeRect,
    ShapeCircle,
    ShapeLine,
}

impl Mode {
    /// Toolbar indicator id for this mode (`tool-<mode>`).
    pub fn indicator_id(self) -> &'static str {
        match self {
            Mode::Pan => "tool-pan",
            Mode::Pen => "tool-pen",
            Mode::Highlighter => "tool-highlighter",
            Mode::Eraser => "tool-eraser",
            Mode::ShapeRect => "tool-shape-rect",
            Mode::ShapeCircle => "tool-shape-circle",
            Mode::ShapeLine => "tool-shape-line",
        }
    }

    /// Whether this mode forces the properties panel visible.
    pub fn shows_properties(self) -> bool {
        matches!(self, Mode::Pen | Mode::Highlighter)
    }

    /// Shape modes are transient: they place one object and hand control
    /// straight back to pan.
    pub fn is_shape(self) -> bool {
        matches!(self, Mode::ShapeRect | Mode::ShapeCircle | Mode::ShapeLine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_ids_follow_the_naming_scheme() {
        assert_eq!(Mode::Pan.indicator_id(), "tool-pan");
        assert_eq!(Mode::ShapeRect.indicator_id(), "tool-shape-rect");
    }

    #[test]
    fn only_drawing_modes_force_the_panel() {
        assert!(Mode::Pen.shows_properties());
        assert!(Mode::Highlighter.shows_properties());
        assert!(!Mode::Eraser.shows_properties());
        assert!(!Mode::ShapeLine.shows_properties());
    }
}
