//! Scene object definitions.

use super::color::Color;
use crate::util::{self, Rect};
use serde::{Deserialize, Serialize};

/// Dash pattern applied to strokes when the dashed toggle is on.
pub const DASH_PATTERN: [f64; 2] = [15.0, 15.0];

/// A drawable object on the board.
///
/// Each variant carries its own position and style so objects render and
/// serialize independently. Coordinates are scene coordinates (unaffected
/// by the viewport transform).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SceneObject {
    /// Rectangle outline.
    Rect {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        stroke: Color,
        stroke_width: u32,
        dash: Option<[f64; 2]>,
    },
    /// Circle outline.
    Circle {
        left: f64,
        top: f64,
        radius: f64,
        stroke: Color,
        stroke_width: u32,
        dash: Option<[f64; 2]>,
    },
    /// Straight line segment from (left, top) to (left + dx, top + dy).
    Line {
        left: f64,
        top: f64,
        dx: f64,
        dy: f64,
        stroke: Color,
        stroke_width: u32,
        dash: Option<[f64; 2]>,
    },
    /// Freehand stroke produced by the drawing brush.
    Path {
        /// Scene-coordinate points in draw order.
        points: Vec<(f64, f64)>,
        stroke: Color,
        stroke_width: u32,
        dash: Option<[f64; 2]>,
    },
    /// Text label. Text has no outline; the swatch palette edits its fill.
    Text {
        left: f64,
        top: f64,
        text: String,
        fill: Color,
        font_size: f64,
    },
    /// Bitmap image pasted from the clipboard.
    Image {
        left: f64,
        top: f64,
        /// Source width in pixels before scaling.
        width: u32,
        /// Source height in pixels before scaling.
        height: u32,
        scale_x: f64,
        scale_y: f64,
        /// Raw RGBA pixel data, row-major.
        rgba: Vec<u8>,
    },
}

impl SceneObject {
    /// Axis-aligned bounding box, expanded to cover the stroke width.
    ///
    /// Used for hit-testing. Returns `None` for degenerate data (e.g. an
    /// empty path).
    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            SceneObject::Rect {
                left,
                top,
                width,
                height,
                stroke_width,
                ..
            } => Some(Rect::new(*left, *top, *width, *height).expanded(*stroke_width as f64 / 2.0)),
            SceneObject::Circle {
                left,
                top,
                radius,
                stroke_width,
                ..
            } => Some(
                Rect::new(*left, *top, radius * 2.0, radius * 2.0)
                    .expanded(*stroke_width as f64 / 2.0),
            ),
            SceneObject::Line {
                left,
                top,
                dx,
                dy,
                stroke_width,
                ..
            } => {
                let x = left.min(left + dx);
                let y = top.min(top + dy);
                Some(
                    Rect::new(x, y, dx.abs(), dy.abs())
                        .expanded((*stroke_width as f64 / 2.0).max(2.0)),
                )
            }
            SceneObject::Path {
                points,
                stroke_width,
                ..
            } => util::bounds_of_points(points)
                .map(|r| r.expanded((*stroke_width as f64 / 2.0).max(2.0))),
            SceneObject::Text {
                left,
                top,
                text,
                font_size,
                ..
            } => {
                if text.is_empty() {
                    return None;
                }
                // Rough advance-width estimate; precise metrics belong to
                // the rendering collaborator.
                let width = text.chars().count() as f64 * font_size * 0.6;
                Some(Rect::new(*left, *top, width, *font_size))
            }
            SceneObject::Image {
                left,
                top,
                width,
                height,
                scale_x,
                scale_y,
                ..
            } => Some(Rect::new(
                *left,
                *top,
                *width as f64 * scale_x,
                *height as f64 * scale_y,
            )),
        }
    }

    /// Sets the stroke color; for text this edits the fill instead.
    ///
    /// Images have no stroke and are left unchanged.
    pub fn set_stroke(&mut self, color: Color) {
        match self {
            SceneObject::Rect { stroke, .. }
            | SceneObject::Circle { stroke, .. }
            | SceneObject::Line { stroke, .. }
            | SceneObject::Path { stroke, .. } => *stroke = color,
            SceneObject::Text { fill, .. } => *fill = color,
            SceneObject::Image { .. } => {}
        }
    }

    /// Sets the stroke width where the object has one.
    pub fn set_stroke_width(&mut self, width: u32) {
        match self {
            SceneObject::Rect { stroke_width, .. }
            | SceneObject::Circle { stroke_width, .. }
            | SceneObject::Line { stroke_width, .. }
            | SceneObject::Path { stroke_width, .. } => *stroke_width = width,
            SceneObject::Text { .. } | SceneObject::Image { .. } => {}
        }
    }

    /// Sets or clears the dash pattern where the object has a stroke.
    pub fn set_dash(&mut self, dash: Option<[f64; 2]>) {
        match self {
            SceneObject::Rect { dash: d, .. }
            | SceneObject::Circle { dash: d, .. }
            | SceneObject::Line { dash: d, .. }
            | SceneObject::Path { dash: d, .. } => *d = dash,
            SceneObject::Text { .. } | SceneObject::Image { .. } => {}
        }
    }

    /// Current stroke width, if the object has one.
    pub fn stroke_width(&self) -> Option<u32> {
        match self {
            SceneObject::Rect { stroke_width, .. }
            | SceneObject::Circle { stroke_width, .. }
            | SceneObject::Line { stroke_width, .. }
            | SceneObject::Path { stroke_width, .. } => Some(*stroke_width),
            SceneObject::Text { .. } | SceneObject::Image { .. } => None,
        }
    }

    /// Current dash pattern, if the object has a stroke.
    pub fn dash(&self) -> Option<[f64; 2]> {
        match self {
            SceneObject::Rect { dash, .. }
            | SceneObject::Circle { dash, .. }
            | SceneObject::Line { dash, .. }
            | SceneObject::Path { dash, .. } => *dash,
            SceneObject::Text { .. } | SceneObject::Image { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::SWATCHES;

    fn rect() -> SceneObject {
        SceneObject::Rect {
            left: 10.0,
            top: 10.0,
            width: 100.0,
            height: 100.0,
            stroke: SWATCHES[1],
            stroke_width: 4,
            dash: None,
        }
    }

    #[test]
    fn bounding_box_covers_stroke() {
        let bb = rect().bounding_box().unwrap();
        assert_eq!(bb, Rect::new(8.0, 8.0, 104.0, 104.0));
    }

    #[test]
    fn empty_path_has_no_bounds() {
        let path = SceneObject::Path {
            points: vec![],
            stroke: SWATCHES[0],
            stroke_width: 3,
            dash: None,
        };
        assert!(path.bounding_box().is_none());
    }

    #[test]
    fn set_stroke_edits_text_fill() {
        let mut text = SceneObject::Text {
            left: 0.0,
            top: 0.0,
            text: "note".into(),
            fill: SWATCHES[0],
            font_size: 40.0,
        };
        text.set_stroke(SWATCHES[4]);
        match text {
            SceneObject::Text { fill, .. } => assert_eq!(fill, SWATCHES[4]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn style_setters_ignore_images() {
        let mut image = SceneObject::Image {
            left: 0.0,
            top: 0.0,
            width: 2,
            height: 2,
            scale_x: 1.0,
            scale_y: 1.0,
            rgba: vec![0; 16],
        };
        image.set_stroke_width(9);
        image.set_dash(Some(DASH_PATTERN));
        assert!(image.stroke_width().is_none());
        assert!(image.dash().is_none());
    }
}
