//! Viewport transform for panning and zooming.

/// Minimum zoom factor.
pub const MIN_ZOOM: f64 = 0.01;
/// Maximum zoom factor.
pub const MAX_ZOOM: f64 = 20.0;
/// Per-scroll-unit zoom decay (`zoom * SCROLL_ZOOM_BASE.powf(delta)`).
pub const SCROLL_ZOOM_BASE: f64 = 0.999;

/// Maps scene coordinates to screen coordinates:
/// `screen = scene * zoom + offset`.
///
/// The viewport also records the surface size in screen pixels so centered
/// placement can be computed in scene coordinates at any zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    offset_x: f64,
    offset_y: f64,
    /// Surface width in screen pixels.
    pub width: f64,
    /// Surface height in screen pixels.
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            width,
            height,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Updates the surface size (e.g. after a window resize).
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Translates the viewport by a screen-pixel delta (pan gesture).
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Scene coordinates of the visible top-left corner.
    pub fn top_left(&self) -> (f64, f64) {
        (-self.offset_x / self.zoom, -self.offset_y / self.zoom)
    }

    /// Scene coordinates of the visible center.
    pub fn center(&self) -> (f64, f64) {
        let (tx, ty) = self.top_left();
        (
            tx + self.width / 2.0 / self.zoom,
            ty + self.height / 2.0 / self.zoom,
        )
    }

    /// Converts a screen-pixel position to scene coordinates.
    pub fn to_scene(&self, sx: f64, sy: f64) -> (f64, f64) {
        (
            (sx - self.offset_x) / self.zoom,
            (sy - self.offset_y) / self.zoom,
        )
    }

    /// Zoom level after a scroll of `delta` units, clamped to the valid range.
    pub fn zoom_for_scroll(&self, delta: f64) -> f64 {
        (self.zoom * SCROLL_ZOOM_BASE.powf(delta)).clamp(MIN_ZOOM, MAX_ZOOM)
    }

    /// Sets the zoom while keeping the scene point under screen position
    /// (sx, sy) fixed.
    pub fn zoom_to_point(&mut self, sx: f64, sy: f64, zoom: f64) {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let (scene_x, scene_y) = self.to_scene(sx, sy);
        self.zoom = zoom;
        self.offset_x = sx - scene_x * zoom;
        self.offset_y = sy - scene_y * zoom;
    }
}
