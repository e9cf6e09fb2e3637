//! The editing session: mode controller, shared style state, and the glue
//! that funnels scene mutations into history capture.
//!
//! The [`Editor`] owns the scene, the history log, and the UI state. Every
//! public operation that mutates the scene drains the scene's mutation
//! events and captures one history snapshot for them, except while a
//! restore guard is held (undo, redo, and loading a persisted board).

mod mode;

pub use mode::Mode;

use crate::clipboard::{ClipboardError, ClipboardImage, ClipboardPayload, ClipboardSource};
use crate::config::Config;
use crate::draw::color::{DARK_BACKGROUND, DEFAULT_DRAWING, HIGHLIGHTER_YELLOW, LIGHT_BACKGROUND};
use crate::draw::object::DASH_PATTERN;
use crate::draw::{Brush, Color, Cursor, ObjectId, Scene, SceneObject};
use crate::export::{EXPORT_FILE_NAME, EXPORT_PIXEL_MULTIPLIER, ExportError, ExportedImage, Rasterizer};
use crate::history::{History, HistoryError, Snapshot};
use crate::session::{self, StoreOptions};
use crate::ui::{Alert, UiState};
use log::{debug, info, warn};

/// Alert shown when both clipboard read paths are denied.
pub const PASTE_DENIED_MESSAGE: &str =
    "Please use Ctrl+V to paste (Clipboard access denied or not supported).";

/// Pasted text is created at this font size.
const PASTED_TEXT_FONT_SIZE: f64 = 40.0;

/// Side length of a placed rectangle and diameter of a placed circle.
const SHAPE_EXTENT: f64 = 100.0;

/// Length of a placed line.
const LINE_LENGTH: f64 = 200.0;

/// One editing session over a single board.
pub struct Editor {
    scene: Scene,
    history: History,
    ui: UiState,
    mode: Mode,
    // Shared style state: applies to brushes, new shapes, and edits to the
    // selected object alike.
    drawing_color: Color,
    highlighter_color: Color,
    stroke_width: u32,
    dashed: bool,
    // Two brushes so switching tools never clobbers the other tool's setup.
    pen_brush: Brush,
    highlighter_brush: Brush,
    /// Last pointer position while a pan drag is active.
    drag: Option<(f64, f64)>,
}

impl Editor {
    /// Creates a session with an empty board, captures the baseline
    /// snapshot, and enters pan mode.
    pub fn new(config: &Config, width: f64, height: f64) -> Result<Self, HistoryError> {
        let mut editor = Self::build(config, width, height);
        editor.finish_startup()?;
        Ok(editor)
    }

    /// Creates a session, restoring a previously persisted board if one
    /// exists. The restore runs under the capture guard and an unreadable
    /// store file falls back to an empty board.
    pub fn with_persisted(
        config: &Config,
        width: f64,
        height: f64,
        options: &StoreOptions,
    ) -> Result<Self, HistoryError> {
        let mut editor = Self::build(config, width, height);
        match session::load_board(options) {
            Ok(Some(contents)) => {
                let guard = editor.history.begin_restore();
                editor.scene.load_contents(contents);
                editor.scene.take_events();
                drop(guard);
                info!(
                    "restored persisted board ({} objects)",
                    editor.scene.object_count()
                );
            }
            Ok(None) => {}
            Err(err) => warn!("failed to load persisted board, starting empty: {err:#}"),
        }
        editor.finish_startup()?;
        Ok(editor)
    }

    fn build(config: &Config, width: f64, height: f64) -> Self {
        let drawing_color = config.drawing.default_color.to_color(DEFAULT_DRAWING);
        let highlighter_color = config.drawing.highlighter_color.to_color(HIGHLIGHTER_YELLOW);
        let stroke_width = config.drawing.default_stroke_width;
        let dashed = config.drawing.default_dashed;

        let mut scene = Scene::new(width, height);
        scene.set_background(if config.ui.dark_mode {
            DARK_BACKGROUND
        } else {
            LIGHT_BACKGROUND
        });

        let mut pen_brush = Brush::new(drawing_color, stroke_width);
        pen_brush.apply_pen_style(drawing_color, stroke_width, dashed);
        let mut highlighter_brush = Brush::new(highlighter_color, stroke_width);
        highlighter_brush.apply_highlighter_style(highlighter_color, stroke_width);

        Self {
            scene,
            history: History::new(config.history.max_entries),
            ui: UiState::new(config.ui.dark_mode),
            mode: Mode::Pan,
            drawing_color,
            highlighter_color,
            stroke_width,
            dashed,
            pen_brush,
            highlighter_brush,
            drag: None,
        }
    }

    fn finish_startup(&mut self) -> Result<(), HistoryError> {
        // Baseline entry so the very first mutation can be undone.
        self.scene.take_events();
        self.history.capture(Snapshot::of(&self.scene.contents())?);
        self.set_mode(Mode::Pan);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mode controller
    // ------------------------------------------------------------------

    /// Switches the active tool mode.
    ///
    /// Requesting the current mode is a full reset-and-reapply, not a
    /// no-op. Shape modes are transient: they place one centered object
    /// using the shared style state and immediately return to pan.
    pub fn set_mode(&mut self, target: Mode) {
        debug!("mode -> {target:?}");
        self.mode = target;

        // Neutral baseline before mode-specific configuration.
        self.scene.set_drawing_enabled(false);
        self.scene.set_selection_enabled(false);
        self.scene.set_cursor(Cursor::Default);
        self.scene.discard_active_object();
        self.scene.request_render();

        self.ui.activate_indicator(target.indicator_id());

        if target.shows_properties() {
            self.ui.show_properties_panel();
        } else if self.scene.active_object().is_none() {
            self.ui.hide_properties_panel();
        }

        match target {
            Mode::Pan => {
                self.scene.set_cursor(Cursor::Grab);
                self.scene.set_selection_enabled(true);
            }
            Mode::Pen => {
                self.scene.set_drawing_enabled(true);
                self.pen_brush
                    .apply_pen_style(self.drawing_color, self.stroke_width, self.dashed);
                self.scene.install_brush(self.pen_brush);
            }
            Mode::Highlighter => {
                self.scene.set_drawing_enabled(true);
                self.highlighter_brush
                    .apply_highlighter_style(self.highlighter_color, self.stroke_width);
                self.scene.install_brush(self.highlighter_brush);
            }
            Mode::Eraser => {
                self.scene.set_cursor(Cursor::NotAllowed);
                self.scene.set_selection_enabled(true);
            }
            Mode::ShapeRect | Mode::ShapeCircle | Mode::ShapeLine => {
                self.place_shape(target);
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Places a shape centered in the visible viewport, selects it, and
    /// returns to pan mode.
    fn place_shape(&mut self, kind: Mode) {
        let (cx, cy) = self.scene.viewport().center();
        let dash = self.dashed.then_some(DASH_PATTERN);
        let half = SHAPE_EXTENT / 2.0;
        let object = match kind {
            Mode::ShapeRect => SceneObject::Rect {
                left: cx - half,
                top: cy - half,
                width: SHAPE_EXTENT,
                height: SHAPE_EXTENT,
                stroke: self.drawing_color,
                stroke_width: self.stroke_width,
                dash,
            },
            Mode::ShapeCircle => SceneObject::Circle {
                left: cx - half,
                top: cy - half,
                radius: half,
                stroke: self.drawing_color,
                stroke_width: self.stroke_width,
                dash,
            },
            Mode::ShapeLine => SceneObject::Line {
                left: cx - LINE_LENGTH / 2.0,
                top: cy,
                dx: LINE_LENGTH,
                dy: 0.0,
                stroke: self.drawing_color,
                stroke_width: self.stroke_width,
                dash,
            },
            _ => return,
        };
        let id = self.scene.add(object);
        self.scene.set_active(id);
        self.commit();
        self.set_mode(Mode::Pan);
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Drains pending scene mutation events and captures one snapshot for
    /// them. Called after every editor operation that may mutate the scene.
    fn commit(&mut self) {
        let events = self.scene.take_events();
        if events.is_empty() {
            return;
        }
        debug!("{} scene mutation(s) accepted", events.len());
        match Snapshot::of(&self.scene.contents()) {
            Ok(snapshot) => self.history.capture(snapshot),
            Err(err) => warn!("skipping history capture: {err}"),
        }
    }

    /// Steps the board back one history entry. No-op at the oldest entry.
    ///
    /// An unreadable entry is dropped from the log and the board is left
    /// untouched, so an earlier undo can still be attempted.
    pub fn undo(&mut self) {
        let Some((guard, snapshot)) = self.history.undo() else {
            return;
        };
        match snapshot.decode() {
            Ok(contents) => {
                self.scene.load_contents(contents);
                self.scene.take_events();
                drop(guard);
            }
            Err(err) => {
                drop(guard);
                warn!("undo failed: {err}");
                self.history.discard_after_failed_undo();
            }
        }
    }

    /// Steps the board forward one history entry; symmetric to [`Editor::undo`].
    pub fn redo(&mut self) {
        let Some((guard, snapshot)) = self.history.redo() else {
            return;
        };
        match snapshot.decode() {
            Ok(contents) => {
                self.scene.load_contents(contents);
                self.scene.take_events();
                drop(guard);
            }
            Err(err) => {
                drop(guard);
                warn!("redo failed: {err}");
                self.history.discard_after_failed_redo();
            }
        }
    }

    // ------------------------------------------------------------------
    // Style state
    // ------------------------------------------------------------------

    /// Sets the shared stroke width, updates the installed brush, and
    /// applies the width to the selected object (capturing immediately).
    pub fn set_stroke_width(&mut self, width: u32) {
        let width = width.max(1);
        self.stroke_width = width;
        self.update_brush();
        if let Some(id) = self.scene.active_id() {
            self.scene.update(id, |object| object.set_stroke_width(width));
            self.commit();
        }
    }

    /// Toggles the shared dash setting; same propagation as
    /// [`Editor::set_stroke_width`].
    pub fn set_dashed(&mut self, dashed: bool) {
        self.dashed = dashed;
        self.update_brush();
        let dash = dashed.then_some(DASH_PATTERN);
        if let Some(id) = self.scene.active_id() {
            self.scene.update(id, |object| object.set_dash(dash));
            self.commit();
        }
    }

    /// Picks a palette swatch as the drawing color.
    ///
    /// Recolors the selected object if there is one; otherwise, in a
    /// drawing mode, the panel is hidden to get out of the way.
    pub fn select_swatch(&mut self, index: usize) {
        let Some(color) = self.ui.select_swatch(index) else {
            return;
        };
        self.drawing_color = color;
        self.update_brush();
        if let Some(id) = self.scene.active_id() {
            self.scene.update(id, |object| object.set_stroke(color));
            self.commit();
        } else if self.mode.shows_properties() {
            self.ui.hide_properties_panel();
        }
    }

    /// Pushes the shared style state into whichever brush is installed.
    fn update_brush(&mut self) {
        match self.mode {
            Mode::Pen => {
                self.pen_brush
                    .apply_pen_style(self.drawing_color, self.stroke_width, self.dashed);
                self.scene.install_brush(self.pen_brush);
            }
            Mode::Highlighter => {
                self.highlighter_brush
                    .apply_highlighter_style(self.highlighter_color, self.stroke_width);
                self.scene.install_brush(self.highlighter_brush);
            }
            _ => {}
        }
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    pub fn dashed(&self) -> bool {
        self.dashed
    }

    pub fn drawing_color(&self) -> Color {
        self.drawing_color
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Selects an object and syncs the properties panel from it.
    pub fn select_object(&mut self, id: ObjectId) -> bool {
        if !self.scene.selection_enabled() || !self.scene.set_active(id) {
            return false;
        }
        self.sync_props_from_selection();
        true
    }

    /// Mirrors the selected object's width and dash into the shared style
    /// state and shows the panel.
    fn sync_props_from_selection(&mut self) {
        self.ui.show_properties_panel();
        let Some(object) = self.scene.active_object() else {
            return;
        };
        if let Some(width) = object.stroke_width() {
            self.stroke_width = width;
        }
        self.dashed = object.dash().is_some();
    }

    /// Clears the selection; the panel stays up only in drawing modes.
    pub fn clear_selection(&mut self) {
        self.scene.discard_active_object();
        if !self.mode.shows_properties() {
            self.ui.hide_properties_panel();
        }
    }

    /// Removes every selected object, capturing once.
    pub fn delete_selection(&mut self) {
        let active = self.scene.active_ids();
        if active.is_empty() {
            return;
        }
        self.scene.discard_active_object();
        for id in active {
            self.scene.remove(id);
        }
        self.commit();
    }

    /// Toolbar eraser button: with a selection, deletes it immediately;
    /// otherwise enters eraser mode.
    pub fn activate_eraser(&mut self) {
        if self.scene.active_id().is_some() {
            self.delete_selection();
        } else {
            self.set_mode(Mode::Eraser);
        }
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Pointer-down in screen coordinates.
    ///
    /// Eraser mode deletes the hit object outright. Pan mode (or an
    /// alt-click anywhere) starts a drag; otherwise the hit object is
    /// selected or the selection cleared.
    pub fn on_pointer_down(&mut self, sx: f64, sy: f64, alt: bool) {
        let (x, y) = self.scene.viewport().to_scene(sx, sy);
        let target = self.scene.hit_test(x, y);

        if self.mode == Mode::Eraser {
            if let Some(id) = target {
                self.scene.remove(id);
                self.commit();
                return;
            }
        }

        if target.is_none() {
            self.clear_selection();
        }

        if (alt || self.mode == Mode::Pan) && (alt || target.is_none()) {
            self.drag = Some((sx, sy));
            return;
        }

        if let Some(id) = target {
            self.select_object(id);
        }
    }

    pub fn on_pointer_move(&mut self, sx: f64, sy: f64) {
        if let Some((last_x, last_y)) = self.drag {
            self.scene.viewport_mut().pan_by(sx - last_x, sy - last_y);
            self.scene.request_render();
            self.drag = Some((sx, sy));
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.drag = None;
    }

    /// Scroll-wheel zoom anchored at the pointer position.
    pub fn on_wheel(&mut self, sx: f64, sy: f64, delta: f64) {
        let zoom = self.scene.viewport().zoom_for_scroll(delta);
        self.scene.viewport_mut().zoom_to_point(sx, sy, zoom);
        self.scene.request_render();
    }

    /// A freehand stroke finished; turn it into a path object styled by
    /// the installed brush. Ignored outside drawing modes.
    pub fn on_stroke_completed(&mut self, points: Vec<(f64, f64)>) {
        if !self.scene.drawing_enabled() || points.is_empty() {
            return;
        }
        let Some(brush) = self.scene.brush() else {
            return;
        };
        self.scene.add(SceneObject::Path {
            points,
            stroke: brush.color,
            stroke_width: brush.width,
            dash: brush.dash,
        });
        self.commit();
    }

    // ------------------------------------------------------------------
    // Paste
    // ------------------------------------------------------------------

    /// Paste-button flow: rich read first, plain-text fallback when the
    /// rich read is denied, and a user-facing alert when both fail.
    pub fn paste(&mut self, clipboard: &mut dyn ClipboardSource) {
        match clipboard.read() {
            Ok(ClipboardPayload::Image(image)) => self.add_pasted_image(image),
            Ok(ClipboardPayload::Text(text)) => self.add_pasted_text(&text),
            Err(ClipboardError::Empty) => debug!("clipboard empty, nothing to paste"),
            Err(ClipboardError::AccessDenied(reason)) => {
                warn!("rich clipboard read failed ({reason}), trying plain-text fallback");
                match clipboard.read_text() {
                    Ok(text) => self.add_pasted_text(&text),
                    Err(ClipboardError::Empty) => debug!("clipboard empty, nothing to paste"),
                    Err(err @ ClipboardError::AccessDenied(_)) => {
                        warn!("clipboard fallback failed: {err}");
                        self.ui.push_alert(PASTE_DENIED_MESSAGE);
                    }
                }
            }
        }
    }

    /// Inserts a pasted image centered in the viewport, scaled down so it
    /// takes up at most half the screen width.
    fn add_pasted_image(&mut self, image: ClipboardImage) {
        let viewport = *self.scene.viewport();
        let half_screen = viewport.width / 2.0;
        let mut scale = 0.5;
        if image.width as f64 > half_screen {
            scale = half_screen / image.width as f64;
        }
        let (cx, cy) = viewport.center();
        let id = self.scene.add(SceneObject::Image {
            left: cx - image.width as f64 * scale / 2.0,
            top: cy - image.height as f64 * scale / 2.0,
            width: image.width,
            height: image.height,
            scale_x: scale,
            scale_y: scale,
            rgba: image.rgba,
        });
        self.scene.set_active(id);
        self.commit();
        self.set_mode(Mode::Pan);
    }

    fn add_pasted_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let (cx, cy) = self.scene.viewport().center();
        let id = self.scene.add(SceneObject::Text {
            left: cx - 100.0,
            top: cy,
            text: text.to_string(),
            fill: self.drawing_color,
            font_size: PASTED_TEXT_FONT_SIZE,
        });
        self.scene.set_active(id);
        self.commit();
        self.set_mode(Mode::Pan);
    }

    // ------------------------------------------------------------------
    // Theme, export, persistence
    // ------------------------------------------------------------------

    /// Swaps the board between the dark and light backgrounds. Not a
    /// history entry.
    pub fn toggle_dark_mode(&mut self) {
        let dark = !self.ui.dark_mode();
        self.ui.set_dark_mode(dark);
        self.scene.set_background(if dark {
            DARK_BACKGROUND
        } else {
            LIGHT_BACKGROUND
        });
    }

    /// Rasterizes the board to a PNG at export density under the fixed
    /// download name.
    pub fn export_png(&self, rasterizer: &dyn Rasterizer) -> Result<ExportedImage, ExportError> {
        let png_bytes = rasterizer.rasterize(&self.scene, EXPORT_PIXEL_MULTIPLIER)?;
        Ok(ExportedImage {
            file_name: EXPORT_FILE_NAME,
            png_bytes,
        })
    }

    /// Writes the current board to the session store.
    pub fn persist(&self, options: &StoreOptions) -> anyhow::Result<()> {
        session::save_board(&self.scene.contents(), options)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Drains pending user-facing alerts.
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        self.ui.take_alerts()
    }
}

#[cfg(test)]
mod tests;
