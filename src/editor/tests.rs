use super::{Editor, Mode, PASTE_DENIED_MESSAGE};
use crate::clipboard::{ClipboardError, ClipboardImage, ClipboardPayload, ClipboardSource};
use crate::config::Config;
use crate::draw::color::{LIGHT_BACKGROUND, SWATCHES};
use crate::draw::object::DASH_PATTERN;
use crate::draw::viewport::MIN_ZOOM;
use crate::draw::{Cursor, Scene, SceneObject};
use crate::export::{EXPORT_FILE_NAME, ExportError, ExportedImage, Rasterizer};
use crate::session::{CompressionMode, StoreOptions};

fn editor() -> Editor {
    Editor::new(&Config::default(), 800.0, 600.0).unwrap()
}

/// Places a 100x100 rectangle centered at scene (400, 300).
fn place_rect(editor: &mut Editor) {
    editor.set_mode(Mode::ShapeRect);
}

struct MockClipboard {
    rich: Result<ClipboardPayload, ClipboardError>,
    text: Result<String, ClipboardError>,
}

fn clone_result<T: Clone>(
    source: &Result<T, ClipboardError>,
) -> Result<T, ClipboardError> {
    match source {
        Ok(value) => Ok(value.clone()),
        Err(ClipboardError::Empty) => Err(ClipboardError::Empty),
        Err(ClipboardError::AccessDenied(reason)) => {
            Err(ClipboardError::AccessDenied(reason.clone()))
        }
    }
}

impl ClipboardSource for MockClipboard {
    fn read(&mut self) -> Result<ClipboardPayload, ClipboardError> {
        clone_result(&self.rich)
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        clone_result(&self.text)
    }
}

fn denied() -> ClipboardError {
    ClipboardError::AccessDenied("permission denied".to_string())
}

// ----------------------------------------------------------------------
// History behavior
// ----------------------------------------------------------------------

#[test]
fn startup_captures_baseline_and_enters_pan() {
    let editor = editor();
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.history().cursor(), 0);
    assert_eq!(editor.mode(), Mode::Pan);
    assert_eq!(editor.scene().cursor(), Cursor::Grab);
    assert!(editor.scene().selection_enabled());
    assert!(!editor.scene().drawing_enabled());
    assert_eq!(editor.ui().active_indicator(), Some("tool-pan"));
}

#[test]
fn each_accepted_mutation_appends_one_entry() {
    let mut editor = editor();
    for _ in 0..3 {
        place_rect(&mut editor);
    }
    // Baseline plus one entry per shape.
    assert_eq!(editor.history().len(), 4);
    assert_eq!(editor.history().cursor(), 3);
}

#[test]
fn history_is_bounded_and_evicts_the_oldest() {
    let mut config = Config::default();
    config.history.max_entries = 5;
    let mut editor = Editor::new(&config, 800.0, 600.0).unwrap();

    for _ in 0..10 {
        place_rect(&mut editor);
    }
    assert_eq!(editor.history().len(), 5);
    assert_eq!(editor.history().cursor(), 4);
    // The baseline (empty board) is long gone: undoing all the way down
    // still leaves objects on the board.
    for _ in 0..10 {
        editor.undo();
    }
    assert!(!editor.scene().is_empty());
}

#[test]
fn undo_then_redo_restores_identical_contents() {
    let mut editor = editor();
    place_rect(&mut editor);
    let before = editor.scene().contents();

    editor.undo();
    assert_ne!(editor.scene().contents(), before);
    assert!(editor.scene().is_empty());

    editor.redo();
    assert_eq!(editor.scene().contents(), before);
}

#[test]
fn mutation_after_undo_discards_redo_entries() {
    let mut editor = editor();
    let baseline = editor.scene().contents();

    place_rect(&mut editor);
    assert_eq!(editor.history().len(), 2);
    assert_eq!(editor.history().cursor(), 1);

    editor.undo();
    assert_eq!(editor.scene().contents(), baseline);
    assert!(editor.history().can_redo());

    editor.set_mode(Mode::ShapeCircle);
    assert_eq!(editor.history().len(), 2);
    assert_eq!(editor.history().cursor(), 1);
    assert!(!editor.history().can_redo());
    let current = editor.history().current().unwrap().decode().unwrap();
    assert!(matches!(current.objects[0], SceneObject::Circle { .. }));
}

#[test]
fn undo_and_redo_at_the_bounds_are_noops() {
    let mut editor = editor();
    editor.undo();
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.history().cursor(), 0);
    editor.redo();
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.history().cursor(), 0);
}

#[test]
fn restore_side_effects_produce_no_new_entries() {
    let mut editor = editor();
    place_rect(&mut editor);
    editor.set_mode(Mode::ShapeCircle);
    assert_eq!(editor.history().len(), 3);

    // Restoring the one-rectangle snapshot re-adds its object; that
    // mutation must not be recorded.
    editor.undo();
    assert_eq!(editor.scene().object_count(), 1);
    assert_eq!(editor.history().len(), 3);
    assert_eq!(editor.history().cursor(), 1);
}

#[test]
fn dark_mode_toggle_is_not_a_history_entry() {
    let mut editor = editor();
    editor.toggle_dark_mode();
    assert_eq!(editor.scene().background(), LIGHT_BACKGROUND);
    assert!(!editor.ui().dark_mode());
    assert_eq!(editor.history().len(), 1);
}

// ----------------------------------------------------------------------
// Mode controller
// ----------------------------------------------------------------------

#[test]
fn pen_settings_survive_a_highlighter_round_trip() {
    let mut editor = editor();
    editor.set_mode(Mode::Pen);
    editor.set_stroke_width(7);
    editor.set_dashed(true);

    let pen = editor.scene().brush().unwrap();
    assert_eq!(pen.width, 7);
    assert_eq!(pen.dash, Some(DASH_PATTERN));

    editor.set_mode(Mode::Highlighter);
    let highlighter = editor.scene().brush().unwrap();
    assert_eq!(highlighter.width, 21);
    assert_eq!(highlighter.dash, None);

    editor.set_mode(Mode::Pen);
    let pen_again = editor.scene().brush().unwrap();
    assert_eq!(pen_again.width, 7);
    assert_eq!(pen_again.dash, Some(DASH_PATTERN));
    assert_eq!(pen_again.color, editor.drawing_color());
}

#[test]
fn reapplying_the_current_mode_resets_state() {
    let mut editor = editor();
    place_rect(&mut editor);
    editor.on_pointer_down(400.0, 300.0, false);
    assert!(editor.scene().active_id().is_some());
    assert!(editor.ui().properties_panel_visible());

    editor.set_mode(Mode::Pan);
    assert!(editor.scene().active_id().is_none());
    assert!(!editor.ui().properties_panel_visible());
}

#[test]
fn shape_placement_uses_the_shared_style_and_returns_to_pan() {
    let mut editor = editor();
    editor.set_stroke_width(6);
    editor.set_dashed(true);
    editor.select_swatch(4);

    editor.set_mode(Mode::ShapeRect);
    assert_eq!(editor.mode(), Mode::Pan);
    assert_eq!(editor.scene().object_count(), 1);

    let contents = editor.scene().contents();
    match &contents.objects[0] {
        SceneObject::Rect {
            left,
            top,
            width,
            height,
            stroke,
            stroke_width,
            dash,
        } => {
            // Centered on the default 800x600 viewport.
            assert_eq!((*left, *top), (350.0, 250.0));
            assert_eq!((*width, *height), (100.0, 100.0));
            assert_eq!(*stroke, SWATCHES[4]);
            assert_eq!(*stroke_width, 6);
            assert_eq!(*dash, Some(DASH_PATTERN));
        }
        other => panic!("expected a rectangle, got {other:?}"),
    }
}

#[test]
fn line_placement_spans_the_viewport_center() {
    let mut editor = editor();
    editor.set_mode(Mode::ShapeLine);
    let contents = editor.scene().contents();
    match &contents.objects[0] {
        SceneObject::Line { left, top, dx, dy, .. } => {
            assert_eq!((*left, *top), (300.0, 300.0));
            assert_eq!((*dx, *dy), (200.0, 0.0));
        }
        other => panic!("expected a line, got {other:?}"),
    }
}

#[test]
fn freehand_strokes_use_the_installed_brush() {
    let mut editor = editor();
    editor.set_mode(Mode::Pen);
    editor.set_stroke_width(5);
    editor.on_stroke_completed(vec![(0.0, 0.0), (10.0, 12.0), (20.0, 5.0)]);

    assert_eq!(editor.scene().object_count(), 1);
    assert_eq!(editor.history().len(), 2);
    match &editor.scene().contents().objects[0] {
        SceneObject::Path { stroke_width, dash, points, .. } => {
            assert_eq!(*stroke_width, 5);
            assert_eq!(*dash, None);
            assert_eq!(points.len(), 3);
        }
        other => panic!("expected a path, got {other:?}"),
    }
}

#[test]
fn strokes_are_ignored_outside_drawing_modes() {
    let mut editor = editor();
    editor.on_stroke_completed(vec![(0.0, 0.0), (10.0, 10.0)]);
    assert!(editor.scene().is_empty());
    assert_eq!(editor.history().len(), 1);
}

// ----------------------------------------------------------------------
// Style edits and selection
// ----------------------------------------------------------------------

#[test]
fn stroke_width_edit_on_a_selection_captures_immediately() {
    let mut editor = editor();
    place_rect(&mut editor);
    editor.on_pointer_down(400.0, 300.0, false);
    assert!(editor.scene().active_id().is_some());

    let before = editor.history().len();
    editor.set_stroke_width(5);
    assert_eq!(
        editor.scene().active_object().unwrap().stroke_width(),
        Some(5)
    );
    assert_eq!(editor.history().len(), before + 1);
}

#[test]
fn swatch_recolors_the_selection_and_captures() {
    let mut editor = editor();
    place_rect(&mut editor);
    editor.on_pointer_down(400.0, 300.0, false);

    let before = editor.history().len();
    editor.select_swatch(1);
    match editor.scene().active_object().unwrap() {
        SceneObject::Rect { stroke, .. } => assert_eq!(*stroke, SWATCHES[1]),
        other => panic!("expected a rectangle, got {other:?}"),
    }
    assert_eq!(editor.history().len(), before + 1);
    assert!(editor.ui().properties_panel_visible());
}

#[test]
fn swatch_without_selection_hides_the_panel_in_drawing_modes() {
    let mut editor = editor();
    editor.set_mode(Mode::Pen);
    assert!(editor.ui().properties_panel_visible());

    editor.select_swatch(3);
    assert_eq!(editor.drawing_color(), SWATCHES[3]);
    assert!(!editor.ui().properties_panel_visible());
}

#[test]
fn selecting_an_object_syncs_the_panel_from_it() {
    let mut editor = editor();
    editor.set_stroke_width(9);
    editor.set_dashed(true);
    place_rect(&mut editor);

    // Drift the shared style away from the object's.
    editor.set_stroke_width(2);
    editor.set_dashed(false);

    editor.on_pointer_down(400.0, 300.0, false);
    assert_eq!(editor.stroke_width(), 9);
    assert!(editor.dashed());
    assert!(editor.ui().properties_panel_visible());

    // Clicking empty space clears the selection and hides the panel.
    editor.on_pointer_up();
    editor.on_pointer_down(10.0, 10.0, false);
    assert!(editor.scene().active_id().is_none());
}

// ----------------------------------------------------------------------
// Eraser
// ----------------------------------------------------------------------

#[test]
fn eraser_click_deletes_the_hit_object() {
    let mut editor = editor();
    place_rect(&mut editor);
    editor.set_mode(Mode::Eraser);
    assert_eq!(editor.scene().cursor(), Cursor::NotAllowed);

    editor.on_pointer_down(400.0, 300.0, false);
    assert!(editor.scene().is_empty());
    // Baseline, add, remove.
    assert_eq!(editor.history().len(), 3);
}

#[test]
fn eraser_button_deletes_selection_instead_of_switching_modes() {
    let mut editor = editor();
    place_rect(&mut editor);
    editor.on_pointer_down(400.0, 300.0, false);
    assert!(editor.scene().active_id().is_some());

    editor.activate_eraser();
    assert!(editor.scene().is_empty());
    assert_eq!(editor.mode(), Mode::Pan);

    editor.activate_eraser();
    assert_eq!(editor.mode(), Mode::Eraser);
}

// ----------------------------------------------------------------------
// Pan and zoom
// ----------------------------------------------------------------------

#[test]
fn pan_drag_moves_the_viewport() {
    let mut editor = editor();
    editor.on_pointer_down(100.0, 100.0, false);
    editor.on_pointer_move(150.0, 130.0);
    assert_eq!(editor.scene().viewport().top_left(), (-50.0, -30.0));

    editor.on_pointer_up();
    editor.on_pointer_move(500.0, 500.0);
    assert_eq!(editor.scene().viewport().top_left(), (-50.0, -30.0));
}

#[test]
fn alt_drag_pans_even_over_an_object() {
    let mut editor = editor();
    place_rect(&mut editor);
    editor.on_pointer_down(400.0, 300.0, true);
    editor.on_pointer_move(410.0, 300.0);
    assert_eq!(editor.scene().viewport().top_left(), (-10.0, 0.0));
    assert!(editor.scene().active_id().is_none());
}

#[test]
fn wheel_zoom_is_clamped() {
    let mut editor = editor();
    editor.on_wheel(400.0, 300.0, 1e9);
    assert_eq!(editor.scene().viewport().zoom(), MIN_ZOOM);
}

// ----------------------------------------------------------------------
// Paste
// ----------------------------------------------------------------------

#[test]
fn pasted_image_is_scaled_and_centered() {
    let mut editor = editor();
    let mut clipboard = MockClipboard {
        rich: Ok(ClipboardPayload::Image(ClipboardImage {
            width: 1000,
            height: 500,
            rgba: vec![0; 4],
        })),
        text: Err(ClipboardError::Empty),
    };

    editor.paste(&mut clipboard);
    assert_eq!(editor.scene().object_count(), 1);
    assert_eq!(editor.history().len(), 2);
    assert_eq!(editor.mode(), Mode::Pan);

    match &editor.scene().contents().objects[0] {
        SceneObject::Image { left, top, scale_x, scale_y, .. } => {
            // 1000px wide against a 400px half-screen budget.
            assert_eq!(*scale_x, 0.4);
            assert_eq!(*scale_y, 0.4);
            assert_eq!((*left, *top), (200.0, 200.0));
        }
        other => panic!("expected an image, got {other:?}"),
    }
}

#[test]
fn denied_rich_read_falls_back_to_text() {
    let mut editor = editor();
    let mut clipboard = MockClipboard {
        rich: Err(denied()),
        text: Ok("hello".to_string()),
    };

    editor.paste(&mut clipboard);
    match &editor.scene().contents().objects[0] {
        SceneObject::Text { text, fill, font_size, .. } => {
            assert_eq!(text, "hello");
            assert_eq!(*fill, editor.drawing_color());
            assert_eq!(*font_size, 40.0);
        }
        other => panic!("expected text, got {other:?}"),
    }
    assert!(editor.take_alerts().is_empty());
}

#[test]
fn fully_denied_clipboard_raises_an_alert() {
    let mut editor = editor();
    let mut clipboard = MockClipboard {
        rich: Err(denied()),
        text: Err(denied()),
    };

    editor.paste(&mut clipboard);
    assert!(editor.scene().is_empty());
    assert_eq!(editor.history().len(), 1);

    let alerts = editor.take_alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].message, PASTE_DENIED_MESSAGE);
}

#[test]
fn empty_clipboard_pastes_nothing_silently() {
    let mut editor = editor();
    let mut clipboard = MockClipboard {
        rich: Err(ClipboardError::Empty),
        text: Err(ClipboardError::Empty),
    };

    editor.paste(&mut clipboard);
    assert!(editor.scene().is_empty());
    assert!(editor.take_alerts().is_empty());
}

// ----------------------------------------------------------------------
// Export and persistence
// ----------------------------------------------------------------------

struct StubRasterizer;

impl Rasterizer for StubRasterizer {
    fn rasterize(&self, _scene: &Scene, multiplier: f64) -> Result<Vec<u8>, ExportError> {
        assert_eq!(multiplier, 2.0);
        Ok(vec![0x89, 0x50, 0x4e, 0x47])
    }
}

#[test]
fn export_names_the_fixed_download_file() {
    let editor = editor();
    let ExportedImage { file_name, png_bytes } = editor.export_png(&StubRasterizer).unwrap();
    assert_eq!(file_name, EXPORT_FILE_NAME);
    assert_eq!(png_bytes.len(), 4);
}

#[test]
fn persisted_board_is_restored_without_history_entries() {
    let temp = tempfile::tempdir().unwrap();
    let mut options = StoreOptions::new(temp.path().to_path_buf());
    options.compression = CompressionMode::Off;

    let mut first = editor();
    place_rect(&mut first);
    first.persist(&options).unwrap();

    let second =
        Editor::with_persisted(&Config::default(), 800.0, 600.0, &options).unwrap();
    assert_eq!(second.scene().object_count(), 1);
    // Exactly one baseline entry; the restore itself was not recorded.
    assert_eq!(second.history().len(), 1);
    assert!(!second.history().can_undo());
    assert_eq!(second.scene().contents(), first.scene().contents());
}

#[test]
fn corrupt_persisted_board_falls_back_to_empty() {
    let temp = tempfile::tempdir().unwrap();
    let options = StoreOptions::new(temp.path().to_path_buf());
    std::fs::create_dir_all(&options.base_dir).unwrap();
    std::fs::write(options.board_file_path(), b"{nope").unwrap();

    let editor =
        Editor::with_persisted(&Config::default(), 800.0, 600.0, &options).unwrap();
    assert!(editor.scene().is_empty());
    assert_eq!(editor.history().len(), 1);
}
