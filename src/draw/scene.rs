//! Scene contents, selection, and surface interaction flags.

use super::brush::Brush;
use super::color::{self, Color};
use super::object::SceneObject;
use super::viewport::Viewport;
use serde::{Deserialize, Serialize};

/// Identifier for an object within one scene. Ids are session-local and
/// are reassigned when a snapshot is restored.
pub type ObjectId = u64;

/// Mutation notifications consumed by the history manager.
///
/// All three classes funnel into the same capture path; the distinction
/// exists only for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    ObjectAdded(ObjectId),
    ObjectModified(ObjectId),
    ObjectRemoved(ObjectId),
}

/// Pointer cursor requested from the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Pan mode.
    Grab,
    /// Eraser mode.
    NotAllowed,
}

/// The serializable portion of a scene: everything a snapshot captures.
///
/// The viewport transform is deliberately excluded, matching the external
/// collaborator's serialization contract (undo must not jump the camera).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneContents {
    pub background: Color,
    pub objects: Vec<SceneObject>,
}

impl SceneContents {
    pub fn empty(background: Color) -> Self {
        Self {
            background,
            objects: Vec::new(),
        }
    }
}

/// The drawing surface: objects in draw order, the active selection, the
/// viewport transform, and the interaction flags the mode controller sets.
///
/// Mutations (add/modify/remove) enqueue [`SceneEvent`]s; the editor
/// drains them after each operation and funnels them into history capture.
pub struct Scene {
    next_id: ObjectId,
    objects: Vec<(ObjectId, SceneObject)>,
    selection: Vec<ObjectId>,
    background: Color,
    viewport: Viewport,
    drawing_enabled: bool,
    selection_enabled: bool,
    cursor: Cursor,
    free_brush: Option<Brush>,
    needs_render: bool,
    events: Vec<SceneEvent>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            next_id: 1,
            objects: Vec::new(),
            selection: Vec::new(),
            background: color::DARK_BACKGROUND,
            viewport: Viewport::new(width, height),
            drawing_enabled: false,
            selection_enabled: true,
            cursor: Cursor::Default,
            free_brush: None,
            needs_render: true,
            events: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Objects and mutation events
    // ------------------------------------------------------------------

    /// Adds an object on top of the existing ones and fires `ObjectAdded`.
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.push((id, object));
        self.events.push(SceneEvent::ObjectAdded(id));
        self.needs_render = true;
        id
    }

    /// Removes an object and fires `ObjectRemoved`. Removed objects leave
    /// the selection as well.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|(oid, _)| *oid == id)?;
        let (_, object) = self.objects.remove(index);
        self.selection.retain(|sid| *sid != id);
        self.events.push(SceneEvent::ObjectRemoved(id));
        self.needs_render = true;
        Some(object)
    }

    /// Edits an object in place and fires `ObjectModified`.
    ///
    /// Returns false when the id is unknown.
    pub fn update<F: FnOnce(&mut SceneObject)>(&mut self, id: ObjectId, edit: F) -> bool {
        match self.objects.iter_mut().find(|(oid, _)| *oid == id) {
            Some((_, object)) => {
                edit(object);
                self.events.push(SceneEvent::ObjectModified(id));
                self.needs_render = true;
                true
            }
            None => false,
        }
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects
            .iter()
            .find(|(oid, _)| *oid == id)
            .map(|(_, o)| o)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drains mutation events accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Topmost object whose bounding box contains the scene-coordinate
    /// point, if any.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|(_, object)| {
                object
                    .bounding_box()
                    .is_some_and(|bounds| bounds.contains(x, y))
            })
            .map(|(id, _)| *id)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Replaces the selection with a single object.
    pub fn set_active(&mut self, id: ObjectId) -> bool {
        if self.object(id).is_none() {
            return false;
        }
        self.selection.clear();
        self.selection.push(id);
        self.needs_render = true;
        true
    }

    /// Clears the active selection.
    pub fn discard_active_object(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.needs_render = true;
        }
    }

    /// Id of the primary selected object, if any.
    pub fn active_id(&self) -> Option<ObjectId> {
        self.selection.first().copied()
    }

    /// The primary selected object, if any.
    pub fn active_object(&self) -> Option<&SceneObject> {
        self.active_id().and_then(|id| self.object(id))
    }

    /// All selected object ids in selection order.
    pub fn active_ids(&self) -> Vec<ObjectId> {
        self.selection.clone()
    }

    // ------------------------------------------------------------------
    // Surface configuration (driven by the mode controller)
    // ------------------------------------------------------------------

    pub fn set_drawing_enabled(&mut self, enabled: bool) {
        self.drawing_enabled = enabled;
    }

    pub fn drawing_enabled(&self) -> bool {
        self.drawing_enabled
    }

    pub fn set_selection_enabled(&mut self, enabled: bool) {
        self.selection_enabled = enabled;
    }

    pub fn selection_enabled(&self) -> bool {
        self.selection_enabled
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Installs a free-drawing brush configuration on the surface.
    pub fn install_brush(&mut self, brush: Brush) {
        self.free_brush = Some(brush);
    }

    /// The currently installed brush, if a drawing mode configured one.
    pub fn brush(&self) -> Option<Brush> {
        self.free_brush
    }

    /// Marks the surface for redraw.
    pub fn request_render(&mut self) {
        self.needs_render = true;
    }

    /// Consumes the pending-redraw flag.
    pub fn take_needs_render(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Swaps the board background (dark/light toggle). Does not fire a
    /// mutation event: background changes are not history entries.
    pub fn set_background(&mut self, background: Color) {
        self.background = background;
        self.needs_render = true;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    // ------------------------------------------------------------------
    // Snapshot round-trip
    // ------------------------------------------------------------------

    /// Copies the serializable scene state.
    pub fn contents(&self) -> SceneContents {
        SceneContents {
            background: self.background,
            objects: self.objects.iter().map(|(_, o)| o.clone()).collect(),
        }
    }

    /// Replaces the scene with restored contents.
    ///
    /// Clears the selection, reassigns ids, and fires `ObjectAdded` for
    /// every restored object — the same event storm the external
    /// collaborator produces while loading, which is why callers hold a
    /// restore guard around this.
    pub fn load_contents(&mut self, contents: SceneContents) {
        self.selection.clear();
        self.background = contents.background;
        self.objects.clear();
        for object in contents.objects {
            let id = self.next_id;
            self.next_id += 1;
            self.objects.push((id, object));
            self.events.push(SceneEvent::ObjectAdded(id));
        }
        self.needs_render = true;
    }
}
