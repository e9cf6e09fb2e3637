//! Scene model: colors, objects, brushes, viewport, and the drawing surface.

pub mod brush;
pub mod color;
pub mod object;
pub mod scene;
pub mod viewport;

pub use brush::Brush;
pub use color::Color;
pub use object::SceneObject;
pub use scene::{Cursor, ObjectId, Scene, SceneContents, SceneEvent};
pub use viewport::Viewport;
