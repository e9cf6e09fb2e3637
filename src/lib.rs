//! Core state for a whiteboard editor.
//!
//! Owns the tool-mode state machine, the bounded snapshot undo history,
//! the shared style state, and board persistence. Rendering, clipboard
//! access, and rasterized export are consumed through narrow collaborator
//! traits so a host shell can plug in its own implementations.

pub mod calc;
pub mod clipboard;
pub mod config;
pub mod draw;
pub mod editor;
pub mod export;
pub mod history;
pub mod session;
pub mod ui;
pub mod util;

pub use config::Config;
pub use editor::{Editor, Mode};
pub use history::{DEFAULT_HISTORY_LIMIT, History, HistoryError, Snapshot};
