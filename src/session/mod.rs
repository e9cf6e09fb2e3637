//! Board persistence: one serialized scene snapshot in a local key-value
//! style store, written on session end and read on session start.

pub mod options;
pub mod store;

pub use options::{BOARD_STATE_KEY, CompressionMode, StoreOptions, options_from_config};
pub use store::{clear_board, load_board, save_board};
