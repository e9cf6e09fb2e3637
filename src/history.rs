//! Bounded linear undo/redo log of scene snapshots.
//!
//! Every accepted scene mutation appends a full-scene snapshot unless a
//! restore is in flight. Undo and redo move a cursor through the log and
//! hand the caller a [`RestoreGuard`] that suppresses capture for the
//! whole duration of the restore, including the mutation events the load
//! itself fires.

use crate::draw::SceneContents;
use log::{debug, warn};
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;

/// Default maximum number of history entries.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Schema version stamped into every snapshot payload wrapper.
const SNAPSHOT_VERSION: u32 = 1;

/// Failures around snapshot encoding and restoration.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to serialize scene snapshot: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("history snapshot is unreadable: {0}")]
    SnapshotUnreadable(#[source] serde_json::Error),

    #[error("snapshot version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// An immutable, version-tagged, fully serialized copy of scene contents
/// captured at one point in time. Equality is payload equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    version: u32,
    payload: String,
}

impl Snapshot {
    /// Serializes scene contents into a snapshot.
    pub fn of(contents: &SceneContents) -> Result<Self, HistoryError> {
        Ok(Self {
            version: SNAPSHOT_VERSION,
            payload: serde_json::to_string(contents).map_err(HistoryError::Serialize)?,
        })
    }

    /// Deserializes the snapshot back into scene contents.
    pub fn decode(&self) -> Result<SceneContents, HistoryError> {
        if self.version > SNAPSHOT_VERSION {
            return Err(HistoryError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        serde_json::from_str(&self.payload).map_err(HistoryError::SnapshotUnreadable)
    }

    /// Raw serialized payload (for equality checks in callers and tests).
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Builds a snapshot from raw parts. Only for exercising corrupt-entry
    /// recovery in tests.
    #[cfg(test)]
    pub(crate) fn from_raw_parts(version: u32, payload: String) -> Self {
        Self { version, payload }
    }
}

/// RAII token marking a restore in progress.
///
/// While any guard is alive, [`History::capture`] is a no-op. The flag is
/// cleared on drop, so every exit path — including a failed load —
/// releases it and capture can never stay wedged.
pub struct RestoreGuard {
    flag: Rc<Cell<bool>>,
}

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// The bounded, linear history log.
///
/// Invariant: `0 <= cursor < entries.len()` whenever the log is non-empty.
/// Entries after the cursor (redo entries) are discarded the moment a new
/// mutation is captured — linear history, no branching.
pub struct History {
    entries: Vec<Snapshot>,
    cursor: usize,
    limit: usize,
    restoring: Rc<Cell<bool>>,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            limit: limit.max(1),
            restoring: Rc::new(Cell::new(false)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry the scene currently displays.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor + 1 < self.entries.len()
    }

    pub fn is_restoring(&self) -> bool {
        self.restoring.get()
    }

    /// Appends a snapshot unless a restore is in progress.
    ///
    /// Discards redo entries first, then evicts the oldest entry when the
    /// bound is exceeded, leaving the cursor on the just-appended entry.
    pub fn capture(&mut self, snapshot: Snapshot) {
        if self.restoring.get() {
            debug!("history capture skipped: restore in progress");
            return;
        }
        if !self.entries.is_empty() && self.cursor + 1 < self.entries.len() {
            // Redo availability is lost here.
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(snapshot);
        if self.entries.len() > self.limit {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Steps back one entry.
    ///
    /// No-op at the oldest entry. On success the cursor has already moved
    /// and the returned guard must stay alive until the snapshot is fully
    /// loaded into the scene.
    pub fn undo(&mut self) -> Option<(RestoreGuard, Snapshot)> {
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        let snapshot = self.entries[self.cursor].clone();
        Some((self.begin_restore(), snapshot))
    }

    /// Steps forward one entry; symmetric to [`History::undo`].
    pub fn redo(&mut self) -> Option<(RestoreGuard, Snapshot)> {
        if self.entries.is_empty() || self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        let snapshot = self.entries[self.cursor].clone();
        Some((self.begin_restore(), snapshot))
    }

    /// Acquires the restore guard directly (used when loading persisted
    /// state at startup, which must not be recorded either).
    pub fn begin_restore(&self) -> RestoreGuard {
        self.restoring.set(true);
        RestoreGuard {
            flag: Rc::clone(&self.restoring),
        }
    }

    /// Drops the entry a failed undo landed on.
    ///
    /// The cursor ends up back on the entry the scene still displays; the
    /// editor stays usable and an earlier undo can be retried.
    pub fn discard_after_failed_undo(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        warn!(
            "dropping unreadable history entry at index {} after failed undo",
            self.cursor
        );
        self.entries.remove(self.cursor);
        if self.cursor >= self.entries.len() && self.cursor > 0 {
            self.cursor = self.entries.len() - 1;
        }
    }

    /// Drops the entry a failed redo landed on; counterpart of
    /// [`History::discard_after_failed_undo`].
    pub fn discard_after_failed_redo(&mut self) {
        if self.entries.is_empty() || self.cursor == 0 {
            return;
        }
        warn!(
            "dropping unreadable history entry at index {} after failed redo",
            self.cursor
        );
        self.entries.remove(self.cursor);
        self.cursor -= 1;
    }

    /// Snapshot at the cursor, if the log is non-empty.
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor)
    }
}
