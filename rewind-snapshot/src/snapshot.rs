//! Snapshot history over live subjects.
//!
//! Each `add` stores a full encoded copy of the subject plus a weak handle back to it.
//! Undo and redo decode the target snapshot and merge it into that same subject:
//! - the history never keeps a subject alive;
//! - a dropped subject makes restore fail instead of resurrecting a copy;
//! - a failed undo/redo leaves the history position where it was.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};
use uuid::Uuid;

use rewind_core::{History, HistoryConfig, HistoryError, LinkedHistory, Result};

use crate::codec::{Codec, JsonCodec};
use crate::restore::{restore, Restore, Subject};

/// One recorded state: encoded bytes plus a non-owning handle to the subject.
pub struct Snapshot<T> {
    id: Uuid,
    subject: Weak<RefCell<T>>,
    bytes: Vec<u8>,
}

impl<T> Snapshot<T> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Encoded state as produced by the history's codec.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True while the subject this snapshot was taken from is still alive.
    pub fn is_alive(&self) -> bool {
        self.subject.strong_count() > 0
    }

    pub fn subject(&self) -> Option<Subject<T>> {
        self.subject.upgrade()
    }
}

impl<T> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Bounded undo/redo history that restores state into the original subjects.
///
/// Every snapshot in one history has the same subject type `T`. Recording several kinds
/// of subject in one timeline means recording an enum over them.
///
/// Not thread-safe; subjects are `Rc<RefCell<_>>`.
#[derive(Debug)]
pub struct SnapshotHistory<T, C = JsonCodec> {
    records: LinkedHistory<Snapshot<T>>,
    codec: C,
}

impl<T> Default for SnapshotHistory<T, JsonCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SnapshotHistory<T, JsonCodec> {
    /// Empty history with the default capacity of 100 and JSON snapshots.
    pub fn new() -> Self {
        Self {
            records: LinkedHistory::new(),
            codec: JsonCodec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_codec(JsonCodec::new(), capacity)
    }

    pub fn from_config(config: &HistoryConfig) -> Result<Self> {
        Self::with_capacity(config.initial_capacity)
    }
}

impl<T, C> SnapshotHistory<T, C> {
    pub fn with_codec(codec: C, capacity: usize) -> Result<Self> {
        Ok(Self {
            records: LinkedHistory::with_capacity(capacity)?,
            codec,
        })
    }

    /// The live subject of the current snapshot, if any and still alive.
    pub fn current_record(&self) -> Option<Subject<T>> {
        self.records.current_record().and_then(Snapshot::subject)
    }

    pub fn current_snapshot(&self) -> Option<&Snapshot<T>> {
        self.records.current_record()
    }
}

impl<T, C> SnapshotHistory<T, C>
where
    T: Serialize + DeserializeOwned + Restore,
    C: Codec,
{
    /// Snapshot the subject's current state.
    pub fn add(&mut self, subject: &Subject<T>) -> Result<()> {
        let bytes = {
            let state = subject
                .try_borrow()
                .map_err(|_| HistoryError::SubjectBorrowed)?;
            self.codec.encode(&*state).map_err(HistoryError::Encode)?
        };
        let snapshot = Snapshot {
            id: Uuid::new_v4(),
            subject: Rc::downgrade(subject),
            bytes,
        };
        trace!(snapshot = %snapshot.id, bytes = snapshot.bytes.len(), "snapshot encoded");
        self.records.add(snapshot);
        Ok(())
    }

    /// Restore the previous snapshot into its subject and return that subject.
    pub fn undo(&mut self) -> Result<Subject<T>> {
        if !self.can_undo() {
            return Err(HistoryError::NothingToUndo);
        }
        let target = self
            .current_index()
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| self.records.get(index))
            .ok_or(HistoryError::NothingToUndo)?;
        let live = self.restore_snapshot(target)?;
        self.records.undo()?;
        Ok(live)
    }

    /// Restore the next snapshot into its subject and return that subject.
    pub fn redo(&mut self) -> Result<Subject<T>> {
        if !self.can_redo() {
            return Err(HistoryError::NothingToRedo);
        }
        let target = self
            .current_index()
            .and_then(|index| self.records.get(index + 1))
            .ok_or(HistoryError::NothingToRedo)?;
        let live = self.restore_snapshot(target)?;
        self.records.redo()?;
        Ok(live)
    }

    /// `Ok(None)` when there is nothing to undo; restore failures are still errors.
    pub fn undo_if_can(&mut self) -> Result<Option<Subject<T>>> {
        if self.can_undo() {
            self.undo().map(Some)
        } else {
            Ok(None)
        }
    }

    /// `Ok(None)` when there is nothing to redo; restore failures are still errors.
    pub fn redo_if_can(&mut self) -> Result<Option<Subject<T>>> {
        if self.can_redo() {
            self.redo().map(Some)
        } else {
            Ok(None)
        }
    }

    fn restore_snapshot(&self, snapshot: &Snapshot<T>) -> Result<Subject<T>> {
        let decoded: T = self
            .codec
            .decode(&snapshot.bytes)
            .map_err(HistoryError::Decode)?;
        let live = restore(&snapshot.subject, decoded)?;
        debug!(snapshot = %snapshot.id, "snapshot restored");
        Ok(live)
    }
}

impl<T, C> History for SnapshotHistory<T, C> {
    fn len(&self) -> usize {
        self.records.len()
    }

    fn current_index(&self) -> Option<usize> {
        self.records.current_index()
    }

    fn capacity(&self) -> usize {
        self.records.capacity()
    }

    fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        self.records.set_capacity(capacity)
    }

    fn clear(&mut self) {
        self.records.clear();
    }
}
