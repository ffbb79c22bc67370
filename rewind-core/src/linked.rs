//! In-memory history that owns its records directly.

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use crate::config::{HistoryConfig, DEFAULT_CAPACITY};
use crate::{History, HistoryError, Result};

/// Bounded undo/redo history over owned records.
///
/// `past` holds the undo side oldest-first; its last element is the current record.
/// `future` holds undone records, the most recently undone at the end.
#[derive(Debug, Clone)]
pub struct LinkedHistory<R> {
    capacity: usize,
    past: VecDeque<R>,
    future: Vec<R>,
}

impl<R> Default for LinkedHistory<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> LinkedHistory<R> {
    /// Empty history with the default capacity of 100.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            past: VecDeque::new(),
            future: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut history = Self::new();
        history.set_capacity(capacity)?;
        Ok(history)
    }

    pub fn from_config(config: &HistoryConfig) -> Result<Self> {
        Self::with_capacity(config.initial_capacity)
    }

    /// Record a new state. Discards the redo side and evicts the oldest records once
    /// the capacity is exceeded.
    pub fn add(&mut self, record: R) {
        self.past.push_back(record);
        self.future.clear();
        while self.len() > self.capacity {
            self.past.pop_front();
            trace!(capacity = self.capacity, "evicted oldest record");
        }
        debug!(index = self.past.len() - 1, size = self.len(), "record added");
    }

    /// Step back one record and return the new current record.
    pub fn undo(&mut self) -> Result<&R> {
        if !self.can_undo() {
            return Err(HistoryError::NothingToUndo);
        }
        if let Some(record) = self.past.pop_back() {
            self.future.push(record);
        }
        debug!(index = self.past.len() - 1, "undo");
        self.past.back().ok_or(HistoryError::NothingToUndo)
    }

    /// Reapply the most recently undone record and return it.
    pub fn redo(&mut self) -> Result<&R> {
        if !self.can_redo() {
            return Err(HistoryError::NothingToRedo);
        }
        let record = self.future.pop().ok_or(HistoryError::NothingToRedo)?;
        self.past.push_back(record);
        debug!(index = self.past.len() - 1, "redo");
        self.past.back().ok_or(HistoryError::NothingToRedo)
    }

    pub fn undo_if_can(&mut self) -> Option<&R> {
        if self.can_undo() {
            self.undo().ok()
        } else {
            None
        }
    }

    pub fn redo_if_can(&mut self) -> Option<&R> {
        if self.can_redo() {
            self.redo().ok()
        } else {
            None
        }
    }

    pub fn current_record(&self) -> Option<&R> {
        self.past.back()
    }

    /// Record at a timeline position, counting from the oldest retained record.
    /// Positions past the current one address the redo side.
    pub fn get(&self, index: usize) -> Option<&R> {
        if index < self.past.len() {
            self.past.get(index)
        } else if index < self.len() {
            self.future.get(self.len() - 1 - index)
        } else {
            None
        }
    }

    /// Retained records from oldest to newest, redo side included.
    pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.past.iter().chain(self.future.iter().rev())
    }
}

impl<R> History for LinkedHistory<R> {
    fn len(&self) -> usize {
        self.past.len() + self.future.len()
    }

    fn current_index(&self) -> Option<usize> {
        self.past.len().checked_sub(1)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(HistoryError::InvalidCapacity(capacity));
        }
        if self.len() > capacity {
            warn!(
                size = self.len(),
                capacity, "history exceeds new capacity until the next add"
            );
        }
        debug!(from = self.capacity, to = capacity, "capacity changed");
        self.capacity = capacity;
        Ok(())
    }

    fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        debug!("history cleared");
    }
}
