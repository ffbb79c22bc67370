//! The index contract shared by every history variant.

use crate::Result;

/// A bounded, linear undo/redo timeline.
///
/// Positions are counted from the oldest retained record. The current position is the
/// newest record on the undo side; records after it were undone and can be redone.
///
/// Implementations are single-threaded: mutating a history from several threads needs
/// external locking.
pub trait History {
    /// Number of retained records, undo and redo side together.
    fn len(&self) -> usize;

    /// Position of the current record, or `None` when nothing is on the undo side.
    fn current_index(&self) -> Option<usize>;

    fn capacity(&self) -> usize;

    /// Changes the capacity. Existing records are kept; the new limit is enforced by
    /// the next `add`.
    fn set_capacity(&mut self, capacity: usize) -> Result<()>;

    /// Drops every record on both sides.
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once there is a record before the current one. A single record cannot be
    /// undone past itself.
    fn can_undo(&self) -> bool {
        matches!(self.current_index(), Some(index) if index > 0)
    }

    fn can_redo(&self) -> bool {
        matches!(self.current_index(), Some(index) if index + 1 < self.len())
    }
}
