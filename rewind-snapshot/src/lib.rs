//! rewind-snapshot: undo/redo over live subjects using encoded snapshots.
//!
//! Design rules:
//! - Snapshots are full encodes of the subject, never diffs.
//! - The history holds weak handles only; callers own their subjects.
//! - Undo/redo mutate the caller's subject in place and hand back the same `Rc`.
//! - Types opt into restore with `impl Restore`; overriding `restore_from` is the update hook.
//! - One history records one subject type `T`. To track several kinds of subject in a
//!   single timeline, wrap them in an enum and record that.
//! - NaN and infinite floats are refused on `add`; JSON has no lossless form for them.
//!
//! ```ignore
//! use rewind_core::History;
//! use rewind_snapshot::{subject, SnapshotHistory};
//!
//! let doc = subject(Document::default());
//! let mut history = SnapshotHistory::new();
//! history.add(&doc)?;
//!
//! doc.borrow_mut().title = "draft 2".into();
//! history.add(&doc)?;
//!
//! history.undo()?;
//! assert_eq!(doc.borrow().title, "");
//! ```

pub mod codec;
mod finite;
pub mod restore;
pub mod snapshot;

pub use codec::{Codec, JsonCodec, SNAPSHOT_FORMAT};
pub use restore::{restore, subject, Restore, Subject};
pub use snapshot::{Snapshot, SnapshotHistory};

pub use rewind_core::{CodecError, ErrorKind, History, HistoryConfig, HistoryError, Result};
