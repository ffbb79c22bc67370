//! rewind-core: bounded linear undo/redo history.
//!
//! Design rules:
//! - One timeline only. Adding a record discards everything that was undone.
//! - Capacity bounds undo + redo records together; the oldest undo record is evicted first.
//! - Eviction happens on `add`. Shrinking the capacity never drops records by itself.
//! - The first record is the floor: undo needs at least two records on the undo side.

pub mod config;
mod error;
mod history;
mod linked;

pub use config::{load_config, HistoryConfig, DEFAULT_CAPACITY};
pub use error::{BoxError, CodecError, ErrorKind, HistoryError, Result};
pub use history::History;
pub use linked::LinkedHistory;
