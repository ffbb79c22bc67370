//! History error types.

use thiserror::Error;

/// Boxed error produced by a codec backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Broad category of a [`HistoryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied a value the history does not accept.
    InvalidArgument,
    /// The operation's precondition does not hold in the current state.
    IllegalState,
}

/// Errors that can occur during history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("capacity must be positive, got {0}")]
    InvalidCapacity(usize),

    /// The subject could not be encoded on `add`.
    #[error("cannot record subject")]
    Encode(#[source] CodecError),

    /// A stored snapshot could not be decoded during undo/redo.
    #[error("cannot restore snapshot")]
    Decode(#[source] CodecError),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    /// The live subject behind a snapshot has been dropped by its owner.
    #[error("subject has already been dropped")]
    SubjectDropped,

    /// The live subject is borrowed elsewhere and cannot be read or updated.
    #[error("subject is currently borrowed")]
    SubjectBorrowed,
}

impl HistoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HistoryError::InvalidCapacity(_) | HistoryError::Encode(_) => {
                ErrorKind::InvalidArgument
            }
            HistoryError::Decode(_)
            | HistoryError::NothingToUndo
            | HistoryError::NothingToRedo
            | HistoryError::SubjectDropped
            | HistoryError::SubjectBorrowed => ErrorKind::IllegalState,
        }
    }
}

/// Failures while turning a value into bytes or back.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode {type_name}")]
    Encode {
        type_name: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("failed to decode {type_name}")]
    Decode {
        type_name: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("snapshot holds {found}, expected {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("unsupported snapshot format {found} (expected {expected})")]
    UnsupportedFormat { expected: u32, found: u32 },
}

pub type Result<T, E = HistoryError> = std::result::Result<T, E>;
