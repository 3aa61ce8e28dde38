//! Error types for engine operations.

use std::io;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors reported by a key-value engine.
///
/// Each variant maps to a stable numeric code via [`EngineError::code`],
/// so the layer above can surface a uniform storage-engine error without
/// knowing which engine produced it.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The database file is corrupted.
    #[error("database corrupted: {message}")]
    Corrupted {
        /// Description of the corruption.
        message: String,
    },

    /// Delete was called for a key that is not present.
    #[error("key not present")]
    KeyNotPresent,

    /// A write was attempted on a read-only session.
    #[error("database is open read-only")]
    ReadOnly,
}

impl EngineError {
    /// Creates a corruption error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted {
            message: message.into(),
        }
    }

    /// Returns the engine-specific numeric error code.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Corrupted { .. } => 2,
            Self::KeyNotPresent => 3,
            Self::ReadOnly => 4,
        }
    }

    /// Returns the OS error number captured from the failing call, if any.
    ///
    /// Only I/O failures carry one; it is taken from the `io::Error`
    /// itself rather than read back from ambient global state, so later
    /// operations cannot overwrite it.
    #[must_use]
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Io(err) => err.raw_os_error(),
            _ => None,
        }
    }

    /// Returns true if the error reports a missing file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(err) if err.kind() == io::ErrorKind::NotFound)
    }
}
