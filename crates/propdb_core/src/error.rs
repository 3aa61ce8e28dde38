//! Error types for the property database core.

use propdb_engine::EngineError;
use thiserror::Error;

/// HTTP-style severity tag carried by storage-engine errors, for the
/// outer system that surfaces them.
pub const HTTP_INTERNAL_SERVER_ERROR: u16 = 500;

/// Result type for property database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors surfaced by property database operations.
///
/// Every engine-reported failure reaches callers in one uniform shape:
/// an engine-specific numeric code, a human-readable message, and the OS
/// error number captured at the moment of failure. Engine error
/// vocabularies never escape this type.
#[derive(Debug, Error)]
pub enum DbError {
    /// The storage engine reported a failure.
    #[error("storage engine error {code}: {message}")]
    Engine {
        /// Engine-specific numeric error code.
        code: i32,
        /// Human-readable description from the engine.
        message: String,
        /// OS error number captured from the failing call, if any.
        errno: Option<i32>,
    },
}

impl DbError {
    /// Returns the severity tag for surfacing to the outer system.
    ///
    /// Storage failures are always internal-server-class.
    #[must_use]
    pub fn status(&self) -> u16 {
        HTTP_INTERNAL_SERVER_ERROR
    }

    /// Returns the engine-specific numeric error code.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Engine { code, .. } => *code,
        }
    }

    /// Returns the captured OS error number, if any.
    #[must_use]
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Engine { errno, .. } => *errno,
        }
    }
}

impl From<EngineError> for DbError {
    fn from(err: EngineError) -> Self {
        // The errno travels inside the engine error itself, so nothing
        // that runs between failure and translation can overwrite it.
        Self::Engine {
            code: err.code(),
            errno: err.errno(),
            message: err.to_string(),
        }
    }
}
