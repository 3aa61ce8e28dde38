//! Engine trait definitions.

use crate::datum::Datum;
use crate::error::EngineResult;
use std::path::Path;

/// Access mode for opening a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read-only; the database file(s) must already exist.
    ReadOnly,
    /// Read-write; the database file(s) are created when absent.
    ReadWrite,
}

impl OpenMode {
    /// Returns true for read-only access.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::ReadOnly)
    }
}

/// An embedded key-value engine.
///
/// Exactly one engine is active per store, chosen at configuration time
/// and passed by reference wherever a database is opened. Engines are
/// **opaque key-value stores**: the property layer never sees their native
/// call shape, on-disk format, or error vocabulary.
///
/// # Invariants
///
/// - `open` in [`OpenMode::ReadWrite`] creates the file(s) when absent,
///   with owner/group read-write permissions on Unix
/// - `open` in [`OpenMode::ReadOnly`] fails when the database is absent
/// - `database_files` names every physical file of one logical database,
///   so callers can perform existence checks on the complete set
///
/// # Implementors
///
/// - [`super::LogEngine`] - Persistent storage, two files per database
/// - [`super::MemoryEngine`] - For testing
pub trait Engine: Send + Sync {
    /// A short stable name identifying the engine.
    fn name(&self) -> &'static str;

    /// Returns the physical filenames of the logical database `base`.
    ///
    /// The first element is the primary file that `open` addresses; the
    /// second is the sibling file for engines that split one logical
    /// database across two physical files, or `None` for single-file
    /// engines.
    fn database_files(&self, base: &str) -> (String, Option<String>);

    /// Opens the database at `path` (the logical base path, without any
    /// engine-specific extension).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened; in particular a
    /// read-only open of an absent database fails with a not-found I/O
    /// error. The caller decides whether that failure is meaningful.
    fn open(&self, path: &Path, mode: OpenMode) -> EngineResult<Box<dyn EngineDb>>;
}

/// One open database session.
///
/// A session is the unit of lifetime for a property database: obtained
/// from [`Engine::open`], released when dropped. Sessions are not safe
/// for concurrent use; callers serialize externally. Mutating the
/// database while a `first_key`/`next_key` scan is in progress has
/// undefined effect on that scan.
pub trait EngineDb {
    /// Returns the value stored under `key`, or `None` if absent.
    fn fetch(&mut self, key: &[u8]) -> EngineResult<Option<Datum>>;

    /// Stores `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is read-only or the write fails.
    fn store(&mut self, key: &[u8], value: &[u8]) -> EngineResult<()>;

    /// Deletes `key`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::KeyNotPresent`] if the key is
    /// absent, uniformly across engines.
    fn delete(&mut self, key: &[u8]) -> EngineResult<()>;

    /// Returns whether `key` is present.
    ///
    /// The default implementation fetches and discards the value, for
    /// engines without a native existence primitive.
    fn exists(&mut self, key: &[u8]) -> EngineResult<bool> {
        Ok(self.fetch(key)?.is_some())
    }

    /// Returns the first key of a forward scan, or `None` if the
    /// database is empty. Calling it again restarts the scan.
    fn first_key(&mut self) -> EngineResult<Option<Datum>>;

    /// Returns the key following `previous` in engine order, or `None`
    /// when the scan is exhausted. No ordering is promised beyond
    /// "each key exactly once".
    fn next_key(&mut self, previous: &[u8]) -> EngineResult<Option<Datum>>;
}
