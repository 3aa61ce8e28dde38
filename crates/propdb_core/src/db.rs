//! The property database handle.

use crate::error::DbResult;
use crate::path;
use crate::resource::ResourcePaths;
use propdb_engine::{Datum, Engine, EngineDb, OpenMode};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// One open property database session.
///
/// A `PropDb` bundles the underlying engine session with the path it was
/// opened at. One handle is one session: obtained from [`PropDb::open`]
/// or [`PropDb::open_direct`], released by [`PropDb::close`] (or drop).
/// Operations take `&mut self`; callers serialize any sharing. Two
/// handles over the same on-disk database are not arbitrated here - the
/// engine's own contention behavior is inherited as-is, and any
/// retry-with-backoff policy belongs to a layer above.
///
/// Mutating the database while a [`first_key`](PropDb::first_key) /
/// [`next_key`](PropDb::next_key) scan is in progress has undefined
/// effect on that scan.
pub struct PropDb {
    session: Box<dyn EngineDb>,
    path: PathBuf,
}

impl PropDb {
    /// Opens the property database of `resource`.
    ///
    /// Resolves the resource to its directory/filename pair, ensures the
    /// hidden state subdirectory exists when opening for writing, and
    /// delegates to the engine.
    ///
    /// Returns `Ok(None)` when `read_only` is set and the database could
    /// not be opened: a resource with no properties legitimately has no
    /// database file yet, so that is "no properties", not a failure.
    ///
    /// # Errors
    ///
    /// Returns a storage-engine error when a write-mode open fails,
    /// carrying the engine's code and the captured OS error number.
    pub fn open(
        engine: &dyn Engine,
        resource: &dyn ResourcePaths,
        read_only: bool,
    ) -> DbResult<Option<Self>> {
        let (dir, fname) = resource.dir_file_name();
        if !read_only {
            path::ensure_state_dir(&dir);
        }
        let db_path = path::database_path(&dir, fname.as_deref());
        Self::open_direct(engine, &db_path, read_only)
    }

    /// Opens the property database at an explicit path, bypassing
    /// resource resolution. Same success and failure semantics as
    /// [`PropDb::open`].
    ///
    /// # Errors
    ///
    /// Returns a storage-engine error when a write-mode open fails.
    pub fn open_direct(
        engine: &dyn Engine,
        db_path: &Path,
        read_only: bool,
    ) -> DbResult<Option<Self>> {
        let mode = if read_only {
            OpenMode::ReadOnly
        } else {
            OpenMode::ReadWrite
        };
        match engine.open(db_path, mode) {
            Ok(session) => {
                trace!(path = %db_path.display(), engine = engine.name(), read_only, "opened");
                Ok(Some(Self {
                    session,
                    path: db_path.to_path_buf(),
                }))
            }
            Err(err) if read_only => {
                // No database yet means no properties; not an error.
                trace!(path = %db_path.display(), error = %err, "read-only open found no database");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the path the database was opened at.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the value stored under `key`, or `None` if absent.
    ///
    /// Absence is not an error; the returned datum is the only signal.
    /// Engine-level error state is cleared here so it cannot leak into a
    /// later unrelated operation.
    pub fn fetch(&mut self, key: impl AsRef<[u8]>) -> Option<Datum> {
        match self.session.fetch(key.as_ref()) {
            Ok(value) => value,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "fetch error cleared");
                None
            }
        }
    }

    /// Returns whether `key` is present. Nothing needs freeing afterward.
    pub fn exists(&mut self, key: impl AsRef<[u8]>) -> bool {
        match self.session.exists(key.as_ref()) {
            Ok(present) => present,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "exists error cleared");
                false
            }
        }
    }

    /// Stores `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns a storage-engine error if the engine rejects the write.
    pub fn store(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> DbResult<()> {
        self.session.store(key.as_ref(), value.as_ref())?;
        Ok(())
    }

    /// Deletes `key`.
    ///
    /// # Errors
    ///
    /// Returns a storage-engine error if the engine rejects the delete;
    /// deleting an absent key is such an error, uniformly across engines.
    pub fn delete(&mut self, key: impl AsRef<[u8]>) -> DbResult<()> {
        self.session.delete(key.as_ref())?;
        Ok(())
    }

    /// Starts a forward scan over all keys; `None` means the database is
    /// empty. Calling it again restarts the scan.
    pub fn first_key(&mut self) -> Option<Datum> {
        match self.session.first_key() {
            Ok(key) => key,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "first_key error cleared");
                None
            }
        }
    }

    /// Returns the key after `previous` in engine order, or `None` when
    /// the scan is exhausted. No ordering is promised across keys.
    pub fn next_key(&mut self, previous: impl AsRef<[u8]>) -> Option<Datum> {
        match self.session.next_key(previous.as_ref()) {
            Ok(key) => key,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "next_key error cleared");
                None
            }
        }
    }

    /// Releases a datum obtained from [`fetch`](PropDb::fetch) or
    /// iteration.
    ///
    /// Datums are owned values under every current engine, so this is a
    /// no-op beyond dropping; it exists so callers never depend on which
    /// side owns a fetched datum's memory.
    pub fn free_datum(&self, datum: Datum) {
        drop(datum);
    }

    /// Closes the database, releasing the engine session.
    ///
    /// Dropping the handle has the same effect; this form makes the
    /// open/close pairing explicit at call sites.
    pub fn close(self) {
        trace!(path = %self.path.display(), "closed");
    }
}

impl std::fmt::Debug for PropDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropDb").field("path", &self.path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::FsResource;
    use propdb_engine::MemoryEngine;

    #[test]
    fn open_read_only_absent_returns_none() {
        let engine = MemoryEngine::new();
        let resource = FsResource::file("/docs", "report.txt");
        let db = PropDb::open(&engine, &resource, true).unwrap();
        assert!(db.is_none());
    }

    #[test]
    fn open_write_then_reopen_read_only() {
        let engine = MemoryEngine::new();
        let resource = FsResource::file("/docs", "report.txt");

        let mut db = PropDb::open(&engine, &resource, false).unwrap().unwrap();
        db.store("color", "red").unwrap();
        db.close();

        let mut db = PropDb::open(&engine, &resource, true).unwrap().unwrap();
        assert_eq!(db.fetch("color").unwrap().as_bytes(), b"red");
        assert!(db.fetch("size").is_none());
    }

    #[test]
    fn directory_resource_uses_reserved_name() {
        let engine = MemoryEngine::new();
        let resource = FsResource::dir("/docs");
        let db = PropDb::open(&engine, &resource, false).unwrap().unwrap();
        assert!(db
            .path()
            .to_string_lossy()
            .ends_with(".propdb/.state_for_dir"));
    }

    #[test]
    fn delete_missing_key_surfaces_engine_error() {
        let engine = MemoryEngine::new();
        let resource = FsResource::dir("/docs");
        let mut db = PropDb::open(&engine, &resource, false).unwrap().unwrap();

        let err = db.delete("missing-key").err().unwrap();
        assert_eq!(err.status(), crate::error::HTTP_INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn free_datum_is_a_no_op() {
        let engine = MemoryEngine::new();
        let resource = FsResource::dir("/docs");
        let mut db = PropDb::open(&engine, &resource, false).unwrap().unwrap();
        db.store("k", "v").unwrap();

        let value = db.fetch("k").unwrap();
        db.free_datum(value);
        // the key is still there; freeing released only the fetched copy
        assert!(db.exists("k"));
    }

    #[test]
    fn open_direct_bypasses_resolution() {
        let engine = MemoryEngine::new();
        let mut db = PropDb::open_direct(&engine, Path::new("/tmp/props"), false)
            .unwrap()
            .unwrap();
        db.store("k", "v").unwrap();
        assert_eq!(db.path(), Path::new("/tmp/props"));
    }
}
