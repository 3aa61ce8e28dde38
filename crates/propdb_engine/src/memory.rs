//! In-memory engine for testing.

use crate::datum::Datum;
use crate::engine::{Engine, EngineDb, OpenMode};
use crate::error::{EngineError, EngineResult};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::ops::Bound;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type Map = BTreeMap<Vec<u8>, Vec<u8>>;

/// An in-memory key-value engine.
///
/// Databases live in a path-keyed registry for the lifetime of the
/// engine value, so close/reopen lifecycle tests behave like the
/// persistent engine without touching the filesystem. Suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral property stores that don't need persistence
///
/// One logical database is one "file": [`Engine::database_files`]
/// returns no sibling. A read-only open of an unknown path fails with a
/// not-found I/O error, exactly like a missing file on disk.
///
/// # Example
///
/// ```rust
/// use propdb_engine::{Engine, MemoryEngine, OpenMode};
/// use std::path::Path;
///
/// let engine = MemoryEngine::new();
/// assert!(engine.open(Path::new("absent"), OpenMode::ReadOnly).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    registry: Arc<RwLock<HashMap<PathBuf, Map>>>,
}

impl MemoryEngine {
    /// Creates an engine with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of databases in the registry.
    #[must_use]
    pub fn database_count(&self) -> usize {
        self.registry.read().len()
    }

    /// Removes every database from the registry.
    pub fn clear(&self) {
        self.registry.write().clear();
    }
}

impl Engine for MemoryEngine {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn database_files(&self, base: &str) -> (String, Option<String>) {
        (base.to_owned(), None)
    }

    fn open(&self, path: &Path, mode: OpenMode) -> EngineResult<Box<dyn EngineDb>> {
        let read_only = mode.is_read_only();
        {
            let mut registry = self.registry.write();
            if !registry.contains_key(path) {
                if read_only {
                    return Err(EngineError::Io(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("no database at {}", path.display()),
                    )));
                }
                registry.insert(path.to_path_buf(), Map::new());
            }
        }
        Ok(Box::new(MemoryDb {
            registry: Arc::clone(&self.registry),
            path: path.to_path_buf(),
            read_only,
        }))
    }
}

/// One open session against a registry entry.
struct MemoryDb {
    registry: Arc<RwLock<HashMap<PathBuf, Map>>>,
    path: PathBuf,
    read_only: bool,
}

impl MemoryDb {
    fn with_map<T>(&self, f: impl FnOnce(&Map) -> T) -> EngineResult<T> {
        let registry = self.registry.read();
        let map = registry.get(&self.path).ok_or_else(|| {
            EngineError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("database removed from registry: {}", self.path.display()),
            ))
        })?;
        Ok(f(map))
    }

    fn with_map_mut<T>(&self, f: impl FnOnce(&mut Map) -> T) -> EngineResult<T> {
        if self.read_only {
            return Err(EngineError::ReadOnly);
        }
        let mut registry = self.registry.write();
        let map = registry.get_mut(&self.path).ok_or_else(|| {
            EngineError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("database removed from registry: {}", self.path.display()),
            ))
        })?;
        Ok(f(map))
    }
}

impl EngineDb for MemoryDb {
    fn fetch(&mut self, key: &[u8]) -> EngineResult<Option<Datum>> {
        self.with_map(|map| map.get(key).cloned().map(Datum::new))
    }

    fn store(&mut self, key: &[u8], value: &[u8]) -> EngineResult<()> {
        self.with_map_mut(|map| {
            map.insert(key.to_vec(), value.to_vec());
        })
    }

    fn delete(&mut self, key: &[u8]) -> EngineResult<()> {
        let removed = self.with_map_mut(|map| map.remove(key).is_some())?;
        if removed {
            Ok(())
        } else {
            Err(EngineError::KeyNotPresent)
        }
    }

    fn exists(&mut self, key: &[u8]) -> EngineResult<bool> {
        self.with_map(|map| map.contains_key(key))
    }

    fn first_key(&mut self) -> EngineResult<Option<Datum>> {
        self.with_map(|map| map.keys().next().cloned().map(Datum::new))
    }

    fn next_key(&mut self, previous: &[u8]) -> EngineResult<Option<Datum>> {
        self.with_map(|map| {
            map.range::<[u8], _>((Bound::Excluded(previous), Bound::Unbounded))
                .next()
                .map(|(key, _)| Datum::new(key.clone()))
        })
    }
}
