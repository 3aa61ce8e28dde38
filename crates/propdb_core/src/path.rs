//! Property database layout on disk.
//!
//! Every filesystem directory gets one hidden state subdirectory holding
//! the property databases of its direct children plus its own:
//!
//! ```text
//! <dir>/
//! ├─ report.txt                     # a resource
//! └─ .propdb/                       # hidden state subdirectory
//!    ├─ .state_for_dir[.ext]        # properties of <dir> itself
//!    └─ report.txt[.ext]            # properties of report.txt
//! ```
//!
//! A file's database is named by the file's own name; placement inside
//! the state subdirectory disambiguates it, not a suffix. The physical
//! extension(s), if any, belong to the engine.

use propdb_engine::Engine;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Name of the hidden state subdirectory, one per filesystem directory.
pub const STATE_DIR: &str = ".propdb";

/// Reserved base name for a directory's own property database.
pub const STATE_FILE_FOR_DIR: &str = ".state_for_dir";

/// Returns the state subdirectory of `dir`.
#[must_use]
pub fn state_dir_path(dir: &Path) -> PathBuf {
    dir.join(STATE_DIR)
}

/// Returns the logical database path for the resource named `fname`
/// inside `dir`, or for `dir` itself when `fname` is `None`.
///
/// Pure path computation; nothing is touched on disk.
#[must_use]
pub fn database_path(dir: &Path, fname: Option<&str>) -> PathBuf {
    state_dir_path(dir).join(fname.unwrap_or(STATE_FILE_FOR_DIR))
}

/// Returns the physical filenames of the database for `fname` (or for
/// the directory itself when `None`) under `engine`.
///
/// The second element names the sibling file of two-file engines, for
/// callers that need the complete file set - existence checks, cleanup -
/// even though open addresses only the logical path.
#[must_use]
pub fn state_files(engine: &dyn Engine, fname: Option<&str>) -> (String, Option<String>) {
    engine.database_files(fname.unwrap_or(STATE_FILE_FOR_DIR))
}

/// Ensures the state subdirectory of `dir` exists.
///
/// Best-effort: creation failure is not reported here - if the directory
/// really cannot be created, the subsequent write-mode open fails and
/// carries the meaningful error.
pub fn ensure_state_dir(dir: &Path) {
    let path = state_dir_path(dir);
    if let Err(err) = fs::create_dir(&path) {
        if err.kind() != io::ErrorKind::AlreadyExists {
            trace!(path = %path.display(), error = %err, "state directory creation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propdb_engine::{LogEngine, MemoryEngine};
    use tempfile::tempdir;

    #[test]
    fn database_path_for_file_and_directory() {
        let dir = Path::new("/srv/docs");
        assert_eq!(
            database_path(dir, Some("report.txt")),
            Path::new("/srv/docs/.propdb/report.txt")
        );
        assert_eq!(
            database_path(dir, None),
            Path::new("/srv/docs/.propdb/.state_for_dir")
        );
    }

    #[test]
    fn state_files_for_two_file_engine() {
        let engine = LogEngine::new();
        let (primary, secondary) = state_files(&engine, Some("report.txt"));
        assert_eq!(primary, "report.txt.dir");
        assert_eq!(secondary.as_deref(), Some("report.txt.pag"));

        let (primary, secondary) = state_files(&engine, None);
        assert_eq!(primary, ".state_for_dir.dir");
        assert_eq!(secondary.as_deref(), Some(".state_for_dir.pag"));
    }

    #[test]
    fn state_files_for_single_file_engine() {
        let engine = MemoryEngine::new();
        let (primary, secondary) = state_files(&engine, None);
        assert_eq!(primary, STATE_FILE_FOR_DIR);
        assert!(secondary.is_none());
    }

    #[test]
    fn ensure_state_dir_creates_once_and_tolerates_repeats() {
        let dir = tempdir().unwrap();
        let state = state_dir_path(dir.path());

        assert!(!state.exists());
        ensure_state_dir(dir.path());
        assert!(state.is_dir());

        // second call is a no-op, not a failure
        ensure_state_dir(dir.path());
        assert!(state.is_dir());
    }

    #[test]
    fn ensure_state_dir_swallows_failure() {
        // parent does not exist; nothing to assert except "does not panic"
        ensure_state_dir(Path::new("/definitely/not/a/real/parent"));
    }
}
