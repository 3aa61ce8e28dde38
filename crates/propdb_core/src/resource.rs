//! The resource-model collaborator surface.

use std::path::{Path, PathBuf};

/// Maps a resource reference to its containing directory and filename.
///
/// This is the only thing the property store consumes from the resource
/// model: where the resource lives and what it is called. The filename
/// is `None` when the resource is the directory itself, whose properties
/// go to the reserved [`crate::path::STATE_FILE_FOR_DIR`] database.
pub trait ResourcePaths {
    /// Returns the resource's containing directory and optional filename.
    fn dir_file_name(&self) -> (PathBuf, Option<String>);
}

/// A resource identified directly by its path pair.
///
/// For callers that already hold the directory/filename split and don't
/// have a richer resource model behind them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsResource {
    dir: PathBuf,
    name: Option<String>,
}

impl FsResource {
    /// A file resource: `name` inside `dir`.
    pub fn file(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: Some(name.into()),
        }
    }

    /// A directory resource: the directory's own properties.
    pub fn dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            name: None,
        }
    }

    /// Returns the containing directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.dir
    }

    /// Returns the filename, if the resource is a file.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl ResourcePaths for FsResource {
    fn dir_file_name(&self) -> (PathBuf, Option<String>) {
        (self.dir.clone(), self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_resource_pair() {
        let res = FsResource::file("/srv/docs", "report.txt");
        let (dir, name) = res.dir_file_name();
        assert_eq!(dir, Path::new("/srv/docs"));
        assert_eq!(name.as_deref(), Some("report.txt"));
    }

    #[test]
    fn directory_resource_pair() {
        let res = FsResource::dir("/srv/docs");
        let (dir, name) = res.dir_file_name();
        assert_eq!(dir, Path::new("/srv/docs"));
        assert!(name.is_none());
    }
}
