//! Filesystem access used while materializing a project tree.
//! The orchestrator only talks to the [`FileSystem`] trait, so tests can run it
//! against [`MemoryFileSystem`] instead of the disk.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::debug;

use crate::error::{Error, Result};

/// Minimal set of filesystem operations needed to generate (and roll back) a tree.
pub trait FileSystem {
    /// Returns true if anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;
    /// Creates `path` and all of its missing ancestors.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    /// Creates or truncates the file at `path`. The parent directory must exist.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;
    /// Removes `path` and everything below it.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        // A dangling symlink still occupies the name.
        path.symlink_metadata().is_ok()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
}

/// In-memory [`FileSystem`] for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    // Shared so a clone handed to the orchestrator can be inspected afterwards
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content of the file at `path`, if any.
    pub fn read(&self, path: &Path) -> Option<String> {
        self.lock().files.get(path).cloned()
    }

    /// Returns all file paths in sorted order.
    pub fn files(&self) -> Vec<PathBuf> {
        self.lock().files.keys().cloned().collect()
    }

    /// Returns true if `path` is a directory.
    pub fn is_dir(&self, path: &Path) -> bool {
        self.lock().dirs.contains(path)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A poisoned lock only means another test thread panicked mid-update.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let state = self.lock();
        state.dirs.contains(path) || state.files.contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        for ancestor in path.ancestors().filter(|p| !p.as_os_str().is_empty()) {
            if state.files.contains_key(ancestor) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("'{}' is a file", ancestor.display()),
                ));
            }
            state.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        let mut state = self.lock();
        if state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("'{}' is a directory", path.display()),
            ));
        }
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !state.dirs.contains(parent) => {
                Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("parent of '{}' does not exist", path.display()),
                ))
            }
            _ => {
                state.files.insert(path.to_path_buf(), content.to_string());
                Ok(())
            }
        }
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        if !state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("'{}' is not a directory", path.display()),
            ));
        }
        state.dirs.retain(|dir| !dir.starts_with(path));
        state.files.retain(|file, _| !file.starts_with(path));
        Ok(())
    }
}

/// Writes `content` to `path`, creating missing ancestor directories first.
///
/// Existing ancestors are not an error; an existing file at `path` is overwritten.
///
/// # Arguments
/// * `fs` - Filesystem to write to
/// * `path` - Destination file path
/// * `content` - Full file content
///
/// # Errors
/// * `Error::WriteError` carrying `path` if any directory or the file cannot be written
pub fn write_file(fs: &dyn FileSystem, path: &Path, content: &str) -> Result<()> {
    let to_write_error = |source: io::Error| Error::WriteError {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.create_dir_all(parent).map_err(to_write_error)?;
    }
    debug!("Writing file: {}", path.display());
    fs.write(path, content).map_err(to_write_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_file_creates_ancestors() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/project/app/api/health/route.ts");

        write_file(&fs, path, "ok").unwrap();

        assert_eq!(fs.read(path).as_deref(), Some("ok"));
        assert!(fs.is_dir(Path::new("/project/app/api/health")));
        assert!(fs.is_dir(Path::new("/project")));
    }

    #[test]
    fn test_write_file_overwrites() {
        let fs = MemoryFileSystem::new();
        let path = Path::new("/project/README.md");

        write_file(&fs, path, "first").unwrap();
        write_file(&fs, path, "second").unwrap();

        assert_eq!(fs.read(path).as_deref(), Some("second"));
        assert_eq!(fs.files().len(), 1);
    }

    #[test]
    fn test_memory_write_requires_parent() {
        let fs = MemoryFileSystem::new();
        let err = fs.write(Path::new("/missing/file.txt"), "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_memory_remove_dir_all() {
        let fs = MemoryFileSystem::new();
        write_file(&fs, Path::new("/a/b/c.txt"), "c").unwrap();
        write_file(&fs, Path::new("/ab/d.txt"), "d").unwrap();

        fs.remove_dir_all(Path::new("/a")).unwrap();

        assert!(!fs.exists(Path::new("/a")));
        assert!(!fs.exists(Path::new("/a/b/c.txt")));
        assert!(fs.exists(Path::new("/ab/d.txt")));
    }
}
