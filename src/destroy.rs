//! Removal of a previously generated project tree.

use log::{debug, info};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// What `destroy` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyOutcome {
    /// The tree was removed. Symbolic links count as files; the root counts as a directory.
    Removed { files: usize, directories: usize },
    /// Nothing existed at the path.
    AlreadyAbsent,
}

/// Recursively removes `dir`, children before their parent.
///
/// Symbolic links inside the tree are unlinked, never followed, so nothing
/// outside `dir` is touched.
///
/// # Arguments
/// * `dir` - Directory to remove
///
/// # Returns
/// * `Result<DestroyOutcome>` - `AlreadyAbsent` if `dir` does not exist
///
/// # Errors
/// * `Error::UnsafePathError` if `dir` is a symbolic link or not a directory
/// * `Error::IoError` if an entry cannot be removed; entries already removed stay removed
pub fn destroy<P: AsRef<Path>>(dir: P) -> Result<DestroyOutcome> {
    let dir = dir.as_ref();
    let metadata = match fs::symlink_metadata(dir) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Directory '{}' does not exist", dir.display());
            return Ok(DestroyOutcome::AlreadyAbsent);
        }
        Err(e) => return Err(Error::IoError(e)),
    };

    if metadata.file_type().is_symlink() {
        return Err(Error::UnsafePathError {
            path: dir.display().to_string(),
            reason: "refusing to destroy through a symbolic link".to_string(),
        });
    }
    if !metadata.is_dir() {
        return Err(Error::UnsafePathError {
            path: dir.display().to_string(),
            reason: "not a directory".to_string(),
        });
    }

    let mut files = 0;
    let mut directories = 0;
    for entry in WalkDir::new(dir).follow_links(false).contents_first(true) {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        let path = entry.path();
        if entry.file_type().is_dir() {
            debug!("Removing directory: {}", path.display());
            fs::remove_dir(path)?;
            directories += 1;
        } else {
            debug!("Removing file: {}", path.display());
            remove_file_or_link(path)?;
            files += 1;
        }
    }

    Ok(DestroyOutcome::Removed { files, directories })
}

/// Unlinks a file or symbolic link.
///
/// Directory symlinks and junctions need `remove_dir` on Windows; any other
/// failure of `remove_file` is returned as is.
fn remove_file_or_link(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(_) if is_symlink(path) => fs::remove_dir(path),
        result => result,
    }
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|metadata| metadata.file_type().is_symlink())
}
