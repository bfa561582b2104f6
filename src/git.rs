//! Git repository setup for generated projects.

use log::debug;
use std::path::Path;

use crate::error::Result;

/// Initializes a git repository in `directory` and points `origin` at `remote_url`.
///
/// An existing repository is reused; an existing `origin` is left untouched.
///
/// # Errors
/// * `Error::Git2Error` if the repository cannot be created or the remote cannot be added
pub fn init_repository<P: AsRef<Path>>(directory: P, remote_url: &str) -> Result<()> {
    let directory = directory.as_ref();
    debug!("Initializing git repository in {}", directory.display());

    let repo = git2::Repository::init(directory)?;
    if repo.find_remote("origin").is_err() {
        repo.remote("origin", remote_url)?;
        debug!("Added remote 'origin' -> {remote_url}");
    }
    Ok(())
}
