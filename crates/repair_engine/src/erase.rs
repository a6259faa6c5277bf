use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseOutcome {
    /// Nothing was there to delete.
    Noop,
    Deleted,
}

#[derive(Debug, Error)]
#[error("{}: {source}", .path.display())]
pub struct EraseError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Recursively delete `path`, treating an absent target as a no-op.
///
/// Symlinks are removed, never followed. A target that disappears between the
/// existence check and the removal also counts as a no-op; nothing is locked.
pub fn erase(path: &Path) -> Result<EraseOutcome, EraseError> {
    let error = |source: io::Error| EraseError {
        path: path.to_path_buf(),
        source,
    };

    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(EraseOutcome::Noop),
        Err(err) => return Err(error(err)),
    };

    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match removed {
        Ok(()) => Ok(EraseOutcome::Deleted),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(EraseOutcome::Noop),
        Err(err) => Err(error(err)),
    }
}
