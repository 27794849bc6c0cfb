//! Directory and file primitives used by every creator.

use crate::error::{FsError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Create a directory and all missing ancestors.
///
/// Succeeds without touching anything if the directory already exists.
///
/// # Errors
/// Returns [`FsError::NotADirectory`] if a file occupies the path, or
/// [`FsError::CreateDirectory`] if creation fails.
pub fn ensure_directory(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => return Err(FsError::NotADirectory(path.to_path_buf())),
        Err(_) => {}
    }

    fs::create_dir_all(path).map_err(|source| {
        // create_dir_all reports AlreadyExists-style failures when an
        // ancestor is a regular file.
        if path.ancestors().skip(1).any(Path::is_file) {
            FsError::NotADirectory(path.to_path_buf())
        } else {
            FsError::CreateDirectory {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    debug!(path = %path.display(), "Created directory");
    Ok(())
}

/// Write `content` to `path` so readers only ever see the old or the new file.
///
/// The text goes to a temporary file next to `path`, is synced, and is then
/// renamed over the destination.
///
/// # Errors
/// Returns [`FsError::OpenFile`], [`FsError::WriteFile`] or
/// [`FsError::CommitFile`] naming `path`.
pub fn atomic_write_text(path: &Path, content: &str) -> Result<()> {
    atomic_write_with(path, content.as_bytes(), |_| Ok(()))
}

/// Like [`atomic_write_text`], running `before_commit` on the temp file path
/// after the contents are written and verified.
pub(crate) fn atomic_write_with<F>(path: &Path, bytes: &[u8], before_commit: F) -> Result<()>
where
    F: FnOnce(&Path) -> std::io::Result<()>,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(|source| FsError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;

    let write_err = |source| FsError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    let written = tmp.as_file().metadata().map_err(write_err)?.len();
    if written != bytes.len() as u64 {
        return Err(write_err(std::io::Error::other(format!(
            "short write: {written} of {} bytes",
            bytes.len()
        ))));
    }

    before_commit(tmp.path()).map_err(|source| FsError::CommitFile {
        path: path.to_path_buf(),
        source,
    })?;

    tmp.persist(path).map_err(|err| FsError::CommitFile {
        path: path.to_path_buf(),
        source: err.error,
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}
