//! Contracts shared by hub and note creators.

use crate::error::{FsError, Result};
use crate::io::ensure_directory;
use std::path::{Path, PathBuf};

/// Capabilities every container creator exposes.
pub trait ContainerCreator {
    /// Stable identifier written into manifests.
    fn creator_name(&self) -> &'static str;

    /// Directories this creator guarantees inside its container, in creation order.
    fn required_relative_paths(&self) -> &'static [&'static str];

    /// Workspace root the creator operates in.
    fn workspace_root(&self) -> &Path;

    /// Point the creator at another workspace root.
    fn set_workspace_root(&mut self, root: PathBuf);
}

/// Creators of top-level, packaged hubs.
pub trait HubCreator: ContainerCreator {
    /// Scaffold and package a hub, returning the package path.
    ///
    /// # Errors
    /// Fails on an empty workspace root, an existing hub, any I/O failure or
    /// a packaging failure. Nothing is rolled back.
    fn create_hub(&self, name: &str) -> Result<PathBuf>;
}

/// Creators of one aspect of a note.
pub trait NoteCreator: ContainerCreator {
    /// Notes directory relative to the workspace root.
    fn notes_root(&self) -> &Path;

    /// Point the creator at another notes directory.
    fn set_notes_root(&mut self, notes_root: PathBuf);

    /// Absolute path of the artifact this creator owns for `note_id`.
    fn target_path_for_note(&self, note_id: &str) -> PathBuf;

    /// Scaffold the note and seed this creator's artifact, returning
    /// [`NoteCreator::target_path_for_note`].
    ///
    /// # Errors
    /// Fails on an empty workspace root, an existing artifact or any I/O
    /// failure.
    fn create_for_note(&self, note_id: &str) -> Result<PathBuf>;
}

/// Reject empty or whitespace-only workspace roots.
///
/// # Errors
/// Returns [`FsError::EmptyWorkspaceRoot`].
pub fn require_workspace_root(root: &Path) -> Result<()> {
    if root.to_string_lossy().trim().is_empty() {
        return Err(FsError::EmptyWorkspaceRoot);
    }
    Ok(())
}

/// Ensure every relative path exists below `container`.
///
/// # Errors
/// Stops at the first directory that cannot be created.
pub fn scaffold(container: &Path, relative_paths: &[&str]) -> Result<()> {
    for relative in relative_paths {
        ensure_directory(&whatson_core::join(container, relative))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_require_workspace_root() {
        assert!(matches!(
            require_workspace_root(Path::new("")),
            Err(FsError::EmptyWorkspaceRoot)
        ));
        assert!(require_workspace_root(Path::new("  ")).is_err());
        assert!(require_workspace_root(Path::new("/ws")).is_ok());
    }

    #[test]
    fn test_scaffold_creates_nested_paths() {
        let tmp = TempDir::new().unwrap();
        scaffold(tmp.path(), &["a", "a/b", "./c/../d"]).unwrap();

        assert!(tmp.path().join("a/b").is_dir());
        assert!(tmp.path().join("d").is_dir());
        assert!(!tmp.path().join("c").exists());
    }
}
