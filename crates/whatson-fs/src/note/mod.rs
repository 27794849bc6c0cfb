//! Note creators.
//!
//! A note lives in `<workspace>/<notes_root>/<sanitized id>/`. Each creator
//! owns one aspect of it:
//! - `NoteHeaderCreator`: `.meta/header.json`
//! - `NoteBodyCreator`: `body.md` and `drafts/body.draft.md`
//! - `NoteLinkManagerCreator`: `links/links.json` and `links/backlinks.json`
//! - `NoteAttachManagerCreator`: `attachments/` and its `attachments.json`
//!
//! Creators share the note directory, so scaffolding it is idempotent; only
//! the artifact a creator owns is refused when it already exists.

mod attachments;
mod body;
mod header;
mod links;

pub use attachments::NoteAttachManagerCreator;
pub use body::NoteBodyCreator;
pub use header::NoteHeaderCreator;
pub use links::NoteLinkManagerCreator;

use crate::creator::{require_workspace_root, scaffold, NoteCreator};
use crate::error::{FsError, Result};
use crate::io::{atomic_write_text, ensure_directory};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;
use whatson_core::{join, sanitize_or, DEFAULT_NOTES_ROOT, NOTE_FALLBACK_NAME};

/// Workspace and notes roots shared by every note creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRoots {
    workspace_root: PathBuf,
    notes_root: PathBuf,
}

impl NoteRoots {
    /// Roots with the default `notes` directory.
    #[must_use]
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            notes_root: PathBuf::from(DEFAULT_NOTES_ROOT),
        }
    }

    /// Use a different notes directory.
    #[must_use]
    pub fn with_notes_root(mut self, notes_root: impl Into<PathBuf>) -> Self {
        self.notes_root = notes_root.into();
        self
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    #[must_use]
    pub fn notes_root(&self) -> &Path {
        &self.notes_root
    }

    pub fn set_workspace_root(&mut self, root: PathBuf) {
        self.workspace_root = root;
    }

    pub fn set_notes_root(&mut self, notes_root: PathBuf) {
        self.notes_root = notes_root;
    }

    /// Directory of the note with id `note_id`.
    #[must_use]
    pub fn note_directory(&self, note_id: &str) -> PathBuf {
        join(
            join(&self.workspace_root, &self.notes_root),
            sanitize_or(note_id, NOTE_FALLBACK_NAME),
        )
    }

    /// Validate the workspace root and make sure the note directory and
    /// `required` exist. Returns the note directory.
    fn prepare(&self, note_id: &str, required: &[&str]) -> Result<PathBuf> {
        require_workspace_root(&self.workspace_root)?;

        let note_dir = self.note_directory(note_id);
        ensure_directory(&note_dir)?;
        scaffold(&note_dir, required)?;
        Ok(note_dir)
    }
}

/// Refuse to overwrite `path`.
fn refuse_existing(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(FsError::ArtifactExists(path.to_path_buf()));
    }
    Ok(())
}

/// Write `content` to `path` unless something is already there.
fn write_if_absent(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write_text(path, content)?;
    Ok(true)
}

fn log_created(creator: &dyn NoteCreator, note_id: &str, target: &Path) {
    info!(
        creator = creator.creator_name(),
        note = %note_id,
        path = %target.display(),
        "Created note artifact"
    );
}

/// The closed set of note creators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Header,
    Body,
    Links,
    Attachments,
}

impl NoteKind {
    /// Every kind, in scaffolding order.
    pub const ALL: [Self; 4] = [Self::Header, Self::Body, Self::Links, Self::Attachments];

    /// Construct the creator for this kind.
    #[must_use]
    pub fn creator(self, roots: NoteRoots) -> Box<dyn NoteCreator> {
        match self {
            Self::Header => Box::new(NoteHeaderCreator::from_roots(roots)),
            Self::Body => Box::new(NoteBodyCreator::from_roots(roots)),
            Self::Links => Box::new(NoteLinkManagerCreator::from_roots(roots)),
            Self::Attachments => Box::new(NoteAttachManagerCreator::from_roots(roots)),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Body => "body",
            Self::Links => "links",
            Self::Attachments => "attachments",
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NoteKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown note kind '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn test_note_directory() {
        let roots = NoteRoots::new("/ws");
        assert_eq!(roots.note_directory("Abc"), PathBuf::from("/ws/notes/abc"));
        assert_eq!(
            roots.note_directory("  "),
            PathBuf::from("/ws/notes/untitled-note")
        );
    }

    #[test]
    fn test_target_paths_are_deterministic_and_distinct() {
        let roots = NoteRoots::new("/ws");
        let creators: Vec<Box<dyn NoteCreator>> =
            NoteKind::ALL.iter().map(|k| k.creator(roots.clone())).collect();

        let first: Vec<PathBuf> = creators
            .iter()
            .map(|c| c.target_path_for_note("abc"))
            .collect();
        let second: Vec<PathBuf> = creators
            .iter()
            .map(|c| c.target_path_for_note("abc"))
            .collect();
        assert_eq!(first, second);

        let unique: HashSet<&PathBuf> = first.iter().collect();
        assert_eq!(unique.len(), NoteKind::ALL.len());
    }

    #[test]
    fn test_creator_names_are_distinct() {
        let names: HashSet<&'static str> = NoteKind::ALL
            .iter()
            .map(|k| k.creator(NoteRoots::new("/ws")).creator_name())
            .collect();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_all_creators_share_note_directory() {
        let tmp = TempDir::new().unwrap();
        let roots = NoteRoots::new(tmp.path());

        for kind in NoteKind::ALL {
            let target = kind.creator(roots.clone()).create_for_note("Shared").unwrap();
            assert!(target.starts_with(tmp.path().join("notes/shared")));
            assert!(target.exists(), "{kind} did not create {}", target.display());
        }
    }

    #[test]
    fn test_empty_root_rejected() {
        for kind in NoteKind::ALL {
            let err = kind
                .creator(NoteRoots::new(""))
                .create_for_note("abc")
                .unwrap_err();
            assert!(matches!(err, FsError::EmptyWorkspaceRoot));
        }
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("Body".parse::<NoteKind>().unwrap(), NoteKind::Body);
        assert!("footer".parse::<NoteKind>().is_err());
        for kind in NoteKind::ALL {
            assert_eq!(kind.to_string().parse::<NoteKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_display_and_serialize() {
        assert_eq!(format!("{:<8}|", NoteKind::Body), "body    |");
        assert_eq!(serde_json::to_string(&NoteKind::Attachments).unwrap(), "\"attachments\"");
    }

    #[test]
    fn test_custom_notes_root() {
        let roots = NoteRoots::new("/ws").with_notes_root("hubs/team/notes");
        assert_eq!(
            roots.note_directory("x"),
            PathBuf::from("/ws/hubs/team/notes/x")
        );
    }
}
