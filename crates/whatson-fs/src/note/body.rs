//! Note body creator.

use super::{log_created, refuse_existing, write_if_absent, NoteRoots};
use crate::creator::{ContainerCreator, NoteCreator};
use crate::error::Result;
use crate::io::atomic_write_text;
use std::path::{Path, PathBuf};
use whatson_core::join;

const DRAFTS_DIR: &str = "drafts";
const BODY_FILE: &str = "body.md";
const DRAFT_BODY_FILE: &str = "body.draft.md";

/// Seeds the body text of a note and its working draft.
#[derive(Debug, Clone)]
pub struct NoteBodyCreator {
    roots: NoteRoots,
}

impl NoteBodyCreator {
    #[must_use]
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self::from_roots(NoteRoots::new(workspace_root))
    }

    #[must_use]
    pub const fn from_roots(roots: NoteRoots) -> Self {
        Self { roots }
    }

    #[must_use]
    pub const fn body_file_name(&self) -> &'static str {
        BODY_FILE
    }

    #[must_use]
    pub const fn draft_body_file_name(&self) -> &'static str {
        DRAFT_BODY_FILE
    }

    /// Path of the draft body for `note_id`.
    #[must_use]
    pub fn draft_path_for_note(&self, note_id: &str) -> PathBuf {
        join(
            join(self.roots.note_directory(note_id), DRAFTS_DIR),
            DRAFT_BODY_FILE,
        )
    }
}

impl ContainerCreator for NoteBodyCreator {
    fn creator_name(&self) -> &'static str {
        "NoteBodyCreator"
    }

    fn required_relative_paths(&self) -> &'static [&'static str] {
        &[DRAFTS_DIR]
    }

    fn workspace_root(&self) -> &Path {
        self.roots.workspace_root()
    }

    fn set_workspace_root(&mut self, root: PathBuf) {
        self.roots.set_workspace_root(root);
    }
}

impl NoteCreator for NoteBodyCreator {
    fn notes_root(&self) -> &Path {
        self.roots.notes_root()
    }

    fn set_notes_root(&mut self, notes_root: PathBuf) {
        self.roots.set_notes_root(notes_root);
    }

    fn target_path_for_note(&self, note_id: &str) -> PathBuf {
        join(self.roots.note_directory(note_id), BODY_FILE)
    }

    fn create_for_note(&self, note_id: &str) -> Result<PathBuf> {
        self.roots.prepare(note_id, self.required_relative_paths())?;

        let target = self.target_path_for_note(note_id);
        refuse_existing(&target)?;

        atomic_write_text(&target, "")?;
        // An orphaned draft from an earlier session is kept.
        write_if_absent(&self.draft_path_for_note(note_id), "")?;

        log_created(self, note_id, &target);
        Ok(target)
    }
}
