//! Note link manager creator.

use super::{log_created, refuse_existing, write_if_absent, NoteRoots};
use crate::creator::{ContainerCreator, NoteCreator};
use crate::error::Result;
use crate::io::atomic_write_text;
use std::path::{Path, PathBuf};
use whatson_core::manifest::to_pretty;
use whatson_core::{join, BacklinksDocument, LinksDocument};

const LINKS_DIR: &str = "links";
const LINKS_FILE: &str = "links.json";
const BACKLINKS_FILE: &str = "backlinks.json";

/// Seeds the outgoing and incoming link lists of a note.
#[derive(Debug, Clone)]
pub struct NoteLinkManagerCreator {
    roots: NoteRoots,
}

impl NoteLinkManagerCreator {
    #[must_use]
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self::from_roots(NoteRoots::new(workspace_root))
    }

    #[must_use]
    pub const fn from_roots(roots: NoteRoots) -> Self {
        Self { roots }
    }

    #[must_use]
    pub const fn links_file_name(&self) -> &'static str {
        LINKS_FILE
    }

    #[must_use]
    pub const fn backlinks_file_name(&self) -> &'static str {
        BACKLINKS_FILE
    }

    #[must_use]
    pub fn backlinks_path_for_note(&self, note_id: &str) -> PathBuf {
        join(self.links_directory(note_id), BACKLINKS_FILE)
    }

    fn links_directory(&self, note_id: &str) -> PathBuf {
        join(self.roots.note_directory(note_id), LINKS_DIR)
    }
}

impl ContainerCreator for NoteLinkManagerCreator {
    fn creator_name(&self) -> &'static str {
        "NoteLinkManagerCreator"
    }

    fn required_relative_paths(&self) -> &'static [&'static str] {
        &[LINKS_DIR]
    }

    fn workspace_root(&self) -> &Path {
        self.roots.workspace_root()
    }

    fn set_workspace_root(&mut self, root: PathBuf) {
        self.roots.set_workspace_root(root);
    }
}

impl NoteCreator for NoteLinkManagerCreator {
    fn notes_root(&self) -> &Path {
        self.roots.notes_root()
    }

    fn set_notes_root(&mut self, notes_root: PathBuf) {
        self.roots.set_notes_root(notes_root);
    }

    fn target_path_for_note(&self, note_id: &str) -> PathBuf {
        join(self.links_directory(note_id), LINKS_FILE)
    }

    fn create_for_note(&self, note_id: &str) -> Result<PathBuf> {
        self.roots.prepare(note_id, self.required_relative_paths())?;

        let target = self.target_path_for_note(note_id);
        refuse_existing(&target)?;

        atomic_write_text(&target, &to_pretty(&LinksDocument::default())?)?;
        // Backlinks are maintained by other notes and may predate this one.
        write_if_absent(
            &self.backlinks_path_for_note(note_id),
            &to_pretty(&BacklinksDocument::default())?,
        )?;

        log_created(self, note_id, &target);
        Ok(target)
    }
}
