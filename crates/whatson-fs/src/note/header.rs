//! Note header creator.

use super::{log_created, refuse_existing, NoteRoots};
use crate::creator::{ContainerCreator, NoteCreator};
use crate::error::Result;
use crate::io::atomic_write_text;
use std::path::{Path, PathBuf};
use whatson_core::{join, NoteHeader};

const METADATA_DIR: &str = ".meta";
const HEADER_FILE: &str = "header.json";

/// Writes the metadata header of a note.
#[derive(Debug, Clone)]
pub struct NoteHeaderCreator {
    roots: NoteRoots,
}

impl NoteHeaderCreator {
    #[must_use]
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self::from_roots(NoteRoots::new(workspace_root))
    }

    #[must_use]
    pub const fn from_roots(roots: NoteRoots) -> Self {
        Self { roots }
    }

    #[must_use]
    pub const fn header_file_name(&self) -> &'static str {
        HEADER_FILE
    }

    #[must_use]
    pub const fn metadata_directory_name(&self) -> &'static str {
        METADATA_DIR
    }
}

impl ContainerCreator for NoteHeaderCreator {
    fn creator_name(&self) -> &'static str {
        "NoteHeaderCreator"
    }

    fn required_relative_paths(&self) -> &'static [&'static str] {
        &[METADATA_DIR]
    }

    fn workspace_root(&self) -> &Path {
        self.roots.workspace_root()
    }

    fn set_workspace_root(&mut self, root: PathBuf) {
        self.roots.set_workspace_root(root);
    }
}

impl NoteCreator for NoteHeaderCreator {
    fn notes_root(&self) -> &Path {
        self.roots.notes_root()
    }

    fn set_notes_root(&mut self, notes_root: PathBuf) {
        self.roots.set_notes_root(notes_root);
    }

    fn target_path_for_note(&self, note_id: &str) -> PathBuf {
        join(
            join(self.roots.note_directory(note_id), METADATA_DIR),
            HEADER_FILE,
        )
    }

    fn create_for_note(&self, note_id: &str) -> Result<PathBuf> {
        self.roots.prepare(note_id, self.required_relative_paths())?;

        let target = self.target_path_for_note(note_id);
        refuse_existing(&target)?;

        let header = NoteHeader::new(self.creator_name(), note_id);
        atomic_write_text(&target, &header.to_json_pretty()?)?;

        log_created(self, note_id, &target);
        Ok(target)
    }
}
