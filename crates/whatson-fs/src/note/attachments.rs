//! Note attachment manager creator.

use super::{log_created, refuse_existing, NoteRoots};
use crate::creator::{ContainerCreator, NoteCreator};
use crate::error::Result;
use crate::io::atomic_write_text;
use std::path::{Path, PathBuf};
use whatson_core::manifest::to_pretty;
use whatson_core::{join, AttachmentManifest};

const ATTACHMENTS_DIR: &str = "attachments";
const ATTACHMENT_MANIFEST_FILE: &str = "attachments.json";

/// Prepares the attachment directory of a note.
///
/// The target path is the directory itself; its manifest is the artifact
/// that must not exist yet.
#[derive(Debug, Clone)]
pub struct NoteAttachManagerCreator {
    roots: NoteRoots,
}

impl NoteAttachManagerCreator {
    #[must_use]
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self::from_roots(NoteRoots::new(workspace_root))
    }

    #[must_use]
    pub const fn from_roots(roots: NoteRoots) -> Self {
        Self { roots }
    }

    #[must_use]
    pub const fn attachment_directory_name(&self) -> &'static str {
        ATTACHMENTS_DIR
    }

    #[must_use]
    pub const fn attachment_manifest_file_name(&self) -> &'static str {
        ATTACHMENT_MANIFEST_FILE
    }

    #[must_use]
    pub fn manifest_path_for_note(&self, note_id: &str) -> PathBuf {
        join(self.target_path_for_note(note_id), ATTACHMENT_MANIFEST_FILE)
    }
}

impl ContainerCreator for NoteAttachManagerCreator {
    fn creator_name(&self) -> &'static str {
        "NoteAttachManagerCreator"
    }

    fn required_relative_paths(&self) -> &'static [&'static str] {
        &[ATTACHMENTS_DIR]
    }

    fn workspace_root(&self) -> &Path {
        self.roots.workspace_root()
    }

    fn set_workspace_root(&mut self, root: PathBuf) {
        self.roots.set_workspace_root(root);
    }
}

impl NoteCreator for NoteAttachManagerCreator {
    fn notes_root(&self) -> &Path {
        self.roots.notes_root()
    }

    fn set_notes_root(&mut self, notes_root: PathBuf) {
        self.roots.set_notes_root(notes_root);
    }

    fn target_path_for_note(&self, note_id: &str) -> PathBuf {
        join(self.roots.note_directory(note_id), ATTACHMENTS_DIR)
    }

    fn create_for_note(&self, note_id: &str) -> Result<PathBuf> {
        self.roots.prepare(note_id, self.required_relative_paths())?;

        let manifest = self.manifest_path_for_note(note_id);
        refuse_existing(&manifest)?;
        atomic_write_text(&manifest, &to_pretty(&AttachmentManifest::default())?)?;

        let target = self.target_path_for_note(note_id);
        log_created(self, note_id, &target);
        Ok(target)
    }
}
