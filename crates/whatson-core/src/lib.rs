//! whatson-core: Naming, path and manifest rules for hub and note containers.
//!
//! This crate provides:
//! - `sanitize`: Filesystem-safe container names
//! - `join` / `clean`: Lexical path joining shared by every creator
//! - `HubManifest` and the note documents written at creation time

pub mod error;
pub mod manifest;
pub mod name;
pub mod path;

pub use error::{CoreError, Result};
pub use manifest::{
    AttachmentManifest, BacklinksDocument, HubManifest, LinksDocument, NoteHeader,
    DEFAULT_NOTES_ROOT, HUB_FORMAT, HUB_MANIFEST_VERSION, STORAGE_FILESYSTEM,
};
pub use name::{sanitize, sanitize_or, SanitizedName, HUB_FALLBACK_NAME, NOTE_FALLBACK_NAME};
pub use path::{clean, join};
