//! Filesystem scaffolding for whatson hubs and notes.
//!
//! A hub is laid out as:
//! - `.whatson/hub.json`: Hub manifest
//! - `notes/`, `notes/drafts/`: Note storage
//! - `attachments/`, `assets/`, `indexes/`: Supporting data
//!
//! and packaged next to itself as `<hub>.wshub`.

pub mod config;
pub mod creator;
pub mod error;
pub mod hub;
pub mod io;
pub mod note;
pub mod package;

pub use config::WorkspaceConfig;
pub use creator::{ContainerCreator, HubCreator, NoteCreator};
pub use error::{ErrorCategory, FsError, Result};
pub use hub::WorkspaceHubCreator;
pub use note::{
    NoteAttachManagerCreator, NoteBodyCreator, NoteHeaderCreator, NoteKind,
    NoteLinkManagerCreator, NoteRoots,
};
pub use package::{
    CommandArg, CommandPackager, DisabledPackager, Packager, PackagerKind, ZipPackager,
};
