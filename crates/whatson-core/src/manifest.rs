//! Manifest and marker documents written into containers.

use crate::error::{CoreError, Result};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Format tag of hub manifests and of the package extension.
pub const HUB_FORMAT: &str = "wshub";
/// Current hub manifest schema version.
pub const HUB_MANIFEST_VERSION: u32 = 1;
/// Storage kind recorded in hub manifests.
pub const STORAGE_FILESYSTEM: &str = "filesystem";
/// Notes directory name recorded in hub manifests.
pub const DEFAULT_NOTES_ROOT: &str = "notes";

/// Format tag of note header documents.
pub const NOTE_HEADER_FORMAT: &str = "wsnote-header";
/// Current note header schema version.
pub const NOTE_HEADER_VERSION: u32 = 1;

/// Manifest stored in `<hub>/.whatson/hub.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubManifest {
    /// Format tag, always [`HUB_FORMAT`].
    pub format: String,

    /// Schema version.
    pub version: u32,

    /// Name of the creator that produced the hub.
    pub creator: String,

    /// Storage kind, always [`STORAGE_FILESYSTEM`].
    pub storage: String,

    /// Notes directory relative to the hub root.
    pub notes_root: String,

    /// Creation time, second precision.
    pub created_at_utc: DateTime<Utc>,

    /// Base name of the hub directory.
    pub hub_directory: String,
}

impl HubManifest {
    /// Build a manifest stamped with the current time.
    #[must_use]
    pub fn new(creator: impl Into<String>, hub_directory: impl Into<String>) -> Self {
        Self {
            format: HUB_FORMAT.to_string(),
            version: HUB_MANIFEST_VERSION,
            creator: creator.into(),
            storage: STORAGE_FILESYSTEM.to_string(),
            notes_root: DEFAULT_NOTES_ROOT.to_string(),
            created_at_utc: now_utc(),
            hub_directory: hub_directory.into(),
        }
    }

    /// Render as indented JSON with a trailing newline.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        to_pretty(self)
    }

    /// Parse and validate a manifest.
    ///
    /// # Errors
    /// Returns error if the text is not a manifest or has an unknown
    /// format tag or version.
    pub fn from_json(text: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check the format tag and schema version.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidManifest`] on mismatch.
    pub fn validate(&self) -> Result<()> {
        if self.format != HUB_FORMAT {
            return Err(CoreError::InvalidManifest(format!(
                "unexpected format '{}'",
                self.format
            )));
        }
        if self.version != HUB_MANIFEST_VERSION {
            return Err(CoreError::InvalidManifest(format!(
                "unsupported version {}",
                self.version
            )));
        }
        if self.hub_directory.is_empty() {
            return Err(CoreError::InvalidManifest(
                "hubDirectory must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Header document stored in `<note>/.meta/header.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteHeader {
    pub format: String,
    pub version: u32,
    pub creator: String,
    pub note_id: String,
    pub created_at_utc: DateTime<Utc>,
}

impl NoteHeader {
    #[must_use]
    pub fn new(creator: impl Into<String>, note_id: impl Into<String>) -> Self {
        Self {
            format: NOTE_HEADER_FORMAT.to_string(),
            version: NOTE_HEADER_VERSION,
            creator: creator.into(),
            note_id: note_id.into(),
            created_at_utc: now_utc(),
        }
    }

    /// Render as indented JSON with a trailing newline.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        to_pretty(self)
    }
}

/// Outgoing links of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinksDocument {
    #[serde(default)]
    pub links: Vec<String>,
}

/// Incoming links of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklinksDocument {
    #[serde(default)]
    pub backlinks: Vec<String>,
}

/// Attachment listing of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentManifest {
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// Serialize any document as indented JSON with a trailing newline.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    #[test]
    fn test_hub_manifest_fields() {
        let manifest = HubManifest::new("WorkspaceHubCreator", "my-hub");
        let json: Value = serde_json::from_str(&manifest.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["format"], "wshub");
        assert_eq!(json["version"], 1);
        assert_eq!(json["creator"], "WorkspaceHubCreator");
        assert_eq!(json["storage"], "filesystem");
        assert_eq!(json["notesRoot"], "notes");
        assert_eq!(json["hubDirectory"], "my-hub");

        let created = json["createdAtUtc"].as_str().unwrap();
        assert!(created.ends_with('Z'), "not UTC: {created}");
        assert!(!created.contains('.'), "has subseconds: {created}");
    }

    #[test]
    fn test_hub_manifest_is_indented() {
        let text = HubManifest::new("c", "h").to_json_pretty().unwrap();
        assert!(text.contains("\n  \"format\": \"wshub\""));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_hub_manifest_parse_back() {
        let manifest = HubManifest::new("c", "h");
        let parsed = HubManifest::from_json(&manifest.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn test_hub_manifest_rejects_wrong_format() {
        let mut manifest = HubManifest::new("c", "h");
        manifest.format = "zip".to_string();
        let text = manifest.to_json_pretty().unwrap();

        let err = HubManifest::from_json(&text).unwrap_err();
        assert!(matches!(err, CoreError::InvalidManifest(_)));
    }

    #[test]
    fn test_hub_manifest_rejects_future_version() {
        let mut manifest = HubManifest::new("c", "h");
        manifest.version = 2;
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_note_header_fields() {
        let header = NoteHeader::new("NoteHeaderCreator", "abc");
        let json: Value = serde_json::from_str(&header.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["format"], "wsnote-header");
        assert_eq!(json["noteId"], "abc");
    }

    #[test]
    fn test_empty_documents() {
        assert_eq!(to_pretty(&LinksDocument::default()).unwrap(), "{\n  \"links\": []\n}\n");
        assert_eq!(
            to_pretty(&AttachmentManifest::default()).unwrap(),
            "{\n  \"attachments\": []\n}\n"
        );
    }
}
