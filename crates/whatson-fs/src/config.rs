//! Workspace configuration.

use crate::error::{FsError, Result};
use crate::hub::{WorkspaceHubCreator, DEFAULT_HUBS_ROOT};
use crate::io::atomic_write_text;
use crate::note::NoteRoots;
use crate::package::PackagerKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use whatson_core::DEFAULT_NOTES_ROOT;

/// Configuration file name at the workspace root.
pub const CONFIG_FILE: &str = "whatson.yml";

/// Workspace configuration stored in `whatson.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Hubs directory relative to the workspace root.
    #[serde(default = "default_hubs_root")]
    pub hubs_root: PathBuf,

    /// Notes directory relative to the workspace root.
    #[serde(default = "default_notes_root")]
    pub notes_root: PathBuf,

    /// Packaging backend for new hubs.
    #[serde(default)]
    pub packager: PackagerKind,
}

fn default_version() -> u32 {
    1
}

fn default_hubs_root() -> PathBuf {
    PathBuf::from(DEFAULT_HUBS_ROOT)
}

fn default_notes_root() -> PathBuf {
    PathBuf::from(DEFAULT_NOTES_ROOT)
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            hubs_root: default_hubs_root(),
            notes_root: default_notes_root(),
            packager: PackagerKind::default(),
        }
    }
}

impl WorkspaceConfig {
    /// Path of the config file for a workspace.
    #[must_use]
    pub fn path(root: &Path) -> PathBuf {
        whatson_core::join(root, CONFIG_FILE)
    }

    /// Load the workspace config, or defaults if there is none.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        if !path.exists() {
            debug!(path = %path.display(), "No workspace config, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded workspace config");
        Ok(config)
    }

    /// Write the config, refusing to replace an existing one.
    ///
    /// # Errors
    /// Returns [`FsError::ArtifactExists`] if the file exists, or an IO error.
    pub fn init(&self, root: &Path) -> Result<PathBuf> {
        let path = Self::path(root);
        if path.exists() {
            return Err(FsError::ArtifactExists(path));
        }
        self.save(root)?;
        Ok(path)
    }

    /// Write the config atomically.
    ///
    /// # Errors
    /// Returns error if serialization or writing fails.
    pub fn save(&self, root: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        atomic_write_text(&Self::path(root), &content)
    }

    /// Hub creator configured from this file.
    #[must_use]
    pub fn hub_creator(&self, root: &Path) -> WorkspaceHubCreator {
        WorkspaceHubCreator::new(root)
            .with_hubs_root(&self.hubs_root)
            .with_packager(self.packager.build())
    }

    /// Note roots configured from this file.
    #[must_use]
    pub fn note_roots(&self, root: &Path) -> NoteRoots {
        NoteRoots::new(root).with_notes_root(&self.notes_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_missing() {
        let tmp = TempDir::new().unwrap();
        let config = WorkspaceConfig::load(tmp.path()).unwrap();
        assert_eq!(config, WorkspaceConfig::default());
        assert_eq!(config.hubs_root, PathBuf::from("hubs"));
        assert_eq!(config.packager, PackagerKind::System);
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let config = WorkspaceConfig {
            hubs_root: PathBuf::from("library"),
            packager: PackagerKind::Zip,
            ..Default::default()
        };
        config.save(tmp.path()).unwrap();

        assert_eq!(WorkspaceConfig::load(tmp.path()).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "packager: disabled\n").unwrap();

        let config = WorkspaceConfig::load(tmp.path()).unwrap();
        assert_eq!(config.packager, PackagerKind::Disabled);
        assert_eq!(config.notes_root, PathBuf::from("notes"));
        assert_eq!(config.version, 1);
    }

    #[test]
    fn test_init_refuses_existing() {
        let tmp = TempDir::new().unwrap();
        WorkspaceConfig::default().init(tmp.path()).unwrap();

        let err = WorkspaceConfig::default().init(tmp.path()).unwrap_err();
        assert!(matches!(err, FsError::ArtifactExists(_)));
    }

    #[test]
    fn test_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "packager: [nope").unwrap();

        let err = WorkspaceConfig::load(tmp.path()).unwrap_err();
        assert!(matches!(err, FsError::Yaml(_)));
    }

    #[test]
    fn test_hub_creator_uses_config() {
        let config = WorkspaceConfig {
            hubs_root: PathBuf::from("library"),
            packager: PackagerKind::Disabled,
            ..Default::default()
        };
        let creator = config.hub_creator(Path::new("/ws"));

        assert_eq!(creator.hubs_directory(), PathBuf::from("/ws/library"));
        assert_eq!(creator.packager().name(), "disabled");
    }
}
