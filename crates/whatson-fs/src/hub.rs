//! Workspace hub creation and packaging.

use crate::creator::{require_workspace_root, scaffold, ContainerCreator, HubCreator};
use crate::error::{FsError, Result};
use crate::io::{atomic_write_text, ensure_directory};
use crate::package::{Packager, PackagerKind};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use whatson_core::{join, sanitize, HubManifest};

/// Default hubs directory below the workspace root.
pub const DEFAULT_HUBS_ROOT: &str = "hubs";
/// Extension appended to the hub directory path to form the package path.
pub const PACKAGE_EXTENSION: &str = ".wshub";
/// Hidden metadata directory inside each hub.
pub const METADATA_DIR: &str = ".whatson";
/// Manifest file name inside [`METADATA_DIR`].
pub const MANIFEST_FILE: &str = "hub.json";

const CREATOR_NAME: &str = "WorkspaceHubCreator";

const REQUIRED_PATHS: &[&str] = &[
    METADATA_DIR,
    "notes",
    "notes/drafts",
    "attachments",
    "assets",
    "indexes",
];

/// Creates hubs under `<workspace>/<hubs_root>/<name>` and packages them into
/// `<workspace>/<hubs_root>/<name>.wshub`.
///
/// If packaging fails the scaffolded directory stays on disk; call
/// [`WorkspaceHubCreator::package_hub`] to retry packaging alone.
#[derive(Debug)]
pub struct WorkspaceHubCreator {
    workspace_root: PathBuf,
    hubs_root: PathBuf,
    packager: Box<dyn Packager>,
}

impl WorkspaceHubCreator {
    /// Create a hub creator using the default hubs root and the platform
    /// archiver.
    #[must_use]
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            hubs_root: PathBuf::from(DEFAULT_HUBS_ROOT),
            packager: PackagerKind::System.build(),
        }
    }

    /// Use a different hubs directory.
    #[must_use]
    pub fn with_hubs_root(mut self, hubs_root: impl Into<PathBuf>) -> Self {
        self.hubs_root = hubs_root.into();
        self
    }

    /// Use a different packaging backend.
    #[must_use]
    pub fn with_packager(mut self, packager: Box<dyn Packager>) -> Self {
        self.packager = packager;
        self
    }

    pub fn set_hubs_root(&mut self, hubs_root: impl Into<PathBuf>) {
        self.hubs_root = hubs_root.into();
    }

    #[must_use]
    pub fn hubs_root(&self) -> &Path {
        &self.hubs_root
    }

    #[must_use]
    pub fn packager(&self) -> &dyn Packager {
        self.packager.as_ref()
    }

    #[must_use]
    pub const fn package_extension(&self) -> &'static str {
        PACKAGE_EXTENSION
    }

    #[must_use]
    pub const fn manifest_file_name(&self) -> &'static str {
        MANIFEST_FILE
    }

    /// Absolute hubs directory.
    #[must_use]
    pub fn hubs_directory(&self) -> PathBuf {
        join(&self.workspace_root, &self.hubs_root)
    }

    /// Directory a hub named `name` lives in.
    #[must_use]
    pub fn hub_directory_path(&self, name: &str) -> PathBuf {
        join(self.hubs_directory(), sanitize(name))
    }

    /// Package file produced for a hub named `name`.
    #[must_use]
    pub fn package_path(&self, name: &str) -> PathBuf {
        package_path_for(&self.hub_directory_path(name))
    }

    /// Manifest location for a hub named `name`.
    #[must_use]
    pub fn manifest_path(&self, name: &str) -> PathBuf {
        manifest_path_for(&self.hub_directory_path(name))
    }

    /// Read and validate the manifest of an existing hub.
    ///
    /// # Errors
    /// Returns [`FsError::HubNotFound`] if the manifest is missing, or a
    /// parse error if it is not a valid hub manifest.
    pub fn read_manifest(&self, name: &str) -> Result<HubManifest> {
        let path = self.manifest_path(name);
        if !path.is_file() {
            return Err(FsError::HubNotFound(self.hub_directory_path(name)));
        }
        let text = fs::read_to_string(&path)?;
        Ok(HubManifest::from_json(&text)?)
    }

    /// Package an already scaffolded hub again.
    ///
    /// # Errors
    /// Returns [`FsError::HubNotFound`] if the hub has no valid manifest, or
    /// any packaging error.
    pub fn package_hub(&self, name: &str) -> Result<PathBuf> {
        require_workspace_root(&self.workspace_root)?;

        let hub_path = self.hub_directory_path(name);
        self.read_manifest(name)?;

        let package_path = package_path_for(&hub_path);
        self.package_directory(&hub_path, &package_path)?;
        Ok(package_path)
    }

    fn write_manifest(&self, hub_path: &Path) -> Result<()> {
        let directory = hub_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let manifest = HubManifest::new(self.creator_name(), directory);

        atomic_write_text(&manifest_path_for(hub_path), &manifest.to_json_pretty()?)
    }

    fn package_directory(&self, hub_path: &Path, package_path: &Path) -> Result<()> {
        self.packager
            .package(hub_path, package_path)
            .inspect_err(|e| {
                warn!(
                    hub = %hub_path.display(),
                    packager = self.packager.name(),
                    error = %e,
                    "Packaging failed; hub directory left in place"
                );
            })
    }
}

impl ContainerCreator for WorkspaceHubCreator {
    fn creator_name(&self) -> &'static str {
        CREATOR_NAME
    }

    fn required_relative_paths(&self) -> &'static [&'static str] {
        REQUIRED_PATHS
    }

    fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    fn set_workspace_root(&mut self, root: PathBuf) {
        self.workspace_root = root;
    }
}

impl HubCreator for WorkspaceHubCreator {
    fn create_hub(&self, name: &str) -> Result<PathBuf> {
        require_workspace_root(&self.workspace_root)?;

        ensure_directory(&self.hubs_directory())?;

        let hub_path = self.hub_directory_path(name);
        if hub_path.exists() {
            return Err(FsError::HubExists(hub_path));
        }

        // create_dir (not create_dir_all) so a concurrent creator loses the race.
        fs::create_dir(&hub_path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::AlreadyExists {
                FsError::HubExists(hub_path.clone())
            } else {
                FsError::CreateDirectory {
                    path: hub_path.clone(),
                    source,
                }
            }
        })?;

        scaffold(&hub_path, self.required_relative_paths())?;
        self.write_manifest(&hub_path)?;

        info!(name = %name, path = %hub_path.display(), "Scaffolded hub");

        let package_path = package_path_for(&hub_path);
        self.package_directory(&hub_path, &package_path)?;

        info!(package = %package_path.display(), "Created hub");

        Ok(package_path)
    }
}

fn package_path_for(hub_path: &Path) -> PathBuf {
    let mut raw = hub_path.as_os_str().to_owned();
    raw.push(PACKAGE_EXTENSION);
    PathBuf::from(raw)
}

fn manifest_path_for(hub_path: &Path) -> PathBuf {
    join(join(hub_path, METADATA_DIR), MANIFEST_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::package::{DisabledPackager, ZipPackager};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::fs::File;
    use tempfile::TempDir;

    fn zip_creator(root: &Path) -> WorkspaceHubCreator {
        WorkspaceHubCreator::new(root).with_packager(Box::new(ZipPackager::default()))
    }

    #[derive(Debug)]
    struct FailingPackager;

    impl Packager for FailingPackager {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn package(&self, source_dir: &Path, _archive_path: &Path) -> Result<()> {
            Err(FsError::PackagingInterrupted {
                path: source_dir.to_path_buf(),
                source: std::io::Error::other("killed"),
            })
        }
    }

    #[test]
    fn test_create_hub_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let ws = tmp.path().join("ws");
        let creator = zip_creator(&ws);

        let package = creator.create_hub("My Hub").unwrap();

        let hub = ws.join("hubs/my-hub");
        for relative in [".whatson", "notes", "notes/drafts", "attachments", "assets", "indexes"] {
            assert!(hub.join(relative).is_dir(), "missing {relative}");
        }

        let manifest: Value =
            serde_json::from_str(&fs::read_to_string(hub.join(".whatson/hub.json")).unwrap())
                .unwrap();
        assert_eq!(manifest["hubDirectory"], "my-hub");
        assert_eq!(manifest["format"], "wshub");
        assert_eq!(manifest["creator"], "WorkspaceHubCreator");
        assert_eq!(manifest["storage"], "filesystem");
        assert_eq!(manifest["notesRoot"], "notes");
        assert_eq!(manifest["version"], 1);

        assert_eq!(package, ws.join("hubs/my-hub.wshub"));
        assert!(package.is_file());

        let archive = zip::ZipArchive::new(File::open(&package).unwrap()).unwrap();
        assert!(archive.file_names().any(|n| n == "my-hub/.whatson/hub.json"));
        assert!(archive.file_names().any(|n| n == "my-hub/notes/drafts/"));
    }

    #[test]
    fn test_create_hub_twice_conflicts() {
        let tmp = TempDir::new().unwrap();
        let creator = zip_creator(tmp.path());

        creator.create_hub("X").unwrap();
        let manifest_path = creator.manifest_path("X");
        let before = fs::read_to_string(&manifest_path).unwrap();

        let err = creator.create_hub("X").unwrap_err();
        assert!(matches!(&err, FsError::HubExists(p) if p == &tmp.path().join("hubs/x")));
        assert_eq!(err.category(), ErrorCategory::Conflict);

        assert_eq!(fs::read_to_string(&manifest_path).unwrap(), before);
    }

    #[test]
    fn test_create_hub_empty_root() {
        let creator = zip_creator(Path::new(""));
        let err = creator.create_hub("anything").unwrap_err();
        assert!(matches!(err, FsError::EmptyWorkspaceRoot));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_packaging_unavailable_keeps_scaffold() {
        let tmp = TempDir::new().unwrap();
        let creator =
            WorkspaceHubCreator::new(tmp.path()).with_packager(Box::new(DisabledPackager));

        let err = creator.create_hub("My Hub").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::PackagingUnavailable);

        let hub = tmp.path().join("hubs/my-hub");
        assert!(hub.join(".whatson/hub.json").is_file());
        assert!(hub.join("indexes").is_dir());
        assert!(!tmp.path().join("hubs/my-hub.wshub").exists());
    }

    #[test]
    fn test_retry_packaging_after_failure() {
        let tmp = TempDir::new().unwrap();
        let failing =
            WorkspaceHubCreator::new(tmp.path()).with_packager(Box::new(FailingPackager));

        let err = failing.create_hub("Retry Me").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Packaging);

        // Scaffolding again is refused; packaging alone succeeds.
        let creator = zip_creator(tmp.path());
        assert!(creator.create_hub("Retry Me").unwrap_err().is_conflict());

        let package = creator.package_hub("Retry Me").unwrap();
        assert_eq!(package, tmp.path().join("hubs/retry-me.wshub"));
        assert!(package.is_file());
    }

    #[test]
    fn test_package_hub_requires_manifest() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("hubs/ghost")).unwrap();

        let err = zip_creator(tmp.path()).package_hub("ghost").unwrap_err();
        assert!(matches!(err, FsError::HubNotFound(_)));
    }

    #[test]
    fn test_custom_hubs_root() {
        let tmp = TempDir::new().unwrap();
        let creator = zip_creator(tmp.path()).with_hubs_root("library/./hubs");

        let package = creator.create_hub("Team Space").unwrap();
        assert_eq!(package, tmp.path().join("library/hubs/team-space.wshub"));
    }

    #[test]
    fn test_hubs_root_blocked_by_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("hubs"), "not a dir").unwrap();

        let err = zip_creator(tmp.path()).create_hub("x").unwrap_err();
        assert!(matches!(err, FsError::NotADirectory(_)));
    }

    #[test]
    fn test_set_workspace_root() {
        let tmp = TempDir::new().unwrap();
        let mut creator = zip_creator(Path::new(""));
        creator.set_workspace_root(tmp.path().to_path_buf());

        assert_eq!(creator.workspace_root(), tmp.path());
        assert!(creator.create_hub("").unwrap().ends_with("untitled-hub.wshub"));
    }

    #[test]
    fn test_read_manifest() {
        let tmp = TempDir::new().unwrap();
        let creator = zip_creator(tmp.path());
        creator.create_hub("Docs").unwrap();

        let manifest = creator.read_manifest("Docs").unwrap();
        assert_eq!(manifest.hub_directory, "docs");
        assert_eq!(manifest.creator, creator.creator_name());
    }

    #[test]
    fn test_required_paths_order() {
        let creator = WorkspaceHubCreator::new("/ws");
        assert_eq!(
            creator.required_relative_paths(),
            &[".whatson", "notes", "notes/drafts", "attachments", "assets", "indexes"]
        );
        assert_eq!(creator.package_extension(), ".wshub");
        assert_eq!(creator.manifest_file_name(), "hub.json");
        assert_eq!(creator.package_path("My Hub"), PathBuf::from("/ws/hubs/my-hub.wshub"));
    }
}
