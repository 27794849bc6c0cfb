//! Packaging of a container directory into a single archive file.
//!
//! Two real backends exist: [`CommandPackager`] shells out to the platform
//! archiver, [`ZipPackager`] writes the archive in-process. Both put the
//! directory itself at the top of the archive and replace any existing file at
//! the target path.

use crate::error::{FsError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Turns a directory into an archive.
pub trait Packager: std::fmt::Debug + Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Archive `source_dir` into `archive_path`.
    ///
    /// # Errors
    /// Returns a packaging error if the archive could not be produced.
    fn package(&self, source_dir: &Path, archive_path: &Path) -> Result<()>;
}

/// Selectable packaging backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackagerKind {
    /// Platform archiving tool.
    #[default]
    System,
    /// Built-in zip writer.
    Zip,
    /// Packaging turned off.
    Disabled,
}

impl PackagerKind {
    /// Construct the packager for this kind.
    #[must_use]
    pub fn build(self) -> Box<dyn Packager> {
        match self {
            Self::System => Box::new(CommandPackager::platform_default()),
            Self::Zip => Box::new(ZipPackager::default()),
            Self::Disabled => Box::new(DisabledPackager),
        }
    }
}

/// Split a source directory into its parent and base name.
fn split_source(source_dir: &Path) -> Result<(PathBuf, String)> {
    let absolute = if source_dir.is_absolute() {
        source_dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(source_dir)
    };
    let absolute = whatson_core::clean(&absolute);

    let name = absolute
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| FsError::Archive(format!("no directory name in '{}'", absolute.display())))?;
    let parent = absolute
        .parent()
        .map_or_else(|| PathBuf::from("/"), Path::to_path_buf);

    Ok((parent, name))
}

fn remove_existing(archive_path: &Path) -> Result<()> {
    match fs::remove_file(archive_path) {
        Ok(()) => {
            debug!(path = %archive_path.display(), "Removed previous package");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FsError::Io(e)),
    }
}

/// One argument of a packaging command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArg {
    /// Passed through unchanged.
    Literal(String),
    /// Base name of the source directory, prefixed with `./` so names
    /// starting with `-` are not read as options.
    SourceName,
    /// Absolute path of the archive to produce.
    ArchivePath,
}

impl CommandArg {
    fn literal(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

/// Runs an external archiver to completion.
///
/// The process runs in the parent of the source directory, so the directory
/// name becomes the top-level archive entry.
#[derive(Debug, Clone)]
pub struct CommandPackager {
    program: PathBuf,
    args: Vec<CommandArg>,
}

impl CommandPackager {
    /// Build a packager for an arbitrary command line.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, args: Vec<CommandArg>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `ditto` on macOS, keeping resource forks and extended attributes.
    #[must_use]
    pub fn ditto() -> Self {
        Self::new(
            "/usr/bin/ditto",
            vec![
                CommandArg::literal("-c"),
                CommandArg::literal("-k"),
                CommandArg::literal("--sequesterRsrc"),
                CommandArg::literal("--keepParent"),
                CommandArg::SourceName,
                CommandArg::ArchivePath,
            ],
        )
    }

    /// `zip -r`, recursing into the directory.
    #[must_use]
    pub fn zip() -> Self {
        Self::new(
            "zip",
            vec![
                CommandArg::literal("-r"),
                CommandArg::ArchivePath,
                CommandArg::SourceName,
            ],
        )
    }

    /// The archiver native to the current platform.
    #[must_use]
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::ditto()
        } else {
            Self::zip()
        }
    }

    /// Program that will be executed.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn render_args(&self, source_name: &str, archive_path: &Path) -> Vec<std::ffi::OsString> {
        self.args
            .iter()
            .map(|arg| match arg {
                CommandArg::Literal(s) => s.into(),
                CommandArg::SourceName => format!("./{source_name}").into(),
                CommandArg::ArchivePath => archive_path.as_os_str().to_owned(),
            })
            .collect()
    }
}

impl Packager for CommandPackager {
    fn name(&self) -> &'static str {
        "command"
    }

    #[cfg(target_family = "wasm")]
    fn package(&self, _source_dir: &Path, _archive_path: &Path) -> Result<()> {
        Err(FsError::PackagingUnavailable(
            "this platform cannot run external processes".to_string(),
        ))
    }

    #[cfg(not(target_family = "wasm"))]
    fn package(&self, source_dir: &Path, archive_path: &Path) -> Result<()> {
        use std::process::{Command, Stdio};

        let (parent, source_name) = split_source(source_dir)?;
        let archive_path = if archive_path.is_absolute() {
            archive_path.to_path_buf()
        } else {
            std::env::current_dir()?.join(archive_path)
        };

        remove_existing(&archive_path)?;

        debug!(
            program = %self.program.display(),
            cwd = %parent.display(),
            source = %source_name,
            "Running packaging command"
        );

        let output = Command::new(&self.program)
            .args(self.render_args(&source_name, &archive_path))
            .current_dir(&parent)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::Unsupported {
                    FsError::PackagingUnavailable(source.to_string())
                } else {
                    FsError::PackagingInterrupted {
                        path: source_dir.to_path_buf(),
                        source,
                    }
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(status = %output.status, stderr = %stderr, "Packaging command failed");
            return Err(FsError::PackagingFailed {
                status: output.status,
                stderr,
            });
        }

        if !archive_path.is_file() {
            return Err(FsError::PackageMissing(archive_path));
        }

        info!(archive = %archive_path.display(), "Packaged with external archiver");
        Ok(())
    }
}

/// Writes a deflate zip archive without any external tool.
#[derive(Debug, Clone, Copy)]
pub struct ZipPackager {
    compression: CompressionMethod,
}

impl Default for ZipPackager {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }
}

impl ZipPackager {
    /// Store entries without compression.
    #[must_use]
    pub const fn stored() -> Self {
        Self {
            compression: CompressionMethod::Stored,
        }
    }

    fn write_archive(&self, source_dir: &Path, file: &File) -> Result<()> {
        let (_, top) = split_source(source_dir)?;
        let options = FileOptions::default()
            .compression_method(self.compression)
            .unix_permissions(0o644);
        let dir_options = FileOptions::default().unix_permissions(0o755);

        let mut writer = ZipWriter::new(file);

        for entry in WalkDir::new(source_dir).sort_by_file_name() {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(source_dir)
                .map_err(|e| FsError::Archive(e.to_string()))?;

            // Zip entry names always use forward slashes.
            let mut name = top.clone();
            for part in relative.components() {
                name.push('/');
                name.push_str(&part.as_os_str().to_string_lossy());
            }

            if entry.file_type().is_dir() {
                writer.add_directory(name, dir_options)?;
            } else if entry.file_type().is_file() {
                writer.start_file(name, options)?;
                let mut input = File::open(entry.path())?;
                io::copy(&mut input, &mut writer)?;
            } else {
                debug!(path = %entry.path().display(), "Skipping non-regular entry");
            }
        }

        writer.finish()?;
        Ok(())
    }
}

impl Packager for ZipPackager {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn package(&self, source_dir: &Path, archive_path: &Path) -> Result<()> {
        if !source_dir.is_dir() {
            return Err(FsError::HubNotFound(source_dir.to_path_buf()));
        }

        let parent = match archive_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(parent)?;
        self.write_archive(source_dir, tmp.as_file())?;
        tmp.as_file().sync_all()?;
        tmp.persist(archive_path).map_err(|e| FsError::Io(e.error))?;

        if !archive_path.is_file() {
            return Err(FsError::PackageMissing(archive_path.to_path_buf()));
        }

        info!(archive = %archive_path.display(), "Packaged with zip writer");
        Ok(())
    }
}

/// Always refuses to package.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPackager;

impl Packager for DisabledPackager {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn package(&self, _source_dir: &Path, _archive_path: &Path) -> Result<()> {
        Err(FsError::PackagingUnavailable(
            "packaging is disabled for this workspace".to_string(),
        ))
    }
}
