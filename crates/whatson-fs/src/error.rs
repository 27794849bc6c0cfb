//! Error types for the filesystem backend.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for filesystem operations.
pub type Result<T> = std::result::Result<T, FsError>;

/// Errors that can occur while scaffolding or packaging containers.
#[derive(Debug, Error)]
pub enum FsError {
    /// Workspace root is empty or whitespace.
    #[error("workspace root path must not be empty")]
    EmptyWorkspaceRoot,

    /// Hub directory already exists.
    #[error("hub already exists at '{0}'")]
    HubExists(PathBuf),

    /// Note artifact already exists.
    #[error("note artifact already exists at '{0}'")]
    ArtifactExists(PathBuf),

    /// Hub directory or manifest is missing.
    #[error("hub not found at '{0}'")]
    HubNotFound(PathBuf),

    /// Directory could not be created.
    #[error("failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A non-directory entry occupies a directory path.
    #[error("path exists but is not a directory: '{0}'")]
    NotADirectory(PathBuf),

    /// File could not be opened for writing.
    #[error("failed to open file for writing '{path}': {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents could not be written in full.
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temporary file could not be moved over the destination.
    #[error("failed to commit file '{path}': {source}")]
    CommitFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// This build has no way to run the packaging step.
    #[error("packaging is unavailable: {0}")]
    PackagingUnavailable(String),

    /// Packaging process could not be started or waited on.
    #[error("packaging process did not finish for '{path}': {source}")]
    PackagingInterrupted {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Packaging process exited unsuccessfully.
    #[error("packaging failed ({status}): {stderr}")]
    PackagingFailed { status: ExitStatus, stderr: String },

    /// Packaging reported success but produced nothing.
    #[error("package file was not created: '{0}'")]
    PackageMissing(PathBuf),

    /// In-process archive writer failed.
    #[error("archive error: {0}")]
    Archive(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] whatson_core::CoreError),
}

/// Coarse classification of [`FsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Conflict,
    NotFound,
    Io,
    PackagingUnavailable,
    Packaging,
}

impl FsError {
    /// Classify this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyWorkspaceRoot | Self::Yaml(_) => ErrorCategory::Configuration,
            Self::HubExists(_) | Self::ArtifactExists(_) => ErrorCategory::Conflict,
            Self::HubNotFound(_) => ErrorCategory::NotFound,
            Self::CreateDirectory { .. }
            | Self::NotADirectory(_)
            | Self::OpenFile { .. }
            | Self::WriteFile { .. }
            | Self::CommitFile { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Core(_) => ErrorCategory::Io,
            Self::PackagingUnavailable(_) => ErrorCategory::PackagingUnavailable,
            Self::PackagingInterrupted { .. }
            | Self::PackagingFailed { .. }
            | Self::PackageMissing(_)
            | Self::Archive(_) => ErrorCategory::Packaging,
        }
    }

    /// Whether this error reports an existing container.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self.category(), ErrorCategory::Conflict)
    }
}

impl From<zip::result::ZipError> for FsError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::Archive(other.to_string()),
        }
    }
}

impl From<walkdir::Error> for FsError {
    fn from(err: walkdir::Error) -> Self {
        Self::Archive(err.to_string())
    }
}
