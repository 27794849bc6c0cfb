//! CLI command implementations.

use crate::output::{self, CreatorView, HubView, NoteArtifactView, OutputFormat};
use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::debug;
use whatson_core::sanitize;
use whatson_fs::{
    ContainerCreator, HubCreator, NoteKind, PackagerKind, WorkspaceConfig, WorkspaceHubCreator,
};

fn load_config(path: &Path) -> Result<WorkspaceConfig> {
    WorkspaceConfig::load(path).context("Failed to load workspace config")
}

fn hub_creator(path: &Path, packager: Option<PackagerKind>) -> Result<WorkspaceHubCreator> {
    let mut config = load_config(path)?;
    if let Some(kind) = packager {
        config.packager = kind;
    }
    let creator = config.hub_creator(path);
    debug!(packager = creator.packager().name(), "Using packager");
    Ok(creator)
}

/// Write a default config file.
pub fn init(path: &Path, format: OutputFormat) -> Result<()> {
    let file = WorkspaceConfig::default()
        .init(path)
        .context("Failed to initialize workspace")?;
    output::print_success(&format!("Wrote {}", file.display()), format)
}

/// Scaffold and package a hub.
pub fn hub_create(
    path: &Path,
    name: &str,
    packager: Option<PackagerKind>,
    format: OutputFormat,
) -> Result<()> {
    let creator = hub_creator(path, packager)?;
    let directory = creator.hub_directory_path(name);

    let package = creator.create_hub(name).with_context(|| {
        format!(
            "Failed to create hub '{name}' (anything already written is left at {})",
            directory.display()
        )
    })?;

    output::print(
        &HubView {
            name: sanitize(name).into_string(),
            directory,
            package,
            packaged: true,
        },
        format,
    )
}

/// Package an existing hub again.
pub fn hub_package(
    path: &Path,
    name: &str,
    packager: Option<PackagerKind>,
    format: OutputFormat,
) -> Result<()> {
    let creator = hub_creator(path, packager)?;
    let package = creator
        .package_hub(name)
        .with_context(|| format!("Failed to package hub '{name}'"))?;

    output::print(
        &HubView {
            name: sanitize(name).into_string(),
            directory: creator.hub_directory_path(name),
            package,
            packaged: true,
        },
        format,
    )
}

/// Show hub locations.
pub fn hub_path(path: &Path, name: &str, format: OutputFormat) -> Result<()> {
    let creator = hub_creator(path, None)?;
    let package = creator.package_path(name);

    output::print(
        &HubView {
            name: sanitize(name).into_string(),
            directory: creator.hub_directory_path(name),
            packaged: package.is_file(),
            package,
        },
        format,
    )
}

/// Scaffold a note with the selected creators.
pub fn note_create(
    path: &Path,
    id: Option<String>,
    kinds: &[NoteKind],
    format: OutputFormat,
) -> Result<()> {
    let roots = load_config(path)?.note_roots(path);
    let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let kinds: &[NoteKind] = if kinds.is_empty() {
        &NoteKind::ALL
    } else {
        kinds
    };

    let mut created = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        let creator = kind.creator(roots.clone());
        let artifact = creator
            .create_for_note(&id)
            .with_context(|| format!("Failed to create {kind} for note '{id}'"))?;
        created.push(NoteArtifactView {
            kind,
            creator: creator.creator_name().to_string(),
            path: artifact,
        });
    }

    if matches!(format, OutputFormat::Human) {
        println!("Note {id}");
    }
    output::print_list(&created, format)
}

/// Show the artifact path of one note creator.
pub fn note_path(path: &Path, kind: NoteKind, id: &str, format: OutputFormat) -> Result<()> {
    if id.trim().is_empty() {
        bail!("Note id must not be empty");
    }
    let creator = kind.creator(load_config(path)?.note_roots(path));

    output::print(
        &NoteArtifactView {
            kind,
            creator: creator.creator_name().to_string(),
            path: creator.target_path_for_note(id),
        },
        format,
    )
}

/// List creators and their scaffolds.
pub fn creators(path: &Path, format: OutputFormat) -> Result<()> {
    let config = load_config(path)?;
    let hub = config.hub_creator(path);

    let mut views = vec![view_of(&hub)];
    for kind in NoteKind::ALL {
        views.push(view_of(kind.creator(config.note_roots(path)).as_ref()));
    }

    output::print_list(&views, format)
}

fn view_of<C: ContainerCreator + ?Sized>(creator: &C) -> CreatorView {
    CreatorView {
        name: creator.creator_name().to_string(),
        required_paths: creator
            .required_relative_paths()
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}
