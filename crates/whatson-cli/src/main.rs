//! whatson CLI - Create hubs and notes from the command line.

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use whatson_fs::{NoteKind, PackagerKind};

#[derive(Parser)]
#[command(name = "whatson")]
#[command(author, version, about = "Hub and note scaffolding CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    format: output::OutputFormat,

    /// Workspace root (defaults to current directory)
    #[arg(long, short = 'C', global = true, env = "WHATSON_ROOT")]
    path: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default whatson.yml into the workspace
    Init,

    /// Hub operations
    #[command(subcommand)]
    Hub(HubCommands),

    /// Note operations
    #[command(subcommand)]
    Note(NoteCommands),

    /// List the available creators and their scaffolds
    Creators,
}

#[derive(Subcommand)]
enum HubCommands {
    /// Scaffold and package a new hub
    Create {
        /// Hub name (sanitized into a directory name)
        name: String,

        /// Packaging backend (overrides whatson.yml)
        #[arg(long, short = 'p')]
        packager: Option<PackagerArg>,
    },

    /// Package an existing hub again
    Package {
        /// Hub name
        name: String,

        /// Packaging backend (overrides whatson.yml)
        #[arg(long, short = 'p')]
        packager: Option<PackagerArg>,
    },

    /// Show where a hub and its package live
    Path {
        /// Hub name
        name: String,
    },
}

#[derive(Subcommand)]
enum NoteCommands {
    /// Scaffold a note
    Create {
        /// Note id (a random UUID when omitted)
        id: Option<String>,

        /// Aspects to create (all when omitted; can be specified multiple times)
        #[arg(long, short = 'k')]
        kind: Vec<NoteKind>,
    },

    /// Show the artifact path a creator owns for a note
    Path {
        /// Note aspect
        kind: NoteKind,

        /// Note id
        id: String,
    },
}

/// Packaging backend selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PackagerArg {
    System,
    Zip,
    Disabled,
}

impl From<PackagerArg> for PackagerKind {
    fn from(arg: PackagerArg) -> Self {
        match arg {
            PackagerArg::System => Self::System,
            PackagerArg::Zip => Self::Zip,
            PackagerArg::Disabled => Self::Disabled,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Determine workspace path
    let workspace_path = match cli.path {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Init => commands::init(&workspace_path, cli.format),
        Commands::Hub(HubCommands::Create { name, packager }) => {
            commands::hub_create(&workspace_path, &name, packager.map(Into::into), cli.format)
        }
        Commands::Hub(HubCommands::Package { name, packager }) => {
            commands::hub_package(&workspace_path, &name, packager.map(Into::into), cli.format)
        }
        Commands::Hub(HubCommands::Path { name }) => {
            commands::hub_path(&workspace_path, &name, cli.format)
        }
        Commands::Note(NoteCommands::Create { id, kind }) => {
            commands::note_create(&workspace_path, id, &kind, cli.format)
        }
        Commands::Note(NoteCommands::Path { kind, id }) => {
            commands::note_path(&workspace_path, kind, &id, cli.format)
        }
        Commands::Creators => commands::creators(&workspace_path, cli.format),
    }
}
