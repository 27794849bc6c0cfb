//! Output formatting for the CLI.

use anyhow::Result;
use console::style;
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;
use whatson_fs::NoteKind;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// Print output in the specified format.
pub fn print<T: Serialize + HumanDisplay>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => println!("{}", value.human_display()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}

/// Print a list in the specified format.
pub fn print_list<T: Serialize + HumanDisplay>(values: &[T], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for value in values {
                println!("{}", value.human_display());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(values)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(values)?),
    }
    Ok(())
}

/// Print a success message.
pub fn print_success(message: &str, format: OutputFormat) -> Result<()> {
    #[derive(Serialize)]
    struct Status<'a> {
        status: &'static str,
        message: &'a str,
    }

    let status = Status {
        status: "ok",
        message,
    };
    match format {
        OutputFormat::Human => println!("{}", style(message).green()),
        OutputFormat::Json => println!("{}", serde_json::to_string(&status)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&status)?),
    }
    Ok(())
}

/// Trait for human-readable display.
pub trait HumanDisplay {
    fn human_display(&self) -> String;
}

/// A hub on disk.
#[derive(Debug, Serialize)]
pub struct HubView {
    pub name: String,
    pub directory: PathBuf,
    pub package: PathBuf,
    pub packaged: bool,
}

impl HumanDisplay for HubView {
    fn human_display(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Hub:       {}", self.name);
        let _ = writeln!(out, "Directory: {}", self.directory.display());
        let _ = write!(out, "Package:   {}", self.package.display());
        if !self.packaged {
            let _ = write!(out, " {}", style("(not packaged)").yellow());
        }
        out
    }
}

/// One artifact written by a note creator.
#[derive(Debug, Serialize)]
pub struct NoteArtifactView {
    pub kind: NoteKind,
    pub creator: String,
    pub path: PathBuf,
}

impl HumanDisplay for NoteArtifactView {
    fn human_display(&self) -> String {
        format!("{:<12} {}", self.kind, self.path.display())
    }
}

/// A creator and the scaffold it guarantees.
#[derive(Debug, Serialize)]
pub struct CreatorView {
    pub name: String,
    pub required_paths: Vec<String>,
}

impl HumanDisplay for CreatorView {
    fn human_display(&self) -> String {
        format!(
            "{:<26} {}",
            style(&self.name).bold(),
            self.required_paths.join(", ")
        )
    }
}
