//! Command-line parsing for the settings tool.
//!
//! Parsing is kept apart from the settings model: the CLI only names files and
//! target kinds, all semantics live in `crate::settings`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{LogLevel, SettingsKind};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "mcr-settings",
    version,
    about = "Inspect, validate and project microstructure pipeline settings"
)]
pub struct Cli {
    #[command(flatten)]
    pub logging: LogArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the default settings of a type as JSON.
    Defaults(DefaultsArgs),
    /// Project a settings file onto another settings type.
    Project(ProjectArgs),
    /// Construct and validate a settings file as the given type.
    Validate(InputArgs),
    /// Print a settings file grouped by parameter group.
    Show(InputArgs),
}

/// Logging overrides applied on top of the settings file's common fields.
#[derive(Debug, Args, Clone, Default)]
pub struct LogArgs {
    /// Log verbosity (overrides `logging_level`; `RUST_LOG` overrides both).
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Write logs to `<target_folder>/<logfile_name>.log` instead of stderr.
    #[arg(long, global = true)]
    pub log_file: bool,
}

#[derive(Debug, Args, Clone)]
pub struct DefaultsArgs {
    /// Settings type.
    #[arg(short = 'k', long, value_enum, default_value_t = SettingsKind::Matching)]
    pub kind: SettingsKind,
}

#[derive(Debug, Args, Clone)]
pub struct ProjectArgs {
    /// Settings JSON to read.
    #[arg(short = 'i', long, value_name = "JSON")]
    pub input: PathBuf,

    /// Settings type to project onto.
    #[arg(short = 't', long, value_enum)]
    pub to: SettingsKind,

    /// Write the projected settings here instead of printing them.
    #[arg(short = 'o', long, value_name = "JSON")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Settings JSON to read.
    #[arg(short = 'i', long, value_name = "JSON")]
    pub input: PathBuf,

    /// Settings type to read the file as.
    #[arg(short = 'k', long, value_enum, default_value_t = SettingsKind::Matching)]
    pub kind: SettingsKind,
}
