//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - reads the settings file and sets up logging from its common fields
//! - projects/validates the settings as the requested type
//! - prints or writes the result

use std::path::Path;

use clap::Parser;

use crate::cli::{Cli, Command, DefaultsArgs, InputArgs, LogArgs, ProjectArgs};
use crate::error::{AppError, EXIT_IO};
use crate::io::{project_fields, read_field_map, write_field_map};
use crate::settings::{CommonSettings, FieldMap, select_subsettings};

/// Entry point for the `mcr-settings` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Defaults(args) => handle_defaults(args, &cli.logging),
        Command::Project(args) => handle_project(args, &cli.logging),
        Command::Validate(args) => handle_validate(args, &cli.logging),
        Command::Show(args) => handle_show(args, &cli.logging),
    }
}

fn handle_defaults(args: DefaultsArgs, logging: &LogArgs) -> Result<(), AppError> {
    init_logging(&FieldMap::new(), logging)?;
    println!("{}", to_pretty_json(&args.kind.defaults()?)?);
    Ok(())
}

fn handle_project(args: ProjectArgs, logging: &LogArgs) -> Result<(), AppError> {
    let fields = open_settings(&args.input, logging)?;
    tracing::info!(
        input = %args.input.display(),
        target_kind = args.to.display_name(),
        "projecting settings"
    );
    let projected = project_fields(args.to, &fields, &args.input)?;

    match &args.output {
        Some(path) => write_field_map(path, &projected)?,
        None => println!("{}", to_pretty_json(&projected)?),
    }
    Ok(())
}

fn handle_validate(args: InputArgs, logging: &LogArgs) -> Result<(), AppError> {
    let fields = open_settings(&args.input, logging)?;
    let validated = project_fields(args.kind, &fields, &args.input)?;
    println!("{}", crate::report::format_validation_ok(args.kind, &validated)?);
    Ok(())
}

fn handle_show(args: InputArgs, logging: &LogArgs) -> Result<(), AppError> {
    let fields = open_settings(&args.input, logging)?;
    let validated = project_fields(args.kind, &fields, &args.input)?;
    println!("{}", crate::report::format_settings_summary(args.kind, &validated)?);
    Ok(())
}

/// Read the settings file and configure logging from its common fields.
fn open_settings(path: &Path, logging: &LogArgs) -> Result<FieldMap, AppError> {
    let fields = read_field_map(path)?;
    init_logging(&fields, logging)?;
    tracing::debug!(path = %path.display(), fields = fields.len(), "read settings file");
    Ok(fields)
}

fn init_logging(fields: &FieldMap, logging: &LogArgs) -> Result<(), AppError> {
    let common = logging_settings(fields, logging)?;
    crate::logging::init(&common, logging.log_file)?;
    Ok(())
}

/// Common settings from the file with CLI logging overrides applied.
pub fn logging_settings(fields: &FieldMap, logging: &LogArgs) -> Result<CommonSettings, AppError> {
    let mut common: CommonSettings = select_subsettings(fields)?;
    if let Some(level) = logging.log_level {
        common.logging_level = level;
    }
    Ok(common)
}

fn to_pretty_json(fields: &FieldMap) -> Result<String, AppError> {
    serde_json::to_string_pretty(fields)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to serialize settings: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LogLevel;
    use serde_json::json;

    #[test]
    fn cli_log_level_overrides_file() {
        let mut fields = FieldMap::new();
        fields.insert("logging_level".into(), json!("warn"));
        fields.insert("logfile_name".into(), json!("matching"));
        fields.insert("max_iter".into(), json!(5));

        let from_file = logging_settings(&fields, &LogArgs::default()).unwrap();
        assert_eq!(from_file.logging_level, LogLevel::Warn);
        assert_eq!(from_file.logfile_name, "matching");

        let overridden = logging_settings(
            &fields,
            &LogArgs {
                log_level: Some(LogLevel::Trace),
                log_file: false,
            },
        )
        .unwrap();
        assert_eq!(overridden.logging_level, LogLevel::Trace);
    }

    #[test]
    fn pretty_json_is_an_object() {
        let text = to_pretty_json(&crate::domain::SettingsKind::Loss.defaults().unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["loss_type"], json!("MSE"));
    }
}
