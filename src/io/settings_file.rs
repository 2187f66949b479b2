//! Read/write settings JSON files.
//!
//! A settings file is a single flat JSON object mapping field names to values,
//! the same view [`crate::settings::SettingsView`] exposes. Files are not tied
//! to one settings type: a Matching file can be loaded as Reconstruction
//! settings, keys the target does not declare are dropped.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde_json::Value;

use crate::domain::SettingsKind;
use crate::error::{AppError, EXIT_IO};
use crate::settings::{FieldMap, Settings, select_subsettings};

/// Read a settings file into a flat field map.
pub fn read_field_map(path: &Path) -> Result<FieldMap, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to open settings JSON '{}': {e}", path.display())))?;
    let value: Value = serde_json::from_reader(file)
        .map_err(|e| AppError::new(EXIT_IO, format!("Invalid settings JSON '{}': {e}", path.display())))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(AppError::new(
            EXIT_IO,
            format!(
                "Settings JSON '{}' must be an object of field names, found {}",
                path.display(),
                json_kind(&other)
            ),
        )),
    }
}

/// Load a typed settings value from a file, warning about dropped keys.
pub fn load_settings<T: Settings>(path: &Path) -> Result<T, AppError> {
    let fields = read_field_map(path)?;
    warn_undeclared(T::KIND, &fields, path)?;
    Ok(select_subsettings(&fields)?)
}

/// Project already-read settings onto the runtime-selected `kind`.
///
/// `path` is only used to name the file in warnings.
pub fn project_fields(kind: SettingsKind, fields: &FieldMap, path: &Path) -> Result<FieldMap, AppError> {
    warn_undeclared(kind, fields, path)?;
    Ok(kind.project(fields)?)
}

/// Write a field view as pretty JSON.
pub fn write_field_map(path: &Path, fields: &FieldMap) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to create settings JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(BufWriter::new(file), fields)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write settings JSON: {e}")))?;
    tracing::info!(path = %path.display(), fields = fields.len(), "wrote settings");
    Ok(())
}

/// Write any settings value as pretty JSON.
pub fn write_settings<T: Settings>(path: &Path, settings: &T) -> Result<(), AppError> {
    write_field_map(path, &settings.to_field_map()?)
}

fn warn_undeclared(kind: SettingsKind, fields: &FieldMap, path: &Path) -> Result<(), AppError> {
    let dropped = kind.undeclared_fields(fields)?;
    if !dropped.is_empty() {
        tracing::warn!(
            path = %path.display(),
            target_kind = kind.display_name(),
            dropped = ?dropped,
            "settings file has fields the target does not declare"
        );
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
