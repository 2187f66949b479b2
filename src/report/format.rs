//! Formatted terminal output for settings values.
//!
//! Fields are grouped by the type whose declaration they resolve to, in the
//! type's resolution order, so a summary of a bundle reads group by group.

use serde_json::Value;

use crate::domain::SettingsKind;
use crate::settings::{ConfigurationResult, FieldMap};

const NAME_WIDTH: usize = 30;
const VALUE_WIDTH: usize = 40;

/// Sections of `kind` in resolution order, each type listed once.
pub fn section_order(kind: SettingsKind) -> Vec<SettingsKind> {
    let mut out = Vec::new();
    push_sections(kind, &mut out);
    out
}

fn push_sections(kind: SettingsKind, out: &mut Vec<SettingsKind>) {
    for contributor in kind.composition() {
        push_sections(*contributor, out);
    }
    if !out.contains(&kind) {
        out.push(kind);
    }
}

/// Format a settings field view, marking values that differ from `kind`'s defaults.
pub fn format_settings_summary(kind: SettingsKind, fields: &FieldMap) -> ConfigurationResult<String> {
    let defaults = kind.defaults()?;
    let owners = kind.field_owners();
    let mut out = String::new();

    out.push_str(&format!("=== {} settings ===\n", kind.display_name()));

    for section in section_order(kind) {
        let names: Vec<&String> = owners
            .iter()
            .filter(|(_, owner)| **owner == section)
            .map(|(name, _)| name)
            .collect();
        if names.is_empty() {
            continue;
        }

        out.push_str(&format!("\n[{}]\n", section.display_name()));
        for name in names {
            let value = fields.get(name).unwrap_or(&Value::Null);
            let changed = defaults.get(name) != Some(value);
            let marker = if changed { "*" } else { " " };
            out.push_str(
                format!(
                    "{marker} {:<NAME_WIDTH$} {}\n",
                    name,
                    truncate(&fmt_value(value), VALUE_WIDTH)
                )
                .trim_end(),
            );
            out.push('\n');
        }
    }

    Ok(out)
}

/// One-line confirmation for a validated settings value.
pub fn format_validation_ok(kind: SettingsKind, fields: &FieldMap) -> ConfigurationResult<String> {
    let defaults = kind.defaults()?;
    let changed = fields
        .iter()
        .filter(|(name, value)| defaults.get(*name) != Some(*value))
        .count();
    Ok(format!(
        "OK: {} settings are valid ({} fields, {} changed from defaults).",
        kind.display_name(),
        fields.len(),
        changed
    ))
}

fn fmt_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matching_sections_follow_resolution_order() {
        assert_eq!(
            section_order(SettingsKind::Matching),
            vec![
                SettingsKind::Common,
                SettingsKind::Descriptor,
                SettingsKind::Characterization,
                SettingsKind::Optimizer,
                SettingsKind::Loss,
                SettingsKind::Reconstruction,
                SettingsKind::Matching,
            ]
        );
        assert_eq!(section_order(SettingsKind::Loss), vec![SettingsKind::Loss]);
    }

    #[test]
    fn summary_marks_changed_fields() {
        let mut fields = SettingsKind::Reconstruction.defaults().unwrap();
        fields.insert("max_iter".to_string(), json!(10));

        let out = format_settings_summary(SettingsKind::Reconstruction, &fields).unwrap();
        assert!(out.starts_with("=== Reconstruction settings ==="));
        assert!(out.contains("[Optimizer]"));
        assert!(out.lines().any(|l| l.starts_with("* max_iter") && l.ends_with("10")));
        assert!(out.lines().any(|l| l.starts_with("  loss_type") && l.ends_with("MSE")));
        assert!(out.lines().any(|l| l.starts_with("  descriptor_filename") && l.ends_with("-")));
    }

    #[test]
    fn multiphase_is_listed_under_matching() {
        let fields = SettingsKind::Matching.defaults().unwrap();
        let out = format_settings_summary(SettingsKind::Matching, &fields).unwrap();
        let matching_section = out.split("[Matching]").nth(1).unwrap();
        assert!(matching_section.contains("use_multiphase"));
        let characterization_section = out
            .split("[Characterization]")
            .nth(1)
            .unwrap()
            .split("[Optimizer]")
            .next()
            .unwrap();
        assert!(!characterization_section.contains("use_multiphase"));
    }

    #[test]
    fn validation_line_counts_changes() {
        let mut fields = SettingsKind::Loss.defaults().unwrap();
        fields.insert("loss_type".to_string(), json!("MAE"));
        assert_eq!(
            format_validation_ok(SettingsKind::Loss, &fields).unwrap(),
            "OK: Loss settings are valid (4 fields, 1 changed from defaults)."
        );
    }

    #[test]
    fn truncate_long_values() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
