//! Shared domain types.
//!
//! These are the small closed vocabularies used by the settings model and the
//! CLI. They serialize as lowercase strings so settings files stay readable.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Verbosity of the pipeline log.
///
/// Written as a lowercase name. Reading also accepts upper-case names and the
/// numeric severities of Python's `logging` module (10 = debug, 20 = info,
/// 30 = warning, 40 = error, 50 = critical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase", try_from = "LevelRepr")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Level for a numeric severity; anything below debug is trace.
    pub fn from_severity(severity: i64) -> Self {
        match severity {
            i64::MIN..=9 => LogLevel::Trace,
            10..=19 => LogLevel::Debug,
            20..=29 => LogLevel::Info,
            30..=39 => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Name(String),
    Severity(i64),
}

impl TryFrom<LevelRepr> for LogLevel {
    type Error = String;

    fn try_from(repr: LevelRepr) -> Result<Self, String> {
        match repr {
            LevelRepr::Severity(severity) => Ok(LogLevel::from_severity(severity)),
            LevelRepr::Name(name) => match name.to_ascii_lowercase().as_str() {
                "trace" | "notset" => Ok(LogLevel::Trace),
                "debug" => Ok(LogLevel::Debug),
                "info" => Ok(LogLevel::Info),
                "warn" | "warning" => Ok(LogLevel::Warn),
                "error" | "critical" => Ok(LogLevel::Error),
                _ => Err(format!("unknown logging level '{name}'")),
            },
        }
    }
}

/// How 3D descriptors are reduced from 2D slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SliceMode {
    /// Average the descriptor over all slices of each orientation.
    #[default]
    Average,
    /// Evaluate the descriptor on a randomly sampled slice per orientation.
    Sample,
}

/// Every settings type the crate can construct, by name.
///
/// Used by the CLI to pick a projection target at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SettingsKind {
    Common,
    Descriptor,
    Optimizer,
    Loss,
    Characterization,
    Reconstruction,
    Matching,
}

impl SettingsKind {
    pub const ALL: [SettingsKind; 7] = [
        SettingsKind::Common,
        SettingsKind::Descriptor,
        SettingsKind::Optimizer,
        SettingsKind::Loss,
        SettingsKind::Characterization,
        SettingsKind::Reconstruction,
        SettingsKind::Matching,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            SettingsKind::Common => "Common",
            SettingsKind::Descriptor => "Descriptor",
            SettingsKind::Optimizer => "Optimizer",
            SettingsKind::Loss => "Loss",
            SettingsKind::Characterization => "Characterization",
            SettingsKind::Reconstruction => "Reconstruction",
            SettingsKind::Matching => "Matching",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_serializes_lowercase() {
        let s = serde_json::to_string(&LogLevel::Warn).unwrap();
        assert_eq!(s, "\"warn\"");
        let back: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(back, LogLevel::Debug);
    }

    #[test]
    fn log_level_reads_numeric_and_upper_case_levels() {
        let levels: Vec<LogLevel> = serde_json::from_str(r#"[0, 10, 20, 30, 40, 50, "WARNING", "CRITICAL"]"#).unwrap();
        assert_eq!(
            levels,
            vec![
                LogLevel::Trace,
                LogLevel::Debug,
                LogLevel::Info,
                LogLevel::Warn,
                LogLevel::Error,
                LogLevel::Error,
                LogLevel::Warn,
                LogLevel::Error,
            ]
        );
        assert!(serde_json::from_str::<LogLevel>("\"loud\"").is_err());
        assert_eq!(serde_json::to_string(&LogLevel::from_severity(30)).unwrap(), "\"warn\"");
    }
}
