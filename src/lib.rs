//! `mcr-settings` library crate.
//!
//! Typed configuration for the microstructure characterization /
//! reconstruction / matching pipeline. The pure settings model lives in
//! [`settings`]; the rest is the shell around it used by the binary.
//!
//! The binary (`mcr-settings`) is a thin wrapper around this library so that:
//!
//! - the settings model is testable without spawning processes
//! - pipeline stages can depend on the model without pulling in the CLI

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod settings;

pub use domain::{LogLevel, SettingsKind, SliceMode};
pub use settings::{
    CharacterizationSettings, CommonSettings, ConfigurationError, DescriptorSettings, FieldMap,
    LossSettings, MatchingSettings, OptimizerSettings, ReconstructionSettings, Settings,
    SettingsView, select_subsettings,
};
