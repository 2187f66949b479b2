//! Domain types used throughout the crate.
//!
//! This module defines the closed enums shared by the settings model and the
//! CLI (`LogLevel`, `SliceMode`, `SettingsKind`).

pub mod types;

pub use types::*;
