//! Reporting utilities: formatted terminal output for settings.

pub mod format;

pub use format::*;
