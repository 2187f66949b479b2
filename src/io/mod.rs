//! Input/output helpers.
//!
//! - settings JSON read/write (`settings_file`)

pub mod settings_file;

pub use settings_file::*;
