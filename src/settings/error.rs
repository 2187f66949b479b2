//! The single error kind of the settings model.

use thiserror::Error;

/// A constraint among a settings value's fields does not hold.
///
/// Raised synchronously by every construction path: `Settings::validated`,
/// `Settings::from_overrides` and `select_subsettings`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Gram-matrix descriptors are computed on CNN feature maps, which need a
    /// minimum spatial extent.
    #[error("{descriptor} requires limit_to >= {minimum} due to CNN architecture, got {limit_to}")]
    CnnLimit {
        descriptor: String,
        limit_to: u32,
        minimum: u32,
    },

    /// Keyword construction named a field the type does not declare.
    #[error("{target} settings have no field '{field}'")]
    UnknownField {
        target: &'static str,
        field: String,
    },

    /// A float field holds NaN or an infinity. Such values have no JSON form
    /// and cannot pass through a field view.
    #[error("{target} field '{field}' must be finite, got {value}")]
    NonFinite {
        target: &'static str,
        field: &'static str,
        value: f64,
    },

    /// A supplied value cannot populate the declared field type.
    #[error("invalid value for {target}: {message}")]
    InvalidValue {
        target: &'static str,
        message: String,
    },
}

pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
