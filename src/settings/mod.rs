//! Typed settings for the characterization / reconstruction / matching
//! pipeline.
//!
//! - parameter groups (`groups`): Common, Descriptor, Optimizer, Loss
//! - settings bundles (`bundles`): Characterization, Reconstruction, Matching
//! - projection between any two settings types (`projection`)
//!
//! Every construction path other than `Default` goes through
//! [`Settings::validate`]: [`Settings::validated`], [`Settings::from_overrides`]
//! and [`select_subsettings`]. This module does no I/O.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::SettingsKind;

pub mod bundles;
pub mod error;
pub mod groups;
mod kind;
pub mod projection;

pub use bundles::*;
pub use error::*;
pub use groups::*;
pub use projection::*;

/// A settings type: a parameter group or a bundle of groups.
///
/// Composition is declared, not inferred: `COMPOSITION` lists the contributing
/// types in resolution order and `OWN_FIELDS` the fields this type declares
/// itself. When several contributors declare the same field name, the later
/// one wins, and a type's own declaration beats all contributors.
pub trait Settings: Default + Serialize + DeserializeOwned {
    const KIND: SettingsKind;
    const COMPOSITION: &'static [SettingsKind];
    const OWN_FIELDS: &'static [&'static str];

    /// Cross-field rules. Types without rules accept every value.
    fn validate(&self) -> ConfigurationResult<()> {
        Ok(())
    }

    /// Run [`Settings::validate`] on a value assembled by hand.
    fn validated(self) -> ConfigurationResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Flat name -> value view of every field.
    ///
    /// Only valid values have a view. In particular a non-finite float has no
    /// JSON form and would read back as `null`.
    fn to_field_map(&self) -> ConfigurationResult<FieldMap> {
        self.validate()?;
        let invalid = |message: String| ConfigurationError::InvalidValue {
            target: Self::KIND.display_name(),
            message,
        };
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(invalid(format!("expected a field map, serialized to {other}"))),
            Err(e) => Err(invalid(e.to_string())),
        }
    }

    /// Sorted names of every field this type carries.
    fn field_names() -> ConfigurationResult<Vec<String>> {
        let fields = Self::default().to_field_map()?;
        Ok(fields.into_iter().map(|(name, _)| name).collect())
    }

    /// The type whose declaration each field resolves to.
    fn field_owners() -> BTreeMap<String, SettingsKind> {
        let mut owners = BTreeMap::new();
        for contributor in Self::COMPOSITION {
            owners.extend(contributor.field_owners());
        }
        for name in Self::OWN_FIELDS {
            owners.insert((*name).to_string(), Self::KIND);
        }
        owners
    }

    /// Keyword-style construction: defaults overridden by `overrides`.
    ///
    /// Unlike projection, naming a field this type does not declare is an
    /// error.
    fn from_overrides(overrides: FieldMap) -> ConfigurationResult<Self> {
        let mut fields = Self::default().to_field_map()?;
        for (name, value) in overrides {
            let Some(slot) = fields.get_mut(&name) else {
                return Err(ConfigurationError::UnknownField {
                    target: Self::KIND.display_name(),
                    field: name,
                });
            };
            *slot = value;
        }
        Self::from_field_map(fields)
    }

    /// Build from a complete field view and validate.
    fn from_field_map(fields: FieldMap) -> ConfigurationResult<Self> {
        let value: Self = serde_json::from_value(Value::Object(fields)).map_err(|e| {
            ConfigurationError::InvalidValue {
                target: Self::KIND.display_name(),
                message: e.to_string(),
            }
        })?;
        value.validated()
    }
}
