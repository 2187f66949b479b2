//! Projection of one settings value onto another settings type.
//!
//! The source only has to expose a flat name -> value view of its fields
//! ([`SettingsView`]). Every settings type does, and so does a plain
//! [`FieldMap`], which is how parsed input enters the model.

use crate::settings::Settings;
use crate::settings::error::ConfigurationResult;

/// Flat field view: field name -> value, sorted by name.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

/// Anything that exposes a stable enumeration of `(name, value)` pairs.
pub trait SettingsView {
    fn field_map(&self) -> ConfigurationResult<FieldMap>;
}

impl<T: Settings> SettingsView for T {
    fn field_map(&self) -> ConfigurationResult<FieldMap> {
        self.to_field_map()
    }
}

impl SettingsView for FieldMap {
    fn field_map(&self) -> ConfigurationResult<FieldMap> {
        Ok(self.clone())
    }
}

/// Build a `T` from the fields of `source`.
///
/// Every field `T` declares is taken from `source` when present there and
/// left at `T`'s default otherwise. Fields only `source` carries are dropped.
/// `T`'s validation runs on the result even if `source` was already valid.
pub fn select_subsettings<T, S>(source: &S) -> ConfigurationResult<T>
where
    T: Settings,
    S: SettingsView + ?Sized,
{
    let source = source.field_map()?;
    let mut fields = T::default().to_field_map()?;

    for (name, slot) in fields.iter_mut() {
        if let Some(value) = source.get(name) {
            *slot = value.clone();
        }
    }

    let dropped: Vec<&str> = source
        .keys()
        .filter(|name| !fields.contains_key(*name))
        .map(String::as_str)
        .collect();
    if !dropped.is_empty() {
        tracing::debug!(
            target_kind = T::KIND.display_name(),
            dropped = ?dropped,
            "fields not declared by target were dropped"
        );
    }

    T::from_field_map(fields)
}

/// Source fields that `T` does not declare and a projection would drop.
pub fn undeclared_fields<T, S>(source: &S) -> ConfigurationResult<Vec<String>>
where
    T: Settings,
    S: SettingsView + ?Sized,
{
    let declared = T::default().to_field_map()?;
    Ok(source
        .field_map()?
        .into_iter()
        .map(|(name, _)| name)
        .filter(|name| !declared.contains_key(name))
        .collect())
}
