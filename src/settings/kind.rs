//! Runtime dispatch from a [`SettingsKind`] to its settings type.

use std::collections::BTreeMap;

use crate::domain::SettingsKind;
use crate::settings::error::ConfigurationResult;
use crate::settings::projection::{FieldMap, SettingsView, select_subsettings, undeclared_fields};
use crate::settings::{
    CharacterizationSettings, CommonSettings, DescriptorSettings, LossSettings, MatchingSettings,
    OptimizerSettings, ReconstructionSettings, Settings,
};

fn project_as<T: Settings>(source: &dyn SettingsView) -> ConfigurationResult<FieldMap> {
    select_subsettings::<T, _>(source)?.to_field_map()
}

impl SettingsKind {
    /// Contributing types in resolution order.
    pub fn composition(self) -> &'static [SettingsKind] {
        match self {
            SettingsKind::Common => CommonSettings::COMPOSITION,
            SettingsKind::Descriptor => DescriptorSettings::COMPOSITION,
            SettingsKind::Optimizer => OptimizerSettings::COMPOSITION,
            SettingsKind::Loss => LossSettings::COMPOSITION,
            SettingsKind::Characterization => CharacterizationSettings::COMPOSITION,
            SettingsKind::Reconstruction => ReconstructionSettings::COMPOSITION,
            SettingsKind::Matching => MatchingSettings::COMPOSITION,
        }
    }

    pub fn field_owners(self) -> BTreeMap<String, SettingsKind> {
        match self {
            SettingsKind::Common => CommonSettings::field_owners(),
            SettingsKind::Descriptor => DescriptorSettings::field_owners(),
            SettingsKind::Optimizer => OptimizerSettings::field_owners(),
            SettingsKind::Loss => LossSettings::field_owners(),
            SettingsKind::Characterization => CharacterizationSettings::field_owners(),
            SettingsKind::Reconstruction => ReconstructionSettings::field_owners(),
            SettingsKind::Matching => MatchingSettings::field_owners(),
        }
    }

    /// Field view of the all-defaults value.
    pub fn defaults(self) -> ConfigurationResult<FieldMap> {
        match self {
            SettingsKind::Common => CommonSettings::default().to_field_map(),
            SettingsKind::Descriptor => DescriptorSettings::default().to_field_map(),
            SettingsKind::Optimizer => OptimizerSettings::default().to_field_map(),
            SettingsKind::Loss => LossSettings::default().to_field_map(),
            SettingsKind::Characterization => CharacterizationSettings::default().to_field_map(),
            SettingsKind::Reconstruction => ReconstructionSettings::default().to_field_map(),
            SettingsKind::Matching => MatchingSettings::default().to_field_map(),
        }
    }

    /// Project `source` onto this kind and return the validated field view.
    pub fn project(self, source: &dyn SettingsView) -> ConfigurationResult<FieldMap> {
        match self {
            SettingsKind::Common => project_as::<CommonSettings>(source),
            SettingsKind::Descriptor => project_as::<DescriptorSettings>(source),
            SettingsKind::Optimizer => project_as::<OptimizerSettings>(source),
            SettingsKind::Loss => project_as::<LossSettings>(source),
            SettingsKind::Characterization => project_as::<CharacterizationSettings>(source),
            SettingsKind::Reconstruction => project_as::<ReconstructionSettings>(source),
            SettingsKind::Matching => project_as::<MatchingSettings>(source),
        }
    }

    /// Source fields a projection onto this kind would drop.
    pub fn undeclared_fields(self, source: &dyn SettingsView) -> ConfigurationResult<Vec<String>> {
        match self {
            SettingsKind::Common => undeclared_fields::<CommonSettings, _>(source),
            SettingsKind::Descriptor => undeclared_fields::<DescriptorSettings, _>(source),
            SettingsKind::Optimizer => undeclared_fields::<OptimizerSettings, _>(source),
            SettingsKind::Loss => undeclared_fields::<LossSettings, _>(source),
            SettingsKind::Characterization => undeclared_fields::<CharacterizationSettings, _>(source),
            SettingsKind::Reconstruction => undeclared_fields::<ReconstructionSettings, _>(source),
            SettingsKind::Matching => undeclared_fields::<MatchingSettings, _>(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_kind_has_defaults_and_owners_for_the_same_fields() {
        for kind in SettingsKind::ALL {
            let defaults: Vec<String> = kind.defaults().unwrap().keys().cloned().collect();
            let owners: Vec<String> = kind.field_owners().into_keys().collect();
            assert_eq!(defaults, owners, "{kind:?}");
        }
    }

    #[test]
    fn groups_do_not_overlap() {
        let groups = [
            SettingsKind::Common,
            SettingsKind::Descriptor,
            SettingsKind::Optimizer,
            SettingsKind::Loss,
        ];
        let mut seen = std::collections::BTreeSet::new();
        for kind in groups {
            assert!(kind.composition().is_empty());
            for name in kind.defaults().unwrap().keys() {
                assert!(seen.insert(name.clone()), "{name} declared twice");
            }
        }
    }

    #[test]
    fn project_by_kind_matches_typed_projection() {
        let mut source = FieldMap::new();
        source.insert("max_iter".into(), json!(10));
        source.insert("unrelated_field".into(), json!(1));

        let fields = SettingsKind::Reconstruction.project(&source).unwrap();
        let typed: ReconstructionSettings = select_subsettings(&source).unwrap();
        assert_eq!(fields, typed.to_field_map().unwrap());
        assert_eq!(
            SettingsKind::Reconstruction.undeclared_fields(&source).unwrap(),
            vec!["unrelated_field".to_string()]
        );
    }
}
