//! Settings bundles: one per pipeline stage.
//!
//! A bundle embeds its parameter groups (flattened, so the field view stays
//! flat) followed by its own fields. The field view is assembled in
//! declaration order and a later writer replaces an earlier one, so a field a
//! bundle redeclares always resolves to the bundle's own default. See
//! [`Settings::field_owners`] for the resolved owner of every field.
//!
//! Resolution orders:
//!
//! | bundle | order |
//! |---|---|
//! | Characterization | Common, Descriptor, own |
//! | Reconstruction | Common, Optimizer, Loss, Descriptor, own |
//! | Matching | Characterization, Reconstruction, own |

use serde::{Deserialize, Serialize};

use crate::domain::SettingsKind;
use crate::settings::error::ConfigurationResult;
use crate::settings::groups::{
    CommonSettings, DescriptorSettings, LossSettings, OptimizerSettings, require_finite,
};
use crate::settings::Settings;

/// Settings for computing descriptors of one or more microstructures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterizationSettings {
    #[serde(flatten)]
    pub common: CommonSettings,
    #[serde(flatten)]
    pub descriptor: DescriptorSettings,
    /// Microstructures to characterize.
    pub microstructure_filenames: Option<Vec<String>>,
    pub use_multiphase: bool,
}

impl Default for CharacterizationSettings {
    fn default() -> Self {
        Self {
            common: CommonSettings::default(),
            descriptor: DescriptorSettings::default(),
            microstructure_filenames: None,
            use_multiphase: true,
        }
    }
}

impl Settings for CharacterizationSettings {
    const KIND: SettingsKind = SettingsKind::Characterization;
    const COMPOSITION: &'static [SettingsKind] = &[SettingsKind::Common, SettingsKind::Descriptor];
    const OWN_FIELDS: &'static [&'static str] = &["microstructure_filenames", "use_multiphase"];

    fn validate(&self) -> ConfigurationResult<()> {
        self.common.validate()?;
        self.descriptor.validate()
    }
}

/// Fields every reconstruction run declares on top of its groups.
///
/// Shared by [`ReconstructionSettings`] and [`MatchingSettings`]. Excludes
/// `use_multiphase`, which each bundle declares itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionParams {
    /// Descriptor file the reconstruction is matched against.
    pub descriptor_filename: Option<String>,
    pub max_iter: u32,
    /// Iterations between convergence records.
    pub convergence_data_steps: u32,
    /// Iterations between intermediate structure dumps; `None` disables them.
    pub outfile_data_steps: Option<u32>,
    pub tolerance: f64,
    pub use_multigrid_reconstruction: bool,
    pub greedy: bool,
    pub batch_size: f64,
    pub profile: bool,
    /// Function-value tolerance handed to the optimizer.
    pub ftol: f64,
}

impl Default for ReconstructionParams {
    fn default() -> Self {
        Self {
            descriptor_filename: None,
            max_iter: 500,
            convergence_data_steps: 50,
            outfile_data_steps: None,
            tolerance: 1e-12,
            use_multigrid_reconstruction: false,
            greedy: false,
            batch_size: 1.0,
            profile: false,
            ftol: 0.0,
        }
    }
}

impl ReconstructionParams {
    /// Float checks on behalf of the bundle embedding these fields.
    fn validate(&self, target: SettingsKind) -> ConfigurationResult<()> {
        require_finite(
            target,
            [
                ("tolerance", self.tolerance),
                ("batch_size", self.batch_size),
                ("ftol", self.ftol),
            ],
        )
    }
}

/// Settings for reconstructing a microstructure from its descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionSettings {
    #[serde(flatten)]
    pub common: CommonSettings,
    #[serde(flatten)]
    pub optimizer: OptimizerSettings,
    #[serde(flatten)]
    pub loss: LossSettings,
    #[serde(flatten)]
    pub descriptor: DescriptorSettings,
    #[serde(flatten)]
    pub reconstruction: ReconstructionParams,
    pub use_multiphase: bool,
}

impl Default for ReconstructionSettings {
    fn default() -> Self {
        Self {
            common: CommonSettings::default(),
            optimizer: OptimizerSettings::default(),
            loss: LossSettings::default(),
            descriptor: DescriptorSettings::default(),
            reconstruction: ReconstructionParams::default(),
            use_multiphase: false,
        }
    }
}

impl Settings for ReconstructionSettings {
    const KIND: SettingsKind = SettingsKind::Reconstruction;
    const COMPOSITION: &'static [SettingsKind] = &[
        SettingsKind::Common,
        SettingsKind::Optimizer,
        SettingsKind::Loss,
        SettingsKind::Descriptor,
    ];
    const OWN_FIELDS: &'static [&'static str] = &[
        "descriptor_filename",
        "max_iter",
        "convergence_data_steps",
        "outfile_data_steps",
        "tolerance",
        "use_multigrid_reconstruction",
        "use_multiphase",
        "greedy",
        "batch_size",
        "profile",
        "ftol",
    ];

    fn validate(&self) -> ConfigurationResult<()> {
        self.common.validate()?;
        self.optimizer.validate()?;
        self.loss.validate()?;
        self.descriptor.validate()?;
        self.reconstruction.validate(Self::KIND)
    }
}

/// Settings for matching: characterize an original, then reconstruct from it.
///
/// Carries the full union of [`CharacterizationSettings`] and
/// [`ReconstructionSettings`]. Both declare `use_multiphase` with different
/// defaults; Matching redeclares it, so its own default (`false`) wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    #[serde(flatten)]
    pub common: CommonSettings,
    #[serde(flatten)]
    pub descriptor: DescriptorSettings,
    pub microstructure_filenames: Option<Vec<String>>,
    #[serde(flatten)]
    pub optimizer: OptimizerSettings,
    #[serde(flatten)]
    pub loss: LossSettings,
    #[serde(flatten)]
    pub reconstruction: ReconstructionParams,
    /// Extrude a 2D original into this many slices for a 3D reconstruction.
    pub add_dimension: Option<u32>,
    pub use_multiphase: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            common: CommonSettings::default(),
            descriptor: DescriptorSettings::default(),
            microstructure_filenames: None,
            optimizer: OptimizerSettings::default(),
            loss: LossSettings::default(),
            reconstruction: ReconstructionParams::default(),
            add_dimension: None,
            use_multiphase: false,
        }
    }
}

impl Settings for MatchingSettings {
    const KIND: SettingsKind = SettingsKind::Matching;
    const COMPOSITION: &'static [SettingsKind] =
        &[SettingsKind::Characterization, SettingsKind::Reconstruction];
    const OWN_FIELDS: &'static [&'static str] = &["add_dimension", "use_multiphase"];

    fn validate(&self) -> ConfigurationResult<()> {
        self.common.validate()?;
        self.descriptor.validate()?;
        self.optimizer.validate()?;
        self.loss.validate()?;
        self.reconstruction.validate(Self::KIND)
    }
}

impl MatchingSettings {
    /// The characterization stage of this matching run.
    pub fn characterization(&self) -> ConfigurationResult<CharacterizationSettings> {
        crate::settings::select_subsettings(self)
    }

    /// The reconstruction stage of this matching run.
    pub fn reconstruction(&self) -> ConfigurationResult<ReconstructionSettings> {
        crate::settings::select_subsettings(self)
    }
}
