//! Parameter groups: the leaves every settings bundle is composed from.
//!
//! Each group is a flat, independently defaulted record for one concern.
//! Groups never overlap in field names, so they can be merged into bundles
//! without collisions between groups.

use serde::{Deserialize, Serialize};

use crate::domain::{LogLevel, SettingsKind, SliceMode};
use crate::settings::error::{ConfigurationError, ConfigurationResult};
use crate::settings::Settings;

/// Descriptor kinds evaluated on CNN feature maps.
pub const CNN_DESCRIPTORS: [&str; 2] = ["GramMatrices", "OrientationGramMatrices"];

/// Smallest `limit_to` the CNN feature extractor accepts.
pub const CNN_MIN_LIMIT: u32 = 16;

/// Fail on the first NaN or infinite value among `values`.
pub(crate) fn require_finite(
    target: SettingsKind,
    values: impl IntoIterator<Item = (&'static str, f64)>,
) -> ConfigurationResult<()> {
    match values.into_iter().find(|(_, value)| !value.is_finite()) {
        Some((field, value)) => Err(ConfigurationError::NonFinite {
            target: target.display_name(),
            field,
            value,
        }),
        None => Ok(()),
    }
}

/// Paths and logging controls shared by every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonSettings {
    /// Folder input data is read from.
    pub data_folder: Option<String>,
    /// Folder results and logs are written to.
    pub target_folder: Option<String>,
    /// Free-text note stored alongside the run.
    pub information: Option<String>,
    /// Log file name, without extension.
    pub logfile_name: String,
    pub logging_level: LogLevel,
    /// Append a timestamp to the log file name.
    pub logfile_date: bool,
}

impl Default for CommonSettings {
    fn default() -> Self {
        Self {
            data_folder: None,
            target_folder: None,
            information: None,
            logfile_name: "logfile".to_string(),
            logging_level: LogLevel::Info,
            logfile_date: false,
        }
    }
}

impl Settings for CommonSettings {
    const KIND: SettingsKind = SettingsKind::Common;
    const COMPOSITION: &'static [SettingsKind] = &[];
    const OWN_FIELDS: &'static [&'static str] = &[
        "data_folder",
        "target_folder",
        "information",
        "logfile_name",
        "logging_level",
        "logfile_date",
    ];
}

/// How microstructure descriptors are computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorSettings {
    /// Names of the descriptor plugins to evaluate.
    pub descriptor_types: Vec<String>,
    pub slice_mode: SliceMode,
    /// Nonlinearity applied to the soft indicator function.
    pub nl_method: String,
    /// Descriptor cutoff (e.g. maximum correlation distance in pixels).
    pub limit_to: u32,
    /// Steepness of the differentiable thresholding.
    pub threshold_steepness: f64,
    pub grey_values: bool,
    pub use_multigrid_descriptor: bool,
    pub isotropic: bool,
    pub periodic: bool,
    /// Pretrained CNN weights used by the Gram-matrix descriptors.
    pub gram_weights_filename: String,
    /// Symmetry group specifier, if the structure has one.
    pub symmetry: Option<String>,
}

impl Default for DescriptorSettings {
    fn default() -> Self {
        Self {
            descriptor_types: vec!["Correlations".to_string()],
            slice_mode: SliceMode::Average,
            nl_method: "relu".to_string(),
            limit_to: 16,
            threshold_steepness: 10.0,
            grey_values: false,
            use_multigrid_descriptor: true,
            isotropic: false,
            periodic: true,
            gram_weights_filename: "vgg19_normalized.pkl".to_string(),
            symmetry: None,
        }
    }
}

impl DescriptorSettings {
    /// The first requested descriptor that runs on CNN feature maps, if any.
    pub fn cnn_descriptor(&self) -> Option<&str> {
        self.descriptor_types
            .iter()
            .map(String::as_str)
            .find(|name| CNN_DESCRIPTORS.contains(name))
    }
}

impl Settings for DescriptorSettings {
    const KIND: SettingsKind = SettingsKind::Descriptor;
    const COMPOSITION: &'static [SettingsKind] = &[];
    const OWN_FIELDS: &'static [&'static str] = &[
        "descriptor_types",
        "slice_mode",
        "nl_method",
        "limit_to",
        "threshold_steepness",
        "grey_values",
        "use_multigrid_descriptor",
        "isotropic",
        "periodic",
        "gram_weights_filename",
        "symmetry",
    ];

    fn validate(&self) -> ConfigurationResult<()> {
        if let Some(descriptor) = self.cnn_descriptor() {
            if self.limit_to < CNN_MIN_LIMIT {
                return Err(ConfigurationError::CnnLimit {
                    descriptor: descriptor.to_string(),
                    limit_to: self.limit_to,
                    minimum: CNN_MIN_LIMIT,
                });
            }
        }
        require_finite(Self::KIND, [("threshold_steepness", self.threshold_steepness)])
    }
}

/// Tuning of the optimization algorithm.
///
/// Gradient-based optimizers read the learning rate and moment coefficients;
/// the stochastic (annealing) optimizers read the temperature schedule,
/// mutation rule and acceptance distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerSettings {
    pub optimizer_type: String,
    pub learning_rate: f64,
    pub beta_1: f64,
    pub beta_2: f64,
    /// Decay rate (Adadelta / RMSprop).
    pub rho: f64,
    pub momentum: f64,
    pub initial_temperature: f64,
    /// `None` lets the annealer pick its own final temperature.
    pub final_temperature: Option<f64>,
    pub cooldown_factor: f64,
    pub mutation_rule: String,
    pub acceptance_distribution: String,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            optimizer_type: "LBFGSB".to_string(),
            learning_rate: 0.01,
            beta_1: 0.9,
            beta_2: 0.999,
            rho: 0.95,
            momentum: 0.0,
            initial_temperature: 0.0001,
            final_temperature: None,
            cooldown_factor: 0.9,
            mutation_rule: "relaxed_neighbor".to_string(),
            acceptance_distribution: "zero_tolerance".to_string(),
        }
    }
}

impl Settings for OptimizerSettings {
    const KIND: SettingsKind = SettingsKind::Optimizer;
    const COMPOSITION: &'static [SettingsKind] = &[];
    const OWN_FIELDS: &'static [&'static str] = &[
        "optimizer_type",
        "learning_rate",
        "beta_1",
        "beta_2",
        "rho",
        "momentum",
        "initial_temperature",
        "final_temperature",
        "cooldown_factor",
        "mutation_rule",
        "acceptance_distribution",
    ];

    fn validate(&self) -> ConfigurationResult<()> {
        let rates = [
            ("learning_rate", self.learning_rate),
            ("beta_1", self.beta_1),
            ("beta_2", self.beta_2),
            ("rho", self.rho),
            ("momentum", self.momentum),
            ("initial_temperature", self.initial_temperature),
            ("cooldown_factor", self.cooldown_factor),
        ];
        let final_temperature = self.final_temperature.map(|t| ("final_temperature", t));
        require_finite(Self::KIND, rates.into_iter().chain(final_temperature))
    }
}

/// Objective-function tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossSettings {
    pub loss_type: String,
    /// One weight per descriptor; `None` weights all descriptors equally.
    pub descriptor_weights: Option<Vec<f64>>,
    /// Penalty for values outside the admissible range.
    pub oor_multiplier: f64,
    /// Penalty for phase indicators not summing to one.
    pub phase_sum_multiplier: f64,
}

impl Default for LossSettings {
    fn default() -> Self {
        Self {
            loss_type: "MSE".to_string(),
            descriptor_weights: None,
            oor_multiplier: 1000.0,
            phase_sum_multiplier: 1000.0,
        }
    }
}

impl Settings for LossSettings {
    const KIND: SettingsKind = SettingsKind::Loss;
    const COMPOSITION: &'static [SettingsKind] = &[];
    const OWN_FIELDS: &'static [&'static str] = &[
        "loss_type",
        "descriptor_weights",
        "oor_multiplier",
        "phase_sum_multiplier",
    ];

    fn validate(&self) -> ConfigurationResult<()> {
        let weights = self
            .descriptor_weights
            .iter()
            .flatten()
            .map(|w| ("descriptor_weights", *w));
        let multipliers = [
            ("oor_multiplier", self.oor_multiplier),
            ("phase_sum_multiplier", self.phase_sum_multiplier),
        ];
        require_finite(Self::KIND, weights.chain(multipliers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(types: &[&str], limit_to: u32) -> DescriptorSettings {
        DescriptorSettings {
            descriptor_types: types.iter().map(|s| s.to_string()).collect(),
            limit_to,
            ..DescriptorSettings::default()
        }
    }

    #[test]
    fn common_defaults() {
        let c = CommonSettings::default();
        assert_eq!(c.data_folder, None);
        assert_eq!(c.target_folder, None);
        assert_eq!(c.information, None);
        assert_eq!(c.logfile_name, "logfile");
        assert_eq!(c.logging_level, LogLevel::Info);
        assert!(!c.logfile_date);
    }

    #[test]
    fn descriptor_defaults() {
        let d = DescriptorSettings::default();
        assert_eq!(d.descriptor_types, vec!["Correlations".to_string()]);
        assert_eq!(d.slice_mode, SliceMode::Average);
        assert_eq!(d.nl_method, "relu");
        assert_eq!(d.limit_to, 16);
        assert_eq!(d.threshold_steepness, 10.0);
        assert!(!d.grey_values);
        assert!(d.use_multigrid_descriptor);
        assert!(!d.isotropic);
        assert!(d.periodic);
        assert_eq!(d.gram_weights_filename, "vgg19_normalized.pkl");
        assert_eq!(d.symmetry, None);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn optimizer_defaults() {
        let o = OptimizerSettings::default();
        assert_eq!(o.optimizer_type, "LBFGSB");
        assert_eq!(o.learning_rate, 0.01);
        assert_eq!(o.beta_1, 0.9);
        assert_eq!(o.beta_2, 0.999);
        assert_eq!(o.rho, 0.95);
        assert_eq!(o.momentum, 0.0);
        assert_eq!(o.initial_temperature, 0.0001);
        assert_eq!(o.final_temperature, None);
        assert_eq!(o.cooldown_factor, 0.9);
        assert_eq!(o.mutation_rule, "relaxed_neighbor");
        assert_eq!(o.acceptance_distribution, "zero_tolerance");
    }

    #[test]
    fn loss_defaults() {
        let l = LossSettings::default();
        assert_eq!(l.loss_type, "MSE");
        assert_eq!(l.descriptor_weights, None);
        assert_eq!(l.oor_multiplier, 1000.0);
        assert_eq!(l.phase_sum_multiplier, 1000.0);
    }

    #[test]
    fn gram_matrices_reject_small_limit() {
        let err = descriptor(&["GramMatrices"], 8).validated().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::CnnLimit {
                descriptor: "GramMatrices".to_string(),
                limit_to: 8,
                minimum: 16,
            }
        );
    }

    #[test]
    fn orientation_gram_matrices_reject_small_limit() {
        let d = descriptor(&["Correlations", "OrientationGramMatrices"], 15);
        assert!(matches!(
            d.validate(),
            Err(ConfigurationError::CnnLimit { ref descriptor, .. }) if descriptor == "OrientationGramMatrices"
        ));
    }

    #[test]
    fn gram_matrices_accept_limit_at_or_above_minimum() {
        assert!(descriptor(&["GramMatrices"], 16).validate().is_ok());
        assert!(descriptor(&["GramMatrices"], 64).validate().is_ok());
    }

    #[test]
    fn non_cnn_descriptors_ignore_limit() {
        assert!(descriptor(&["Correlations"], 1).validate().is_ok());
        assert!(descriptor(&["VolumeFractions", "Variation"], 0).validate().is_ok());
        assert!(descriptor(&[], 0).validate().is_ok());
    }

    #[test]
    fn float_fields_must_be_finite() {
        let d = DescriptorSettings {
            threshold_steepness: f64::INFINITY,
            ..DescriptorSettings::default()
        };
        assert!(matches!(
            d.validate(),
            Err(ConfigurationError::NonFinite { target: "Descriptor", field: "threshold_steepness", .. })
        ));

        let o = OptimizerSettings {
            final_temperature: Some(f64::NAN),
            ..OptimizerSettings::default()
        };
        assert!(matches!(
            o.validate(),
            Err(ConfigurationError::NonFinite { field: "final_temperature", .. })
        ));

        let l = LossSettings {
            oor_multiplier: f64::NEG_INFINITY,
            ..LossSettings::default()
        };
        assert!(matches!(
            l.validated(),
            Err(ConfigurationError::NonFinite { target: "Loss", field: "oor_multiplier", .. })
        ));

        assert!(OptimizerSettings::default().validate().is_ok());
        assert!(LossSettings::default().validate().is_ok());
    }
}
