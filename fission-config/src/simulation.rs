//! Chain-reaction parameters.
//!
//! Defaults reproduce the reference reactor: 10 000 starting neutrons,
//! 0.3 / 0.5 / 0.2 absorbed / fission / escape, two neutrons per fission.

use fission_core::model::{
    REFERENCE_ABSORBED, REFERENCE_ESCAPE, REFERENCE_FISSION, REFERENCE_INITIAL_POPULATION,
    REFERENCE_MEAN_OFFSPRING,
};
use fission_core::{ReactionModel, SimulationParameters};
use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;
use crate::ConfigError;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the run's random stream.
    pub seed: u64,

    /// Neutrons entering generation 0.
    #[validate(range(max = 1_000_000_000))]
    pub initial_population: u64,

    /// Optional hard stop for runs that refuse to die out.
    #[validate(range(min = 1))]
    pub max_generations: Option<usize>,

    #[validate(nested)]
    pub probabilities: ProbabilityConfig,

    /// Mean of the Poisson offspring count per fission.
    #[validate(range(min = 0.0, max = 20.0))]
    pub mean_offspring: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            initial_population: REFERENCE_INITIAL_POPULATION,
            max_generations: None,
            probabilities: ProbabilityConfig::default(),
            mean_offspring: REFERENCE_MEAN_OFFSPRING,
        }
    }
}

impl SimulationConfig {
    /// Builds the core run parameters.
    ///
    /// A triple accepted within tolerance but summing just short of 1.0 has
    /// its escape widened to close the gap, so [`ReactionModel::classify`]
    /// never rejects a draw mid-run.
    pub fn to_parameters(&self) -> Result<SimulationParameters, ConfigError> {
        let p = &self.probabilities;
        let escape = if p.absorbed + p.fission + p.escape < 1.0 {
            (1.0 - (p.absorbed + p.fission)).max(0.0)
        } else {
            p.escape
        };
        let model = ReactionModel::new(p.absorbed, p.fission, escape, self.mean_offspring)?;
        Ok(SimulationParameters::new(self.initial_population, model))
    }
}

/// Per-neutron fate probabilities. They must sum to 1.0.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
#[serde(default)]
#[validate(schema(function = validation::validate_probability_sum))]
pub struct ProbabilityConfig {
    #[validate(range(min = 0.0, max = 1.0))]
    pub absorbed: f64,

    #[validate(range(min = 0.0, max = 1.0))]
    pub fission: f64,

    #[validate(range(min = 0.0, max = 1.0))]
    pub escape: f64,
}

impl Default for ProbabilityConfig {
    fn default() -> Self {
        Self {
            absorbed: REFERENCE_ABSORBED,
            fission: REFERENCE_FISSION,
            escape: REFERENCE_ESCAPE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference() {
        let config = SimulationConfig::default();
        config.validate().expect("defaults should validate");
        let params = config.to_parameters().unwrap();
        assert_eq!(params, SimulationParameters::default());
    }

    #[test]
    fn test_short_probabilities_rejected_eagerly() {
        let mut config = SimulationConfig::default();
        config.probabilities.escape = 0.19;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_thirds_within_tolerance_cover_every_draw() {
        let mut config = SimulationConfig::default();
        config.probabilities = ProbabilityConfig {
            absorbed: 0.333333333,
            fission: 0.333333333,
            escape: 0.333333333,
        };
        config.validate().expect("sum is within tolerance");

        let model = config.to_parameters().unwrap().model;
        assert!(model.cumulative_bound() >= 1.0);
        assert!(model.escape() > 0.333333333);
        assert!(model.classify(0.9999999995, 0).is_ok());
        assert!(model.classify(1.0 - f64::EPSILON, 0).is_ok());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let mut config = SimulationConfig::default();
        config.mean_offspring = -1.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.max_generations = Some(0);
        assert!(config.validate().is_err());
    }
}
