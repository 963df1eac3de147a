//! ## fission-core::model
//! **Per-neutron reaction model and run parameters**
//!
//! A neutron entering a generation meets one of three fates, picked by a
//! single uniform draw against the cumulative probabilities
//! `absorbed`, `absorbed + fission`, `absorbed + fission + escape`.
//!
//! The sum of the three probabilities is not checked here.
//! A model whose probabilities fall short of 1.0 is only detected when a
//! draw lands in the uncovered gap (see [`ReactionModel::classify`]).
//! Callers wanting an upfront check validate through `fission-config`.

use crate::error::SimulationError;
use crate::poisson::PoissonSampler;

pub const REFERENCE_INITIAL_POPULATION: u64 = 10_000;
pub const REFERENCE_ABSORBED: f64 = 0.3;
pub const REFERENCE_FISSION: f64 = 0.5;
pub const REFERENCE_ESCAPE: f64 = 0.2;
pub const REFERENCE_MEAN_OFFSPRING: f64 = 2.0;

/// Outcome of one neutron's trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeutronFate {
    Absorbed,
    Fission,
    Escaped,
}

/// Whether the expected population grows, holds or shrinks per generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    Subcritical,
    Critical,
    Supercritical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionModel {
    absorbed: f64,
    fission: f64,
    escape: f64,
    offspring: PoissonSampler,
}

impl ReactionModel {
    /// Builds a model, rejecting probabilities outside [0, 1] and a
    /// negative or non-finite mean offspring count.
    pub fn new(
        absorbed: f64,
        fission: f64,
        escape: f64,
        mean_offspring: f64,
    ) -> Result<Self, SimulationError> {
        for (name, value) in [
            ("absorbed", absorbed),
            ("fission", fission),
            ("escape", escape),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimulationError::InvalidParameter(format!(
                    "{name} probability must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(Self {
            absorbed,
            fission,
            escape,
            offspring: PoissonSampler::new(mean_offspring)?,
        })
    }

    /// 0.3 absorbed, 0.5 fission, 0.2 escape, two neutrons per fission.
    pub fn reference() -> Self {
        Self {
            absorbed: REFERENCE_ABSORBED,
            fission: REFERENCE_FISSION,
            escape: REFERENCE_ESCAPE,
            offspring: PoissonSampler::from_valid_mean(REFERENCE_MEAN_OFFSPRING),
        }
    }

    pub fn absorbed(&self) -> f64 {
        self.absorbed
    }

    pub fn fission(&self) -> f64 {
        self.fission
    }

    pub fn escape(&self) -> f64 {
        self.escape
    }

    pub fn mean_offspring(&self) -> f64 {
        self.offspring.mean()
    }

    pub fn offspring(&self) -> &PoissonSampler {
        &self.offspring
    }

    /// Upper edge of the interval covered by the three fates.
    pub fn cumulative_bound(&self) -> f64 {
        self.absorbed + self.fission + self.escape
    }

    /// Expected offspring per incoming neutron.
    pub fn multiplication_factor(&self) -> f64 {
        self.fission * self.offspring.mean()
    }

    pub fn criticality(&self) -> Criticality {
        let k = self.multiplication_factor();
        if (k - 1.0).abs() < f64::EPSILON {
            Criticality::Critical
        } else if k < 1.0 {
            Criticality::Subcritical
        } else {
            Criticality::Supercritical
        }
    }

    /// Maps a uniform draw onto a fate. `generation` only feeds the error.
    #[inline]
    pub fn classify(&self, draw: f64, generation: usize) -> Result<NeutronFate, SimulationError> {
        if draw < self.absorbed {
            Ok(NeutronFate::Absorbed)
        } else if draw < self.absorbed + self.fission {
            Ok(NeutronFate::Fission)
        } else if draw < self.cumulative_bound() {
            Ok(NeutronFate::Escaped)
        } else {
            Err(SimulationError::Configuration {
                draw,
                bound: self.cumulative_bound(),
                generation,
            })
        }
    }
}

impl Default for ReactionModel {
    fn default() -> Self {
        Self::reference()
    }
}

/// Everything a single run needs apart from the random stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    pub initial_population: u64,
    pub model: ReactionModel,
}

impl SimulationParameters {
    pub fn new(initial_population: u64, model: ReactionModel) -> Self {
        Self {
            initial_population,
            model,
        }
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self::new(REFERENCE_INITIAL_POPULATION, ReactionModel::reference())
    }
}
