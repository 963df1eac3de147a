//! ## fission-core::poisson
//! **Offspring-count sampling**
//!
//! Knuth's multiplication method: keep multiplying uniform draws until the
//! running product falls to `e^-λ`. Cost grows linearly with `λ`, which is
//! fine for the small fission means this crate deals with.

use rand::Rng;

use crate::error::SimulationError;

/// Poisson sampler with the `e^-λ` threshold precomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonSampler {
    mean: f64,
    limit: f64,
}

impl PoissonSampler {
    /// Creates a sampler for `Poisson(mean)`.
    ///
    /// Fails if `mean` is negative or not finite.
    pub fn new(mean: f64) -> Result<Self, SimulationError> {
        if !mean.is_finite() || mean < 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "poisson mean must be finite and non-negative, got {mean}"
            )));
        }
        Ok(Self::from_valid_mean(mean))
    }

    pub(crate) fn from_valid_mean(mean: f64) -> Self {
        Self {
            mean,
            limit: (-mean).exp(),
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Draws one sample, consuming at least one uniform value from `rng`.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let mut k: u64 = 0;
        let mut p = 1.0_f64;
        loop {
            k += 1;
            p *= rng.random::<f64>();
            if p <= self.limit {
                break;
            }
        }
        k - 1
    }
}

/// One-shot helper for callers that do not keep a sampler around.
pub fn sample_poisson<R: Rng + ?Sized>(mean: f64, rng: &mut R) -> Result<u64, SimulationError> {
    Ok(PoissonSampler::new(mean)?.sample(rng))
}
