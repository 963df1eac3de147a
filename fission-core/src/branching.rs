//! ## fission-core::branching
//! **Generation-by-generation chain reaction**
//!
//! A Galton–Watson process: every neutron in a generation is resolved
//! independently, fissions add a Poisson number of neutrons to the next
//! generation, and the run ends when a generation comes out empty.
//!
//! Supercritical models may never die out. [`simulate`] will keep going in
//! that case; use [`simulate_capped`] when runtime has to be bounded.

use rand::Rng;
use tracing::{debug, trace};

use crate::error::SimulationError;
use crate::model::{NeutronFate, ReactionModel, SimulationParameters};
use crate::record::{GenerationRecord, Outcome};

/// Runs until extinction.
///
/// Returns [`SimulationError::Configuration`] as soon as a draw lands outside
/// the interval covered by the model's probabilities.
pub fn simulate<R: Rng + ?Sized>(
    initial_population: u64,
    model: &ReactionModel,
    rng: &mut R,
) -> Result<GenerationRecord, SimulationError> {
    run(initial_population, model, rng, None)
}

/// Like [`simulate`], but records at most `max_generations` generations.
pub fn simulate_capped<R: Rng + ?Sized>(
    initial_population: u64,
    model: &ReactionModel,
    rng: &mut R,
    max_generations: usize,
) -> Result<GenerationRecord, SimulationError> {
    run(initial_population, model, rng, Some(max_generations))
}

/// Resolves every neutron of one generation and returns the size of the next.
pub fn next_generation<R: Rng + ?Sized>(
    population: u64,
    generation: usize,
    model: &ReactionModel,
    rng: &mut R,
) -> Result<u64, SimulationError> {
    let mut offspring: u64 = 0;
    for _ in 0..population {
        let draw = rng.random::<f64>();
        if model.classify(draw, generation)? == NeutronFate::Fission {
            offspring = offspring.saturating_add(model.offspring().sample(rng));
        }
    }
    Ok(offspring)
}

fn run<R: Rng + ?Sized>(
    initial_population: u64,
    model: &ReactionModel,
    rng: &mut R,
    cap: Option<usize>,
) -> Result<GenerationRecord, SimulationError> {
    let mut record = GenerationRecord::with_capacity(cap.unwrap_or(64).min(1024));
    let mut pending = initial_population;

    while pending > 0 {
        if cap.is_some_and(|max| record.len() >= max) {
            debug!(generations = record.len(), pending, "generation cap reached");
            return Ok(record.finish(Outcome::Capped));
        }

        let generation = record.len();
        record.push(pending);
        pending = next_generation(pending, generation, model, rng)?;
        trace!(generation, next = pending, "generation resolved");
    }

    debug!(
        generations = record.len(),
        peak = record.peak(),
        "chain reaction died out"
    );
    Ok(record.finish(Outcome::Extinct))
}

/// Owns a random stream and the run parameters, for callers that want a
/// single handle instead of threading the stream through by hand.
pub struct Simulator<R> {
    params: SimulationParameters,
    rng: R,
    max_generations: Option<usize>,
}

impl<R: Rng> Simulator<R> {
    pub fn new(params: SimulationParameters, rng: R) -> Self {
        Self {
            params,
            rng,
            max_generations: None,
        }
    }

    pub fn with_max_generations(mut self, max_generations: Option<usize>) -> Self {
        self.max_generations = max_generations;
        self
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Runs once. Calling again continues the same random stream.
    pub fn run(&mut self) -> Result<GenerationRecord, SimulationError> {
        run(
            self.params.initial_population,
            &self.params.model,
            &mut self.rng,
            self.max_generations,
        )
    }
}
