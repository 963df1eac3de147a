//! # fission-core
//!
//! Toy neutron chain-reaction model: a branching process where every
//! neutron is absorbed, escapes, or fissions into a Poisson-distributed
//! number of new neutrons.
//!
//! ### Key Submodules:
//! - `model`: reaction probabilities, fates and run parameters
//! - `poisson`: Knuth offspring sampler
//! - `branching`: the generation loop (`simulate`, `simulate_capped`)
//! - `record`: frozen per-generation counts handed to renderers
//!
//! Randomness is always passed in by the caller. Seed a
//! `rand::rngs::SmallRng` to make a run reproducible.

pub mod branching;
pub mod error;
pub mod model;
pub mod poisson;
pub mod record;

pub use branching::{simulate, simulate_capped, Simulator};
pub use error::SimulationError;
pub use model::{ReactionModel, SimulationParameters};
pub use record::{GenerationRecord, Outcome};
