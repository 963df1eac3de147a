use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// A per-neutron draw landed past the cumulative probability bound,
    /// meaning absorbed + fission + escape does not cover [0, 1).
    #[error(
        "Configuration error: draw {draw} fell outside [0, {bound}) in generation {generation}; \
         reaction probabilities must sum to 1.0"
    )]
    Configuration {
        draw: f64,
        bound: f64,
        generation: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
