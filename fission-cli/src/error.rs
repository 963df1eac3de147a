use fission_config::ConfigError;
use fission_core::SimulationError;
use fission_render::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Chain reaction aborted: {0}")]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    #[error("Metrics error: {0}")]
    Metrics(String),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}
