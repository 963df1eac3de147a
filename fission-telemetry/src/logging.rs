//! ## fission-telemetry::logging
//! **Structured logging with `tracing`**
//!
//! `RUST_LOG` controls verbosity; `info` is the default. Set
//! `RUST_LOG=fission_core=trace` to see every generation resolve, or
//! `fission_render=debug` for the histogram geometry.

use fission_core::model::ReactionModel;
use fission_core::GenerationRecord;
use tracing::info_span;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber. Later calls are ignored.
    pub fn init() {
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
            .try_init();
    }

    /// Logs the parameters a run is about to use.
    pub fn log_start(seed: u64, initial_population: u64, model: &ReactionModel) {
        tracing::info!(
            seed,
            initial_population,
            absorbed = model.absorbed(),
            fission = model.fission(),
            escape = model.escape(),
            mean_offspring = model.mean_offspring(),
            k = model.multiplication_factor(),
            criticality = ?model.criticality(),
            "Starting chain reaction"
        );
    }

    /// Summarises a finished run.
    pub fn log_run(seed: u64, record: &GenerationRecord) {
        let span = info_span!("chain_reaction", seed);
        let _guard = span.enter();

        tracing::info!(
            generations = record.len(),
            peak = record.peak(),
            peak_generation = ?record.peak_generation(),
            total_neutrons = %record.total_neutrons(),
            outcome = ?record.outcome(),
            digest = %record.digest(),
            "Chain reaction finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fission_core::simulate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_logging() {
        let model = ReactionModel::new(1.0, 0.0, 0.0, 2.0).unwrap();
        let record = simulate(3, &model, &mut SmallRng::seed_from_u64(1)).unwrap();

        EventLogger::log_start(1, 3, &model);
        EventLogger::log_run(1, &record);

        assert!(logs_contain("Starting chain reaction"));
        assert!(logs_contain("Chain reaction finished"));
        assert!(logs_contain("generations=1"));
        assert!(logs_contain("Extinct"));
    }
}
