//! ## fission-telemetry::metrics
//! **Prometheus registry for simulation runs**

use fission_core::{GenerationRecord, Outcome};
use prometheus::{Counter, Gauge, Histogram, HistogramOpts, IntCounter, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub runs: IntCounter,
    pub capped_runs: IntCounter,
    pub generations: IntCounter,
    pub neutrons: Counter,
    pub peak_population: Gauge,
    pub generation_size: Histogram,
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let runs = IntCounter::new("fission_runs_total", "Completed simulation runs")?;
        let capped_runs = IntCounter::new(
            "fission_capped_runs_total",
            "Runs stopped by the generation cap",
        )?;
        let generations =
            IntCounter::new("fission_generations_total", "Generations recorded across runs")?;
        let neutrons = Counter::new(
            "fission_neutrons_total",
            "Neutrons that entered any generation",
        )?;
        let peak_population =
            Gauge::new("fission_peak_population", "Largest generation of the last run")?;
        let generation_size = Histogram::with_opts(
            HistogramOpts::new("fission_generation_size", "Neutrons per generation")
                .buckets(prometheus::exponential_buckets(1.0, 4.0, 12)?),
        )?;

        registry.register(Box::new(runs.clone()))?;
        registry.register(Box::new(capped_runs.clone()))?;
        registry.register(Box::new(generations.clone()))?;
        registry.register(Box::new(neutrons.clone()))?;
        registry.register(Box::new(peak_population.clone()))?;
        registry.register(Box::new(generation_size.clone()))?;

        Ok(Self {
            registry,
            runs,
            capped_runs,
            generations,
            neutrons,
            peak_population,
            generation_size,
        })
    }

    pub fn record_run(&self, record: &GenerationRecord) {
        self.runs.inc();
        if record.outcome() == Outcome::Capped {
            self.capped_runs.inc();
        }
        self.generations.inc_by(record.len() as u64);
        self.neutrons.inc_by(record.total_neutrons() as f64);
        self.peak_population.set(record.peak() as f64);
        for &count in record.iter() {
            self.generation_size.observe(count as f64);
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fission_core::{simulate, simulate_capped, ReactionModel};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_record_run_updates_registry() {
        let metrics = MetricsRecorder::new().unwrap();
        let model = ReactionModel::new(0.0, 0.0, 1.0, 2.0).unwrap();
        let record = simulate(40, &model, &mut SmallRng::seed_from_u64(2)).unwrap();

        metrics.record_run(&record);

        assert_eq!(metrics.runs.get(), 1);
        assert_eq!(metrics.capped_runs.get(), 0);
        assert_eq!(metrics.generations.get(), 1);
        assert_eq!(metrics.neutrons.get(), 40.0);
        assert_eq!(metrics.peak_population.get(), 40.0);
        assert_eq!(metrics.generation_size.get_sample_count(), 1);
    }

    #[test]
    fn test_capped_run_counted() {
        let metrics = MetricsRecorder::new().unwrap();
        let model = ReactionModel::new(0.0, 1.0, 0.0, 3.0).unwrap();
        let record = simulate_capped(5, &model, &mut SmallRng::seed_from_u64(2), 3).unwrap();

        metrics.record_run(&record);

        assert_eq!(metrics.capped_runs.get(), 1);
        assert_eq!(metrics.generations.get(), 3);
    }

    #[test]
    fn test_gather_metrics_text() {
        let metrics = MetricsRecorder::new().unwrap();
        metrics.runs.inc();
        let text = metrics.gather_metrics().unwrap();
        assert!(text.contains("fission_runs_total 1"));
        assert!(text.contains("fission_generation_size_bucket"));
    }
}
