use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fission_config::FissionConfig;
use fission_core::model::Criticality;
use fission_core::{simulate, simulate_capped, GenerationRecord, Outcome};
use fission_render::{render_with_style, Color, HistogramStyle, SvgSurface};
use fission_telemetry::{EventLogger, MetricsRecorder};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, warn};
use validator::Validate;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "fission", version, about = "Neutron chain-reaction simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one chain reaction and print the neutrons per generation
    Simulate(SimulateArgs),
    /// Run one chain reaction and draw it as an SVG histogram
    Histogram(HistogramArgs),
}

/// Flags shared by every command that runs the simulator.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// YAML configuration file (defaults to config/fission.yaml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Seed for the random stream
    #[arg(long)]
    pub seed: Option<u64>,
    /// Neutrons entering generation 0
    #[arg(long)]
    pub initial: Option<u64>,
    /// Stop after this many generations even if neutrons remain
    #[arg(long)]
    pub max_generations: Option<usize>,
    /// Fail unless the run's digest equals this hex string
    #[arg(long)]
    pub validate_hash: Option<String>,
    /// Print Prometheus metrics for the run
    #[arg(long, default_value_t = false)]
    pub metrics: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug, Clone)]
pub struct HistogramArgs {
    #[command(flatten)]
    pub run: RunArgs,
    /// Surface width in pixels
    #[arg(long)]
    pub width: Option<u32>,
    /// Surface height in pixels
    #[arg(long)]
    pub height: Option<u32>,
    /// Write the SVG here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run_command(cli: Cli, out: &mut dyn Write) -> Result<(), CliError> {
    match cli.command {
        Commands::Simulate(args) => run_simulate(&args, out).map(|_| ()),
        Commands::Histogram(args) => run_histogram(&args, out).map(|_| ()),
    }
}

/// Loads configuration and folds command-line overrides into it.
fn resolve_config(args: &RunArgs) -> Result<FissionConfig, CliError> {
    let mut config = FissionConfig::resolve(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(initial) = args.initial {
        config.simulation.initial_population = initial;
    }
    if let Some(max) = args.max_generations {
        config.simulation.max_generations = Some(max);
    }
    config.validate().map_err(|e| CliError::Config(e.into()))?;
    Ok(config)
}

/// Runs the simulator once, logs the record and checks its digest.
fn execute(args: &RunArgs, config: &FissionConfig) -> Result<GenerationRecord, CliError> {
    let sim = &config.simulation;
    let params = sim.to_parameters()?;
    EventLogger::log_start(sim.seed, params.initial_population, &params.model);

    if sim.max_generations.is_none() && params.model.criticality() == Criticality::Supercritical {
        warn!(
            k = params.model.multiplication_factor(),
            "supercritical model without --max-generations may never terminate"
        );
    }

    let mut rng = SmallRng::seed_from_u64(sim.seed);
    let record = match sim.max_generations {
        Some(max) => simulate_capped(params.initial_population, &params.model, &mut rng, max)?,
        None => simulate(params.initial_population, &params.model, &mut rng)?,
    };
    EventLogger::log_run(sim.seed, &record);

    if let Some(expected) = &args.validate_hash {
        let actual = record.digest();
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(CliError::DigestMismatch {
                expected: expected.clone(),
                actual,
            });
        }
        info!("digest validated");
    }

    Ok(record)
}

/// Prometheus text exposition for a single run.
fn metrics_exposition(record: &GenerationRecord) -> Result<String, CliError> {
    let metrics = MetricsRecorder::new().map_err(|e| CliError::Metrics(e.to_string()))?;
    metrics.record_run(record);
    metrics
        .gather_metrics()
        .map_err(|e| CliError::Metrics(e.to_string()))
}

pub fn run_simulate(
    args: &SimulateArgs,
    out: &mut dyn Write,
) -> Result<GenerationRecord, CliError> {
    let config = resolve_config(&args.run)?;
    let record = execute(&args.run, &config)?;
    if args.run.metrics {
        out.write_all(metrics_exposition(&record)?.as_bytes())?;
    }

    writeln!(out, "generation\tneutrons")?;
    for (generation, count) in record.iter().enumerate() {
        writeln!(out, "{generation}\t{count}")?;
    }
    let outcome = match record.outcome() {
        Outcome::Extinct => "extinct",
        Outcome::Capped => "capped",
    };
    writeln!(
        out,
        "# generations={} peak={} total={} outcome={} digest={}",
        record.len(),
        record.peak(),
        record.total_neutrons(),
        outcome,
        record.digest()
    )?;
    Ok(record)
}

pub fn run_histogram(
    args: &HistogramArgs,
    out: &mut dyn Write,
) -> Result<GenerationRecord, CliError> {
    let mut config = resolve_config(&args.run)?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    config.validate().map_err(|e| CliError::Config(e.into()))?;

    let record = execute(&args.run, &config)?;

    let render = &config.render;
    let style = HistogramStyle {
        padding: render.padding,
        bar_color: render.bar_color.parse::<Color>()?,
        label_color: render.label_color.parse::<Color>()?,
    };
    let mut surface = SvgSurface::new(render.width, render.height);
    render_with_style(&mut surface, &record, render.width, render.height, &style);
    let svg = surface.finish();

    // Without `-o`, stdout carries only the SVG document.
    let metrics = if args.run.metrics {
        Some(metrics_exposition(&record)?)
    } else {
        None
    };
    match &args.output {
        Some(path) => {
            fs::write(path, svg)?;
            info!(path = %path.display(), "histogram written");
            if let Some(text) = metrics {
                out.write_all(text.as_bytes())?;
            }
        }
        None => {
            out.write_all(svg.as_bytes())?;
            if let Some(text) = metrics {
                std::io::stderr().write_all(text.as_bytes())?;
            }
        }
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn run_args(seed: u64, initial: u64) -> RunArgs {
        RunArgs {
            seed: Some(seed),
            initial: Some(initial),
            max_generations: Some(40),
            ..RunArgs::default()
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_histogram_flags() {
        let cli = Cli::try_parse_from([
            "fission", "histogram", "--seed", "3", "--width", "1024", "-o", "out.svg",
        ])
        .unwrap();
        match cli.command {
            Commands::Histogram(args) => {
                assert_eq!(args.run.seed, Some(3));
                assert_eq!(args.width, Some(1024));
                assert_eq!(args.output, Some(PathBuf::from("out.svg")));
            }
            Commands::Simulate(_) => panic!("parsed wrong subcommand"),
        }
    }

    #[test]
    fn test_simulate_prints_every_generation() {
        let args = SimulateArgs {
            run: run_args(42, 500),
        };
        let mut out = Vec::new();
        let record = run_simulate(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("generation\tneutrons\n0\t500\n"));
        assert_eq!(text.lines().count(), record.len() + 2);
        assert!(text.contains(&format!("digest={}", record.digest())));
    }

    #[test]
    fn test_validate_hash_round_trip() {
        let mut sink = Vec::new();
        let first = run_simulate(
            &SimulateArgs {
                run: run_args(9, 200),
            },
            &mut sink,
        )
        .unwrap();

        let mut args = SimulateArgs {
            run: run_args(9, 200),
        };
        args.run.validate_hash = Some(first.digest());
        assert!(run_simulate(&args, &mut Vec::new()).is_ok());

        args.run.validate_hash = Some("00".repeat(32));
        let err = run_simulate(&args, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::DigestMismatch { .. }));
    }

    #[test]
    fn test_histogram_to_stdout() {
        let args = HistogramArgs {
            run: run_args(1, 300),
            width: Some(400),
            height: Some(300),
            output: None,
        };
        let mut out = Vec::new();
        let record = run_histogram(&args, &mut out).unwrap();
        let svg = String::from_utf8(out).unwrap();

        assert!(svg.contains(r#"width="400" height="300""#));
        assert_eq!(svg.matches("fill=\"#0000ff\"").count(), record.len());
        assert!(svg.contains(">Generation<"));
        assert!(svg.contains(">Neutrons<"));
    }

    #[test]
    fn test_metrics_flag_prints_exposition() {
        let mut run = run_args(5, 100);
        run.metrics = true;
        let mut out = Vec::new();
        run_simulate(&SimulateArgs { run }, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("fission_runs_total 1"));
    }

    #[test]
    fn test_histogram_stdout_stays_svg_with_metrics() {
        let mut run = run_args(5, 100);
        run.metrics = true;
        let args = HistogramArgs {
            run,
            width: None,
            height: None,
            output: None,
        };
        let mut out = Vec::new();
        run_histogram(&args, &mut out).unwrap();
        let svg = String::from_utf8(out).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("fission_runs_total"));
    }

    #[test]
    fn test_histogram_file_output_keeps_metrics_on_stdout() {
        let path =
            std::env::temp_dir().join(format!("fission-metrics-{}.svg", std::process::id()));
        let mut run = run_args(5, 100);
        run.metrics = true;
        let args = HistogramArgs {
            run,
            width: None,
            height: None,
            output: Some(path.clone()),
        };
        let mut out = Vec::new();
        run_histogram(&args, &mut out).unwrap();
        let svg = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(String::from_utf8(out).unwrap().contains("fission_runs_total 1"));
    }

    #[test]
    fn test_padding_larger_than_surface_rejected() {
        let path =
            std::env::temp_dir().join(format!("fission-padding-{}.yaml", std::process::id()));
        fs::write(&path, "render:\n  padding: 50\n").unwrap();
        let mut run = run_args(1, 10);
        run.config = Some(path.clone());
        let args = HistogramArgs {
            run,
            width: Some(100),
            height: Some(100),
            output: None,
        };
        let result = run_histogram(&args, &mut Vec::new());
        fs::remove_file(&path).unwrap();

        match result.unwrap_err() {
            CliError::Config(err) => {
                assert!(err.to_string().contains("padding_exceeds_surface"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
