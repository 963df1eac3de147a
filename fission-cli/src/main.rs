//! ## fission-cli
//! **Command-line entry point**
//!
//! Runs the chain-reaction simulator once, then prints the generation
//! counts or draws them as an SVG histogram.
//!
//! Configuration errors, including reaction probabilities that do not
//! cover the unit interval, abort the process before anything is drawn.

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use fission_telemetry::EventLogger;

mod commands;
mod error;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    EventLogger::init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run_command(cli, &mut out).context("fission run failed")?;
    out.flush()?;
    Ok(())
}
