//! Command-line entry point
//!
//! ```text
//! gait-events <config.json> [output-dir]
//! ```
//!
//! Loads the recording named by `input.path`, runs the pipeline, writes one
//! `.tsv` report per stream plus `summary.json` into `output-dir` (default
//! `.`), and prints the summary. Set `RUST_LOG` to adjust logging.

use anyhow::{anyhow, Context};
use gait_events::{load_recording, run, summary_json, write_reports, Error, PipelineConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(config_path) = args.next() else {
        eprintln!("usage: gait-events <config.json> [output-dir]");
        return Ok(ExitCode::from(2));
    };
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let config = PipelineConfig::from_path(&config_path)
        .with_context(|| format!("failed to read configuration {config_path}"))?;
    config.validate().context("invalid configuration")?;

    let input = config
        .input
        .path
        .clone()
        .ok_or_else(|| anyhow!("configuration has no `input.path`"))?;

    let recording = match load_recording(&input, &config.input) {
        Ok(recording) => recording,
        Err(err @ Error::SourceUnavailable { .. }) => {
            eprintln!("{err}");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err).context("failed to load recording"),
    };
    info!(samples = recording.len(), "recording loaded");

    let output = run(&config, &recording)?;
    let written = write_reports(&output_dir, &output)
        .with_context(|| format!("failed to write reports to {}", output_dir.display()))?;
    info!(files = written.len(), "done");

    println!("{}", serde_json::to_string_pretty(&summary_json(&output)?)?);
    Ok(ExitCode::SUCCESS)
}
