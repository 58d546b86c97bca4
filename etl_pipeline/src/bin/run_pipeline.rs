use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use std::path::PathBuf;

use etl_pipeline::logging::init_file_logger;
use etl_pipeline::pipeline::{PipelineConfig, PipelineDriver, RunMode};

/// Run the configured extract-transform-load pipelines
#[derive(Debug, Parser)]
#[command(name = "run-pipeline", version, about)]
struct Cli {
    /// Pipeline configuration file (defaults to pipeline.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured run mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Override the configured log file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    OneShot,
    Loop,
}

impl From<ModeArg> for RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::OneShot => RunMode::OneShot,
            ModeArg::Loop => RunMode::Loop,
        }
    }
}

fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => PipelineConfig::from_default_location_or_default()
            .context("Failed to load pipeline.toml")?,
    };

    if let Some(mode) = cli.mode {
        config.schedule.mode = mode.into();
    }
    if let Some(log_file) = &cli.log_file {
        config.log_file = log_file.clone();
    }

    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_file_logger(&config.log_file, LevelFilter::Debug).context("Failed to setup logging")?;
    info!(
        "Starting {} pipeline(s) in {:?} mode",
        config.pipelines.len(),
        config.schedule.mode
    );

    // Pipeline failures only show up in the log; the exit status stays zero.
    PipelineDriver::new(config)
        .run()
        .context("Invalid pipeline configuration")?;

    Ok(())
}
