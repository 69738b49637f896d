use std::{path::PathBuf, time::Duration};

use laneiq_pipeline::{AnalysisEvent, spawn_analysis};

use crate::util::{JsonFileSource, Output, load_config};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Match history JSON file (newest match first)
    #[arg(long)]
    input: PathBuf,
    /// TOML file overriding the default analysis parameters
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file path for the NDJSON event stream
    #[arg(long)]
    output: Option<PathBuf>,
    /// Seed for the random forest
    #[arg(long)]
    seed: Option<u64>,
    /// Give up when no event arrives for this many seconds
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let AnalyzeArg {
        input,
        config,
        output,
        seed,
        timeout_secs,
    } = arg;

    let mut config = load_config(config.as_deref())?;
    if let Some(seed) = seed {
        config.forest.seed = *seed;
    }
    let mut output = Output::create(output.as_deref())?;
    let timeout = Duration::from_secs(*timeout_secs);

    tracing::info!(input = %input.display(), seed = config.forest.seed, "starting analysis");
    let mut stream = spawn_analysis(JsonFileSource::new(input.clone()), config);
    let mut failed = false;
    while let Some(event) = stream.recv_timeout(timeout) {
        if let AnalysisEvent::Error { message } = &event {
            tracing::error!(%message, "analysis failed");
            failed = true;
        }
        output.write_line(&event)?;
    }

    if failed {
        anyhow::bail!("analysis did not produce a result");
    }
    Ok(())
}
