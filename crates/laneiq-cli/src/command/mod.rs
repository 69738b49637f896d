use clap::{Parser, Subcommand};

use self::{analyze::AnalyzeArg, features::FeaturesArg, schema::SchemaArg};

mod analyze;
mod features;
mod schema;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Analyze a match history and stream NDJSON progress and result events
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Extract feature vectors for every match in a history
    Features(#[clap(flatten)] FeaturesArg),
    /// List the features used by the model
    Schema(#[clap(flatten)] SchemaArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Features(arg) => features::run(&arg)?,
        Mode::Schema(arg) => schema::run(&arg)?,
    }
    Ok(())
}
