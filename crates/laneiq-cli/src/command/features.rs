use std::{collections::BTreeMap, path::PathBuf};

use laneiq_data::MatchHistory;
use laneiq_features::FeatureSchema;
use serde::Serialize;

use crate::util::{Output, read_json_file};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct FeaturesArg {
    /// Match history JSON file (newest match first)
    #[arg(long)]
    input: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct MatchFeatures {
    match_id: String,
    win: bool,
    timeline_complete: bool,
    features: BTreeMap<String, f32>,
}

pub(crate) fn run(arg: &FeaturesArg) -> anyhow::Result<()> {
    let FeaturesArg { input, output } = arg;

    let history: MatchHistory = read_json_file("match history", input)?;
    let entries = history.entries()?;
    let schema = FeatureSchema::standard();
    let rows = entries
        .iter()
        .map(|entry| {
            let vector = schema.extract(entry.record, entry.timeline);
            MatchFeatures {
                features: vector.to_map(&schema),
                timeline_complete: vector.timeline_complete,
                win: entry.record.win,
                match_id: vector.match_id,
            }
        })
        .collect::<Vec<_>>();
    tracing::info!(matches = rows.len(), features = schema.len(), "extracted features");

    Output::create(output.as_deref())?.write_pretty(&rows)
}
