use std::path::PathBuf;

use laneiq_features::{ComparisonBasis, FeatureCategory, FeatureSchema, MatchFeatureSource as _};
use serde::Serialize;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SchemaArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FeatureInfo<'a> {
    id: &'a str,
    name: &'a str,
    category: FeatureCategory,
    basis: ComparisonBasis,
    requires_timeline: bool,
}

pub(crate) fn run(arg: &SchemaArg) -> anyhow::Result<()> {
    let schema = FeatureSchema::standard();
    let features = schema
        .sources()
        .iter()
        .map(|source| FeatureInfo {
            id: source.id(),
            name: source.name(),
            category: source.category(),
            basis: source.basis(),
            requires_timeline: source.requires_timeline(),
        })
        .collect::<Vec<_>>();
    Output::create(arg.output.as_deref())?.write_pretty(&features)
}
