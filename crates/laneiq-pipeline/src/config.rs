//! Tunable parameters of one analysis run.

use laneiq_analysis::{aggregate::AggregateParams, drivers::DriverParams};
use laneiq_training::forest::ForestParams;
use serde::{Deserialize, Serialize};

/// Every section falls back to its defaults when omitted.
///
/// ```
/// use laneiq_pipeline::AnalysisConfig;
///
/// let config: AnalysisConfig = serde_json::from_str(r#"{"forest": {"seed": 7}}"#)?;
/// assert_eq!(config.forest.seed, 7);
/// assert_eq!(config.forest.n_trees, 100);
/// assert_eq!(config.drivers.top_n, 5);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub aggregate: AggregateParams,
    pub forest: ForestParams,
    pub drivers: DriverParams,
}
