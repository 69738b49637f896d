use std::time::Duration;

use laneiq_analysis::aggregate::AggregateError;
use laneiq_data::{HistoryError, UpstreamDataError};
use laneiq_training::TrainError;

/// Failures that end an analysis run with an `error` event.
///
/// Short or one-sided histories are not errors; they are recovered inside the pipeline and
/// reported through [`ModelStatus`](crate::ModelStatus).
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AnalysisError {
    #[display("upstream fetch failed: {_0}")]
    Upstream(UpstreamDataError),
    #[display("upstream fetch failed: {_0}")]
    InvalidHistory(HistoryError),
    #[display("no match data available")]
    #[from(ignore)]
    NoData,
    #[display("model could not be fit: {_0}")]
    ModelFit(TrainError),
    #[display("history could not be aggregated: {_0}")]
    Aggregate(AggregateError),
    #[display("analysis stalled: no event within {}s", timeout.as_secs_f32())]
    #[from(ignore)]
    Stalled { timeout: Duration },
    #[display("analysis worker stopped without a result")]
    #[from(ignore)]
    WorkerStopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_distinguish_failures() {
        let upstream = AnalysisError::from(UpstreamDataError::new("timeout after 30s"));
        assert_eq!(upstream.to_string(), "upstream fetch failed: timeout after 30s");
        assert_eq!(AnalysisError::NoData.to_string(), "no match data available");

        let fit = AnalysisError::from(TrainError::InvalidWeights);
        assert!(fit.to_string().starts_with("model could not be fit: "));

        let stalled = AnalysisError::Stalled {
            timeout: Duration::from_secs(2),
        };
        assert_eq!(stalled.to_string(), "analysis stalled: no event within 2s");
    }
}
