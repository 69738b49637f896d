use crate::history::MatchHistory;

/// Failure reported by the external data-fetch collaborator.
///
/// The analysis core never retries; this error ends the run.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{message}")]
pub struct UpstreamDataError {
    #[error(not(source))]
    pub message: String,
}

impl UpstreamDataError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Anything that can deliver a completed match history to the pipeline.
pub trait MatchHistorySource: Send {
    /// Loads the full history, newest match first.
    ///
    /// # Errors
    ///
    /// Returns an error when the history could not be fetched or decoded.
    fn load(&self) -> Result<MatchHistory, UpstreamDataError>;
}

impl MatchHistorySource for MatchHistory {
    fn load(&self) -> Result<MatchHistory, UpstreamDataError> {
        Ok(self.clone())
    }
}

impl<F> MatchHistorySource for F
where
    F: Fn() -> Result<MatchHistory, UpstreamDataError> + Send,
{
    fn load(&self) -> Result<MatchHistory, UpstreamDataError> {
        self()
    }
}
