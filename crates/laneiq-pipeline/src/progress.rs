//! Progress events streamed to the consumer of an analysis run.
//!
//! Every run emits a sequence of `progress` events with non-decreasing percentages,
//! followed by exactly one terminal `result` or `error` event. Serialized one per line, the
//! events form the NDJSON stream:
//!
//! ```text
//! {"type":"progress","message":"Loading match history","percent":5}
//! {"type":"progress","message":"Extracted features for match 1/20","percent":22}
//! ...
//! {"type":"result","data":{...}}
//! ```
//!
//! # Milestones
//!
//! | Stage                         | Percent     |
//! |-------------------------------|-------------|
//! | ingestion                     | 5           |
//! | feature extraction, per match | 20 → 60     |
//! | aggregation and model fit     | 70          |
//! | driver derivation             | 90          |
//! | done                          | 100         |

use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::{AnalysisError, AnalysisResult};

pub const INGESTION: u8 = 5;
pub const EXTRACTION_START: u8 = 20;
pub const EXTRACTION_END: u8 = 60;
pub const MODELING: u8 = 70;
pub const DRIVERS: u8 = 90;
pub const DONE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisEvent {
    Progress { message: String, percent: u8 },
    Result { data: Box<AnalysisResult> },
    Error { message: String },
}

impl AnalysisEvent {
    /// Whether this event ends the stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }
}

/// Single-writer sender of [`AnalysisEvent`]s.
///
/// Once the receiving side hangs up, every further event is dropped silently. The
/// terminal event is sent by [`finish`](Self::finish), which consumes the reporter.
#[derive(Debug)]
pub struct ProgressReporter {
    tx: Option<mpsc::Sender<AnalysisEvent>>,
    percent: u8,
}

impl ProgressReporter {
    #[must_use]
    pub fn new(tx: mpsc::Sender<AnalysisEvent>) -> Self {
        Self {
            tx: Some(tx),
            percent: 0,
        }
    }

    /// A reporter that discards every event.
    #[must_use]
    pub fn detached() -> Self {
        Self { tx: None, percent: 0 }
    }

    /// Last percentage reported.
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Reports progress. A percentage below the last one is raised to it.
    pub fn progress(&mut self, message: impl Into<String>, percent: u8) {
        self.percent = percent.clamp(self.percent, DONE);
        let event = AnalysisEvent::Progress {
            message: message.into(),
            percent: self.percent,
        };
        self.send(event);
    }

    /// Reports that `done` of `total` matches have been through feature extraction.
    pub fn extraction(&mut self, done: usize, total: usize) {
        let span = usize::from(EXTRACTION_END - EXTRACTION_START);
        let offset = if total == 0 {
            span
        } else {
            span * done.min(total) / total
        };
        let percent = EXTRACTION_START
            + u8::try_from(offset).unwrap_or(EXTRACTION_END - EXTRACTION_START);
        self.progress(format!("Extracted features for match {done}/{total}"), percent);
    }

    /// Sends the terminal event for `outcome`.
    pub fn finish(mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        let event = match outcome {
            Ok(result) => AnalysisEvent::Result {
                data: Box::new(result),
            },
            Err(err) => AnalysisEvent::Error {
                message: err.to_string(),
            },
        };
        self.send(event);
    }

    fn send(&mut self, event: AnalysisEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(event).is_err() {
            tracing::debug!("progress receiver hung up, dropping further events");
            self.tx = None;
        }
    }
}
