//! End-to-end match analysis.
//!
//! Ties the feature extractor, aggregator, model trainer and driver analyzer together into
//! a single run over one player's match history, streaming progress as
//! [`AnalysisEvent`]s and finishing with an [`AnalysisResult`] or an [`AnalysisError`].
//!
//! # Examples
//!
//! ```
//! use laneiq_data::{MatchHistory, RawMatchRecord};
//! use laneiq_pipeline::{AnalysisConfig, AnalysisEvent, ModelStatus, spawn_analysis};
//!
//! let history = MatchHistory {
//!     matches: vec![RawMatchRecord {
//!         match_id: "EUW1_1".into(),
//!         game_duration_secs: 1800,
//!         win: true,
//!         ..RawMatchRecord::default()
//!     }],
//!     timelines: vec![],
//! };
//! let events = spawn_analysis(history, AnalysisConfig::default()).collect::<Vec<_>>();
//! let Some(AnalysisEvent::Result { data }) = events.last() else {
//!     panic!("expected a result event");
//! };
//! assert_eq!(data.model_status, ModelStatus::InsufficientHistory);
//! assert_eq!(data.win_probability, 1.0);
//! ```

pub use self::{
    config::AnalysisConfig,
    error::AnalysisError,
    pipeline::{AnalysisStream, analyze, spawn_analysis},
    progress::{AnalysisEvent, ProgressReporter},
    result::{AnalysisResult, AnalysisStatus, CategoryImportance, FeatureImportance, ModelStatus},
};

pub mod config;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod result;
