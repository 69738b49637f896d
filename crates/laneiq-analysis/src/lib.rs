//! History aggregation and comparison for match analysis.
//!
//! This crate works purely on [`FeatureVector`](laneiq_features::FeatureVector)s; it never
//! sees raw match records.
//!
//! # Overview
//!
//! - [`aggregate`]: recency-weighted [`BaselineProfile`](aggregate::BaselineProfile) and a
//!   lazy oldest-to-newest [`TrendSeries`](aggregate::TrendSeries) with a consistency score
//! - [`drivers`]: ranked win drivers and skill-focus gaps for the latest match, weighted by
//!   the model's feature importances
//! - [`insights`]: per-feature averages in wins versus losses
//! - [`playstyle`]: rule-based tags describing the player's last few matches
//!
//! # Examples
//!
//! ```
//! use laneiq_analysis::aggregate::{AggregateParams, aggregate};
//! use laneiq_data::RawMatchRecord;
//! use laneiq_features::FeatureSchema;
//!
//! let schema = FeatureSchema::standard();
//! let record = RawMatchRecord {
//!     match_id: "EUW1_1".into(),
//!     game_duration_secs: 1500,
//!     ..RawMatchRecord::default()
//! };
//! let vectors = vec![schema.extract(&record, None)];
//! let (baseline, trend) = aggregate(&schema, &vectors, &[true], &AggregateParams::default())?;
//! assert_eq!(baseline.match_count, 1);
//! assert_eq!(trend.iter().count(), 1);
//! # Ok::<(), laneiq_analysis::aggregate::AggregateError>(())
//! ```

pub mod aggregate;
pub mod drivers;
pub mod insights;
pub mod playstyle;
