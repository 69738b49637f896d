//! Feature extraction for match analysis.
//!
//! This crate turns one [`RawMatchRecord`](laneiq_data::RawMatchRecord) (plus its optional
//! timeline) into a [`FeatureVector`]: a fixed-length list of numeric features that measure
//! *how* the player played, not whether the match was won.
//!
//! # Feature Sources
//!
//! Each feature is a type implementing [`MatchFeatureSource`]. Sources are grouped into
//! five [`FeatureCategory`] values:
//!
//! - **Combat**: kill participation, damage per minute, skillshot hit and dodge rates,
//!   combat efficiency, aggression score
//! - **Economy**: gold/XP/CS per minute, early CS, maximum CS and level leads, gold and XP
//!   leads at 10 and 14 minutes
//! - **Vision**: vision score and ward rates, control wards, vision advantage, control ward
//!   coverage, vision dominance
//! - **Objectives**: turret plates, forward positioning, time in enemy territory and the
//!   enemy jungle, river control
//! - **Communication**: ping habits
//!
//! Stats that follow from winning (kills, deaths, structure and epic-monster takedowns) are
//! deliberately absent; see [`display::PROXY_STAT_IDS`]. They are only available as
//! [`DisplayStats`].
//!
//! # Extraction
//!
//! [`FeatureSchema::extract()`] is pure and infallible. Missing inputs map to `0.0`. When a
//! timeline-dependent feature cannot be computed, the vector is flagged with
//! `timeline_complete = false`.
//!
//! ```
//! use laneiq_data::RawMatchRecord;
//! use laneiq_features::FeatureSchema;
//!
//! let schema = FeatureSchema::standard();
//! let record = RawMatchRecord {
//!     match_id: "EUW1_1".into(),
//!     game_duration_secs: 1800,
//!     ..RawMatchRecord::default()
//! };
//! let vector = schema.extract(&record, None);
//! assert_eq!(vector.values.len(), schema.len());
//! assert!(!vector.timeline_complete);
//! ```

pub use self::{
    context::MatchContext,
    display::DisplayStats,
    schema::{FeatureSchema, FeatureVector, SchemaError},
    series::{SeriesPoint, TimelineSeries},
    source::{
        BoxedMatchFeatureSource, ComparisonBasis, FeatureCategory, MatchFeatureSource,
        all_match_feature_sources,
    },
    territory::TerritoryMetrics,
};

pub mod context;
pub mod display;
pub mod schema;
pub mod series;
pub mod source;
pub mod territory;
