use std::collections::{BTreeMap, HashSet};

use laneiq_data::{RawMatchRecord, RawTimelineRecord};
use serde::{Deserialize, Serialize};

use crate::{
    context::MatchContext,
    source::{
        BoxedMatchFeatureSource, FeatureCategory, MatchFeatureSource, all_match_feature_sources,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SchemaError {
    #[display("duplicate feature id '{id}'")]
    DuplicateId { id: String },
    #[display("feature schema is empty")]
    Empty,
}

/// Ordered, fixed set of features extracted from every match.
///
/// Every [`FeatureVector`] produced by a schema holds exactly one value per feature, in
/// schema order, so vectors from the same schema always share the same key set.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    sources: Vec<BoxedMatchFeatureSource>,
}

impl FeatureSchema {
    /// Builds a schema from the given sources.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or two sources share an id.
    pub fn new(sources: Vec<BoxedMatchFeatureSource>) -> Result<Self, SchemaError> {
        if sources.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut seen = HashSet::new();
        for source in &sources {
            if !seen.insert(source.id().to_owned()) {
                return Err(SchemaError::DuplicateId {
                    id: source.id().to_owned(),
                });
            }
        }
        Ok(Self { sources })
    }

    /// The standard modelling schema of [`all_match_feature_sources()`].
    #[must_use]
    pub fn standard() -> Self {
        Self {
            sources: all_match_feature_sources(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    #[must_use]
    pub fn sources(&self) -> &[BoxedMatchFeatureSource] {
        &self.sources
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.sources.iter().map(|s| s.id())
    }

    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sources.iter().position(|s| s.id() == id)
    }

    #[must_use]
    pub fn category_of(&self, index: usize) -> FeatureCategory {
        self.sources[index].category()
    }

    /// Extracts the feature vector of the subject player.
    ///
    /// Never fails: missing inputs map to `0.0`. When a timeline-dependent feature could
    /// not be computed the vector is flagged with `timeline_complete = false`.
    #[must_use]
    pub fn extract(
        &self,
        record: &RawMatchRecord,
        timeline: Option<&RawTimelineRecord>,
    ) -> FeatureVector {
        let ctx = MatchContext::new(record, timeline);
        let mut timeline_complete = true;
        let values = self
            .sources
            .iter()
            .map(|source| match source.extract(&ctx) {
                Some(value) if value.is_finite() => value,
                Some(_) => 0.0,
                None => {
                    timeline_complete = false;
                    0.0
                }
            })
            .collect();
        FeatureVector {
            match_id: record.match_id.clone(),
            values,
            timeline_complete,
        }
    }

    /// Extracts the feature vector of the opposing laner in the same match.
    ///
    /// Returns `None` when the record has no opponent stat block.
    #[must_use]
    pub fn extract_opponent(
        &self,
        record: &RawMatchRecord,
        timeline: Option<&RawTimelineRecord>,
    ) -> Option<FeatureVector> {
        let mirrored = record.mirrored()?;
        let timeline = timeline.map(RawTimelineRecord::mirrored);
        Some(self.extract(&mirrored, timeline.as_ref()))
    }
}

/// Feature values of one match, aligned with the [`FeatureSchema`] that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub match_id: String,
    pub values: Vec<f32>,
    /// `false` when a timeline-dependent feature fell back to its default
    pub timeline_complete: bool,
}

impl FeatureVector {
    #[must_use]
    pub fn get(&self, index: usize) -> f32 {
        self.values[index]
    }

    /// Values keyed by feature id.
    #[must_use]
    pub fn to_map(&self, schema: &FeatureSchema) -> BTreeMap<String, f32> {
        schema
            .ids()
            .map(str::to_owned)
            .zip(self.values.iter().copied())
            .collect()
    }
}
