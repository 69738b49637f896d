//! Recency-weighted baselines and longitudinal trend series.
//!
//! # Recency Weights
//!
//! Matches are weighted by their position in the newest-first history:
//!
//! ```text
//! index:   0     1   2   3   4     5   6  ...
//! weight:  4.0   2.0 2.0 2.0 2.0   1.0 1.0 ...
//! ```
//!
//! The same schedule drives the baseline and the model's sample weights, so the model and
//! the baseline agree on what "recent form" means.
//!
//! # Consistency Score
//!
//! Each trend point carries a consistency score for gold income over the trailing window
//! (default 5 matches, the point itself included):
//!
//! ```text
//! consistency = clamp(100 - CV(gold_per_minute) × scale, 0, 100)
//! ```
//!
//! With the default scale of 200, a coefficient of variation of 0.5 or more scores 0.

use std::collections::BTreeMap;

use laneiq_features::{FeatureSchema, FeatureVector};
use laneiq_stats::{descriptive::DescriptiveStats, weighted::WeightedStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum AggregateError {
    #[display("cannot aggregate an empty match history")]
    EmptyHistory,
    #[display("{vectors} feature vectors but {labels} labels")]
    LengthMismatch { vectors: usize, labels: usize },
    #[display("recency weights must be positive and non-increasing from newest to oldest")]
    InvalidWeights,
    #[display("consistency window must be at least 1")]
    InvalidWindow,
    #[display("consistency scale must be finite and non-negative, got {scale}")]
    InvalidScale { scale: f32 },
}

/// Step-down recency schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecencyWeights {
    /// Weight of the most recent match
    pub newest: f32,
    /// Weight of the next `recent_span` matches
    pub recent: f32,
    pub recent_span: usize,
    /// Weight of every older match
    pub older: f32,
}

impl Default for RecencyWeights {
    fn default() -> Self {
        Self {
            newest: 4.0,
            recent: 2.0,
            recent_span: 4,
            older: 1.0,
        }
    }
}

impl RecencyWeights {
    /// Checks that weights are finite, positive and non-increasing with age.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::InvalidWeights`] otherwise.
    pub fn validate(&self) -> Result<(), AggregateError> {
        let finite = [self.newest, self.recent, self.older]
            .iter()
            .all(|w| w.is_finite() && *w > 0.0);
        if finite && self.newest >= self.recent && self.recent >= self.older {
            Ok(())
        } else {
            Err(AggregateError::InvalidWeights)
        }
    }

    /// Weight of the match at `index` in newest-first order.
    #[must_use]
    pub fn weight(&self, index: usize) -> f32 {
        match index {
            0 => self.newest,
            i if i <= self.recent_span => self.recent,
            _ => self.older,
        }
    }

    /// Weights for a newest-first history of `len` matches.
    #[must_use]
    pub fn weights(&self, len: usize) -> Vec<f32> {
        (0..len).map(|i| self.weight(i)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateParams {
    pub recency: RecencyWeights,
    /// Trailing window for the consistency score, in matches
    pub consistency_window: usize,
    /// Multiplier applied to the coefficient of variation
    pub consistency_scale: f32,
}

impl Default for AggregateParams {
    fn default() -> Self {
        Self {
            recency: RecencyWeights::default(),
            consistency_window: 5,
            consistency_scale: 200.0,
        }
    }
}

impl AggregateParams {
    /// Checks the recency weights, the consistency window and the consistency scale.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), AggregateError> {
        self.recency.validate()?;
        if self.consistency_window == 0 {
            return Err(AggregateError::InvalidWindow);
        }
        if !self.consistency_scale.is_finite() || self.consistency_scale < 0.0 {
            return Err(AggregateError::InvalidScale {
                scale: self.consistency_scale,
            });
        }
        Ok(())
    }
}

/// Recency-weighted mean and variance of one feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureBaseline {
    pub mean: f32,
    pub variance: f32,
}

/// Recency-weighted profile of every feature over the history, aligned with the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineProfile {
    pub features: Vec<FeatureBaseline>,
    pub match_count: usize,
}

impl BaselineProfile {
    #[must_use]
    pub fn mean(&self, index: usize) -> f32 {
        self.features[index].mean
    }

    #[must_use]
    pub fn means(&self) -> Vec<f32> {
        self.features.iter().map(|f| f.mean).collect()
    }

    /// Means keyed by feature id.
    #[must_use]
    pub fn to_map(&self, schema: &FeatureSchema) -> BTreeMap<String, f32> {
        schema
            .ids()
            .map(str::to_owned)
            .zip(self.features.iter().map(|f| f.mean))
            .collect()
    }
}

/// Builds the baseline profile and trend series of a newest-first history.
///
/// `labels[i]` is the outcome of `vectors[i]`.
///
/// # Errors
///
/// Returns an error if the history is empty, the label count does not match, or the
/// parameters are invalid.
pub fn aggregate<'a>(
    schema: &FeatureSchema,
    vectors: &'a [FeatureVector],
    labels: &'a [bool],
    params: &AggregateParams,
) -> Result<(BaselineProfile, TrendSeries<'a>), AggregateError> {
    if vectors.is_empty() {
        return Err(AggregateError::EmptyHistory);
    }
    if vectors.len() != labels.len() {
        return Err(AggregateError::LengthMismatch {
            vectors: vectors.len(),
            labels: labels.len(),
        });
    }
    params.validate()?;

    let baseline = baseline(schema, vectors, &params.recency);
    let trend = TrendSeries::new(schema, vectors, labels, params);
    tracing::debug!(
        matches = vectors.len(),
        features = schema.len(),
        "aggregated history"
    );
    Ok((baseline, trend))
}

fn baseline(
    schema: &FeatureSchema,
    vectors: &[FeatureVector],
    recency: &RecencyWeights,
) -> BaselineProfile {
    let weights = recency.weights(vectors.len());
    let features = (0..schema.len())
        .map(|index| {
            let pairs = vectors
                .iter()
                .zip(&weights)
                .map(|(vector, &w)| (vector.get(index), w));
            // weights are validated positive, so the total is never zero
            WeightedStats::new(pairs).map_or(
                FeatureBaseline {
                    mean: 0.0,
                    variance: 0.0,
                },
                |stats| FeatureBaseline {
                    mean: stats.mean,
                    variance: stats.variance,
                },
            )
        })
        .collect();
    BaselineProfile {
        features,
        match_count: vectors.len(),
    }
}

/// Feature ids summarised in every trend point.
const TREND_FEATURES: [&str; 7] = [
    "gold_per_minute",
    "damage_per_minute",
    "vision_score_per_minute",
    "kill_participation",
    "aggression_score",
    "vision_dominance",
    "combat_efficiency",
];

/// One match in the trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub match_id: String,
    pub win: bool,
    pub gold_per_minute: f32,
    pub damage_per_minute: f32,
    pub vision_score_per_minute: f32,
    pub kill_participation: f32,
    pub aggression_score: f32,
    pub vision_dominance: f32,
    pub combat_efficiency: f32,
    /// Gold-income consistency over the trailing window, in `[0, 100]`
    pub consistency_score: f32,
}

/// Lazy, restartable per-match summary in oldest-to-newest order.
///
/// Points are computed on iteration; calling [`iter()`](Self::iter) again starts over.
#[derive(Debug, Clone)]
pub struct TrendSeries<'a> {
    vectors: &'a [FeatureVector],
    labels: &'a [bool],
    indices: [Option<usize>; 7],
    window: usize,
    scale: f32,
}

impl<'a> TrendSeries<'a> {
    fn new(
        schema: &FeatureSchema,
        vectors: &'a [FeatureVector],
        labels: &'a [bool],
        params: &AggregateParams,
    ) -> Self {
        Self {
            vectors,
            labels,
            indices: TREND_FEATURES.map(|id| schema.index_of(id)),
            window: params.consistency_window,
            scale: params.consistency_scale,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    #[must_use]
    pub fn iter(&self) -> TrendIter<'_, 'a> {
        TrendIter {
            series: self,
            position: 0,
        }
    }

    /// Value of the `slot`-th trend feature for the match at chronological `position`.
    fn value(&self, position: usize, slot: usize) -> f32 {
        let vector = &self.vectors[self.vectors.len() - 1 - position];
        self.indices[slot].map_or(0.0, |index| vector.get(index))
    }

    fn point(&self, position: usize) -> TrendPoint {
        let newest_first = self.vectors.len() - 1 - position;
        let start = (position + 1).saturating_sub(self.window);
        let window = (start..=position).map(|p| self.value(p, 0));
        let cv = DescriptiveStats::new(window).map_or(0.0, |s| s.coefficient_of_variation);
        let consistency = if cv.is_finite() {
            (100.0 - cv * self.scale).clamp(0.0, 100.0)
        } else {
            0.0
        };

        let v = |slot| self.value(position, slot);
        TrendPoint {
            match_id: self.vectors[newest_first].match_id.clone(),
            win: self.labels[newest_first],
            gold_per_minute: v(0),
            damage_per_minute: v(1),
            vision_score_per_minute: v(2),
            kill_participation: v(3),
            aggression_score: v(4),
            vision_dominance: v(5),
            combat_efficiency: v(6),
            consistency_score: consistency,
        }
    }
}

impl<'s, 'a> IntoIterator for &'s TrendSeries<'a> {
    type Item = TrendPoint;
    type IntoIter = TrendIter<'s, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct TrendIter<'s, 'a> {
    series: &'s TrendSeries<'a>,
    position: usize,
}

impl Iterator for TrendIter<'_, '_> {
    type Item = TrendPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.series.len() {
            return None;
        }
        let point = self.series.point(self.position);
        self.position += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.series.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TrendIter<'_, '_> {}

#[cfg(test)]
mod tests {
    use laneiq_features::{
        BoxedMatchFeatureSource,
        source::{DamagePerMinute, GoldPerMinute},
    };

    use super::*;

    fn schema() -> FeatureSchema {
        let sources: Vec<BoxedMatchFeatureSource> =
            vec![Box::new(GoldPerMinute), Box::new(DamagePerMinute)];
        FeatureSchema::new(sources).unwrap()
    }

    fn vector(id: &str, gpm: f32, dpm: f32) -> FeatureVector {
        FeatureVector {
            match_id: id.into(),
            values: vec![gpm, dpm],
            timeline_complete: true,
        }
    }

    #[test]
    fn test_recency_schedule() {
        let weights = RecencyWeights::default().weights(7);
        assert_eq!(weights, vec![4.0, 2.0, 2.0, 2.0, 2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_increasing_weights_are_rejected() {
        let weights = RecencyWeights {
            newest: 1.0,
            recent: 2.0,
            ..RecencyWeights::default()
        };
        assert_eq!(weights.validate(), Err(AggregateError::InvalidWeights));
    }

    #[test]
    fn test_invalid_consistency_params_are_rejected() {
        let vectors = [vector("a", 400.0, 0.0)];
        let nan_scale = AggregateParams {
            consistency_scale: f32::NAN,
            ..AggregateParams::default()
        };
        assert!(matches!(
            nan_scale.validate(),
            Err(AggregateError::InvalidScale { .. })
        ));
        assert!(matches!(
            aggregate(&schema(), &vectors, &[true], &nan_scale),
            Err(AggregateError::InvalidScale { .. })
        ));

        let negative_scale = AggregateParams {
            consistency_scale: -1.0,
            ..AggregateParams::default()
        };
        assert!(negative_scale.validate().is_err());

        let empty_window = AggregateParams {
            consistency_window: 0,
            ..AggregateParams::default()
        };
        assert_eq!(empty_window.validate(), Err(AggregateError::InvalidWindow));
        assert!(AggregateParams::default().validate().is_ok());
    }

    #[test]
    fn test_empty_history_is_rejected() {
        let err = aggregate(&schema(), &[], &[], &AggregateParams::default()).unwrap_err();
        assert_eq!(err, AggregateError::EmptyHistory);
    }

    #[test]
    fn test_label_count_must_match() {
        let vectors = [vector("a", 1.0, 1.0)];
        let err =
            aggregate(&schema(), &vectors, &[], &AggregateParams::default()).unwrap_err();
        assert!(matches!(err, AggregateError::LengthMismatch { .. }));
    }

    #[test]
    fn test_single_match_baseline_equals_vector() {
        let vectors = [vector("a", 420.0, 800.0)];
        let (baseline, trend) =
            aggregate(&schema(), &vectors, &[true], &AggregateParams::default()).unwrap();
        assert_eq!(baseline.means(), vec![420.0, 800.0]);
        assert_eq!(baseline.features[0].variance, 0.0);
        let points = trend.iter().collect::<Vec<_>>();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].consistency_score, 100.0);
    }

    #[test]
    fn test_baseline_weights_recent_matches_more() {
        // newest 500 (w=4), then 300 (w=2)
        let vectors = [vector("new", 500.0, 0.0), vector("old", 300.0, 0.0)];
        let (baseline, _) =
            aggregate(&schema(), &vectors, &[true, false], &AggregateParams::default()).unwrap();
        let expected = (500.0 * 4.0 + 300.0 * 2.0) / 6.0;
        assert!((baseline.mean(0) - expected).abs() < 1e-3);
        assert_eq!(baseline.to_map(&schema())["damage_per_minute"], 0.0);
    }

    #[test]
    fn test_trend_is_oldest_first_and_restartable() {
        let vectors = [
            vector("c", 300.0, 3.0),
            vector("b", 200.0, 2.0),
            vector("a", 100.0, 1.0),
        ];
        let labels = [true, false, true];
        let (_, trend) =
            aggregate(&schema(), &vectors, &labels, &AggregateParams::default()).unwrap();
        let ids = trend.iter().map(|p| p.match_id).collect::<Vec<_>>();
        assert_eq!(ids, ["a", "b", "c"]);
        let again = trend.iter().map(|p| p.match_id).collect::<Vec<_>>();
        assert_eq!(ids, again);
        assert_eq!(trend.iter().len(), 3);

        let first = trend.iter().next().unwrap();
        assert_eq!(first.gold_per_minute, 100.0);
        assert_eq!(first.damage_per_minute, 1.0);
        // not in this schema
        assert_eq!(first.vision_dominance, 0.0);
    }

    #[test]
    fn test_consistency_drops_with_volatile_income() {
        let steady = (0..6)
            .map(|i| vector(&i.to_string(), 400.0, 0.0))
            .collect::<Vec<_>>();
        let labels = [true; 6];
        let (_, trend) =
            aggregate(&schema(), &steady, &labels, &AggregateParams::default()).unwrap();
        assert!(trend.iter().all(|p| p.consistency_score == 100.0));

        let volatile = [
            vector("d", 100.0, 0.0),
            vector("c", 700.0, 0.0),
            vector("b", 100.0, 0.0),
            vector("a", 700.0, 0.0),
        ];
        let (_, trend) =
            aggregate(&schema(), &volatile, &[true; 4], &AggregateParams::default()).unwrap();
        let scores = trend.iter().map(|p| p.consistency_score).collect::<Vec<_>>();
        // window [700, 100]: mean 400, std 300, cv 0.75 -> 100 - 150 clamps to 0
        assert_eq!(scores[0], 100.0);
        assert_eq!(scores[1], 0.0);
        assert!(scores.iter().all(|s| (0.0..=100.0).contains(s)));
    }

    #[test]
    fn test_consistency_of_zero_income_is_full() {
        let vectors = [vector("b", 0.0, 0.0), vector("a", 0.0, 0.0)];
        let (_, trend) =
            aggregate(&schema(), &vectors, &[false, false], &AggregateParams::default()).unwrap();
        assert!(trend.iter().all(|p| p.consistency_score == 100.0));
    }
}
