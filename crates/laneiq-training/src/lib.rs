//! Per-request win-probability model.
//!
//! A fresh [`RandomForest`](forest::RandomForest) is fit on every call to [`fit_and_score`];
//! nothing is cached between requests. The fitted forest yields two things:
//!
//! - the win probability of the latest match
//! - an [`ImportanceMap`] (mean decrease in impurity) used to rank comparisons
//!
//! Histories too short or too one-sided to fit are reported as [`TrainError`]s so the caller
//! can fall back to simple estimates.
//!
//! # Examples
//!
//! ```
//! use laneiq_features::FeatureSchema;
//! use laneiq_training::{TrainError, fit_and_score, forest::ForestParams};
//!
//! let schema = FeatureSchema::standard();
//! let err = fit_and_score(&schema, &[], &[], &[], None, &ForestParams::default()).unwrap_err();
//! assert!(matches!(err, TrainError::InsufficientHistory { required: 10, actual: 0 }));
//! ```

use laneiq_features::{FeatureSchema, FeatureVector};
use serde::{Deserialize, Serialize};

use self::forest::{ForestParams, RandomForest};
pub use self::importance::ImportanceMap;

pub mod forest;
pub mod importance;
pub mod tree;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TrainError {
    #[display("need at least {required} labelled matches, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },
    #[display("every match in the history has the same outcome (win = {label})")]
    DegenerateLabelSet { label: bool },
    #[display("{vectors} feature vectors, {labels} labels and {weights} sample weights")]
    LengthMismatch {
        vectors: usize,
        labels: usize,
        weights: usize,
    },
    #[display("feature vector {match_id} has {actual} values, schema has {expected}")]
    ShapeMismatch {
        match_id: String,
        expected: usize,
        actual: usize,
    },
    #[display("sample weights must be finite and non-negative with a positive sum")]
    InvalidWeights,
}

impl TrainError {
    /// Whether the caller can substitute a trivial estimate instead of failing.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientHistory { .. } | Self::DegenerateLabelSet { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestSummary {
    pub n_trees: usize,
    /// Fraction of the history the forest classifies correctly
    pub training_accuracy: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelScore {
    /// Predicted win probability of `latest`, or of the newest history entry
    pub win_probability: f32,
    pub importances: ImportanceMap,
    pub summary: ForestSummary,
}

/// Fits a forest on `vectors` (newest first) and scores `latest`.
///
/// `sample_weights` holds one recency weight per vector. When `latest` is `None` the newest
/// vector is scored.
///
/// Checks run in order: lengths, history size, label variety, vector shape, weights.
///
/// # Errors
///
/// Returns [`TrainError::InsufficientHistory`] for fewer than `params.min_history` matches,
/// [`TrainError::DegenerateLabelSet`] when all labels agree, and the remaining variants for
/// malformed input.
pub fn fit_and_score(
    schema: &FeatureSchema,
    vectors: &[FeatureVector],
    labels: &[bool],
    sample_weights: &[f32],
    latest: Option<&FeatureVector>,
    params: &ForestParams,
) -> Result<ModelScore, TrainError> {
    if vectors.len() != labels.len() || vectors.len() != sample_weights.len() {
        return Err(TrainError::LengthMismatch {
            vectors: vectors.len(),
            labels: labels.len(),
            weights: sample_weights.len(),
        });
    }
    let required = params.min_history.max(1);
    if vectors.len() < required {
        return Err(TrainError::InsufficientHistory {
            required,
            actual: vectors.len(),
        });
    }
    let label = labels[0];
    if labels.iter().all(|l| *l == label) {
        return Err(TrainError::DegenerateLabelSet { label });
    }
    if let Some(v) = vectors
        .iter()
        .chain(latest)
        .find(|v| v.values.len() != schema.len())
    {
        return Err(TrainError::ShapeMismatch {
            match_id: v.match_id.clone(),
            expected: schema.len(),
            actual: v.values.len(),
        });
    }
    let weight_sum: f32 = sample_weights.iter().sum();
    if sample_weights.iter().any(|w| !w.is_finite() || *w < 0.0) || weight_sum <= 0.0 {
        return Err(TrainError::InvalidWeights);
    }

    let rows = vectors.iter().map(|v| v.values.as_slice()).collect::<Vec<_>>();
    let forest = RandomForest::fit(&rows, labels, sample_weights, params);
    let latest = latest.unwrap_or(&vectors[0]);
    let win_probability = forest.predict_proba(&latest.values);
    let importances = ImportanceMap::from_scores(schema, forest.feature_importances());
    let summary = ForestSummary {
        n_trees: forest.n_trees(),
        training_accuracy: forest.accuracy(&rows, labels),
    };
    tracing::debug!(
        n_trees = summary.n_trees,
        training_accuracy = summary.training_accuracy,
        win_probability,
        "fitted random forest"
    );

    Ok(ModelScore {
        win_probability,
        importances,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(schema: &FeatureSchema, n: usize) -> (Vec<FeatureVector>, Vec<bool>) {
        let vectors = (0..n)
            .map(|i| {
                let mut values = vec![0.0; schema.len()];
                // wins have a much higher first feature
                values[0] = if i % 2 == 0 { 500.0 } else { 250.0 } + i as f32;
                FeatureVector {
                    match_id: format!("m{i}"),
                    values,
                    timeline_complete: true,
                }
            })
            .collect();
        let labels = (0..n).map(|i| i % 2 == 0).collect();
        (vectors, labels)
    }

    #[test]
    fn test_checks_run_in_order() {
        let schema = FeatureSchema::standard();
        let params = ForestParams::default();
        let (vectors, labels) = history(&schema, 4);

        let err = fit_and_score(&schema, &vectors, &labels[..3], &[1.0; 4], None, &params);
        assert!(matches!(err, Err(TrainError::LengthMismatch { .. })));

        // short history wins over degenerate labels
        let err = fit_and_score(&schema, &vectors, &[true; 4], &[1.0; 4], None, &params);
        assert_eq!(
            err,
            Err(TrainError::InsufficientHistory {
                required: 10,
                actual: 4
            })
        );
        assert!(err.unwrap_err().is_recoverable());

        let (vectors, _) = history(&schema, 12);
        let err = fit_and_score(&schema, &vectors, &[false; 12], &[1.0; 12], None, &params);
        assert_eq!(err, Err(TrainError::DegenerateLabelSet { label: false }));
    }

    #[test]
    fn test_malformed_input_is_not_recoverable() {
        let schema = FeatureSchema::standard();
        let params = ForestParams::default();
        let (mut vectors, labels) = history(&schema, 10);
        let weights = [1.0; 10];

        let err = fit_and_score(&schema, &vectors, &labels, &[0.0; 10], None, &params).unwrap_err();
        assert_eq!(err, TrainError::InvalidWeights);
        assert!(!err.is_recoverable());

        vectors[3].values.pop();
        let err = fit_and_score(&schema, &vectors, &labels, &weights, None, &params).unwrap_err();
        assert!(matches!(err, TrainError::ShapeMismatch { ref match_id, .. } if match_id == "m3"));
    }

    #[test]
    fn test_fit_and_score() {
        let schema = FeatureSchema::standard();
        let params = ForestParams {
            n_trees: 20,
            // only the first feature carries signal
            max_features: Some(schema.len()),
            ..ForestParams::default()
        };
        let (vectors, labels) = history(&schema, 12);
        let weights = (0..12).map(|i| if i == 0 { 4.0 } else { 1.0 }).collect::<Vec<_>>();

        let score = fit_and_score(&schema, &vectors, &labels, &weights, None, &params).unwrap();
        assert!(score.win_probability > 0.5 && score.win_probability < 1.0);
        assert_eq!(score.summary.n_trees, 20);
        assert!(score.summary.training_accuracy > 0.9);

        let sum: f32 = score.importances.scores().iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(score.importances.scores().iter().all(|s| *s >= 0.0));
        let (top, _) = score.importances.sorted()[0];
        assert_eq!(top, schema.ids().next().unwrap());

        let again = fit_and_score(&schema, &vectors, &labels, &weights, None, &params).unwrap();
        assert_eq!(score, again);
    }
}
