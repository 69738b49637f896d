//! Feature importance scores keyed by feature id.

use std::collections::BTreeMap;

use laneiq_features::FeatureSchema;

/// Scales `weights` so they sum to 1. Leaves all-zero (or non-positive sum) input untouched.
pub fn normalize_l1(weights: &mut [f32]) {
    let sum: f32 = weights.iter().copied().sum();
    if sum > 0.0 {
        for w in weights {
            *w /= sum;
        }
    }
}

/// Non-negative importances that sum to 1, one per schema feature.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportanceMap {
    ids: Vec<String>,
    scores: Vec<f32>,
}

impl ImportanceMap {
    /// Equal importance for every feature.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn uniform(schema: &FeatureSchema) -> Self {
        let n = schema.len();
        let score = if n == 0 { 0.0 } else { 1.0 / n as f32 };
        Self {
            ids: schema.ids().map(str::to_owned).collect(),
            scores: vec![score; n],
        }
    }

    /// Builds a map from raw scores in schema order.
    ///
    /// Negative or non-finite scores count as 0. If nothing positive remains the map is uniform.
    ///
    /// # Panics
    ///
    /// Panics if `scores` does not have one entry per schema feature.
    #[must_use]
    pub fn from_scores(schema: &FeatureSchema, mut scores: Vec<f32>) -> Self {
        assert_eq!(scores.len(), schema.len());
        for s in &mut scores {
            if !s.is_finite() || *s < 0.0 {
                *s = 0.0;
            }
        }
        normalize_l1(&mut scores);
        if scores.iter().all(|s| *s == 0.0) {
            return Self::uniform(schema);
        }
        Self {
            ids: schema.ids().map(str::to_owned).collect(),
            scores,
        }
    }

    /// Scores in schema order.
    #[must_use]
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    #[must_use]
    pub fn get(&self, feature_id: &str) -> Option<f32> {
        self.ids
            .iter()
            .position(|id| id == feature_id)
            .map(|i| self.scores[i])
    }

    /// `(id, score)` pairs, highest score first, ties by id.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, f32)> {
        let mut pairs = self
            .ids
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
            .collect::<Vec<_>>();
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        pairs
    }

    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, f32> {
        self.ids.iter().cloned().zip(self.scores.iter().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use laneiq_features::{
        BoxedMatchFeatureSource,
        source::{DamagePerMinute, GoldPerMinute, KillParticipation},
    };

    use super::*;

    fn schema() -> FeatureSchema {
        let sources: Vec<BoxedMatchFeatureSource> = vec![
            Box::new(GoldPerMinute),
            Box::new(DamagePerMinute),
            Box::new(KillParticipation),
        ];
        FeatureSchema::new(sources).unwrap()
    }

    #[test]
    fn test_normalize_l1() {
        let mut w = [1.0, 3.0];
        normalize_l1(&mut w);
        assert_eq!(w, [0.25, 0.75]);

        let mut zeros = [0.0, 0.0];
        normalize_l1(&mut zeros);
        assert_eq!(zeros, [0.0, 0.0]);
    }

    #[test]
    fn test_from_scores_normalizes() {
        let map = ImportanceMap::from_scores(&schema(), vec![2.0, 1.0, 1.0]);
        assert_eq!(map.get("gold_per_minute"), Some(0.5));
        assert_eq!(map.get("damage_per_minute"), Some(0.25));
        assert_eq!(map.get("missing"), None);
        let sum: f32 = map.scores().iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_scores_become_uniform() {
        let schema = schema();
        let map = ImportanceMap::from_scores(&schema, vec![0.0, -1.0, f32::NAN]);
        assert_eq!(map, ImportanceMap::uniform(&schema));
        assert!(map.scores().iter().all(|s| (*s - 1.0 / 3.0).abs() < 1e-6));
    }

    #[test]
    fn test_sorted_breaks_ties_by_id() {
        let map = ImportanceMap::from_scores(&schema(), vec![1.0, 1.0, 2.0]);
        let ids = map.sorted().into_iter().map(|(id, _)| id).collect::<Vec<_>>();
        assert_eq!(
            ids,
            ["kill_participation", "damage_per_minute", "gold_per_minute"]
        );
    }
}
