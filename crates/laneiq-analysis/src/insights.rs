use laneiq_features::{FeatureSchema, FeatureVector, MatchFeatureSource as _};
use serde::{Deserialize, Serialize};

/// Number of features listed as top differentiators.
const TOP_DIFFERENTIATORS: usize = 10;

/// Mean feature values in wins versus losses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSplit {
    pub features: Vec<OutcomeComparison>,
    /// Feature ids ordered by `|percent_difference|`, largest first
    pub top_differentiators: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeComparison {
    pub feature_id: String,
    pub name: String,
    pub avg_when_winning: f32,
    pub avg_when_losing: f32,
    pub difference: f32,
    /// `difference / avg_when_losing × 100`, or 0 when the losing mean is 0
    pub percent_difference: f32,
}

impl OutcomeSplit {
    /// Compares wins and losses. Empty unless the history has both outcomes.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(schema: &FeatureSchema, vectors: &[FeatureVector], labels: &[bool]) -> Self {
        let wins = labels.iter().filter(|w| **w).count();
        let losses = labels.len() - wins;
        if wins == 0 || losses == 0 {
            return Self::default();
        }

        let features = schema
            .sources()
            .iter()
            .enumerate()
            .map(|(index, source)| {
                let (mut win_sum, mut loss_sum) = (0.0_f32, 0.0_f32);
                for (vector, &win) in vectors.iter().zip(labels) {
                    if win {
                        win_sum += vector.get(index);
                    } else {
                        loss_sum += vector.get(index);
                    }
                }
                let avg_when_winning = win_sum / wins as f32;
                let avg_when_losing = loss_sum / losses as f32;
                let difference = avg_when_winning - avg_when_losing;
                let percent_difference = if avg_when_losing == 0.0 {
                    0.0
                } else {
                    difference / avg_when_losing * 100.0
                };
                OutcomeComparison {
                    feature_id: source.id().to_owned(),
                    name: source.name().to_owned(),
                    avg_when_winning,
                    avg_when_losing,
                    difference,
                    percent_difference: if percent_difference.is_finite() {
                        percent_difference
                    } else {
                        0.0
                    },
                }
            })
            .collect::<Vec<_>>();

        let mut ranked = features.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| {
            b.percent_difference
                .abs()
                .total_cmp(&a.percent_difference.abs())
                .then_with(|| a.feature_id.cmp(&b.feature_id))
        });
        let top_differentiators = ranked
            .into_iter()
            .take(TOP_DIFFERENTIATORS)
            .map(|c| c.feature_id.clone())
            .collect();

        Self {
            features,
            top_differentiators,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    #[must_use]
    pub fn get(&self, feature_id: &str) -> Option<&OutcomeComparison> {
        self.features.iter().find(|c| c.feature_id == feature_id)
    }
}

#[cfg(test)]
mod tests {
    use laneiq_features::{BoxedMatchFeatureSource, source::{DamagePerMinute, GoldPerMinute}};

    use super::*;

    fn schema() -> FeatureSchema {
        let sources: Vec<BoxedMatchFeatureSource> =
            vec![Box::new(GoldPerMinute), Box::new(DamagePerMinute)];
        FeatureSchema::new(sources).unwrap()
    }

    fn vector(gpm: f32, dpm: f32) -> FeatureVector {
        FeatureVector {
            match_id: String::new(),
            values: vec![gpm, dpm],
            timeline_complete: true,
        }
    }

    #[test]
    fn test_split_needs_both_outcomes() {
        let split = OutcomeSplit::new(&schema(), &[vector(1.0, 1.0)], &[true]);
        assert!(split.is_empty());
        assert!(split.top_differentiators.is_empty());
    }

    #[test]
    fn test_split_means_and_ranking() {
        let vectors = [
            vector(500.0, 600.0),
            vector(300.0, 0.0),
            vector(400.0, 600.0),
        ];
        let split = OutcomeSplit::new(&schema(), &vectors, &[true, false, true]);
        let gpm = split.get("gold_per_minute").unwrap();
        assert_eq!(gpm.avg_when_winning, 450.0);
        assert_eq!(gpm.avg_when_losing, 300.0);
        assert_eq!(gpm.percent_difference, 50.0);

        // losing mean of 0 reports no percentage
        let dpm = split.get("damage_per_minute").unwrap();
        assert_eq!(dpm.difference, 600.0);
        assert_eq!(dpm.percent_difference, 0.0);

        assert_eq!(split.top_differentiators, ["gold_per_minute", "damage_per_minute"]);
    }
}
