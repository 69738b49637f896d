use std::collections::BTreeMap;

use laneiq_analysis::{
    aggregate::TrendPoint,
    drivers::{Driver, SkillGap},
    insights::OutcomeSplit,
    playstyle::PlaystyleTag,
};
use laneiq_features::{
    DisplayStats, FeatureCategory, FeatureSchema, TerritoryMetrics, TimelineSeries,
};
use laneiq_training::{ForestSummary, ImportanceMap};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    /// The model was fit and scored the latest match
    Success,
    /// The win probability and importances are fallbacks
    Partial,
}

/// How the win probability was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    Fitted,
    /// Too few matches; the probability is the historical win rate
    InsufficientHistory,
    /// Every match has the same outcome; the probability is 1 or 0
    DegenerateLabelSet,
}

impl ModelStatus {
    #[must_use]
    pub fn status(self) -> AnalysisStatus {
        match self {
            Self::Fitted => AnalysisStatus::Success,
            Self::InsufficientHistory | Self::DegenerateLabelSet => AnalysisStatus::Partial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryImportance {
    pub category: FeatureCategory,
    pub importance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature_id: String,
    pub importance: f32,
}

/// Final payload of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: AnalysisStatus,
    pub model_status: ModelStatus,
    /// Win probability of the latest match, in `[0, 1]`
    pub win_probability: f32,
    /// Fraction of matches won, in `[0, 1]`
    pub win_rate: f32,
    pub total_matches: usize,
    pub wins: usize,
    pub losses: usize,
    /// Recency-weighted feature means
    pub weighted_averages: BTreeMap<String, f32>,
    /// Feature values of the latest match
    pub latest_features: BTreeMap<String, f32>,
    pub win_drivers: Vec<Driver>,
    pub skill_focus: Vec<SkillGap>,
    /// Oldest match first
    pub performance_trends: Vec<TrendPoint>,
    pub last_match_stats: DisplayStats,
    /// Opposing laner in the latest match, when known
    pub enemy_stats: Option<DisplayStats>,
    /// All five categories, most important first
    pub category_importance: Vec<CategoryImportance>,
    /// Most important first
    pub feature_importance: Vec<FeatureImportance>,
    pub performance_insights: OutcomeSplit,
    pub player_moods: Vec<PlaystyleTag>,
    /// Gold and XP curves of the latest match
    pub match_timeline_series: Option<TimelineSeries>,
    pub territory_metrics: Option<TerritoryMetrics>,
    /// Matches whose timeline-dependent features fell back to defaults
    pub incomplete_timelines: Vec<String>,
    pub forest: Option<ForestSummary>,
}

/// Sums importances per category. Every category is listed, highest total first.
#[must_use]
pub fn category_importance(
    schema: &FeatureSchema,
    importances: &ImportanceMap,
) -> Vec<CategoryImportance> {
    let mut totals = FeatureCategory::ALL.map(|category| CategoryImportance {
        category,
        importance: 0.0,
    });
    for (index, score) in importances.scores().iter().enumerate() {
        let category = schema.category_of(index);
        if let Some(total) = totals.iter_mut().find(|t| t.category == category) {
            total.importance += score;
        }
    }
    let mut totals = totals.to_vec();
    totals.sort_by(|a, b| {
        b.importance
            .total_cmp(&a.importance)
            .then_with(|| a.category.cmp(&b.category))
    });
    totals
}

#[must_use]
pub fn feature_importance(importances: &ImportanceMap) -> Vec<FeatureImportance> {
    importances
        .sorted()
        .into_iter()
        .map(|(id, importance)| FeatureImportance {
            feature_id: id.to_owned(),
            importance,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use laneiq_features::{
        BoxedMatchFeatureSource,
        source::{DamagePerMinute, GoldPerMinute, KillParticipation},
    };

    use super::*;

    #[test]
    fn test_category_importance_lists_every_category() {
        let sources: Vec<BoxedMatchFeatureSource> = vec![
            Box::new(KillParticipation),
            Box::new(DamagePerMinute),
            Box::new(GoldPerMinute),
        ];
        let schema = FeatureSchema::new(sources).unwrap();
        let importances = ImportanceMap::from_scores(&schema, vec![0.25, 0.25, 0.5]);

        let categories = category_importance(&schema, &importances);
        assert_eq!(categories.len(), FeatureCategory::ALL.len());
        assert_eq!(categories[0].importance, 0.5);
        assert_eq!(categories[1].importance, 0.5);
        assert!(categories[2..].iter().all(|c| c.importance == 0.0));
        let sum: f32 = categories.iter().map(|c| c.importance).sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_model_status_maps_to_status() {
        assert_eq!(ModelStatus::Fitted.status(), AnalysisStatus::Success);
        assert_eq!(
            ModelStatus::DegenerateLabelSet.status(),
            AnalysisStatus::Partial
        );
        assert_eq!(
            serde_json::to_value(ModelStatus::InsufficientHistory).unwrap(),
            "insufficient_history"
        );
    }
}
