//! Win drivers and skill-focus gaps.
//!
//! Both lists compare the latest match against a reference value per feature and rank the
//! differences by how much the model cares about them. Win drivers keep only features where
//! the latest match is ahead of the comparison; skill gaps keep only those where it is behind.
//!
//! ```text
//! diff_pct   = (value - comparison) / |comparison| × 100    (±100 or 0 when comparison = 0)
//! rank_score = importance × |diff_pct|
//! ```
//!
//! Ties are broken by feature id so rankings are fully deterministic.
//!
//! # Comparison Basis
//!
//! Win drivers compare head-to-head statistics (combat, economy, vision) against the
//! opposing laner and relative or habitual ones (leads, map pressure, pings) against the
//! player's own baseline, as declared by each feature's
//! [`basis()`](laneiq_features::MatchFeatureSource::basis). Skill gaps always compare
//! against the opposing laner. Without an opponent vector everything falls back to the
//! baseline.

use std::cmp::Ordering;

use laneiq_features::{
    ComparisonBasis, FeatureCategory, FeatureSchema, FeatureVector, MatchFeatureSource as _,
};
use serde::{Deserialize, Serialize};

use crate::aggregate::BaselineProfile;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverParams {
    /// Number of win drivers returned
    pub top_n: usize,
    /// Features less than this many percent ahead never become win drivers
    pub min_driver_diff_pct: f32,
    /// Number of skill gaps returned
    pub gap_top_n: usize,
    /// Features less important than this never become skill gaps
    pub min_gap_importance: f32,
}

impl Default for DriverParams {
    fn default() -> Self {
        Self {
            top_n: 5,
            min_driver_diff_pct: 5.0,
            gap_top_n: 5,
            min_gap_importance: 0.01,
        }
    }
}

/// Magnitude of a driver's difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    fn from_diff(diff_pct: f32) -> Self {
        match diff_pct.abs() {
            d if d > 40.0 => Self::High,
            d if d > 15.0 => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Magnitude of a skill gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum GapSeverity {
    #[display("minor")]
    Minor,
    #[display("moderate")]
    Moderate,
    #[display("major")]
    Major,
}

impl GapSeverity {
    fn from_diff(diff_pct: f32) -> Self {
        match diff_pct.abs() {
            d if d < 10.0 => Self::Minor,
            d if d < 30.0 => Self::Moderate,
            _ => Self::Major,
        }
    }
}

/// One feature of the latest match set against its comparison value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub feature_id: String,
    pub name: String,
    pub category: FeatureCategory,
    pub value: f32,
    pub comparison: f32,
    pub basis: ComparisonBasis,
    pub diff_pct: f32,
    pub importance: f32,
    pub rank_score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    #[serde(flatten)]
    pub comparison: Comparison,
    pub impact: Impact,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    #[serde(flatten)]
    pub comparison: Comparison,
    pub severity: GapSeverity,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverAnalysis {
    pub win_drivers: Vec<Driver>,
    pub skill_gaps: Vec<SkillGap>,
}

/// Signed percentage difference of `value` relative to `comparison`.
///
/// # Examples
///
/// ```
/// # use laneiq_analysis::drivers::diff_pct;
/// assert_eq!(diff_pct(150.0, 100.0), 50.0);
/// assert_eq!(diff_pct(-50.0, -100.0), 50.0);
/// assert_eq!(diff_pct(3.0, 0.0), 100.0);
/// assert_eq!(diff_pct(0.0, 0.0), 0.0);
/// ```
#[must_use]
pub fn diff_pct(value: f32, comparison: f32) -> f32 {
    let diff = if comparison == 0.0 {
        match value.partial_cmp(&0.0) {
            Some(Ordering::Greater) => 100.0,
            Some(Ordering::Less) => -100.0,
            _ => 0.0,
        }
    } else {
        (value - comparison) / comparison.abs() * 100.0
    };
    if diff.is_finite() { diff } else { 0.0 }
}

/// Derives ranked win drivers and skill gaps for the latest match.
///
/// `importances` is aligned with `schema`. `outcome_hint` is the latest match's result and
/// only changes the wording of driver summaries.
#[must_use]
pub fn derive(
    schema: &FeatureSchema,
    latest: &FeatureVector,
    baseline: &BaselineProfile,
    opponent: Option<&FeatureVector>,
    importances: &[f32],
    outcome_hint: bool,
    params: &DriverParams,
) -> DriverAnalysis {
    let compare = |index: usize, basis: ComparisonBasis| {
        let source = &schema.sources()[index];
        let (basis, comparison) = match (basis, opponent) {
            (ComparisonBasis::Opponent, Some(opponent)) => {
                (ComparisonBasis::Opponent, opponent.get(index))
            }
            _ => (ComparisonBasis::Baseline, baseline.mean(index)),
        };
        let value = latest.get(index);
        let diff_pct = diff_pct(value, comparison);
        let importance = importances.get(index).copied().unwrap_or(0.0);
        Comparison {
            feature_id: source.id().to_owned(),
            name: source.name().to_owned(),
            category: source.category(),
            value,
            comparison,
            basis,
            diff_pct,
            importance,
            rank_score: importance * diff_pct.abs(),
        }
    };

    let mut drivers = (0..schema.len())
        .map(|index| compare(index, schema.sources()[index].basis()))
        .filter(|c| c.diff_pct > params.min_driver_diff_pct)
        .collect::<Vec<_>>();
    rank(&mut drivers);
    let win_drivers = drivers
        .into_iter()
        .take(params.top_n)
        .map(|comparison| Driver {
            impact: Impact::from_diff(comparison.diff_pct),
            summary: driver_summary(&comparison, outcome_hint),
            comparison,
        })
        .collect::<Vec<_>>();

    let mut gaps = (0..schema.len())
        .map(|index| compare(index, ComparisonBasis::Opponent))
        .filter(|c| c.diff_pct < 0.0 && c.importance >= params.min_gap_importance)
        .collect::<Vec<_>>();
    rank(&mut gaps);
    let skill_gaps = gaps
        .into_iter()
        .take(params.gap_top_n)
        .map(|comparison| {
            let severity = GapSeverity::from_diff(comparison.diff_pct);
            let (title, description) = gap_text(&comparison, severity);
            SkillGap {
                comparison,
                severity,
                title,
                description,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        drivers = win_drivers.len(),
        gaps = skill_gaps.len(),
        has_opponent = opponent.is_some(),
        "derived drivers"
    );
    DriverAnalysis {
        win_drivers,
        skill_gaps,
    }
}

fn rank(comparisons: &mut [Comparison]) {
    comparisons.sort_by(|a, b| {
        b.rank_score
            .total_cmp(&a.rank_score)
            .then_with(|| a.feature_id.cmp(&b.feature_id))
    });
}

fn basis_label(basis: ComparisonBasis) -> &'static str {
    match basis {
        ComparisonBasis::Opponent => "your lane opponent",
        ComparisonBasis::Baseline => "your recent average",
    }
}

fn driver_summary(c: &Comparison, won: bool) -> String {
    let against = basis_label(c.basis);
    let pct = c.diff_pct;
    if won {
        format!("{} {pct:.0}% above {against}; a strength in this win", c.name)
    } else {
        format!("{} {pct:.0}% above {against}; a strength to build on", c.name)
    }
}

/// Coaching focus per feature: title and advice.
fn focus(feature_id: &str) -> Option<(&'static str, &'static str)> {
    Some(match feature_id {
        "kill_participation" => ("Map Presence", "Roam more often to assist your team."),
        "damage_per_minute" => (
            "Damage Output",
            "Look for more safe trading opportunities.",
        ),
        "skillshot_hit_rate" => (
            "Skill Accuracy",
            "Practice hitting your skillshots consistently.",
        ),
        "skillshot_dodge_rate" => ("Dodge Skill", "Focus on sidestepping enemy abilities."),
        "combat_efficiency" => (
            "Combat Efficiency",
            "Turn your gold into more damage by fighting with item spikes.",
        ),
        "aggression_score" => (
            "Lane Pressure",
            "Trade when enemy abilities are on cooldown.",
        ),
        "gold_per_minute" => (
            "Farming & Economy",
            "Improve CSing and look for more resource efficient rotations.",
        ),
        "xp_per_minute" => (
            "Experience Gain",
            "Stay in lane for waves instead of wandering.",
        ),
        "cs_per_minute" => ("CS Numbers", "Focus on last hitting minions."),
        "lane_minions_first_10_minutes" => (
            "Early Farm (10m)",
            "Practice last hitting in the early laning phase.",
        ),
        "max_cs_advantage" => ("CS Gap", "Deny enemy CS while securing your own."),
        "max_level_lead" => ("Level Lead", "Soak XP and deny enemy recall timings."),
        "gold_lead_at_10" => (
            "Early Gold Lead",
            "Work on winning the first 10 minutes of lane.",
        ),
        "xp_lead_at_10" => (
            "Early XP Lead",
            "Avoid missing waves before the first recall.",
        ),
        "gold_lead_at_14" => (
            "Lane Gold Lead",
            "Focus on building a lead by 14 minutes.",
        ),
        "vision_score_per_minute" => (
            "Vision Control",
            "Place more wards and clear enemy vision.",
        ),
        "wards_placed_per_minute" => ("Wards Placed", "Use your trinket more often."),
        "control_wards_placed" => (
            "Control Wards",
            "Buy and place control wards to deny vision.",
        ),
        "vision_score_advantage" => ("Vision Gap", "Your opponent is out-visioning you."),
        "control_ward_coverage" => (
            "Deep Vision",
            "Place control wards further up for better info.",
        ),
        "vision_dominance" => (
            "Vision Dominance",
            "Combine warding with sweeping enemy wards.",
        ),
        "turret_plates_taken" => (
            "Turret Plates",
            "Push for plates when opponents recall or roam.",
        ),
        "forward_positioning_score" => (
            "Map Pressure",
            "Hold wave control to stand further forward.",
        ),
        "enemy_territory_pct" => (
            "Territory Control",
            "Spend more time on the enemy half when ahead.",
        ),
        "jungle_invasion_pct" => (
            "Jungle Invasion",
            "Pressure the enemy jungle when your lane is pushed.",
        ),
        "river_control_pct" => (
            "River Control",
            "Contest the river before objectives spawn.",
        ),
        "enemy_missing_pings" => ("Missing Pings", "Ping missing when your laner roams."),
        "on_my_way_pings" => ("Roam Communication", "Ping on my way when moving to help."),
        "assist_me_pings" => ("Help Requests", "Ask for help before getting dove."),
        "get_back_pings" => ("Danger Pings", "Warn teammates of incoming danger."),
        _ => return None,
    })
}

fn gap_text(c: &Comparison, severity: GapSeverity) -> (String, String) {
    let (title, advice) = focus(&c.feature_id).map_or_else(
        || (c.name.clone(), format!("Improve your {}.", c.name)),
        |(title, advice)| (title.to_owned(), advice.to_owned()),
    );
    let description = format!(
        "{} gap: {:.0}% behind {}. {advice}",
        capitalize(&severity.to_string()),
        c.diff_pct.abs(),
        basis_label(c.basis),
    );
    (title, description)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
