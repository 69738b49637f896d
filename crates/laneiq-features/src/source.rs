//! Feature source types for extracting values from matches.
//!
//! Every type here implements [`MatchFeatureSource`] and measures one behaviour of the
//! subject player. The list returned by [`all_match_feature_sources()`] is the fixed schema
//! used for modelling.
//!
//! Sources that need the timeline return `None` from
//! [`extract`](MatchFeatureSource::extract) when it is unavailable; the extractor then
//! records the default value `0.0`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::MatchContext;

#[must_use]
pub fn all_match_feature_sources() -> Vec<BoxedMatchFeatureSource> {
    vec![
        // combat
        Box::new(KillParticipation),
        Box::new(DamagePerMinute),
        Box::new(SkillshotHitRate),
        Box::new(SkillshotDodgeRate),
        Box::new(CombatEfficiency),
        Box::new(AggressionScore),
        // economy
        Box::new(GoldPerMinute),
        Box::new(XpPerMinute),
        Box::new(CsPerMinute),
        Box::new(LaneMinionsFirst10Minutes),
        Box::new(MaxCsAdvantage),
        Box::new(MaxLevelLead),
        Box::new(LaneLead::GOLD_AT_10),
        Box::new(LaneLead::XP_AT_10),
        Box::new(LaneLead::GOLD_AT_14),
        // vision
        Box::new(VisionScorePerMinute),
        Box::new(WardsPlacedPerMinute),
        Box::new(ControlWardsPlaced),
        Box::new(VisionScoreAdvantage),
        Box::new(ControlWardCoverage),
        Box::new(VisionDominance),
        // objectives
        Box::new(TurretPlatesTaken),
        Box::new(Territory::FORWARD_POSITIONING),
        Box::new(Territory::ENEMY_TERRITORY),
        Box::new(Territory::JUNGLE_INVASION),
        Box::new(Territory::RIVER_CONTROL),
        // communication
        Box::new(Pings::ENEMY_MISSING),
        Box::new(Pings::ON_MY_WAY),
        Box::new(Pings::ASSIST_ME),
        Box::new(Pings::GET_BACK),
    ]
}

/// Broad area of play a feature belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum FeatureCategory {
    Combat,
    Economy,
    Vision,
    Objectives,
    Communication,
}

impl FeatureCategory {
    pub const ALL: [Self; 5] = [
        Self::Combat,
        Self::Economy,
        Self::Vision,
        Self::Objectives,
        Self::Communication,
    ];
}

/// What the subject's value is compared against when deriving drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonBasis {
    /// The opposing laner's value in the same match
    #[display("opponent")]
    Opponent,
    /// The subject's own recency-weighted baseline
    #[display("baseline")]
    Baseline,
}

pub trait MatchFeatureSource: fmt::Debug + Send + Sync {
    #[must_use]
    fn id(&self) -> &str;
    #[must_use]
    fn name(&self) -> &str;
    #[must_use]
    fn category(&self) -> FeatureCategory;
    /// Head-to-head statistics compare against the opponent; relative measures (leads)
    /// and habits compare against the baseline.
    #[must_use]
    fn basis(&self) -> ComparisonBasis {
        match self.category() {
            FeatureCategory::Combat | FeatureCategory::Economy | FeatureCategory::Vision => {
                ComparisonBasis::Opponent
            }
            FeatureCategory::Objectives | FeatureCategory::Communication => {
                ComparisonBasis::Baseline
            }
        }
    }
    #[must_use]
    fn requires_timeline(&self) -> bool {
        false
    }
    #[must_use]
    fn clone_boxed(&self) -> BoxedMatchFeatureSource;
    /// Extracts the value, or `None` when timeline data it needs is missing.
    #[must_use]
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32>;
}

pub type BoxedMatchFeatureSource = Box<dyn MatchFeatureSource>;

impl Clone for BoxedMatchFeatureSource {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl MatchFeatureSource for BoxedMatchFeatureSource {
    fn id(&self) -> &str {
        self.as_ref().id()
    }

    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn category(&self) -> FeatureCategory {
        self.as_ref().category()
    }

    fn basis(&self) -> ComparisonBasis {
        self.as_ref().basis()
    }

    fn requires_timeline(&self) -> bool {
        self.as_ref().requires_timeline()
    }

    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        self.as_ref().clone_boxed()
    }

    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        self.as_ref().extract(ctx)
    }
}

#[expect(clippy::cast_precision_loss)]
fn ratio(numerator: u32, denominator: u32) -> f32 {
    numerator as f32 / denominator.max(1) as f32
}

/// Share of the team's kills the subject took part in.
///
/// `(kills + assists) / max(team_kills, 1)` when the team kill total is known, otherwise the
/// platform-computed challenge value. Clamped to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct KillParticipation;

impl MatchFeatureSource for KillParticipation {
    fn id(&self) -> &'static str {
        "kill_participation"
    }
    fn name(&self) -> &'static str {
        "Kill Participation"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Combat
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        let player = ctx.player();
        let value = match player.team_kills {
            Some(team_kills) => ratio(player.kills + player.assists, team_kills),
            None => player.challenges.kill_participation,
        };
        Some(value.clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone)]
pub struct DamagePerMinute;

impl MatchFeatureSource for DamagePerMinute {
    fn id(&self) -> &'static str {
        "damage_per_minute"
    }
    fn name(&self) -> &'static str {
        "Damage per Minute"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Combat
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        Some(ctx.per_minute(ctx.player().total_damage_dealt_to_champions))
    }
}

/// Skillshots landed per ability cast, clamped to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct SkillshotHitRate;

impl MatchFeatureSource for SkillshotHitRate {
    fn id(&self) -> &'static str {
        "skillshot_hit_rate"
    }
    fn name(&self) -> &'static str {
        "Skillshot Hit Rate"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Combat
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        let player = ctx.player();
        Some(ratio(player.challenges.skillshots_hit, player.total_ability_casts()).clamp(0.0, 1.0))
    }
}

/// Skillshots dodged per enemy ability cast, clamped to `[0, 1]`.
///
/// The denominator is the enemy team's cast total; when unknown, the opposing laner's
/// casts are used. Without either the rate is 0.
#[derive(Debug, Clone)]
pub struct SkillshotDodgeRate;

impl MatchFeatureSource for SkillshotDodgeRate {
    fn id(&self) -> &'static str {
        "skillshot_dodge_rate"
    }
    fn name(&self) -> &'static str {
        "Skillshot Dodge Rate"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Combat
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        let enemy_casts = ctx
            .record()
            .enemy_team_ability_casts
            .or_else(|| ctx.opponent().map(laneiq_data::PlayerStats::total_ability_casts));
        let Some(enemy_casts) = enemy_casts else {
            return Some(0.0);
        };
        let dodged = ctx.player().challenges.skillshots_dodged;
        Some(ratio(dodged, enemy_casts).clamp(0.0, 1.0))
    }
}

/// Champion damage per gold earned, where 2 damage per gold scores 100.
#[derive(Debug, Clone)]
pub struct CombatEfficiency;

impl MatchFeatureSource for CombatEfficiency {
    fn id(&self) -> &'static str {
        "combat_efficiency"
    }
    fn name(&self) -> &'static str {
        "Combat Efficiency"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Combat
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        let player = ctx.player();
        let per_gold = ratio(player.total_damage_dealt_to_champions, player.gold_earned);
        Some((per_gold / 2.0).clamp(0.0, 1.0) * 100.0)
    }
}

/// Blend of damage output and solo kills on a 0-100 scale.
///
/// ```text
/// dpm_score  = min(dpm / 1000, 1.2) × 100
/// solo_score = min(solo_kills / 5, 1.5) × 100
/// score      = min(0.7 × dpm_score + 0.3 × solo_score, 100)
/// ```
#[derive(Debug, Clone)]
pub struct AggressionScore;

impl MatchFeatureSource for AggressionScore {
    fn id(&self) -> &'static str {
        "aggression_score"
    }
    fn name(&self) -> &'static str {
        "Aggression Score"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Combat
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        let player = ctx.player();
        let dpm = ctx.per_minute(player.total_damage_dealt_to_champions);
        let dpm_score = (dpm / 1000.0).min(1.2) * 100.0;
        let solo_score = (player.challenges.solo_kills as f32 / 5.0).min(1.5) * 100.0;
        Some((0.7 * dpm_score + 0.3 * solo_score).min(100.0))
    }
}

#[derive(Debug, Clone)]
pub struct GoldPerMinute;

impl MatchFeatureSource for GoldPerMinute {
    fn id(&self) -> &'static str {
        "gold_per_minute"
    }
    fn name(&self) -> &'static str {
        "Gold per Minute"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Economy
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        Some(ctx.per_minute(ctx.player().gold_earned))
    }
}

#[derive(Debug, Clone)]
pub struct XpPerMinute;

impl MatchFeatureSource for XpPerMinute {
    fn id(&self) -> &'static str {
        "xp_per_minute"
    }
    fn name(&self) -> &'static str {
        "XP per Minute"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Economy
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        Some(ctx.per_minute(ctx.player().champ_experience))
    }
}

/// Lane and jungle minions per minute.
#[derive(Debug, Clone)]
pub struct CsPerMinute;

impl MatchFeatureSource for CsPerMinute {
    fn id(&self) -> &'static str {
        "cs_per_minute"
    }
    fn name(&self) -> &'static str {
        "CS per Minute"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Economy
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        Some(ctx.per_minute(ctx.player().total_cs()))
    }
}

#[derive(Debug, Clone)]
pub struct LaneMinionsFirst10Minutes;

impl MatchFeatureSource for LaneMinionsFirst10Minutes {
    fn id(&self) -> &'static str {
        "lane_minions_first_10_minutes"
    }
    fn name(&self) -> &'static str {
        "CS @ 10 min"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Economy
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        Some(ctx.player().challenges.lane_minions_first_10_minutes)
    }
}

/// Largest CS lead over the lane opponent at any point of the match.
#[derive(Debug, Clone)]
pub struct MaxCsAdvantage;

impl MatchFeatureSource for MaxCsAdvantage {
    fn id(&self) -> &'static str {
        "max_cs_advantage"
    }
    fn name(&self) -> &'static str {
        "Max CS Lead"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Economy
    }
    fn basis(&self) -> ComparisonBasis {
        ComparisonBasis::Baseline
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        Some(ctx.player().challenges.max_cs_advantage_on_lane_opponent)
    }
}

#[derive(Debug, Clone)]
pub struct MaxLevelLead;

impl MatchFeatureSource for MaxLevelLead {
    fn id(&self) -> &'static str {
        "max_level_lead"
    }
    fn name(&self) -> &'static str {
        "Max Level Lead"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Economy
    }
    fn basis(&self) -> ComparisonBasis {
        ComparisonBasis::Baseline
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        Some(ctx.player().challenges.max_level_lead_lane_opponent)
    }
}

#[derive(Debug, Clone, Copy)]
enum LeadResource {
    Gold,
    Xp,
}

/// Gold or XP lead over the lane opponent at a fixed minute, read from the timeline.
///
/// Uses the last frame whose minute is not after the mark. Requires opponent snapshots.
#[derive(Debug, Clone)]
pub struct LaneLead {
    id: &'static str,
    name: &'static str,
    resource: LeadResource,
    minute: u32,
}

impl LaneLead {
    pub const GOLD_AT_10: Self = Self {
        id: "gold_lead_at_10",
        name: "Gold Lead @ 10 min",
        resource: LeadResource::Gold,
        minute: 10,
    };
    pub const XP_AT_10: Self = Self {
        id: "xp_lead_at_10",
        name: "XP Lead @ 10 min",
        resource: LeadResource::Xp,
        minute: 10,
    };
    pub const GOLD_AT_14: Self = Self {
        id: "gold_lead_at_14",
        name: "Gold Lead @ 14 min",
        resource: LeadResource::Gold,
        minute: 14,
    };
}

impl MatchFeatureSource for LaneLead {
    fn id(&self) -> &str {
        self.id
    }
    fn name(&self) -> &str {
        self.name
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Economy
    }
    fn basis(&self) -> ComparisonBasis {
        ComparisonBasis::Baseline
    }
    fn requires_timeline(&self) -> bool {
        true
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        let (own, opp) = ctx.lane_snapshots_at(self.minute)?;
        let (own, opp) = match self.resource {
            LeadResource::Gold => (own.total_gold, opp.total_gold),
            LeadResource::Xp => (own.xp, opp.xp),
        };
        Some((i64::from(own) - i64::from(opp)) as f32)
    }
}

#[derive(Debug, Clone)]
pub struct VisionScorePerMinute;

impl MatchFeatureSource for VisionScorePerMinute {
    fn id(&self) -> &'static str {
        "vision_score_per_minute"
    }
    fn name(&self) -> &'static str {
        "Vision Score per Minute"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Vision
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        Some(ctx.per_minute(ctx.player().vision_score))
    }
}

#[derive(Debug, Clone)]
pub struct WardsPlacedPerMinute;

impl MatchFeatureSource for WardsPlacedPerMinute {
    fn id(&self) -> &'static str {
        "wards_placed_per_minute"
    }
    fn name(&self) -> &'static str {
        "Wards Placed per Minute"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Vision
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        Some(ctx.per_minute(ctx.player().wards_placed))
    }
}

#[derive(Debug, Clone)]
pub struct ControlWardsPlaced;

impl MatchFeatureSource for ControlWardsPlaced {
    fn id(&self) -> &'static str {
        "control_wards_placed"
    }
    fn name(&self) -> &'static str {
        "Control Wards Placed"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Vision
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        Some(ctx.player().detector_wards_placed as f32)
    }
}

#[derive(Debug, Clone)]
pub struct VisionScoreAdvantage;

impl MatchFeatureSource for VisionScoreAdvantage {
    fn id(&self) -> &'static str {
        "vision_score_advantage"
    }
    fn name(&self) -> &'static str {
        "Vision Advantage vs Laner"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Vision
    }
    fn basis(&self) -> ComparisonBasis {
        ComparisonBasis::Baseline
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        Some(ctx.player().challenges.vision_score_advantage_lane_opponent)
    }
}

/// Share of the match a control ward covered the river or enemy half, in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ControlWardCoverage;

impl MatchFeatureSource for ControlWardCoverage {
    fn id(&self) -> &'static str {
        "control_ward_coverage"
    }
    fn name(&self) -> &'static str {
        "Control Ward Coverage"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Vision
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        let coverage = ctx
            .player()
            .challenges
            .control_ward_time_coverage_in_river_or_enemy_half;
        Some(coverage.clamp(0.0, 1.0))
    }
}

/// `1.5 × vision_score + 5 × control_wards + 2 × wards_killed`.
#[derive(Debug, Clone)]
pub struct VisionDominance;

impl MatchFeatureSource for VisionDominance {
    fn id(&self) -> &'static str {
        "vision_dominance"
    }
    fn name(&self) -> &'static str {
        "Vision Dominance"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Vision
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        let player = ctx.player();
        Some(
            1.5 * player.vision_score as f32
                + 5.0 * player.detector_wards_placed as f32
                + 2.0 * player.wards_killed as f32,
        )
    }
}

/// Turret plates taken before plates fall at 14 minutes.
///
/// Unlike turret takedowns this measures early lane pressure, not the end state of a won
/// match.
#[derive(Debug, Clone)]
pub struct TurretPlatesTaken;

impl MatchFeatureSource for TurretPlatesTaken {
    fn id(&self) -> &'static str {
        "turret_plates_taken"
    }
    fn name(&self) -> &'static str {
        "Turret Plates"
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Objectives
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        Some(ctx.player().challenges.turret_plates_taken as f32)
    }
}

#[derive(Debug, Clone, Copy)]
enum TerritoryMetric {
    ForwardPositioning,
    EnemyTerritory,
    JungleInvasion,
    RiverControl,
}

/// Map-territory metric from the timeline; see [`crate::territory`].
#[derive(Debug, Clone)]
pub struct Territory {
    id: &'static str,
    name: &'static str,
    metric: TerritoryMetric,
}

impl Territory {
    pub const FORWARD_POSITIONING: Self = Self {
        id: "forward_positioning_score",
        name: "Forward Positioning",
        metric: TerritoryMetric::ForwardPositioning,
    };
    pub const ENEMY_TERRITORY: Self = Self {
        id: "enemy_territory_pct",
        name: "Time in Enemy Territory",
        metric: TerritoryMetric::EnemyTerritory,
    };
    pub const JUNGLE_INVASION: Self = Self {
        id: "jungle_invasion_pct",
        name: "Time in Enemy Jungle",
        metric: TerritoryMetric::JungleInvasion,
    };
    pub const RIVER_CONTROL: Self = Self {
        id: "river_control_pct",
        name: "River Control",
        metric: TerritoryMetric::RiverControl,
    };
}

impl MatchFeatureSource for Territory {
    fn id(&self) -> &str {
        self.id
    }
    fn name(&self) -> &str {
        self.name
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Objectives
    }
    fn requires_timeline(&self) -> bool {
        true
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        let territory = ctx.territory()?;
        Some(match self.metric {
            TerritoryMetric::ForwardPositioning => territory.forward_positioning_score,
            TerritoryMetric::EnemyTerritory => territory.enemy_territory_pct,
            TerritoryMetric::JungleInvasion => territory.jungle_invasion_pct,
            TerritoryMetric::RiverControl => territory.river_control_pct,
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum PingKind {
    EnemyMissing,
    OnMyWay,
    AssistMe,
    GetBack,
}

/// Count of one ping type, a communication habit.
#[derive(Debug, Clone)]
pub struct Pings {
    id: &'static str,
    name: &'static str,
    kind: PingKind,
}

impl Pings {
    pub const ENEMY_MISSING: Self = Self {
        id: "enemy_missing_pings",
        name: "Enemy Missing Pings",
        kind: PingKind::EnemyMissing,
    };
    pub const ON_MY_WAY: Self = Self {
        id: "on_my_way_pings",
        name: "On My Way Pings",
        kind: PingKind::OnMyWay,
    };
    pub const ASSIST_ME: Self = Self {
        id: "assist_me_pings",
        name: "Assist Me Pings",
        kind: PingKind::AssistMe,
    };
    pub const GET_BACK: Self = Self {
        id: "get_back_pings",
        name: "Get Back Pings",
        kind: PingKind::GetBack,
    };
}

impl MatchFeatureSource for Pings {
    fn id(&self) -> &str {
        self.id
    }
    fn name(&self) -> &str {
        self.name
    }
    fn category(&self) -> FeatureCategory {
        FeatureCategory::Communication
    }
    fn clone_boxed(&self) -> BoxedMatchFeatureSource {
        Box::new(self.clone())
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract(&self, ctx: &MatchContext<'_>) -> Option<f32> {
        let player = ctx.player();
        let count = match self.kind {
            PingKind::EnemyMissing => player.enemy_missing_pings,
            PingKind::OnMyWay => player.on_my_way_pings,
            PingKind::AssistMe => player.assist_me_pings,
            PingKind::GetBack => player.get_back_pings,
        };
        Some(count as f32)
    }
}

#[cfg(test)]
mod tests {
    use laneiq_data::{
        Challenges, FrameSnapshot, MapPosition, PlayerStats, RawMatchRecord, RawTimelineRecord,
        TeamSide, TimelineFrame,
    };

    use super::*;

    fn record(player: PlayerStats) -> RawMatchRecord {
        RawMatchRecord {
            match_id: "m".into(),
            game_duration_secs: 1800,
            player,
            ..RawMatchRecord::default()
        }
    }

    fn value(source: &dyn MatchFeatureSource, record: &RawMatchRecord) -> Option<f32> {
        source.extract(&MatchContext::new(record, None))
    }

    #[test]
    fn test_feature_ids_are_unique() {
        let sources = all_match_feature_sources();
        let mut ids = sources.iter().map(|s| s.id()).collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), sources.len());
    }

    #[test]
    fn test_kill_participation_prefers_team_kills() {
        let mut player = PlayerStats {
            kills: 4,
            assists: 6,
            team_kills: Some(20),
            challenges: Challenges {
                kill_participation: 0.9,
                ..Challenges::default()
            },
            ..PlayerStats::default()
        };
        assert_eq!(value(&KillParticipation, &record(player.clone())), Some(0.5));
        player.team_kills = None;
        assert_eq!(value(&KillParticipation, &record(player)), Some(0.9));
    }

    #[test]
    fn test_kill_participation_with_zero_team_kills_is_clamped() {
        let player = PlayerStats {
            kills: 2,
            team_kills: Some(0),
            ..PlayerStats::default()
        };
        assert_eq!(value(&KillParticipation, &record(player)), Some(1.0));
    }

    #[test]
    fn test_skillshot_hit_rate_with_no_casts_is_zero() {
        assert_eq!(value(&SkillshotHitRate, &record(PlayerStats::default())), Some(0.0));
    }

    #[test]
    fn test_dodge_rate_falls_back_to_opponent_casts() {
        let mut record = record(PlayerStats {
            challenges: Challenges {
                skillshots_dodged: 10,
                ..Challenges::default()
            },
            ..PlayerStats::default()
        });
        assert_eq!(value(&SkillshotDodgeRate, &record), Some(0.0));

        record.opponent = Some(PlayerStats {
            spell1_casts: 20,
            spell2_casts: 20,
            ..PlayerStats::default()
        });
        assert_eq!(value(&SkillshotDodgeRate, &record), Some(0.25));

        record.enemy_team_ability_casts = Some(200);
        assert_eq!(value(&SkillshotDodgeRate, &record), Some(0.05));
    }

    #[test]
    fn test_combat_efficiency_is_capped_at_100() {
        let player = PlayerStats {
            total_damage_dealt_to_champions: 30_000,
            gold_earned: 10_000,
            ..PlayerStats::default()
        };
        assert_eq!(value(&CombatEfficiency, &record(player)), Some(100.0));

        let player = PlayerStats {
            total_damage_dealt_to_champions: 10_000,
            gold_earned: 10_000,
            ..PlayerStats::default()
        };
        assert_eq!(value(&CombatEfficiency, &record(player)), Some(50.0));
    }

    #[test]
    fn test_aggression_score_blends_damage_and_solo_kills() {
        // 15 000 damage over 30 minutes = 500 dpm -> 50; 5 solo kills -> 100
        let player = PlayerStats {
            total_damage_dealt_to_champions: 15_000,
            challenges: Challenges {
                solo_kills: 5,
                ..Challenges::default()
            },
            ..PlayerStats::default()
        };
        let score = value(&AggressionScore, &record(player)).unwrap();
        assert!((score - 65.0).abs() < 1e-4);
    }

    #[test]
    fn test_vision_dominance_formula() {
        let player = PlayerStats {
            vision_score: 40,
            detector_wards_placed: 3,
            wards_killed: 5,
            ..PlayerStats::default()
        };
        assert_eq!(value(&VisionDominance, &record(player)), Some(85.0));
    }

    #[test]
    fn test_lane_lead_needs_opponent_snapshot() {
        let record = record(PlayerStats::default());
        let mut timeline = RawTimelineRecord {
            match_id: "m".into(),
            frames: vec![TimelineFrame {
                minute: 10,
                player: FrameSnapshot {
                    total_gold: 4_000,
                    xp: 5_000,
                    position: None,
                },
                opponent: None,
            }],
        };
        let ctx = MatchContext::new(&record, Some(&timeline));
        assert_eq!(LaneLead::GOLD_AT_10.extract(&ctx), None);

        timeline.frames[0].opponent = Some(FrameSnapshot {
            total_gold: 4_500,
            xp: 4_000,
            position: None,
        });
        let ctx = MatchContext::new(&record, Some(&timeline));
        assert_eq!(LaneLead::GOLD_AT_10.extract(&ctx), Some(-500.0));
        assert_eq!(LaneLead::XP_AT_10.extract(&ctx), Some(1_000.0));
        // the match ended before 14 minutes; the last frame is used
        assert_eq!(LaneLead::GOLD_AT_14.extract(&ctx), Some(-500.0));
    }

    #[test]
    fn test_territory_without_timeline_is_unavailable() {
        let record = record(PlayerStats::default());
        assert_eq!(value(&Territory::RIVER_CONTROL, &record), None);
    }

    #[test]
    fn test_jungle_invasion_follows_team_side() {
        let mut record = record(PlayerStats::default());
        let timeline = RawTimelineRecord {
            match_id: "m".into(),
            frames: [(10_000, 9_000), (3_000, 4_000)]
                .into_iter()
                .zip(0..)
                .map(|((x, y), minute)| TimelineFrame {
                    minute,
                    player: FrameSnapshot {
                        position: Some(MapPosition { x, y }),
                        ..FrameSnapshot::default()
                    },
                    opponent: None,
                })
                .collect(),
        };
        let ctx = MatchContext::new(&record, Some(&timeline));
        assert_eq!(Territory::JUNGLE_INVASION.extract(&ctx), Some(50.0));
        assert!(Territory::JUNGLE_INVASION.requires_timeline());

        record.team_id = TeamSide::Red;
        let ctx = MatchContext::new(&record, Some(&timeline));
        assert_eq!(Territory::JUNGLE_INVASION.extract(&ctx), Some(50.0));

        let ctx = MatchContext::new(&record, None);
        assert_eq!(Territory::JUNGLE_INVASION.extract(&ctx), None);
    }

    #[test]
    fn test_comparison_basis_per_feature() {
        assert_eq!(DamagePerMinute.basis(), ComparisonBasis::Opponent);
        assert_eq!(LaneLead::GOLD_AT_10.basis(), ComparisonBasis::Baseline);
        assert_eq!(MaxCsAdvantage.basis(), ComparisonBasis::Baseline);
        assert_eq!(Pings::GET_BACK.basis(), ComparisonBasis::Baseline);
        assert_eq!(TurretPlatesTaken.basis(), ComparisonBasis::Baseline);
    }
}
