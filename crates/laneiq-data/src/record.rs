use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed match from the subject player's point of view.
///
/// Records are immutable once fetched and arrive ordered newest-first by
/// [`game_end`](Self::game_end).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMatchRecord {
    /// Platform match identifier (e.g. `EUW1_7000000000`)
    pub match_id: String,
    /// When the match was created
    #[serde(default)]
    pub game_creation: DateTime<Utc>,
    /// When the match ended; history ordering key
    pub game_end: DateTime<Utc>,
    /// Match duration in seconds
    #[serde(default)]
    pub game_duration_secs: u32,
    /// Queue the match was played in
    #[serde(default)]
    pub queue_id: Option<u32>,
    /// Side of the map the subject played on
    #[serde(default)]
    pub team_id: TeamSide,
    /// Whether the subject's team won
    pub win: bool,
    /// Stat block of the subject player
    #[serde(default)]
    pub player: PlayerStats,
    /// Stat block of the opposing laner, when one could be identified
    #[serde(default)]
    pub opponent: Option<PlayerStats>,
    /// Total ability casts by the whole enemy team (denominator for dodge rate)
    #[serde(default)]
    pub enemy_team_ability_casts: Option<u32>,
}

impl RawMatchRecord {
    /// Match duration in minutes, never below one minute.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn duration_minutes(&self) -> f32 {
        (self.game_duration_secs as f32 / 60.0).max(1.0)
    }

    /// Returns the same match seen from the opposing laner's side.
    ///
    /// Subject and opponent stat blocks are swapped, the team side is flipped and the
    /// outcome is inverted. Returns `None` when the record has no opponent.
    #[must_use]
    pub fn mirrored(&self) -> Option<Self> {
        let opponent = self.opponent.clone()?;
        Some(Self {
            match_id: self.match_id.clone(),
            game_creation: self.game_creation,
            game_end: self.game_end,
            game_duration_secs: self.game_duration_secs,
            queue_id: self.queue_id,
            team_id: self.team_id.opposite(),
            win: !self.win,
            player: opponent,
            opponent: Some(self.player.clone()),
            // the opponent faces a different enemy team whose casts are unknown here
            enemy_team_ability_casts: None,
        })
    }
}

/// Side of the map, encoded on the wire as the platform team id (100 / 200).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum TeamSide {
    /// Team 100, base in the bottom-left corner
    #[default]
    Blue,
    /// Team 200, base in the top-right corner
    Red,
}

impl TeamSide {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Blue => Self::Red,
            Self::Red => Self::Blue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid team id {_0} (expected 100 or 200)")]
pub struct InvalidTeamId(#[error(not(source))] pub u16);

impl TryFrom<u16> for TeamSide {
    type Error = InvalidTeamId;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            100 => Ok(Self::Blue),
            200 => Ok(Self::Red),
            _ => Err(InvalidTeamId(value)),
        }
    }
}

impl From<TeamSide> for u16 {
    fn from(side: TeamSide) -> Self {
        match side {
            TeamSide::Blue => 100,
            TeamSide::Red => 200,
        }
    }
}

/// Per-player end-of-match stat block.
///
/// Every field defaults to zero (or empty) when absent from the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerStats {
    pub champion_name: String,
    pub team_position: String,

    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    /// Kills of the whole team, when known (kill participation denominator)
    pub team_kills: Option<u32>,

    pub gold_earned: u32,
    pub total_damage_dealt_to_champions: u32,
    pub champ_experience: u32,
    pub total_minions_killed: u32,
    pub neutral_minions_killed: u32,

    pub vision_score: u32,
    pub wards_placed: u32,
    pub wards_killed: u32,
    pub detector_wards_placed: u32,

    pub enemy_missing_pings: u32,
    pub on_my_way_pings: u32,
    pub assist_me_pings: u32,
    pub get_back_pings: u32,

    pub spell1_casts: u32,
    pub spell2_casts: u32,
    pub spell3_casts: u32,
    pub spell4_casts: u32,

    // Objective and structure stats. These follow from winning rather than cause it and are
    // only ever shown, never used as model inputs.
    pub turret_takedowns: u32,
    pub inhibitor_takedowns: u32,
    pub dragon_kills: u32,
    pub baron_kills: u32,
    pub damage_dealt_to_objectives: u32,
    pub objectives_stolen: u32,

    pub challenges: Challenges,
}

impl PlayerStats {
    /// Sum of casts over all four ability slots.
    #[must_use]
    pub fn total_ability_casts(&self) -> u32 {
        self.spell1_casts
            .saturating_add(self.spell2_casts)
            .saturating_add(self.spell3_casts)
            .saturating_add(self.spell4_casts)
    }

    /// Lane and jungle minions combined.
    #[must_use]
    pub fn total_cs(&self) -> u32 {
        self.total_minions_killed
            .saturating_add(self.neutral_minions_killed)
    }
}

/// Derived per-player metrics computed by the game platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Challenges {
    pub kill_participation: f32,
    pub solo_kills: u32,
    pub skillshots_hit: u32,
    pub skillshots_dodged: u32,
    pub lane_minions_first_10_minutes: f32,
    pub turret_plates_taken: u32,
    pub max_cs_advantage_on_lane_opponent: f32,
    pub max_level_lead_lane_opponent: f32,
    pub vision_score_advantage_lane_opponent: f32,
    pub control_ward_time_coverage_in_river_or_enemy_half: f32,
    pub team_damage_percentage: f32,
    pub damage_taken_on_team_percentage: f32,
}
