use laneiq_data::PlayerStats;
use serde::{Deserialize, Serialize};

/// Stats that are high *because* a match was won and therefore never enter the model.
///
/// They are reported through [`DisplayStats`] only.
pub const PROXY_STAT_IDS: [&str; 10] = [
    "kills",
    "deaths",
    "assists",
    "kda",
    "turret_takedowns",
    "inhibitor_takedowns",
    "dragon_kills",
    "baron_kills",
    "damage_dealt_to_objectives",
    "objectives_stolen",
];

/// End-of-match stat block for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayStats {
    pub champion_name: String,
    pub team_position: String,
    pub duration_minutes: f32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    /// `(kills + assists) / deaths`, or `kills + assists` without deaths
    pub kda: f32,
    pub gold_earned: u32,
    pub gold_per_minute: f32,
    pub total_damage_dealt_to_champions: u32,
    pub damage_per_minute: f32,
    pub total_cs: u32,
    pub cs_per_minute: f32,
    pub vision_score: u32,
    pub wards_placed: u32,
    pub wards_killed: u32,
    pub control_wards_placed: u32,
    pub solo_kills: u32,
    pub turret_takedowns: u32,
    pub inhibitor_takedowns: u32,
    pub dragon_kills: u32,
    pub baron_kills: u32,
    pub damage_dealt_to_objectives: u32,
    pub objectives_stolen: u32,
    pub team_damage_percentage: f32,
    pub damage_taken_on_team_percentage: f32,
}

impl DisplayStats {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_player(player: &PlayerStats, duration_minutes: f32) -> Self {
        let takedowns = player.kills + player.assists;
        let kda = if player.deaths == 0 {
            takedowns as f32
        } else {
            takedowns as f32 / player.deaths as f32
        };
        let per_minute = |value: u32| value as f32 / duration_minutes.max(1.0);
        Self {
            champion_name: player.champion_name.clone(),
            team_position: player.team_position.clone(),
            duration_minutes,
            kills: player.kills,
            deaths: player.deaths,
            assists: player.assists,
            kda,
            gold_earned: player.gold_earned,
            gold_per_minute: per_minute(player.gold_earned),
            total_damage_dealt_to_champions: player.total_damage_dealt_to_champions,
            damage_per_minute: per_minute(player.total_damage_dealt_to_champions),
            total_cs: player.total_cs(),
            cs_per_minute: per_minute(player.total_cs()),
            vision_score: player.vision_score,
            wards_placed: player.wards_placed,
            wards_killed: player.wards_killed,
            control_wards_placed: player.detector_wards_placed,
            solo_kills: player.challenges.solo_kills,
            turret_takedowns: player.turret_takedowns,
            inhibitor_takedowns: player.inhibitor_takedowns,
            dragon_kills: player.dragon_kills,
            baron_kills: player.baron_kills,
            damage_dealt_to_objectives: player.damage_dealt_to_objectives,
            objectives_stolen: player.objectives_stolen,
            team_damage_percentage: player.challenges.team_damage_percentage,
            damage_taken_on_team_percentage: player.challenges.damage_taken_on_team_percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kda_without_deaths_is_takedowns() {
        let player = PlayerStats {
            kills: 3,
            assists: 4,
            ..PlayerStats::default()
        };
        assert_eq!(DisplayStats::from_player(&player, 30.0).kda, 7.0);
    }

    #[test]
    fn test_kda_and_rates() {
        let player = PlayerStats {
            kills: 3,
            deaths: 2,
            assists: 5,
            gold_earned: 9_000,
            total_minions_killed: 150,
            neutral_minions_killed: 30,
            turret_takedowns: 2,
            ..PlayerStats::default()
        };
        let stats = DisplayStats::from_player(&player, 30.0);
        assert_eq!(stats.kda, 4.0);
        assert_eq!(stats.gold_per_minute, 300.0);
        assert_eq!(stats.total_cs, 180);
        assert_eq!(stats.cs_per_minute, 6.0);
        assert_eq!(stats.turret_takedowns, 2);
    }
}
