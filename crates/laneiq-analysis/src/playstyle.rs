//! Light-hearted playstyle tags for the player's recent form.
//!
//! Tags are derived from simple averages over the three most recent matches. Rules are
//! evaluated in a fixed order and a player can earn several tags at once; when none
//! matches, the fallback tag "NPC Energy" is returned.

use laneiq_features::{DisplayStats, FeatureSchema, FeatureVector};
use serde::{Deserialize, Serialize};

/// Number of most recent matches considered.
const RECENT_MATCHES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaystyleTag {
    pub title: String,
    pub description: String,
    pub advice: String,
}

impl PlaystyleTag {
    fn new(title: &str, description: String, advice: &str) -> Self {
        Self {
            title: title.to_owned(),
            description,
            advice: advice.to_owned(),
        }
    }
}

/// Averages over the recent window.
#[derive(Debug, Default)]
struct RecentForm {
    win_rate: f32,
    kda: f32,
    kills: f32,
    deaths: f32,
    assists: f32,
    vision_score: f32,
    damage_share: f32,
    damage_taken_share: f32,
    solo_kills: f32,
    gold_per_minute: f32,
    objective_damage: f32,
    objectives_stolen: u32,
    kill_participation: f32,
    max_cs_advantage: f32,
    lane_minions: f32,
    missing_pings: f32,
    control_wards: f32,
    gold_lead_at_10: f32,
}

impl RecentForm {
    #[expect(clippy::cast_precision_loss)]
    fn new(
        schema: &FeatureSchema,
        vectors: &[FeatureVector],
        labels: &[bool],
        display: &[DisplayStats],
    ) -> Option<Self> {
        let n = display.len().min(labels.len()).min(RECENT_MATCHES);
        if n == 0 {
            return None;
        }
        let display = &display[..n];
        let count = n as f32;
        let avg = |f: fn(&DisplayStats) -> f32| display.iter().map(f).sum::<f32>() / count;
        let feature_avg = |id: &str| {
            schema.index_of(id).map_or(0.0, |index| {
                let recent = &vectors[..vectors.len().min(n)];
                if recent.is_empty() {
                    0.0
                } else {
                    recent.iter().map(|v| v.get(index)).sum::<f32>() / recent.len() as f32
                }
            })
        };

        let wins = labels[..n].iter().filter(|w| **w).count();
        Some(Self {
            win_rate: wins as f32 / count * 100.0,
            kda: avg(|s| s.kda),
            kills: avg(|s| s.kills as f32),
            deaths: avg(|s| s.deaths as f32),
            assists: avg(|s| s.assists as f32),
            vision_score: avg(|s| s.vision_score as f32),
            damage_share: avg(|s| s.team_damage_percentage),
            damage_taken_share: avg(|s| s.damage_taken_on_team_percentage),
            solo_kills: avg(|s| s.solo_kills as f32),
            gold_per_minute: avg(|s| s.gold_per_minute),
            objective_damage: avg(|s| s.damage_dealt_to_objectives as f32),
            objectives_stolen: display.iter().map(|s| s.objectives_stolen).sum(),
            kill_participation: feature_avg("kill_participation"),
            max_cs_advantage: feature_avg("max_cs_advantage"),
            lane_minions: feature_avg("lane_minions_first_10_minutes"),
            missing_pings: feature_avg("enemy_missing_pings"),
            control_wards: feature_avg("control_wards_placed"),
            gold_lead_at_10: feature_avg("gold_lead_at_10"),
        })
    }
}

/// Tags describing the three most recent matches.
///
/// All slices are newest-first and index-aligned. Returns an empty list for an empty
/// history.
#[must_use]
pub fn playstyle_tags(
    schema: &FeatureSchema,
    vectors: &[FeatureVector],
    labels: &[bool],
    display: &[DisplayStats],
) -> Vec<PlaystyleTag> {
    let Some(form) = RecentForm::new(schema, vectors, labels, display) else {
        return vec![];
    };
    let mut tags = vec![];
    let f = &form;

    if f.win_rate >= 100.0 && f.kda > 5.0 {
        tags.push(PlaystyleTag::new(
            "Smurf Detected",
            format!("Clean sweep: {:.0}% WR and {:.1} KDA.", f.win_rate, f.kda),
            "Touch grass. Seriously.",
        ));
    } else if f.win_rate >= 66.0 && f.kda > 3.5 {
        tags.push(PlaystyleTag::new(
            "Locked In",
            format!("Sweating with a {:.0}% WR and {:.1} KDA.", f.win_rate, f.kda),
            "Stop tryharding in normals.",
        ));
    }

    if f.deaths > 9.0 {
        tags.push(PlaystyleTag::new(
            "Gray Screen Simulator",
            format!("Averaging {:.1} deaths.", f.deaths),
            "Spend less time on the death timer.",
        ));
    } else if f.deaths > 7.0 && f.win_rate < 34.0 {
        tags.push(PlaystyleTag::new(
            "Tilt Queue?",
            format!("Losing ({:.0}% WR) and feeding ({:.1} deaths).", f.win_rate, f.deaths),
            "Take a break between games.",
        ));
    }

    if f.win_rate <= 33.0 && f.kda > 3.0 && f.damage_share > 0.25 {
        tags.push(PlaystyleTag::new(
            "Loser's Queue Victim",
            format!("Playing well ({:.1} KDA) and still losing.", f.kda),
            "Keep queuing; the results will follow.",
        ));
    }

    if f.win_rate >= 66.0 && f.kda < 2.0 && f.damage_share < 0.15 {
        tags.push(PlaystyleTag::new(
            "Backpack Enjoyer",
            format!("Winning on {:.1}% team damage.", f.damage_share * 100.0),
            "Say thanks to your carries.",
        ));
    }

    if f.solo_kills > 2.0 {
        tags.push(PlaystyleTag::new(
            "Main Character Syndrome",
            format!("{:.1} solo kills per game.", f.solo_kills),
            "It's a team game.",
        ));
    }

    if f.max_cs_advantage > 20.0 {
        tags.push(PlaystyleTag::new(
            "Lane Kingdom",
            format!("Bullying your laner (+{:.0} CS lead).", f.max_cs_advantage),
            "Convert the lead and end.",
        ));
    }

    if f.lane_minions > 80.0 {
        tags.push(PlaystyleTag::new(
            "PvE Player",
            format!("{:.0} lane minions by 10 minutes.", f.lane_minions),
            "Minions don't give LP.",
        ));
    }

    if f.vision_score > 50.0 {
        tags.push(PlaystyleTag::new(
            "Ward Bot",
            format!("Vision score {:.1}.", f.vision_score),
            "Try doing damage next time.",
        ));
    } else if f.vision_score < 10.0 && f.control_wards < 0.5 {
        tags.push(PlaystyleTag::new(
            "Lee Sin Cosplay",
            format!("Vision score {:.1}.", f.vision_score),
            "Buy a ward.",
        ));
    }

    if f.kills > 8.0 && f.deaths > 8.0 {
        tags.push(PlaystyleTag::new(
            "Yasuo Main Energy",
            format!("{:.1} kills and {:.1} deaths. Complete coinflip.", f.kills, f.deaths),
            "Stop diving under tower.",
        ));
    }

    if f.damage_taken_share > 0.30 {
        let description = format!(
            "Tanking {:.1}% of team damage taken.",
            f.damage_taken_share * 100.0
        );
        if f.deaths < 6.0 {
            tags.push(PlaystyleTag::new(
                "Unkillable Demon King",
                description,
                "Spam mastery emote while tanking.",
            ));
        } else {
            tags.push(PlaystyleTag::new("Damage Sponge", description, "Learn to dodge."));
        }
    }

    if f.damage_share > 0.35 {
        tags.push(PlaystyleTag::new(
            "1v9 Machine",
            format!("Doing {:.1}% of team damage.", f.damage_share * 100.0),
            "Don't break your back carrying.",
        ));
    }

    if f.objective_damage > 20_000.0 {
        tags.push(PlaystyleTag::new(
            "Objective Obsessed",
            format!("{:.1}k objective damage per game.", f.objective_damage / 1000.0),
            "Champions give gold too.",
        ));
    }

    if f.gold_per_minute > 500.0 {
        tags.push(PlaystyleTag::new(
            "Capitalist Pig",
            format!("Hoarding {:.0} gold per minute.", f.gold_per_minute),
            "Full build at 20 minutes? Touch grass.",
        ));
    }

    if f.missing_pings > 15.0 {
        tags.push(PlaystyleTag::new(
            "Toxic Pinger",
            format!("{:.1} '?' pings per game.", f.missing_pings),
            "Unbind your ping key.",
        ));
    }

    if f.damage_share < 0.10 && f.assists > 8.0 {
        tags.push(PlaystyleTag::new(
            "KDA Player",
            format!("Only {:.1}% of team damage.", f.damage_share * 100.0),
            "Right-click the enemy champions.",
        ));
    }

    if f.objectives_stolen > 0 {
        tags.push(PlaystyleTag::new(
            "Burglar",
            "Stole an objective. Probably luck.".to_owned(),
            "Don't push your luck.",
        ));
    }

    if f.kill_participation > 0.70 {
        tags.push(PlaystyleTag::new(
            "Participation Trophy",
            format!("{:.0}% kill participation.", f.kill_participation * 100.0),
            "Try doing something on your own.",
        ));
    } else if f.kill_participation < 0.25 && f.win_rate > 50.0 {
        tags.push(PlaystyleTag::new(
            "AFK Splitpusher",
            format!("Winning with {:.0}% kill participation.", f.kill_participation * 100.0),
            "Group up once in a while.",
        ));
    }

    if f.gold_lead_at_10 < -500.0 {
        tags.push(PlaystyleTag::new(
            "Lane Liability",
            format!("{:.0} gold behind at 10 minutes.", -f.gold_lead_at_10),
            "Learn the matchup before the next game.",
        ));
    }
    if f.gold_lead_at_10 > 300.0 && f.win_rate < 34.0 {
        tags.push(PlaystyleTag::new(
            "Professional Choker",
            "Winning lane hard, then throwing the game harder.".to_owned(),
            "Group and play around the lead.",
        ));
    }
    if f.gold_lead_at_10 < -300.0 && f.win_rate > 66.0 {
        tags.push(PlaystyleTag::new(
            "Lucky Charm",
            "Rolled in lane but carried anyway.".to_owned(),
            "Better lucky than good.",
        ));
    }

    if tags.is_empty() {
        tags.push(PlaystyleTag::new(
            "NPC Energy",
            "Nothing stood out in the last matches.".to_owned(),
            "Do something. Anything.",
        ));
    }
    tags
}

#[cfg(test)]
mod tests {
    use laneiq_data::PlayerStats;

    use super::*;

    fn display(player: &PlayerStats) -> DisplayStats {
        DisplayStats::from_player(player, 30.0)
    }

    #[test]
    fn test_empty_history_has_no_tags() {
        let schema = FeatureSchema::standard();
        assert!(playstyle_tags(&schema, &[], &[], &[]).is_empty());
    }

    #[test]
    fn test_quiet_games_fall_back_to_npc_energy() {
        let schema = FeatureSchema::standard();
        let stats = display(&PlayerStats {
            kills: 2,
            deaths: 3,
            assists: 4,
            vision_score: 20,
            gold_earned: 9_000,
            ..PlayerStats::default()
        });
        let tags = playstyle_tags(&schema, &[], &[true, false], &[stats.clone(), stats]);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].title, "NPC Energy");
    }

    #[test]
    fn test_feeding_and_no_vision() {
        let schema = FeatureSchema::standard();
        let stats = display(&PlayerStats {
            kills: 1,
            deaths: 11,
            vision_score: 4,
            ..PlayerStats::default()
        });
        let tags = playstyle_tags(
            &schema,
            &[],
            &[false; 3],
            &[stats.clone(), stats.clone(), stats],
        );
        let titles = tags.iter().map(|t| t.title.as_str()).collect::<Vec<_>>();
        assert!(titles.contains(&"Gray Screen Simulator"));
        assert!(titles.contains(&"Lee Sin Cosplay"));
        assert!(!titles.contains(&"Tilt Queue?"));
    }

    #[test]
    fn test_only_three_most_recent_matches_count() {
        let schema = FeatureSchema::standard();
        let carry = display(&PlayerStats {
            kills: 10,
            deaths: 1,
            assists: 10,
            vision_score: 20,
            ..PlayerStats::default()
        });
        let feeder = display(&PlayerStats {
            deaths: 20,
            vision_score: 20,
            ..PlayerStats::default()
        });
        let tags = playstyle_tags(
            &schema,
            &[],
            &[true, true, true, false],
            &[carry.clone(), carry.clone(), carry, feeder],
        );
        assert_eq!(tags[0].title, "Smurf Detected");
        assert!(tags.iter().all(|t| t.title != "Gray Screen Simulator"));
    }
}
