//! Map-territory metrics computed from per-minute positions.
//!
//! The map is a square of roughly 14 500 units with the blue base in the bottom-left
//! corner and the red base in the top-right corner. The diagonal from base to base splits
//! the map into the two teams' halves; the river runs perpendicular to it along `y = x`.
//!
//! Every frame with a known position (other than the `(0, 0)` placeholder) is classified:
//!
//! - **Enemy territory**: more than 1 000 units past the centre on the enemy's side of the
//!   `x + y` diagonal
//! - **Enemy jungle**: the quadrant of the enemy jungle on the player's side of the river,
//!   `x > 9 500, y > 7 250` for blue and `x < 5 000, y < 7 250` for red
//! - **River**: within 2 500 units of the `y = x` line and inside `2 500..12 000` on both
//!   axes
//! - **Forward distance**: how far past the centre diagonal (towards the enemy base) the
//!   player stands, in hundreds of units, zero when on the own half

use laneiq_data::{MapPosition, RawTimelineRecord, TeamSide};
use serde::{Deserialize, Serialize};

const MAP_CENTER: i32 = 7_250;
const ENEMY_TERRITORY_MARGIN: i32 = 1_000;
const RIVER_HALF_WIDTH: f32 = 2_500.0;
const RIVER_MIN: i32 = 2_500;
const RIVER_MAX: i32 = 12_000;
const BLUE_ENEMY_JUNGLE_MIN_X: i32 = 9_500;
const RED_ENEMY_JUNGLE_MAX_X: i32 = 5_000;
/// Forward distance (in hundreds of units) that maps to a score of 100.
const FORWARD_SCALE: f32 = 1.45;

/// Territory metrics for one match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerritoryMetrics {
    /// Share of frames spent in enemy territory, in percent
    pub enemy_territory_pct: f32,
    /// Share of frames spent in the enemy jungle, in percent
    pub jungle_invasion_pct: f32,
    /// Share of frames spent in the river, in percent
    pub river_control_pct: f32,
    /// Mean forward distance scaled to `[0, 100]`
    pub forward_positioning_score: f32,
    /// Number of frames that contributed
    pub frames: usize,
}

impl TerritoryMetrics {
    /// Computes territory metrics for the subject of `timeline`.
    ///
    /// Returns `None` when no frame carries a usable position.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_timeline(timeline: &RawTimelineRecord, side: TeamSide) -> Option<Self> {
        let positions = timeline
            .frames
            .iter()
            .filter_map(|frame| frame.player.position)
            .filter(|pos| !(pos.x == 0 && pos.y == 0));

        let mut frames = 0_usize;
        let mut enemy_frames = 0_usize;
        let mut river_frames = 0_usize;
        let mut jungle_frames = 0_usize;
        let mut forward_sum = 0.0_f32;
        for pos in positions {
            frames += 1;
            if in_enemy_territory(pos, side) {
                enemy_frames += 1;
            }
            if in_enemy_jungle(pos, side) {
                jungle_frames += 1;
            }
            if in_river(pos) {
                river_frames += 1;
            }
            forward_sum += forward_distance(pos, side);
        }

        if frames == 0 {
            return None;
        }

        let n = frames as f32;
        Some(Self {
            enemy_territory_pct: enemy_frames as f32 / n * 100.0,
            jungle_invasion_pct: jungle_frames as f32 / n * 100.0,
            river_control_pct: river_frames as f32 / n * 100.0,
            forward_positioning_score: (forward_sum / n / FORWARD_SCALE).min(100.0),
            frames,
        })
    }
}

fn diagonal_offset(pos: MapPosition) -> i32 {
    (pos.x + pos.y) - 2 * MAP_CENTER
}

fn in_enemy_territory(pos: MapPosition, side: TeamSide) -> bool {
    match side {
        TeamSide::Blue => diagonal_offset(pos) > ENEMY_TERRITORY_MARGIN,
        TeamSide::Red => diagonal_offset(pos) < -ENEMY_TERRITORY_MARGIN,
    }
}

fn in_enemy_jungle(pos: MapPosition, side: TeamSide) -> bool {
    match side {
        TeamSide::Blue => pos.x > BLUE_ENEMY_JUNGLE_MIN_X && pos.y > MAP_CENTER,
        TeamSide::Red => pos.x < RED_ENEMY_JUNGLE_MAX_X && pos.y < MAP_CENTER,
    }
}

#[expect(clippy::cast_precision_loss)]
fn in_river(pos: MapPosition) -> bool {
    let distance = (pos.x - pos.y).abs() as f32 / std::f32::consts::SQRT_2;
    let inside = |v: i32| RIVER_MIN < v && v < RIVER_MAX;
    distance < RIVER_HALF_WIDTH && inside(pos.x) && inside(pos.y)
}

#[expect(clippy::cast_precision_loss)]
fn forward_distance(pos: MapPosition, side: TeamSide) -> f32 {
    let offset = match side {
        TeamSide::Blue => diagonal_offset(pos),
        TeamSide::Red => -diagonal_offset(pos),
    };
    offset.max(0) as f32 / 100.0
}

#[cfg(test)]
mod tests {
    use laneiq_data::{FrameSnapshot, TimelineFrame};

    use super::*;

    fn timeline(positions: &[(i32, i32)]) -> RawTimelineRecord {
        RawTimelineRecord {
            match_id: "m".into(),
            frames: positions
                .iter()
                .zip(0..)
                .map(|(&(x, y), minute)| TimelineFrame {
                    minute,
                    player: FrameSnapshot {
                        position: Some(MapPosition { x, y }),
                        ..FrameSnapshot::default()
                    },
                    opponent: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_blue_side_deep_in_red_base_is_enemy_territory() {
        let metrics =
            TerritoryMetrics::from_timeline(&timeline(&[(13_000, 13_000)]), TeamSide::Blue)
                .unwrap();
        assert_eq!(metrics.enemy_territory_pct, 100.0);
        assert_eq!(metrics.river_control_pct, 0.0);
        // (26000 - 14500) / 100 / 1.45 ≈ 79.3
        assert!((metrics.forward_positioning_score - 79.31).abs() < 0.01);
    }

    #[test]
    fn test_red_side_mirrors_blue_side() {
        let metrics =
            TerritoryMetrics::from_timeline(&timeline(&[(1_000, 1_000)]), TeamSide::Red)
                .unwrap();
        assert_eq!(metrics.enemy_territory_pct, 100.0);
        assert!(metrics.forward_positioning_score > 80.0);

        let home =
            TerritoryMetrics::from_timeline(&timeline(&[(1_000, 1_000)]), TeamSide::Blue)
                .unwrap();
        assert_eq!(home.enemy_territory_pct, 0.0);
        assert_eq!(home.forward_positioning_score, 0.0);
    }

    #[test]
    fn test_blue_side_jungle_invasion() {
        // two of four frames inside the red jungle
        let metrics = TerritoryMetrics::from_timeline(
            &timeline(&[(10_500, 8_000), (9_000, 8_000), (1_000, 1_000), (11_000, 12_000)]),
            TeamSide::Blue,
        )
        .unwrap();
        assert_eq!(metrics.jungle_invasion_pct, 50.0);
    }

    #[test]
    fn test_red_side_jungle_invasion() {
        let metrics = TerritoryMetrics::from_timeline(
            &timeline(&[(4_000, 6_000), (5_500, 6_000), (13_000, 13_000)]),
            TeamSide::Red,
        )
        .unwrap();
        assert!((metrics.jungle_invasion_pct - 100.0 / 3.0).abs() < 1e-4);

        // the same path seen from blue side never leaves home
        let blue = TerritoryMetrics::from_timeline(
            &timeline(&[(4_000, 6_000), (5_500, 6_000)]),
            TeamSide::Blue,
        )
        .unwrap();
        assert_eq!(blue.jungle_invasion_pct, 0.0);
    }

    #[test]
    fn test_river_requires_both_axes_inside_band() {
        let metrics = TerritoryMetrics::from_timeline(
            &timeline(&[(7_000, 7_500), (1_000, 1_200), (12_500, 12_500)]),
            TeamSide::Blue,
        )
        .unwrap();
        assert_eq!(metrics.frames, 3);
        assert!((metrics.river_control_pct - 100.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_origin_placeholders_are_skipped() {
        assert!(TerritoryMetrics::from_timeline(&timeline(&[(0, 0)]), TeamSide::Blue).is_none());
        let metrics = TerritoryMetrics::from_timeline(
            &timeline(&[(0, 0), (7_250, 7_250)]),
            TeamSide::Blue,
        )
        .unwrap();
        assert_eq!(metrics.frames, 1);
    }

    #[test]
    fn test_forward_score_is_capped() {
        let metrics =
            TerritoryMetrics::from_timeline(&timeline(&[(14_500, 14_600)]), TeamSide::Blue)
                .unwrap();
        assert_eq!(metrics.forward_positioning_score, 100.0);
    }
}
