use laneiq_data::RawTimelineRecord;
use serde::{Deserialize, Serialize};

/// Per-minute gold and XP of the subject and the opposing laner for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSeries {
    pub match_id: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub minute: u32,
    pub gold: u32,
    pub xp: u32,
    pub opponent_gold: Option<u32>,
    pub opponent_xp: Option<u32>,
    /// `gold - opponent_gold`, when the opponent snapshot exists
    pub gold_delta: Option<i64>,
    pub xp_delta: Option<i64>,
}

impl TimelineSeries {
    #[must_use]
    pub fn from_timeline(timeline: &RawTimelineRecord) -> Self {
        let mut points = timeline
            .frames
            .iter()
            .map(|frame| {
                let opponent = frame.opponent.as_ref();
                SeriesPoint {
                    minute: frame.minute,
                    gold: frame.player.total_gold,
                    xp: frame.player.xp,
                    opponent_gold: opponent.map(|o| o.total_gold),
                    opponent_xp: opponent.map(|o| o.xp),
                    gold_delta: opponent
                        .map(|o| i64::from(frame.player.total_gold) - i64::from(o.total_gold)),
                    xp_delta: opponent.map(|o| i64::from(frame.player.xp) - i64::from(o.xp)),
                }
            })
            .collect::<Vec<_>>();
        points.sort_by_key(|p| p.minute);
        Self {
            match_id: timeline.match_id.clone(),
            points,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
