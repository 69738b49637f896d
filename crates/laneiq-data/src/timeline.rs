use serde::{Deserialize, Serialize};

/// Per-minute snapshots for one match, paired with its [`RawMatchRecord`](crate::RawMatchRecord)
/// by `match_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTimelineRecord {
    pub match_id: String,
    #[serde(default)]
    pub frames: Vec<TimelineFrame>,
}

impl RawTimelineRecord {
    /// Returns the timeline seen from the opposing laner's side.
    ///
    /// Frames without an opponent snapshot are dropped, since the opponent has no
    /// data for them.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            match_id: self.match_id.clone(),
            frames: self
                .frames
                .iter()
                .filter_map(|frame| {
                    let opponent = frame.opponent.clone()?;
                    Some(TimelineFrame {
                        minute: frame.minute,
                        player: opponent,
                        opponent: Some(frame.player.clone()),
                    })
                })
                .collect(),
        }
    }

    /// Last frame at or before `minute`.
    #[must_use]
    pub fn frame_at(&self, minute: u32) -> Option<&TimelineFrame> {
        self.frames
            .iter()
            .filter(|frame| frame.minute <= minute)
            .max_by_key(|frame| frame.minute)
    }
}

/// One per-minute snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineFrame {
    pub minute: u32,
    pub player: FrameSnapshot,
    #[serde(default)]
    pub opponent: Option<FrameSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub total_gold: u32,
    pub xp: u32,
    pub position: Option<MapPosition>,
}

/// Map coordinates in game units (the map spans roughly 0..14 500 on both axes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPosition {
    pub x: i32,
    pub y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(gold: u32) -> FrameSnapshot {
        FrameSnapshot {
            total_gold: gold,
            xp: gold / 2,
            position: None,
        }
    }

    #[test]
    fn test_frame_at_picks_last_frame_not_after_minute() {
        let timeline = RawTimelineRecord {
            match_id: "m".into(),
            frames: (0..=12)
                .map(|minute| TimelineFrame {
                    minute,
                    player: snapshot(minute * 100),
                    opponent: None,
                })
                .collect(),
        };
        assert_eq!(timeline.frame_at(10).unwrap().minute, 10);
        assert_eq!(timeline.frame_at(14).unwrap().minute, 12);
    }

    #[test]
    fn test_frame_at_before_first_frame_is_none() {
        let timeline = RawTimelineRecord {
            match_id: "m".into(),
            frames: vec![TimelineFrame {
                minute: 3,
                player: snapshot(1),
                opponent: None,
            }],
        };
        assert!(timeline.frame_at(2).is_none());
    }

    #[test]
    fn test_mirrored_swaps_snapshots_and_drops_one_sided_frames() {
        let timeline = RawTimelineRecord {
            match_id: "m".into(),
            frames: vec![
                TimelineFrame {
                    minute: 1,
                    player: snapshot(500),
                    opponent: Some(snapshot(400)),
                },
                TimelineFrame {
                    minute: 2,
                    player: snapshot(900),
                    opponent: None,
                },
            ],
        };
        let mirrored = timeline.mirrored();
        assert_eq!(mirrored.frames.len(), 1);
        assert_eq!(mirrored.frames[0].player.total_gold, 400);
        assert_eq!(
            mirrored.frames[0].opponent.as_ref().unwrap().total_gold,
            500
        );
    }
}
